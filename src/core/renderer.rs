use crate::core::aggregator;
use crate::domain::model::{Member, Pod, PodStats, Solution, Team};

/// Explicit collapse state per collapsible entity, rendered
/// declaratively instead of toggled by ad-hoc class rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollapseState {
    #[default]
    Collapsed,
    Expanded,
}

impl CollapseState {
    pub fn body_class(self) -> &'static str {
        match self {
            CollapseState::Collapsed => " collapsed",
            CollapseState::Expanded => "",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            CollapseState::Collapsed => "▼",
            CollapseState::Expanded => "▲",
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Lowercase, whitespace runs replaced by a single dash.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Toggle identifiers embed the array position so same-named pods and
/// teams can never collide.
pub fn pod_toggle_id(pod_index: usize, pod: &Pod) -> String {
    format!("pod-{}-{}", pod_index, slugify(&pod.name))
}

pub fn team_toggle_id(pod_index: usize, team_index: usize, team: &Team) -> String {
    format!("team-{}-{}-{}", pod_index, team_index, slugify(&team.name))
}

fn solutions_toggle_id(pod_index: usize, pod: &Pod) -> String {
    format!("solutions-{}-{}", pod_index, slugify(&pod.name))
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

fn render_skill_group(label: &str, skills: &[String]) -> String {
    if skills.is_empty() {
        return String::new();
    }
    let tags: String = skills
        .iter()
        .map(|skill| format!(r#"<span class="skill-tag">{}</span>"#, escape_html(skill)))
        .collect();
    format!(
        concat!(
            r#"<div class="member-skillset">"#,
            r#"<div class="skillset-label">{}</div>"#,
            r#"<div class="skills-list">{}</div>"#,
            "</div>"
        ),
        label, tags
    )
}

pub fn render_member(member: &Member) -> String {
    let name_html = match member.name.as_deref() {
        Some(name) => escape_html(name),
        None => "<em>Vacancy</em>".to_string(),
    };

    let email_html = match member.email.as_deref() {
        Some(email) if !email.is_empty() => {
            format!(r#"<div class="member-email">{}</div>"#, escape_html(email))
        }
        _ => String::new(),
    };

    let supplier_html = match member.supplier.as_deref() {
        Some(supplier) => format!(
            r#"<div class="member-supplier">Supplier: {}</div>"#,
            escape_html(supplier)
        ),
        None => String::new(),
    };

    let on_leave_html = if member.on_leave {
        r#"<div class="member-on-leave">On leave</div>"#.to_string()
    } else {
        String::new()
    };

    let contract_class = member.contract_type.badge_class();
    let skills: String = [
        render_skill_group("Career Skillset", &member.career_skillset),
        render_skill_group("Team Skillset", &member.team_skillset),
        render_skill_group("Daily Skillset", &member.daily_skillset),
        render_skill_group("General Competencies", &member.general_competencies),
    ]
    .concat();

    format!(
        concat!(
            r#"<div class="member-card">"#,
            r#"<div class="member-name">{name}</div>"#,
            "{email}",
            "<div>",
            r#"<span class="member-role">{role}</span> "#,
            r#"<span class="member-role-group">{role_group}</span> "#,
            r#"<span class="member-contract {contract_class}">{contract}</span>"#,
            "</div>",
            "{supplier}{on_leave}{skills}",
            "</div>"
        ),
        name = name_html,
        email = email_html,
        role = escape_html(&member.role),
        role_group = escape_html(&member.role_group),
        contract_class = contract_class,
        contract = member.contract_type.label(),
        supplier = supplier_html,
        on_leave = on_leave_html,
        skills = skills,
    )
}

fn render_solution(solution: &Solution) -> String {
    format!(
        concat!(
            r#"<div class="solution-item">"#,
            r#"<div class="solution-name">{}</div>"#,
            r#"<div class="solution-description">{}</div>"#,
            "</div>"
        ),
        escape_html(&solution.name),
        escape_html(&solution.description)
    )
}

fn render_member_list(label: &str, class: &str, members: &[Member]) -> String {
    let cards: String = members.iter().map(render_member).collect();
    format!(
        concat!(
            r#"<div class="{}">"#,
            r#"<div class="subsection-label">{}</div>"#,
            "{}",
            "</div>"
        ),
        class, label, cards
    )
}

pub fn render_team(
    pod_index: usize,
    team_index: usize,
    team: &Team,
    state: CollapseState,
) -> String {
    let team_id = team_toggle_id(pod_index, team_index, team);
    let supporting_badge = if team.supporting.is_empty() {
        String::new()
    } else {
        format!(
            r#"<span class="supporting-count">{} supporting</span> "#,
            team.supporting.len()
        )
    };

    let supporting_html = if team.supporting.is_empty() {
        String::new()
    } else {
        render_member_list("Supporting", "supporting-subsection", &team.supporting)
    };

    format!(
        concat!(
            r#"<div class="team-section">"#,
            r#"<div class="team-header" data-toggle="{id}">"#,
            r#"<div class="team-name">{name}</div>"#,
            r#"<div class="team-meta">"#,
            r#"<span class="team-members-count">{members}</span> "#,
            "{supporting_badge}",
            r#"<span class="collapse-icon" id="icon-{id}">{icon}</span>"#,
            "</div>",
            "</div>",
            r#"<div class="team-body{body_class}" id="{id}">"#,
            "{member_list}{supporting}",
            "</div>",
            "</div>"
        ),
        id = team_id,
        name = escape_html(&team.name),
        members = plural(team.members.len(), "member", "members"),
        supporting_badge = supporting_badge,
        icon = state.icon(),
        body_class = state.body_class(),
        member_list = render_member_list("Members", "members-subsection", &team.members),
        supporting = supporting_html,
    )
}

pub fn render_pod(pod_index: usize, pod: &Pod, stats: &PodStats, state: CollapseState) -> String {
    let pod_id = pod_toggle_id(pod_index, pod);
    let solutions_id = solutions_toggle_id(pod_index, pod);

    let leadership = if pod.leadership.is_empty() {
        "None specified".to_string()
    } else {
        escape_html(&pod.leadership.join(", "))
    };

    let solution_badge = if stats.solution_count == 0 {
        String::new()
    } else {
        format!(
            r#"<span class="solution-count">{}</span> "#,
            plural(stats.solution_count, "solution", "solutions")
        )
    };

    let solutions_html = if pod.solutions.is_empty() {
        r#"<div class="no-solutions">No solutions defined</div>"#.to_string()
    } else {
        pod.solutions.iter().map(render_solution).collect()
    };

    let teams_html: String = pod
        .teams
        .iter()
        .enumerate()
        .map(|(team_index, team)| render_team(pod_index, team_index, team, CollapseState::default()))
        .collect();

    format!(
        concat!(
            r#"<div class="pod-card">"#,
            r#"<div class="pod-header" data-toggle="{id}">"#,
            r#"<div class="pod-name">{name}</div>"#,
            r#"<div class="pod-meta">"#,
            r#"<span class="team-count">{teams} teams</span> "#,
            r#"<span class="individual-count">{individuals}</span> "#,
            r#"<span class="vacancy-count">{vacancies}</span> "#,
            "{solution_badge}",
            r#"<span class="collapse-icon" id="icon-{id}">{icon}</span>"#,
            "</div>",
            "</div>",
            r#"<div class="pod-content{body_class}" id="{id}">"#,
            r#"<div class="leadership">"#,
            r#"<div class="leadership-label">Leadership</div>"#,
            r#"<div class="leadership-names">{leadership}</div>"#,
            "</div>",
            r#"<div class="solutions-section">"#,
            r#"<div class="solutions-label" data-toggle="{solutions_id}">Solutions "#,
            r#"<span class="collapse-icon" id="icon-{solutions_id}">{solutions_icon}</span></div>"#,
            r#"<div class="solutions-list{solutions_class}" id="{solutions_id}">{solutions}</div>"#,
            "</div>",
            r#"<div class="teams-preview">{teams_html}</div>"#,
            "</div>",
            "</div>"
        ),
        id = pod_id,
        name = escape_html(&pod.name),
        teams = stats.team_count,
        individuals = plural(stats.distinct_individual_count, "individual", "individuals"),
        vacancies = plural(stats.distinct_vacancy_count, "vacancy", "vacancies"),
        solution_badge = solution_badge,
        icon = state.icon(),
        body_class = state.body_class(),
        leadership = leadership,
        solutions_id = solutions_id,
        solutions_icon = CollapseState::default().icon(),
        solutions_class = CollapseState::default().body_class(),
        solutions = solutions_html,
        teams_html = teams_html,
    )
}

/// Render the whole collection, all sections default-collapsed. Stats are
/// derived here so callers only need the sorted pods.
pub fn render_pods(pods: &[Pod]) -> String {
    if pods.is_empty() {
        return r#"<div class="no-results">No pods found.</div>"#.to_string();
    }
    pods.iter()
        .enumerate()
        .map(|(pod_index, pod)| {
            let stats = aggregator::derive_stats(pod);
            render_pod(pod_index, pod, &stats, CollapseState::default())
        })
        .collect()
}

/// One delegated click listener keyed by data-toggle attributes; markup
/// carries no inline handlers.
const TOGGLE_SCRIPT: &str = r#"<script>
document.addEventListener('click', function (event) {
  var header = event.target.closest('[data-toggle]');
  if (!header) return;
  var id = header.getAttribute('data-toggle');
  var body = document.getElementById(id);
  if (!body) return;
  var collapsed = body.classList.toggle('collapsed');
  var icon = document.getElementById('icon-' + id);
  if (icon) icon.textContent = collapsed ? '▼' : '▲';
});
</script>"#;

const PAGE_STYLE: &str = r#"<style>
.collapsed { display: none; }
.pod-header, .team-header, .solutions-label { cursor: pointer; }
.member-contract.vacancy { color: #b00020; }
.member-contract.third-party { color: #7b5800; }
.member-on-leave { font-style: italic; color: #666; }
</style>"#;

pub fn render_page(version: &str, pods: &[Pod]) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            "<title>Pod Directory</title>{style}</head><body>",
            r#"<header class="page-header"><h1>Pod Directory</h1>"#,
            r#"<div class="version-label">Version: {version}</div>"#,
            r#"<a href="/auth/logout">Sign out</a></header>"#,
            r#"<main id="podList">{pods}</main>"#,
            "{script}</body></html>"
        ),
        style = PAGE_STYLE,
        version = escape_html(version),
        pods = render_pods(pods),
        script = TOGGLE_SCRIPT,
    )
}

pub fn render_login_page(error: Option<&str>) -> String {
    let notice = match error {
        Some(_) => r#"<div class="auth-error">Sign-in failed. Access is restricted to the allowed email domain.</div>"#,
        None => "",
    };
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            "<title>Pod Directory</title>{style}</head><body>",
            r#"<main class="login">{notice}"#,
            r#"<a class="login-link" href="/auth/google">Sign in with Google</a>"#,
            "</main></body></html>"
        ),
        style = PAGE_STYLE,
        notice = notice,
    )
}

/// Total load failure replaces the entire UI with a single notice.
pub fn render_error_page() -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            "<title>Pod Directory</title>{style}</head><body>",
            r#"<div class="loading">Error loading data. Please try again later.</div>"#,
            "</body></html>"
        ),
        style = PAGE_STYLE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ContractType;

    fn empty_member() -> Member {
        Member {
            name: None,
            email: None,
            role: String::new(),
            role_group: String::new(),
            contract_type: ContractType::Vacancy,
            supplier: None,
            on_leave: false,
            career_skillset: vec![],
            team_skillset: vec![],
            daily_skillset: vec![],
            general_competencies: vec![],
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_vacancy_placeholder() {
        let html = render_member(&empty_member());
        assert!(html.contains("<em>Vacancy</em>"));
        assert!(html.contains("member-contract vacancy"));
    }

    #[test]
    fn test_member_fields_escaped() {
        let member = Member {
            name: Some("<script>evil</script>".to_string()),
            role: "Engineer<b>".to_string(),
            ..empty_member()
        };
        let html = render_member(&member);
        assert!(!html.contains("<script>evil"));
        assert!(html.contains("&lt;script&gt;evil&lt;/script&gt;"));
        assert!(html.contains("Engineer&lt;b&gt;"));
    }

    #[test]
    fn test_supplier_and_on_leave() {
        let member = Member {
            name: Some("Ada".to_string()),
            contract_type: ContractType::ThirdPartyPartner,
            supplier: Some("Acme & Co".to_string()),
            on_leave: true,
            ..empty_member()
        };
        let html = render_member(&member);
        assert!(html.contains("Supplier: Acme &amp; Co"));
        assert!(html.contains("On leave"));
        assert!(html.contains("member-contract third-party"));
    }

    #[test]
    fn test_skill_groups_rendered_only_when_non_empty() {
        let member = Member {
            name: Some("Ada".to_string()),
            contract_type: ContractType::Permanent,
            career_skillset: vec!["Rust".to_string()],
            ..empty_member()
        };
        let html = render_member(&member);
        assert!(html.contains("Career Skillset"));
        assert!(!html.contains("Team Skillset"));
        assert!(!html.contains("General Competencies"));
    }

    #[test]
    fn test_toggle_ids_unique_for_duplicate_team_names() {
        let team = Team {
            name: "Core".to_string(),
            members: vec![],
            supporting: vec![],
        };
        let a = team_toggle_id(0, 0, &team);
        let b = team_toggle_id(0, 1, &team);
        assert_ne!(a, b);
        assert_eq!(a, "team-0-0-core");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Data and AI   Platform"), "data-and-ai-platform");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_render_pod_counts_and_leadership() {
        let pod = Pod {
            name: "Payments".to_string(),
            leadership: vec!["Ada".to_string(), "Grace".to_string()],
            solutions: vec![Solution {
                name: "Billing".to_string(),
                description: "Invoices".to_string(),
            }],
            teams: vec![Team {
                name: "Core".to_string(),
                members: vec![Member {
                    name: None,
                    role: "Engineer".to_string(),
                    role_group: "Backend".to_string(),
                    ..empty_member()
                }],
                supporting: vec![],
            }],
        };
        let stats = aggregator::derive_stats(&pod);
        let html = render_pod(0, &pod, &stats, CollapseState::default());
        assert!(html.contains("1 teams"));
        assert!(html.contains("1 vacancy"));
        assert!(html.contains("Ada, Grace"));
        assert!(html.contains("1 solution"));
        assert!(html.contains("collapsed"));
        assert!(html.contains("data-toggle=\"pod-0-payments\""));
    }

    #[test]
    fn test_render_pod_empty_sections() {
        let pod = Pod {
            name: "EMO".to_string(),
            leadership: vec![],
            solutions: vec![],
            teams: vec![],
        };
        let stats = aggregator::derive_stats(&pod);
        let html = render_pod(0, &pod, &stats, CollapseState::default());
        assert!(html.contains("None specified"));
        assert!(html.contains("No solutions defined"));
        assert!(html.contains("0 vacancies"));
        assert!(!html.contains("solution-count"));
    }

    #[test]
    fn test_supporting_subsection_only_when_non_empty() {
        let mut team = Team {
            name: "Core".to_string(),
            members: vec![],
            supporting: vec![],
        };
        let html = render_team(0, 0, &team, CollapseState::default());
        assert!(!html.contains("Supporting"));

        team.supporting.push(empty_member());
        let html = render_team(0, 0, &team, CollapseState::default());
        assert!(html.contains("1 supporting"));
        assert!(html.contains("supporting-subsection"));
    }

    #[test]
    fn test_render_pods_empty_collection() {
        assert!(render_pods(&[]).contains("No pods found."));
    }

    #[test]
    fn test_expanded_state_swaps_icon_and_class() {
        let team = Team {
            name: "Core".to_string(),
            members: vec![],
            supporting: vec![],
        };
        let html = render_team(0, 0, &team, CollapseState::Expanded);
        assert!(html.contains('▲'));
        assert!(!html.contains("team-body collapsed"));
    }

    #[test]
    fn test_page_contains_delegated_script() {
        let page = render_page("v1", &[]);
        assert!(page.contains("data-toggle"));
        assert!(page.contains("addEventListener"));
        assert!(!page.contains("onclick"));
    }
}
