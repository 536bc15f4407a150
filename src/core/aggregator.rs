use crate::domain::model::{ContractType, Member, Pod, PodStats};
use std::collections::HashSet;

/// Stable sort by lowercased name; pods with a missing name sort as the
/// empty string. Idempotent.
pub fn sort_pods(pods: &mut [Pod]) {
    pods.sort_by_cached_key(|pod| pod.name.to_lowercase());
}

/// Single scan over every team's member and supporting lists.
pub fn derive_stats(pod: &Pod) -> PodStats {
    let mut individuals: HashSet<String> = HashSet::new();
    let mut vacancies: HashSet<String> = HashSet::new();

    for team in &pod.teams {
        for member in team.members.iter().chain(team.supporting.iter()) {
            if let Some(key) = individual_key(member) {
                individuals.insert(key);
            }
            if let Some(key) = vacancy_key(member) {
                vacancies.insert(key);
            }
        }
    }

    PodStats {
        team_count: pod.teams.len(),
        distinct_individual_count: individuals.len(),
        distinct_vacancy_count: vacancies.len(),
        solution_count: pod.solutions.len(),
    }
}

/// Identity key for distinct-individual counting: email if present,
/// else name, case-insensitively. Vacancies carry neither and get no key.
fn individual_key(member: &Member) -> Option<String> {
    let key = member
        .email
        .as_deref()
        .filter(|email| !email.trim().is_empty())
        .or(member.name.as_deref())?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some(key.to_lowercase())
}

/// Identity key for distinct-vacancy counting: the (role, role_group)
/// pair, case-insensitively, only for vacancies with a non-blank key.
fn vacancy_key(member: &Member) -> Option<String> {
    if member.contract_type != ContractType::Vacancy {
        return None;
    }
    let role = member.role.trim().to_lowercase();
    let role_group = member.role_group.trim().to_lowercase();
    if role.is_empty() && role_group.is_empty() {
        return None;
    }
    Some(format!("{}|{}", role, role_group))
}
