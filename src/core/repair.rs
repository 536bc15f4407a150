use serde_json::{json, Value};

const VALID_CONTRACT_TYPES: [&str; 3] = ["Permanent", "3rd Party Partner", "Vacancy"];
const SKILL_GROUPS: [&str; 4] = [
    "careerSkillset",
    "teamSkillset",
    "dailySkillset",
    "generalCompetencies",
];

/// Normalize one pod document in place and return a description of every
/// fix applied. Runs offline, out of band; the runtime loader and
/// renderer trust their input.
pub fn normalize_pod(pod: &mut Value, file_stem: &str) -> Vec<String> {
    let mut fixes = Vec::new();

    let Some(root) = pod.as_object_mut() else {
        fixes.push("Document is not an object, replaced with empty pod".to_string());
        *pod = json!({
            "name": file_stem.to_uppercase(),
            "leadership": [],
            "solutions": [],
            "teams": [],
        });
        return fixes;
    };

    if !root.get("name").map(Value::is_string).unwrap_or(false) {
        root.insert("name".to_string(), json!(file_stem.to_uppercase()));
        fixes.push("Added missing name".to_string());
    }

    for key in ["leadership", "solutions", "teams"] {
        if !root.get(key).map(Value::is_array).unwrap_or(false) {
            root.insert(key.to_string(), json!([]));
            fixes.push(format!("Added missing {} array", key));
        }
    }

    let Some(teams) = root.get_mut("teams").and_then(Value::as_array_mut) else {
        return fixes;
    };

    for (team_index, team) in teams.iter_mut().enumerate() {
        let Some(team) = team.as_object_mut() else {
            continue;
        };

        if !team.get("name").map(Value::is_string).unwrap_or(false) {
            team.insert("name".to_string(), json!(format!("Team {}", team_index + 1)));
            fixes.push(format!("Team {}: Added missing name", team_index + 1));
        }
        let team_name = team
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        for list in ["members", "supporting"] {
            if !team.get(list).map(Value::is_array).unwrap_or(false) {
                team.insert(list.to_string(), json!([]));
                fixes.push(format!("Team \"{}\": Added missing {} array", team_name, list));
            }
        }

        for list in ["members", "supporting"] {
            let Some(members) = team.get_mut(list).and_then(Value::as_array_mut) else {
                continue;
            };
            for (member_index, member) in members.iter_mut().enumerate() {
                let Some(member) = member.as_object_mut() else {
                    continue;
                };
                normalize_member(member, &team_name, member_index, &mut fixes);
            }
        }
    }

    fixes
}

fn normalize_member(
    member: &mut serde_json::Map<String, Value>,
    team_name: &str,
    member_index: usize,
    fixes: &mut Vec<String>,
) {
    let who = member
        .get("name")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| format!("Member {}", member_index + 1));

    for key in ["role", "role_group"] {
        if !member.get(key).map(Value::is_string).unwrap_or(false) {
            member.insert(key.to_string(), json!(""));
            fixes.push(format!("Team \"{}\", {}: Added missing {}", team_name, who, key));
        }
    }

    match member.get("contract_type").and_then(Value::as_str) {
        Some(value) if VALID_CONTRACT_TYPES.contains(&value) => {}
        Some(value) => {
            fixes.push(format!(
                "Team \"{}\", {}: Invalid contract_type \"{}\", changed to Vacancy",
                team_name, who, value
            ));
            member.insert("contract_type".to_string(), json!("Vacancy"));
        }
        None => {
            member.insert("contract_type".to_string(), json!("Vacancy"));
            fixes.push(format!(
                "Team \"{}\", {}: Added missing contract_type",
                team_name, who
            ));
        }
    }

    for key in SKILL_GROUPS {
        if !member.get(key).map(Value::is_array).unwrap_or(false) {
            member.insert(key.to_string(), json!([]));
            fixes.push(format!("Team \"{}\", {}: Added missing {}", team_name, who, key));
        }
    }

    for key in ["name", "email"] {
        if let Some(value) = member.get(key) {
            if !value.is_string() && !value.is_null() {
                member.insert(key.to_string(), Value::Null);
                fixes.push(format!(
                    "Team \"{}\", {}: Invalid {} type, set to null",
                    team_name, who, key
                ));
            }
        }
    }

    let is_partner = member.get("contract_type").and_then(Value::as_str)
        == Some("3rd Party Partner");
    if is_partner {
        match member.get("supplier") {
            None => {
                member.insert("supplier".to_string(), Value::Null);
                fixes.push(format!(
                    "Team \"{}\", {}: Added missing supplier field",
                    team_name, who
                ));
            }
            Some(value) if !value.is_string() && !value.is_null() => {
                member.insert("supplier".to_string(), Value::Null);
                fixes.push(format!(
                    "Team \"{}\", {}: Invalid supplier type, set to null",
                    team_name, who
                ));
            }
            _ => {}
        }
    } else if member.remove("supplier").is_some() {
        fixes.push(format!(
            "Team \"{}\", {}: Removed supplier from non-partner member",
            team_name, who
        ));
    }

    if let Some(value) = member.get("onLeave") {
        if !value.is_boolean() {
            member.remove("onLeave");
            fixes.push(format!(
                "Team \"{}\", {}: Invalid onLeave type, removed",
                team_name, who
            ));
        }
    }
}
