use serde::{Deserialize, Serialize};

/// Top-level organizational unit. One JSON file per pod under
/// `pods/<version>/<slug>.json`. Missing arrays default to empty so a
/// sparse descriptor still loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pod {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub leadership: Vec<String>,
    #[serde(default)]
    pub solutions: Vec<Solution>,
    #[serde(default)]
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supporting: Vec<Member>,
}

/// A person or open vacancy. `name == None` denotes a vacancy; the
/// renderer substitutes a placeholder label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub role_group: String,
    #[serde(default)]
    pub contract_type: ContractType,
    /// Only meaningful for 3rd Party Partner members; the repair utility
    /// strips it everywhere else.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, rename = "onLeave", skip_serializing_if = "is_false")]
    pub on_leave: bool,
    #[serde(default, rename = "careerSkillset", skip_serializing_if = "Vec::is_empty")]
    pub career_skillset: Vec<String>,
    #[serde(default, rename = "teamSkillset", skip_serializing_if = "Vec::is_empty")]
    pub team_skillset: Vec<String>,
    #[serde(default, rename = "dailySkillset", skip_serializing_if = "Vec::is_empty")]
    pub daily_skillset: Vec<String>,
    #[serde(
        default,
        rename = "generalCompetencies",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub general_competencies: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Unknown contract types deserialize as `Vacancy` so one bad member
/// does not sink its whole pod file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ContractType {
    Permanent,
    #[serde(rename = "3rd Party Partner")]
    ThirdPartyPartner,
    #[default]
    Vacancy,
}

impl<'de> Deserialize<'de> for ContractType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "Permanent" => ContractType::Permanent,
            "3rd Party Partner" => ContractType::ThirdPartyPartner,
            _ => ContractType::Vacancy,
        })
    }
}

impl ContractType {
    pub fn label(&self) -> &'static str {
        match self {
            ContractType::Permanent => "Permanent",
            ContractType::ThirdPartyPartner => "3rd Party Partner",
            ContractType::Vacancy => "Vacancy",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            ContractType::Permanent => "",
            ContractType::ThirdPartyPartner => "third-party",
            ContractType::Vacancy => "vacancy",
        }
    }
}

/// Summary statistics derived per pod by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PodStats {
    pub team_count: usize,
    pub distinct_individual_count: usize,
    pub distinct_vacancy_count: usize,
    pub solution_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_defaults() {
        let member: Member = serde_json::from_str("{}").unwrap();
        assert_eq!(member.name, None);
        assert_eq!(member.contract_type, ContractType::Vacancy);
        assert!(member.career_skillset.is_empty());
        assert!(!member.on_leave);
    }

    #[test]
    fn test_unknown_contract_type_coerces_to_vacancy() {
        let member: Member =
            serde_json::from_str(r#"{"contract_type": "Contractor"}"#).unwrap();
        assert_eq!(member.contract_type, ContractType::Vacancy);
    }

    #[test]
    fn test_contract_type_wire_names() {
        let member: Member =
            serde_json::from_str(r#"{"contract_type": "3rd Party Partner"}"#).unwrap();
        assert_eq!(member.contract_type, ContractType::ThirdPartyPartner);
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["contract_type"], "3rd Party Partner");
    }

    #[test]
    fn test_pod_defaults_missing_arrays() {
        let pod: Pod = serde_json::from_str(r#"{"name": "Payments"}"#).unwrap();
        assert_eq!(pod.name, "Payments");
        assert!(pod.leadership.is_empty());
        assert!(pod.solutions.is_empty());
        assert!(pod.teams.is_empty());
    }
}
