//! Structured résumé schema shared by both extraction strategies.
//!
//! Every leaf string defaults to `""` and every list to `[]`. Decoding is
//! lenient: absent keys and `null` leaves fall back to the defaults, so
//! consumers never have to tell "missing" from "empty".

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    #[serde(deserialize_with = "lenient::object")]
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "lenient::list")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(deserialize_with = "lenient::list")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "lenient::list")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "lenient::list")]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    #[serde(deserialize_with = "lenient::string")]
    pub position: String,
    #[serde(deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::boolean")]
    pub current: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "lenient::string")]
    pub school: String,
    #[serde(deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::string")]
    pub field: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::boolean")]
    pub current: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    pub level: SkillLevel,
    pub category: SkillCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub technologies: Vec<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub link: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Skill taxonomy
// ────────────────────────────────────────────────────────────────────────────

/// Proficiency level. Free text is accepted; known labels (English or
/// French) collapse onto the closed set, anything else is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
    Other(String),
}

impl SkillLevel {
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        match lower.as_str() {
            "" => SkillLevel::Intermediate,
            "beginner" | "débutant" | "debutant" | "novice" | "notions" | "basic" => {
                SkillLevel::Beginner
            }
            "intermediate" | "intermédiaire" | "intermediaire" | "moyen" => {
                SkillLevel::Intermediate
            }
            "advanced" | "avancé" | "avance" | "confirmé" | "confirme" | "proficient" => {
                SkillLevel::Advanced
            }
            "expert" | "expertise" | "maîtrise" | "maitrise" => SkillLevel::Expert,
            _ => SkillLevel::Other(label.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
            SkillLevel::Other(raw) => raw,
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SkillLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SkillLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient::string(deserializer)?;
        Ok(SkillLevel::from_label(&raw))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SkillCategory {
    Technical,
    Soft,
    Tools,
    #[default]
    Other,
}

impl SkillCategory {
    /// Exact label match; unknown labels land in `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "technical" | "technique" | "techniques" => SkillCategory::Technical,
            "soft" | "comportementale" => SkillCategory::Soft,
            "tools" | "outils" => SkillCategory::Tools,
            _ => SkillCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "technical",
            SkillCategory::Soft => "soft",
            SkillCategory::Tools => "tools",
            SkillCategory::Other => "other",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SkillCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SkillCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient::string(deserializer)?;
        Ok(SkillCategory::from_label(&raw))
    }
}

/// Deserializers that turn `null`, numbers and wrong shapes into defaults
/// instead of failing the whole record.
pub(crate) mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(value_to_string(&Value::deserialize(deserializer)?))
    }

    pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => b,
            Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "oui"),
            Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
            _ => false,
        })
    }

    /// Accepts a JSON array of strings or a single comma/semicolon separated string.
    pub fn string_list<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .iter()
                .map(value_to_string)
                .filter(|s| !s.is_empty())
                .collect(),
            Value::String(s) => s
                .split([',', ';'])
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            _ => Vec::new(),
        })
    }

    /// Anything but a decodable JSON object becomes `T::default()`.
    pub fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(deserializer)? {
            value @ Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => T::default(),
        })
    }

    /// Non-arrays become empty; array items that fail to decode are dropped.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter(|item| item.is_object())
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn value_to_string(value: &Value) -> String {
        match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        }
    }
}
