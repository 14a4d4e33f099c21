use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A string-keyed record inside a résumé section (one job, one degree, ...).
pub type ResumeEntry = Map<String, Value>;

/// Structured fields pulled out of a résumé. Every field is optional:
/// `None` means "unknown", never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Option<Vec<ResumeEntry>>,
    #[serde(default)]
    pub education: Option<Vec<ResumeEntry>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub projects: Option<Vec<ResumeEntry>>,
}

impl ResumeData {
    /// Maps recognized keys of an LLM-produced JSON object onto the record.
    ///
    /// Unknown keys are ignored. A key with the wrong shape stays `None`
    /// without affecting the others. Non-object input yields an empty record.
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            name: string_field(obj, "name"),
            email: string_field(obj, "email"),
            phone: string_field(obj, "phone"),
            summary: string_field(obj, "summary"),
            experience: entries_field(obj, "experience"),
            education: entries_field(obj, "education"),
            skills: strings_field(obj, "skills"),
            projects: entries_field(obj, "projects"),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn experience_count(&self) -> usize {
        self.experience.as_ref().map_or(0, Vec::len)
    }

    pub fn education_count(&self) -> usize {
        self.education.as_ref().map_or(0, Vec::len)
    }

    /// Skills joined with ", ", or `None` when there are none.
    pub fn skills_joined(&self) -> Option<String> {
        self.skills
            .as_ref()
            .filter(|s| !s.is_empty())
            .map(|s| s.join(", "))
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn strings_field(obj: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = obj.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
    )
}

fn entries_field(obj: &Map<String, Value>, key: &str) -> Option<Vec<ResumeEntry>> {
    let items = obj.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_object)
            .cloned()
            .collect(),
    )
}

/// An uploaded résumé as held by the in-memory store.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeRecord {
    pub id: Uuid,
    pub filename: String,
    pub content: String,
    pub parsed_data: ResumeData,
    pub uploaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_maps_known_fields() {
        let value = json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": null,
            "summary": "Analyst",
            "experience": [{"company": "Babbage & Co", "position": "Engineer"}],
            "education": [],
            "skills": ["Mathematics", "Engines"],
            "projects": [{"name": "Notes", "technologies": ["paper"]}],
            "hobbies": ["poetry"]
        });

        let data = ResumeData::from_json(&value);
        assert_eq!(data.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(data.phone, None);
        assert_eq!(data.experience_count(), 1);
        assert_eq!(data.education, Some(vec![]));
        assert_eq!(data.skills_joined().as_deref(), Some("Mathematics, Engines"));
        assert_eq!(data.projects.unwrap()[0]["name"], "Notes");
    }

    #[test]
    fn test_from_json_mistyped_field_stays_none() {
        let value = json!({"name": "Grace", "skills": "COBOL, Fortran", "experience": {"a": 1}});
        let data = ResumeData::from_json(&value);
        assert_eq!(data.name.as_deref(), Some("Grace"));
        assert_eq!(data.skills, None);
        assert_eq!(data.experience, None);
    }

    #[test]
    fn test_from_json_non_object_is_empty() {
        assert!(ResumeData::from_json(&json!(["not", "an", "object"])).is_empty());
        assert!(ResumeData::from_json(&json!("text")).is_empty());
    }

    #[test]
    fn test_empty_record_serializes_nulls() {
        let value = serde_json::to_value(ResumeData::default()).unwrap();
        assert_eq!(value["name"], Value::Null);
        assert_eq!(value["skills"], Value::Null);
        assert_eq!(value.as_object().unwrap().len(), 8);
    }

    #[test]
    fn test_deserializes_partial_context() {
        let data: ResumeData = serde_json::from_str(r#"{"skills": ["Rust"]}"#).unwrap();
        assert_eq!(data.skills_joined().as_deref(), Some("Rust"));
        assert_eq!(data.experience_count(), 0);
    }
}
