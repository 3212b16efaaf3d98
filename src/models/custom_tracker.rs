use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "tracker_unit_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Number,
    Scale,
    Boolean,
    String,
}

impl UnitType {
    /// Parses the wire value; used instead of serde so a bad value maps to
    /// a 400 with the expected message rather than a body rejection.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "number" => Some(UnitType::Number),
            "scale" => Some(UnitType::Scale),
            "boolean" => Some(UnitType::Boolean),
            "string" => Some(UnitType::String),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomTracker {
    pub id: Uuid,
    pub user_id: Uuid,
    pub label: String,
    pub icon: String,
    pub unit: String,
    pub unit_type: UnitType,
    pub max_value: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomTrackerValue {
    pub id: Uuid,
    pub tracker_id: Uuid,
    pub check_in_id: Uuid,
    pub value: String,
    pub ts_utc: DateTime<Utc>,
}

/// Tracker value as submitted inside a check-in: `id` names the tracker,
/// `value` arrives as whatever JSON type the tracker's unit produces.
#[derive(Debug, Deserialize)]
pub struct CreateTrackerValue {
    pub id: Uuid,
    pub value: serde_json::Value,
}

/// Text rendering used for storage: JSON strings are stored as-is, every
/// other type keeps its JSON text form.
pub fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTrackerWithValues {
    #[serde(flatten)]
    pub tracker: CustomTracker,
    pub values: Vec<CustomTrackerValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomTrackerRequest {
    pub label: Option<String>,
    pub icon: Option<String>,
    pub unit: Option<String>,
    pub unit_type: Option<String>,
    pub max_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomTrackerRequest {
    pub label: Option<String>,
    pub icon: Option<String>,
    pub unit: Option<String>,
    pub unit_type: Option<String>,
    pub max_value: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_type_parses_all_valid_values() {
        assert_eq!(UnitType::parse("number"), Some(UnitType::Number));
        assert_eq!(UnitType::parse("scale"), Some(UnitType::Scale));
        assert_eq!(UnitType::parse("boolean"), Some(UnitType::Boolean));
        assert_eq!(UnitType::parse("string"), Some(UnitType::String));
    }

    #[test]
    fn test_unit_type_rejects_unknown() {
        assert_eq!(UnitType::parse("percentage"), None);
        assert_eq!(UnitType::parse("Number"), None);
        assert_eq!(UnitType::parse(""), None);
    }

    #[test]
    fn test_value_text_keeps_strings_and_renders_other_types() {
        assert_eq!(value_text(&serde_json::json!("high")), "high");
        assert_eq!(value_text(&serde_json::json!(7)), "7");
        assert_eq!(value_text(&serde_json::json!(2.5)), "2.5");
        assert_eq!(value_text(&serde_json::json!(true)), "true");
    }
}
