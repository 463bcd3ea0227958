use serde::{Deserialize, Serialize};

/// Flat, serializable copy of a pet. This is the save file record.
///
/// Every field is required; a record missing any of them does not
/// deserialize and is treated as corrupt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetSnapshot {
    pub name: String,
    pub hunger: f64,
    pub happiness: f64,
    pub energy: f64,
    #[serde(alias = "ageSeconds")]
    pub age_seconds: f64,
    pub alive: bool,
    /// Epoch seconds of the last decay application.
    #[serde(alias = "lastUpdateTimestamp")]
    pub last_update: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_field_names() {
        let raw = r#"{"name":"Rex","hunger":10,"happiness":20,"energy":30,
            "ageSeconds":5,"alive":true,"lastUpdateTimestamp":1700000000.5}"#;
        let snapshot: PetSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.age_seconds, 5.0);
        assert_eq!(snapshot.last_update, 1_700_000_000.5);
    }

    #[test]
    fn missing_field_fails_to_parse() {
        let raw = r#"{"name":"Rex","happiness":20,"energy":30,
            "age_seconds":5,"alive":true,"last_update":0}"#;
        let err = serde_json::from_str::<PetSnapshot>(raw).unwrap_err();
        assert!(err.to_string().contains("hunger"));
    }
}
