use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One audit log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: Uuid,

    #[serde(with = "rfc3339")]
    pub time: DateTime<Utc>,

    /// Login name of the operator, empty when it cannot be determined
    #[serde(default)]
    pub user: String,

    /// Command path, e.g. `purge vms`
    pub name: String,

    pub operation: String,

    #[serde(default)]
    pub value: serde_json::Value,
}

impl AuditEvent {
    pub fn new(name: &str, operation: &str, value: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            time: Utc::now(),
            user: current_user(),
            name: name.to_string(),
            operation: operation.to_string(),
            value,
        }
    }
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}

mod rfc3339 {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_time_is_rfc3339_utc() {
        let event = AuditEvent::new("image import", "import", json!({"bucket": "b"}));
        let encoded = serde_json::to_value(&event).unwrap();

        let time = encoded["time"].as_str().unwrap();
        assert!(time.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(time).is_ok());
    }

    #[test]
    fn test_new_events_get_distinct_ids() {
        let a = AuditEvent::new("purge vms", "delete", json!(null));
        let b = AuditEvent::new("purge vms", "delete", json!(null));
        assert_ne!(a.id, b.id);
    }
}
