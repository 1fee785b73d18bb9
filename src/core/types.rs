use serde::{Deserialize, Serialize};
use std::fmt;

/// Power state reported for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
    #[default]
    Undefined,
}

/// Whether the component's management controller could be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagementState {
    Available,
    #[default]
    Unavailable,
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => write!(f, "on"),
            Self::Off => write!(f, "off"),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}

impl fmt::Display for ManagementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Status of one hardware component, stored as JSON under
/// `/pcs/powerstate/<xname>`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerStatusRecord {
    pub xname: String,
    pub power_state: PowerState,
    pub management_state: ManagementState,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub supported_power_transitions: Vec<String>,
    #[serde(default)]
    pub last_updated: String,
}

impl PowerStatusRecord {
    pub fn new(xname: impl Into<String>) -> Self {
        Self {
            xname: xname.into(),
            ..Default::default()
        }
    }

    pub fn power_state(mut self, state: PowerState) -> Self {
        self.power_state = state;
        self
    }

    pub fn management_state(mut self, state: ManagementState) -> Self {
        self.management_state = state;
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }

    pub fn supported_power_transitions<I, S>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_power_transitions = transitions.into_iter().map(Into::into).collect();
        self
    }

    pub fn last_updated(mut self, timestamp: impl Into<String>) -> Self {
        self.last_updated = timestamp.into();
        self
    }

    /// Stamp `last_updated` with the current UTC time (RFC 3339).
    pub fn touch(&mut self) {
        self.last_updated = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    }
}

/// Ordered set of records, in backend key order.
///
/// Serializes as the `{"status": [...]}` envelope consumers expect.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerStatusCollection {
    #[serde(default)]
    pub status: Vec<PowerStatusRecord>,
}

impl PowerStatusCollection {
    pub fn len(&self) -> usize {
        self.status.len()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PowerStatusRecord> {
        self.status.iter()
    }

    pub fn get(&self, xname: &str) -> Option<&PowerStatusRecord> {
        self.status.iter().find(|record| record.xname == xname)
    }
}

impl FromIterator<PowerStatusRecord> for PowerStatusCollection {
    fn from_iter<I: IntoIterator<Item = PowerStatusRecord>>(iter: I) -> Self {
        Self {
            status: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PowerStatusCollection {
    type Item = PowerStatusRecord;
    type IntoIter = std::vec::IntoIter<PowerStatusRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.status.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_layout() {
        let record = PowerStatusRecord::new("x0c0s1b0n0")
            .power_state(PowerState::On)
            .management_state(ManagementState::Available)
            .supported_power_transitions(["On", "Off"])
            .last_updated("2023-01-01T00:00:00Z");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "xname": "x0c0s1b0n0",
                "powerState": "on",
                "managementState": "available",
                "error": "",
                "supportedPowerTransitions": ["On", "Off"],
                "lastUpdated": "2023-01-01T00:00:00Z"
            })
        );
    }

    #[test]
    fn test_record_defaults() {
        let record = PowerStatusRecord::new("x1000c0s0b0");
        assert_eq!(record.power_state, PowerState::Undefined);
        assert_eq!(record.management_state, ManagementState::Unavailable);
        assert!(record.error.is_empty());
        assert!(record.supported_power_transitions.is_empty());
    }

    #[test]
    fn test_touch_sets_timestamp() {
        let mut record = PowerStatusRecord::new("x0c0s1b0n0");
        record.touch();
        assert!(chrono::DateTime::parse_from_rfc3339(&record.last_updated).is_ok());
    }

    #[test]
    fn test_collection_envelope() {
        let collection: PowerStatusCollection = vec![
            PowerStatusRecord::new("x0c0s1b0n0"),
            PowerStatusRecord::new("x0c0s2b0n0"),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["status"].as_array().unwrap().len(), 2);
        assert!(collection.get("x0c0s2b0n0").is_some());
        assert!(collection.get("x0c0s3b0n0").is_none());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(PowerState::Undefined.to_string(), "undefined");
        assert_eq!(ManagementState::Available.to_string(), "available");
    }
}
