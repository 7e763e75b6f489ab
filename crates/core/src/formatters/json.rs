use crate::Result;
use crate::incident::Incident;
use crate::signals::Signal;
use serde::Serialize;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    if pretty { Ok(serde_json::to_string_pretty(value)?) } else { Ok(serde_json::to_string(value)?) }
}

/// Serialize incidents as a JSON array with the keys `type`, `title`, `message` and `date`
pub fn incidents_to_json(incidents: &[Incident], pretty: bool) -> Result<String> {
    to_json(incidents, pretty)
}

/// Serialize signal slots as a JSON array
pub fn signals_to_json(signals: &[Signal], pretty: bool) -> Result<String> {
    to_json(signals, pretty)
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn incidents(&self, incidents: &[Incident]) -> Result<String> {
        incidents_to_json(incidents, self.config.pretty)
    }

    pub fn signals(&self, signals: &[Signal]) -> Result<String> {
        signals_to_json(signals, self.config.pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::signals_for;

    fn sample() -> Vec<Incident> {
        vec![
            Incident {
                kind: Some("Stau".to_string()),
                title: Some("A1 gesperrt".to_string()),
                message: Some("Vollsperrung zwischen Ausfahrten".to_string()),
                occurred_at: Some("2025-09-21T15:35".to_string()),
            },
            Incident { kind: Some("Blitzer".to_string()), ..Default::default() },
        ]
    }

    #[test]
    fn test_incidents_to_json_compact() {
        let json = incidents_to_json(&sample(), false).unwrap();
        assert!(json.starts_with(r#"[{"type":"Stau","title":"A1 gesperrt""#));
        assert!(json.contains(r#"{"type":"Blitzer","title":null,"message":null,"date":null}"#));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_incidents_to_json_pretty() {
        let json = incidents_to_json(&sample(), true).unwrap();
        assert!(json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["date"], "2025-09-21T15:35");
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(incidents_to_json(&[], false).unwrap(), "[]");
    }

    #[test]
    fn test_formatter_signals() {
        let formatter = JsonFormatter::new(JsonConfig { pretty: false });
        let json = formatter.signals(&signals_for(&sample(), 3)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["state"], "on");
        assert_eq!(value[1]["attributes"]["type"], "Blitzer");
        assert_eq!(value[2]["state"], "off");
        assert!(value[2]["attributes"].is_null());
    }
}
