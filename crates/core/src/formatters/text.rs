use crate::incident::Incident;
use crate::signals::{Signal, SignalState};

/// Placeholder for absent fields
const MISSING: &str = "-";

/// Configuration for plain text output
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Wrap message lines at specified width (0 = no wrapping)
    pub line_width: usize,

    /// Number entries starting at 1
    pub numbered: bool,
}

/// Plain text formatter for incident listings
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn incidents(&self, incidents: &[Incident]) -> String {
        incidents_to_text(incidents, &self.config)
    }

    pub fn signals(&self, signals: &[Signal]) -> String {
        signals_to_text(signals)
    }
}

/// Render incidents as `[date] type: title` headers with the message indented below
pub fn incidents_to_text(incidents: &[Incident], config: &TextConfig) -> String {
    if incidents.is_empty() {
        return "Keine Verkehrsmeldungen.".to_string();
    }

    let mut output = String::new();

    for (index, incident) in incidents.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        if config.numbered {
            output.push_str(&format!("{:>2}. ", index + 1));
        }
        output.push_str(&format_header(incident));
        output.push('\n');

        if let Some(message) = incident.message.as_deref().filter(|m| !m.is_empty()) {
            let body = if config.line_width > 0 { wrap_text(message, config.line_width) } else { message.to_string() };
            for line in body.lines() {
                output.push_str("    ");
                output.push_str(line);
                output.push('\n');
            }
        }
    }

    output.trim_end().to_string()
}

/// Render signal slots, one per line
pub fn signals_to_text(signals: &[Signal]) -> String {
    signals
        .iter()
        .map(|signal| {
            let state = match signal.state {
                SignalState::On => "on",
                SignalState::Off => "off",
                SignalState::Unavailable => "unavailable",
            };
            match &signal.attributes {
                Some(incident) => format!("{} [{}] {}", signal.unique_id, state, format_header(incident)),
                None => format!("{} [{}]", signal.unique_id, state),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_header(incident: &Incident) -> String {
    format!(
        "[{}] {}: {}",
        incident.occurred_at.as_deref().unwrap_or(MISSING),
        incident.kind.as_deref().unwrap_or(MISSING),
        incident.title.as_deref().unwrap_or(MISSING)
    )
}

/// Wrap text to specified line width
fn wrap_text(text: &str, width: usize) -> String {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::signals_for;

    fn stau() -> Incident {
        Incident {
            kind: Some("Stau".to_string()),
            title: Some("A1 gesperrt".to_string()),
            message: Some("Vollsperrung zwischen Ausfahrten".to_string()),
            occurred_at: Some("2025-09-21T15:35".to_string()),
        }
    }

    #[test]
    fn test_incident_listing() {
        let text = incidents_to_text(&[stau()], &TextConfig::default());
        assert_eq!(text, "[2025-09-21T15:35] Stau: A1 gesperrt\n    Vollsperrung zwischen Ausfahrten");
    }

    #[test]
    fn test_missing_fields_use_placeholder() {
        let text = incidents_to_text(&[Incident::default()], &TextConfig::default());
        assert_eq!(text, "[-] -: -");
    }

    #[test]
    fn test_numbered_and_wrapped() {
        let config = TextConfig { line_width: 16, numbered: true };
        let text = incidents_to_text(&[stau(), stau()], &config);

        assert!(text.starts_with(" 1. [2025-09-21T15:35]"));
        assert!(text.contains("\n 2. [2025-09-21T15:35]"));
        assert!(text.contains("    Vollsperrung\n    zwischen\n    Ausfahrten"));
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(incidents_to_text(&[], &TextConfig::default()), "Keine Verkehrsmeldungen.");
    }

    #[test]
    fn test_signals_to_text() {
        let text = signals_to_text(&signals_for(&[stau()], 2));
        assert_eq!(text, "traffic-1 [on] [2025-09-21T15:35] Stau: A1 gesperrt\ntraffic-2 [off]");
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("a bb ccc dddd", 6), "a bb\nccc\ndddd");
        assert_eq!(wrap_text("", 10), "");
    }
}
