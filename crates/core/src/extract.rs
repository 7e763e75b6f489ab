use crate::date::normalize_german_datetime;
use crate::dom_tree::{DomTree, Matcher};
use crate::incident::Incident;
use crate::parse::Document;

/// Structural signatures of the traffic page
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Tag of an incident block
    pub entry_tag: String,
    /// Class of an incident block
    pub entry_class: String,
    /// Class of the category element ("Stau", "Blitzer")
    pub kind_class: String,
    /// Class of the headline element
    pub title_class: String,
    /// Class of the message element
    pub message_class: String,
    /// Class of the date element
    pub date_class: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            entry_tag: "li".to_string(),
            entry_class: "traffic-section-entry".to_string(),
            kind_class: "traffic-event-topline".to_string(),
            title_class: "traffic-event-title".to_string(),
            message_class: "traffic-event-message".to_string(),
            date_class: "traffic-event-date".to_string(),
        }
    }
}

/// Collapse whitespace runs to single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip every fragment, drop the empty ones and join the rest with single spaces
fn join_stripped(fragments: &[&str]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.trim())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract traffic incidents from an HTML document with the default page layout.
///
/// Never fails: markup without incident blocks, an empty string or plain
/// text all yield an empty vector.
///
/// # Example
///
/// ```rust
/// use verkehr_core::extract_incidents;
///
/// let html = r#"<ul><li class="traffic-section-entry">
///     <div class="traffic-event-topline">Stau</div>
///     <div class="traffic-event-title">A1 gesperrt</div>
/// </li></ul>"#;
///
/// let incidents = extract_incidents(html);
/// assert_eq!(incidents.len(), 1);
/// assert_eq!(incidents[0].kind.as_deref(), Some("Stau"));
/// assert_eq!(incidents[0].message, None);
/// ```
pub fn extract_incidents(html: &str) -> Vec<Incident> {
    extract_incidents_with_config(html, &ExtractConfig::default())
}

/// Extract traffic incidents using custom structural signatures.
pub fn extract_incidents_with_config(html: &str, config: &ExtractConfig) -> Vec<Incident> {
    let doc = Document::parse(html);
    let tree = doc.tree();

    let Some(root) = tree.root() else {
        return Vec::new();
    };

    let entries = tree.find_all(root, &Matcher::tag_class(&config.entry_tag, &config.entry_class));
    tracing::debug!(blocks = entries.len(), parse_errors = doc.error_count(), "located incident blocks");

    entries
        .into_iter()
        .map(|entry| extract_incident(&tree, entry, config))
        .collect()
}

/// Build one record from one incident block. Each field is looked up on its own.
fn extract_incident(tree: &DomTree, entry: usize, config: &ExtractConfig) -> Incident {
    let find = |class: &str| tree.find_first(entry, &Matcher::class(class));

    let kind = find(&config.kind_class).map(|id| normalize_whitespace(&tree.text(id)));

    let title = find(&config.title_class).map(|id| normalize_whitespace(&join_stripped(&tree.text_fragments(id))));

    let message = find(&config.message_class).map(|id| join_stripped(&tree.text_fragments(id)));

    let occurred_at = find(&config.date_class)
        .map(|id| normalize_whitespace(&tree.text(id)))
        .filter(|text| !text.is_empty())
        .and_then(|text| normalize_german_datetime(&text));

    Incident { kind, title, message, occurred_at }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_ENTRY: &str = r#"<li class="traffic-section-entry"><div class="traffic-event-topline">Stau</div><div class="traffic-event-title">A1 gesperrt</div><div class="traffic-event-message">Vollsperrung<br/>zwischen Ausfahrten</div><div class="traffic-event-date">21. September 2025, 15:35 Uhr</div></li>"#;

    #[test]
    fn test_extract_full_entry() {
        let incidents = extract_incidents(FULL_ENTRY);

        assert_eq!(
            incidents,
            vec![Incident {
                kind: Some("Stau".to_string()),
                title: Some("A1 gesperrt".to_string()),
                message: Some("Vollsperrung zwischen Ausfahrten".to_string()),
                occurred_at: Some("2025-09-21T15:35".to_string()),
            }]
        );
    }

    #[test]
    fn test_extract_empty_and_non_html() {
        assert!(extract_incidents("").is_empty());
        assert!(extract_incidents("Keine Meldungen vorhanden.").is_empty());
        assert!(extract_incidents("{\"type\": \"Stau\"}").is_empty());
        assert!(extract_incidents("<html><body><ul></ul></body></html>").is_empty());
    }

    #[test]
    fn test_extract_preserves_document_order() {
        let html = r#"<ul>
            <li class="traffic-section-entry"><div class="traffic-event-title">erste</div></li>
            <li class="traffic-section-entry"><div class="traffic-event-title">zweite</div></li>
            <li class="traffic-section-entry"><div class="traffic-event-title">dritte</div></li>
        </ul>"#;

        let titles: Vec<_> = extract_incidents(html).into_iter().map(|i| i.title.unwrap()).collect();
        assert_eq!(titles, vec!["erste", "zweite", "dritte"]);
    }

    #[test]
    fn test_missing_children_yield_none() {
        let html = r#"<ul>
            <li class="traffic-section-entry"><div class="traffic-event-title">Nur Titel</div></li>
            <li class="traffic-section-entry"></li>
        </ul>"#;

        let incidents = extract_incidents(html);
        assert_eq!(incidents.len(), 2);
        assert_eq!(incidents[0].title.as_deref(), Some("Nur Titel"));
        assert_eq!(incidents[0].kind, None);
        assert_eq!(incidents[0].message, None);
        assert_eq!(incidents[0].occurred_at, None);
        assert!(incidents[1].is_empty());
    }

    #[test]
    fn test_message_fragments_joined() {
        let html = r#"<li class="traffic-section-entry"><p class="traffic-event-message">
            A
            <br>
              B  <br/>
            C
        </p></li>"#;

        let incidents = extract_incidents(html);
        assert_eq!(incidents[0].message.as_deref(), Some("A B C"));
    }

    #[test]
    fn test_empty_message_element_is_present() {
        let html = r#"<li class="traffic-section-entry"><div class="traffic-event-message">  </div></li>"#;
        assert_eq!(extract_incidents(html)[0].message.as_deref(), Some(""));
    }

    #[test]
    fn test_title_inline_markup_does_not_glue_words() {
        let html = r#"<li class="traffic-section-entry"><h3 class="traffic-event-title">A27<strong>Bremen</strong>   Richtung
            Cuxhaven</h3></li>"#;

        let incidents = extract_incidents(html);
        assert_eq!(incidents[0].title.as_deref(), Some("A27 Bremen Richtung Cuxhaven"));
    }

    #[test]
    fn test_kind_whitespace_collapsed() {
        let html = r#"<li class="traffic-section-entry"><span class="traffic-event-topline">
            Gefahr   durch
            Gegenstand </span></li>"#;

        assert_eq!(extract_incidents(html)[0].kind.as_deref(), Some("Gefahr durch Gegenstand"));
    }

    #[test]
    fn test_bad_date_yields_none() {
        let html = r#"<ul>
            <li class="traffic-section-entry"><div class="traffic-event-date">31. Juni 2025, 10:00 Uhr</div></li>
            <li class="traffic-section-entry"><div class="traffic-event-date">gestern</div></li>
            <li class="traffic-section-entry"><div class="traffic-event-date"></div></li>
        </ul>"#;

        let incidents = extract_incidents(html);
        assert_eq!(incidents.len(), 3);
        assert!(incidents.iter().all(|i| i.occurred_at.is_none()));
    }

    #[test]
    fn test_date_split_across_nodes() {
        let html = r#"<li class="traffic-section-entry"><time class="traffic-event-date">21. September 2025,
            <b>15:35</b> Uhr</time></li>"#;

        assert_eq!(extract_incidents(html)[0].occurred_at.as_deref(), Some("2025-09-21T15:35"));
    }

    #[test]
    fn test_only_first_child_match_used() {
        let html = r#"<li class="traffic-section-entry">
            <div class="traffic-event-title">Erster</div>
            <div class="traffic-event-title">Zweiter</div>
        </li>"#;

        assert_eq!(extract_incidents(html)[0].title.as_deref(), Some("Erster"));
    }

    #[test]
    fn test_entry_class_requires_list_item() {
        let html = r#"<div class="traffic-section-entry"><div class="traffic-event-title">x</div></div>"#;
        assert!(extract_incidents(html).is_empty());
    }

    #[test]
    fn test_malformed_markup_recovers() {
        let html = r#"<ul><li class="traffic-section-entry"><div class="traffic-event-topline">Blitzer
            <li class="traffic-section-entry"><div class="traffic-event-topline">Stau</ul></p></div>"#;

        let kinds: Vec<_> = extract_incidents(html).into_iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![Some("Blitzer".to_string()), Some("Stau".to_string())]);
    }

    #[test]
    fn test_custom_config() {
        let html = r#"<div class="report"><span class="cat">Baustelle</span></div>"#;
        let config = ExtractConfig {
            entry_tag: "div".to_string(),
            entry_class: "report".to_string(),
            kind_class: "cat".to_string(),
            ..Default::default()
        };

        let incidents = extract_incidents_with_config(html, &config);
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].kind.as_deref(), Some("Baustelle"));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_deeply_nested_entry() {
        let depth = 50_000;
        let html = format!(
            r#"<ul><li class="traffic-section-entry">{}<div class="traffic-event-title">tief</div>{}<div class="traffic-event-date">21. September 2025, 15:35 Uhr</div></li></ul>"#,
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );

        let incidents = extract_incidents(&html);
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].title.as_deref(), Some("tief"));
        assert_eq!(incidents[0].occurred_at.as_deref(), Some("2025-09-21T15:35"));
    }
}
