//! The traffic report record.

use serde::{Deserialize, Serialize};

/// One traffic report as extracted from an incident block.
///
/// Every field is extracted independently, so a block with missing children
/// still produces an `Incident` with the missing fields set to `None`. The
/// serialized keys are fixed (`type`, `title`, `message`, `date`) and absent
/// values serialize as `null`.
///
/// # Example
///
/// ```rust
/// use verkehr_core::Incident;
///
/// let incident = Incident {
///     kind: Some("Stau".to_string()),
///     title: Some("A1 gesperrt".to_string()),
///     message: None,
///     occurred_at: Some("2025-09-21T15:35".to_string()),
/// };
/// let json = serde_json::to_value(&incident).unwrap();
/// assert_eq!(json["type"], "Stau");
/// assert!(json["message"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Incident {
    /// Category label as shown on the page ("Stau", "Blitzer", ...).
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Headline, whitespace-collapsed.
    pub title: Option<String>,

    /// Free-text body with line fragments joined by single spaces.
    pub message: Option<String>,

    /// `YYYY-MM-DDTHH:MM`, naive local time.
    #[serde(rename = "date")]
    pub occurred_at: Option<String>,
}

impl Incident {
    /// Returns `true` when none of the four fields could be extracted.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.title.is_none() && self.message.is_none() && self.occurred_at.is_none()
    }
}
