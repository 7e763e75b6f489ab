pub mod json;
pub mod text;

pub use json::{JsonConfig, JsonFormatter, incidents_to_json, signals_to_json};
pub use text::{TextConfig, TextFormatter, incidents_to_text, signals_to_text};
