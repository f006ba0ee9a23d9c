//! Localization provider
//!
//! Resolves message keys to display strings from an embedded locale table,
//! with `{0}`-style positional format arguments. An unresolved key falls
//! back to the raw key so a missing translation shows up in the UI instead
//! of crashing or blanking a label.

use std::collections::HashMap;
use tracing::{debug, warn};

/// Embedded English message table
const EN_MESSAGES: &str = include_str!("../../assets/lang/en.json");

/// Message-key to display-string resolver
#[derive(Debug)]
pub struct Localizer {
    messages: HashMap<String, String>,
}

impl Localizer {
    /// Create a localizer for a language code.
    ///
    /// Only English ships embedded today; any other code falls back to it.
    pub fn new(language: &str) -> Self {
        let table = match language {
            "en" => EN_MESSAGES,
            other => {
                warn!("No message table for language '{other}', falling back to 'en'");
                EN_MESSAGES
            }
        };
        Self::from_json(table)
    }

    fn from_json(json: &str) -> Self {
        let messages = match serde_json::from_str(json) {
            Ok(messages) => messages,
            Err(e) => {
                warn!("Failed to parse message table: {e}");
                HashMap::new()
            }
        };
        Self { messages }
    }

    /// Resolve a message key, falling back to the key itself
    pub fn message(&self, key: &str) -> String {
        match self.messages.get(key) {
            Some(message) => message.clone(),
            None => {
                debug!("Unresolved message key '{key}'");
                key.to_string()
            }
        }
    }

    /// Resolve a message key and substitute `{0}`, `{1}`, ... placeholders
    pub fn format(&self, key: &str, args: &[&str]) -> String {
        let mut message = self.message(key);
        for (index, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{index}}}"), arg);
        }
        message
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new("en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_resolves() {
        let localizer = Localizer::new("en");
        assert_eq!(localizer.message("status.ready"), "Ready");
    }

    #[test]
    fn test_unknown_key_falls_back_to_raw_key() {
        let localizer = Localizer::new("en");
        assert_eq!(localizer.message("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let localizer = Localizer::new("xx");
        assert_eq!(localizer.message("status.ready"), "Ready");
    }

    #[test]
    fn test_format_substitutes_positional_args() {
        let localizer = Localizer::new("en");
        let message = localizer.format("status.launched", &["Elden Ring"]);
        assert!(message.contains("Elden Ring"));
        assert!(!message.contains("{0}"));
    }

    #[test]
    fn test_format_with_missing_args_leaves_placeholder() {
        let localizer = Localizer::new("en");
        let message = localizer.format("status.launched", &[]);
        assert!(message.contains("{0}"));
    }

    #[test]
    fn test_malformed_table_yields_raw_keys() {
        let localizer = Localizer::from_json("not json");
        assert_eq!(localizer.message("status.ready"), "status.ready");
    }
}
