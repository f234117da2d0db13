//! Combo box configuration.
//!
//! Every class name the widget reads or writes derives from a single
//! `prefix`, so one page can host differently prefixed component sets. The
//! configuration can be built in code or loaded from TOML:
//!
//! ```
//! use combo_lattice::ComboBoxConfig;
//!
//! let config = ComboBoxConfig::from_toml_str(r#"
//! prefix = "acme"
//! option_height = 32.0
//! "#).unwrap();
//!
//! assert_eq!(config.classes().container, "acme-combo-box");
//! assert_eq!(config.no_results_text, "No results found");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ComboBoxError, Result};

/// Screen-reader instructions attached to every input via `aria-describedby`.
pub const DEFAULT_HINT_TEXT: &str = "When autocomplete results are available use up and down \
arrows to review and enter to select. Touch device users, explore by touch or with swipe gestures.";

/// Tunable strings and metrics for combo boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboBoxConfig {
    /// Component class prefix (`{prefix}-combo-box`, ...).
    pub prefix: String,
    /// Class that hides an element visually but keeps it for screen readers.
    pub sr_only_class: String,
    /// Text of the assistive hint.
    pub hint_text: String,
    /// Text of the placeholder entry shown when nothing matches.
    pub no_results_text: String,
    /// Height given to each rendered list entry.
    pub option_height: f32,
    /// Visible height of the list surface.
    pub list_height: f32,
}

impl Default for ComboBoxConfig {
    fn default() -> Self {
        Self {
            prefix: "usa".to_owned(),
            sr_only_class: "usa-sr-only".to_owned(),
            hint_text: DEFAULT_HINT_TEXT.to_owned(),
            no_results_text: "No results found".to_owned(),
            option_height: 40.0,
            list_height: 200.0,
        }
    }
}

impl ComboBoxConfig {
    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ComboBoxError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Derive the class names for this prefix.
    pub fn classes(&self) -> ClassNames {
        ClassNames::new(&self.prefix)
    }
}

/// Class names used to mark and find combo box surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    /// Outer container.
    pub container: String,
    /// Original select, demoted to a value store.
    pub select: String,
    /// Injected text input.
    pub input: String,
    /// Injected list surface.
    pub list: String,
    /// Each rendered entry.
    pub list_option: String,
    /// The highlighted entry.
    pub list_option_selected: String,
    /// The "no results" placeholder.
    pub list_option_no_results: String,
    /// Live status region.
    pub status: String,
}

impl ClassNames {
    /// Build the class names for `prefix`.
    pub fn new(prefix: &str) -> Self {
        let container = format!("{prefix}-combo-box");
        let list_option = format!("{container}__list-option");
        Self {
            select: format!("{container}__select"),
            input: format!("{container}__input"),
            list: format!("{container}__list"),
            list_option_selected: format!("{list_option}--selected"),
            list_option_no_results: format!("{list_option}--no-results"),
            status: format!("{container}__status"),
            list_option,
            container,
        }
    }
}

impl Default for ClassNames {
    fn default() -> Self {
        ComboBoxConfig::default().classes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_classes() {
        let classes = ClassNames::default();
        assert_eq!(classes.container, "usa-combo-box");
        assert_eq!(classes.select, "usa-combo-box__select");
        assert_eq!(classes.list_option, "usa-combo-box__list-option");
        assert_eq!(
            classes.list_option_selected,
            "usa-combo-box__list-option--selected"
        );
        assert_eq!(
            classes.list_option_no_results,
            "usa-combo-box__list-option--no-results"
        );
    }

    #[test]
    fn test_toml_partial_override() {
        let config = ComboBoxConfig::from_toml_str(
            r#"
            prefix = "gov"
            no_results_text = "Nothing matches"
            "#,
        )
        .unwrap();
        assert_eq!(config.prefix, "gov");
        assert_eq!(config.no_results_text, "Nothing matches");
        assert_eq!(config.sr_only_class, "usa-sr-only");
        assert_eq!(config.classes().input, "gov-combo-box__input");
    }

    #[test]
    fn test_toml_type_error() {
        let result = ComboBoxConfig::from_toml_str("option_height = \"tall\"");
        assert!(matches!(result, Err(ComboBoxError::Config(_))));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combo.toml");
        std::fs::write(&path, "list_height = 120.0\nhint_text = \"Pick one\"\n").unwrap();

        let config = ComboBoxConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.list_height, 120.0);
        assert_eq!(config.hint_text, "Pick one");
        assert_eq!(config.option_height, 40.0);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let result = ComboBoxConfig::from_toml_file("/nonexistent/combo.toml");
        match result {
            Err(ComboBoxError::Io { path, .. }) => {
                assert!(path.ends_with("combo.toml"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
