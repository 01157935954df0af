use serde::Deserialize;

use super::error::ConfigError;

/// Page bindings for every browser behaviour.
///
/// Pages may override any subset through an embedded JSON document;
/// missing sections and fields fall back to [`DEFAULT_CONFIG`].
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub filter_persistence: FilterPersistenceConfig,
    pub theme: ThemeConfig,
    pub search: SearchConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FilterPersistenceConfig {
    /// CSS selector of the monitored form
    pub form_selector: String,
    /// Session storage key holding the serialized filter state
    pub storage_key: String,
    /// Restore runs only if at least one of these is empty
    pub anchor_fields: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    pub toggle_selector: String,
    /// Local storage key
    pub storage_key: String,
    /// Attribute set on the document element
    pub attribute: String,
    pub dark_media_query: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    pub input_id: String,
    pub button_id: String,
    pub table_id: String,
    /// Zero-based cell indexes compared against the term
    pub columns: Vec<usize>,
    pub no_results_class: String,
    pub no_results_colspan: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationConfig {
    pub form_id: String,
    /// Local storage key for the post-normalization snapshot
    pub snapshot_key: String,
    pub source_field: String,
    pub source_value: String,
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r##"
{
    "filter_persistence": {
        "form_selector": "form[action*=\"analyze\"]",
        "storage_key": "filterState",
        "anchor_fields": ["start_date", "end_date"]
    },
    "theme": {
        "toggle_selector": "#checkbox",
        "storage_key": "theme",
        "attribute": "data-theme",
        "dark_media_query": "(prefers-color-scheme: dark)"
    },
    "search": {
        "input_id": "studentSearch",
        "button_id": "searchButton",
        "table_id": "resultsTable",
        "columns": [0, 1, 7],
        "no_results_class": "no-results-row",
        "no_results_colspan": 8
    },
    "validation": {
        "form_id": "filterForm",
        "snapshot_key": "lastFormSubmission",
        "source_field": "form_source",
        "source_value": "analyze_page"
    }
}
"##;

impl AppConfig {
    /// Parse a page-supplied JSON document. Absent keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            filter_persistence: FilterPersistenceConfig::default(),
            theme: ThemeConfig::default(),
            search: SearchConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl Default for FilterPersistenceConfig {
    fn default() -> Self {
        Self {
            form_selector: r#"form[action*="analyze"]"#.to_string(),
            storage_key: "filterState".to_string(),
            anchor_fields: vec!["start_date".to_string(), "end_date".to_string()],
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            toggle_selector: "#checkbox".to_string(),
            storage_key: "theme".to_string(),
            attribute: "data-theme".to_string(),
            dark_media_query: "(prefers-color-scheme: dark)".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            input_id: "studentSearch".to_string(),
            button_id: "searchButton".to_string(),
            table_id: "resultsTable".to_string(),
            columns: vec![0, 1, 7],
            no_results_class: "no-results-row".to_string(),
            no_results_colspan: 8,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            form_id: "filterForm".to_string(),
            snapshot_key: "lastFormSubmission".to_string(),
            source_field: "form_source".to_string(),
            source_value: "analyze_page".to_string(),
        }
    }
}
