//! Filter-state persistence with restore-on-load.
//!
//! On submit the monitored form is snapshot into session storage; on the
//! next page load, if the server did not fill the anchor fields, empty
//! fields are refilled from that snapshot. Server-rendered values always
//! win over cached ones.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::config::FilterPersistenceConfig;
use super::error::StateError;
use super::form::{FieldKind, FormSurface};
use super::storage::KeyValueStore;

pub const CHECKED: &str = "on";
pub const UNCHECKED: &str = "off";

/// Last-submitted values of one form, field name -> raw string value.
/// Checkboxes are stored as `"on"` / `"off"`, never omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    /// Snapshot every submittable control of `form`.
    /// Disabled controls are skipped, like the browser does.
    pub fn capture(form: &impl FormSurface) -> Self {
        let mut values = BTreeMap::new();
        for field in form.fields().into_iter().filter(|f| !f.disabled) {
            match field.kind {
                FieldKind::Checkbox => {
                    let flag = if field.checked { CHECKED } else { UNCHECKED };
                    values.insert(field.name, flag.to_string());
                }
                FieldKind::Radio => {
                    if field.checked {
                        values.insert(field.name, field.value);
                    }
                }
                FieldKind::Value => {
                    values.insert(field.name, field.value);
                }
            }
        }
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Reads the snapshot stored under `key`.
    /// `Ok(None)` if nothing was ever stored.
    pub fn load(store: &impl KeyValueStore, key: &str) -> Result<Option<Self>, StateError> {
        let Some(raw) = store.get_item(key)? else {
            return Ok(None);
        };
        let state = serde_json::from_str::<FilterState>(&raw)?;
        Ok(Some(state))
    }

    /// Replaces whatever is stored under `key`.
    pub fn save(&self, store: &mut impl KeyValueStore, key: &str) -> Result<(), StateError> {
        let raw = serde_json::to_string(self)?;
        store.set_item(key, &raw)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// What [`restore_on_load`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Every anchor field already had a value.
    AnchorsFilled,
    NothingStored,
    /// Stored text could not be read as a filter state; treated as absent.
    Malformed,
    /// Storage itself refused the read; treated as absent.
    Unreadable,
    /// Names of the fields whose value or checked state was written.
    Restored(Vec<String>),
}

/// Submit handler: snapshot the form and replace the stored state.
/// Never blocks submission; the caller only logs a returned error.
pub fn capture_on_submit(
    form: &impl FormSurface,
    store: &mut impl KeyValueStore,
    config: &FilterPersistenceConfig,
) -> Result<FilterState, StateError> {
    let state = FilterState::capture(form);
    state.save(store, &config.storage_key)?;
    log::debug!(
        "filter state captured: {} field(s) under `{}`",
        state.len(),
        config.storage_key
    );
    Ok(state)
}

/// True when at least one anchor is empty or missing from the form.
pub fn needs_restore(form: &impl FormSurface, config: &FilterPersistenceConfig) -> bool {
    config
        .anchor_fields
        .iter()
        .any(|anchor| form.field(anchor).map_or(true, |f| f.value.is_empty()))
}

/// Load handler: refill empty fields from the stored snapshot.
pub fn restore_on_load(
    form: &mut impl FormSurface,
    store: &impl KeyValueStore,
    config: &FilterPersistenceConfig,
) -> RestoreOutcome {
    if !needs_restore(form, config) {
        return RestoreOutcome::AnchorsFilled;
    }

    let state = match FilterState::load(store, &config.storage_key) {
        Ok(Some(state)) => state,
        Ok(None) => return RestoreOutcome::NothingStored,
        Err(e @ StateError::Malformed(_)) => {
            log::warn!("ignoring stored filter state: {}", e);
            return RestoreOutcome::Malformed;
        }
        Err(e) => {
            log::warn!("filter state not readable: {}", e);
            return RestoreOutcome::Unreadable;
        }
    };

    let fields = form.fields();
    let mut restored = Vec::new();

    for (name, stored) in state.iter() {
        let Some(current) = fields.iter().find(|f| f.name == name) else {
            continue;
        };
        match current.kind {
            FieldKind::Checkbox => {
                form.set_checked(name, None, stored == CHECKED);
                restored.push(name.to_string());
            }
            FieldKind::Radio => {
                let group_has_choice = fields.iter().any(|f| f.name == name && f.checked);
                let option_exists = fields.iter().any(|f| f.name == name && f.value == stored);
                if !group_has_choice && option_exists {
                    form.set_checked(name, Some(stored), true);
                    restored.push(name.to_string());
                }
            }
            FieldKind::Value => {
                if current.value.is_empty() {
                    form.set_value(name, stored);
                    restored.push(name.to_string());
                }
            }
        }
    }

    log::debug!("filter state restored into {} field(s)", restored.len());
    RestoreOutcome::Restored(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::testing::MemoryForm;
    use crate::shared::form::FormField;
    use crate::shared::storage::MemoryStore;

    fn analyze_form(start: &str, end: &str, grade: &str, zero_tasks: bool) -> MemoryForm {
        MemoryForm::with(vec![
            FormField::value("start_date", start),
            FormField::value("end_date", end),
            FormField::value("grade", grade),
            FormField::checkbox("zero_tasks_only", zero_tasks),
        ])
    }

    fn config() -> FilterPersistenceConfig {
        FilterPersistenceConfig::default()
    }

    #[test]
    fn test_capture_records_checkbox_as_on_off() {
        let mut store = MemoryStore::new();
        let form = MemoryForm::with(vec![
            FormField::value("grade", "5"),
            FormField::checkbox("zero_tasks_only", false),
        ]);

        capture_on_submit(&form, &mut store, &config()).unwrap();

        let stored = FilterState::load(&store, "filterState").unwrap().unwrap();
        let expected: FilterState = [("grade", "5"), ("zero_tasks_only", "off")]
            .into_iter()
            .collect();
        assert_eq!(stored, expected);
    }

    #[test]
    fn test_capture_checked_checkbox_is_on() {
        let form = analyze_form("2024-01-01", "2024-02-01", "7", true);
        let state = FilterState::capture(&form);
        assert_eq!(state.get("zero_tasks_only"), Some("on"));
        assert_eq!(state.get("start_date"), Some("2024-01-01"));
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn test_capture_records_only_checked_radio() {
        let form = MemoryForm::with(vec![
            FormField::radio("sort", "name", false),
            FormField::radio("sort", "score", true),
        ]);
        let state = FilterState::capture(&form);
        assert_eq!(state.get("sort"), Some("score"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_capture_is_full_replace() {
        let mut store = MemoryStore::new();
        let first = MemoryForm::with(vec![
            FormField::value("grade", "5"),
            FormField::value("subject", "math"),
        ]);
        let second = MemoryForm::with(vec![FormField::value("grade", "6")]);

        capture_on_submit(&first, &mut store, &config()).unwrap();
        capture_on_submit(&second, &mut store, &config()).unwrap();

        let stored = FilterState::load(&store, "filterState").unwrap().unwrap();
        assert_eq!(stored.get("grade"), Some("6"));
        assert_eq!(stored.get("subject"), None);
    }

    #[test]
    fn test_capture_twice_is_idempotent() {
        let mut store = MemoryStore::new();
        let form = analyze_form("2024-01-01", "", "5", true);

        capture_on_submit(&form, &mut store, &config()).unwrap();
        let once = store.get_item("filterState").unwrap();
        capture_on_submit(&form, &mut store, &config()).unwrap();
        let twice = store.get_item("filterState").unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_submit_then_reload_restores_grade_and_unchecked_box() {
        let mut store = MemoryStore::new();
        let submitted = MemoryForm::with(vec![
            FormField::value("grade", "5"),
            FormField::checkbox("zero_tasks_only", false),
        ]);
        capture_on_submit(&submitted, &mut store, &config()).unwrap();

        let mut reloaded = analyze_form("", "", "", true);
        let outcome = restore_on_load(&mut reloaded, &store, &config());

        assert_eq!(reloaded.value_of("grade"), Some("5"));
        assert!(!reloaded.is_checked("zero_tasks_only", None));
        match outcome {
            RestoreOutcome::Restored(names) => {
                assert!(names.contains(&"grade".to_string()));
                assert!(names.contains(&"zero_tasks_only".to_string()));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_restore_keeps_server_value() {
        let mut store = MemoryStore::new();
        let state: FilterState = [("grade", "5"), ("start_date", "2023-09-01")]
            .into_iter()
            .collect();
        state.save(&mut store, "filterState").unwrap();

        let mut form = analyze_form("", "", "9", false);
        restore_on_load(&mut form, &store, &config());

        assert_eq!(form.value_of("grade"), Some("9"));
        assert_eq!(form.value_of("start_date"), Some("2023-09-01"));
    }

    #[test]
    fn test_restore_skipped_when_anchors_filled() {
        let mut store = MemoryStore::new();
        let state: FilterState = [("grade", "5"), ("zero_tasks_only", "on")]
            .into_iter()
            .collect();
        state.save(&mut store, "filterState").unwrap();

        let mut form = analyze_form("2024-01-01", "2024-06-30", "", false);
        let outcome = restore_on_load(&mut form, &store, &config());

        assert_eq!(outcome, RestoreOutcome::AnchorsFilled);
        assert_eq!(form.value_of("grade"), Some(""));
        assert!(!form.is_checked("zero_tasks_only", None));
    }

    #[test]
    fn test_restore_runs_when_one_anchor_empty() {
        let mut store = MemoryStore::new();
        let state: FilterState = [("end_date", "2024-06-30")].into_iter().collect();
        state.save(&mut store, "filterState").unwrap();

        let mut form = analyze_form("2024-01-01", "", "", false);
        restore_on_load(&mut form, &store, &config());

        assert_eq!(form.value_of("start_date"), Some("2024-01-01"));
        assert_eq!(form.value_of("end_date"), Some("2024-06-30"));
    }

    #[test]
    fn test_disabled_filled_anchor_gates_restore() {
        let mut store = MemoryStore::new();
        let state: FilterState = [("grade", "5")].into_iter().collect();
        state.save(&mut store, "filterState").unwrap();

        let mut form = MemoryForm::with(vec![
            FormField::value("start_date", "2024-01-01").disabled(),
            FormField::value("end_date", "2024-06-30"),
            FormField::value("grade", ""),
        ]);
        let outcome = restore_on_load(&mut form, &store, &config());

        assert_eq!(outcome, RestoreOutcome::AnchorsFilled);
        assert_eq!(form.value_of("grade"), Some(""));
    }

    #[test]
    fn test_disabled_empty_field_is_restored() {
        let mut store = MemoryStore::new();
        let state: FilterState = [("grade", "5")].into_iter().collect();
        state.save(&mut store, "filterState").unwrap();

        let mut form = MemoryForm::with(vec![
            FormField::value("start_date", ""),
            FormField::value("grade", "").disabled(),
        ]);
        restore_on_load(&mut form, &store, &config());

        assert_eq!(form.value_of("grade"), Some("5"));
    }

    #[test]
    fn test_capture_skips_disabled_controls() {
        let form = MemoryForm::with(vec![
            FormField::value("grade", "5"),
            FormField::value("subject", "math").disabled(),
            FormField::checkbox("zero_tasks_only", false).disabled(),
        ]);
        let state = FilterState::capture(&form);
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("subject"), None);
        assert_eq!(state.get("zero_tasks_only"), None);
    }

    #[test]
    fn test_stored_on_checks_unchecked_box() {
        let mut store = MemoryStore::new();
        let state: FilterState = [("zero_tasks_only", "on")].into_iter().collect();
        state.save(&mut store, "filterState").unwrap();

        let mut form = analyze_form("", "", "", false);
        let outcome = restore_on_load(&mut form, &store, &config());

        assert!(form.is_checked("zero_tasks_only", None));
        assert_eq!(
            outcome,
            RestoreOutcome::Restored(vec!["zero_tasks_only".to_string()])
        );
    }

    #[test]
    fn test_unreadable_storage_is_noop() {
        struct FailingStore;

        impl KeyValueStore for FailingStore {
            fn get_item(&self, key: &str) -> Result<Option<String>, StateError> {
                Err(StateError::ReadFailed {
                    key: key.to_string(),
                    reason: "SecurityError".to_string(),
                })
            }

            fn set_item(&mut self, key: &str, _value: &str) -> Result<(), StateError> {
                Err(StateError::WriteRejected {
                    key: key.to_string(),
                    reason: "SecurityError".to_string(),
                })
            }
        }

        let mut form = analyze_form("", "", "", true);
        let before = form.clone();
        let outcome = restore_on_load(&mut form, &FailingStore, &config());

        assert_eq!(outcome, RestoreOutcome::Unreadable);
        assert_eq!(form.controls, before.controls);
        assert!(capture_on_submit(&form, &mut FailingStore, &config()).is_err());
    }

    #[test]
    fn test_missing_anchor_counts_as_empty() {
        let form = MemoryForm::with(vec![FormField::value("start_date", "2024-01-01")]);
        assert!(needs_restore(&form, &config()));
    }

    #[test]
    fn test_malformed_state_is_noop() {
        let mut store = MemoryStore::new();
        store.set_item("filterState", "not-json").unwrap();

        let mut form = analyze_form("", "", "", true);
        let before = form.clone();
        let outcome = restore_on_load(&mut form, &store, &config());

        assert_eq!(outcome, RestoreOutcome::Malformed);
        assert_eq!(form.controls, before.controls);
    }

    #[test]
    fn test_non_string_values_are_malformed() {
        let mut store = MemoryStore::new();
        store.set_item("filterState", r#"{"grade": 5}"#).unwrap();

        let mut form = analyze_form("", "", "", false);
        assert_eq!(
            restore_on_load(&mut form, &store, &config()),
            RestoreOutcome::Malformed
        );
        assert_eq!(form.value_of("grade"), Some(""));
    }

    #[test]
    fn test_nothing_stored() {
        let store = MemoryStore::new();
        let mut form = analyze_form("", "", "", false);
        assert_eq!(
            restore_on_load(&mut form, &store, &config()),
            RestoreOutcome::NothingStored
        );
    }

    #[test]
    fn test_unknown_stored_keys_ignored() {
        let mut store = MemoryStore::new();
        let state: FilterState = [("removed_field", "x"), ("grade", "4")]
            .into_iter()
            .collect();
        state.save(&mut store, "filterState").unwrap();

        let mut form = analyze_form("", "", "", false);
        let outcome = restore_on_load(&mut form, &store, &config());

        assert_eq!(outcome, RestoreOutcome::Restored(vec!["grade".to_string()]));
    }

    #[test]
    fn test_restore_radio_only_without_choice() {
        let mut store = MemoryStore::new();
        let state: FilterState = [("sort", "score")].into_iter().collect();
        state.save(&mut store, "filterState").unwrap();

        let mut unchosen = MemoryForm::with(vec![
            FormField::radio("sort", "name", false),
            FormField::radio("sort", "score", false),
        ]);
        restore_on_load(&mut unchosen, &store, &config());
        assert!(unchosen.is_checked("sort", Some("score")));

        let mut chosen = MemoryForm::with(vec![
            FormField::radio("sort", "name", true),
            FormField::radio("sort", "score", false),
        ]);
        restore_on_load(&mut chosen, &store, &config());
        assert!(chosen.is_checked("sort", Some("name")));
        assert!(!chosen.is_checked("sort", Some("score")));
    }

    #[test]
    fn test_custom_storage_key() {
        let mut store = MemoryStore::new();
        let cfg = FilterPersistenceConfig {
            storage_key: "analyzeFilters".to_string(),
            ..FilterPersistenceConfig::default()
        };
        let form = MemoryForm::with(vec![FormField::value("grade", "3")]);

        capture_on_submit(&form, &mut store, &cfg).unwrap();

        assert!(store.get_item("filterState").unwrap().is_none());
        assert!(store.get_item("analyzeFilters").unwrap().is_some());
    }
}
