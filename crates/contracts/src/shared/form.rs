//! Abstract view of a rendered HTML form.
//!
//! The browser crate implements [`FormSurface`] over `HtmlFormElement`;
//! everything that reads or fills forms goes through this trait.

use std::collections::BTreeMap;

/// How a control takes part in submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Checkbox,
    Radio,
    /// text, date, number, hidden, select, textarea...
    Value,
}

/// Snapshot of one named control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
    /// Meaningful for checkboxes and radios only.
    pub checked: bool,
    /// Disabled controls are present in the form but never submitted.
    pub disabled: bool,
}

impl FormField {
    pub fn value(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Value,
            value: value.to_string(),
            checked: false,
            disabled: false,
        }
    }

    pub fn checkbox(name: &str, checked: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Checkbox,
            value: "on".to_string(),
            checked,
            disabled: false,
        }
    }

    pub fn radio(name: &str, value: &str, checked: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Radio,
            value: value.to_string(),
            checked,
            disabled: false,
        }
    }

    pub fn disabled(self) -> Self {
        Self {
            disabled: true,
            ..self
        }
    }

    /// Whether the browser would include this control in a submission.
    pub fn is_submitted(&self) -> bool {
        !self.disabled && (self.kind == FieldKind::Value || self.checked)
    }
}

pub trait FormSurface {
    /// Named controls in document order, disabled ones included.
    /// Buttons are never included.
    fn fields(&self) -> Vec<FormField>;

    /// Writes `value` into the first control called `name`.
    fn set_value(&mut self, name: &str, value: &str);

    /// Sets the checked state of the first control called `name`, or of the
    /// control whose value equals `option` when one is given (radio groups).
    fn set_checked(&mut self, name: &str, option: Option<&str>, checked: bool);

    /// First control called `name`, like `querySelector('[name=...]')`.
    fn field(&self, name: &str) -> Option<FormField> {
        self.fields().into_iter().find(|f| f.name == name)
    }
}

/// Name/value pairs exactly as the browser would submit them: unchecked
/// checkboxes and radios are left out, later duplicates win.
pub fn submitted_values(form: &impl FormSurface) -> BTreeMap<String, String> {
    form.fields()
        .into_iter()
        .filter(FormField::is_submitted)
        .map(|f| (f.name, f.value))
        .collect()
}
