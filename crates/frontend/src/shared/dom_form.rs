use contracts::shared::form::{FieldKind, FormField, FormSurface};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// Input types that never carry a value on submission.
const NON_SUBMITTING_INPUTS: [&str; 5] = ["submit", "button", "reset", "image", "file"];

/// A live `<form>` seen through [`FormSurface`].
#[derive(Clone, Debug)]
pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }

    pub fn element(&self) -> &HtmlFormElement {
        &self.form
    }

    fn controls(&self) -> Vec<Element> {
        let elements = self.form.elements();
        (0..elements.length())
            .filter_map(|i| elements.item(i))
            .collect()
    }

    fn inputs_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = HtmlInputElement> + 'a {
        self.controls()
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
            .filter(move |input| input.name() == name)
    }
}

fn describe(el: Element) -> Option<FormField> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        let kind = input.type_().to_lowercase();
        if input.name().is_empty() || NON_SUBMITTING_INPUTS.contains(&kind.as_str()) {
            return None;
        }
        let kind = match kind.as_str() {
            "checkbox" => FieldKind::Checkbox,
            "radio" => FieldKind::Radio,
            _ => FieldKind::Value,
        };
        return Some(FormField {
            name: input.name(),
            kind,
            value: input.value(),
            checked: input.checked(),
            disabled: input.disabled(),
        });
    }
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        if select.name().is_empty() {
            return None;
        }
        return Some(FormField {
            name: select.name(),
            kind: FieldKind::Value,
            value: select.value(),
            checked: false,
            disabled: select.disabled(),
        });
    }
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        if area.name().is_empty() {
            return None;
        }
        return Some(FormField {
            name: area.name(),
            kind: FieldKind::Value,
            value: area.value(),
            checked: false,
            disabled: area.disabled(),
        });
    }
    // buttons, fieldsets, outputs
    None
}

impl FormSurface for DomForm {
    fn fields(&self) -> Vec<FormField> {
        self.controls().into_iter().filter_map(describe).collect()
    }

    fn set_value(&mut self, name: &str, value: &str) {
        for el in self.controls() {
            if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
                if input.name() == name {
                    input.set_value(value);
                    return;
                }
            } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
                if select.name() == name {
                    select.set_value(value);
                    return;
                }
            } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
                if area.name() == name {
                    area.set_value(value);
                    return;
                }
            }
        }
    }

    fn set_checked(&mut self, name: &str, option: Option<&str>, checked: bool) {
        let target = self
            .inputs_named(name)
            .find(|input| option.map_or(true, |o| input.value() == o));
        if let Some(input) = target {
            input.set_checked(checked);
        }
    }
}
