//! Search for the student results table.
//!
//! Rows are filtered in place on button click or Enter; clearing the input
//! shows everything again.

use std::rc::Rc;

use contracts::shared::config::SearchConfig;
use contracts::shared::search::{no_results_message, search_rows};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlTableRowElement, KeyboardEvent};

use super::dom;

struct TableSearch {
    input: HtmlInputElement,
    table: Element,
    config: SearchConfig,
}

impl TableSearch {
    fn feedback_row(&self) -> Option<Element> {
        let selector = format!(".{}", self.config.no_results_class);
        self.table.query_selector(&selector).ok().flatten()
    }

    /// Body rows, without the feedback row.
    fn data_rows(&self) -> Vec<HtmlTableRowElement> {
        let Ok(rows) = self.table.query_selector_all("tbody tr") else {
            return Vec::new();
        };
        (0..rows.length())
            .filter_map(|i| rows.item(i))
            .filter_map(|n| n.dyn_into::<HtmlTableRowElement>().ok())
            .filter(|row| !row.class_list().contains(&self.config.no_results_class))
            .collect()
    }

    fn perform(&self) {
        let term = self.input.value();
        let rows = self.data_rows();
        let cells: Vec<Vec<String>> = rows.iter().map(row_text).collect();
        let outcome = search_rows(&cells, &self.config.columns, &term);

        for (row, visible) in rows.iter().zip(&outcome.visible) {
            set_visible(row, *visible);
        }

        // Add a "no results" message if no matches were found
        match (outcome.has_matches(), self.feedback_row()) {
            (false, None) => self.append_feedback(&term),
            (true, Some(row)) => row.remove(),
            _ => {}
        }
    }

    fn append_feedback(&self, term: &str) {
        let Some(document) = dom::document() else {
            return;
        };
        let Some(tbody) = self.table.query_selector("tbody").ok().flatten() else {
            return;
        };
        let Some(row) = dom::create_with_class(&document, "tr", &self.config.no_results_class) else {
            return;
        };
        let Some(cell) = dom::create_with_class(&document, "td", "text-center py-3") else {
            return;
        };
        let _ = cell.set_attribute("colspan", &self.config.no_results_colspan.to_string());
        cell.set_text_content(Some(&no_results_message(term)));
        let _ = row.append_child(&cell);
        let _ = tbody.append_child(&row);
    }

    fn reset(&self) {
        for row in self.data_rows() {
            set_visible(&row, true);
        }
        if let Some(row) = self.feedback_row() {
            row.remove();
        }
    }
}

fn row_text(row: &HtmlTableRowElement) -> Vec<String> {
    let cells = row.cells();
    (0..cells.length())
        .map(|i| {
            cells
                .item(i)
                .and_then(|c| c.text_content())
                .unwrap_or_default()
        })
        .collect()
}

fn set_visible(row: &HtmlElement, visible: bool) {
    let display = if visible { "" } else { "none" };
    let _ = row.style().set_property("display", display);
}

pub fn init(config: &SearchConfig) {
    let (Some(input), Some(button), Some(table)) = (
        dom::by_id::<HtmlInputElement>(&config.input_id),
        dom::by_id::<Element>(&config.button_id),
        dom::by_id::<Element>(&config.table_id),
    ) else {
        return;
    };

    let search = Rc::new(TableSearch {
        input: input.clone(),
        table,
        config: config.clone(),
    });

    // Search when button is clicked
    let on_click = search.clone();
    dom::listen(&button, "click", move |_| on_click.perform());

    // Search when Enter key is pressed in search box
    let on_key = search.clone();
    dom::listen(&input, "keyup", move |ev| {
        let is_enter = ev
            .dyn_ref::<KeyboardEvent>()
            .map_or(false, |k| k.key() == "Enter");
        if is_enter {
            on_key.perform();
        }
    });

    // Clear search when the search box is emptied
    let on_input = search;
    dom::listen(&input, "input", move |_| {
        if on_input.input.value().is_empty() {
            on_input.reset();
        }
    });
}
