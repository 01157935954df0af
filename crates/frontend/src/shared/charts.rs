//! Chart.js helpers callable from page scripts.
//!
//! Pages load Chart.js themselves; these functions only build the
//! configuration and call `new Chart(ctx, config)` on the given canvas.

use contracts::shared::charts::{self, ChartConfig, Dataset};
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use super::dom;

fn js_err(msg: &str) -> JsValue {
    JsValue::from_str(msg)
}

/// Labels may arrive as strings or numbers.
fn labels_from(value: JsValue) -> Result<Vec<String>, JsValue> {
    let raw: Vec<serde_json::Value> = serde_wasm_bindgen::from_value(value)?;
    Ok(raw
        .into_iter()
        .map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

fn datasets_from(value: JsValue) -> Result<Vec<Dataset>, JsValue> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}

/// `"<dataset label>: <raw value>"` tooltip lines.
fn attach_tooltip_label(config: &JsValue) -> Result<(), JsValue> {
    let label = Closure::wrap(Box::new(|context: JsValue| -> JsValue {
        let dataset_label = Reflect::get(&context, &"dataset".into())
            .and_then(|d| Reflect::get(&d, &"label".into()))
            .ok()
            .and_then(|l| l.as_string())
            .unwrap_or_default();
        let raw = Reflect::get(&context, &"raw".into())
            .ok()
            .and_then(|r| r.as_f64().map(|n| n.to_string()).or_else(|| r.as_string()))
            .unwrap_or_default();
        JsValue::from_str(&format!("{}: {}", dataset_label, raw))
    }) as Box<dyn FnMut(JsValue) -> JsValue>)
    .into_js_value();

    let callbacks = Object::new();
    Reflect::set(&callbacks, &"label".into(), &label)?;
    let tooltip = Object::new();
    Reflect::set(&tooltip, &"callbacks".into(), &callbacks)?;

    let options = Reflect::get(config, &"options".into())?;
    let plugins = Reflect::get(&options, &"plugins".into())?;
    Reflect::set(&plugins, &"tooltip".into(), &tooltip)?;
    Ok(())
}

fn render(canvas_id: &str, config: ChartConfig, tooltip_label: bool) -> Result<JsValue, JsValue> {
    let canvas = dom::by_id::<HtmlCanvasElement>(canvas_id)
        .ok_or_else(|| js_err(&format!("canvas #{} not found", canvas_id)))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| js_err("2d context unavailable"))?;

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let js_config = config.serialize(&serializer)?;
    if tooltip_label {
        attach_tooltip_label(&js_config)?;
    }

    let chart: Function = Reflect::get(&js_sys::global(), &"Chart".into())?
        .dyn_into()
        .map_err(|_| js_err("Chart.js is not loaded"))?;
    log::debug!("rendering chart into #{}", canvas_id);
    Reflect::construct(&chart, &Array::of2(&ctx.into(), &js_config))
}

/// Generate a horizontal bar chart
#[wasm_bindgen(js_name = createHorizontalBarChart)]
pub fn create_horizontal_bar_chart(
    canvas_id: &str,
    labels: JsValue,
    datasets: JsValue,
    title: &str,
    x_axis_label: &str,
) -> Result<JsValue, JsValue> {
    let config = charts::horizontal_bar(labels_from(labels)?, datasets_from(datasets)?, title, x_axis_label);
    render(canvas_id, config, true)
}

/// Generate a line chart
#[wasm_bindgen(js_name = createLineChart)]
pub fn create_line_chart(
    canvas_id: &str,
    labels: JsValue,
    datasets: JsValue,
    title: &str,
    y_axis_label: &str,
    x_axis_label: &str,
) -> Result<JsValue, JsValue> {
    let config = charts::line(
        labels_from(labels)?,
        datasets_from(datasets)?,
        title,
        y_axis_label,
        x_axis_label,
    );
    render(canvas_id, config, false)
}

/// Generate a bar chart
#[wasm_bindgen(js_name = createBarChart)]
pub fn create_bar_chart(
    canvas_id: &str,
    labels: JsValue,
    datasets: JsValue,
    title: &str,
    y_axis_label: &str,
    x_axis_label: &str,
) -> Result<JsValue, JsValue> {
    let config = charts::bar(
        labels_from(labels)?,
        datasets_from(datasets)?,
        title,
        y_axis_label,
        x_axis_label,
    );
    render(canvas_id, config, false)
}

/// Generate a grouped bar chart for subject comparison
#[wasm_bindgen(js_name = createSubjectComparisonChart)]
pub fn create_subject_comparison_chart(
    canvas_id: &str,
    labels: JsValue,
    datasets: JsValue,
    title: &str,
) -> Result<JsValue, JsValue> {
    let config = charts::subject_comparison(labels_from(labels)?, datasets_from(datasets)?, title);
    render(canvas_id, config, false)
}

/// Generate a multi-student comparison chart
#[wasm_bindgen(js_name = createStudentComparisonChart)]
pub fn create_student_comparison_chart(
    canvas_id: &str,
    labels: JsValue,
    data: JsValue,
    title: &str,
    metric_label: &str,
) -> Result<JsValue, JsValue> {
    let data: Vec<f64> = serde_wasm_bindgen::from_value(data)?;
    let config = charts::student_comparison(
        labels_from(labels)?,
        data,
        title,
        metric_label,
        js_sys::Math::random,
    );
    render(canvas_id, config, false)
}
