//! Chart.js configuration builders.
//!
//! Each builder returns a [`ChartConfig`] that serializes to the object
//! literal Chart.js expects. Function-valued options (tooltip callbacks)
//! cannot be expressed here and are attached by the browser crate.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_OPACITY: f64 = 0.7;

/// An `rgba(r, g, b, a)` CSS colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Channels drawn from `random`, which must yield values in `[0, 1)`.
    pub fn random(mut random: impl FnMut() -> f64, opacity: f64) -> Self {
        let mut channel = || (random() * 255.0).floor().clamp(0.0, 255.0) as u8;
        Self {
            r: channel(),
            g: channel(),
            b: channel(),
            a: opacity,
        }
    }

    pub fn opaque(self) -> Self {
        Self { a: 1.0, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// `n` random colours with the same opacity.
pub fn color_palette(n: usize, mut random: impl FnMut() -> f64, opacity: f64) -> Vec<Rgba> {
    (0..n).map(|_| Rgba::random(&mut random, opacity)).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
}

/// One series as page scripts pass it in; extra styling keys are kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<&'static str>,
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    pub scales: Scales,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub title: Title,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
}

impl Legend {
    fn top() -> Self {
        Self {
            position: Some("top"),
            display: None,
        }
    }

    fn hidden() -> Self {
        Self {
            position: None,
            display: Some(false),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

impl Title {
    fn shown(text: &str) -> Self {
        Self {
            display: true,
            text: text.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scales {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Axis>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
}

impl Axis {
    fn titled(text: &str) -> Self {
        Self {
            title: Some(Title::shown(text)),
            begin_at_zero: None,
        }
    }

    fn from_zero(mut self) -> Self {
        self.begin_at_zero = Some(true);
        self
    }
}

fn base(
    chart_type: ChartType,
    labels: Vec<String>,
    datasets: Vec<Dataset>,
    title: &str,
) -> ChartConfig {
    ChartConfig {
        chart_type,
        data: ChartData { labels, datasets },
        options: ChartOptions {
            index_axis: None,
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Plugins {
                legend: Legend::top(),
                title: Title::shown(title),
            },
            scales: Scales::default(),
        },
    }
}

/// Horizontal bars; the value axis is x.
pub fn horizontal_bar(
    labels: Vec<String>,
    datasets: Vec<Dataset>,
    title: &str,
    x_label: &str,
) -> ChartConfig {
    let mut config = base(ChartType::Bar, labels, datasets, title);
    config.options.index_axis = Some("y");
    config.options.scales.x = Some(Axis::titled(x_label).from_zero());
    config
}

fn vertical(
    chart_type: ChartType,
    labels: Vec<String>,
    datasets: Vec<Dataset>,
    title: &str,
    y_label: &str,
    x_label: &str,
) -> ChartConfig {
    let mut config = base(chart_type, labels, datasets, title);
    config.options.scales = Scales {
        x: Some(Axis::titled(x_label)),
        y: Some(Axis::titled(y_label).from_zero()),
    };
    config
}

pub fn line(
    labels: Vec<String>,
    datasets: Vec<Dataset>,
    title: &str,
    y_label: &str,
    x_label: &str,
) -> ChartConfig {
    vertical(ChartType::Line, labels, datasets, title, y_label, x_label)
}

pub fn bar(
    labels: Vec<String>,
    datasets: Vec<Dataset>,
    title: &str,
    y_label: &str,
    x_label: &str,
) -> ChartConfig {
    vertical(ChartType::Bar, labels, datasets, title, y_label, x_label)
}

/// Grouped bars per subject, untitled axes.
pub fn subject_comparison(labels: Vec<String>, datasets: Vec<Dataset>, title: &str) -> ChartConfig {
    let mut config = base(ChartType::Bar, labels, datasets, title);
    config.options.scales.y = Some(Axis::default().from_zero());
    config
}

/// One horizontal series, one colour per student, no legend.
pub fn student_comparison(
    labels: Vec<String>,
    data: Vec<f64>,
    title: &str,
    metric_label: &str,
    random: impl FnMut() -> f64,
) -> ChartConfig {
    let palette = color_palette(labels.len(), random, DEFAULT_OPACITY);
    let to_json = |colors: Vec<String>| {
        serde_json::Value::Array(colors.into_iter().map(serde_json::Value::String).collect())
    };
    let dataset = Dataset {
        label: metric_label.to_string(),
        data,
        background_color: Some(to_json(palette.iter().map(Rgba::to_string).collect())),
        border_color: Some(to_json(
            palette.iter().map(|c| c.opaque().to_string()).collect(),
        )),
        border_width: Some(1),
        extra: serde_json::Map::new(),
    };

    let mut config = horizontal_bar(labels, vec![dataset], title, metric_label);
    config.options.plugins.legend = Legend::hidden();
    config
}
