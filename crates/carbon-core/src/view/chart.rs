use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Slice colours of the category doughnut, reused cyclically.
pub const CATEGORY_PALETTE: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

pub const SOURCE_BAR_COLOR: &str = "#00c6ff";
pub const SOURCE_BAR_BORDER: &str = "#007ab3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Bar,
}

/// Backend-neutral description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Doughnut of emissions per product category.
pub fn category_chart(category_emissions: &BTreeMap<String, f64>) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Doughnut,
        dataset_label: "Carbon Emission (kg)".into(),
        labels: category_emissions.keys().cloned().collect(),
        values: category_emissions.values().copied().collect(),
    }
}

/// Bar chart of emissions per production source.
pub fn source_chart(source_emissions: &BTreeMap<String, f64>) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        dataset_label: "Emission by Source (kg)".into(),
        labels: source_emissions.keys().cloned().collect(),
        values: source_emissions.values().copied().collect(),
    }
}

impl ChartSpec {
    /// The `data` block of a Chart.js configuration.
    pub fn chartjs_data(&self) -> Value {
        let dataset = match self.kind {
            ChartKind::Doughnut => json!({
                "label": self.dataset_label,
                "data": self.values,
                "backgroundColor": CATEGORY_PALETTE,
                "borderWidth": 1,
            }),
            ChartKind::Bar => json!({
                "label": self.dataset_label,
                "data": self.values,
                "backgroundColor": SOURCE_BAR_COLOR,
                "borderColor": SOURCE_BAR_BORDER,
                "borderWidth": 1,
            }),
        };
        json!({ "labels": self.labels, "datasets": [dataset] })
    }

    /// Full Chart.js configuration (`type`, `data`, `options`) for a dark page.
    pub fn chartjs_config(&self) -> Value {
        let options = match self.kind {
            ChartKind::Doughnut => json!({
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "legend": { "position": "bottom", "labels": { "color": "white" } }
                }
            }),
            ChartKind::Bar => json!({
                "responsive": true,
                "maintainAspectRatio": false,
                "scales": {
                    "y": {
                        "beginAtZero": true,
                        "ticks": { "color": "white" },
                        "grid": { "color": "rgba(255, 255, 255, 0.1)" }
                    },
                    "x": {
                        "ticks": { "color": "white" },
                        "grid": { "display": false }
                    }
                },
                "plugins": { "legend": { "display": false } }
            }),
        };
        json!({ "type": self.kind, "data": self.chartjs_data(), "options": options })
    }
}

/// A live chart drawn by some charting backend.
pub trait ChartHandle {
    type Error;

    /// Replace the chart's data in place.
    fn update(&mut self, spec: &ChartSpec) -> Result<(), Self::Error>;

    /// Release the chart. The handle is not used afterwards.
    fn dispose(&mut self);
}

/// Owner of at most one live chart for a canvas.
///
/// Rendering into an occupied slot updates the chart in place; if the update
/// fails or the chart kind changes, the old chart is disposed before a new
/// one is created. Dropping the slot disposes its chart.
pub struct ChartSlot<H: ChartHandle> {
    current: Option<(ChartKind, H)>,
}

impl<H: ChartHandle> Default for ChartSlot<H> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<H: ChartHandle> ChartSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Show `spec`, creating a chart through `create` when none can be reused.
    pub fn render<F>(&mut self, spec: &ChartSpec, create: F) -> Result<(), H::Error>
    where
        F: FnOnce(&ChartSpec) -> Result<H, H::Error>,
    {
        if let Some((kind, handle)) = self.current.as_mut() {
            if *kind == spec.kind && handle.update(spec).is_ok() {
                return Ok(());
            }
        }

        self.clear();
        let handle = create(spec)?;
        self.current = Some((spec.kind, handle));
        Ok(())
    }

    /// Dispose the current chart, if any.
    pub fn clear(&mut self) {
        if let Some((_, mut handle)) = self.current.take() {
            handle.dispose();
        }
    }
}

impl<H: ChartHandle> Drop for ChartSlot<H> {
    fn drop(&mut self) {
        self.clear();
    }
}
