//! View-models for analysis results.
//!
//! Everything here is a pure function of an [`AnalysisResult`]; the browser
//! and terminal front ends only copy these values into their own widgets.

pub mod chart;

use serde::Serialize;

use crate::analysis::outcome::{AnalysisResult, ReportRow, Suggestion};
use crate::model::RiskLevel;
use chart::ChartSpec;

/// Single list item shown when there is nothing to suggest.
pub const NO_SUGGESTIONS: &str = "No specific high-risk recommendations needed.";

/// Which parts of the page a front end renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewVariant {
    /// Header total and suggestion list only.
    Minimal,
    /// Summary cards, charts and the high-risk report as well.
    #[default]
    Extended,
}

/// Format a number the way the page prints it: integral values without a
/// fractional part, everything else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // also folds -0
        return "0".into();
    }
    format!("{value}")
}

pub fn format_kg(value: f64) -> String {
    format!("{} kg", format_number(value))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub total_emission: String,
    pub total_units: String,
    pub avg_emission: String,
    pub highest_impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionItemView {
    pub original_product: String,
    pub alternative_product: String,
    /// `Potential Reduction: <n> kg/unit`
    pub reduction: String,
    pub risk_badge: String,
}

impl SuggestionItemView {
    /// `<original> → <alternative>`
    pub fn headline(&self) -> String {
        format!("{} → {}", self.original_product, self.alternative_product)
    }
}

/// Content of the suggestion list. Never empty: no suggestions renders the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum SuggestionListView {
    Placeholder(String),
    Items(Vec<SuggestionItemView>),
}

impl SuggestionListView {
    /// Number of list items the front end must create.
    pub fn item_count(&self) -> usize {
        match self {
            SuggestionListView::Placeholder(_) => 1,
            SuggestionListView::Items(items) => items.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRowView {
    pub id: String,
    pub product: String,
    pub source: String,
    pub total_emission: String,
    pub risk_level: String,
    /// CSS class for the risk badge, e.g. `status-high-risk`.
    pub badge_class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    /// The report panel is hidden when there are no rows.
    pub visible: bool,
    pub rows: Vec<ReportRowView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedView {
    pub summary: SummaryView,
    pub report: ReportView,
    pub category_chart: ChartSpec,
    pub source_chart: ChartSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    /// Header total, e.g. `2979 kg`.
    pub total_emission: String,
    pub suggestions: SuggestionListView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<ExtendedView>,
}

/// Build the view for a successful analysis.
pub fn render_result(result: &AnalysisResult, variant: ViewVariant) -> ResultView {
    let extended = match variant {
        ViewVariant::Minimal => None,
        ViewVariant::Extended => Some(ExtendedView {
            summary: render_summary(result),
            report: render_report(&result.high_risk_report),
            category_chart: chart::category_chart(&result.category_emissions),
            source_chart: chart::source_chart(&result.source_emissions),
        }),
    };

    ResultView {
        total_emission: format_kg(result.total_emission),
        suggestions: render_suggestions(&result.suggestions),
        extended,
    }
}

pub fn render_summary(result: &AnalysisResult) -> SummaryView {
    SummaryView {
        total_emission: format_kg(result.total_emission),
        total_units: result.total_units.to_string(),
        avg_emission: format_kg(result.avg_emission),
        highest_impact: result.highest_impact.clone(),
    }
}

pub fn render_suggestions(suggestions: &[Suggestion]) -> SuggestionListView {
    if suggestions.is_empty() {
        return SuggestionListView::Placeholder(NO_SUGGESTIONS.into());
    }

    SuggestionListView::Items(
        suggestions
            .iter()
            .map(|s| SuggestionItemView {
                original_product: s.original_product.clone(),
                alternative_product: s.alternative_product.clone(),
                reduction: format!(
                    "Potential Reduction: {} kg/unit",
                    format_number(s.reduction_potential)
                ),
                risk_badge: s.risk_analysis.clone(),
            })
            .collect(),
    )
}

pub fn render_report(rows: &[ReportRow]) -> ReportView {
    ReportView {
        visible: !rows.is_empty(),
        rows: rows
            .iter()
            .map(|row| ReportRowView {
                id: row.id.clone(),
                product: row.product.clone(),
                source: row.source.clone(),
                total_emission: format_number(row.total_emission),
                risk_level: row.risk_level.clone(),
                badge_class: badge_class(&row.risk_level).into(),
            })
            .collect(),
    }
}

fn badge_class(label: &str) -> &'static str {
    match RiskLevel::from_str_loose(label) {
        Some(RiskLevel::Normal) => "status-badge status-normal",
        Some(RiskLevel::Critical) => "status-badge status-critical",
        // the report only carries high-risk rows; unknown labels get the same badge
        Some(RiskLevel::HighRisk) | None => "status-badge status-high-risk",
    }
}
