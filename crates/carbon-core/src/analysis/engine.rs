use crate::analysis::outcome::{AnalysisResult, ReportRow, NO_HIGHEST_IMPACT};
use crate::analysis::risk::classify_risk;
use crate::error::CarbonError;
use crate::factors::schema::FactorTableDef;
use crate::factors::Catalog;
use crate::model::{ProductRecord, RiskLevel};
use crate::recommend::Recommender;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A product record with its emission and risk level worked out.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessedProduct {
    pub record: ProductRecord,
    pub emission_per_unit: Decimal,
    pub total_emission: Decimal,
    pub risk: RiskLevel,
}

/// Work out emission and risk for a single record.
pub fn assess(
    record: &ProductRecord,
    factors: &FactorTableDef,
) -> Result<AssessedProduct, CarbonError> {
    let emission_per_unit = factors.factor_for(&record.category);
    let total_emission = record
        .units
        .checked_mul(emission_per_unit)
        .ok_or_else(|| CarbonError::OutOfRange(format!("emission of {}", record.product)))?;
    let risk = classify_risk(emission_per_unit, record.units, total_emission, &factors.risk);

    Ok(AssessedProduct {
        record: record.clone(),
        emission_per_unit,
        total_emission,
        risk,
    })
}

fn checked_sum(acc: &mut Decimal, value: Decimal, what: &str) -> Result<(), CarbonError> {
    *acc = acc
        .checked_add(value)
        .ok_or_else(|| CarbonError::OutOfRange(what.to_string()))?;
    Ok(())
}

/// Running totals over assessed products. Sums are exact (unrounded).
#[derive(Debug, Clone, Default)]
pub struct EmissionSummary {
    pub total_emission: Decimal,
    pub total_units: Decimal,
    /// Product with the largest positive total; ties keep the first seen.
    pub highest_impact: Option<(String, Decimal)>,
    pub risk_counts: BTreeMap<RiskLevel, u64>,
    pub by_category: BTreeMap<String, Decimal>,
    pub by_source: BTreeMap<String, Decimal>,
}

impl EmissionSummary {
    pub fn add(&mut self, item: &AssessedProduct) -> Result<(), CarbonError> {
        checked_sum(&mut self.total_emission, item.total_emission, "total emission")?;
        checked_sum(&mut self.total_units, item.record.units, "total units")?;

        let current_max = self
            .highest_impact
            .as_ref()
            .map(|(_, emission)| *emission)
            .unwrap_or(Decimal::ZERO);
        if item.total_emission > current_max {
            self.highest_impact = Some((item.record.product.clone(), item.total_emission));
        }

        *self.risk_counts.entry(item.risk).or_insert(0) += 1;
        checked_sum(
            self.by_category
                .entry(item.record.category.clone())
                .or_insert(Decimal::ZERO),
            item.total_emission,
            "category emission",
        )?;
        checked_sum(
            self.by_source
                .entry(item.record.source.clone())
                .or_insert(Decimal::ZERO),
            item.total_emission,
            "source emission",
        )
    }

    /// Emission per unit sold, rounded to 2 decimals. Zero when no units were sold.
    pub fn average_emission(&self) -> Decimal {
        if self.total_units > Decimal::ZERO {
            self.total_emission
                .checked_div(self.total_units)
                .unwrap_or_default()
                .round_dp(2)
        } else {
            Decimal::ZERO
        }
    }
}

/// Analyze product records into the response sent back to the page.
///
/// Fails with [`CarbonError::OutOfRange`] when a product total or a running
/// sum does not fit in a `Decimal`.
pub fn analyze(
    records: &[ProductRecord],
    catalog: &Catalog,
) -> Result<AnalysisResult, CarbonError> {
    let assessed = records
        .iter()
        .map(|r| assess(r, &catalog.factors))
        .collect::<Result<Vec<_>, _>>()?;

    let mut summary = EmissionSummary::default();
    for item in &assessed {
        summary.add(item)?;
    }

    let high_risk: Vec<&AssessedProduct> = assessed
        .iter()
        .filter(|a| a.risk == RiskLevel::HighRisk)
        .collect();

    let suggestions = Recommender::new(&catalog.alternatives).suggestions(&high_risk);

    tracing::debug!(
        rows = assessed.len(),
        high_risk = high_risk.len(),
        total_emission = %summary.total_emission,
        "analysis complete"
    );

    let risk_breakdown = RiskLevel::ALL
        .iter()
        .map(|level| {
            let count = summary.risk_counts.get(level).copied().unwrap_or(0);
            (level.label().to_string(), count)
        })
        .collect();

    let total_units = summary
        .total_units
        .trunc()
        .to_i64()
        .ok_or_else(|| CarbonError::OutOfRange("total units".into()))?;

    Ok(AnalysisResult {
        total_emission: to_f64(summary.total_emission.round_dp(2)),
        total_units,
        avg_emission: to_f64(summary.average_emission()),
        highest_impact: summary
            .highest_impact
            .as_ref()
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| NO_HIGHEST_IMPACT.into()),
        risk_breakdown,
        category_emissions: to_f64_map(&summary.by_category),
        source_emissions: to_f64_map(&summary.by_source),
        suggestions,
        high_risk_report: high_risk.iter().map(|a| report_row(a)).collect(),
    })
}

fn report_row(item: &AssessedProduct) -> ReportRow {
    ReportRow {
        id: item.record.id.clone(),
        product: item.record.product.clone(),
        category: item.record.category.clone(),
        source: item.record.source.clone(),
        units: to_f64(item.record.units),
        emission_per_unit: Some(to_f64(item.emission_per_unit)),
        total_emission: to_f64(item.total_emission.round_dp(2)),
        risk_level: item.risk.label().to_string(),
    }
}

/// Nearest `f64` to a decimal. Goes through the decimal text, which rounds
/// correctly where `ToPrimitive::to_f64` can be off by one ulp.
pub(crate) fn to_f64(value: Decimal) -> f64 {
    value.normalize().to_string().parse().unwrap_or(0.0)
}

fn to_f64_map(map: &BTreeMap<String, Decimal>) -> BTreeMap<String, f64> {
    map.iter().map(|(k, v)| (k.clone(), to_f64(*v))).collect()
}
