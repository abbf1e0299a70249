use crate::analysis::engine::{to_f64, AssessedProduct};
use crate::analysis::outcome::Suggestion;
use crate::factors::schema::AlternativesDef;
use rust_decimal::Decimal;

/// Risk label for alternatives that cut emissions substantially.
pub const LOW_SUBSTITUTION_RISK: &str = "Low";

/// Risk label for alternatives saving less than 10% per unit.
pub const MINIMAL_REDUCTION_RISK: &str = "Moderate - Minimal Reduction";

/// Looks up lower-emission alternatives for high-risk products.
pub struct Recommender<'a> {
    db: &'a AlternativesDef,
}

impl<'a> Recommender<'a> {
    pub fn new(db: &'a AlternativesDef) -> Self {
        Self { db }
    }

    /// Alternative name for a product and its estimated per-unit factor.
    ///
    /// The category entry is the first whose keyword appears in the category
    /// (case-insensitive); within it, the first product keyword found in the
    /// product name wins, else the category default.
    pub fn find_alternative(&self, category: &str, product: &str) -> (&'a str, Decimal) {
        let db: &'a AlternativesDef = self.db;
        let category_lower = category.to_lowercase();
        let product_lower = product.to_lowercase();

        let entry = db
            .categories
            .iter()
            .find(|c| category_lower.contains(&c.keyword.to_lowercase()));

        let name = match entry {
            None => db.fallback.as_str(),
            Some(entry) => entry
                .products
                .iter()
                .find(|p| product_lower.contains(&p.keyword.to_lowercase()))
                .map(|p| p.alternative.as_str())
                .unwrap_or(entry.default.as_str()),
        };

        (name, db.alternative_factor)
    }

    /// Suggestion for one assessed product.
    pub fn suggest(&self, item: &AssessedProduct) -> Suggestion {
        let current = item.emission_per_unit;
        let (alternative, alternative_factor) =
            self.find_alternative(&item.record.category, &item.record.product);

        // Less than 10% improvement
        let risk_analysis = if alternative_factor >= current * Decimal::new(9, 1) {
            MINIMAL_REDUCTION_RISK
        } else {
            LOW_SUBSTITUTION_RISK
        };

        let reduction = (current - alternative_factor).round_dp(2).max(Decimal::ZERO);

        Suggestion {
            original_product: item.record.product.clone(),
            category: item.record.category.clone(),
            alternative_product: alternative.to_string(),
            reduction_potential: to_f64(reduction),
            risk_analysis: risk_analysis.to_string(),
        }
    }

    /// One suggestion per product, in input order.
    pub fn suggestions(&self, items: &[&AssessedProduct]) -> Vec<Suggestion> {
        items.iter().map(|item| self.suggest(item)).collect()
    }
}
