use carbon_core::factors::{self, builtin};
use std::path::Path;

use crate::error::CliError;

pub fn list() -> Result<(), CliError> {
    let table = builtin::factor_table()?;

    println!("{} (v{})\n", table.name, table.version);
    if let Some(ref desc) = table.description {
        println!("{}\n", desc);
    }

    let width = table.factors.keys().map(|k| k.len()).max().unwrap_or(10);
    for (category, factor) in &table.factors {
        println!("  {:<width$}  {} {}", category, factor, table.unit, width = width);
    }
    println!("\nCategories not listed have a factor of 0.");
    Ok(())
}

pub fn explain() -> Result<(), CliError> {
    let table = builtin::factor_table()?;
    let alternatives = builtin::alternatives()?;
    let risk = &table.risk;

    println!("Emission per product line = units sold x category factor.\n");
    println!("Risk level (first matching rule wins):\n");
    println!(
        "  High-Risk  factor > {} {} and more than {} units sold",
        risk.high_unit_factor, table.unit, risk.high_unit_volume
    );
    println!("  High-Risk  total emission > {} kg", risk.high_total);
    println!("  Critical   total emission > {} kg", risk.critical_total);
    println!("  Normal     everything else\n");

    println!("Every High-Risk product gets one suggestion. The alternative is assumed");
    println!(
        "to emit {} kg per unit; the suggestion is flagged '{}'",
        alternatives.alternative_factor,
        carbon_core::recommend::MINIMAL_REDUCTION_RISK
    );
    println!("when that saves less than 10% per unit.\n");

    println!("Alternatives by category:\n");
    for cat in &alternatives.categories {
        println!("  {} (default: {})", cat.keyword, cat.default);
        for product in &cat.products {
            println!("    {:<20} -> {}", product.keyword, product.alternative);
        }
    }
    println!("\n  Anything else -> {}", alternatives.fallback);
    Ok(())
}

pub fn validate(file: &Path, alternatives: bool) -> Result<(), CliError> {
    if alternatives {
        let db = factors::load_alternatives(file)?;
        println!("Alternatives '{}' (v{}) are valid.", db.name, db.version);
        println!("  Categories: {}", db.categories.len());
        let products: usize = db.categories.iter().map(|c| c.products.len()).sum();
        println!("  Product alternatives: {}", products);
        return Ok(());
    }

    let table = factors::load_factor_table(file)?;
    println!("Factor table '{}' (v{}) is valid.", table.name, table.version);
    println!(
        "  Categories: {}",
        table.factors.keys().cloned().collect::<Vec<_>>().join(", ")
    );

    let builtin = builtin::factor_table()?;
    let missing: Vec<&String> = builtin
        .factors
        .keys()
        .filter(|k| !table.factors.contains_key(*k))
        .collect();
    if !missing.is_empty() {
        println!("\nWarnings:");
        for category in missing {
            println!("  - built-in category '{}' is not covered and will count as 0", category);
        }
    }

    Ok(())
}
