use carbon_core::view::chart::ChartSpec;
use carbon_core::view::{format_number, ResultView, SuggestionListView};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

/// Terminal rendering of an analysis view.
pub fn format_result(view: &ResultView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Total emission: {}", view.total_emission);

    if let Some(ext) = &view.extended {
        let _ = writeln!(out, "Units sold:     {}", ext.summary.total_units);
        let _ = writeln!(out, "Average:        {} per unit", ext.summary.avg_emission);
        let _ = writeln!(out, "Highest impact: {}", ext.summary.highest_impact);
        out.push('\n');
        format_chart(&mut out, "Emission by category", &ext.category_chart);
        format_chart(&mut out, "Emission by source", &ext.source_chart);
    }

    out.push_str("Suggestions:\n");
    match &view.suggestions {
        SuggestionListView::Placeholder(text) => {
            let _ = writeln!(out, "  {text}");
        }
        SuggestionListView::Items(items) => {
            for item in items {
                let _ = writeln!(out, "  {}", item.headline());
                let _ = writeln!(out, "    {}  [{}]", item.reduction, item.risk_badge);
            }
        }
    }

    if let Some(ext) = &view.extended {
        if ext.report.visible {
            out.push('\n');
            format_report(&mut out, ext);
        }
    }

    out.trim_end().to_string()
}

fn format_chart(out: &mut String, title: &str, chart: &ChartSpec) {
    let _ = writeln!(out, "{title}:");
    if chart.labels.is_empty() {
        out.push_str("  (no data)\n\n");
        return;
    }

    let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let max = chart.values.iter().cloned().fold(0.0_f64, f64::max);

    for (label, value) in chart.labels.iter().zip(&chart.values) {
        let len = if max > 0.0 && *value > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {:<width$}  {:<bar$}  {}",
            label,
            "#".repeat(len),
            format_number(*value),
            width = label_width,
            bar = BAR_WIDTH
        );
    }
    out.push('\n');
}

fn format_report(out: &mut String, ext: &carbon_core::view::ExtendedView) {
    let headers = ["ID", "Product", "Source", "Emission (kg)", "Risk"];
    let rows: Vec<[&str; 5]> = ext
        .report
        .rows
        .iter()
        .map(|r| {
            [
                r.id.as_str(),
                r.product.as_str(),
                r.source.as_str(),
                r.total_emission.as_str(),
                r.risk_level.as_str(),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.len());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    out.push_str("High-risk report:\n");
    push_row(out, &headers, &widths);
    let rule: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let _ = writeln!(out, "  {}", "-".repeat(rule));
    for row in &rows {
        push_row(out, row, &widths);
    }
}

fn push_row(out: &mut String, cells: &[&str; 5], widths: &[usize; 5]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    let _ = writeln!(out, "  {}", line.join("  ").trim_end());
}
