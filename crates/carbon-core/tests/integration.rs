//! End-to-end tests for analyze_upload() on the bundled sample sheet.

use carbon_core::analyze_upload;
use carbon_core::client::interpret_response;
use carbon_core::error::CarbonError;
use carbon_core::export::report_csv;
use carbon_core::factors::Catalog;
use carbon_core::ui::{AnalysisSession, AnalyzeState};
use carbon_core::view::{render_result, SuggestionListView, ViewVariant};

const SAMPLE_CSV: &[u8] = include_bytes!("../../../data/sample.csv");

fn catalog() -> Catalog {
    Catalog::builtin().unwrap()
}

// ---------------------------------------------------------------------------
// Aggregates over the sample sheet
// ---------------------------------------------------------------------------
#[test]
fn sample_sheet_totals() {
    let analysis = analyze_upload("sample.csv", SAMPLE_CSV, &catalog()).unwrap();
    let result = &analysis.result;

    assert_eq!(result.total_emission, 2979.0);
    assert_eq!(result.total_units, 800);
    // 2979 / 800 = 3.72375
    assert_eq!(result.avg_emission, 3.72);
    assert_eq!(result.highest_impact, "Phone");

    assert_eq!(result.risk_breakdown["Normal"], 3);
    assert_eq!(result.risk_breakdown["Critical"], 2);
    assert_eq!(result.risk_breakdown["High-Risk"], 3);
}

#[test]
fn sample_sheet_breakdowns() {
    let result = analyze_upload("sample.csv", SAMPLE_CSV, &catalog())
        .unwrap()
        .result;

    assert_eq!(result.category_emissions["Dairy"], 152.0);
    assert_eq!(result.category_emissions["Plastic"], 525.0);
    assert_eq!(result.category_emissions["Electronics"], 1312.0);
    assert_eq!(result.category_emissions["Food"], 630.0);
    assert_eq!(result.category_emissions["Textile"], 360.0);
    assert_eq!(result.category_emissions["Transport"], 0.0);

    assert_eq!(result.source_emissions["Local Farm"], 782.0);
    assert_eq!(result.source_emissions["Factory A"], 525.0);
    assert_eq!(result.source_emissions["Imported (China)"], 1312.0);
    assert_eq!(result.source_emissions["Factory B"], 360.0);
    assert_eq!(result.source_emissions["Imported (USA)"], 0.0);
}

#[test]
fn sample_sheet_high_risk_report_and_suggestions() {
    let result = analyze_upload("sample.csv", SAMPLE_CSV, &catalog())
        .unwrap()
        .result;

    let ids: Vec<&str> = result.high_risk_report.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["P0002", "P0004", "P0008"]);

    let alternatives: Vec<(&str, f64, &str)> = result
        .suggestions
        .iter()
        .map(|s| {
            (
                s.alternative_product.as_str(),
                s.reduction_potential,
                s.risk_analysis.as_str(),
            )
        })
        .collect();
    assert_eq!(
        alternatives,
        vec![
            ("Reusable Metal/Glass Bottle", 3.0, "Low"),
            ("Plant-based Meat / Lentils", 1.6, "Low"),
            ("Refurbished Phone / Fairphone", 7.7, "Low"),
        ]
    );
}

#[test]
fn sample_sheet_reports_skipped_units() {
    let analysis = analyze_upload("sample.csv", SAMPLE_CSV, &catalog()).unwrap();
    assert_eq!(analysis.skipped_values.len(), 1);
    assert_eq!(analysis.skipped_values[0].product, "Cheese");
    assert_eq!(analysis.skipped_values[0].raw_value, "abc");
    assert_eq!(analysis.skipped_values[0].line, 8);
}

// ---------------------------------------------------------------------------
// Export of the sample report
// ---------------------------------------------------------------------------
#[test]
fn sample_sheet_export() {
    let result = analyze_upload("sample.csv", SAMPLE_CSV, &catalog())
        .unwrap()
        .result;
    let csv = report_csv(&result.high_risk_report).unwrap();
    assert_eq!(
        csv,
        "Product ID,Product,Category,Source,Units,Total Emission (kg),Risk Level\n\
         P0002,Bottle,Plastic,Factory A,150,525,High-Risk\r\n\
         P0004,Beef,Food,Local Farm,300,630,High-Risk\r\n\
         P0008,Phone,Electronics,Imported (China),120,984,High-Risk\r\n"
    );
}

// ---------------------------------------------------------------------------
// Degenerate inputs
// ---------------------------------------------------------------------------
#[test]
fn header_only_sheet_is_all_zero() {
    let result = analyze_upload(
        "empty.csv",
        b"Product,Category,Units_Sold\n",
        &catalog(),
    )
    .unwrap()
    .result;

    assert_eq!(result.total_emission, 0.0);
    assert_eq!(result.avg_emission, 0.0);
    assert_eq!(result.highest_impact, "-");
    assert!(result.suggestions.is_empty());
    assert!(result.high_risk_report.is_empty());
    assert!(matches!(report_csv(&result.high_risk_report), Err(CarbonError::NothingToExport)));
}

#[test]
fn missing_required_column_is_rejected() {
    let err = analyze_upload("bad.csv", b"Product,Units_Sold\nMilk,10\n", &catalog()).unwrap_err();
    assert_eq!(err.to_string(), "File must contain Product, Category, Units_Sold columns");
}

#[test]
fn huge_units_are_an_error_not_a_panic() {
    let csv = b"Product,Category,Units_Sold\nPhone,Electronics,10000000000000000000000000000\n";
    let err = analyze_upload("a.csv", csv, &catalog()).unwrap_err();
    assert!(matches!(err, CarbonError::OutOfRange(_)));
}

#[test]
fn units_beyond_decimal_range_are_an_error() {
    let csv = b"Product,Category,Units_Sold\nPhone,Electronics,1e30\n";
    let err = analyze_upload("a.csv", csv, &catalog()).unwrap_err();
    assert_eq!(err.to_string(), "value out of range: Units_Sold 1e30 on line 2");
}

#[test]
fn unreadable_workbook_is_rejected() {
    assert!(analyze_upload("sales.xlsx", SAMPLE_CSV, &catalog()).is_err());
}

// ---------------------------------------------------------------------------
// Wire round trip: server JSON through the client session into the view
// ---------------------------------------------------------------------------
#[test]
fn server_json_renders_through_session() {
    let result = analyze_upload("sample.csv", SAMPLE_CSV, &catalog())
        .unwrap()
        .result;
    let body = serde_json::to_string(&result).unwrap();

    let mut session = AnalysisSession::<()>::default();
    session.select_files(vec![("sample.csv".into(), ())]);
    session.begin_analysis().unwrap();
    let view = session.finish(interpret_response(200, &body)).unwrap();

    assert_eq!(session.state(), AnalyzeState::Complete);
    assert_eq!(view.total_emission, "2979 kg");
    assert_eq!(view.suggestions.item_count(), 3);

    let extended = view.extended.unwrap();
    assert_eq!(extended.summary.avg_emission, "3.72 kg");
    assert_eq!(extended.report.rows.len(), 3);
    assert_eq!(extended.category_chart.labels.len(), 6);

    assert!(session.export_csv().unwrap().contains("P0008,Phone"));
}

#[test]
fn minimal_variant_on_sample() {
    let result = analyze_upload("sample.csv", SAMPLE_CSV, &catalog())
        .unwrap()
        .result;
    let view = render_result(&result, ViewVariant::Minimal);
    assert!(view.extended.is_none());
    match view.suggestions {
        SuggestionListView::Items(items) => {
            assert_eq!(items[0].headline(), "Bottle → Reusable Metal/Glass Bottle");
        }
        other => panic!("expected suggestion items, got {other:?}"),
    }
}
