//! Page state: file selection, the analyze button and the last result.
//!
//! [`AnalysisSession`] is generic over the file handle so the browser can
//! hold a `web_sys::File` and the terminal client a path.

use serde::Serialize;

use crate::analysis::outcome::AnalysisResult;
use crate::client::ClientError;
use crate::error::CarbonError;
use crate::export;
use crate::view::{render_result, ResultView, ViewVariant};

pub const NO_FILE_SELECTED: &str = "No file selected";
pub const ANALYZE_LABEL: &str = "Analyze Carbon Emission";
pub const ANALYZING_LABEL: &str = "Analyzing...";
pub const COMPLETE_LABEL: &str = "Analysis Complete";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInputView {
    pub file_name: String,
    pub analyze_enabled: bool,
    /// CSS opacity of the analyze button.
    pub opacity: &'static str,
}

/// What the file picker area shows for the given selection.
pub fn file_input_view<S: AsRef<str>>(names: &[S]) -> FileInputView {
    match names.first() {
        Some(name) => FileInputView {
            file_name: name.as_ref().to_string(),
            analyze_enabled: true,
            opacity: "1",
        },
        None => FileInputView {
            file_name: NO_FILE_SELECTED.into(),
            analyze_enabled: false,
            opacity: "0.6",
        },
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalyzeState {
    #[default]
    Idle,
    Analyzing,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub label: &'static str,
    pub disabled: bool,
}

impl AnalyzeState {
    pub fn button(&self) -> ButtonView {
        match self {
            AnalyzeState::Idle => ButtonView {
                label: ANALYZE_LABEL,
                disabled: false,
            },
            AnalyzeState::Analyzing => ButtonView {
                label: ANALYZING_LABEL,
                disabled: true,
            },
            AnalyzeState::Complete => ButtonView {
                label: COMPLETE_LABEL,
                disabled: false,
            },
        }
    }
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile<F> {
    pub name: String,
    pub handle: F,
}

/// State of one page: the current selection, the button and the last
/// successful result (used by export).
#[derive(Debug)]
pub struct AnalysisSession<F> {
    selected: Option<SelectedFile<F>>,
    state: AnalyzeState,
    last_result: Option<AnalysisResult>,
    /// Result replaced by the latest `finish`, restored if that one never displays.
    replaced_result: Option<AnalysisResult>,
    variant: ViewVariant,
}

impl<F: Clone> Default for AnalysisSession<F> {
    fn default() -> Self {
        Self::new(ViewVariant::default())
    }
}

impl<F: Clone> AnalysisSession<F> {
    pub fn new(variant: ViewVariant) -> Self {
        Self {
            selected: None,
            state: AnalyzeState::Idle,
            last_result: None,
            replaced_result: None,
            variant,
        }
    }

    pub fn state(&self) -> AnalyzeState {
        self.state
    }

    pub fn selected(&self) -> Option<&SelectedFile<F>> {
        self.selected.as_ref()
    }

    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    /// Replace the selection with the first of `files` (none clears it).
    pub fn select_files(&mut self, files: Vec<(String, F)>) -> FileInputView {
        let names: Vec<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
        let view = file_input_view(&names);
        self.selected = files
            .into_iter()
            .next()
            .map(|(name, handle)| SelectedFile { name, handle });
        view
    }

    /// Move to `Analyzing` and hand out the file to upload.
    ///
    /// Fails without changing state when nothing is selected or an upload is
    /// still pending.
    pub fn begin_analysis(&mut self) -> Result<SelectedFile<F>, ClientError> {
        if self.state == AnalyzeState::Analyzing {
            return Err(ClientError::AlreadyInFlight);
        }
        let file = self.selected.clone().ok_or(ClientError::NoFileSelected)?;
        self.state = AnalyzeState::Analyzing;
        Ok(file)
    }

    /// Record the outcome of the pending upload.
    ///
    /// Success stores the result for export and returns its view; failure
    /// puts the button back to idle and keeps the previous result.
    pub fn finish(
        &mut self,
        outcome: Result<AnalysisResult, ClientError>,
    ) -> Result<ResultView, ClientError> {
        match outcome {
            Ok(result) => {
                let view = render_result(&result, self.variant);
                self.replaced_result = self.last_result.replace(result);
                self.state = AnalyzeState::Complete;
                Ok(view)
            }
            Err(err) => {
                self.state = AnalyzeState::Idle;
                Err(err)
            }
        }
    }

    /// The view returned by the last `finish` could not be displayed.
    ///
    /// Goes back to idle and brings back the result that was shown before,
    /// so export never offers a report the user has not seen.
    pub fn fail_render(&mut self, reason: impl Into<String>) -> ClientError {
        if self.state == AnalyzeState::Complete {
            self.last_result = self.replaced_result.take();
        }
        self.state = AnalyzeState::Idle;
        ClientError::Render(reason.into())
    }

    /// CSV text of the last result's high-risk report.
    pub fn export_csv(&self) -> Result<String, CarbonError> {
        let result = self.last_result.as_ref().ok_or(CarbonError::NothingToExport)?;
        export::report_csv(&result.high_risk_report)
    }

    /// `data:` URI for downloading the last report.
    pub fn export_data_uri(&self) -> Result<String, CarbonError> {
        let result = self.last_result.as_ref().ok_or(CarbonError::NothingToExport)?;
        export::report_data_uri(&result.high_risk_report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::outcome::ReportRow;

    fn file(name: &str) -> (String, u32) {
        (name.to_string(), 7)
    }

    fn result_with_rows(rows: usize) -> AnalysisResult {
        AnalysisResult {
            total_emission: 5.0,
            high_risk_report: (0..rows)
                .map(|i| ReportRow {
                    id: (i + 1).to_string(),
                    product: "A".into(),
                    category: "X".into(),
                    source: "grid".into(),
                    units: 2.0,
                    emission_per_unit: None,
                    total_emission: 5.0,
                    risk_level: "high".into(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_files_disables_analyze() {
        let view = file_input_view::<&str>(&[]);
        assert_eq!(view.file_name, "No file selected");
        assert!(!view.analyze_enabled);
        assert_eq!(view.opacity, "0.6");
    }

    #[test]
    fn test_first_file_name_shown() {
        let mut session = AnalysisSession::<u32>::default();
        let view = session.select_files(vec![file("sales.csv"), file("other.csv")]);
        assert_eq!(view.file_name, "sales.csv");
        assert!(view.analyze_enabled);
        assert_eq!(view.opacity, "1");
        assert_eq!(session.selected().unwrap().name, "sales.csv");
    }

    #[test]
    fn test_clearing_selection_disables_again() {
        let mut session = AnalysisSession::<u32>::default();
        session.select_files(vec![file("sales.csv")]);
        let view = session.select_files(vec![]);
        assert!(!view.analyze_enabled);
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_analyze_without_file_is_refused() {
        let mut session = AnalysisSession::<u32>::default();
        assert_eq!(session.begin_analysis(), Err(ClientError::NoFileSelected));
        assert_eq!(session.state(), AnalyzeState::Idle);
    }

    #[test]
    fn test_button_walks_through_states() {
        let mut session = AnalysisSession::<u32>::default();
        session.select_files(vec![file("sales.csv")]);
        assert_eq!(session.state().button().label, "Analyze Carbon Emission");

        let pending = session.begin_analysis().unwrap();
        assert_eq!(pending.name, "sales.csv");
        assert_eq!(
            session.state().button(),
            ButtonView {
                label: "Analyzing...",
                disabled: true
            }
        );

        session.finish(Ok(result_with_rows(1))).unwrap();
        assert_eq!(
            session.state().button(),
            ButtonView {
                label: "Analysis Complete",
                disabled: false
            }
        );
    }

    #[test]
    fn test_second_submit_while_pending_is_refused() {
        let mut session = AnalysisSession::<u32>::default();
        session.select_files(vec![file("sales.csv")]);
        session.begin_analysis().unwrap();
        assert_eq!(session.begin_analysis(), Err(ClientError::AlreadyInFlight));
    }

    #[test]
    fn test_failure_resets_to_idle_and_keeps_previous_result() {
        let mut session = AnalysisSession::<u32>::default();
        session.select_files(vec![file("sales.csv")]);
        session.begin_analysis().unwrap();
        session.finish(Ok(result_with_rows(2))).unwrap();

        session.begin_analysis().unwrap();
        let err = session
            .finish(Err(ClientError::Transport("connection refused".into())))
            .unwrap_err();
        assert_eq!(err.alert_text(), "Error processing file: connection refused");
        assert_eq!(session.state(), AnalyzeState::Idle);
        assert!(!session.state().button().disabled);
        assert_eq!(session.last_result().unwrap().high_risk_report.len(), 2);
    }

    #[test]
    fn test_render_failure_resets_to_idle_and_restores_previous_result() {
        let mut session = AnalysisSession::<u32>::default();
        session.select_files(vec![file("sales.csv")]);
        session.begin_analysis().unwrap();
        session.finish(Ok(result_with_rows(2))).unwrap();

        session.begin_analysis().unwrap();
        session.finish(Ok(result_with_rows(5))).unwrap();
        let err = session.fail_render("Chart.js is not loaded");

        assert_eq!(err.alert_text(), "Error processing file: Chart.js is not loaded");
        assert_eq!(
            session.state().button(),
            ButtonView {
                label: "Analyze Carbon Emission",
                disabled: false
            }
        );
        assert_eq!(session.last_result().unwrap().high_risk_report.len(), 2);
    }

    #[test]
    fn test_render_failure_on_first_result_leaves_nothing_to_export() {
        let mut session = AnalysisSession::<u32>::default();
        session.select_files(vec![file("sales.csv")]);
        session.begin_analysis().unwrap();
        session.finish(Ok(result_with_rows(1))).unwrap();
        session.fail_render("missing #reportBox");

        assert!(session.last_result().is_none());
        assert!(matches!(session.export_csv(), Err(CarbonError::NothingToExport)));
    }

    #[test]
    fn test_export_before_any_analysis_fails() {
        let session = AnalysisSession::<u32>::default();
        assert!(matches!(session.export_csv(), Err(CarbonError::NothingToExport)));
        assert!(session.export_data_uri().is_err());
    }

    #[test]
    fn test_export_with_empty_report_fails() {
        let mut session = AnalysisSession::<u32>::default();
        session.select_files(vec![file("sales.csv")]);
        session.begin_analysis().unwrap();
        session.finish(Ok(result_with_rows(0))).unwrap();
        assert!(matches!(session.export_csv(), Err(CarbonError::NothingToExport)));
    }

    #[test]
    fn test_export_uses_latest_result() {
        let mut session = AnalysisSession::<u32>::default();
        session.select_files(vec![file("sales.csv")]);
        for rows in [3, 1] {
            session.begin_analysis().unwrap();
            session.finish(Ok(result_with_rows(rows))).unwrap();
        }
        assert_eq!(
            session.export_csv().unwrap(),
            "Product ID,Product,Category,Source,Units,Total Emission (kg),Risk Level\n1,A,X,grid,2,5,high\r\n"
        );
    }

    #[test]
    fn test_rerender_replaces_report_rows() {
        let mut session = AnalysisSession::<u32>::default();
        session.select_files(vec![file("sales.csv")]);
        session.begin_analysis().unwrap();
        session.finish(Ok(result_with_rows(3))).unwrap();
        session.begin_analysis().unwrap();
        let view = session.finish(Ok(result_with_rows(2))).unwrap();
        assert_eq!(view.extended.unwrap().report.rows.len(), 2);
    }
}
