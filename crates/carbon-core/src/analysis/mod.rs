pub mod engine;
pub mod outcome;
pub mod risk;

pub use engine::{analyze, assess, AssessedProduct, EmissionSummary};
pub use outcome::{AnalysisResult, ErrorBody, ReportRow, Suggestion};
pub use risk::classify_risk;
