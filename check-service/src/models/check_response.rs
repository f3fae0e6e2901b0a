use serde::{Deserialize, Serialize};

use crate::scoring::Report;

/// Body of a scored submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub success: bool,
    pub check_id: String,
    pub num_frames: usize,
    pub num_paintings: usize,
    pub global_score: u64,
    pub warnings: Vec<String>,
}

impl CheckResponse {
    pub fn new(check_id: String, report: Report) -> Self {
        CheckResponse {
            success: true,
            check_id,
            num_frames: report.num_frames,
            num_paintings: report.num_paintings,
            global_score: report.global_score,
            warnings: report.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Body of every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_id: Option<String>,
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            success: false,
            check_id: None,
            error: error.into(),
            warnings: Vec::new(),
        }
    }
}
