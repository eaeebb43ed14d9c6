use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::tools::estimate::BudgetEstimate;

/// One photographed space in the report.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomAsset {
    pub label: String,
    pub source_url: String,
    pub original_path: PathBuf,
    pub renovated_path: Option<PathBuf>,
    pub is_floorplan: bool,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub address: String,
    pub source_url: String,
    pub design_style: String,
    pub executive_summary: String,
    pub assets: Vec<RoomAsset>,
    pub budget: BudgetEstimate,
    pub generated_at: DateTime<Utc>,
}
