// Pipeline stages
pub mod batch;
pub mod download;
pub mod estimate;
pub mod extract;
pub mod fetch;
pub mod label;
pub mod render;
pub mod report;
