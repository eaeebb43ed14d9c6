use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prediction lifecycle as reported by the render service.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl PredictionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PredictionUrls {
    pub get: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub urls: PredictionUrls,
}

impl Prediction {
    /// Final output URL: the string itself, or the last string of a list.
    pub fn output_url(&self) -> Option<&str> {
        let url = match self.output.as_ref()? {
            Value::String(url) => Some(url.as_str()),
            Value::Array(items) => items.iter().rev().find_map(Value::as_str),
            _ => None,
        };
        url.filter(|url| !url.is_empty())
    }
}
