//! Insights output DTOs

use serde::{Deserialize, Serialize};

use super::job::ApiStatus;

/// Response carrying a materialized insights payload
///
/// Shared by the run-output endpoint (fetch after a successful run) and
/// the synchronous refresh endpoint; the payload itself stays opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub insights: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl OutputResponse {
    /// The remote message, or a fallback when none was sent
    pub fn message_or(self, fallback: String) -> String {
        self.message.unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_output_with_opaque_payload() {
        let json = r#"{
            "status": "success",
            "insights": {"top_products": [{"Description": "Mug", "total_quantity_sold": 9}]}
        }"#;
        let resp: OutputResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, ApiStatus::Success);
        let payload = resp.insights.unwrap();
        assert_eq!(payload["top_products"][0]["total_quantity_sold"], json!(9));
    }

    #[test]
    fn parses_error_output_without_payload() {
        let json = r#"{"status": "error", "message": "output not available"}"#;
        let resp: OutputResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, ApiStatus::Error);
        assert!(resp.insights.is_none());
    }
}
