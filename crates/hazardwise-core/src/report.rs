//! Response types shared by the inference and rendering crates.

use serde::{Deserialize, Serialize};

/// One ranked, location-enriched mitigation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceStep {
    pub title: String,
    pub description: String,
    pub key_checks: Vec<String>,
}

/// Assembled guidance for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceReport {
    pub summary: String,
    pub materials: Vec<String>,
    pub safety: Vec<String>,
    pub steps: Vec<GuidanceStep>,
}

/// An annotated diagram for one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDiagram {
    pub step_title: String,
    /// Caption describing what the diagram depicts.
    pub prompt: String,
    /// `data:image/svg+xml;base64,...`
    pub image_data_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_uses_camel_case_keys() {
        let step = GuidanceStep {
            title: "T".into(),
            description: "D".into(),
            key_checks: vec!["a".into()],
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["keyChecks"][0], "a");
    }

    #[test]
    fn diagram_uses_camel_case_keys() {
        let d = StepDiagram {
            step_title: "T".into(),
            prompt: "P".into(),
            image_data_url: "data:image/svg+xml;base64,".into(),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert!(json.get("stepTitle").is_some());
        assert!(json.get("imageDataUrl").is_some());
    }
}
