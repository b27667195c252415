//! Annotated SVG diagrams for guidance steps.
//!
//! Rendering is pure: no network or filesystem access. Each diagram is
//! returned as a base64 `image/svg+xml` data URI inside a [`StepDiagram`].

pub mod diagram;
pub mod svg;

use serde_json::Value;
use tracing::debug;

use hazardwise_core::{GuidanceStep, Query, ReferenceData, StepDiagram};

pub use diagram::{DATA_URI_PREFIX, caption, render, render_svg};

/// One diagram per step, in input order.
///
/// Province, hazard, and structure type are coerced the same way as for
/// guidance generation, so invalid strings never fail.
pub fn generate_step_images(
    reference: &ReferenceData,
    province: &str,
    city: &str,
    hazard: &str,
    structure_type: &str,
    steps: &[GuidanceStep],
) -> Vec<StepDiagram> {
    let query = Query::resolve(province, city, hazard, structure_type);
    images_for(reference, &query, steps)
}

pub fn images_for(
    reference: &ReferenceData,
    query: &Query,
    steps: &[GuidanceStep],
) -> Vec<StepDiagram> {
    let location = reference.resolve_location(query.province, &query.city);
    debug!(steps = steps.len(), city = %location.city, "rendering step diagrams");

    steps
        .iter()
        .enumerate()
        .map(|(i, step)| StepDiagram {
            step_title: step.title.clone(),
            prompt: caption(&location, query.hazard, query.structure_type, step, i),
            image_data_url: render(&location, query.hazard, query.structure_type, step, i),
        })
        .collect()
}

/// Lenient step list from arbitrary JSON.
///
/// A non-array yields no steps. Entries without a string `title` are dropped;
/// a missing `description` becomes empty and non-string `keyChecks` items are
/// skipped.
pub fn steps_from_json(value: &Value) -> Vec<GuidanceStep> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let title = item.get("title")?.as_str()?;
            let description = item
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default();
            let key_checks: Vec<String> = item
                .get("keyChecks")
                .and_then(Value::as_array)
                .map(|checks| {
                    checks
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            Some(GuidanceStep {
                title: title.to_string(),
                description: description.to_string(),
                key_checks,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn steps() -> Vec<GuidanceStep> {
        vec![
            GuidanceStep {
                title: "Raise Plinth".into(),
                description: "Lift the floor.".into(),
                key_checks: vec!["Plinth height".into(), "DPC continuity".into()],
            },
            GuidanceStep {
                title: "Clear Drains".into(),
                description: String::new(),
                key_checks: vec![],
            },
        ]
    }

    fn render_steps(province: &str, city: &str, hazard: &str, kind: &str) -> Vec<StepDiagram> {
        let reference = ReferenceData::standard();
        generate_step_images(&reference, province, city, hazard, kind, &steps())
    }

    #[test]
    fn one_image_per_step_with_matching_titles() {
        let images = render_steps("Sindh", "Karachi", "flood", "Masonry House");
        assert_eq!(images.len(), 2);
        for (image, step) in images.iter().zip(steps()) {
            assert_eq!(image.step_title, step.title);
            assert!(image.image_data_url.starts_with(DATA_URI_PREFIX));
            assert!(!image.prompt.is_empty());
        }
        assert!(images[1].prompt.starts_with("Step 2 diagram:"));
    }

    #[test]
    fn no_steps_no_images() {
        let reference = ReferenceData::standard();
        let images = generate_step_images(&reference, "KP", "Swat", "flood", "RC Frame", &[]);
        assert!(images.is_empty());
    }

    #[test]
    fn invalid_inputs_render_with_defaults() {
        let a = render_steps("Nowhere", "X", "volcano", "Igloo");
        let b = render_steps("Punjab", "X", "flood", "Masonry House");
        assert_eq!(a, b);
    }

    #[test]
    fn images_are_deterministic() {
        let a = render_steps("AJK", "Muzaffarabad", "earthquake", "School Block");
        let b = render_steps("AJK", "Muzaffarabad", "earthquake", "School Block");
        assert_eq!(a, b);
    }

    #[test]
    fn steps_from_non_array_is_empty() {
        assert!(steps_from_json(&json!({"title": "x"})).is_empty());
        assert!(steps_from_json(&json!("steps")).is_empty());
        assert!(steps_from_json(&Value::Null).is_empty());
    }

    #[test]
    fn steps_from_json_skips_malformed_entries() {
        let value = json!([
            {"title": "Raise Plinth", "description": "Lift.", "keyChecks": ["a", 3, null, "b"]},
            {"description": "no title"},
            {"title": 42},
            "loose string",
            {"title": "Bare"}
        ]);
        let steps = steps_from_json(&value);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].title, "Raise Plinth");
        assert_eq!(steps[0].description, "Lift.");
        assert_eq!(steps[0].key_checks, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(steps[1].title, "Bare");
        assert!(steps[1].description.is_empty());
        assert!(steps[1].key_checks.is_empty());
    }

    #[test]
    fn steps_from_json_reads_serialized_report_steps() {
        let value = serde_json::to_value(steps()).unwrap();
        assert_eq!(steps_from_json(&value), steps());
    }
}
