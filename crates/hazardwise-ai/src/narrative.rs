//! Location-enriched step descriptions and the report summary sentence.

use hazardwise_core::{DamageClass, GuidanceStep, GuidanceTemplate, ScopeClass, StructureType};

use crate::knn::InferenceResult;

pub fn intervention_intensity(scope: ScopeClass) -> &'static str {
    match scope {
        ScopeClass::Comprehensive => "comprehensive",
        ScopeClass::Standard => "moderate",
        ScopeClass::Basic => "targeted",
    }
}

pub fn risk_concentration(damage: DamageClass) -> &'static str {
    match damage {
        DamageClass::High => "high",
        DamageClass::Medium => "elevated",
        DamageClass::Low => "limited",
    }
}

pub fn qa_directive(structure_type: StructureType) -> &'static str {
    match structure_type {
        StructureType::MasonryHouse => {
            "QA: check mortar joints, band continuity, and wall-to-roof ties before sign-off."
        }
        StructureType::RcFrame => {
            "QA: verify bar laps, stirrup spacing, and concrete cover at every jacketed member."
        }
        StructureType::SchoolBlock => {
            "QA: walk every classroom exit route with the head teacher and log defects \
             before the next term."
        }
        StructureType::BridgeApproach => {
            "QA: survey embankment levels and bearing seats against the baseline \
             after each high-water event."
        }
    }
}

pub fn scope_recommendation(scope: ScopeClass) -> &'static str {
    match scope {
        ScopeClass::Comprehensive => {
            "A comprehensive retrofit programme is recommended before the next hazard season."
        }
        ScopeClass::Standard => {
            "A standard strengthening package covering the priority elements is recommended."
        }
        ScopeClass::Basic => {
            "Basic maintenance and targeted repairs should keep the structure within \
             acceptable risk."
        }
    }
}

/// Template description followed by the location sentence and QA directive.
pub fn enrich_step(template: &GuidanceTemplate, inference: &InferenceResult) -> GuidanceStep {
    let loc = &inference.location;
    let sample = &inference.sample;
    let description = format!(
        "{base} In {city}, {province}, the {hazard} profile points to {intensity} \
         intervention with {risk} risk concentration for this {structure}. {qa}",
        base = template.description,
        city = loc.city,
        province = loc.province,
        hazard = sample.hazard,
        intensity = intervention_intensity(inference.predicted_scope),
        risk = risk_concentration(inference.predicted_damage),
        structure = sample.structure_type.as_str().to_lowercase(),
        qa = qa_directive(sample.structure_type),
    );

    GuidanceStep {
        title: template.title.clone(),
        description,
        key_checks: template.key_checks.clone(),
    }
}

fn percent(v: f64) -> String {
    format!("{:.0}%", v * 100.0)
}

/// One-paragraph summary: framing, top step, scope sentence, scores.
pub fn summarize(inference: &InferenceResult, top_step: Option<&GuidanceStep>) -> String {
    let loc = &inference.location;
    let sample = &inference.sample;
    let lead = match top_step {
        Some(step) => format!("Start with \"{}\".", step.title),
        None => "No guidance template is available for this hazard.".to_string(),
    };
    format!(
        "{hazard} readiness for a {structure} in {city}, {province}: {lead} {scope} \
         Depth score {depth} with evidence strength {evidence}.",
        hazard = capitalize(sample.hazard.as_str()),
        structure = sample.structure_type,
        city = loc.city,
        province = loc.province,
        scope = scope_recommendation(inference.predicted_scope),
        depth = percent(inference.depth_score),
        evidence = percent(inference.evidence_strength),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
