//! The precomputed, read-only state behind every request.
//!
//! A [`Catalog`] owns the reference tables, the synthetic corpus, the fitted
//! normalizer, and the normalized training vectors. It is built once and then
//! shared by reference; nothing in it is mutated afterwards, so `&Catalog` can
//! serve concurrent requests without locking.

use serde::Serialize;
use tracing::{debug, info};

use hazardwise_core::{GuidanceReport, GuidanceStep, Hazard, LocationContext, Query, ReferenceData};

use crate::config::EngineConfig;
use crate::corpus::{Corpus, LabelHistogram};
use crate::error::CatalogError;
use crate::features::{FEATURE_DIM, FeatureVector, Normalizer};
use crate::knn::{self, InferenceResult};
use crate::narrative;
use crate::scorer::{self, ScoringContext};

pub struct Catalog {
    reference: ReferenceData,
    corpus: Corpus,
    normalizer: Normalizer,
    training: Vec<FeatureVector>,
    config: EngineConfig,
}

/// Summary of catalog contents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub provinces: usize,
    pub cities: usize,
    pub structure_types: usize,
    pub corpus_rows: usize,
    pub feature_dims: usize,
    pub flood_templates: usize,
    pub earthquake_templates: usize,
    pub labels: LabelHistogram,
}

impl Catalog {
    /// Build the corpus and normalization table.
    ///
    /// Fails only when the configuration is invalid or the reference data
    /// produces no training cases.
    pub fn build(reference: ReferenceData, config: EngineConfig) -> Result<Self, CatalogError> {
        config.validate()?;

        let corpus = Corpus::build(&reference);
        let raw: Vec<FeatureVector> = corpus.cases().iter().map(|c| c.sample.features()).collect();
        let normalizer = Normalizer::fit(&raw).ok_or(CatalogError::EmptyCorpus)?;
        let training = raw.iter().map(|v| normalizer.normalize(v)).collect();

        info!(
            rows = corpus.len(),
            cities = reference.cities.len(),
            flood_templates = reference.templates(Hazard::Flood).len(),
            earthquake_templates = reference.templates(Hazard::Earthquake).len(),
            "catalog built"
        );

        Ok(Self {
            reference,
            corpus,
            normalizer,
            training,
            config,
        })
    }

    /// Built-in reference data with default parameters.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::build(ReferenceData::standard(), EngineConfig::default())
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            provinces: self.reference.provinces.len(),
            cities: self.reference.cities.len(),
            structure_types: self.reference.structures.len(),
            corpus_rows: self.corpus.len(),
            feature_dims: FEATURE_DIM,
            flood_templates: self.reference.templates(Hazard::Flood).len(),
            earthquake_templates: self.reference.templates(Hazard::Earthquake).len(),
            labels: self.corpus.label_histogram(),
        }
    }

    /// Predict scope, damage, depth, and confidence for free-form inputs.
    pub fn infer(
        &self,
        province: &str,
        city: &str,
        hazard: &str,
        structure_type: &str,
    ) -> InferenceResult {
        self.infer_query(&Query::resolve(province, city, hazard, structure_type))
    }

    pub fn infer_query(&self, query: &Query) -> InferenceResult {
        let location = self.reference.resolve_location(query.province, &query.city);
        let sample = knn::synthesize_query(&location, query.hazard, query.structure_type);

        let raw = sample.features();
        let normalized = if self.config.clamp_query_features {
            self.normalizer.normalize_clamped(&raw)
        } else {
            self.normalizer.normalize(&raw)
        };

        let neighbors = knn::nearest(
            &normalized,
            &self.training,
            self.config.neighbor_count,
            self.config.weight_smoothing,
        );
        let result = knn::predict(&self.corpus, location, sample, neighbors);

        debug!(
            province = %result.location.province,
            city = %result.location.city,
            hazard = %query.hazard,
            structure = %query.structure_type,
            scope = %result.predicted_scope,
            damage = %result.predicted_damage,
            depth = result.depth_score,
            evidence = result.evidence_strength,
            "inference"
        );
        result
    }

    /// Full guidance report for free-form inputs.
    pub fn generate_guidance(
        &self,
        province: &str,
        city: &str,
        hazard: &str,
        structure_type: &str,
    ) -> GuidanceReport {
        self.guidance_for(&Query::resolve(province, city, hazard, structure_type))
    }

    pub fn guidance_for(&self, query: &Query) -> GuidanceReport {
        let inference = self.infer_query(query);
        let province = inference.location.province_profile;

        let ctx = ScoringContext {
            hazard: query.hazard,
            structure_type: query.structure_type,
            scope: inference.predicted_scope,
            damage: inference.predicted_damage,
            province: &province,
        };
        let selected = scorer::select(
            self.reference.templates(query.hazard),
            &ctx,
            self.config.max_steps,
        );

        let steps: Vec<GuidanceStep> = selected
            .iter()
            .map(|s| narrative::enrich_step(s.template, &inference))
            .collect();

        let profile = self.reference.structure(query.structure_type);
        let mut safety = profile.safety;
        safety.extend(readiness_lines(&inference.location, query.hazard));

        GuidanceReport {
            summary: narrative::summarize(&inference, steps.first()),
            materials: profile.materials,
            safety,
            steps,
        }
    }
}

/// One or two hazard-specific readiness lines for the safety list.
fn readiness_lines(location: &LocationContext, hazard: Hazard) -> Vec<String> {
    let province = location.province;
    let p = &location.province_profile;
    let mut lines = Vec::with_capacity(2);
    match hazard {
        Hazard::Flood => {
            lines.push(format!(
                "Pre-position sandbags, pumps, and dry storage: \
                 {province} flood risk index is {:.2}.",
                p.flood_risk
            ));
            if p.monsoon_index >= 0.6 {
                lines.push(format!(
                    "Clear roof drains and gutters ahead of the monsoon (index {:.2}).",
                    p.monsoon_index
                ));
            }
        }
        Hazard::Earthquake => {
            lines.push(format!(
                "Agree on a drop-cover-hold drill and an outdoor assembly point: \
                 {province} seismic zone is {:.1}.",
                p.seismic_zone
            ));
            if p.soil_instability >= 0.55 {
                lines.push(format!(
                    "Watch for ground cracking and slope movement after shaking \
                     (soil instability {:.2}).",
                    p.soil_instability
                ));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazardwise_core::{DamageClass, Province, ProvinceProfile, ScopeClass, StructureType};

    fn catalog() -> Catalog {
        Catalog::standard().unwrap()
    }

    #[test]
    fn builds_standard_catalog() {
        let stats = catalog().stats();
        assert_eq!(stats.corpus_rows, 640);
        assert_eq!(stats.feature_dims, 12);
        assert_eq!(stats.flood_templates, 5);
        assert_eq!(stats.earthquake_templates, 5);
        assert_eq!(stats.provinces, 7);
    }

    #[test]
    fn empty_reference_is_a_startup_error() {
        let mut reference = ReferenceData::standard();
        reference.cities.clear();
        let result = Catalog::build(reference, EngineConfig::default());
        assert!(matches!(result, Err(CatalogError::EmptyCorpus)));
    }

    #[test]
    fn invalid_config_is_a_startup_error() {
        let config = EngineConfig {
            neighbor_count: 0,
            ..EngineConfig::default()
        };
        let result = Catalog::build(ReferenceData::standard(), config);
        assert!(matches!(result, Err(CatalogError::InvalidConfig(_))));
    }

    #[test]
    fn ranges_hold_for_every_input_combination() {
        let cat = catalog();
        let reference = cat.reference();
        let mut cities: Vec<String> = reference.cities.iter().map(|c| c.name.clone()).collect();
        cities.push("Unlisted Town".into());
        cities.push(String::new());

        for p in Province::ALL {
            for city in &cities {
                for h in Hazard::ALL {
                    for s in StructureType::ALL {
                        let r = cat.infer(p.as_str(), city, h.as_str(), s.as_str());
                        assert!(ScopeClass::ALL.contains(&r.predicted_scope));
                        assert!(DamageClass::ALL.contains(&r.predicted_damage));
                        assert!((0.45..=0.96).contains(&r.depth_score), "{p} {city} {h} {s}");
                        assert!(
                            (0.45..=0.95).contains(&r.evidence_strength),
                            "{p} {city} {h} {s}"
                        );
                        assert_eq!(r.neighbors.len(), 9);
                    }
                }
            }
        }
    }

    #[test]
    fn shared_catalog_serves_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();

        let cat = catalog();
        let expected = cat.generate_guidance("AJK", "Muzaffarabad", "earthquake", "School Block");
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        cat.generate_guidance("AJK", "Muzaffarabad", "earthquake", "School Block")
                    })
                })
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn neighbors_are_nearest_first() {
        let r = catalog().infer("Sindh", "Karachi", "flood", "School Block");
        let distances: Vec<f64> = r.neighbors.iter().map(|n| n.distance).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn report_has_five_steps_for_every_input() {
        let cat = catalog();
        for p in Province::ALL {
            for h in Hazard::ALL {
                for s in StructureType::ALL {
                    let report = cat.generate_guidance(p.as_str(), "", h.as_str(), s.as_str());
                    assert_eq!(report.steps.len(), 5);
                }
            }
        }
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let cat = catalog();
        let a = cat.generate_guidance("Sindh", "Hyderabad", "flood", "Bridge Approach");
        let b = cat.generate_guidance("Sindh", "Hyderabad", "flood", "Bridge Approach");
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );

        let other = Catalog::standard().unwrap();
        let c = other.generate_guidance("Sindh", "Hyderabad", "flood", "Bridge Approach");
        assert_eq!(a, c);
    }

    #[test]
    fn unknown_inputs_match_defaults() {
        let cat = catalog();
        let coerced = cat.generate_guidance("Nowhere", "X", "flood", "Unknown Structure");
        let explicit = cat.generate_guidance("Punjab", "X", "flood", "Masonry House");
        assert_eq!(coerced, explicit);

        let coerced = cat.generate_guidance("Punjab", "Lahore", "hailstorm", "Masonry House");
        let explicit = cat.generate_guidance("Punjab", "Lahore", "flood", "Masonry House");
        assert_eq!(coerced, explicit);
    }

    #[test]
    fn peshawar_rc_frame_earthquake_scenario() {
        let cat = catalog();
        let r = cat.infer("KP", "Peshawar", "earthquake", "RC Frame");
        assert_ne!(r.predicted_damage, DamageClass::Low);

        let top = "Establish Continuous Lateral Load Path";
        let report = cat.generate_guidance("KP", "Peshawar", "earthquake", "RC Frame");
        assert_eq!(report.steps[0].title, top);
        assert!(report.summary.contains(top));
        assert!(report.steps[0].description.contains("In Peshawar, KP,"));
    }

    #[test]
    fn materials_and_safety_come_from_structure_profile() {
        let cat = catalog();
        let report = cat.generate_guidance("KP", "Peshawar", "earthquake", "RC Frame");
        let profile = cat.reference().structure(StructureType::RcFrame);
        assert_eq!(report.materials, profile.materials);
        assert!(report.safety.starts_with(&profile.safety));

        // KP soil instability 0.57 adds the second readiness line.
        let extra = report.safety.len() - profile.safety.len();
        assert_eq!(extra, 2);
        let first_readiness = &report.safety[profile.safety.len()];
        assert!(first_readiness.contains("KP seismic zone is 4.1"));
    }

    #[test]
    fn readiness_line_count_depends_on_province() {
        let cat = catalog();
        let profile = cat.reference().structure(StructureType::MasonryHouse);
        let base = profile.safety.len();
        // Balochistan monsoon index 0.38: flood readiness has one line.
        let report = cat.generate_guidance("Balochistan", "Quetta", "flood", "Masonry House");
        assert_eq!(report.safety.len() - base, 1);
        // Punjab monsoon index 0.78: two lines.
        let report = cat.generate_guidance("Punjab", "Lahore", "flood", "Masonry House");
        assert_eq!(report.safety.len() - base, 2);
    }

    #[test]
    fn max_steps_is_configurable() {
        let config = EngineConfig {
            max_steps: 3,
            ..EngineConfig::default()
        };
        let cat = Catalog::build(ReferenceData::standard(), config).unwrap();
        let report = cat.generate_guidance("Sindh", "Karachi", "flood", "RC Frame");
        assert_eq!(report.steps.len(), 3);
    }

    #[test]
    fn small_library_yields_fewer_steps() {
        let mut reference = ReferenceData::standard();
        if let Some(lib) = reference.templates.get_mut(&Hazard::Flood) {
            lib.truncate(2);
        }
        let cat = Catalog::build(reference, EngineConfig::default()).unwrap();
        let report = cat.generate_guidance("Sindh", "Karachi", "flood", "RC Frame");
        assert_eq!(report.steps.len(), 2);
    }

    fn islamabad_without_cities(profile: ProvinceProfile) -> ReferenceData {
        let mut reference = ReferenceData::standard();
        reference
            .cities
            .retain(|c| c.province != Province::Islamabad);
        reference.provinces.insert(Province::Islamabad, profile);
        reference
    }

    /// A province absent from the corpus with indices beyond the training
    /// range normalizes outside `[0, 1]`; scores stay within bounds.
    #[test]
    fn extreme_province_outside_training_range() {
        let extreme = ProvinceProfile {
            seismic_zone: 9.5,
            flood_risk: 1.0,
            monsoon_index: 1.0,
            soil_instability: 1.0,
            logistics: 0.05,
        };

        let reference = islamabad_without_cities(extreme);
        let unclamped = Catalog::build(reference, EngineConfig::default()).unwrap();
        let r = unclamped.infer("Islamabad", "", "earthquake", "School Block");
        let normalized = unclamped.normalizer().normalize(&r.sample.features());
        assert!(
            normalized[4] > 1.0,
            "seismic component {} should exceed 1",
            normalized[4]
        );
        assert!(
            normalized[8] < 0.0,
            "logistics component {} should be below 0",
            normalized[8]
        );
        assert!((0.45..=0.96).contains(&r.depth_score));
        assert!((0.45..=0.95).contains(&r.evidence_strength));

        let config = EngineConfig {
            clamp_query_features: true,
            ..EngineConfig::default()
        };
        let clamped = Catalog::build(islamabad_without_cities(extreme), config).unwrap();
        let rc = clamped.infer("Islamabad", "", "earthquake", "School Block");
        assert!(rc.neighbors[0].distance <= r.neighbors[0].distance);
        assert!((0.45..=0.96).contains(&rc.depth_score));
    }
}
