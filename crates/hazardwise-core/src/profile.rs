//! Static profile records: structure baselines, province hazard indices,
//! city cost/exposure indices, and guidance templates.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{Hazard, Province};

/// Recommended materials and baseline safety instructions for one structure type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureProfile {
    pub materials: Vec<String>,
    pub safety: Vec<String>,
}

/// Regional hazard exposure for a province.
///
/// `seismic_zone` is a small positive intensity scale (roughly 0–5); every
/// other index lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceProfile {
    pub seismic_zone: f64,
    pub flood_risk: f64,
    pub monsoon_index: f64,
    pub soil_instability: f64,
    pub logistics: f64,
}

impl ProvinceProfile {
    /// Hazard intensity used when labelling corpus cases and synthesising
    /// query features.
    pub fn hazard_intensity(&self, hazard: Hazard) -> f64 {
        match hazard {
            Hazard::Flood => self.flood_risk * 0.66 + self.monsoon_index * 0.34,
            Hazard::Earthquake => self.seismic_zone / 5.0,
        }
    }
}

impl Default for ProvinceProfile {
    /// Punjab's indices.
    fn default() -> Self {
        Self {
            seismic_zone: 2.4,
            flood_risk: 0.74,
            monsoon_index: 0.78,
            soil_instability: 0.46,
            logistics: 0.72,
        }
    }
}

/// City-level cost and exposure indices, roughly in `[0.6, 0.9]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityIndices {
    pub labor_index: f64,
    pub material_index: f64,
    pub exposure_bias: f64,
}

impl CityIndices {
    /// Used when neither the city nor any city of its province is known.
    pub const FALLBACK: CityIndices = CityIndices {
        labor_index: 0.66,
        material_index: 0.72,
        exposure_bias: 0.58,
    };

    /// Component-wise mean, or `None` for an empty input.
    pub fn mean<'a>(items: impl IntoIterator<Item = &'a CityIndices>) -> Option<CityIndices> {
        let mut sum = CityIndices {
            labor_index: 0.0,
            material_index: 0.0,
            exposure_bias: 0.0,
        };
        let mut count = 0usize;
        for c in items {
            sum.labor_index += c.labor_index;
            sum.material_index += c.material_index;
            sum.exposure_bias += c.exposure_bias;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some(CityIndices {
            labor_index: sum.labor_index / n,
            material_index: sum.material_index / n,
            exposure_bias: sum.exposure_bias / n,
        })
    }
}

/// A known city with a back-reference to its province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityProfile {
    pub name: String,
    pub province: Province,
    #[serde(flatten)]
    pub indices: CityIndices,
}

/// A reusable mitigation step scored against each query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceTemplate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub key_checks: Vec<String>,
    pub tags: Vec<String>,
    /// In `(0, 1]`.
    pub base_score: f64,
}

impl GuidanceTemplate {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// True if any tag is shared with `other`.
    pub fn intersects(&self, other: &[&str]) -> bool {
        self.tags.iter().any(|t| other.contains(&t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flood_intensity_weights_risk_and_monsoon() {
        let p = ProvinceProfile {
            seismic_zone: 2.0,
            flood_risk: 1.0,
            monsoon_index: 0.0,
            soil_instability: 0.5,
            logistics: 0.5,
        };
        assert!((p.hazard_intensity(Hazard::Flood) - 0.66).abs() < 1e-12);
        assert!((p.hazard_intensity(Hazard::Earthquake) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert!(CityIndices::mean(std::iter::empty()).is_none());
    }

    #[test]
    fn mean_averages_components() {
        let a = CityIndices {
            labor_index: 0.6,
            material_index: 0.7,
            exposure_bias: 0.8,
        };
        let b = CityIndices {
            labor_index: 0.8,
            material_index: 0.7,
            exposure_bias: 0.6,
        };
        let m = CityIndices::mean([&a, &b]).unwrap();
        assert!((m.labor_index - 0.7).abs() < 1e-12);
        assert!((m.material_index - 0.7).abs() < 1e-12);
        assert!((m.exposure_bias - 0.7).abs() < 1e-12);
    }

    #[test]
    fn template_tag_intersection() {
        let t = GuidanceTemplate {
            id: "t".into(),
            title: "T".into(),
            description: String::new(),
            key_checks: vec![],
            tags: vec!["earthquake".into(), "rc".into()],
            base_score: 0.5,
        };
        assert!(t.has_tag("rc"));
        assert!(t.intersects(&["all", "rc"]));
        assert!(!t.intersects(&["all", "masonry"]));
    }
}
