//! Reference data store: the read-only tables every query is resolved against.
//!
//! [`ReferenceData::standard`] carries the built-in Pakistan tables. Custom
//! tables can be assembled field by field (the fields are public) to build
//! independent catalogs, e.g. in tests.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::library;
use crate::profile::{CityIndices, CityProfile, GuidanceTemplate, ProvinceProfile, StructureProfile};
use crate::taxonomy::{Hazard, Province, StructureType};

/// How a query's city indices were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CitySource {
    /// The city name matched a known city.
    Known,
    /// Mean of the known cities in the resolved province.
    ProvinceAverage,
    /// No city known for the province; [`CityIndices::FALLBACK`].
    Fallback,
}

/// A resolved province/city pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationContext {
    pub province: Province,
    pub province_profile: ProvinceProfile,
    /// Display name: the matched city's canonical name, the trimmed input,
    /// or the province name when the input is blank.
    pub city: String,
    pub city_indices: CityIndices,
    pub city_source: CitySource,
}

pub struct ReferenceData {
    pub structures: BTreeMap<StructureType, StructureProfile>,
    pub provinces: BTreeMap<Province, ProvinceProfile>,
    /// Ordered; corpus rows are generated in this order.
    pub cities: Vec<CityProfile>,
    pub templates: BTreeMap<Hazard, Vec<GuidanceTemplate>>,
}

impl ReferenceData {
    /// The built-in tables.
    pub fn standard() -> Self {
        Self {
            structures: standard_structures(),
            provinces: standard_provinces(),
            cities: standard_cities(),
            templates: library::standard_templates(),
        }
    }

    /// Province indices; a missing entry resolves to [`ProvinceProfile::default`].
    pub fn province(&self, province: Province) -> ProvinceProfile {
        self.provinces.get(&province).copied().unwrap_or_default()
    }

    /// Structure baseline; a missing entry resolves to the Masonry House profile
    /// and then to an empty profile.
    pub fn structure(&self, structure: StructureType) -> StructureProfile {
        self.structures
            .get(&structure)
            .or_else(|| self.structures.get(&StructureType::default()))
            .cloned()
            .unwrap_or(StructureProfile {
                materials: Vec::new(),
                safety: Vec::new(),
            })
    }

    /// Guidance library for a hazard (possibly empty).
    pub fn templates(&self, hazard: Hazard) -> &[GuidanceTemplate] {
        self.templates
            .get(&hazard)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cities whose back-reference is `province`, in table order.
    pub fn cities_in(&self, province: Province) -> impl Iterator<Item = &CityProfile> {
        self.cities.iter().filter(move |c| c.province == province)
    }

    /// Case-insensitive lookup by city name.
    pub fn city(&self, name: &str) -> Option<&CityProfile> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.cities
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a province/city pair.
    ///
    /// A known city contributes its own indices. Otherwise the indices are the
    /// mean over the province's known cities, and failing that
    /// [`CityIndices::FALLBACK`].
    pub fn resolve_location(&self, province: Province, city: &str) -> LocationContext {
        let province_profile = self.province(province);

        if let Some(known) = self.city(city) {
            return LocationContext {
                province,
                province_profile,
                city: known.name.clone(),
                city_indices: known.indices,
                city_source: CitySource::Known,
            };
        }

        let display_name = match city.trim() {
            "" => province.as_str().to_string(),
            other => other.to_string(),
        };

        let (city_indices, city_source) =
            match CityIndices::mean(self.cities_in(province).map(|c| &c.indices)) {
                Some(mean) => (mean, CitySource::ProvinceAverage),
                None => (CityIndices::FALLBACK, CitySource::Fallback),
            };
        debug!(
            city = %display_name,
            %province,
            source = ?city_source,
            "city not in reference tables"
        );

        LocationContext {
            province,
            province_profile,
            city: display_name,
            city_indices,
            city_source,
        }
    }
}

// ── Built-in tables ──

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn standard_structures() -> BTreeMap<StructureType, StructureProfile> {
    BTreeMap::from([
        (
            StructureType::MasonryHouse,
            StructureProfile {
                materials: strings(&[
                    "Fired clay bricks (class A) with 1:4 cement-sand mortar",
                    "Reinforced concrete lintel and roof bands",
                    "Vertical corner dowels (10 mm deformed bars)",
                    "Damp-proof course membrane at plinth level",
                    "Lime-based plaster for breathable wall finish",
                ]),
                safety: strings(&[
                    "Shore cracked walls before anyone re-enters the house",
                    "Keep heavy storage off upper shelves and parapets",
                    "Identify a clear exit path from every room",
                ]),
            },
        ),
        (
            StructureType::RcFrame,
            StructureProfile {
                materials: strings(&[
                    "Grade 60 deformed reinforcement with seismic hooks",
                    "Ready-mix concrete, minimum 4000 psi",
                    "Epoxy bonding agent for jacketing interfaces",
                    "Steel or FRP wraps for column confinement",
                    "Flexible conduit for relocated utilities",
                ]),
                safety: strings(&[
                    "Barricade any column showing spalled cover or exposed bars",
                    "Isolate electrical mains before inspecting wet or cracked members",
                    "Restrict loading on slabs with visible deflection",
                ]),
            },
        ),
        (
            StructureType::SchoolBlock,
            StructureProfile {
                materials: strings(&[
                    "Reinforced concrete ring beams for long classroom walls",
                    "Shatter-resistant glazing film",
                    "Steel anchor brackets for shelving and fixtures",
                    "Non-slip surfacing for stairs and ramps",
                    "Raised platforms for records and equipment",
                ]),
                safety: strings(&[
                    "Run evacuation drills each term with every classroom",
                    "Keep corridors and stairwells free of furniture",
                    "Designate an assembly area away from walls and trees",
                ]),
            },
        ),
        (
            StructureType::BridgeApproach,
            StructureProfile {
                materials: strings(&[
                    "Graded stone riprap for scour protection",
                    "Geotextile separation fabric",
                    "Gabion baskets for embankment toe support",
                    "Elastomeric bearing pads",
                    "Precast culvert sections for relief drainage",
                ]),
                safety: strings(&[
                    "Close the approach to traffic when settlement exceeds 25 mm",
                    "Post spotters during high-water inspections",
                    "Mark load limits at both ends of the approach",
                ]),
            },
        ),
    ])
}

fn standard_provinces() -> BTreeMap<Province, ProvinceProfile> {
    fn p(
        seismic_zone: f64,
        flood_risk: f64,
        monsoon_index: f64,
        soil: f64,
        logistics: f64,
    ) -> ProvinceProfile {
        ProvinceProfile {
            seismic_zone,
            flood_risk,
            monsoon_index,
            soil_instability: soil,
            logistics,
        }
    }

    BTreeMap::from([
        (Province::Punjab, p(2.4, 0.74, 0.78, 0.46, 0.72)),
        (Province::Sindh, p(2.1, 0.86, 0.69, 0.58, 0.61)),
        (Province::Kp, p(4.1, 0.63, 0.62, 0.57, 0.55)),
        (Province::Balochistan, p(3.8, 0.52, 0.38, 0.49, 0.42)),
        (Province::GilgitBaltistan, p(4.4, 0.58, 0.41, 0.71, 0.33)),
        (Province::Ajk, p(4.3, 0.55, 0.66, 0.68, 0.40)),
        (Province::Islamabad, p(3.4, 0.37, 0.64, 0.35, 0.86)),
    ])
}

fn standard_cities() -> Vec<CityProfile> {
    let rows: &[(&str, Province, f64, f64, f64)] = &[
        ("Lahore", Province::Punjab, 0.78, 0.74, 0.71),
        ("Multan", Province::Punjab, 0.69, 0.70, 0.76),
        ("Rawalpindi", Province::Punjab, 0.74, 0.73, 0.64),
        ("Faisalabad", Province::Punjab, 0.70, 0.68, 0.69),
        ("Karachi", Province::Sindh, 0.82, 0.79, 0.73),
        ("Hyderabad", Province::Sindh, 0.68, 0.71, 0.79),
        ("Sukkur", Province::Sindh, 0.63, 0.67, 0.84),
        ("Peshawar", Province::Kp, 0.71, 0.69, 0.67),
        ("Swat", Province::Kp, 0.62, 0.66, 0.81),
        ("Abbottabad", Province::Kp, 0.66, 0.70, 0.72),
        ("Quetta", Province::Balochistan, 0.64, 0.72, 0.74),
        ("Gwadar", Province::Balochistan, 0.61, 0.76, 0.63),
        ("Gilgit", Province::GilgitBaltistan, 0.60, 0.81, 0.78),
        ("Skardu", Province::GilgitBaltistan, 0.60, 0.84, 0.70),
        ("Muzaffarabad", Province::Ajk, 0.63, 0.77, 0.83),
        ("Islamabad", Province::Islamabad, 0.86, 0.75, 0.60),
    ];

    rows.iter()
        .map(|&(name, province, labor, material, exposure)| CityProfile {
            name: name.to_string(),
            province,
            indices: CityIndices {
                labor_index: labor,
                material_index: material,
                exposure_bias: exposure,
            },
        })
        .collect()
}
