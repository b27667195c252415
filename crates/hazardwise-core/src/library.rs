//! Built-in guidance template library, keyed by hazard.
//!
//! Tags are drawn from [`TAG_VOCABULARY`]. Within a hazard library ids are
//! unique; the scorer uses them as the final tie-break.

use std::collections::BTreeMap;

use crate::profile::GuidanceTemplate;
use crate::taxonomy::Hazard;

pub const TAG_VOCABULARY: &[&str] = &[
    "all",
    "flood",
    "earthquake",
    "masonry",
    "rc",
    "school",
    "bridge",
    "drainage",
    "moisture",
    "utilities",
    "ops",
    "foundation",
    "safety",
];

fn template(
    id: &str,
    title: &str,
    description: &str,
    key_checks: &[&str],
    tags: &[&str],
    base_score: f64,
) -> GuidanceTemplate {
    GuidanceTemplate {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        key_checks: key_checks.iter().map(|s| s.to_string()).collect(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        base_score,
    }
}

pub fn standard_templates() -> BTreeMap<Hazard, Vec<GuidanceTemplate>> {
    BTreeMap::from([
        (Hazard::Flood, flood_templates()),
        (Hazard::Earthquake, earthquake_templates()),
    ])
}

fn flood_templates() -> Vec<GuidanceTemplate> {
    vec![
        template(
            "flood-plinth-envelope",
            "Raise Plinth and Seal the Building Envelope",
            "Lift the finished floor above the recorded high-water mark and close \
             the openings through which floodwater enters the structure.",
            &[
                "Plinth at least 450 mm above last flood line",
                "Damp-proof course continuous under all walls",
                "Door thresholds fitted with removable flood boards",
                "Wall penetrations sealed with non-shrink grout",
            ],
            &["flood", "masonry", "moisture", "foundation"],
            0.94,
        ),
        template(
            "flood-drainage-scour",
            "Restore Site Drainage and Scour Protection",
            "Clear and regrade drainage paths around the structure and armour \
             exposed soil against scour at foundations and embankment toes.",
            &[
                "Drains and culverts free of silt and debris",
                "Ground slopes away from foundations at 1:50 or steeper",
                "Riprap or gabions placed at scour-prone edges",
            ],
            &["flood", "drainage", "bridge", "foundation"],
            0.91,
        ),
        template(
            "flood-utility-isolation",
            "Elevate and Isolate Electrical Utilities",
            "Move switchgear, meters, and outlets above the design flood level \
             and make the supply easy to isolate before water arrives.",
            &[
                "Distribution board mounted above design flood level",
                "RCD protection on every ground-floor circuit",
                "Labelled main isolator reachable from a dry route",
            ],
            &["flood", "utilities", "rc", "safety"],
            0.86,
        ),
        template(
            "flood-evacuation-ops",
            "Prepare Flood Evacuation and Shelter Operations",
            "Set out warning triggers, evacuation routes, and a staffed shelter \
             plan so occupants leave before access roads are cut.",
            &[
                "Warning trigger tied to river gauge or district alert",
                "Evacuation route stays above water for its full length",
                "Shelter stocked with water, lighting, and first aid",
            ],
            &["flood", "ops", "school", "safety", "all"],
            0.83,
        ),
        template(
            "flood-moisture-inspection",
            "Dry-Out and Moisture Damage Inspection",
            "After water recedes, dry the structure in a controlled way and \
             inspect for hidden moisture damage before reoccupation.",
            &[
                "Moisture readings below 20% before refinishing",
                "Wet plaster stripped to 300 mm above the water line",
                "Reinforcement checked for corrosion staining",
            ],
            &["flood", "moisture", "masonry", "rc"],
            0.79,
        ),
    ]
}

fn earthquake_templates() -> Vec<GuidanceTemplate> {
    vec![
        template(
            "quake-lateral-load-path",
            "Establish Continuous Lateral Load Path",
            "Tie slabs, beams, columns, and foundations into one continuous \
             system so inertial forces travel to the ground without weak links.",
            &[
                "Beam-column joints confined with closely spaced ties",
                "Slab diaphragm connected to every frame line",
                "Column jacketing where cover has spalled",
                "Foundation dowels continuous into ground-floor columns",
            ],
            &["earthquake", "rc", "foundation"],
            0.96,
        ),
        template(
            "quake-masonry-confinement",
            "Confine Masonry Walls with Tie Columns and Bands",
            "Wrap load-bearing walls with reinforced concrete bands and tie \
             columns so they act as confined panels rather than loose units.",
            &[
                "Lintel and roof bands continuous around the building",
                "Tie columns at every corner and wall junction",
                "Openings no closer than 600 mm to corners",
            ],
            &["earthquake", "masonry"],
            0.93,
        ),
        template(
            "quake-foundation-stabilisation",
            "Stabilise Foundations and Approach Embankments",
            "Improve bearing and sliding resistance at foundations and retain \
             embankments that could slump or liquefy under shaking.",
            &[
                "No open settlement cracks at foundation level",
                "Embankment toe retained with gabions or walls",
                "Bearing seats wide enough to prevent unseating",
            ],
            &["earthquake", "foundation", "bridge"],
            0.88,
        ),
        template(
            "quake-nonstructural-anchorage",
            "Anchor Non-Structural Elements and Utilities",
            "Fix water tanks, shelving, parapets, and gas lines so they do not \
             topple, fall, or rupture during shaking.",
            &[
                "Rooftop tanks strapped to the structure",
                "Tall shelving bolted to walls",
                "Flexible connectors on gas and water lines",
            ],
            &["earthquake", "utilities", "school", "all"],
            0.84,
        ),
        template(
            "quake-egress-assembly",
            "Secure Evacuation Routes and Assembly Areas",
            "Keep exits, stairs, and assembly points usable after a strong \
             earthquake and rehearse their use with every occupant.",
            &[
                "Two independent exits from each floor",
                "Stair enclosures free of falling-hazard finishes",
                "Assembly area clear of overhead lines and walls",
            ],
            &["earthquake", "school", "safety", "ops"],
            0.81,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tags_come_from_vocabulary() {
        for (hazard, templates) in standard_templates() {
            for t in templates {
                for tag in &t.tags {
                    assert!(
                        TAG_VOCABULARY.contains(&tag.as_str()),
                        "{hazard} template {} has unknown tag {tag}",
                        t.id
                    );
                }
            }
        }
    }

    #[test]
    fn every_template_is_tagged_with_its_hazard() {
        for (hazard, templates) in standard_templates() {
            for t in templates {
                assert!(t.has_tag(hazard.as_str()), "{} not tagged {hazard}", t.id);
            }
        }
    }

    #[test]
    fn ids_unique_and_scores_in_range() {
        for (_, templates) in standard_templates() {
            let ids: HashSet<&str> = templates.iter().map(|t| t.id.as_str()).collect();
            assert_eq!(ids.len(), templates.len());
            for t in &templates {
                assert!(t.base_score > 0.0 && t.base_score <= 1.0, "{}", t.id);
                assert!(!t.key_checks.is_empty(), "{} has no key checks", t.id);
            }
        }
    }

    #[test]
    fn lateral_load_path_has_highest_earthquake_base_score() {
        let lib = standard_templates();
        let best = lib[&Hazard::Earthquake]
            .iter()
            .max_by(|a, b| a.base_score.total_cmp(&b.base_score))
            .unwrap();
        assert_eq!(best.title, "Establish Continuous Lateral Load Path");
        assert!(best.has_tag("rc"));
        assert!((best.base_score - 0.96).abs() < 1e-12);
    }
}
