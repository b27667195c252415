//! Rank a hazard's guidance templates against an inference result.

use serde::Serialize;

use hazardwise_core::{
    DamageClass, GuidanceTemplate, Hazard, ProvinceProfile, ScopeClass, StructureType,
};

pub fn scope_factor(scope: ScopeClass) -> f64 {
    match scope {
        ScopeClass::Basic => 0.92,
        ScopeClass::Standard => 1.12,
        ScopeClass::Comprehensive => 1.34,
    }
}

pub fn damage_factor(damage: DamageClass) -> f64 {
    match damage {
        DamageClass::Low => 0.36,
        DamageClass::Medium => 0.58,
        DamageClass::High => 0.81,
    }
}

/// Regional pressure added to every template of the hazard library.
pub fn exposure_boost(hazard: Hazard, p: &ProvinceProfile) -> f64 {
    match hazard {
        Hazard::Flood => p.flood_risk * 0.06 + p.monsoon_index * 0.04,
        Hazard::Earthquake => p.seismic_zone / 5.0 * 0.06 + p.soil_instability * 0.04,
    }
}

/// Inputs shared by every template score of one query.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub hazard: Hazard,
    pub structure_type: StructureType,
    pub scope: ScopeClass,
    pub damage: DamageClass,
    pub province: &'a ProvinceProfile,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTemplate<'a> {
    pub template: &'a GuidanceTemplate,
    pub score: f64,
}

pub fn score_template(template: &GuidanceTemplate, ctx: &ScoringContext<'_>) -> f64 {
    let multiplier = 0.75 + scope_factor(ctx.scope) * 0.2 + damage_factor(ctx.damage) * 0.12;
    let structure_boost = if template.intersects(ctx.structure_type.tags()) {
        0.08
    } else {
        0.02
    };
    let hazard_boost = if template.has_tag(ctx.hazard.as_str()) {
        0.1
    } else {
        0.0
    };

    template.base_score * multiplier
        + structure_boost
        + hazard_boost
        + exposure_boost(ctx.hazard, ctx.province)
}

/// Score every template and return them best first.
///
/// Equal scores are ordered by template id.
pub fn rank<'a>(
    templates: &'a [GuidanceTemplate],
    ctx: &ScoringContext<'_>,
) -> Vec<ScoredTemplate<'a>> {
    let mut scored: Vec<ScoredTemplate<'a>> = templates
        .iter()
        .map(|template| ScoredTemplate {
            template,
            score: score_template(template, ctx),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.template.id.cmp(&b.template.id))
    });
    scored
}

/// The top `max` templates (fewer when the library is smaller).
pub fn select<'a>(
    templates: &'a [GuidanceTemplate],
    ctx: &ScoringContext<'_>,
    max: usize,
) -> Vec<ScoredTemplate<'a>> {
    let mut ranked = rank(templates, ctx);
    ranked.truncate(max);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazardwise_core::ReferenceData;

    fn template(id: &str, tags: &[&str], base_score: f64) -> GuidanceTemplate {
        GuidanceTemplate {
            id: id.into(),
            title: id.to_uppercase(),
            description: String::new(),
            key_checks: vec![],
            tags: tags.iter().map(|s| s.to_string()).collect(),
            base_score,
        }
    }

    fn ctx(province: &ProvinceProfile) -> ScoringContext<'_> {
        ScoringContext {
            hazard: Hazard::Earthquake,
            structure_type: StructureType::RcFrame,
            scope: ScopeClass::Standard,
            damage: DamageClass::Medium,
            province,
        }
    }

    #[test]
    fn score_formula() {
        let p = ProvinceProfile::default();
        let t = template("a", &["earthquake", "rc"], 0.9);
        let multiplier = 0.75 + 1.12 * 0.2 + 0.58 * 0.12;
        let exposure = 2.4 / 5.0 * 0.06 + 0.46 * 0.04;
        let expected = 0.9 * multiplier + 0.08 + 0.1 + exposure;
        assert!((score_template(&t, &ctx(&p)) - expected).abs() < 1e-12);
    }

    #[test]
    fn structure_mismatch_gets_small_boost() {
        let p = ProvinceProfile::default();
        let matched = template("a", &["earthquake", "rc"], 0.8);
        let unmatched = template("b", &["earthquake", "bridge"], 0.8);
        let diff = score_template(&matched, &ctx(&p)) - score_template(&unmatched, &ctx(&p));
        assert!((diff - 0.06).abs() < 1e-12);
    }

    #[test]
    fn missing_hazard_tag_gets_no_hazard_boost() {
        let p = ProvinceProfile::default();
        let tagged = template("a", &["earthquake", "rc"], 0.8);
        let untagged = template("b", &["rc"], 0.8);
        let diff = score_template(&tagged, &ctx(&p)) - score_template(&untagged, &ctx(&p));
        assert!((diff - 0.1).abs() < 1e-12);
    }

    #[test]
    fn equal_scores_order_by_id() {
        let p = ProvinceProfile::default();
        let templates = vec![
            template("zeta", &["earthquake"], 0.5),
            template("alpha", &["earthquake"], 0.5),
            template("mid", &["earthquake"], 0.5),
        ];
        let ids: Vec<&str> = rank(&templates, &ctx(&p))
            .iter()
            .map(|s| s.template.id.as_str())
            .collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn select_truncates_to_max() {
        let p = ProvinceProfile::default();
        let scored = |i: usize| template(&format!("t{i}"), &["earthquake"], 0.1 * i as f64);
        let templates: Vec<GuidanceTemplate> = (1..=8).map(scored).collect();
        let top = select(&templates, &ctx(&p), 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].template.id, "t8");
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn select_from_small_library_returns_all() {
        let p = ProvinceProfile::default();
        let templates = vec![template("only", &["earthquake"], 0.5)];
        assert_eq!(select(&templates, &ctx(&p), 5).len(), 1);
        assert!(select(&[], &ctx(&p), 5).is_empty());
    }

    #[test]
    fn lateral_load_path_tops_rc_earthquake_ranking_for_any_class() {
        let reference = ReferenceData::standard();
        let kp = reference.province(hazardwise_core::Province::Kp);
        for scope in ScopeClass::ALL {
            for damage in DamageClass::ALL {
                let c = ScoringContext {
                    scope,
                    damage,
                    ..ctx(&kp)
                };
                let ranked = rank(reference.templates(Hazard::Earthquake), &c);
                assert_eq!(
                    ranked[0].template.title,
                    "Establish Continuous Lateral Load Path"
                );
            }
        }
    }
}
