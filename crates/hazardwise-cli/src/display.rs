//! Vertical card display for guidance reports and corpus rows.
//!
//! Cards are built as strings so the layout can be tested; the `print_*`
//! wrappers write them to stdout.

use std::fmt::Write as _;

use arrow::array::{Array, Float64Array, StringArray, UInt32Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use hazardwise_ai::features::FEATURE_NAMES;
use hazardwise_ai::{CatalogStats, InferenceResult};
use hazardwise_core::{GuidanceReport, Query};

const MAX_LIST_ITEMS: usize = 10;
const LABEL_WIDTH: usize = 26;

// ── Corpus row section groupings ──

const IDENTITY: &[&str] = &["case_index", "city", "province", "structure_type", "hazard"];

const SCENARIO: &[&str] = &["severity", "affected_area"];

const PROVINCE_INDICES: &[&str] = &[
    "seismic_zone",
    "flood_risk",
    "monsoon_index",
    "soil_instability",
    "logistics",
];

const CITY_INDICES: &[&str] = &["labor_index", "material_index", "exposure_bias"];

const LABELS: &[&str] = &[
    "stress_index",
    "predicted_scope",
    "predicted_damage",
    "depth_score",
];

const SECTIONS: &[(&str, &[&str])] = &[
    ("Identity", IDENTITY),
    ("Scenario", SCENARIO),
    ("Province Indices", PROVINCE_INDICES),
    ("City Indices", CITY_INDICES),
    ("Labels", LABELS),
];

// ── Public API ──

pub fn print_report_card(query: &Query, report: &GuidanceReport) {
    print!("{}", report_card(query, report));
}

pub fn print_inference_card(result: &InferenceResult) {
    print!("{}", inference_card(result));
}

pub fn print_stats(stats: &CatalogStats) {
    print!("{}", stats_card(stats));
}

/// Print one corpus row as a vertical card grouped by section.
pub fn print_case_card(batch: &RecordBatch, row: usize) -> anyhow::Result<()> {
    anyhow::ensure!(
        row < batch.num_rows(),
        "row {row} out of range (corpus has {} rows)",
        batch.num_rows()
    );
    print!("{}", case_card(batch, row));
    Ok(())
}

// ── Cards ──

pub fn report_card(query: &Query, report: &GuidanceReport) -> String {
    let mut out = String::new();
    let place = if query.city.is_empty() {
        query.province.to_string()
    } else {
        format!("{}, {}", query.city, query.province)
    };
    let _ = writeln!(
        out,
        "=== {} | {} | {} ===",
        query.structure_type, place, query.hazard
    );
    let _ = writeln!(out, "{}", report.summary);
    out.push('\n');

    list_section(&mut out, "Materials", &report.materials);
    list_section(&mut out, "Safety", &report.safety);

    if !report.steps.is_empty() {
        let _ = writeln!(out, "Steps");
        for (i, step) in report.steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, step.title);
            let _ = writeln!(out, "     {}", step.description);
            for check in &step.key_checks {
                let _ = writeln!(out, "     - {check}");
            }
        }
        out.push('\n');
    }
    out
}

pub fn inference_card(result: &InferenceResult) -> String {
    let mut out = String::new();
    let loc = &result.location;
    let sample = &result.sample;
    let _ = writeln!(out, "=== {}, {} ===", loc.city, loc.province);

    let _ = writeln!(out, "Query");
    row(&mut out, "hazard", sample.hazard);
    row(&mut out, "structure_type", sample.structure_type);
    row(&mut out, "city_source", format!("{:?}", loc.city_source));
    decimal_row(&mut out, "severity", sample.severity, 2);
    decimal_row(&mut out, "affected_area", sample.affected_area, 2);
    out.push('\n');

    let _ = writeln!(out, "Features");
    for (name, value) in FEATURE_NAMES.iter().zip(sample.features()) {
        decimal_row(&mut out, name, value, 3);
    }
    out.push('\n');

    let _ = writeln!(out, "Prediction");
    row(&mut out, "predicted_scope", result.predicted_scope);
    row(&mut out, "predicted_damage", result.predicted_damage);
    decimal_row(&mut out, "depth_score", result.depth_score, 3);
    decimal_row(&mut out, "evidence_strength", result.evidence_strength, 3);
    out.push('\n');

    if !result.neighbors.is_empty() {
        let _ = writeln!(out, "Neighbours ({}):", result.neighbors.len());
        for n in result.neighbors.iter().take(MAX_LIST_ITEMS) {
            let _ = writeln!(
                out,
                "    #{:<6} distance {:.4}  weight {:.2}",
                n.case_index, n.distance, n.weight
            );
        }
        if result.neighbors.len() > MAX_LIST_ITEMS {
            let more = result.neighbors.len() - MAX_LIST_ITEMS;
            let _ = writeln!(out, "    ... and {more} more");
        }
    }
    out
}

pub fn stats_card(stats: &CatalogStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Reference data");
    row(&mut out, "provinces", stats.provinces);
    row(&mut out, "cities", stats.cities);
    row(&mut out, "structure_types", stats.structure_types);
    row(&mut out, "flood_templates", stats.flood_templates);
    row(&mut out, "earthquake_templates", stats.earthquake_templates);
    out.push('\n');

    let l = &stats.labels;
    let _ = writeln!(out, "Corpus");
    row(&mut out, "rows", stats.corpus_rows);
    row(&mut out, "feature_dims", stats.feature_dims);
    row(
        &mut out,
        "scope",
        format!(
            "basic {} / standard {} / comprehensive {}",
            l.basic, l.standard, l.comprehensive
        ),
    );
    row(
        &mut out,
        "damage",
        format!("low {} / medium {} / high {}", l.low, l.medium, l.high),
    );
    out
}

pub fn case_card(batch: &RecordBatch, row_idx: usize) -> String {
    let mut out = String::new();
    let city = get_utf8(batch, "city", row_idx).unwrap_or_default();
    let province = get_utf8(batch, "province", row_idx).unwrap_or_default();
    let _ = writeln!(out, "=== {city}, {province} ===");
    out.push('\n');

    for &(header, cols) in SECTIONS {
        case_section(&mut out, batch, row_idx, header, cols);
    }
    out
}

// ── Section rendering ──

fn row(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {label:<LABEL_WIDTH$} {value}");
}

fn decimal_row(out: &mut String, label: &str, value: f64, places: usize) {
    row(out, label, format!("{value:.places$}"));
}

fn list_section(out: &mut String, header: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{header}");
    for item in items.iter().take(MAX_LIST_ITEMS) {
        let _ = writeln!(out, "  - {item}");
    }
    if items.len() > MAX_LIST_ITEMS {
        let _ = writeln!(out, "    ... and {} more", items.len() - MAX_LIST_ITEMS);
    }
    out.push('\n');
}

fn case_section(
    out: &mut String,
    batch: &RecordBatch,
    row_idx: usize,
    header: &str,
    cols: &[&str],
) {
    let schema = batch.schema();
    let has_data = cols.iter().any(|&col| {
        schema
            .index_of(col)
            .ok()
            .is_some_and(|i| !batch.column(i).is_null(row_idx))
    });
    if !has_data {
        return;
    }

    let _ = writeln!(out, "{header}");
    for &col_name in cols {
        let Ok(idx) = schema.index_of(col_name) else {
            continue;
        };
        let col = batch.column(idx);
        if col.is_null(row_idx) {
            continue;
        }

        match schema.field(idx).data_type() {
            DataType::Utf8 => {
                if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
                    row(out, col_name, arr.value(row_idx));
                }
            }
            DataType::UInt32 => {
                if let Some(arr) = col.as_any().downcast_ref::<UInt32Array>() {
                    row(out, col_name, arr.value(row_idx));
                }
            }
            DataType::Float64 => {
                if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
                    decimal_row(out, col_name, arr.value(row_idx), 3);
                }
            }
            other => row(out, col_name, format!("({other})")),
        }
    }
    out.push('\n');
}

fn get_utf8(batch: &RecordBatch, col_name: &str, row_idx: usize) -> Option<String> {
    let idx = batch.schema().index_of(col_name).ok()?;
    let col = batch.column(idx);
    if col.is_null(row_idx) {
        return None;
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|a| a.value(row_idx).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazardwise_ai::Catalog;

    fn catalog() -> Catalog {
        Catalog::standard().unwrap()
    }

    #[test]
    fn report_card_has_sections_and_numbered_steps() {
        let cat = catalog();
        let query = Query::resolve("KP", "Peshawar", "earthquake", "RC Frame");
        let report = cat.guidance_for(&query);
        let card = report_card(&query, &report);
        assert!(card.starts_with("=== RC Frame | Peshawar, KP | earthquake ===\n"));
        assert!(card.contains("\nMaterials\n"));
        assert!(card.contains("\nSafety\n"));
        assert!(card.contains("  1. Establish Continuous Lateral Load Path\n"));
        assert!(card.contains("  5. "));
    }

    #[test]
    fn report_card_without_city_names_province() {
        let query = Query::resolve("Sindh", "", "flood", "School Block");
        let report = GuidanceReport {
            summary: "s".into(),
            materials: vec![],
            safety: vec![],
            steps: vec![],
        };
        let card = report_card(&query, &report);
        assert!(card.starts_with("=== School Block | Sindh | flood ==="));
        assert!(!card.contains("Materials"));
        assert!(!card.contains("Steps"));
    }

    #[test]
    fn long_lists_are_cut() {
        let mut out = String::new();
        let items: Vec<String> = (0..13).map(|i| format!("item {i}")).collect();
        list_section(&mut out, "Materials", &items);
        assert!(out.contains("  - item 9\n"));
        assert!(!out.contains("item 10"));
        assert!(out.contains("... and 3 more"));
    }

    #[test]
    fn inference_card_lists_neighbours() {
        let cat = catalog();
        let result = cat.infer("Punjab", "Lahore", "flood", "Masonry House");
        let card = inference_card(&result);
        assert!(card.starts_with("=== Lahore, Punjab ===\n"));
        assert!(card.contains("predicted_scope"));
        assert!(card.contains(&format!("Neighbours ({}):", result.neighbors.len())));
    }

    #[test]
    fn inference_card_lists_named_features() {
        let cat = catalog();
        let result = cat.infer("Sindh", "Karachi", "flood", "School Block");
        let card = inference_card(&result);
        assert!(card.contains("\nFeatures\n"));
        for name in FEATURE_NAMES {
            assert!(card.contains(&format!("  {name:<26} ")), "missing {name}");
        }
        let value = result.sample.features()[2];
        assert!(card.contains(&format!("  {:<26} {value:.3}\n", "severity")));
    }

    #[test]
    fn stats_card_reports_corpus_rows() {
        let stats = catalog().stats();
        let card = stats_card(&stats);
        assert!(card.contains(&format!("  {:<26} 640\n", "rows")));
        assert!(card.contains(&format!("  {:<26} 12\n", "feature_dims")));
    }

    #[test]
    fn case_card_groups_columns() {
        let batch = catalog().corpus().to_record_batch().unwrap();
        let card = case_card(&batch, 0);
        assert!(card.starts_with("=== Lahore, Punjab ===\n"));
        for (header, _) in SECTIONS {
            assert!(card.contains(&format!("\n{header}\n")), "missing {header}");
        }
        assert!(card.contains(&format!("  {:<26} 0\n", "case_index")));
        assert!(card.contains(&format!("  {:<26} 34.000\n", "severity")));
    }
}
