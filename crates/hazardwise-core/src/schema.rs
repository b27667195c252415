/// Arrow schema definitions for engine tables.
pub mod corpus {
    use arrow::datatypes::{DataType, Field, Schema};

    /// Schema for the synthetic training corpus: the twelve feature
    /// dimensions (categoricals as their names) followed by the labels.
    pub fn training_case_schema() -> Schema {
        Schema::new(vec![
            Field::new("case_index", DataType::UInt32, false),
            Field::new("city", DataType::Utf8, false),
            Field::new("province", DataType::Utf8, false),
            Field::new("structure_type", DataType::Utf8, false),
            Field::new("hazard", DataType::Utf8, false),
            Field::new("severity", DataType::Float64, false),
            Field::new("affected_area", DataType::Float64, false),
            Field::new("seismic_zone", DataType::Float64, false),
            Field::new("flood_risk", DataType::Float64, false),
            Field::new("monsoon_index", DataType::Float64, false),
            Field::new("soil_instability", DataType::Float64, false),
            Field::new("logistics", DataType::Float64, false),
            Field::new("labor_index", DataType::Float64, false),
            Field::new("material_index", DataType::Float64, false),
            Field::new("exposure_bias", DataType::Float64, false),
            Field::new("stress_index", DataType::Float64, false),
            Field::new("predicted_scope", DataType::Utf8, false),
            Field::new("predicted_damage", DataType::Utf8, false),
            Field::new("depth_score", DataType::Float64, false),
        ])
    }
}
