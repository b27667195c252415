pub mod library;
pub mod profile;
pub mod query;
pub mod reference;
pub mod report;
pub mod schema;
pub mod taxonomy;

pub use profile::{CityIndices, CityProfile, GuidanceTemplate, ProvinceProfile, StructureProfile};
pub use query::Query;
pub use reference::{CitySource, LocationContext, ReferenceData};
pub use report::{GuidanceReport, GuidanceStep, StepDiagram};
pub use taxonomy::{DamageClass, Hazard, Parsed, Province, ScopeClass, StructureType, UnknownValue};
