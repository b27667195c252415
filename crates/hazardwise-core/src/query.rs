//! A resolved request: the four categorical inputs after defaulting.

use serde::Serialize;
use tracing::warn;

use crate::taxonomy::{Hazard, Province, StructureType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub province: Province,
    /// Raw city input; cities are resolved against the reference tables later.
    pub city: String,
    pub hazard: Hazard,
    pub structure_type: StructureType,
}

impl Query {
    /// Coerce free-form inputs. Unknown province, hazard, or structure type
    /// strings become `Punjab`, `flood`, and `Masonry House`.
    pub fn resolve(province: &str, city: &str, hazard: &str, structure_type: &str) -> Self {
        let p = Province::resolve(province);
        let h = Hazard::resolve(hazard);
        let s = StructureType::resolve(structure_type);

        if p.defaulted {
            warn!(input = province, default = %p.value, "unknown province");
        }
        if h.defaulted {
            warn!(input = hazard, default = %h.value, "unknown hazard");
        }
        if s.defaulted {
            warn!(input = structure_type, default = %s.value, "unknown structure type");
        }

        Self {
            province: p.value,
            city: city.trim().to_string(),
            hazard: h.value,
            structure_type: s.value,
        }
    }
}
