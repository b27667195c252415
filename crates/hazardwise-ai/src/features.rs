//! Feature vectors and min/max normalization.

use serde::Serialize;

pub const FEATURE_DIM: usize = 12;

pub type FeatureVector = [f64; FEATURE_DIM];

pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "structureCode",
    "hazardCode",
    "severity",
    "affectedArea",
    "seismicZone",
    "floodRisk",
    "monsoonIndex",
    "soilInstability",
    "logistics",
    "laborIndex",
    "materialIndex",
    "exposureBias",
];

/// Per-dimension min/max fitted once over the training corpus.
///
/// Query vectors are normalized with the same table. A query component
/// outside the training range maps outside `[0, 1]`; [`Normalizer::normalize`]
/// leaves it there and [`Normalizer::normalize_clamped`] pins it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Normalizer {
    min: FeatureVector,
    max: FeatureVector,
}

impl Normalizer {
    /// Fit over a set of vectors. `None` when the set is empty.
    pub fn fit<'a>(vectors: impl IntoIterator<Item = &'a FeatureVector>) -> Option<Self> {
        let mut iter = vectors.into_iter();
        let first = iter.next()?;
        let mut min = *first;
        let mut max = *first;
        for v in iter {
            for d in 0..FEATURE_DIM {
                min[d] = min[d].min(v[d]);
                max[d] = max[d].max(v[d]);
            }
        }
        Some(Self { min, max })
    }

    /// `(v - min) / (max - min)` per dimension, `0` for a constant dimension.
    pub fn normalize(&self, v: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_DIM];
        for d in 0..FEATURE_DIM {
            let span = self.max[d] - self.min[d];
            out[d] = if span == 0.0 {
                0.0
            } else {
                (v[d] - self.min[d]) / span
            };
        }
        out
    }

    pub fn normalize_clamped(&self, v: &FeatureVector) -> FeatureVector {
        let mut out = self.normalize(v);
        for x in &mut out {
            *x = x.clamp(0.0, 1.0);
        }
        out
    }
}

pub fn euclidean(a: &FeatureVector, b: &FeatureVector) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(fill: f64) -> FeatureVector {
        [fill; FEATURE_DIM]
    }

    #[test]
    fn fit_empty_is_none() {
        assert!(Normalizer::fit(std::iter::empty()).is_none());
    }

    #[test]
    fn normalize_maps_range_to_unit_interval() {
        let a = v(10.0);
        let b = v(20.0);
        let n = Normalizer::fit([&a, &b]).unwrap();
        assert_eq!(n.normalize(&a), v(0.0));
        assert_eq!(n.normalize(&b), v(1.0));
        assert_eq!(n.normalize(&v(15.0)), v(0.5));
    }

    #[test]
    fn constant_dimension_normalizes_to_zero() {
        let mut a = v(1.0);
        let mut b = v(1.0);
        a[0] = 0.0;
        b[0] = 4.0;
        let n = Normalizer::fit([&a, &b]).unwrap();
        let out = n.normalize(&v(7.0));
        assert_eq!(out[0], 1.75);
        assert!(out[1..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn out_of_range_query_is_not_clamped() {
        let n = Normalizer::fit([&v(0.0), &v(10.0)]).unwrap();
        let out = n.normalize(&v(15.0));
        assert!(out.iter().all(|&x| (x - 1.5).abs() < 1e-12));
        let low = n.normalize(&v(-5.0));
        assert!(low.iter().all(|&x| (x + 0.5).abs() < 1e-12));
    }

    #[test]
    fn clamped_variant_pins_to_unit_interval() {
        let n = Normalizer::fit([&v(0.0), &v(10.0)]).unwrap();
        assert_eq!(n.normalize_clamped(&v(15.0)), v(1.0));
        assert_eq!(n.normalize_clamped(&v(-5.0)), v(0.0));
    }

    #[test]
    fn euclidean_distance() {
        let a = v(0.0);
        let mut b = v(0.0);
        b[0] = 3.0;
        b[1] = 4.0;
        assert!((euclidean(&a, &b) - 5.0).abs() < 1e-12);
        assert_eq!(euclidean(&a, &a), 0.0);
    }
}
