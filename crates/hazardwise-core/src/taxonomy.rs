//! Categorical vocabulary of the engine: hazards, structure types, provinces,
//! and the two predicted classes.
//!
//! Every enum has a strict [`FromStr`] parser and a lenient `resolve` that
//! never fails: unknown input falls back to the documented default and the
//! returned [`Parsed`] records that a default was applied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A categorical input string that matched no known value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValue {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Outcome of a lenient parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    /// True when the input was unrecognised and `value` is the default.
    pub defaulted: bool,
}

fn resolve_with<T: FromStr + Default>(s: &str) -> Parsed<T> {
    match s.parse::<T>() {
        Ok(value) => Parsed {
            value,
            defaulted: false,
        },
        Err(_) => Parsed {
            value: T::default(),
            defaulted: true,
        },
    }
}

/// Lowercase, trim, and collapse separators so `"rc-frame"`, `"RC Frame"` and
/// `" rc_frame "` compare equal.
fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Hazard ──

/// The disaster type being planned for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Hazard {
    #[default]
    Flood,
    Earthquake,
}

impl Hazard {
    pub const ALL: [Hazard; 2] = [Hazard::Flood, Hazard::Earthquake];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flood => "flood",
            Self::Earthquake => "earthquake",
        }
    }

    /// Numeric code used as a feature dimension.
    pub fn code(&self) -> f64 {
        match self {
            Self::Flood => 0.0,
            Self::Earthquake => 1.0,
        }
    }

    pub fn resolve(s: &str) -> Parsed<Self> {
        resolve_with(s)
    }
}

impl FromStr for Hazard {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "flood" | "floods" | "flooding" => Ok(Self::Flood),
            "earthquake" | "earthquakes" | "seismic" => Ok(Self::Earthquake),
            _ => Err(UnknownValue::new("hazard", s)),
        }
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Structure type ──

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StructureType {
    #[default]
    #[serde(rename = "Masonry House")]
    MasonryHouse,
    #[serde(rename = "RC Frame")]
    RcFrame,
    #[serde(rename = "School Block")]
    SchoolBlock,
    #[serde(rename = "Bridge Approach")]
    BridgeApproach,
}

impl StructureType {
    pub const ALL: [StructureType; 4] = [
        StructureType::MasonryHouse,
        StructureType::RcFrame,
        StructureType::SchoolBlock,
        StructureType::BridgeApproach,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MasonryHouse => "Masonry House",
            Self::RcFrame => "RC Frame",
            Self::SchoolBlock => "School Block",
            Self::BridgeApproach => "Bridge Approach",
        }
    }

    /// Numeric code used as a feature dimension.
    pub fn code(&self) -> f64 {
        match self {
            Self::MasonryHouse => 0.0,
            Self::RcFrame => 1.0,
            Self::SchoolBlock => 2.0,
            Self::BridgeApproach => 3.0,
        }
    }

    /// Template tags this structure type matches. Always contains `all`.
    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            Self::MasonryHouse => &["all", "masonry", "moisture"],
            Self::RcFrame => &["all", "rc", "utilities"],
            Self::SchoolBlock => &["all", "school", "safety", "ops"],
            Self::BridgeApproach => &["all", "bridge", "foundation", "drainage"],
        }
    }

    pub fn resolve(s: &str) -> Parsed<Self> {
        resolve_with(s)
    }
}

impl FromStr for StructureType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "masonry house" | "masonry" => Ok(Self::MasonryHouse),
            "rc frame" | "rc" | "reinforced concrete frame" => Ok(Self::RcFrame),
            "school block" | "school" => Ok(Self::SchoolBlock),
            "bridge approach" | "bridge" => Ok(Self::BridgeApproach),
            _ => Err(UnknownValue::new("structure type", s)),
        }
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Province ──

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Province {
    #[default]
    Punjab,
    Sindh,
    #[serde(rename = "KP")]
    Kp,
    Balochistan,
    #[serde(rename = "Gilgit-Baltistan")]
    GilgitBaltistan,
    #[serde(rename = "AJK")]
    Ajk,
    Islamabad,
}

impl Province {
    pub const ALL: [Province; 7] = [
        Province::Punjab,
        Province::Sindh,
        Province::Kp,
        Province::Balochistan,
        Province::GilgitBaltistan,
        Province::Ajk,
        Province::Islamabad,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Punjab => "Punjab",
            Self::Sindh => "Sindh",
            Self::Kp => "KP",
            Self::Balochistan => "Balochistan",
            Self::GilgitBaltistan => "Gilgit-Baltistan",
            Self::Ajk => "AJK",
            Self::Islamabad => "Islamabad",
        }
    }

    pub fn resolve(s: &str) -> Parsed<Self> {
        resolve_with(s)
    }
}

impl FromStr for Province {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "punjab" => Ok(Self::Punjab),
            "sindh" => Ok(Self::Sindh),
            "kp" | "kpk" | "khyber pakhtunkhwa" => Ok(Self::Kp),
            "balochistan" | "baluchistan" => Ok(Self::Balochistan),
            "gilgit baltistan" | "gb" => Ok(Self::GilgitBaltistan),
            "ajk" | "azad kashmir" | "azad jammu and kashmir" => Ok(Self::Ajk),
            "islamabad" | "ict" | "islamabad capital territory" => Ok(Self::Islamabad),
            _ => Err(UnknownValue::new("province", s)),
        }
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Predicted classes ──

/// Recommended intervention intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeClass {
    Basic,
    Standard,
    Comprehensive,
}

impl ScopeClass {
    pub const ALL: [ScopeClass; 3] = [
        ScopeClass::Basic,
        ScopeClass::Standard,
        ScopeClass::Comprehensive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Comprehensive => "comprehensive",
        }
    }

    /// Position in [`Self::ALL`], used to index vote tallies.
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    /// Label a stress index with the corpus thresholds.
    pub fn from_stress(stress: f64) -> Self {
        if stress > 0.67 {
            Self::Comprehensive
        } else if stress > 0.52 {
            Self::Standard
        } else {
            Self::Basic
        }
    }
}

impl fmt::Display for ScopeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assessed damage / risk concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageClass {
    Low,
    Medium,
    High,
}

impl DamageClass {
    pub const ALL: [DamageClass; 3] = [DamageClass::Low, DamageClass::Medium, DamageClass::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    /// Same thresholds as [`ScopeClass::from_stress`].
    pub fn from_stress(stress: f64) -> Self {
        if stress > 0.67 {
            Self::High
        } else if stress > 0.52 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for DamageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
