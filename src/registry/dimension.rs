//! Dimension definitions and binning.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::persona::PersonaRecord;

// ─────────────────────────────────────────────────────────────────
// Trait Family
// ─────────────────────────────────────────────────────────────────

/// The four groupings of trait dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitFamily {
    /// Traits that drive actual decision behaviour.
    Core,
    /// HEXACO, DISC, MBTI and Enneagram.
    Extended,
    /// Communication, emotional and social style.
    Style,
    /// Observable consumer behaviour.
    Behavioral,
}

impl TraitFamily {
    pub fn all() -> &'static [TraitFamily] {
        &[
            TraitFamily::Core,
            TraitFamily::Extended,
            TraitFamily::Style,
            TraitFamily::Behavioral,
        ]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            TraitFamily::Core => "core",
            TraitFamily::Extended => "extended",
            TraitFamily::Style => "style",
            TraitFamily::Behavioral => "behavioral",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TraitFamily::Core => "Core Traits",
            TraitFamily::Extended => "Extended Personality",
            TraitFamily::Style => "Style Traits",
            TraitFamily::Behavioral => "Behavioral Indicators",
        }
    }
}

impl fmt::Display for TraitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for TraitFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "core" => Ok(TraitFamily::Core),
            "extended" | "personality" => Ok(TraitFamily::Extended),
            "style" => Ok(TraitFamily::Style),
            "behavioral" | "behavioural" | "behavior" => Ok(TraitFamily::Behavioral),
            _ => Err(format!(
                "Unknown trait family '{}'. Valid: core, extended, style, behavioral",
                s
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Continuous Binning
// ─────────────────────────────────────────────────────────────────

/// Upper edge (inclusive) of the LOW bin.
pub const LOW_UPPER: f64 = 33.0;
/// Upper edge (inclusive) of the MEDIUM bin.
pub const MEDIUM_UPPER: f64 = 66.0;

/// The fixed three-bin scheme shared by every continuous dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContinuousBin {
    Low,
    Medium,
    High,
}

impl ContinuousBin {
    pub const ALL: [ContinuousBin; 3] = [ContinuousBin::Low, ContinuousBin::Medium, ContinuousBin::High];

    /// Bucket a raw value. Values are not clamped, so anything below 0
    /// lands in LOW and anything above 100 in HIGH.
    pub fn of(value: f64) -> Self {
        if value <= LOW_UPPER {
            ContinuousBin::Low
        } else if value <= MEDIUM_UPPER {
            ContinuousBin::Medium
        } else {
            ContinuousBin::High
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            ContinuousBin::Low => 0,
            ContinuousBin::Medium => 1,
            ContinuousBin::High => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContinuousBin::Low => "LOW (0-33)",
            ContinuousBin::Medium => "MEDIUM (34-66)",
            ContinuousBin::High => "HIGH (67-100)",
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Values
// ─────────────────────────────────────────────────────────────────

/// A single extracted trait value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Number(f64),
    Category(String),
}

impl TraitValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TraitValue::Number(n) => Some(*n),
            TraitValue::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            TraitValue::Category(c) => Some(c),
            TraitValue::Number(_) => None,
        }
    }
}

impl fmt::Display for TraitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitValue::Number(n) => write!(f, "{}", n),
            TraitValue::Category(c) => f.write_str(c),
        }
    }
}

/// Default substituted when a persona omits a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Number(f64),
    Category(&'static str),
}

impl DefaultValue {
    pub fn to_value(self) -> TraitValue {
        match self {
            DefaultValue::Number(n) => TraitValue::Number(n),
            DefaultValue::Category(c) => TraitValue::Category(c.to_string()),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Number(n) => write!(f, "{}", n),
            DefaultValue::Category(c) => f.write_str(c),
        }
    }
}

/// Outcome of reading one dimension from a persona.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldLookup {
    /// The persona supplies the field.
    Present(TraitValue),
    /// The field (or its whole group) is missing; the default applies.
    Absent,
    /// The persona's schema variant cannot express this field at all.
    Unavailable,
}

impl FieldLookup {
    pub fn number(value: Option<f64>) -> Self {
        value.map_or(FieldLookup::Absent, |n| FieldLookup::Present(TraitValue::Number(n)))
    }

    pub fn category(value: Option<&str>) -> Self {
        value.map_or(FieldLookup::Absent, |c| {
            FieldLookup::Present(TraitValue::Category(c.to_string()))
        })
    }
}

/// Reads one dimension out of a persona record.
pub type FieldAccessor = fn(&PersonaRecord) -> FieldLookup;

// ─────────────────────────────────────────────────────────────────
// Dimension Definition
// ─────────────────────────────────────────────────────────────────

/// Type and value domain of a dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionKind {
    /// Numeric axis; `min`/`max` document the expected range.
    Continuous { min: f64, max: f64 },
    /// Enumerated axis; the declared values are the bins.
    Categorical { values: &'static [&'static str] },
}

impl DimensionKind {
    pub fn is_categorical(&self) -> bool {
        matches!(self, DimensionKind::Categorical { .. })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            DimensionKind::Continuous { .. } => "continuous",
            DimensionKind::Categorical { .. } => "categorical",
        }
    }
}

/// One registry entry.
#[derive(Clone)]
pub struct DimensionDef {
    pub key: &'static str,
    pub display_name: &'static str,
    pub family: TraitFamily,
    pub kind: DimensionKind,
    pub default: DefaultValue,
    accessor: FieldAccessor,
}

impl DimensionDef {
    pub(crate) fn new(
        key: &'static str,
        display_name: &'static str,
        family: TraitFamily,
        kind: DimensionKind,
        default: DefaultValue,
        accessor: FieldAccessor,
    ) -> Self {
        Self {
            key,
            display_name,
            family,
            kind,
            default,
            accessor,
        }
    }

    /// Raw lookup without default substitution.
    pub fn lookup(&self, persona: &PersonaRecord) -> FieldLookup {
        (self.accessor)(persona)
    }

    /// Value for this persona with the default applied to absent fields.
    /// `None` only when the persona's schema variant cannot carry the field.
    pub fn extract(&self, persona: &PersonaRecord) -> Option<TraitValue> {
        match self.lookup(persona) {
            FieldLookup::Present(value) => Some(value),
            FieldLookup::Absent => Some(self.default.to_value()),
            FieldLookup::Unavailable => None,
        }
    }

    /// Labels of the declared bins, in order.
    pub fn bin_labels(&self) -> Vec<&'static str> {
        match self.kind {
            DimensionKind::Continuous { .. } => ContinuousBin::ALL.iter().map(|b| b.label()).collect(),
            DimensionKind::Categorical { values } => values.to_vec(),
        }
    }

    pub fn total_bins(&self) -> usize {
        match self.kind {
            DimensionKind::Continuous { .. } => ContinuousBin::ALL.len(),
            DimensionKind::Categorical { values } => values.len(),
        }
    }

    /// Position of a category in the declared list.
    pub fn category_index(&self, category: &str) -> Option<usize> {
        match self.kind {
            DimensionKind::Categorical { values } => values.iter().position(|v| *v == category),
            DimensionKind::Continuous { .. } => None,
        }
    }
}

impl fmt::Debug for DimensionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionDef")
            .field("key", &self.key)
            .field("display_name", &self.display_name)
            .field("family", &self.family)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .finish()
    }
}
