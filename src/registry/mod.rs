//! Dimension registry: the declared trait schema.
//!
//! Each dimension has a key, a family, a kind (continuous or categorical with
//! declared values), the default substituted for missing data, and an accessor
//! into the persona record. Continuous dimensions share the fixed three-bin
//! scheme in [`ContinuousBin`].

pub mod dimension;
mod tables;

use std::sync::OnceLock;

pub use dimension::{
    ContinuousBin, DefaultValue, DimensionDef, DimensionKind, FieldLookup, TraitFamily, TraitValue,
    LOW_UPPER, MEDIUM_UPPER,
};
pub use tables::{DEFAULT_BIPOLAR, DEFAULT_SCORE};

/// Ordered collection of dimension definitions.
#[derive(Debug, Clone)]
pub struct DimensionRegistry {
    dimensions: Vec<DimensionDef>,
}

impl DimensionRegistry {
    /// Registry with the standard persona schema.
    pub fn new() -> Self {
        Self {
            dimensions: tables::standard_dimensions(),
        }
    }

    /// Registry built from an explicit dimension list.
    pub fn from_dimensions(dimensions: Vec<DimensionDef>) -> Self {
        Self { dimensions }
    }

    /// Shared standard registry.
    pub fn global() -> &'static DimensionRegistry {
        static REGISTRY: OnceLock<DimensionRegistry> = OnceLock::new();
        REGISTRY.get_or_init(DimensionRegistry::new)
    }

    pub fn all(&self) -> &[DimensionDef] {
        &self.dimensions
    }

    /// Dimensions of one family, in declaration order.
    pub fn family(&self, family: TraitFamily) -> impl Iterator<Item = &DimensionDef> {
        self.dimensions.iter().filter(move |d| d.family == family)
    }

    pub fn family_len(&self, family: TraitFamily) -> usize {
        self.family(family).count()
    }

    pub fn get(&self, key: &str) -> Option<&DimensionDef> {
        self.dimensions.iter().find(|d| d.key == key)
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

impl Default for DimensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
