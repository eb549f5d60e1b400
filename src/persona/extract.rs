//! Trait extraction.

use std::collections::BTreeMap;

use crate::registry::{DimensionRegistry, TraitFamily, TraitValue};

use super::types::PersonaRecord;

/// Extracted trait values keyed by dimension key.
pub type TraitMap = BTreeMap<&'static str, TraitValue>;

/// Read every dimension of `family` from a persona.
///
/// Missing fields and groups get the registry default. Dimensions the
/// persona's schema variant cannot express are left out of the map.
pub fn extract_traits(
    persona: &PersonaRecord,
    registry: &DimensionRegistry,
    family: TraitFamily,
) -> TraitMap {
    registry
        .family(family)
        .filter_map(|dim| dim.extract(persona).map(|value| (dim.key, value)))
        .collect()
}
