//! Persona records: parsing, completeness checks and trait extraction.
//!
//! Records come from upstream generator pipelines as loosely-structured JSON.
//! Only `big5`, `risk_profile` and `decision_style` are required for a
//! persona to take part in the statistics.

pub mod completeness;
pub mod extract;
pub mod types;

pub use completeness::{check_completeness, CompletenessReport, GroupTier, SchemaGroup};
pub use extract::{extract_traits, TraitMap};
pub use types::{
    BehavioralIndicators, BigFive, DecisionStyle, DecisionStyleField, Disc, EmotionProfile,
    Enneagram, Hexaco, LanguageStyle, Mbti, MoralFoundations, PersonaRecord, RegulatoryFocus,
    RiskProfile, SocialProfile, TimePreference,
};
