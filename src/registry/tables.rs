//! The standard persona trait schema.
//!
//! Every default lives here next to the field it stands in for.

use crate::persona::{DecisionStyle, DecisionStyleField, PersonaRecord};

use super::dimension::{
    DefaultValue, DimensionDef, DimensionKind, FieldAccessor, FieldLookup, TraitFamily, TraitValue,
};

/// Default for unipolar continuous fields (0-100).
pub const DEFAULT_SCORE: f64 = 50.0;
/// Default for bipolar continuous fields (-100 to 100).
pub const DEFAULT_BIPOLAR: f64 = 0.0;

pub const DECISION_STYLES: &[&str] = &["analytical", "intuitive", "dependent", "avoidant", "spontaneous"];
pub const INFO_PROCESSING: &[&str] = &["maximizer", "satisficer", "optimizer"];
pub const PLANNING_HORIZONS: &[&str] = &["immediate", "short_term", "medium_term", "long_term"];
pub const ENNEAGRAM_TYPES: &[&str] = &["1", "2", "3", "4", "5", "6", "7", "8", "9"];
pub const ENNEAGRAM_INSTINCTS: &[&str] = &["sp", "so", "sx"];
pub const STRESS_RESPONSES: &[&str] = &["fight", "flight", "freeze", "fawn"];

fn score(key: &'static str, name: &'static str, family: TraitFamily, accessor: FieldAccessor) -> DimensionDef {
    DimensionDef::new(
        key,
        name,
        family,
        DimensionKind::Continuous { min: 0.0, max: 100.0 },
        DefaultValue::Number(DEFAULT_SCORE),
        accessor,
    )
}

fn bipolar(key: &'static str, name: &'static str, family: TraitFamily, accessor: FieldAccessor) -> DimensionDef {
    DimensionDef::new(
        key,
        name,
        family,
        DimensionKind::Continuous { min: -100.0, max: 100.0 },
        DefaultValue::Number(DEFAULT_BIPOLAR),
        accessor,
    )
}

fn categorical(
    key: &'static str,
    name: &'static str,
    family: TraitFamily,
    values: &'static [&'static str],
    default: &'static str,
    accessor: FieldAccessor,
) -> DimensionDef {
    DimensionDef::new(
        key,
        name,
        family,
        DimensionKind::Categorical { values },
        DefaultValue::Category(default),
        accessor,
    )
}

/// Structured decision-style fields; legacy string records cannot carry them.
fn decision_field(persona: &PersonaRecord, read: fn(&DecisionStyle) -> FieldLookup) -> FieldLookup {
    match &persona.decision_style {
        Some(DecisionStyleField::Structured(style)) => read(style),
        Some(DecisionStyleField::Legacy(_)) => FieldLookup::Unavailable,
        None => FieldLookup::Absent,
    }
}

pub(super) fn standard_dimensions() -> Vec<DimensionDef> {
    use TraitFamily::*;

    vec![
        // ── Core: Big Five ──
        score("big5_openness", "Openness", Core, |p| {
            FieldLookup::number(p.big5.as_ref().and_then(|g| g.openness))
        }),
        score("big5_conscientiousness", "Conscientiousness", Core, |p| {
            FieldLookup::number(p.big5.as_ref().and_then(|g| g.conscientiousness))
        }),
        score("big5_extraversion", "Extraversion", Core, |p| {
            FieldLookup::number(p.big5.as_ref().and_then(|g| g.extraversion))
        }),
        score("big5_agreeableness", "Agreeableness", Core, |p| {
            FieldLookup::number(p.big5.as_ref().and_then(|g| g.agreeableness))
        }),
        score("big5_neuroticism", "Neuroticism", Core, |p| {
            FieldLookup::number(p.big5.as_ref().and_then(|g| g.neuroticism))
        }),
        // ── Core: Risk profile ──
        score("risk_overall", "Overall Risk Tolerance", Core, |p| {
            FieldLookup::number(p.risk_profile.as_ref().and_then(|g| g.overall))
        }),
        score("risk_financial", "Financial Risk Tolerance", Core, |p| {
            FieldLookup::number(p.risk_profile.as_ref().and_then(|g| g.financial))
        }),
        score("risk_ethical", "Ethical Risk Tolerance", Core, |p| {
            FieldLookup::number(p.risk_profile.as_ref().and_then(|g| g.ethical))
        }),
        score("risk_social", "Social Risk Tolerance", Core, |p| {
            FieldLookup::number(p.risk_profile.as_ref().and_then(|g| g.social))
        }),
        score("risk_health", "Health Risk Tolerance", Core, |p| {
            FieldLookup::number(p.risk_profile.as_ref().and_then(|g| g.health))
        }),
        // ── Core: Decision style ──
        categorical("decision_primary", "Primary Decision Style", Core, DECISION_STYLES, "intuitive", |p| {
            match &p.decision_style {
                Some(DecisionStyleField::Legacy(style)) => {
                    FieldLookup::Present(TraitValue::Category(style.to_lowercase()))
                }
                Some(DecisionStyleField::Structured(style)) => {
                    FieldLookup::category(style.primary.as_deref().map(str::to_lowercase).as_deref())
                }
                None => FieldLookup::Absent,
            }
        }),
        score("decision_risk_seeking", "Risk Seeking", Core, |p| {
            decision_field(p, |d| FieldLookup::number(d.risk_seeking))
        }),
        categorical("decision_info_processing", "Information Processing", Core, INFO_PROCESSING, "satisficer", |p| {
            decision_field(p, |d| FieldLookup::category(d.info_processing.as_deref()))
        }),
        // ── Core: Time preference ──
        score("time_discount_rate", "Time Discount Rate", Core, |p| {
            FieldLookup::number(p.time_preference.as_ref().and_then(|g| g.discount_rate))
        }),
        categorical("time_planning_horizon", "Planning Horizon", Core, PLANNING_HORIZONS, "medium_term", |p| {
            FieldLookup::category(p.time_preference.as_ref().and_then(|g| g.planning_horizon.as_deref()))
        }),
        bipolar("time_present_vs_future", "Present vs Future Orientation", Core, |p| {
            FieldLookup::number(p.time_preference.as_ref().and_then(|g| g.present_vs_future))
        }),
        // ── Core: Regulatory focus ──
        score("regulatory_promotion", "Promotion Focus", Core, |p| {
            FieldLookup::number(p.regulatory_focus.as_ref().and_then(|g| g.promotion))
        }),
        score("regulatory_prevention", "Prevention Focus", Core, |p| {
            FieldLookup::number(p.regulatory_focus.as_ref().and_then(|g| g.prevention))
        }),
        // ── Extended: HEXACO ──
        score("hexaco_honesty_humility", "Honesty-Humility", Extended, |p| {
            FieldLookup::number(p.hexaco.as_ref().and_then(|g| g.honesty_humility))
        }),
        score("hexaco_emotionality", "Emotionality", Extended, |p| {
            FieldLookup::number(p.hexaco.as_ref().and_then(|g| g.emotionality))
        }),
        score("hexaco_extraversion", "Extraversion (HEXACO)", Extended, |p| {
            FieldLookup::number(p.hexaco.as_ref().and_then(|g| g.extraversion))
        }),
        score("hexaco_agreeableness", "Agreeableness (HEXACO)", Extended, |p| {
            FieldLookup::number(p.hexaco.as_ref().and_then(|g| g.agreeableness))
        }),
        score("hexaco_conscientiousness", "Conscientiousness (HEXACO)", Extended, |p| {
            FieldLookup::number(p.hexaco.as_ref().and_then(|g| g.conscientiousness))
        }),
        score("hexaco_openness", "Openness to Experience (HEXACO)", Extended, |p| {
            FieldLookup::number(p.hexaco.as_ref().and_then(|g| g.openness))
        }),
        // ── Extended: DISC ──
        score("disc_dominance", "Dominance (D)", Extended, |p| {
            FieldLookup::number(p.disc.as_ref().and_then(|g| g.dominance))
        }),
        score("disc_influence", "Influence (I)", Extended, |p| {
            FieldLookup::number(p.disc.as_ref().and_then(|g| g.influence))
        }),
        score("disc_steadiness", "Steadiness (S)", Extended, |p| {
            FieldLookup::number(p.disc.as_ref().and_then(|g| g.steadiness))
        }),
        score("disc_conscientiousness", "Conscientiousness (C)", Extended, |p| {
            FieldLookup::number(p.disc.as_ref().and_then(|g| g.conscientiousness))
        }),
        // ── Extended: MBTI ──
        bipolar("mbti_E_I", "Extraversion-Introversion (E-I)", Extended, |p| {
            FieldLookup::number(p.mbti.as_ref().and_then(|g| g.e_i))
        }),
        bipolar("mbti_S_N", "Sensing-Intuition (S-N)", Extended, |p| {
            FieldLookup::number(p.mbti.as_ref().and_then(|g| g.s_n))
        }),
        bipolar("mbti_T_F", "Thinking-Feeling (T-F)", Extended, |p| {
            FieldLookup::number(p.mbti.as_ref().and_then(|g| g.t_f))
        }),
        bipolar("mbti_J_P", "Judging-Perceiving (J-P)", Extended, |p| {
            FieldLookup::number(p.mbti.as_ref().and_then(|g| g.j_p))
        }),
        // ── Extended: Enneagram ──
        categorical("enneagram_primary", "Enneagram Type", Extended, ENNEAGRAM_TYPES, "5", |p| {
            FieldLookup::category(p.enneagram.as_ref().and_then(|g| g.primary_type.as_deref()))
        }),
        categorical("enneagram_instinct", "Instinctual Variant", Extended, ENNEAGRAM_INSTINCTS, "sp", |p| {
            FieldLookup::category(p.enneagram.as_ref().and_then(|g| g.instinct.as_deref()))
        }),
        // ── Style: Language ──
        score("language_formality", "Formality", Style, |p| {
            FieldLookup::number(p.language_style.as_ref().and_then(|g| g.formality))
        }),
        score("language_directness", "Directness", Style, |p| {
            FieldLookup::number(p.language_style.as_ref().and_then(|g| g.directness))
        }),
        score("language_emotion_expression", "Emotion Expression", Style, |p| {
            FieldLookup::number(p.language_style.as_ref().and_then(|g| g.emotion_expression))
        }),
        score("language_verbosity", "Verbosity", Style, |p| {
            FieldLookup::number(p.language_style.as_ref().and_then(|g| g.verbosity))
        }),
        // ── Style: Emotion ──
        score("emotion_baseline_valence", "Baseline Valence", Style, |p| {
            FieldLookup::number(p.emotion_profile.as_ref().and_then(|g| g.baseline_valence))
        }),
        score("emotion_range", "Emotional Range", Style, |p| {
            FieldLookup::number(p.emotion_profile.as_ref().and_then(|g| g.emotional_range))
        }),
        categorical("emotion_stress_response", "Stress Response", Style, STRESS_RESPONSES, "flight", |p| {
            FieldLookup::category(p.emotion_profile.as_ref().and_then(|g| g.stress_response.as_deref()))
        }),
        // ── Style: Social ──
        score("social_trust_default", "Default Trust", Style, |p| {
            FieldLookup::number(p.social_profile.as_ref().and_then(|g| g.trust_default))
        }),
        score("social_cooperation", "Cooperation Tendency", Style, |p| {
            FieldLookup::number(p.social_profile.as_ref().and_then(|g| g.cooperation_tendency))
        }),
        score("social_conformity", "Conformity", Style, |p| {
            FieldLookup::number(p.social_profile.as_ref().and_then(|g| g.conformity))
        }),
        score("social_independence", "Independence", Style, |p| {
            FieldLookup::number(p.social_profile.as_ref().and_then(|g| g.independence))
        }),
        // ── Style: Moral foundations ──
        score("moral_care", "Moral Care", Style, |p| {
            FieldLookup::number(p.moral_foundations.as_ref().and_then(|g| g.care))
        }),
        score("moral_fairness", "Moral Fairness", Style, |p| {
            FieldLookup::number(p.moral_foundations.as_ref().and_then(|g| g.fairness))
        }),
        score("moral_loyalty", "Moral Loyalty", Style, |p| {
            FieldLookup::number(p.moral_foundations.as_ref().and_then(|g| g.loyalty))
        }),
        score("moral_authority", "Moral Authority", Style, |p| {
            FieldLookup::number(p.moral_foundations.as_ref().and_then(|g| g.authority))
        }),
        score("moral_sanctity", "Moral Sanctity", Style, |p| {
            FieldLookup::number(p.moral_foundations.as_ref().and_then(|g| g.sanctity))
        }),
        // ── Behavioral ──
        score("behavior_info_seeking", "Information Seeking", Behavioral, |p| {
            FieldLookup::number(p.behavioral_indicators.as_ref().and_then(|g| g.information_seeking))
        }),
        score("behavior_comparison", "Comparison Behavior", Behavioral, |p| {
            FieldLookup::number(p.behavioral_indicators.as_ref().and_then(|g| g.comparison_behavior))
        }),
        score("behavior_price_sensitivity", "Price Sensitivity", Behavioral, |p| {
            FieldLookup::number(p.behavioral_indicators.as_ref().and_then(|g| g.price_sensitivity))
        }),
        score("behavior_brand_loyalty", "Brand Loyalty", Behavioral, |p| {
            FieldLookup::number(p.behavioral_indicators.as_ref().and_then(|g| g.brand_loyalty))
        }),
    ]
}
