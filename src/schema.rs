//! Theory knowledge base: schemas for known social-science theories.
//!
//! The knowledge base is an immutable lookup table from normalized theory
//! name to a schema of constructs, signed causal patterns, and scope
//! conditions. It is constructed once by the host (builtin catalog or
//! JSON) and passed into the generator; the engine never mutates it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors from knowledge-base loading.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Direction of a hypothesized causal effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    #[serde(rename = "+")]
    Positive,
    #[serde(rename = "-")]
    Negative,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Positive => write!(f, "+"),
            Sign::Negative => write!(f, "-"),
        }
    }
}

/// A named theoretical variable and its human-readable definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Construct {
    pub name: String,
    pub definition: String,
}

/// A directed, signed edge between two constructs.
///
/// Source and target need not both be declared constructs; a pattern may
/// reference a construct the schema defines only implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalPattern {
    pub source: String,
    pub sign: Sign,
    pub target: String,
}

/// Schema for one known theory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TheorySchema {
    /// Declared constructs, in declaration order.
    #[serde(default)]
    pub constructs: Vec<Construct>,

    /// Hypothesized causal edges between constructs.
    #[serde(default)]
    pub causal_patterns: Vec<CausalPattern>,

    /// Conditions under which the theory's claims hold.
    #[serde(default)]
    pub scope_conditions: Vec<String>,

    /// Maturity label, informational only.
    #[serde(default = "default_status")]
    pub theoretical_status: String,
}

fn default_status() -> String {
    "established".to_string()
}

impl TheorySchema {
    pub fn new() -> Self {
        Self {
            constructs: Vec::new(),
            causal_patterns: Vec::new(),
            scope_conditions: Vec::new(),
            theoretical_status: default_status(),
        }
    }

    /// Declare a construct with its definition.
    pub fn with_construct(mut self, name: &str, definition: &str) -> Self {
        self.constructs.push(Construct {
            name: name.to_string(),
            definition: definition.to_string(),
        });
        self
    }

    /// Add a signed causal edge.
    pub fn with_pattern(mut self, source: &str, sign: Sign, target: &str) -> Self {
        self.causal_patterns.push(CausalPattern {
            source: source.to_string(),
            sign,
            target: target.to_string(),
        });
        self
    }

    pub fn with_scope_conditions(mut self, conditions: &[&str]) -> Self {
        self.scope_conditions = conditions.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.theoretical_status = status.to_string();
        self
    }

    /// Look up the definition of a declared construct.
    pub fn definition(&self, name: &str) -> Option<&str> {
        self.constructs
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.definition.as_str())
    }
}

impl Default for TheorySchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a free-text theory name into a lookup key.
///
/// Lowercases, strips everything outside lowercase letters and spaces,
/// and trims surrounding whitespace.
pub fn normalize_key(seed: &str) -> String {
    seed.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Immutable mapping from normalized theory name to schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TheoryKnowledgeBase {
    schemas: HashMap<String, TheorySchema>,
}

impl TheoryKnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// The builtin catalog of curated theories.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Load a knowledge base from a JSON map of theory name to schema.
    ///
    /// Keys are normalized on insertion, so the JSON may use display
    /// names ("Relative Deprivation") and lookups still hit.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let raw: HashMap<String, TheorySchema> = serde_json::from_str(json)?;
        let mut kb = Self::new();
        for (name, schema) in raw {
            kb.insert(&name, schema);
        }
        Ok(kb)
    }

    /// Insert a schema under the normalized form of `name`.
    pub fn insert(&mut self, name: &str, schema: TheorySchema) {
        self.schemas.insert(normalize_key(name), schema);
    }

    /// Resolve a free-text seed concept to a schema, if known.
    pub fn resolve(&self, seed: &str) -> Option<&TheorySchema> {
        self.schemas.get(&normalize_key(seed))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

lazy_static::lazy_static! {
    /// Curated theory schemas, keyed by normalized name.
    static ref BUILTIN: TheoryKnowledgeBase = {
        let mut kb = TheoryKnowledgeBase::new();

        kb.insert(
            "relative deprivation",
            TheorySchema::new()
                .with_construct(
                    "expectation_achievement_gap",
                    "difference between expected and actual outcomes",
                )
                .with_construct(
                    "reference_group_comparison",
                    "social comparison with relevant others",
                )
                .with_construct(
                    "perceived_distributive_injustice",
                    "subjective assessment of unfair resource allocation",
                )
                .with_construct(
                    "collective_grievance_intensity",
                    "emotional arousal from group-based injustice",
                )
                .with_construct(
                    "political_efficacy_belief",
                    "confidence in ability to influence political outcomes",
                )
                .with_construct(
                    "mobilization_resource_availability",
                    "material and social resources for collective action",
                )
                .with_construct(
                    "state_repression_capacity",
                    "government ability to suppress dissent",
                )
                .with_pattern(
                    "expectation_achievement_gap",
                    Sign::Positive,
                    "perceived_distributive_injustice",
                )
                .with_pattern(
                    "reference_group_comparison",
                    Sign::Positive,
                    "collective_grievance_intensity",
                )
                .with_pattern(
                    "perceived_distributive_injustice",
                    Sign::Positive,
                    "collective_grievance_intensity",
                )
                .with_pattern(
                    "collective_grievance_intensity",
                    Sign::Positive,
                    "political_efficacy_belief",
                )
                .with_pattern(
                    "political_efficacy_belief",
                    Sign::Positive,
                    "mobilization_resource_availability",
                )
                .with_pattern(
                    "state_repression_capacity",
                    Sign::Negative,
                    "mobilization_resource_availability",
                )
                .with_scope_conditions(&[
                    "visible_inequality",
                    "salient_reference_groups",
                    "political_opportunities",
                ]),
        );

        kb.insert(
            "selectorate theory",
            TheorySchema::new()
                .with_construct(
                    "winning_coalition_size",
                    "number of supporters needed to maintain power",
                )
                .with_construct(
                    "selectorate_size",
                    "total pool of potential supporters",
                )
                .with_construct(
                    "loyalty_norm_strength",
                    "cultural expectation of supporter faithfulness",
                )
                .with_construct(
                    "public_goods_provision",
                    "resources benefiting entire population",
                )
                .with_construct(
                    "private_goods_distribution",
                    "targeted benefits to specific supporters",
                )
                .with_construct(
                    "leader_survival_probability",
                    "likelihood of maintaining political position",
                )
                .with_construct(
                    "citizen_welfare_outcomes",
                    "aggregate population wellbeing measures",
                )
                .with_pattern(
                    "winning_coalition_size",
                    Sign::Positive,
                    "public_goods_provision",
                )
                .with_pattern("selectorate_size", Sign::Positive, "leader_accountability")
                .with_pattern(
                    "loyalty_norm_strength",
                    Sign::Negative,
                    "leadership_turnover",
                )
                .with_pattern(
                    "private_goods_distribution",
                    Sign::Positive,
                    "coalition_loyalty",
                )
                .with_pattern(
                    "public_goods_provision",
                    Sign::Positive,
                    "citizen_welfare_outcomes",
                )
                .with_scope_conditions(&[
                    "political_competition",
                    "resource_availability",
                    "institutional_constraints",
                ])
                .with_status("developing_framework"),
        );

        kb.insert(
            "democratic backsliding",
            TheorySchema::new()
                .with_construct(
                    "executive_power_concentration",
                    "expansion beyond constitutional limits",
                )
                .with_construct(
                    "judicial_independence_erosion",
                    "political control over courts",
                )
                .with_construct(
                    "media_pluralism_decline",
                    "reduction in independent news sources",
                )
                .with_construct(
                    "civil_society_space_contraction",
                    "restrictions on NGOs and civic organizations",
                )
                .with_construct(
                    "electoral_integrity_degradation",
                    "manipulation of voting processes",
                )
                .with_construct(
                    "opposition_harassment_intensity",
                    "persecution of political rivals",
                )
                .with_construct(
                    "polarization_affective_distance",
                    "emotional hostility between political groups",
                )
                .with_pattern(
                    "polarization_affective_distance",
                    Sign::Positive,
                    "executive_power_concentration",
                )
                .with_pattern(
                    "executive_power_concentration",
                    Sign::Positive,
                    "judicial_independence_erosion",
                )
                .with_pattern(
                    "judicial_independence_erosion",
                    Sign::Positive,
                    "media_pluralism_decline",
                )
                .with_pattern(
                    "media_pluralism_decline",
                    Sign::Positive,
                    "civil_society_space_contraction",
                )
                .with_pattern(
                    "opposition_harassment_intensity",
                    Sign::Positive,
                    "electoral_integrity_degradation",
                )
                .with_scope_conditions(&[
                    "competitive_elections",
                    "weak_institutions",
                    "polarized_society",
                ]),
        );

        kb.insert(
            "democratic peace theory",
            TheorySchema::new()
                .with_construct(
                    "democratic_institutional_constraints",
                    "checks on executive war powers",
                )
                .with_construct(
                    "democratic_norm_internalization",
                    "peaceful conflict resolution values",
                )
                .with_construct(
                    "public_opinion_constraint",
                    "electoral costs of military action",
                )
                .with_construct(
                    "transparency_mechanisms",
                    "open information about intentions",
                )
                .with_construct(
                    "economic_interdependence",
                    "trade-based conflict costs",
                )
                .with_construct(
                    "international_conflict_propensity",
                    "likelihood of interstate war",
                )
                .with_construct(
                    "diplomatic_cooperation_frequency",
                    "peaceful interaction patterns",
                )
                .with_pattern(
                    "democratic_institutional_constraints",
                    Sign::Negative,
                    "international_conflict_propensity",
                )
                .with_pattern(
                    "democratic_norm_internalization",
                    Sign::Positive,
                    "diplomatic_cooperation_frequency",
                )
                .with_pattern(
                    "public_opinion_constraint",
                    Sign::Negative,
                    "military_intervention_likelihood",
                )
                .with_pattern(
                    "transparency_mechanisms",
                    Sign::Negative,
                    "security_dilemma_intensity",
                )
                .with_pattern(
                    "economic_interdependence",
                    Sign::Negative,
                    "conflict_escalation_risk",
                )
                .with_scope_conditions(&[
                    "stable_democracies",
                    "no_territorial_disputes",
                    "economic_development",
                ]),
        );

        kb
    };
}
