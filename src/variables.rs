//! Variable resolution: from a free-text seed concept to a variable set.
//!
//! Known theories derive their variables from the schema's causal graph;
//! unknown theories get procedurally synthesized names from the seed root.

use crate::schema::{Construct, TheoryKnowledgeBase};
use serde::{Deserialize, Serialize};

/// Default moderator when a schema declares no scope conditions.
const DEFAULT_MODERATOR: &str = "institutional_context";

/// Moderators used by the fallback path.
const FALLBACK_MODERATORS: [&str; 3] = [
    "institutional_context",
    "resource_constraints",
    "temporal_factors",
];

/// Which resolution path produced a variable set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionPath {
    /// The seed matched a knowledge-base schema.
    Schema,
    /// The seed was unknown; variables were synthesized from the root.
    Fallback,
}

/// Candidate variables for one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSet {
    /// Constructs appearing as a causal-pattern source, or synthesized names.
    pub independent: Vec<String>,
    /// Constructs appearing as a causal-pattern target, or synthesized names.
    pub dependent: Vec<String>,
    /// Conditions available for moderated-relationship rendering.
    pub moderators: Vec<String>,
    /// Declared construct definitions (empty on the fallback path).
    pub constructs: Vec<Construct>,
    /// Maturity label, informational only.
    pub theoretical_status: String,
}

impl VariableSet {
    /// A set can drive generation only with candidates on both sides.
    pub fn is_viable(&self) -> bool {
        !self.independent.is_empty() && !self.dependent.is_empty()
    }
}

/// Resolve a seed concept against the knowledge base.
///
/// The caller is responsible for rejecting seeds whose normalized form is
/// empty; such seeds trivially miss and would synthesize degenerate names.
pub fn resolve(kb: &TheoryKnowledgeBase, seed: &str) -> (VariableSet, ResolutionPath) {
    if let Some(schema) = kb.resolve(seed) {
        let independent = schema
            .constructs
            .iter()
            .filter(|c| schema.causal_patterns.iter().any(|p| p.source == c.name))
            .map(|c| c.name.clone())
            .collect();
        let dependent = schema
            .constructs
            .iter()
            .filter(|c| schema.causal_patterns.iter().any(|p| p.target == c.name))
            .map(|c| c.name.clone())
            .collect();
        let moderators = if schema.scope_conditions.is_empty() {
            vec![DEFAULT_MODERATOR.to_string()]
        } else {
            schema.scope_conditions.clone()
        };

        let vars = VariableSet {
            independent,
            dependent,
            moderators,
            constructs: schema.constructs.clone(),
            theoretical_status: schema.theoretical_status.clone(),
        };
        (vars, ResolutionPath::Schema)
    } else {
        (synthesize(seed), ResolutionPath::Fallback)
    }
}

/// Synthesize a variable set for an unknown theory.
///
/// The seed root (trailing "theory" token stripped, whitespace collapsed
/// to underscores) is combined with fixed semantic affixes, so the same
/// seed always yields the same names.
fn synthesize(seed: &str) -> VariableSet {
    let root = seed_root(seed);

    VariableSet {
        independent: vec![
            format!("{root}_institutional_strength"),
            format!("{root}_resource_availability"),
            format!("{root}_actor_motivation"),
            format!("contextual_{root}"),
        ],
        dependent: vec![
            format!("{root}_effectiveness"),
            format!("{root}_outcomes"),
            format!("{root}_impact"),
            format!("system_response_to_{root}"),
        ],
        moderators: FALLBACK_MODERATORS.iter().map(|m| m.to_string()).collect(),
        constructs: Vec::new(),
        theoretical_status: "conjecture".to_string(),
    }
}

/// Strip a trailing "theory" token (case-insensitive) and slugify.
fn seed_root(seed: &str) -> String {
    let trimmed = seed.trim();
    let stripped = match trimmed.rsplit_once(char::is_whitespace) {
        Some((head, tail)) if tail.eq_ignore_ascii_case("theory") => head.trim_end(),
        _ => trimmed,
    };
    stripped.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::normalize_key;

    #[test]
    fn test_schema_path_relative_deprivation() {
        let kb = TheoryKnowledgeBase::builtin();
        let (vars, path) = resolve(&kb, "relative deprivation");

        assert_eq!(path, ResolutionPath::Schema);
        assert_eq!(
            vars.independent,
            vec![
                "expectation_achievement_gap",
                "reference_group_comparison",
                "perceived_distributive_injustice",
                "collective_grievance_intensity",
                "political_efficacy_belief",
                "state_repression_capacity",
            ]
        );
        assert_eq!(
            vars.dependent,
            vec![
                "perceived_distributive_injustice",
                "collective_grievance_intensity",
                "political_efficacy_belief",
                "mobilization_resource_availability",
            ]
        );
        assert_eq!(vars.moderators.len(), 3);
        assert_eq!(vars.theoretical_status, "established");
        assert!(vars.is_viable());
    }

    #[test]
    fn test_construct_may_appear_on_both_sides() {
        let kb = TheoryKnowledgeBase::builtin();
        let (vars, _) = resolve(&kb, "relative deprivation");
        assert!(vars
            .independent
            .contains(&"perceived_distributive_injustice".to_string()));
        assert!(vars
            .dependent
            .contains(&"perceived_distributive_injustice".to_string()));
    }

    #[test]
    fn test_default_moderator_when_no_scope_conditions() {
        use crate::schema::{Sign, TheorySchema};

        let mut kb = TheoryKnowledgeBase::new();
        kb.insert(
            "bare theory",
            TheorySchema::new()
                .with_construct("a", "cause")
                .with_construct("b", "effect")
                .with_pattern("a", Sign::Positive, "b"),
        );

        let (vars, path) = resolve(&kb, "bare theory");
        assert_eq!(path, ResolutionPath::Schema);
        assert_eq!(vars.moderators, vec!["institutional_context"]);
    }

    #[test]
    fn test_fallback_path_names() {
        let kb = TheoryKnowledgeBase::builtin();
        let (vars, path) = resolve(&kb, "unknown theory xyz");

        assert_eq!(path, ResolutionPath::Fallback);
        assert_eq!(
            vars.independent,
            vec![
                "unknown_theory_xyz_institutional_strength",
                "unknown_theory_xyz_resource_availability",
                "unknown_theory_xyz_actor_motivation",
                "contextual_unknown_theory_xyz",
            ]
        );
        assert_eq!(
            vars.dependent,
            vec![
                "unknown_theory_xyz_effectiveness",
                "unknown_theory_xyz_outcomes",
                "unknown_theory_xyz_impact",
                "system_response_to_unknown_theory_xyz",
            ]
        );
        assert!(vars.constructs.is_empty());
        assert_eq!(vars.theoretical_status, "conjecture");
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let kb = TheoryKnowledgeBase::builtin();
        let (first, _) = resolve(&kb, "social capital");
        let (second, _) = resolve(&kb, "social capital");
        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_strips_theory_suffix() {
        assert_eq!(seed_root("resource mobilization theory"), "resource_mobilization");
        assert_eq!(seed_root("resource mobilization THEORY"), "resource_mobilization");
        // "theory" must be a trailing token, not a substring.
        assert_eq!(seed_root("game theoretic"), "game_theoretic");
        assert_eq!(seed_root("theory"), "theory");
    }

    #[test]
    fn test_fallback_collapses_whitespace() {
        assert_eq!(seed_root("  social   capital  "), "social_capital");
    }

    #[test]
    fn test_flags_follow_key_match() {
        let kb = TheoryKnowledgeBase::builtin();
        for seed in ["relative deprivation", "Selectorate Theory", "democratic backsliding"] {
            let (_, path) = resolve(&kb, seed);
            assert_eq!(path, ResolutionPath::Schema, "seed: {seed}");
            assert!(kb.resolve(&normalize_key(seed)).is_some());
        }
        for seed in ["string theory", "everything", "unknown theory xyz"] {
            let (_, path) = resolve(&kb, seed);
            assert_eq!(path, ResolutionPath::Fallback, "seed: {seed}");
        }
    }
}
