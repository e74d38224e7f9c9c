//! Conjecture generation engine.
//!
//! Resolves a seed concept to candidate variables, draws a causal pair
//! and relation, validates it against the instance's relationship memory,
//! and renders the requested rhetorical pattern with synthetic statistics.

use crate::pattern::{PatternError, RhetoricalPattern};
use crate::schema::{normalize_key, TheoryKnowledgeBase};
use crate::variables::{resolve, ResolutionPath, VariableSet};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Dimensionality reported in metadata, informational only.
const VECTOR_DIMENSIONS: usize = 5;

/// Errors from conjecture generation.
#[derive(Debug, Error)]
pub enum ConjectureError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("Seed concept is empty after normalization")]
    EmptySeed,
}

/// Direction of a generated causal claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Increases,
    Decreases,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Increases => write!(f, "increases"),
            Relation::Decreases => write!(f, "decreases"),
        }
    }
}

/// One generated causal claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conjecture {
    /// The rendered hypothesis sentence.
    pub text: String,
    /// Qualitative confidence label for the chosen pattern.
    pub confidence: String,
    /// Chosen independent variable (underscore form).
    pub independent: String,
    /// Chosen dependent variable (underscore form).
    pub dependent: String,
    /// Chosen directional relation.
    pub relation: Relation,
}

impl fmt::Display for Conjecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.confidence)
    }
}

/// Counters and flags describing the most recent generation activity.
#[derive(Debug, Clone, Copy)]
struct GenerationMetadata {
    schema_enhanced: bool,
    fallback_used: bool,
    constraints_applied: u64,
    vector_dimensions: usize,
}

impl GenerationMetadata {
    fn new() -> Self {
        Self {
            schema_enhanced: false,
            fallback_used: false,
            constraints_applied: 0,
            vector_dimensions: VECTOR_DIMENSIONS,
        }
    }
}

/// Read-only metadata snapshot for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    /// The most recent call resolved through a knowledge-base schema.
    pub schema_enhanced: bool,
    /// The most recent call synthesized fallback variables.
    pub fallback_used: bool,
    /// Successful relation validations over the instance lifetime.
    pub constraints_applied: u64,
    /// Informational constant.
    pub vector_dimensions: usize,
    /// Validations per distinct recorded pair, as a percentage.
    pub efficiency: f64,
}

/// Generates hypothesis sentences about social-science theories.
///
/// Each instance owns its relationship memory: once a directional
/// relation is recorded for an ordered variable pair, later draws
/// proposing the opposite relation for that pair are rejected, so one
/// instance never contradicts itself.
///
/// Methods take `&mut self`; a host sharing one instance across threads
/// wraps it in a `Mutex` so the whole validate-and-record step stays
/// atomic.
#[derive(Debug, Clone)]
pub struct ConjectureGenerator {
    knowledge_base: TheoryKnowledgeBase,
    relationship_memory: HashMap<(String, String), Relation>,
    metadata: GenerationMetadata,
}

impl ConjectureGenerator {
    /// Create a generator over an immutable knowledge base.
    pub fn new(knowledge_base: TheoryKnowledgeBase) -> Self {
        Self {
            knowledge_base,
            relationship_memory: HashMap::new(),
            metadata: GenerationMetadata::new(),
        }
    }

    /// Generate a conjecture using the thread-local RNG.
    ///
    /// Returns `Ok(None)` when the draw cannot produce a conjecture:
    /// empty variable pools, or a relation conflicting with one already
    /// recorded for the drawn pair. The caller may simply call again for
    /// a fresh draw.
    pub fn generate(
        &mut self,
        pattern_name: &str,
        seed_concept: &str,
    ) -> Result<Option<Conjecture>, ConjectureError> {
        self.generate_with_rng(pattern_name, seed_concept, &mut rand::thread_rng())
    }

    /// Generate with a specific RNG (useful for testing).
    pub fn generate_with_rng<R: Rng>(
        &mut self,
        pattern_name: &str,
        seed_concept: &str,
        rng: &mut R,
    ) -> Result<Option<Conjecture>, ConjectureError> {
        let pattern: RhetoricalPattern = pattern_name.parse()?;
        if normalize_key(seed_concept).is_empty() {
            return Err(ConjectureError::EmptySeed);
        }

        let (vars, path) = resolve(&self.knowledge_base, seed_concept);
        self.metadata.schema_enhanced = path == ResolutionPath::Schema;
        self.metadata.fallback_used = path == ResolutionPath::Fallback;

        if !vars.is_viable() {
            return Ok(None);
        }

        let independent = vars.independent[rng.gen_range(0..vars.independent.len())].clone();
        let dependent = vars.dependent[rng.gen_range(0..vars.dependent.len())].clone();
        let relation = if rng.gen_bool(0.5) {
            Relation::Increases
        } else {
            Relation::Decreases
        };

        if !self.record_relation(&independent, relation, &dependent) {
            return Ok(None);
        }

        let text = render(pattern, &independent, relation, &dependent, &vars, rng);
        Ok(Some(Conjecture {
            text,
            confidence: pattern.confidence().to_string(),
            independent,
            dependent,
            relation,
        }))
    }

    /// Record a relation for an ordered pair, first relation wins.
    ///
    /// Re-recording the same relation succeeds and counts again; a
    /// conflicting relation is rejected with no state change.
    fn record_relation(&mut self, independent: &str, relation: Relation, dependent: &str) -> bool {
        let key = (independent.to_string(), dependent.to_string());
        if let Some(existing) = self.relationship_memory.get(&key) {
            if *existing != relation {
                return false;
            }
        }
        self.relationship_memory.insert(key, relation);
        self.metadata.constraints_applied += 1;
        true
    }

    /// Snapshot of generation metadata, including derived efficiency.
    pub fn metadata(&self) -> MetadataSnapshot {
        let distinct_pairs = self.relationship_memory.len().max(1) as f64;
        let efficiency = self.metadata.constraints_applied as f64 / distinct_pairs * 100.0;

        MetadataSnapshot {
            schema_enhanced: self.metadata.schema_enhanced,
            fallback_used: self.metadata.fallback_used,
            constraints_applied: self.metadata.constraints_applied,
            vector_dimensions: self.metadata.vector_dimensions,
            efficiency: (efficiency * 10.0).round() / 10.0,
        }
    }
}

/// Underscore names become spaces for display.
fn display_name(name: &str) -> String {
    name.replace('_', " ")
}

fn render<R: Rng>(
    pattern: RhetoricalPattern,
    independent: &str,
    relation: Relation,
    dependent: &str,
    vars: &VariableSet,
    rng: &mut R,
) -> String {
    let x = display_name(independent);
    let y = display_name(dependent);

    match pattern {
        RhetoricalPattern::DirectCausation => {
            let magnitude = sample_magnitude(rng);
            let r_squared = (magnitude * 100.0 * 10.0).round() / 10.0;
            let beta = sample_beta(rng);
            format!(
                "A one standard deviation increase in {x} {relation} {y} by approximately \
                 {magnitude:.2} standard deviations (β = {beta:.3}, expected R² contribution: \
                 {r_squared:.1}%)"
            )
        }
        RhetoricalPattern::ThresholdEffect => {
            let threshold = sample_threshold(rng);
            let beta = sample_threshold_beta(rng);
            format!(
                "{x} affects {y} only above the critical threshold (estimated at {threshold}th \
                 percentile of {x} distribution), with effect strength β = {beta:.3} above \
                 threshold"
            )
        }
        RhetoricalPattern::ModeratedRelationship => {
            // Resolution always yields at least one moderator.
            let moderator = display_name(&vars.moderators[rng.gen_range(0..vars.moderators.len())]);
            let main_effect = sample_main_effect(rng);
            let interaction = sample_interaction_effect(rng);
            format!(
                "The effect of {x} on {y} is moderated by {moderator} (β₁ = {main_effect:.3}, \
                 β₃ = {interaction:.3} for interaction term)"
            )
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Effect magnitude in standard deviations.
fn sample_magnitude<R: Rng>(rng: &mut R) -> f64 {
    round2(rng.gen_range(0.2..0.5))
}

/// Standardized coefficient for the direct-causation pattern.
fn sample_beta<R: Rng>(rng: &mut R) -> f64 {
    round3(rng.gen_range(0.2..0.8))
}

/// Critical percentile for the threshold pattern.
fn sample_threshold<R: Rng>(rng: &mut R) -> u32 {
    rng.gen_range(60..80)
}

/// Above-threshold effect strength.
fn sample_threshold_beta<R: Rng>(rng: &mut R) -> f64 {
    round3(rng.gen_range(0.4..1.0))
}

/// Main-effect coefficient for the moderated pattern.
fn sample_main_effect<R: Rng>(rng: &mut R) -> f64 {
    round3(rng.gen_range(0.4..0.8))
}

/// Interaction-term coefficient for the moderated pattern.
fn sample_interaction_effect<R: Rng>(rng: &mut R) -> f64 {
    round3(rng.gen_range(0.2..0.6))
}
