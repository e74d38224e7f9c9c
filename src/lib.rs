//! Causal conjecture engine for social-science theories.
//!
//! This crate provides:
//! - A curated knowledge base of theory schemas (constructs plus signed
//!   causal patterns), loadable from JSON
//! - Variable resolution with a procedural fallback for unknown theories
//! - A generator that renders hypothesis sentences in three rhetorical
//!   patterns with synthetic statistics
//! - Per-instance relationship memory guaranteeing that repeated
//!   conjectures never contradict each other
//!
//! Generated sentences are internally consistent, not scientifically
//! validated.
//!
//! # Quick Start
//!
//! ```
//! use conjecture_core::{ConjectureGenerator, TheoryKnowledgeBase};
//!
//! # fn main() -> Result<(), conjecture_core::ConjectureError> {
//! let kb = TheoryKnowledgeBase::builtin();
//! let mut generator = ConjectureGenerator::new(kb);
//!
//! let conjecture = generator
//!     .generate("direct_causation", "relative deprivation")?
//!     .expect("first draw on a fresh instance never conflicts");
//! println!("{conjecture}");
//!
//! let metadata = generator.metadata();
//! assert!(metadata.schema_enhanced);
//! # Ok(())
//! # }
//! ```

pub mod generator;
pub mod pattern;
pub mod schema;
pub mod variables;

// Primary public API
pub use generator::{Conjecture, ConjectureError, ConjectureGenerator, MetadataSnapshot, Relation};
pub use pattern::{PatternError, RhetoricalPattern};
pub use schema::{CausalPattern, Construct, SchemaError, Sign, TheoryKnowledgeBase, TheorySchema};
pub use variables::{ResolutionPath, VariableSet};
