//! Error types.
//!
//! Every error here is a programmer or configuration mistake. Nothing is
//! retried; errors surface at the call that detected them and a failure in
//! the middle of a generation aborts the run.

/// Invalid simulation setup, reported at build time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("a prototype individual is required")]
    MissingPrototype,
    #[error("the prototype individual has no chromosomes")]
    EmptyPrototype,
    #[error("unknown selection strategy `{0}`")]
    UnknownSelection(String),
    #[error("unknown crossover strategy `{0}`")]
    UnknownCrossover(String),
    #[error("an alphabet encoding needs at least one symbol")]
    EmptyAlphabet,
    #[error("population_size must be at least 1")]
    PopulationTooSmall,
    #[error("max_generations must be at least 1")]
    ZeroGenerations,
    #[error("num_parents must be at least 1")]
    NoParents,
    #[error("elitism with num_parents >= population_size leaves no room for children")]
    ElitesFillPopulation,
}

/// Errors raised by genome construction and the genetic operators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneticError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A gene sequence does not match the chromosome's length.
    #[error("expected {expected} genes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A gene falls outside the alphabet of an alphabet-constrained encoding.
    #[error("gene {gene} at position {position} is not in the `{encoding}` alphabet")]
    InvalidGene {
        encoding: String,
        position: usize,
        gene: String,
    },

    /// Crossover parents carry a different number of chromosomes.
    #[error("crossover parents have {left} and {right} chromosomes")]
    LocusMismatch { left: usize, right: usize },

    #[error("no chromosome at locus {index} (genome has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
