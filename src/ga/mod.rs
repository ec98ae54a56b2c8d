//! Genetic Algorithm engine.
//!
//! A generic GA over typed gene sequences. Users describe a gene alphabet
//! with a [`GeneEncoding`], assemble a prototype [`Individual`] from
//! [`Chromosome`]s, and plug their problem in through [`FitnessEvaluator`].
//! [`Simulation`] then runs the generational loop.
//!
//! # Core Traits
//!
//! - [`GeneEncoding`]: How genes of one chromosome kind are drawn and mutated
//! - [`FitnessEvaluator`]: Problem definition (fitness, termination, lifecycle)
//!
//! # Key Types
//!
//! - [`Chromosome`]: Gene sequence tied to a shared encoding
//! - [`Individual`]: Ordered list of chromosomes (the DNA) plus fitness
//! - [`GaConfig`]: Algorithm parameters (population size, strategies, rates)
//! - [`Simulation`]: The generational state machine, built via [`SimulationBuilder`]
//! - [`SimulationResult`]: Outcome of a run
//!
//! # Submodules
//!
//! - [`operators`]: One-point, multi-point and uniform crossover; per-gene mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Baker (1987), *Reducing Bias and Inefficiency in the Selection Algorithm*

mod chromosome;
mod config;
mod encoding;
mod individual;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use chromosome::Chromosome;
pub use config::GaConfig;
pub use encoding::{AlphabetEncoding, BinaryEncoding, FnEncoding};
pub use individual::Individual;
pub use operators::{crossover, mutate, Crossover};
pub use runner::{
    Hook, Phase, Simulation, SimulationBuilder, SimulationResult, Snapshot, StopHandle,
};
pub use selection::{Selection, Wheel};
pub use types::{Direction, FitnessEvaluator, Gene, GeneEncoding, SharedEncoding};
