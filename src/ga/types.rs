//! Core trait definitions for the GA engine.
//!
//! [`GeneEncoding`] describes what a chromosome is made of and how its genes
//! are drawn and perturbed. [`FitnessEvaluator`] is the problem-specific side:
//! it scores individuals and decides when the search is done. Neither trait
//! provides the mandatory methods, so an "abstract" encoding or problem cannot
//! be constructed.

use super::individual::Individual;
use rand::{Rng, RngCore};
use std::fmt::Debug;
use std::sync::Arc;

/// Marker trait for gene values.
///
/// Blanket-implemented for any cloneable, comparable, thread-safe type,
/// so `bool`, `char`, `u8`, `f64` and user enums all work as genes.
pub trait Gene: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> Gene for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}

/// Generation and mutation policy of a chromosome kind.
///
/// An encoding is shared by every chromosome derived from the same source
/// (see [`SharedEncoding`]), so it is immutable once constructed.
///
/// # Implementing
///
/// ```
/// use rand::{Rng, RngCore};
/// use u_evolve::ga::GeneEncoding;
///
/// #[derive(Debug)]
/// struct Digits;
///
/// impl GeneEncoding for Digits {
///     type Gene = u8;
///     fn generate(&self, rng: &mut dyn RngCore) -> u8 {
///         rng.random_range(0..10)
///     }
///     fn is_valid(&self, gene: &u8) -> bool {
///         *gene < 10
///     }
/// }
/// ```
pub trait GeneEncoding: Debug + Send + Sync {
    /// The gene type stored in chromosomes of this kind.
    type Gene: Gene;

    /// Draws one fresh gene.
    fn generate(&self, rng: &mut dyn RngCore) -> Self::Gene;

    /// Produces the mutated form of one gene.
    ///
    /// The default regenerates the gene from scratch, which may yield the
    /// same value again. Kinds with a natural "flip" override this.
    fn mutate_gene(&self, _gene: &Self::Gene, rng: &mut dyn RngCore) -> Self::Gene {
        self.generate(rng)
    }

    /// Mutates a whole gene sequence.
    ///
    /// Each gene is replaced via [`mutate_gene`](Self::mutate_gene) with
    /// probability `rate`, independently of the others. A rate of `0.0`
    /// never touches a gene; a rate of `1.0` touches every gene.
    fn mutate(
        &self,
        genes: &[Self::Gene],
        rate: f64,
        rng: &mut dyn RngCore,
    ) -> Vec<Self::Gene> {
        genes
            .iter()
            .map(|gene| {
                if rng.random_range(0.0..1.0) < rate {
                    self.mutate_gene(gene, rng)
                } else {
                    gene.clone()
                }
            })
            .collect()
    }

    /// Whether `gene` belongs to this kind's alphabet.
    ///
    /// Unconstrained kinds accept everything.
    fn is_valid(&self, _gene: &Self::Gene) -> bool {
        true
    }

    /// Short name of the chromosome kind, used in errors and logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Reference-counted handle to an encoding.
///
/// Cloning the handle shares the policy; it never copies it.
pub type SharedEncoding<G> = Arc<dyn GeneEncoding<Gene = G>>;

/// Problem definition plugged into a [`Simulation`](super::Simulation).
///
/// `calculate_fitness` and `should_finish` are mandatory. The remaining
/// lifecycle methods default to no-ops.
///
/// Fitness is a plain `f64`; the optimization direction is chosen in
/// [`GaConfig`](super::GaConfig).
///
/// # Thread Safety
///
/// `FitnessEvaluator` must be `Send + Sync` because the simulation may
/// evaluate the population in parallel when the `parallel` feature is on.
pub trait FitnessEvaluator<G: Gene>: Send + Sync {
    /// Opaque payload handed to every fitness call (target phrase, data set, ...).
    ///
    /// Use `()` when the problem needs none.
    type Data: Send + Sync;

    /// Scores one individual.
    fn calculate_fitness(&self, individual: &Individual<G>, data: &Self::Data) -> f64;

    /// Whether the best individual of the current generation is good enough.
    fn should_finish(&self, top: &Individual<G>) -> bool;

    /// Runs once after the initial population is seeded.
    fn init(&mut self) {}

    /// Per-generation pre-step.
    ///
    /// Runs at the start of a generation unless it already returned `true`
    /// since the last [`reset`](Self::reset). Fitness is evaluated whatever
    /// it returns.
    fn update(&mut self) -> bool {
        true
    }

    /// Runs after a generation that did not finish the simulation.
    fn reset(&mut self) {}
}

/// Which end of the fitness scale is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Higher fitness is better.
    #[default]
    Maximize,
    /// Lower fitness is better.
    Minimize,
}

impl Direction {
    /// Orders two fitness values best-first.
    ///
    /// Incomparable values (NaN) compare as equal.
    pub fn compare(self, a: f64, b: f64) -> std::cmp::Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal);
        match self {
            Direction::Maximize => ord.reverse(),
            Direction::Minimize => ord,
        }
    }
}
