//! Recombination and mutation operators.
//!
//! Both operators work locus by locus: the chromosome at index `i` of a child
//! comes only from the chromosomes at index `i` of its parents, and keeps
//! parent one's encoding.
//!
//! # Crossover Operators
//!
//! - [`Crossover::OnePoint`]: head from parent one, tail from parent two
//! - [`Crossover::MultiPoint`]: a middle segment from parent two
//! - [`Crossover::Uniform`]: every gene decided by its own coin
//!
//! The kernels [`one_point`], [`two_point`] and [`uniform`] take their cut
//! points or probabilities as arguments, so they are fully deterministic.
//!
//! # Mutation
//!
//! [`mutate`] applies each chromosome's own encoding policy at a per-gene
//! rate.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use super::individual::Individual;
use super::types::Gene;
use crate::error::{ConfigError, GeneticError};
use crate::random::{rand_between, unit};
use rand::Rng;
use std::str::FromStr;

// ============================================================================
// Crossover
// ============================================================================

/// Recombination strategy applied to each pair of parent chromosomes.
///
/// ```
/// use u_evolve::ga::Crossover;
///
/// let c: Crossover = "multipoint".parse().unwrap();
/// assert_eq!(c, Crossover::MultiPoint);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Crossover {
    /// Cut point `p` drawn from `[0, len)`; genes before `p` come from parent one.
    #[default]
    OnePoint,

    /// Two cut points `p1` from `[0, len)` and `p2` from `[p1, len)`; genes in
    /// `[p1, p2)` come from parent two, the rest from parent one.
    MultiPoint,

    /// One uniform draw per gene; below `0.5` takes parent one's gene.
    Uniform,
}

impl FromStr for Crossover {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onepoint" | "one_point" => Ok(Crossover::OnePoint),
            "multipoint" | "multi_point" | "twopoint" => Ok(Crossover::MultiPoint),
            "uniform" => Ok(Crossover::Uniform),
            other => Err(ConfigError::UnknownCrossover(other.to_string())),
        }
    }
}

impl Crossover {
    /// Combines two equal-length gene sequences, drawing cut points or
    /// probabilities from `rng`.
    pub fn recombine<G: Gene, R: Rng>(&self, one: &[G], two: &[G], rng: &mut R) -> Vec<G> {
        let n = one.len();
        match self {
            Crossover::OnePoint => {
                let point = rand_between(rng, 0, n);
                one_point(one, two, point)
            }
            Crossover::MultiPoint => {
                let p1 = rand_between(rng, 0, n);
                let p2 = rand_between(rng, p1, n);
                two_point(one, two, p1, p2)
            }
            Crossover::Uniform => {
                let probabilities: Vec<f64> = (0..n).map(|_| unit(rng)).collect();
                uniform(one, two, &probabilities)
            }
        }
    }
}

/// Gene `i` comes from `one` when `i < point`, otherwise from `two`.
///
/// ```
/// use u_evolve::ga::operators::one_point;
///
/// assert_eq!(one_point(&['A'; 4], &['B'; 4], 2), vec!['A', 'A', 'B', 'B']);
/// ```
pub fn one_point<G: Clone>(one: &[G], two: &[G], point: usize) -> Vec<G> {
    one.iter()
        .zip(two)
        .enumerate()
        .map(|(i, (a, b))| if i < point { a.clone() } else { b.clone() })
        .collect()
}

/// Gene `i` comes from `two` when `p1 <= i < p2`, otherwise from `one`.
pub fn two_point<G: Clone>(one: &[G], two: &[G], p1: usize, p2: usize) -> Vec<G> {
    one.iter()
        .zip(two)
        .enumerate()
        .map(|(i, (a, b))| {
            if p1 <= i && i < p2 {
                b.clone()
            } else {
                a.clone()
            }
        })
        .collect()
}

/// Gene `i` comes from `one` when `probabilities[i] < 0.5`, otherwise from `two`.
///
/// Positions without a probability are taken from `two`.
pub fn uniform<G: Clone>(one: &[G], two: &[G], probabilities: &[f64]) -> Vec<G> {
    one.iter()
        .zip(two)
        .enumerate()
        .map(|(i, (a, b))| match probabilities.get(i) {
            Some(&p) if p < 0.5 => a.clone(),
            _ => b.clone(),
        })
        .collect()
}

/// Produces one child from two parents, locus by locus.
///
/// The child has fitness `0.0` and each of its chromosomes shares the
/// encoding of parent one's chromosome at the same locus.
///
/// # Errors
/// - [`GeneticError::LocusMismatch`] if the parents have different
///   chromosome counts
/// - [`GeneticError::LengthMismatch`] if two chromosomes at the same locus
///   differ in length
pub fn crossover<G: Gene, R: Rng>(
    parent_one: &Individual<G>,
    parent_two: &Individual<G>,
    strategy: Crossover,
    rng: &mut R,
) -> Result<Individual<G>, GeneticError> {
    if parent_one.locus_count() != parent_two.locus_count() {
        return Err(GeneticError::LocusMismatch {
            left: parent_one.locus_count(),
            right: parent_two.locus_count(),
        });
    }

    let dna = parent_one
        .dna()
        .iter()
        .zip(parent_two.dna())
        .map(|(one, two)| {
            if one.len() != two.len() {
                return Err(GeneticError::LengthMismatch {
                    expected: one.len(),
                    actual: two.len(),
                });
            }
            let genes = strategy.recombine(one.genes(), two.genes(), rng);
            one.copy_with_genes(genes)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Individual::with_dna(dna))
}

// ============================================================================
// Mutation
// ============================================================================

/// Mutates every chromosome of `individual` in place.
///
/// Each gene is perturbed with probability `rate` (clamped to `[0, 1]`)
/// using the chromosome's own encoding. `rate = 0.0` leaves the genome
/// untouched; `rate = 1.0` perturbs every gene.
///
/// # Errors
/// Propagates [`Chromosome::copy_with_genes`](super::Chromosome::copy_with_genes)
/// failures from misbehaving custom encodings.
pub fn mutate<G: Gene, R: Rng>(
    individual: &mut Individual<G>,
    rate: f64,
    rng: &mut R,
) -> Result<(), GeneticError> {
    let rate = rate.clamp(0.0, 1.0);
    for chromosome in individual.dna_mut() {
        *chromosome = chromosome.mutated(rate, rng)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
