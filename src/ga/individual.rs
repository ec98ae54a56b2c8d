//! Candidate solutions.
//!
//! An [`Individual`] is an ordered list of chromosomes (one per locus) and a
//! fitness score. The DNA is always a sequence; a single-chromosome genome is
//! read as `individual[0]`.

use super::chromosome::Chromosome;
use super::types::Gene;
use crate::error::GeneticError;
use rand::Rng;
use std::ops::Index;

/// One candidate solution: a multi-locus genome plus its fitness.
///
/// Fitness starts at `0.0` and is written only by the simulation's fitness
/// evaluation.
#[derive(Debug, Clone)]
pub struct Individual<G: Gene> {
    dna: Vec<Chromosome<G>>,
    fitness: f64,
}

impl<G: Gene> Default for Individual<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Gene> Individual<G> {
    /// An individual with no chromosomes.
    pub fn new() -> Self {
        Self::with_dna(Vec::new())
    }

    pub fn with_dna(dna: Vec<Chromosome<G>>) -> Self {
        Self { dna, fitness: 0.0 }
    }

    /// Appends a chromosome at the next locus.
    pub fn add_chromosome(&mut self, chromosome: Chromosome<G>) {
        self.dna.push(chromosome);
    }

    pub fn dna(&self) -> &[Chromosome<G>] {
        &self.dna
    }

    pub(crate) fn dna_mut(&mut self) -> &mut [Chromosome<G>] {
        &mut self.dna
    }

    /// Number of chromosomes.
    pub fn locus_count(&self) -> usize {
        self.dna.len()
    }

    pub fn chromosome(&self, index: usize) -> Option<&Chromosome<G>> {
        self.dna.get(index)
    }

    /// Genes of the chromosome at locus `index`.
    ///
    /// # Errors
    /// [`GeneticError::IndexOutOfRange`] if there is no such locus.
    pub fn genes(&self, index: usize) -> Result<&[G], GeneticError> {
        self.dna
            .get(index)
            .map(Chromosome::genes)
            .ok_or(GeneticError::IndexOutOfRange {
                index,
                len: self.dna.len(),
            })
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// A new individual with the same genome shape and fresh random genes.
    ///
    /// Every chromosome of the result is newly allocated via
    /// [`Chromosome::create_random_copy`], keeps its locus's encoding, and the
    /// fitness is reset to `0.0`. Used to seed the initial population from a
    /// prototype.
    pub fn random_likeness<R: Rng>(&self, rng: &mut R) -> Self {
        Self::with_dna(
            self.dna
                .iter()
                .map(|chromosome| chromosome.create_random_copy(rng))
                .collect(),
        )
    }
}

impl<G: Gene> Index<usize> for Individual<G> {
    type Output = Chromosome<G>;

    fn index(&self, index: usize) -> &Chromosome<G> {
        &self.dna[index]
    }
}
