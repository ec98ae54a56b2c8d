//! Fixed-length gene sequences.
//!
//! A [`Chromosome`] separates its *shape and policy* (length plus a shared
//! [`GeneEncoding`]) from its *state* (the genes). Copies share the policy
//! and own their genes, which lets the simulation clone structure without
//! cloning values.

use super::types::{Gene, GeneEncoding, SharedEncoding};
use crate::error::GeneticError;
use rand::Rng;
use std::sync::Arc;

/// A typed gene sequence with a shared generation/mutation policy.
///
/// The length is fixed at construction; every copy keeps it.
#[derive(Debug, Clone)]
pub struct Chromosome<G: Gene> {
    encoding: SharedEncoding<G>,
    genes: Vec<G>,
}

impl<G: Gene> Chromosome<G> {
    /// Builds a chromosome from explicit genes.
    ///
    /// # Errors
    /// [`GeneticError::InvalidGene`] if a gene is outside the encoding's
    /// alphabet.
    pub fn from_genes<E>(encoding: E, genes: Vec<G>) -> Result<Self, GeneticError>
    where
        E: GeneEncoding<Gene = G> + 'static,
    {
        let encoding: SharedEncoding<G> = Arc::new(encoding);
        validate(encoding.as_ref(), &genes)?;
        Ok(Self { encoding, genes })
    }

    /// Builds a chromosome of `length` genes, each drawn independently.
    pub fn from_length<E, R>(encoding: E, length: usize, rng: &mut R) -> Self
    where
        E: GeneEncoding<Gene = G> + 'static,
        R: Rng,
    {
        let encoding: SharedEncoding<G> = Arc::new(encoding);
        let genes = fill(encoding.as_ref(), length, rng);
        Self { encoding, genes }
    }

    /// Same policy, supplied genes. The receiver is left untouched.
    ///
    /// # Errors
    /// [`GeneticError::LengthMismatch`] if `genes.len() != self.len()`;
    /// [`GeneticError::InvalidGene`] for genes outside the alphabet.
    pub fn copy_with_genes(&self, genes: Vec<G>) -> Result<Self, GeneticError> {
        if genes.len() != self.genes.len() {
            return Err(GeneticError::LengthMismatch {
                expected: self.genes.len(),
                actual: genes.len(),
            });
        }
        validate(self.encoding.as_ref(), &genes)?;
        Ok(Self {
            encoding: Arc::clone(&self.encoding),
            genes,
        })
    }

    /// Same policy and length, freshly generated genes.
    ///
    /// The receiver's genes play no part in the result.
    pub fn create_random_copy<R: Rng>(&self, rng: &mut R) -> Self {
        Self {
            encoding: Arc::clone(&self.encoding),
            genes: fill(self.encoding.as_ref(), self.genes.len(), rng),
        }
    }

    /// Returns a mutated copy, each gene perturbed with probability `rate`.
    ///
    /// # Errors
    /// Propagates [`copy_with_genes`](Self::copy_with_genes) failures when a
    /// custom encoding changes the length or leaves the alphabet.
    pub fn mutated<R: Rng>(&self, rate: f64, rng: &mut R) -> Result<Self, GeneticError> {
        let genes = self.encoding.mutate(&self.genes, rate, rng);
        self.copy_with_genes(genes)
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    pub fn into_genes(self) -> Vec<G> {
        self.genes
    }

    /// The shared policy.
    pub fn encoding(&self) -> &SharedEncoding<G> {
        &self.encoding
    }

    /// Whether both chromosomes use the very same policy instance.
    pub fn shares_encoding(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.encoding, &other.encoding)
    }
}

fn fill<G: Gene, R: Rng>(
    encoding: &dyn GeneEncoding<Gene = G>,
    length: usize,
    rng: &mut R,
) -> Vec<G> {
    (0..length).map(|_| encoding.generate(&mut *rng)).collect()
}

fn validate<G: Gene>(
    encoding: &dyn GeneEncoding<Gene = G>,
    genes: &[G],
) -> Result<(), GeneticError> {
    match genes.iter().position(|g| !encoding.is_valid(g)) {
        Some(position) => Err(GeneticError::InvalidGene {
            encoding: encoding.name().to_string(),
            position,
            gene: format!("{:?}", genes[position]),
        }),
        None => Ok(()),
    }
}
