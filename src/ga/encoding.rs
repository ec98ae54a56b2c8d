//! Built-in chromosome kinds.
//!
//! - [`BinaryEncoding`]: bit strings, mutated by flipping
//! - [`AlphabetEncoding`]: genes drawn from a fixed symbol set
//! - [`FnEncoding`]: generation and mutation supplied as closures

use super::types::{Gene, GeneEncoding};
use crate::error::ConfigError;
use rand::{Rng, RngCore};
use std::fmt;

/// Bit-string genes. Generation is a fair coin; mutation flips the bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryEncoding;

impl GeneEncoding for BinaryEncoding {
    type Gene = bool;

    fn generate(&self, rng: &mut dyn RngCore) -> bool {
        rng.random_bool(0.5)
    }

    fn mutate_gene(&self, gene: &bool, _rng: &mut dyn RngCore) -> bool {
        !gene
    }

    fn name(&self) -> &str {
        "binary"
    }
}

/// Genes drawn uniformly from a fixed, non-empty alphabet.
///
/// Chromosomes built from explicit genes reject symbols outside the alphabet.
///
/// ```
/// use u_evolve::ga::AlphabetEncoding;
///
/// let letters = AlphabetEncoding::from_chars("abcdefghijklmnopqrstuvwxyz ").unwrap();
/// assert_eq!(letters.symbols().len(), 27);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AlphabetEncoding<G> {
    symbols: Vec<G>,
}

impl<G: Gene> AlphabetEncoding<G> {
    /// Creates an encoding over `symbols`.
    pub fn new(symbols: Vec<G>) -> Result<Self, ConfigError> {
        if symbols.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(Self { symbols })
    }

    /// The alphabet, in declaration order.
    pub fn symbols(&self) -> &[G] {
        &self.symbols
    }
}

impl AlphabetEncoding<char> {
    /// Alphabet of the characters of `charset`.
    pub fn from_chars(charset: &str) -> Result<Self, ConfigError> {
        Self::new(charset.chars().collect())
    }
}

impl<G: Gene> GeneEncoding for AlphabetEncoding<G> {
    type Gene = G;

    fn generate(&self, rng: &mut dyn RngCore) -> G {
        self.symbols[rng.random_range(0..self.symbols.len())].clone()
    }

    fn is_valid(&self, gene: &G) -> bool {
        self.symbols.contains(gene)
    }

    fn name(&self) -> &str {
        "alphabet"
    }
}

type GenerateFn<G> = Box<dyn Fn(&mut dyn RngCore) -> G + Send + Sync>;
type MutateFn<G> = Box<dyn Fn(&G, &mut dyn RngCore) -> G + Send + Sync>;

/// Encoding assembled from closures.
///
/// Without [`with_mutation`](Self::with_mutation), a mutated gene is simply
/// regenerated.
///
/// ```
/// use rand::Rng;
/// use u_evolve::ga::FnEncoding;
///
/// let weights = FnEncoding::new(|rng| rng.random_range(-1.0..1.0))
///     .with_mutation(|w: &f64, rng| w + rng.random_range(-0.1..0.1));
/// ```
pub struct FnEncoding<G> {
    generate: GenerateFn<G>,
    mutate: Option<MutateFn<G>>,
}

impl<G: Gene> FnEncoding<G> {
    /// Encoding whose genes come from `generate`.
    pub fn new<F>(generate: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> G + Send + Sync + 'static,
    {
        Self {
            generate: Box::new(generate),
            mutate: None,
        }
    }

    /// Replaces the per-gene mutation.
    pub fn with_mutation<M>(mut self, mutate: M) -> Self
    where
        M: Fn(&G, &mut dyn RngCore) -> G + Send + Sync + 'static,
    {
        self.mutate = Some(Box::new(mutate));
        self
    }
}

impl<G> fmt::Debug for FnEncoding<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEncoding")
            .field("custom_mutation", &self.mutate.is_some())
            .finish()
    }
}

impl<G: Gene> GeneEncoding for FnEncoding<G> {
    type Gene = G;

    fn generate(&self, rng: &mut dyn RngCore) -> G {
        (self.generate)(rng)
    }

    fn mutate_gene(&self, gene: &G, rng: &mut dyn RngCore) -> G {
        match &self.mutate {
            Some(mutate) => mutate(gene, rng),
            None => (self.generate)(rng),
        }
    }

    fn name(&self) -> &str {
        "fn"
    }
}
