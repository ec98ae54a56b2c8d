//! Generic genetic-algorithm engine.
//!
//! Evolves populations of individuals whose DNA is a list of typed
//! chromosomes. The crate supplies the machinery; problems supply the
//! fitness function:
//!
//! - **Encodings**: binary, finite-alphabet and closure-defined gene kinds,
//!   shared between every chromosome copied from the same source.
//! - **Selection**: roulette-wheel and stochastic universal sampling over
//!   a cumulative fitness distribution.
//! - **Recombination**: one-point, multi-point (two cuts) and uniform
//!   crossover, plus per-gene mutation.
//! - **Simulation**: a steppable generational loop with observer hooks,
//!   optional elitism, history and cooperative cancellation.
//!
//! # Example
//!
//! ```
//! use u_evolve::ga::{
//!     AlphabetEncoding, Chromosome, FitnessEvaluator, GaConfig, Individual, Simulation,
//! };
//! use u_evolve::random::create_rng;
//!
//! struct Phrase;
//!
//! impl FitnessEvaluator<char> for Phrase {
//!     type Data = String;
//!
//!     fn calculate_fitness(&self, ind: &Individual<char>, target: &String) -> f64 {
//!         ind[0].genes().iter().zip(target.chars()).filter(|(a, b)| **a == *b).count() as f64
//!     }
//!
//!     fn should_finish(&self, top: &Individual<char>) -> bool {
//!         top.fitness() as usize == top[0].len()
//!     }
//! }
//!
//! let encoding = AlphabetEncoding::from_chars("abc").unwrap();
//! let mut prototype = Individual::new();
//! prototype.add_chromosome(Chromosome::from_length(encoding, 3, &mut create_rng(0)));
//!
//! let config = GaConfig::default()
//!     .with_population_size(40)
//!     .with_max_generations(100)
//!     .with_elitism(true)
//!     .with_seed(11);
//! let mut sim = Simulation::builder(Phrase, "cab".to_string())
//!     .prototype(prototype)
//!     .config(config)
//!     .build()
//!     .unwrap();
//! let result = sim.run().unwrap();
//! assert!(result.top.is_some());
//! ```

pub mod error;
pub mod ga;
pub mod random;

pub use error::{ConfigError, GeneticError};
