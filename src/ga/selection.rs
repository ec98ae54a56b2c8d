//! Selection strategies for the GA.
//!
//! Selection determines which individuals become parents. Both strategies
//! here are fitness-proportionate and share one structure, the [`Wheel`]:
//! a non-decreasing cumulative distribution over the population that ends
//! at exactly `1.0`.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)
//! - Baker (1987), "Reducing Bias and Inefficiency in the Selection
//!   Algorithm" (stochastic universal sampling)

use super::individual::Individual;
use super::types::{Direction, Gene};
use crate::error::ConfigError;
use crate::random::unit;
use rand::Rng;
use std::str::FromStr;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::Selection;
///
/// let sel: Selection = "sus".parse().unwrap();
/// assert_eq!(sel, Selection::StochasticUniversal);
/// assert!("tournament".parse::<Selection>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selection {
    /// Fitness-proportionate selection with one independent spin per parent.
    ///
    /// # Complexity
    /// O(n) to build the wheel, O(log n) per parent
    #[default]
    RouletteWheel,

    /// Stochastic universal sampling: one spin, `count` evenly spaced pointers.
    ///
    /// Same expected counts as the roulette wheel with lower variance; an
    /// individual holding share `p` is picked `floor(p·count)` or
    /// `ceil(p·count)` times.
    ///
    /// # Complexity
    /// O(n) to build the wheel, O(log n) per parent
    StochasticUniversal,
}

impl FromStr for Selection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rws" | "roulette" | "roulette_wheel" => Ok(Selection::RouletteWheel),
            "sus" | "stochastic_universal" => Ok(Selection::StochasticUniversal),
            other => Err(ConfigError::UnknownSelection(other.to_string())),
        }
    }
}

impl Selection {
    /// Selects `count` parents. The same individual may appear more than once.
    ///
    /// Returns an empty vector for an empty population.
    pub fn select<'a, G: Gene, R: Rng>(
        &self,
        population: &'a [Individual<G>],
        count: usize,
        direction: Direction,
        rng: &mut R,
    ) -> Vec<&'a Individual<G>> {
        self.select_indices(population, count, direction, rng)
            .into_iter()
            .map(|i| &population[i])
            .collect()
    }

    /// Like [`select`](Self::select), returning population indices.
    pub fn select_indices<G: Gene, R: Rng>(
        &self,
        population: &[Individual<G>],
        count: usize,
        direction: Direction,
        rng: &mut R,
    ) -> Vec<usize> {
        if population.is_empty() || count == 0 {
            return Vec::new();
        }

        let wheel = Wheel::from_population(population, direction);
        match self {
            Selection::RouletteWheel => roulette(&wheel, count, rng),
            Selection::StochasticUniversal => stochastic_universal(&wheel, count, rng),
        }
    }
}

/// Independent spins.
fn roulette<R: Rng>(wheel: &Wheel, count: usize, rng: &mut R) -> Vec<usize> {
    (0..count).map(|_| wheel.index_of(unit(rng))).collect()
}

/// Evenly spaced pointers from a single random offset in `[0, 1/count)`.
fn stochastic_universal<R: Rng>(wheel: &Wheel, count: usize, rng: &mut R) -> Vec<usize> {
    let spacing = 1.0 / count as f64;
    let start = rng.random_range(0.0..spacing);
    (0..count)
        .map(|i| wheel.index_of(start + i as f64 * spacing))
        .collect()
}

/// Cumulative selection probabilities.
///
/// Slot `i` owns the half-open interval `[cumulative[i-1], cumulative[i])`
/// (with `cumulative[-1] = 0`), so a slot with zero weight owns nothing and
/// can never be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Wheel {
    cumulative: Vec<f64>,
}

impl Wheel {
    /// Builds a wheel from raw weights.
    ///
    /// Negative and NaN weights count as zero. Infinite weights share the
    /// whole wheel between them. When the total weight is zero, every slot
    /// gets the same share.
    pub fn from_weights(weights: &[f64]) -> Self {
        let n = weights.len();
        let mut weights: Vec<f64> = weights
            .iter()
            .map(|&w| if w > 0.0 { w } else { 0.0 })
            .collect();

        if weights.iter().any(|w| w.is_infinite()) {
            for w in &mut weights {
                *w = if w.is_infinite() { 1.0 } else { 0.0 };
            }
        } else {
            // Scale by the largest weight so the sum cannot overflow.
            let max = weights.iter().cloned().fold(0.0, f64::max);
            if max > 0.0 {
                for w in &mut weights {
                    *w /= max;
                }
            }
        }
        let total: f64 = weights.iter().sum();

        if n == 0 {
            return Self {
                cumulative: Vec::new(),
            };
        }

        if !(total > 0.0 && total.is_finite()) {
            return Self {
                cumulative: (1..=n).map(|i| i as f64 / n as f64).collect(),
            };
        }

        let mut acc = 0.0;
        let mut cumulative: Vec<f64> = weights
            .iter()
            .map(|w| {
                acc += w / total;
                f64::min(acc, 1.0)
            })
            .collect();

        // Absorb rounding: everything from the last weighted slot on is 1.0.
        if let Some(last) = weights.iter().rposition(|&w| w > 0.0) {
            for c in &mut cumulative[last..] {
                *c = 1.0;
            }
        }

        Self { cumulative }
    }

    /// Builds the wheel for a population.
    ///
    /// When maximizing, weights are the raw fitness values. When minimizing,
    /// weights are `max - f + ε`, so the lowest fitness gets the most mass and
    /// even the worst individual keeps a sliver.
    pub fn from_population<G: Gene>(population: &[Individual<G>], direction: Direction) -> Self {
        let fitnesses: Vec<f64> = population.iter().map(Individual::fitness).collect();

        match direction {
            Direction::Maximize => Self::from_weights(&fitnesses),
            Direction::Minimize => {
                let max_fitness = fitnesses
                    .iter()
                    .cloned()
                    .filter(|f| f.is_finite())
                    .fold(f64::NEG_INFINITY, f64::max);
                let epsilon = 1e-10;
                let weights: Vec<f64> = fitnesses
                    .iter()
                    .map(|&f| max_fitness - f + epsilon)
                    .collect();
                Self::from_weights(&weights)
            }
        }
    }

    /// Slot owning `draw`, a value in `[0, 1)`.
    ///
    /// Binary search for the first slot whose cumulative value exceeds the
    /// draw. Draws at or past `1.0` land in the last slot.
    pub fn index_of(&self, draw: f64) -> usize {
        self.cumulative
            .partition_point(|&c| c <= draw)
            .min(self.cumulative.len().saturating_sub(1))
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn make_population(fitnesses: &[f64]) -> Vec<Individual<bool>> {
        fitnesses
            .iter()
            .map(|&f| {
                let mut ind = Individual::new();
                ind.set_fitness(f);
                ind
            })
            .collect()
    }

    fn counts(indices: &[usize], n: usize) -> Vec<u32> {
        let mut counts = vec![0u32; n];
        for &i in indices {
            counts[i] += 1;
        }
        counts
    }

    #[test]
    fn test_wheel_is_prefix_sum() {
        let wheel = Wheel::from_weights(&[1.0, 1.0, 2.0]);
        let c = wheel.cumulative();
        assert!((c[0] - 0.25).abs() < 1e-12);
        assert!((c[1] - 0.5).abs() < 1e-12);
        assert_eq!(c[2], 1.0);
    }

    #[test]
    fn test_wheel_infinite_weight_takes_all_mass() {
        let wheel = Wheel::from_weights(&[1.0, f64::INFINITY, 1.0]);
        assert_eq!(wheel.cumulative(), &[0.0, 1.0, 1.0]);
        for draw in [0.0, 0.3, 0.999] {
            assert_eq!(wheel.index_of(draw), 1);
        }

        let wheel = Wheel::from_weights(&[f64::INFINITY, 2.0, f64::INFINITY]);
        assert_eq!(wheel.cumulative(), &[0.5, 0.5, 1.0]);
        assert_eq!(wheel.index_of(0.2), 0);
        assert_eq!(wheel.index_of(0.7), 2);
    }

    #[test]
    fn test_wheel_huge_finite_weights_do_not_overflow() {
        let wheel = Wheel::from_weights(&[f64::MAX, f64::MAX, 0.0]);
        let c = wheel.cumulative();
        assert!((c[0] - 0.5).abs() < 1e-12);
        assert_eq!(c[1], 1.0);
        assert_eq!(c[2], 1.0);
    }

    #[test]
    fn test_wheel_uniform_fitness_evenly_spaced() {
        let wheel = Wheel::from_weights(&[3.0; 4]);
        for (i, &c) in wheel.cumulative().iter().enumerate() {
            assert!((c - (i + 1) as f64 / 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_wheel_zero_total_falls_back_to_uniform() {
        let wheel = Wheel::from_weights(&[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(wheel.cumulative(), &[0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_wheel_negative_weights_clamped() {
        let wheel = Wheel::from_weights(&[-5.0, 2.0, 2.0]);
        assert_eq!(wheel.cumulative()[0], 0.0);
        assert_eq!(wheel.index_of(0.0), 1);
    }

    #[test]
    fn test_index_of_boundaries() {
        let wheel = Wheel::from_weights(&[1.0, 1.0, 2.0]);
        assert_eq!(wheel.index_of(0.0), 0);
        assert_eq!(wheel.index_of(0.2499), 0);
        assert_eq!(wheel.index_of(0.25), 1);
        assert_eq!(wheel.index_of(0.75), 2);
        assert_eq!(wheel.index_of(0.999_999), 2);
        assert_eq!(wheel.index_of(1.0), 2);
    }

    #[test]
    fn test_zero_weight_slot_never_drawn() {
        let wheel = Wheel::from_weights(&[1.0, 0.0, 1.0, 0.0]);
        for k in 0..1000 {
            let idx = wheel.index_of(k as f64 / 1000.0);
            assert!(idx == 0 || idx == 2, "drew empty slot {idx}");
        }
    }

    #[test]
    fn test_roulette_all_zero_fitness_is_uniform() {
        let pop = make_population(&[0.0, 0.0, 0.0, 0.0]);
        let mut rng = create_rng(42);

        let picks =
            Selection::RouletteWheel.select_indices(&pop, 10000, Direction::Maximize, &mut rng);
        assert_eq!(picks.len(), 10000);
        for &c in &counts(&picks, 4) {
            assert!(c > 2000, "expected roughly uniform, got {c}");
        }
    }

    #[test]
    fn test_roulette_proportional_to_fitness() {
        let pop = make_population(&[1.0, 3.0]);
        let mut rng = create_rng(42);

        let picks =
            Selection::RouletteWheel.select_indices(&pop, 10000, Direction::Maximize, &mut rng);
        let c = counts(&picks, 2);
        assert!((6800..8200).contains(&c[1]), "expected ~75% for index 1, got {c:?}");
    }

    #[test]
    fn test_roulette_dominant_individual() {
        let pop = make_population(&[0.0, 0.0, 100.0, 0.0]);
        let mut rng = create_rng(7);

        let picks =
            Selection::RouletteWheel.select_indices(&pop, 500, Direction::Maximize, &mut rng);
        assert!(picks.iter().all(|&i| i == 2));
    }

    #[test]
    fn test_roulette_minimize_favors_low_fitness() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let mut rng = create_rng(42);

        let picks =
            Selection::RouletteWheel.select_indices(&pop, 10000, Direction::Minimize, &mut rng);
        let c = counts(&picks, 4);
        assert!(c[2] > c[1] && c[1] > c[3] && c[3] > c[0], "got {c:?}");
    }

    #[test]
    fn test_sus_uniform_fitness_picks_each_once() {
        let pop = make_population(&[2.0; 5]);
        let mut rng = create_rng(11);

        for _ in 0..50 {
            let mut picks = Selection::StochasticUniversal.select_indices(
                &pop,
                5,
                Direction::Maximize,
                &mut rng,
            );
            picks.sort_unstable();
            assert_eq!(picks, vec![0, 1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_sus_dominant_individual() {
        let pop = make_population(&[0.0, 9.0, 0.0]);
        let mut rng = create_rng(3);

        let picks =
            Selection::StochasticUniversal.select_indices(&pop, 10, Direction::Maximize, &mut rng);
        assert_eq!(picks, vec![1; 10]);
    }

    #[test]
    fn test_sus_counts_bounded_by_expectation() {
        // Shares 0.1, 0.2, 0.3, 0.4 with 10 pointers: expected 1, 2, 3, 4.
        let pop = make_population(&[1.0, 2.0, 3.0, 4.0]);
        let mut rng = create_rng(5);

        for _ in 0..100 {
            let picks = Selection::StochasticUniversal.select_indices(
                &pop,
                10,
                Direction::Maximize,
                &mut rng,
            );
            let c = counts(&picks, 4);
            for (i, &expected) in [1u32, 2, 3, 4].iter().enumerate() {
                assert!(c[i] + 1 >= expected && c[i] <= expected + 1, "got {c:?}");
            }
        }
    }

    #[test]
    fn test_select_returns_population_members() {
        let pop = make_population(&[1.0, 2.0, 3.0]);
        let mut rng = create_rng(9);

        let parents = Selection::RouletteWheel.select(&pop, 6, Direction::Maximize, &mut rng);
        assert_eq!(parents.len(), 6);
        for p in parents {
            assert!(pop.iter().any(|ind| std::ptr::eq(ind, p)));
        }
    }

    #[test]
    fn test_empty_population_or_zero_count() {
        let empty: Vec<Individual<bool>> = Vec::new();
        let mut rng = create_rng(1);
        assert!(Selection::RouletteWheel
            .select(&empty, 3, Direction::Maximize, &mut rng)
            .is_empty());

        let pop = make_population(&[1.0]);
        assert!(Selection::StochasticUniversal
            .select(&pop, 0, Direction::Maximize, &mut rng)
            .is_empty());
    }

    #[test]
    fn test_same_seed_same_parents() {
        let pop = make_population(&[4.0, 1.0, 7.0, 2.0, 9.0]);
        for selection in [Selection::RouletteWheel, Selection::StochasticUniversal] {
            let a = selection.select_indices(&pop, 20, Direction::Maximize, &mut create_rng(77));
            let b = selection.select_indices(&pop, 20, Direction::Maximize, &mut create_rng(77));
            assert_eq!(a, b, "{selection:?} should be reproducible");
        }
    }

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("rws".parse::<Selection>(), Ok(Selection::RouletteWheel));
        assert_eq!("roulette".parse::<Selection>(), Ok(Selection::RouletteWheel));
        assert_eq!("sus".parse::<Selection>(), Ok(Selection::StochasticUniversal));
        assert_eq!(
            "rank".parse::<Selection>(),
            Err(ConfigError::UnknownSelection("rank".into()))
        );
    }

    proptest! {
        #[test]
        fn prop_wheel_monotonic_and_ends_at_one(
            weights in proptest::collection::vec(-10.0f64..100.0, 1..40)
        ) {
            let wheel = Wheel::from_weights(&weights);
            let c = wheel.cumulative();
            prop_assert_eq!(c.len(), weights.len());
            prop_assert!(c.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(*c.last().unwrap(), 1.0);
        }

        #[test]
        fn prop_index_of_owns_draw(
            weights in proptest::collection::vec(0.0f64..10.0, 1..40),
            draw in 0.0f64..1.0,
        ) {
            let wheel = Wheel::from_weights(&weights);
            let c = wheel.cumulative();
            let m = wheel.index_of(draw);
            let lower = if m == 0 { 0.0 } else { c[m - 1] };
            prop_assert!(lower <= draw && draw < c[m]);
        }
    }
}
