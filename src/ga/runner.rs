//! Generational simulation loop.
//!
//! [`Simulation`] owns the population and walks it through the phases
//! init → update → evaluate fitness → check termination → reproduce → ...
//! one generation per [`step`](Simulation::step). Observers attach through
//! hooks on the [`SimulationBuilder`] and receive a read-only [`Snapshot`].

use super::config::GaConfig;
use super::individual::Individual;
use super::operators::{crossover, mutate};
use super::types::{FitnessEvaluator, Gene};
use crate::error::{ConfigError, GeneticError};
use crate::random::{create_rng, rand_between};
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Where the simulation is in its generational state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Seeding the initial population.
    Init,
    /// Running the evaluator's per-generation pre-step.
    Updating,
    EvaluatingFitness,
    CheckingTermination,
    /// Selecting parents and breeding the next generation.
    Reproducing,
    /// Terminal.
    Finished,
}

/// Read-only view of the simulation state handed to hooks.
///
/// `evaluator` exposes the problem's own state alongside the engine's.
pub struct Snapshot<'a, G: Gene, P> {
    pub phase: Phase,
    pub population: &'a [Individual<G>],
    pub current_generation: usize,
    /// Best individual of the last evaluated generation.
    pub top: Option<&'a Individual<G>>,
    pub average_fitness: f64,
    pub max_generations: usize,
    pub population_size: usize,
    /// Superseded populations, oldest first (empty unless history is kept).
    pub history: &'a [Vec<Individual<G>>],
    pub evaluator: &'a P,
}

/// Observer callback.
pub type Hook<G, P> = Box<dyn FnMut(&Snapshot<'_, G, P>)>;

struct Hooks<G: Gene, P> {
    on_init: Option<Hook<G, P>>,
    on_update: Option<Hook<G, P>>,
    on_calculate_fitness: Option<Hook<G, P>>,
    on_finish: Option<Hook<G, P>>,
}

impl<G: Gene, P> Default for Hooks<G, P> {
    fn default() -> Self {
        Self {
            on_init: None,
            on_update: None,
            on_calculate_fitness: None,
            on_finish: None,
        }
    }
}

#[derive(Clone, Copy)]
enum Event {
    Init,
    Update,
    CalculateFitness,
    Finish,
}

/// Cancellation token shared between a simulation and its controllers.
///
/// Once stopped, no further generation step runs. Stopping is idempotent.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationResult<G: Gene> {
    /// Best individual of the last evaluated generation.
    ///
    /// `None` only when the run was stopped before the first evaluation.
    pub top: Option<Individual<G>>,

    /// Number of generations evaluated.
    pub generations: usize,

    /// Mean fitness of the last evaluated generation.
    pub average_fitness: f64,

    /// Whether the run was stopped externally before finishing.
    pub stopped: bool,

    /// Top fitness of each evaluated generation.
    pub fitness_history: Vec<f64>,
}

/// Collects everything a [`Simulation`] needs before it seeds its population.
///
/// ```
/// use u_evolve::ga::{
///     BinaryEncoding, Chromosome, FitnessEvaluator, GaConfig, Individual, Simulation,
/// };
/// use u_evolve::random::create_rng;
///
/// struct OneMax;
///
/// impl FitnessEvaluator<bool> for OneMax {
///     type Data = ();
///     fn calculate_fitness(&self, ind: &Individual<bool>, _: &()) -> f64 {
///         ind[0].genes().iter().filter(|&&b| b).count() as f64
///     }
///     fn should_finish(&self, top: &Individual<bool>) -> bool {
///         top.fitness() as usize == top[0].len()
///     }
/// }
///
/// let mut prototype = Individual::new();
/// prototype.add_chromosome(Chromosome::from_length(BinaryEncoding, 8, &mut create_rng(0)));
///
/// let mut sim = Simulation::builder(OneMax, ())
///     .prototype(prototype)
///     .config(GaConfig::default().with_population_size(30).with_max_generations(50).with_seed(1))
///     .build()
///     .unwrap();
/// let result = sim.run().unwrap();
/// assert!(result.generations <= 50);
/// ```
pub struct SimulationBuilder<G: Gene, P: FitnessEvaluator<G>> {
    evaluator: P,
    data: P::Data,
    prototype: Option<Individual<G>>,
    config: GaConfig,
    hooks: Hooks<G, P>,
    stop: StopHandle,
}

impl<G: Gene, P: FitnessEvaluator<G>> SimulationBuilder<G, P> {
    /// Individual whose genome shape seeds the population. Required.
    pub fn prototype(mut self, prototype: Individual<G>) -> Self {
        self.prototype = Some(prototype);
        self
    }

    pub fn config(mut self, config: GaConfig) -> Self {
        self.config = config;
        self
    }

    /// Shares an existing cancellation token.
    pub fn stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    pub fn on_init<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&Snapshot<'_, G, P>) + 'static,
    {
        self.hooks.on_init = Some(Box::new(hook));
        self
    }

    pub fn on_update<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&Snapshot<'_, G, P>) + 'static,
    {
        self.hooks.on_update = Some(Box::new(hook));
        self
    }

    pub fn on_calculate_fitness<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&Snapshot<'_, G, P>) + 'static,
    {
        self.hooks.on_calculate_fitness = Some(Box::new(hook));
        self
    }

    pub fn on_finish<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&Snapshot<'_, G, P>) + 'static,
    {
        self.hooks.on_finish = Some(Box::new(hook));
        self
    }

    /// Validates the setup and runs the init phase.
    ///
    /// # Errors
    /// [`ConfigError::MissingPrototype`], [`ConfigError::EmptyPrototype`] or
    /// any [`GaConfig::validate`] failure, wrapped in [`GeneticError::Config`].
    pub fn build(self) -> Result<Simulation<G, P>, GeneticError> {
        let prototype = self.prototype.ok_or(ConfigError::MissingPrototype)?;
        if prototype.locus_count() == 0 {
            return Err(ConfigError::EmptyPrototype.into());
        }
        self.config.validate()?;

        let rng = match self.config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let mut simulation = Simulation {
            evaluator: self.evaluator,
            data: self.data,
            prototype,
            rng,
            population: Vec::with_capacity(self.config.population_size),
            current_generation: 1,
            average_fitness: 0.0,
            has_top: false,
            update_done: false,
            history: Vec::new(),
            fitness_history: Vec::with_capacity(self.config.max_generations),
            phase: Phase::Init,
            hooks: self.hooks,
            stop: self.stop,
            config: self.config,
        };
        simulation.init();
        Ok(simulation)
    }
}

/// The generational state machine.
///
/// [`run`](Self::run) drives it to completion; hosts that interleave other
/// work call [`step`](Self::step) once per generation instead. Either way the
/// hooks fire in the same order.
pub struct Simulation<G: Gene, P: FitnessEvaluator<G>> {
    evaluator: P,
    data: P::Data,
    prototype: Individual<G>,
    config: GaConfig,
    rng: StdRng,
    population: Vec<Individual<G>>,
    current_generation: usize,
    average_fitness: f64,
    // population[0] is the top individual while this is set
    has_top: bool,
    // re-armed after every non-final generation
    update_done: bool,
    history: Vec<Vec<Individual<G>>>,
    fitness_history: Vec<f64>,
    phase: Phase,
    hooks: Hooks<G, P>,
    stop: StopHandle,
}

impl<G: Gene, P: FitnessEvaluator<G>> Simulation<G, P> {
    /// Starts building a simulation for `evaluator`, which receives `data`
    /// with every fitness call.
    pub fn builder(evaluator: P, data: P::Data) -> SimulationBuilder<G, P> {
        SimulationBuilder {
            evaluator,
            data,
            prototype: None,
            config: GaConfig::default(),
            hooks: Hooks::default(),
            stop: StopHandle::new(),
        }
    }

    /// Runs generations until the simulation finishes or is stopped.
    pub fn run(&mut self) -> Result<SimulationResult<G>, GeneticError> {
        log::info!(
            "running simulation: population {}, max generations {}, {:?}/{:?}",
            self.config.population_size,
            self.config.max_generations,
            self.config.selection,
            self.config.crossover,
        );
        while self.step()? {}
        Ok(self.result())
    }

    /// Advances the state machine by one step.
    ///
    /// Every step is one full generation. The evaluator's
    /// [`update`](FitnessEvaluator::update) runs first unless it already
    /// reported done during this generation; fitness is evaluated either way,
    /// so `max_generations` always bounds the run.
    ///
    /// Returns `false` once finished or stopped.
    ///
    /// # Errors
    /// Operator failures abort the run; the simulation is then finished.
    pub fn step(&mut self) -> Result<bool, GeneticError> {
        if self.phase == Phase::Finished {
            return Ok(false);
        }
        if self.stop.is_stopped() {
            log::debug!("simulation stopped at generation {}", self.current_generation);
            return Ok(false);
        }

        self.phase = Phase::Updating;
        if !self.update_done {
            self.update_done = self.evaluator.update();
            self.notify(Event::Update);
        }

        self.phase = Phase::EvaluatingFitness;
        self.calculate_fitness();

        self.phase = Phase::CheckingTermination;
        if self.check_termination() {
            return Ok(false);
        }

        self.phase = Phase::Reproducing;
        if let Err(err) = self.reproduce() {
            log::error!(
                "generation {} aborted during reproduction: {err}",
                self.current_generation
            );
            self.phase = Phase::Finished;
            return Err(err);
        }

        self.phase = Phase::Updating;
        Ok(true)
    }

    /// Prevents any further step from running. Safe to call repeatedly.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// A clone of this simulation's cancellation token.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn population(&self) -> &[Individual<G>] {
        &self.population
    }

    /// 1-based index of the generation currently being processed.
    pub fn current_generation(&self) -> usize {
        self.current_generation
    }

    /// Best individual of the last evaluated generation.
    pub fn top(&self) -> Option<&Individual<G>> {
        if self.has_top {
            self.population.first()
        } else {
            None
        }
    }

    pub fn average_fitness(&self) -> f64 {
        self.average_fitness
    }

    pub fn history(&self) -> &[Vec<Individual<G>>] {
        &self.history
    }

    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &P {
        &self.evaluator
    }

    pub fn prototype(&self) -> &Individual<G> {
        &self.prototype
    }

    /// The view passed to hooks.
    pub fn snapshot(&self) -> Snapshot<'_, G, P> {
        Snapshot {
            phase: self.phase,
            population: &self.population,
            current_generation: self.current_generation,
            top: self.top(),
            average_fitness: self.average_fitness,
            max_generations: self.config.max_generations,
            population_size: self.config.population_size,
            history: &self.history,
            evaluator: &self.evaluator,
        }
    }

    /// Summary of the run so far.
    pub fn result(&self) -> SimulationResult<G> {
        SimulationResult {
            top: self.top().cloned(),
            generations: self.fitness_history.len(),
            average_fitness: self.average_fitness,
            stopped: self.is_stopped() && !self.is_finished(),
            fitness_history: self.fitness_history.clone(),
        }
    }

    fn init(&mut self) {
        self.population = (0..self.config.population_size)
            .map(|_| self.prototype.random_likeness(&mut self.rng))
            .collect();
        self.evaluator.init();
        self.notify(Event::Init);
        self.phase = Phase::Updating;
    }

    fn calculate_fitness(&mut self) {
        evaluate_population(
            &self.evaluator,
            &self.data,
            &mut self.population,
            self.config.parallel,
        );

        let direction = self.config.direction;
        self.population
            .sort_by(|a, b| direction.compare(a.fitness(), b.fitness()));
        self.has_top = true;

        let total: f64 = self.population.iter().map(Individual::fitness).sum();
        self.average_fitness = total / self.population.len() as f64;

        let top_fitness = self.population.first().map_or(0.0, Individual::fitness);
        self.fitness_history.push(top_fitness);
        log::debug!(
            "generation {}: top {:.4}, average {:.4}",
            self.current_generation,
            top_fitness,
            self.average_fitness
        );

        self.notify(Event::CalculateFitness);
    }

    /// Returns `true` when the simulation just finished.
    fn check_termination(&mut self) -> bool {
        let solved = self
            .population
            .first()
            .is_some_and(|top| self.evaluator.should_finish(top));

        if solved || self.current_generation >= self.config.max_generations {
            self.phase = Phase::Finished;
            log::info!(
                "simulation finished at generation {} ({}), top fitness {:.4}",
                self.current_generation,
                if solved { "solved" } else { "generation limit" },
                self.fitness_history.last().copied().unwrap_or_default()
            );
            self.notify(Event::Finish);
            true
        } else {
            self.evaluator.reset();
            self.update_done = false;
            false
        }
    }

    fn reproduce(&mut self) -> Result<(), GeneticError> {
        let population_size = self.config.population_size;
        let elite_count = self.config.elite_count();

        let parents = self.config.selection.select(
            &self.population,
            self.config.num_parents,
            self.config.direction,
            &mut self.rng,
        );
        log::trace!(
            "generation {}: {} parents, {} elites",
            self.current_generation,
            parents.len(),
            elite_count
        );

        let mut next: Vec<Individual<G>> = Vec::with_capacity(population_size);
        next.extend(self.population[..elite_count].iter().cloned());

        for _ in elite_count..population_size {
            let one = parents[rand_between(&mut self.rng, 0, parents.len())];
            let two = parents[rand_between(&mut self.rng, 0, parents.len())];
            let mut child = crossover(one, two, self.config.crossover, &mut self.rng)?;
            mutate(&mut child, self.config.mutation_rate, &mut self.rng)?;
            next.push(child);
        }

        self.current_generation += 1;
        self.has_top = false;
        let previous = std::mem::replace(&mut self.population, next);
        if self.config.keep_history {
            self.history.push(previous);
        }
        Ok(())
    }

    fn notify(&mut self, event: Event) {
        let slot = match event {
            Event::Init => &mut self.hooks.on_init,
            Event::Update => &mut self.hooks.on_update,
            Event::CalculateFitness => &mut self.hooks.on_calculate_fitness,
            Event::Finish => &mut self.hooks.on_finish,
        };
        if let Some(hook) = slot.as_mut() {
            let snapshot = Snapshot {
                phase: self.phase,
                population: &self.population,
                current_generation: self.current_generation,
                top: if self.has_top {
                    self.population.first()
                } else {
                    None
                },
                average_fitness: self.average_fitness,
                max_generations: self.config.max_generations,
                population_size: self.config.population_size,
                history: &self.history,
                evaluator: &self.evaluator,
            };
            hook(&snapshot);
        }
    }
}

/// Evaluate all individuals in the population.
#[cfg(feature = "parallel")]
fn evaluate_population<G: Gene, P: FitnessEvaluator<G>>(
    evaluator: &P,
    data: &P::Data,
    population: &mut [Individual<G>],
    parallel: bool,
) {
    use rayon::prelude::*;

    if parallel {
        population.par_iter_mut().for_each(|ind| {
            let f = evaluator.calculate_fitness(ind, data);
            ind.set_fitness(f);
        });
    } else {
        evaluate_sequential(evaluator, data, population);
    }
}

/// Evaluate all individuals in the population.
#[cfg(not(feature = "parallel"))]
fn evaluate_population<G: Gene, P: FitnessEvaluator<G>>(
    evaluator: &P,
    data: &P::Data,
    population: &mut [Individual<G>],
    _parallel: bool,
) {
    evaluate_sequential(evaluator, data, population);
}

fn evaluate_sequential<G: Gene, P: FitnessEvaluator<G>>(
    evaluator: &P,
    data: &P::Data,
    population: &mut [Individual<G>],
) {
    for ind in population.iter_mut() {
        let f = evaluator.calculate_fitness(ind, data);
        ind.set_fitness(f);
    }
}
