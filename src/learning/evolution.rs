//! Generational genetic algorithm.
//!
//! The [`EvolutionManager`] owns one generation of [`Evolvable`] members at a
//! time. Once no member is active, or the generation grew older than the
//! configured maximum, it is replaced:
//!
//! 1. Members are ranked fittest first (stable: ties keep their order).
//! 2. The genomes of the best `parent_count` members become the parents.
//! 3. `child_count` genomes are bred: mutated copies of the parents, then
//!    uniform per-gene crossovers of the parents, also mutated.
//! 4. A fresh generation of `total_count` members is spawned and the first
//!    `child_count` of them receive the bred genomes. The rest keep their
//!    random genome, which keeps new material flowing in.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::codec;
use super::evolvable::{Evolvable, Population, by_descending_fitness};
use super::network::Genome;
use super::params::EvolutionParams;
use crate::error::{EvoError, Result};

/// Runs the generational loop over members created by a [`Population`].
pub struct EvolutionManager<P: Population> {
    params: EvolutionParams,
    population: P,
    rng: StdRng,
    current_generation: Vec<P::Member>,
    /// Parent genomes of the current generation, fittest first.
    best_genomes_of_last_generation: Vec<Genome>,
    generation_index: usize,
    generation_age: f64,
}

impl<P: Population> EvolutionManager<P> {
    /// Creates a manager. No generation exists until
    /// [`EvolutionManager::generate_first_generation`] is called.
    ///
    /// A `total_count` below `child_count` is raised to `child_count`.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidArgument`] if the parameters fail
    /// [`EvolutionParams::validate`], including a parent count that is below
    /// two or not below the child count.
    pub fn new(mut params: EvolutionParams, population: P) -> Result<Self> {
        params.validate()?;

        if params.total_count < params.child_count {
            warn!(
                total_count = params.total_count,
                child_count = params.child_count,
                "total_count has to be at least child_count, raising it"
            );
            params.total_count = params.child_count;
        }

        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            params,
            population,
            rng,
            current_generation: Vec::new(),
            best_genomes_of_last_generation: Vec::new(),
            generation_index: 0,
            generation_age: 0.0,
        })
    }

    /// The parameters in use.
    pub fn params(&self) -> &EvolutionParams {
        &self.params
    }

    /// The population registry.
    pub fn population(&self) -> &P {
        &self.population
    }

    /// Mutable access to the population registry.
    pub fn population_mut(&mut self) -> &mut P {
        &mut self.population
    }

    /// Members of the current generation, in spawn order.
    pub fn members(&self) -> &[P::Member] {
        &self.current_generation
    }

    /// Mutable access to the current members, used by the environment to
    /// feed sensors and accrue fitness.
    pub fn members_mut(&mut self) -> &mut [P::Member] {
        &mut self.current_generation
    }

    /// Index of the current generation, starting at 0.
    pub fn generation_index(&self) -> usize {
        self.generation_index
    }

    /// Seconds since the current generation was spawned.
    pub fn generation_age(&self) -> f64 {
        self.generation_age
    }

    /// Parent genomes that produced the current generation.
    pub fn best_genomes_of_last_generation(&self) -> &[Genome] {
        &self.best_genomes_of_last_generation
    }

    /// [`EvolutionManager::best_genomes_of_last_generation`] as genome codes,
    /// fittest first.
    pub fn best_genome_codes_of_last_generation(&self) -> Vec<String> {
        self.best_genomes_of_last_generation
            .iter()
            .map(|genome| codec::to_code(genome))
            .collect()
    }

    /// Discards any current generation and spawns generation 0 with random
    /// genomes.
    pub fn generate_first_generation(&mut self) -> Result<()> {
        self.current_generation = self.spawn_generation()?;
        self.best_genomes_of_last_generation.clear();
        self.generation_index = 0;
        self.generation_age = 0.0;
        debug!(
            members = self.current_generation.len(),
            "spawned first generation"
        );
        Ok(())
    }

    /// Replaces the current generation with one bred from its best members.
    ///
    /// The new generation is assembled aside; on error the current one stays
    /// untouched.
    pub fn generate_next_generation(&mut self) -> Result<()> {
        let best_genomes = self.best_genomes(self.params.parent_count)?;
        let best_fitness = self.best_fitness();
        let still_active = self.current_generation.iter().filter(|m| m.is_active()).count();
        let new_genomes = self.cross_genomes(self.params.child_count, &best_genomes)?;

        let mut generation = self.spawn_generation()?;
        for (member, genome) in generation.iter_mut().zip(&new_genomes) {
            member.set_genome(genome)?;
        }

        self.current_generation = generation;
        self.best_genomes_of_last_generation = best_genomes;
        self.generation_age = 0.0;
        self.generation_index += 1;

        info!(
            generation = self.generation_index,
            previous_best_fitness = best_fitness,
            previous_active = still_active,
            members = self.current_generation.len(),
            "started new generation"
        );
        Ok(())
    }

    /// Advances the generation age by `dt` and replaces the generation if no
    /// member is active or it is too old.
    ///
    /// Returns whether a new generation was started. Does nothing before the
    /// first generation exists.
    pub fn update(&mut self, dt: f64) -> Result<bool> {
        if self.current_generation.is_empty() {
            return Ok(false);
        }

        self.generation_age += dt;

        let any_active = self.current_generation.iter().any(|m| m.is_active());
        if !any_active || self.generation_age > self.params.maximum_generation_age {
            self.generate_next_generation()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Breeds `child_count` genomes from `parent_genomes` with the manager's
    /// parameters and random source. See [`cross_genomes`].
    pub fn cross_genomes(&mut self, child_count: usize, parent_genomes: &[Genome]) -> Result<Vec<Genome>> {
        cross_genomes(child_count, parent_genomes, &self.params, &mut self.rng)
    }

    /// Mutates `genome` in place with the manager's parameters. See
    /// [`mutate_genome`].
    pub fn mutate_genome(&mut self, genome: &mut [f64]) {
        mutate_genome(genome, &self.params, &mut self.rng);
    }

    /// Indices of the current members, fittest first. Ties keep spawn order.
    pub fn ranking(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.current_generation.len()).collect();
        indices.sort_by(|&a, &b| {
            by_descending_fitness(&self.current_generation[a], &self.current_generation[b])
        });
        indices
    }

    /// Genomes of the `amount` fittest members, fittest first.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::OutOfRange`] if `amount` exceeds the number of
    /// members.
    pub fn best_genomes(&self, amount: usize) -> Result<Vec<Genome>> {
        if amount > self.current_generation.len() {
            return Err(EvoError::out_of_range(format!(
                "cannot take {} best genomes from a generation of {}",
                amount,
                self.current_generation.len()
            )));
        }

        Ok(self
            .ranking()
            .into_iter()
            .take(amount)
            .map(|index| self.current_generation[index].genome())
            .collect())
    }

    /// Genome of the fittest member.
    pub fn best_genome(&self) -> Result<Genome> {
        self.best_genomes(1)?
            .pop()
            .ok_or_else(|| EvoError::out_of_range("the current generation is empty"))
    }

    /// The active member with the highest positive fitness, if any.
    pub fn best_active_member(&self) -> Option<&P::Member> {
        let mut best: Option<&P::Member> = None;
        let mut best_fitness = 0.0;
        for member in &self.current_generation {
            if member.is_active() && member.fitness() > best_fitness {
                best_fitness = member.fitness();
                best = Some(member);
            }
        }
        best
    }

    fn best_fitness(&self) -> f64 {
        self.current_generation
            .iter()
            .map(|member| member.fitness())
            .fold(0.0, f64::max)
    }

    fn spawn_generation(&mut self) -> Result<Vec<P::Member>> {
        let mut generation = Vec::with_capacity(self.params.total_count);
        for index in 0..self.params.total_count {
            let mut member = self.population.spawn(index, &mut self.rng)?;
            self.population.initialize(&mut member, index, &mut self.rng);
            generation.push(member);
        }
        Ok(generation)
    }
}

/// Breeds `child_count` genomes from `parent_genomes`.
///
/// The first `parent_genomes.len()` children are mutated copies of the
/// parents, in order. Every other child takes each gene from a uniformly
/// chosen parent and is then mutated.
///
/// # Errors
///
/// Returns [`EvoError::InvalidArgument`] if there are fewer than two parents,
/// if there are not fewer parents than children, or if the parents differ in
/// gene count. Nothing is bred in that case.
pub fn cross_genomes<R: Rng + ?Sized>(
    child_count: usize,
    parent_genomes: &[Genome],
    params: &EvolutionParams,
    rng: &mut R,
) -> Result<Vec<Genome>> {
    let parent_count = parent_genomes.len();
    if parent_count < 2 || parent_count >= child_count {
        return Err(EvoError::invalid_argument(format!(
            "expected at least two and less than {} parents, got {}",
            child_count, parent_count
        )));
    }

    let gene_count = parent_genomes[0].len();
    if parent_genomes.iter().any(|parent| parent.len() != gene_count) {
        return Err(EvoError::invalid_argument(
            "all parents need to have the same amount of genes",
        ));
    }

    let mut children = Vec::with_capacity(child_count);

    for parent in parent_genomes {
        let mut child = parent.clone();
        mutate_genome(&mut child, params, rng);
        children.push(child);
    }

    for _ in parent_count..child_count {
        let mut child: Genome = (0..gene_count)
            .map(|gene| parent_genomes[rng.random_range(0..parent_count)][gene])
            .collect();
        mutate_genome(&mut child, params, rng);
        children.push(child);
    }

    Ok(children)
}

/// Adds a value drawn uniformly from `[minimum_mutation, maximum_mutation]`
/// to each gene with probability `mutation_chance`.
pub fn mutate_genome<R: Rng + ?Sized>(genome: &mut [f64], params: &EvolutionParams, rng: &mut R) {
    for gene in genome.iter_mut() {
        if rng.random::<f64>() < params.mutation_chance {
            *gene += rng.random_range(params.minimum_mutation..=params.maximum_mutation);
        }
    }
}
