#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evodrive::error::{EvoError, Result};
use evodrive::learning::codec;
use evodrive::learning::evolution::{EvolutionManager, cross_genomes, mutate_genome};
use evodrive::learning::evolvable::{Evolvable, Population};
use evodrive::learning::params::EvolutionParams;
use rand::SeedableRng;
use rand::rngs::StdRng;

const GENE_COUNT: usize = 6;

/// A member whose genome is a plain vector.
#[derive(Debug, Clone)]
struct Agent {
    genome: Vec<f64>,
    fitness: f64,
    active: bool,
}

impl Evolvable for Agent {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn genome(&self) -> Vec<f64> {
        self.genome.clone()
    }

    fn set_genome(&mut self, genome: &[f64]) -> Result<()> {
        if genome.len() != self.genome.len() {
            return Err(EvoError::invalid_argument("wrong genome length"));
        }
        self.genome = genome.to_vec();
        Ok(())
    }
}

/// Spawns agents whose genes all equal a large marker plus their index, so
/// bred genomes are easy to tell apart from fresh ones.
#[derive(Debug, Default)]
struct Agents {
    spawned: usize,
    initialized: usize,
    /// Overrides the genome length of newly spawned agents.
    genome_length: Option<usize>,
}

impl Population for Agents {
    type Member = Agent;

    fn spawn(&mut self, index: usize, _rng: &mut StdRng) -> Result<Agent> {
        self.spawned += 1;
        Ok(Agent {
            genome: vec![1000.0 + index as f64; self.genome_length.unwrap_or(GENE_COUNT)],
            fitness: 0.0,
            active: true,
        })
    }

    fn initialize(&mut self, _member: &mut Agent, _index: usize, _rng: &mut StdRng) {
        self.initialized += 1;
    }
}

fn create_test_params() -> EvolutionParams {
    EvolutionParams {
        total_count: 8,
        child_count: 5,
        parent_count: 2,
        mutation_chance: 0.0,
        minimum_mutation: -0.1,
        maximum_mutation: 0.1,
        maximum_generation_age: 10.0,
        seed: Some(42),
    }
}

fn create_manager(params: EvolutionParams) -> EvolutionManager<Agents> {
    let mut manager = EvolutionManager::new(params, Agents::default()).unwrap();
    manager.generate_first_generation().unwrap();
    manager
}

/// Gives member `i` the genome `[i; GENE_COUNT]` and the listed fitness.
fn assign(manager: &mut EvolutionManager<Agents>, fitness: &[f64]) {
    for (index, (member, &value)) in manager.members_mut().iter_mut().zip(fitness).enumerate() {
        member.genome = vec![index as f64; GENE_COUNT];
        member.fitness = value;
    }
}

#[test]
fn test_first_generation() {
    let manager = create_manager(create_test_params());

    assert_eq!(manager.members().len(), 8);
    assert_eq!(manager.generation_index(), 0);
    assert_eq!(manager.generation_age(), 0.0);
    assert!(manager.best_genomes_of_last_generation().is_empty());
    assert_eq!(manager.population().spawned, 8);
    assert_eq!(manager.population().initialized, 8);
}

#[test]
fn test_total_count_is_raised_to_child_count() {
    let params = EvolutionParams {
        total_count: 3,
        ..create_test_params()
    };
    let manager = create_manager(params);

    assert_eq!(manager.params().total_count, 5);
    assert_eq!(manager.members().len(), 5);
}

#[test]
fn test_invalid_params_are_rejected() {
    let params = EvolutionParams {
        mutation_chance: 1.5,
        ..create_test_params()
    };
    assert!(EvolutionManager::new(params, Agents::default()).is_err());

    let params = EvolutionParams {
        minimum_mutation: 0.5,
        maximum_mutation: 0.1,
        ..create_test_params()
    };
    assert!(EvolutionManager::new(params, Agents::default()).is_err());

    let params = EvolutionParams {
        maximum_generation_age: 0.0,
        ..create_test_params()
    };
    assert!(EvolutionManager::new(params, Agents::default()).is_err());
}

#[test]
fn test_infinite_params_are_rejected() {
    let params = EvolutionParams {
        minimum_mutation: f64::NEG_INFINITY,
        ..create_test_params()
    };
    assert!(matches!(params.validate(), Err(EvoError::InvalidArgument(_))));
    assert!(EvolutionManager::new(params, Agents::default()).is_err());

    let params = EvolutionParams {
        maximum_mutation: f64::INFINITY,
        ..create_test_params()
    };
    assert!(params.validate().is_err());

    let params = EvolutionParams {
        maximum_generation_age: f64::INFINITY,
        ..create_test_params()
    };
    assert!(params.validate().is_err());

    let params = EvolutionParams {
        minimum_mutation: f64::NAN,
        ..create_test_params()
    };
    assert!(params.validate().is_err());
}

#[test]
fn test_parent_and_child_counts_are_checked_up_front() {
    let params = EvolutionParams {
        parent_count: 5,
        ..create_test_params()
    };
    let result = EvolutionManager::new(params, Agents::default());
    assert!(matches!(result, Err(EvoError::InvalidArgument(_))));

    let params = EvolutionParams {
        parent_count: 1,
        ..create_test_params()
    };
    assert!(EvolutionManager::new(params, Agents::default()).is_err());

    let params = EvolutionParams {
        total_count: 0,
        child_count: 0,
        parent_count: 0,
        ..create_test_params()
    };
    assert!(EvolutionManager::new(params, Agents::default()).is_err());

    let params = EvolutionParams {
        child_count: 3,
        ..create_test_params()
    };
    assert!(EvolutionManager::new(params, Agents::default()).is_ok());
    assert!(EvolutionParams::default().validate().is_ok());
}

#[test]
fn test_best_genomes_are_fittest_first() {
    let mut manager = create_manager(create_test_params());
    assign(&mut manager, &[1.0, 5.0, 3.0, 0.0, 4.0, 2.0, 0.5, 0.0]);

    let best = manager.best_genomes(3).unwrap();
    assert_eq!(best, vec![vec![1.0; GENE_COUNT], vec![4.0; GENE_COUNT], vec![2.0; GENE_COUNT]]);
    assert_eq!(manager.best_genome().unwrap(), vec![1.0; GENE_COUNT]);
}

#[test]
fn test_ties_keep_spawn_order() {
    let mut manager = create_manager(create_test_params());
    assign(&mut manager, &[2.0, 7.0, 2.0, 7.0, 2.0, 0.0, 0.0, 0.0]);

    assert_eq!(manager.ranking(), vec![1, 3, 0, 2, 4, 5, 6, 7]);
}

#[test]
fn test_best_genomes_out_of_range() {
    let manager = create_manager(create_test_params());

    let result = manager.best_genomes(9);
    assert!(matches!(result, Err(EvoError::OutOfRange(_))));
    assert_eq!(manager.best_genomes(8).unwrap().len(), 8);
}

#[test]
fn test_best_active_member() {
    let mut manager = create_manager(create_test_params());
    assert!(manager.best_active_member().is_none());

    assign(&mut manager, &[1.0, 5.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    manager.members_mut()[1].active = false;

    let best = manager.best_active_member().unwrap();
    assert_eq!(best.fitness, 3.0);
}

#[test]
fn test_update_waits_while_members_are_active() {
    let mut manager = create_manager(create_test_params());

    assert!(!manager.update(4.0).unwrap());
    assert!(!manager.update(4.0).unwrap());
    assert_eq!(manager.generation_age(), 8.0);
    assert_eq!(manager.generation_index(), 0);
}

#[test]
fn test_update_replaces_old_generation() {
    let mut manager = create_manager(create_test_params());

    assert!(!manager.update(6.0).unwrap());
    assert!(manager.update(6.0).unwrap());
    assert_eq!(manager.generation_index(), 1);
    assert_eq!(manager.generation_age(), 0.0);
}

#[test]
fn test_update_replaces_inactive_generation() {
    let mut manager = create_manager(create_test_params());
    for member in manager.members_mut() {
        member.active = false;
    }

    assert!(manager.update(0.1).unwrap());
    assert_eq!(manager.generation_index(), 1);
    assert!(manager.members().iter().all(|m| m.active));
}

#[test]
fn test_update_before_first_generation_does_nothing() {
    let mut manager = EvolutionManager::new(create_test_params(), Agents::default()).unwrap();

    assert!(!manager.update(100.0).unwrap());
    assert!(manager.members().is_empty());
    assert_eq!(manager.generation_age(), 0.0);
}

#[test]
fn test_next_generation_breeds_from_best() {
    let mut manager = create_manager(create_test_params());
    assign(&mut manager, &[1.0, 5.0, 3.0, 0.0, 4.0, 2.0, 0.5, 0.0]);

    manager.generate_next_generation().unwrap();

    assert_eq!(manager.generation_index(), 1);
    assert_eq!(
        manager.best_genomes_of_last_generation(),
        &[vec![1.0; GENE_COUNT], vec![4.0; GENE_COUNT]]
    );

    let members = manager.members();
    assert_eq!(members.len(), 8);

    // Without mutation the parents are copied unchanged and every crossed
    // gene comes from one of them.
    assert_eq!(members[0].genome, vec![1.0; GENE_COUNT]);
    assert_eq!(members[1].genome, vec![4.0; GENE_COUNT]);
    for member in &members[2..5] {
        assert!(member.genome.iter().all(|&g| g == 1.0 || g == 4.0));
    }

    // The remaining members keep their fresh genome.
    for (index, member) in members.iter().enumerate().skip(5) {
        assert_eq!(member.genome, vec![1000.0 + index as f64; GENE_COUNT]);
    }

    assert!(members.iter().all(|m| m.fitness == 0.0 && m.active));
}

#[test]
fn test_best_genome_codes_of_last_generation() {
    let mut manager = create_manager(create_test_params());
    assert!(manager.best_genome_codes_of_last_generation().is_empty());

    assign(&mut manager, &[1.0, 5.0, 3.0, 0.0, 4.0, 2.0, 0.5, 0.0]);
    manager.generate_next_generation().unwrap();

    let codes = manager.best_genome_codes_of_last_generation();
    assert_eq!(codes.len(), 2);
    assert_eq!(codes[0], codec::to_code(&[1.0; GENE_COUNT]));
    assert_eq!(codes[1], codec::to_code(&[4.0; GENE_COUNT]));
    assert_eq!(codec::from_code(&codes[1]).unwrap(), vec![4.0; GENE_COUNT]);
}

#[test]
fn test_failed_breeding_keeps_generation() {
    let mut manager = create_manager(create_test_params());
    assign(&mut manager, &[1.0; 8]);

    // Fresh members no longer fit the bred genomes.
    manager.population_mut().genome_length = Some(GENE_COUNT + 1);

    assert!(manager.generate_next_generation().is_err());
    assert_eq!(manager.generation_index(), 0);
    assert_eq!(manager.members()[3].genome, vec![3.0; GENE_COUNT]);
}

#[test]
fn test_cross_genomes_needs_two_parents() {
    let params = create_test_params();
    let mut rng = StdRng::seed_from_u64(1);

    let result = cross_genomes(5, &[vec![1.0; 3]], &params, &mut rng);
    assert!(matches!(result, Err(EvoError::InvalidArgument(_))));
}

#[test]
fn test_cross_genomes_needs_fewer_parents_than_children() {
    let params = create_test_params();
    let mut rng = StdRng::seed_from_u64(1);
    let parents = vec![vec![1.0; 3], vec![2.0; 3], vec![3.0; 3]];

    assert!(cross_genomes(3, &parents, &params, &mut rng).is_err());
    assert!(cross_genomes(2, &parents, &params, &mut rng).is_err());
    assert_eq!(cross_genomes(4, &parents, &params, &mut rng).unwrap().len(), 4);
}

#[test]
fn test_cross_genomes_needs_equal_lengths() {
    let params = create_test_params();
    let mut rng = StdRng::seed_from_u64(1);
    let parents = vec![vec![1.0; 3], vec![2.0; 4]];

    assert!(cross_genomes(5, &parents, &params, &mut rng).is_err());
}

#[test]
fn test_crossover_mixes_parents() {
    let params = create_test_params();
    let mut rng = StdRng::seed_from_u64(3);
    let parents = vec![vec![0.0; 200], vec![1.0; 200]];

    let children = cross_genomes(3, &parents, &params, &mut rng).unwrap();
    let crossed = &children[2];

    assert!(crossed.iter().all(|&g| g == 0.0 || g == 1.0));
    assert!(crossed.contains(&0.0));
    assert!(crossed.contains(&1.0));
}

#[test]
fn test_mutation_stays_in_range() {
    let params = EvolutionParams {
        mutation_chance: 1.0,
        minimum_mutation: -0.1,
        maximum_mutation: 0.1,
        ..create_test_params()
    };
    let mut rng = StdRng::seed_from_u64(5);
    let mut genome = vec![1.0; 500];

    mutate_genome(&mut genome, &params, &mut rng);

    assert!(genome.iter().all(|&g| (0.9 - 1e-9..=1.1 + 1e-9).contains(&g)));
    assert!(genome.iter().any(|&g| g != 1.0));
}

#[test]
fn test_zero_mutation_chance_keeps_genome() {
    let params = create_test_params();
    let mut rng = StdRng::seed_from_u64(5);
    let mut genome = vec![0.25; 100];

    mutate_genome(&mut genome, &params, &mut rng);
    assert_eq!(genome, vec![0.25; 100]);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let params = EvolutionParams {
        mutation_chance: 0.5,
        ..create_test_params()
    };
    let fitness = [1.0, 5.0, 3.0, 0.0, 4.0, 2.0, 0.5, 0.0];

    let mut first = create_manager(params.clone());
    assign(&mut first, &fitness);
    first.generate_next_generation().unwrap();

    let mut second = create_manager(params);
    assign(&mut second, &fitness);
    second.generate_next_generation().unwrap();

    let genomes = |m: &EvolutionManager<Agents>| -> Vec<Vec<f64>> {
        m.members().iter().map(|member| member.genome()).collect()
    };
    assert_eq!(genomes(&first), genomes(&second));
}
