use std::time::Instant;

use bit_set::BitSet;
use log::{debug, trace};
use ordered_float::OrderedFloat;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::color::{ColoringInstance, ColoringResult, Graph, nb_distinct_colors};
use crate::compact_instance::CompactInstance;
use crate::error::{ColoringError, Result};
use crate::search::first_available_color;
use crate::stopping::{NeverStoppingCriterion, StoppingCriterion};

/// initial colors are drawn in [0, min(MAX_INITIAL_COLORS, n))
const MAX_INITIAL_COLORS:usize = 10;
/// probability for each gene of a child to be repaired
const MUTATION_RATE:f64 = 0.1;
/// fitness penalty per distinct color
const COLOR_PENALTY:f64 = 0.1;

/** parameters of the genetic colorer */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneticParams {
    /// number of chromosomes (at least 1)
    pub population_size: usize,
    /// number of generations to evolve
    pub generations: usize,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self { population_size: 50, generations: 100 }
    }
}

impl GeneticParams {
    /// creates a parameter set
    pub fn new(population_size:usize, generations:usize) -> Self {
        Self { population_size, generations }
    }

    /// rejects an empty population
    pub fn check(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(ColoringError::InvalidPopulationSize { size: self.population_size });
        }
        Ok(())
    }

    /// number of chromosomes kept unchanged from one generation to the next: floor(0.1 × size)
    pub fn nb_elites(&self) -> usize { self.population_size / 10 }

    /// parents are drawn among the first ceil(size / 2) chromosomes of the sorted population
    pub fn nb_parents(&self) -> usize { (self.population_size + 1) / 2 }
}

/** best fitness of the population, before evolution then after each generation */
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneticTrace {
    /// best_fitness[g]: best fitness of the population after g generations
    pub best_fitness: Vec<f64>,
}

/// complete coloring and its evaluation
#[derive(Debug, Clone)]
struct Chromosome {
    coloring: Vec<usize>,
    fitness: OrderedFloat<f64>,
    conflicts: usize,
}

impl Chromosome {
    fn evaluate<I:ColoringInstance + ?Sized>(inst:&I, coloring:Vec<usize>) -> Self {
        let conflicts = inst.nb_conflicts(&coloring);
        let fitness = OrderedFloat(fitness(conflicts, nb_distinct_colors(&coloring)));
        Self { coloring, fitness, conflicts }
    }
}

/** fitness of a coloring: 1 / (1 + conflicts + 0.1 × nb_colors). Higher is better. */
pub fn fitness(conflicts:usize, nb_colors:usize) -> f64 {
    1. / (1. + conflicts as f64 + COLOR_PENALTY * nb_colors as f64)
}

/// uniform crossover: each gene comes from a or b with equal probability
fn crossover<R:Rng + ?Sized>(a:&[usize], b:&[usize], rng:&mut R) -> Vec<usize> {
    a.iter().zip(b.iter())
        .map(|(ca, cb)| if rng.gen_bool(0.5) { *ca } else { *cb })
        .collect()
}

/**
each gene, with probability MUTATION_RATE, takes the smallest color absent from its
neighborhood in the coloring being built (earlier repairs are visible to later ones).
*/
fn mutate<I:ColoringInstance + ?Sized, R:Rng + ?Sized>(inst:&I, coloring:&mut [usize], rng:&mut R) {
    for v in inst.vertices() {
        if rng.gen_bool(MUTATION_RATE) {
            let neighbor_colors:BitSet = inst.neighbors(v).iter().map(|w| coloring[*w]).collect();
            let mut ignored_steps = 0;
            coloring[v] = first_available_color(&neighbor_colors, &mut ignored_steps);
        }
    }
}

/// sorts by decreasing fitness, ties keep their relative order
fn sort_by_fitness(population:&mut [Chromosome]) {
    population.sort_by(|a, b| b.fitness.cmp(&a.fitness));
}

fn best_fitness(population:&[Chromosome]) -> f64 {
    population.iter().map(|c| c.fitness).max().map_or(0., |f| f.into_inner())
}

/** colors the graph with the genetic colorer, drawing randomness from the entropy */
pub fn genetic(graph:&Graph, params:GeneticParams) -> Result<ColoringResult> {
    let mut rng = StdRng::from_entropy();
    genetic_with_rng(graph, params, &mut rng)
}

/** genetic colorer using the given random stream (seed it for reproducible runs) */
pub fn genetic_with_rng<R:Rng + ?Sized>(
    graph:&Graph,
    params:GeneticParams,
    rng:&mut R,
) -> Result<ColoringResult> {
    genetic_with_criterion(graph, params, rng, &NeverStoppingCriterion)
}

/** genetic colorer, polling the stopping criterion before each generation */
pub fn genetic_with_criterion<R:Rng + ?Sized>(
    graph:&Graph,
    params:GeneticParams,
    rng:&mut R,
    stopping_criterion:&dyn StoppingCriterion,
) -> Result<ColoringResult> {
    let inst = CompactInstance::from_graph(graph)?;
    genetic_on(&inst, params, rng, stopping_criterion).map(|(res, _)| res)
}

/** population-based search for a coloring with few conflicts and few colors.
    1. draw population_size random colorings over min(10, n) colors
    2. each generation: sort by decreasing fitness, keep the elites (10%), and fill
       the population with children of two parents drawn from the best half
       (uniform crossover followed by mutation-as-repair)
    3. return the chromosome with the fewest conflicts (ties: highest fitness)

The coloring may be improper: the result always carries its conflict count.
The chromatic number is the number of distinct colors used.
One step is counted per chromosome built.
*/
pub fn genetic_on<I:ColoringInstance + ?Sized, R:Rng + ?Sized>(
    inst:&I,
    params:GeneticParams,
    rng:&mut R,
    stopping_criterion:&dyn StoppingCriterion,
) -> Result<(ColoringResult, GeneticTrace)> {
    params.check()?;
    let t_start = Instant::now();
    let n = inst.nb_vertices();
    let mut trace = GeneticTrace::default();
    if n == 0 { return Ok((ColoringResult::empty(Some(0)), trace)); }
    let mut steps:u64 = 0;
    // initial population
    let nb_initial_colors = MAX_INITIAL_COLORS.min(n);
    let mut population:Vec<Chromosome> = Vec::with_capacity(params.population_size);
    for _ in 0..params.population_size {
        let coloring:Vec<usize> = (0..n).map(|_| rng.gen_range(0..nb_initial_colors)).collect();
        population.push(Chromosome::evaluate(inst, coloring));
        steps += 1;
    }
    trace.best_fitness.push(best_fitness(&population));
    // evolve population
    let nb_elites = params.nb_elites();
    let nb_parents = params.nb_parents();
    for generation in 0..params.generations {
        if stopping_criterion.is_finished() { return Err(ColoringError::Stopped); }
        sort_by_fitness(&mut population);
        let mut new_population:Vec<Chromosome> = population[..nb_elites].to_vec();
        while new_population.len() < params.population_size {
            let parent1 = &population[rng.gen_range(0..nb_parents)];
            let parent2 = &population[rng.gen_range(0..nb_parents)];
            let mut child = crossover(&parent1.coloring, &parent2.coloring, rng);
            mutate(inst, &mut child, rng);
            new_population.push(Chromosome::evaluate(inst, child));
            steps += 1;
        }
        population = new_population;
        let generation_best = best_fitness(&population);
        trace.best_fitness.push(generation_best);
        trace!("generation {}: best fitness {:.4}", generation, generation_best);
    }
    // prioritize the absence of conflicts, then fitness
    population.sort_by(|a, b| {
        a.conflicts.cmp(&b.conflicts).then_with(|| b.fitness.cmp(&a.fitness))
    });
    let best = &population[0];
    let chromatic_number = nb_distinct_colors(&best.coloring);
    debug!(
        "genetic: {} colors, {} conflicts, {} steps",
        chromatic_number, best.conflicts, steps
    );
    let res = ColoringResult::from_colors(
        inst, &best.coloring, chromatic_number, steps, t_start.elapsed(), Some(best.conflicts)
    );
    Ok((res, trace))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::count_conflicts;

    fn random_graph(n:usize, m:usize, seed:u64) -> Graph {
        let mut rng = StdRng::seed_from_u64(seed);
        let ids:Vec<String> = (0..n).map(|i| format!("v{}", i)).collect();
        let mut graph = Graph::default();
        for id in &ids { graph.vertices.push(crate::color::Vertex::new(id.as_str())); }
        while graph.edges.len() < m {
            let (a, b) = (rng.gen_range(0..n), rng.gen_range(0..n));
            if a != b { graph.edges.push(crate::color::Edge::new(ids[a].as_str(), ids[b].as_str())); }
        }
        graph
    }

    #[test]
    fn test_fitness() {
        assert!((fitness(0, 2) - 1. / 1.2).abs() < 1e-12);
        assert!(fitness(0, 3) > fitness(1, 1));
        assert!(fitness(0, 2) > fitness(0, 3));
    }

    #[test]
    fn test_params() {
        assert_eq!(GeneticParams::new(50, 10).nb_elites(), 5);
        assert_eq!(GeneticParams::new(9, 10).nb_elites(), 0);
        assert_eq!(GeneticParams::new(5, 10).nb_parents(), 3);
        assert_eq!(GeneticParams::new(1, 10).nb_parents(), 1);
        assert!(GeneticParams::default().check().is_ok());
    }

    #[test]
    fn test_invalid_population_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        for graph in &[Graph::default(), Graph::from_edges(&["a", "b"], &[("a", "b")])] {
            match genetic_with_rng(graph, GeneticParams::new(0, 10), &mut rng) {
                Err(ColoringError::InvalidPopulationSize { size }) => assert_eq!(size, 0),
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn test_empty_graph() {
        let mut rng = StdRng::seed_from_u64(0);
        let res = genetic_with_rng(&Graph::default(), GeneticParams::default(), &mut rng).unwrap();
        assert_eq!(res.chromatic_number, 0);
        assert_eq!(res.steps, 0);
        assert_eq!(res.conflicts, Some(0));
        assert!(res.colors.is_empty());
    }

    #[test]
    fn test_steps_count_chromosomes() {
        let graph = random_graph(12, 20, 1);
        let mut rng = StdRng::seed_from_u64(1);
        let res = genetic_with_rng(&graph, GeneticParams::new(20, 5), &mut rng).unwrap();
        assert_eq!(res.steps, 20 + 18 * 5);
        let res = genetic_with_rng(&graph, GeneticParams::new(20, 0), &mut rng).unwrap();
        assert_eq!(res.steps, 20);
    }

    #[test]
    fn test_reported_conflicts_match_recount() {
        for seed in 0..5 {
            let graph = random_graph(25, 80, seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let res = genetic_with_rng(&graph, GeneticParams::new(10, 5), &mut rng).unwrap();
            assert_eq!(res.conflicts, Some(count_conflicts(&graph, &res.colors)));
            assert_eq!(res.colors.len(), 25);
            assert_eq!(res.chromatic_number, res.nb_distinct_colors());
        }
    }

    #[test]
    fn test_elites_never_degrade() {
        let graph = random_graph(30, 90, 7);
        let inst = CompactInstance::from_graph(&graph).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let (_, trace) = genetic_on(
            &inst, GeneticParams::new(20, 30), &mut rng, &NeverStoppingCriterion
        ).unwrap();
        assert_eq!(trace.best_fitness.len(), 31);
        for w in trace.best_fitness.windows(2) {
            assert!(w[1] >= w[0], "best fitness decreased: {:?}", w);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let graph = random_graph(15, 30, 3);
        let res1 = genetic_with_rng(&graph, GeneticParams::new(16, 8), &mut StdRng::seed_from_u64(42)).unwrap();
        let res2 = genetic_with_rng(&graph, GeneticParams::new(16, 8), &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(res1.colors, res2.colors);
        assert_eq!(res1.conflicts, res2.conflicts);
    }

    #[test]
    fn test_triangle_is_solved() {
        let graph = Graph::from_edges(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        let mut rng = StdRng::seed_from_u64(5);
        let res = genetic_with_rng(&graph, GeneticParams::new(30, 50), &mut rng).unwrap();
        assert_eq!(res.conflicts, Some(0));
        assert_eq!(res.chromatic_number, 3);
    }

    #[test]
    fn test_mutation_repairs_single_vertex() {
        // with a single vertex every gene mutation yields color 0
        let graph = Graph::from_edges(&["a"], &[]);
        let inst = CompactInstance::from_graph(&graph).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut coloring = vec![7];
        for _ in 0..200 { mutate(&inst, &mut coloring, &mut rng); }
        assert_eq!(coloring, vec![0]);
    }

    #[test]
    fn test_crossover_takes_genes_from_parents() {
        let mut rng = StdRng::seed_from_u64(2);
        let child = crossover(&[0, 0, 0, 0], &[1, 1, 1, 1], &mut rng);
        assert_eq!(child.len(), 4);
        assert!(child.iter().all(|c| *c <= 1));
    }
}
