use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{ColoringResult, Graph};
use crate::compact_instance::CompactInstance;
use crate::error::{ColoringError, Result};
use crate::search::dsatur_greedy::dsatur_greedy_on;
use crate::search::genetic::{GeneticParams, genetic_on};
use crate::search::greedy::greedy_on;
use crate::search::welsh_powell::welsh_powell_on;
use crate::stopping::StoppingCriterion;

/** the four interchangeable colorers */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// degree-ordered sequential greedy
    Greedy,
    /// one independent color class per pass
    WelshPowell,
    /// most saturated vertex first
    Dsatur,
    /// population-based stochastic search
    Genetic,
}

impl Algorithm {
    /// every algorithm, in comparison order
    pub const ALL:[Algorithm; 4] = [
        Algorithm::Greedy, Algorithm::WelshPowell, Algorithm::Dsatur, Algorithm::Genetic
    ];

    /// command-line name of the algorithm
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy",
            Algorithm::WelshPowell => "welsh-powell",
            Algorithm::Dsatur => "dsatur",
            Algorithm::Genetic => "genetic",
        }
    }

    /// true if the algorithm may return conflicting edges
    pub fn may_conflict(&self) -> bool { *self == Algorithm::Genetic }

    /** runs the algorithm on the graph. `params` and `rng` are only used by the genetic colorer. */
    pub fn run<R:Rng + ?Sized>(
        &self,
        graph:&Graph,
        params:GeneticParams,
        rng:&mut R,
        stopping_criterion:&dyn StoppingCriterion,
    ) -> Result<ColoringResult> {
        let inst = CompactInstance::from_graph(graph)?;
        self.run_on(&inst, params, rng, stopping_criterion)
    }

    fn run_on<R:Rng + ?Sized>(
        &self,
        inst:&CompactInstance,
        params:GeneticParams,
        rng:&mut R,
        stopping_criterion:&dyn StoppingCriterion,
    ) -> Result<ColoringResult> {
        match self {
            Algorithm::Greedy => greedy_on(inst, stopping_criterion),
            Algorithm::WelshPowell => welsh_powell_on(inst, stopping_criterion),
            Algorithm::Dsatur => dsatur_greedy_on(inst, stopping_criterion),
            Algorithm::Genetic => genetic_on(inst, params, rng, stopping_criterion).map(|(res, _)| res),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ColoringError;

    fn from_str(s:&str) -> Result<Self> {
        Algorithm::ALL.iter()
            .find(|a| a.name() == s)
            .copied()
            .ok_or_else(|| ColoringError::Unknown { kind: "algorithm", name: s.to_string() })
    }
}

/** one row of a side-by-side comparison */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmStats {
    /// algorithm name
    pub name: String,
    /// chromatic number reported by the algorithm
    pub chromatic_number: usize,
    /// wall-clock time spent coloring
    pub execution_time: Duration,
    /// algorithm-defined cost counter
    pub steps: u64,
    /// conflicting edges (0 for the constructive algorithms)
    pub conflicts: usize,
}

impl AlgorithmStats {
    /// summary of a result produced by the algorithm
    pub fn new(algorithm:Algorithm, res:&ColoringResult) -> Self {
        Self {
            name: algorithm.name().to_string(),
            chromatic_number: res.chromatic_number,
            execution_time: res.execution_time,
            steps: res.steps,
            conflicts: res.nb_conflicts(),
        }
    }
}

/** runs every algorithm on the same graph (the adjacency list is built once) */
pub fn run_all<R:Rng + ?Sized>(
    graph:&Graph,
    params:GeneticParams,
    rng:&mut R,
    stopping_criterion:&dyn StoppingCriterion,
) -> Result<Vec<(Algorithm, ColoringResult)>> {
    let inst = CompactInstance::from_graph(graph)?;
    let mut res = Vec::with_capacity(Algorithm::ALL.len());
    for algorithm in Algorithm::ALL.iter() {
        let coloring = algorithm.run_on(&inst, params, rng, stopping_criterion)?;
        info!(
            "{} took {:.3} seconds. Nb colors: {}",
            algorithm, coloring.execution_time.as_secs_f32(), coloring.chromatic_number
        );
        res.push((*algorithm, coloring));
    }
    Ok(res)
}

/** compares the four algorithms on the same graph */
pub fn compare_all<R:Rng + ?Sized>(
    graph:&Graph,
    params:GeneticParams,
    rng:&mut R,
    stopping_criterion:&dyn StoppingCriterion,
) -> Result<Vec<AlgorithmStats>> {
    Ok(run_all(graph, params, rng, stopping_criterion)?
        .iter()
        .map(|(algorithm, res)| AlgorithmStats::new(*algorithm, res))
        .collect())
}
