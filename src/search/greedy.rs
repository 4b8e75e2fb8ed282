use std::time::Instant;

use bit_set::BitSet;
use log::debug;

use crate::color::{ColoringInstance, ColoringResult, Graph};
use crate::compact_instance::CompactInstance;
use crate::error::{ColoringError, Result};
use crate::search::first_available_color;
use crate::stopping::{NeverStoppingCriterion, StoppingCriterion};

/** colors the graph with the sequential greedy algorithm (see `greedy_on`) */
pub fn greedy(graph:&Graph) -> Result<ColoringResult> {
    greedy_with_criterion(graph, &NeverStoppingCriterion)
}

/** greedy coloring, polling the stopping criterion before each vertex */
pub fn greedy_with_criterion(graph:&Graph, stopping_criterion:&dyn StoppingCriterion) -> Result<ColoringResult> {
    let inst = CompactInstance::from_graph(graph)?;
    greedy_on(&inst, stopping_criterion)
}

/** implements a sequential greedy coloring.
    1. sort the vertices by decreasing degree (stable: ties keep the vertex order)
    2. give each vertex the smallest color none of its neighbors uses

The chromatic number is the largest color + 1 (0 on a graph without vertices).
Each vertex costs one neighbor scan (nb_edges steps) plus one step per rejected color.
*/
pub fn greedy_on<I:ColoringInstance + ?Sized>(
    inst:&I,
    stopping_criterion:&dyn StoppingCriterion,
) -> Result<ColoringResult> {
    let t_start = Instant::now();
    let n = inst.nb_vertices();
    if n == 0 { return Ok(ColoringResult::empty(None)); }
    let mut colors:Vec<usize> = vec![0 ; n];
    let mut colored:BitSet = BitSet::with_capacity(n);
    let mut steps:u64 = 0;
    for current_vertex in inst.vertices_by_degree() {
        if stopping_criterion.is_finished() { return Err(ColoringError::Stopped); }
        let mut neighbor_colors = BitSet::new();
        for neigh in inst.neighbors(current_vertex) {
            if colored.contains(neigh) { neighbor_colors.insert(colors[neigh]); }
        }
        steps += inst.nb_edges() as u64;
        colors[current_vertex] = first_available_color(&neighbor_colors, &mut steps);
        colored.insert(current_vertex);
    }
    let chromatic_number = colors.iter().max().map_or(0, |c| c+1);
    debug!("greedy: {} colors, {} steps", chromatic_number, steps);
    Ok(ColoringResult::from_colors(inst, &colors, chromatic_number, steps, t_start.elapsed(), None))
}
