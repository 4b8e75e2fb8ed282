use std::cmp::{Ordering, Reverse};
use std::time::Instant;

use bit_set::BitSet;
use log::debug;
use priority_queue::PriorityQueue;

use crate::color::{ColoringInstance, ColoringResult, Graph, VertexId};
use crate::compact_instance::CompactInstance;
use crate::error::{ColoringError, Result};
use crate::search::first_available_color;
use crate::stopping::{NeverStoppingCriterion, StoppingCriterion};

/// selection key of an uncolored vertex
#[derive(Debug, PartialEq, Eq)]
struct DSatInfo {
    /// number of edges joining the vertex to an already colored vertex
    dsat: usize,
    degree: usize,
    /// position in the vertex sequence (earlier wins)
    rank: Reverse<VertexId>,
}

impl Ord for DSatInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dsat.cmp(&other.dsat)
            .then_with(|| self.degree.cmp(&other.degree))
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

impl PartialOrd for DSatInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/** colors the graph with the DSATUR greedy (see `dsatur_greedy_on`) */
pub fn dsatur_greedy(graph:&Graph) -> Result<ColoringResult> {
    dsatur_greedy_with_criterion(graph, &NeverStoppingCriterion)
}

/** DSATUR greedy, polling the stopping criterion before each vertex selection */
pub fn dsatur_greedy_with_criterion(graph:&Graph, stopping_criterion:&dyn StoppingCriterion) -> Result<ColoringResult> {
    let inst = CompactInstance::from_graph(graph)?;
    dsatur_greedy_on(&inst, stopping_criterion)
}

/** implements a greedy DSATUR algorithm.
    1. choose the uncolored vertex with the largest saturation, break ties by the largest
       degree, then by the earliest position in the vertex sequence
    2. give it the smallest color none of its neighbors uses
    3. every edge joining it to an uncolored vertex raises that vertex saturation by one
    4. repeat until every vertex is colored

The saturation counts colored-neighbor incidences, not distinct neighbor colors:
a repeated edge to a colored vertex counts twice.
The chromatic number is the largest color + 1 (0 on a graph without vertices).
*/
pub fn dsatur_greedy_on<I:ColoringInstance + ?Sized>(
    inst:&I,
    stopping_criterion:&dyn StoppingCriterion,
) -> Result<ColoringResult> {
    let t_start = Instant::now();
    let n = inst.nb_vertices();
    if n == 0 { return Ok(ColoringResult::empty(None)); }
    let mut remaining_vertices:PriorityQueue<VertexId, DSatInfo> = PriorityQueue::with_capacity(n);
    for v in inst.vertices() {
        remaining_vertices.push(v, DSatInfo { dsat:0, degree:inst.degree(v), rank:Reverse(v) });
    }
    let mut colors:Vec<usize> = vec![0 ; n]; // colors[v] -> color assigned to vertex v
    let mut colored:BitSet = BitSet::with_capacity(n);
    let mut steps:u64 = 0;
    while !remaining_vertices.is_empty() {
        if stopping_criterion.is_finished() { return Err(ColoringError::Stopped); }
        steps += remaining_vertices.len() as u64; // selection examines every uncolored vertex
        let current_vertex = match remaining_vertices.pop() {
            None => break,
            Some((v,_)) => v
        };
        // assign it the first color its neighbors do not use
        let mut neighbor_colors = BitSet::new();
        for neigh in inst.neighbors(current_vertex) {
            if colored.contains(neigh) { neighbor_colors.insert(colors[neigh]); }
        }
        steps += inst.nb_edges() as u64;
        colors[current_vertex] = first_available_color(&neighbor_colors, &mut steps);
        colored.insert(current_vertex);
        // update saturation information (one increment per incident edge)
        for neigh in inst.neighbors(current_vertex) {
            if !colored.contains(neigh) {
                remaining_vertices.change_priority_by(&neigh, |p| { p.dsat += 1; });
            }
        }
        steps += inst.nb_edges() as u64;
    }
    let chromatic_number = colors.iter().max().map_or(0, |c| c+1);
    debug!("dsatur: {} colors, {} steps", chromatic_number, steps);
    Ok(ColoringResult::from_colors(inst, &colors, chromatic_number, steps, t_start.elapsed(), None))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_order() {
        // path a-b-c-d plus pendant e on d: degrees a1 b2 c2 d2 e1
        let graph = Graph::from_edges(
            &["a", "b", "c", "d", "e"],
            &[("a","b"), ("b","c"), ("c","d"), ("d","e")]
        );
        let res = dsatur_greedy(&graph).unwrap();
        // b is picked first (degree 2, earliest), then c (saturation 1, larger degree than a)
        assert_eq!(res.color_of("b"), Some(0));
        assert_eq!(res.color_of("a"), Some(1));
        assert_eq!(res.color_of("c"), Some(1));
        assert_eq!(res.color_of("d"), Some(0));
        assert_eq!(res.color_of("e"), Some(1));
        assert_eq!(res.chromatic_number, 2);
    }

    #[test]
    fn test_saturation_counts_repeated_edges() {
        // x is joined twice to a, y once. Once a is colored, x has saturation 2 and y
        // saturation 1, so x is colored before y although y has a larger degree.
        // x and y are adjacent: the first one gets color 1, the second color 2.
        let graph = Graph::from_edges(
            &["a", "x", "y", "l1", "l2", "m1", "m2"],
            &[
                ("a","x"), ("x","a"), ("a","y"), ("x","y"),
                ("y","l1"), ("y","l2"), ("a","m1"), ("a","m2"),
            ]
        );
        // degrees: a5 x3 y4, leaves 1
        let inst = CompactInstance::from_graph(&graph).unwrap();
        assert_eq!(inst.degree(1), 3);
        assert_eq!(inst.degree(2), 4);
        let res = dsatur_greedy_on(&inst, &NeverStoppingCriterion).unwrap();
        assert_eq!(res.color_of("a"), Some(0));
        assert_eq!(res.color_of("x"), Some(1));
        assert_eq!(res.color_of("y"), Some(2));
        assert_eq!(res.chromatic_number, 3);
        assert_eq!(res.nb_conflicts(), 0);
    }

    #[test]
    fn test_steps_single_edge() {
        // round 1: 2 candidates + scan 1 + update 1. round 2: 1 candidate + scan 1
        // + 1 rejected color + update 1.
        let graph = Graph::from_edges(&["a", "b"], &[("a","b")]);
        let res = dsatur_greedy(&graph).unwrap();
        assert_eq!(res.steps, (2 + 1 + 1) + (1 + 1 + 1 + 1));
    }

    #[test]
    fn test_stopped() {
        let graph = Graph::from_edges(&["a", "b"], &[("a","b")]);
        let flag = crate::stopping::CancelFlag::new();
        flag.cancel();
        assert!(matches!(
            dsatur_greedy_with_criterion(&graph, &flag),
            Err(ColoringError::Stopped)
        ));
    }
}
