use std::time::Instant;

use bit_set::BitSet;
use log::debug;

use crate::color::{ColoringInstance, ColoringResult, Graph};
use crate::compact_instance::CompactInstance;
use crate::error::{ColoringError, Result};
use crate::stopping::{NeverStoppingCriterion, StoppingCriterion};

/** colors the graph with the Welsh-Powell algorithm (see `welsh_powell_on`) */
pub fn welsh_powell(graph:&Graph) -> Result<ColoringResult> {
    welsh_powell_with_criterion(graph, &NeverStoppingCriterion)
}

/** Welsh-Powell coloring, polling the stopping criterion before each color class */
pub fn welsh_powell_with_criterion(graph:&Graph, stopping_criterion:&dyn StoppingCriterion) -> Result<ColoringResult> {
    let inst = CompactInstance::from_graph(graph)?;
    welsh_powell_on(&inst, stopping_criterion)
}

/** implements the Welsh-Powell algorithm. That colors vertices one color at a time
    1. sort the vertices by decreasing degree (stable)
    2. scan the sorted vertices: an uncolored vertex joins the current class
       if none of its neighbors joined it during this pass
    3. assign the current color to the class, and start over with a new color
       until every vertex is colored

The chromatic number is the number of classes built.
Each uncolored vertex examined costs a neighbor scan (nb_edges steps), each class one step.
*/
pub fn welsh_powell_on<I:ColoringInstance + ?Sized>(
    inst:&I,
    stopping_criterion:&dyn StoppingCriterion,
) -> Result<ColoringResult> {
    let t_start = Instant::now();
    let n = inst.nb_vertices();
    if n == 0 { return Ok(ColoringResult::empty(None)); }
    let sorted_vertices = inst.vertices_by_degree();
    let mut colors:Vec<usize> = vec![0 ; n];
    let mut colored:BitSet = BitSet::with_capacity(n);
    let mut nb_colored:usize = 0;
    let mut current_color:usize = 0;
    let mut steps:u64 = 0;
    while nb_colored < n { // add a new color until everything is colored
        if stopping_criterion.is_finished() { return Err(ColoringError::Stopped); }
        let mut color_class:BitSet = BitSet::with_capacity(n);
        for v in sorted_vertices.iter().filter(|v| !colored.contains(**v)) {
            steps += inst.nb_edges() as u64;
            if inst.neighbors(*v).iter().all(|w| !color_class.contains(*w)) {
                color_class.insert(*v);
            }
        }
        for v in color_class.iter() {
            colors[v] = current_color;
            colored.insert(v);
            nb_colored += 1;
        }
        current_color += 1;
        steps += 1;
    }
    debug!("welsh-powell: {} colors, {} steps", current_color, steps);
    Ok(ColoringResult::from_colors(inst, &colors, current_color, steps, t_start.elapsed(), None))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_classes_follow_degree_order() {
        // a-b, a-c, b-c, c-d: c has degree 3, a and b degree 2, d degree 1
        let graph = Graph::from_edges(
            &["a", "b", "c", "d"],
            &[("a","b"), ("a","c"), ("b","c"), ("c","d")]
        );
        let res = welsh_powell(&graph).unwrap();
        assert_eq!(res.color_of("c"), Some(0));
        assert_eq!(res.color_of("a"), Some(1));
        assert_eq!(res.color_of("d"), Some(1));
        assert_eq!(res.color_of("b"), Some(2));
        assert_eq!(res.chromatic_number, 3);
    }

    #[test]
    fn test_steps_single_edge() {
        // pass 1 examines 2 vertices, pass 2 examines 1 vertex; 2 classes
        let graph = Graph::from_edges(&["a", "b"], &[("a","b")]);
        let res = welsh_powell(&graph).unwrap();
        assert_eq!(res.steps, 2 + 1 + 1 + 1);
        assert_eq!(res.chromatic_number, 2);
    }

    #[test]
    fn test_edgeless_graph_single_class() {
        let graph = Graph::from_edges(&["a", "b", "c"], &[("a","x")]);
        let res = welsh_powell(&graph).unwrap();
        assert_eq!(res.chromatic_number, 1);
        assert_eq!(res.steps, 3 + 1);
    }
}
