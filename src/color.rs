use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use std::time::Duration;

use bit_set::BitSet;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{ColoringError, Result};

/** Vertex index (position of the vertex in the graph vertex sequence) */
pub type VertexId = usize;

/** vertex of the input graph. Only the id matters to the colorers. */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// unique identifier
    pub id: String,
    /// display label
    #[serde(default)]
    pub label: String,
    /// display abscissa
    #[serde(default)]
    pub x: f64,
    /// display ordinate
    #[serde(default)]
    pub y: f64,
}

impl Vertex {
    /// creates a vertex labelled by its id, placed at the origin
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self { label: id.clone(), id, x: 0., y: 0. }
    }
}

/** undirected edge between two vertex ids. The ids may be unknown to the graph. */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// first endpoint
    pub source: String,
    /// second endpoint
    pub target: String,
}

impl Edge {
    /// creates an edge between source and target
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self { source: source.into(), target: target.into() }
    }
}

/**
Graph coloring input. The vertex order is the tie-break basis of every colorer.
Edges may repeat or reference unknown ids; such edges are tolerated.
Self-loops are not supported.
*/
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// vertex sequence
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    /// edge sequence
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    /// creates a graph from its vertices and edges
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Self {
        Self { vertices, edges }
    }

    /// builds a graph from plain ids and id pairs
    pub fn from_edges(ids: &[&str], edges: &[(&str, &str)]) -> Self {
        Self {
            vertices: ids.iter().map(|id| Vertex::new(*id)).collect(),
            edges: edges.iter().map(|(a, b)| Edge::new(*a, *b)).collect(),
        }
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.vertices.len() }

    /// number of edges (dangling and repeated edges included)
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /**
    resolves the graph into vertex ids (in sequence order) and index pairs.
    Edges with an unknown endpoint are dropped.
    Fails if two vertices share an id.
    */
    pub(crate) fn resolve(&self) -> Result<(Vec<String>, Vec<(VertexId, VertexId)>)> {
        let mut index: HashMap<&str, VertexId> = HashMap::with_capacity(self.vertices.len());
        for (i, v) in self.vertices.iter().enumerate() {
            if index.insert(v.id.as_str(), i).is_some() {
                return Err(ColoringError::DuplicateVertexId { id: v.id.clone() });
            }
        }
        let edges = self.edges.iter()
            .filter_map(|e| match (index.get(e.source.as_str()), index.get(e.target.as_str())) {
                (Some(a), Some(b)) => Some((*a, *b)),
                _ => None, // dangling edge
            })
            .collect();
        let ids = self.vertices.iter().map(|v| v.id.clone()).collect();
        Ok((ids, edges))
    }
}

/** output of a colorer */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColoringResult {
    /// colors[id]: color index of the vertex id
    pub colors: BTreeMap<String, usize>,
    /// number of colors, as defined by the algorithm that produced the result
    pub chromatic_number: usize,
    /// wall-clock time spent coloring
    pub execution_time: Duration,
    /// algorithm-defined cost counter
    pub steps: u64,
    /// number of conflicting edges, only given by algorithms that may produce them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<usize>,
}

impl ColoringResult {
    /// result returned on a graph without vertices
    pub fn empty(conflicts: Option<usize>) -> Self {
        Self {
            colors: BTreeMap::new(),
            chromatic_number: 0,
            execution_time: Duration::ZERO,
            steps: 0,
            conflicts,
        }
    }

    /// builds a result from per-index colors
    pub fn from_colors<I: ColoringInstance + ?Sized>(
        inst: &I,
        colors: &[usize],
        chromatic_number: usize,
        steps: u64,
        execution_time: Duration,
        conflicts: Option<usize>,
    ) -> Self {
        let colors = inst.vertices()
            .map(|u| (inst.vertex_id(u).to_string(), colors[u]))
            .collect();
        Self { colors, chromatic_number, execution_time, steps, conflicts }
    }

    /// color of the vertex id (None if the vertex is not colored)
    pub fn color_of(&self, id: &str) -> Option<usize> { self.colors.get(id).copied() }

    /// number of conflicts (0 when the algorithm does not report them)
    pub fn nb_conflicts(&self) -> usize { self.conflicts.unwrap_or(0) }

    /// number of distinct colors in the mapping
    pub fn nb_distinct_colors(&self) -> usize {
        self.colors.values().copied().collect::<BitSet>().len()
    }
}

/**
Neighborhood queries used by the colorers.
Vertices are referred to by their position in the graph vertex sequence.
*/
pub trait ColoringInstance {
    /// number of vertices
    fn nb_vertices(&self) -> usize;

    /// number of edges of the input, counting dangling and repeated ones.
    /// Each neighbor scan is charged this many steps.
    fn nb_edges(&self) -> usize;

    /// external id of the vertex u
    fn vertex_id(&self, u: VertexId) -> &str;

    /// number of known-endpoint edges incident to u (a self-loop counts once)
    fn degree(&self, u: VertexId) -> usize;

    /// one entry per edge incidence: duplicates repeat, a self-loop lists u twice
    fn neighbors(&self, u: VertexId) -> Vec<VertexId>;

    /// edges with both endpoints known, as index pairs
    fn edges(&self) -> &[(VertexId, VertexId)];

    /// vertex indices in sequence order
    fn vertices(&self) -> Range<VertexId> { 0..self.nb_vertices() }

    /// vertices sorted by decreasing degree (ties keep the sequence order)
    fn vertices_by_degree(&self) -> Vec<VertexId> {
        let mut res: Vec<VertexId> = self.vertices().collect();
        res.sort_by_key(|u| Reverse(self.degree(*u)));
        res
    }

    /// number of edges whose endpoints share a color
    fn nb_conflicts(&self, colors: &[usize]) -> usize {
        self.edges().iter().filter(|(a, b)| colors[*a] == colors[*b]).count()
    }

    /// logs statistics of the instance
    fn display_statistics(&self) {
        info!("{} \t vertices", self.nb_vertices());
        info!("{} \t edges", self.nb_edges());
        let degrees: Vec<usize> = self.vertices().map(|u| self.degree(u)).collect();
        if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
            info!("{} \t min degree", min);
            info!("{} \t max degree", max);
        }
    }
}

/** number of distinct colors in a per-index coloring */
pub fn nb_distinct_colors(colors: &[usize]) -> usize {
    colors.iter().copied().collect::<BitSet>().len()
}

/** number of edges of the graph whose (known) endpoints share a color */
pub fn count_conflicts(graph: &Graph, colors: &BTreeMap<String, usize>) -> usize {
    graph.edges.iter()
        .filter(|e| match (colors.get(&e.source), colors.get(&e.target)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        })
        .count()
}

/** verdict of the checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// proper and complete coloring, with its number of distinct colors
    Ok(usize),
    /// a vertex of the graph is not colored
    MissingVertex(String),
    /// a colored id is not a vertex of the graph
    UnknownVertex(String),
    /// an edge joins two vertices of the same color
    Conflict(String, String),
}

/**
checks that the coloring covers exactly the graph vertices and that no edge
joins two vertices of the same color.
*/
pub fn checker(graph: &Graph, colors: &BTreeMap<String, usize>) -> CheckerResult {
    // check that all vertices are colored
    for v in &graph.vertices {
        if !colors.contains_key(&v.id) {
            return CheckerResult::MissingVertex(v.id.clone());
        }
    }
    if colors.len() != graph.nb_vertices() {
        let known: Vec<&str> = graph.vertices.iter().map(|v| v.id.as_str()).collect();
        if let Some(id) = colors.keys().find(|id| !known.contains(&id.as_str())) {
            return CheckerResult::UnknownVertex(id.clone());
        }
    }
    // check conflicts
    for e in &graph.edges {
        if let (Some(a), Some(b)) = (colors.get(&e.source), colors.get(&e.target)) {
            if a == b {
                return CheckerResult::Conflict(e.source.clone(), e.target.clone());
            }
        }
    }
    // if ok: return the number of colors
    CheckerResult::Ok(colors.values().copied().collect::<BitSet>().len())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn coloring(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
        pairs.iter().map(|(id, c)| (id.to_string(), *c)).collect()
    }

    #[test]
    fn test_resolve_drops_dangling_edges() {
        let graph = Graph::from_edges(&["a", "b"], &[("a", "b"), ("a", "z"), ("y", "b")]);
        let (ids, edges) = graph.resolve().unwrap();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(edges, vec![(0, 1)]);
    }

    #[test]
    fn test_resolve_rejects_duplicate_ids() {
        let graph = Graph::from_edges(&["a", "b", "a"], &[]);
        match graph.resolve() {
            Err(ColoringError::DuplicateVertexId { id }) => assert_eq!(id, "a"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_checker() {
        let graph = Graph::from_edges(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "x")]);
        assert_eq!(
            checker(&graph, &coloring(&[("a", 0), ("b", 1), ("c", 0)])),
            CheckerResult::Ok(2)
        );
        assert_eq!(
            checker(&graph, &coloring(&[("a", 0), ("b", 1)])),
            CheckerResult::MissingVertex("c".to_string())
        );
        assert_eq!(
            checker(&graph, &coloring(&[("a", 0), ("b", 1), ("c", 1)])),
            CheckerResult::Conflict("b".to_string(), "c".to_string())
        );
        assert_eq!(
            checker(&graph, &coloring(&[("a", 0), ("b", 1), ("c", 0), ("d", 2)])),
            CheckerResult::UnknownVertex("d".to_string())
        );
    }

    #[test]
    fn test_count_conflicts_counts_repeated_edges() {
        let graph = Graph::from_edges(&["a", "b", "c"], &[("a", "b"), ("b", "a"), ("b", "c")]);
        let colors = coloring(&[("a", 0), ("b", 0), ("c", 1)]);
        assert_eq!(count_conflicts(&graph, &colors), 2);
    }

    #[test]
    fn test_nb_distinct_colors() {
        assert_eq!(nb_distinct_colors(&[]), 0);
        assert_eq!(nb_distinct_colors(&[3, 0, 3, 5]), 3);
    }

    #[test]
    fn test_graph_json_defaults() {
        let graph: Graph = serde_json::from_str(
            r#"{"vertices":[{"id":"a"},{"id":"b","label":"B","x":1.5,"y":2}],"edges":[{"source":"a","target":"b"}]}"#
        ).unwrap();
        assert_eq!(graph.nb_vertices(), 2);
        assert_eq!(graph.vertices[0].label, "");
        assert_eq!(graph.vertices[1].x, 1.5);
        assert_eq!(graph.edges[0], Edge::new("a", "b"));
    }
}
