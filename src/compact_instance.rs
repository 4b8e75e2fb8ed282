use crate::color::{ColoringInstance, Graph, VertexId};
use crate::error::Result;

/**
adjacency-list view of a graph, built once per coloring in O(V+E).
Answers the same neighborhood queries as a full edge scan, in the same order.
*/
#[derive(Debug)]
pub struct CompactInstance {
    /// ids[i]: external id of the vertex i
    ids: Vec<String>,
    /// number of edges of the input graph (dangling ones included)
    m: usize,
    /// edges of the graph (known endpoints only)
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
    /// degrees[i]: number of edges incident to i
    degrees: Vec<usize>,
}

impl ColoringInstance for CompactInstance {
    fn nb_vertices(&self) -> usize { self.ids.len() }

    fn nb_edges(&self) -> usize { self.m }

    fn vertex_id(&self, u:VertexId) -> &str { &self.ids[u] }

    fn degree(&self, u:VertexId) -> usize { self.degrees[u] }

    fn neighbors(&self, u:VertexId) -> Vec<VertexId> { self.adj_list[u].clone() }

    fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }
}

impl CompactInstance {
    /** constructor from a graph. Fails if two vertices share an id. */
    pub fn from_graph(graph:&Graph) -> Result<Self> {
        let (ids, edges) = graph.resolve()?;
        let n = ids.len();
        let mut adj_list = vec![Vec::new() ; n];
        let mut degrees = vec![0 ; n];
        for (a,b) in &edges {
            adj_list[*a].push(*b);
            adj_list[*b].push(*a);
            degrees[*a] += 1;
            if a != b { degrees[*b] += 1; }
        }
        Ok(Self { ids, m: graph.nb_edges(), edges, adj_list, degrees })
    }
}
