use crate::color::{ColoringInstance, Graph, VertexId};
use crate::error::Result;

/**
reference instance: every neighborhood query scans the whole edge list (O(E)).
Kept to check that the adjacency-list instance colors identically.
*/
#[derive(Debug)]
pub struct ScanInstance {
    /// ids[i]: external id of the vertex i
    ids: Vec<String>,
    /// number of edges of the input graph (dangling ones included)
    m: usize,
    /// edges of the graph (known endpoints only)
    edges: Vec<(VertexId,VertexId)>,
}

impl ColoringInstance for ScanInstance {
    fn nb_vertices(&self) -> usize { self.ids.len() }

    fn nb_edges(&self) -> usize { self.m }

    fn vertex_id(&self, u:VertexId) -> &str { &self.ids[u] }

    fn degree(&self, u:VertexId) -> usize {
        self.edges.iter().filter(|(a,b)| *a == u || *b == u).count()
    }

    fn neighbors(&self, u:VertexId) -> Vec<VertexId> {
        let mut res = Vec::new();
        for (a,b) in &self.edges {
            if *a == u { res.push(*b); }
            if *b == u { res.push(*a); }
        }
        res
    }

    fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }
}

impl ScanInstance {
    /** constructor from a graph. Fails if two vertices share an id. */
    pub fn from_graph(graph:&Graph) -> Result<Self> {
        let (ids, edges) = graph.resolve()?;
        Ok(Self { ids, m: graph.nb_edges(), edges })
    }
}
