use crate::fixed_max_vec::FixedMaxVec;

pub type NodeId = usize;

/// Weights and path lengths. Rectangle extents are u32, so a sum over any set of rectangles fits.
pub type Cost = u64;

/// Digraph is a weighted DAG whose nodes 0..n are already in topological order: every edge goes from a
/// lower to a higher node id. Edges carry no weight of their own; traversing an edge costs the weight of
/// its source node. That way the edge structure can be built once and reused while only the node weights
/// change between computations.
///
/// All buffers are allocated in `new` and only reset afterwards.
#[derive(Clone, Debug)]
pub struct Digraph {
    outgoing_edges: Vec<FixedMaxVec<NodeId>>,
    weights: Vec<Cost>,
    longest_paths: Vec<Cost>,
}

impl Digraph {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            outgoing_edges: (0..num_nodes).map(|_| FixedMaxVec::new(num_nodes)).collect(),
            weights: vec![0; num_nodes],
            longest_paths: vec![0; num_nodes],
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.weights.len()
    }

    /// Panics unless `from < to < num_nodes`. Edges that break the topological order mean the caller has
    /// mis-encoded its graph.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        assert!(
            from < to,
            "edge {} -> {} does not follow the topological node order",
            from,
            to
        );
        assert!(
            to < self.num_nodes(),
            "edge {} -> {} ends outside the {} nodes of the graph",
            from,
            to,
            self.num_nodes()
        );
        self.outgoing_edges[from].push(to);
    }

    /// Set the cost of every edge leaving `node`.
    pub fn set_node_weight(&mut self, node: NodeId, weight: Cost) {
        assert!(
            node < self.num_nodes(),
            "node {} is outside the {} nodes of the graph",
            node,
            self.num_nodes()
        );
        self.weights[node] = weight;
    }

    pub fn outgoing_edges(&self, node: NodeId) -> &[NodeId] {
        self.outgoing_edges[node].as_slice()
    }

    /// Compute the longest path ending at every node, with node 0 (and any other node without
    /// predecessors) at distance 0. Gives up and returns None as soon as some node's distance plus its
    /// own weight is strictly greater than `stop_if_longer_than`.
    ///
    /// One forward sweep over the nodes, O(nodes + edges).
    pub fn compute_longest_paths(&mut self, stop_if_longer_than: Cost) -> Option<&[Cost]> {
        self.longest_paths.fill(0);
        for node in 0..self.num_nodes() {
            // All predecessors have lower ids, so longest_paths[node] is final here.
            let reach = match self.longest_paths[node].checked_add(self.weights[node]) {
                Some(reach) if reach <= stop_if_longer_than => reach,
                _ => return None,
            };
            for &successor in self.outgoing_edges[node].iter() {
                let distance = &mut self.longest_paths[successor];
                if reach > *distance {
                    *distance = reach;
                }
            }
        }
        Some(&self.longest_paths)
    }

    /// Remove all edges and zero all weights. Keeps the allocated storage.
    pub fn reset(&mut self) {
        for edges in &mut self.outgoing_edges {
            edges.reset();
        }
        self.weights.fill(0);
    }
}

#[cfg(test)]
mod digraph_tests {
    use proptest::prelude::*;

    use super::*;

    fn graph_with_weights(num_nodes: usize, edges: &[(NodeId, NodeId)], weights: &[Cost]) -> Digraph {
        let mut graph = Digraph::new(num_nodes);
        for &(from, to) in edges {
            graph.add_edge(from, to);
        }
        for (node, &weight) in weights.iter().enumerate() {
            graph.set_node_weight(node, weight);
        }
        graph
    }

    #[test]
    fn no_edges_gives_all_zero_distances() {
        // === given ===
        let mut graph = graph_with_weights(4, &[], &[3, 1, 4, 1]);

        // === when ===
        let longest_paths = graph.compute_longest_paths(10).map(|d| d.to_vec());

        // === then ===
        assert_eq!(longest_paths, Some(vec![0, 0, 0, 0]));
    }

    #[test]
    fn empty_graph_succeeds() {
        let mut graph = Digraph::new(0);
        assert_eq!(graph.compute_longest_paths(0), Some(&[][..]));
    }

    #[test]
    fn chain_accumulates_source_weights() {
        // === given ===
        let mut graph = graph_with_weights(3, &[(0, 1), (1, 2)], &[2, 3, 4]);

        // === when ===
        let longest_paths = graph.compute_longest_paths(9).map(|d| d.to_vec());

        // === then ===
        assert_eq!(longest_paths, Some(vec![0, 2, 5]));
    }

    #[test]
    fn diamond_takes_the_longer_branch() {
        // === given ===
        // 0 -> 1 -> 3 and 0 -> 2 -> 3, with node 2 heavier than node 1.
        let mut graph = graph_with_weights(4, &[(0, 1), (0, 2), (1, 3), (2, 3)], &[1, 2, 5, 1]);

        // === when ===
        let longest_paths = graph.compute_longest_paths(100).map(|d| d.to_vec());

        // === then ===
        assert_eq!(longest_paths, Some(vec![0, 1, 1, 6]));
    }

    #[test]
    fn bound_is_inclusive() {
        // === given ===
        let mut graph = graph_with_weights(2, &[(0, 1)], &[3, 3]);

        // === then ===
        assert!(graph.compute_longest_paths(6).is_some());
        assert!(graph.compute_longest_paths(5).is_none());
    }

    #[test]
    fn single_heavy_node_aborts_without_edges() {
        let mut graph = graph_with_weights(3, &[], &[1, 8, 1]);
        assert!(graph.compute_longest_paths(7).is_none());
        assert!(graph.compute_longest_paths(8).is_some());
    }

    #[test]
    fn reset_clears_edges_and_weights() {
        // === given ===
        let mut graph = graph_with_weights(3, &[(0, 1), (1, 2), (0, 2)], &[5, 5, 5]);
        assert!(graph.compute_longest_paths(10).is_none());

        // === when ===
        graph.reset();

        // === then ===
        assert!(graph.outgoing_edges(0).is_empty());
        assert_eq!(graph.compute_longest_paths(0).map(|d| d.to_vec()), Some(vec![0, 0, 0]));

        // === when ===
        graph.add_edge(1, 2);
        graph.set_node_weight(1, 4);

        // === then ===
        assert_eq!(graph.compute_longest_paths(4).map(|d| d.to_vec()), Some(vec![0, 0, 4]));
    }

    #[test]
    fn weights_can_be_overwritten_between_computations() {
        let mut graph = graph_with_weights(2, &[(0, 1)], &[1, 1]);
        assert_eq!(graph.compute_longest_paths(5).map(|d| d.to_vec()), Some(vec![0, 1]));
        graph.set_node_weight(0, 3);
        assert_eq!(graph.compute_longest_paths(5).map(|d| d.to_vec()), Some(vec![0, 3]));
    }

    #[test]
    fn overflowing_weights_count_as_exceeding_the_bound() {
        let mut graph = graph_with_weights(2, &[(0, 1)], &[Cost::MAX, 1]);
        assert!(graph.compute_longest_paths(Cost::MAX).is_none());
    }

    #[test]
    #[should_panic(expected = "topological node order")]
    fn backwards_edge_panics() {
        let mut graph = Digraph::new(3);
        graph.add_edge(2, 1);
    }

    #[test]
    #[should_panic(expected = "topological node order")]
    fn self_loop_panics() {
        let mut graph = Digraph::new(3);
        graph.add_edge(1, 1);
    }

    #[test]
    #[should_panic(expected = "outside the 3 nodes")]
    fn edge_to_missing_node_panics() {
        let mut graph = Digraph::new(3);
        graph.add_edge(0, 3);
    }

    #[test]
    #[should_panic(expected = "outside the 2 nodes")]
    fn weight_on_missing_node_panics() {
        let mut graph = Digraph::new(2);
        graph.set_node_weight(2, 1);
    }

    fn arbitrary_dag() -> impl Strategy<Value = (usize, Vec<(NodeId, NodeId)>, Vec<Cost>)> {
        (1usize..8).prop_flat_map(|num_nodes| {
            let edges = proptest::collection::vec((0..num_nodes, 0..num_nodes), 0..num_nodes * 2)
                .prop_map(|pairs| {
                    let mut edges: Vec<(NodeId, NodeId)> = pairs
                        .into_iter()
                        .filter(|(a, b)| a != b)
                        .map(|(a, b)| (a.min(b), a.max(b)))
                        .collect();
                    edges.sort_unstable();
                    edges.dedup();
                    edges
                });
            let weights = proptest::collection::vec(0u64..20, num_nodes);
            (Just(num_nodes), edges, weights)
        })
    }

    proptest! {
        #[test]
        fn raising_the_bound_never_loses_feasibility((num_nodes, edges, weights) in arbitrary_dag(),
                                                     bound in 0u64..100,
                                                     extra in 0u64..100) {
            // === given ===
            let mut graph = graph_with_weights(num_nodes, &edges, &weights);

            // === when ===
            let tight = graph.compute_longest_paths(bound).is_some();
            let loose = graph.compute_longest_paths(bound + extra).is_some();

            // === then ===
            prop_assert!(!tight || loose);
        }

        #[test]
        fn distances_satisfy_every_edge((num_nodes, edges, weights) in arbitrary_dag()) {
            // === given ===
            let mut graph = graph_with_weights(num_nodes, &edges, &weights);

            // === when ===
            let longest_paths = graph.compute_longest_paths(Cost::MAX).unwrap().to_vec();

            // === then ===
            for &(from, to) in &edges {
                prop_assert!(longest_paths[to] >= longest_paths[from] + weights[from]);
            }
            for node in 0..num_nodes {
                let predecessors: Vec<NodeId> =
                    edges.iter().filter(|(_, to)| *to == node).map(|(from, _)| *from).collect();
                let expected = predecessors
                    .iter()
                    .map(|&from| longest_paths[from] + weights[from])
                    .max()
                    .unwrap_or(0);
                prop_assert_eq!(longest_paths[node], expected);
            }
        }
    }
}
