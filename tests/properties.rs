use std::collections::HashSet;

use graph_reach::{Cell, Graph, Grid};
use proptest::prelude::*;

fn edges() -> impl Strategy<Value = Vec<(u8, u8)>> {
    proptest::collection::vec((0u8..24, 0u8..24), 1..60)
}

fn grid_rows() -> impl Strategy<Value = Vec<Vec<bool>>> {
    (1usize..8, 1usize..8).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(proptest::collection::vec(any::<bool>(), cols), rows)
    })
}

/// Nodes reachable from `start`, by fixed-point iteration over the edges.
fn reachable(graph: &Graph<u8>, start: u8) -> HashSet<u8> {
    let mut seen = HashSet::new();
    seen.insert(start);
    loop {
        let mut grown = false;
        for node in graph.nodes() {
            if !seen.contains(node) {
                continue;
            }
            for next in graph.neighbors(node).unwrap_or_default() {
                grown |= seen.insert(*next);
            }
        }
        if !grown {
            return seen;
        }
    }
}

proptest! {
    #[test]
    fn traversals_visit_reachable_nodes_once(edges in edges(), directed in any::<bool>()) {
        let graph = if directed {
            Graph::build_directed(edges.clone())
        } else {
            Graph::build_undirected(edges.clone())
        };
        let start = edges[0].0;
        let expected = reachable(&graph, start);

        for order in [
            graph.depth_first(&start).unwrap(),
            graph.depth_first_recursive(&start).unwrap(),
            graph.breadth_first(&start).unwrap(),
        ] {
            let set: HashSet<u8> = order.iter().copied().collect();
            prop_assert_eq!(order.len(), set.len());
            prop_assert_eq!(&set, &expected);
            prop_assert_eq!(order[0], start);
        }
    }

    #[test]
    fn path_queries_agree(edges in edges(), directed in any::<bool>()) {
        let graph = if directed {
            Graph::build_directed(edges.clone())
        } else {
            Graph::build_undirected(edges.clone())
        };
        let nodes: Vec<u8> = graph.nodes().copied().collect();

        for &src in &nodes {
            for &dst in &nodes {
                let dfs = graph.has_path(&src, &dst).unwrap();
                let bfs = graph.has_path_bfs(&src, &dst).unwrap();
                let hops = graph.shortest_path(&src, &dst).unwrap();
                prop_assert_eq!(dfs, bfs);
                prop_assert_eq!(dfs, hops.is_some());

                if let Some(path) = graph.shortest_path_nodes(&src, &dst).unwrap() {
                    prop_assert_eq!(Some(path.len() - 1), hops);
                    for step in path.windows(2) {
                        let next = graph.neighbors(&step[0]).unwrap();
                        prop_assert!(next.contains(&&step[1]));
                    }
                }
            }
        }
    }

    #[test]
    fn undirected_distances_are_symmetric(edges in edges()) {
        let graph = Graph::build_undirected(edges.clone());
        let reversed: Vec<(u8, u8)> = edges.iter().rev().map(|&(a, b)| (b, a)).collect();
        let other = Graph::build_undirected(reversed);

        let nodes: HashSet<u8> = graph.nodes().copied().collect();
        let other_nodes: HashSet<u8> = other.nodes().copied().collect();
        prop_assert_eq!(&nodes, &other_nodes);

        for node in &nodes {
            let mut a = graph.neighbors(node).unwrap();
            let mut b = other.neighbors(node).unwrap();
            a.sort();
            b.sort();
            prop_assert_eq!(a, b);
        }

        for &src in &nodes {
            for &dst in &nodes {
                prop_assert_eq!(
                    graph.shortest_path(&src, &dst).unwrap(),
                    other.shortest_path(&dst, &src).unwrap()
                );
            }
        }
    }

    #[test]
    fn undirected_components_partition_nodes(edges in edges()) {
        let graph = Graph::build_undirected(edges);
        let comps = graph.components();

        let mut seen = HashSet::new();
        for comp in &comps {
            prop_assert!(!comp.is_empty());
            for node in comp {
                prop_assert!(seen.insert(*node), "node {} in two components", node);
            }
            // every member reaches every other member
            let reach = reachable(&graph, comp[0]);
            let members: HashSet<u8> = comp.iter().copied().collect();
            prop_assert_eq!(&reach, &members);
        }

        let nodes: HashSet<u8> = graph.nodes().copied().collect();
        prop_assert_eq!(seen, nodes);
        prop_assert_eq!(graph.connected_components_count(), comps.len());
    }

    #[test]
    fn islands_partition_open_cells(rows in grid_rows()) {
        let grid = Grid::with_predicate(rows, |&land| !land).unwrap();
        let islands = grid.islands();

        let open: HashSet<Cell> = grid.open_cells().collect();
        let mut seen = HashSet::new();
        for island in &islands {
            for &cell in island {
                prop_assert!(grid.is_open(cell));
                prop_assert!(seen.insert(cell));
            }
        }
        prop_assert_eq!(&seen, &open);
        prop_assert_eq!(grid.number_of_islands(), islands.len());

        match grid.minimum_island() {
            Some(min) => prop_assert!(islands.iter().all(|i| i.len() >= min.len())),
            None => prop_assert!(open.is_empty()),
        }
    }
}
