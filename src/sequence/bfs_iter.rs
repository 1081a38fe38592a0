use std::{collections::VecDeque, iter::FusedIterator};

use crate::engine::NeighborMode;
use crate::errors::GraphResult;
use crate::graph::Graph;

/// One visited vertex. `distance` and `parent` are only filled in advanced mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BfsVisit {
    pub vertex: usize,
    pub distance: Option<usize>,
    pub parent: Option<usize>,
}

/// Lazy breadth-first cursor over the vertices reachable from a root.
///
/// Single pass: once exhausted it stays exhausted. Ask the graph for a new
/// cursor to restart.
#[derive(Debug)]
pub struct BfsIter<'g> {
    graph: &'g Graph,
    lists: Vec<Vec<usize>>,
    visited: Vec<bool>,
    queue: VecDeque<(usize, usize, Option<usize>)>,
    advanced: bool,
}

impl<'g> BfsIter<'g> {
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }
}

impl Iterator for BfsIter<'_> {
    type Item = BfsVisit;

    fn next(&mut self) -> Option<BfsVisit> {
        let (vertex, distance, parent) = self.queue.pop_front()?;
        for &next in &self.lists[vertex] {
            if !self.visited[next] {
                self.visited[next] = true;
                self.queue.push_back((next, distance + 1, Some(vertex)));
            }
        }
        Some(if self.advanced {
            BfsVisit {
                vertex,
                distance: Some(distance),
                parent,
            }
        } else {
            BfsVisit {
                vertex,
                distance: None,
                parent: None,
            }
        })
    }
}

impl FusedIterator for BfsIter<'_> {}

impl Graph {
    pub fn bfs_iter(&self, root: usize, mode: NeighborMode, advanced: bool) -> GraphResult<BfsIter<'_>> {
        self.check_vertex(root)?;
        let lists = self.native()?.neighbor_lists(mode);
        let mut visited = vec![false; lists.len()];
        visited[root] = true;
        Ok(BfsIter {
            graph: self,
            lists,
            visited,
            queue: VecDeque::from([(root, 0, None)]),
            advanced,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advanced_mode_reports_distance_and_parent() {
        let graph = Graph::from_edges([(0, 1), (1, 2)], 3, false).expect("graph");
        let visits: Vec<BfsVisit> = graph
            .bfs_iter(0, NeighborMode::All, true)
            .expect("iter")
            .collect();
        assert_eq!(
            visits[2],
            BfsVisit {
                vertex: 2,
                distance: Some(2),
                parent: Some(1)
            }
        );
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let graph = Graph::new(1, false).expect("graph");
        let mut iter = graph.bfs_iter(0, NeighborMode::All, false).expect("iter");
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }
}
