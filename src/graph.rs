use std::collections::HashMap;
use std::hash::Hash;

/// Result of [`topological_sort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TopologicalOrder<T> {
    /// Every visited node, leaves first: a node appears only after all nodes
    /// reachable from it (unless they sit on a cycle).
    pub(crate) sorted: Vec<T>,
    /// Each cycle as the ancestor path from the re-entered node down to the
    /// node that closed it, with the re-entered node repeated at the end.
    pub(crate) cycles: Vec<Vec<T>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum DfsState {
    InStack,
    Done,
}

/// Depth-first topological sort with cycle collection.
///
/// Roots are visited in the order `nodes` yields them; `edges` returns the
/// successors of a node (the nodes it depends on). Unlike Kahn's algorithm
/// this keeps going after a cycle is found so that every cycle reachable
/// from the roots is reported.
pub(crate) fn topological_sort<T, I, F, E>(nodes: I, mut edges: F) -> TopologicalOrder<T>
where
    T: Clone + Eq + Hash,
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> E,
    E: IntoIterator<Item = T>,
{
    let mut walk = Walk {
        state: HashMap::new(),
        path: Vec::new(),
        sorted: Vec::new(),
        cycles: Vec::new(),
    };

    for node in nodes {
        walk.visit(node, &mut edges);
    }

    TopologicalOrder {
        sorted: walk.sorted,
        cycles: walk.cycles,
    }
}

struct Walk<T> {
    state: HashMap<T, DfsState>,
    path: Vec<T>,
    sorted: Vec<T>,
    cycles: Vec<Vec<T>>,
}

impl<T: Clone + Eq + Hash> Walk<T> {
    fn visit<F, E>(&mut self, node: T, edges: &mut F)
    where
        F: FnMut(&T) -> E,
        E: IntoIterator<Item = T>,
    {
        match self.state.get(&node).copied() {
            Some(DfsState::Done) => {}
            Some(DfsState::InStack) => {
                if let Some(pos) = self.path.iter().position(|n| *n == node) {
                    let mut cycle = self.path[pos..].to_vec();
                    cycle.push(node);
                    self.cycles.push(cycle);
                }
            }
            None => {
                self.state.insert(node.clone(), DfsState::InStack);
                self.path.push(node.clone());

                let successors: Vec<T> = edges(&node).into_iter().collect();
                for next in successors {
                    self.visit(next, edges);
                }

                self.path.pop();
                self.state.insert(node.clone(), DfsState::Done);
                self.sorted.push(node);
            }
        }
    }
}
