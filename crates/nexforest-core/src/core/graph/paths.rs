use super::Graph;
use slotmap::Key;
use std::collections::{HashMap, VecDeque};

/// Breadth-first search tree rooted at one vertex.
struct Traversal<N> {
    order: Vec<N>,
    parent: HashMap<N, N>,
    depth: HashMap<N, usize>,
}

impl<N: Key> Traversal<N> {
    /// Vertices from the root down to `node`, both inclusive.
    fn path_to(&self, node: N) -> Option<Vec<N>> {
        if !self.depth.contains_key(&node) {
            return None;
        }
        let mut path = vec![node];
        let mut current = node;
        while let Some(&up) = self.parent.get(&current) {
            path.push(up);
            current = up;
        }
        path.reverse();
        Some(path)
    }
}

impl<N: Key, E: Key> Graph<N, E> {
    fn breadth_first(&self, root: N) -> Option<Traversal<N>> {
        let start = *self.node_index.get(root)?;

        let mut traversal = Traversal {
            order: vec![root],
            parent: HashMap::new(),
            depth: HashMap::from([(root, 0)]),
        };
        let mut queue = VecDeque::from([start]);

        while let Some(index) = queue.pop_front() {
            let node = self.inner[index];
            let depth = traversal.depth[&node];
            for next in self.neighbor_indices(index) {
                let key = self.inner[next];
                if traversal.depth.contains_key(&key) {
                    continue;
                }
                traversal.depth.insert(key, depth + 1);
                traversal.parent.insert(key, node);
                traversal.order.push(key);
                queue.push_back(next);
            }
        }

        Some(traversal)
    }

    /// Shortest path from `root` to `node`, both inclusive.
    ///
    /// Returns `None` if either vertex is absent or `node` cannot be reached.
    pub fn path(&self, root: N, node: N) -> Option<Vec<N>> {
        self.breadth_first(root)?.path_to(node)
    }

    /// The neighbour of `node` that lies on its path to `root`.
    ///
    /// `None` when `node` is the root itself or is not reachable from it.
    pub fn parent(&self, node: N, root: N) -> Option<N> {
        let path = self.path(root, node)?;
        path.len().checked_sub(2).map(|i| path[i])
    }

    /// Every vertex on the path from `node` up to `root`, nearest first.
    pub fn ancestors(&self, node: N, root: N) -> Vec<N> {
        let Some(mut path) = self.path(root, node) else {
            return Vec::new();
        };
        path.pop();
        path.reverse();
        path
    }

    /// Every vertex whose path to `root` passes through `node`, in breadth-first order.
    pub fn descendants(&self, node: N, root: N) -> Vec<N> {
        let Some(traversal) = self.breadth_first(root) else {
            return Vec::new();
        };
        let Some(&node_depth) = traversal.depth.get(&node) else {
            return Vec::new();
        };

        traversal
            .order
            .iter()
            .copied()
            .filter(|candidate| traversal.depth[candidate] > node_depth)
            .filter(|&candidate| {
                let mut current = candidate;
                while let Some(&up) = traversal.parent.get(&current) {
                    if up == node {
                        return true;
                    }
                    if traversal.depth[&up] <= node_depth {
                        return false;
                    }
                    current = up;
                }
                false
            })
            .collect()
    }

    /// The deepest vertex shared by the root paths of `a` and `b`.
    pub fn lowest_common_ancestor(&self, a: N, b: N, root: N) -> Option<N> {
        let traversal = self.breadth_first(root)?;
        let path_a = traversal.path_to(a)?;
        let path_b = traversal.path_to(b)?;

        path_a
            .iter()
            .zip(path_b.iter())
            .take_while(|(x, y)| x == y)
            .last()
            .map(|(x, _)| *x)
    }
}
