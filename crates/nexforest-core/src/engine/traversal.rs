use super::error::{ForestError, Result};
use crate::core::graph::Graph;
use crate::core::models::document::Document;
use crate::core::models::ids::{EdgeKey, NodeKey, TreeKey};
use std::collections::HashSet;
use tracing::{instrument, trace};

/// One answer per root, in the order the roots were resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerRoot<T> {
    entries: Vec<(NodeKey, T)>,
}

impl<T> PerRoot<T> {
    /// The answer computed relative to `root`.
    pub fn get(&self, root: NodeKey) -> Option<&T> {
        self.entries
            .iter()
            .find(|(key, _)| *key == root)
            .map(|(_, value)| value)
    }

    pub fn roots(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.entries.iter().map(|(root, _)| *root)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &T)> {
        self.entries.iter().map(|(root, value)| (*root, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> IntoIterator for PerRoot<T> {
    type Item = (NodeKey, T);
    type IntoIter = std::vec::IntoIter<(NodeKey, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Document {
    /// The roots a traversal runs against.
    ///
    /// A non-empty explicit list is used in the given order, keeping only the
    /// first occurrence of a repeated root. Otherwise the tree's current
    /// [`roots`](Document::roots) are used.
    ///
    /// # Errors
    ///
    /// [`ForestError::NodeNotInTree`] for an explicit root outside the tree and
    /// [`ForestError::NoRoots`] when no root is left to run against.
    pub fn resolve_roots(&self, tree: TreeKey, roots: Option<&[NodeKey]>) -> Result<Vec<NodeKey>> {
        let resolved = match roots {
            Some(explicit) if !explicit.is_empty() => {
                let mut seen = HashSet::with_capacity(explicit.len());
                let mut unique = Vec::with_capacity(explicit.len());
                for &root in explicit {
                    self.require_member(tree, root)?;
                    if seen.insert(root) {
                        unique.push(root);
                    }
                }
                unique
            }
            _ => self.roots(tree)?,
        };

        if resolved.is_empty() {
            return Err(ForestError::NoRoots {
                tree: self.tree_entry(tree)?.id.clone(),
            });
        }
        trace!(roots = resolved.len(), "roots resolved");
        Ok(resolved)
    }

    /// The parent of `node` relative to each root.
    ///
    /// `None` for a root itself and for roots that cannot reach `node`.
    #[instrument(skip_all, fields(tree = ?tree))]
    pub fn parent(
        &self,
        tree: TreeKey,
        node: NodeKey,
        roots: Option<&[NodeKey]>,
    ) -> Result<PerRoot<Option<NodeKey>>> {
        self.per_root(tree, &[node], roots, |graph, root| graph.parent(node, root))
    }

    /// The neighbours of `node` other than its parent, relative to each root.
    #[instrument(skip_all, fields(tree = ?tree))]
    pub fn children(
        &self,
        tree: TreeKey,
        node: NodeKey,
        roots: Option<&[NodeKey]>,
    ) -> Result<PerRoot<Vec<NodeKey>>> {
        self.per_root(tree, &[node], roots, |graph, root| {
            let parent = graph.parent(node, root);
            graph
                .adjacent_nodes(node)
                .into_iter()
                .filter(|&neighbour| Some(neighbour) != parent)
                .collect()
        })
    }

    /// The nodes between `node` and each root, nearest first and the root last.
    #[instrument(skip_all, fields(tree = ?tree))]
    pub fn ancestors(
        &self,
        tree: TreeKey,
        node: NodeKey,
        roots: Option<&[NodeKey]>,
    ) -> Result<PerRoot<Vec<NodeKey>>> {
        self.per_root(tree, &[node], roots, |graph, root| graph.ancestors(node, root))
    }

    /// The nodes below `node` relative to each root, in breadth-first order.
    #[instrument(skip_all, fields(tree = ?tree))]
    pub fn descendants(
        &self,
        tree: TreeKey,
        node: NodeKey,
        roots: Option<&[NodeKey]>,
    ) -> Result<PerRoot<Vec<NodeKey>>> {
        self.per_root(tree, &[node], roots, |graph, root| graph.descendants(node, root))
    }

    /// The deepest node shared by the root paths of `a` and `b`, per root.
    #[instrument(skip_all, fields(tree = ?tree))]
    pub fn lowest_common_ancestor(
        &self,
        tree: TreeKey,
        a: NodeKey,
        b: NodeKey,
        roots: Option<&[NodeKey]>,
    ) -> Result<PerRoot<Option<NodeKey>>> {
        self.per_root(tree, &[a, b], roots, |graph, root| {
            graph.lowest_common_ancestor(a, b, root)
        })
    }

    fn per_root<T>(
        &self,
        tree: TreeKey,
        queried: &[NodeKey],
        roots: Option<&[NodeKey]>,
        single_root: impl Fn(&Graph<NodeKey, EdgeKey>, NodeKey) -> T,
    ) -> Result<PerRoot<T>> {
        let tree_entity = self.tree_entry(tree)?;
        for &node in queried {
            self.require_member(tree, node)?;
        }
        let roots = self.resolve_roots(tree, roots)?;

        let entries = roots
            .into_iter()
            .map(|root| (root, single_root(&tree_entity.graph, root)))
            .collect();
        Ok(PerRoot { entries })
    }

    fn require_member(&self, tree: TreeKey, node: NodeKey) -> Result<()> {
        if self.has_node(tree, node) {
            return Ok(());
        }
        Err(ForestError::NodeNotInTree {
            node: self
                .node(node)
                .map_or_else(|| format!("{:?}", node), |entity| entity.id.clone()),
            tree: self.tree_entry(tree)?.id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::options::{NodeOptions, TreeOptions};
    use crate::engine::fixtures::{create_scenario_tree, create_two_root_forest};
    use std::collections::HashSet;

    mod scenario {
        use super::*;

        #[test]
        fn parent_of_leaf_is_the_root() {
            let (doc, refs) = create_scenario_tree();
            let parents = doc.parent(refs.tree, refs.node2, None).unwrap();

            assert_eq!(parents.len(), 1);
            assert_eq!(parents.get(refs.node1), Some(&Some(refs.node1)));
        }

        #[test]
        fn children_of_root_are_both_leaves() {
            let (doc, refs) = create_scenario_tree();
            let children = doc.children(refs.tree, refs.node1, None).unwrap();

            assert_eq!(children.roots().collect::<Vec<_>>(), vec![refs.node1]);
            assert_eq!(children.get(refs.node1), Some(&vec![refs.node2, refs.node3]));
        }

        #[test]
        fn root_has_no_parent() {
            let (doc, refs) = create_scenario_tree();
            let parents = doc.parent(refs.tree, refs.node1, None).unwrap();
            assert_eq!(parents.get(refs.node1), Some(&None));
        }
    }

    mod multi_root {
        use super::*;

        #[test]
        fn ancestors_has_one_entry_per_root() {
            let (doc, f) = create_two_root_forest();
            let ancestors = doc.ancestors(f.tree, f.n, None).unwrap();

            assert_eq!(ancestors.roots().collect::<Vec<_>>(), vec![f.r1, f.r2]);
            assert_eq!(ancestors.get(f.r1), Some(&vec![f.a, f.r1]));
            assert_eq!(ancestors.get(f.r2), Some(&vec![f.b, f.r2]));

            let graph = doc.tree(f.tree).unwrap().graph();
            for (root, value) in ancestors.iter() {
                assert_eq!(value, &graph.ancestors(f.n, root));
            }
        }

        #[test]
        fn descendants_follow_breadth_first_order_per_root() {
            let (doc, f) = create_two_root_forest();
            let descendants = doc.descendants(f.tree, f.n, None).unwrap();

            assert_eq!(descendants.get(f.r1), Some(&vec![f.b, f.leaf, f.r2]));
            assert_eq!(descendants.get(f.r2), Some(&vec![f.a, f.leaf, f.r1]));
        }

        #[test]
        fn lowest_common_ancestor_depends_on_root() {
            let (doc, f) = create_two_root_forest();
            let lca = doc.lowest_common_ancestor(f.tree, f.leaf, f.b, None).unwrap();

            assert_eq!(lca.get(f.r1), Some(&Some(f.n)));
            assert_eq!(lca.get(f.r2), Some(&Some(f.b)));
        }

        #[test]
        fn children_and_parent_partition_adjacency() {
            let (doc, f) = create_two_root_forest();
            let parents = doc.parent(f.tree, f.n, None).unwrap();
            let children = doc.children(f.tree, f.n, None).unwrap();
            let adjacency: HashSet<NodeKey> =
                doc.tree(f.tree).unwrap().adjacent_nodes(f.n).into_iter().collect();

            for (root, kids) in children.iter() {
                let parent = parents.get(root).copied().flatten().unwrap();
                let mut union: HashSet<NodeKey> = kids.iter().copied().collect();
                union.insert(parent);
                assert_eq!(union, adjacency);
                assert!(!kids.contains(&parent));
            }
        }

        #[test]
        fn explicit_roots_are_used_as_given() {
            let (mut doc, f) = create_two_root_forest();
            doc.node_mut(f.r1).unwrap().root = false;
            doc.node_mut(f.r2).unwrap().root = false;

            let parents = doc.parent(f.tree, f.n, Some(&[f.a])).unwrap();

            assert_eq!(parents.roots().collect::<Vec<_>>(), vec![f.a]);
            assert_eq!(parents.get(f.a), Some(&Some(f.a)));
        }

        #[test]
        fn repeated_explicit_roots_collapse_to_first_occurrence() {
            let (doc, f) = create_two_root_forest();
            let parents = doc.parent(f.tree, f.n, Some(&[f.r2, f.r1, f.r2, f.r1])).unwrap();

            assert_eq!(parents.len(), 2);
            assert_eq!(parents.roots().collect::<Vec<_>>(), vec![f.r2, f.r1]);
            assert_eq!(
                doc.resolve_roots(f.tree, Some(&[f.r1, f.r1])).unwrap(),
                vec![f.r1]
            );
        }

        #[test]
        fn into_iter_yields_owned_pairs_in_root_order() {
            let (doc, f) = create_two_root_forest();
            let pairs: Vec<_> = doc.parent(f.tree, f.n, None).unwrap().into_iter().collect();
            assert_eq!(pairs, vec![(f.r1, Some(f.a)), (f.r2, Some(f.b))]);
        }
    }

    mod preconditions {
        use super::*;

        #[test]
        fn rootless_tree_fails_without_explicit_roots() {
            let (mut doc, refs) = create_scenario_tree();
            doc.node_mut(refs.node1).unwrap().root = false;

            for roots in [None, Some(&[][..])] {
                assert_eq!(
                    doc.descendants(refs.tree, refs.node1, roots),
                    Err(ForestError::NoRoots {
                        tree: "t1".to_string()
                    })
                );
            }
        }

        #[test]
        fn default_roots_are_resolved_at_call_time() {
            let (mut doc, refs) = create_scenario_tree();
            doc.node_mut(refs.node3).unwrap().root = true;

            let parents = doc.parent(refs.tree, refs.node2, None).unwrap();
            assert_eq!(parents.roots().collect::<Vec<_>>(), vec![refs.node1, refs.node3]);
            assert_eq!(parents.get(refs.node3), Some(&Some(refs.node1)));
        }

        #[test]
        fn query_and_root_nodes_must_be_members() {
            let (mut doc, refs) = create_scenario_tree();
            let stray = doc.create_node("stray", NodeOptions::new().root(true)).unwrap();

            assert!(matches!(
                doc.ancestors(refs.tree, stray, None),
                Err(ForestError::NodeNotInTree { .. })
            ));
            assert!(matches!(
                doc.ancestors(refs.tree, refs.node2, Some(&[stray])),
                Err(ForestError::NodeNotInTree { .. })
            ));
        }

        #[test]
        fn unreachable_nodes_yield_empty_answers() {
            let (mut doc, refs) = create_scenario_tree();
            let island = doc.create_node("island", NodeOptions::new()).unwrap();
            doc.add_node(refs.tree, island).unwrap();

            let ancestors = doc.ancestors(refs.tree, island, None).unwrap();
            let lca = doc.lowest_common_ancestor(refs.tree, island, refs.node2, None).unwrap();

            assert_eq!(ancestors.get(refs.node1), Some(&Vec::new()));
            assert_eq!(lca.get(refs.node1), Some(&None));
        }

        #[test]
        fn empty_tree_has_no_roots() {
            let mut doc = Document::new();
            let tree = doc.create_tree("empty", TreeOptions::new()).unwrap();
            assert!(doc.roots(tree).unwrap().is_empty());
            assert!(matches!(
                doc.resolve_roots(tree, None),
                Err(ForestError::NoRoots { .. })
            ));
        }
    }
}
