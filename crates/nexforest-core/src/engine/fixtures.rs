use crate::core::models::document::Document;
use crate::core::models::ids::{EdgeKey, NodeKey, TreeKey};
use crate::core::models::options::{EdgeOptions, NodeOptions, TreeOptions};

pub struct TreeRefs {
    pub tree: TreeKey,
    pub node1: NodeKey,
    pub node2: NodeKey,
    pub node3: NodeKey,
    pub edge1: EdgeKey,
    pub edge2: EdgeKey,
}

/// Tree `t1`: `node1` (root) with children `node2` and `node3` via `edge1` and `edge2`.
pub fn create_scenario_tree() -> (Document, TreeRefs) {
    let mut doc = Document::new();
    let node1 = doc.create_node("node1", NodeOptions::new().root(true)).unwrap();
    let node2 = doc.create_node("node2", NodeOptions::new()).unwrap();
    let node3 = doc.create_node("node3", NodeOptions::new()).unwrap();
    let edge1 = doc
        .create_edge("edge1", EdgeOptions::new().source(node1).target(node2))
        .unwrap();
    let edge2 = doc
        .create_edge("edge2", EdgeOptions::new().source(node1).target(node3))
        .unwrap();
    let tree = doc
        .create_tree(
            "t1",
            TreeOptions::new()
                .nodes([node1, node2, node3])
                .edges([edge1, edge2]),
        )
        .unwrap();

    let refs = TreeRefs {
        tree,
        node1,
        node2,
        node3,
        edge1,
        edge2,
    };
    (doc, refs)
}

pub struct ForestRefs {
    pub tree: TreeKey,
    pub r1: NodeKey,
    pub a: NodeKey,
    pub n: NodeKey,
    pub b: NodeKey,
    pub r2: NodeKey,
    pub leaf: NodeKey,
}

/// A path `r1 - a - n - b - r2` with roots `r1` and `r2`, plus `leaf` hanging off `n`.
pub fn create_two_root_forest() -> (Document, ForestRefs) {
    let mut doc = Document::new();
    let tree = doc.create_tree("forest", TreeOptions::new()).unwrap();

    let node = |doc: &mut Document, id: &str, root: bool| {
        let key = doc.create_node(id, NodeOptions::new().root(root)).unwrap();
        doc.add_node(tree, key).unwrap();
        key
    };
    let r1 = node(&mut doc, "r1", true);
    let a = node(&mut doc, "a", false);
    let n = node(&mut doc, "n", false);
    let b = node(&mut doc, "b", false);
    let r2 = node(&mut doc, "r2", true);
    let leaf = node(&mut doc, "leaf", false);

    for (id, source, target) in [
        ("e1", r1, a),
        ("e2", a, n),
        ("e3", n, b),
        ("e4", b, r2),
        ("e5", n, leaf),
    ] {
        let edge = doc
            .create_edge(id, EdgeOptions::new().source(source).target(target))
            .unwrap();
        doc.add_edge(tree, edge).unwrap();
    }

    let refs = ForestRefs {
        tree,
        r1,
        a,
        n,
        b,
        r2,
        leaf,
    };
    (doc, refs)
}
