//! Root graphs and subgraphs of the graph model.
//!
//! Both kinds of graph share the `GraphBase` data, and most of their API
//! comes from the default methods of `ClusterContainer`.

use super::attributes::{AttributeKind, Attributes, HasAttributes, HasComment, Value};
use super::context::ModelsContext;
use super::edge::{resolve_targets, Edge, TargetSpec};
use super::node::Node;
use crate::adt::map::{OrderedMap, Values};
use crate::core::error::DotError;

/// The attributes that apply to every graph, node or edge of a cluster that
/// does not override them. Printed as `graph [...]`, `node [...]` and
/// `edge [...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultAttributes {
    pub graph: Attributes,
    pub node: Attributes,
    pub edge: Attributes,
}

impl DefaultAttributes {
    fn new(graph_kind: AttributeKind) -> Self {
        Self {
            graph: Attributes::new(graph_kind),
            node: Attributes::new(AttributeKind::Node),
            edge: Attributes::new(AttributeKind::Edge),
        }
    }
}

/// The data that root graphs and subgraphs have in common.
#[derive(Debug, Clone)]
pub struct GraphBase {
    id: Option<String>,
    comment: Option<String>,
    values: Attributes,
    defaults: DefaultAttributes,
    nodes: OrderedMap<String, Node>,
    edges: Vec<Edge>,
    subgraphs: Vec<Subgraph>,
    context: ModelsContext,
}

impl GraphBase {
    fn new(id: Option<String>, kind: AttributeKind) -> Self {
        Self {
            id,
            comment: None,
            values: Attributes::new(kind),
            defaults: DefaultAttributes::new(kind),
            nodes: OrderedMap::new(),
            edges: Vec::new(),
            subgraphs: Vec::new(),
            context: ModelsContext::default(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The attributes of the graph itself, printed as `key = value;`.
    pub fn values(&self) -> &Attributes {
        &self.values
    }

    pub fn defaults(&self) -> &DefaultAttributes {
        &self.defaults
    }

    pub fn context(&self) -> &ModelsContext {
        &self.context
    }

    /// Returns true if the graph has no attributes, nodes, edges or
    /// subgraphs.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
            && self.defaults.graph.is_empty()
            && self.defaults.node.is_empty()
            && self.defaults.edge.is_empty()
            && self.nodes.is_empty()
            && self.edges.is_empty()
            && self.subgraphs.is_empty()
    }
}

// The factory context is not part of the content of the graph.
impl PartialEq for GraphBase {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.comment == other.comment
            && self.values == other.values
            && self.defaults == other.defaults
            && self.nodes == other.nodes
            && self.edges == other.edges
            && self.subgraphs == other.subgraphs
    }
}

/// Graphs that contain nodes, edges and subgraphs.
pub trait ClusterContainer: HasAttributes + HasComment {
    fn base(&self) -> &GraphBase;
    fn base_mut(&mut self) -> &mut GraphBase;

    fn id(&self) -> Option<&str> {
        self.base().id()
    }

    /// Returns the node \p id, and creates it if it does not exist.
    fn node(&mut self, id: &str) -> &mut Node {
        let make = self.base().context.node;
        self.base_mut()
            .nodes
            .get_or_insert_with(id.to_string(), || make(id))
    }

    /// Like `node`, and also applies \p attrs and then \p configure to the
    /// node.
    fn node_with<I, K, V, F>(&mut self, id: &str, attrs: I, configure: F) -> &mut Node
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
        F: FnOnce(&mut Node),
    {
        let node = self.node(id);
        node.apply(attrs);
        configure(node);
        node
    }

    /// Adds \p node, replacing the node with the same id.
    fn add_node(&mut self, node: Node) -> &mut Node {
        let id = node.id().to_string();
        self.base_mut().nodes.insert_and_get(id, node)
    }

    fn get_node(&self, id: &str) -> Option<&Node> {
        self.base().nodes.get(id)
    }

    fn get_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.base_mut().nodes.get_mut(id)
    }

    fn has_node(&self, id: &str) -> bool {
        self.base().nodes.has(id)
    }

    /// Removes the node \p id. Edges that refer to it are kept.
    fn remove_node(&mut self, id: &str) -> Option<Node> {
        self.base_mut().nodes.remove(id)
    }

    fn nodes(&self) -> Values<'_, String, Node> {
        self.base().nodes.values()
    }

    /// Returns the subgraph \p id, and creates it if it does not exist.
    fn subgraph(&mut self, id: &str) -> &mut Subgraph {
        let base = self.base_mut();
        let idx = match base.subgraphs.iter().position(|s| s.id() == Some(id)) {
            Some(idx) => idx,
            None => {
                let context = base.context;
                let subgraph = (context.subgraph)(Some(id)).with_context(context);
                base.subgraphs.push(subgraph);
                base.subgraphs.len() - 1
            }
        };
        &mut base.subgraphs[idx]
    }

    /// Like `subgraph`, and also applies \p attrs and then \p configure to
    /// the subgraph.
    fn subgraph_with<I, K, V, F>(
        &mut self,
        id: &str,
        attrs: I,
        configure: F,
    ) -> &mut Subgraph
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
        F: FnOnce(&mut Subgraph),
    {
        let subgraph = self.subgraph(id);
        subgraph.apply(attrs);
        configure(subgraph);
        subgraph
    }

    /// Creates a subgraph without an id.
    fn anonymous_subgraph(&mut self) -> &mut Subgraph {
        let base = self.base_mut();
        let context = base.context;
        let subgraph = (context.subgraph)(None).with_context(context);
        base.subgraphs.push(subgraph);
        let idx = base.subgraphs.len() - 1;
        &mut base.subgraphs[idx]
    }

    /// Adds \p subgraph. A subgraph with the same id is replaced.
    fn add_subgraph(&mut self, subgraph: Subgraph) -> &mut Subgraph {
        let subgraphs = &mut self.base_mut().subgraphs;
        let existing = match subgraph.id() {
            Some(id) => subgraphs.iter().position(|s| s.id() == Some(id)),
            None => None,
        };
        let idx = match existing {
            Some(idx) => {
                subgraphs[idx] = subgraph;
                idx
            }
            None => {
                subgraphs.push(subgraph);
                subgraphs.len() - 1
            }
        };
        &mut subgraphs[idx]
    }

    fn get_subgraph(&self, id: &str) -> Option<&Subgraph> {
        self.base().subgraphs.iter().find(|s| s.id() == Some(id))
    }

    fn get_subgraph_mut(&mut self, id: &str) -> Option<&mut Subgraph> {
        self.base_mut()
            .subgraphs
            .iter_mut()
            .find(|s| s.id() == Some(id))
    }

    fn has_subgraph(&self, id: &str) -> bool {
        self.get_subgraph(id).is_some()
    }

    fn remove_subgraph(&mut self, id: &str) -> Option<Subgraph> {
        let subgraphs = &mut self.base_mut().subgraphs;
        let idx = subgraphs.iter().position(|s| s.id() == Some(id))?;
        Some(subgraphs.remove(idx))
    }

    fn subgraphs(&self) -> &[Subgraph] {
        &self.base().subgraphs
    }

    /// Creates an edge between \p targets with the edge factory and adds it
    /// to the graph. Fails if there are fewer than two targets or a target
    /// is malformed.
    fn edge<I, T>(&mut self, targets: I) -> Result<&mut Edge, DotError>
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetSpec>,
    {
        let specs: Vec<TargetSpec> = targets.into_iter().map(Into::into).collect();
        let resolved = resolve_targets(specs)?;
        let edge = (self.base().context.edge)(resolved)?;
        Ok(self.add_edge(edge))
    }

    /// Like `edge`, and also applies \p attrs to the edge.
    fn edge_with<I, T, A, K, V>(&mut self, targets: I, attrs: A) -> Result<&mut Edge, DotError>
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetSpec>,
        A: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let edge = self.edge(targets)?;
        edge.apply(attrs);
        Ok(edge)
    }

    fn add_edge(&mut self, edge: Edge) -> &mut Edge {
        let edges = &mut self.base_mut().edges;
        edges.push(edge);
        let idx = edges.len() - 1;
        &mut edges[idx]
    }

    fn edges(&self) -> &[Edge] {
        &self.base().edges
    }

    fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.base_mut().edges
    }

    /// Removes the edge at position \p index.
    fn remove_edge(&mut self, index: usize) -> Option<Edge> {
        let edges = &mut self.base_mut().edges;
        if index >= edges.len() {
            return None;
        }
        Some(edges.remove(index))
    }

    fn defaults(&self) -> &DefaultAttributes {
        &self.base().defaults
    }

    fn defaults_mut(&mut self) -> &mut DefaultAttributes {
        &mut self.base_mut().defaults
    }

    /// Merges \p attrs into the default node attributes: `node [...]`.
    fn node_defaults<I, K, V>(&mut self, attrs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.defaults_mut().node.apply(attrs)
    }

    /// Merges \p attrs into the default edge attributes: `edge [...]`.
    fn edge_defaults<I, K, V>(&mut self, attrs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.defaults_mut().edge.apply(attrs)
    }

    /// Merges \p attrs into the default graph attributes: `graph [...]`.
    fn graph_defaults<I, K, V>(&mut self, attrs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.defaults_mut().graph.apply(attrs)
    }
}

/// The top-level graph of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct RootGraph {
    base: GraphBase,
    directed: bool,
    strict: bool,
}

impl RootGraph {
    pub fn new(directed: bool) -> Self {
        Self {
            base: GraphBase::new(None, AttributeKind::Graph),
            directed,
            strict: false,
        }
    }

    pub fn digraph() -> Self {
        Self::new(true)
    }

    pub fn graph() -> Self {
        Self::new(false)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.base.id = Some(id.into());
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Replaces the factories of this graph and of its subgraphs.
    pub fn with_context(mut self, context: ModelsContext) -> Self {
        set_context(&mut self.base, context);
        self
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.base.id = id;
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    pub fn strict(&self) -> bool {
        self.strict
    }
}

fn set_context(base: &mut GraphBase, context: ModelsContext) {
    base.context = context;
    for subgraph in base.subgraphs.iter_mut() {
        set_context(&mut subgraph.base, context);
    }
}

/// Returns true for the ids of clusters: "cluster" and "cluster_*".
pub fn is_cluster_id(id: Option<&str>) -> bool {
    match id {
        Some(id) => id == "cluster" || id.starts_with("cluster_"),
        None => false,
    }
}

/// A subgraph. Subgraphs whose id starts with "cluster_" are clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct Subgraph {
    base: GraphBase,
}

impl Subgraph {
    pub fn new(id: Option<&str>) -> Self {
        let kind = Self::kind_for(id);
        Self {
            base: GraphBase::new(id.map(|s| s.to_string()), kind),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    fn kind_for(id: Option<&str>) -> AttributeKind {
        if is_cluster_id(id) {
            AttributeKind::ClusterSubgraph
        } else {
            AttributeKind::Subgraph
        }
    }

    pub fn is_cluster(&self) -> bool {
        is_cluster_id(self.base.id())
    }

    /// Changes the id. The attribute lists follow the cluster convention of
    /// the new id.
    pub fn set_id(&mut self, id: Option<String>) {
        let kind = Self::kind_for(id.as_deref());
        self.base.id = id;
        self.base.values.set_kind(kind);
        self.base.defaults.graph.set_kind(kind);
    }

    pub fn with_context(mut self, context: ModelsContext) -> Self {
        set_context(&mut self.base, context);
        self
    }
}

macro_rules! graph_traits {
    ($($ty:ident),*) => {
        $(
            impl HasAttributes for $ty {
                fn attributes(&self) -> &Attributes {
                    &self.base.values
                }
                fn attributes_mut(&mut self) -> &mut Attributes {
                    &mut self.base.values
                }
            }

            impl HasComment for $ty {
                fn comment(&self) -> Option<&str> {
                    self.base.comment.as_deref()
                }
                fn set_comment(&mut self, comment: Option<String>) {
                    self.base.comment = comment;
                }
            }

            impl ClusterContainer for $ty {
                fn base(&self) -> &GraphBase {
                    &self.base
                }
                fn base_mut(&mut self) -> &mut GraphBase {
                    &mut self.base
                }
            }
        )*
    };
}

graph_traits!(RootGraph, Subgraph);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::edge::{EdgeTarget, NodeRef};

    #[test]
    fn nodes_are_unique() {
        let mut g = RootGraph::digraph();
        g.node("a").set("color", "red");
        g.node("b");
        g.node("a").set("shape", "box");
        assert_eq!(g.nodes().len(), 2);
        let a = g.get_node("a").unwrap();
        assert_eq!(a.attributes().len(), 2);

        // Adding a node replaces the old one in place.
        g.add_node(Node::new("a"));
        let ids: Vec<&str> = g.nodes().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(g.get_node("a").unwrap().attributes().is_empty());

        assert!(g.remove_node("a").is_some());
        assert!(!g.has_node("a"));
        assert!(g.remove_node("a").is_none());
    }

    #[test]
    fn node_with() {
        let mut g = RootGraph::graph();
        let mut called = false;
        g.node_with("n", [("label", "N")], |node| {
            node.set("width", 1.5);
            called = true;
        });
        assert!(called);
        let n = g.get_node("n").unwrap();
        assert_eq!(n.get("label"), Some(&Value::from("N")));
        assert_eq!(n.get("width"), Some(&Value::Number(1.5)));
    }

    #[test]
    fn subgraphs() {
        let mut g = RootGraph::digraph();
        g.subgraph("cluster_a").set("label", "A");
        g.subgraph("cluster_a").node("x");
        g.anonymous_subgraph().node("y");
        g.anonymous_subgraph();
        assert_eq!(g.subgraphs().len(), 3);

        let a = g.get_subgraph("cluster_a").unwrap();
        assert!(a.is_cluster());
        assert!(a.has_node("x"));
        assert_eq!(a.attributes().kind(), AttributeKind::ClusterSubgraph);

        g.subgraph_with("s", [("rank", "same")], |s| {
            s.node("z");
        });
        assert!(!g.get_subgraph("s").unwrap().is_cluster());
        assert!(g.get_subgraph("s").unwrap().has_node("z"));

        assert!(g.remove_subgraph("cluster_a").is_some());
        assert!(!g.has_subgraph("cluster_a"));
        assert_eq!(g.subgraphs().len(), 3);
    }

    #[test]
    fn cluster_convention() {
        assert!(Subgraph::new(Some("cluster_x")).is_cluster());
        assert!(Subgraph::new(Some("cluster")).is_cluster());
        assert!(!Subgraph::new(Some("x_cluster")).is_cluster());
        assert!(!Subgraph::new(Some("clusterx")).is_cluster());
        assert!(!Subgraph::anonymous().is_cluster());

        let mut s = Subgraph::new(Some("plain"));
        s.set_id(Some("cluster_1".to_string()));
        assert!(s.is_cluster());
        assert!(s.try_set("label", "x").is_ok());
    }

    #[test]
    fn edges() {
        let mut g = RootGraph::digraph();
        let a = g.node("a").clone();
        g.edge_with([TargetSpec::from(&a), "b:p".into()], [("weight", 2)])
            .unwrap();
        g.edge(vec![TargetSpec::from("b"), vec!["c", "d"].into()]).unwrap();
        assert_eq!(g.edges().len(), 2);
        assert_eq!(
            g.edges()[0].targets()[1],
            EdgeTarget::Node(NodeRef::new("b").with_port("p"))
        );
        assert_eq!(g.edges()[0].get("weight"), Some(&Value::Number(2.)));
        // Edges do not create nodes.
        assert!(!g.has_node("b"));

        let err = g.subgraph("s").edge(Vec::<&str>::new()).unwrap_err();
        assert!(matches!(err, DotError::EdgeTarget(ref m) if m.contains("#1")));

        assert!(g.remove_edge(5).is_none());
        assert!(g.remove_edge(0).is_some());
        assert_eq!(g.edges().len(), 1);
    }

    #[test]
    fn defaults() {
        let mut g = RootGraph::digraph();
        g.node_defaults([("shape", "box")]);
        g.edge_defaults([("color", "blue")]);
        g.graph_defaults([("rankdir", "LR")]);
        g.node_defaults([("color", "red")]);
        assert_eq!(g.defaults().node.len(), 2);
        assert_eq!(g.defaults().edge.len(), 1);
        assert_eq!(g.defaults().graph.kind(), AttributeKind::Graph);
        assert!(!g.base().is_empty());
    }

    #[test]
    fn equality_ignores_context() {
        fn other(id: &str) -> Node {
            Node::new(id)
        }
        let context = ModelsContext {
            node: other,
            ..ModelsContext::default()
        };
        let a = RootGraph::digraph().with_id("G");
        let b = RootGraph::digraph().with_id("G").with_context(context);
        assert_eq!(a, b);
        assert_ne!(a, RootGraph::graph().with_id("G"));
    }
}
