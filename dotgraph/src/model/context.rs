//! The factories that the model uses to create its objects.
//!
//! A graph stores the context it was created with, and hands it down to the
//! subgraphs that it creates. Replacing a factory lets a host program
//! customize every node, edge or subgraph without wrapping the model types.

use super::edge::{Edge, EdgeTarget};
use super::graph::{RootGraph, Subgraph};
use super::node::Node;
use crate::core::error::DotError;
use std::fmt;

pub type NodeFactory = fn(&str) -> Node;
pub type EdgeFactory = fn(Vec<EdgeTarget>) -> Result<Edge, DotError>;
pub type SubgraphFactory = fn(Option<&str>) -> Subgraph;
/// Takes the id, the 'directed' flag and the 'strict' flag.
pub type RootGraphFactory = fn(Option<&str>, bool, bool) -> RootGraph;

#[derive(Clone, Copy)]
pub struct ModelsContext {
    pub node: NodeFactory,
    pub edge: EdgeFactory,
    pub subgraph: SubgraphFactory,
    pub root: RootGraphFactory,
}

fn make_node(id: &str) -> Node {
    Node::new(id)
}

fn make_subgraph(id: Option<&str>) -> Subgraph {
    Subgraph::new(id)
}

fn make_root(id: Option<&str>, directed: bool, strict: bool) -> RootGraph {
    let graph = RootGraph::new(directed).with_strict(strict);
    match id {
        Some(id) => graph.with_id(id),
        None => graph,
    }
}

impl Default for ModelsContext {
    fn default() -> Self {
        Self {
            node: make_node,
            edge: Edge::new,
            subgraph: make_subgraph,
            root: make_root,
        }
    }
}

impl ModelsContext {
    /// Creates a root graph with the root factory. The graph, and the
    /// subgraphs it creates, use this context.
    pub fn create_root(
        &self,
        id: Option<&str>,
        directed: bool,
        strict: bool,
    ) -> RootGraph {
        (self.root)(id, directed, strict).with_context(*self)
    }
}

impl fmt::Debug for ModelsContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelsContext").finish_non_exhaustive()
    }
}
