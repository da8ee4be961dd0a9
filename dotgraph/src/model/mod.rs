//! The graph model: an object API for building and inspecting graphs.

pub mod attributes;
pub mod context;
pub mod edge;
pub mod graph;
pub mod keys;
pub mod node;

pub use attributes::{AttributeKind, Attributes, HasAttributes, HasComment, Value};
pub use context::ModelsContext;
pub use edge::{Edge, EdgeTarget, NodeRef, TargetSpec};
pub use graph::{ClusterContainer, DefaultAttributes, GraphBase, RootGraph, Subgraph};
pub use node::Node;
