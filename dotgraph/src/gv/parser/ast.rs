//! An AST that represents the GraphViz file format.
//!
//! The nodes are created by the `AstBuilder` (see the factory module) and
//! can't be modified once they are built. Every node may carry the location
//! of the text that it was parsed from.

use crate::core::base::Location;

/// How a literal is written in the source: `abc`, `"abc"` or `<abc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quoting {
    Bare,
    Quoted,
    Html,
}

// abc | "abc" | <abc>
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub(crate) value: String,
    pub(crate) quoted: Quoting,
    pub(crate) location: Option<Location>,
}

impl Literal {
    /// The text of the literal, without the quotes or the angle brackets.
    /// Escape sequences in quoted strings are kept as written.
    pub fn value(&self) -> &str {
        &self.value
    }
    pub fn quoted(&self) -> Quoting {
        self.quoted
    }
}

// /* ... */ | // ... | # ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    Block,
    Slash,
    Macro,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub(crate) kind: CommentKind,
    pub(crate) value: String,
    pub(crate) location: Option<Location>,
}

impl Comment {
    pub fn kind(&self) -> CommentKind {
        self.kind
    }
    /// The text of the comment, without the comment markers. Multi-line
    /// comments use '\n' between the lines.
    pub fn value(&self) -> &str {
        &self.value
    }
}

// key = value
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub(crate) key: Literal,
    pub(crate) value: Literal,
    pub(crate) location: Option<Location>,
}

impl Attribute {
    pub fn key(&self) -> &Literal {
        &self.key
    }
    pub fn value(&self) -> &Literal {
        &self.value
    }
}

/// The content of a `[ ... ]` block.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeItem {
    Attribute(Attribute),
    Comment(Comment),
}

// (graph | node | edge)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeListKind {
    Graph,
    Node,
    Edge,
}

impl AttributeListKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            AttributeListKind::Graph => "graph",
            AttributeListKind::Node => "node",
            AttributeListKind::Edge => "edge",
        }
    }
}

// (graph | node | edge) [ ... ]
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeList {
    pub(crate) kind: AttributeListKind,
    pub(crate) children: Vec<AttributeItem>,
    pub(crate) location: Option<Location>,
}

impl AttributeList {
    pub fn kind(&self) -> AttributeListKind {
        self.kind
    }
    pub fn children(&self) -> &[AttributeItem] {
        &self.children
    }
}

// "first : port : ne"
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRef {
    pub(crate) id: Literal,
    pub(crate) port: Option<Literal>,
    pub(crate) compass: Option<Literal>,
    pub(crate) location: Option<Location>,
}

impl NodeRef {
    pub fn id(&self) -> &Literal {
        &self.id
    }
    pub fn port(&self) -> Option<&Literal> {
        self.port.as_ref()
    }
    pub fn compass(&self) -> Option<&Literal> {
        self.compass.as_ref()
    }
}

// { a b c }
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRefGroup {
    pub(crate) children: Vec<NodeRef>,
    pub(crate) location: Option<Location>,
}

impl NodeRefGroup {
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }
}

/// One endpoint of an edge statement.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeTarget {
    NodeRef(NodeRef),
    NodeRefGroup(NodeRefGroup),
}

// node-name [ ... ]
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) id: Literal,
    pub(crate) port: Option<Literal>,
    pub(crate) compass: Option<Literal>,
    pub(crate) children: Vec<AttributeItem>,
    pub(crate) location: Option<Location>,
}

impl Node {
    pub fn id(&self) -> &Literal {
        &self.id
    }
    pub fn port(&self) -> Option<&Literal> {
        self.port.as_ref()
    }
    pub fn compass(&self) -> Option<&Literal> {
        self.compass.as_ref()
    }
    pub fn children(&self) -> &[AttributeItem] {
        &self.children
    }
}

// a -> b -> { c d } [...]
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub(crate) targets: Vec<EdgeTarget>,
    pub(crate) children: Vec<AttributeItem>,
    pub(crate) location: Option<Location>,
}

impl Edge {
    /// The endpoints of the edge. There are always at least two.
    pub fn targets(&self) -> &[EdgeTarget] {
        &self.targets
    }
    pub fn children(&self) -> &[AttributeItem] {
        &self.children
    }
}

// subgraph name { ... }
#[derive(Debug, Clone, PartialEq)]
pub struct Subgraph {
    pub(crate) id: Option<Literal>,
    pub(crate) children: Vec<Statement>,
    pub(crate) location: Option<Location>,
}

impl Subgraph {
    pub fn id(&self) -> Option<&Literal> {
        self.id.as_ref()
    }
    pub fn children(&self) -> &[Statement] {
        &self.children
    }
}

/// A statement inside the body of a graph or a subgraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Attribute(Attribute),
    AttributeList(AttributeList),
    Comment(Comment),
    Edge(Edge),
    Node(Node),
    Subgraph(Subgraph),
}

impl Statement {
    pub fn location(&self) -> Option<Location> {
        match self {
            Statement::Attribute(a) => a.location,
            Statement::AttributeList(a) => a.location,
            Statement::Comment(c) => c.location,
            Statement::Edge(e) => e.location,
            Statement::Node(n) => n.location,
            Statement::Subgraph(s) => s.location,
        }
    }
}

// [ strict ] (graph | digraph) [ name ] { ... }
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub(crate) id: Option<Literal>,
    pub(crate) directed: bool,
    pub(crate) strict: bool,
    pub(crate) children: Vec<Statement>,
    pub(crate) location: Option<Location>,
}

impl Graph {
    pub fn id(&self) -> Option<&Literal> {
        self.id.as_ref()
    }
    pub fn directed(&self) -> bool {
        self.directed
    }
    pub fn strict(&self) -> bool {
        self.strict
    }
    pub fn children(&self) -> &[Statement] {
        &self.children
    }
}

/// The top-level content of a DOT document.
#[derive(Debug, Clone, PartialEq)]
pub enum DotChild {
    Comment(Comment),
    Graph(Graph),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub(crate) children: Vec<DotChild>,
    pub(crate) location: Option<Location>,
}

impl Dot {
    pub fn children(&self) -> &[DotChild] {
        &self.children
    }

    /// Returns the first graph in the document.
    pub fn graph(&self) -> Option<&Graph> {
        self.children.iter().find_map(|child| match child {
            DotChild::Graph(g) => Some(g),
            DotChild::Comment(_) => None,
        })
    }
}

/// Any node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Literal(Literal),
    Dot(Dot),
    Graph(Graph),
    Subgraph(Subgraph),
    Node(Node),
    Edge(Edge),
    NodeRef(NodeRef),
    NodeRefGroup(NodeRefGroup),
    Attribute(Attribute),
    AttributeList(AttributeList),
    Comment(Comment),
}

impl AstNode {
    pub fn location(&self) -> Option<Location> {
        match self {
            AstNode::Literal(n) => n.location,
            AstNode::Dot(n) => n.location,
            AstNode::Graph(n) => n.location,
            AstNode::Subgraph(n) => n.location,
            AstNode::Node(n) => n.location,
            AstNode::Edge(n) => n.location,
            AstNode::NodeRef(n) => n.location,
            AstNode::NodeRefGroup(n) => n.location,
            AstNode::Attribute(n) => n.location,
            AstNode::AttributeList(n) => n.location,
            AstNode::Comment(n) => n.location,
        }
    }

    /// The name of the node kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AstNode::Literal(_) => "Literal",
            AstNode::Dot(_) => "Dot",
            AstNode::Graph(_) => "Graph",
            AstNode::Subgraph(_) => "Subgraph",
            AstNode::Node(_) => "Node",
            AstNode::Edge(_) => "Edge",
            AstNode::NodeRef(_) => "NodeRef",
            AstNode::NodeRefGroup(_) => "NodeRefGroup",
            AstNode::Attribute(_) => "Attribute",
            AstNode::AttributeList(_) => "AttributeList",
            AstNode::Comment(_) => "Comment",
        }
    }
}

/// Implements the consuming `at` setter that attaches a source location,
/// and the conversion into `AstNode`.
macro_rules! ast_node {
    ($($ty:ident),*) => {
        $(
            impl $ty {
                pub fn location(&self) -> Option<Location> {
                    self.location
                }
                /// Returns the node with its location replaced by \p loc.
                pub fn at(mut self, loc: Location) -> Self {
                    self.location = Some(loc);
                    self
                }
            }
            impl From<$ty> for AstNode {
                fn from(node: $ty) -> Self {
                    AstNode::$ty(node)
                }
            }
        )*
    };
}

ast_node!(
    Literal,
    Dot,
    Graph,
    Subgraph,
    Node,
    Edge,
    NodeRef,
    NodeRefGroup,
    Attribute,
    AttributeList,
    Comment
);

impl From<Statement> for AstNode {
    fn from(stmt: Statement) -> Self {
        match stmt {
            Statement::Attribute(n) => AstNode::Attribute(n),
            Statement::AttributeList(n) => AstNode::AttributeList(n),
            Statement::Comment(n) => AstNode::Comment(n),
            Statement::Edge(n) => AstNode::Edge(n),
            Statement::Node(n) => AstNode::Node(n),
            Statement::Subgraph(n) => AstNode::Subgraph(n),
        }
    }
}

impl From<EdgeTarget> for AstNode {
    fn from(target: EdgeTarget) -> Self {
        match target {
            EdgeTarget::NodeRef(n) => AstNode::NodeRef(n),
            EdgeTarget::NodeRefGroup(n) => AstNode::NodeRefGroup(n),
        }
    }
}

impl From<DotChild> for AstNode {
    fn from(child: DotChild) -> Self {
        match child {
            DotChild::Comment(n) => AstNode::Comment(n),
            DotChild::Graph(n) => AstNode::Graph(n),
        }
    }
}
