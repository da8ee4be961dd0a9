//! A factory for AST nodes.
//!
//! Every constructor takes the `NodeCounter` that limits how many nodes can
//! be created. The counter is owned by the caller, so two builders never
//! share a count unless the caller passes them the same counter.

use super::ast::*;
use crate::core::base::Location;
use crate::core::error::DotError;

/// Returns the location that is attached to nodes that are created without
/// an explicit one.
pub type LocationFn = fn() -> Option<Location>;

#[derive(Debug, Clone, Copy)]
pub struct BuilderOptions {
    /// The quoting of literals that are created without an explicit one.
    pub default_literal_quoted: Quoting,
    pub default_graph_strict: bool,
    pub default_comment_kind: CommentKind,
    /// When missing, nodes are created without a location.
    pub location_fn: Option<LocationFn>,
    /// The maximum number of nodes that a counter from this builder allows.
    /// Zero means no limit.
    pub max_ast_nodes: usize,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            default_literal_quoted: Quoting::Quoted,
            default_graph_strict: false,
            default_comment_kind: CommentKind::Slash,
            location_fn: None,
            max_ast_nodes: 0,
        }
    }
}

/// Counts the nodes that were created, and fails once the limit is passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCounter {
    count: usize,
    limit: usize,
}

impl NodeCounter {
    /// Creates a counter that allows \p limit nodes. Zero means no limit.
    pub fn new(limit: usize) -> Self {
        Self { count: 0, limit }
    }

    pub fn unlimited() -> Self {
        Self::new(0)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Registers one more node.
    pub fn bump(&mut self) -> Result<(), DotError> {
        if self.limit != 0 && self.count >= self.limit {
            return Err(DotError::NodeCountExceeded { limit: self.limit });
        }
        self.count += 1;
        Ok(())
    }
}

/// Constructs AST nodes with the defaults from `BuilderOptions`.
#[derive(Debug, Clone, Default)]
pub struct AstBuilder {
    options: BuilderOptions,
}

impl AstBuilder {
    pub fn new(options: BuilderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Creates a fresh counter with this builder's limit.
    pub fn counter(&self) -> NodeCounter {
        NodeCounter::new(self.options.max_ast_nodes)
    }

    fn location(&self) -> Option<Location> {
        self.options.location_fn.and_then(|f| f())
    }

    pub fn literal(
        &self,
        counter: &mut NodeCounter,
        value: impl Into<String>,
        quoted: Option<Quoting>,
    ) -> Result<Literal, DotError> {
        counter.bump()?;
        Ok(Literal {
            value: value.into(),
            quoted: quoted.unwrap_or(self.options.default_literal_quoted),
            location: self.location(),
        })
    }

    pub fn dot(
        &self,
        counter: &mut NodeCounter,
        children: Vec<DotChild>,
    ) -> Result<Dot, DotError> {
        counter.bump()?;
        Ok(Dot {
            children,
            location: self.location(),
        })
    }

    pub fn graph(
        &self,
        counter: &mut NodeCounter,
        directed: bool,
        strict: Option<bool>,
        id: Option<Literal>,
        children: Vec<Statement>,
    ) -> Result<Graph, DotError> {
        counter.bump()?;
        Ok(Graph {
            id,
            directed,
            strict: strict.unwrap_or(self.options.default_graph_strict),
            children,
            location: self.location(),
        })
    }

    pub fn subgraph(
        &self,
        counter: &mut NodeCounter,
        id: Option<Literal>,
        children: Vec<Statement>,
    ) -> Result<Subgraph, DotError> {
        counter.bump()?;
        Ok(Subgraph {
            id,
            children,
            location: self.location(),
        })
    }

    pub fn node(
        &self,
        counter: &mut NodeCounter,
        id: Literal,
        port: Option<Literal>,
        compass: Option<Literal>,
        children: Vec<AttributeItem>,
    ) -> Result<Node, DotError> {
        counter.bump()?;
        Ok(Node {
            id,
            port,
            compass,
            children,
            location: self.location(),
        })
    }

    /// Creates an edge. Fails if there are fewer than two targets.
    pub fn edge(
        &self,
        counter: &mut NodeCounter,
        targets: Vec<EdgeTarget>,
        children: Vec<AttributeItem>,
    ) -> Result<Edge, DotError> {
        if targets.len() < 2 {
            return Err(DotError::EdgeTarget(format!(
                "target #{} is missing, an edge needs at least 2 targets",
                targets.len() + 1
            )));
        }
        counter.bump()?;
        Ok(Edge {
            targets,
            children,
            location: self.location(),
        })
    }

    pub fn node_ref(
        &self,
        counter: &mut NodeCounter,
        id: Literal,
        port: Option<Literal>,
        compass: Option<Literal>,
    ) -> Result<NodeRef, DotError> {
        counter.bump()?;
        Ok(NodeRef {
            id,
            port,
            compass,
            location: self.location(),
        })
    }

    pub fn node_ref_group(
        &self,
        counter: &mut NodeCounter,
        children: Vec<NodeRef>,
    ) -> Result<NodeRefGroup, DotError> {
        counter.bump()?;
        Ok(NodeRefGroup {
            children,
            location: self.location(),
        })
    }

    pub fn attribute(
        &self,
        counter: &mut NodeCounter,
        key: Literal,
        value: Literal,
    ) -> Result<Attribute, DotError> {
        counter.bump()?;
        Ok(Attribute {
            key,
            value,
            location: self.location(),
        })
    }

    pub fn attribute_list(
        &self,
        counter: &mut NodeCounter,
        kind: AttributeListKind,
        children: Vec<AttributeItem>,
    ) -> Result<AttributeList, DotError> {
        counter.bump()?;
        Ok(AttributeList {
            kind,
            children,
            location: self.location(),
        })
    }

    pub fn comment(
        &self,
        counter: &mut NodeCounter,
        value: impl Into<String>,
        kind: Option<CommentKind>,
    ) -> Result<Comment, DotError> {
        counter.bump()?;
        Ok(Comment {
            kind: kind.unwrap_or(self.options.default_comment_kind),
            value: value.into(),
            location: self.location(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::base::Position;

    #[test]
    fn defaults() {
        let b = AstBuilder::default();
        let mut c = b.counter();
        let lit = b.literal(&mut c, "a", None).unwrap();
        assert_eq!(lit.quoted(), Quoting::Quoted);
        assert!(lit.location().is_none());
        let g = b.graph(&mut c, true, None, None, vec![]).unwrap();
        assert!(!g.strict());
        let comment = b.comment(&mut c, "hi", None).unwrap();
        assert_eq!(comment.kind(), CommentKind::Slash);
        assert_eq!(c.count(), 3);
    }

    #[test]
    fn custom_defaults() {
        fn here() -> Option<Location> {
            let p = Position::new(3, 1, 4);
            Some(Location::new(p, p))
        }
        let b = AstBuilder::new(BuilderOptions {
            default_literal_quoted: Quoting::Bare,
            default_graph_strict: true,
            default_comment_kind: CommentKind::Block,
            location_fn: Some(here),
            max_ast_nodes: 0,
        });
        let mut c = b.counter();
        let lit = b.literal(&mut c, "a", None).unwrap();
        assert_eq!(lit.quoted(), Quoting::Bare);
        assert_eq!(lit.location().unwrap().start.offset, 3);
        let g = b.graph(&mut c, false, None, None, vec![]).unwrap();
        assert!(g.strict());
        let g = b.graph(&mut c, false, Some(false), None, vec![]).unwrap();
        assert!(!g.strict());
        let comment = b.comment(&mut c, "hi", None).unwrap();
        assert_eq!(comment.kind(), CommentKind::Block);
    }

    #[test]
    fn node_cap() {
        let b = AstBuilder::new(BuilderOptions {
            max_ast_nodes: 3,
            ..BuilderOptions::default()
        });
        let mut c = b.counter();
        for _ in 0..3 {
            b.literal(&mut c, "x", None).unwrap();
        }
        let err = b.literal(&mut c, "x", None).unwrap_err();
        assert_eq!(err, DotError::NodeCountExceeded { limit: 3 });

        // A new counter starts from zero.
        let mut fresh = b.counter();
        assert!(b.literal(&mut fresh, "x", None).is_ok());
        assert_eq!(fresh.count(), 1);
    }

    #[test]
    fn counters_are_independent() {
        let capped = AstBuilder::new(BuilderOptions {
            max_ast_nodes: 1,
            ..BuilderOptions::default()
        });
        let other = AstBuilder::new(BuilderOptions {
            max_ast_nodes: 1,
            ..BuilderOptions::default()
        });
        let mut c1 = capped.counter();
        let mut c2 = other.counter();
        capped.literal(&mut c1, "a", None).unwrap();
        assert!(other.literal(&mut c2, "b", None).is_ok());
        assert!(capped.literal(&mut c1, "c", None).is_err());
    }

    #[test]
    fn edge_arity() {
        let b = AstBuilder::default();
        let mut c = b.counter();
        let err = b.edge(&mut c, vec![], vec![]).unwrap_err();
        assert!(matches!(err, DotError::EdgeTarget(ref m) if m.contains("#1")));

        let a = b.literal(&mut c, "a", None).unwrap();
        let r = b.node_ref(&mut c, a, None, None).unwrap();
        let err = b.edge(&mut c, vec![EdgeTarget::NodeRef(r.clone())], vec![]);
        assert!(matches!(err, Err(DotError::EdgeTarget(ref m)) if m.contains("#2")));

        let targets = vec![EdgeTarget::NodeRef(r.clone()), EdgeTarget::NodeRef(r)];
        let e = b.edge(&mut c, targets, vec![]).unwrap();
        assert_eq!(e.targets().len(), 2);
    }
}
