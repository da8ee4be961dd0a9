//! A model builder that converts parsed AST trees to graph models.

use super::escape::unescape;
use super::parser::ast;
use super::parser::ast::{AttributeListKind, CommentKind, Quoting};
use crate::core::base::{Compass, Location};
use crate::core::error::DotError;
use crate::model::{
    ClusterContainer, HasAttributes, HasComment, ModelsContext, NodeRef, RootGraph,
    TargetSpec, Value,
};

type PropertyList = Vec<(String, Value)>;

// The methods in this file walk the statements of a graph in document order
// and replay them on the model: subgraphs recurse, attributes and attribute
// lists are merged into the enclosing cluster, and nodes and edges are
// created with the properties of their attribute blocks.

/// Returns true if \p text is a DOT numeral: [-]?(.[0-9]+ | [0-9]+(.[0-9]*)?)
fn is_numeral(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| s.chars().all(|ch| ch.is_ascii_digit());
    if !all_digits(int) {
        return false;
    }
    match frac {
        Some(frac) => all_digits(frac) && !(int.is_empty() && frac.is_empty()),
        None => !int.is_empty(),
    }
}

/// Returns the text that \p lit stands for. Quoted strings are unescaped
/// and HTML-like strings keep their angle brackets.
pub fn literal_text(lit: &ast::Literal) -> String {
    match lit.quoted() {
        Quoting::Bare => lit.value().to_string(),
        Quoting::Quoted => unescape(lit.value()),
        Quoting::Html => format!("<{}>", lit.value()),
    }
}

/// Converts an attribute value to a model value. Bare numerals become
/// numbers and bare `true`/`false` become booleans.
pub fn literal_value(lit: &ast::Literal) -> Value {
    if lit.quoted() != Quoting::Bare {
        return Value::Text(literal_text(lit));
    }
    match lit.value() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        v if is_numeral(v) => match v.parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(v.to_string()),
        },
        v => Value::Text(v.to_string()),
    }
}

// Reduces the attribute block \p items to a property list. Comments inside
// the block are not kept.
fn properties(items: &[ast::AttributeItem]) -> PropertyList {
    items
        .iter()
        .filter_map(|item| match item {
            ast::AttributeItem::Attribute(a) => {
                Some((literal_text(a.key()), literal_value(a.value())))
            }
            ast::AttributeItem::Comment(_) => None,
        })
        .collect()
}

/// Returns true if \p comment ends right before the statement at \p next.
fn is_adjacent(comment: &ast::Comment, next: Option<Location>) -> bool {
    let (c, n) = match (comment.location(), next) {
        (Some(c), Some(n)) => (c, n),
        _ => return false,
    };
    match comment.kind() {
        CommentKind::Block => c.end.line + 1 == n.start.line,
        // Line comments end after their newline.
        CommentKind::Slash | CommentKind::Macro => c.end.line == n.start.line,
    }
}

fn node_ref(r: &ast::NodeRef) -> NodeRef {
    NodeRef {
        id: literal_text(r.id()),
        port: r.port().map(literal_text),
        compass: r.compass().and_then(|c| Compass::from_name(&literal_text(c))),
    }
}

fn edge_targets(edge: &ast::Edge) -> Vec<TargetSpec> {
    edge.targets()
        .iter()
        .map(|target| match target {
            ast::EdgeTarget::NodeRef(r) => TargetSpec::Ref(node_ref(r)),
            ast::EdgeTarget::NodeRefGroup(g) => TargetSpec::Group(
                g.children()
                    .iter()
                    .map(|r| TargetSpec::Ref(node_ref(r)))
                    .collect(),
            ),
        })
        .collect()
}

/// This class constructs a graph model from the parsed AST.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    context: ModelsContext,
    // The number of comments that were not next to a statement.
    dropped_comments: usize,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder that makes its objects with the factories of
    /// \p context.
    pub fn with_context(context: ModelsContext) -> Self {
        Self {
            context,
            dropped_comments: 0,
        }
    }

    pub fn dropped_comments(&self) -> usize {
        self.dropped_comments
    }

    /// Converts the first graph of \p dot. A comment right before the graph
    /// becomes the comment of the root graph.
    pub fn build(&mut self, dot: &ast::Dot) -> Result<RootGraph, DotError> {
        let mut pending: Option<&ast::Comment> = None;
        for child in dot.children() {
            match child {
                ast::DotChild::Comment(c) => {
                    self.drop_comment(pending.replace(c));
                }
                ast::DotChild::Graph(g) => {
                    let comment = self.take_adjacent(pending.take(), g.location());
                    let mut root = self.visit_graph(g)?;
                    root.set_comment(comment);
                    return Ok(root);
                }
            }
        }
        Err(DotError::Conversion(
            "The document does not contain a graph".to_string(),
        ))
    }

    pub fn visit_graph(&mut self, graph: &ast::Graph) -> Result<RootGraph, DotError> {
        let id = graph.id().map(literal_text);
        let mut root =
            self.context
                .create_root(id.as_deref(), graph.directed(), graph.strict());
        self.visit_stmts(&mut root, graph.children())?;

        #[cfg(feature = "log")]
        log::debug!(
            "Built a graph with {} nodes, {} edges and {} subgraphs.",
            root.nodes().len(),
            root.edges().len(),
            root.subgraphs().len()
        );

        Ok(root)
    }

    fn drop_comment(&mut self, comment: Option<&ast::Comment>) {
        if let Some(_c) = comment {
            self.dropped_comments += 1;
            #[cfg(feature = "log")]
            log::info!(
                "Dropping a comment that is not next to a statement: {:?}",
                _c.value()
            );
        }
    }

    // Returns the text of \p comment if it is adjacent to the statement at
    // \p next, and drops it otherwise.
    fn take_adjacent(
        &mut self,
        comment: Option<&ast::Comment>,
        next: Option<Location>,
    ) -> Option<String> {
        let comment = comment?;
        if is_adjacent(comment, next) {
            return Some(comment.value().to_string());
        }
        self.drop_comment(Some(comment));
        None
    }

    fn visit_stmts<C: ClusterContainer>(
        &mut self,
        cluster: &mut C,
        stmts: &[ast::Statement],
    ) -> Result<(), DotError> {
        let mut pending: Option<&ast::Comment> = None;
        for stmt in stmts {
            if let ast::Statement::Comment(c) = stmt {
                self.drop_comment(pending.replace(c));
                continue;
            }
            let comment = self.take_adjacent(pending.take(), stmt.location());
            self.visit_stmt(cluster, stmt, comment)?;
        }
        self.drop_comment(pending);
        Ok(())
    }

    fn visit_stmt<C: ClusterContainer>(
        &mut self,
        cluster: &mut C,
        stmt: &ast::Statement,
        comment: Option<String>,
    ) -> Result<(), DotError> {
        match stmt {
            ast::Statement::Attribute(a) => {
                cluster.set(literal_text(a.key()), literal_value(a.value()));
            }
            ast::Statement::AttributeList(list) => {
                let defaults = cluster.defaults_mut();
                let attrs = match list.kind() {
                    AttributeListKind::Graph => &mut defaults.graph,
                    AttributeListKind::Node => &mut defaults.node,
                    AttributeListKind::Edge => &mut defaults.edge,
                };
                attrs.apply(properties(list.children()));
                if comment.is_some() {
                    attrs.set_comment(comment);
                }
            }
            ast::Statement::Node(n) => {
                let node = cluster.node(&literal_text(n.id()));
                node.apply(properties(n.children()));
                if comment.is_some() {
                    node.set_comment(comment);
                }
            }
            ast::Statement::Edge(e) => {
                let edge = cluster.edge(edge_targets(e))?;
                edge.apply(properties(e.children()));
                edge.set_comment(comment);
            }
            ast::Statement::Subgraph(s) => {
                let sub = match s.id() {
                    Some(id) => cluster.subgraph(&literal_text(id)),
                    None => cluster.anonymous_subgraph(),
                };
                self.visit_stmts(sub, s.children())?;
                if comment.is_some() {
                    sub.set_comment(comment);
                }
            }
            // Handled by visit_stmts.
            ast::Statement::Comment(_) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gv::parser::DotParser;
    use crate::model::{AttributeKind, EdgeTarget};

    fn build(text: &str) -> RootGraph {
        let dot = DotParser::new(text).process().unwrap();
        ModelBuilder::new().build(&dot).unwrap()
    }

    #[test]
    fn numerals() {
        assert!(is_numeral("1"));
        assert!(is_numeral("-1.5"));
        assert!(is_numeral(".5"));
        assert!(is_numeral("5."));
        assert!(!is_numeral("."));
        assert!(!is_numeral("-"));
        assert!(!is_numeral("1e5"));
        assert!(!is_numeral("a1"));
        assert!(!is_numeral(""));
    }

    #[test]
    fn values() {
        let g = build(
            "digraph { a [w=1.5, f=true, t=x, q=\"1\", h=<<b>x</b>>, e=\"a\\\"b\\nc\"] }",
        );
        let a = g.get_node("a").unwrap();
        assert_eq!(a.get("w"), Some(&Value::Number(1.5)));
        assert_eq!(a.get("f"), Some(&Value::Bool(true)));
        assert_eq!(a.get("t"), Some(&Value::from("x")));
        assert_eq!(a.get("q"), Some(&Value::from("1")));
        assert_eq!(a.get("h"), Some(&Value::from("<<b>x</b>>")));
        assert_eq!(a.get("e"), Some(&Value::from("a\"b\nc")));
    }

    #[test]
    fn statements() {
        let g = build(
            "strict graph G {
               label = \"top\"
               node [shape=box] node [color=red]
               edge [w=1]
               a [x=1, x=2]
               a [y=3]
               a -- b:p:n -- {c d}
               subgraph cluster_0 { e; rank=same }
               { f }
               subgraph cluster_0 { g }
             }",
        );
        assert_eq!(g.id(), Some("G"));
        assert!(g.strict());
        assert!(!g.directed());
        assert_eq!(g.get("label"), Some(&Value::from("top")));
        assert_eq!(g.defaults().node.len(), 2);
        assert_eq!(g.defaults().edge.len(), 1);

        // Later keys win, and repeated statements merge into one node.
        let a = g.get_node("a").unwrap();
        assert_eq!(a.get("x"), Some(&Value::Number(2.)));
        assert_eq!(a.get("y"), Some(&Value::Number(3.)));

        // Edges don't create nodes.
        assert!(!g.has_node("b"));
        assert_eq!(g.edges().len(), 1);
        let targets = g.edges()[0].targets();
        assert_eq!(
            targets[1],
            EdgeTarget::Node(NodeRef::new("b").with_port("p").with_compass(Compass::N))
        );
        assert_eq!(
            targets[2],
            EdgeTarget::Group(vec![NodeRef::new("c"), NodeRef::new("d")])
        );

        assert_eq!(g.subgraphs().len(), 2);
        let cluster = g.get_subgraph("cluster_0").unwrap();
        assert!(cluster.has_node("e"));
        assert!(cluster.has_node("g"));
        assert_eq!(cluster.attributes().kind(), AttributeKind::ClusterSubgraph);
        assert!(g.subgraphs()[1].id().is_none());
        assert!(g.subgraphs()[1].has_node("f"));
    }

    #[test]
    fn comments() {
        let text = "/* root */
digraph {
  // attached to a
  a
  # detached

  b
  /** block */
  c -> d
  /* far */

  subgraph s {}
  // trailing
}";
        let dot = DotParser::new(text).process().unwrap();
        let mut builder = ModelBuilder::new();
        let g = builder.build(&dot).unwrap();
        assert_eq!(g.comment(), Some("root"));
        assert_eq!(g.get_node("a").unwrap().comment(), Some("attached to a"));
        assert_eq!(g.get_node("b").unwrap().comment(), None);
        assert_eq!(g.edges()[0].comment(), Some("block"));
        assert_eq!(g.get_subgraph("s").unwrap().comment(), None);
        assert_eq!(builder.dropped_comments(), 3);
    }

    #[test]
    fn first_graph() {
        let g = build("graph A {} digraph B {}");
        assert_eq!(g.id(), Some("A"));

        let mut empty = DotParser::new("graph {}").process().unwrap();
        empty.children.clear();
        let err = ModelBuilder::new().build(&empty).unwrap_err();
        assert!(matches!(err, DotError::Conversion(_)));
    }
}
