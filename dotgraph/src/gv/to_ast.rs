//! Converts the graph model into an AST that the printer can serialize.
//!
//! The output order of each cluster is fixed: the attributes of the cluster,
//! the default lists (graph, edge, node), the nodes, the subgraphs and then
//! the edges. Every object is preceded by its comment, if it has one.

use super::escape::{escape, is_html_like, strip_nul};
use super::parser::ast;
use super::parser::ast::{AttributeListKind, CommentKind, Quoting};
use super::parser::factory::{AstBuilder, NodeCounter};
use crate::core::error::DotError;
use crate::model::{
    Attributes, ClusterContainer, EdgeTarget, HasAttributes, HasComment, NodeRef,
    RootGraph, Value,
};

#[derive(Debug, Clone, Copy)]
pub struct ToAstOptions {
    /// The kind of the comments that are created for the model comments.
    pub comment_kind: CommentKind,
}

impl Default for ToAstOptions {
    fn default() -> Self {
        Self {
            comment_kind: CommentKind::Slash,
        }
    }
}

const KEYWORDS: [&str; 6] = ["strict", "graph", "digraph", "subgraph", "node", "edge"];

/// Returns true if \p key can be printed without quotes. Keywords are
/// matched ignoring case, like the lexer does.
fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {}
        _ => return false,
    }
    if !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return false;
    }
    !KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(key))
}

/// Converts a model graph to an AST.
#[derive(Debug)]
pub struct ToAst {
    options: ToAstOptions,
    builder: AstBuilder,
    counter: NodeCounter,
}

impl Default for ToAst {
    fn default() -> Self {
        Self::new(ToAstOptions::default())
    }
}

impl ToAst {
    pub fn new(options: ToAstOptions) -> Self {
        Self {
            options,
            builder: AstBuilder::default(),
            counter: NodeCounter::unlimited(),
        }
    }

    /// Converts \p graph to a document with a single graph.
    pub fn convert(&mut self, graph: &RootGraph) -> Result<ast::Dot, DotError> {
        self.counter = NodeCounter::unlimited();
        let mut children = Vec::new();
        if let Some(text) = graph.comment() {
            let comment = self.comment(text)?;
            children.push(ast::DotChild::Comment(comment));
        }

        let id = match graph.id() {
            Some(id) => Some(self.id_literal(id)?),
            None => None,
        };
        let body = self.cluster(graph)?;
        let g = self.builder.graph(
            &mut self.counter,
            graph.directed(),
            Some(graph.strict()),
            id,
            body,
        )?;
        children.push(ast::DotChild::Graph(g));

        #[cfg(feature = "log")]
        log::debug!(
            "Converted the model to an AST with {} nodes.",
            self.counter.count()
        );

        self.builder.dot(&mut self.counter, children)
    }

    fn comment(&mut self, text: &str) -> Result<ast::Comment, DotError> {
        let kind = self.options.comment_kind;
        self.builder.comment(&mut self.counter, text, Some(kind))
    }

    // Adds the comment \p text, if there is one, to \p out.
    fn push_comment(
        &mut self,
        text: Option<&str>,
        out: &mut Vec<ast::Statement>,
    ) -> Result<(), DotError> {
        if let Some(text) = text {
            let comment = self.comment(text)?;
            out.push(ast::Statement::Comment(comment));
        }
        Ok(())
    }

    fn id_literal(&mut self, id: &str) -> Result<ast::Literal, DotError> {
        self.builder
            .literal(&mut self.counter, escape(id), Some(Quoting::Quoted))
    }

    fn key_literal(&mut self, key: &str) -> Result<ast::Literal, DotError> {
        if is_plain_key(key) {
            return self.builder.literal(&mut self.counter, key, Some(Quoting::Bare));
        }
        self.id_literal(key)
    }

    fn value_literal(&mut self, value: &Value) -> Result<ast::Literal, DotError> {
        let (text, quoting) = match value {
            Value::Number(n) if n.is_finite() => (n.to_string(), Quoting::Bare),
            Value::Number(n) => (n.to_string(), Quoting::Quoted),
            Value::Bool(b) => (b.to_string(), Quoting::Bare),
            // Padding can't be kept outside of the angle brackets.
            Value::Text(s) if is_html_like(s) && s.trim() == s => {
                let body = strip_nul(s);
                // Drop the outer angle brackets.
                (body[1..body.len() - 1].to_string(), Quoting::Html)
            }
            Value::Text(s) => (escape(s), Quoting::Quoted),
        };
        self.builder.literal(&mut self.counter, text, Some(quoting))
    }

    fn attribute(&mut self, key: &str, value: &Value) -> Result<ast::Attribute, DotError> {
        let key = self.key_literal(key)?;
        let value = self.value_literal(value)?;
        self.builder.attribute(&mut self.counter, key, value)
    }

    fn attribute_items(
        &mut self,
        attrs: &Attributes,
    ) -> Result<Vec<ast::AttributeItem>, DotError> {
        let mut items = Vec::with_capacity(attrs.len());
        for (key, value) in attrs.iter() {
            items.push(ast::AttributeItem::Attribute(self.attribute(key, value)?));
        }
        Ok(items)
    }

    fn node_ref(&mut self, r: &NodeRef) -> Result<ast::NodeRef, DotError> {
        let id = self.id_literal(&r.id)?;
        let port = match &r.port {
            Some(port) => Some(self.id_literal(port)?),
            None => None,
        };
        let compass = match r.compass {
            Some(compass) => Some(self.builder.literal(
                &mut self.counter,
                compass.as_str(),
                Some(Quoting::Bare),
            )?),
            None => None,
        };
        self.builder.node_ref(&mut self.counter, id, port, compass)
    }

    // Appends the default list \p attrs, unless it is empty.
    fn defaults(
        &mut self,
        kind: AttributeListKind,
        attrs: &Attributes,
        out: &mut Vec<ast::Statement>,
    ) -> Result<(), DotError> {
        if attrs.is_empty() {
            return Ok(());
        }
        self.push_comment(attrs.comment(), out)?;
        let items = self.attribute_items(attrs)?;
        let list = self.builder.attribute_list(&mut self.counter, kind, items)?;
        out.push(ast::Statement::AttributeList(list));
        Ok(())
    }

    /// Returns the body of \p cluster.
    fn cluster<C: ClusterContainer>(
        &mut self,
        cluster: &C,
    ) -> Result<Vec<ast::Statement>, DotError> {
        let mut out = Vec::new();

        for (key, value) in cluster.attributes().iter() {
            let attr = self.attribute(key, value)?;
            out.push(ast::Statement::Attribute(attr));
        }

        let defaults = cluster.defaults();
        self.defaults(AttributeListKind::Graph, &defaults.graph, &mut out)?;
        self.defaults(AttributeListKind::Edge, &defaults.edge, &mut out)?;
        self.defaults(AttributeListKind::Node, &defaults.node, &mut out)?;

        for node in cluster.nodes() {
            self.push_comment(node.comment(), &mut out)?;
            let id = self.id_literal(node.id())?;
            let items = self.attribute_items(node.attributes())?;
            let n = self.builder.node(&mut self.counter, id, None, None, items)?;
            out.push(ast::Statement::Node(n));
        }

        for sub in cluster.subgraphs() {
            self.push_comment(sub.comment(), &mut out)?;
            let id = match sub.id() {
                Some(id) => Some(self.id_literal(id)?),
                None => None,
            };
            let body = self.cluster(sub)?;
            let s = self.builder.subgraph(&mut self.counter, id, body)?;
            out.push(ast::Statement::Subgraph(s));
        }

        for edge in cluster.edges() {
            self.push_comment(edge.comment(), &mut out)?;
            let mut targets = Vec::with_capacity(edge.targets().len());
            for target in edge.targets() {
                let t = match target {
                    EdgeTarget::Node(r) => ast::EdgeTarget::NodeRef(self.node_ref(r)?),
                    EdgeTarget::Group(refs) => {
                        let mut list = Vec::with_capacity(refs.len());
                        for r in refs {
                            list.push(self.node_ref(r)?);
                        }
                        let group = self.builder.node_ref_group(&mut self.counter, list)?;
                        ast::EdgeTarget::NodeRefGroup(group)
                    }
                };
                targets.push(t);
            }
            let items = self.attribute_items(edge.attributes())?;
            let e = self.builder.edge(&mut self.counter, targets, items)?;
            out.push(ast::Statement::Edge(e));
        }

        Ok(out)
    }
}
