//! Methods for printing the AST, either as DOT text or as a debug outline.
//!
//! The DOT printer is lazy: `Printer::chunks` returns an iterator that walks
//! the tree with an explicit work stack and yields the text piece by piece,
//! so the memory use depends on the depth of the tree and not on its size.
//! The printer does not escape literals. Values are expected to be in their
//! source form, as produced by the parser or by the model converter.

use super::ast::*;
use crate::gv::escape::{escape_comment, split_lines};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Space,
    Tab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfLine {
    Lf,
    Crlf,
}

impl EndOfLine {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndOfLine::Lf => "\n",
            EndOfLine::Crlf => "\r\n",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    pub indent_style: IndentStyle,
    /// The number of spaces per level. Ignored for tabs.
    pub indent_size: usize,
    pub end_of_line: EndOfLine,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            indent_style: IndentStyle::Space,
            indent_size: 2,
            end_of_line: EndOfLine::Lf,
        }
    }
}

// A borrowed view of any printable node.
#[derive(Debug, Clone, Copy)]
enum Item<'a> {
    Literal(&'a Literal),
    Dot(&'a Dot),
    Graph(&'a Graph),
    Subgraph(&'a Subgraph),
    Node(&'a Node),
    Edge(&'a Edge),
    NodeRef(&'a NodeRef),
    Group(&'a NodeRefGroup),
    Attribute(&'a Attribute),
    AttributeList(&'a AttributeList),
    Comment(&'a Comment),
}

impl<'a> From<&'a AstNode> for Item<'a> {
    fn from(node: &'a AstNode) -> Self {
        match node {
            AstNode::Literal(n) => Item::Literal(n),
            AstNode::Dot(n) => Item::Dot(n),
            AstNode::Graph(n) => Item::Graph(n),
            AstNode::Subgraph(n) => Item::Subgraph(n),
            AstNode::Node(n) => Item::Node(n),
            AstNode::Edge(n) => Item::Edge(n),
            AstNode::NodeRef(n) => Item::NodeRef(n),
            AstNode::NodeRefGroup(n) => Item::Group(n),
            AstNode::Attribute(n) => Item::Attribute(n),
            AstNode::AttributeList(n) => Item::AttributeList(n),
            AstNode::Comment(n) => Item::Comment(n),
        }
    }
}

impl<'a> From<&'a Statement> for Item<'a> {
    fn from(stmt: &'a Statement) -> Self {
        match stmt {
            Statement::Attribute(n) => Item::Attribute(n),
            Statement::AttributeList(n) => Item::AttributeList(n),
            Statement::Comment(n) => Item::Comment(n),
            Statement::Edge(n) => Item::Edge(n),
            Statement::Node(n) => Item::Node(n),
            Statement::Subgraph(n) => Item::Subgraph(n),
        }
    }
}

impl<'a> From<&'a AttributeItem> for Item<'a> {
    fn from(item: &'a AttributeItem) -> Self {
        match item {
            AttributeItem::Attribute(n) => Item::Attribute(n),
            AttributeItem::Comment(n) => Item::Comment(n),
        }
    }
}

impl<'a> From<&'a EdgeTarget> for Item<'a> {
    fn from(target: &'a EdgeTarget) -> Self {
        match target {
            EdgeTarget::NodeRef(n) => Item::NodeRef(n),
            EdgeTarget::NodeRefGroup(n) => Item::Group(n),
        }
    }
}

impl<'a> From<&'a DotChild> for Item<'a> {
    fn from(child: &'a DotChild) -> Self {
        match child {
            DotChild::Comment(n) => Item::Comment(n),
            DotChild::Graph(n) => Item::Graph(n),
        }
    }
}

// The pending work of the printer. The bool of the list variants is true
// when the list is at its first element.
#[derive(Debug)]
enum Work<'a> {
    Visit(Item<'a>),
    Text(&'a str),
    Owned(String),
    /// A line break followed by the indentation of the current level.
    Eol,
    Indent,
    Dedent,
    EnterGraph(bool),
    ExitGraph,
    /// Statements of a body, each on its own line.
    Statements(&'a [Statement]),
    /// Statements at the top level, separated by line breaks.
    Lines(&'a [Statement], bool),
    AttributeItems(&'a [AttributeItem]),
    DotChildren(&'a [DotChild], bool),
    Targets(&'a [EdgeTarget], bool),
    GroupRefs(&'a [NodeRef], bool),
}

/// Prints AST nodes as DOT text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    options: PrintOptions,
}

impl Printer {
    pub fn new(options: PrintOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PrintOptions {
        &self.options
    }

    /// Returns a lazy iterator over the text of \p node.
    pub fn chunks<'a>(&self, node: &'a AstNode) -> Chunks<'a> {
        Chunks::new(self.options, Work::Visit(node.into()))
    }

    /// Returns a lazy iterator over the text of a list of statements, one
    /// statement per line.
    pub fn statement_chunks<'a>(&self, list: &'a [Statement]) -> Chunks<'a> {
        Chunks::new(self.options, Work::Lines(list, true))
    }

    pub fn print(&self, node: &AstNode) -> String {
        self.chunks(node).collect()
    }

    pub fn print_statements(&self, list: &[Statement]) -> String {
        self.statement_chunks(list).collect()
    }
}

/// The pieces of text of a printed tree, in order.
#[derive(Debug)]
pub struct Chunks<'a> {
    stack: Vec<Work<'a>>,
    // The current indentation level.
    depth: usize,
    // The 'directed' flag of the enclosing graphs.
    graphs: Vec<bool>,
    options: PrintOptions,
}

impl<'a> Chunks<'a> {
    fn new(options: PrintOptions, root: Work<'a>) -> Self {
        Self {
            stack: vec![root],
            depth: 0,
            graphs: Vec::new(),
            options,
        }
    }

    fn line_break(&self) -> String {
        let mut result = String::from(self.options.end_of_line.as_str());
        match self.options.indent_style {
            IndentStyle::Space => {
                result.push_str(&" ".repeat(self.depth * self.options.indent_size))
            }
            IndentStyle::Tab => result.push_str(&"\t".repeat(self.depth)),
        }
        result
    }

    fn edge_op(&self) -> &'static str {
        match self.graphs.last() {
            Some(true) => " -> ",
            _ => " -- ",
        }
    }

    // Schedules \p items to run in order.
    fn schedule(&mut self, items: Vec<Work<'a>>) {
        self.stack.extend(items.into_iter().rev());
    }

    fn port_parts(
        parts: &mut Vec<Work<'a>>,
        port: Option<&'a Literal>,
        compass: Option<&'a Literal>,
    ) {
        if let Some(port) = port {
            parts.push(Work::Text(":"));
            parts.push(Work::Visit(Item::Literal(port)));
        }
        if let Some(compass) = compass {
            parts.push(Work::Text(":"));
            parts.push(Work::Visit(Item::Literal(compass)));
        }
    }

    // { stmt; ... }
    fn body(parts: &mut Vec<Work<'a>>, children: &'a [Statement]) {
        if children.is_empty() {
            parts.push(Work::Text("{}"));
            return;
        }
        parts.push(Work::Text("{"));
        parts.push(Work::Indent);
        parts.push(Work::Statements(children));
        parts.push(Work::Dedent);
        parts.push(Work::Eol);
        parts.push(Work::Text("}"));
    }

    // ; | [ key = value; ... ];
    fn attribute_body(parts: &mut Vec<Work<'a>>, children: &'a [AttributeItem]) {
        if children.is_empty() {
            parts.push(Work::Text(";"));
            return;
        }
        parts.push(Work::Text(" ["));
        parts.push(Work::Indent);
        parts.push(Work::AttributeItems(children));
        parts.push(Work::Dedent);
        parts.push(Work::Eol);
        parts.push(Work::Text("];"));
    }

    fn comment_parts(parts: &mut Vec<Work<'a>>, comment: &'a Comment) {
        let escaped = escape_comment(comment.value(), comment.kind());
        let lines = split_lines(&escaped);
        let prefix = match comment.kind() {
            CommentKind::Block => " *",
            CommentKind::Slash => "//",
            CommentKind::Macro => "#",
        };

        if let CommentKind::Block = comment.kind() {
            parts.push(Work::Text("/**"));
            parts.push(Work::Eol);
        }
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                parts.push(Work::Eol);
            }
            if line.is_empty() {
                parts.push(Work::Text(prefix));
            } else {
                parts.push(Work::Owned(format!("{} {}", prefix, line)));
            }
        }
        if let CommentKind::Block = comment.kind() {
            parts.push(Work::Eol);
            parts.push(Work::Text(" */"));
        }
    }

    fn expand(&mut self, item: Item<'a>) {
        let mut parts: Vec<Work<'a>> = Vec::new();
        match item {
            Item::Literal(lit) => match lit.quoted() {
                Quoting::Bare => parts.push(Work::Text(lit.value())),
                Quoting::Quoted => {
                    parts.push(Work::Text("\""));
                    parts.push(Work::Text(lit.value()));
                    parts.push(Work::Text("\""));
                }
                Quoting::Html => {
                    parts.push(Work::Text("<"));
                    parts.push(Work::Text(lit.value()));
                    parts.push(Work::Text(">"));
                }
            },
            Item::Dot(dot) => {
                parts.push(Work::DotChildren(dot.children(), true));
            }
            Item::Graph(graph) => {
                parts.push(Work::EnterGraph(graph.directed()));
                if graph.strict() {
                    parts.push(Work::Text("strict "));
                }
                if graph.directed() {
                    parts.push(Work::Text("digraph "));
                } else {
                    parts.push(Work::Text("graph "));
                }
                if let Some(id) = graph.id() {
                    parts.push(Work::Visit(Item::Literal(id)));
                    parts.push(Work::Text(" "));
                }
                Self::body(&mut parts, graph.children());
                parts.push(Work::ExitGraph);
            }
            Item::Subgraph(subgraph) => {
                parts.push(Work::Text("subgraph "));
                if let Some(id) = subgraph.id() {
                    parts.push(Work::Visit(Item::Literal(id)));
                    parts.push(Work::Text(" "));
                }
                Self::body(&mut parts, subgraph.children());
            }
            Item::Node(node) => {
                parts.push(Work::Visit(Item::Literal(node.id())));
                Self::port_parts(&mut parts, node.port(), node.compass());
                Self::attribute_body(&mut parts, node.children());
            }
            Item::Edge(edge) => {
                parts.push(Work::Targets(edge.targets(), true));
                Self::attribute_body(&mut parts, edge.children());
            }
            Item::NodeRef(node_ref) => {
                parts.push(Work::Visit(Item::Literal(node_ref.id())));
                Self::port_parts(&mut parts, node_ref.port(), node_ref.compass());
            }
            Item::Group(group) => {
                parts.push(Work::Text("{"));
                parts.push(Work::GroupRefs(group.children(), true));
                parts.push(Work::Text("}"));
            }
            Item::Attribute(attr) => {
                parts.push(Work::Visit(Item::Literal(attr.key())));
                parts.push(Work::Text(" = "));
                parts.push(Work::Visit(Item::Literal(attr.value())));
                parts.push(Work::Text(";"));
            }
            Item::AttributeList(list) => {
                parts.push(Work::Text(list.kind().keyword()));
                Self::attribute_body(&mut parts, list.children());
            }
            Item::Comment(comment) => {
                Self::comment_parts(&mut parts, comment);
            }
        }
        self.schedule(parts);
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(work) = self.stack.pop() {
            match work {
                Work::Text(text) => return Some(Cow::Borrowed(text)),
                Work::Owned(text) => return Some(Cow::Owned(text)),
                Work::Eol => return Some(Cow::Owned(self.line_break())),
                Work::Indent => self.depth += 1,
                Work::Dedent => self.depth = self.depth.saturating_sub(1),
                Work::EnterGraph(directed) => self.graphs.push(directed),
                Work::ExitGraph => {
                    self.graphs.pop();
                }
                Work::Visit(item) => self.expand(item),
                Work::Statements(list) => {
                    if let Some((first, rest)) = list.split_first() {
                        self.stack.push(Work::Statements(rest));
                        self.stack.push(Work::Visit(first.into()));
                        self.stack.push(Work::Eol);
                    }
                }
                Work::Lines(list, is_first) => {
                    if let Some((first, rest)) = list.split_first() {
                        self.stack.push(Work::Lines(rest, false));
                        self.stack.push(Work::Visit(first.into()));
                        if !is_first {
                            self.stack.push(Work::Eol);
                        }
                    }
                }
                Work::AttributeItems(list) => {
                    if let Some((first, rest)) = list.split_first() {
                        self.stack.push(Work::AttributeItems(rest));
                        self.stack.push(Work::Visit(first.into()));
                        self.stack.push(Work::Eol);
                    }
                }
                Work::DotChildren(list, is_first) => {
                    if let Some((first, rest)) = list.split_first() {
                        self.stack.push(Work::DotChildren(rest, false));
                        self.stack.push(Work::Visit(first.into()));
                        if !is_first {
                            self.stack.push(Work::Eol);
                        }
                    }
                }
                Work::Targets(list, is_first) => {
                    if let Some((first, rest)) = list.split_first() {
                        self.stack.push(Work::Targets(rest, false));
                        self.stack.push(Work::Visit(first.into()));
                        if !is_first {
                            let op = self.edge_op();
                            self.stack.push(Work::Text(op));
                        }
                    }
                }
                Work::GroupRefs(list, is_first) => {
                    if let Some((first, rest)) = list.split_first() {
                        self.stack.push(Work::GroupRefs(rest, false));
                        self.stack.push(Work::Visit(Item::NodeRef(first)));
                        if !is_first {
                            self.stack.push(Work::Text(" "));
                        }
                    }
                }
            }
        }
        None
    }
}

fn describe_literal(lit: &Literal) -> String {
    match lit.quoted() {
        Quoting::Bare => lit.value().to_string(),
        Quoting::Quoted => format!("\"{}\"", lit.value()),
        Quoting::Html => format!("<{}>", lit.value()),
    }
}

fn describe_ref(id: &Literal, port: Option<&Literal>, compass: Option<&Literal>) -> String {
    let mut result = describe_literal(id);
    if let Some(port) = port {
        result.push(':');
        result.push_str(&describe_literal(port));
    }
    if let Some(compass) = compass {
        result.push(':');
        result.push_str(&describe_literal(compass));
    }
    result
}

fn dump_line(out: &mut String, indent: usize, text: &str) {
    out.push_str(&" ".repeat(indent));
    out.push_str(text);
    out.push('\n');
}

fn dump_items(out: &mut String, items: &[AttributeItem], indent: usize) {
    for (i, item) in items.iter().enumerate() {
        match item {
            AttributeItem::Attribute(a) => {
                let line = format!(
                    "{}) {} = {}",
                    i,
                    describe_literal(a.key()),
                    describe_literal(a.value())
                );
                dump_line(out, indent, &line);
            }
            AttributeItem::Comment(c) => dump_comment(out, c, indent),
        }
    }
}

fn dump_comment(out: &mut String, c: &Comment, indent: usize) {
    dump_line(out, indent, &format!("Comment {:?} {:?}", c.kind(), c.value()));
}

fn dump_graph(out: &mut String, g: &Graph, indent: usize) {
    let mut line = String::from(if g.directed() { "Digraph" } else { "Graph" });
    if g.strict() {
        line.push_str(" strict");
    }
    if let Some(id) = g.id() {
        line.push(' ');
        line.push_str(&describe_literal(id));
    }
    dump_line(out, indent, &line);
    dump_stmts(out, g.children(), indent + 1);
}

fn dump_subgraph(out: &mut String, s: &Subgraph, indent: usize) {
    let mut line = String::from("Subgraph");
    if let Some(id) = s.id() {
        line.push(' ');
        line.push_str(&describe_literal(id));
    }
    dump_line(out, indent, &line);
    dump_stmts(out, s.children(), indent + 1);
}

fn dump_group(out: &mut String, g: &NodeRefGroup, indent: usize) {
    let refs: Vec<String> = g
        .children()
        .iter()
        .map(|r| describe_ref(r.id(), r.port(), r.compass()))
        .collect();
    dump_line(out, indent, &format!("Group {{{}}}", refs.join(" ")));
}

fn dump_edge(out: &mut String, e: &Edge, indent: usize) {
    dump_line(out, indent, "Edge");
    for target in e.targets() {
        match target {
            EdgeTarget::NodeRef(r) => {
                dump_line(out, indent + 1, &describe_ref(r.id(), r.port(), r.compass()))
            }
            EdgeTarget::NodeRefGroup(g) => dump_group(out, g, indent + 1),
        }
    }
    dump_items(out, e.children(), indent + 1);
}

fn dump_attribute(out: &mut String, a: &Attribute, indent: usize) {
    let line = format!(
        "Attribute {} = {}",
        describe_literal(a.key()),
        describe_literal(a.value())
    );
    dump_line(out, indent, &line);
}

fn dump_attribute_list(out: &mut String, l: &AttributeList, indent: usize) {
    dump_line(out, indent, &format!("Attribute {}:", l.kind().keyword()));
    dump_items(out, l.children(), indent + 1);
}

fn dump_node_stmt(out: &mut String, n: &Node, indent: usize) {
    let line = format!("Node {}", describe_ref(n.id(), n.port(), n.compass()));
    dump_line(out, indent, &line);
    dump_items(out, n.children(), indent + 1);
}

fn dump_stmts(out: &mut String, list: &[Statement], indent: usize) {
    for stmt in list {
        match stmt {
            Statement::Comment(c) => dump_comment(out, c, indent),
            Statement::Node(n) => dump_node_stmt(out, n, indent),
            Statement::Edge(e) => dump_edge(out, e, indent),
            Statement::Attribute(a) => dump_attribute(out, a, indent),
            Statement::AttributeList(l) => dump_attribute_list(out, l, indent),
            Statement::Subgraph(s) => dump_subgraph(out, s, indent),
        }
    }
}

fn dump_node(out: &mut String, node: &AstNode, indent: usize) {
    match node {
        AstNode::Literal(l) => dump_line(out, indent, &describe_literal(l)),
        AstNode::Dot(d) => {
            dump_line(out, indent, "Dot");
            for child in d.children() {
                match child {
                    DotChild::Comment(c) => dump_comment(out, c, indent + 1),
                    DotChild::Graph(g) => dump_graph(out, g, indent + 1),
                }
            }
        }
        AstNode::Graph(g) => dump_graph(out, g, indent),
        AstNode::Subgraph(s) => dump_subgraph(out, s, indent),
        AstNode::Node(n) => dump_node_stmt(out, n, indent),
        AstNode::Edge(e) => dump_edge(out, e, indent),
        AstNode::NodeRef(r) => {
            dump_line(out, indent, &describe_ref(r.id(), r.port(), r.compass()))
        }
        AstNode::NodeRefGroup(g) => dump_group(out, g, indent),
        AstNode::Attribute(a) => dump_attribute(out, a, indent),
        AstNode::AttributeList(l) => dump_attribute_list(out, l, indent),
        AstNode::Comment(c) => dump_comment(out, c, indent),
    }
}

/// Returns an indented outline of the tree, one node per line.
pub fn dump_ast(node: &AstNode) -> String {
    let mut out = String::new();
    dump_node(&mut out, node, 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gv::parser::factory::AstBuilder;
    use crate::gv::parser::parser::DotParser;
    use pretty_assertions::assert_eq;

    fn reprint(input: &str) -> String {
        let dot = DotParser::new(input).process().unwrap();
        Printer::default().print(&AstNode::Dot(dot))
    }

    #[test]
    fn simple_graphs() {
        assert_eq!(reprint("graph { a -- b; }"), "graph {\n  a -- b;\n}");
        assert_eq!(reprint("digraph{}"), "digraph {}");
        assert_eq!(
            reprint("strict digraph \"G\" { a -> b -> c }"),
            "strict digraph \"G\" {\n  a -> b -> c;\n}"
        );
    }

    #[test]
    fn attributes() {
        let out = reprint("digraph { a [color=red, label=\"x y\"]; node [shape=box] edge; k=v }");
        let expected = "digraph {
  a [
    color = red;
    label = \"x y\";
  ];
  node [
    shape = box;
  ];
  edge;
  k = v;
}";
        assert_eq!(out, expected);
    }

    #[test]
    fn subgraphs_and_groups() {
        let out = reprint("digraph { subgraph cluster_0 { a:p:n } {b} {c d} -> e }");
        let expected = "digraph {
  subgraph cluster_0 {
    a:p:n;
  }
  subgraph {
    b;
  }
  {c d} -> e;
}";
        assert_eq!(out, expected);
    }

    #[test]
    fn comments() {
        let input = "/* top\n * more */\ngraph {\n  // one\n  // two\n  # hash\n\n  a [\n    /* in */\n    x=1\n  ]\n}";
        let expected = "/**
 * top
 * more
 */
graph {
  // one
  // two
  # hash
  a [
    /**
     * in
     */
    x = 1;
  ];
}";
        assert_eq!(reprint(input), expected);
    }

    #[test]
    fn comment_escaping() {
        let mut c = AstBuilder::default().counter();
        let comment = AstBuilder::default()
            .comment(&mut c, "a */ b\n\nc", Some(CommentKind::Block))
            .unwrap();
        let out = Printer::default().print(&AstNode::Comment(comment));
        assert_eq!(out, "/**\n * a *\u{200B}/ b\n *\n * c\n */");
    }

    #[test]
    fn options() {
        let dot = DotParser::new("digraph { a [x=1] }").process().unwrap();
        let node = AstNode::Dot(dot);
        let tabs = Printer::new(PrintOptions {
            indent_style: IndentStyle::Tab,
            ..PrintOptions::default()
        });
        assert_eq!(tabs.print(&node), "digraph {\n\ta [\n\t\tx = 1;\n\t];\n}");

        let crlf = Printer::new(PrintOptions {
            indent_size: 4,
            end_of_line: EndOfLine::Crlf,
            ..PrintOptions::default()
        });
        assert_eq!(
            crlf.print(&node),
            "digraph {\r\n    a [\r\n        x = 1;\r\n    ];\r\n}"
        );
    }

    #[test]
    fn standalone_nodes() {
        let b = AstBuilder::default();
        let mut c = b.counter();
        let a = b.literal(&mut c, "a", None).unwrap();
        let z = b.literal(&mut c, "z", Some(Quoting::Bare)).unwrap();
        let ra = b.node_ref(&mut c, a, None, None).unwrap();
        let rz = b.node_ref(&mut c, z, None, None).unwrap();
        let edge = b
            .edge(
                &mut c,
                vec![EdgeTarget::NodeRef(ra), EdgeTarget::NodeRef(rz)],
                vec![],
            )
            .unwrap();
        // Without an enclosing graph the edge is undirected.
        let out = Printer::default().print(&AstNode::Edge(edge));
        assert_eq!(out, "\"a\" -- z;");

        let html = b.literal(&mut c, "<b>x</b>", Some(Quoting::Html)).unwrap();
        assert_eq!(Printer::default().print(&AstNode::Literal(html)), "<<b>x</b>>");
    }

    #[test]
    fn statements() {
        let options = crate::gv::parser::parser::ParseOptions {
            rule: crate::gv::parser::parser::Rule::ClusterStatements,
            ..Default::default()
        };
        let list = DotParser::with_options("a; b -> c", &options)
            .process_rule(options.rule)
            .unwrap()
            .into_statements()
            .unwrap();
        assert_eq!(Printer::default().print_statements(&list), "a;\nb -- c;");
    }

    #[test]
    fn chunks_are_lazy() {
        let dot = DotParser::new("graph { a; b; c }").process().unwrap();
        let node = AstNode::Dot(dot);
        let printer = Printer::default();
        let first: Vec<_> = printer.chunks(&node).take(2).collect();
        assert_eq!(first, vec!["graph ", "{"]);
    }

    #[test]
    fn outline() {
        let dot = DotParser::new("digraph G { a -> {b c} [w=1] }").process().unwrap();
        let expected = "Dot
 Digraph G
  Edge
   a
   Group {b c}
   0) w = 1
";
        assert_eq!(dump_ast(&AstNode::Dot(dot)), expected);
    }
}
