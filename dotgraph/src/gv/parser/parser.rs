use super::ast::*;
use super::factory::{AstBuilder, BuilderOptions, NodeCounter};
use super::lexer::{Lexer, Token, DEFAULT_MAX_HTML_DEPTH};
use crate::core::base::{Location, Position};
use crate::core::error::{DotError, ParseFailure, SyntaxError};

/// The default limit on the number of AST nodes that one parse may create.
pub const DEFAULT_MAX_AST_NODES: usize = 100_000;

/// The default limit on the nesting of '{ }' bodies, counting the body of
/// the graph.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 48;

/// The grammar rule that the parser starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Dot,
    Graph,
    Subgraph,
    Node,
    Edge,
    AttributeList,
    Attribute,
    ClusterStatements,
}

impl Rule {
    fn describe(&self) -> &'static str {
        match self {
            Rule::Dot => "a graph",
            Rule::Graph => "a graph",
            Rule::Subgraph => "a subgraph",
            Rule::Node => "a node statement",
            Rule::Edge => "an edge statement",
            Rule::AttributeList => "an attribute statement",
            Rule::Attribute => "an attribute assignment",
            Rule::ClusterStatements => "a statement",
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Rule::Dot
    }
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub rule: Rule,
    /// Reported in syntax errors.
    pub filename: Option<String>,
    /// The maximum nesting of '<' in HTML-like strings, including the
    /// delimiting pair.
    pub max_html_nesting_depth: usize,
    /// The maximum number of AST nodes. Zero means no limit.
    pub max_ast_nodes: usize,
    /// The maximum nesting of graph and subgraph bodies. Zero means no
    /// limit, and deep input can then overflow the stack.
    pub max_nesting_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            rule: Rule::Dot,
            filename: None,
            max_html_nesting_depth: DEFAULT_MAX_HTML_DEPTH,
            max_ast_nodes: DEFAULT_MAX_AST_NODES,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// The result of parsing. Every rule produces a single node, except for
/// `Rule::ClusterStatements` that produces a list of statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Node(AstNode),
    Statements(Vec<Statement>),
}

impl Parsed {
    pub fn into_node(self) -> Option<AstNode> {
        match self {
            Parsed::Node(node) => Some(node),
            Parsed::Statements(_) => None,
        }
    }

    pub fn into_statements(self) -> Option<Vec<Statement>> {
        match self {
            Parsed::Node(_) => None,
            Parsed::Statements(list) => Some(list),
        }
    }
}

// A comment that was skipped by the lexer and is waiting to be placed in
// the tree.
#[derive(Debug, Clone)]
struct PendingComment {
    kind: CommentKind,
    value: String,
    location: Location,
}

#[derive(Debug, Clone)]
pub struct DotParser {
    lexer: Lexer,
    tok: Token,
    loc: Location,
    // The end of the last token that was consumed.
    prev_end: Position,
    pending: Vec<PendingComment>,
    // The kind of the enclosing graph, if any.
    directed: Option<bool>,
    builder: AstBuilder,
    counter: NodeCounter,
    filename: Option<String>,
    // The number of bodies that are open, and the limit.
    depth: usize,
    max_depth: usize,
}

impl DotParser {
    pub fn new(input: &str) -> Self {
        Self::with_options(input, &ParseOptions::default())
    }

    pub fn with_options(input: &str, options: &ParseOptions) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let builder = AstBuilder::new(BuilderOptions {
            max_ast_nodes: options.max_ast_nodes,
            ..BuilderOptions::default()
        });
        let counter = builder.counter();
        let origin = Position::start();
        Self {
            lexer: Lexer::new(chars)
                .with_max_html_depth(options.max_html_nesting_depth),
            tok: Token::Colon,
            loc: Location::new(origin, origin),
            prev_end: origin,
            pending: Vec::new(),
            directed: None,
            builder,
            counter,
            filename: options.filename.clone(),
            depth: 0,
            max_depth: options.max_nesting_depth,
        }
    }

    /// The number of AST nodes that were created so far.
    pub fn node_count(&self) -> usize {
        self.counter.count()
    }

    pub fn lex(&mut self) {
        self.prev_end = self.loc.end;
        loop {
            let tok = self.lexer.next_token();
            let loc = self.lexer.token_location();
            if let Token::Comment(kind, value) = tok {
                self.push_comment(kind, value, loc);
                continue;
            }
            self.tok = tok;
            self.loc = loc;
            return;
        }
    }

    // Line comments on consecutive lines are merged into one comment.
    fn push_comment(&mut self, kind: CommentKind, value: String, loc: Location) {
        if let Some(last) = self.pending.last_mut() {
            if kind != CommentKind::Block
                && last.kind == kind
                && last.location.end.line == loc.start.line
            {
                last.value.push('\n');
                last.value.push_str(&value);
                last.location = last.location.join(&loc);
                return;
            }
        }
        self.pending.push(PendingComment {
            kind,
            value,
            location: loc,
        });
    }

    // Turns the pending comments into AST nodes.
    fn take_comments(&mut self) -> Result<Vec<Comment>, DotError> {
        let pending = std::mem::take(&mut self.pending);
        let mut result = Vec::with_capacity(pending.len());
        for c in pending {
            let comment = self
                .builder
                .comment(&mut self.counter, c.value, Some(c.kind))?
                .at(c.location);
            result.push(comment);
        }
        Ok(result)
    }

    fn fail<T>(&self, expected: &str) -> Result<T, DotError> {
        let message = match &self.tok {
            Token::Error(msg) => msg.clone(),
            tok => format!("Expected {}, found {}", expected, tok.describe()),
        };
        self.fail_with(message, expected, self.loc)
    }

    fn fail_with<T>(
        &self,
        message: String,
        expected: &str,
        location: Location,
    ) -> Result<T, DotError> {
        let cause = ParseFailure {
            expected: expected.to_string(),
            found: self.tok.describe(),
            offset: location.start.offset,
        };
        Err(DotError::Syntax(SyntaxError {
            message,
            location,
            filename: self.filename.clone(),
            cause,
        }))
    }

    fn expect(&mut self, tok: Token, expected: &str) -> Result<(), DotError> {
        if self.tok == tok {
            self.lex();
            return Ok(());
        }
        self.fail(expected)
    }

    // The range from \p start to the end of the last consumed token.
    fn span(&self, start: Position) -> Location {
        Location::new(start, self.prev_end)
    }

    fn is_literal(&self) -> bool {
        matches!(
            self.tok,
            Token::Identifier(_)
                | Token::Numeral(_)
                | Token::QuotedString(_)
                | Token::Html(_)
        )
    }

    fn is_edge_token(&self) -> bool {
        matches!(self.tok, Token::ArrowLine | Token::ArrowRight)
    }

    // ID : identifier | numeral | quoted string | html string
    fn parse_literal(&mut self, expected: &str) -> Result<Literal, DotError> {
        let (value, quoted) = match &self.tok {
            Token::Identifier(s) | Token::Numeral(s) => {
                (s.clone(), Quoting::Bare)
            }
            Token::QuotedString(s) => (s.clone(), Quoting::Quoted),
            Token::Html(s) => (s.clone(), Quoting::Html),
            _ => return self.fail(expected),
        };
        let loc = self.loc;
        let lit = self
            .builder
            .literal(&mut self.counter, value, Some(quoted))?
            .at(loc);
        self.lex();
        Ok(lit)
    }

    // dot : (comment | graph)+
    pub fn parse_dot(&mut self) -> Result<Dot, DotError> {
        let mut children = Vec::new();
        let mut has_graph = false;
        loop {
            for c in self.take_comments()? {
                children.push(DotChild::Comment(c));
            }
            if self.tok == Token::EOF {
                break;
            }
            children.push(DotChild::Graph(self.parse_graph()?));
            has_graph = true;
        }
        if !has_graph {
            return self.fail("'graph' or 'digraph'");
        }
        let loc = Location::new(Position::start(), self.lexer.position());
        Ok(self.builder.dot(&mut self.counter, children)?.at(loc))
    }

    // graph : [ strict ] (graph | digraph) [ ID ] '{' stmt_list '}'
    pub fn parse_graph(&mut self) -> Result<Graph, DotError> {
        let start = self.loc.start;

        // Consume the 'strict' keyword.
        let mut strict = false;
        if let Token::StrictKW = self.tok {
            strict = true;
            self.lex();
        }

        let directed = match self.tok {
            Token::GraphKW => false,
            Token::DigraphKW => true,
            _ => {
                return self.fail("'graph' or 'digraph'");
            }
        };
        self.lex();

        // Consume the optional graph name.
        let mut id = None;
        if self.is_literal() {
            id = Some(self.parse_literal("a graph name")?);
        }

        let outer = self.directed.replace(directed);
        let children = self.parse_body();
        self.directed = outer;
        let children = children?;

        let loc = self.span(start);
        let graph = self.builder.graph(
            &mut self.counter,
            directed,
            Some(strict),
            id,
            children,
        )?;
        Ok(graph.at(loc))
    }

    // subgraph : [ subgraph [ ID ] ] '{' stmt_list '}'
    pub fn parse_subgraph(&mut self) -> Result<Subgraph, DotError> {
        let start = self.loc.start;
        let mut id = None;

        // Consume the 'subgraph' keyword and the optional name.
        if let Token::SubgraphKW = self.tok {
            self.lex();
            if self.is_literal() {
                id = Some(self.parse_literal("a subgraph name")?);
            }
        }

        let children = self.parse_body()?;
        let loc = self.span(start);
        let subgraph = self.builder.subgraph(&mut self.counter, id, children)?;
        Ok(subgraph.at(loc))
    }

    // '{' stmt_list '}'
    fn parse_body(&mut self) -> Result<Vec<Statement>, DotError> {
        if self.max_depth != 0 && self.depth >= self.max_depth {
            let message = format!(
                "Subgraphs are nested deeper than the limit of {} levels",
                self.max_depth
            );
            return self.fail_with(message, "'{'", self.loc);
        }
        self.expect(Token::OpenBrace, "'{'")?;
        self.depth += 1;
        let list = self.parse_stmt_list(true);
        self.depth -= 1;
        let list = list?;
        self.expect(Token::CloseBrace, "'}'")?;
        Ok(list)
    }

    // stmt_list : [ stmt [ ';' ] stmt_list ]
    pub fn parse_stmt_list(
        &mut self,
        in_braces: bool,
    ) -> Result<Vec<Statement>, DotError> {
        let mut list = Vec::new();

        loop {
            for c in self.take_comments()? {
                list.push(Statement::Comment(c));
            }

            match self.tok {
                Token::Semicolon => {
                    // Skip empty statements.
                    self.lex();
                    continue;
                }
                Token::CloseBrace if in_braces => {
                    return Ok(list);
                }
                Token::EOF if in_braces => {
                    return self.fail("'}'");
                }
                Token::EOF => {
                    return Ok(list);
                }
                _ => {}
            }

            let stmt = self.parse_stmt()?;
            list.push(stmt);

            if let Token::Semicolon = self.tok {
                self.lex();
            }
        }
    }

    // stmt : node_stmt | edge_stmt | attr_stmt | ID '=' ID | subgraph
    pub fn parse_stmt(&mut self) -> Result<Statement, DotError> {
        let start = self.loc.start;
        match self.tok {
            Token::GraphKW => self.parse_attr_stmt(AttributeListKind::Graph),
            Token::NodeKW => self.parse_attr_stmt(AttributeListKind::Node),
            Token::EdgeKW => self.parse_attr_stmt(AttributeListKind::Edge),

            Token::SubgraphKW | Token::OpenBrace => {
                let subgraph = self.parse_subgraph()?;
                if self.is_edge_token() {
                    // { a b } -> c
                    let group = self.subgraph_to_group(subgraph)?;
                    let target = EdgeTarget::NodeRefGroup(group);
                    let edge = self.parse_edge_rhs(target, start)?;
                    return Ok(Statement::Edge(edge));
                }
                Ok(Statement::Subgraph(subgraph))
            }

            Token::Identifier(_)
            | Token::Numeral(_)
            | Token::QuotedString(_)
            | Token::Html(_) => {
                let id = self.parse_literal("an identifier")?;

                // ID '=' ID
                if let Token::Equal = self.tok {
                    self.lex();
                    let value = self.parse_literal("an attribute value")?;
                    let loc = self.span(start);
                    let attr =
                        self.builder.attribute(&mut self.counter, id, value)?;
                    return Ok(Statement::Attribute(attr.at(loc)));
                }

                let (port, compass) = self.parse_port()?;

                if self.is_edge_token() {
                    let loc = self.span(start);
                    let node_ref = self
                        .builder
                        .node_ref(&mut self.counter, id, port, compass)?
                        .at(loc);
                    let target = EdgeTarget::NodeRef(node_ref);
                    let edge = self.parse_edge_rhs(target, start)?;
                    return Ok(Statement::Edge(edge));
                }

                let children = self.parse_attr_list()?;
                let loc = self.span(start);
                let node = self.builder.node(
                    &mut self.counter,
                    id,
                    port,
                    compass,
                    children,
                )?;
                Ok(Statement::Node(node.at(loc)))
            }

            _ => self.fail("a statement"),
        }
    }

    //attr_stmt : (graph | node | edge) [ attr_list ]
    fn parse_attr_stmt(
        &mut self,
        kind: AttributeListKind,
    ) -> Result<Statement, DotError> {
        let start = self.loc.start;
        // Consume the keyword.
        self.lex();
        let children = self.parse_attr_list()?;
        let loc = self.span(start);
        let list = self
            .builder
            .attribute_list(&mut self.counter, kind, children)?;
        Ok(Statement::AttributeList(list.at(loc)))
    }

    //attr_list : '[' [ a_list ] ']' [ attr_list ]
    // Returns an empty list if there is no '['.
    pub fn parse_attr_list(&mut self) -> Result<Vec<AttributeItem>, DotError> {
        let mut items = Vec::new();

        while let Token::OpenBracket = self.tok {
            self.lex();
            loop {
                for c in self.take_comments()? {
                    items.push(AttributeItem::Comment(c));
                }

                if let Token::CloseBracket = self.tok {
                    self.lex();
                    break;
                }

                let start = self.loc.start;
                let key = self.parse_literal("an attribute name or ']'")?;
                self.expect(Token::Equal, "'='")?;
                let value = self.parse_literal("an attribute value")?;
                let loc = self.span(start);
                let attr = self.builder.attribute(&mut self.counter, key, value)?;
                items.push(AttributeItem::Attribute(attr.at(loc)));

                // Skip the separator.
                if let Token::Semicolon | Token::Comma = self.tok {
                    self.lex();
                }
            }
        }
        Ok(items)
    }

    // port : [ ':' ID [ ':' compass ] ]
    fn parse_port(
        &mut self,
    ) -> Result<(Option<Literal>, Option<Literal>), DotError> {
        if self.tok != Token::Colon {
            return Ok((None, None));
        }
        // Consume the colon.
        self.lex();
        let port = self.parse_literal("a port name")?;

        if self.tok != Token::Colon {
            return Ok((Some(port), None));
        }
        self.lex();
        let compass = self.parse_literal("a compass point")?;
        Ok((Some(port), Some(compass)))
    }

    //node_id : ID [ port ]
    pub fn parse_node_ref(&mut self) -> Result<NodeRef, DotError> {
        let start = self.loc.start;
        let id = self.parse_literal("a node name")?;
        let (port, compass) = self.parse_port()?;
        let loc = self.span(start);
        let node_ref = self.builder.node_ref(&mut self.counter, id, port, compass)?;
        Ok(node_ref.at(loc))
    }

    //edgeRHS : edgeop (node_id | subgraph) [ edgeRHS ]
    fn parse_edge_rhs(
        &mut self,
        first: EdgeTarget,
        start: Position,
    ) -> Result<Edge, DotError> {
        let mut targets = vec![first];

        // Outside of a graph the first operator decides the kind of edge.
        let mut directed = self.directed;

        while self.is_edge_token() {
            let is_arrow = matches!(self.tok, Token::ArrowRight);
            match directed {
                Some(true) if !is_arrow => {
                    return self.fail_with(
                        "Edge operator '--' is not allowed in a directed \
                         graph, use '->'"
                            .to_string(),
                        "'->'",
                        self.loc,
                    );
                }
                Some(false) if is_arrow => {
                    return self.fail_with(
                        "Edge operator '->' is not allowed in an undirected \
                         graph, use '--'"
                            .to_string(),
                        "'--'",
                        self.loc,
                    );
                }
                _ => {}
            }
            directed = Some(is_arrow);

            // Consume the arrow.
            self.lex();

            let target = match self.tok {
                Token::OpenBrace | Token::SubgraphKW => {
                    let subgraph = self.parse_subgraph()?;
                    EdgeTarget::NodeRefGroup(self.subgraph_to_group(subgraph)?)
                }
                _ => EdgeTarget::NodeRef(self.parse_node_ref()?),
            };
            targets.push(target);
        }

        // Parse the optional attribute list.
        let children = self.parse_attr_list()?;
        let loc = self.span(start);
        let edge = self.builder.edge(&mut self.counter, targets, children)?;
        Ok(edge.at(loc))
    }

    // Edges can connect groups of nodes that are written like anonymous
    // subgraphs: { a b c }.
    fn subgraph_to_group(
        &mut self,
        subgraph: Subgraph,
    ) -> Result<NodeRefGroup, DotError> {
        let loc = subgraph.location.unwrap_or(self.loc);
        if subgraph.id.is_some() {
            return self.fail_with(
                "A named subgraph can't be used as an edge endpoint".to_string(),
                "a node or a group of nodes",
                loc,
            );
        }

        let mut refs = Vec::new();
        for stmt in subgraph.children {
            let stmt_loc = stmt.location().unwrap_or(loc);
            match stmt {
                Statement::Comment(_) => {}
                Statement::Node(n) if n.children.is_empty() => {
                    let node_ref = self.builder.node_ref(
                        &mut self.counter,
                        n.id,
                        n.port,
                        n.compass,
                    )?;
                    refs.push(node_ref.at(stmt_loc));
                }
                _ => {
                    return self.fail_with(
                        "Only node names can be used in a group of edge \
                         endpoints"
                            .to_string(),
                        "a node name",
                        stmt_loc,
                    );
                }
            }
        }
        let group = self.builder.node_ref_group(&mut self.counter, refs)?;
        Ok(group.at(loc))
    }

    fn finish(&mut self) -> Result<(), DotError> {
        if let Token::EOF = self.tok {
            return Ok(());
        }
        self.fail("the end of the input")
    }

    /// Parses dot files, as specified here:
    /// <https://graphviz.org/doc/info/lang.html>
    pub fn process(&mut self) -> Result<Dot, DotError> {
        self.lex();
        let result = self.parse_dot()?;
        self.finish()?;
        #[cfg(feature = "log")]
        log::debug!("Parsed a dot file into {} AST nodes", self.node_count());
        Result::Ok(result)
    }

    /// Parses the input starting from the grammar rule \p rule. The whole
    /// input must match the rule.
    pub fn process_rule(&mut self, rule: Rule) -> Result<Parsed, DotError> {
        if let Rule::Dot = rule {
            return self.process().map(|dot| Parsed::Node(AstNode::Dot(dot)));
        }

        self.lex();
        let result = match rule {
            Rule::Dot | Rule::Graph => {
                self.pending.clear();
                Parsed::Node(AstNode::Graph(self.parse_graph()?))
            }
            Rule::Subgraph => {
                self.pending.clear();
                if !matches!(self.tok, Token::SubgraphKW | Token::OpenBrace) {
                    return self.fail("'subgraph' or '{'");
                }
                Parsed::Node(AstNode::Subgraph(self.parse_subgraph()?))
            }
            Rule::ClusterStatements => {
                Parsed::Statements(self.parse_stmt_list(false)?)
            }
            Rule::Node | Rule::Edge | Rule::AttributeList | Rule::Attribute => {
                self.pending.clear();
                let first = self.loc;
                let stmt = self.parse_stmt()?;
                let matches_rule = matches!(
                    (rule, &stmt),
                    (Rule::Node, Statement::Node(_))
                        | (Rule::Edge, Statement::Edge(_))
                        | (Rule::AttributeList, Statement::AttributeList(_))
                        | (Rule::Attribute, Statement::Attribute(_))
                );
                if !matches_rule {
                    let loc = stmt.location().unwrap_or(first);
                    return self.fail_with(
                        format!("Expected {}", rule.describe()),
                        rule.describe(),
                        loc,
                    );
                }
                if let Token::Semicolon = self.tok {
                    self.lex();
                }
                Parsed::Node(stmt.into())
            }
        };
        self.finish()?;
        // Comments after the last statement have no place in the result.
        self.pending.clear();
        #[cfg(feature = "log")]
        log::debug!("Parsed {:?} into {} AST nodes", rule, self.node_count());
        Ok(result)
    }
}
