/*!
This crate provides a library for parsing, building and printing GraphViz DOT
documents. DOT text is parsed into an immutable AST that keeps the source
locations and the comments of the document, and the AST can be printed back
as canonical DOT text. On top of the AST there is a graph model, an object API
for building graphs, that can be converted to and from the AST.

The printer is careful with untrusted content: ids, attribute values and
comments that come from the model are escaped so that they can't break out of
their literal or comment.

The project also comes with a command line utility that reformats .DOT files.

# Parser example: parse a dot file and print it

```rust
    use dotgraph::gv::parser::ast::AstNode;
    use dotgraph::gv::parser::PrintOptions;

    let contents = "graph { a -- b; }";
    match dotgraph::parse_dot(contents) {
        Result::Err(err) => {
            if let dotgraph::core::DotError::Syntax(e) = &err {
                println!("{}", e.snippet(contents));
            }
            println!("Error: {}", err);
        }
        Result::Ok(dot) => {
            let text = dotgraph::stringify(&AstNode::Dot(dot), &PrintOptions::default());
            assert_eq!(text, "graph {\n  a -- b;\n}");
        }
    }
```

A syntax error carries the location of the problem, and can render the
offending line:

```txt
digraph { a -- b }
            ^
1:13: Edge operator '--' is not allowed in a directed graph, use '->'
```

# Model example: create a new graph

```rust
    use dotgraph::model::{ClusterContainer, HasAttributes, RootGraph};

    let mut g = RootGraph::digraph();
    g.node("a").set("shape", "box");
    g.node("b");
    g.edge(["a", "b"]).unwrap();

    let text = dotgraph::to_dot(&g).unwrap();
    assert_eq!(text, "digraph {\n  \"a\" [\n    shape = \"box\";\n  ];\n  \"b\";\n  \"a\" -> \"b\";\n}");

    let parsed = dotgraph::from_dot(&text).unwrap();
    assert_eq!(parsed, g);
```
*/

pub mod adt;
pub mod core;
pub mod gv;
pub mod model;

use crate::core::error::DotError;
use crate::gv::parser::ast::{AstNode, Dot};
use crate::gv::parser::{DotParser, ParseOptions, Parsed, PrintOptions, Printer};
use crate::gv::{ModelBuilder, ToAst, ToAstOptions};
use crate::model::RootGraph;

/// Parses \p text with the start rule and the limits in \p options.
pub fn parse(text: &str, options: &ParseOptions) -> Result<Parsed, DotError> {
    DotParser::with_options(text, options).process_rule(options.rule)
}

/// Parses a whole DOT document with the default options.
pub fn parse_dot(text: &str) -> Result<Dot, DotError> {
    DotParser::new(text).process()
}

/// Prints \p node as DOT text.
pub fn stringify(node: &AstNode, options: &PrintOptions) -> String {
    Printer::new(*options).print(node)
}

/// Parses \p text and converts its first graph to the graph model.
pub fn from_dot(text: &str) -> Result<RootGraph, DotError> {
    let dot = parse_dot(text)?;
    ModelBuilder::new().build(&dot)
}

/// Prints the graph model \p graph as canonical DOT text.
pub fn to_dot(graph: &RootGraph) -> Result<String, DotError> {
    to_dot_with(graph, &ToAstOptions::default(), &PrintOptions::default())
}

/// Like `to_dot`, with the comment style and the formatting options.
pub fn to_dot_with(
    graph: &RootGraph,
    ast_options: &ToAstOptions,
    print_options: &PrintOptions,
) -> Result<String, DotError> {
    let dot = ToAst::new(*ast_options).convert(graph)?;
    Ok(stringify(&AstNode::Dot(dot), print_options))
}
