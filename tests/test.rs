#[cfg(test)]
mod tests {

    use dotgraph::core::DotError;
    use dotgraph::gv::escape::{escape, escape_comment, ZERO_WIDTH_SPACE};
    use dotgraph::gv::parser::ast::{AstNode, CommentKind, DotChild, EdgeTarget, Statement};
    use dotgraph::gv::parser::printer::{EndOfLine, IndentStyle};
    use dotgraph::gv::parser::{ParseOptions, Parsed, PrintOptions, Rule};
    use dotgraph::gv::{DotParser, Lexer, ToAstOptions, Token};
    use dotgraph::model::{
        keys, AttributeKind, ClusterContainer, HasAttributes, HasComment, NodeRef,
        RootGraph, Subgraph, TargetSpec, Value,
    };
    use dotgraph::{from_dot, parse, parse_dot, stringify, to_dot, to_dot_with};
    use pretty_assertions::assert_eq;

    fn is_identifier(t: Token, target: &str) -> bool {
        match t {
            Token::Identifier(name) => target == name,
            _ => false,
        }
    }

    fn reprint(text: &str) -> String {
        let dot = parse_dot(text).unwrap();
        stringify(&AstNode::Dot(dot), &PrintOptions::default())
    }

    fn get_sample_program() -> String {
        r##"/* ancestor graph from Caroline Bouvier Kennedy */
        graph G {
            I5 [shape=ellipse,color=red,style=bold,label="Caroline Bouvier Kennedy\nb. 27.11.1957 New York",labelloc=b];
            I1 [shape=box,color=blue,style=bold,label="John Fitzgerald Kennedy\nb. 29.5.1917 Brookline\nd. 22.11.1963 Dallas",labelloc=b];
            I6 [shape=box,color=blue,style=bold,label="John Fitzgerald Kennedy\nb. 25.11.1960 Washington"];
            I2 [shape=ellipse,color=red,style=bold,label="Jaqueline Lee Bouvier\nb. 28.7.1929 Southampton"];
            I8 [shape=box,color=blue,style=bold,label="Joseph Patrick Kennedy\nb. 6.9.1888 East Boston"];
            I9 [shape=ellipse,color=red,style=bold,label="Rose Elizabeth Fitzgerald\nb. 22.7.1890 Boston"];
             I1 -- I5  [style=bold,color=blue];
             I1 -- I6  [style=bold,color=orange];
             I2 -- I6  [style=bold,color=orange];
             I1 -- I2  [style=bold,color=violet];
             I8 -- I1  [style=bold,color=blue];
             I8 -- I9  [style=bold,color=violet];
             I9 -- I1  [style=bold,color=red];
            }
        "##
        .to_string()
    }

    // Valid documents that exercise most of the grammar.
    fn get_corpus() -> Vec<String> {
        vec![
            get_sample_program(),
            "digraph { a -> b; }".to_string(),
            "strict digraph \"G\" { a:p:n -> b:s -> {c d} [weight=2] }".to_string(),
            "graph { node [shape=box]; edge [color=\"red\"]; graph [rankdir=LR]; k = v }"
                .to_string(),
            "digraph { subgraph cluster_0 { label=<<b>x</b>>; a } { b c } -> d }".to_string(),
            "/* head\n * more */\ngraph {\n  # one\n  # two\n  a [\n    // inner\n    x=1.5\n  ]\n}\n// tail"
                .to_string(),
            "graph A {} digraph B { \"q\\\"uote\" -> \"line\\nbreak\" }".to_string(),
            "digraph { a -> b -> c; b [label=\"multi\\\nline\"]; -1.5 -> 0.5 }".to_string(),
            r#"digraph { a [label="c:\\dir\\new\l", xlabel="end\\"]; "x\"y" -> "\\" }"#
                .to_string(),
            format!("graph {{ {} a -- b {} }}", "{".repeat(30), "}".repeat(30)),
        ]
    }

    #[test]
    fn simple() {
        let mut lexer = Lexer::from_string("a -> b");
        let t0 = lexer.next_token();
        let t1 = lexer.next_token();
        let t2 = lexer.next_token();
        assert!(is_identifier(t0, "a"));
        assert!(matches!(t1, Token::ArrowRight));
        assert!(is_identifier(t2, "b"));
        assert!(matches!(lexer.next_token(), Token::EOF));
    }

    #[test]
    fn simple_number() {
        let mut lexer = Lexer::from_string("-12345");
        assert_eq!(lexer.next_token(), Token::Numeral("-12345".to_string()));
    }

    #[test]
    fn parse_sample() {
        let mut parser = DotParser::new(&get_sample_program());
        let dot = parser.process().unwrap();
        let g = dot.graph().unwrap();
        assert_eq!(g.id().unwrap().value(), "G");
        assert!(!g.directed());
        assert_eq!(g.children().len(), 13);
        assert!(matches!(&dot.children()[0], DotChild::Comment(c)
                if c.value() == "ancestor graph from Caroline Bouvier Kennedy"));
    }

    #[test]
    fn scenario_parse_digraph() {
        let dot = parse_dot("digraph { a -> b; }").unwrap();
        assert_eq!(dot.children().len(), 1);
        let g = dot.graph().unwrap();
        assert!(g.directed());
        assert!(!g.strict());
        assert_eq!(g.children().len(), 1);
        let edge = match &g.children()[0] {
            Statement::Edge(e) => e,
            other => panic!("unexpected statement {:?}", other),
        };
        let ids: Vec<&str> = edge
            .targets()
            .iter()
            .map(|t| match t {
                EdgeTarget::NodeRef(r) => r.id().value(),
                EdgeTarget::NodeRefGroup(_) => "{}",
            })
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn scenario_model_to_dot() {
        let mut g = RootGraph::digraph();
        g.node("a");
        g.node("b");
        g.edge(["a", "b"]).unwrap();
        assert_eq!(
            to_dot(&g).unwrap(),
            "digraph {\n  \"a\";\n  \"b\";\n  \"a\" -> \"b\";\n}"
        );
    }

    #[test]
    fn scenario_bare_literals() {
        assert_eq!(reprint("graph { a -- b; }"), "graph {\n  a -- b;\n}");
    }

    #[test]
    fn scenario_comment_escape() {
        let escaped = escape_comment("a */ b", CommentKind::Block);
        assert_eq!(escaped, "a *\u{200B}/ b");
        assert!(!escaped.contains("*/"));
    }

    #[test]
    fn scenario_quote_escape() {
        assert_eq!(escape("a\"b"), "a\\\"b");
    }

    #[test]
    fn scenario_empty_edge() {
        let mut g = RootGraph::graph();
        let sub = g.subgraph("s");
        let err = sub.edge(Vec::<TargetSpec>::new()).unwrap_err();
        match err {
            DotError::EdgeTarget(msg) => assert!(msg.contains("target #1")),
            other => panic!("unexpected error {:?}", other),
        }
        assert!(sub.edges().is_empty());
    }

    #[test]
    fn idempotence() {
        for text in get_corpus() {
            let once = reprint(&text);
            let twice = reprint(&once);
            assert_eq!(once, twice, "input: {}", text);
        }
    }

    #[test]
    fn model_round_trip() {
        let mut g = RootGraph::digraph().with_id("G").with_strict(true);
        g.set_comment(Some("the graph".to_string()));
        g.set("label", "the \"best\" graph");
        g.set("fontsize", 12);
        g.graph_defaults([("rankdir", "LR")]);
        g.node_defaults([("shape", "box")]);
        g.edge_defaults([("color", "gray")]);
        g.node_with("a", [("label", "A\nB")], |n| {
            n.set_comment(Some("first node".to_string()));
        });
        g.node("b").set("fixedsize", true);
        g.node("c").set("label", "<<i>c</i>>");
        {
            let cluster = g.subgraph("cluster_x");
            cluster.set("label", "X");
            cluster.node("d").set("width", 1.25);
            cluster.anonymous_subgraph().set("rank", "same");
        }
        let b = g.get_node("b").unwrap().port("p");
        g.edge_with(
            vec![TargetSpec::from("a:q:ne"), TargetSpec::from(b), vec!["c", "d"].into()],
            [("weight", 3)],
        )
        .unwrap()
        .set_comment(Some("an edge".to_string()));
        g.edge(["d", "a"]).unwrap();

        let text = to_dot(&g).unwrap();
        let parsed = from_dot(&text).unwrap();
        assert_eq!(parsed, g);
        assert_eq!(to_dot(&parsed).unwrap(), text);
    }

    #[test]
    fn model_round_trip_special_text() {
        let mut g = RootGraph::digraph();
        g.node("a").set("node", "keyword key");
        g.node("b").set("Edge", "line1\\nline2");
        g.set("subgraph", "trailing\\");
        g.node_defaults([("label", "a\\rb")]);
        g.edge(["a", "b"]).unwrap().set("label", "c:\\dir\\new\\l");
        {
            let mut sub = g.subgraph("s0");
            for i in 1..30 {
                sub = sub.subgraph(&format!("s{}", i));
            }
            sub.node("leaf").set("label", "\\\\");
        }

        let text = to_dot(&g).unwrap();
        let parsed = from_dot(&text).unwrap();
        assert_eq!(parsed, g);
        assert_eq!(to_dot(&parsed).unwrap(), text);
    }

    #[test]
    fn nesting_limit() {
        let nested = |n: usize| format!("graph {{ {} a {} }}", "{".repeat(n), "}".repeat(n));
        assert!(parse_dot(&nested(47)).is_ok());
        let err = parse_dot(&nested(48)).unwrap_err();
        assert!(matches!(err, DotError::Syntax(ref e) if e.message.contains("limit of 48")));
        assert!(matches!(parse_dot(&nested(20_000)), Err(DotError::Syntax(_))));

        let options = ParseOptions {
            max_nesting_depth: 10,
            ..ParseOptions::default()
        };
        assert!(parse(&nested(9), &options).is_ok());
        assert!(parse(&nested(10), &options).is_err());
    }

    #[test]
    fn quote_safety() {
        let samples = [
            "plain",
            "a\"b",
            "\"; evil -> x; \"",
            "trailing\\",
            "back\\\\slash\\\"",
            "new\nline\r\n",
            "nul\0byte",
            "\u{202E}bidi \u{200B} \u{1F600}",
        ];
        for s in samples.iter() {
            let text = format!("graph {{ \"{}\" }}", escape(s));
            let dot = parse_dot(&text).unwrap();
            let g = dot.graph().unwrap();
            // The value stays one literal, with the escaped text.
            assert_eq!(g.children().len(), 1, "sample: {:?}", s);
            match &g.children()[0] {
                Statement::Node(n) => assert_eq!(n.id().value(), escape(s)),
                other => panic!("unexpected {:?}", other),
            }
        }

        // The model values come back unchanged.
        for s in [
            "a\"b",
            "\"]; x -> y; //",
            "two\nlines",
            "\r\n",
            "line1\\nline2",
            "a\\rb",
            "trailing\\",
            "left\\l",
            "\\\\\"; evil=1",
        ]
        .iter()
        {
            let mut g = RootGraph::graph();
            g.node(s).set("label", *s);
            let parsed = from_dot(&to_dot(&g).unwrap()).unwrap();
            let node = parsed.get_node(s).unwrap();
            assert_eq!(node.get("label"), Some(&Value::from(*s)));
        }
    }

    #[test]
    fn comment_injection() {
        let mut g = RootGraph::graph();
        g.set_comment(Some("a */ graph { evil } /*".to_string()));
        g.node("n").set_comment(Some("*/*/".to_string()));
        let options = ToAstOptions {
            comment_kind: CommentKind::Block,
        };
        let text = to_dot_with(&g, &options, &PrintOptions::default()).unwrap();
        // Only the real terminators are left.
        assert_eq!(text.matches("*/").count(), 2);
        assert!(text.contains(ZERO_WIDTH_SPACE));
        let parsed = from_dot(&text).unwrap();
        assert_eq!(parsed.nodes().len(), 1);
        assert!(parsed.has_node("n"));
    }

    #[test]
    fn edge_arity() {
        let mut g = RootGraph::digraph();
        assert!(g.edge(Vec::<&str>::new()).is_err());
        assert!(g.edge(["a"]).is_err());
        for n in 2..6 {
            let ids: Vec<String> = (0..n).map(|i| format!("n{}", i)).collect();
            let edge = g.edge(ids).unwrap();
            assert_eq!(edge.targets().len(), n);
        }
    }

    #[test]
    fn cluster_convention() {
        assert!(Subgraph::new(Some("cluster_x")).is_cluster());
        assert!(!Subgraph::new(Some("x_cluster")).is_cluster());

        let g = from_dot("graph { subgraph cluster_a { label=A } subgraph b { rank=same } }")
            .unwrap();
        assert!(g.get_subgraph("cluster_a").unwrap().is_cluster());
        assert!(!g.get_subgraph("b").unwrap().is_cluster());
    }

    #[test]
    fn syntax_errors() {
        let text = "digraph {\n  a -- b\n}";
        let err = parse_dot(text).unwrap_err();
        let e = match &err {
            DotError::Syntax(e) => e,
            other => panic!("unexpected error {:?}", other),
        };
        assert_eq!(e.location.start.line, 2);
        assert_eq!(e.location.start.column, 5);
        assert_eq!(e.snippet(text), "  a -- b\n    ^");

        assert!(matches!(parse_dot("graph {"), Err(DotError::Syntax(_))));
        assert!(matches!(parse_dot(""), Err(DotError::Syntax(_))));
        assert!(matches!(parse_dot("graph { a [x=\"open }"), Err(DotError::Syntax(_))));
        assert!(matches!(from_dot("// only a comment"), Err(DotError::Syntax(_))));
    }

    #[test]
    fn start_rules() {
        let options = ParseOptions {
            rule: Rule::Edge,
            ..ParseOptions::default()
        };
        let node = parse("a -> b:p", &options).unwrap().into_node().unwrap();
        assert_eq!(node.kind_name(), "Edge");
        // There is no enclosing graph, so the operator is undirected.
        assert_eq!(stringify(&node, &PrintOptions::default()), "a -- b:p;");

        let options = ParseOptions {
            rule: Rule::ClusterStatements,
            ..ParseOptions::default()
        };
        match parse("a; b -> c", &options).unwrap() {
            Parsed::Statements(list) => assert_eq!(list.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn node_limit() {
        let options = ParseOptions {
            max_ast_nodes: 5,
            ..ParseOptions::default()
        };
        let err = parse("graph { a; b; c; d; e; f }", &options).unwrap_err();
        assert_eq!(err, DotError::NodeCountExceeded { limit: 5 });

        let options = ParseOptions {
            max_ast_nodes: 0,
            ..ParseOptions::default()
        };
        assert!(parse("graph { a; b; c; d; e; f }", &options).is_ok());
    }

    #[test]
    fn formatting_options() {
        let dot = parse_dot("digraph { subgraph s { a } }").unwrap();
        let node = AstNode::Dot(dot);
        let tabs = PrintOptions {
            indent_style: IndentStyle::Tab,
            ..PrintOptions::default()
        };
        assert_eq!(
            stringify(&node, &tabs),
            "digraph {\n\tsubgraph s {\n\t\ta;\n\t}\n}"
        );
        let crlf = PrintOptions {
            end_of_line: EndOfLine::Crlf,
            indent_size: 1,
            ..PrintOptions::default()
        };
        assert_eq!(
            stringify(&node, &crlf),
            "digraph {\r\n subgraph s {\r\n  a;\r\n }\r\n}"
        );
    }

    #[test]
    fn validation() {
        let mut g = RootGraph::digraph();
        assert!(g.node("a").try_set("shape", "box").is_ok());
        let err = g.node("a").try_set("rankdir", "LR").unwrap_err();
        assert_eq!(
            err,
            DotError::Validation {
                key: "rankdir".to_string(),
                kind: "node".to_string(),
            }
        );
        assert!(g.try_set("rankdir", "LR").is_ok());
        let sub = g.subgraph("s");
        assert!(sub.try_set("rank", "same").is_ok());
        assert!(sub.try_set("label", "x").is_err());
        assert!(keys::is_valid_key(AttributeKind::ClusterSubgraph, "label"));
    }

    #[test]
    fn comment_adjacency() {
        let g = from_dot(
            "digraph {\n  /* block */\n  a\n  // line\n  b\n  // far\n\n  c\n  d // trailing\n  e\n}",
        )
        .unwrap();
        assert_eq!(g.get_node("a").unwrap().comment(), Some("block"));
        assert_eq!(g.get_node("b").unwrap().comment(), Some("line"));
        assert_eq!(g.get_node("c").unwrap().comment(), None);
        assert_eq!(g.get_node("d").unwrap().comment(), None);
        // A line comment ends on the line of the next statement.
        assert_eq!(g.get_node("e").unwrap().comment(), Some("trailing"));
    }

    #[test]
    fn node_refs() {
        let g = from_dot("digraph { a:p:sw -> b:q }").unwrap();
        let targets = g.edges()[0].targets();
        assert_eq!(
            targets[0],
            dotgraph::model::EdgeTarget::Node(NodeRef::parse("a:p:sw"))
        );
        assert_eq!(
            targets[1],
            dotgraph::model::EdgeTarget::Node(NodeRef::new("b").with_port("q"))
        );
    }
}
