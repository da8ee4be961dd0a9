//! This is the command line tool that loads '.dot' files, reformats them and
//! prints or saves the output.

use clap::{Arg, ArgAction, Command};
use dotgraph::core::DotError;
use dotgraph::gv::parser::ast::AstNode;
use dotgraph::gv::parser::printer::{EndOfLine, IndentStyle};
use dotgraph::gv::parser::PrintOptions;
use dotgraph::gv::{dump_ast, ToAstOptions};
use std::fs::{self, File};
use std::io::{Error, Write};

struct CLIOptions {
    output_path: Option<String>,
    through_model: bool,
    dump_ast: bool,
    print: PrintOptions,
}

fn save_to_file(filename: &str, content: &str) -> Result<(), Error> {
    let mut f = File::create(filename)?;
    write!(f, "{}", content)?;
    log::info!("Wrote {}", filename);
    Ok(())
}

fn report(err: &DotError, contents: &str) {
    if let DotError::Syntax(e) = err {
        log::error!("\n{}", e.snippet(contents));
    }
    log::error!("Error: {}", err);
}

// Returns the formatted text, or None if the input was rejected.
fn format(contents: &str, options: &CLIOptions) -> Option<String> {
    let dot = match dotgraph::parse_dot(contents) {
        Ok(dot) => dot,
        Err(err) => {
            report(&err, contents);
            return None;
        }
    };
    if options.dump_ast {
        print!("{}", dump_ast(&AstNode::Dot(dot.clone())));
    }
    if !options.through_model {
        return Some(dotgraph::stringify(&AstNode::Dot(dot), &options.print));
    }

    let mut builder = dotgraph::gv::ModelBuilder::new();
    let result = builder.build(&dot).and_then(|graph| {
        dotgraph::to_dot_with(&graph, &ToAstOptions::default(), &options.print)
    });
    if builder.dropped_comments() > 0 {
        log::warn!("Dropped {} detached comments", builder.dropped_comments());
    }
    match result {
        Ok(text) => Some(text),
        Err(err) => {
            report(&err, contents);
            None
        }
    }
}

fn main() {
    let matches = Command::new("dotfmt")
        .version("0.1.0")
        .about("Reformats GraphViz DOT files")
        .arg(
            Arg::new("d")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enables debug logging"),
        )
        .arg(
            Arg::new("model")
                .long("model")
                .action(ArgAction::SetTrue)
                .help("Convert the graph to the graph model and back"),
        )
        .arg(
            Arg::new("ast")
                .short('a')
                .long("ast")
                .action(ArgAction::SetTrue)
                .help("Dump the graph AST"),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .default_value("2")
                .help("The number of spaces in each indentation level"),
        )
        .arg(
            Arg::new("tabs")
                .long("tabs")
                .action(ArgAction::SetTrue)
                .help("Indent with tabs"),
        )
        .arg(
            Arg::new("crlf")
                .long("crlf")
                .action(ArgAction::SetTrue)
                .help("End lines with CRLF"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    let mut logger = env_logger::builder();
    logger.format_timestamp(None);
    if matches.get_flag("d") {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let cli = CLIOptions {
        output_path: matches.get_one::<String>("output").cloned(),
        through_model: matches.get_flag("model"),
        dump_ast: matches.get_flag("ast"),
        print: PrintOptions {
            indent_style: if matches.get_flag("tabs") {
                IndentStyle::Tab
            } else {
                IndentStyle::Space
            },
            indent_size: matches.get_one::<usize>("indent").copied().unwrap_or(2),
            end_of_line: if matches.get_flag("crlf") {
                EndOfLine::Crlf
            } else {
                EndOfLine::Lf
            },
        },
    };

    let input_path = match matches.get_one::<String>("INPUT") {
        Some(path) => path,
        None => return,
    };
    let contents = match fs::read_to_string(input_path) {
        Ok(contents) => contents,
        Err(err) => {
            log::error!("Could not read the file {}", input_path);
            log::error!("Error {}", err);
            std::process::exit(1);
        }
    };

    let text = match format(&contents, &cli) {
        Some(text) => text,
        None => std::process::exit(1),
    };

    match &cli.output_path {
        Some(path) => {
            if let Err(err) = save_to_file(path, &text) {
                log::error!("Could not write the file {}", path);
                log::error!("Error {}", err);
                std::process::exit(1);
            }
        }
        None => println!("{}", text),
    }
}
