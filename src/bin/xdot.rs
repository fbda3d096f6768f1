//! This is the command line tool that loads xdot files, builds the graph,
//! answers queries about it and saves the drawing as svg.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{Arg, ArgAction, Command};
use gv::parser::{format_error, DotParser};
use gv::GraphBuilder;
use std::process::exit;
use xdot::backends::svg::SVGWriter;
use xdot::core::geometry::Point;
use xdot::core::utils::{load_from_file, save_to_file};
use xdot::gv;
use xdot::std_shapes::graph::GraphElement;
use xdot::std_shapes::render::render_graph;

struct CLIOptions {
    dump_ast: bool,
    list_elements: bool,
    query: Option<Point>,
    output_path: String,
    broken_backslashes: bool,
    disable_svg: bool,
}

impl CLIOptions {
    pub fn new() -> Self {
        Self {
            dump_ast: false,
            list_elements: false,
            query: None,
            output_path: String::new(),
            broken_backslashes: false,
            disable_svg: false,
        }
    }
}

/// Parses a point in the format "x,y".
fn parse_point(text: &str) -> Option<Point> {
    let (x, y) = text.split_once(',')?;
    let x = x.trim().parse::<f64>().ok()?;
    let y = y.trim().parse::<f64>().ok()?;
    Some(Point::new(x, y))
}

fn list_elements(graph: &GraphElement) {
    println!("Bounding box: {}", graph.bounding_box());
    for n in graph.nodes() {
        print!("Node {} {}", n.id, n.bounding_box());
        if let Some(url) = &n.url {
            print!(" url={}", url);
        }
        println!();
    }
    for e in graph.edges() {
        print!("Edge {} -> {} {}", e.source, e.target, e.bounding_box());
        if let Some(url) = &e.url {
            print!(" url={}", url);
        }
        println!();
    }
}

// Reports the topmost element under \p p and highlights it. Nodes are
// painted on top of edges, so they are checked first.
fn query_point(graph: &mut GraphElement, p: Point) {
    graph.clear_highlights();
    if let Some(n) = graph.find_node_at(p) {
        let id = n.id.clone();
        println!("Node {} is at {}", id, p);
        graph.highlight_node(&id);
        return;
    }
    if let Some(e) = graph.find_edge_at(p) {
        let (source, target) = (e.source.clone(), e.target.clone());
        println!("Edge {} -> {} is at {}", source, target, p);
        graph.highlight_edge(&source, &target);
        return;
    }
    println!("Nothing is at {}", p);
}

fn generate_svg(graph: &GraphElement, output_path: &str) -> bool {
    let mut svg = SVGWriter::new();
    render_graph(graph, &mut svg);
    let content = svg.finalize();

    let res = save_to_file(output_path, &content);
    if let Result::Err(err) = res {
        log::error!("Could not write the file {}", output_path);
        log::error!("Error {}", err);
        return false;
    }
    true
}

fn main() {
    let matches = Command::new("xdot")
        .version("1.x")
        .arg(
            Arg::new("a")
                .short('a')
                .long("ast")
                .action(ArgAction::SetTrue)
                .help("Dump the graph AST"),
        )
        .arg(
            Arg::new("l")
                .short('l')
                .long("list")
                .action(ArgAction::SetTrue)
                .help("List the nodes and edges that have a drawing"),
        )
        .arg(
            Arg::new("at")
                .long("at")
                .value_name("X,Y")
                .allow_hyphen_values(true)
                .help("Print the element under the point and highlight it in the svg"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file"),
        )
        .arg(
            Arg::new("broken-backslashes")
                .long("broken-backslashes")
                .action(ArgAction::SetTrue)
                .help("Collapse double backslashes in the drawing attributes"),
        )
        .arg(
            Arg::new("no-svg")
                .long("no-svg")
                .action(ArgAction::SetTrue)
                .help("Do not render the graph"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    let mut cli = CLIOptions::new();
    cli.dump_ast = matches.get_flag("a");
    cli.list_elements = matches.get_flag("l");
    cli.broken_backslashes = matches.get_flag("broken-backslashes");
    cli.disable_svg = matches.get_flag("no-svg");
    cli.output_path = matches
        .get_one::<String>("output")
        .map(|s| s.as_str())
        .unwrap_or("/tmp/out.svg")
        .to_string();

    if let Some(text) = matches.get_one::<String>("at") {
        match parse_point(text) {
            Some(p) => cli.query = Some(p),
            None => {
                log::error!("Invalid point '{}', expected X,Y", text);
                exit(1);
            }
        }
    }

    let input_path = match matches.get_one::<String>("INPUT") {
        Some(path) => path.clone(),
        None => {
            log::error!("No input file");
            exit(1);
        }
    };

    let contents = match load_from_file(&input_path) {
        Ok(contents) => contents,
        Err(err) => {
            log::error!("Can't open the file {}: {}", input_path, err);
            exit(1);
        }
    };

    let mut parser = DotParser::new(&contents);
    let tree = match parser.parse() {
        Result::Err(err) => {
            log::error!("\n{}", format_error(&contents, &err));
            exit(1);
        }
        Result::Ok(g) => g,
    };

    if cli.dump_ast {
        gv::dump_ast(&tree);
    }

    let builder = GraphBuilder::new().with_broken_backslashes(cli.broken_backslashes);
    let mut graph = builder.build(&tree);

    if cli.list_elements {
        list_elements(&graph);
    }

    if let Some(p) = cli.query {
        query_point(&mut graph, p);
    }

    if !cli.disable_svg && !generate_svg(&graph, &cli.output_path) {
        exit(1);
    }
}

