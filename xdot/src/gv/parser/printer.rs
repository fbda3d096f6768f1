//! A collection of methods for printing the AST and parse errors.

use super::ast;
use super::error::ParseError;
use std::fmt::Write;

fn print_attribute_list(out: &mut String, ll: &ast::AttributeList, indent: usize) {
    for (i, att) in ll.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}{})\"{}\" = \"{}\"",
            " ".repeat(indent),
            i,
            att.name,
            att.value
        );
    }
}

fn print_endpoint(id: &str, port: &Option<String>) -> String {
    match port {
        Some(port) => format!("{}:{}", id, port),
        None => id.to_string(),
    }
}

fn print_edge(out: &mut String, e: &ast::Edge, indent: usize) {
    let arrow = match e.kind {
        ast::ArrowKind::Arrow => "->",
        ast::ArrowKind::Line => "--",
    };
    let _ = writeln!(
        out,
        "{}Edge {} {} {}",
        " ".repeat(indent),
        print_endpoint(&e.source, &e.source_port),
        arrow,
        print_endpoint(&e.target, &e.target_port)
    );
    print_attribute_list(out, &e.attributes, indent + 1);
}

fn print_node(out: &mut String, n: &ast::Node, indent: usize) {
    let _ = writeln!(out, "{}Node {}", " ".repeat(indent), n.id);
    print_attribute_list(out, &n.attributes, indent + 1);
}

fn print_defaults(out: &mut String, title: &str, ll: &ast::AttributeList, indent: usize) {
    if ll.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}{}:", " ".repeat(indent), title);
    print_attribute_list(out, ll, indent + 1);
}

#[allow(clippy::too_many_arguments)]
fn print_body(
    out: &mut String,
    attributes: &ast::AttributeList,
    node_attributes: &ast::AttributeList,
    edge_attributes: &ast::AttributeList,
    nodes: &[ast::Node],
    edges: &[ast::Edge],
    subgraphs: &[ast::Subgraph],
    indent: usize,
) {
    print_defaults(out, "Attribute Graph", attributes, indent);
    print_defaults(out, "Attribute Node", node_attributes, indent);
    print_defaults(out, "Attribute Edge", edge_attributes, indent);
    for n in nodes {
        print_node(out, n, indent);
    }
    for e in edges {
        print_edge(out, e, indent);
    }
    for s in subgraphs {
        print_subgraph(out, s, indent);
    }
}

fn print_subgraph(out: &mut String, s: &ast::Subgraph, indent: usize) {
    let _ = writeln!(out, "{}Subgraph: {}", " ".repeat(indent), s.id);
    print_body(
        out,
        &s.attributes,
        &s.node_attributes,
        &s.edge_attributes,
        &s.nodes,
        &s.edges,
        &s.subgraphs,
        indent + 1,
    );
}

/// Renders the AST as an indented tree.
pub fn format_ast(graph: &ast::Graph) -> String {
    let mut out = String::new();
    let kind = match graph.kind {
        ast::GraphKind::Graph => "graph",
        ast::GraphKind::Digraph => "digraph",
    };
    let strict = if graph.strict { "strict " } else { "" };
    let _ = writeln!(out, "Graph: {}{} {}", strict, kind, graph.id);
    print_body(
        &mut out,
        &graph.attributes,
        &graph.node_attributes,
        &graph.edge_attributes,
        &graph.nodes,
        &graph.edges,
        &graph.subgraphs,
        1,
    );
    out
}

pub fn dump_ast(graph: &ast::Graph) {
    print!("{}", format_ast(graph));
}

/// Renders the error, and the line of \p source that it points to, with a
/// '^' marker under the offending column:
///
/// ```txt
/// graph { a -> b -> c }
///                ^
/// 1:16: Edge chains (a -> b -> c) are not supported, found '->'
/// ```
pub fn format_error(source: &str, err: &ParseError) -> String {
    let mut out = String::new();
    if let Some(line) = source.lines().nth(err.line().saturating_sub(1)) {
        let _ = writeln!(out, "{}", line);
        let _ = writeln!(out, "{}^", " ".repeat(err.column().saturating_sub(1)));
    }
    let _ = write!(out, "{}", err);
    out
}
