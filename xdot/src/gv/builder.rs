//! A graph builder that converts parsed AST trees to drawable graphs.

use super::parser::ast;
use super::parser::error::Result;
use super::parser::parse_dot;
use super::xdot::XDotAttrParser;
use crate::std_shapes::graph::{GraphEdge, GraphElement, GraphNode};
use crate::std_shapes::shapes::Shape;

// The methods in this file are responsible for converting the parsed Graphviz
// AST into the GraphElement data-structure that we use for hit-testing and
// rendering of the graph. The layout is not computed here: the positions come
// from the xdot drawing programs that GraphViz attached to the elements.

/// The attributes that draw the background of the graph and its clusters.
const GRAPH_DRAW_ATTRS: [&str; 2] = ["_draw_", "_ldraw_"];

/// The attributes that draw a node: the body, then the label.
const NODE_DRAW_ATTRS: [&str; 2] = ["_draw_", "_ldraw_"];

/// The attributes that draw an edge: the spline, the head arrow, the label,
/// and then the tail arrow, the head label and the tail label.
const EDGE_DRAW_ATTRS: [&str; 6] =
    ["_draw_", "_hdraw_", "_ldraw_", "_tdraw_", "_hldraw_", "_tldraw_"];

/// This class constructs a drawable graph from the parsed AST.
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    broken_backslashes: bool,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            broken_backslashes: false,
        }
    }

    /// Decode the drawing programs with every double backslash collapsed
    /// into one.
    pub fn with_broken_backslashes(mut self, broken_backslashes: bool) -> Self {
        self.broken_backslashes = broken_backslashes;
        self
    }

    /// Parses the xdot file \p input and builds the graph.
    pub fn build_from_str(&self, input: &str) -> Result<GraphElement> {
        let graph = parse_dot(input)?;
        Ok(self.build(&graph))
    }

    /// Builds the graph from the tree \p graph. Nodes and edges without any
    /// drawing are skipped.
    pub fn build(&self, graph: &ast::Graph) -> GraphElement {
        let mut ge = GraphElement::new();
        self.visit_body(
            &graph.attributes,
            &graph.nodes,
            &graph.edges,
            &graph.subgraphs,
            &mut ge,
        );
        log::debug!(
            "Built a graph with {} nodes, {} edges and {} background shapes",
            ge.num_nodes(),
            ge.num_edges(),
            ge.background_shapes().len()
        );
        ge
    }

    // Visit the content of a graph or subgraph. The subgraphs are visited
    // after the elements of the container, depth first.
    fn visit_body(
        &self,
        attributes: &ast::AttributeList,
        nodes: &[ast::Node],
        edges: &[ast::Edge],
        subgraphs: &[ast::Subgraph],
        ge: &mut GraphElement,
    ) {
        for shape in self.decode_all(attributes, &GRAPH_DRAW_ATTRS) {
            ge.add_background_shape(shape);
        }
        for n in nodes {
            self.visit_node(n, ge);
        }
        for e in edges {
            self.visit_edge(e, ge);
        }
        for sg in subgraphs {
            self.visit_body(
                &sg.attributes,
                &sg.nodes,
                &sg.edges,
                &sg.subgraphs,
                ge,
            );
        }
    }

    fn visit_node(&self, n: &ast::Node, ge: &mut GraphElement) {
        let shapes = self.decode_all(&n.attributes, &NODE_DRAW_ATTRS);
        if shapes.is_empty() {
            log::trace!("Node {} has no drawing", n.id);
            return;
        }
        let node = GraphNode::new(&n.id, shapes).with_url(get_url(&n.attributes));
        ge.add_node(node);
    }

    fn visit_edge(&self, e: &ast::Edge, ge: &mut GraphElement) {
        let shapes = self.decode_all(&e.attributes, &EDGE_DRAW_ATTRS);
        if shapes.is_empty() {
            log::trace!("Edge {} -> {} has no drawing", e.source, e.target);
            return;
        }
        let edge = GraphEdge::new(&e.source, &e.target, shapes)
            .with_url(get_url(&e.attributes));
        ge.add_edge(edge);
    }

    /// Decodes the drawing programs in the attributes \p names, in order, and
    /// concatenates the shapes.
    fn decode_all(&self, list: &ast::AttributeList, names: &[&str]) -> Vec<Shape> {
        let mut shapes = Vec::new();
        for name in names {
            if let Some(program) = list.get(name) {
                let mut parser = XDotAttrParser::new(program, self.broken_backslashes);
                shapes.extend(parser.parse());
            }
        }
        shapes
    }
}

// The link of the element. 'URL' and 'href' are synonyms in GraphViz. An
// empty value is no link.
fn get_url(list: &ast::AttributeList) -> Option<String> {
    [list.get("URL"), list.get("href")]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{BoundingBox, Point};

    fn build(input: &str) -> GraphElement {
        GraphBuilder::new().build_from_str(input).unwrap()
    }

    #[test]
    fn nodes_without_drawing_are_skipped() {
        let ge = build("digraph { a; b [label=x]; c [_draw_=\"\"] }");
        assert_eq!(ge.num_nodes(), 0);
        assert_eq!(ge.bounding_box(), BoundingBox::zero());
    }

    #[test]
    fn node_body_then_label() {
        let ge = build(
            "digraph { a [_ldraw_=\"T 10 10 0 5 1 -a\", \
             _draw_=\"e 10 10 20 20\", URL=\"http://a\"] }",
        );
        assert_eq!(ge.num_nodes(), 1);
        let a = ge.get_node("a").unwrap();
        assert_eq!(a.shapes.len(), 2);
        assert_eq!(a.shapes[0].kind_name(), "ellipse");
        assert_eq!(a.shapes[1].kind_name(), "text");
        assert_eq!(a.url.as_deref(), Some("http://a"));
        assert!(!a.highlighted);
    }

    #[test]
    fn edge_programs_are_concatenated_in_order() {
        let ge = build(
            "digraph { a -> b [_ldraw_=\"T 0 0 0 1 1 -x\", \
             _hdraw_=\"P 3 0 0 1 0 0 1\", _draw_=\"B 4 0 0 1 1 2 2 3 3\", \
             href=\"h\"] }",
        );
        assert_eq!(ge.num_edges(), 1);
        let e = &ge.edges()[0];
        assert_eq!(e.source, "a");
        assert_eq!(e.target, "b");
        let kinds: Vec<&str> = e.shapes.iter().map(|s| s.kind_name()).collect();
        assert_eq!(kinds, vec!["bezier", "polygon", "text"]);
        assert_eq!(e.url.as_deref(), Some("h"));
        // The edge does not create the nodes.
        assert_eq!(ge.num_nodes(), 0);
    }

    #[test]
    fn empty_links_are_absent() {
        let ge = build(
            "digraph { a [URL=\"\", _draw_=\"E 0 0 2 2\"]; \
             b [href=\"\", _draw_=\"E 9 9 2 2\"]; \
             c [URL=\"\", href=\"h\", _draw_=\"E 20 20 2 2\"] }",
        );
        assert_eq!(ge.get_node("a").unwrap().url, None);
        assert_eq!(ge.get_node("b").unwrap().url, None);
        assert_eq!(ge.get_node("c").unwrap().url.as_deref(), Some("h"));
    }

    #[test]
    fn background_and_subgraphs() {
        let ge = build(
            "digraph { _draw_=\"P 3 0 0 100 0 0 100\"; \
             subgraph cluster_0 { _draw_=\"L 2 0 0 1 1\"; \
               b [_draw_=\"E 50 50 2 2\"] } \
             a [_draw_=\"E 5 5 2 2\"] }",
        );
        assert_eq!(ge.background_shapes().len(), 2);
        assert_eq!(ge.background_shapes()[1].kind_name(), "polyline");
        let ids: Vec<&str> = ge.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(ge.find_node_at(Point::new(50., 50.)).unwrap().id, "b");
    }

    #[test]
    fn broken_backslashes() {
        let input = r#"digraph { a [_draw_="T 0 0 0 5 3 -a\\\\b"] }"#;
        let ge = GraphBuilder::new()
            .with_broken_backslashes(true)
            .build_from_str(input)
            .unwrap();
        match &ge.get_node("a").unwrap().shapes[0] {
            Shape::Text { text, .. } => assert_eq!(text, "a\\b"),
            s => panic!("Unexpected shape {:?}", s),
        }
    }

    #[test]
    fn parse_errors_are_reported() {
        assert!(GraphBuilder::new().build_from_str("digraph {").is_err());
    }
}
