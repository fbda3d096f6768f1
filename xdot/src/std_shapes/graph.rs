//! The drawable graph: nodes and edges that own the shapes decoded from their
//! xdot attributes, plus the selection state (highlighting) and the queries
//! that map a point on the canvas to an element.

use super::shapes::{bounding_box_of, Shape};
use crate::core::geometry::{BoundingBox, Point};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub shapes: Vec<Shape>,
    pub url: Option<String>,
    pub highlighted: bool,
}

impl GraphNode {
    pub fn new(id: &str, shapes: Vec<Shape>) -> Self {
        Self {
            id: id.to_string(),
            shapes,
            url: None,
            highlighted: false,
        }
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn bounding_box(&self) -> BoundingBox {
        bounding_box_of(&self.shapes)
    }

    /// \returns true if any of the shapes of the node contains \p p.
    pub fn contains_point(&self, p: Point) -> bool {
        self.shapes.iter().any(|s| s.contains_point(p))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub shapes: Vec<Shape>,
    pub url: Option<String>,
    pub highlighted: bool,
}

impl GraphEdge {
    pub fn new(source: &str, target: &str, shapes: Vec<Shape>) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            shapes,
            url: None,
            highlighted: false,
        }
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn bounding_box(&self) -> BoundingBox {
        bounding_box_of(&self.shapes)
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.shapes.iter().any(|s| s.contains_point(p))
    }
}

/// Owns all of the nodes, edges and background shapes of a graph. The order
/// of the lists is the declaration order, which is also the painting order.
/// Hit-testing walks the lists backwards so that the element that is painted
/// last (on top) wins.
#[derive(Debug, Clone, Default)]
pub struct GraphElement {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    background_shapes: Vec<Shape>,
    // Maps node ids to their index in `nodes`. A re-declared id points to
    // the latest node.
    node_index: HashMap<String, usize>,
}

impl GraphElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: GraphNode) {
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    pub fn add_edge(&mut self, edge: GraphEdge) {
        self.edges.push(edge);
    }

    pub fn add_background_shape(&mut self, shape: Shape) {
        self.background_shapes.push(shape);
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn background_shapes(&self) -> &[Shape] {
        &self.background_shapes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// \returns the node with the id \p id. If the id was declared more than
    /// once this is the latest declaration.
    pub fn get_node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).map(|idx| &self.nodes[*idx])
    }

    /// \returns the box that encloses everything that is drawn, or the zero
    /// box for an empty graph.
    pub fn bounding_box(&self) -> BoundingBox {
        let background = self.background_shapes.iter().map(|s| s.bounding_box());
        let nodes = self.nodes.iter().map(|n| n.bounding_box());
        let edges = self.edges.iter().map(|e| e.bounding_box());
        BoundingBox::union_all(background.chain(nodes).chain(edges))
    }

    /// \returns the topmost node under \p p.
    pub fn find_node_at(&self, p: Point) -> Option<&GraphNode> {
        self.nodes.iter().rev().find(|n| n.contains_point(p))
    }

    /// \returns the topmost edge under \p p.
    pub fn find_edge_at(&self, p: Point) -> Option<&GraphEdge> {
        self.edges.iter().rev().find(|e| e.contains_point(p))
    }

    pub fn clear_highlights(&mut self) {
        for n in self.nodes.iter_mut() {
            n.highlighted = false;
        }
        for e in self.edges.iter_mut() {
            e.highlighted = false;
        }
    }

    /// Highlights the node \p id. Unknown ids are ignored.
    pub fn highlight_node(&mut self, id: &str) {
        if let Some(idx) = self.node_index.get(id) {
            self.nodes[*idx].highlighted = true;
        }
    }

    /// Highlights the first edge that goes from \p source to \p target.
    pub fn highlight_edge(&mut self, source: &str, target: &str) {
        if let Some(e) = self
            .edges
            .iter_mut()
            .find(|e| e.source == source && e.target == target)
        {
            e.highlighted = true;
        }
    }
}
