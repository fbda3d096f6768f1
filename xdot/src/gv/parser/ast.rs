//! An AST that represents the GraphViz file format.

// name = value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

// [a=b; c=d; ... ]
// The list keeps the declaration order and duplicates. Lookups return the
// first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    pub list: Vec<Attribute>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    pub fn add_attr_str(&mut self, name: &str, value: &str) {
        self.list.push(Attribute::new(name, value));
    }

    pub fn extend(&mut self, other: AttributeList) {
        self.list.extend(other.list);
    }

    /// \returns the value of the first attribute named \p name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.list
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

// (-> | -- )
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKind {
    Arrow,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Graph,
    Digraph,
}

// node-name [ ... ]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub attributes: AttributeList,
}

impl Node {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            attributes: AttributeList::new(),
        }
    }
}

// a -> b [...]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub source_port: Option<String>,
    pub target_port: Option<String>,
    pub kind: ArrowKind,
    pub attributes: AttributeList,
}

impl Edge {
    pub fn new(source: &str, target: &str, kind: ArrowKind) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            source_port: None,
            target_port: None,
            kind,
            attributes: AttributeList::new(),
        }
    }
}

// The content of a { ... } block. The `node [...]` and `edge [...]`
// statements are recorded in `node_attributes` and `edge_attributes`, but
// they are not applied to the nodes and edges that follow them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StmtList {
    pub attributes: AttributeList,
    pub node_attributes: AttributeList,
    pub edge_attributes: AttributeList,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub subgraphs: Vec<Subgraph>,
}

impl StmtList {
    pub fn new() -> Self {
        Self::default()
    }
}

// subgraph [ ID ] { ... }
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subgraph {
    pub id: String,
    pub attributes: AttributeList,
    pub node_attributes: AttributeList,
    pub edge_attributes: AttributeList,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub subgraphs: Vec<Subgraph>,
}

impl Subgraph {
    pub fn new(id: &str, body: StmtList) -> Self {
        Self {
            id: id.to_string(),
            attributes: body.attributes,
            node_attributes: body.node_attributes,
            edge_attributes: body.edge_attributes,
            nodes: body.nodes,
            edges: body.edges,
            subgraphs: body.subgraphs,
        }
    }
}

// [ strict ] (graph | digraph) [ ID ] { ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    pub kind: GraphKind,
    pub strict: bool,
    pub id: String,
    pub attributes: AttributeList,
    pub node_attributes: AttributeList,
    pub edge_attributes: AttributeList,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub subgraphs: Vec<Subgraph>,
}

impl Graph {
    pub fn new(kind: GraphKind, strict: bool, id: &str, body: StmtList) -> Self {
        Self {
            kind,
            strict,
            id: id.to_string(),
            attributes: body.attributes,
            node_attributes: body.node_attributes,
            edge_attributes: body.edge_attributes,
            nodes: body.nodes,
            edges: body.edges,
            subgraphs: body.subgraphs,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Digraph
    }
}

#[test]
fn attribute_lookup_returns_first_match() {
    let mut list = AttributeList::new();
    list.add_attr_str("color", "red");
    list.add_attr_str("label", "");
    list.add_attr_str("color", "blue");
    assert_eq!(list.len(), 3);
    assert_eq!(list.get("color"), Some("red"));
    assert_eq!(list.get("label"), Some(""));
    assert_eq!(list.get("shape"), None);
}
