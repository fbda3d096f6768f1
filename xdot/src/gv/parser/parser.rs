use super::ast;
use super::error::{ParseError, Result};
use super::lexer::{Lexer, Token, TokenKind};

#[derive(Debug, Clone)]
pub struct DotParser {
    lexer: Lexer,
    tok: Token,
}

impl DotParser {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        Self {
            lexer: Lexer::new(chars),
            // This is replaced by the first token when parsing starts.
            tok: Token {
                kind: TokenKind::EOF,
                text: String::new(),
                line: 1,
                column: 1,
                offset: 0,
            },
        }
    }

    /// Lex the next token.
    fn lex(&mut self) -> Result<()> {
        self.tok = self.lexer.next_token()?;
        Ok(())
    }

    /// Creates a syntax error at the current token.
    fn error<T>(&self, msg: &str) -> Result<T> {
        let found = if self.tok.is_eof() {
            "end of file".to_string()
        } else {
            format!("'{}'", self.tok.text)
        };
        Err(ParseError::syntax(
            &format!("{}, found {}", msg, found),
            self.tok.line,
            self.tok.column,
        ))
    }

    /// Consume a token of the kind \p kind, or fail with \p msg.
    fn expect(&mut self, kind: TokenKind, msg: &str) -> Result<()> {
        if self.tok.kind != kind {
            return self.error(msg);
        }
        self.lex()
    }

    // graph : [ strict ] (graph | digraph) [ ID ] '{' stmt_list '}'
    fn parse_graph(&mut self) -> Result<ast::Graph> {
        let mut strict = false;
        if self.tok.kind == TokenKind::StrictKW {
            strict = true;
            self.lex()?;
        }

        let kind = match self.tok.kind {
            TokenKind::GraphKW => ast::GraphKind::Graph,
            TokenKind::DigraphKW => ast::GraphKind::Digraph,
            _ => {
                return self.error("Expected (graph|digraph)");
            }
        };
        self.lex()?;

        // Consume the optional graph name.
        let mut name = String::new();
        if self.tok.kind.is_id() {
            name = self.parse_id()?;
        }

        self.expect(TokenKind::OpenBrace, "Expected '{'")?;
        let body = self.parse_stmt_list()?;
        Ok(ast::Graph::new(kind, strict, &name, body))
    }

    // subgraph : [ subgraph [ ID ] ] '{' stmt_list '}'
    fn parse_subgraph(&mut self) -> Result<ast::Subgraph> {
        let mut name = String::new();

        if self.tok.kind == TokenKind::SubgraphKW {
            self.lex()?;
            // Consume the optional subgraph name.
            if self.tok.kind.is_id() {
                name = self.parse_id()?;
            }
        }

        self.expect(TokenKind::OpenBrace, "Expected '{'")?;
        let body = self.parse_stmt_list()?;
        Ok(ast::Subgraph::new(&name, body))
    }

    // stmt_list : [ stmt [ ';' ] stmt_list ]
    // The opening brace is already consumed. This consumes the closing brace.
    fn parse_stmt_list(&mut self) -> Result<ast::StmtList> {
        let mut lst = ast::StmtList::new();

        loop {
            match self.tok.kind {
                TokenKind::Semicolon => {
                    self.lex()?;
                }
                TokenKind::CloseBrace => {
                    self.lex()?;
                    return Ok(lst);
                }
                TokenKind::EOF => {
                    return self.error("Expected '}'");
                }
                _ => {
                    self.parse_stmt(&mut lst)?;
                }
            }
        }
    }

    // stmt : node_stmt | edge_stmt | attr_stmt | ID '=' ID | subgraph
    fn parse_stmt(&mut self, lst: &mut ast::StmtList) -> Result<()> {
        match self.tok.kind {
            //attr_stmt : (graph | node | edge) attr_list
            TokenKind::GraphKW => {
                self.lex()?;
                let list = self.parse_attr_lists()?;
                lst.attributes.extend(list);
            }
            TokenKind::NodeKW => {
                self.lex()?;
                let list = self.parse_attr_lists()?;
                lst.node_attributes.extend(list);
            }
            TokenKind::EdgeKW => {
                self.lex()?;
                let list = self.parse_attr_lists()?;
                lst.edge_attributes.extend(list);
            }
            TokenKind::SubgraphKW | TokenKind::OpenBrace => {
                let subgraph = self.parse_subgraph()?;
                lst.subgraphs.push(subgraph);
            }
            kind if kind.is_id() => {
                // Look one token ahead to find assignments: ID '=' ID
                if self.lexer.peek_token()?.kind == TokenKind::Equal {
                    let name = self.parse_id()?;
                    // Consume the '='.
                    self.lex()?;
                    let value = self.parse_id()?;
                    lst.attributes.add_attr_str(&name, &value);
                    return Ok(());
                }

                let (id, port) = self.parse_node_id()?;
                if self.tok.kind.is_edge_op() {
                    let edge = self.parse_edge_stmt(id, port)?;
                    lst.edges.push(edge);
                } else {
                    let mut node = ast::Node::new(&id);
                    if self.tok.kind == TokenKind::OpenBracket {
                        node.attributes = self.parse_attr_lists()?;
                    }
                    lst.nodes.push(node);
                }
            }
            _ => {
                return self.error("Unexpected token in statement position");
            }
        }
        Ok(())
    }

    //attr_list : '[' [ a_list ] ']' [ attr_list ]
    fn parse_attr_lists(&mut self) -> Result<ast::AttributeList> {
        let mut lst = self.parse_attr_list()?;
        while self.tok.kind == TokenKind::OpenBracket {
            lst.extend(self.parse_attr_list()?);
        }
        Ok(lst)
    }

    // a_list : ID [ '=' ID ] [ (';' | ',') ] [ a_list ]
    fn parse_attr_list(&mut self) -> Result<ast::AttributeList> {
        let mut lst = ast::AttributeList::new();
        self.expect(TokenKind::OpenBracket, "Expected '['")?;

        while self.tok.kind != TokenKind::CloseBracket {
            if !self.tok.kind.is_id() {
                return self.error("Expected an attribute name or ']'");
            }
            let prop = self.parse_id()?;

            // A bare name has an empty value.
            let mut value = String::new();
            if self.tok.kind == TokenKind::Equal {
                // Consume the '='.
                self.lex()?;
                value = self.parse_id()?;
            }
            lst.add_attr_str(&prop, &value);

            // Skip the separator.
            if matches!(self.tok.kind, TokenKind::Comma | TokenKind::Semicolon)
            {
                self.lex()?;
            }
        }
        // Consume the ']'.
        self.lex()?;
        Ok(lst)
    }

    //edge_stmt : node_id edgeop node_id [ attr_list ]
    fn parse_edge_stmt(
        &mut self,
        from: String,
        from_port: Option<String>,
    ) -> Result<ast::Edge> {
        let kind = match self.tok.kind {
            TokenKind::ArrowRight => ast::ArrowKind::Arrow,
            TokenKind::ArrowLine => ast::ArrowKind::Line,
            _ => {
                return self.error("Expected '->' or '--'");
            }
        };
        // Consume the arrow.
        self.lex()?;

        let (to, to_port) = self.parse_node_id()?;
        let mut edge = ast::Edge::new(&from, &to, kind);
        edge.source_port = from_port;
        edge.target_port = to_port;

        if self.tok.kind.is_edge_op() {
            return self.error("Edge chains (a -> b -> c) are not supported");
        }

        // Parse the optional attribute list.
        if self.tok.kind == TokenKind::OpenBracket {
            edge.attributes = self.parse_attr_lists()?;
        }
        Ok(edge)
    }

    //node_id : ID [ ':' ID [ ':' ID ] ]
    fn parse_node_id(&mut self) -> Result<(String, Option<String>)> {
        let name = self.parse_id()?;
        if self.tok.kind != TokenKind::Colon {
            return Ok((name, None));
        }

        // Consume the colon.
        self.lex()?;
        if !self.tok.kind.is_id() {
            return self.error("Expected a port name");
        }
        let mut port = self.parse_id()?;

        // The optional compass point.
        if self.tok.kind == TokenKind::Colon {
            self.lex()?;
            if !self.tok.kind.is_id() {
                return self.error("Expected a compass point");
            }
            port.push(':');
            port.push_str(&self.parse_id()?);
        }
        Ok((name, Some(port)))
    }

    // ID : identifier | numeral | quoted-string ( '+' quoted-string )* | html
    fn parse_id(&mut self) -> Result<String> {
        if !self.tok.kind.is_id() {
            return self.error("Expected an identifier");
        }
        let is_quoted = self.tok.kind == TokenKind::QuotedString;
        let mut id = std::mem::take(&mut self.tok.text);
        self.lex()?;

        // Concatenate quoted strings: "a" + "b".
        while is_quoted && self.tok.kind == TokenKind::Plus {
            self.lex()?;
            if self.tok.kind != TokenKind::QuotedString {
                return self.error("Expected a string after '+'");
            }
            id.push_str(&self.tok.text);
            self.lex()?;
        }
        Ok(id)
    }

    /// Parses dot files, as specified here:
    /// <https://graphviz.org/doc/info/lang.html>
    /// The parse is all or nothing: the first error aborts it.
    pub fn parse(&mut self) -> Result<ast::Graph> {
        self.lex()?;
        let graph = self.parse_graph()?;
        if !self.tok.is_eof() {
            return self.error("Unexpected content at the end of the file");
        }
        log::debug!(
            "Parsed graph '{}': {} nodes, {} edges, {} subgraphs",
            graph.id,
            graph.nodes.len(),
            graph.edges.len(),
            graph.subgraphs.len()
        );
        Ok(graph)
    }
}

/// Parses the DOT program \p input.
pub fn parse_dot(input: &str) -> Result<ast::Graph> {
    DotParser::new(input).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> ast::Graph {
        match parse_dot(input) {
            Ok(g) => g,
            Err(err) => panic!("Failed to parse {:?}: {}", input, err),
        }
    }

    #[test]
    fn minimal_graphs() {
        let g = parse("graph {}");
        assert_eq!(g.kind, ast::GraphKind::Graph);
        assert!(!g.strict);
        assert_eq!(g.id, "");

        let g = parse("strict digraph G { }");
        assert_eq!(g.kind, ast::GraphKind::Digraph);
        assert!(g.strict);
        assert_eq!(g.id, "G");
        assert!(g.nodes.is_empty() && g.edges.is_empty());
        assert!(g.subgraphs.is_empty());

        assert_eq!(parse("graph \"my graph\" {}").id, "my graph");
        assert_eq!(parse("graph <<b>x</b>> {}").id, "<<b>x</b>>");
        assert_eq!(parse("digraph 42 {}").id, "42");
    }

    #[test]
    fn edges_do_not_create_nodes() {
        let g = parse("digraph G { a -> b [color=red]; }");
        assert!(g.nodes.is_empty());
        assert_eq!(g.edges.len(), 1);
        let e = &g.edges[0];
        assert_eq!((e.source.as_str(), e.target.as_str()), ("a", "b"));
        assert_eq!(e.kind, ast::ArrowKind::Arrow);
        assert_eq!(e.attributes.list, vec![ast::Attribute::new("color", "red")]);
    }

    #[test]
    fn statements() {
        let g = parse(
            "graph { node [shape=box]; edge [color=blue] graph [rankdir=LR]
             size=\"4,4\" a; b [label=\"B\", fixed; width=2] c -- d:p1:n
             node [style=filled] }",
        );
        assert_eq!(g.node_attributes.get("shape"), Some("box"));
        assert_eq!(g.node_attributes.get("style"), Some("filled"));
        assert_eq!(g.edge_attributes.get("color"), Some("blue"));
        assert_eq!(g.attributes.get("rankdir"), Some("LR"));
        assert_eq!(g.attributes.get("size"), Some("4,4"));

        let ids: Vec<&str> = g.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        // Default attributes are recorded, not applied.
        assert!(g.nodes[0].attributes.is_empty());
        assert_eq!(g.nodes[1].attributes.get("fixed"), Some(""));
        assert_eq!(g.nodes[1].attributes.get("width"), Some("2"));

        let e = &g.edges[0];
        assert_eq!(e.kind, ast::ArrowKind::Line);
        assert_eq!(e.target_port.as_deref(), Some("p1:n"));
    }

    #[test]
    fn nested_subgraphs() {
        let g = parse(
            "digraph { subgraph cluster_0 { a; subgraph inner { b -> c } \
             node [color=red] } { d } }",
        );
        assert_eq!(g.subgraphs.len(), 2);
        let s = &g.subgraphs[0];
        assert_eq!(s.id, "cluster_0");
        assert_eq!(s.nodes[0].id, "a");
        assert_eq!(s.node_attributes.get("color"), Some("red"));
        assert_eq!(s.subgraphs[0].id, "inner");
        assert_eq!(s.subgraphs[0].edges[0].target, "c");
        assert_eq!(g.subgraphs[1].id, "");
        assert_eq!(g.subgraphs[1].nodes[0].id, "d");
    }

    #[test]
    fn string_concatenation() {
        let g = parse("graph { a [label=\"x\" + \"y\"] }");
        assert_eq!(g.nodes[0].attributes.get("label"), Some("xy"));
    }

    #[test]
    fn syntax_errors() {
        let err = parse_dot("graph { a -> b -> c }").unwrap_err();
        assert!(!err.is_lexical());
        assert_eq!((err.line(), err.column()), (1, 16));

        let err = parse_dot("graf {}").unwrap_err();
        assert_eq!((err.line(), err.column()), (1, 1));

        let err = parse_dot("graph { a [color=red }").unwrap_err();
        assert_eq!(err.column(), 22);

        assert!(parse_dot("graph { a ").is_err());
        assert!(parse_dot("graph { } s").is_err());
        assert!(parse_dot("graph { = }").is_err());
        assert!(parse_dot("graph { \"abc }").unwrap_err().is_lexical());
    }
}
