/*!
This crate provides a library for loading GraphViz files that were laid out
by GraphViz in the xdot format, and for working with the drawings that they
carry. It parses the DOT language, decodes the xdot drawing programs that
are stored in the `_draw_`, `_ldraw_` (etc.) attributes into shapes, and
builds a graph that supports hit-testing, highlighting and rendering.

For more specific details on the API, see the documentation for the specific
sub modules.

The project also comes with a command line utility that lists the elements of
an xdot file, finds the element under a point and renders the drawing to
.svg.

# Parser example: parse a dot file

This crate provides an API for parsing DOT files. For example,
to parse and print the AST:

```rust
    use xdot::gv;

    let contents = "digraph { a -> b [label=\"foo\"]; }";
    let mut parser = gv::DotParser::new(&contents);
    let tree = parser.parse();

    match tree {
        Result::Err(err) => {
            log::error!("{}", gv::parser::format_error(&contents, &err));
        }

        Result::Ok(g) => {
            gv::dump_ast(&g);
        }
    }
```

The example above would print the program AST, or a readable error message,
such as:

```txt
digraph { a -> b -> c }
                 ^
1:18: Edge chains (a -> b -> c) are not supported, found '->'
```

# Drawing example: decode an xdot drawing program

```rust
    use xdot::gv::parse_xdot_attr;
    use xdot::core::geometry::Point;

    let shapes = parse_xdot_attr("c 7 -#ff0000 E 100 50 20 10");
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].pen().color.to_web_color(), "#ff0000");
    assert!(shapes[0].contains_point(Point::new(100., 50.)));
```

# Graph Builder example: select and render a graph

```rust
    use xdot::backends::svg::SVGWriter;
    use xdot::core::geometry::Point;
    use xdot::gv::GraphBuilder;
    use xdot::std_shapes::render::render_graph;

    let contents = r#"digraph {
        a [_draw_="c 7 -#000000 e 27 18 27 18", URL="http://a"];
        b [_draw_="c 7 -#000000 e 27 90 27 18"];
        a -> b [_draw_="c 7 -#000000 B 4 27 36 27 50 27 60 27 72"];
    }"#;

    let mut graph = GraphBuilder::new().build_from_str(contents).unwrap();

    // Find the node under the cursor and highlight it.
    let node = graph.find_node_at(Point::new(27., 20.)).unwrap();
    assert_eq!(node.id, "a");
    graph.highlight_node("a");

    // Render the drawing to some rendering backend.
    let mut svg = SVGWriter::new();
    render_graph(&graph, &mut svg);
    let _ = svg.finalize();
```

*/

pub mod backends;
pub mod core;
pub mod gv;
pub mod std_shapes;
