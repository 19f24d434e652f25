//! Canonical text rendering of Go type expressions.
//!
//! Rendering is deliberately lossy in two places: fixed-size arrays become
//! `[...]T` (the length expression is not reproduced) and function types
//! become `func(...)`. Anything outside the closed set of recognised type
//! shapes renders as `unknown` instead of failing the parse.

use tree_sitter::Node;

/// Placeholder for type syntax the renderer does not model.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Direction of a channel type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// The closed set of type shapes the renderer understands.
#[derive(Debug, Clone, Copy)]
pub enum TypeExpr<'tree> {
    /// `int`, `User`
    Ident(Node<'tree>),
    /// `pkg.Type`
    Qualified {
        package: Node<'tree>,
        name: Node<'tree>,
    },
    /// `*T`
    Pointer(Node<'tree>),
    /// `[]T`
    Slice(Node<'tree>),
    /// `[N]T` and `[...]T`
    Array(Node<'tree>),
    /// `map[K]V`
    Map {
        key: Node<'tree>,
        value: Node<'tree>,
    },
    /// `chan T`, `chan<- T`, `<-chan T`
    Chan { dir: ChanDir, value: Node<'tree> },
    Func,
    Interface,
    /// `...T` in a parameter list
    Variadic(Node<'tree>),
    Unknown,
}

impl<'tree> TypeExpr<'tree> {
    /// Classify a syntax node. Nodes with missing children fall back to `Unknown`.
    pub fn classify(node: Node<'tree>) -> Self {
        Self::try_classify(node).unwrap_or(TypeExpr::Unknown)
    }

    fn try_classify(node: Node<'tree>) -> Option<Self> {
        let expr = match node.kind() {
            "type_identifier" | "identifier" => TypeExpr::Ident(node),
            "qualified_type" => TypeExpr::Qualified {
                package: node.child_by_field_name("package")?,
                name: node.child_by_field_name("name")?,
            },
            "pointer_type" => TypeExpr::Pointer(last_named_child(node)?),
            "slice_type" => TypeExpr::Slice(node.child_by_field_name("element")?),
            "array_type" | "implicit_length_array_type" => {
                TypeExpr::Array(node.child_by_field_name("element")?)
            }
            "map_type" => TypeExpr::Map {
                key: node.child_by_field_name("key")?,
                value: node.child_by_field_name("value")?,
            },
            "channel_type" => TypeExpr::Chan {
                dir: channel_direction(node),
                value: node.child_by_field_name("value")?,
            },
            "function_type" => TypeExpr::Func,
            "interface_type" => TypeExpr::Interface,
            "variadic_parameter_declaration" => {
                TypeExpr::Variadic(node.child_by_field_name("type")?)
            }
            _ => TypeExpr::Unknown,
        };
        Some(expr)
    }
}

/// Render a type node to its canonical string.
pub fn render_type(node: Node, source: &[u8]) -> String {
    match TypeExpr::classify(node) {
        TypeExpr::Ident(ident) => text(ident, source).to_string(),
        TypeExpr::Qualified { package, name } => format!(
            "{}.{}",
            render_qualifier(package, source),
            text(name, source)
        ),
        TypeExpr::Pointer(inner) => format!("*{}", render_type(inner, source)),
        TypeExpr::Slice(elem) => format!("[]{}", render_type(elem, source)),
        TypeExpr::Array(elem) => format!("[...]{}", render_type(elem, source)),
        TypeExpr::Map { key, value } => format!(
            "map[{}]{}",
            render_type(key, source),
            render_type(value, source)
        ),
        TypeExpr::Chan { dir, value } => {
            let prefix = match dir {
                ChanDir::Both => "chan ",
                ChanDir::Send => "chan<- ",
                ChanDir::Recv => "<-chan ",
            };
            format!("{}{}", prefix, render_type(value, source))
        }
        TypeExpr::Func => "func(...)".to_string(),
        TypeExpr::Interface => "interface{}".to_string(),
        TypeExpr::Variadic(elem) => format!("...{}", render_type(elem, source)),
        TypeExpr::Unknown => UNKNOWN_TYPE.to_string(),
    }
}

fn render_qualifier(node: Node, source: &[u8]) -> String {
    match node.kind() {
        "package_identifier" | "identifier" => text(node, source).to_string(),
        _ => render_type(node, source),
    }
}

fn channel_direction(node: Node) -> ChanDir {
    let first = node.child(0).map(|n| n.kind());
    let second = node.child(1).map(|n| n.kind());
    match (first, second) {
        (Some("<-"), _) => ChanDir::Recv,
        (_, Some("<-")) => ChanDir::Send,
        _ => ChanDir::Both,
    }
}

fn last_named_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let last = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .last();
    last
}

fn text<'s>(node: Node, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Render the type of `type T <ty>`.
    fn render(ty: &str) -> String {
        let source = format!("package p\n\ntype T {}\n", ty);
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(&source, None).unwrap();
        let root = tree.root_node();
        assert!(!root.has_error(), "fixture should parse: {}", source);

        let mut cursor = root.walk();
        let decl = root
            .children(&mut cursor)
            .find(|n| n.kind() == "type_declaration")
            .unwrap();
        let mut decl_cursor = decl.walk();
        let spec = decl
            .children(&mut decl_cursor)
            .find(|n| n.kind() == "type_spec")
            .unwrap();
        let type_node = spec.child_by_field_name("type").unwrap();
        render_type(type_node, source.as_bytes())
    }

    #[test]
    fn renders_identifiers() {
        assert_eq!(render("int64"), "int64");
        assert_eq!(render("User"), "User");
    }

    #[test]
    fn renders_qualified_identifiers() {
        assert_eq!(render("time.Duration"), "time.Duration");
        assert_eq!(render("*http.Request"), "*http.Request");
    }

    #[test]
    fn renders_composite_types() {
        assert_eq!(render("[]byte"), "[]byte");
        assert_eq!(render("[][]string"), "[][]string");
        assert_eq!(render("map[string][]*User"), "map[string][]*User");
        assert_eq!(render("**int"), "**int");
    }

    #[test]
    fn arrays_render_placeholder_length() {
        assert_eq!(render("[16]byte"), "[...]byte");
        assert_eq!(render("[...]int"), "[...]int");
    }

    #[test]
    fn renders_channel_directions() {
        assert_eq!(render("chan int"), "chan int");
        assert_eq!(render("chan<- error"), "chan<- error");
        assert_eq!(render("<-chan struct{}"), "<-chan unknown");
        assert_eq!(render("<-chan string"), "<-chan string");
    }

    #[test]
    fn function_and_interface_types_are_compact() {
        assert_eq!(render("func(a int) (string, error)"), "func(...)");
        assert_eq!(render("map[string]func()"), "map[string]func(...)");
        assert_eq!(render("interface{}"), "interface{}");
        assert_eq!(render("[]interface{ Close() error }"), "[]interface{}");
    }

    #[test]
    fn unsupported_shapes_render_unknown() {
        assert_eq!(render("struct{ X int }"), "unknown");
        assert_eq!(render("List[int]"), "unknown");
        assert_eq!(render("map[string]List[int]"), "map[string]unknown");
    }
}
