//! Syntax front-end and file model assembly.
//!
//! tree-sitter recovers from syntax errors, but a file model built from a
//! recovered tree would place generated code at the wrong lines. Any error or
//! missing node in the tree therefore fails the whole parse.
//!
//! # Examples
//!
//! ```
//! use gofacts::{parse_source, Config};
//! use std::path::Path;
//!
//! let source = r#"
//! package shapes
//!
//! type Reader interface {
//!     Read(p []byte) (n int, err error)
//! }
//!
//! func (c *Circle) Area() float64 { return 0 }
//! "#;
//!
//! let model = parse_source(Path::new("shapes.go"), source, &Config::default()).unwrap();
//! assert_eq!(model.interfaces[0].methods[0].name, "Read");
//! assert_eq!(model.functions[0].receiver.as_ref().unwrap().type_name, "*Circle");
//! ```
//!
//! Syntax errors abort:
//!
//! ```
//! use gofacts::{parse_source, Config};
//! use std::path::Path;
//!
//! let broken = "package main\n\ntype User struct {\n\tID int\n";
//! assert!(parse_source(Path::new("broken.go"), broken, &Config::default()).is_err());
//! ```

use std::fs;
use std::path::Path;

use tree_sitter::Node;

use crate::config::Config;
use crate::model::FileModel;
use crate::walker::DeclarationWalker;
use crate::{GoFactsError, Result};

/// Create a parser configured for Go.
pub(crate) fn go_parser() -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| GoFactsError::Language(e.to_string()))?;
    Ok(parser)
}

/// Read and parse one Go file.
pub fn parse_file(path: &Path, config: &Config) -> Result<FileModel> {
    let metadata = fs::metadata(path).map_err(|source| GoFactsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.len() > config.max_file_size {
        return Err(GoFactsError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: config.max_file_size,
        });
    }

    let source = fs::read_to_string(path).map_err(|source| GoFactsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_source(path, &source, config)
}

/// Parse Go source text into a [`FileModel`].
///
/// `path` is only used for diagnostics.
pub fn parse_source(path: &Path, source: &str, config: &Config) -> Result<FileModel> {
    let mut parser = go_parser()?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| GoFactsError::Parse {
            path: path.to_path_buf(),
            line: 1,
            column: 1,
            message: "parser produced no syntax tree".to_string(),
        })?;

    let root = tree.root_node();
    if let Some(error) = first_syntax_error(root) {
        let position = error.start_position();
        return Err(GoFactsError::Parse {
            path: path.to_path_buf(),
            line: (position.row + 1) as u32,
            column: (position.column + 1) as u32,
            message: describe_error(error, source.as_bytes()),
        });
    }

    let mut model = FileModel::default();
    let mut walker = DeclarationWalker::new(source, config.max_recursion_depth);
    walker.walk(root, &mut model);

    if model.package.is_empty() {
        return Err(GoFactsError::Parse {
            path: path.to_path_buf(),
            line: 1,
            column: 1,
            message: "expected 'package' clause".to_string(),
        });
    }

    tracing::debug!(
        "Parsed {:?}: package {}, {} imports, {} structs, {} interfaces, {} functions",
        path,
        model.package,
        model.imports.len(),
        model.structs.len(),
        model.interfaces.len(),
        model.functions.len()
    );

    Ok(model)
}

/// First ERROR or MISSING node in document order.
fn first_syntax_error(node: Node) -> Option<Node> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_syntax_error).or(Some(node))
}

fn describe_error(node: Node, source: &[u8]) -> String {
    if node.is_missing() {
        return format!("missing {:?}", node.kind());
    }

    let snippet = node
        .utf8_text(source)
        .unwrap_or("")
        .lines()
        .next()
        .unwrap_or("")
        .trim();
    if snippet.is_empty() {
        "syntax error".to_string()
    } else {
        let shortened: String = snippet.chars().take(40).collect();
        format!("syntax error near {:?}", shortened)
    }
}
