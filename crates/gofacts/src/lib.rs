//! gofacts: structured fact extraction from Go source files
//!
//! This crate turns a single Go file into a line-addressed model that code
//! generators and editor plugins can consume:
//! - Package name and imports (with aliases)
//! - Struct declarations with fields, rendered types and parsed struct tags
//! - Interface declarations with method signatures
//! - Function and method signatures, including receivers
//!
//! Parsing is purely syntactic (tree-sitter), one file at a time.
//!
//! ```
//! use gofacts::{parse_source, struct_at_line};
//! use std::path::Path;
//!
//! let source = "package models\n\ntype User struct {\n\tID int64\n}\n";
//! let model = parse_source(Path::new("user.go"), source, &Default::default()).unwrap();
//!
//! assert_eq!(model.package, "models");
//! assert_eq!(struct_at_line(&model, 4).unwrap().name, "User");
//! ```

use std::path::PathBuf;

pub mod config;
pub mod imports;
pub mod model;
pub mod parse;
pub mod query;
pub mod render;
pub mod tag;
pub mod walker;

// Re-export main types
pub use config::Config;
pub use imports::{find_module_path, group_imports, ImportGroups};
pub use model::{
    FieldRecord, FileModel, FunctionRecord, ImportRecord, InterfaceRecord, MethodRecord,
    ParamRecord, StructRecord,
};
pub use parse::{parse_file, parse_source};
pub use query::{dump, interface_by_name, struct_at_line};
pub use render::{render_type, TypeExpr};
pub use tag::parse_struct_tag;

/// Coarse failure category, as reported to callers of the command-line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    NotFound,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Io => write!(f, "IOError"),
            ErrorKind::Parse => write!(f, "ParseError"),
            ErrorKind::NotFound => write!(f, "NotFound"),
        }
    }
}

/// Errors that can occur while extracting or querying facts
#[derive(Debug, thiserror::Error)]
pub enum GoFactsError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file too large: {} ({size} bytes, limit {limit})", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("{}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u32,
        column: u32,
        message: String,
    },

    #[error("failed to load Go grammar: {0}")]
    Language(String),

    #[error("no struct found at line {line}")]
    StructNotFound { line: u32 },

    #[error("interface \"{name}\" not found")]
    InterfaceNotFound { name: String },
}

impl GoFactsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GoFactsError::Io { .. } | GoFactsError::FileTooLarge { .. } => ErrorKind::Io,
            GoFactsError::Parse { .. } | GoFactsError::Language(_) => ErrorKind::Parse,
            GoFactsError::StructNotFound { .. } | GoFactsError::InterfaceNotFound { .. } => {
                ErrorKind::NotFound
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GoFactsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        let err = GoFactsError::StructNotFound { line: 10 };
        assert_eq!(err.to_string(), "no struct found at line 10");
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = GoFactsError::InterfaceNotFound {
            name: "Repo".to_string(),
        };
        assert_eq!(err.to_string(), "interface \"Repo\" not found");
    }

    #[test]
    fn test_parse_error_display() {
        let err = GoFactsError::Parse {
            path: PathBuf::from("main.go"),
            line: 3,
            column: 7,
            message: "missing \"}\"".to_string(),
        };
        assert_eq!(err.to_string(), "main.go:3:7: missing \"}\"");
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.kind().to_string(), "ParseError");
    }

    #[test]
    fn test_io_error_kind() {
        let err = GoFactsError::Io {
            path: PathBuf::from("missing.go"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "failed to read missing.go");
    }
}
