//! The per-file fact model.
//!
//! All line numbers are 1-indexed and bound the full syntactic extent of a
//! declaration (keywords and braces included). Every record is owned by its
//! parent; the model is a plain tree that serializes directly to JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything extracted from one Go source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileModel {
    pub package: String,
    pub imports: Vec<ImportRecord>,
    pub structs: Vec<StructRecord>,
    pub interfaces: Vec<InterfaceRecord>,
    pub functions: Vec<FunctionRecord>,
}

/// A single import spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    /// Import path without quotes: "net/http"
    pub path: String,
    /// Local name, including "." and "_" forms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub start_line: u32,
    pub end_line: u32,
}

/// A type declaration whose underlying type is a struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructRecord {
    pub name: String,
    pub fields: Vec<FieldRecord>,
    /// Line of the `type` keyword
    pub start_line: u32,
    pub end_line: u32,
}

impl StructRecord {
    /// Whether `line` falls inside `[start_line, end_line]`.
    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

/// One field group of a struct: `X, Y int `json:"x"``
///
/// The tag belongs to the group, so every name in `names` shares it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Empty for embedded fields
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    /// Tag text with its delimiters removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_tag: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    pub embedded: bool,
}

/// A type declaration whose underlying type is an interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub name: String,
    /// Explicitly declared methods only; embedded interfaces are not flattened
    pub methods: Vec<MethodRecord>,
    pub start_line: u32,
    pub end_line: u32,
}

/// A method spec inside an interface body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub name: String,
    pub is_exported: bool,
    pub params: Vec<ParamRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ParamRecord>,
}

/// A parameter (or result) group sharing one type: `a, b int`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRecord {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl ParamRecord {
    pub fn new(names: Vec<String>, type_name: impl Into<String>) -> Self {
        Self {
            names,
            type_name: type_name.into(),
        }
    }

    /// An unnamed parameter or result
    pub fn unnamed(type_name: impl Into<String>) -> Self {
        Self::new(Vec::new(), type_name)
    }
}

/// A function or method declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    /// Present iff the declaration is a method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<ParamRecord>,
    pub params: Vec<ParamRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ParamRecord>,
    pub start_line: u32,
    pub end_line: u32,
}

impl FunctionRecord {
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Go's export rule: the first character is an uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}
