//! Import grouping for organizing import blocks.
//!
//! Imports are split the way `goimports` lays them out: standard library,
//! third-party modules, then packages of the current module.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::model::{FileModel, ImportRecord};

/// Imports of one file, grouped and sorted by path within each group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportGroups {
    /// Module path from the nearest `go.mod`, when one was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub standard: Vec<ImportRecord>,
    pub third_party: Vec<ImportRecord>,
    pub local: Vec<ImportRecord>,
}

/// Which group an import path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportCategory {
    Standard,
    ThirdParty,
    Local,
}

/// Classify an import path relative to the current module.
pub fn categorize(path: &str, module_path: Option<&str>) -> ImportCategory {
    if let Some(module) = module_path.filter(|m| !m.is_empty()) {
        if path == module
            || path
                .strip_prefix(module)
                .is_some_and(|rest| rest.starts_with('/'))
        {
            return ImportCategory::Local;
        }
    }

    // Standard library paths never have a dot in their first element
    let first = path.split('/').next().unwrap_or(path);
    if first.contains('.') {
        ImportCategory::ThirdParty
    } else {
        ImportCategory::Standard
    }
}

/// Group the imports of `model`. Each group is sorted by path; equal paths keep source order.
pub fn group_imports(model: &FileModel, module_path: Option<&str>) -> ImportGroups {
    let mut groups = ImportGroups {
        module: module_path.map(str::to_string),
        ..ImportGroups::default()
    };

    for import in &model.imports {
        let group = match categorize(&import.path, module_path) {
            ImportCategory::Standard => &mut groups.standard,
            ImportCategory::ThirdParty => &mut groups.third_party,
            ImportCategory::Local => &mut groups.local,
        };
        group.push(import.clone());
    }

    for group in [
        &mut groups.standard,
        &mut groups.third_party,
        &mut groups.local,
    ] {
        group.sort_by(|a, b| a.path.cmp(&b.path));
    }

    groups
}

/// Find the module path declared by the nearest `go.mod` at or above `start`.
pub fn find_module_path(start: &Path) -> Option<String> {
    for dir in start.ancestors() {
        let go_mod = dir.join("go.mod");
        if !go_mod.is_file() {
            continue;
        }
        match fs::read_to_string(&go_mod) {
            Ok(contents) => {
                tracing::debug!("Using module file {:?}", go_mod);
                return parse_module_directive(&contents);
            }
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", go_mod, e);
                return None;
            }
        }
    }
    None
}

/// Extract the argument of the `module` directive from go.mod contents.
fn parse_module_directive(contents: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let module = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!module.is_empty()).then(|| module.to_string())
    })
}
