//! Read-only lookups over a parsed [`FileModel`].

use crate::model::{FileModel, InterfaceRecord, StructRecord};
use crate::{GoFactsError, Result};

/// First struct (in source order) whose line range contains `line`.
pub fn struct_at_line(model: &FileModel, line: u32) -> Result<&StructRecord> {
    model
        .structs
        .iter()
        .find(|s| s.contains_line(line))
        .ok_or(GoFactsError::StructNotFound { line })
}

/// Interface with exactly this (case-sensitive) name.
pub fn interface_by_name<'a>(model: &'a FileModel, name: &str) -> Result<&'a InterfaceRecord> {
    model
        .interfaces
        .iter()
        .find(|i| i.name == name)
        .ok_or_else(|| GoFactsError::InterfaceNotFound {
            name: name.to_string(),
        })
}

/// The whole model, unchanged.
pub fn dump(model: &FileModel) -> &FileModel {
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_source, Config};
    use std::path::Path;

    const SOURCE: &str = r#"type User struct {
	ID   int64
	Name string `json:"name"`
}

type Reader interface {
	Read(p []byte) (n int, err error)
}

type Account struct {
	Owner User
}
"#;

    fn model() -> FileModel {
        let source = format!("package models\n\n{}", SOURCE);
        parse_source(Path::new("models.go"), &source, &Config::default()).unwrap()
    }

    #[test]
    fn finds_struct_by_any_contained_line() {
        let model = model();
        for s in &model.structs {
            for line in s.start_line..=s.end_line {
                let found = struct_at_line(&model, line).unwrap();
                assert_eq!(found, s, "line {} should resolve to {}", line, s.name);
            }
        }
    }

    #[test]
    fn struct_lookup_uses_inclusive_bounds() {
        let model = model();
        assert_eq!(struct_at_line(&model, 3).unwrap().name, "User");
        assert_eq!(struct_at_line(&model, 4).unwrap().name, "User");
        assert_eq!(struct_at_line(&model, 6).unwrap().name, "User");
        assert_eq!(struct_at_line(&model, 12).unwrap().name, "Account");
    }

    #[test]
    fn struct_lookup_outside_any_struct_fails() {
        let model = model();
        let err = struct_at_line(&model, 8).unwrap_err();
        assert_eq!(err.to_string(), "no struct found at line 8");
        assert!(struct_at_line(&model, 0).is_err());
        assert!(struct_at_line(&model, 100).is_err());
    }

    #[test]
    fn grouped_structs_resolve_to_the_first_in_the_group() {
        let source = "package shapes

type (
	Circle struct {
		R float64
	}

	Square struct {
		Side float64
	}
)
";
        let model = parse_source(Path::new("shapes.go"), source, &Config::default()).unwrap();
        let ranges: Vec<_> = model
            .structs
            .iter()
            .map(|s| (s.name.as_str(), s.start_line, s.end_line))
            .collect();
        assert_eq!(ranges, vec![("Circle", 3, 11), ("Square", 3, 11)]);

        for line in 3..=11 {
            assert_eq!(struct_at_line(&model, line).unwrap().name, "Circle", "line {}", line);
        }
        assert!(struct_at_line(&model, 2).is_err());
        assert!(struct_at_line(&model, 12).is_err());
    }

    #[test]
    fn finds_struct_declared_inside_function() {
        let source = "package main

func main() {
	type row struct {
		ID int
	}
}
";
        let model = parse_source(Path::new("main.go"), source, &Config::default()).unwrap();
        let row = &model.structs[0];
        assert_eq!((row.name.as_str(), row.start_line, row.end_line), ("row", 4, 6));

        assert_eq!(struct_at_line(&model, 5).unwrap().name, "row");
        assert_eq!(struct_at_line(&model, 6).unwrap().name, "row");
        assert!(struct_at_line(&model, 3).is_err());
        assert!(struct_at_line(&model, 7).is_err());
    }

    #[test]
    fn finds_interface_by_exact_name() {
        let model = model();
        let reader = interface_by_name(&model, "Reader").unwrap();
        assert_eq!(reader.methods[0].name, "Read");

        let err = interface_by_name(&model, "reader").unwrap_err();
        assert_eq!(err.to_string(), "interface \"reader\" not found");
    }

    #[test]
    fn dump_returns_model_unchanged() {
        let model = model();
        let before = model.clone();
        assert_eq!(dump(&model), &before);
    }
}
