//! Declaration walker: one pass over the syntax tree, in source order.
//!
//! The walker owns no results. It fills a caller-supplied [`FileModel`]
//! accumulator as it descends, so the assembled model has exactly one owner.

use tree_sitter::Node;

use crate::model::{
    is_exported, FieldRecord, FileModel, FunctionRecord, ImportRecord, InterfaceRecord,
    MethodRecord, ParamRecord, StructRecord,
};
use crate::render::{render_type, UNKNOWN_TYPE};
use crate::tag::{parse_struct_tag, unquote_tag_literal};

pub struct DeclarationWalker<'src> {
    source: &'src [u8],
    max_depth: usize,
    truncated: bool,
}

impl<'src> DeclarationWalker<'src> {
    pub fn new(source: &'src str, max_depth: usize) -> Self {
        Self {
            source: source.as_bytes(),
            max_depth,
            truncated: false,
        }
    }

    /// True if some subtree was skipped because it exceeded the depth limit.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Visit every node under `root`, appending declarations to `model`.
    pub fn walk(&mut self, root: Node, model: &mut FileModel) {
        self.visit(root, model, 0);
    }

    fn visit(&mut self, node: Node, model: &mut FileModel, depth: usize) {
        if depth >= self.max_depth {
            if !self.truncated {
                tracing::warn!(
                    "Declarations below line {} skipped: nesting exceeds depth limit {}",
                    start_line(&node),
                    self.max_depth
                );
                self.truncated = true;
            }
            return;
        }

        match node.kind() {
            "package_clause" => {
                if let Some(name) = self.package_name(node) {
                    model.package = name;
                }
            }
            "import_declaration" => self.visit_imports(node, model),
            "type_declaration" => self.visit_type_declaration(node, model),
            "function_declaration" | "method_declaration" => {
                model.functions.push(self.function_record(node));
            }
            _ => {}
        }

        // Nested declarations (types local to a function body) are reported too
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, model, depth + 1);
        }
    }

    fn package_name(&self, clause: Node) -> Option<String> {
        let mut cursor = clause.walk();
        let ident = clause
            .children(&mut cursor)
            .find(|child| child.kind() == "package_identifier");
        ident.map(|n| self.text(n).to_string())
    }

    fn visit_imports(&self, node: Node, model: &mut FileModel) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "import_spec" => {
                    if let Some(record) = self.import_record(child) {
                        model.imports.push(record);
                    }
                }
                "import_spec_list" => self.visit_imports(child, model),
                _ => {}
            }
        }
    }

    fn import_record(&self, spec: Node) -> Option<ImportRecord> {
        let path_node = spec.child_by_field_name("path")?;
        let path = self
            .text(path_node)
            .trim_matches(|c| c == '"' || c == '`')
            .to_string();
        if path.is_empty() {
            tracing::debug!("Skipping empty import path at line {}", start_line(&spec));
            return None;
        }

        Some(ImportRecord {
            path,
            alias: spec
                .child_by_field_name("name")
                .map(|n| self.text(n).to_string()),
            start_line: start_line(&spec),
            end_line: end_line(&spec),
        })
    }

    /// `type X struct{...}`, `type X interface{...}` or a grouped `type ( ... )`.
    fn visit_type_declaration(&self, decl: Node, model: &mut FileModel) {
        let mut cursor = decl.walk();
        let children: Vec<Node> = decl.children(&mut cursor).collect();
        // Every spec in a group shares the whole declaration's extent
        let start = start_line(&decl);
        let end = end_line(&decl);

        for spec in children
            .iter()
            .filter(|child| matches!(child.kind(), "type_spec" | "type_alias"))
        {
            let Some(name_node) = spec.child_by_field_name("name") else {
                continue;
            };
            let Some(type_node) = spec.child_by_field_name("type") else {
                continue;
            };

            let name = self.text(name_node).to_string();

            match type_node.kind() {
                "struct_type" => model.structs.push(StructRecord {
                    name,
                    fields: self.struct_fields(type_node),
                    start_line: start,
                    end_line: end,
                }),
                "interface_type" => model.interfaces.push(InterfaceRecord {
                    name,
                    methods: self.interface_methods(type_node),
                    start_line: start,
                    end_line: end,
                }),
                _ => {}
            }
        }
    }

    fn struct_fields(&self, struct_type: Node) -> Vec<FieldRecord> {
        let mut fields = Vec::new();

        let mut cursor = struct_type.walk();
        let field_list = struct_type
            .children(&mut cursor)
            .find(|child| child.kind() == "field_declaration_list");
        let Some(field_list) = field_list else {
            return fields;
        };

        let mut list_cursor = field_list.walk();
        for field in field_list.children(&mut list_cursor) {
            if field.kind() == "field_declaration" {
                fields.push(self.field_record(field));
            }
        }
        fields
    }

    fn field_record(&self, field: Node) -> FieldRecord {
        let names = self.names(field);
        let embedded = names.is_empty();

        let mut type_name = self.render_field(field, "type");
        // Embedded pointers are spelled `*T` with the star outside the type node
        if embedded && has_child_kind(field, "*") {
            type_name.insert(0, '*');
        }

        let raw_tag = field
            .child_by_field_name("tag")
            .map(|tag| unquote_tag_literal(self.text(tag)));
        let tags = raw_tag
            .as_deref()
            .map(parse_struct_tag)
            .unwrap_or_default();

        FieldRecord {
            names,
            type_name,
            raw_tag,
            tags,
            embedded,
        }
    }

    fn interface_methods(&self, interface_type: Node) -> Vec<MethodRecord> {
        let mut methods = Vec::new();
        let mut cursor = interface_type.walk();

        for elem in interface_type.children(&mut cursor) {
            match elem.kind() {
                "method_elem" | "method_spec" => {
                    let Some(name_node) = elem.child_by_field_name("name") else {
                        continue;
                    };
                    let name = self.text(name_node).to_string();
                    methods.push(MethodRecord {
                        is_exported: is_exported(&name),
                        name,
                        params: self.parameters(elem),
                        results: self.results(elem),
                    });
                }
                // Embedded interfaces and type sets are not flattened
                "type_elem" | "constraint_elem" => {
                    tracing::debug!(
                        "Skipping embedded interface element at line {}",
                        start_line(&elem)
                    );
                }
                _ => {}
            }
        }

        methods
    }

    fn function_record(&self, decl: Node) -> FunctionRecord {
        let name = decl
            .child_by_field_name("name")
            .map(|n| self.text(n).to_string())
            .unwrap_or_default();

        let receiver = decl.child_by_field_name("receiver").and_then(|list| {
            let mut cursor = list.walk();
            let first = list
                .children(&mut cursor)
                .find(|child| child.kind() == "parameter_declaration");
            first.map(|param| self.param_record(param))
        });

        FunctionRecord {
            name,
            receiver,
            params: self.parameters(decl),
            results: self.results(decl),
            start_line: start_line(&decl),
            end_line: end_line(&decl),
        }
    }

    fn parameters(&self, node: Node) -> Vec<ParamRecord> {
        node.child_by_field_name("parameters")
            .map(|list| self.parameter_list(list))
            .unwrap_or_default()
    }

    /// Results are either a parenthesised list or a single bare type.
    fn results(&self, node: Node) -> Vec<ParamRecord> {
        match node.child_by_field_name("result") {
            Some(list) if list.kind() == "parameter_list" => self.parameter_list(list),
            Some(single) => vec![ParamRecord::unnamed(render_type(single, self.source))],
            None => Vec::new(),
        }
    }

    fn parameter_list(&self, list: Node) -> Vec<ParamRecord> {
        let mut cursor = list.walk();
        let params = list
            .children(&mut cursor)
            .filter(|child| {
                matches!(
                    child.kind(),
                    "parameter_declaration" | "variadic_parameter_declaration"
                )
            })
            .map(|param| self.param_record(param))
            .collect();
        params
    }

    fn param_record(&self, param: Node) -> ParamRecord {
        let type_name = if param.kind() == "variadic_parameter_declaration" {
            render_type(param, self.source)
        } else {
            self.render_field(param, "type")
        };
        ParamRecord::new(self.names(param), type_name)
    }

    fn names(&self, node: Node) -> Vec<String> {
        let mut cursor = node.walk();
        let names = node
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.text(n).to_string())
            .collect();
        names
    }

    fn render_field(&self, node: Node, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|ty| render_type(ty, self.source))
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
    }

    fn text(&self, node: Node) -> &'src str {
        node.utf8_text(self.source).unwrap_or("")
    }
}

/// 1-indexed line of the node's first byte.
pub fn start_line(node: &Node) -> u32 {
    (node.start_position().row + 1) as u32
}

/// 1-indexed line of the node's last byte.
pub fn end_line(node: &Node) -> u32 {
    (node.end_position().row + 1) as u32
}

fn has_child_kind(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == kind);
    found
}
