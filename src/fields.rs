//! Field lists in construct bodies (`:param int count: ...`, `:rtype: ...`).
//!
//! Callable kinds group their fields into typed arguments, a return value
//! and a return type. Anything else is kept as an untyped field, in order.

use crate::kind::ConstructKind;
use regex::Regex;
use std::sync::LazyLock;

// `:name:` or `:name arg words:` followed by the body on the same line.
static RE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:(?P<name>[^:\s]+)(?:\s+(?P<arg>[^:]+?))?\s*:(?:\s+(?P<body>.*)|$)").unwrap()
});

const ARGUMENT_NAMES: &[&str] = &["argument", "arg", "parameter", "param"];
const ARGUMENT_TYPE_NAMES: &[&str] = &["paramtype", "type"];
const RETURN_NAMES: &[&str] = &["returns", "return"];
const RETURN_TYPE_NAMES: &[&str] = &["rtype"];

/// Display labels for the grouped fields.
pub const ARGUMENTS_LABEL: &str = "Arguments";
pub const RETURNS_LABEL: &str = "Returns";
pub const RETURN_TYPE_LABEL: &str = "Return type";

/// One documented argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedArgument {
    pub name: String,
    pub type_name: Option<String>,
    pub description: String,
}

/// A field that is not one of the callable field types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub argument: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    pub arguments: Vec<TypedArgument>,
    pub returns: Option<String>,
    pub return_type: Option<String>,
    pub other: Vec<Field>,
}

impl FieldList {
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
            && self.returns.is_none()
            && self.return_type.is_none()
            && self.other.is_empty()
    }

    fn argument_mut(&mut self, name: &str) -> &mut TypedArgument {
        let pos = match self.arguments.iter().position(|a| a.name == name) {
            Some(pos) => pos,
            None => {
                self.arguments.push(TypedArgument {
                    name: name.to_string(),
                    ..Default::default()
                });
                self.arguments.len() - 1
            }
        };
        &mut self.arguments[pos]
    }
}

/// Extract the field list from a construct body.
///
/// Lines before the first field and lines after a blank line that ends the
/// field list are ignored. Indented lines continue the previous field.
pub fn parse_fields(kind: ConstructKind, content: &str) -> FieldList {
    let raw = collect_raw_fields(content);
    let mut list = FieldList::default();

    for field in raw {
        if !kind.has_arguments() {
            list.other.push(field);
            continue;
        }
        apply_callable_field(&mut list, field);
    }

    list
}

fn collect_raw_fields(content: &str) -> Vec<Field> {
    let mut fields: Vec<Field> = Vec::new();
    let mut in_list = false;

    for line in content.lines() {
        if let Some(caps) = RE_FIELD.captures(line) {
            in_list = true;
            fields.push(Field {
                name: caps["name"].to_string(),
                argument: caps.name("arg").map(|m| m.as_str().trim().to_string()),
                body: caps
                    .name("body")
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            });
            continue;
        }

        if !in_list {
            continue;
        }

        if line.trim().is_empty() {
            in_list = false;
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            if let Some(last) = fields.last_mut() {
                if !last.body.is_empty() {
                    last.body.push(' ');
                }
                last.body.push_str(line.trim());
            }
        } else {
            in_list = false;
        }
    }

    fields
}

fn apply_callable_field(list: &mut FieldList, field: Field) {
    let name = field.name.as_str();

    if ARGUMENT_NAMES.contains(&name) {
        if let Some(arg) = field.argument.as_deref() {
            // `:param Type name:` carries the type inline.
            let (type_name, arg_name) = match arg.rsplit_once(char::is_whitespace) {
                Some((ty, arg_name)) => (Some(ty.trim().to_string()), arg_name),
                None => (None, arg),
            };
            let entry = list.argument_mut(arg_name);
            entry.description = field.body;
            if type_name.is_some() {
                entry.type_name = type_name;
            }
            return;
        }
    } else if ARGUMENT_TYPE_NAMES.contains(&name) {
        if let Some(arg) = field.argument.as_deref() {
            list.argument_mut(arg).type_name = Some(field.body);
            return;
        }
    } else if RETURN_NAMES.contains(&name) && field.argument.is_none() {
        list.returns = Some(field.body);
        return;
    } else if RETURN_TYPE_NAMES.contains(&name) && field.argument.is_none() {
        list.return_type = Some(field.body);
        return;
    }

    list.other.push(field);
}
