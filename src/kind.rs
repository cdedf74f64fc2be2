//! Construct-kind catalog: the eight .NET constructs the domain understands.
//!
//! Every per-kind difference in behavior (display prefix, nesting, argument
//! lists, index text) is driven from this table instead of per-kind types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A documentable .NET construct.
///
/// Serialized by its long name (`"namespace"`, `"method"`, ...), which is also
/// the directive name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructKind {
    Namespace,
    Class,
    Structure,
    Interface,
    Delegate,
    Enumeration,
    Method,
    Property,
}

impl ConstructKind {
    /// All kinds, nesting kinds first.
    pub const ALL: [ConstructKind; 8] = [
        ConstructKind::Namespace,
        ConstructKind::Class,
        ConstructKind::Structure,
        ConstructKind::Interface,
        ConstructKind::Delegate,
        ConstructKind::Enumeration,
        ConstructKind::Method,
        ConstructKind::Property,
    ];

    /// Short reference code, used as the role name (`:dn:cls:`).
    pub fn short_name(self) -> &'static str {
        match self {
            ConstructKind::Namespace => "ns",
            ConstructKind::Class => "cls",
            ConstructKind::Structure => "struct",
            ConstructKind::Interface => "iface",
            ConstructKind::Delegate => "del",
            ConstructKind::Enumeration => "enum",
            ConstructKind::Method => "meth",
            ConstructKind::Property => "prop",
        }
    }

    /// Long display name, used as the directive name and object-type label.
    pub fn long_name(self) -> &'static str {
        match self {
            ConstructKind::Namespace => "namespace",
            ConstructKind::Class => "class",
            ConstructKind::Structure => "structure",
            ConstructKind::Interface => "interface",
            ConstructKind::Delegate => "delegate",
            ConstructKind::Enumeration => "enumeration",
            ConstructKind::Method => "method",
            ConstructKind::Property => "property",
        }
    }

    /// Text rendered before the construct's name, e.g. `"class "`.
    pub fn display_prefix(self) -> Option<&'static str> {
        match self {
            ConstructKind::Namespace => Some("namespace "),
            ConstructKind::Class => Some("class "),
            ConstructKind::Structure => Some("structure "),
            ConstructKind::Interface => Some("interface "),
            ConstructKind::Delegate => Some("delegate "),
            ConstructKind::Enumeration => Some("enumeration "),
            ConstructKind::Method | ConstructKind::Property => None,
        }
    }

    /// Whether the construct's body establishes a new name prefix.
    pub fn is_nesting(self) -> bool {
        !self.has_arguments()
    }

    /// Whether the signature renders a parameter list.
    pub fn has_arguments(self) -> bool {
        matches!(self, ConstructKind::Method | ConstructKind::Property)
    }

    /// Index category used to build the index entry text, if any.
    pub fn index_role(self) -> Option<IndexRole> {
        match self {
            ConstructKind::Method => Some(IndexRole::Function),
            ConstructKind::Namespace => Some(IndexRole::Package),
            ConstructKind::Property => Some(IndexRole::Attribute),
            _ => None,
        }
    }

    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.short_name() == name)
    }

    pub fn from_long_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.long_name() == name)
    }

    /// Object type descriptor exposed to the host.
    pub fn object_type(self) -> ObjType {
        ObjType {
            lname: self.long_name(),
            roles: vec![self.short_name()],
        }
    }
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

/// Host-facing object type: display label plus the roles that reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjType {
    pub lname: &'static str,
    pub roles: Vec<&'static str>,
}

/// Category of a general index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRole {
    Function,
    Package,
    /// Global variables and constants. No construct kind maps here; it is
    /// kept for hosts that index constants themselves.
    Data,
    Attribute,
}

impl IndexRole {
    /// Index entry text for a member `name`, optionally inside `object`.
    ///
    /// Returns `None` when the category has no text for this combination
    /// (an attribute needs an owning object).
    pub fn index_text(self, name: &str, object: Option<&str>) -> Option<String> {
        match (self, object) {
            (IndexRole::Function, None) => Some(format!("{}() (built-in function)", name)),
            (IndexRole::Function, Some(obj)) => Some(format!("{}() ({} method)", name, obj)),
            (IndexRole::Package, _) => Some(format!("{} (package)", name)),
            (IndexRole::Data, _) => Some(format!("{} (global variable or constant)", name)),
            (IndexRole::Attribute, Some(obj)) => Some(format!("{} ({} attribute)", name, obj)),
            (IndexRole::Attribute, None) => None,
        }
    }
}
