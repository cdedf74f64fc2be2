//! Output model handed to the host, independent of any output format.

use crate::fields::FieldList;
use crate::kind::ConstructKind;

/// One rendered piece of a signature, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigPart {
    /// Kind label, e.g. `"class "`.
    Annotation(String),
    /// De-emphasized qualifying path, including the trailing `.`.
    AddName(String),
    /// The member name.
    Name(String),
    /// Parameter list; empty renders as `()`.
    ParameterList(Vec<String>),
}

/// A rendered signature line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureNode {
    /// Member name.
    pub object: String,
    /// Qualifying path still shown after context stripping.
    pub package: Option<String>,
    pub full_name: String,
    pub parts: Vec<SigPart>,
    /// Explicit target names attached to this line.
    pub names: Vec<String>,
    /// Anchor ids attached to this line.
    pub ids: Vec<String>,
    /// True for the first anchored signature of a directive.
    pub first: bool,
}

impl SignatureNode {
    /// Plain-text rendering: `class NS.Cls`, `Open(string path)`.
    pub fn astext(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                SigPart::Annotation(text) | SigPart::AddName(text) | SigPart::Name(text) => {
                    out.push_str(text)
                }
                SigPart::ParameterList(params) => {
                    out.push('(');
                    out.push_str(&params.join(", "));
                    out.push(')');
                }
            }
        }
        out
    }

    pub fn parameters(&self) -> Option<&[String]> {
        self.parts.iter().find_map(|part| match part {
            SigPart::ParameterList(params) => Some(params.as_slice()),
            _ => None,
        })
    }
}

/// Index entry kind; the domain only produces single entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexEntryType {
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub entry_type: IndexEntryType,
    pub text: String,
    pub anchor: String,
    pub key: String,
}

impl IndexEntry {
    pub fn single(text: String, anchor: String) -> Self {
        IndexEntry {
            entry_type: IndexEntryType::Single,
            text,
            anchor,
            key: String::new(),
        }
    }
}

/// A documented construct: its signature lines, fields and nested members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescNode {
    pub kind: ConstructKind,
    pub signatures: Vec<SignatureNode>,
    pub index: Vec<IndexEntry>,
    pub fields: FieldList,
    pub noindex: bool,
    pub children: Vec<DescNode>,
}

impl DescNode {
    /// Depth-first walk over this node and its descendants.
    pub fn walk(&self) -> Vec<&DescNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}
