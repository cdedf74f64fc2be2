//! Object descriptions: one directive occurrence documenting a construct.
//!
//! Handles each signature line, anchors and registers the construct, emits
//! index entries, and for nesting kinds runs the body inside a new context.

use crate::anchor::anchor_id;
use crate::context::Context;
use crate::document::DocumentBuilder;
use crate::fields::parse_fields;
use crate::kind::ConstructKind;
use crate::node::{DescNode, IndexEntry, SigPart, SignatureNode};
use crate::registry::Registration;
use crate::signature::Signature;

/// Identity of a handled signature, used for registration and nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName {
    pub full_name: String,
    /// Qualifying path left after context stripping.
    pub prefix: Option<String>,
    pub member: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveOptions {
    /// Overrides the enclosing object name used in index text.
    pub object: Option<String>,
    /// Render only: no anchor, registration or index entry.
    pub noindex: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescription {
    kind: ConstructKind,
    signatures: Vec<String>,
    options: DirectiveOptions,
    content: String,
    lineno: Option<usize>,
}

impl ObjectDescription {
    /// `arguments` holds one signature per line.
    pub fn new(kind: ConstructKind, arguments: &str) -> Self {
        ObjectDescription {
            kind,
            signatures: arguments
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            options: DirectiveOptions::default(),
            content: String::new(),
            lineno: None,
        }
    }

    pub fn object(mut self, name: impl Into<String>) -> Self {
        self.options.object = Some(name.into());
        self
    }

    pub fn noindex(mut self) -> Self {
        self.options.noindex = true;
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn at_line(mut self, lineno: usize) -> Self {
        self.lineno = Some(lineno);
        self
    }

    pub fn kind(&self) -> ConstructKind {
        self.kind
    }

    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    pub fn options(&self) -> &DirectiveOptions {
        &self.options
    }

    /// Parse one signature line and render it relative to `ctx`.
    ///
    /// A prefix equal to the context prefix is not rendered; a bare member
    /// inside a context is qualified by it. The full name is never affected
    /// by what is rendered.
    pub fn handle_signature(&self, raw: &str, ctx: &Context) -> (SignatureNode, ObjectName) {
        let mut sig = Signature::parse(raw);
        let context_prefix = ctx.prefix();

        let full_name = match (&sig.prefix, context_prefix) {
            _ if sig.is_malformed() => String::new(),
            (None, Some(ctx_prefix)) => format!("{}.{}", ctx_prefix, sig.member),
            _ => sig.full_name(),
        };
        sig.strip_context_prefix(context_prefix);

        let mut parts = Vec::new();
        if let Some(label) = self.kind.display_prefix() {
            parts.push(SigPart::Annotation(label.to_string()));
        }
        if let Some(prefix) = &sig.prefix {
            parts.push(SigPart::AddName(format!("{}.", prefix)));
        }
        if !sig.member.is_empty() {
            parts.push(SigPart::Name(sig.member.clone()));
        }
        if self.kind.has_arguments() {
            parts.push(SigPart::ParameterList(sig.arguments.clone().unwrap_or_default()));
        }

        let node = SignatureNode {
            object: sig.member.clone(),
            package: sig.prefix.clone(),
            full_name: full_name.clone(),
            parts,
            ..Default::default()
        };
        let name = ObjectName {
            full_name,
            prefix: sig.prefix,
            member: sig.member,
        };
        (node, name)
    }

    /// Index text for `name`, or `None` for kinds that are not indexed.
    pub fn index_text(&self, object: Option<&str>, name: &ObjectName) -> Option<String> {
        self.kind.index_role()?.index_text(&name.member, object)
    }

    /// Anchor the signature, register it and queue its index entry.
    fn add_target_and_index(
        &self,
        name: &ObjectName,
        node: &mut SignatureNode,
        first: bool,
        doc: &mut DocumentBuilder<'_>,
        index: &mut Vec<IndexEntry>,
    ) {
        let anchor = anchor_id(&name.full_name);

        if doc.note_target(&name.full_name) {
            node.names.push(name.full_name.clone());
            node.first = first;
            if doc.has_id(&anchor) {
                doc.warn(
                    self.lineno,
                    format!(
                        "anchor {} of {} is already used in this document",
                        anchor, name.full_name
                    ),
                );
            } else {
                node.ids.push(anchor.clone());
                doc.note_explicit_target(&anchor);
            }
        }

        if let Registration::Duplicate { existing } = doc.register(&name.full_name, self.kind) {
            doc.warn(
                self.lineno,
                format!(
                    "duplicate object description of {}, other instance in {}",
                    name.full_name, existing.docname
                ),
            );
        }

        let object = self
            .options
            .object
            .clone()
            .or_else(|| doc.context().object().map(str::to_string));
        if let Some(text) = self.index_text(object.as_deref(), name) {
            index.push(IndexEntry::single(text, anchor));
        }
    }

    /// Process the directive in `doc`, running `body` for its content.
    ///
    /// For nesting kinds the body sees this construct as its context; the
    /// previous context is restored afterwards.
    pub(crate) fn run<'a, R>(
        self,
        doc: &mut DocumentBuilder<'a>,
        body: impl FnOnce(&mut DocumentBuilder<'a>) -> R,
    ) -> R {
        let mut signatures = Vec::with_capacity(self.signatures.len());
        let mut index = Vec::new();
        let mut names: Vec<ObjectName> = Vec::new();

        for raw in &self.signatures {
            let (mut node, name) = self.handle_signature(raw, doc.context());
            if name.full_name.is_empty() {
                doc.warn(
                    self.lineno,
                    format!("malformed {} signature: {:?}", self.kind, raw),
                );
                signatures.push(node);
                continue;
            }
            if !self.options.noindex {
                self.add_target_and_index(&name, &mut node, names.is_empty(), doc, &mut index);
            }
            names.push(name);
            signatures.push(node);
        }

        let fields = parse_fields(self.kind, &self.content);
        let start = doc.nodes.len();

        let result = match names.last() {
            Some(last) if self.kind.is_nesting() => {
                let mut scope =
                    Context::enter(&mut *doc, last.full_name.clone(), Some(last.member.clone()));
                body(&mut scope)
            }
            _ => body(&mut *doc),
        };

        let children = doc.nodes.split_off(start);
        doc.nodes.push(DescNode {
            kind: self.kind,
            signatures,
            index,
            fields,
            noindex: self.options.noindex,
            children,
        });
        result
    }
}
