//! Document pass: describe constructs and collect references for one source
//! document, in document order.

use crate::context::Context;
use crate::directive::ObjectDescription;
use crate::domain::DotNetDomain;
use crate::kind::ConstructKind;
use crate::node::{DescNode, IndexEntry};
use crate::registry::Registration;
use crate::xref::{PendingXRef, XRefRole};
use anyhow::Result;
use std::collections::BTreeSet;

/// Builds one document against the domain's registry.
///
/// Created by [`DotNetDomain::begin_document`], which first purges anything
/// the document registered in a previous build.
pub struct DocumentBuilder<'a> {
    domain: &'a mut DotNetDomain,
    docname: String,
    context: Context,
    /// Full names already anchored here; distinct names can share an id.
    targets: BTreeSet<String>,
    ids: BTreeSet<String>,
    pub(crate) nodes: Vec<DescNode>,
    references: Vec<PendingXRef>,
}

impl<'a> DocumentBuilder<'a> {
    pub(crate) fn new(domain: &'a mut DotNetDomain, docname: &str) -> Self {
        DocumentBuilder {
            domain,
            docname: docname.to_string(),
            context: Context::new(),
            targets: BTreeSet::new(),
            ids: BTreeSet::new(),
            nodes: Vec::new(),
            references: Vec::new(),
        }
    }

    pub fn docname(&self) -> &str {
        &self.docname
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Describe a construct with no nested content.
    pub fn describe(&mut self, desc: ObjectDescription) {
        desc.run(self, |_| ())
    }

    /// Describe a construct, running `body` for its content.
    ///
    /// Nesting kinds run `body` with this construct as the current prefix.
    pub fn describe_nested<R>(
        &mut self,
        desc: ObjectDescription,
        body: impl FnOnce(&mut DocumentBuilder<'a>) -> R,
    ) -> R {
        desc.run(self, body)
    }

    /// Record a reference mention through the named role (`meth`, `dn:cls`).
    pub fn reference(&mut self, role: &str, text: &str) -> Result<&PendingXRef> {
        let role = self.domain.role(role)?;
        Ok(self.reference_kind(role.kind(), text))
    }

    /// Record a reference mention for `kind`.
    pub fn reference_kind(&mut self, kind: ConstructKind, text: &str) -> &PendingXRef {
        let pending = XRefRole::new(kind).create(&self.context, &self.docname, text);
        self.references.push(pending);
        &self.references[self.references.len() - 1]
    }

    /// Note `full_name` as an anchored target; false if it already was.
    pub(crate) fn note_target(&mut self, full_name: &str) -> bool {
        self.targets.insert(full_name.to_string())
    }

    pub(crate) fn has_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub(crate) fn note_explicit_target(&mut self, id: &str) {
        self.ids.insert(id.to_string());
    }

    pub(crate) fn register(&mut self, name: &str, kind: ConstructKind) -> Registration {
        self.domain.registry_mut().register(name, &self.docname, kind)
    }

    pub(crate) fn warn(&mut self, line: Option<usize>, message: String) {
        self.domain.reporter_mut().warn(&self.docname, line, message);
    }

    /// Finish the pass and hand over the document's output.
    pub fn finish(self) -> Document {
        Document {
            docname: self.docname,
            nodes: self.nodes,
            ids: self.ids,
            references: self.references,
        }
    }
}

impl AsMut<Context> for DocumentBuilder<'_> {
    fn as_mut(&mut self) -> &mut Context {
        &mut self.context
    }
}

/// Output of one document pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub docname: String,
    /// Top-level descriptions; nested ones hang off their parent.
    pub nodes: Vec<DescNode>,
    /// Anchor ids defined in this document.
    pub ids: BTreeSet<String>,
    pub references: Vec<PendingXRef>,
}

impl Document {
    /// Every description, depth-first in document order.
    pub fn descriptions(&self) -> Vec<&DescNode> {
        self.nodes.iter().flat_map(DescNode::walk).collect()
    }

    /// Index entries in document order.
    pub fn index_entries(&self) -> Vec<&IndexEntry> {
        self.descriptions()
            .into_iter()
            .flat_map(|desc| desc.index.iter())
            .collect()
    }
}
