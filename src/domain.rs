//! The .NET domain: catalog of directives and roles, owner of the object
//! registry, and resolver for cross-references.

use crate::anchor::{anchor_id, relative_uri};
use crate::config::DomainConfig;
use crate::document::{Document, DocumentBuilder};
use crate::kind::{ConstructKind, ObjType};
use crate::registry::{ObjectEntry, ObjectRegistry, RegistryEntry};
use crate::report::{Reporter, Warning};
use crate::xref::{PendingXRef, XRefRole};
use anyhow::{anyhow, Result};
use std::path::Path;

/// Which candidate wins when both the bare and the namespace-qualified
/// target exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    /// Bare name first.
    #[default]
    Default,
    /// Qualified name first; the reference was written with a leading `.`.
    Specific,
}

/// A reference that found its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef {
    /// Matched full name, also used as the link tooltip.
    pub name: String,
    pub kind: ConstructKind,
    /// Document holding the definition.
    pub docname: String,
    pub anchor: String,
    pub title: String,
}

impl ResolvedRef {
    /// Link target as seen from `from_docname`; `suffix` is the output file
    /// extension (`.html`).
    pub fn href(&self, from_docname: &str, suffix: &str) -> String {
        if from_docname == self.docname {
            format!("#{}", self.anchor)
        } else {
            format!(
                "{}{}#{}",
                relative_uri(from_docname, &self.docname),
                suffix,
                self.anchor
            )
        }
    }
}

/// Result of the resolution pass for one mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Link(ResolvedRef),
    /// Unresolved: render the title as plain text.
    Text(String),
}

#[derive(Debug, Default)]
pub struct DotNetDomain {
    config: DomainConfig,
    registry: ObjectRegistry,
    reporter: Reporter,
}

impl DotNetDomain {
    pub fn new(config: DomainConfig) -> Self {
        Self::with_registry(config, ObjectRegistry::new())
    }

    /// Resume from a registry kept by a previous build.
    pub fn with_registry(config: DomainConfig, registry: ObjectRegistry) -> Self {
        DotNetDomain {
            config,
            registry,
            reporter: Reporter::default(),
        }
    }

    /// Load the registry saved at `path`, if any.
    pub fn load(config: DomainConfig, path: &Path) -> Result<Self> {
        let registry = ObjectRegistry::load_or_default(path)?;
        log::debug!("loaded {} objects from {}", registry.len(), path.display());
        Ok(Self::with_registry(config, registry))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.registry.save(path)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    pub(crate) fn reporter_mut(&mut self) -> &mut Reporter {
        &mut self.reporter
    }

    pub fn warnings(&self) -> &[Warning] {
        self.reporter.warnings()
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        self.reporter.drain()
    }

    /// Object types keyed by long name, in catalog order.
    pub fn object_types(&self) -> Vec<(&'static str, ObjType)> {
        ConstructKind::ALL
            .into_iter()
            .map(|kind| (kind.long_name(), kind.object_type()))
            .collect()
    }

    /// Directive names, domain-qualified (`dn:class`).
    pub fn directive_names(&self) -> Vec<String> {
        ConstructKind::ALL
            .into_iter()
            .map(|kind| format!("{}:{}", self.config.name, kind.long_name()))
            .collect()
    }

    /// Role names, domain-qualified (`dn:cls`).
    pub fn role_names(&self) -> Vec<String> {
        ConstructKind::ALL
            .into_iter()
            .map(|kind| format!("{}:{}", self.config.name, kind.short_name()))
            .collect()
    }

    /// Look up a directive by name, with or without the domain qualifier.
    pub fn directive(&self, name: &str) -> Result<ConstructKind> {
        let bare = self.strip_domain(name);
        ConstructKind::from_long_name(bare)
            .ok_or_else(|| anyhow!("unknown {} directive: {}", self.config.name, name))
    }

    /// Look up a role by name, with or without the domain qualifier.
    pub fn role(&self, name: &str) -> Result<XRefRole> {
        let bare = self.strip_domain(name);
        ConstructKind::from_short_name(bare)
            .map(XRefRole::new)
            .ok_or_else(|| anyhow!("unknown {} role: {}", self.config.name, name))
    }

    fn strip_domain<'n>(&self, name: &'n str) -> &'n str {
        name.strip_prefix(self.config.name.as_str())
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(name)
    }

    /// Start (or restart) the pass for `docname`.
    ///
    /// Anything the document registered before is purged first, so a
    /// re-read document does not collide with its own previous build.
    pub fn begin_document(&mut self, docname: &str) -> DocumentBuilder<'_> {
        self.clear_doc(docname);
        DocumentBuilder::new(self, docname)
    }

    /// Purge all registrations made by `docname`.
    pub fn clear_doc(&mut self, docname: &str) -> usize {
        let removed = self.registry.clear_doc(docname);
        if removed > 0 {
            log::debug!("cleared {} objects from {}", removed, docname);
        }
        removed
    }

    /// Merge registrations from a parallel pass over `docnames`.
    ///
    /// Existing entries win; each conflict is reported as a duplicate.
    pub fn merge_domaindata(&mut self, docnames: &[&str], other: &ObjectRegistry) {
        for conflict in self.registry.merge_from(other, docnames) {
            self.reporter.warn(
                &conflict.rejected.docname,
                None,
                format!(
                    "duplicate object description of {}, other instance in {}",
                    conflict.name, conflict.existing.docname
                ),
            );
        }
    }

    /// Find the registry entry a reference target points at.
    ///
    /// A trailing `()` is ignored. With a namespace, both `target` and
    /// `namespace.target` are candidates; `order` decides which one wins.
    pub fn find_obj(
        &self,
        namespace: Option<&str>,
        target: &str,
        order: SearchOrder,
    ) -> Option<(String, &RegistryEntry)> {
        let name = target.strip_suffix("()").unwrap_or(target);
        if name.is_empty() {
            return None;
        }

        let qualified = namespace
            .filter(|ns| !ns.is_empty())
            .map(|ns| format!("{}.{}", ns, name));

        let chosen = match order {
            SearchOrder::Specific => match qualified {
                Some(q) if self.registry.contains(&q) => q,
                _ => name.to_string(),
            },
            SearchOrder::Default => {
                if self.registry.contains(name) {
                    name.to_string()
                } else {
                    qualified.filter(|q| self.registry.contains(q))?
                }
            }
        };

        let entry = self.registry.get(&chosen)?;
        Some((chosen, entry))
    }

    /// Resolve a pending reference to its definition, if it has one.
    pub fn resolve_xref(&self, pending: &PendingXRef) -> Option<ResolvedRef> {
        let order = if pending.refspecific {
            SearchOrder::Specific
        } else {
            SearchOrder::Default
        };
        let (name, entry) = self.find_obj(pending.namespace.as_deref(), &pending.target, order)?;
        Some(ResolvedRef {
            anchor: anchor_id(&name),
            kind: entry.kind,
            docname: entry.docname.clone(),
            title: pending.title.clone(),
            name,
        })
    }

    /// Resolve a mention, falling back to plain text.
    ///
    /// In nitpicky mode an unresolved target is reported unless ignored.
    pub fn resolve(&mut self, pending: &PendingXRef) -> Resolution {
        if let Some(resolved) = self.resolve_xref(pending) {
            return Resolution::Link(resolved);
        }
        if self.config.nitpicky && !self.config.is_ignored(&pending.target) {
            let message = format!(
                "{}:{} reference target not found: {}",
                self.config.name,
                pending.kind.short_name(),
                pending.target
            );
            self.reporter.warn(&pending.docname, None, message);
        }
        Resolution::Text(pending.title.clone())
    }

    /// Resolution pass over every mention recorded in `doc`.
    pub fn resolve_document(&mut self, doc: &Document) -> Vec<Resolution> {
        doc.references.iter().map(|pending| self.resolve(pending)).collect()
    }

    /// Inventory of all documented objects.
    pub fn get_objects(&self) -> impl Iterator<Item = ObjectEntry<'_>> {
        self.registry.objects()
    }
}
