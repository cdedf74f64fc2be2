//! Build-wide object registry: fully qualified name → (document, kind).
//!
//! The first registration of a name wins; later ones are reported as
//! duplicates and leave the entry untouched. Entries are purged per document
//! so incremental rebuilds can re-register a changed document.

use crate::anchor::anchor_id;
use crate::kind::ConstructKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Where a construct is defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub docname: String,
    pub kind: ConstructKind,
}

/// Outcome of [`ObjectRegistry::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    /// The name was already registered; the existing entry is kept.
    Duplicate { existing: RegistryEntry },
}

/// A conflict found while merging registries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub name: String,
    pub existing: RegistryEntry,
    pub rejected: RegistryEntry,
}

/// One row of the object inventory exposed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
    pub kind: ConstructKind,
    pub docname: &'a str,
    pub anchor: String,
    pub priority: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRegistry {
    objects: BTreeMap<String, RegistryEntry>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, unless it is already known.
    pub fn register(&mut self, name: &str, docname: &str, kind: ConstructKind) -> Registration {
        if let Some(existing) = self.objects.get(name) {
            return Registration::Duplicate {
                existing: existing.clone(),
            };
        }
        self.objects.insert(
            name.to_string(),
            RegistryEntry {
                docname: docname.to_string(),
                kind,
            },
        );
        Registration::Inserted
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.objects.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegistryEntry)> {
        self.objects.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Remove every entry defined in `docname`. Returns how many were removed.
    pub fn clear_doc(&mut self, docname: &str) -> usize {
        let before = self.objects.len();
        self.objects.retain(|_, entry| entry.docname != docname);
        before - self.objects.len()
    }

    /// Merge entries from `other` that belong to one of `docnames`.
    ///
    /// Entries already present here win; each rejected entry is returned.
    pub fn merge_from(&mut self, other: &ObjectRegistry, docnames: &[&str]) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        for (name, entry) in &other.objects {
            if !docnames.contains(&entry.docname.as_str()) {
                continue;
            }
            if let Registration::Duplicate { existing } =
                self.register(name, &entry.docname, entry.kind)
            {
                conflicts.push(Conflict {
                    name: name.clone(),
                    existing,
                    rejected: entry.clone(),
                });
            }
        }
        conflicts
    }

    /// Inventory of all registered objects, in name order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectEntry<'_>> {
        self.objects.iter().map(|(name, entry)| ObjectEntry {
            name,
            display_name: name,
            kind: entry.kind,
            docname: &entry.docname,
            anchor: anchor_id(name),
            priority: 1,
        })
    }

    /// Load a registry saved by [`ObjectRegistry::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read registry: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse registry: {}", path.display()))
    }

    /// Load a saved registry, or start empty when none exists yet.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self).context("failed to serialize registry")?;
        fs::write(path, content)
            .with_context(|| format!("failed to write registry: {}", path.display()))
    }
}
