//! Cross-reference roles: turn a mention like `` :dn:meth:`~NS.Cls.Run` ``
//! into a pending reference that the domain resolves after all documents
//! have been read.

use crate::context::Context;
use crate::kind::ConstructKind;
use regex::Regex;
use std::sync::LazyLock;

static RE_EXPLICIT_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.+?)\s*<(.*?)>$").unwrap());

/// Split `Title <Target>` role text.
///
/// Returns `(has_explicit_title, title, target)`; without an explicit title
/// both title and target are the whole text.
pub fn split_explicit_title(text: &str) -> (bool, String, String) {
    match RE_EXPLICIT_TITLE.captures(text) {
        Some(caps) => (true, caps[1].to_string(), caps[2].to_string()),
        None => (false, text.to_string(), text.to_string()),
    }
}

/// Title and lookup key after role pre-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedLink {
    pub title: String,
    pub target: String,
    /// Set by a leading `.` on the target: prefer the namespace-qualified name.
    pub refspecific: bool,
}

/// A reference waiting for the resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingXRef {
    pub kind: ConstructKind,
    pub docname: String,
    pub target: String,
    pub title: String,
    pub has_explicit_title: bool,
    pub object: Option<String>,
    pub namespace: Option<String>,
    pub refspecific: bool,
}

/// Reference role for one construct kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XRefRole {
    kind: ConstructKind,
}

impl XRefRole {
    pub fn new(kind: ConstructKind) -> Self {
        XRefRole { kind }
    }

    pub fn kind(&self) -> ConstructKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.short_name()
    }

    /// Normalize the title and target of a mention.
    ///
    /// - without an explicit title, leading `.` is dropped from the title and
    ///   `~Some.Path.Name` displays as `Name`
    /// - leading `~` is always dropped from the target
    /// - a leading `.` on the target marks the reference as specific
    pub fn process_link(&self, has_explicit_title: bool, title: &str, target: &str) -> ProcessedLink {
        let mut title = title;
        if !has_explicit_title {
            title = title.trim_start_matches('.');
            if let Some(rest) = title.strip_prefix('~') {
                title = match rest.rfind('.') {
                    Some(dot) => &rest[dot + 1..],
                    None => rest,
                };
            }
        }

        let target = target.trim_start_matches('~');
        let (target, refspecific) = match target.strip_prefix('.') {
            Some(rest) => (rest, true),
            None => (target, false),
        };

        ProcessedLink {
            title: title.to_string(),
            target: target.to_string(),
            refspecific,
        }
    }

    /// Build a pending reference from raw role text in the given context.
    pub fn create(&self, ctx: &Context, docname: &str, text: &str) -> PendingXRef {
        let (has_explicit_title, title, target) = split_explicit_title(text.trim());
        let link = self.process_link(has_explicit_title, &title, &target);
        PendingXRef {
            kind: self.kind,
            docname: docname.to_string(),
            target: link.target,
            title: link.title,
            has_explicit_title,
            object: ctx.object().map(str::to_string),
            namespace: ctx.namespace().map(str::to_string),
            refspecific: link.refspecific,
        }
    }
}
