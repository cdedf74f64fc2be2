//! Per-document nesting context.
//!
//! Entering a nesting construct's body replaces the current prefix/object;
//! the [`Scope`] guard restores the previous values when dropped, including
//! on early return or unwinding out of the body.

use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    prefix: Option<String>,
    object: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context already inside `prefix`, e.g. to resume a document part.
    pub fn within(prefix: impl Into<String>, object: Option<String>) -> Self {
        Context {
            prefix: Some(prefix.into()),
            object,
        }
    }

    /// Full name of the innermost enclosing nesting construct.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Member name of the innermost enclosing construct.
    pub fn object(&self) -> Option<&str> {
        self.object.as_deref()
    }

    /// Namespace captured by cross-references made in this context.
    pub fn namespace(&self) -> Option<&str> {
        self.prefix()
    }

    pub fn is_top_level(&self) -> bool {
        self.prefix.is_none()
    }

    /// Enter a nested body on `host`, which owns this context.
    ///
    /// The returned guard dereferences to `host`; the previous context is
    /// restored when it goes out of scope.
    pub fn enter<H: AsMut<Context>>(
        host: &mut H,
        prefix: impl Into<String>,
        object: Option<String>,
    ) -> Scope<'_, H> {
        let ctx = host.as_mut();
        let entered = Context {
            prefix: Some(prefix.into()),
            object,
        };
        log::debug!(
            "entering prefix {:?} (was {:?})",
            entered.prefix,
            ctx.prefix
        );
        let saved = std::mem::replace(ctx, entered);
        Scope {
            host,
            saved: Some(saved),
        }
    }
}

impl AsMut<Context> for Context {
    fn as_mut(&mut self) -> &mut Context {
        self
    }
}

/// Guard returned by [`Context::enter`].
pub struct Scope<'a, H: AsMut<Context>> {
    host: &'a mut H,
    saved: Option<Context>,
}

impl<H: AsMut<Context>> Deref for Scope<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: AsMut<Context>> DerefMut for Scope<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: AsMut<Context>> Drop for Scope<'_, H> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            log::debug!("restoring prefix {:?}", saved.prefix);
            *self.host.as_mut() = saved;
        }
    }
}
