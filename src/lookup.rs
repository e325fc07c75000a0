//! Injectable strategies for locating a subcontext within a request.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::context::RequestContext;

/// Locates a `T` within a [`RequestContext`].
///
/// Extractors take a lookup at construction so hosts can point them at a
/// differently-shaped context tree. Returning `None` means "not present".
pub trait ContextLookup<T>: Send + Sync {
    /// Finds the target within `ctx`, without creating anything.
    fn lookup<'a>(&self, ctx: &'a RequestContext) -> Option<&'a T>;
}

/// Finds the direct child subcontext of type `T`.
///
/// This is the default strategy of every extractor.
pub struct ChildContextLookup<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> ChildContextLookup<T> {
    /// Creates the lookup.
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Default for ChildContextLookup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ChildContextLookup<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ChildContextLookup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChildContextLookup<{}>", std::any::type_name::<T>())
    }
}

impl<T: Any + Send + Sync> ContextLookup<T> for ChildContextLookup<T> {
    fn lookup<'a>(&self, ctx: &'a RequestContext) -> Option<&'a T> {
        ctx.subcontexts().get::<T>()
    }
}

/// Adapts a closure into a [`ContextLookup`].
///
/// # Examples
///
/// ```
/// use audit_extract::{
///     AttributeContext, ContextLookup, FnLookup, RelyingPartyContext, RequestContext,
/// };
///
/// // Navigate two levels down: request -> relying party -> attributes.
/// let lookup = FnLookup::new(|ctx: &RequestContext| {
///     ctx.subcontexts()
///         .get::<RelyingPartyContext>()?
///         .subcontexts()
///         .get::<AttributeContext>()
/// });
///
/// let ctx = RequestContext::new("req-1");
/// let found: Option<&AttributeContext> = lookup.lookup(&ctx);
/// assert!(found.is_none());
/// ```
pub struct FnLookup<F> {
    f: F,
}

impl<F> FnLookup<F> {
    /// Wraps `f`.
    pub fn new<T>(f: F) -> Self
    where
        F: for<'a> Fn(&'a RequestContext) -> Option<&'a T> + Send + Sync,
    {
        Self { f }
    }
}

impl<F> fmt::Debug for FnLookup<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnLookup")
    }
}

impl<T, F> ContextLookup<T> for FnLookup<F>
where
    F: for<'a> Fn(&'a RequestContext) -> Option<&'a T> + Send + Sync,
{
    fn lookup<'a>(&self, ctx: &'a RequestContext) -> Option<&'a T> {
        (self.f)(ctx)
    }
}

impl<T, L: ContextLookup<T> + ?Sized> ContextLookup<T> for Arc<L> {
    fn lookup<'a>(&self, ctx: &'a RequestContext) -> Option<&'a T> {
        (**self).lookup(ctx)
    }
}

impl<T, L: ContextLookup<T> + ?Sized> ContextLookup<T> for Box<L> {
    fn lookup<'a>(&self, ctx: &'a RequestContext) -> Option<&'a T> {
        (**self).lookup(ctx)
    }
}
