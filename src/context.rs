use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// Typed child storage holding at most one subcontext per type.
///
/// Both [`RequestContext`] and [`RelyingPartyContext`](crate::RelyingPartyContext)
/// own one of these, which is what makes the request state a tree.
///
/// # Examples
///
/// ```
/// use audit_extract::{AuthenticationContext, Subcontexts};
///
/// let mut children = Subcontexts::new();
/// assert!(children.get::<AuthenticationContext>().is_none());
///
/// // Lookup without creation never allocates a child.
/// assert!(children.subcontext::<AuthenticationContext>(false).is_none());
/// assert!(children.subcontext::<AuthenticationContext>(true).is_some());
/// assert!(children.contains::<AuthenticationContext>());
/// ```
#[derive(Default)]
pub struct Subcontexts {
    entries: HashMap<TypeId, Entry>,
}

struct Entry {
    type_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

impl Entry {
    // The only way entries are built, so an entry stored under
    // `TypeId::of::<T>()` always holds a `T`.
    fn new<T: Any + Send + Sync>(value: T) -> (TypeId, Self) {
        (
            TypeId::of::<T>(),
            Self {
                type_name: std::any::type_name::<T>(),
                value: Box::new(value),
            },
        )
    }
}

impl Subcontexts {
    /// Creates an empty set of subcontexts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the child of type `T`, if present.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast_ref::<T>())
    }

    /// Returns the child of type `T` mutably, if present.
    pub fn get_mut<T: Any + Send + Sync>(&mut self) -> Option<&mut T> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast_mut::<T>())
    }

    /// Returns the child of type `T`, creating a default one if missing.
    ///
    /// # Panics
    ///
    /// Never in practice: every entry is stored under the `TypeId` of the
    /// value it holds, so the downcast cannot fail.
    pub fn get_or_create<T: Any + Send + Sync + Default>(&mut self) -> &mut T {
        let entry = self
            .entries
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Entry::new(T::default()).1);

        match entry.value.downcast_mut::<T>() {
            Some(value) => value,
            None => unreachable!("subcontext stored under a foreign TypeId"),
        }
    }

    /// Looks up the child of type `T`, optionally creating it.
    ///
    /// With `create == false` this is a pure lookup and returns `None` when
    /// the child is absent.
    pub fn subcontext<T: Any + Send + Sync + Default>(&mut self, create: bool) -> Option<&mut T> {
        if create {
            Some(self.get_or_create::<T>())
        } else {
            self.get_mut::<T>()
        }
    }

    /// Stores `value` as the child of its type, returning the previous child.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) -> Option<T> {
        let (type_id, entry) = Entry::new(value);
        let previous = self.entries.insert(type_id, entry);

        previous
            .and_then(|entry| entry.value.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Removes and returns the child of type `T`.
    pub fn remove<T: Any + Send + Sync>(&mut self) -> Option<T> {
        self.entries
            .remove(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Returns true if a child of type `T` is present.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no children.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Subcontexts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        f.debug_set().entries(names).finish()
    }
}

/// Per-request state read by the audit extractors.
///
/// A `RequestContext` is created once per inbound request and discarded when
/// the request completes. Extractors only ever borrow it immutably.
///
/// # Examples
///
/// ```
/// use audit_extract::{AuthenticationContext, AuthenticationResult, Principal, RequestContext};
///
/// let mut ctx = RequestContext::new("req-123");
/// ctx.subcontexts_mut()
///     .get_or_create::<AuthenticationContext>()
///     .set_result(AuthenticationResult::new("authn/Password", Principal::new("alice")));
///
/// assert_eq!(ctx.request_id(), Some("req-123"));
/// assert!(ctx.subcontexts().contains::<AuthenticationContext>());
/// ```
#[derive(Debug, Default)]
pub struct RequestContext {
    request_id: Option<String>,
    subcontexts: Subcontexts,
}

impl RequestContext {
    /// Creates an empty context for the given request.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            subcontexts: Subcontexts::new(),
        }
    }

    /// Creates an empty context without a request id.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns the request id used to correlate log lines, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the direct children of this context.
    pub fn subcontexts(&self) -> &Subcontexts {
        &self.subcontexts
    }

    /// Returns the direct children of this context mutably.
    pub fn subcontexts_mut(&mut self) -> &mut Subcontexts {
        &mut self.subcontexts
    }
}
