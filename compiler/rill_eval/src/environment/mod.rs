//! Environment chain for variable scoping.
//!
//! Environments form a parent-linked chain with shared ownership: a
//! closure holds a handle to its defining environment, which keeps that
//! environment (and its parents) alive after the defining call returns.
//! The closure and the defining frame observe the same binding slots,
//! so mutations made on either side are visible to both.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rill_ir::Name;

use crate::value::Value;

/// A single-threaded shared-ownership cell.
///
/// Wraps `Rc<RefCell<T>>` and enforces that allocations go through the
/// `LocalCell::new()` factory. Not thread-safe: evaluation is
/// single-threaded and `Rc` is cheaper than `Arc` here.
#[repr(transparent)]
pub struct LocalCell<T>(Rc<RefCell<T>>);

impl<T> LocalCell<T> {
    /// Create a new `LocalCell` wrapping the given value.
    #[inline]
    pub fn new(value: T) -> Self {
        LocalCell(Rc::new(RefCell::new(value)))
    }

    /// Borrow the inner value immutably.
    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the inner value mutably.
    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalCell<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalCell(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalCell").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalCell<T> {
    fn default() -> Self {
        LocalCell::new(T::default())
    }
}

impl<T> Deref for LocalCell<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Shared handle to an environment.
pub type EnvRef = LocalCell<Env>;

/// Error returned by [`Env::assign`] when no binding exists anywhere in
/// the chain. Assignment never implicitly creates a binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnboundAssign;

/// One scope in the environment chain.
#[derive(Debug, Default)]
pub struct Env {
    /// Bindings in this scope.
    bindings: FxHashMap<Name, Value>,
    /// Parent scope, for lexical resolution.
    parent: Option<EnvRef>,
}

impl Env {
    /// Create a new root environment with no parent.
    pub fn new() -> Self {
        Env {
            bindings: FxHashMap::default(),
            parent: None,
        }
    }

    /// Create a new environment with a parent.
    pub fn with_parent(parent: EnvRef) -> Self {
        Env {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Create a shared child of `parent`; used for call frames, block
    /// scopes, and closure capture.
    pub fn child(parent: &EnvRef) -> EnvRef {
        LocalCell::new(Env::with_parent(parent.clone()))
    }

    /// Define a variable in this scope.
    ///
    /// Re-defining an existing name in the same scope overwrites it;
    /// bindings of the same name in parent scopes are shadowed for this
    /// scope and its children, never modified.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Look up a variable, searching this scope then each parent.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.bindings.get(&name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    /// Assign to the nearest existing binding of `name`.
    #[inline]
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), UnboundAssign> {
        if let Some(slot) = self.bindings.get_mut(&name) {
            *slot = value;
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().assign(name, value);
        }
        Err(UnboundAssign)
    }

    /// Whether this scope (not its parents) binds `name`.
    pub fn binds_locally(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }
}

#[cfg(test)]
mod tests;
