//! Shared ownership for runtime objects.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// A reference-counted runtime object.
///
/// The constructor is crate-private: values reach the outside world only
/// through `Value` factories, `Function::bind` and `Instance::allocate`.
/// Cloning shares the allocation, and [`Heap::ptr_eq`] is the identity used
/// by Lox equality for functions, classes and instances.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Returns `true` if both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }

    /// Mutable access if this is the only handle to the object.
    #[inline]
    pub(crate) fn get_mut(this: &mut Self) -> Option<&mut T> {
        Rc::get_mut(&mut this.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}
