use std::{any, fmt::Debug, marker::PhantomData, rc::Rc};

/// Marker for types that may be stored in a [`TypedSet`](crate::TypedSet).
///
/// It carries no behaviour. Trait objects of a trait that has `Collectable`
/// as a supertrait are collectable as well.
pub trait Collectable {}

/// Decides which items a set admits.
///
/// The set checks every incoming item against its capability before it
/// touches storage.
pub trait Capability {
    /// The handle a set stores. Cloning it must not clone the object.
    type Item: Clone;

    fn name(&self) -> &str;

    fn admits(&self, item: &Self::Item) -> bool;
}

/// Capability fixed at compile time: every `Rc<T>` is admitted.
pub struct Typed<T: ?Sized + Collectable> {
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized + Collectable> Typed<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized + Collectable> Default for Typed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + Collectable> Clone for Typed<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: ?Sized + Collectable> Debug for Typed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Typed").field(&any::type_name::<T>()).finish()
    }
}

impl<T: ?Sized + Collectable> Capability for Typed<T> {
    type Item = Rc<T>;

    fn name(&self) -> &str {
        any::type_name::<T>()
    }

    fn admits(&self, _item: &Rc<T>) -> bool {
        true
    }
}
