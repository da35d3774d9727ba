use std::rc::Rc;

/// Computes the key an item is stored under.
pub trait ItemHasher<V> {
    fn item_hash(&self, item: &V) -> String;
}

/// Keys an item by the address of the object its handle points to.
///
/// Two handles to the same allocation share a key, equal values in separate
/// allocations never do.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHash;

impl<T: ?Sized> ItemHasher<Rc<T>> for IdentityHash {
    fn item_hash(&self, item: &Rc<T>) -> String {
        format!("{:016x}", Rc::as_ptr(item).cast::<()>() as usize)
    }
}

/// Adapts a closure into an [`ItemHasher`], e.g. to key items by value.
#[derive(Debug, Clone, Copy)]
pub struct HashWith<F>(pub F);

impl<V, F: Fn(&V) -> String> ItemHasher<V> for HashWith<F> {
    fn item_hash(&self, item: &V) -> String {
        (self.0)(item)
    }
}
