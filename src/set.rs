use std::{borrow::Borrow, fmt::Debug};

use indexmap::{map, IndexMap};
use tracing::{debug, trace};

use crate::{
    capability::{Capability, Collectable, Typed},
    error::{Error, Result},
    hash::{IdentityHash, ItemHasher},
};

/// A mutable set of items that all satisfy one capability, keyed by a hash
/// of each item.
///
/// Items are kept in insertion order. Overwriting a key keeps its position,
/// removing a key keeps the order of the rest.
pub struct TypedSet<C: Capability, H = IdentityHash> {
    capability: C,
    hasher: H,
    inner: IndexMap<String, C::Item>,
}

impl<T: ?Sized + Collectable> TypedSet<Typed<T>> {
    pub fn new() -> Self {
        Self::from_capability(Typed::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_capability_with_capacity(Typed::new(), capacity)
    }
}

impl<T: ?Sized + Collectable> Default for TypedSet<Typed<T>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Capability> TypedSet<C> {
    pub fn from_capability(capability: C) -> Self {
        Self::from_capability_with_capacity(capability, 0)
    }

    pub fn from_capability_with_capacity(capability: C, capacity: usize) -> Self {
        Self {
            capability,
            hasher: IdentityHash,
            inner: IndexMap::with_capacity(capacity),
        }
    }
}

impl<C: Capability, H> TypedSet<C, H> {
    /// Name of the capability every item must satisfy.
    pub fn item_class(&self) -> &str {
        self.capability.name()
    }

    pub fn capability(&self) -> &C {
        &self.capability
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        debug!(dropped = self.inner.len(), "clearing set");
        self.inner.clear();
    }

    pub fn iter(&self) -> Iter<'_, C::Item> {
        Iter {
            inner: self.inner.values(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.inner.keys().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<C::Item> {
        self.inner.values().cloned().collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns the item stored under `key`. Absence is not an error here,
    /// unlike [`remove_key`](Self::remove_key).
    pub fn get(&self, key: &str) -> Option<&C::Item> {
        self.inner.get(key)
    }

    /// Stores `item` under `key` without consulting the hasher.
    pub fn insert_at(&mut self, key: impl Into<String>, item: C::Item) -> Result<()> {
        self.admit(&item)?;
        let key = key.into();
        trace!(%key, "insert at key");
        self.inner.insert(key, item);
        Ok(())
    }

    pub fn remove_key(&mut self, key: &str) -> Result<C::Item> {
        let item = self
            .inner
            .shift_remove(key)
            .ok_or_else(|| Error::NotFound(key.to_owned()))?;
        trace!(%key, "removed key");
        Ok(item)
    }

    fn admit(&self, item: &C::Item) -> Result<()> {
        if self.capability.admits(item) {
            Ok(())
        } else {
            Err(Error::InvalidCollectable {
                expected: self.capability.name().to_owned(),
            })
        }
    }
}

impl<C: Capability, H: ItemHasher<C::Item>> TypedSet<C, H> {
    /// Swaps the hash strategy. Items already stored are rekeyed with the new
    /// hasher, so keys chosen through [`insert_at`](Self::insert_at) are lost.
    /// Items whose new keys collide are merged; the later one wins.
    pub fn with_hasher<H2: ItemHasher<C::Item>>(self, hasher: H2) -> TypedSet<C, H2> {
        let inner = self
            .inner
            .into_values()
            .map(|item| (hasher.item_hash(&item), item))
            .collect();
        TypedSet {
            capability: self.capability,
            hasher,
            inner,
        }
    }

    pub fn item_hash(&self, item: &C::Item) -> String {
        self.hasher.item_hash(item)
    }

    /// Adds `item`, replacing whatever was stored under the same hash.
    pub fn add(&mut self, item: C::Item) -> Result<()> {
        self.admit(&item)?;
        self.store(item);
        Ok(())
    }

    /// Adds every element of `other` in order. Stops at the first rejected
    /// element; earlier additions are kept.
    pub fn add_all<I>(&mut self, other: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<C::Item>,
    {
        let mut added = 0usize;
        for item in other {
            self.add(item.borrow().clone())?;
            added += 1;
        }
        debug!(added, len = self.len(), "add_all");
        Ok(())
    }

    pub fn contains(&self, item: &C::Item) -> Result<bool> {
        self.admit(item)?;
        Ok(self.inner.contains_key(&self.hasher.item_hash(item)))
    }

    pub fn remove(&mut self, item: &C::Item) -> Result<C::Item> {
        self.admit(item)?;
        let key = self.hasher.item_hash(item);
        self.remove_key(&key)
    }

    /// Removes every element of `other`. Stops at the first element that is
    /// rejected or missing; earlier removals are kept.
    pub fn remove_all<I>(&mut self, other: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<C::Item>,
    {
        let mut removed = 0usize;
        for item in other {
            self.remove(item.borrow())?;
            removed += 1;
        }
        debug!(removed, len = self.len(), "remove_all");
        Ok(())
    }

    /// Keeps only the items also found in `other`.
    ///
    /// The survivors end up in the order they appear in `other`, not in their
    /// previous order here. Nothing is changed if `other` holds an item this
    /// set rejects.
    pub fn remove_all_except<I>(&mut self, other: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<C::Item>,
    {
        let mut kept = Vec::new();
        for item in other {
            let item = item.borrow();
            if self.contains(item)? {
                kept.push(item.clone());
            }
        }
        debug!(before = self.len(), kept = kept.len(), "remove_all_except");
        self.inner.clear();
        for item in kept {
            self.store(item);
        }
        Ok(())
    }

    fn store(&mut self, item: C::Item) {
        let key = self.hasher.item_hash(&item);
        trace!(%key, "add");
        self.inner.insert(key, item);
    }
}

impl<C, H> Debug for TypedSet<C, H>
where
    C: Capability,
    C::Item: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedSet")
            .field("item_class", &self.item_class())
            .field("items", &self.inner)
            .finish()
    }
}

impl<'a, C: Capability, H> IntoIterator for &'a TypedSet<C, H> {
    type Item = &'a C::Item;
    type IntoIter = Iter<'a, C::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<C: Capability, H> IntoIterator for TypedSet<C, H> {
    type Item = C::Item;
    type IntoIter = IntoIter<C::Item>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.inner.into_values(),
        }
    }
}

pub struct Iter<'a, V> {
    inner: map::Values<'a, String, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct IntoIter<V> {
    inner: map::IntoValues<String, V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
