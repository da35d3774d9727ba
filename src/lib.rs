//! Sets of shared objects that all satisfy one capability, keyed by object
//! identity.
//!
//! A [`TypedSet<Typed<T>>`](TypedSet) checks its item type at compile time.
//! With the `dynamic` feature, a [`DynSet`](dynamic::DynSet) picks its
//! capability at runtime from a [`CapabilityRegistry`](dynamic::CapabilityRegistry)
//! and checks every item's type tag as it comes in.

mod capability;
mod error;
mod hash;
mod set;

#[cfg(feature = "dynamic")]
pub mod dynamic;

pub use capability::{Capability, Collectable, Typed};
pub use error::{CapabilityError, Error, Result};
pub use hash::{HashWith, IdentityHash, ItemHasher};
pub use set::{IntoIter, Iter, TypedSet};
