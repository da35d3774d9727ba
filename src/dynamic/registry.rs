use std::any::{self, Any, TypeId};

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

use super::Descriptor;
use crate::{capability::Collectable, error::CapabilityError};

/// Names the capabilities a [`DynSet`](super::DynSet) can be built for.
///
/// Only [`Collectable`] types can be registered, so every name known here
/// describes something collectable.
#[derive(Debug, Default, Clone)]
pub struct CapabilityRegistry {
    capabilities: IndexMap<String, SmallVec<[TypeId; 4]>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under its full type name.
    pub fn register<T: Collectable + Any>(&mut self) -> &mut Self {
        self.implements::<T>(any::type_name::<T>())
    }

    /// Registers `T` under a short name of the caller's choosing.
    pub fn register_as<T: Collectable + Any>(&mut self, name: impl Into<String>) -> &mut Self {
        self.implements::<T>(name)
    }

    /// Declares that `T` satisfies the capability `name`, creating it if it
    /// is not known yet.
    pub fn implements<T: Collectable + Any>(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        let id = TypeId::of::<T>();
        let members = self.capabilities.entry(name).or_default();
        if !members.contains(&id) {
            members.push(id);
        }
        trace!(member = any::type_name::<T>(), "registered capability member");
        self
    }

    pub fn resolve(&self, name: &str) -> Result<Descriptor, CapabilityError> {
        self.capabilities
            .get(name)
            .map(|members| Descriptor::new(name.to_owned(), members.clone()))
            .ok_or_else(|| CapabilityError::NotCollectable(name.to_owned()))
    }

    /// Resolves a descriptor passed as an untyped value. Anything other than
    /// a `&str` or a `String` is rejected.
    pub fn descriptor(&self, arg: &dyn Any) -> Result<Descriptor, CapabilityError> {
        let name = if let Some(name) = arg.downcast_ref::<&'static str>() {
            *name
        } else if let Some(name) = arg.downcast_ref::<String>() {
            name.as_str()
        } else {
            return Err(CapabilityError::NotString);
        };
        self.resolve(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.capabilities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}
