use std::{
    any::{Any, TypeId},
    rc::Rc,
};

use smallvec::SmallVec;

use super::CapabilityRegistry;
use crate::{capability::Capability, error::Result, set::TypedSet};

/// A set whose capability is chosen at runtime by name.
pub type DynSet = TypedSet<Descriptor>;

/// A capability resolved from a [`CapabilityRegistry`]: its name and the
/// concrete types that satisfy it.
///
/// Later changes to the registry do not reach a descriptor already handed
/// out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    name: String,
    members: SmallVec<[TypeId; 4]>,
}

impl Descriptor {
    pub(crate) fn new(name: String, members: SmallVec<[TypeId; 4]>) -> Self {
        Self { name, members }
    }

    pub fn members(&self) -> &[TypeId] {
        &self.members
    }

    pub fn is_satisfied_by(&self, id: TypeId) -> bool {
        self.members.contains(&id)
    }
}

impl Capability for Descriptor {
    type Item = Rc<dyn Any>;

    fn name(&self) -> &str {
        &self.name
    }

    fn admits(&self, item: &Rc<dyn Any>) -> bool {
        // The pointee's id, not the id of `Rc<dyn Any>` itself.
        self.is_satisfied_by((**item).type_id())
    }
}

impl TypedSet<Descriptor> {
    /// Builds a set for the capability named by `descriptor`, which must be a
    /// `&str` or a `String` known to `registry`.
    pub fn new(registry: &CapabilityRegistry, descriptor: &dyn Any) -> Result<Self> {
        Ok(Self::from_capability(registry.descriptor(descriptor)?))
    }
}
