mod descriptor;
mod registry;

pub use descriptor::{Descriptor, DynSet};
pub use registry::CapabilityRegistry;
