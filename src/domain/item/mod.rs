//! Item module - the shared lifecycle shape of parts, assemblies, PCBAs
//! and documents.

mod events;
mod item_type;
mod revision;
mod versioned_item;

pub use events::{ItemArchived, ItemLifecycleUpdated, ItemRevisionCreated};
pub use item_type::{
    AssemblyCapabilities, DocumentCapabilities, ItemCapabilities, ItemType, PartCapabilities,
    PcbaCapabilities,
};
pub use revision::{Revision, RevisionScheme, RevisionType};
pub use versioned_item::{ItemRecord, VersionedItem};
