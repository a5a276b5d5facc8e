//! Persistence codec: versioned save blobs with reconciling load

pub mod blob;
pub mod codec;
pub mod schema;
pub mod slot;

pub use blob::{BattleStateTag, SaveBlob, WeaponOwnership, CURRENT_SCHEMA_VERSION, SAVE_SLOT_NAME};
pub use codec::{decode, encode, reconcile, snapshot, LoadWarning, Restored};
pub use schema::{detect_version, upgrade};
pub use slot::{FileSlot, MemorySlot, SaveSlot};
