//! Filesystem primitives for staged installs.
//!
//! # Architecture
//!
//! - `primitives/` - directory creation, purge, symlinks, atomic promote
//! - `permissions.rs` - permission modes applied after writes
//! - `staging.rs` - staging directory lifecycle

mod error;
pub mod permissions;
pub mod primitives;
mod staging;

pub use error::{Error, Result};
pub use permissions::PermissionMode;
pub use primitives::{
    PromoteOptions, ensure_dir, ensure_parent, promote_dir, remove_all, symlink, symlink_if_absent,
};
pub use staging::Staging;
