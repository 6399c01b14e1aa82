pub mod dir;
pub mod replace_dir;
pub mod symlink;

pub use dir::{ensure_dir, ensure_parent, remove_all};
pub use replace_dir::{PromoteOptions, promote_dir};
pub use symlink::{symlink, symlink_if_absent};
