//! Filesystem primitives used by the move engine.

mod atomic;
mod copy;
mod disk;
mod helpers;
mod meta;
mod util;

pub use atomic::try_atomic_rename;
pub use copy::safe_copy;
pub use disk::check_free_space;
pub use helpers::io_error_with_help;
pub use meta::preserve_metadata;
pub use util::is_cross_device;
