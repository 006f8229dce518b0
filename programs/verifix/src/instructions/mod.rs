pub mod initialize;
pub mod remove_hash;
pub mod store_hash;
pub mod update_hash;
pub mod verify_hash;

pub use initialize::*;
pub use remove_hash::*;
pub use store_hash::*;
pub use update_hash::*;
pub use verify_hash::*;
