//! Operations over lists of records.
//!
//! Every operation takes ownership of the list it works on and returns a new
//! one; records are never shared between lists.

pub mod boundaries;
pub mod doublon;
pub mod merge;
pub mod sort;
pub mod split;
pub mod unjoin;

pub use boundaries::boundaries;
pub use doublon::remove_doublons;
pub use doublon::remove_match_doublons;
pub use merge::diff_all;
pub use merge::self_merge;
pub use split::split_by_id;
pub use unjoin::unjoin;
