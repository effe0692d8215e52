//! Core functionality used across the crate.

pub mod range;
pub mod traits;

pub use range::Range;
pub use traits::Identified;
pub use traits::Located;
pub use traits::Merge;
pub use traits::Named;
pub use traits::Paired;
pub use traits::Relocate;
pub use traits::Scored;
