//! Lets callers write one iterator pipeline that is parallel when the `concurrent` feature is
//! enabled and an ordinary iterator otherwise.

#[cfg(feature = "concurrent")]
pub mod concurrent;
#[cfg(feature = "concurrent")]
pub use concurrent::*;

#[cfg(not(feature = "concurrent"))]
pub mod sequential;
#[cfg(not(feature = "concurrent"))]
pub use sequential::*;
