//! Common types shared across the account client workspace

mod error;
mod mask;

pub use error::{Error, Result};
pub use mask::{Masked, mask};
