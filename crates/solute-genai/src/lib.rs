//! Hosted generative services behind [`solute_core::backend::GenerativeBackend`].
//!
//! - [`gemini`]: text and vision via `generateContent`.
//! - [`replicate`]: Flux image generation.
//! - [`removebg`]: background removal.
//!
//! [`HostedBackend`] bundles the three; the optional services are only
//! available when their credential is configured.

pub mod error;
pub mod gemini;
pub mod removebg;
pub mod replicate;

mod hosted;

pub use error::{Error, Result};
pub use hosted::{HostedBackend, HostedConfig};

#[cfg(test)]
mod tests;
