#![forbid(unsafe_code)]

//! WASM frontend for folio.
//!
//! Binds the `folio-core` page controller to the live document: discovers
//! the elements named in [`selectors`], installs listeners and intersection
//! observers, and runs the page clock on `setTimeout` and
//! `requestAnimationFrame`.
//!
//! JS-facing surface:
//! - the module start function boots the page once the DOM is parsed,
//! - `stopTypewriter()` / `startTypewriter()` cancel and restart the
//!   headline animation.
//!
//! Native builds compile only the selector contract and the override
//! loaders so `cargo check --workspace` stays green on non-wasm targets.

pub mod overrides;
pub mod selectors;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{start, start_typewriter, stop_typewriter};
