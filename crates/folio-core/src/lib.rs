#![forbid(unsafe_code)]

//! Folio Core
//!
//! Host-independent interaction logic for the portfolio page: navigation,
//! reveal-on-scroll, hero parallax, dock magnification, the project carousel
//! and modal, the typewriter headline and staggered word reveal.
//!
//! # Key Components
//!
//! - [`Page`] - Aggregate controller routing [`PageEvent`]s to features
//! - [`DomOp`] / [`Surface`] - Declarative DOM mutations and their sink
//! - [`MemorySurface`] - In-memory surface for tests and headless runs
//! - [`FolioConfig`] - Tunables, with defaults matching the shipped page
//! - [`ProjectCatalog`] - Project records shown by the modal
//!
//! # Time
//! Nothing here reads a clock. Hosts pass time in as a [`Duration`] since an
//! arbitrary origin, poll [`Page::next_deadline`], and call
//! [`Page::advance`] when it passes. Tests drive time by hand.
//!
//! [`Duration`]: core::time::Duration

pub mod carousel;
pub mod clock;
pub mod config;
pub mod dock;
pub mod dom;
pub mod error;
pub mod modal;
pub mod nav;
pub mod page;
pub mod parallax;
pub mod project;
pub mod reveal;
pub mod stagger;
pub mod style;
pub mod typewriter;

pub use config::FolioConfig;
pub use dom::{DomOp, MemorySurface, Surface, Target};
pub use error::FolioError;
pub use page::{Features, ObserverKind, Page, PageEvent, PageLayout, PageUpdate};
pub use project::{ProjectCatalog, ProjectRecord};
