//! Host-driven data view built on the `glance` primitives.
//!
//! `glance` is UI-agnostic and provides the individual pieces (rate limiting, the filter/sort
//! pipeline, windowing, chunked loading, gesture classification, stage timing). This crate wires
//! them into a single [`Optimizer`] that a UI adapter feeds with input events and clock ticks:
//!
//! - debounced search applied on the host's idle tick
//! - throttled scroll-driven windowing
//! - progressive chunk loading as the window nears the end of the loaded data
//! - pagination driven by horizontal swipes
//!
//! The optimizer holds no widgets or event-loop handles; whatever toolkit renders the rows keeps
//! ownership of those.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod optimizer;


pub use glance;
pub use optimizer::{Optimizer, Update};
