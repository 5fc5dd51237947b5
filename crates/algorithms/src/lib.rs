#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]
#![no_std]

//! Polyline algorithms used by outline extraction.
//!
//! This crate is reexported in [plotline](https://docs.rs/plotline/).

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(feature = "serialization")]
#[macro_use]
extern crate serde;

pub extern crate plotline_geom as geom;

pub mod dash;
pub mod diagnostics;
pub mod length;

#[doc(inline)]
pub use crate::dash::{dash_polyline, DashCycle};
#[doc(inline)]
pub use crate::diagnostics::{Diagnostic, DiagnosticSink, LogDiagnostics};
#[doc(inline)]
pub use crate::length::total_length;
