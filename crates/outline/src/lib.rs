#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]
#![allow(clippy::new_without_default)]

//! Extraction of straight-line outlines from vector drawing operations.
//!
//! This crate is reexported in [plotline](https://docs.rs/plotline/).
//!
//! ## Overview
//!
//! Devices such as pen plotters and laser cutters only understand line
//! segments. This crate sits between a vector rendering backend and such a
//! device: the backend reports what it draws as a stream of [`Event`]s
//! (style changes and already flattened paths), and the extractor turns
//! every stroke into [`Outline`]s, straight-line polylines with a color and
//! a width, with dash patterns applied.
//!
//! The most interesting types and functions of this crate are:
//!
//! * [`OutlineExtractor`] - applies style updates and extracts the outlines
//!   of stroked paths. It implements the [`PaintSink`] listener trait.
//! * [`OutlineDevice`] - a virtual page with a physical size and resolution,
//!   returning its outlines in millimeters.
//! * [`extract_outlines`] - runs a whole event stream in one call.
//!
//! ## Errors and diagnostics
//!
//! Clipping and non source-over composition cannot be represented with
//! outlines; they abort the extraction with an [`ExtractionError`].
//! Recoverable problems (odd dash patterns, non-invertible transforms) are
//! reported as [`Diagnostic`]s, logged through the `log` crate, and never
//! interrupt the extraction.
//!
//! ## Example
//!
//! ```
//! use plotline_outline::{extract_outlines, Event, OutlineOptions, Pen, StateUpdate};
//! use plotline_outline::geom::point;
//!
//! let pen = Pen::new().with_width(2.0).with_cosmetic(true).with_dash_pattern(&[2.0, 1.0]);
//! let events = vec![
//!     Event::StateUpdate(StateUpdate::new().with_pen(pen)),
//!     Event::DrawPath(vec![vec![point(0.0, 0.0), point(12.0, 0.0)]]),
//! ];
//!
//! let extraction = extract_outlines(&events, &OutlineOptions::DEFAULT).unwrap();
//!
//! assert_eq!(extraction.outlines.len(), 2);
//! assert_eq!(extraction.outlines[0].width, 0.4);
//! assert!(extraction.diagnostics.is_empty());
//! ```

#[cfg(feature = "serialization")]
#[macro_use]
extern crate serde;

pub extern crate plotline_algorithms as algorithms;

pub use crate::algorithms::geom;

mod device;
mod error;
mod event;
mod extract;
mod outline;
mod style;

#[doc(inline)]
pub use crate::algorithms::{Diagnostic, DiagnosticSink, LogDiagnostics};
#[doc(inline)]
pub use crate::device::{DeviceMetric, OutlineDevice, OutlineOptions};
#[doc(inline)]
pub use crate::error::{ExtractionError, ExtractionResult, UnsupportedFeature};
#[doc(inline)]
pub use crate::event::{replay, Event, PaintSink};
#[doc(inline)]
pub use crate::extract::OutlineExtractor;
#[doc(inline)]
pub use crate::outline::{rescale, Outline};
#[doc(inline)]
pub use crate::style::{
    rgba8, Brush, ClipOperation, Color, CompositionMode, Pen, PenStyle, Rgba8, StateUpdate,
    StyleState, StyleTracker,
};

use std::borrow::Borrow;

/// The result of a complete extraction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Extraction {
    /// The outlines in millimeters, in drawing order.
    pub outlines: Vec<Outline>,
    /// The non-fatal problems encountered on the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Replays a whole event stream and returns its outlines in millimeters.
///
/// Extraction stops at the first fatal error, in which case no outline is
/// returned.
pub fn extract_outlines<Iter>(events: Iter, options: &OutlineOptions) -> ExtractionResult<Extraction>
where
    Iter: IntoIterator,
    Iter::Item: Borrow<Event>,
{
    let mut extractor = OutlineExtractor::new();
    replay(events, &mut extractor)?;

    let (outlines, diagnostics) = extractor.finish();
    log::debug!(
        "extracted {} outlines with {} diagnostics",
        outlines.len(),
        diagnostics.len()
    );

    Ok(Extraction {
        outlines: rescale(&outlines, options.pixels_per_mm),
        diagnostics,
    })
}
