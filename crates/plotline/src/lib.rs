#![deny(bare_trait_objects)]

//! Straight-line outlines of vector drawings, for pen plotters and laser cutters.
//!
//! # Crates
//!
//! This meta-crate (`plotline`) reexports the following sub-crates for convenience:
//!
//! * **plotline_outline** - Style tracking, outline extraction and the virtual output device.
//! * **plotline_algorithms** - Dash patterns and other polyline algorithms.
//! * **plotline_geom** - Points, transforms and arc-length splitting of polylines.
//!
//! Each `plotline_<name>` crate is reexported as a `<name>` module in `plotline`. For example:
//!
//! ```ignore
//! extern crate plotline_algorithms;
//! use plotline_algorithms::dash_polyline;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate plotline;
//! use plotline::algorithms::dash_polyline;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Extracting the outlines of a dashed stroke
//!
//! A rendering backend reports style changes and flattened paths as
//! [`Event`](outline::Event)s. The outlines come back in millimeters,
//! with the dash pattern applied:
//!
//! ```
//! use plotline::geom::point;
//! use plotline::outline::{extract_outlines, Event, OutlineOptions, Pen, StateUpdate};
//!
//! // A 2 pixel wide pen. Dash lengths are expressed in pen widths.
//! let pen = Pen::new()
//!     .with_width(2.0)
//!     .with_cosmetic(true)
//!     .with_dash_pattern(&[2.0, 1.0]);
//!
//! let events = vec![
//!     Event::StateUpdate(StateUpdate::new().with_pen(pen)),
//!     Event::DrawPath(vec![vec![point(0.0, 0.0), point(12.0, 0.0)]]),
//! ];
//!
//! // 5 pixels per millimeter.
//! let extraction = extract_outlines(&events, &OutlineOptions::pixels_per_mm(5.0)).unwrap();
//!
//! assert_eq!(extraction.outlines.len(), 2);
//! assert_eq!(extraction.outlines[0].points, vec![point(0.0, 0.0), point(0.8, 0.0)]);
//! assert_eq!(extraction.outlines[1].points, vec![point(1.2, 0.0), point(2.0, 0.0)]);
//! ```
//!
//! ## Dashing a polyline
//!
//! ```
//! use plotline::geom::point;
//! use plotline::algorithms::{dash_polyline, Diagnostic};
//!
//! let line = vec![point(0.0, 0.0), point(10.0, 0.0)];
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//!
//! let dashes = dash_polyline(&line, &[3.0, 2.0], 0.0, &mut diagnostics);
//!
//! assert_eq!(dashes.len(), 2);
//! assert!(diagnostics.is_empty());
//! ```

pub extern crate plotline_algorithms;
pub extern crate plotline_outline;

pub use plotline_algorithms as algorithms;
pub use plotline_outline as outline;
pub use algorithms::geom;

pub use geom::euclid;
