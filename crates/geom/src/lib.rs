#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![no_std]

//! Simple 2D geometric primitives for outline extraction, on top of euclid.
//!
//! This crate is reexported in [plotline](https://docs.rs/plotline/).
//!
//! # Overview.
//!
//! Everything downstream of the tessellator works on flattened geometry:
//! a [`Polyline`] is an ordered sequence of points joined by straight
//! segments. This crate provides:
//!
//! - `f64` aliases for euclid's points, vectors, sizes, boxes and affine transforms,
//! - arc length measurement of polylines,
//! - splitting a polyline at a given distance along it (see [`split_at_length`]).
//!
//! # Splitting
//!
//! ```
//! use plotline_geom::{point, split_at_length};
//!
//! let line = [point(0.0, 0.0), point(4.0, 0.0), point(4.0, 3.0)];
//! let (before, after) = split_at_length(&line, 5.0);
//!
//! assert_eq!(before, [point(0.0, 0.0), point(4.0, 0.0), point(4.0, 1.0)]);
//! assert_eq!(after, [point(4.0, 1.0), point(4.0, 3.0)]);
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod polyline;

#[doc(inline)]
pub use crate::polyline::{
    polyline_length, segment_length, split_at_length, transformed, Polyline,
};

/// Alias for `euclid::default::Point2D<f64>`.
pub type Point = euclid::default::Point2D<f64>;

/// Alias for `euclid::default::Vector2D<f64>`.
pub type Vector = euclid::default::Vector2D<f64>;

/// Alias for `euclid::default::Size2D<f64>`.
pub type Size = euclid::default::Size2D<f64>;

/// Alias for `euclid::default::Box2D<f64>`.
pub type Box2D = euclid::default::Box2D<f64>;

/// Alias for `euclid::default::Transform2D<f64>`.
///
/// A transform is singular when `inverse()` returns `None`.
pub type Transform = euclid::default::Transform2D<f64>;

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: f64, y: f64) -> Vector {
    Vector::new(x, y)
}

/// Shorthand for `Size::new(w, h)`.
#[inline]
pub fn size(w: f64, h: f64) -> Size {
    Size::new(w, h)
}

/// Tolerance to use when comparing distances of the magnitude of `reference`.
///
/// The tolerance is picked from a few magnitude bands rather than scaled
/// continuously: any `reference` below 65536 gets `1e-8`, larger ones get
/// `1e-5`, `1e-3` and finally `1e-1`. Distances smaller than the tolerance
/// of their band cannot be told apart.
pub fn epsilon_for(reference: f64) -> f64 {
    let magnitude = (reference as i64).unsigned_abs();
    match magnitude {
        0..=65_535 => 1e-8,
        65_536..=8_388_607 => 1e-5,
        8_388_608..=4_294_967_295 => 1e-3,
        _ => 1e-1,
    }
}

#[test]
fn epsilon_grows_with_magnitude() {
    assert!(epsilon_for(1.0) < epsilon_for(100_000.0));
    assert!(epsilon_for(-100_000.0) == epsilon_for(100_000.0));
    assert!(epsilon_for(f64::MAX) <= 1e-1);
    assert_eq!(epsilon_for(0.5), 1e-8);
    assert_eq!(epsilon_for(65_535.9), 1e-8);
    assert_eq!(epsilon_for(-70_000.0), 1e-5);
}
