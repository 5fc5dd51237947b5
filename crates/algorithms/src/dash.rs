//! Cut a polyline into dashes.
//!
//! # Dash patterns
//!
//! A dash pattern is a sequence of lengths alternately describing "on" and
//! "off" stretches of a stroke: `[3.0, 2.0]` draws 3 units, skips 2, draws
//! 3 again and so on. The pattern is applied cyclically along the arc length
//! of the polyline, starting `offset` units into the cycle.
//!
//! ## Example
//!
//! ```
//! use plotline_algorithms::dash::dash_polyline;
//! use plotline_algorithms::geom::point;
//! use plotline_algorithms::Diagnostic;
//!
//! let line = [point(0.0, 0.0), point(10.0, 0.0)];
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//!
//! let dashes = dash_polyline(&line, &[3.0, 2.0], 0.0, &mut diagnostics);
//!
//! assert_eq!(dashes, vec![
//!     vec![point(0.0, 0.0), point(3.0, 0.0)],
//!     vec![point(5.0, 0.0), point(8.0, 0.0)],
//! ]);
//! assert!(diagnostics.is_empty());
//! ```

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::geom::{split_at_length, Point, Polyline};

use alloc::vec;
use alloc::vec::Vec;

/// The position within a cyclic dash pattern.
///
/// The state is the index of the current entry, the length left in it, and
/// whether it is an "on" entry. Entries at even indices are "on", so the
/// pattern must have an even number of entries for the parity to stay
/// consistent across cycles.
#[derive(Clone, Debug, PartialEq)]
pub struct DashCycle<'l> {
    pattern: &'l [f64],
    index: usize,
    remaining: f64,
}

impl<'l> DashCycle<'l> {
    /// Starts walking `pattern` at `offset` units into the cycle.
    ///
    /// Returns `None` if the pattern cannot be walked: empty, of odd
    /// length, with negative or non-finite entries, or without a positive
    /// total. The offset is reduced modulo the total length of the pattern
    /// first, negative offsets wrapping forward. A non-finite offset is
    /// treated as zero.
    pub fn new(pattern: &'l [f64], offset: f64) -> Option<Self> {
        if pattern.is_empty() || pattern.len() % 2 != 0 || !is_walkable(pattern) {
            return None;
        }

        let total: f64 = pattern.iter().sum();

        let mut offset = if offset.is_finite() { offset % total } else { 0.0 };
        if offset < 0.0 {
            offset += total;
        }

        let mut index = 0;
        while pattern[index] <= offset {
            offset -= pattern[index];
            index = (index + 1) % pattern.len();
        }

        Some(DashCycle {
            pattern,
            index,
            remaining: pattern[index] - offset,
        })
    }

    /// Length left in the current entry.
    #[inline]
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Whether the current entry is drawn.
    #[inline]
    pub fn is_on(&self) -> bool {
        self.index % 2 == 0
    }

    /// Moves to the start of the next entry, wrapping around the pattern.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.pattern.len();
        self.remaining = self.pattern[self.index];
    }
}

/// Returns whether `pattern` can be walked by a [`DashCycle`].
fn is_walkable(pattern: &[f64]) -> bool {
    let mut total = 0.0;
    for &length in pattern {
        if !length.is_finite() || length < 0.0 {
            return false;
        }
        total += length;
    }

    total > 0.0 && total.is_finite()
}

/// Applies a dash pattern to a polyline and returns the "on" fragments.
///
/// - An odd number of entries is not allowed: the last entry is dropped and
///   [`Diagnostic::OddDashPattern`] is reported.
/// - An empty pattern, or a line with at most one point, leaves the line
///   untouched (the result is `[line]`).
/// - A pattern that cannot make progress along the line (see
///   [`Diagnostic::DegenerateDashPattern`]) also leaves the line untouched.
///
/// Fragments are returned in order along the line. Zero-length "on"
/// entries do not produce empty fragments.
pub fn dash_polyline(
    line: &[Point],
    pattern: &[f64],
    offset: f64,
    diagnostics: &mut dyn DiagnosticSink,
) -> Vec<Polyline> {
    let mut pattern = pattern;
    if pattern.len() % 2 != 0 {
        if let Some((&last, even)) = pattern.split_last() {
            diagnostics.diagnostic(Diagnostic::OddDashPattern { dropped: last });
            pattern = even;
        }
    }

    if pattern.is_empty() || line.len() <= 1 {
        return vec![line.to_vec()];
    }

    let mut cycle = match DashCycle::new(pattern, offset) {
        Some(cycle) => cycle,
        None => {
            diagnostics.diagnostic(Diagnostic::DegenerateDashPattern);
            return vec![line.to_vec()];
        }
    };

    let mut dashes = Vec::new();
    let mut line = line.to_vec();
    while !line.is_empty() {
        let (before, after) = split_at_length(&line, cycle.remaining());
        if cycle.is_on() && !before.is_empty() {
            dashes.push(before);
        }
        line = after;
        cycle.advance();
    }

    log::trace!("dashed polyline into {} fragments", dashes.len());

    dashes
}

#[cfg(test)]
use crate::geom::point;

#[cfg(test)]
fn assert_fragments(actual: &[Polyline], expected: &[&[Point]]) {
    assert_eq!(actual.len(), expected.len(), "{:?}", actual);
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_eq!(a.len(), e.len(), "{:?} != {:?}", a, e);
        for (p, q) in a.iter().zip(e.iter()) {
            assert!((*p - *q).length() < 1e-9, "{:?} != {:?}", a, e);
        }
    }
}

#[test]
fn empty_pattern_is_a_no_op() {
    let line = vec![point(0.0, 0.0), point(1.0, 5.0), point(2.0, 0.0)];
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    assert_eq!(dash_polyline(&line, &[], 0.0, &mut diagnostics), vec![line.clone()]);
    assert!(diagnostics.is_empty());
}

#[test]
fn single_point_is_a_no_op() {
    let line = vec![point(3.0, 3.0)];
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    assert_eq!(dash_polyline(&line, &[1.0, 1.0], 0.0, &mut diagnostics), vec![line.clone()]);
    assert!(diagnostics.is_empty());
}

#[test]
fn simple_dashes() {
    let line = [point(0.0, 0.0), point(10.0, 0.0)];
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let dashes = dash_polyline(&line, &[3.0, 2.0], 0.0, &mut diagnostics);

    assert_fragments(
        &dashes,
        &[
            &[point(0.0, 0.0), point(3.0, 0.0)],
            &[point(5.0, 0.0), point(8.0, 0.0)],
        ],
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn odd_pattern_drops_last_entry() {
    let line = [point(0.0, 0.0), point(10.0, 0.0)];

    let mut odd: Vec<Diagnostic> = Vec::new();
    let mut even: Vec<Diagnostic> = Vec::new();
    let a = dash_polyline(&line, &[1.0, 2.0, 3.0], 0.0, &mut odd);
    let b = dash_polyline(&line, &[1.0, 2.0], 0.0, &mut even);

    assert_eq!(a, b);
    assert_eq!(odd, vec![Diagnostic::OddDashPattern { dropped: 3.0 }]);
    assert!(even.is_empty());
}

#[test]
fn single_entry_pattern_becomes_empty() {
    let line = vec![point(0.0, 0.0), point(10.0, 0.0)];
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let dashes = dash_polyline(&line, &[4.0], 0.0, &mut diagnostics);

    assert_eq!(dashes, vec![line.clone()]);
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn dashes_follow_corners() {
    let line = [point(0.0, 0.0), point(4.0, 0.0), point(4.0, 4.0)];
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let dashes = dash_polyline(&line, &[5.0, 1.0], 0.0, &mut diagnostics);

    assert_fragments(
        &dashes,
        &[
            &[point(0.0, 0.0), point(4.0, 0.0), point(4.0, 1.0)],
            &[point(4.0, 2.0), point(4.0, 4.0)],
        ],
    );
}

#[test]
fn offset_shifts_the_phase() {
    let line = [point(0.0, 0.0), point(10.0, 0.0)];
    let expected: &[&[Point]] = &[
        &[point(1.0, 0.0), point(4.0, 0.0)],
        &[point(6.0, 0.0), point(9.0, 0.0)],
    ];
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    // 4 units into the pattern: one unit left of the first gap.
    assert_fragments(&dash_polyline(&line, &[3.0, 2.0], 4.0, &mut diagnostics), expected);
    // Offsets are taken modulo the pattern length.
    assert_fragments(&dash_polyline(&line, &[3.0, 2.0], 14.0, &mut diagnostics), expected);
    // Negative offsets wrap around.
    assert_fragments(&dash_polyline(&line, &[3.0, 2.0], -1.0, &mut diagnostics), expected);

    assert!(diagnostics.is_empty());
}

#[test]
fn offset_inside_first_dash() {
    let line = [point(0.0, 0.0), point(10.0, 0.0)];
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let dashes = dash_polyline(&line, &[3.0, 2.0], 1.0, &mut diagnostics);

    assert_fragments(
        &dashes,
        &[
            &[point(0.0, 0.0), point(2.0, 0.0)],
            &[point(4.0, 0.0), point(7.0, 0.0)],
            &[point(9.0, 0.0), point(10.0, 0.0)],
        ],
    );
}

#[test]
fn zero_length_entries() {
    let line = [point(0.0, 0.0), point(5.0, 0.0)];
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    // Zero-length dashes ("dots") produce no empty fragment.
    let dots = dash_polyline(&line, &[0.0, 2.0], 0.0, &mut diagnostics);
    assert!(dots.is_empty());

    // Zero-length gaps join the dashes end to end.
    let solid = dash_polyline(&line, &[2.0, 0.0], 0.0, &mut diagnostics);
    assert_fragments(
        &solid,
        &[
            &[point(0.0, 0.0), point(2.0, 0.0)],
            &[point(2.0, 0.0), point(4.0, 0.0)],
            &[point(4.0, 0.0), point(5.0, 0.0)],
        ],
    );

    assert!(diagnostics.is_empty());
}

#[test]
fn degenerate_patterns_draw_solid_lines() {
    let line = vec![point(0.0, 0.0), point(5.0, 0.0)];

    for pattern in &[&[0.0, 0.0][..], &[1.0, -1.0][..], &[f64::NAN, 1.0][..]] {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let dashes = dash_polyline(&line, pattern, 0.0, &mut diagnostics);

        assert_eq!(dashes, vec![line.clone()]);
        assert_eq!(diagnostics, vec![Diagnostic::DegenerateDashPattern]);
    }
}

#[test]
fn cycle_state() {
    let pattern = [3.0, 2.0, 1.0, 4.0];
    let mut cycle = DashCycle::new(&pattern, 6.5).unwrap();

    // 6.5 = 3 + 2 + 1 + 0.5 into the second gap.
    assert!(!cycle.is_on());
    assert_eq!(cycle.remaining(), 3.5);

    cycle.advance();
    assert!(cycle.is_on());
    assert_eq!(cycle.remaining(), 3.0);

    cycle.advance();
    assert!(!cycle.is_on());
    assert_eq!(cycle.remaining(), 2.0);
}

#[test]
fn cycle_rejects_degenerate_patterns() {
    assert_eq!(DashCycle::new(&[], 0.0), None);
    assert_eq!(DashCycle::new(&[0.0, 0.0], 0.0), None);
    assert_eq!(DashCycle::new(&[2.0, -1.0], 0.0), None);
    assert_eq!(DashCycle::new(&[f64::INFINITY, 1.0], 0.0), None);
    assert_eq!(DashCycle::new(&[1.0, 2.0, 3.0], 0.0), None);

    // Non-finite offsets start at the beginning of the pattern.
    let cycle = DashCycle::new(&[3.0, 2.0], f64::NAN).unwrap();
    assert!(cycle.is_on());
    assert_eq!(cycle.remaining(), 3.0);
}

#[test]
fn offset_on_an_entry_boundary() {
    let line = [point(0.0, 0.0), point(10.0, 0.0)];
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    // Exactly at the end of the first dash: starts in the gap.
    let cycle = DashCycle::new(&[3.0, 2.0], 3.0).unwrap();
    assert!(!cycle.is_on());
    assert_eq!(cycle.remaining(), 2.0);

    assert_fragments(
        &dash_polyline(&line, &[3.0, 2.0], 3.0, &mut diagnostics),
        &[
            &[point(2.0, 0.0), point(5.0, 0.0)],
            &[point(7.0, 0.0), point(10.0, 0.0)],
        ],
    );

    // A whole pattern length is the same as no offset.
    assert_fragments(
        &dash_polyline(&line, &[3.0, 2.0], 5.0, &mut diagnostics),
        &[
            &[point(0.0, 0.0), point(3.0, 0.0)],
            &[point(5.0, 0.0), point(8.0, 0.0)],
        ],
    );

    assert!(diagnostics.is_empty());
}
