//! Length of sets of polylines.

use crate::geom::{polyline_length, Point};

use core::iter::IntoIterator;

/// Sums the arc length of a set of polylines, for example the total
/// distance a plotter pen travels while drawing.
pub fn total_length<Iter, Line>(lines: Iter) -> f64
where
    Iter: IntoIterator<Item = Line>,
    Line: AsRef<[Point]>,
{
    lines
        .into_iter()
        .map(|line| polyline_length(line.as_ref()))
        .sum()
}

#[test]
fn total_length_of_square_and_line() {
    use crate::geom::point;
    use alloc::vec;

    let lines = vec![
        vec![
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(1.0, 1.0),
            point(0.0, 1.0),
            point(0.0, 0.0),
        ],
        vec![point(5.0, 5.0), point(8.0, 9.0)],
        vec![point(2.0, 2.0)],
    ];

    assert!((total_length(&lines) - 9.0).abs() < 0.0001);
}
