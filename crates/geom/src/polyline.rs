//! Flattened paths and arc length splitting.

use crate::{epsilon_for, Point, Transform};

use alloc::vec::Vec;
use num_traits::Float;

/// An ordered sequence of points joined by straight line segments.
///
/// A polyline containing a single point is legal. It represents a fragment
/// that has been entirely consumed.
pub type Polyline = Vec<Point>;

/// Euclidean length of the segment `from -> to`.
#[inline]
pub fn segment_length(from: Point, to: Point) -> f64 {
    (to - from).length()
}

/// Sum of the lengths of all segments of the polyline.
pub fn polyline_length(line: &[Point]) -> f64 {
    line.windows(2)
        .map(|segment| segment_length(segment[0], segment[1]))
        .sum()
}

/// Maps every point of the polyline through `transform`.
pub fn transformed(line: &[Point], transform: &Transform) -> Polyline {
    line.iter().map(|p| transform.transform_point(*p)).collect()
}

/// Splits a polyline at a given distance along it.
///
/// Returns `(before, after)`:
///
/// - If `offset <= 0`, nothing is split off: `before` is empty and `after`
///   is the whole line.
/// - If `offset` falls inside a segment, a point is interpolated there and
///   shared by the end of `before` and the start of `after`.
/// - If `offset` lands on a vertex, that vertex is shared by both halves,
///   unless it is the last one, in which case `after` is empty.
/// - If the line is shorter than `offset`, `before` is the whole line and
///   `after` is empty.
///
/// Landing on a vertex is detected with the tolerance [`epsilon_for`]
/// picks for the remaining offset (`1e-8` below 65536), so that error
/// accumulated while walking the segments does not create slivers. As a
/// consequence a segment within that tolerance of the remaining offset is
/// consumed whole, even when both are tiny.
pub fn split_at_length(line: &[Point], offset: f64) -> (Polyline, Polyline) {
    if offset <= 0.0 {
        return (Vec::new(), line.to_vec());
    }

    let mut remaining = offset;
    for (i, segment) in line.windows(2).enumerate() {
        let (from, to) = (segment[0], segment[1]);
        let length = segment_length(from, to);

        if (length - remaining).abs() <= epsilon_for(remaining) {
            let before = line[..i + 2].to_vec();
            let after = if i + 2 == line.len() {
                Vec::new()
            } else {
                line[i + 1..].to_vec()
            };

            return (before, after);
        }

        if length < remaining {
            remaining -= length;
            continue;
        }

        let split_point = from.lerp(to, remaining / length);

        let mut before = Vec::with_capacity(i + 2);
        before.extend_from_slice(&line[..i + 1]);
        before.push(split_point);

        let mut after = Vec::with_capacity(line.len() - i);
        after.push(split_point);
        after.extend_from_slice(&line[i + 1..]);

        return (before, after);
    }

    (line.to_vec(), Vec::new())
}

#[cfg(test)]
fn approx_eq(a: &[Point], b: &[Point]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(a, b)| (*a - *b).length() < 1e-9)
}

#[test]
fn split_at_zero_keeps_everything_after() {
    let line = [crate::point(0.0, 0.0), crate::point(1.0, 1.0)];

    let (before, after) = split_at_length(&line, 0.0);
    assert!(before.is_empty());
    assert_eq!(after, line);

    let (before, after) = split_at_length(&line, -3.0);
    assert!(before.is_empty());
    assert_eq!(after, line);
}

#[test]
fn split_at_total_length_consumes_everything() {
    use crate::point;

    let line = [point(0.0, 0.0), point(3.0, 0.0), point(3.0, 4.0), point(0.0, 4.0)];
    let total = polyline_length(&line);
    assert_eq!(total, 10.0);

    let (before, after) = split_at_length(&line, total);
    assert_eq!(before, line);
    assert!(after.is_empty());
}

#[test]
fn split_past_the_end() {
    use crate::point;

    let line = [point(0.0, 0.0), point(2.0, 0.0)];
    let (before, after) = split_at_length(&line, 7.5);
    assert_eq!(before, line);
    assert!(after.is_empty());
}

#[test]
fn split_inside_a_segment() {
    use crate::point;

    let line = [point(0.0, 0.0), point(4.0, 0.0), point(4.0, 3.0)];
    let (before, after) = split_at_length(&line, 5.0);

    assert!(approx_eq(&before, &[point(0.0, 0.0), point(4.0, 0.0), point(4.0, 1.0)]));
    assert!(approx_eq(&after, &[point(4.0, 1.0), point(4.0, 3.0)]));
}

#[test]
fn split_on_inner_vertex() {
    use crate::point;

    let line = [point(0.0, 0.0), point(4.0, 0.0), point(4.0, 3.0)];
    let (before, after) = split_at_length(&line, 4.0);

    assert_eq!(before, [point(0.0, 0.0), point(4.0, 0.0)]);
    assert_eq!(after, [point(4.0, 0.0), point(4.0, 3.0)]);
}

#[test]
fn split_on_vertex_with_accumulated_error() {
    use crate::point;

    // Subtracting 0.1 four times from 0.4 leaves a small positive residue
    // instead of zero, which must not produce a sliver past (0.4, 0.0).
    let line = [
        point(0.0, 0.0),
        point(0.1, 0.0),
        point(0.2, 0.0),
        point(0.3, 0.0),
        point(0.4, 0.0),
        point(1.0, 0.0),
    ];
    let (before, after) = split_at_length(&line, 0.4);

    assert_eq!(before, line[..5]);
    assert_eq!(after, [point(0.4, 0.0), point(1.0, 0.0)]);
}

#[test]
fn zero_length_segments_are_skipped() {
    use crate::point;

    let line = [point(1.0, 1.0), point(1.0, 1.0), point(1.0, 3.0)];
    let (before, after) = split_at_length(&line, 1.0);

    assert!(approx_eq(&before, &[point(1.0, 1.0), point(1.0, 1.0), point(1.0, 2.0)]));
    assert!(approx_eq(&after, &[point(1.0, 2.0), point(1.0, 3.0)]));
}

#[test]
fn repeated_splits_reconstruct_the_line() {
    use crate::point;

    let line = alloc::vec![
        point(0.0, 0.0),
        point(5.0, 0.0),
        point(5.0, 5.0),
        point(2.0, 9.0),
        point(-1.0, 9.0),
    ];

    let mut rest = line.clone();
    let mut pieces = Vec::new();
    while !rest.is_empty() {
        let (before, after) = split_at_length(&rest, 1.75);
        pieces.push(before);
        rest = after;
    }

    // Consecutive pieces share exactly one boundary point.
    let mut rebuilt: Polyline = pieces[0].clone();
    for piece in &pieces[1..] {
        assert_eq!(rebuilt.last(), piece.first());
        rebuilt.extend_from_slice(&piece[1..]);
    }

    // Dropping the interpolated points gives back the original vertices.
    let original_vertices: Vec<Point> = rebuilt
        .iter()
        .copied()
        .filter(|p| line.contains(p))
        .collect();
    assert_eq!(original_vertices, line);
    assert!((polyline_length(&rebuilt) - polyline_length(&line)).abs() < 1e-9);
}

#[test]
fn transformed_maps_every_point() {
    use crate::point;

    let line = [point(0.0, 0.0), point(1.0, 2.0)];
    let t = Transform::scale(2.0, 3.0).then_translate(crate::vector(1.0, 1.0));

    assert_eq!(transformed(&line, &t), [point(1.0, 1.0), point(3.0, 7.0)]);
}
