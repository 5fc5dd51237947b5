//! The extracted line geometry and its conversion to physical units.

use crate::geom::Polyline;
use crate::style::Color;

/// A stroked polyline, the unit of output of the extractor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Outline {
    /// The stroke color, or `None` if it could not be resolved to a solid
    /// color.
    pub color: Option<Color>,
    /// The stroke width, in the same unit as the points.
    pub width: f64,
    /// At least one point.
    pub points: Polyline,
}

impl Outline {
    /// Returns a copy with all coordinates and the width divided by
    /// `density`.
    pub fn rescaled(&self, density: f64) -> Self {
        Outline {
            color: self.color,
            width: self.width / density,
            points: self.points.iter().map(|p| *p / density).collect(),
        }
    }
}

/// Converts outlines from pixels to physical units.
///
/// `density` is the number of pixels per physical unit (for example pixels
/// per millimeter) and must be strictly positive.
pub fn rescale(outlines: &[Outline], density: f64) -> Vec<Outline> {
    debug_assert!(density > 0.0);

    outlines
        .iter()
        .map(|outline| outline.rescaled(density))
        .collect()
}

#[test]
fn rescale_divides_points_and_width() {
    use crate::geom::point;

    let outlines = vec![
        Outline {
            color: None,
            width: 2.0,
            points: vec![point(0.0, 0.0), point(4.0, 0.0)],
        },
        Outline {
            color: Some(Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 }),
            width: 1.0,
            points: vec![point(6.0, 10.0)],
        },
    ];

    let mm = rescale(&outlines, 5.0);

    assert_eq!(mm.len(), 2);
    assert_eq!(mm[0].width, 0.4);
    assert_eq!(mm[0].points, vec![point(0.0, 0.0), point(0.8, 0.0)]);
    assert_eq!(mm[1].color, outlines[1].color);
    assert_eq!(mm[1].width, 0.2);
    assert_eq!(mm[1].points, vec![point(1.2, 2.0)]);
}
