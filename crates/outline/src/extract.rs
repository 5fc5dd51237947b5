//! Turning stroked paths into outlines.
//!
//! # Pen space
//!
//! Dash lengths are defined along the path as it was described, before the
//! current transform was applied. The sub-paths received from the backend
//! are already transformed, so the extractor maps them back through the
//! inverse transform ("pen space"), cuts the dashes there and maps the
//! fragments forward again.
//!
//! Cosmetic pens are defined in device units: they bypass pen space and
//! keep their width regardless of the transform.
//!
//! # Stroke width
//!
//! The width of non-cosmetic pens is scaled by the length of a unit
//! diagonal segment under the current transform. This is exact for
//! similarity transforms (uniform scale, rotation, translation). Under
//! anisotropic scale or shear a single width cannot describe the stroke
//! and the result is an approximation.

use crate::algorithms::{dash_polyline, Diagnostic};
use crate::error::ExtractionResult;
use crate::event::PaintSink;
use crate::geom::{point, transformed, vector, Box2D, Polyline, Transform};
use crate::outline::Outline;
use crate::style::{Color, StateUpdate, StyleState, StyleTracker};

use core::f64::consts::FRAC_1_SQRT_2;

/// Stroke parameters resolved from the style state for one path.
#[derive(Clone, Debug, PartialEq)]
struct Stroke {
    color: Option<Color>,
    width: f64,
    dash_pattern: Vec<f64>,
    dash_offset: f64,
    to_pen_space: Transform,
    from_pen_space: Transform,
}

/// Returns the factor by which the current transform scales stroke widths.
fn width_scale(transform: &Transform) -> f64 {
    transform
        .transform_vector(vector(FRAC_1_SQRT_2, FRAC_1_SQRT_2))
        .length()
}

impl Stroke {
    /// Returns `None` if the pen draws nothing.
    fn resolve(state: &StyleState, diagnostics: &mut Vec<Diagnostic>) -> Option<Self> {
        let pen = &state.pen;
        if !pen.is_visible() {
            return None;
        }

        let color = pen.resolve_color(state.opacity);

        // Dash lengths are expressed in multiples of the pen width.
        let pen_width = pen.normalized_width();
        let dash_pattern: Vec<f64> = pen.dash_pattern.iter().map(|l| l * pen_width).collect();
        let dash_offset = pen.dash_offset * pen_width;

        let (mut from_pen_space, mut to_pen_space) = match state.transform.inverse() {
            Some(inverse) => (state.transform, inverse),
            None => {
                if !dash_pattern.is_empty() {
                    diagnostics.push(Diagnostic::SingularTransform);
                }
                (Transform::identity(), Transform::identity())
            }
        };

        // Zero when the transform collapses everything to a point.
        let mut width = pen_width * width_scale(&state.transform);

        if pen.cosmetic {
            from_pen_space = Transform::identity();
            to_pen_space = Transform::identity();
            width = pen_width;
        }

        Some(Stroke {
            color,
            width,
            dash_pattern,
            dash_offset,
            to_pen_space,
            from_pen_space,
        })
    }
}

/// Collects the outlines of everything drawn, in drawing order.
///
/// The extractor is driven through the [`PaintSink`] interface, usually by
/// [`replay`](crate::replay)ing an event stream into it. Its outlines are
/// expressed in the backend's pixel units, see [`rescale`](crate::rescale)
/// to convert them.
///
/// Non-fatal problems are both logged and recorded, see
/// [`OutlineExtractor::diagnostics`].
#[derive(Clone, Debug, Default)]
pub struct OutlineExtractor {
    style: StyleTracker,
    outlines: Vec<Outline>,
    diagnostics: Vec<Diagnostic>,
}

impl OutlineExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The style state that applies to the next draw operations.
    #[inline]
    pub fn style(&self) -> &StyleState {
        self.style.state()
    }

    /// The outlines extracted so far, in pixel units.
    #[inline]
    pub fn outlines(&self) -> &[Outline] {
        &self.outlines
    }

    /// The non-fatal diagnostics raised so far.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the extractor, returning its outlines and diagnostics.
    pub fn finish(self) -> (Vec<Outline>, Vec<Diagnostic>) {
        (self.outlines, self.diagnostics)
    }

    /// Applies a partial style update.
    pub fn update_state(&mut self, update: &StateUpdate) -> ExtractionResult {
        log::debug!("style update {:?}", update);
        self.style.apply(update)
    }

    /// Extracts the outlines of a stroked path with the current style.
    ///
    /// `subpaths` are flattened and expressed in the coordinate space of
    /// the current transform.
    pub fn extract_path(&mut self, subpaths: &[Polyline]) {
        let mut diagnostics = Vec::new();

        let stroke = match Stroke::resolve(self.style.state(), &mut diagnostics) {
            Some(stroke) => stroke,
            None => return,
        };

        let first = self.outlines.len();
        for subpath in subpaths.iter().filter(|subpath| !subpath.is_empty()) {
            let line = transformed(subpath, &stroke.to_pen_space);
            let dashes = dash_polyline(
                &line,
                &stroke.dash_pattern,
                stroke.dash_offset,
                &mut diagnostics,
            );

            self.outlines.extend(dashes.iter().map(|dash| Outline {
                color: stroke.color,
                width: stroke.width,
                points: transformed(dash, &stroke.from_pen_space),
            }));
        }

        log::trace!(
            "{} sub-paths -> {} outlines",
            subpaths.len(),
            self.outlines.len() - first
        );

        // Each sub-path reports the same problems, keep one of each per path.
        let mut reported: Vec<Diagnostic> = Vec::with_capacity(diagnostics.len());
        for diagnostic in diagnostics {
            if reported.contains(&diagnostic) {
                continue;
            }
            log::warn!("{}", diagnostic);
            reported.push(diagnostic);
        }
        self.diagnostics.extend(reported);
    }

    /// Extracts the outline of the target rectangle of an image.
    ///
    /// The rectangle is in user space and goes through the current
    /// transform like any other geometry.
    pub fn extract_image(&mut self, target: &Box2D) {
        let transform = self.style.state().transform;
        let corners = [
            target.min,
            point(target.max.x, target.min.y),
            target.max,
            point(target.min.x, target.max.y),
            target.min,
        ];

        let outline = transformed(&corners, &transform);
        self.extract_path(&[outline]);
    }
}

impl PaintSink for OutlineExtractor {
    fn on_state_update(&mut self, update: &StateUpdate) -> ExtractionResult {
        self.update_state(update)
    }

    fn on_path(&mut self, subpaths: &[Polyline]) -> ExtractionResult {
        self.extract_path(subpaths);
        Ok(())
    }

    fn on_image(&mut self, target: &Box2D) -> ExtractionResult {
        self.extract_image(target);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geom::Point;
    use crate::style::{rgba8, Brush, ClipOperation, Pen};

    fn assert_points_eq(actual: &[Point], expected: &[Point]) {
        assert_eq!(actual.len(), expected.len(), "{:?} != {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((*a - *e).length() < 1e-9, "{:?} != {:?}", actual, expected);
        }
    }

    fn extractor_with(pen: Pen, transform: Transform) -> OutlineExtractor {
        let mut extractor = OutlineExtractor::new();
        extractor
            .update_state(&StateUpdate::new().with_pen(pen).with_transform(transform))
            .unwrap();
        extractor
    }

    #[test]
    fn solid_stroke() {
        let pen = Pen::solid(rgba8(0, 0, 255, 255)).with_width(3.0);
        let mut extractor = extractor_with(pen, Transform::identity());

        extractor.extract_path(&[
            vec![point(0.0, 0.0), point(5.0, 0.0), point(5.0, 5.0)],
            vec![point(10.0, 10.0), point(20.0, 10.0)],
        ]);

        let outlines = extractor.outlines();
        assert_eq!(outlines.len(), 2);
        assert_eq!(outlines[0].width, 3.0);
        assert_eq!(
            outlines[0].color,
            Some(Color { r: 0.0, g: 0.0, b: 1.0, a: 1.0 })
        );
        assert_eq!(
            outlines[0].points,
            vec![point(0.0, 0.0), point(5.0, 0.0), point(5.0, 5.0)]
        );
        assert_eq!(outlines[1].points, vec![point(10.0, 10.0), point(20.0, 10.0)]);
        assert!(extractor.diagnostics().is_empty());
    }

    #[test]
    fn invisible_pens_produce_nothing() {
        for pen in vec![Pen::none(), Pen::new().with_brush(Brush::NoBrush)] {
            let mut extractor = extractor_with(pen, Transform::identity());
            extractor.extract_path(&[vec![point(0.0, 0.0), point(5.0, 0.0)]]);
            assert!(extractor.outlines().is_empty());
        }
    }

    #[test]
    fn unresolved_color_still_produces_geometry() {
        let pen = Pen::new().with_brush(Brush::Pattern);
        let mut extractor = extractor_with(pen, Transform::identity());
        extractor.extract_path(&[vec![point(0.0, 0.0), point(5.0, 0.0)]]);

        assert_eq!(extractor.outlines().len(), 1);
        assert_eq!(extractor.outlines()[0].color, None);
    }

    #[test]
    fn opacity_is_folded_into_alpha() {
        let mut extractor = extractor_with(Pen::solid(rgba8(255, 255, 255, 255)), Transform::identity());
        extractor
            .update_state(&StateUpdate::new().with_opacity(0.25))
            .unwrap();
        extractor.extract_path(&[vec![point(0.0, 0.0), point(5.0, 0.0)]]);

        assert_eq!(
            extractor.outlines()[0].color,
            Some(Color { r: 1.0, g: 1.0, b: 1.0, a: 0.25 })
        );
    }

    #[test]
    fn zero_width_pen_uses_default_width() {
        let pen = Pen::new().with_width(0.0).with_dash_pattern(&[2.0, 2.0]);
        let mut extractor = extractor_with(pen, Transform::identity());
        extractor.extract_path(&[vec![point(0.0, 0.0), point(8.0, 0.0)]]);

        let outlines = extractor.outlines();
        assert_eq!(outlines.len(), 2);
        assert_eq!(outlines[0].width, 1.0);
        assert_points_eq(&outlines[0].points, &[point(0.0, 0.0), point(2.0, 0.0)]);
        assert_points_eq(&outlines[1].points, &[point(4.0, 0.0), point(6.0, 0.0)]);
    }

    #[test]
    fn dashes_scale_with_pen_width() {
        let pen = Pen::new().with_width(2.0).with_dash_pattern(&[2.0, 1.0]).with_dash_offset(1.0);
        let mut extractor = extractor_with(pen, Transform::identity());
        extractor.extract_path(&[vec![point(0.0, 0.0), point(10.0, 0.0)]]);

        // Pattern [4, 2], starting 2 units in.
        let outlines = extractor.outlines();
        assert_eq!(outlines.len(), 2);
        assert_points_eq(&outlines[0].points, &[point(0.0, 0.0), point(2.0, 0.0)]);
        assert_points_eq(&outlines[1].points, &[point(4.0, 0.0), point(8.0, 0.0)]);
    }

    #[test]
    fn dashes_are_measured_in_pen_space() {
        // Scaled by 2 and translated: a 10 unit line in user space is 20
        // pixels long, with 2 pixel dashes for a [1, 1] pattern.
        let transform = Transform::scale(2.0, 2.0).then_translate(vector(100.0, 0.0));
        let pen = Pen::new().with_dash_pattern(&[1.0, 1.0]);
        let mut extractor = extractor_with(pen, transform);

        extractor.extract_path(&[vec![point(100.0, 0.0), point(120.0, 0.0)]]);

        let outlines = extractor.outlines();
        assert_eq!(outlines.len(), 5);
        assert_points_eq(&outlines[0].points, &[point(100.0, 0.0), point(102.0, 0.0)]);
        assert_points_eq(&outlines[4].points, &[point(116.0, 0.0), point(118.0, 0.0)]);
        for outline in outlines {
            assert!((outline.width - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn rotation_preserves_width() {
        let transform = Transform::rotation(crate::geom::euclid::Angle::degrees(30.0));
        let mut extractor = extractor_with(Pen::new().with_width(4.0), transform);
        extractor.extract_path(&[vec![point(0.0, 0.0), point(1.0, 1.0)]]);

        assert!((extractor.outlines()[0].width - 4.0).abs() < 1e-9);
    }

    #[test]
    fn anisotropic_scale_approximates_width() {
        let mut extractor = extractor_with(Pen::new(), Transform::scale(3.0, 1.0));
        extractor.extract_path(&[vec![point(0.0, 0.0), point(1.0, 1.0)]]);

        // |(3 / sqrt(2), 1 / sqrt(2))| = sqrt(5)
        assert!((extractor.outlines()[0].width - 5.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn cosmetic_pens_ignore_the_transform() {
        let pen = Pen::new()
            .with_width(2.0)
            .with_cosmetic(true)
            .with_dash_pattern(&[1.0, 1.0]);
        let mut extractor = extractor_with(pen, Transform::scale(10.0, 10.0));

        extractor.extract_path(&[vec![point(0.0, 0.0), point(8.0, 0.0)]]);

        // Dashes of 2 device pixels, not 20.
        let outlines = extractor.outlines();
        assert_eq!(outlines.len(), 2);
        assert_eq!(outlines[0].width, 2.0);
        assert_points_eq(&outlines[0].points, &[point(0.0, 0.0), point(2.0, 0.0)]);
        assert_points_eq(&outlines[1].points, &[point(4.0, 0.0), point(6.0, 0.0)]);
    }

    #[test]
    fn singular_transform_falls_back_to_identity() {
        let singular = Transform::scale(1.0, 0.0);
        let pen = Pen::new().with_dash_pattern(&[2.0, 2.0]);
        let mut extractor = extractor_with(pen, singular);

        extractor.extract_path(&[
            vec![point(0.0, 0.0), point(6.0, 0.0)],
            vec![point(0.0, 0.0), point(3.0, 0.0)],
        ]);

        let outlines = extractor.outlines();
        assert_eq!(outlines.len(), 3);
        assert_points_eq(&outlines[0].points, &[point(0.0, 0.0), point(2.0, 0.0)]);
        assert_points_eq(&outlines[1].points, &[point(4.0, 0.0), point(6.0, 0.0)]);
        assert_points_eq(&outlines[2].points, &[point(0.0, 0.0), point(2.0, 0.0)]);
        assert_eq!(extractor.diagnostics(), &[Diagnostic::SingularTransform]);
    }

    #[test]
    fn singular_transform_without_dashes_is_silent() {
        let mut extractor = extractor_with(Pen::new(), Transform::scale(0.0, 0.0));
        extractor.extract_path(&[vec![point(0.0, 0.0), point(0.0, 0.0)]]);

        let outlines = extractor.outlines();
        assert_eq!(outlines.len(), 1);
        assert_eq!(outlines[0].width, 0.0);
        assert!(extractor.diagnostics().is_empty());
    }

    #[test]
    fn odd_dash_pattern_is_reported_once_per_path() {
        let pen = Pen::new().with_dash_pattern(&[1.0, 1.0, 5.0]);
        let mut extractor = extractor_with(pen, Transform::identity());

        extractor.extract_path(&[
            vec![point(0.0, 0.0), point(4.0, 0.0)],
            vec![point(0.0, 1.0), point(4.0, 1.0)],
        ]);

        assert_eq!(extractor.outlines().len(), 4);
        assert_eq!(
            extractor.diagnostics(),
            &[Diagnostic::OddDashPattern { dropped: 5.0 }]
        );
    }

    #[test]
    fn interleaved_diagnostics_are_reported_once_per_path() {
        let pen = Pen::new().with_dash_pattern(&[0.0, 0.0, 5.0]);
        let mut extractor = extractor_with(pen, Transform::identity());

        extractor.extract_path(&[
            vec![point(0.0, 0.0), point(4.0, 0.0)],
            vec![point(0.0, 1.0), point(4.0, 1.0)],
        ]);

        // Both sub-paths are drawn solid.
        assert_eq!(extractor.outlines().len(), 2);
        assert_eq!(
            extractor.diagnostics(),
            &[
                Diagnostic::OddDashPattern { dropped: 5.0 },
                Diagnostic::DegenerateDashPattern,
            ]
        );

        // The next path reports them again.
        extractor.extract_path(&[vec![point(0.0, 2.0), point(4.0, 2.0)]]);
        assert_eq!(extractor.diagnostics().len(), 4);
    }

    #[test]
    fn empty_subpaths_are_ignored() {
        let mut extractor = extractor_with(Pen::new(), Transform::identity());
        extractor.extract_path(&[Vec::new(), vec![point(1.0, 1.0)]]);

        let outlines = extractor.outlines();
        assert_eq!(outlines.len(), 1);
        assert_eq!(outlines[0].points, vec![point(1.0, 1.0)]);
    }

    #[test]
    fn image_targets_are_outlined_as_rectangles() {
        let translation = Transform::translation(10.0, 20.0);
        let mut extractor = extractor_with(Pen::new(), translation);

        extractor.extract_image(&Box2D::new(point(0.0, 0.0), point(4.0, 3.0)));

        let outlines = extractor.outlines();
        assert_eq!(outlines.len(), 1);
        assert_eq!(
            outlines[0].points,
            vec![
                point(10.0, 20.0),
                point(14.0, 20.0),
                point(14.0, 23.0),
                point(10.0, 23.0),
                point(10.0, 20.0),
            ]
        );
    }

    #[test]
    fn rejected_updates_surface_through_the_sink() {
        let mut extractor = OutlineExtractor::new();
        let sink: &mut dyn PaintSink = &mut extractor;

        assert!(sink
            .on_state_update(&StateUpdate::new().with_clip(ClipOperation::ReplaceClip))
            .is_err());
        assert_eq!(extractor.style().clip, ClipOperation::NoClip);
    }

    #[test]
    fn width_scale_of_uniform_scale() {
        assert!((width_scale(&Transform::scale(3.0, 3.0)) - 3.0).abs() < 1e-12);
        assert!((width_scale(&Transform::identity()) - 1.0).abs() < 1e-12);
    }
}
