//! Pens, colors and the incrementally updated style state.

use crate::error::{ExtractionResult, UnsupportedFeature};
use crate::geom::Transform;

/// A color with 8 bits per channel, as provided by the drawing source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = rgba8(0, 0, 0, 255);
}

/// Shorthand for `Rgba8 { r, g, b, a }`.
#[inline]
pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Rgba8 {
    Rgba8 { r, g, b, a }
}

/// A color with normalized channels in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    #[inline]
    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// How the stroke of a pen is filled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Brush {
    /// Nothing is drawn.
    NoBrush,
    /// A single flat color.
    Solid(Rgba8),
    /// Gradients, textures and hatch patterns. The geometry is still
    /// extracted but its color cannot be represented.
    Pattern,
}

/// The line style of a pen.
///
/// The predefined dashed styles come with a standard dash pattern, see
/// [`PenStyle::dash_pattern`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PenStyle {
    NoPen,
    SolidLine,
    DashLine,
    DotLine,
    DashDotLine,
    DashDotDotLine,
    CustomDashLine,
}

impl PenStyle {
    /// The dash pattern associated with a predefined style, in multiples of
    /// the pen width.
    ///
    /// Solid and custom styles return an empty pattern.
    pub fn dash_pattern(self) -> &'static [f64] {
        match self {
            PenStyle::DashLine => &[4.0, 2.0],
            PenStyle::DotLine => &[1.0, 2.0],
            PenStyle::DashDotLine => &[4.0, 2.0, 1.0, 2.0],
            PenStyle::DashDotDotLine => &[4.0, 2.0, 1.0, 2.0, 1.0, 2.0],
            PenStyle::NoPen | PenStyle::SolidLine | PenStyle::CustomDashLine => &[],
        }
    }
}

/// Stroke parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct Pen {
    pub style: PenStyle,
    pub brush: Brush,

    /// Stroke width. Zero stands for the default width, see
    /// [`Pen::normalized_width`].
    ///
    /// Default value: `Pen::DEFAULT_WIDTH`.
    pub width: f64,

    /// If true, the width is expressed in output device units and is not
    /// affected by the scale of the current transform.
    ///
    /// Default value: `false`.
    pub cosmetic: bool,

    /// Alternating "on" and "off" lengths, in multiples of the pen width.
    ///
    /// Default value: empty (solid line).
    pub dash_pattern: Vec<f64>,

    /// Phase into the dash pattern, in multiples of the pen width.
    ///
    /// Default value: `0.0`.
    pub dash_offset: f64,
}

impl Pen {
    pub const DEFAULT_WIDTH: f64 = 1.0;

    /// A solid black pen of default width.
    pub fn new() -> Self {
        Pen {
            style: PenStyle::SolidLine,
            brush: Brush::Solid(Rgba8::BLACK),
            width: Self::DEFAULT_WIDTH,
            cosmetic: false,
            dash_pattern: Vec::new(),
            dash_offset: 0.0,
        }
    }

    /// A pen that does not draw anything.
    pub fn none() -> Self {
        Pen::new().with_style(PenStyle::NoPen)
    }

    /// A solid pen of the given color.
    pub fn solid(color: Rgba8) -> Self {
        Pen::new().with_brush(Brush::Solid(color))
    }

    /// Sets the style and the matching predefined dash pattern.
    pub fn with_style(mut self, style: PenStyle) -> Self {
        self.style = style;
        if style != PenStyle::CustomDashLine {
            self.dash_pattern = style.dash_pattern().to_vec();
        }
        self
    }

    #[inline]
    pub fn with_brush(mut self, brush: Brush) -> Self {
        self.brush = brush;
        self
    }

    #[inline]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[inline]
    pub fn with_cosmetic(mut self, cosmetic: bool) -> Self {
        self.cosmetic = cosmetic;
        self
    }

    /// Sets a custom dash pattern (in multiples of the pen width).
    pub fn with_dash_pattern(mut self, pattern: &[f64]) -> Self {
        self.style = PenStyle::CustomDashLine;
        self.dash_pattern = pattern.to_vec();
        self
    }

    #[inline]
    pub fn with_dash_offset(mut self, offset: f64) -> Self {
        self.dash_offset = offset;
        self
    }

    /// Whether anything is drawn with this pen.
    pub fn is_visible(&self) -> bool {
        self.style != PenStyle::NoPen && self.brush != Brush::NoBrush
    }

    /// The width to use for all computations.
    ///
    /// A width of zero (or a negative or non-finite one) means "default
    /// width" and is replaced with `Pen::DEFAULT_WIDTH`.
    pub fn normalized_width(&self) -> f64 {
        if self.width > 0.0 && self.width.is_finite() {
            self.width
        } else {
            Self::DEFAULT_WIDTH
        }
    }

    /// The normalized stroke color, with `opacity` folded into the alpha
    /// channel.
    ///
    /// Returns `None` when the brush is not a solid color.
    pub fn resolve_color(&self, opacity: f64) -> Option<Color> {
        match self.brush {
            Brush::Solid(c) => Some(Color {
                r: f64::from(c.r) / 255.0,
                g: f64::from(c.g) / 255.0,
                b: f64::from(c.b) / 255.0,
                a: opacity * (f64::from(c.a) / 255.0),
            }),
            Brush::NoBrush | Brush::Pattern => None,
        }
    }
}

impl Default for Pen {
    fn default() -> Self {
        Pen::new()
    }
}

/// How newly drawn geometry is clipped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ClipOperation {
    NoClip,
    ReplaceClip,
    IntersectClip,
}

/// How newly drawn geometry is blended with existing content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CompositionMode {
    SourceOver,
    DestinationOver,
    Clear,
    Source,
    Destination,
    SourceIn,
    DestinationIn,
    SourceOut,
    DestinationOut,
    SourceAtop,
    DestinationAtop,
    Xor,
    Plus,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    Difference,
    Exclusion,
}

/// The style parameters in effect for the next draw operations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StyleState {
    pub transform: Transform,
    pub pen: Pen,
    pub opacity: f64,
    pub clip: ClipOperation,
    pub composition_mode: CompositionMode,
}

impl StyleState {
    pub fn new() -> Self {
        StyleState {
            transform: Transform::identity(),
            pen: Pen::new(),
            opacity: 1.0,
            clip: ClipOperation::NoClip,
            composition_mode: CompositionMode::SourceOver,
        }
    }
}

impl Default for StyleState {
    fn default() -> Self {
        StyleState::new()
    }
}

/// A partial update of the style state.
///
/// Only the fields that are set (the "dirty" ones) are applied, the others
/// keep their current value.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct StateUpdate {
    pub transform: Option<Transform>,
    pub pen: Option<Pen>,
    pub opacity: Option<f64>,
    pub clip: Option<ClipOperation>,
    pub composition_mode: Option<CompositionMode>,
}

impl StateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    #[inline]
    pub fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = Some(pen);
        self
    }

    #[inline]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[inline]
    pub fn with_clip(mut self, clip: ClipOperation) -> Self {
        self.clip = Some(clip);
        self
    }

    #[inline]
    pub fn with_composition_mode(mut self, mode: CompositionMode) -> Self {
        self.composition_mode = Some(mode);
        self
    }

    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.transform.is_none()
            && self.pen.is_none()
            && self.opacity.is_none()
            && self.clip.is_none()
            && self.composition_mode.is_none()
    }
}

/// Owns the current style state and applies partial updates to it.
#[derive(Clone, Debug, Default)]
pub struct StyleTracker {
    state: StyleState,
}

impl StyleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> &StyleState {
        &self.state
    }

    /// Applies the fields set in `update`.
    ///
    /// Clipping and non source-over composition cannot be expressed as
    /// plain line geometry: requesting them is a fatal error. The state is
    /// left untouched when an update is rejected.
    pub fn apply(&mut self, update: &StateUpdate) -> ExtractionResult {
        if let Some(clip) = update.clip {
            if clip != ClipOperation::NoClip {
                return Err(UnsupportedFeature::Clip(clip).into());
            }
        }

        if let Some(mode) = update.composition_mode {
            if mode != CompositionMode::SourceOver {
                return Err(UnsupportedFeature::CompositionMode(mode).into());
            }
        }

        if let Some(transform) = update.transform {
            self.state.transform = transform;
        }
        if let Some(pen) = &update.pen {
            self.state.pen = pen.clone();
        }
        if let Some(opacity) = update.opacity {
            self.state.opacity = opacity;
        }
        if let Some(clip) = update.clip {
            self.state.clip = clip;
        }
        if let Some(mode) = update.composition_mode {
            self.state.composition_mode = mode;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ExtractionError;

    #[test]
    fn partial_updates_only_touch_dirty_fields() {
        let mut tracker = StyleTracker::new();
        let pen = Pen::solid(rgba8(255, 0, 0, 255)).with_width(3.0);

        tracker
            .apply(&StateUpdate::new().with_pen(pen.clone()))
            .unwrap();
        tracker
            .apply(&StateUpdate::new().with_opacity(0.5))
            .unwrap();

        let state = tracker.state();
        assert_eq!(state.pen, pen);
        assert_eq!(state.opacity, 0.5);
        assert_eq!(state.transform, Transform::identity());

        let scale = Transform::scale(2.0, 2.0);
        tracker
            .apply(&StateUpdate::new().with_transform(scale))
            .unwrap();
        assert_eq!(tracker.state().transform, scale);
        assert_eq!(tracker.state().pen, pen);
    }

    #[test]
    fn clipping_is_rejected() {
        let mut tracker = StyleTracker::new();

        tracker
            .apply(&StateUpdate::new().with_clip(ClipOperation::NoClip))
            .unwrap();

        let err = tracker
            .apply(
                &StateUpdate::new()
                    .with_opacity(0.25)
                    .with_clip(ClipOperation::IntersectClip),
            )
            .unwrap_err();

        assert_eq!(
            err,
            ExtractionError::UnsupportedFeature(UnsupportedFeature::Clip(
                ClipOperation::IntersectClip
            ))
        );
        assert_eq!(tracker.state().opacity, 1.0);
    }

    #[test]
    fn composition_modes_other_than_source_over_are_rejected() {
        let mut tracker = StyleTracker::new();

        tracker
            .apply(&StateUpdate::new().with_composition_mode(CompositionMode::SourceOver))
            .unwrap();

        match tracker.apply(&StateUpdate::new().with_composition_mode(CompositionMode::Multiply)) {
            Err(ExtractionError::UnsupportedFeature(feature)) => {
                assert_eq!(feature.name(), "compositionMode");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn width_normalization() {
        assert_eq!(Pen::new().with_width(0.0).normalized_width(), 1.0);
        assert_eq!(Pen::new().with_width(-2.0).normalized_width(), 1.0);
        assert_eq!(Pen::new().with_width(f64::NAN).normalized_width(), 1.0);
        assert_eq!(Pen::new().with_width(2.5).normalized_width(), 2.5);
    }

    #[test]
    fn color_resolution() {
        let pen = Pen::solid(rgba8(255, 0, 51, 255));
        assert_eq!(
            pen.resolve_color(0.5),
            Some(Color { r: 1.0, g: 0.0, b: 0.2, a: 0.5 })
        );

        let pattern = Pen::new().with_brush(Brush::Pattern);
        assert!(pattern.is_visible());
        assert_eq!(pattern.resolve_color(1.0), None);
    }

    #[test]
    fn visibility() {
        assert!(Pen::new().is_visible());
        assert!(!Pen::none().is_visible());
        assert!(!Pen::new().with_brush(Brush::NoBrush).is_visible());
    }

    #[test]
    fn predefined_styles_set_their_pattern() {
        let pen = Pen::new().with_style(PenStyle::DashDotLine);
        assert_eq!(pen.dash_pattern, vec![4.0, 2.0, 1.0, 2.0]);

        let pen = pen.with_style(PenStyle::SolidLine);
        assert!(pen.dash_pattern.is_empty());

        let pen = Pen::new().with_dash_pattern(&[3.0, 1.0]);
        assert_eq!(pen.style, PenStyle::CustomDashLine);
        assert_eq!(pen.with_style(PenStyle::CustomDashLine).dash_pattern, vec![3.0, 1.0]);
    }
}
