//! The virtual output device: physical page size, resolution and metrics.

use crate::algorithms::Diagnostic;
use crate::error::ExtractionResult;
use crate::event::{replay, Event, PaintSink};
use crate::extract::OutlineExtractor;
use crate::geom::{Box2D, Polyline, Size};
use crate::outline::{rescale, Outline};
use crate::style::StateUpdate;

use std::borrow::Borrow;

const MM_PER_INCH: f64 = 25.4;

/// Parameters of the output device.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct OutlineOptions {
    /// Number of backend pixels per millimeter. Must be strictly positive.
    ///
    /// Default value: `OutlineOptions::DEFAULT_PIXELS_PER_MM`.
    pub pixels_per_mm: f64,

    /// Page size in millimeters, overriding the size declared by the
    /// document.
    ///
    /// Default value: `None`.
    pub page_size: Option<Size>,
}

impl OutlineOptions {
    pub const DEFAULT_PIXELS_PER_MM: f64 = 5.0;

    pub const DEFAULT: Self = OutlineOptions {
        pixels_per_mm: Self::DEFAULT_PIXELS_PER_MM,
        page_size: None,
    };

    #[inline]
    pub fn pixels_per_mm(pixels_per_mm: f64) -> Self {
        Self::DEFAULT.with_pixels_per_mm(pixels_per_mm)
    }

    #[inline]
    pub const fn with_pixels_per_mm(mut self, pixels_per_mm: f64) -> Self {
        self.pixels_per_mm = pixels_per_mm;
        self
    }

    #[inline]
    pub const fn with_page_size(mut self, size: Size) -> Self {
        self.page_size = Some(size);
        self
    }

    /// The page size to use: the explicit override if there is one,
    /// otherwise the one declared by the document.
    ///
    /// `document_size` is only evaluated when needed.
    pub fn resolve_page_size<F>(&self, document_size: F) -> Size
    where
        F: FnOnce() -> Size,
    {
        self.page_size.unwrap_or_else(document_size)
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Properties of the output device that rendering backends may query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeviceMetric {
    /// Page width in pixels.
    Width,
    /// Page height in pixels.
    Height,
    WidthMm,
    HeightMm,
    NumColors,
    /// Bit depth.
    Depth,
    DpiX,
    DpiY,
    PhysicalDpiX,
    PhysicalDpiY,
    DevicePixelRatio,
}

/// A page that records outlines instead of pixels.
///
/// Drawing happens in pixels (`pixels_per_mm` per millimeter); the
/// [`outlines`](OutlineDevice::outlines) are returned in millimeters.
#[derive(Clone, Debug)]
pub struct OutlineDevice {
    options: OutlineOptions,
    page_size: Size,
    extractor: OutlineExtractor,
}

impl OutlineDevice {
    /// Creates a device for a page of `page_size` millimeters.
    pub fn new(page_size: Size, options: &OutlineOptions) -> Self {
        debug_assert!(options.pixels_per_mm > 0.0);
        OutlineDevice {
            options: *options,
            page_size,
            extractor: OutlineExtractor::new(),
        }
    }

    #[inline]
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Page size in millimeters.
    #[inline]
    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn metric(&self, metric: DeviceMetric) -> f64 {
        let ppmm = self.options.pixels_per_mm;
        match metric {
            DeviceMetric::Width => self.page_size.width * ppmm,
            DeviceMetric::Height => self.page_size.height * ppmm,
            DeviceMetric::WidthMm => self.page_size.width,
            DeviceMetric::HeightMm => self.page_size.height,
            DeviceMetric::NumColors => 2.0,
            DeviceMetric::Depth => 1.0,
            DeviceMetric::DpiX
            | DeviceMetric::DpiY
            | DeviceMetric::PhysicalDpiX
            | DeviceMetric::PhysicalDpiY => MM_PER_INCH * ppmm,
            DeviceMetric::DevicePixelRatio => 1.0,
        }
    }

    /// Draws a sequence of events on the page.
    pub fn replay<Iter>(&mut self, events: Iter) -> ExtractionResult
    where
        Iter: IntoIterator,
        Iter::Item: Borrow<Event>,
    {
        replay(events, &mut self.extractor)
    }

    /// Everything drawn so far, in millimeters.
    pub fn outlines(&self) -> Vec<Outline> {
        rescale(self.extractor.outlines(), self.options.pixels_per_mm)
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.extractor.diagnostics()
    }
}

impl PaintSink for OutlineDevice {
    fn on_state_update(&mut self, update: &StateUpdate) -> ExtractionResult {
        self.extractor.on_state_update(update)
    }

    fn on_path(&mut self, subpaths: &[Polyline]) -> ExtractionResult {
        self.extractor.on_path(subpaths)
    }

    fn on_image(&mut self, target: &Box2D) -> ExtractionResult {
        self.extractor.on_image(target)
    }
}
