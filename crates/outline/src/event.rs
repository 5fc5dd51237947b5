//! The drawing event stream and the listener interface it is replayed into.
//!
//! A rendering backend (an SVG renderer, a PDF interpreter, ...) walks a
//! document and reports what it draws as an ordered stream of events:
//! style changes, and paths already flattened into polylines. Anything
//! implementing [`PaintSink`] can consume that stream; the
//! [`OutlineExtractor`](crate::OutlineExtractor) is the main implementation.

use crate::error::ExtractionResult;
use crate::geom::{Box2D, Polyline};
use crate::style::StateUpdate;

use std::borrow::Borrow;

/// One drawing operation reported by a rendering backend.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Event {
    /// Changes some of the style parameters.
    StateUpdate(StateUpdate),
    /// Strokes a path. Each sub-path is already flattened into a polyline,
    /// expressed in the coordinate space of the current transform.
    DrawPath(Vec<Polyline>),
    /// Draws an image or pixmap. Only the outline of the target rectangle
    /// is kept. The rectangle is in user space, before the current
    /// transform is applied.
    DrawImage(Box2D),
}

impl Event {
    /// Forwards this event to the matching method of `sink`.
    pub fn replay_into(&self, sink: &mut dyn PaintSink) -> ExtractionResult {
        match self {
            Event::StateUpdate(update) => sink.on_state_update(update),
            Event::DrawPath(subpaths) => sink.on_path(subpaths),
            Event::DrawImage(target) => sink.on_image(target),
        }
    }
}

/// Receives drawing events in document order.
///
/// Errors are fatal: [`replay`] stops at the first one.
pub trait PaintSink {
    /// Invoked when some of the style parameters change.
    fn on_state_update(&mut self, update: &StateUpdate) -> ExtractionResult;

    /// Invoked for each stroked path, with its flattened sub-paths.
    fn on_path(&mut self, subpaths: &[Polyline]) -> ExtractionResult;

    /// Invoked for each drawn image, with its target rectangle in user
    /// space.
    fn on_image(&mut self, target: &Box2D) -> ExtractionResult;
}

/// Feeds a sequence of events to a sink, in order, stopping at the first
/// error.
pub fn replay<Iter>(events: Iter, sink: &mut dyn PaintSink) -> ExtractionResult
where
    Iter: IntoIterator,
    Iter::Item: Borrow<Event>,
{
    for event in events {
        event.borrow().replay_into(sink)?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::UnsupportedFeature;
    use crate::geom::{point, Box2D};
    use crate::style::ClipOperation;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl PaintSink for Recorder {
        fn on_state_update(&mut self, update: &StateUpdate) -> ExtractionResult {
            self.calls.push("state");
            if let Some(clip) = update.clip {
                return Err(UnsupportedFeature::Clip(clip).into());
            }
            Ok(())
        }

        fn on_path(&mut self, _: &[Polyline]) -> ExtractionResult {
            self.calls.push("path");
            Ok(())
        }

        fn on_image(&mut self, _: &Box2D) -> ExtractionResult {
            self.calls.push("image");
            Ok(())
        }
    }

    #[test]
    fn events_are_replayed_in_order() {
        let events = vec![
            Event::DrawPath(vec![vec![point(0.0, 0.0), point(1.0, 0.0)]]),
            Event::StateUpdate(StateUpdate::new().with_opacity(0.5)),
            Event::DrawImage(Box2D::new(point(0.0, 0.0), point(2.0, 2.0))),
            Event::DrawPath(Vec::new()),
        ];

        let mut sink = Recorder::default();
        replay(&events, &mut sink).unwrap();
        assert_eq!(sink.calls, vec!["path", "state", "image", "path"]);

        // Owned events work too.
        let mut sink = Recorder::default();
        replay(events, &mut sink).unwrap();
        assert_eq!(sink.calls.len(), 4);
    }

    #[test]
    fn replay_stops_at_the_first_error() {
        let events = vec![
            Event::StateUpdate(StateUpdate::new().with_clip(ClipOperation::ReplaceClip)),
            Event::DrawPath(vec![vec![point(0.0, 0.0), point(1.0, 0.0)]]),
        ];

        let mut sink = Recorder::default();
        assert!(replay(&events, &mut sink).is_err());
        assert_eq!(sink.calls, vec!["state"]);
    }
}
