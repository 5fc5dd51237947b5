//! Non-fatal problems reported while extracting outlines.
//!
//! Diagnostics never interrupt processing: the algorithm that raises one
//! recovers locally and keeps going. They are reported through a
//! [`DiagnosticSink`], separately from the fatal error path, so callers can
//! collect, log or ignore them.

use core::fmt;

use alloc::vec::Vec;

/// A recoverable problem in the input.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Diagnostic {
    /// The dash pattern had an odd number of entries. The last one was
    /// ignored.
    OddDashPattern { dropped: f64 },
    /// The dash pattern cannot be walked (no positive total length, or
    /// negative/non-finite entries). The stroke is emitted without dashes.
    DegenerateDashPattern,
    /// The current transform is not invertible. The identity was used to
    /// map the stroke in and out of pen space, so dash lengths are not
    /// scaled correctly.
    SingularTransform,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OddDashPattern { dropped } => write!(
                f,
                "Dash pattern with non-even number of lengths; ignoring final length {dropped}."
            ),
            Diagnostic::DegenerateDashPattern => {
                write!(f, "Dash pattern has no positive length; drawing a solid line.")
            }
            Diagnostic::SingularTransform => write!(
                f,
                "Dashed lines transformed by singular matrices are not supported \
                 and the dash pattern will be incorrectly scaled."
            ),
        }
    }
}

/// Receives the diagnostics raised by the algorithms of this crate.
///
/// This trait is implemented for `Vec<Diagnostic>`, for [`LogDiagnostics`]
/// and for all functions/closures with signature `FnMut(Diagnostic)`.
pub trait DiagnosticSink {
    fn diagnostic(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn diagnostic(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<Cb> DiagnosticSink for Cb
where
    Cb: FnMut(Diagnostic),
{
    #[inline]
    fn diagnostic(&mut self, diagnostic: Diagnostic) {
        (self)(diagnostic)
    }
}

/// Forwards diagnostics to the `log` facade as warnings.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn diagnostic(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
    }
}

#[test]
fn closures_are_sinks() {
    let mut count = 0;
    let mut sink = |_: Diagnostic| count += 1;
    sink.diagnostic(Diagnostic::SingularTransform);
    sink.diagnostic(Diagnostic::DegenerateDashPattern);
    assert_eq!(count, 2);
}

#[test]
fn display_names_the_dropped_length() {
    use alloc::string::ToString;

    let msg = Diagnostic::OddDashPattern { dropped: 3.0 }.to_string();
    assert!(msg.contains("non-even"));
    assert!(msg.contains('3'));
}
