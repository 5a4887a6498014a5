//! Telemetry source abstraction.
//!
//! The sensor front end (or a simulator) produces one
//! [`TelemetrySample`] per scheduler tick. The panel core only consumes
//! samples; it never polls hardware itself.

use crate::TelemetrySample;

/// Produces one telemetry sample per tick.
///
/// # Example
///
/// ```rust
/// use foamrig_panel::traits::TelemetrySource;
/// use foamrig_panel::TelemetrySample;
///
/// struct Constant(TelemetrySample);
///
/// impl TelemetrySource for Constant {
///     fn next_sample(&mut self) -> TelemetrySample {
///         self.0
///     }
/// }
///
/// let mut source = Constant(TelemetrySample::default());
/// assert_eq!(source.next_sample().ratio, 1.0);
/// ```
pub trait TelemetrySource {
    /// Reads (or synthesizes) the sample for the current tick.
    fn next_sample(&mut self) -> TelemetrySample;
}
