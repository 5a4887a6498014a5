//! Value-to-widget projection.
//!
//! Pushes one [`TelemetrySample`] onto every bound widget: dials get the
//! value clamped to the channel range, text readouts get the unclamped value
//! formatted per the channel's [`FormatKind`](crate::format::FormatKind).
//! Out-of-range readings therefore pin the dial at its stop while the label
//! still shows what the sensor reported.

use log::trace;

use crate::bindings::{BindingTable, ChannelBinding};
use crate::format::format_readout;
use crate::telemetry::TelemetrySample;
use crate::traits::WidgetSink;

/// Projects `sample` onto every channel bound in `table`.
///
/// Unbound channels are skipped. Never fails.
///
/// # Example
///
/// ```rust
/// use foamrig_panel::bindings::{BindingTable, ChannelBinding, ChannelRange};
/// use foamrig_panel::format::FormatKind;
/// use foamrig_panel::hal::MockPanel;
/// use foamrig_panel::projector::project;
/// use foamrig_panel::traits::WidgetId;
/// use foamrig_panel::{Channel, TelemetrySample};
///
/// let mut table = BindingTable::new();
/// table
///     .bind(
///         ChannelBinding::new(Channel::GunAirPsi, ChannelRange::new(0.0, 300.0).unwrap(), FormatKind::PSI)
///             .with_dial(WidgetId(0))
///             .with_readout(WidgetId(1), "")
///             .unwrap(),
///     )
///     .unwrap();
///
/// let mut panel = MockPanel::new();
/// let sample = TelemetrySample { gun_air_psi: 340.0, ..TelemetrySample::default() };
/// project(&table, &sample, &mut panel);
///
/// assert_eq!(panel.dial(WidgetId(0)), Some(300));
/// assert_eq!(panel.text(WidgetId(1)), Some("340 PSI"));
/// ```
pub fn project<S: WidgetSink + ?Sized>(table: &BindingTable, sample: &TelemetrySample, sink: &mut S) {
    for binding in table.iter() {
        project_channel(binding, sample.value(binding.channel()), sink);
    }
}

/// Projects a single reading onto the widgets of `binding`.
pub fn project_channel<S: WidgetSink + ?Sized>(binding: &ChannelBinding, value: f32, sink: &mut S) {
    if let Some(dial) = binding.dial() {
        let clamped = binding.range().clamp(value);
        trace!("{} dial {:?} <- {}", binding.channel().as_str(), dial, clamped);
        sink.set_dial(dial, dial_value(clamped));
    }

    for readout in binding.readouts() {
        let text = format_readout(readout.prefix, binding.format(), value);
        trace!("{} text {:?} <- {}", binding.channel().as_str(), readout.widget, text.as_str());
        sink.set_text(readout.widget, &text);
    }
}

/// Integer dial value of an already clamped reading, truncated toward zero.
#[inline]
pub fn dial_value(clamped: f32) -> i32 {
    clamped as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::ChannelRange;
    use crate::format::FormatKind;
    use crate::hal::MockPanel;
    use crate::telemetry::Channel;
    use crate::traits::WidgetId;

    fn hp_table() -> BindingTable {
        let mut table = BindingTable::new();
        table
            .bind(
                ChannelBinding::new(
                    Channel::IsoHpPsi,
                    ChannelRange { min: 0.0, max: 1600.0 },
                    FormatKind::PSI,
                )
                .with_dial(WidgetId(1))
                .with_readout(WidgetId(2), "")
                .unwrap(),
            )
            .unwrap();
        table
            .bind(
                ChannelBinding::new(
                    Channel::IsoLowTempF,
                    ChannelRange { min: 0.0, max: 400.0 },
                    FormatKind::FAHRENHEIT,
                )
                .with_readout(WidgetId(3), "Low: ")
                .unwrap()
                .with_readout(WidgetId(4), "")
                .unwrap(),
            )
            .unwrap();
        table
    }

    // =========================================================================
    // Dial Tests
    // =========================================================================

    #[test]
    fn dial_gets_value_in_range() {
        let mut panel = MockPanel::new();
        let sample = TelemetrySample {
            iso_hp_psi: 1099.7,
            ..TelemetrySample::default()
        };
        project(&hp_table(), &sample, &mut panel);

        assert_eq!(panel.dial(WidgetId(1)), Some(1099));
        assert_eq!(panel.text(WidgetId(2)), Some("1100 PSI"));
    }

    #[test]
    fn dial_clamped_text_unclamped() {
        let mut panel = MockPanel::new();
        let sample = TelemetrySample {
            iso_hp_psi: 1750.0,
            ..TelemetrySample::default()
        };
        project(&hp_table(), &sample, &mut panel);

        assert_eq!(panel.dial(WidgetId(1)), Some(1600));
        assert_eq!(panel.text(WidgetId(2)), Some("1750 PSI"));

        let sample = TelemetrySample {
            iso_hp_psi: -12.4,
            ..TelemetrySample::default()
        };
        project(&hp_table(), &sample, &mut panel);

        assert_eq!(panel.dial(WidgetId(1)), Some(0));
        assert_eq!(panel.text(WidgetId(2)), Some("-12 PSI"));
    }

    #[test]
    fn nan_reading_parks_dial() {
        let mut panel = MockPanel::new();
        let sample = TelemetrySample {
            iso_hp_psi: f32::NAN,
            ..TelemetrySample::default()
        };
        project(&hp_table(), &sample, &mut panel);

        assert_eq!(panel.dial(WidgetId(1)), Some(0));
        assert_eq!(panel.text(WidgetId(2)), Some("-- PSI"));
    }

    #[test]
    fn dial_value_truncates() {
        assert_eq!(dial_value(299.9), 299);
        assert_eq!(dial_value(0.0), 0);
    }

    // =========================================================================
    // Readout Tests
    // =========================================================================

    #[test]
    fn both_readouts_of_a_channel_are_written() {
        let mut panel = MockPanel::new();
        let sample = TelemetrySample {
            iso_low_temp_f: 72.44,
            ..TelemetrySample::default()
        };
        project(&hp_table(), &sample, &mut panel);

        assert_eq!(panel.text(WidgetId(3)), Some("Low: 72.4 °F"));
        assert_eq!(panel.text(WidgetId(4)), Some("72.4 °F"));
    }

    #[test]
    fn unbound_channels_touch_nothing() {
        let mut panel = MockPanel::new();
        project(&BindingTable::new(), &TelemetrySample::default(), &mut panel);
        assert_eq!(panel.call_count(), 0);
    }

    #[test]
    fn each_push_supersedes_previous() {
        let mut panel = MockPanel::new();
        let table = hp_table();
        for psi in [100.0, 900.0, 450.0] {
            let sample = TelemetrySample {
                iso_hp_psi: psi,
                ..TelemetrySample::default()
            };
            project(&table, &sample, &mut panel);
        }
        assert_eq!(panel.dial(WidgetId(1)), Some(450));
        assert_eq!(panel.text(WidgetId(2)), Some("450 PSI"));
    }
}
