//! Channel binding table.
//!
//! Maps each logical [`Channel`] to the widgets that display it, the range
//! its dial is limited to and the way its text readouts are formatted.
//! Bindings are registered once when the panel is built and never change
//! afterwards.
//!
//! A channel without widgets (its panel region was left out of a layout) is
//! simply not bound; every consumer skips it silently.
//!
//! Registering a channel twice replaces the earlier binding: the last
//! registration wins, and [`BindingTable::bind`] hands the replaced binding
//! back to the caller.
//!
//! # Example
//!
//! ```rust
//! use foamrig_panel::bindings::{BindingTable, ChannelBinding, ChannelRange};
//! use foamrig_panel::format::FormatKind;
//! use foamrig_panel::traits::WidgetId;
//! use foamrig_panel::Channel;
//!
//! let mut table = BindingTable::new();
//! let binding = ChannelBinding::new(
//!     Channel::GunAirPsi,
//!     ChannelRange::new(0.0, 300.0).unwrap(),
//!     FormatKind::PSI,
//! )
//! .with_dial(WidgetId(7))
//! .with_readout(WidgetId(8), "")
//! .unwrap();
//!
//! assert!(table.bind(binding).unwrap().is_none());
//! assert!(table.lookup(Channel::GunAirPsi).is_some());
//! assert!(table.lookup(Channel::IsoHpPsi).is_none());
//! ```

use heapless::Vec;
use log::{debug, warn};

use crate::config::ChannelRanges;
use crate::error::PanelError;
use crate::format::FormatKind;
use crate::layout::PanelLayout;
use crate::telemetry::Channel;
use crate::traits::WidgetId;

/// Maximum number of text readouts one channel can drive.
pub const MAX_READOUTS: usize = 2;

/// Closed numeric range a dial indicator is limited to.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelRange {
    /// Lower bound (inclusive).
    pub min: f32,
    /// Upper bound (inclusive).
    pub max: f32,
}

impl ChannelRange {
    /// Creates a validated range.
    ///
    /// Fails with [`PanelError::InvalidRange`] if a bound is not finite or
    /// `min > max`.
    pub fn new(min: f32, max: f32) -> Result<Self, PanelError> {
        let range = Self { min, max };
        if range.is_valid() {
            Ok(range)
        } else {
            Err(PanelError::InvalidRange)
        }
    }

    /// True if both bounds are finite and ordered.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Limits `value` to the range. NaN maps to `min`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() || value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

/// A text widget showing a channel, with a fixed label prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Readout {
    /// Label widget.
    pub widget: WidgetId,
    /// Text placed before the formatted value (e.g. `"Low: "`).
    pub prefix: &'static str,
}

/// Widgets, range and formatter for one channel.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelBinding {
    channel: Channel,
    range: ChannelRange,
    format: FormatKind,
    dial: Option<WidgetId>,
    readouts: Vec<Readout, MAX_READOUTS>,
}

impl ChannelBinding {
    /// Creates a binding with no widgets attached yet.
    pub fn new(channel: Channel, range: ChannelRange, format: FormatKind) -> Self {
        Self {
            channel,
            range,
            format,
            dial: None,
            readouts: Vec::new(),
        }
    }

    /// Attaches the dial indicator.
    pub fn with_dial(mut self, dial: WidgetId) -> Self {
        self.dial = Some(dial);
        self
    }

    /// Adds a text readout.
    ///
    /// Fails with [`PanelError::TooManyReadouts`] past [`MAX_READOUTS`].
    pub fn with_readout(mut self, widget: WidgetId, prefix: &'static str) -> Result<Self, PanelError> {
        self.readouts
            .push(Readout { widget, prefix })
            .map_err(|_| PanelError::TooManyReadouts)?;
        Ok(self)
    }

    /// Bound channel.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Dial range.
    pub fn range(&self) -> ChannelRange {
        self.range
    }

    /// Readout formatter.
    pub fn format(&self) -> FormatKind {
        self.format
    }

    /// Dial indicator, if any.
    pub fn dial(&self) -> Option<WidgetId> {
        self.dial
    }

    /// Text readouts, possibly empty.
    pub fn readouts(&self) -> &[Readout] {
        &self.readouts
    }

    /// True if no widget is attached.
    pub fn is_empty(&self) -> bool {
        self.dial.is_none() && self.readouts.is_empty()
    }
}

/// Channel → binding lookup, one slot per channel.
#[derive(Clone, Debug)]
pub struct BindingTable {
    slots: [Option<ChannelBinding>; Channel::COUNT],
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
        }
    }

    /// Builds the standard panel table from the scene builder's handles.
    ///
    /// Channels whose widgets are all absent from `layout` stay unbound.
    pub fn from_layout(layout: &PanelLayout, ranges: &ChannelRanges) -> Result<Self, PanelError> {
        let mut table = Self::new();

        let gauges = [
            (Channel::IsoHpPsi, layout.iso_hp, ranges.high_pressure),
            (Channel::ResinHpPsi, layout.resin_hp, ranges.high_pressure),
            (Channel::IsoLowPsi, layout.iso_low, ranges.low_pressure),
            (Channel::ResinLowPsi, layout.resin_low, ranges.low_pressure),
            (Channel::PrimaryAirPsi, layout.primary_air, ranges.air),
            (Channel::GunAirPsi, layout.gun_air, ranges.air),
        ];
        for (channel, gauge, range) in gauges {
            let mut binding = ChannelBinding::new(channel, range, FormatKind::PSI);
            if let Some(dial) = gauge.dial {
                binding = binding.with_dial(dial);
            }
            if let Some(readout) = gauge.readout {
                binding = binding.with_readout(readout, "")?;
            }
            table.bind_if_present(binding)?;
        }

        let temperatures: [(Channel, [(Option<WidgetId>, &'static str); MAX_READOUTS]); 6] = [
            (Channel::IsoHpTempF, [(layout.iso_hp_temp, ""), (None, "")]),
            (Channel::ResinHpTempF, [(layout.resin_hp_temp, ""), (None, "")]),
            (
                Channel::IsoLowTempF,
                [(layout.iso_low_temp_hp_card, "Low: "), (layout.iso_low_temp, "")],
            ),
            (
                Channel::ResinLowTempF,
                [(layout.resin_low_temp_hp_card, "Low: "), (layout.resin_low_temp, "")],
            ),
            (Channel::Hose1TempF, [(layout.hoses[0].temp, ""), (None, "")]),
            (Channel::Hose2TempF, [(layout.hoses[1].temp, ""), (None, "")]),
        ];
        for (channel, readouts) in temperatures {
            let mut binding = ChannelBinding::new(channel, ranges.temperature, FormatKind::FAHRENHEIT);
            for (widget, prefix) in readouts {
                if let Some(widget) = widget {
                    binding = binding.with_readout(widget, prefix)?;
                }
            }
            table.bind_if_present(binding)?;
        }

        if let Some(readout) = layout.ratio.readout {
            let binding = ChannelBinding::new(Channel::Ratio, ranges.ratio, FormatKind::Raw)
                .with_readout(readout, "")?;
            table.bind(binding)?;
        }

        Ok(table)
    }

    /// Registers `binding`, returning the binding it replaced, if any.
    pub fn bind(&mut self, binding: ChannelBinding) -> Result<Option<ChannelBinding>, PanelError> {
        if !binding.range.is_valid() {
            return Err(PanelError::InvalidRange);
        }
        let channel = binding.channel;
        debug!(
            "bind {} range=[{}, {}] dial={:?} readouts={}",
            channel.as_str(),
            binding.range.min,
            binding.range.max,
            binding.dial,
            binding.readouts.len()
        );
        let replaced = self.slots[channel.index()].replace(binding);
        if replaced.is_some() {
            warn!("binding for {} replaced", channel.as_str());
        }
        Ok(replaced)
    }

    /// Removes and returns the binding for `channel`.
    pub fn unbind(&mut self, channel: Channel) -> Option<ChannelBinding> {
        self.slots[channel.index()].take()
    }

    /// Binding for `channel`, if one is registered.
    pub fn lookup(&self, channel: Channel) -> Option<&ChannelBinding> {
        self.slots[channel.index()].as_ref()
    }

    /// Registered bindings in channel order.
    pub fn iter(&self) -> impl Iterator<Item = &ChannelBinding> {
        self.slots.iter().flatten()
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bind_if_present(&mut self, binding: ChannelBinding) -> Result<(), PanelError> {
        if !binding.is_empty() {
            self.bind(binding)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GaugeWidgets;

    fn psi_binding(channel: Channel) -> ChannelBinding {
        ChannelBinding::new(
            channel,
            ChannelRange { min: 0.0, max: 500.0 },
            FormatKind::PSI,
        )
    }

    // =========================================================================
    // ChannelRange Tests
    // =========================================================================

    #[test]
    fn range_new_validates() {
        assert!(ChannelRange::new(0.0, 10.0).is_ok());
        assert!(ChannelRange::new(5.0, 5.0).is_ok());
        assert_eq!(ChannelRange::new(10.0, 0.0), Err(PanelError::InvalidRange));
        assert_eq!(ChannelRange::new(f32::NAN, 1.0), Err(PanelError::InvalidRange));
        assert_eq!(
            ChannelRange::new(0.0, f32::INFINITY),
            Err(PanelError::InvalidRange)
        );
    }

    #[test]
    fn range_clamp() {
        let range = ChannelRange { min: 0.0, max: 300.0 };
        assert_eq!(range.clamp(-20.0), 0.0);
        assert_eq!(range.clamp(150.5), 150.5);
        assert_eq!(range.clamp(301.0), 300.0);
        assert_eq!(range.clamp(f32::INFINITY), 300.0);
        assert_eq!(range.clamp(f32::NEG_INFINITY), 0.0);
        assert_eq!(range.clamp(f32::NAN), 0.0);
    }

    // =========================================================================
    // ChannelBinding Tests
    // =========================================================================

    #[test]
    fn binding_starts_empty() {
        let binding = psi_binding(Channel::IsoLowPsi);
        assert!(binding.is_empty());
        assert!(binding.dial().is_none());
        assert!(binding.readouts().is_empty());
    }

    #[test]
    fn binding_readout_capacity() {
        let binding = psi_binding(Channel::IsoLowPsi)
            .with_readout(WidgetId(1), "")
            .unwrap()
            .with_readout(WidgetId(2), "Low: ")
            .unwrap();
        assert_eq!(binding.readouts().len(), 2);
        assert_eq!(binding.readouts()[1].prefix, "Low: ");

        let overflow = binding.with_readout(WidgetId(3), "");
        assert_eq!(overflow.unwrap_err(), PanelError::TooManyReadouts);
    }

    // =========================================================================
    // BindingTable Tests
    // =========================================================================

    #[test]
    fn table_starts_empty() {
        let table = BindingTable::new();
        assert!(table.is_empty());
        for channel in Channel::ALL {
            assert!(table.lookup(channel).is_none());
        }
    }

    #[test]
    fn last_registration_wins() {
        let mut table = BindingTable::new();
        let first = psi_binding(Channel::GunAirPsi).with_dial(WidgetId(1));
        let second = psi_binding(Channel::GunAirPsi).with_dial(WidgetId(2));

        assert!(table.bind(first.clone()).unwrap().is_none());
        let replaced = table.bind(second).unwrap();

        assert_eq!(replaced, Some(first));
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.lookup(Channel::GunAirPsi).unwrap().dial(),
            Some(WidgetId(2))
        );
    }

    #[test]
    fn bind_rejects_invalid_range() {
        let mut table = BindingTable::new();
        let binding = ChannelBinding::new(
            Channel::IsoHpPsi,
            ChannelRange { min: 10.0, max: 0.0 },
            FormatKind::PSI,
        );
        assert_eq!(table.bind(binding), Err(PanelError::InvalidRange));
        assert!(table.is_empty());
    }

    #[test]
    fn unbind_removes() {
        let mut table = BindingTable::new();
        table.bind(psi_binding(Channel::IsoLowPsi)).unwrap();
        assert!(table.unbind(Channel::IsoLowPsi).is_some());
        assert!(table.lookup(Channel::IsoLowPsi).is_none());
        assert!(table.unbind(Channel::IsoLowPsi).is_none());
    }

    #[test]
    fn iter_in_channel_order() {
        let mut table = BindingTable::new();
        table.bind(psi_binding(Channel::GunAirPsi)).unwrap();
        table.bind(psi_binding(Channel::IsoHpPsi)).unwrap();

        let order: alloc::vec::Vec<Channel> = table.iter().map(|b| b.channel()).collect();
        assert_eq!(order, [Channel::IsoHpPsi, Channel::GunAirPsi]);
    }

    // =========================================================================
    // Layout Table Tests
    // =========================================================================

    #[test]
    fn empty_layout_binds_nothing() {
        let table = BindingTable::from_layout(&PanelLayout::default(), &ChannelRanges::default())
            .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn partial_layout_binds_present_regions() {
        let layout = PanelLayout {
            iso_hp: GaugeWidgets {
                dial: Some(WidgetId(1)),
                readout: Some(WidgetId(2)),
            },
            iso_low_temp_hp_card: Some(WidgetId(3)),
            ..PanelLayout::default()
        };
        let table = BindingTable::from_layout(&layout, &ChannelRanges::default()).unwrap();

        assert_eq!(table.len(), 2);

        let iso_hp = table.lookup(Channel::IsoHpPsi).unwrap();
        assert_eq!(iso_hp.dial(), Some(WidgetId(1)));
        assert_eq!(iso_hp.range().max, 1600.0);
        assert_eq!(iso_hp.format(), FormatKind::PSI);

        let low_temp = table.lookup(Channel::IsoLowTempF).unwrap();
        assert_eq!(low_temp.dial(), None);
        assert_eq!(
            low_temp.readouts(),
            &[Readout {
                widget: WidgetId(3),
                prefix: "Low: "
            }]
        );

        assert!(table.lookup(Channel::ResinHpPsi).is_none());
    }
}
