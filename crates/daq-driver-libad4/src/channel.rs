//! Channel identifiers.
//!
//! A LIBAD4 channel id is a single `i32` whose high-order byte selects the
//! device subsystem (channel type) and whose low-order 24 bits select the
//! channel index within that subsystem. The binding performs no validation
//! beyond the packing itself; invalid combinations are rejected by the
//! native layer.

use std::fmt;

/// Type of a LIBAD4 channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ChannelType {
    AnalogIn = libad4_sys::AD_CHA_TYPE_ANALOG_IN,
    AnalogOut = libad4_sys::AD_CHA_TYPE_ANALOG_OUT,
    DigitalIo = libad4_sys::AD_CHA_TYPE_DIGITAL_IO,
    Sync = libad4_sys::AD_CHA_TYPE_SYNC,
    Route = libad4_sys::AD_CHA_TYPE_ROUTE,
    Can = libad4_sys::AD_CHA_TYPE_CAN,
    Counter = libad4_sys::AD_CHA_TYPE_COUNTER,
    AnalogCounter = libad4_sys::AD_CHA_TYPE_ANALOG_COUNTER,
}

impl ChannelType {
    /// Convert from a raw channel type tag.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            libad4_sys::AD_CHA_TYPE_ANALOG_IN => Some(Self::AnalogIn),
            libad4_sys::AD_CHA_TYPE_ANALOG_OUT => Some(Self::AnalogOut),
            libad4_sys::AD_CHA_TYPE_DIGITAL_IO => Some(Self::DigitalIo),
            libad4_sys::AD_CHA_TYPE_SYNC => Some(Self::Sync),
            libad4_sys::AD_CHA_TYPE_ROUTE => Some(Self::Route),
            libad4_sys::AD_CHA_TYPE_CAN => Some(Self::Can),
            libad4_sys::AD_CHA_TYPE_COUNTER => Some(Self::Counter),
            libad4_sys::AD_CHA_TYPE_ANALOG_COUNTER => Some(Self::AnalogCounter),
            _ => None,
        }
    }

    /// Build a channel of this type.
    pub fn channel(self, index: u32) -> Channel {
        Channel::new(self, index)
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AnalogIn => "analog-in",
            Self::AnalogOut => "analog-out",
            Self::DigitalIo => "digital-io",
            Self::Sync => "sync",
            Self::Route => "route",
            Self::Can => "can",
            Self::Counter => "counter",
            Self::AnalogCounter => "analog-counter",
        };
        f.write_str(name)
    }
}

/// A packed channel identifier (type tag | channel index).
///
/// `repr(transparent)` over the native `i32`, so slices of `Channel` can be
/// passed directly to the vector entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Channel(i32);

impl Channel {
    /// Pack a channel type and index into a channel identifier.
    ///
    /// The index is masked to its 24 available bits.
    pub fn new(channel_type: ChannelType, index: u32) -> Self {
        let raw = (channel_type as u32) | (index & libad4_sys::AD_CHA_ID_MASK);
        Self(raw as i32)
    }

    /// Wrap an already packed identifier without inspection.
    pub fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The packed value as passed to the native layer.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// The channel type tag, if it is one of the known types.
    pub fn channel_type(self) -> Option<ChannelType> {
        ChannelType::from_raw(self.0 as u32 & libad4_sys::AD_CHA_TYPE_MASK)
    }

    /// The channel index within its type.
    pub fn index(self) -> u32 {
        self.0 as u32 & libad4_sys::AD_CHA_ID_MASK
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channel_type() {
            Some(t) => write!(f, "{}:{}", t, self.index()),
            None => write!(f, "{:#010x}", self.0 as u32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing_matches_native_layout() {
        let channel = Channel::new(ChannelType::AnalogIn, 1);
        assert_eq!(channel.raw(), 0x0100_0001);

        let channel = Channel::new(ChannelType::DigitalIo, 0);
        assert_eq!(channel.raw(), 0x0300_0000);
    }

    #[test]
    fn test_index_is_masked_to_24_bits() {
        let channel = Channel::new(ChannelType::AnalogOut, 0xffff_ffff);
        assert_eq!(channel.raw() as u32, 0x02ff_ffff);
    }

    #[test]
    fn test_unpacking_round_trip() {
        let channel = Channel::new(ChannelType::Counter, 42);
        assert_eq!(channel.channel_type(), Some(ChannelType::Counter));
        assert_eq!(channel.index(), 42);
        assert_eq!(Channel::from_raw(channel.raw()), channel);
    }

    #[test]
    fn test_display() {
        assert_eq!(Channel::new(ChannelType::AnalogIn, 2).to_string(), "analog-in:2");
        assert_eq!(Channel::from_raw(0x0400_0001).to_string(), "0x04000001");
    }

    #[test]
    fn test_unknown_type_tag() {
        // 0x04 is unassigned in the native numbering.
        assert_eq!(ChannelType::from_raw(0x0400_0000), None);
        assert_eq!(Channel::from_raw(0x0400_0001).channel_type(), None);
    }
}
