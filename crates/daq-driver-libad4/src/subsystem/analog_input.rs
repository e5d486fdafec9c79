//! Analog input subsystem.
//!
//! Convenience accessor over the analog input channels of a device. Every
//! method composes the analog-in channel type with a bare channel index and
//! delegates to the flat device operations.

use crate::channel::{Channel, ChannelType};
use crate::device::Libad4Device;
use crate::error::Result;
use crate::subsystem::RangeInfo;

/// Analog input subsystem accessor.
///
/// Provides methods to read raw samples and voltages from analog input
/// channels.
#[derive(Debug, Clone)]
pub struct AnalogInput {
    device: Libad4Device,
}

impl AnalogInput {
    pub(crate) fn new(device: Libad4Device) -> Self {
        Self { device }
    }

    fn channel(index: u32) -> Channel {
        Channel::new(ChannelType::AnalogIn, index)
    }

    /// Number of measurement ranges of a channel.
    pub fn range_count(&self, channel: u32) -> Result<i32> {
        self.device.range_count(Self::channel(channel))
    }

    /// Description of one measurement range of a channel.
    pub fn range_info(&self, channel: u32, range: i32) -> Result<RangeInfo> {
        self.device.range_info(Self::channel(channel), range)
    }

    /// All measurement ranges of a channel.
    pub fn ranges(&self, channel: u32) -> Result<Vec<RangeInfo>> {
        let count = self.range_count(channel)?;
        (0..count)
            .map(|range| self.range_info(channel, range))
            .collect()
    }

    /// Read a raw 32-bit sample.
    pub fn read_raw(&self, channel: u32, range: i32) -> Result<u32> {
        self.device.discrete_in(Self::channel(channel), range)
    }

    /// Read a raw 64-bit sample.
    pub fn read_raw64(&self, channel: u32, range: i32) -> Result<u64> {
        self.device.discrete_in64(Self::channel(channel), range)
    }

    /// Read several channels in one native call.
    pub fn read_multi(&self, channels: &[u32], ranges: &[i32]) -> Result<Vec<u32>> {
        let channels: Vec<Channel> = channels.iter().map(|&c| Self::channel(c)).collect();
        self.device.discrete_in_multi(&channels, ranges)
    }

    /// Read a voltage, converted by the native layer in the same call.
    pub fn read_voltage(&self, channel: u32, range: i32) -> Result<f32> {
        self.device.analog_in(channel, range)
    }

    /// Convert a raw 32-bit sample into a voltage.
    pub fn to_voltage(&self, channel: u32, range: i32, sample: u32) -> Result<f32> {
        self.device
            .sample_to_voltage(Self::channel(channel), range, sample)
    }

    /// Convert a raw 64-bit sample into a voltage.
    pub fn to_voltage64(&self, channel: u32, range: i32, sample: u64) -> Result<f64> {
        self.device
            .sample_to_voltage64(Self::channel(channel), range, sample)
    }

    /// Convert a voltage into a raw 32-bit sample.
    pub fn from_voltage(&self, channel: u32, range: i32, volts: f32) -> Result<u32> {
        self.device
            .voltage_to_sample(Self::channel(channel), range, volts)
    }

    /// Convert a voltage into a raw 64-bit sample.
    pub fn from_voltage64(&self, channel: u32, range: i32, volts: f64) -> Result<u64> {
        self.device
            .voltage_to_sample64(Self::channel(channel), range, volts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_composition() {
        assert_eq!(AnalogInput::channel(1).raw(), 0x0100_0001);
        assert_eq!(AnalogInput::channel(0).raw(), 0x0100_0000);
    }
}
