//! Analog output subsystem.
//!
//! Convenience accessor over the analog output channels of a device.

use crate::channel::{Channel, ChannelType};
use crate::device::Libad4Device;
use crate::error::Result;
use crate::subsystem::RangeInfo;

/// Analog output subsystem accessor.
///
/// Provides methods to write raw samples and voltages to analog output
/// channels.
#[derive(Debug, Clone)]
pub struct AnalogOutput {
    device: Libad4Device,
}

impl AnalogOutput {
    pub(crate) fn new(device: Libad4Device) -> Self {
        Self { device }
    }

    fn channel(index: u32) -> Channel {
        Channel::new(ChannelType::AnalogOut, index)
    }

    /// Number of output ranges of a channel.
    pub fn range_count(&self, channel: u32) -> Result<i32> {
        self.device.range_count(Self::channel(channel))
    }

    /// Description of one output range of a channel.
    pub fn range_info(&self, channel: u32, range: i32) -> Result<RangeInfo> {
        self.device.range_info(Self::channel(channel), range)
    }

    /// Write a raw 32-bit sample.
    pub fn write_raw(&self, channel: u32, range: i32, sample: u32) -> Result<()> {
        self.device
            .discrete_out(Self::channel(channel), range, sample)
    }

    /// Write a raw 64-bit sample.
    pub fn write_raw64(&self, channel: u32, range: i32, sample: u64) -> Result<()> {
        self.device
            .discrete_out64(Self::channel(channel), range, sample)
    }

    /// Write several channels in one native call.
    pub fn write_multi(&self, channels: &[u32], ranges: &[i32], samples: &[u32]) -> Result<()> {
        let channels: Vec<Channel> = channels.iter().map(|&c| Self::channel(c)).collect();
        self.device.discrete_out_multi(&channels, ranges, samples)
    }

    /// Write a voltage, converted by the native layer in the same call.
    pub fn write_voltage(&self, channel: u32, range: i32, volts: f32) -> Result<()> {
        self.device.analog_out(channel, range, volts)
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
