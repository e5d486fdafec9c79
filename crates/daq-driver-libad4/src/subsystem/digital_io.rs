//! Digital I/O subsystem.
//!
//! Convenience accessor over the digital I/O channels of a device. A
//! digital channel is a bit field of lines; each line has a direction bit
//! in the channel's direction mask (input = 1, output = 0).

use crate::channel::{Channel, ChannelType};
use crate::device::Libad4Device;
use crate::error::Result;

/// Direction of a single digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum DioDirection {
    /// Line reads external state (direction bit 1)
    #[default]
    Input = 1,
    /// Line drives external state (direction bit 0)
    Output = 0,
}

/// Digital I/O subsystem accessor.
///
/// Provides methods to read and write whole digital channels, single
/// lines, and line directions.
#[derive(Debug, Clone)]
pub struct DigitalIo {
    device: Libad4Device,
}

impl DigitalIo {
    pub(crate) fn new(device: Libad4Device) -> Self {
        Self { device }
    }

    fn channel(index: u32) -> Channel {
        Channel::new(ChannelType::DigitalIo, index)
    }

    /// Read the bit field of a digital channel.
    pub fn read(&self, channel: u32) -> Result<u32> {
        self.device.digital_in(channel)
    }

    /// Write the bit field of a digital channel.
    pub fn write(&self, channel: u32, bits: u32) -> Result<()> {
        self.device.digital_out(channel, bits)
    }

    /// Read a single line.
    ///
    /// Returns true if the line is high, false if low.
    pub fn read_line(&self, channel: u32, line: u32) -> Result<bool> {
        self.device.digital_line(channel, line)
    }

    /// Write a single line.
    pub fn write_line(&self, channel: u32, line: u32, high: bool) -> Result<()> {
        self.device.set_digital_line(channel, line, high)
    }

    /// Set a line high.
    pub fn set_high(&self, channel: u32, line: u32) -> Result<()> {
        self.write_line(channel, line, true)
    }

    /// Set a line low.
    pub fn set_low(&self, channel: u32, line: u32) -> Result<()> {
        self.write_line(channel, line, false)
    }

    /// Toggle a line (read current state, write opposite).
    pub fn toggle(&self, channel: u32, line: u32) -> Result<bool> {
        let current = self.read_line(channel, line)?;
        let new_value = !current;
        self.write_line(channel, line, new_value)?;
        Ok(new_value)
    }

    /// Direction mask of a channel; input = 1, output = 0 per line.
    pub fn direction(&self, channel: u32) -> Result<u32> {
        self.device.line_direction(Self::channel(channel))
    }

    /// Set the direction mask of a channel.
    pub fn set_direction(&self, channel: u32, mask: u32) -> Result<()> {
        self.device.set_line_direction(Self::channel(channel), mask)
    }

    /// Configure the direction of a single line.
    ///
    /// Read-modify-write over the channel's direction mask.
    pub fn configure_line(&self, channel: u32, line: u32, direction: DioDirection) -> Result<()> {
        let mask = self.direction(channel)?;
        let mask = match direction {
            DioDirection::Input => mask | (1 << line),
            DioDirection::Output => mask & !(1 << line),
        };
        self.set_direction(channel, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_composition() {
        assert_eq!(DigitalIo::channel(0).raw(), 0x0300_0000);
    }

    #[test]
    fn test_direction_bit_values() {
        // The direction mask encodes input as 1 and output as 0.
        assert_eq!(DioDirection::Input as u32, 1);
        assert_eq!(DioDirection::Output as u32, 0);
        assert_eq!(DioDirection::default(), DioDirection::Input);
    }
}
