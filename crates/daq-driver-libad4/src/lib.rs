//! Safe Rust driver for BMCM LIBAD4 measurement devices.
//!
//! This crate provides a safe, ergonomic interface to BMCM analog/digital
//! measurement systems (meM-AD family, USB-AD16f/14f/12f, LAN-AD16f). It
//! wraps the low-level FFI bindings from `libad4-sys` with proper error
//! handling and RAII resource management.
//!
//! The native library owns all device behavior: discovery, buffering,
//! timing and voltage scaling all happen behind its C entry points. Every
//! operation here is a direct, blocking foreign call that either returns a
//! converted result or a typed error carrying the native return code.
//!
//! # Architecture
//!
//! ## Device Access
//! - [`Libad4Device`] - Main device handle with RAII cleanup and the flat
//!   passthrough operations
//! - [`ProductInfo`] / [`RangeInfo`] - Device introspection records
//! - [`Channel`] / [`ChannelType`] - Packed channel identifiers
//!
//! ## Subsystems
//! - [`AnalogInput`] - Raw and voltage reads, batched reads, conversions
//! - [`AnalogOutput`] - Raw and voltage writes, batched writes
//! - [`DigitalIo`] - Bit-field and per-line access, direction control
//!
//! # Examples
//!
//! ## Basic Single-Sample Reading
//!
//! ```no_run
//! use daq_driver_libad4::Libad4Device;
//!
//! # fn example() -> daq_driver_libad4::Result<()> {
//! let device = Libad4Device::open("usbbase:0")?;
//!
//! let ai = device.analog_input();
//! let volts = ai.read_voltage(1, 0)?;
//! println!("AI1: {:.4} V", volts);
//!
//! device.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Batched Multi-Channel Reading
//!
//! ```no_run
//! use daq_driver_libad4::{Channel, ChannelType, Libad4Device};
//!
//! # fn example() -> daq_driver_libad4::Result<()> {
//! let device = Libad4Device::open("usbbase:0")?;
//!
//! let channels = [
//!     Channel::new(ChannelType::AnalogIn, 1),
//!     Channel::new(ChannelType::AnalogIn, 2),
//! ];
//! let samples = device.discrete_in_multi(&channels, &[0, 0])?;
//! assert_eq!(samples.len(), channels.len());
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod device;
pub mod error;
pub mod factory;
pub mod subsystem;

pub use channel::{Channel, ChannelType};
pub use device::{library_version, Libad4Device, ProductInfo};
pub use error::{Libad4Error, Result};
pub use factory::{open_device, ConfigError, Libad4Config};
pub use subsystem::analog_input::AnalogInput;
pub use subsystem::analog_output::AnalogOutput;
pub use subsystem::digital_io::{DigitalIo, DioDirection};
pub use subsystem::RangeInfo;
