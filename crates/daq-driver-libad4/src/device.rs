//! Core device abstraction for LIBAD4 measurement systems.
//!
//! This module provides the main [`Libad4Device`] type which wraps a native
//! LIBAD4 device handle with RAII semantics, plus the flat passthrough
//! operations, one per native entry point.

use std::ffi::CString;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

use libad4_sys::{LibAd4, SADProductInfo, SADRangeInfo};

use crate::channel::{Channel, ChannelType};
use crate::error::{check, ensure_equal_lengths, Libad4Error, Result};
use crate::subsystem::analog_input::AnalogInput;
use crate::subsystem::analog_output::AnalogOutput;
use crate::subsystem::digital_io::DigitalIo;
use crate::subsystem::{fixed_c_string, RangeInfo};

/// Process-wide function table for the vendor library, loaded on first use.
static LIBRARY: OnceCell<LibAd4> = OnceCell::new();

/// Get the loaded vendor library, loading it on the first call.
pub(crate) fn library() -> Result<&'static LibAd4> {
    LIBRARY.get_or_try_init(|| {
        // SAFETY: the genuine libad4 exports the declared entry points; a
        // mismatching library fails symbol resolution and surfaces as Load.
        unsafe { LibAd4::load() }.map_err(Libad4Error::Load)
    })
}

/// Version number of the native library.
///
/// No device handle is required; the only failure mode is the library
/// itself failing to load.
pub fn library_version() -> Result<i32> {
    let lib = library()?;
    // ad_get_version returns the version directly; there is no error path.
    Ok(unsafe { (lib.ad_get_version)() })
}

/// Product description of a device or one of its internal modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    /// Serial number of the device/module
    pub serial: u32,
    /// Firmware version
    pub firmware_version: u32,
    /// Model name, e.g. "USB-AD16f"
    pub model: String,
}

impl ProductInfo {
    pub(crate) fn from_raw(raw: &SADProductInfo) -> Self {
        Self {
            serial: raw.serial,
            firmware_version: raw.fw_version,
            model: fixed_c_string(&raw.model),
        }
    }
}

/// Internal state shared between device clones and subsystem accessors.
struct DeviceInner {
    /// Native handle returned by ad_open.
    handle: i32,
    /// Name used to open the device.
    name: String,
    /// Set once the handle has been passed to ad_close.
    closed: AtomicBool,
}

impl DeviceInner {
    /// Close the native handle exactly once.
    fn close_now(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let lib = library()?;
        debug!(device = %self.name, handle = self.handle, "closing LIBAD4 device");
        // SAFETY: the handle came from ad_open and is closed at most once.
        let code = unsafe { (lib.ad_close)(self.handle) };
        check("ad_close", code, || format!("handle {}", self.handle))
    }
}

impl Drop for DeviceInner {
    fn drop(&mut self) {
        if let Err(err) = self.close_now() {
            warn!(device = %self.name, %err, "error closing LIBAD4 device");
        }
    }
}

/// A safe wrapper around a LIBAD4 device handle.
///
/// The connection is released when the last clone is dropped; an explicit,
/// fallible [`close`](Self::close) is available where the close result
/// matters. Clones share the same native handle, so a clone used after an
/// explicit close sees the native stale-handle error code.
///
/// # Thread Safety
///
/// The binding imposes no locking of its own; every operation is a direct,
/// blocking foreign call, and the native library's own (undocumented)
/// thread-safety contract governs concurrent use.
#[derive(Clone)]
pub struct Libad4Device {
    inner: Arc<DeviceInner>,
}

impl Libad4Device {
    /// Open a connection to a measurement system.
    ///
    /// `name` is passed to the native layer as-is, format
    /// `<family>[:<unit-or-@serial-or-ip>]`. Multiple devices of one family
    /// are addressed by unit number (`usbbase:0`, `usbbase:1`) or serial
    /// number (`usbbase:@157`); networked variants take an IP address
    /// (`lanbase:192.168.1.5`).
    ///
    /// | measurement device | name |
    /// |--------------------|------|
    /// | meM-AD             | `memadusb` |
    /// | meM-ADDA           | `memaddausb` |
    /// | meM-ADf            | `memadfusb` |
    /// | meM-ADfo           | `memadfpusb` |
    /// | USB-AD16f          | `usbbase` |
    /// | USB-AD14f          | `usbad14f` |
    /// | USB-AD12f          | `usbad12f` |
    /// | LAN-AD16f          | `lanbase:<ip-addr>` |
    ///
    /// # Errors
    ///
    /// [`Libad4Error::Connect`] if the connection could not be established,
    /// [`Libad4Error::Load`] if the vendor library is not installed.
    pub fn open(name: &str) -> Result<Self> {
        let lib = library()?;
        let c_name = CString::new(name)?;

        // SAFETY: c_name is a valid NUL-terminated string for the call.
        let handle = unsafe { (lib.ad_open)(c_name.as_ptr()) };

        if handle == libad4_sys::AD_INVALID_HANDLE {
            return Err(Libad4Error::Connect {
                name: name.to_string(),
            });
        }

        info!(device = %name, handle, "opened LIBAD4 device");

        Ok(Self {
            inner: Arc::new(DeviceInner {
                handle,
                name: name.to_string(),
                closed: AtomicBool::new(false),
            }),
        })
    }

    /// Close the connection, surfacing the native close result.
    ///
    /// Dropping the device closes it as well (logging instead of raising),
    /// so the handle is released on every exit path; use this method where
    /// a failed close must be observed.
    pub fn close(self) -> Result<()> {
        self.inner.close_now()
    }

    /// The name used to open this device.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub(crate) fn handle(&self) -> i32 {
        self.inner.handle
    }

    /// Number of measurement ranges of a channel.
    pub fn range_count(&self, channel: Channel) -> Result<i32> {
        let lib = library()?;
        let handle = self.handle();
        let mut count: i32 = 0;

        // SAFETY: count outlives the call; the native layer writes it on success.
        let code =
            unsafe { (lib.ad_get_range_count)(handle, channel.raw(), &mut count) };
        check("ad_get_range_count", code, || {
            format!("handle {handle}, channel {channel}")
        })?;

        Ok(count)
    }

    /// Description of one measurement range of a channel.
    pub fn range_info(&self, channel: Channel, range: i32) -> Result<RangeInfo> {
        let lib = library()?;
        let handle = self.handle();
        let mut raw = SADRangeInfo::zeroed();

        // SAFETY: raw is a valid output buffer with the exact native layout.
        let code =
            unsafe { (lib.ad_get_range_info)(handle, channel.raw(), range, &mut raw) };
        check("ad_get_range_info", code, || {
            format!("handle {handle}, channel {channel}, range {range}")
        })?;

        Ok(RangeInfo::from_raw(&raw))
    }

    /// Read a raw 32-bit sample from a channel.
    pub fn discrete_in(&self, channel: Channel, range: i32) -> Result<u32> {
        let lib = library()?;
        let handle = self.handle();
        let mut data: u32 = 0;

        // SAFETY: data outlives the call; one sample is written on success.
        let code =
            unsafe { (lib.ad_discrete_in)(handle, channel.raw(), range, &mut data) };
        check("ad_discrete_in", code, || {
            format!("handle {handle}, channel {channel}, range {range}")
        })?;

        Ok(data)
    }

    /// Read a raw 64-bit sample from a channel.
    pub fn discrete_in64(&self, channel: Channel, range: i32) -> Result<u64> {
        let lib = library()?;
        let handle = self.handle();
        let mut data: u64 = 0;

        // SAFETY: data outlives the call; one sample is written on success.
        let code =
            unsafe { (lib.ad_discrete_in64)(handle, channel.raw(), range, &mut data) };
        check("ad_discrete_in64", code, || {
            format!("handle {handle}, channel {channel}, range {range}")
        })?;

        Ok(data)
    }

    /// Read several channels in one native call.
    ///
    /// The result has exactly `channels.len()` samples. `channels` and
    /// `ranges` must have equal length; a mismatch fails before the native
    /// layer is invoked. There is no partial success: either every channel
    /// is read by the single native call or the whole call fails.
    pub fn discrete_in_multi(&self, channels: &[Channel], ranges: &[i32]) -> Result<Vec<u32>> {
        ensure_equal_lengths(
            "ad_discrete_inv",
            &[("channels", channels.len()), ("ranges", ranges.len())],
        )?;

        let lib = library()?;
        let handle = self.handle();
        let mut data = vec![0u32; channels.len()];

        // SAFETY: Channel is repr(transparent) over i32, so the slice casts
        // losslessly; all three buffers hold channels.len() elements.
        let code = unsafe {
            (lib.ad_discrete_inv)(
                handle,
                channels.len() as i32,
                channels.as_ptr().cast::<i32>(),
                ranges.as_ptr(),
                data.as_mut_ptr(),
            )
        };
        check("ad_discrete_inv", code, || {
            format!("handle {handle}, {} channels", channels.len())
        })?;

        Ok(data)
    }

    /// Write a raw 32-bit sample to a channel.
    pub fn discrete_out(&self, channel: Channel, range: i32, sample: u32) -> Result<()> {
        let lib = library()?;
        let handle = self.handle();

        // SAFETY: all arguments pass by value.
        let code =
            unsafe { (lib.ad_discrete_out)(handle, channel.raw(), range, sample) };
        check("ad_discrete_out", code, || {
            format!("handle {handle}, channel {channel}, range {range}, sample {sample}")
        })
    }

    /// Write a raw 64-bit sample to a channel.
    pub fn discrete_out64(&self, channel: Channel, range: i32, sample: u64) -> Result<()> {
        let lib = library()?;
        let handle = self.handle();

        // SAFETY: all arguments pass by value.
        let code =
            unsafe { (lib.ad_discrete_out64)(handle, channel.raw(), range, sample) };
        check("ad_discrete_out64", code, || {
            format!("handle {handle}, channel {channel}, range {range}, sample {sample}")
        })
    }

    /// Write several channels in one native call.
    ///
    /// `channels`, `ranges` and `samples` must have equal length; a
    /// mismatch fails before the native layer is invoked.
    pub fn discrete_out_multi(
        &self,
        channels: &[Channel],
        ranges: &[i32],
        samples: &[u32],
    ) -> Result<()> {
        ensure_equal_lengths(
            "ad_discrete_outv",
            &[
                ("channels", channels.len()),
                ("ranges", ranges.len()),
                ("samples", samples.len()),
            ],
        )?;

        let lib = library()?;
        let handle = self.handle();

        // SAFETY: Channel is repr(transparent) over i32; all three buffers
        // hold channels.len() elements and are only read by the native layer.
        let code = unsafe {
            (lib.ad_discrete_outv)(
                handle,
                channels.len() as i32,
                channels.as_ptr().cast::<i32>(),
                ranges.as_ptr(),
                samples.as_ptr(),
            )
        };
        check("ad_discrete_outv", code, || {
            format!("handle {handle}, {} channels", channels.len())
        })
    }

    /// Convert a raw 32-bit sample into a voltage.
    ///
    /// The device- and range-specific scaling lives in the native layer;
    /// the binding does no conversion math of its own.
    pub fn sample_to_voltage(&self, channel: Channel, range: i32, sample: u32) -> Result<f32> {
        let lib = library()?;
        let handle = self.handle();
        let mut volt: f32 = 0.0;

        // SAFETY: volt outlives the call.
        let code = unsafe {
            (lib.ad_sample_to_float)(handle, channel.raw(), range, sample, &mut volt)
        };
        check("ad_sample_to_float", code, || {
            format!("handle {handle}, channel {channel}, range {range}, sample {sample}")
        })?;

        Ok(volt)
    }

    /// Convert a raw 64-bit sample into a voltage.
    pub fn sample_to_voltage64(&self, channel: Channel, range: i32, sample: u64) -> Result<f64> {
        let lib = library()?;
        let handle = self.handle();
        let mut volt: f64 = 0.0;

        // SAFETY: volt outlives the call.
        let code = unsafe {
            (lib.ad_sample_to_float64)(handle, channel.raw(), range, sample, &mut volt)
        };
        check("ad_sample_to_float64", code, || {
            format!("handle {handle}, channel {channel}, range {range}, sample {sample}")
        })?;

        Ok(volt)
    }

    /// Convert a voltage into a raw 32-bit sample.
    pub fn voltage_to_sample(&self, channel: Channel, range: i32, volts: f32) -> Result<u32> {
        let lib = library()?;
        let handle = self.handle();
        let mut sample: u32 = 0;

        // SAFETY: sample outlives the call.
        let code = unsafe {
            (lib.ad_float_to_sample)(handle, channel.raw(), range, volts, &mut sample)
        };
        check("ad_float_to_sample", code, || {
            format!("handle {handle}, channel {channel}, range {range}, volts {volts}")
        })?;

        Ok(sample)
    }

    /// Convert a voltage into a raw 64-bit sample.
    pub fn voltage_to_sample64(&self, channel: Channel, range: i32, volts: f64) -> Result<u64> {
        let lib = library()?;
        let handle = self.handle();
        let mut sample: u64 = 0;

        // SAFETY: sample outlives the call.
        let code = unsafe {
            (lib.ad_float_to_sample64)(handle, channel.raw(), range, volts, &mut sample)
        };
        check("ad_float_to_sample64", code, || {
            format!("handle {handle}, channel {channel}, range {range}, volts {volts}")
        })?;

        Ok(sample)
    }

    /// Read a voltage from an analog input channel.
    ///
    /// Equivalent to a read followed by a conversion, performed by the
    /// native layer as a single call. Takes the bare channel index; the
    /// analog-in type tag is implied by the native convenience call.
    pub fn analog_in(&self, channel: u32, range: i32) -> Result<f32> {
        let lib = library()?;
        let handle = self.handle();
        let mut volt: f32 = 0.0;

        // SAFETY: volt outlives the call.
        let code = unsafe { (lib.ad_analog_in)(handle, channel as i32, range, &mut volt) };
        check("ad_analog_in", code, || {
            format!("handle {handle}, channel {channel}, range {range}")
        })?;

        Ok(volt)
    }

    /// Write a voltage to an analog output channel.
    ///
    /// Equivalent to a conversion followed by a write, performed by the
    /// native layer as a single call. Takes the bare channel index.
    pub fn analog_out(&self, channel: u32, range: i32, volts: f32) -> Result<()> {
        let lib = library()?;
        let handle = self.handle();

        // SAFETY: all arguments pass by value.
        let code = unsafe { (lib.ad_analog_out)(handle, channel as i32, range, volts) };
        check("ad_analog_out", code, || {
            format!("handle {handle}, channel {channel}, range {range}, volts {volts}")
        })
    }

    /// Read the bit field of a digital I/O channel.
    ///
    /// Convenience wrapper over [`discrete_in`](Self::discrete_in)
    /// restricted to the digital-io channel type, range 0.
    pub fn digital_in(&self, channel: u32) -> Result<u32> {
        self.discrete_in(Channel::new(ChannelType::DigitalIo, channel), 0)
    }

    /// Write the bit field of a digital I/O channel.
    pub fn digital_out(&self, channel: u32, bits: u32) -> Result<()> {
        self.discrete_out(Channel::new(ChannelType::DigitalIo, channel), 0, bits)
    }

    /// State of a single line within a digital channel's bit field.
    pub fn digital_line(&self, channel: u32, line: u32) -> Result<bool> {
        let bits = self.digital_in(channel)?;
        Ok(bits & (1 << line) != 0)
    }

    /// Set or clear a single line within a digital channel's bit field.
    ///
    /// Read-modify-write over the channel's current bit field.
    pub fn set_digital_line(&self, channel: u32, line: u32, high: bool) -> Result<()> {
        let bits = self.digital_in(channel)?;
        let bits = if high {
            bits | (1 << line)
        } else {
            bits & !(1 << line)
        };
        self.digital_out(channel, bits)
    }

    /// Direction mask of a digital channel; input = 1, output = 0 per line.
    pub fn line_direction(&self, channel: Channel) -> Result<u32> {
        let lib = library()?;
        let handle = self.handle();
        let mut mask: u32 = 0;

        // SAFETY: mask outlives the call.
        let code = unsafe { (lib.ad_get_line_direction)(handle, channel.raw(), &mut mask) };
        check("ad_get_line_direction", code, || {
            format!("handle {handle}, channel {channel}")
        })?;

        Ok(mask)
    }

    /// Set the direction mask of a digital channel; input = 1, output = 0.
    pub fn set_line_direction(&self, channel: Channel, mask: u32) -> Result<()> {
        let lib = library()?;
        let handle = self.handle();

        // SAFETY: all arguments pass by value.
        let code = unsafe { (lib.ad_set_line_direction)(handle, channel.raw(), mask) };
        check("ad_set_line_direction", code, || {
            format!("handle {handle}, channel {channel}, mask {mask:#x}")
        })
    }

    /// Version of the device driver backing this connection.
    pub fn driver_version(&self) -> Result<u32> {
        let lib = library()?;
        let handle = self.handle();
        let mut version: u32 = 0;

        // SAFETY: version outlives the call.
        let code = unsafe { (lib.ad_get_drv_version)(handle, &mut version) };
        check("ad_get_drv_version", code, || format!("handle {handle}"))?;

        Ok(version)
    }

    /// Product information of the device, or of one of its internal
    /// modules (`module` 0 addresses the device itself).
    pub fn product_info(&self, module: i32) -> Result<ProductInfo> {
        let lib = library()?;
        let handle = self.handle();
        let mut raw = SADProductInfo::zeroed();

        // SAFETY: raw is a valid output buffer with the exact native layout.
        let code = unsafe { (lib.ad_get_product_info)(handle, module, &mut raw) };
        check("ad_get_product_info", code, || {
            format!("handle {handle}, module {module}")
        })?;

        Ok(ProductInfo::from_raw(&raw))
    }

    /// Get an analog input subsystem accessor.
    pub fn analog_input(&self) -> AnalogInput {
        AnalogInput::new(self.clone())
    }

    /// Get an analog output subsystem accessor.
    pub fn analog_output(&self) -> AnalogOutput {
        AnalogOutput::new(self.clone())
    }

    /// Get a digital I/O subsystem accessor.
    pub fn digital_io(&self) -> DigitalIo {
        DigitalIo::new(self.clone())
    }
}

impl std::fmt::Debug for Libad4Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Libad4Device")
            .field("name", &self.inner.name)
            .field("handle", &self.inner.handle)
            .field("closed", &self.inner.closed.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libc::c_char;

    #[test]
    fn test_product_info_from_raw() {
        let mut raw = SADProductInfo::zeroed();
        raw.serial = 157;
        raw.fw_version = 0x0102;
        for (slot, byte) in raw.model.iter_mut().zip(b"USB-AD16f") {
            *slot = *byte as c_char;
        }

        let info = ProductInfo::from_raw(&raw);
        assert_eq!(info.serial, 157);
        assert_eq!(info.firmware_version, 0x0102);
        assert_eq!(info.model, "USB-AD16f");
    }
}
