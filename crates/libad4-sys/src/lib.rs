//! Low-level FFI bindings for the BMCM LIBAD4 driver library.
//!
//! This crate provides raw, unsafe bindings to `libad4`, the vendor-supplied
//! user-space driver for BMCM analog/digital measurement systems (meM-AD,
//! USB-AD16f, LAN-AD16f and friends).
//!
//! Unlike a link-time `-sys` crate, the vendor library is located and loaded
//! at runtime: [`LibAd4::load`] first looks for the library file next to the
//! running executable and falls back to the platform's standard dynamic
//! library search path. All entry points are resolved once at load time into
//! a [`LibAd4`] function table.
//!
//! # Safety
//!
//! All function pointers in this crate are direct FFI bindings with the raw
//! C signatures. For a safe wrapper, use the `daq-driver-libad4` crate
//! instead.
//!
//! # Example (unsafe)
//!
//! ```no_run
//! use libad4_sys::LibAd4;
//! use std::ffi::CString;
//!
//! unsafe {
//!     let lib = LibAd4::load().expect("libad4 not installed");
//!     let name = CString::new("usbbase:0").unwrap();
//!     let handle = (lib.ad_open)(name.as_ptr());
//!     if handle != libad4_sys::AD_INVALID_HANDLE {
//!         (lib.ad_close)(handle);
//!     }
//! }
//! ```

#![allow(non_camel_case_types)]
#![allow(missing_docs)]
#![allow(clippy::missing_safety_doc)]

use std::path::PathBuf;

use libc::{c_char, c_int};
use libloading::Library;

/// Platform file name of the vendor library.
#[cfg(target_os = "windows")]
pub const LIBRARY_NAME: &str = "libad4.dll";
/// Platform file name of the vendor library.
#[cfg(target_os = "macos")]
pub const LIBRARY_NAME: &str = "libad4.dylib";
/// Platform file name of the vendor library.
#[cfg(all(unix, not(target_os = "macos")))]
pub const LIBRARY_NAME: &str = "libad4.so";

// Channel identifiers: the high-order byte selects the channel type, the
// low-order 24 bits select the channel index within that type.
pub const AD_CHA_TYPE_MASK: u32 = 0xff00_0000;
pub const AD_CHA_ID_MASK: u32 = 0x00ff_ffff;
pub const AD_CHA_TYPE_ANALOG_IN: u32 = 0x0100_0000;
pub const AD_CHA_TYPE_ANALOG_OUT: u32 = 0x0200_0000;
pub const AD_CHA_TYPE_DIGITAL_IO: u32 = 0x0300_0000;
pub const AD_CHA_TYPE_SYNC: u32 = 0x0500_0000;
pub const AD_CHA_TYPE_ROUTE: u32 = 0x0600_0000;
pub const AD_CHA_TYPE_CAN: u32 = 0x0700_0000;
pub const AD_CHA_TYPE_COUNTER: u32 = 0x0800_0000;
pub const AD_CHA_TYPE_ANALOG_COUNTER: u32 = 0x0900_0000;

/// Sentinel returned by `ad_open` when no connection could be established.
pub const AD_INVALID_HANDLE: i32 = -1;

/// Return code signalling success; any other value is a driver error code.
pub const AD_RETURN_CODE_OK: i32 = 0;

/// Length of the unit string buffer in [`SADRangeInfo`].
pub const AD_UNIT_LEN: usize = 24;
/// Length of the model string buffer in [`SADProductInfo`].
pub const AD_MODEL_LEN: usize = 32;

/// Measurement range description as filled in by `ad_get_range_info`.
///
/// Field order, widths and the fixed-size unit buffer match the native ABI
/// exactly; do not reorder.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SADRangeInfo {
    pub min: f64,
    pub max: f64,
    pub res: f64,
    pub bps: c_int,
    pub unit: [c_char; AD_UNIT_LEN],
}

impl SADRangeInfo {
    /// An all-zero record suitable as an output buffer.
    pub const fn zeroed() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            res: 0.0,
            bps: 0,
            unit: [0; AD_UNIT_LEN],
        }
    }
}

/// Product description as filled in by `ad_get_product_info`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SADProductInfo {
    pub serial: u32,
    pub fw_version: u32,
    pub model: [c_char; AD_MODEL_LEN],
}

impl SADProductInfo {
    /// An all-zero record suitable as an output buffer.
    pub const fn zeroed() -> Self {
        Self {
            serial: 0,
            fw_version: 0,
            model: [0; AD_MODEL_LEN],
        }
    }
}

/// Resolved function table for the LIBAD4 entry points.
///
/// The [`Library`] handle is kept inside the table, so the function pointers
/// stay valid for as long as the table itself is alive. Every pointer uses
/// the C calling convention; scalar arguments pass by value, outputs pass by
/// address, arrays pass as pointer plus element count.
pub struct LibAd4 {
    pub ad_open: unsafe extern "C" fn(name: *const c_char) -> i32,
    pub ad_close: unsafe extern "C" fn(handle: i32) -> i32,

    pub ad_get_range_count:
        unsafe extern "C" fn(handle: i32, channel: i32, count: *mut i32) -> i32,
    pub ad_get_range_info:
        unsafe extern "C" fn(handle: i32, channel: i32, range: i32, info: *mut SADRangeInfo) -> i32,

    pub ad_discrete_in:
        unsafe extern "C" fn(handle: i32, channel: i32, range: i32, data: *mut u32) -> i32,
    pub ad_discrete_in64:
        unsafe extern "C" fn(handle: i32, channel: i32, range: i32, data: *mut u64) -> i32,
    pub ad_discrete_inv: unsafe extern "C" fn(
        handle: i32,
        count: i32,
        channels: *const i32,
        ranges: *const i32,
        data: *mut u32,
    ) -> i32,
    pub ad_discrete_out:
        unsafe extern "C" fn(handle: i32, channel: i32, range: i32, data: u32) -> i32,
    pub ad_discrete_out64:
        unsafe extern "C" fn(handle: i32, channel: i32, range: i32, data: u64) -> i32,
    pub ad_discrete_outv: unsafe extern "C" fn(
        handle: i32,
        count: i32,
        channels: *const i32,
        ranges: *const i32,
        data: *const u32,
    ) -> i32,

    pub ad_sample_to_float:
        unsafe extern "C" fn(handle: i32, channel: i32, range: i32, data: u32, volt: *mut f32)
            -> i32,
    pub ad_sample_to_float64:
        unsafe extern "C" fn(handle: i32, channel: i32, range: i32, data: u64, volt: *mut f64)
            -> i32,
    pub ad_float_to_sample:
        unsafe extern "C" fn(handle: i32, channel: i32, range: i32, volt: f32, data: *mut u32)
            -> i32,
    pub ad_float_to_sample64:
        unsafe extern "C" fn(handle: i32, channel: i32, range: i32, volt: f64, data: *mut u64)
            -> i32,

    pub ad_analog_in:
        unsafe extern "C" fn(handle: i32, channel: i32, range: i32, volt: *mut f32) -> i32,
    pub ad_analog_out:
        unsafe extern "C" fn(handle: i32, channel: i32, range: i32, volt: f32) -> i32,

    pub ad_get_line_direction:
        unsafe extern "C" fn(handle: i32, channel: i32, mask: *mut u32) -> i32,
    pub ad_set_line_direction:
        unsafe extern "C" fn(handle: i32, channel: i32, mask: u32) -> i32,

    pub ad_get_version: unsafe extern "C" fn() -> i32,
    pub ad_get_drv_version: unsafe extern "C" fn(handle: i32, version: *mut u32) -> i32,
    pub ad_get_product_info:
        unsafe extern "C" fn(handle: i32, id: i32, info: *mut SADProductInfo) -> i32,

    _lib: Library,
}

impl LibAd4 {
    /// Load the vendor library and resolve all entry points.
    ///
    /// The library file is searched next to the running executable first,
    /// then through the platform's standard dynamic library search path.
    ///
    /// # Safety
    ///
    /// Loading a dynamic library executes its initializers; the caller must
    /// trust the resolved `libad4` to be the genuine vendor driver.
    pub unsafe fn load() -> Result<Self, libloading::Error> {
        let lib = match local_library_path() {
            Some(path) => Library::new(path)?,
            None => Library::new(LIBRARY_NAME)?,
        };
        Self::from_library(lib)
    }

    /// Resolve all entry points from an already loaded library.
    ///
    /// # Safety
    ///
    /// The library must export the LIBAD4 entry points with the exact
    /// signatures declared on this struct.
    pub unsafe fn from_library(lib: Library) -> Result<Self, libloading::Error> {
        Ok(Self {
            ad_open: *lib.get(b"ad_open\0")?,
            ad_close: *lib.get(b"ad_close\0")?,
            ad_get_range_count: *lib.get(b"ad_get_range_count\0")?,
            ad_get_range_info: *lib.get(b"ad_get_range_info\0")?,
            ad_discrete_in: *lib.get(b"ad_discrete_in\0")?,
            ad_discrete_in64: *lib.get(b"ad_discrete_in64\0")?,
            ad_discrete_inv: *lib.get(b"ad_discrete_inv\0")?,
            ad_discrete_out: *lib.get(b"ad_discrete_out\0")?,
            ad_discrete_out64: *lib.get(b"ad_discrete_out64\0")?,
            ad_discrete_outv: *lib.get(b"ad_discrete_outv\0")?,
            ad_sample_to_float: *lib.get(b"ad_sample_to_float\0")?,
            ad_sample_to_float64: *lib.get(b"ad_sample_to_float64\0")?,
            ad_float_to_sample: *lib.get(b"ad_float_to_sample\0")?,
            ad_float_to_sample64: *lib.get(b"ad_float_to_sample64\0")?,
            ad_analog_in: *lib.get(b"ad_analog_in\0")?,
            ad_analog_out: *lib.get(b"ad_analog_out\0")?,
            ad_get_line_direction: *lib.get(b"ad_get_line_direction\0")?,
            ad_set_line_direction: *lib.get(b"ad_set_line_direction\0")?,
            ad_get_version: *lib.get(b"ad_get_version\0")?,
            ad_get_drv_version: *lib.get(b"ad_get_drv_version\0")?,
            ad_get_product_info: *lib.get(b"ad_get_product_info\0")?,
            _lib: lib,
        })
    }
}

impl std::fmt::Debug for LibAd4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibAd4").finish_non_exhaustive()
    }
}

/// Path of the library file next to the running executable, if present.
fn local_library_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let candidate = exe.parent()?.join(LIBRARY_NAME);
    candidate.is_file().then_some(candidate)
}
