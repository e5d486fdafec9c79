//! Subsystem accessors.
//!
//! This module contains convenience accessors over the flat device
//! operations, one per channel type the binding has sugar for:
//!
//! - [`analog_input`] - Analog input (AI) channels
//! - [`analog_output`] - Analog output (AO) channels
//! - [`digital_io`] - Digital I/O (DIO) channels
//!
//! The accessors add no native calls and no state of their own; they only
//! compose channel identifiers and delegate to the device.

pub mod analog_input;
pub mod analog_output;
pub mod digital_io;

use libc::c_char;

use libad4_sys::SADRangeInfo;

/// Measurement range information for a channel.
///
/// Owned copy of the native [`SADRangeInfo`] record; produced by the native
/// layer, the binding never computes any of these values itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeInfo {
    /// Lower bound of the range
    pub min: f64,
    /// Upper bound of the range
    pub max: f64,
    /// Smallest distinguishable step within the range
    pub resolution: f64,
    /// Bits per sample at this range
    pub bits_per_sample: i32,
    /// Unit of the bounds, e.g. "V"
    pub unit: String,
}

impl RangeInfo {
    /// Copy a native range record into caller space.
    pub(crate) fn from_raw(raw: &SADRangeInfo) -> Self {
        Self {
            min: raw.min,
            max: raw.max,
            resolution: raw.res,
            bits_per_sample: raw.bps,
            unit: fixed_c_string(&raw.unit),
        }
    }

    /// Get the span (max - min) of this range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check if this is a bipolar range (includes negative values).
    pub fn is_bipolar(&self) -> bool {
        self.min < 0.0
    }

    /// Check if this is a unipolar range (0 to max).
    pub fn is_unipolar(&self) -> bool {
        self.min >= 0.0
    }

    /// Human-readable description of the range.
    pub fn description(&self) -> String {
        format!("{:.3} to {:.3} {}", self.min, self.max, self.unit)
    }
}

/// Convert a fixed-size native character buffer into an owned string,
/// stopping at the first NUL.
pub(crate) fn fixed_c_string(buf: &[c_char]) -> String {
    let bytes: Vec<u8> = buf
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use libad4_sys::AD_UNIT_LEN;

    fn volt_range() -> SADRangeInfo {
        let mut raw = SADRangeInfo::zeroed();
        raw.min = -5.12;
        raw.max = 5.12;
        raw.res = 0.00016;
        raw.bps = 16;
        raw.unit[0] = b'V' as c_char;
        raw
    }

    #[test]
    fn test_from_raw_copies_all_fields() {
        let info = RangeInfo::from_raw(&volt_range());
        assert_eq!(info.min, -5.12);
        assert_eq!(info.max, 5.12);
        assert_eq!(info.resolution, 0.00016);
        assert_eq!(info.bits_per_sample, 16);
        assert_eq!(info.unit, "V");
    }

    #[test]
    fn test_span_and_polarity() {
        let info = RangeInfo::from_raw(&volt_range());
        assert!((info.span() - 10.24).abs() < 1e-9);
        assert!(info.is_bipolar());
        assert!(!info.is_unipolar());
    }

    #[test]
    fn test_description() {
        let info = RangeInfo::from_raw(&volt_range());
        assert_eq!(info.description(), "-5.120 to 5.120 V");
    }

    #[test]
    fn test_fixed_c_string_stops_at_nul() {
        let mut buf = [0 as c_char; AD_UNIT_LEN];
        for (slot, byte) in buf.iter_mut().zip(b"mA\0garbage") {
            *slot = *byte as c_char;
        }
        assert_eq!(fixed_c_string(&buf), "mA");
    }

    #[test]
    fn test_fixed_c_string_full_buffer() {
        let buf = [b'x' as c_char; 4];
        assert_eq!(fixed_c_string(&buf), "xxxx");
    }
}
