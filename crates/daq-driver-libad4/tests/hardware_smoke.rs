//! LIBAD4 Hardware Smoke Test Suite
//!
//! Smoke tests for verifying LIBAD4 device connectivity and operation.
//! There is no software simulation layer in the vendor library, so the
//! whole suite runs against a physically connected measurement system and
//! skips itself otherwise.
//!
//! Target hardware: BMCM meM-ADfo on USB, analog inputs wired for the
//! +-5.12 V range.
//!
//! # Environment Variables
//!
//! Required:
//! - `LIBAD4_SMOKE_TEST=1` - Enable the test suite
//!
//! Optional:
//! - `LIBAD4_DEVICE` - Device name (default: "memadfpusb")
//!
//! # Running
//!
//! ```bash
//! export LIBAD4_SMOKE_TEST=1
//! cargo test -p daq-driver-libad4 --test hardware_smoke
//! ```
//!
//! # Test Coverage
//!
//! | Test | Description |
//! |------|-------------|
//! | `open_close_test` | Open device, close without error |
//! | `library_version_test` | Library version with no device open |
//! | `device_metadata_test` | Driver version and product info |
//! | `range_info_test` | Range count and the fixture's +-5.12 V range |
//! | `analog_input_test` | Raw reads at 32/64 bit, conversion, voltage read |
//! | `multi_read_test` | Batched read length property |
//! | `round_trip_test` | Voltage -> sample -> voltage within resolution |
//! | `analog_output_test` | Raw and voltage writes |
//! | `digital_io_test` | Bit-field, line and direction access |

use daq_driver_libad4::{Channel, ChannelType, Libad4Device};
use std::env;

// =============================================================================
// Test Configuration
// =============================================================================

/// Check if the smoke test is enabled via environment variable
fn smoke_test_enabled() -> bool {
    env::var("LIBAD4_SMOKE_TEST")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false)
}

/// Get the device name from the environment or default to memadfpusb
fn device_name() -> String {
    env::var("LIBAD4_DEVICE").unwrap_or_else(|_| "memadfpusb".to_string())
}

/// Skip test with message if the smoke test is not enabled
macro_rules! skip_if_disabled {
    () => {
        if !smoke_test_enabled() {
            println!("LIBAD4 smoke test skipped (set LIBAD4_SMOKE_TEST=1 to enable)");
            return;
        }
    };
}

fn open_device() -> Libad4Device {
    let name = device_name();
    Libad4Device::open(&name)
        .unwrap_or_else(|err| panic!("failed to open device '{}': {}", name, err))
}

// =============================================================================
// Fixture Expectations (meM-ADfo)
// =============================================================================

/// The fixture's analog input channel used by the range tests
const TEST_AI_CHANNEL: u32 = 1;

/// Expected bounds of range 0 on the fixture
const EXPECTED_RANGE_MIN: f64 = -5.12;
const EXPECTED_RANGE_MAX: f64 = 5.12;

// =============================================================================
// Tests
// =============================================================================

#[test]
fn open_close_test() {
    skip_if_disabled!();

    let device = open_device();
    println!("Opened device: {:?}", device);

    // Close after a successful open must not fail.
    device.close().expect("close after successful open failed");
}

#[test]
fn library_version_test() {
    skip_if_disabled!();

    // No handle required, independent of connection state.
    let version = daq_driver_libad4::library_version().expect("library not loadable");
    println!("LIBAD4 library version: {:#x}", version);
    assert!(version >= 0);
}

#[test]
fn device_metadata_test() {
    skip_if_disabled!();

    let device = open_device();

    let driver_version = device.driver_version().expect("driver version query failed");
    println!("Driver version: {:#x}", driver_version);

    let info = device.product_info(0).expect("product info query failed");
    println!(
        "Product: {} (serial {}, firmware {:#x})",
        info.model, info.serial, info.firmware_version
    );

    device.close().expect("close failed");
}

#[test]
fn range_info_test() {
    skip_if_disabled!();

    let device = open_device();
    let ai = device.analog_input();

    let count = ai.range_count(0).expect("range count query failed");
    println!("Analog input ranges: {}", count);
    assert_eq!(count, 1);

    let info = ai
        .range_info(TEST_AI_CHANNEL, 0)
        .expect("range info query failed");
    println!("Range 0: {}", info.description());
    assert_eq!(info.min, EXPECTED_RANGE_MIN);
    assert_eq!(info.max, EXPECTED_RANGE_MAX);
    assert!(info.bits_per_sample > 0);

    device.close().expect("close failed");
}

#[test]
fn analog_input_test() {
    skip_if_disabled!();

    let device = open_device();
    let ai = device.analog_input();

    // Raw 32-bit read plus native conversion.
    let sample = ai
        .read_raw(TEST_AI_CHANNEL, 0)
        .expect("32-bit read failed");
    let volts = ai
        .to_voltage(TEST_AI_CHANNEL, 0, sample)
        .expect("sample conversion failed");
    println!("CH{}: raw {} = {:+.4} V", TEST_AI_CHANNEL, sample, volts);
    assert!(volts.is_finite());

    // Raw 64-bit read plus native conversion.
    let sample64 = ai
        .read_raw64(TEST_AI_CHANNEL, 0)
        .expect("64-bit read failed");
    let volts64 = ai
        .to_voltage64(TEST_AI_CHANNEL, 0, sample64)
        .expect("64-bit sample conversion failed");
    println!("CH{}: raw {} = {:+.6} V", TEST_AI_CHANNEL, sample64, volts64);

    // Composite voltage read performed natively in one call.
    let direct = ai
        .read_voltage(TEST_AI_CHANNEL, 0)
        .expect("voltage read failed");
    assert!(direct.is_finite());

    device.close().expect("close failed");
}

#[test]
fn multi_read_test() {
    skip_if_disabled!();

    let device = open_device();

    let channels = [
        Channel::new(ChannelType::AnalogIn, 1),
        Channel::new(ChannelType::AnalogIn, 2),
    ];
    let ranges = [0, 0];

    // Result length equals input length.
    let samples = device
        .discrete_in_multi(&channels, &ranges)
        .expect("batched read failed");
    assert_eq!(samples.len(), channels.len());

    device.close().expect("close failed");
}

#[test]
fn round_trip_test() {
    skip_if_disabled!();

    let device = open_device();
    let ai = device.analog_input();

    let info = ai
        .range_info(TEST_AI_CHANNEL, 0)
        .expect("range info query failed");

    // Converting a voltage to a sample and back should recover the
    // original voltage within the range's stated resolution. Exercised
    // against live hardware, so a tolerance, not exact equality.
    let target: f32 = 1.0;
    let sample = ai
        .from_voltage(TEST_AI_CHANNEL, 0, target)
        .expect("voltage to sample failed");
    let recovered = ai
        .to_voltage(TEST_AI_CHANNEL, 0, sample)
        .expect("sample to voltage failed");

    println!(
        "round trip: {:.4} V -> {} -> {:.4} V (resolution {})",
        target, sample, recovered, info.resolution
    );
    assert!(
        (f64::from(recovered) - f64::from(target)).abs() <= info.resolution,
        "round trip deviates by more than one resolution step"
    );

    device.close().expect("close failed");
}

#[test]
fn analog_output_test() {
    skip_if_disabled!();

    let device = open_device();
    let ao = device.analog_output();

    // Convert, write raw, then write the voltage directly.
    let sample = ao.from_voltage(1, 0, 5.0).expect("conversion failed");
    ao.write_raw(1, 0, sample).expect("raw write failed");
    ao.write_voltage(1, 0, 5.0).expect("voltage write failed");

    // Batched write across both output channels.
    ao.write_multi(&[1, 2], &[0, 0], &[sample, sample])
        .expect("batched write failed");

    device.close().expect("close failed");
}

#[test]
fn digital_io_test() {
    skip_if_disabled!();

    let device = open_device();
    let dio = device.digital_io();

    // All lines inputs, then read the bit field.
    dio.set_direction(0, 0xffff).expect("set direction failed");
    let mask = dio.direction(0).expect("get direction failed");
    println!("direction mask: {:#06x}", mask);

    let bits = dio.read(0).expect("digital read failed");
    println!("digital bit field: {:#x}", bits);

    // Drive line 0 as output and exercise the line accessors.
    dio.configure_line(0, 0, daq_driver_libad4::DioDirection::Output)
        .expect("configure line failed");
    dio.write(0, 0xf).expect("digital write failed");
    dio.set_high(0, 0).expect("set line failed");
    let line = dio.read_line(0, 0).expect("read line failed");
    println!("line 0: {}", line);

    device.close().expect("close failed");
}
