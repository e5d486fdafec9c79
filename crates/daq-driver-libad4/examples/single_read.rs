//! Single-sample analog input example.
//!
//! Demonstrates basic analog input reading from a LIBAD4 device.
//!
//! # Usage
//!
//! ```bash
//! cargo build -p daq-driver-libad4 --example single_read
//!
//! # Run (requires a connected device and the vendor library)
//! ./target/debug/examples/single_read usbbase:0
//! ```

use daq_driver_libad4::Libad4Device;
use std::env;

fn main() -> anyhow::Result<()> {
    // Get the device name from args or use the default
    let name = env::args().nth(1).unwrap_or_else(|| "usbbase:0".to_string());

    println!("LIBAD4 library version: {:#x}", daq_driver_libad4::library_version()?);
    println!("Opening device: {}", name);

    let device = Libad4Device::open(&name)?;

    // Print device info
    let info = device.product_info(0)?;
    println!("\nDevice Information:");
    println!("  Model:    {}", info.model);
    println!("  Serial:   {}", info.serial);
    println!("  Firmware: {:#x}", info.firmware_version);
    println!("  Driver:   {:#x}", device.driver_version()?);

    // Get the analog input subsystem
    let ai = device.analog_input();

    let ranges = ai.ranges(1)?;
    println!("\nAnalog Input Ranges:");
    for (index, range) in ranges.iter().enumerate() {
        println!("  Range {}: {}", index, range.description());
    }

    // Read from the first 4 channels
    println!("\nReading voltages:");
    for ch in 1..=4 {
        let volts = ai.read_voltage(ch, 0)?;
        println!("  CH{}: {:+.4} V", ch, volts);
    }

    // Also show raw ADC values
    println!("\nRaw ADC values:");
    for ch in 1..=4 {
        let raw = ai.read_raw(ch, 0)?;
        let volts = ai.to_voltage(ch, 0, raw)?;
        println!("  CH{}: {} ({:+.4} V)", ch, raw, volts);
    }

    device.close()?;
    println!("\nDone.");
    Ok(())
}
