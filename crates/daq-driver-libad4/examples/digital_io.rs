//! Digital I/O example.
//!
//! Demonstrates direction control, bit-field and per-line access on a
//! LIBAD4 device's digital channel.
//!
//! # Usage
//!
//! ```bash
//! cargo build -p daq-driver-libad4 --example digital_io
//! ./target/debug/examples/digital_io usbbase:0
//! ```

use daq_driver_libad4::{DioDirection, Libad4Device};
use std::env;
use std::thread;
use std::time::Duration;

const CHANNEL: u32 = 0;

fn main() -> anyhow::Result<()> {
    let name = env::args().nth(1).unwrap_or_else(|| "usbbase:0".to_string());

    println!("Opening device: {}", name);
    let device = Libad4Device::open(&name)?;
    let dio = device.digital_io();

    // Lines 0..3 as outputs, the rest as inputs
    dio.set_direction(CHANNEL, 0xfff0)?;
    println!("direction mask: {:#06x}", dio.direction(CHANNEL)?);

    // Walk a bit pattern over the output lines
    println!("\nWalking output lines:");
    for line in 0..4 {
        dio.set_high(CHANNEL, line)?;
        println!("  line {} high, bit field {:#x}", line, dio.read(CHANNEL)?);
        thread::sleep(Duration::from_millis(100));
        dio.set_low(CHANNEL, line)?;
    }

    // Flip one line back to input and sample it
    dio.configure_line(CHANNEL, 0, DioDirection::Input)?;
    println!("\nline 0 as input: {}", dio.read_line(CHANNEL, 0)?);

    device.close()?;
    Ok(())
}
