//! Register-level building blocks shared by the FugaRV firmware and its host tests.
//!
//! Nothing in here allocates or touches `std`, so the same driver code runs on the
//! bare RV32I target and against a simulated register bank on the host.

#![no_std]

#[cfg(test)]
extern crate alloc;

pub mod mmio;
pub mod poll;
pub mod uart;

#[cfg(test)]
mod sim;

/// Banner the UART firmware prints once after enabling the peripheral.
pub const BANNER: &str = "Hello, from FugaRV!\n";

pub use mmio::{MmioBlock, MmioError, RegisterBank};
pub use uart::Uart;
