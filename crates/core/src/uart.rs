//! Polled driver for the FugaRV UART.
//!
//! Register map (byte offsets from [`UART_BASE`], all 32-bit):
//!
//! | offset | register |
//! |--------|----------|
//! | `0x00` | receive FIFO |
//! | `0x04` | transmit FIFO |
//! | `0x08` | status |
//! | `0x0C` | control |

use core::fmt;

use bitflags::bitflags;

use crate::mmio::{MmioBlock, MmioError, RegisterBank};
use crate::poll;

/// Physical base address of the UART on the FugaRV board.
pub const UART_BASE: usize = 0x0000_8000;
/// Size of the UART register block.
pub const UART_SPAN: usize = 0x10;

const _: () = assert!(MmioBlock::validate(UART_BASE, UART_SPAN).is_ok());

pub const RX_FIFO: usize = 0x00;
pub const TX_FIFO: usize = 0x04;
pub const STATUS: usize = 0x08;
pub const CONTROL: usize = 0x0C;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u32 {
        const TX_FULL = 1 << 3;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Control: u32 {
        const TX_ENABLE = 1 << 0;
        const RX_ENABLE = 1 << 1;
    }
}

pub struct Uart<B: RegisterBank> {
    regs: B,
}

impl Uart<MmioBlock> {
    /// Driver for the on-board UART at [`UART_BASE`].
    ///
    /// # Safety
    ///
    /// Must only be called once, on the FugaRV target, where the UART
    /// registers are mapped at [`UART_BASE`].
    pub unsafe fn board() -> Result<Self, MmioError> {
        Ok(Self::new(MmioBlock::new(UART_BASE, UART_SPAN)?))
    }
}

impl<B: RegisterBank> Uart<B> {
    pub fn new(regs: B) -> Self {
        Self { regs }
    }

    /// Turns on the transmit and receive paths. This is the only configuration
    /// the peripheral has; there is no baud rate or frame format to set.
    pub fn enable(&mut self) {
        self.regs
            .write(CONTROL, (Control::TX_ENABLE | Control::RX_ENABLE).bits());
    }

    pub fn status(&self) -> Status {
        Status::from_bits_retain(self.regs.read(STATUS))
    }

    /// Waits for room in the transmit FIFO, then queues `byte`.
    ///
    /// Returns the number of status polls it took. A FIFO that never drains
    /// blocks here forever; bytes are never dropped.
    pub fn write_byte(&mut self, byte: u8) -> u32 {
        let polls = poll::spin_while(|| self.status().contains(Status::TX_FULL));
        self.regs.write(TX_FIFO, u32::from(byte));
        polls
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    pub fn into_inner(self) -> B {
        self.regs
    }
}

impl<B: RegisterBank> fmt::Write for Uart<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Uart::write_str(self, s);
        Ok(())
    }
}
