use alloc::vec::Vec;
use core::cell::Cell;

use crate::mmio::RegisterBank;
use crate::uart::{Status, CONTROL, STATUS, TX_FIFO};

/// In-memory stand-in for the UART register block.
///
/// After reset and after every transmit write, the status register reports
/// `TX_FULL` for the next `busy_polls` reads and then clears.
#[derive(Debug, Default)]
pub struct SimUart {
    busy_polls: u32,
    busy_left: Cell<u32>,
    status_reads: Cell<u32>,
    pub control: u32,
    pub tx: Vec<u8>,
    /// Status reads observed before each transmit write.
    pub polls_per_byte: Vec<u32>,
    /// Every write in order, as `(offset, value)`.
    pub writes: Vec<(usize, u32)>,
}

impl SimUart {
    pub fn new(busy_polls: u32) -> Self {
        Self {
            busy_polls,
            busy_left: Cell::new(busy_polls),
            ..Default::default()
        }
    }
}

impl RegisterBank for SimUart {
    fn read(&self, offset: usize) -> u32 {
        match offset {
            STATUS => {
                self.status_reads.set(self.status_reads.get() + 1);
                let left = self.busy_left.get();
                if left > 0 {
                    self.busy_left.set(left - 1);
                    Status::TX_FULL.bits()
                } else {
                    0
                }
            }
            CONTROL => self.control,
            _ => 0,
        }
    }

    fn write(&mut self, offset: usize, value: u32) {
        self.writes.push((offset, value));
        match offset {
            TX_FIFO => {
                self.tx.push(value as u8);
                self.polls_per_byte.push(self.status_reads.replace(0));
                self.busy_left.set(self.busy_polls);
            }
            CONTROL => self.control = value,
            _ => {}
        }
    }
}
