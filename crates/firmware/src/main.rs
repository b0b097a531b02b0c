#![no_main]
#![no_std]

use panic_halt as _;
use riscv_rt::entry;

use fugarv_core::{Uart, BANNER};

#[entry]
fn main() -> ! {
    // SAFETY: single hart, nothing else has been set up yet.
    unsafe { riscv::interrupt::disable() };

    // SAFETY: the UART block is fixed on this board and this is its only owner.
    let mut uart = match unsafe { Uart::board() } {
        Ok(uart) => uart,
        Err(e) => panic!("{}", e),
    };
    uart.enable();
    uart.write_str(BANNER);

    let mut count: u32 = 0;
    loop {
        count = core::hint::black_box(count.wrapping_add(1));
    }
}
