use core::fmt;

/// Width of every register this crate talks to.
pub const REGISTER_WIDTH: usize = core::mem::size_of::<u32>();

/// Word-sized register access at byte offsets from a peripheral base.
///
/// Drivers are written against this trait so the same logic can drive real
/// hardware through [`MmioBlock`] or a simulated bank in tests.
pub trait RegisterBank {
    fn read(&self, offset: usize) -> u32;
    fn write(&mut self, offset: usize, value: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmioError {
    /// Base address is not word aligned.
    MisalignedBase(usize),
    /// Span is empty or not a whole number of registers.
    InvalidSpan(usize),
    /// `base + span` wraps the address space.
    Overflow { base: usize, span: usize },
}

impl fmt::Display for MmioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MisalignedBase(base) => write!(f, "register base {:#x} is not word aligned", base),
            Self::InvalidSpan(span) => write!(f, "register span {:#x} is not a whole number of words", span),
            Self::Overflow { base, span } => {
                write!(f, "register block {:#x}+{:#x} overflows the address space", base, span)
            }
        }
    }
}

/// A block of volatile, word-sized device registers at a fixed physical address.
#[derive(Debug)]
pub struct MmioBlock {
    base: usize,
    span: usize,
}

impl MmioBlock {
    /// Checks alignment and span of a register block without taking ownership of it.
    pub const fn validate(base: usize, span: usize) -> Result<(), MmioError> {
        if base % REGISTER_WIDTH != 0 {
            return Err(MmioError::MisalignedBase(base));
        }
        if span == 0 || span % REGISTER_WIDTH != 0 {
            return Err(MmioError::InvalidSpan(span));
        }
        if base.checked_add(span).is_none() {
            return Err(MmioError::Overflow { base, span });
        }
        Ok(())
    }

    /// # Safety
    ///
    /// `base..base + span` must be device registers that stay mapped for the
    /// lifetime of the block, and nothing else may access them concurrently.
    pub const unsafe fn new(base: usize, span: usize) -> Result<Self, MmioError> {
        match Self::validate(base, span) {
            Ok(()) => Ok(Self { base, span }),
            Err(e) => Err(e),
        }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn span(&self) -> usize {
        self.span
    }

    fn register(&self, offset: usize) -> *mut u32 {
        debug_assert!(offset % REGISTER_WIDTH == 0, "unaligned register offset {:#x}", offset);
        debug_assert!(offset + REGISTER_WIDTH <= self.span, "register offset {:#x} out of block", offset);
        (self.base + offset) as *mut u32
    }
}

impl RegisterBank for MmioBlock {
    fn read(&self, offset: usize) -> u32 {
        // SAFETY: the constructor contract guarantees the address is a live register.
        unsafe { core::ptr::read_volatile(self.register(offset)) }
    }

    fn write(&mut self, offset: usize, value: u32) {
        // SAFETY: as above; `&mut self` makes this the only accessor.
        unsafe { core::ptr::write_volatile(self.register(offset), value) }
    }
}
