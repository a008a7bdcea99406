use std::fmt;
use std::num::NonZeroU8;

use crate::{Error, Result};

/// Width in bytes of the unit runs are measured in. Never zero.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct UnitSize(NonZeroU8);

impl UnitSize {
    pub const ONE: UnitSize = UnitSize(NonZeroU8::MIN);

    pub fn new(value: u8) -> Result<UnitSize> {
        match NonZeroU8::new(value) {
            Some(v) => Ok(UnitSize(v)),
            None => Err(Error::InvalidArgument("unit size must not be zero".into())),
        }
    }

    #[inline(always)]
    pub fn get(self) -> u8 {
        self.0.get()
    }

    #[inline(always)]
    pub fn bytes(self) -> usize {
        self.0.get() as usize
    }
}

impl Default for UnitSize {
    fn default() -> Self {
        UnitSize::ONE
    }
}

impl TryFrom<u8> for UnitSize {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        UnitSize::new(value)
    }
}

impl fmt::Display for UnitSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
