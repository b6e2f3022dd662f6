//! Bit/byte encoder
//!
//! Each payload byte becomes eight symbols, one per bit. Progress is kept as
//! a (byte, bit) pair so encoding can stop after any whole symbol.

use super::{EncodeOutcome, Encoder, SymbolSink};
use crate::error::EncodeError;
use crate::symbol::Symbol;
use crate::timing::TimingConfig;

const BITS_PER_BYTE: usize = 8;

/// Order in which the bits of a byte go out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    /// Bit 7 first (WS2812, SK68XX).
    #[default]
    MsbFirst,
    LsbFirst,
}

#[derive(Debug, Clone)]
pub struct BytesEncoder {
    bit0: Symbol,
    bit1: Symbol,
    order: BitOrder,
    byte_index: usize,
    bit_index: usize,
}

impl BytesEncoder {
    /// Create an encoder sending `bit0` and `bit1` for zero and one bits.
    pub const fn new(bit0: Symbol, bit1: Symbol, order: BitOrder) -> Self {
        Self {
            bit0,
            bit1,
            order,
            byte_index: 0,
            bit_index: 0,
        }
    }

    /// Encoder using the bit templates of `timing`.
    pub const fn from_timing(timing: &TimingConfig, order: BitOrder) -> Self {
        Self::new(timing.bit0(), timing.bit1(), order)
    }

    /// All eight symbols of `byte`, in transmission order.
    pub fn encode_byte(&self, byte: u8) -> [Symbol; BITS_PER_BYTE] {
        core::array::from_fn(|position| {
            let shift = match self.order {
                BitOrder::MsbFirst => BITS_PER_BYTE - 1 - position,
                BitOrder::LsbFirst => position,
            };
            if (byte >> shift) & 1 == 1 {
                self.bit1
            } else {
                self.bit0
            }
        })
    }

    /// Position of the next symbol to emit as (byte, bit).
    pub const fn progress(&self) -> (usize, usize) {
        (self.byte_index, self.bit_index)
    }
}

impl Encoder for BytesEncoder {
    fn encode<S: SymbolSink + ?Sized>(
        &mut self,
        sink: &mut S,
        data: &[u8],
    ) -> Result<EncodeOutcome, EncodeError> {
        if self.byte_index > data.len() || (self.byte_index == data.len() && self.bit_index != 0)
        {
            return Err(EncodeError::ProgressOutOfRange {
                byte_index: self.byte_index,
                len: data.len(),
            });
        }

        let mut encoded = 0;
        while let Some(&byte) = data.get(self.byte_index) {
            let symbols = self.encode_byte(byte);
            let pending = &symbols[self.bit_index..];
            let accepted = sink.accept(pending);
            let count = accepted.count.min(pending.len());

            encoded += count;
            self.bit_index += count;
            if self.bit_index == BITS_PER_BYTE {
                self.byte_index += 1;
                self.bit_index = 0;
            }

            let more_data = self.byte_index < data.len();
            if count < pending.len() || (accepted.full && more_data) {
                return Ok(EncodeOutcome::Yielded(encoded));
            }
        }

        self.reset();
        Ok(EncodeOutcome::Completed(encoded))
    }

    fn reset(&mut self) {
        self.byte_index = 0;
        self.bit_index = 0;
    }
}
