//! Transmission sequencer
//!
//! Drives the byte encoder over the pixel payload and then appends the latch
//! symbol. Each call continues from the saved phase and progress; when the
//! pixel data runs out inside a call the latch is attempted in the same call.

use super::{BitOrder, BytesEncoder, EncodeOutcome, Encoder, ResetEncoder, SymbolSink};
use crate::error::EncodeError;
use crate::timing::TimingConfig;

/// Phase of the current transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodePhase {
    #[default]
    SendingPixelData,
    SendingResetSymbol,
}

/// Encoder for a full strip frame: pixel bytes followed by the latch symbol.
#[derive(Debug, Clone)]
pub struct StripEncoder {
    bytes: BytesEncoder,
    reset: ResetEncoder,
    phase: EncodePhase,
}

impl StripEncoder {
    /// Create a sequencer at the start of a frame.
    pub const fn new(timing: &TimingConfig, order: BitOrder) -> Self {
        Self {
            bytes: BytesEncoder::from_timing(timing, order),
            reset: ResetEncoder::new(timing),
            phase: EncodePhase::SendingPixelData,
        }
    }

    /// Current phase of the frame.
    pub const fn phase(&self) -> EncodePhase {
        self.phase
    }

    /// Position inside the pixel payload as (byte, bit).
    pub const fn progress(&self) -> (usize, usize) {
        self.bytes.progress()
    }

    /// Encoder of the pixel payload.
    pub const fn bytes_encoder(&self) -> &BytesEncoder {
        &self.bytes
    }

    /// Encoder of the latch symbol.
    pub const fn reset_encoder(&self) -> &ResetEncoder {
        &self.reset
    }
}

impl Encoder for StripEncoder {
    fn encode<S: SymbolSink + ?Sized>(
        &mut self,
        sink: &mut S,
        data: &[u8],
    ) -> Result<EncodeOutcome, EncodeError> {
        let mut encoded = 0;
        loop {
            match self.phase {
                EncodePhase::SendingPixelData => match self.bytes.encode(sink, data)? {
                    EncodeOutcome::Yielded(count) => {
                        return Ok(EncodeOutcome::Yielded(encoded + count));
                    }
                    EncodeOutcome::Completed(count) => {
                        encoded += count;
                        self.phase = EncodePhase::SendingResetSymbol;
                    }
                },
                EncodePhase::SendingResetSymbol => match self.reset.encode(sink) {
                    EncodeOutcome::Yielded(count) => {
                        return Ok(EncodeOutcome::Yielded(encoded + count));
                    }
                    EncodeOutcome::Completed(count) => {
                        self.phase = EncodePhase::SendingPixelData;
                        return Ok(EncodeOutcome::Completed(encoded + count));
                    }
                },
            }
        }
    }

    fn reset(&mut self) {
        self.bytes.reset();
        self.phase = EncodePhase::SendingPixelData;
    }
}
