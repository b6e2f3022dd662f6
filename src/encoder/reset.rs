use super::{EncodeOutcome, SymbolSink};
use crate::symbol::Symbol;
use crate::timing::TimingConfig;

/// Emits the single latch symbol that ends a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetEncoder {
    code: Symbol,
}

impl ResetEncoder {
    /// Create an encoder of the latch symbol of `timing`.
    pub const fn new(timing: &TimingConfig) -> Self {
        Self {
            code: timing.reset_code(),
        }
    }

    /// Latch symbol this encoder sends.
    pub const fn code(&self) -> Symbol {
        self.code
    }

    /// Append the latch symbol, or yield if the sink has no room.
    pub fn encode<S: SymbolSink + ?Sized>(&self, sink: &mut S) -> EncodeOutcome {
        if sink.accept(&[self.code]).count == 1 {
            EncodeOutcome::Completed(1)
        } else {
            EncodeOutcome::Yielded(0)
        }
    }
}
