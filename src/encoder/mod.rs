//! Resumable symbol encoders
//!
//! Encoders turn a payload into [`Symbol`]s and push them into a
//! [`SymbolSink`]. A sink has bounded room: when it fills up the encoder
//! stops after the last accepted symbol, reports [`EncodeOutcome::Yielded`]
//! and picks up from the same place on the next call.

mod bytes;
mod reset;
mod strip;

pub use bytes::{BitOrder, BytesEncoder};
pub use reset::ResetEncoder;
pub use strip::{EncodePhase, StripEncoder};

use heapless::Vec;

use crate::error::EncodeError;
use crate::symbol::Symbol;

/// Result of one encode call.
///
/// Both variants carry the symbols accepted by this call only, not the
/// running total of the session. Callers that need the total add the counts
/// of every call up to and including the `Completed` one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// Sink is full; call again once it has been drained.
    Yielded(usize),
    /// Rest of the session is queued.
    Completed(usize),
}

impl EncodeOutcome {
    /// Symbols produced by this call.
    pub const fn symbols(self) -> usize {
        match self {
            Self::Yielded(count) | Self::Completed(count) => count,
        }
    }

    /// Whether the session finished with this call.
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Answer of a sink to an append request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    /// Symbols taken from the front of the offered slice.
    pub count: usize,
    /// No room left after this append.
    pub full: bool,
}

/// Bounded destination for encoded symbols.
pub trait SymbolSink {
    /// Append as many leading `symbols` as fit.
    fn accept(&mut self, symbols: &[Symbol]) -> Accepted;
}

impl<const N: usize> SymbolSink for Vec<Symbol, N> {
    fn accept(&mut self, symbols: &[Symbol]) -> Accepted {
        let take = symbols.len().min(self.capacity() - self.len());
        // Cannot fail, `take` is bounded by the free space
        let _ = self.extend_from_slice(&symbols[..take]);
        Accepted {
            count: take,
            full: self.is_full(),
        }
    }
}

/// Resumable encoder of a byte payload.
pub trait Encoder {
    /// Encode as much of `data` as `sink` accepts.
    ///
    /// Repeated calls with the same `data` continue where the previous call
    /// stopped.
    fn encode<S: SymbolSink + ?Sized>(
        &mut self,
        sink: &mut S,
        data: &[u8],
    ) -> Result<EncodeOutcome, EncodeError>;

    /// Drop any partial progress and start over with the next call.
    fn reset(&mut self);
}

/// Symbol memory with a runtime limit below its static capacity.
///
/// Models a hardware block of `limit` symbols.
#[derive(Debug, Clone)]
pub struct SymbolBlock<const N: usize> {
    symbols: Vec<Symbol, N>,
    limit: usize,
}

impl<const N: usize> SymbolBlock<N> {
    /// Create an empty block holding at most `limit` symbols.
    ///
    /// `limit` is clamped to `N`.
    pub const fn new(limit: usize) -> Self {
        Self {
            symbols: Vec::new(),
            limit: if limit < N { limit } else { N },
        }
    }

    /// Symbols the block can hold.
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Symbols currently held.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Whether the block has reached its limit.
    pub fn is_full(&self) -> bool {
        self.symbols.len() >= self.limit
    }

    /// Held symbols in the order they were accepted.
    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Empty the block, as the hardware does after sending it.
    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}

impl<const N: usize> SymbolSink for SymbolBlock<N> {
    fn accept(&mut self, symbols: &[Symbol]) -> Accepted {
        let free = self.limit.saturating_sub(self.symbols.len());
        let take = symbols.len().min(free);
        let _ = self.symbols.extend_from_slice(&symbols[..take]);
        Accepted {
            count: take,
            full: self.is_full(),
        }
    }
}
