//! Hardware transmit channel abstraction.
//!
//! A [`TxChannel`] owns the output pin and a bounded symbol memory. It pulls
//! symbols from an [`Encoder`] whenever its memory has room and reports
//! completion of queued transactions. The encoder only ever sees the
//! "buffer full" answers of the channel's [`SymbolSink`](crate::encoder::SymbolSink).

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Duration;
use heapless::Deque;

use crate::encoder::Encoder;
use crate::error::ChannelError;

/// Static parameters of a transmit channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Output GPIO number.
    pub gpio: u8,
    /// Channel clock, ticks per second.
    pub resolution_hz: u32,
    /// Symbols the channel memory holds before it must be drained.
    pub mem_block_symbols: usize,
    /// Transactions that may be pending in the background.
    pub trans_queue_depth: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            gpio: 18,
            // 1 tick = 0.1us
            resolution_hz: 10_000_000,
            mem_block_symbols: 64,
            trans_queue_depth: 4,
        }
    }
}

/// Transmit path to the strip.
pub trait TxChannel: Sized {
    /// Allocate the channel; it starts disabled.
    fn create(config: &ChannelConfig) -> Result<Self, ChannelError>;

    fn enable(&mut self) -> Result<(), ChannelError>;

    fn disable(&mut self) -> Result<(), ChannelError>;

    /// Queue one transaction of `payload`, pulling symbols from `encoder`.
    ///
    /// Returns the number of symbols queued.
    fn transmit<E: Encoder>(&mut self, encoder: &mut E, payload: &[u8]) -> Result<usize, ChannelError>;

    /// Block until every queued transaction is on the wire.
    fn wait_all_done(&mut self, timeout: Duration) -> Result<(), ChannelError>;
}

/// One queued transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    pub id: u32,
    pub symbols: usize,
}

/// Error returned when the queue already holds `depth` transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFullError(pub Transaction);

/// Pending transactions of a channel.
///
/// Shared between the submitting context and the completion interrupt, so
/// every access goes through a critical section. `SIZE` is the static
/// capacity, `depth` the configured limit.
pub struct TransactionQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<Transaction, SIZE>>>,
    depth: usize,
}

impl<const SIZE: usize> TransactionQueue<SIZE> {
    /// Create an empty queue holding at most `depth` transactions.
    ///
    /// `depth` is clamped to `SIZE`.
    pub const fn new(depth: usize) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
            depth: if depth < SIZE { depth } else { SIZE },
        }
    }

    /// Maximum number of queued transactions.
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Try to queue a transaction.
    pub fn try_push(&self, transaction: Transaction) -> Result<(), QueueFullError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            if queue.len() >= self.depth {
                return Err(QueueFullError(transaction));
            }
            queue
                .push_back(transaction)
                .map_err(QueueFullError)
        })
    }

    /// Take the oldest transaction, as the hardware does when it finishes one.
    pub fn pop(&self) -> Option<Transaction> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Take the newest transaction, undoing a submission that never started.
    pub fn pop_newest(&self) -> Option<Transaction> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_back())
    }

    /// Record the symbol count of the newest transaction.
    pub fn set_newest_symbols(&self, symbols: usize) {
        critical_section::with(|cs| {
            if let Some(last) = self.inner.borrow(cs).borrow_mut().back_mut() {
                last.symbols = symbols;
            }
        });
    }

    /// Number of queued transactions.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every queued transaction.
    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().clear());
    }
}

impl<const SIZE: usize> Default for TransactionQueue<SIZE> {
    fn default() -> Self {
        Self::new(SIZE)
    }
}
