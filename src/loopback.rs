//! Host model of a transmit channel
//!
//! Behaves like the hardware as far as the encoder can tell: symbols land in
//! a memory block of `mem_block_symbols`, and every time the encoder yields
//! the block is "sent" and emptied before the encoder is called again. Sent
//! symbols are captured on a wire buffer of `WIRE` symbols for inspection.

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::{ChannelConfig, Transaction, TransactionQueue, TxChannel};
use crate::encoder::{EncodeOutcome, Encoder, SymbolBlock};
use crate::error::{ChannelError, EncodeError};
use crate::symbol::Symbol;

/// Largest symbol memory the model supports.
pub const MAX_MEM_BLOCK_SYMBOLS: usize = 512;

/// Largest transaction queue the model supports.
pub const MAX_QUEUE_DEPTH: usize = 8;

/// Statistics of the last transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransmitStats {
    /// Encoder invocations needed to queue the frame.
    pub encode_calls: usize,
    /// Encoder invocations that ended in a yield.
    pub yields: usize,
    /// Symbols queued.
    pub symbols: usize,
}

/// Host transmit channel capturing up to `WIRE` sent symbols.
pub struct LoopbackChannel<const WIRE: usize> {
    config: ChannelConfig,
    enabled: bool,
    memory: SymbolBlock<MAX_MEM_BLOCK_SYMBOLS>,
    queue: TransactionQueue<MAX_QUEUE_DEPTH>,
    wire: Vec<Symbol, WIRE>,
    frames: usize,
    next_id: u32,
    last: TransmitStats,
    fail_next_submit: bool,
    hold_completion: bool,
}

impl<const WIRE: usize> LoopbackChannel<WIRE> {
    /// Configuration the channel was created with.
    pub const fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Whether the channel accepts transmissions.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Every symbol sent so far, in wire order.
    pub fn wire(&self) -> &[Symbol] {
        &self.wire
    }

    /// Forget every captured symbol and frame.
    pub fn clear_wire(&mut self) {
        self.wire.clear();
        self.frames = 0;
    }

    /// Completed frames on the wire.
    pub const fn frames(&self) -> usize {
        self.frames
    }

    /// Statistics of the most recent transmission.
    pub const fn last_transmit(&self) -> TransmitStats {
        self.last
    }

    /// Transactions still waiting for completion.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Make the next `transmit` fail as a refused submission.
    pub fn fail_next_submit(&mut self) {
        self.fail_next_submit = true;
    }

    /// Keep queued transactions from ever completing while `hold` is set.
    pub fn hold_completion(&mut self, hold: bool) {
        self.hold_completion = hold;
    }

    /// Finish queued transactions unless completion is held.
    fn service(&mut self) {
        if self.hold_completion {
            return;
        }
        while self.queue.pop().is_some() {}
    }

    /// Move the memory block onto the wire.
    fn flush(&mut self) -> Result<usize, ChannelError> {
        let sent = self.memory.len();
        let result = self
            .wire
            .extend_from_slice(self.memory.as_slice())
            .map_err(|()| ChannelError::CaptureOverflow);
        self.memory.clear();
        result.map(|()| sent)
    }

    fn run_encoder<E: Encoder>(
        &mut self,
        encoder: &mut E,
        payload: &[u8],
    ) -> Result<TransmitStats, ChannelError> {
        let mut stats = TransmitStats::default();
        loop {
            let outcome = encoder
                .encode(&mut self.memory, payload)
                .map_err(ChannelError::Encode)?;
            stats.encode_calls += 1;
            stats.symbols += outcome.symbols();

            let sent = self.flush()?;
            match outcome {
                EncodeOutcome::Completed(_) => return Ok(stats),
                EncodeOutcome::Yielded(_) if sent == 0 => {
                    return Err(ChannelError::Encode(EncodeError::NoProgress));
                }
                EncodeOutcome::Yielded(_) => stats.yields += 1,
            }
        }
    }
}

impl<const WIRE: usize> TxChannel for LoopbackChannel<WIRE> {
    fn create(config: &ChannelConfig) -> Result<Self, ChannelError> {
        let valid = config.resolution_hz != 0
            && (1..=MAX_MEM_BLOCK_SYMBOLS).contains(&config.mem_block_symbols)
            && (1..=MAX_QUEUE_DEPTH).contains(&config.trans_queue_depth);
        if !valid {
            return Err(ChannelError::InvalidConfig);
        }

        Ok(Self {
            config: *config,
            enabled: false,
            memory: SymbolBlock::new(config.mem_block_symbols),
            queue: TransactionQueue::new(config.trans_queue_depth),
            wire: Vec::new(),
            frames: 0,
            next_id: 0,
            last: TransmitStats::default(),
            fail_next_submit: false,
            hold_completion: false,
        })
    }

    fn enable(&mut self) -> Result<(), ChannelError> {
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), ChannelError> {
        self.enabled = false;
        self.memory.clear();
        self.queue.clear();
        Ok(())
    }

    fn transmit<E: Encoder>(&mut self, encoder: &mut E, payload: &[u8]) -> Result<usize, ChannelError> {
        if !self.enabled {
            return Err(ChannelError::NotEnabled);
        }
        if core::mem::take(&mut self.fail_next_submit) {
            return Err(ChannelError::SubmitFailed);
        }

        let id = self.next_id;
        self.queue
            .try_push(Transaction { id, symbols: 0 })
            .map_err(|_| ChannelError::QueueFull)?;
        self.next_id = self.next_id.wrapping_add(1);

        match self.run_encoder(encoder, payload) {
            Ok(stats) => {
                self.queue.set_newest_symbols(stats.symbols);
                self.frames += 1;
                self.last = stats;
                Ok(stats.symbols)
            }
            Err(error) => {
                #[cfg(feature = "esp32-log")]
                println!("[LoopbackChannel.transmit] transaction {} dropped: {}", id, error);
                self.queue.pop_newest();
                self.memory.clear();
                Err(error)
            }
        }
    }

    fn wait_all_done(&mut self, timeout: Duration) -> Result<(), ChannelError> {
        let deadline = Instant::now() + timeout;
        loop {
            self.service();
            if self.queue.is_empty() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ChannelError::Timeout);
            }
            core::hint::spin_loop();
        }
    }
}
