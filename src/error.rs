//! Error taxonomy of the encoder, the channel and the caller-facing API.

use thiserror::Error;

/// Invalid timing configuration, detected before any channel is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Channel resolution is zero ticks per second.
    #[error("channel resolution must be non-zero")]
    ZeroResolution,
    /// A non-zero duration rounds down to zero ticks at this resolution.
    #[error("duration of {duration_ns} ns collapses to zero ticks")]
    DegenerateDuration { duration_ns: u32 },
    /// A duration does not fit the hardware duration field.
    #[error("duration of {duration_ns} ns exceeds the symbol duration range")]
    DurationOverflow { duration_ns: u32 },
}

/// Encoder contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Saved progress points past the end of the payload handed in.
    #[error("encoder progress {byte_index} is past payload of {len} bytes")]
    ProgressOutOfRange { byte_index: usize, len: usize },
    /// Encoder yielded without producing anything on an empty buffer.
    #[error("encoder made no progress on an empty symbol buffer")]
    NoProgress,
}

/// Failure reported by a [`TxChannel`](crate::channel::TxChannel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Channel parameters are out of the supported range.
    #[error("invalid channel configuration")]
    InvalidConfig,
    /// Channel is not enabled.
    #[error("channel is not enabled")]
    NotEnabled,
    /// Too many transactions are pending.
    #[error("transaction queue is full")]
    QueueFull,
    /// Hardware refused the transaction.
    #[error("transmit submission failed")]
    SubmitFailed,
    /// Captured pulse train does not fit the capture buffer.
    #[error("capture buffer overflow")]
    CaptureOverflow,
    /// Pending transactions did not finish in time.
    #[error("wait for transmit completion timed out")]
    Timeout,
    /// Encoder failed while the channel was pulling symbols.
    #[error("encoder failed: {0}")]
    Encode(EncodeError),
}

/// Errors surfaced by [`LedStrip`](crate::led::LedStrip).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Timing configuration rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// Channel could not be created or enabled.
    #[error("channel resource error: {0}")]
    Resource(ChannelError),
    /// Encoder contract violated during transmission.
    #[error("encode failed: {0}")]
    EncodeFailed(EncodeError),
    /// Wait for completion exceeded its budget.
    #[error("transmission timed out")]
    Timeout,
    /// Channel failed to accept the transmission.
    #[error("hardware fault: {0}")]
    HardwareFault(ChannelError),
    /// More pixels than the pixel buffer can hold.
    #[error("too many pixels for the pixel buffer")]
    TooManyPixels,
}

impl Error {
    /// Map a failure of `TxChannel::transmit`.
    pub(crate) const fn from_transmit(error: ChannelError) -> Self {
        match error {
            ChannelError::Encode(inner) => Self::EncodeFailed(inner),
            ChannelError::Timeout => Self::Timeout,
            other => Self::HardwareFault(other),
        }
    }

    /// Map a failure of `TxChannel::wait_all_done`.
    pub(crate) const fn from_wait(error: ChannelError) -> Self {
        match error {
            ChannelError::Timeout => Self::Timeout,
            other => Self::HardwareFault(other),
        }
    }
}
