#![no_std]

pub mod channel;
pub mod color;
pub mod encoder;
pub mod error;
pub mod led;
pub mod loopback;
pub mod pixel;
pub mod symbol;
pub mod timing;

pub use channel::{ChannelConfig, TxChannel};
pub use encoder::{
    Accepted, BitOrder, BytesEncoder, EncodeOutcome, EncodePhase, Encoder, ResetEncoder,
    StripEncoder, SymbolBlock, SymbolSink,
};
pub use error::{ChannelError, ConfigError, EncodeError, Error};
pub use led::{Led, LedConfig, LedStrip, TransmitHooks};
pub use loopback::LoopbackChannel;
pub use pixel::{ColorOrder, PixelBuffer};
pub use symbol::Symbol;
pub use timing::{LedTimings, TimingConfig};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};
