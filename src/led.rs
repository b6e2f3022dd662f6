//! Caller-facing LED strip driver
//!
//! Owns the channel and the strip encoder for its whole life. Every write
//! is synchronous: the frame is queued, then the call blocks until the
//! channel reports it sent or the wait budget runs out.

use embassy_time::Duration;
use smart_leds::SmartLedsWrite;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::{ChannelConfig, TxChannel};
use crate::color::{BLACK, Rgb};
use crate::encoder::{BitOrder, Encoder, StripEncoder};
use crate::error::Error;
use crate::pixel::{ColorOrder, PixelBuffer};
use crate::timing::{LedTimings, TimingConfig};

/// Default time `set_color` waits for the frame to leave the channel.
pub const DEFAULT_WAIT_BUDGET: Duration = Duration::from_millis(100);

/// Configuration of an LED strip driver.
#[derive(Debug, Clone, Copy)]
pub struct LedConfig {
    pub channel: ChannelConfig,
    pub timings: LedTimings,
    pub color_order: ColorOrder,
    pub bit_order: BitOrder,
    /// Wait budget of every write.
    pub wait_budget: Duration,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            channel: ChannelConfig::default(),
            timings: LedTimings::WS2812,
            color_order: ColorOrder::Grb,
            bit_order: BitOrder::MsbFirst,
            wait_budget: DEFAULT_WAIT_BUDGET,
        }
    }
}

/// Notifications about finished writes.
///
/// Both methods default to doing nothing; `()` is the no-op implementation.
pub trait TransmitHooks {
    /// Frame of `symbols` symbols is on the wire.
    fn on_complete(&mut self, _symbols: usize) {}

    /// Write failed with `error`.
    fn on_error(&mut self, _error: &Error) {}
}

impl TransmitHooks for () {}

/// Strip driver; `BYTES` is three bytes per pixel.
pub struct LedStrip<C: TxChannel, const BYTES: usize, H: TransmitHooks = ()> {
    channel: C,
    encoder: StripEncoder,
    timing: TimingConfig,
    pixels: PixelBuffer<BYTES>,
    color_order: ColorOrder,
    wait_budget: Duration,
    hooks: H,
}

/// Driver for a single pixel.
pub type Led<C, H = ()> = LedStrip<C, 3, H>;

impl<C: TxChannel, const BYTES: usize> LedStrip<C, BYTES> {
    /// Validate the timing, then create and enable the channel.
    ///
    /// No channel is created when the timing is invalid, and a channel that
    /// fails to enable is dropped again.
    pub fn initialize(config: &LedConfig) -> Result<Self, Error> {
        let timing = TimingConfig::new(config.channel.resolution_hz, &config.timings)?;
        let encoder = StripEncoder::new(&timing, config.bit_order);

        let mut channel = C::create(&config.channel).map_err(Error::Resource)?;
        if let Err(error) = channel.enable() {
            #[cfg(feature = "esp32-log")]
            println!("[LedStrip.initialize] failed to enable channel: {}", error);
            let _ = channel.disable();
            return Err(Error::Resource(error));
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[LedStrip.initialize] gpio {} at {} Hz, {} pixels",
            config.channel.gpio,
            timing.resolution_hz(),
            PixelBuffer::<BYTES>::PIXELS
        );

        Ok(Self {
            channel,
            encoder,
            timing,
            pixels: PixelBuffer::new(),
            color_order: config.color_order,
            wait_budget: config.wait_budget,
            hooks: (),
        })
    }
}

impl<C: TxChannel, const BYTES: usize, H: TransmitHooks> LedStrip<C, BYTES, H> {
    /// Replace the hooks.
    pub fn with_hooks<N: TransmitHooks>(self, hooks: N) -> LedStrip<C, BYTES, N> {
        LedStrip {
            channel: self.channel,
            encoder: self.encoder,
            timing: self.timing,
            pixels: self.pixels,
            color_order: self.color_order,
            wait_budget: self.wait_budget,
            hooks,
        }
    }

    /// Paint every pixel with one color and wait for the frame to be sent.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8) -> Result<(), Error> {
        self.pixels.fill(Rgb::new(r, g, b), self.color_order);
        self.flush()
    }

    /// Send `colors`, one per pixel, and wait for the frame to be sent.
    ///
    /// Too many colors leave the previous frame untouched.
    pub fn write_colors<I>(&mut self, colors: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Rgb>,
    {
        if let Err(error) = self.pixels.fill_from(colors, self.color_order) {
            self.hooks.on_error(&error);
            return Err(error);
        }
        self.flush()
    }

    /// Turn every pixel off.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.set_color(BLACK.r, BLACK.g, BLACK.b)
    }

    /// Disable the channel and release it together with the encoder.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn shutdown(mut self) {
        if let Err(_error) = self.channel.disable() {
            #[cfg(feature = "esp32-log")]
            println!("[LedStrip.shutdown] failed to disable channel: {}", _error);
        }
    }

    /// Tick counts the encoder was built from.
    pub const fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Strip encoder, for inspecting its phase.
    pub const fn encoder(&self) -> &StripEncoder {
        &self.encoder
    }

    /// Bytes of the last frame in wire order.
    pub fn pixel_bytes(&self) -> &[u8] {
        self.pixels.as_bytes()
    }

    /// Underlying transmit channel.
    pub const fn channel(&self) -> &C {
        &self.channel
    }

    /// Mutable access to the underlying channel.
    pub const fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Installed hooks.
    pub const fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Queue the pixel buffer and block until it is sent.
    ///
    /// Any failure resets the encoder so the next frame starts clean.
    fn flush(&mut self) -> Result<(), Error> {
        match self.transmit_and_wait() {
            Ok(symbols) => {
                self.hooks.on_complete(symbols);
                Ok(())
            }
            Err(error) => {
                #[cfg(feature = "esp32-log")]
                println!("[LedStrip.flush] write failed: {}", error);
                self.encoder.reset();
                self.hooks.on_error(&error);
                Err(error)
            }
        }
    }

    fn transmit_and_wait(&mut self) -> Result<usize, Error> {
        let symbols = self
            .channel
            .transmit(&mut self.encoder, self.pixels.as_bytes())
            .map_err(Error::from_transmit)?;
        self.channel
            .wait_all_done(self.wait_budget)
            .map_err(Error::from_wait)?;
        Ok(symbols)
    }
}

impl<C: TxChannel, const BYTES: usize, H: TransmitHooks> SmartLedsWrite for LedStrip<C, BYTES, H> {
    type Error = Error;
    type Color = Rgb;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.write_colors(iterator.into_iter().map(Into::into))
    }
}
