//! Pulse timing model
//!
//! Converts real-world pulse durations into channel ticks. All derived
//! values are computed once and never change afterwards.

use crate::error::ConfigError;
use crate::symbol::Symbol;

/// Largest duration a symbol half can carry (15-bit hardware field).
pub const MAX_SYMBOL_DURATION: u16 = 0x7FFF;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Pulse durations of a strip protocol, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedTimings {
    /// High time of a zero bit.
    pub t0h_ns: u32,
    /// Low time of a zero bit.
    pub t0l_ns: u32,
    /// High time of a one bit.
    pub t1h_ns: u32,
    /// Low time of a one bit.
    pub t1l_ns: u32,
    /// Full latch gap after the frame.
    pub reset_ns: u32,
}

impl LedTimings {
    /// WS2812 timings (T0H=0.3us, T0L=0.9us, T1H=0.9us, T1L=0.3us, 50us latch).
    pub const WS2812: Self = Self {
        t0h_ns: 300,
        t0l_ns: 900,
        t1h_ns: 900,
        t1l_ns: 300,
        reset_ns: 50_000,
    };

    /// SK68XX timings (1.2us period, 20us latch).
    pub const SK68XX: Self = Self {
        t0h_ns: 320,
        t0l_ns: 880,
        t1h_ns: 640,
        t1l_ns: 560,
        reset_ns: 20_000,
    };
}

impl Default for LedTimings {
    fn default() -> Self {
        Self::WS2812
    }
}

/// Tick counts derived from [`LedTimings`] at a given channel resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    resolution_hz: u32,
    bit0_high_ticks: u16,
    bit0_low_ticks: u16,
    bit1_high_ticks: u16,
    bit1_low_ticks: u16,
    reset_ticks: u16,
}

impl TimingConfig {
    /// Derive tick counts for `timings` at `resolution_hz` ticks per second.
    ///
    /// The latch gap is halved before conversion: it is sent as one symbol
    /// with two equal low halves.
    pub fn new(resolution_hz: u32, timings: &LedTimings) -> Result<Self, ConfigError> {
        if resolution_hz == 0 {
            return Err(ConfigError::ZeroResolution);
        }

        Ok(Self {
            resolution_hz,
            bit0_high_ticks: to_ticks(timings.t0h_ns, 1, resolution_hz)?,
            bit0_low_ticks: to_ticks(timings.t0l_ns, 1, resolution_hz)?,
            bit1_high_ticks: to_ticks(timings.t1h_ns, 1, resolution_hz)?,
            bit1_low_ticks: to_ticks(timings.t1l_ns, 1, resolution_hz)?,
            reset_ticks: to_ticks(timings.reset_ns, 2, resolution_hz)?,
        })
    }

    /// Channel clock in ticks per second.
    pub const fn resolution_hz(&self) -> u32 {
        self.resolution_hz
    }

    /// High ticks of a zero bit.
    pub const fn bit0_high_ticks(&self) -> u16 {
        self.bit0_high_ticks
    }

    /// Low ticks of a zero bit.
    pub const fn bit0_low_ticks(&self) -> u16 {
        self.bit0_low_ticks
    }

    /// High ticks of a one bit.
    pub const fn bit1_high_ticks(&self) -> u16 {
        self.bit1_high_ticks
    }

    /// Low ticks of a one bit.
    pub const fn bit1_low_ticks(&self) -> u16 {
        self.bit1_low_ticks
    }

    /// Ticks of each half of the reset symbol.
    pub const fn reset_ticks(&self) -> u16 {
        self.reset_ticks
    }

    /// Symbol sent for a zero bit.
    pub const fn bit0(&self) -> Symbol {
        Symbol::new(true, self.bit0_high_ticks, false, self.bit0_low_ticks)
    }

    /// Symbol sent for a one bit.
    pub const fn bit1(&self) -> Symbol {
        Symbol::new(true, self.bit1_high_ticks, false, self.bit1_low_ticks)
    }

    /// Latch symbol: two low halves that add up to the full reset gap.
    pub const fn reset_code(&self) -> Symbol {
        Symbol::new(false, self.reset_ticks, false, self.reset_ticks)
    }
}

/// `round(duration_ns / parts * resolution / 1e9)`, checked against the symbol range.
///
/// Errors report the configured `duration_ns`, not the divided share.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_ticks(duration_ns: u32, parts: u32, resolution_hz: u32) -> Result<u16, ConfigError> {
    let share_ns = f64::from(duration_ns) / f64::from(parts);
    let ticks = libm::round(share_ns * f64::from(resolution_hz) / NANOS_PER_SECOND);

    if ticks > f64::from(MAX_SYMBOL_DURATION) {
        return Err(ConfigError::DurationOverflow { duration_ns });
    }
    if duration_ns != 0 && ticks < 1.0 {
        return Err(ConfigError::DegenerateDuration { duration_ns });
    }

    Ok(ticks as u16)
}
