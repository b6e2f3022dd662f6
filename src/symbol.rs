use crate::timing::MAX_SYMBOL_DURATION;

/// One pulse descriptor: two (level, duration) halves.
///
/// Durations are in channel ticks and never exceed [`MAX_SYMBOL_DURATION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Symbol {
    level0: bool,
    duration0: u16,
    level1: bool,
    duration1: u16,
}

impl Symbol {
    /// Create a symbol, clamping durations to the hardware range.
    pub const fn new(level0: bool, duration0: u16, level1: bool, duration1: u16) -> Self {
        Self {
            level0,
            duration0: clamp_duration(duration0),
            level1,
            duration1: clamp_duration(duration1),
        }
    }

    /// Level of the first half.
    pub const fn level0(&self) -> bool {
        self.level0
    }

    /// Ticks of the first half.
    pub const fn duration0(&self) -> u16 {
        self.duration0
    }

    /// Level of the second half.
    pub const fn level1(&self) -> bool {
        self.level1
    }

    /// Ticks of the second half.
    pub const fn duration1(&self) -> u16 {
        self.duration1
    }

    /// Total length of the symbol in ticks.
    #[allow(clippy::cast_lossless)]
    pub const fn ticks(&self) -> u32 {
        self.duration0 as u32 + self.duration1 as u32
    }

    /// Pack into the 32-bit transmit memory word.
    ///
    /// Layout: `duration0[14:0] level0[15] duration1[30:16] level1[31]`.
    #[allow(clippy::cast_lossless)]
    pub const fn to_word(self) -> u32 {
        (self.duration0 as u32)
            | ((self.level0 as u32) << 15)
            | ((self.duration1 as u32) << 16)
            | ((self.level1 as u32) << 31)
    }

    /// Unpack a transmit memory word.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_word(word: u32) -> Self {
        Self {
            duration0: (word & 0x7FFF) as u16,
            level0: word & (1 << 15) != 0,
            duration1: ((word >> 16) & 0x7FFF) as u16,
            level1: word & (1 << 31) != 0,
        }
    }
}

const fn clamp_duration(duration: u16) -> u16 {
    if duration > MAX_SYMBOL_DURATION {
        MAX_SYMBOL_DURATION
    } else {
        duration
    }
}
