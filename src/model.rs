use crate::config::{Config, Resolution};
use crate::HEAD_PINS;

/// Printer models sharing the 24-pin ESC/P command set.
#[derive(Debug, Clone, Copy)]
pub enum Model {
    LQ510,
}

impl Model {
    /// Native resolution of the model, x then y.
    pub fn native_resolution(&self) -> (Resolution, Resolution) {
        match self {
            Self::LQ510 => (Resolution::Dpi360, Resolution::Dpi360),
        }
    }

    pub fn pins(&self) -> usize {
        HEAD_PINS
    }

    /// Model initialization sequence, written once before the page body.
    ///
    /// Resets the printer, selects 10 cpi letter quality, zeroes the left
    /// margin and the base line spacing (line feeds then move 0/360 inch,
    /// vertical motion is done with explicit feed commands), sets the
    /// direction mode and the right margin.
    pub fn init_sequence(&self, config: &Config) -> Vec<u8> {
        // ESC U picks unidirectional printing, so the flag is inverted.
        let unidirectional = if config.is_bidirectional() { 0 } else { 1 };
        let margin = (config.width() as f64 / config.x_res().dpi() as f64 * 10.0) as u32 + 2;

        vec![
            0x1B, b'@', // reset
            0x1B, b'P', // 10 cpi
            0x1B, b'l', 0x00, // left margin 0
            b'\r', // home the head
            0x1B, b'+', 0x00, // line spacing 0/360
            0x1B, b'U', unidirectional, // direction mode
            0x1B, b'x', 0x01, // letter quality
            0x1B, b'Q', margin as u8, // right margin, 1/10 inch units
        ]
    }
}
