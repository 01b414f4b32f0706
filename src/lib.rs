//! Epson LQ Page Encoder
//!
//! This crate encodes monochrome raster pages into the ESC/P command stream
//! for Epson LQ series 24-pin dot matrix printers.
//!
//! # Example
//!
//! ```rust,no_run
//! use lq_dot24::{Config, Matrix, Model, Printer, Resolution};
//!
//! let config = Config::new(Resolution::Dpi360, Resolution::Dpi360, 2880, 48)
//!     .bidirectional(true);
//!
//! let mut page: Matrix = vec![vec![0u8; 360]; 48];
//! page[0][0] = 0x80;
//!
//! let mut printer = Printer::new(Model::LQ510, config, Vec::new()).unwrap();
//! printer.print(&mut page).unwrap();
//! let bytes = printer.into_inner();
//! ```

mod band;
mod command;
mod config;
mod error;
mod model;
mod printer;
mod segment;
mod transpose;

pub use crate::{
    config::{Config, Resolution},
    error::Error,
    model::Model,
    printer::{PageEncoder, Printer},
};

/// Type alias for 1-bit raster data used by the encoder.
///
/// Each inner `Vec<u8>` represents a single scan line, with 8 MSB-first
/// pixels packed into each byte. The outer Vec represents the page rows
/// from top to bottom.
pub type Matrix = Vec<Vec<u8>>;

/// Number of pins in the print head.
pub const HEAD_PINS: usize = 24;

/// Bytes occupied by one dot column in the graphics command (24 pins / 8).
pub const BYTES_PER_COLUMN: usize = 3;

/// Scan line supplier for one page.
///
/// The encoder pulls lines by index while it walks the page in head-height
/// bands; a line may be fetched more than once and must come back the same.
/// Returning `false` means the line does not exist (off the rendered page)
/// and is treated as blank.
pub trait LineSource {
    /// Copy scan line `line` into `buf`, which holds one packed byte row.
    fn copy_scan_line(&mut self, line: u32, buf: &mut [u8]) -> bool;
}

impl LineSource for Matrix {
    fn copy_scan_line(&mut self, line: u32, buf: &mut [u8]) -> bool {
        match self.get(line as usize) {
            Some(row) => {
                let n = row.len().min(buf.len());
                buf[..n].copy_from_slice(&row[..n]);
                for b in buf[n..].iter_mut() {
                    *b = 0;
                }
                true
            }
            None => false,
        }
    }
}
