//! Head-height slices of the page raster.
//!
//! A band holds the scan lines covered by one pass of the 24-pin head: 24
//! rows, or 48 when the vertical resolution is interleaved. In the
//! interleaved layout the even document lines sit in slots 0-23 and the
//! odd lines in slots 24-47; only the even half prints on the current
//! pass, but the odd half is needed to judge how far a blank stretch
//! really extends before seeking over it.

use log::debug;

use crate::error::Error;
use crate::{LineSource, HEAD_PINS};

/// Allocate a zeroed buffer, reporting failure instead of aborting.
pub(crate) fn try_zeroed(len: usize) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
    buf.resize(len, 0);
    Ok(buf)
}

pub(crate) struct Band {
    data: Vec<u8>,
    line_size: usize,
    rows: usize,
}

impl Band {
    pub fn new(line_size: usize, rows: usize) -> Result<Self, Error> {
        debug_assert!(rows == HEAD_PINS || rows == HEAD_PINS * 2);
        Ok(Band {
            data: try_zeroed(line_size * rows)?,
            line_size,
            rows,
        })
    }

    fn interleaved(&self) -> bool {
        self.rows == HEAD_PINS * 2
    }

    pub fn row(&self, slot: usize) -> &[u8] {
        &self.data[slot * self.line_size..(slot + 1) * self.line_size]
    }

    /// The 24 rows that print on this pass.
    pub fn printable(&self) -> &[u8] {
        &self.data[..self.line_size * HEAD_PINS]
    }

    /// Refill the band starting at document line `start`.
    ///
    /// Lines before the page or missing from the source come back as
    /// zeroes. `start` may be negative while the head is still notionally
    /// above the paper.
    pub fn fill<S: LineSource>(&mut self, source: &mut S, start: i32) {
        for b in self.data.iter_mut() {
            *b = 0;
        }

        if self.interleaved() {
            for slot in 0..HEAD_PINS {
                self.load_line(source, start + slot as i32 * 2, slot);
            }
            for slot in 0..HEAD_PINS {
                self.load_line(source, start + slot as i32 * 2 + 1, HEAD_PINS + slot);
            }
        } else {
            for slot in 0..HEAD_PINS {
                self.load_line(source, start + slot as i32, slot);
            }
        }
    }

    fn load_line<S: LineSource>(&mut self, source: &mut S, line: i32, slot: usize) {
        if line < 0 {
            return;
        }
        let ls = self.line_size;
        let row = &mut self.data[slot * ls..(slot + 1) * ls];
        if !source.copy_scan_line(line as u32, row) {
            for b in row.iter_mut() {
                *b = 0;
            }
        }
    }

    /// Count how many document lines at the head of the band are blank.
    ///
    /// Returns 0 when the first line has ink. Lines are visited in
    /// document order, which in the interleaved layout alternates between
    /// the two buffer halves.
    pub fn leading_blank_rows(&self) -> usize {
        if self.row(0).iter().any(|&b| b != 0) {
            return 0;
        }

        if self.interleaved() {
            let mut empty = 0;
            while empty < self.rows {
                let slot = empty / 2 + if empty % 2 == 0 { 0 } else { HEAD_PINS };
                if self.row(slot) != self.row(0) {
                    break;
                }
                empty += 1;
            }
            empty
        } else {
            let mut empty = 1;
            while empty < self.rows && self.row(empty) == self.row(0) {
                empty += 1;
            }
            empty
        }
    }

    /// Re-index the printable rows for a head that cannot reach `lnum`.
    ///
    /// The head sits at non-negative line `printer_lnum` while the band
    /// starts at `lnum` before it. No feed can move the head backwards, so
    /// each buffered row is shifted to the pin that passes over its actual
    /// document line; rows whose pin falls above the head are dropped.
    /// Caller has already matched the parity of the two cursors.
    pub fn rehome(&mut self, lnum: i32, printer_lnum: i32) {
        debug_assert_eq!((printer_lnum - lnum) % 2, 0);
        debug!(
            "re-homing band at line {} onto head at line {}",
            lnum, printer_lnum
        );

        let ls = self.line_size;
        for real in 0..HEAD_PINS {
            let document_line = lnum + real as i32 * 2;
            let head_slot = (document_line - printer_lnum) / 2;
            debug_assert_eq!((document_line - printer_lnum) % 2, 0);
            debug_assert!(head_slot < real as i32);

            if head_slot >= 0 && (head_slot as usize) < HEAD_PINS {
                let src = real * ls;
                self.data.copy_within(src..src + ls, head_slot as usize * ls);
            }
            let src = real * ls;
            for b in self.data[src..src + ls].iter_mut() {
                *b = 0;
            }
        }
    }
}
