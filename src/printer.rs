//! Page encoding: the band loop and the printable front end.

use std::io::Write;

use log::{debug, info};

use crate::band::{try_zeroed, Band};
use crate::command;
use crate::config::Config;
use crate::error::Error;
use crate::model::Model;
use crate::segment::{Direction, RunScanner};
use crate::transpose;
use crate::{LineSource, BYTES_PER_COLUMN, HEAD_PINS};

/// Dot columns of zeroes inside a block that are cheaper to transmit as
/// data than to skip with a relative move.
const SEGMENT_GAP_COLUMNS: usize = 4;

/// Encodes raster pages into printer command streams.
///
/// The encoder assumes the sink has already received the model
/// initialization sequence (see [`Model::init_sequence`]); it emits the
/// page body and the eject/reset trailer. Every call to
/// [`encode_page`](Self::encode_page) is independent: all working state
/// lives on the call's own buffers.
pub struct PageEncoder {
    config: Config,
}

impl PageEncoder {
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(PageEncoder { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encode one page from `source` into `sink`.
    ///
    /// Bands are processed strictly in order: the head position carried
    /// from one band decides the feed commands of the next.
    pub fn encode_page<S, W>(&self, source: &mut S, sink: &mut W) -> Result<(), Error>
    where
        S: LineSource,
        W: Write,
    {
        let config = &self.config;
        let line_size = config.line_size();
        let x_doubled = config.x_res().doubled();
        let y_doubled = config.y_res().doubled();
        let height = config.height() as i32;
        let bytes_per_pos = config.bytes_per_pos();
        let block_gap = config.block_gap_bytes();
        let blank_rows_kept = config.blank_rows_kept();

        info!(
            "encoding {}x{} page at {}x{} dpi, bidirectional {}",
            config.width(),
            config.height(),
            config.x_res().dpi(),
            config.y_res().dpi(),
            config.is_bidirectional(),
        );

        let mut band = Band::new(line_size, config.band_rows())?;
        let mut transposed = try_zeroed(line_size * HEAD_PINS)?;
        let mut scratch = try_zeroed(line_size * HEAD_PINS)?;

        // The logical cursor starts above the paper so the first rows land
        // on the lower pins; the physical head starts at the top of form.
        let mut lnum = config.initial_lnum();
        let mut printer_lnum: i32 = 0;
        let mut cycle = 0u8;
        let mut forward = true;

        while lnum < height {
            band.fill(source, lnum);

            // A long enough blank stretch is paper feed, not printing.
            let blank = band.leading_blank_rows();
            if blank > blank_rows_kept {
                debug!(
                    "blank run of {} lines at {}, seeking {}",
                    blank,
                    lnum,
                    blank - blank_rows_kept
                );
                lnum += (blank - blank_rows_kept) as i32;
                continue;
            }

            if lnum < 0 || lnum < printer_lnum {
                // The head cannot be placed before the top of form or
                // behind itself; shift the buffered rows instead. Only
                // legal while the head is still within the first few rows.
                assert!(
                    printer_lnum < 4,
                    "head at line {} cannot back up to line {}",
                    printer_lnum,
                    lnum
                );

                if lnum % 2 != printer_lnum % 2 {
                    command::feed(sink, 1, y_doubled)?;
                    printer_lnum += 1;
                }
                band.rehome(lnum, printer_lnum);
            } else if printer_lnum != lnum {
                debug_assert!(printer_lnum < lnum);
                command::feed(sink, lnum - printer_lnum, y_doubled)?;
                printer_lnum = lnum;
            }

            transpose::transpose_band(band.printable(), line_size, &mut transposed);

            // At doubled horizontal resolution each pass prints one dot
            // phase; the phase flips every two bands.
            let even_dots = !x_doubled || cycle < 2;
            let dir = if forward {
                Direction::Forward
            } else {
                Direction::Backward
            };

            for run in RunScanner::new(&transposed, bytes_per_pos, block_gap, dir) {
                debug_assert_eq!(run.start % bytes_per_pos, 0);
                print_block(
                    sink,
                    run.start / bytes_per_pos,
                    &transposed[run.start..run.end],
                    x_doubled,
                    even_dots,
                    &mut scratch,
                )?;
            }

            if config.is_bidirectional() {
                forward = !forward;
            }
            lnum += config.advance(lnum);
            cycle = (cycle + 1) % 4;
        }

        command::page_eject(sink)?;
        sink.flush()?;
        Ok(())
    }
}

/// Print one block: everything between two head trips.
///
/// The block always opens with an absolute position so the relative moves
/// inside it have a fixed origin, and always closes with a carriage
/// return.
fn print_block<W: Write>(
    sink: &mut W,
    pos: usize,
    block: &[u8],
    x_doubled: bool,
    even_dots: bool,
    scratch: &mut [u8],
) -> Result<(), Error> {
    command::absolute_position(sink, pos as u16)?;
    if !even_dots {
        command::dot_phase_skip(sink)?;
    }

    let data: &[u8] = if x_doubled {
        let n = transpose::filter_dot_phase(block, even_dots, scratch);
        &scratch[..n]
    } else {
        block
    };

    let mut cursor = 0usize;
    for seg in RunScanner::new(
        data,
        BYTES_PER_COLUMN,
        SEGMENT_GAP_COLUMNS * BYTES_PER_COLUMN,
        Direction::Forward,
    ) {
        debug_assert_eq!(seg.start % BYTES_PER_COLUMN, 0);
        let gap = (seg.start - cursor) / BYTES_PER_COLUMN;
        if gap != 0 {
            command::relative_move(sink, gap as i16)?;
        }
        command::graphics_run(sink, &data[seg.start..seg.end])?;
        cursor = seg.end;
    }

    command::carriage_return(sink)?;
    Ok(())
}

/// A printer fed through any byte sink.
///
/// Couples a [`Model`] and a [`Config`] with an output stream; `print`
/// writes the model initialization sequence followed by the encoded page.
pub struct Printer<W: Write> {
    model: Model,
    encoder: PageEncoder,
    sink: W,
}

impl<W: Write> Printer<W> {
    pub fn new(model: Model, config: Config, sink: W) -> Result<Self, Error> {
        Ok(Printer {
            model,
            encoder: PageEncoder::new(config)?,
            sink,
        })
    }

    /// Print one page.
    ///
    /// May be called repeatedly; the trailer of each page resets the
    /// printer so the next page starts from a clean state.
    pub fn print<S: LineSource>(&mut self, source: &mut S) -> Result<(), Error> {
        let init = self.model.init_sequence(self.encoder.config());
        self.sink.write_all(&init)?;
        self.encoder.encode_page(source, &mut self.sink)
    }

    /// Release the sink, e.g. to inspect an in-memory command stream.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
