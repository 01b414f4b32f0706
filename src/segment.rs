//! Non-blank run detection over transposed band data.
//!
//! A band is walked in fixed-size units (one head position, or one dot
//! column) and split into runs of non-blank units. A zero gap shorter than
//! the minimum is cheaper to transmit as data than to skip with a head
//! move, so short gaps are absorbed into the surrounding run; only a gap of
//! at least `min_gap` bytes ends one.
//!
//! The backward walk mirrors the forward walk unit for unit, so that a
//! right-to-left pass visits the same runs in reverse carriage order.

use crate::BYTES_PER_COLUMN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// A half-open byte range of one non-blank run. `start` is always a
/// multiple of the scan unit; `end` may be cut short by the data end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Run {
    pub start: usize,
    pub end: usize,
}

pub(crate) struct RunScanner<'a> {
    data: &'a [u8],
    unit: usize,
    min_gap: usize,
    dir: Direction,
    lo: usize,
    hi: usize,
}

impl<'a> RunScanner<'a> {
    pub fn new(data: &'a [u8], unit: usize, min_gap: usize, dir: Direction) -> Self {
        // Whole blank dot columns at the data end never print; drop them
        // before walking.
        let mut hi = data.len();
        while hi >= BYTES_PER_COLUMN && is_zero(&data[hi - BYTES_PER_COLUMN..hi]) {
            hi -= BYTES_PER_COLUMN;
        }
        RunScanner {
            data,
            unit,
            min_gap,
            dir,
            lo: 0,
            hi,
        }
    }

    fn next_forward(&mut self) -> Option<Run> {
        // Skip to the first unit that isn't blank.
        let mut start = self.lo;
        loop {
            if start >= self.hi {
                return None;
            }
            let unit_end = (start + self.unit).min(self.hi);
            if !is_zero(&self.data[start..unit_end]) {
                break;
            }
            start += self.unit;
        }

        // Extend until a blank stretch of at least min_gap follows.
        let mut end = start + self.unit;
        while end < self.hi {
            let gap_end = (end + self.min_gap).min(self.hi);
            if is_zero(&self.data[end..gap_end]) {
                break;
            }
            end += self.unit;
        }
        if end > self.hi {
            end = self.hi;
        }

        self.lo = end;
        Some(Run { start, end })
    }

    fn next_backward(&mut self) -> Option<Run> {
        // Skip down to the last unit that isn't blank. The data end need
        // not fall on a unit boundary; after a blank check the position is
        // realigned to the unit grid before stepping down.
        let mut end = self.hi;
        loop {
            if end <= self.lo {
                return None;
            }
            let unit_start = end.saturating_sub(self.unit).max(self.lo);
            if !is_zero(&self.data[unit_start..end]) {
                break;
            }
            if end % self.unit != 0 {
                end += self.unit - end % self.unit;
            }
            end -= self.unit;
        }

        let mut start = end - end % self.unit;
        if start == end {
            start = end - self.unit;
        }

        // Extend while the stretch just below is not blank enough to stop.
        loop {
            let gap_start = start.saturating_sub(self.min_gap).max(self.lo);
            if is_zero(&self.data[gap_start..start]) {
                break;
            }
            start -= self.unit;
        }

        self.hi = start;
        Some(Run { start, end })
    }
}

impl<'a> Iterator for RunScanner<'a> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        match self.dir {
            Direction::Forward => self.next_forward(),
            Direction::Backward => self.next_backward(),
        }
    }
}

fn is_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: usize = 9;
    const GAP: usize = 270;

    fn band(len: usize, marks: &[usize]) -> Vec<u8> {
        let mut data = vec![0u8; len];
        for &m in marks {
            data[m] = 0xFF;
        }
        data
    }

    fn runs(data: &[u8], dir: Direction) -> Vec<Run> {
        RunScanner::new(data, UNIT, GAP, dir).collect()
    }

    #[test]
    fn blank_data_yields_no_runs() {
        assert!(runs(&band(4320, &[]), Direction::Forward).is_empty());
        assert!(runs(&band(4320, &[]), Direction::Backward).is_empty());
        assert!(runs(&[], Direction::Forward).is_empty());
    }

    #[test]
    fn single_mark_yields_one_aligned_run() {
        let data = band(4320, &[100]);
        // 100 sits in unit 11 (99..108), cut to 102 by the trailing trim.
        assert_eq!(runs(&data, Direction::Forward), vec![Run { start: 99, end: 102 }]);
        assert_eq!(runs(&data, Direction::Backward), vec![Run { start: 99, end: 102 }]);
    }

    #[test]
    fn short_gap_is_absorbed() {
        // Two marks 180 bytes apart: the zero stretch between them is
        // shorter than GAP, so one run covers both.
        let data = band(4320, &[0, 180]);
        assert_eq!(runs(&data, Direction::Forward), vec![Run { start: 0, end: 183 }]);
    }

    #[test]
    fn long_gap_splits_runs() {
        let data = band(4320, &[0, 900]);
        let fwd = runs(&data, Direction::Forward);
        assert_eq!(
            fwd,
            vec![Run { start: 0, end: 9 }, Run { start: 900, end: 903 }]
        );

        // Backward visits the same runs in reverse order.
        let mut bwd = runs(&data, Direction::Backward);
        bwd.reverse();
        assert_eq!(bwd, fwd);
    }

    #[test]
    fn backward_mirrors_forward_on_reversed_data() {
        let len = 4320;
        let marks = [3, 40, 300, 301, 1000, 2500, 2504, 4000];
        let data = band(len, &marks);
        let reversed: Vec<u8> = data.iter().rev().cloned().collect();

        let fwd = runs(&data, Direction::Forward);
        let bwd_rev: Vec<Run> = runs(&reversed, Direction::Backward)
            .into_iter()
            .map(|r| Run {
                start: len - r.end,
                end: len - r.start,
            })
            .collect();

        // Forward runs over the data must cover the mirror image of the
        // backward runs over the reversed data: every mark falls inside a
        // run on both sides and the run count matches.
        assert_eq!(fwd.len(), bwd_rev.len());
        for &m in &marks {
            assert!(fwd.iter().any(|r| r.start <= m && m < r.end));
            assert!(bwd_rev.iter().any(|r| r.start <= m && m < r.end));
        }
    }

    #[test]
    fn trailing_blank_columns_are_trimmed() {
        let mut data = band(90, &[10]);
        data[89] = 0; // explicit, the tail past the mark is already zero
        let fwd = runs(&data, Direction::Forward);
        assert_eq!(fwd, vec![Run { start: 9, end: 12 }]);
    }

    #[test]
    fn unaligned_tail_keeps_run_starts_on_the_grid() {
        // Data length off the unit grid with marks near both ends: run
        // starts stay unit-aligned, the end may ride the ragged edge.
        let data = band(94, &[2, 91]);
        let bwd = runs(&data, Direction::Backward);
        assert_eq!(bwd, vec![Run { start: 0, end: 94 }]);
        for run in &bwd {
            assert_eq!(run.start % UNIT, 0);
        }
    }

    #[test]
    fn segment_scale_merges_and_splits() {
        // Dot-column scale: unit 3, gap 12 bytes (4 columns).
        let mut data = vec![0u8; 60];
        data[0] = 1; // column 0
        data[9] = 1; // column 3, zero gap of 2 columns: absorbed
        data[45] = 1; // column 15, far past the gap: own run
        let got: Vec<Run> = RunScanner::new(&data, 3, 12, Direction::Forward).collect();
        assert_eq!(
            got,
            vec![Run { start: 0, end: 12 }, Run { start: 45, end: 48 }]
        );
    }
}
