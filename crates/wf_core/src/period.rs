//! Inclusive calendar year range covered by a table.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_START_YEAR: i32 = 2002;
pub const DEFAULT_END_YEAR: i32 = 2025;

// Outside this window the cycle and shock years stop meaning anything and
// the declining debt-ratio trend crosses zero (2110)
pub const EARLIEST_YEAR: i32 = 1950;
pub const LATEST_YEAR: i32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearRange")]
pub struct YearRange {
    start: i32,
    end: i32,
}

/// Unchecked wire form; deserialization goes through [`YearRange::new`].
#[derive(Deserialize)]
struct RawYearRange {
    start: i32,
    end: i32,
}

impl TryFrom<RawYearRange> for YearRange {
    type Error = CoreError;

    fn try_from(raw: RawYearRange) -> Result<Self> {
        YearRange::new(raw.start, raw.end)
    }
}

impl YearRange {
    /// Validated range within [`EARLIEST_YEAR`]..=[`LATEST_YEAR`].
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(CoreError::InvalidYearRange { start, end });
        }
        if start < EARLIEST_YEAR || end > LATEST_YEAR {
            return Err(CoreError::YearOutOfBounds {
                start,
                end,
                min: EARLIEST_YEAR,
                max: LATEST_YEAR,
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    /// Number of years, bounds included. Never zero.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }

    /// Position of `year` from the start of the range
    pub fn index_of(&self, year: i32) -> Option<usize> {
        self.contains(year).then(|| (year - self.start) as usize)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_YEAR,
            end: DEFAULT_END_YEAR,
        }
    }
}
