use std::ops::Range;

use serde::Serialize;

use crate::data_structs::typedef::PosType;

/// Inclusive interval on a circular sequence of known length.
///
/// A `Wrapped` interval passes through position 0 and covers
/// `[start, len) ∪ [0, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CircularInterval {
    Empty,
    Linear { start: PosType, end: PosType },
    Wrapped { start: PosType, end: PosType },
}

impl CircularInterval {
    /// Builds an interval from coordinates that were already reduced into
    /// `[0, len)`. `end < start` marks an origin-crossing interval.
    pub fn from_reduced(
        start: PosType,
        end: PosType,
    ) -> Self {
        if end < start {
            CircularInterval::Wrapped { start, end }
        }
        else {
            CircularInterval::Linear { start, end }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CircularInterval::Empty)
    }

    pub fn wraps(&self) -> bool {
        matches!(self, CircularInterval::Wrapped { .. })
    }

    pub fn start(&self) -> Option<PosType> {
        match self {
            CircularInterval::Empty => None,
            CircularInterval::Linear { start, .. }
            | CircularInterval::Wrapped { start, .. } => Some(*start),
        }
    }

    pub fn end(&self) -> Option<PosType> {
        match self {
            CircularInterval::Empty => None,
            CircularInterval::Linear { end, .. }
            | CircularInterval::Wrapped { end, .. } => Some(*end),
        }
    }

    pub fn contains(
        &self,
        pos: PosType,
    ) -> bool {
        match *self {
            CircularInterval::Empty => false,
            CircularInterval::Linear { start, end } => start <= pos && pos <= end,
            CircularInterval::Wrapped { start, end } => pos >= start || pos <= end,
        }
    }

    /// Half-open ranges covered by the interval, in sequence order of the
    /// interval itself (the tail before the origin comes first).
    pub fn ranges(
        &self,
        len: PosType,
    ) -> Vec<Range<PosType>> {
        match *self {
            CircularInterval::Empty => vec![],
            CircularInterval::Linear { start, end } => vec![start..end + 1],
            CircularInterval::Wrapped { start, end } => {
                let mut res = Vec::with_capacity(2);
                if start < len {
                    res.push(start..len);
                }
                res.push(0..end + 1);
                res
            },
        }
    }

    /// Positions covered by the interval, walking through the origin for
    /// wrapped intervals.
    pub fn positions(
        &self,
        len: PosType,
    ) -> impl Iterator<Item = PosType> {
        self.ranges(len).into_iter().flatten()
    }

    pub fn n_positions(
        &self,
        len: PosType,
    ) -> usize {
        self.ranges(len)
            .iter()
            .map(|r| (r.end - r.start) as usize)
            .sum()
    }

    pub fn overlaps(
        &self,
        other: &Self,
        len: PosType,
    ) -> bool {
        let other_ranges = other.ranges(len);
        self.ranges(len).iter().any(|a| {
            other_ranges
                .iter()
                .any(|b| a.start < b.end && b.start < a.end)
        })
    }
}
