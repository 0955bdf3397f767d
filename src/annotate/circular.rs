use log::warn;

use crate::data_structs::hit::{
    PlacedHit,
    ScoredHit,
};
use crate::data_structs::interval::CircularInterval;
use crate::data_structs::typedef::PosType;
use crate::error::{
    AnnotError,
    AnnotResult,
};

/// Coordinate space of the un-doubled query sequence.
///
/// Hits found on the self-concatenated sequence never exceed
/// `2 * len - 1`, so reducing a coordinate takes at most one subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircularSpace {
    len: PosType,
}

impl CircularSpace {
    pub fn try_new(len: PosType) -> AnnotResult<Self> {
        if len == 0 {
            return Err(AnnotError::ZeroLength);
        }
        Ok(Self { len })
    }

    pub fn len(&self) -> PosType { self.len }

    pub fn reduce(
        &self,
        pos: i64,
    ) -> AnnotResult<PosType> {
        let len = self.len as i64;
        let reduced = if pos >= len { pos - len } else { pos };
        if reduced < 0 || reduced >= len {
            return Err(AnnotError::CoordinateOutOfRange {
                value: pos,
                len:   self.len,
            });
        }
        Ok(reduced as PosType)
    }

    /// Interval for the ordered pair `start..=end` taken before reduction.
    ///
    /// `start > end` before reduction means the interval was trimmed away
    /// entirely and yields [`CircularInterval::Empty`]. An interval at least
    /// as long as the sequence covers all of it.
    pub fn interval(
        &self,
        start: i64,
        end: i64,
    ) -> AnnotResult<CircularInterval> {
        if start > end {
            return Ok(CircularInterval::Empty);
        }
        if end - start + 1 >= self.len as i64 {
            return Ok(CircularInterval::Linear {
                start: 0,
                end:   self.len - 1,
            });
        }
        Ok(CircularInterval::from_reduced(
            self.reduce(start)?,
            self.reduce(end)?,
        ))
    }

    pub fn place(
        &self,
        scored: ScoredHit,
    ) -> AnnotResult<PlacedHit> {
        if scored.qlen != self.len {
            warn!(
                "Hit {} was searched against a sequence of length {}, expected {}",
                scored.sseqid(),
                scored.qlen,
                self.len
            );
        }
        let qstart = self.reduce(scored.hit.qstart)?;
        let qend = self.reduce(scored.hit.qend)?;
        let span = self.interval(scored.hit.qstart, scored.hit.qend)?;
        let window = self.interval(scored.wstart, scored.wend)?;
        Ok(PlacedHit {
            scored,
            qstart,
            qend,
            span,
            window,
        })
    }
}
