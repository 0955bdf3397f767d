use crate::data_structs::interval::CircularInterval;
use crate::data_structs::typedef::PosType;
use crate::error::{
    AnnotError,
    AnnotResult,
};

/// The DNA sequence being annotated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySequence {
    name: String,
    seq:  Vec<u8>,
}

impl QuerySequence {
    /// Sequence is stored upper-cased. An empty sequence is rejected since
    /// no coordinate arithmetic is defined on it.
    pub fn try_new<S: Into<String>>(
        name: S,
        seq: &[u8],
    ) -> AnnotResult<Self> {
        if seq.is_empty() {
            return Err(AnnotError::ZeroLength);
        }
        Ok(Self {
            name: name.into(),
            seq:  seq.to_ascii_uppercase(),
        })
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn seq(&self) -> &[u8] { &self.seq }

    pub fn len(&self) -> PosType { self.seq.len() as PosType }

    pub fn is_empty(&self) -> bool { self.seq.is_empty() }

    /// Length of the sequence actually searched: circular sequences are
    /// searched self-concatenated so that origin-crossing hits are found.
    pub fn searched_len(
        &self,
        linear: bool,
    ) -> u32 {
        if linear {
            self.len()
        }
        else {
            self.len() * 2
        }
    }

    /// Bases covered by `interval`, read through the origin when the
    /// interval wraps.
    pub fn subsequence(
        &self,
        interval: &CircularInterval,
    ) -> Vec<u8> {
        interval
            .ranges(self.len())
            .into_iter()
            .flat_map(|r| self.seq[r.start as usize..r.end as usize].iter().copied())
            .collect()
    }
}
