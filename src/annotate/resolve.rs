use std::cmp::Ordering;

use hashbrown::HashSet;
use log::debug;

use crate::annotate::circular::CircularSpace;
use crate::annotate::occupancy::{
    OccupancyClaim,
    OccupancyIndex,
};
use crate::data_structs::enums::Frame;
use crate::data_structs::hit::PlacedHit;
use crate::data_structs::typedef::PosType;
use crate::error::AnnotResult;

/// Hits that survived overlap resolution, best first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedFeatureSet {
    hits: Vec<PlacedHit>,
}

impl ResolvedFeatureSet {
    pub fn len(&self) -> usize { self.hits.len() }

    pub fn is_empty(&self) -> bool { self.hits.is_empty() }

    pub fn hits(&self) -> &[PlacedHit] { &self.hits }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedHit> {
        self.hits.iter()
    }

    pub fn into_inner(self) -> Vec<PlacedHit> { self.hits }
}

impl IntoIterator for ResolvedFeatureSet {
    type IntoIter = std::vec::IntoIter<PlacedHit>;
    type Item = PlacedHit;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

/// Resolver priority: score, then alignment length, then percent match,
/// all descending.
pub fn compare_priority(
    a: &PlacedHit,
    b: &PlacedHit,
) -> Ordering {
    b.score()
        .total_cmp(&a.score())
        .then_with(|| b.scored.length().cmp(&a.scored.length()))
        .then_with(|| b.percmatch().total_cmp(&a.percmatch()))
}

/// Stable sort by [`compare_priority`]; ties keep insertion order.
pub fn rank_hits(hits: &mut [PlacedHit]) {
    hits.sort_by(compare_priority);
}

/// Removes hits that repeat an earlier hit exactly (same database, subject,
/// reduced coordinates and frame), e.g. a feature found in both halves of
/// a doubled circular sequence. The best-ranked copy is kept and the
/// result is in [`rank_hits`] order.
pub fn dedup_exact(mut hits: Vec<PlacedHit>) -> Vec<PlacedHit> {
    rank_hits(&mut hits);
    let mut seen: HashSet<(String, String, PosType, PosType, Frame)> = HashSet::new();
    hits.into_iter()
        .filter(|hit| {
            seen.insert((
                hit.database().to_string(),
                hit.sseqid().to_string(),
                hit.qstart,
                hit.qend,
                hit.sframe(),
            ))
        })
        .collect()
}

/// Greedy same-kind deduplication of overlapping hits.
///
/// Hits are ranked best-first. Walking the ranking, each hit still pending
/// drops every lower-ranked hit of the same kind whose trimmed window
/// touches any position of its untrimmed span. Different kinds never
/// conflict, so nested features of different categories survive together.
#[derive(Debug, Clone, Copy)]
pub struct OccupancyResolver {
    space: CircularSpace,
}

impl OccupancyResolver {
    pub fn new(space: CircularSpace) -> Self {
        Self { space }
    }

    /// Fails only when `qlen` is zero.
    pub fn try_new(qlen: PosType) -> AnnotResult<Self> {
        Ok(Self::new(CircularSpace::try_new(qlen)?))
    }

    pub fn space(&self) -> &CircularSpace { &self.space }

    pub fn resolve(
        &self,
        mut hits: Vec<PlacedHit>,
    ) -> ResolvedFeatureSet {
        if hits.is_empty() {
            return ResolvedFeatureSet::default();
        }
        rank_hits(&mut hits);

        let index = OccupancyIndex::from_claims(
            self.space.len(),
            hits.iter().enumerate().filter_map(|(rank, hit)| {
                hit.kind().map(|kind| {
                    OccupancyClaim {
                        kind: kind.clone(),
                        window: hit.window,
                        rank,
                    }
                })
            }),
        );

        let mut dropped = vec![false; hits.len()];
        for (rank, hit) in hits.iter().enumerate() {
            if dropped[rank] {
                continue;
            }
            let Some(kind) = hit.kind()
            else {
                continue;
            };
            for occupant in index.occupants(kind, &hit.span) {
                if occupant > rank {
                    dropped[occupant] = true;
                }
            }
        }

        let n_total = hits.len();
        let hits: Vec<PlacedHit> = hits
            .into_iter()
            .zip(dropped)
            .filter_map(|(hit, is_dropped)| (!is_dropped).then_some(hit))
            .collect();
        debug!(
            "Resolved {} hits into {} features",
            n_total,
            hits.len()
        );
        ResolvedFeatureSet { hits }
    }
}
