use hashbrown::HashMap;
use itertools::Itertools;
use rust_lapper::{
    Interval,
    Lapper,
};

use crate::data_structs::interval::CircularInterval;
use crate::data_structs::typedef::{
    KindStr,
    PosType,
};

/// A hit's trimmed window tagged with its kind and resolver rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyClaim {
    pub kind:   KindStr,
    pub window: CircularInterval,
    pub rank:   usize,
}

/// Range-overlap index of occupancy claims, one interval tree per kind.
///
/// Wrapped windows are stored as two half-open intervals sharing the same
/// rank; empty windows are never stored.
#[derive(Clone, Debug)]
pub struct OccupancyIndex {
    len:   PosType,
    inner: HashMap<KindStr, Lapper<PosType, usize>>,
}

impl OccupancyIndex {
    pub fn from_claims<I>(
        len: PosType,
        claims: I,
    ) -> Self
    where
        I: IntoIterator<Item = OccupancyClaim>, {
        let grouped = claims
            .into_iter()
            .filter(|claim| !claim.window.is_empty())
            .map(|claim| (claim.kind.clone(), claim))
            .into_group_map();

        let mut inner = HashMap::with_capacity(grouped.len());
        for (kind, claims) in grouped.into_iter() {
            let intervals = claims
                .iter()
                .flat_map(|claim| {
                    claim.window.ranges(len).into_iter().map(|r| {
                        Interval {
                            start: r.start,
                            stop:  r.end,
                            val:   claim.rank,
                        }
                    })
                })
                .collect_vec();
            inner.insert(kind, Lapper::new(intervals));
        }

        Self { len, inner }
    }

    /// Ranks of the same-kind claims occupying any position of `span`,
    /// ascending and without duplicates.
    pub fn occupants(
        &self,
        kind: &KindStr,
        span: &CircularInterval,
    ) -> Vec<usize> {
        let Some(lapper) = self.inner.get(kind)
        else {
            return vec![];
        };
        span.ranges(self.len)
            .into_iter()
            .flat_map(|r| lapper.find(r.start, r.end).map(|i| i.val))
            .sorted_unstable()
            .dedup()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(
        kind: &str,
        start: u32,
        end: u32,
        rank: usize,
    ) -> OccupancyClaim {
        OccupancyClaim {
            kind: KindStr::from(kind),
            window: CircularInterval::from_reduced(start, end),
            rank,
        }
    }

    #[test]
    fn test_occupants_by_kind() {
        let index = OccupancyIndex::from_claims(200, vec![
            claim("promoter", 16, 44, 0),
            claim("promoter", 36, 64, 1),
            claim("terminator", 36, 64, 2),
        ]);
        let promoter = KindStr::from("promoter");
        assert_eq!(
            index.occupants(&promoter, &CircularInterval::from_reduced(30, 70)),
            vec![0, 1]
        );
        assert_eq!(
            index.occupants(&promoter, &CircularInterval::from_reduced(45, 70)),
            vec![1]
        );
        assert!(index
            .occupants(&KindStr::from("origin"), &CircularInterval::from_reduced(0, 199))
            .is_empty());
        assert_eq!(
            index.occupants(&KindStr::from("terminator"), &CircularInterval::from_reduced(0, 40)),
            vec![2]
        );
    }

    #[test]
    fn test_wrapped_claim_and_query() {
        let index = OccupancyIndex::from_claims(100, vec![claim("origin", 96, 3, 4)]);
        let origin = KindStr::from("origin");
        assert_eq!(
            index.occupants(&origin, &CircularInterval::from_reduced(0, 10)),
            vec![4]
        );
        assert_eq!(
            index.occupants(&origin, &CircularInterval::from_reduced(90, 96)),
            vec![4]
        );
        // both halves hit, rank reported once
        assert_eq!(
            index.occupants(&origin, &CircularInterval::from_reduced(99, 0)),
            vec![4]
        );
        assert!(index
            .occupants(&origin, &CircularInterval::from_reduced(4, 95))
            .is_empty());
    }

    #[test]
    fn test_empty_window_is_not_a_claim() {
        let index = OccupancyIndex::from_claims(100, vec![
            OccupancyClaim {
                kind:   KindStr::from("promoter"),
                window: CircularInterval::Empty,
                rank:   0,
            },
            claim("promoter", 10, 20, 1),
        ]);
        assert_eq!(
            index.occupants(
                &KindStr::from("promoter"),
                &CircularInterval::from_reduced(0, 99)
            ),
            vec![1]
        );
    }
}
