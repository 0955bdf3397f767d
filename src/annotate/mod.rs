//! Hit scoring and overlap resolution.
//!
//! An annotation run takes the raw rows every configured database produced
//! for one query and turns them into a single set of features:
//!
//! 1. [`normalize`]: backend rows become [`NormalizedHit`]s (0-based
//!    ordered coordinates, nucleotide units, definite frame); rows with an
//!    uninformative e-value are dropped.
//! 2. [`score`]: every hit gets a comparable score and a trimmed window.
//! 3. [`circular`]: coordinates found on the doubled search sequence are
//!    reduced back into the true sequence, producing origin-crossing
//!    intervals where needed.
//! 4. [`resolve`]: same-kind overlapping hits collapse to the best one,
//!    using an interval index per kind ([`occupancy`]).
//! 5. [`assemble`]: survivors become [`Annotation`] rows.
//!
//! Databases are normalized and scored concurrently on the crate thread
//! pool; resolution runs once over the merged list.
//!
//! [`NormalizedHit`]: crate::data_structs::NormalizedHit

pub mod assemble;
pub mod circular;
pub mod config;
pub mod normalize;
pub mod occupancy;
pub mod resolve;
pub mod score;

use std::sync::Arc;

use itertools::Itertools;
use log::{
    debug,
    info,
};
use rayon::prelude::*;

pub use assemble::{
    Annotation,
    Assembler,
};
pub use circular::CircularSpace;
pub use config::AnnotateConfig;
pub use normalize::Normalizer;
pub use occupancy::{
    OccupancyClaim,
    OccupancyIndex,
};
pub use resolve::{
    OccupancyResolver,
    ResolvedFeatureSet,
};
pub use score::score;

use crate::data_structs::enums::Backend;
use crate::data_structs::hit::{
    RawHit,
    ScoredHit,
};
use crate::data_structs::QuerySequence;
use crate::error::AnnotResult;
use crate::io::kinds::KindLookup;
use crate::utils::{
    n_threads,
    THREAD_POOL,
};

/// Raw rows one database produced for the query, with the backend that
/// produced them and how their feature kinds are assigned.
#[derive(Clone)]
pub struct DatabaseHits {
    pub name:    String,
    pub backend: Backend,
    pub kinds:   Arc<dyn KindLookup>,
    pub rows:    Vec<RawHit>,
}

impl DatabaseHits {
    pub fn new<S: Into<String>>(
        name: S,
        backend: Backend,
        kinds: Arc<dyn KindLookup>,
        rows: Vec<RawHit>,
    ) -> Self {
        Self {
            name: name.into(),
            backend,
            kinds,
            rows,
        }
    }
}

impl std::fmt::Debug for DatabaseHits {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("DatabaseHits")
            .field("name", &self.name)
            .field("backend", &self.backend)
            .field("rows", &self.rows.len())
            .finish()
    }
}

/// Entry point of an annotation run for one query sequence.
#[derive(Debug, Clone)]
pub struct Annotator {
    query:  QuerySequence,
    config: AnnotateConfig,
}

impl Annotator {
    pub fn new(
        query: QuerySequence,
        config: AnnotateConfig,
    ) -> Self {
        Self { query, config }
    }

    pub fn query(&self) -> &QuerySequence { &self.query }

    pub fn config(&self) -> &AnnotateConfig { &self.config }

    /// Normalizes and scores the rows of a single database.
    pub fn score_database(
        &self,
        database: &DatabaseHits,
    ) -> AnnotResult<Vec<ScoredHit>> {
        let normalizer = Normalizer::new(
            database.backend,
            &database.name,
            self.query.searched_len(self.config.linear),
            self.config.max_evalue,
        );
        normalizer
            .normalize(&database.rows)?
            .into_iter()
            .map(|hit| {
                let kind = database.kinds.kind(&hit.sseqid);
                score(hit, kind, &self.config)
            })
            .collect()
    }

    /// Runs every stage up to overlap resolution.
    pub fn resolve(
        &self,
        databases: &[DatabaseHits],
    ) -> AnnotResult<ResolvedFeatureSet> {
        let space = CircularSpace::try_new(self.query.len())?;

        debug!(
            "Scoring {} databases on {} threads",
            databases.len(),
            n_threads()
        );
        let scored = THREAD_POOL.install(|| {
            databases
                .par_iter()
                .map(|database| self.score_database(database))
                .collect::<AnnotResult<Vec<_>>>()
        })?;
        for (database, hits) in databases.iter().zip(scored.iter()) {
            debug!("{}: {} scored hits", database.name, hits.len());
        }

        let placed = scored
            .into_iter()
            .flatten()
            .map(|hit| space.place(hit))
            .collect::<AnnotResult<Vec<_>>>()?;
        let n_placed = placed.len();
        let placed = resolve::dedup_exact(placed);
        if placed.len() < n_placed {
            debug!("Removed {} duplicate hits", n_placed - placed.len());
        }

        let resolved = OccupancyResolver::new(space).resolve(placed);
        info!(
            "{}: {} features from {} databases",
            self.query.name(),
            resolved.len(),
            databases.len()
        );
        Ok(resolved)
    }

    /// Full run: resolution followed by annotation assembly.
    pub fn annotate(
        &self,
        databases: &[DatabaseHits],
    ) -> AnnotResult<Vec<Annotation>> {
        let resolved = self.resolve(databases)?;
        let annotations =
            Assembler::new(&self.query, self.config.min_pi_permatch).assemble(&resolved);
        if annotations.is_empty() {
            info!("{}: no features found", self.query.name());
        }
        else {
            debug!(
                "{}: reporting kinds {}",
                self.query.name(),
                annotations
                    .iter()
                    .filter_map(|a| a.kind.as_deref())
                    .unique()
                    .join(", ")
            );
        }
        Ok(annotations)
    }
}
