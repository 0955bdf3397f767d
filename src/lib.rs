//! # plasann
//!
//! `plasann` turns the raw alignment rows of several sequence search
//! backends into one non-redundant set of features on a plasmid. Hits from
//! nucleotide search (blastn), translated protein search (diamond) and
//! structural RNA search (cmscan) are brought to common coordinates and
//! units, scored on a shared scale and then deduplicated: among hits of the
//! same feature kind that overlap on the query, only the best survives.
//!
//! Plasmids are circular. A circular query is searched self-concatenated,
//! so hits may report coordinates past the end of the true sequence or
//! span the origin; these are folded back and represented as wrapped
//! intervals.
//!
//! ## Key Features
//!
//! * **Backend normalization**: 0-based ordered coordinates, nucleotide
//!   units for protein hits, definite reading frames ([`Normalizer`]).
//! * **Scoring**: coverage and identity combined into one comparable score
//!   with a trimmed "wiggle" window that lets neighbouring features touch
//!   ([`score`](annotate::score)).
//! * **Overlap resolution**: greedy best-first resolution over an interval
//!   index per kind ([`OccupancyResolver`]).
//! * **Parallel processing**: databases are normalized and scored on a
//!   shared Rayon pool.
//!
//! Number of threads to be used can be configured with setting
//! `PLASANN_NUM_THREADS` environment variable.
//!
//! ## Structure
//!
//! * [`data_structs`]: hit records at each stage, reading frames, circular
//!   intervals and the query sequence.
//! * [`annotate`]: the annotation stages and the [`Annotator`] entry point.
//! * [`io`]: backend output readers, kind tables, the database catalog and
//!   FASTA input.
//! * [`error`]: the [`AnnotError`] type.
//! * [`utils`]: thread pool and helper macros.
//!
//! ## Usage
//!
//! ```no_run
//! use plasann::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let catalog = Catalog::from_path("run/catalog.json")?;
//!     let config = catalog.config();
//!     let query = read_query_path("run/pUC19.fasta")?;
//!     let databases = catalog.load_databases(&config)?;
//!
//!     let annotations = Annotator::new(query, config).annotate(&databases)?;
//!     for feature in annotations {
//!         println!(
//!             "{}\t{}\t{}\t{}",
//!             feature.sseqid, feature.start, feature.end, feature.score
//!         );
//!     }
//!     Ok(())
//! }
//! ```

pub mod annotate;
pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod utils;

pub use annotate::{
    Annotation,
    Annotator,
    DatabaseHits,
    Normalizer,
    OccupancyResolver,
};
pub use error::{
    AnnotError,
    AnnotResult,
};
