//! Input glue: backend hit tables, kind tables, the database catalog and
//! the query FASTA.
//!
//! Readers of backend output return [`AnnotResult`](crate::error::AnnotResult)
//! so that malformed rows carry their line and field; file-level helpers
//! return [`anyhow::Result`] with the offending path as context.

pub mod catalog;
pub mod fasta;
pub mod kinds;
pub mod tabular;

pub use catalog::{
    Catalog,
    DatabaseEntry,
    Details,
};
pub use fasta::{
    read_query,
    read_query_path,
};
pub use kinds::{
    ConstantKind,
    KindLookup,
    KindTable,
};
pub use tabular::{
    read_hits,
    read_tabular,
    read_tblout,
    TabularLayout,
};
