pub use crate::annotate::{
    Annotation,
    AnnotateConfig,
    Annotator,
    Assembler,
    CircularSpace,
    DatabaseHits,
    Normalizer,
    OccupancyIndex,
    OccupancyResolver,
    ResolvedFeatureSet,
};
pub use crate::data_structs::typedef::{
    KindStr,
    PosType,
    ScoreType,
};
pub use crate::data_structs::{
    Backend,
    CircularInterval,
    Frame,
    NormalizedHit,
    PlacedHit,
    QuerySequence,
    RawHit,
    ScoredHit,
};
pub use crate::error::{
    AnnotError,
    AnnotResult,
};
pub use crate::io::{
    read_hits,
    read_query,
    read_query_path,
    Catalog,
    ConstantKind,
    KindLookup,
    KindTable,
};
