//! Core data structures used throughout the `plasann` crate.
//!
//! - [`hit`]: the lifecycle of a single alignment, from the backend row
//!   ([`RawHit`]) through the canonical schema ([`NormalizedHit`]) and its
//!   quality measures ([`ScoredHit`]) to its placement on the circular
//!   coordinate space ([`PlacedHit`]).
//! - [`interval`]: [`CircularInterval`], an inclusive interval that may cross
//!   the origin of a circular sequence.
//! - [`QuerySequence`]: the annotated DNA sequence.
//! - Common enumerations: [`Backend`] for the search method and [`Frame`]
//!   for the reading frame of a hit.
//! - [`typedef`]: type aliases for positions, scores and kind labels.

pub mod enums;
pub mod hit;
pub mod interval;
mod query;
pub mod typedef;


pub use enums::{
    Backend,
    Frame,
};
pub use hit::{
    NormalizedHit,
    PlacedHit,
    RawHit,
    ScoredHit,
};
pub use interval::CircularInterval;
pub use query::QuerySequence;
