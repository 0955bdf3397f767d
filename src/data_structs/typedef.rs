use smallstr::SmallString;

pub const SMALLSTR_SIZE: usize = 20;
/// Feature category label, e.g. `promoter` or `rep_origin`.
pub type KindStr = SmallString<[u8; SMALLSTR_SIZE]>;
/// Position on the (un-doubled) query sequence.
pub type PosType = u32;
pub type ScoreType = f64;
