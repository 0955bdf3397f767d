use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::AnnotError;

/// Search method that produced a hit.
///
/// The backend decides how raw rows are normalized (coordinate scaling,
/// frame inference) and carries a fixed priority, `0` being the most
/// favourable.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Direct nucleotide alignment.
    Blastn,
    /// Translated (nucleotide query vs protein subject) alignment.
    Diamond,
    /// Covariance-model search for structured RNAs.
    Infernal,
}

impl Backend {
    pub fn priority(&self) -> u8 {
        match self {
            Backend::Blastn => 0,
            Backend::Diamond => 1,
            Backend::Infernal => 2,
        }
    }

    pub fn is_nucleotide(&self) -> bool {
        matches!(self, Backend::Blastn)
    }

    pub fn is_protein(&self) -> bool {
        matches!(self, Backend::Diamond)
    }
}

impl FromStr for Backend {
    type Err = AnnotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blastn" => Ok(Backend::Blastn),
            "diamond" => Ok(Backend::Diamond),
            "infernal" => Ok(Backend::Infernal),
            _ => Err(AnnotError::UnknownBackend(s.to_string())),
        }
    }
}

impl Display for Backend {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Backend::Blastn => write!(f, "blastn"),
            Backend::Diamond => write!(f, "diamond"),
            Backend::Infernal => write!(f, "infernal"),
        }
    }
}

/// Reading frame / strand of a hit relative to the query.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Frame {
    Forward,
    Reverse,
    Unknown,
}

impl Frame {
    /// Frame implied by the orientation of the reported query coordinates.
    pub fn from_orientation(
        qstart: i64,
        qend: i64,
    ) -> Self {
        if qstart < qend {
            Frame::Forward
        }
        else {
            Frame::Reverse
        }
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, Frame::Reverse)
    }
}

impl From<Frame> for i8 {
    fn from(value: Frame) -> Self {
        match value {
            Frame::Forward => 1,
            Frame::Reverse => -1,
            Frame::Unknown => 0,
        }
    }
}

impl TryFrom<i8> for Frame {
    type Error = AnnotError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Frame::Forward),
            -1 => Ok(Frame::Reverse),
            0 => Ok(Frame::Unknown),
            other => Err(AnnotError::UnknownFrame(other.to_string())),
        }
    }
}

/// Parses both numeric frames (`1`, `-1`, `0`) and strand symbols
/// (`+`, `-`, `.`), the latter being what structural search reports.
impl FromStr for Frame {
    type Err = AnnotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" | "1" | "+1" => Ok(Frame::Forward),
            "-" | "-1" => Ok(Frame::Reverse),
            "." | "0" => Ok(Frame::Unknown),
            other => Err(AnnotError::UnknownFrame(other.to_string())),
        }
    }
}

impl Display for Frame {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", match self {
            Frame::Forward => "+",
            Frame::Reverse => "-",
            Frame::Unknown => ".",
        })
    }
}
