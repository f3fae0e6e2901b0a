//! Validation and scoring of gallery submissions.
//!
//! A submission is a pair of text files. The input file lists paintings
//! (orientation plus tags), the output file lists frameglasses, each
//! holding one or two painting ids. Validation rejects structurally
//! broken output files outright and collects warnings for lines that
//! can be skipped. The score of a sequence of frameglasses is the sum of
//! the transition scores between neighbours.

mod input;
mod output;
mod score;
mod tags;

pub use input::{read_input, Gallery, Painting};
pub use output::{read_output, Frame};
pub use score::{score, transition_score, Score};
pub use tags::{TagId, TagInterner, TagSet};

use std::fmt;
use thiserror::Error;

/// Painting ids are signed like any integer token in the files; ids
/// outside the gallery simply match no painting.
pub type PaintingId = i64;

/// Problems that make a file unusable. The first one found aborts the check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("ERROR: Input file is empty.")]
    EmptyInput,
    #[error("ERROR: First line of input file must be a number.")]
    InvalidPaintingCount,
    #[error("ERROR: Output file is empty.")]
    EmptyOutput,
    #[error("ERROR: First line must be a valid number for frame count.")]
    InvalidFrameCount,
    #[error("ERROR on line {line}: Duplicate painting ID '{id}' used in the same frame.")]
    DuplicateInFrame { line: usize, id: String },
    #[error("ERROR on line {line}: Duplicate painting ID '{id}' is used more than once.")]
    DuplicateId { line: usize, id: PaintingId },
    #[error("ERROR: The file declared {declared} frames, but found {found}.")]
    FrameCountMismatch { declared: i64, found: usize },
}

/// Problems that are reported but do not stop scoring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("WARNING: Skipping invalid line {line} in input file.")]
    InputLineTooShort { line: usize },
    #[error("WARNING: Invalid orientation '{orientation}' on line {line}. Skipping.")]
    InvalidOrientation { line: usize, orientation: String },
    #[error("WARNING: Invalid number of tags on line {line}. Skipping.")]
    InvalidTagCount { line: usize },
    #[error("WARNING: Not enough tags on line {line}. Expected {expected}, got {got}.")]
    MissingTags {
        line: usize,
        expected: i64,
        got: usize,
    },
    #[error("WARNING: Expected {expected} paintings, but parsed {parsed}.")]
    PaintingCountMismatch { expected: i64, parsed: usize },
    #[error("WARNING on line {line}: Skipping invalid line: '{content}'")]
    InvalidFrameLine { line: usize, content: String },
    #[error("WARNING on line {line}: Line has invalid number of parts. Skipping.")]
    InvalidPartCount { line: usize },
    #[error("WARNING: Frame {frame} references unknown painting ID '{id}'.")]
    UnknownPainting { frame: usize, id: PaintingId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Output,
    Input,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Output => f.write_str("Output"),
            Stage::Input => f.write_str("Input"),
        }
    }
}

/// A submission refused because one of its files failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} file validation failed.")]
pub struct Rejection {
    pub stage: Stage,
    pub error: ValidationError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub num_frames: usize,
    pub num_paintings: usize,
    pub global_score: u64,
    /// Output warnings first, then input warnings, then scoring warnings.
    pub warnings: Vec<Warning>,
}

/// Validates both files and scores the submission.
///
/// The output file is validated before the input file, so a submission
/// with two broken files is reported against its output.
pub fn check(input: &str, output: &str) -> Result<Report, Rejection> {
    let (frames, mut warnings) = read_output(output).map_err(|error| Rejection {
        stage: Stage::Output,
        error,
    })?;
    let (gallery, input_warnings) = read_input(input).map_err(|error| Rejection {
        stage: Stage::Input,
        error,
    })?;
    warnings.extend(input_warnings);

    let Score {
        total,
        warnings: score_warnings,
    } = score(&frames, &gallery);
    warnings.extend(score_warnings);

    Ok(Report {
        num_frames: frames.len(),
        num_paintings: gallery.len(),
        global_score: total,
        warnings,
    })
}

/// Trimmed lines paired with their 1-based line number.
fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .trim()
        .split('\n')
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
}
