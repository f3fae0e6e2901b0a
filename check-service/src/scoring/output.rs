use std::collections::HashSet;

use super::{numbered_lines, PaintingId, ValidationError, Warning};

/// One frameglass: a single painting, or two paintings shown together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Single(PaintingId),
    Pair(PaintingId, PaintingId),
}

impl Frame {
    pub fn paintings(&self) -> impl Iterator<Item = PaintingId> {
        let (first, second) = match *self {
            Frame::Single(id) => (id, None),
            Frame::Pair(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }
}

/// Reads and verifies an output file.
///
/// A painting may appear in at most one frame. Ids are claimed token by
/// token, so a line rejected later for a bad token or a bad part count
/// still holds the ids read before the rejection.
pub fn read_output(content: &str) -> Result<(Vec<Frame>, Vec<Warning>), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyOutput);
    }

    let mut lines = numbered_lines(content);
    let declared: i64 = lines
        .next()
        .and_then(|(_, first)| first.parse().ok())
        .ok_or(ValidationError::InvalidFrameCount)?;

    let mut frames = Vec::new();
    let mut used = HashSet::new();
    let mut warnings = Vec::new();

    'lines: for (line, text) in lines {
        if text.is_empty() {
            continue;
        }

        let parts: Vec<&str> = text.split_whitespace().collect();
        if let [a, b] = parts.as_slice() {
            if a == b {
                return Err(ValidationError::DuplicateInFrame {
                    line,
                    id: a.to_string(),
                });
            }
        }

        let mut ids = Vec::with_capacity(parts.len());
        for part in &parts {
            let Ok(id) = part.parse::<PaintingId>() else {
                warnings.push(Warning::InvalidFrameLine {
                    line,
                    content: text.to_string(),
                });
                continue 'lines;
            };
            if !used.insert(id) {
                return Err(ValidationError::DuplicateId { line, id });
            }
            ids.push(id);
        }

        match ids.as_slice() {
            [id] => frames.push(Frame::Single(*id)),
            [a, b] => frames.push(Frame::Pair(*a, *b)),
            _ => warnings.push(Warning::InvalidPartCount { line }),
        }
    }

    if usize::try_from(declared).ok() != Some(frames.len()) {
        return Err(ValidationError::FrameCountMismatch {
            declared,
            found: frames.len(),
        });
    }

    Ok((frames, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_single_and_paired_frames() {
        let (frames, warnings) = read_output("3\n0\n3\n1 2\n").unwrap();
        assert!(warnings.is_empty());
        assert_eq!(
            frames,
            vec![Frame::Single(0), Frame::Single(3), Frame::Pair(1, 2)]
        );
        assert_eq!(frames[2].paintings().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn same_painting_twice_in_one_frame() {
        let err = read_output("1\n4 4\n").unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateInFrame {
                line: 2,
                id: "4".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "ERROR on line 2: Duplicate painting ID '4' used in the same frame."
        );
    }

    #[test]
    fn painting_reused_across_frames() {
        let err = read_output("2\n0 1\n1\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "ERROR on line 3: Duplicate painting ID '1' is used more than once."
        );
    }

    #[test]
    fn invalid_lines_are_skipped_with_warnings() {
        let (frames, warnings) = read_output("2\n1 x\n2\n3 4 5\n6\n").unwrap();
        assert_eq!(frames, vec![Frame::Single(2), Frame::Single(6)]);
        let messages: Vec<String> = warnings.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "WARNING on line 2: Skipping invalid line: '1 x'",
                "WARNING on line 4: Line has invalid number of parts. Skipping.",
            ]
        );
    }

    #[test]
    fn skipped_lines_still_claim_leading_ids() {
        let err = read_output("1\n1 x\n1\n").unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId { line: 3, id: 1 });

        let err = read_output("1\n3 4 5\n4\n").unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId { line: 3, id: 4 });
    }

    #[test]
    fn repeated_id_on_a_long_line_is_fatal() {
        let err = read_output("0\n5 5 5\n").unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId { line: 2, id: 5 });
    }

    #[test]
    fn identical_tokens_are_compared_as_text() {
        let err = read_output("1\nx x\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "ERROR on line 2: Duplicate painting ID 'x' used in the same frame."
        );
        // Same number, different spelling: caught as a reused id instead.
        let err = read_output("1\n4 +4\n").unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId { line: 2, id: 4 });
    }

    #[test]
    fn negative_ids_are_frames() {
        let (frames, warnings) = read_output("2\n-3\n-1 7\n").unwrap();
        assert!(warnings.is_empty());
        assert_eq!(frames, vec![Frame::Single(-3), Frame::Pair(-1, 7)]);
    }

    #[test]
    fn blank_lines_keep_line_numbers() {
        let err = read_output("2\n0\n\n1 1\n").unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateInFrame {
                line: 4,
                id: "1".to_string()
            }
        );
    }

    #[test]
    fn declared_count_must_match() {
        let err = read_output("3\n0\n1\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "ERROR: The file declared 3 frames, but found 2."
        );
        assert_eq!(
            read_output("-1\n").unwrap_err(),
            ValidationError::FrameCountMismatch {
                declared: -1,
                found: 0
            }
        );
    }

    #[test]
    fn header_must_be_a_number() {
        assert_eq!(
            read_output("three\n0\n").unwrap_err(),
            ValidationError::InvalidFrameCount
        );
        assert_eq!(read_output("\n  \n").unwrap_err(), ValidationError::EmptyOutput);
    }

    #[test]
    fn zero_frames() {
        let (frames, warnings) = read_output("0").unwrap();
        assert!(frames.is_empty());
        assert!(warnings.is_empty());
    }
}
