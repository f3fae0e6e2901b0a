use super::tags::{TagInterner, TagSet};
use super::{numbered_lines, PaintingId, ValidationError, Warning};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    fn parse(code: &str) -> Option<Self> {
        match code {
            "L" => Some(Orientation::Landscape),
            "P" => Some(Orientation::Portrait),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Painting {
    pub id: PaintingId,
    pub orientation: Orientation,
    pub tags: TagSet,
}

/// Paintings read from an input file, indexed by id.
#[derive(Debug, Default)]
pub struct Gallery {
    // A painting's id is its line position, so rejected lines leave holes.
    slots: Vec<Option<Painting>>,
    tags: TagInterner,
    count: usize,
}

impl Gallery {
    pub fn get(&self, id: PaintingId) -> Option<&Painting> {
        let index = usize::try_from(id).ok()?;
        self.slots.get(index)?.as_ref()
    }

    /// Number of paintings that were accepted.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn tags(&self) -> &TagInterner {
        &self.tags
    }

    fn insert(&mut self, index: usize, painting: Painting) {
        if self.slots.len() <= index {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(painting);
        self.count += 1;
    }
}

/// Reads an input file.
///
/// Only a missing painting count is fatal; every malformed painting line
/// is skipped with a warning. Lines past the declared count are ignored.
pub fn read_input(content: &str) -> Result<(Gallery, Vec<Warning>), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let mut lines = numbered_lines(content);
    let declared: i64 = lines
        .next()
        .and_then(|(_, first)| first.parse().ok())
        .ok_or(ValidationError::InvalidPaintingCount)?;
    let readable = usize::try_from(declared.max(0)).unwrap_or(usize::MAX);

    let mut gallery = Gallery::default();
    let mut warnings = Vec::new();

    for (line, text) in lines.take(readable) {
        if text.is_empty() {
            continue;
        }

        let parts: Vec<&str> = text.split_whitespace().collect();
        if parts.len() < 2 {
            warnings.push(Warning::InputLineTooShort { line });
            continue;
        }

        let Some(orientation) = Orientation::parse(parts[0]) else {
            warnings.push(Warning::InvalidOrientation {
                line,
                orientation: parts[0].to_string(),
            });
            continue;
        };

        let Ok(expected) = parts[1].parse::<i64>() else {
            warnings.push(Warning::InvalidTagCount { line });
            continue;
        };

        let available = parts.len() - 2;
        if (available as i64) < expected {
            warnings.push(Warning::MissingTags {
                line,
                expected,
                got: available,
            });
            continue;
        }

        let ids = declared_tags(&parts, expected)
            .iter()
            .map(|tag| gallery.tags.intern(tag))
            .collect();
        let index = line - 2;
        gallery.insert(
            index,
            Painting {
                id: index as PaintingId,
                orientation,
                tags: TagSet::from_ids(ids),
            },
        );
    }

    if gallery.len() as i64 != declared {
        warnings.push(Warning::PaintingCountMismatch {
            expected: declared,
            parsed: gallery.len(),
        });
    }

    Ok((gallery, warnings))
}

/// Tags named by a tag count. Counts that cannot be satisfied were
/// rejected already; a negative count ends the slice that many parts
/// before the end of the line (`L -1 a` has no tags).
fn declared_tags<'a>(parts: &'a [&'a str], count: i64) -> &'a [&'a str] {
    let len = parts.len() as i64;
    let mut end = 2 + count;
    if end < 0 {
        end += len;
    }
    let end = end.clamp(0, len) as usize;
    if end <= 2 {
        &[]
    } else {
        &parts[2..end]
    }
}
