use super::input::Gallery;
use super::output::Frame;
use super::tags::TagSet;
use super::Warning;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub total: u64,
    pub warnings: Vec<Warning>,
}

/// Robot satisfaction between two consecutive frameglasses: the smallest
/// of the shared tags, the tags only in `a` and the tags only in `b`.
pub fn transition_score(a: &TagSet, b: &TagSet) -> usize {
    let common = a.intersection_len(b);
    common.min(a.len() - common).min(b.len() - common)
}

/// Sums the transition scores along the frame sequence.
///
/// A frame that names a painting missing from the gallery contributes an
/// empty tag set and is reported.
pub fn score(frames: &[Frame], gallery: &Gallery) -> Score {
    let mut total = 0u64;
    let mut warnings = Vec::new();
    let mut previous: Option<TagSet> = None;

    for (index, frame) in frames.iter().enumerate() {
        let tags = frame_tags(index + 1, frame, gallery, &mut warnings);
        if let Some(previous) = &previous {
            total += transition_score(previous, &tags) as u64;
        }
        previous = Some(tags);
    }

    Score { total, warnings }
}

fn frame_tags(
    position: usize,
    frame: &Frame,
    gallery: &Gallery,
    warnings: &mut Vec<Warning>,
) -> TagSet {
    let mut missing = false;
    for id in frame.paintings() {
        if gallery.get(id).is_none() {
            warnings.push(Warning::UnknownPainting {
                frame: position,
                id,
            });
            missing = true;
        }
    }
    if missing {
        return TagSet::empty();
    }

    match *frame {
        Frame::Single(id) => gallery
            .get(id)
            .map(|painting| painting.tags.clone())
            .unwrap_or_default(),
        Frame::Pair(a, b) => match (gallery.get(a), gallery.get(b)) {
            (Some(first), Some(second)) => first.tags.union(&second.tags),
            _ => TagSet::empty(),
        },
    }
}
