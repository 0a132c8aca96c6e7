//! Fuzzy place-name matching.
//!
//! Postal data and hand-typed input disagree with the directory on case,
//! abbreviations and spelling. Names are compared trimmed and lower-cased:
//! an exact hit wins outright, otherwise the closest candidate by Levenshtein
//! distance is accepted if it falls within a threshold that grows with the
//! length of the target.

use crate::model::AdministrativeEntity;

/// Lower bound on the accepted edit distance, so short names still tolerate typos.
const MIN_THRESHOLD: usize = 3;

/// Maximum accepted edit distance for `target`: `max(3, floor(len * 0.4))`.
///
/// `len` is the character count of the target as supplied.
pub fn match_threshold(target: &str) -> usize {
    let len = target.chars().count();
    // floor(len * 0.4) without going through floating point
    MIN_THRESHOLD.max(len * 2 / 5)
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed edit distance.
pub fn name_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(&normalize(a), &normalize(b))
}

/// Best candidate for `target`, or `None` when nothing is close enough.
///
/// Ties on distance go to the earliest candidate.
pub fn closest_match<'a>(
    target: &str,
    candidates: &'a [AdministrativeEntity],
) -> Option<&'a AdministrativeEntity> {
    let wanted = normalize(target);
    if wanted.is_empty() || candidates.is_empty() {
        return None;
    }

    if let Some(exact) = candidates.iter().find(|c| normalize(&c.name) == wanted) {
        return Some(exact);
    }

    let threshold = match_threshold(target);
    let mut best: Option<(usize, &AdministrativeEntity)> = None;
    for candidate in candidates {
        let distance = strsim::levenshtein(&wanted, &normalize(&candidate.name));
        if distance > threshold {
            continue;
        }
        match best {
            Some((best_distance, _)) if best_distance <= distance => {}
            _ => best = Some((distance, candidate)),
        }
    }

    best.map(|(_, candidate)| candidate)
}
