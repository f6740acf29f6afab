//! Bulk template generation from candidate feature lists
//!
//! [`Template::expand`] treats its feature lists as ordered slots, selects
//! every slot subset whose size matches the [`Combinations`] setting, and
//! crosses the selected slots to form candidate feature combinations. After
//! redundancy and overlap filtering, each surviving combination is sorted into
//! canonical order, deduplicated, registered, and yielded.
//!
//! The sequence is lazy and single-pass: expansion is combinatorial in its
//! inputs, so callers must be able to stop consuming early. Only templates
//! that have actually been yielded are registered; duplicates are detected on
//! the canonical form before construction, so early termination never leaves
//! a provisional entry behind.

use std::collections::HashSet;

use crate::feature::Feature;
use crate::template::{canonical_form, Template, TemplateRegistry};

/// How many slots each generated template draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinations {
    /// Every non-empty subset of slots (sizes 1..=n)
    All,
    /// Exactly `k` slots
    Exactly(usize),
    /// Between `k1` and `k2` slots, inclusive
    Between(usize, usize),
}

impl Combinations {
    fn size_range(self, slot_count: usize) -> (usize, usize) {
        let (min, max) = match self {
            Combinations::All => (1, slot_count),
            Combinations::Exactly(k) => (k, k),
            Combinations::Between(k1, k2) => (k1, k2),
        };
        (min.max(1), max.min(slot_count))
    }
}

impl Template {
    /// Lazily generate a template library from candidate feature lists
    ///
    /// Each inner list is one slot, holding candidate features of one kind
    /// (often built with [`Feature::expand`]). Combinations containing a
    /// same-variant position-superset pair are rejected as redundant
    /// specializations; with `skip_intersecting`, combinations where two
    /// features share any position are rejected as well. Survivors are sorted
    /// into canonical feature order and deduplicated across the whole call.
    ///
    /// The returned iterator registers each template as it yields it, so it
    /// must be consumed at most once; a second pass would reassign ids.
    pub fn expand<'a>(
        registry: &'a mut TemplateRegistry,
        feature_lists: &'a [Vec<Feature>],
        combinations: Combinations,
        skip_intersecting: bool,
    ) -> TemplateExpansion<'a> {
        let (min_size, max_size) = combinations.size_range(feature_lists.len());
        let cursor = first_cursor(feature_lists, min_size, max_size);
        TemplateExpansion {
            registry,
            slots: feature_lists,
            skip_intersecting,
            max_size,
            seen: HashSet::new(),
            cursor,
        }
    }
}

/// Lazy, single-pass iterator over generated templates
///
/// Created by [`Template::expand`]. Slot subsets are visited in ascending
/// size and lexicographic order; within a subset, the rightmost slot cycles
/// fastest.
pub struct TemplateExpansion<'a> {
    registry: &'a mut TemplateRegistry,
    slots: &'a [Vec<Feature>],
    skip_intersecting: bool,
    max_size: usize,
    seen: HashSet<String>,
    cursor: Option<Cursor>,
}

/// Position within the candidate space: which slots are selected and which
/// feature is picked from each
struct Cursor {
    combo: Vec<usize>,
    picks: Vec<usize>,
}

impl Iterator for TemplateExpansion<'_> {
    type Item = Template;

    fn next(&mut self) -> Option<Template> {
        loop {
            let candidate: Vec<Feature> = {
                let cursor = self.cursor.as_ref()?;
                cursor
                    .combo
                    .iter()
                    .zip(&cursor.picks)
                    .map(|(&slot, &pick)| self.slots[slot][pick].clone())
                    .collect()
            };
            advance(&mut self.cursor, self.slots, self.max_size);

            if has_redundant_pair(&candidate) {
                continue;
            }
            if self.skip_intersecting && has_intersecting_pair(&candidate) {
                continue;
            }

            let mut candidate = candidate;
            candidate.sort();
            if !self.seen.insert(canonical_form(&candidate)) {
                continue;
            }
            return Some(self.registry.register(candidate));
        }
    }
}

fn has_redundant_pair(features: &[Feature]) -> bool {
    features.iter().enumerate().any(|(i, x)| {
        features
            .iter()
            .enumerate()
            .any(|(j, y)| i != j && x.is_superset(y))
    })
}

fn has_intersecting_pair(features: &[Feature]) -> bool {
    features.iter().enumerate().any(|(i, x)| {
        features
            .iter()
            .enumerate()
            .any(|(j, y)| i != j && x.intersects(y))
    })
}

/// First cursor position, skipping slot subsets that include an empty slot
fn first_cursor(slots: &[Vec<Feature>], min_size: usize, max_size: usize) -> Option<Cursor> {
    let mut size = min_size;
    while size <= max_size {
        let mut combo: Vec<usize> = (0..size).collect();
        loop {
            if combo.iter().all(|&slot| !slots[slot].is_empty()) {
                return Some(Cursor {
                    picks: vec![0; size],
                    combo,
                });
            }
            if !next_combination(&mut combo, slots.len()) {
                break;
            }
        }
        size += 1;
    }
    None
}

/// Move the cursor to the next candidate, or to `None` when exhausted
fn advance(cursor: &mut Option<Cursor>, slots: &[Vec<Feature>], max_size: usize) {
    let Some(current) = cursor.as_mut() else {
        return;
    };

    // odometer over the picks, rightmost slot fastest
    let mut i = current.picks.len();
    while i > 0 {
        i -= 1;
        current.picks[i] += 1;
        if current.picks[i] < slots[current.combo[i]].len() {
            return;
        }
        current.picks[i] = 0;
    }

    // picks exhausted for this subset; advance the subset, then the size
    let mut size = current.combo.len();
    loop {
        if next_combination(&mut current.combo, slots.len()) {
            if current.combo.iter().all(|&slot| !slots[slot].is_empty()) {
                current.picks = vec![0; size];
                return;
            }
            continue;
        }
        size += 1;
        if size > max_size {
            *cursor = None;
            return;
        }
        current.combo = (0..size).collect();
        if current.combo.iter().all(|&slot| !slots[slot].is_empty()) {
            current.picks = vec![0; size];
            return;
        }
    }
}

/// Step a sorted index combination to its lexicographic successor
fn next_combination(combo: &mut [usize], n: usize) -> bool {
    let r = combo.len();
    let mut i = r;
    while i > 0 {
        i -= 1;
        if combo[i] != i + n - r {
            combo[i] += 1;
            for j in i + 1..r {
                combo[j] = combo[j - 1] + 1;
            }
            return true;
        }
    }
    false
}
