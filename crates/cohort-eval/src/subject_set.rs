//! Deduplicated subject-id sets

use cohort_search::SubjectId;
use indexmap::IndexSet;

/// A deduplicated collection of subject ids.
///
/// Backed by an insertion-ordered set so run output is deterministic;
/// equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectSet {
    ids: IndexSet<SubjectId>,
}

impl SubjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from gateway results, dropping entries whose id could
    /// not be resolved. The filter step is explicit: every operation below
    /// assumes present ids.
    pub fn from_resolved(ids: Vec<Option<SubjectId>>) -> Self {
        Self {
            ids: ids.into_iter().flatten().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectId> {
        self.ids.iter()
    }

    /// Subjects present in both sets.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            ids: self.ids.intersection(&other.ids).cloned().collect(),
        }
    }

    /// Subjects present in either set.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            ids: self.ids.union(&other.ids).cloned().collect(),
        }
    }

    /// Subjects of this set absent from `other`.
    pub fn difference(&self, other: &Self) -> Self {
        Self {
            ids: self.ids.difference(&other.ids).cloned().collect(),
        }
    }
}

impl FromIterator<SubjectId> for SubjectSet {
    fn from_iter<I: IntoIterator<Item = SubjectId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for SubjectSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_owned).collect()
    }
}
