use std::collections::{BTreeMap, BTreeSet};
use std::ops::AddAssign;

use super::api::{ApiId, ApiSet};
use super::key::ElementKey;

/// Overall comparison result for one position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResultKind {
    Same,
    Different,
    Partial,
    Added,
    Removed,
}

impl ResultKind {
    /// Classify a position from the instances that carry it
    ///
    /// ADDED and REMOVED are only decided for exactly two instances; with
    /// more, any gap is PARTIAL.
    pub fn classify(apis: &ApiSet, present: &BTreeSet<ApiId>, equal: bool) -> ResultKind {
        if present.len() == apis.len() {
            return if equal {
                ResultKind::Same
            } else {
                ResultKind::Different
            };
        }
        if apis.len() == 2 && present.len() == 1 {
            if present.contains(&apis.focus()) {
                return ResultKind::Added;
            }
            if present.contains(&apis.reference()) {
                return ResultKind::Removed;
            }
        }
        ResultKind::Partial
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ResultKind::Same => "=",
            ResultKind::Different => "\u{2260}",
            ResultKind::Partial => "\u{2248}",
            ResultKind::Added => "+",
            ResultKind::Removed => "\u{2212}",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ResultKind::Same => "same",
            ResultKind::Different => "different",
            ResultKind::Partial => "partial",
            ResultKind::Added => "added",
            ResultKind::Removed => "removed",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ResultKind::Same => "same in all instances",
            ResultKind::Different => "different in some instances",
            ResultKind::Partial => "missing in some instances",
            ResultKind::Added => "added",
            ResultKind::Removed => "removed",
        }
    }

    pub const ALL: [ResultKind; 5] = [
        ResultKind::Same,
        ResultKind::Different,
        ResultKind::Partial,
        ResultKind::Added,
        ResultKind::Removed,
    ];
}

/// What a count is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CountDomain {
    Element,
    Comment,
    Description,
}

/// Direction of a counted change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Added,
    Changed,
    Removed,
}

/// One of the nine rolled-up change counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CountKind {
    ElementAdded,
    ElementChanged,
    ElementRemoved,
    CommentAdded,
    CommentChanged,
    CommentRemoved,
    DescriptionAdded,
    DescriptionChanged,
    DescriptionRemoved,
}

impl CountKind {
    pub const ALL: [CountKind; 9] = [
        CountKind::ElementAdded,
        CountKind::ElementChanged,
        CountKind::ElementRemoved,
        CountKind::CommentAdded,
        CountKind::CommentChanged,
        CountKind::CommentRemoved,
        CountKind::DescriptionAdded,
        CountKind::DescriptionChanged,
        CountKind::DescriptionRemoved,
    ];

    pub fn new(domain: CountDomain, direction: Direction) -> Self {
        match (domain, direction) {
            (CountDomain::Element, Direction::Added) => CountKind::ElementAdded,
            (CountDomain::Element, Direction::Changed) => CountKind::ElementChanged,
            (CountDomain::Element, Direction::Removed) => CountKind::ElementRemoved,
            (CountDomain::Comment, Direction::Added) => CountKind::CommentAdded,
            (CountDomain::Comment, Direction::Changed) => CountKind::CommentChanged,
            (CountDomain::Comment, Direction::Removed) => CountKind::CommentRemoved,
            (CountDomain::Description, Direction::Added) => CountKind::DescriptionAdded,
            (CountDomain::Description, Direction::Changed) => CountKind::DescriptionChanged,
            (CountDomain::Description, Direction::Removed) => CountKind::DescriptionRemoved,
        }
    }

    pub fn domain(&self) -> CountDomain {
        match self {
            CountKind::ElementAdded | CountKind::ElementChanged | CountKind::ElementRemoved => {
                CountDomain::Element
            }
            CountKind::CommentAdded | CountKind::CommentChanged | CountKind::CommentRemoved => {
                CountDomain::Comment
            }
            CountKind::DescriptionAdded
            | CountKind::DescriptionChanged
            | CountKind::DescriptionRemoved => CountDomain::Description,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            CountKind::ElementAdded | CountKind::CommentAdded | CountKind::DescriptionAdded => {
                Direction::Added
            }
            CountKind::ElementChanged
            | CountKind::CommentChanged
            | CountKind::DescriptionChanged => Direction::Changed,
            CountKind::ElementRemoved
            | CountKind::CommentRemoved
            | CountKind::DescriptionRemoved => Direction::Removed,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Nine counters, one per [`CountKind`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts([u32; 9]);

impl Counts {
    pub fn get(&self, kind: CountKind) -> u32 {
        self.0[kind.index()]
    }

    pub fn increment(&mut self, kind: CountKind) {
        self.0[kind.index()] += 1;
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }
}

impl AddAssign<&Counts> for Counts {
    fn add_assign(&mut self, rhs: &Counts) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0.iter()) {
            *lhs += rhs;
        }
    }
}

/// Per-page summary table: one row of counts per element key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    rows: BTreeMap<ElementKey, Counts>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &ElementKey, kind: CountKind) {
        self.rows.entry(key.clone()).or_default().increment(kind);
    }

    /// Fold a child's totals into the row for `key`
    pub fn add(&mut self, key: &ElementKey, counts: &Counts) {
        if counts.is_zero() {
            return;
        }
        *self.rows.entry(key.clone()).or_default() += counts;
    }

    pub fn row(&self, key: &ElementKey) -> Option<&Counts> {
        self.rows.get(key)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&ElementKey, &Counts)> {
        self.rows.iter()
    }

    pub fn totals(&self) -> Counts {
        let mut totals = Counts::default();
        for counts in self.rows.values() {
            totals += counts;
        }
        totals
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
