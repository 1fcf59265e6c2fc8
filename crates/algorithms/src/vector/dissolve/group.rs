//! Grouping of features by geometry kind and match-column values

use geodissolve_core::{Feature, GeometryKind};
use std::collections::HashMap;

/// Grouping key: the match-column values of a feature, in column order.
///
/// Values are compared element-wise, so a value containing the separator
/// of some textual encoding can never collide with a different tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(Vec<String>);

impl GroupKey {
    /// Build the key of a feature. Missing columns contribute an empty string.
    pub fn of(feature: &Feature, match_columns: &[String]) -> Self {
        GroupKey(
            match_columns
                .iter()
                .map(|c| feature.get_property(c).unwrap_or_default().to_string())
                .collect(),
        )
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }
}

/// A feature assigned to a group, with its position in the input
#[derive(Debug, Clone, Copy)]
pub struct Member<'a> {
    pub index: usize,
    pub feature: &'a Feature,
}

/// Features sharing geometry kind and match-column values
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub kind: GeometryKind,
    pub key: GroupKey,
    /// Members in input order
    pub members: Vec<Member<'a>>,
}

impl Group<'_> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Groups of one geometry kind, in first-encountered order
#[derive(Debug, Default)]
struct Partition<'a> {
    index: HashMap<GroupKey, usize>,
    groups: Vec<Group<'a>>,
}

impl<'a> Partition<'a> {
    fn insert(&mut self, kind: GeometryKind, key: GroupKey, member: Member<'a>) {
        match self.index.get(&key) {
            Some(&slot) => self.groups[slot].members.push(member),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push(Group {
                    kind,
                    key,
                    members: vec![member],
                });
            }
        }
    }
}

/// Result of grouping a feature sequence
#[derive(Debug, Default)]
pub struct Grouping<'a> {
    area: Vec<Group<'a>>,
    line: Vec<Group<'a>>,
    point: Vec<Group<'a>>,
    /// Input positions of features with no geometry or no recognised kind
    pub dropped: Vec<usize>,
}

impl<'a> Grouping<'a> {
    /// Groups of one kind, in first-encountered order
    pub fn groups(&self, kind: GeometryKind) -> &[Group<'a>] {
        match kind {
            GeometryKind::Area => &self.area,
            GeometryKind::Line => &self.line,
            GeometryKind::Point => &self.point,
        }
    }

    /// Total number of groups over all kinds
    pub fn group_count(&self) -> usize {
        self.area.len() + self.line.len() + self.point.len()
    }

    /// All groups: area, then line, then point
    pub fn into_groups(self) -> impl Iterator<Item = Group<'a>> {
        self.area.into_iter().chain(self.line).chain(self.point)
    }
}

/// Partition features by geometry kind, then by match-column key.
///
/// Grouping is stable: members keep their input order and groups appear in
/// the order their first member was seen. Features without a recognised
/// geometry kind are left out and reported in [`Grouping::dropped`].
///
/// # Arguments
/// * `features` - Input features
/// * `match_columns` - Grouping columns; empty puts every feature of a kind in one group
pub fn group_features<'a>(features: &'a [Feature], match_columns: &[String]) -> Grouping<'a> {
    let mut area = Partition::default();
    let mut line = Partition::default();
    let mut point = Partition::default();
    let mut dropped = Vec::new();

    for (index, feature) in features.iter().enumerate() {
        let Some(kind) = feature.kind() else {
            dropped.push(index);
            continue;
        };
        let partition = match kind {
            GeometryKind::Area => &mut area,
            GeometryKind::Line => &mut line,
            GeometryKind::Point => &mut point,
        };
        partition.insert(kind, GroupKey::of(feature, match_columns), Member { index, feature });
    }

    Grouping {
        area: area.groups,
        line: line.groups,
        point: point.groups,
        dropped,
    }
}
