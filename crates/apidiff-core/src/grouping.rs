//! Grouping of per-instance values and pairwise comparison against the focus.
//!
//! Instances whose values share an equality key form one group; instances
//! without a value form the absent group. Every group other than the focus
//! group is compared with the focus group exactly once, so N instances cost
//! at most N-1 renderings.

use crate::model::api::{ApiId, ApiSet};
use crate::model::api_map::ApiMap;
use crate::model::kinds::Direction;

/// Instances sharing one value (or sharing its absence)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a, T> {
    /// Equality key; `None` for the absent group
    pub key: Option<String>,
    pub apis: Vec<ApiId>,
    /// Value of the first instance in the group
    pub value: Option<&'a T>,
}

impl<T> Group<'_, T> {
    pub fn contains(&self, api: ApiId) -> bool {
        self.apis.contains(&api)
    }

    pub fn is_absent(&self) -> bool {
        self.key.is_none()
    }
}

/// Partition the instances of `apis` by the key of their value
///
/// Groups appear in the order their first instance appears.
pub fn group_by<'a, T>(
    apis: &ApiSet,
    map: &'a ApiMap<T>,
    key_of: impl Fn(&T) -> String,
) -> Vec<Group<'a, T>> {
    let mut groups: Vec<Group<'a, T>> = Vec::new();
    for api in apis.ids() {
        let value = map.get(api);
        let key = value.map(&key_of);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.apis.push(api),
            None => groups.push(Group {
                key,
                apis: vec![api],
                value,
            }),
        }
    }
    groups
}

/// Index of the group holding the newest instance
pub fn focus_group_index<T>(apis: &ApiSet, groups: &[Group<'_, T>]) -> Option<usize> {
    let focus = apis.focus();
    groups.iter().position(|g| g.contains(focus))
}

/// How one group relates to the focus group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonKind {
    /// Both groups carry a value
    Paired,
    /// Only the focus group carries a value
    Added,
    /// Only the older group carries a value
    Removed,
}

/// Renders the three comparison shapes for one value type
pub trait PairRenderer<T> {
    type Output;

    /// Render a paired diff; the returned direction refines `Changed` when
    /// the diff turns out to be a pure insertion or removal, and is `None`
    /// when the rendering shows no difference
    fn paired(
        &mut self,
        older: &Group<'_, T>,
        older_value: &T,
        focus: &Group<'_, T>,
        focus_value: &T,
    ) -> (Self::Output, Option<Direction>);

    fn added(
        &mut self,
        older: &Group<'_, T>,
        focus: &Group<'_, T>,
        focus_value: &T,
    ) -> Self::Output;

    fn removed(&mut self, older: &Group<'_, T>, older_value: &T) -> Self::Output;
}

/// Receives the counted direction of the reference-vs-focus comparison
pub trait CountSink {
    fn count(&mut self, direction: Direction);
}

impl<F: FnMut(Direction)> CountSink for F {
    fn count(&mut self, direction: Direction) {
        self(direction)
    }
}

/// One rendered group-vs-focus comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupComparison<O> {
    pub apis: Vec<ApiId>,
    pub focus_apis: Vec<ApiId>,
    pub kind: ComparisonKind,
    /// Uncounted when `None`
    pub direction: Option<Direction>,
    pub output: O,
}

/// Compare every non-focus group with the focus group
///
/// Only the comparison whose group holds the reference instance reaches
/// `sink`.
pub fn compare_with_focus<T, R>(
    apis: &ApiSet,
    map: &ApiMap<T>,
    key_of: impl Fn(&T) -> String,
    renderer: &mut R,
    sink: &mut dyn CountSink,
) -> Vec<GroupComparison<R::Output>>
where
    R: PairRenderer<T>,
{
    let groups = group_by(apis, map, key_of);
    let Some(focus_index) = focus_group_index(apis, &groups) else {
        return Vec::new();
    };
    let focus = &groups[focus_index];
    let reference = apis.reference();

    let mut comparisons = Vec::with_capacity(groups.len().saturating_sub(1));
    for (index, group) in groups.iter().enumerate() {
        if index == focus_index {
            continue;
        }
        let (kind, direction, output) = match (group.value, focus.value) {
            (Some(older), Some(newer)) => {
                let (output, direction) = renderer.paired(group, older, focus, newer);
                (ComparisonKind::Paired, direction, output)
            }
            (None, Some(newer)) => (
                ComparisonKind::Added,
                Some(Direction::Added),
                renderer.added(group, focus, newer),
            ),
            (Some(older), None) => (
                ComparisonKind::Removed,
                Some(Direction::Removed),
                renderer.removed(group, older),
            ),
            // two absent groups cannot exist
            (None, None) => continue,
        };
        if let Some(direction) = direction.filter(|_| group.contains(reference)) {
            sink.count(direction);
        }
        comparisons.push(GroupComparison {
            apis: group.apis.clone(),
            focus_apis: focus.apis.clone(),
            kind,
            direction,
            output,
        });
    }
    comparisons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::api::Api;
    use proptest::prelude::*;

    struct Labels;

    impl PairRenderer<String> for Labels {
        type Output = String;

        fn paired(
            &mut self,
            _older: &Group<'_, String>,
            older: &String,
            _focus: &Group<'_, String>,
            focus: &String,
        ) -> (String, Option<Direction>) {
            let direction = (older != focus).then_some(Direction::Changed);
            (format!("{}->{}", older, focus), direction)
        }

        fn added(
            &mut self,
            _older: &Group<'_, String>,
            _focus: &Group<'_, String>,
            focus: &String,
        ) -> String {
            format!("+{}", focus)
        }

        fn removed(&mut self, _older: &Group<'_, String>, older: &String) -> String {
            format!("-{}", older)
        }
    }

    struct Trimmed;

    impl PairRenderer<String> for Trimmed {
        type Output = String;

        fn paired(
            &mut self,
            older_group: &Group<'_, String>,
            older: &String,
            focus_group: &Group<'_, String>,
            focus: &String,
        ) -> (String, Option<Direction>) {
            let (older, focus) = (older.trim().to_string(), focus.trim().to_string());
            Labels.paired(older_group, &older, focus_group, &focus)
        }

        fn added(
            &mut self,
            older: &Group<'_, String>,
            focus: &Group<'_, String>,
            value: &String,
        ) -> String {
            Labels.added(older, focus, value)
        }

        fn removed(&mut self, older: &Group<'_, String>, value: &String) -> String {
            Labels.removed(older, value)
        }
    }

    fn apis(n: usize) -> ApiSet {
        ApiSet::new((0..n).map(|i| Api::new(format!("v{}", i + 1), "")).collect()).unwrap()
    }

    #[test]
    fn test_absent_middle_instance() {
        let apis = apis(3);
        let map: ApiMap<String> = [(ApiId(0), "x".to_string()), (ApiId(2), "x".to_string())]
            .into_iter()
            .collect();
        let groups = group_by(&apis, &map, |v| v.clone());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].apis, vec![ApiId(0), ApiId(2)]);
        assert!(groups[1].is_absent());
        assert_eq!(focus_group_index(&apis, &groups), Some(0));

        let mut counted = Vec::new();
        let comparisons =
            compare_with_focus(&apis, &map, |v| v.clone(), &mut Labels, &mut |d: Direction| counted.push(d));
        assert_eq!(comparisons.len(), 1);
        assert_eq!(comparisons[0].kind, ComparisonKind::Added);
        assert_eq!(comparisons[0].output, "+x");
        // instance 2 is the reference, so the comparison is counted
        assert_eq!(counted, vec![Direction::Added]);
    }

    #[test]
    fn test_removed_in_focus() {
        let apis = apis(2);
        let map: ApiMap<String> = [(ApiId(0), "old".to_string())].into_iter().collect();
        let mut counted = Vec::new();
        let comparisons =
            compare_with_focus(&apis, &map, |v| v.clone(), &mut Labels, &mut |d: Direction| counted.push(d));
        assert_eq!(comparisons[0].kind, ComparisonKind::Removed);
        assert_eq!(comparisons[0].output, "-old");
        assert_eq!(counted, vec![Direction::Removed]);
    }

    #[test]
    fn test_only_reference_group_is_counted() {
        let apis = apis(3);
        let map: ApiMap<String> = [
            (ApiId(0), "a".to_string()),
            (ApiId(1), "c".to_string()),
            (ApiId(2), "c".to_string()),
        ]
        .into_iter()
        .collect();
        let mut counted = Vec::new();
        let comparisons =
            compare_with_focus(&apis, &map, |v| v.clone(), &mut Labels, &mut |d: Direction| counted.push(d));
        assert_eq!(comparisons.len(), 1);
        assert_eq!(comparisons[0].output, "a->c");
        assert!(counted.is_empty());
    }

    #[test]
    fn test_undirected_pair_is_not_counted() {
        let apis = apis(2);
        let map: ApiMap<String> = [(ApiId(0), "a\r\n".to_string()), (ApiId(1), "a".to_string())]
            .into_iter()
            .collect();
        let mut counted = Vec::new();
        // grouped apart on the raw text, equal once trimmed
        let comparisons = compare_with_focus(&apis, &map, |v| v.clone(), &mut Trimmed, &mut |d: Direction| {
            counted.push(d)
        });
        assert_eq!(comparisons.len(), 1);
        assert_eq!(comparisons[0].kind, ComparisonKind::Paired);
        assert_eq!(comparisons[0].direction, None);
        assert!(counted.is_empty());
    }

    proptest! {
        #[test]
        fn prop_groups_partition_instances(values in prop::collection::vec(prop::option::of(0u8..3), 2..7)) {
            let apis = apis(values.len());
            let map: ApiMap<u8> = values
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|v| (ApiId(i), v)))
                .collect();
            let groups = group_by(&apis, &map, |v| v.to_string());

            let present: usize = groups.iter().filter(|g| !g.is_absent()).map(|g| g.apis.len()).sum();
            prop_assert_eq!(present, map.len());
            let covered: usize = groups.iter().map(|g| g.apis.len()).sum();
            prop_assert_eq!(covered, apis.len());
            let holding_focus = groups.iter().filter(|g| g.contains(apis.focus())).count();
            prop_assert_eq!(holding_focus, 1);
        }

        #[test]
        fn prop_comparisons_skip_focus_group(values in prop::collection::vec(prop::option::of("[ab]"), 2..7)) {
            let apis = apis(values.len());
            let map: ApiMap<String> = values
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.clone().map(|v| (ApiId(i), v)))
                .collect();
            let groups = group_by(&apis, &map, |v| v.clone());
            let comparisons = compare_with_focus(&apis, &map, |v| v.clone(), &mut Labels, &mut |_: Direction| {});
            prop_assert_eq!(comparisons.len(), groups.len() - 1);
        }
    }
}
