//! Grouping of tick records by security and trading date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use daybar_types::TickRecord;

/// Group key: one security on one trading date.
///
/// Orders by security first, then date, so iterating a [`TickGroups`]
/// visits each security's days in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    /// Security identifier.
    pub isin: String,
    /// Trading date.
    pub date: NaiveDate,
}

/// Tick records grouped by [`GroupKey`], preserving input order within a group.
#[derive(Debug, Default)]
pub struct TickGroups<'a> {
    groups: BTreeMap<GroupKey, Vec<&'a TickRecord>>,
}

impl<'a> TickGroups<'a> {
    /// Groups ticks by (security, date).
    #[must_use]
    pub fn from_ticks(ticks: &'a [TickRecord]) -> Self {
        let mut groups: BTreeMap<GroupKey, Vec<&'a TickRecord>> = BTreeMap::new();
        for tick in ticks {
            groups
                .entry(GroupKey {
                    isin: tick.isin.clone(),
                    date: tick.date,
                })
                .or_default()
                .push(tick);
        }
        Self { groups }
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates groups ordered by security, then date.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[&'a TickRecord])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }
}
