//! Slice helpers: dedup, grouping, sorting, paging.

use std::{
  collections::{BTreeMap, HashSet},
  hash::Hash,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

/// Items in first-seen order with later duplicates removed.
pub fn unique<T: Clone + Eq + Hash>(items: &[T]) -> Vec<T> {
  let mut seen = HashSet::with_capacity(items.len());
  items
    .iter()
    .filter(|item| seen.insert((*item).clone()))
    .cloned()
    .collect()
}

/// Group items by the string form of `key`, preserving order within groups.
pub fn group_by<T, K, F>(items: &[T], key: F) -> BTreeMap<String, Vec<T>>
where
  T: Clone,
  K: ToString,
  F: Fn(&T) -> K,
{
  let mut groups: BTreeMap<String, Vec<T>> = BTreeMap::new();
  for item in items {
    groups.entry(key(item).to_string()).or_default().push(item.clone());
  }
  groups
}

/// A sorted copy; ties keep their original relative order.
pub fn sort_by<T, K, F>(items: &[T], key: F, order: SortOrder) -> Vec<T>
where
  T: Clone,
  K: Ord,
  F: Fn(&T) -> K,
{
  let mut sorted = items.to_vec();
  match order {
    SortOrder::Asc => sorted.sort_by(|a, b| key(a).cmp(&key(b))),
    SortOrder::Desc => sorted.sort_by(|a, b| key(b).cmp(&key(a))),
  }
  sorted
}

/// Page `page` (1-based) of size `limit`. Out-of-range pages are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> Vec<T> {
  let start = page.saturating_sub(1).saturating_mul(limit);
  items.iter().skip(start).take(limit).cloned().collect()
}
