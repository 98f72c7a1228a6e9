use dashmap::DashMap;
use lecture_alerts_domain::{Entity, ID};

/// Useful functions for creating inmemory repositories.
///
/// Every entity lives in its own `DashMap` entry so that writers of
/// different entities never contend on the same lock.

pub fn insert<T: Clone + Entity>(val: &T, collection: &DashMap<ID, T>) {
    collection.insert(*val.id(), val.clone());
}

pub fn find<T: Clone>(val_id: &ID, collection: &DashMap<ID, T>) -> Option<T> {
    collection.get(val_id).map(|val| val.value().clone())
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &DashMap<ID, T>,
    mut compare: F,
) -> Vec<T> {
    collection
        .iter()
        .filter(|item| compare(item.value()))
        .map(|item| item.value().clone())
        .collect()
}

pub fn delete<T>(val_id: &ID, collection: &DashMap<ID, T>) -> Option<T> {
    collection.remove(val_id).map(|(_, val)| val)
}
