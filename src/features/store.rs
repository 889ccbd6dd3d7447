use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Identifier handed out by a [`Store`]. Ids start at `FIRST` and only ever grow.
pub trait RecordId: Copy + Ord + fmt::Debug + fmt::Display {
    const FIRST: Self;

    fn next(self) -> Self;
}

/// In-memory records keyed by id. Ids are assigned here and never reused, even
/// after a record is removed.
#[derive(Debug)]
pub struct Store<K, V> {
    records: BTreeMap<K, V>,
    next_id: K,
}

impl<K: RecordId, V> Store<K, V> {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: K::FIRST,
        }
    }

    pub fn insert_new(&mut self, build: impl FnOnce(K) -> V) -> &V {
        let id = self.next_id;
        self.next_id = id.next();
        self.records.entry(id).or_insert_with(|| build(id))
    }

    pub fn get(&self, id: K) -> Option<&V> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: K) -> Option<&mut V> {
        self.records.get_mut(&id)
    }

    pub fn remove(&mut self, id: K) -> bool {
        self.records.remove(&id).is_some()
    }

    /// Ascending id order, which is also insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<K: RecordId, V> Default for Store<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line JSON rendering of a record for debug logs.
pub(crate) fn snapshot<T: Serialize>(record: &T) -> String {
    serde_json::to_string(record).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Ticket(u8);

    impl fmt::Display for Ticket {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "#{}", self.0)
        }
    }

    impl RecordId for Ticket {
        const FIRST: Self = Ticket(10);

        fn next(self) -> Self {
            Ticket(self.0 + 1)
        }
    }

    #[test]
    fn ids_are_sequential_from_first() {
        let mut store = Store::<Ticket, &str>::new();
        store.insert_new(|_| "a");
        store.insert_new(|_| "b");

        assert_eq!(store.get(Ticket(10)), Some(&"a"));
        assert_eq!(store.get(Ticket(11)), Some(&"b"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn removed_ids_are_not_handed_out_again() {
        let mut store = Store::<Ticket, Ticket>::new();
        store.insert_new(|id| id);
        store.insert_new(|id| id);

        assert!(store.remove(Ticket(11)));
        assert!(!store.remove(Ticket(11)));

        let third = *store.insert_new(|id| id);
        assert_eq!(third, Ticket(12));
        assert_eq!(store.values().copied().collect::<Vec<_>>(), vec![Ticket(10), Ticket(12)]);
    }

    #[test]
    fn missing_ids_are_absent() {
        let mut store = Store::<Ticket, u32>::default();
        assert!(store.is_empty());
        assert!(store.get(Ticket(10)).is_none());
        assert!(store.get_mut(Ticket(10)).is_none());
    }
}
