//! Keyed mutual exclusion for concurrent reconcile calls

use dashmap::DashMap;
use relsync_domain::{ContentId, Side};
use std::sync::{Arc, Mutex};

type SlotKey = (Side, ContentId, String);

/// Per-(side, item, slot) locks shared between builder instances
///
/// A builder holding a `SlotLocks` serializes its query-diff-apply sequence
/// with every other builder sharing the same instance. Builders without one
/// are not coordinated. Entries are released once no caller holds them, so
/// the table only tracks pairs with a reconcile in flight.
#[derive(Debug, Default)]
pub struct SlotLocks {
    entries: DashMap<SlotKey, Arc<Mutex<()>>>,
}

impl SlotLocks {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for one item/slot pair
    pub fn entry(&self, side: Side, item: ContentId, slot_name: &str) -> Arc<Mutex<()>> {
        let lock = self
            .entries
            .entry((side, item, slot_name.to_string()))
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(lock.value())
    }

    /// Drop the entry for one pair if no caller is holding it
    ///
    /// Returns whether the entry was removed. Callers must drop their own
    /// handle from [`SlotLocks::entry`] first.
    pub fn release(&self, side: Side, item: ContentId, slot_name: &str) -> bool {
        self.entries
            .remove_if(&(side, item, slot_name.to_string()), |_, lock| {
                Arc::strong_count(lock) == 1
            })
            .is_some()
    }

    /// Number of tracked item/slot pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pair is tracked
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry no caller is holding, returning how many were removed
    pub fn prune(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_same_key_shares_lock() {
        let locks = SlotLocks::new();
        let a = locks.entry(Side::Owner, ContentId::new(1), "related");
        let b = locks.entry(Side::Owner, ContentId::new(1), "related");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(locks.len(), 1);
    }

    #[test]
    fn test_keys_differ_by_side_and_slot() {
        let locks = SlotLocks::new();
        let a = locks.entry(Side::Owner, ContentId::new(1), "related");
        let b = locks.entry(Side::Dependent, ContentId::new(1), "related");
        let c = locks.entry(Side::Owner, ContentId::new(1), "other");
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(locks.len(), 3);
    }

    #[test]
    fn test_prune_keeps_held_entries() {
        let locks = SlotLocks::new();
        let held = locks.entry(Side::Owner, ContentId::new(1), "related");
        drop(locks.entry(Side::Owner, ContentId::new(2), "related"));

        assert_eq!(locks.prune(), 1);
        assert_eq!(locks.len(), 1);

        drop(held);
        assert_eq!(locks.prune(), 1);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_release_only_drops_idle_entries() {
        let locks = SlotLocks::new();
        let held = locks.entry(Side::Owner, ContentId::new(1), "related");
        let other = locks.entry(Side::Owner, ContentId::new(1), "related");

        drop(other);
        assert!(!locks.release(Side::Owner, ContentId::new(1), "related"));
        assert_eq!(locks.len(), 1);

        drop(held);
        assert!(locks.release(Side::Owner, ContentId::new(1), "related"));
        assert!(locks.is_empty());
        assert!(!locks.release(Side::Owner, ContentId::new(1), "related"));
    }

    #[test]
    fn test_entry_serializes_critical_sections() {
        let locks = Arc::new(SlotLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    let entry = locks.entry(Side::Owner, ContentId::new(1), "related");
                    let _guard = entry.lock().unwrap();
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_inside.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(5));
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }
}
