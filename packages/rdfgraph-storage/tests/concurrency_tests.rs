//! Concurrency tests for node storage
//!
//! Concurrent interning of the same value must converge on one id, and
//! registry slots must stay consistent under concurrent register/drop.

use rdfgraph_storage::infrastructure::node_type_storage::{self as protocol, SyncNodeTypeStorage};
use rdfgraph_storage::infrastructure::BiDirMap;
use rdfgraph_storage::domain::{IriEntry, IriView};

// ============================================================================
// Loom-based Tests (Formal Verification)
// ============================================================================

#[cfg(loom)]
mod loom_tests {
    use super::*;
    use loom::sync::Arc;
    use loom::thread;

    #[test]
    fn concurrent_lookup_or_insert_converges() {
        loom::model(|| {
            let storage = Arc::new(SyncNodeTypeStorage::<IriEntry>::new(BiDirMap::default()));

            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let storage = Arc::clone(&storage);
                    thread::spawn(move || {
                        protocol::lookup_or_insert(
                            &*storage,
                            IriView {
                                identifier: "http://example.org/shared",
                            },
                        )
                    })
                })
                .collect();

            let results: Vec<(u64, bool)> = handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect();

            assert_eq!(results[0].0, results[1].0);
            assert_eq!(results.iter().filter(|(_, inserted)| *inserted).count(), 1);
            assert_eq!(protocol::len(&*storage), 1);
        });
    }

    #[test]
    fn concurrent_insert_and_erase() {
        loom::model(|| {
            let storage = Arc::new(SyncNodeTypeStorage::<IriEntry>::new(BiDirMap::default()));
            let (id, _) = protocol::lookup_or_insert(&*storage, IriView { identifier: "a" });

            let eraser = {
                let storage = Arc::clone(&storage);
                thread::spawn(move || protocol::erase(&*storage, id))
            };
            let inserter = {
                let storage = Arc::clone(&storage);
                thread::spawn(move || protocol::lookup_or_insert(&*storage, IriView { identifier: "b" }).0)
            };

            assert!(eraser.join().unwrap());
            let b = inserter.join().unwrap();
            assert_eq!(protocol::lookup(&*storage, IriView { identifier: "b" }), b);
            assert_eq!(protocol::lookup(&*storage, IriView { identifier: "a" }), 0);
        });
    }
}

// ============================================================================
// Regular concurrency tests (without loom)
// ============================================================================

#[cfg(not(loom))]
mod stress_concurrency {
    use super::*;
    use rdfgraph_storage::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn stress_concurrent_interning_32_threads() {
        let storage = Arc::new(SyncNodeTypeStorage::<IriEntry>::new(BiDirMap::default()));
        let barrier = Arc::new(Barrier::new(32));

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let storage = Arc::clone(&storage);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    (0..200)
                        .map(|i| {
                            let identifier = format!("http://example.org/{}", i);
                            protocol::lookup_or_insert(&*storage, IriView { identifier: &identifier }).0
                        })
                        .collect::<Vec<u64>>()
                })
            })
            .collect();

        let results: Vec<Vec<u64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for ids in &results[1..] {
            assert_eq!(ids, &results[0]);
        }
        let distinct: HashSet<u64> = results[0].iter().copied().collect();
        assert_eq!(distinct.len(), 200);
        assert_eq!(protocol::len(&*storage), 200);
    }

    #[test]
    fn stress_shared_backend_through_registry() {
        let storage = NodeStorage::new_sync().unwrap();

        let handles: Vec<_> = (0..16)
            .map(|t| {
                let storage = storage.clone();
                thread::spawn(move || {
                    let shared = storage.find_or_make_bnode_id(BlankNodeView { identifier: "shared" });
                    let label = format!("own-{}", t);
                    let own = storage.find_or_make_bnode_id(BlankNodeView { identifier: &label });
                    (shared, own)
                })
            })
            .collect();

        let results: Vec<(NodeId, NodeId)> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.iter().all(|(shared, _)| *shared == results[0].0));
        let own: HashSet<NodeId> = results.iter().map(|(_, own)| *own).collect();
        assert_eq!(own.len(), 16);
        assert_eq!(storage.ref_count(), 1);
        assert_eq!(storage.stats().blank_nodes, 17);
    }

    #[test]
    fn stress_concurrent_register_and_drop() {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                thread::spawn(|| {
                    for _ in 0..50 {
                        let storage = NodeStorage::new_sync().unwrap();
                        let weak = storage.downgrade();
                        let id = storage.id();
                        assert!(weak.try_upgrade().unwrap().ptr_eq(&storage));
                        drop(storage);
                        assert!(weak.try_upgrade().is_none());
                        // the slot may already hold another thread's backend
                        if let Some(other) = NodeStorage::lookup_instance(id) {
                            assert_ne!(other.downgrade(), weak);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
