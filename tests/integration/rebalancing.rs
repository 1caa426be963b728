//! Integration test: rebalancing.
//!
//! Grow a cluster one worker at a time and check that only the keys taken
//! over by the newcomer change owner.

use reef_integration_tests::{TestCluster, request_keys};

/// 4 workers, add a 5th. Every key that moved went to the new worker, and
/// roughly a fifth of the keys moved.
#[test]
fn test_add_node_moves_only_to_newcomer() {
    let mut c = TestCluster::new(4, 128);
    let keys = request_keys(10_000, 7);
    let before = c.owners(&keys);

    let newcomer = c.add_node();
    let after = c.owners(&keys);

    let mut moved = 0usize;
    for ((key, old), new) in keys.iter().zip(&before).zip(&after) {
        if old != new {
            assert_eq!(new, &newcomer, "{key} moved from {old} to {new}");
            moved += 1;
        }
    }

    let ratio = moved as f64 / keys.len() as f64;
    assert!(
        (0.1..=0.35).contains(&ratio),
        "unexpected fraction moved: {moved}/{} ({ratio:.2})",
        keys.len()
    );
}

/// Growing 2 → 8 workers keeps every worker within a reasonable band of
/// the ideal share at each step.
#[test]
fn test_load_stays_balanced_while_growing() {
    let mut c = TestCluster::new(2, 160);
    let keys = request_keys(20_000, 99);

    for _ in 0..6 {
        let load = c.load(&keys);
        let nodes = c.registry().real_node_count();
        assert_eq!(load.len(), nodes, "every worker should own some keys");

        let ideal = keys.len() as f64 / nodes as f64;
        for (worker, count) in &load {
            let skew = *count as f64 / ideal;
            assert!(
                (0.6..=1.4).contains(&skew),
                "{worker} owns {count} keys with {nodes} nodes (ideal {ideal:.0})"
            );
        }
        c.add_node();
    }
}

/// Repeated lookups with no membership change never change an answer.
#[test]
fn test_lookups_are_stable_without_membership_change() {
    let c = TestCluster::new(6, 64);
    let keys = request_keys(2_000, 3);
    assert_eq!(c.owners(&keys), c.owners(&keys));
}

/// Teardown followed by re-registration reproduces the same routing.
#[test]
fn test_rebuild_after_teardown_routes_identically() {
    let mut c = TestCluster::new(5, 64);
    let keys = request_keys(2_000, 11);
    let before = c.owners(&keys);
    let names: Vec<String> = c.registry().real_nodes().map(str::to_string).collect();

    let destroyed = c.registry_mut().teardown();
    assert_eq!(destroyed, 5 * 65);
    assert!(c.registry().is_empty());

    for name in &names {
        c.registry_mut().register(name).unwrap();
    }
    assert_eq!(c.owners(&keys), before);
}
