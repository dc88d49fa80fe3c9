// src/resolve.rs

//! Transitive dependency closure
//!
//! Computes the full set of packages reachable from one root under the
//! "requires" relation. An explicit queue/visited pair keeps the
//! traversal safe against cycles and self-edges, and the result is a
//! plain union so the visitation order never affects the final set.

use crate::repodata::DependencyMap;
use std::collections::{HashSet, VecDeque};

/// Compute the transitive closure of `root` under the dependency map
///
/// The returned set always contains `root` itself. Names without a map
/// entry contribute nothing beyond their own membership.
pub fn resolve_closure(dependency_map: &DependencyMap, root: &str) -> HashSet<String> {
    let mut install_set: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    let mut visited: HashSet<String> = HashSet::new();

    install_set.insert(root.to_string());
    queue.push_back(root.to_string());

    while let Some(name) = queue.pop_front() {
        if !visited.insert(name.clone()) {
            continue;
        }

        if let Some(required) = dependency_map.get(&name) {
            for req in required {
                install_set.insert(req.clone());
                if !visited.contains(req) {
                    queue.push_back(req.clone());
                }
            }
        }
    }

    install_set
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map(edges: &[(&str, &[&str])]) -> DependencyMap {
        let mut m = HashMap::new();
        for (name, reqs) in edges {
            m.insert(
                name.to_string(),
                reqs.iter().map(|r| r.to_string()).collect(),
            );
        }
        m
    }

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_single_level() {
        let deps = map(&[("meta", &["a", "b"])]);
        assert_eq!(resolve_closure(&deps, "meta"), set(&["meta", "a", "b"]));
    }

    #[test]
    fn test_transitive() {
        let deps = map(&[("meta", &["a"]), ("a", &["b"]), ("b", &["c"])]);
        assert_eq!(
            resolve_closure(&deps, "meta"),
            set(&["meta", "a", "b", "c"])
        );
    }

    #[test]
    fn test_root_without_entry() {
        let deps = map(&[("other", &["a"])]);
        assert_eq!(resolve_closure(&deps, "lonely"), set(&["lonely"]));
    }

    #[test]
    fn test_cycle_terminates() {
        let deps = map(&[("a", &["b"]), ("b", &["a"])]);
        assert_eq!(resolve_closure(&deps, "a"), set(&["a", "b"]));
    }

    #[test]
    fn test_self_edge_terminates() {
        let deps = map(&[("a", &["a", "b"])]);
        assert_eq!(resolve_closure(&deps, "a"), set(&["a", "b"]));
    }

    #[test]
    fn test_diamond() {
        let deps = map(&[("meta", &["a", "b"]), ("a", &["c"]), ("b", &["c"])]);
        assert_eq!(
            resolve_closure(&deps, "meta"),
            set(&["meta", "a", "b", "c"])
        );
    }

    #[test]
    fn test_order_insensitive() {
        // Same edge set inserted in two different orders; the resulting
        // closures must be identical regardless of traversal order.
        let forward = map(&[
            ("meta", &["a", "b", "c"]),
            ("a", &["d"]),
            ("b", &["d", "e"]),
            ("c", &["f"]),
            ("f", &["meta"]),
        ]);
        let mut reversed = DependencyMap::new();
        let mut entries: Vec<_> = forward.iter().collect();
        entries.reverse();
        for (name, reqs) in entries {
            reversed.insert(name.clone(), reqs.clone());
        }

        let expected = set(&["meta", "a", "b", "c", "d", "e", "f"]);
        assert_eq!(resolve_closure(&forward, "meta"), expected);
        assert_eq!(resolve_closure(&reversed, "meta"), expected);
    }

    #[test]
    fn test_idempotent() {
        let deps = map(&[("meta", &["a", "b"]), ("b", &["c"])]);
        let first = resolve_closure(&deps, "meta");
        let second = resolve_closure(&deps, "meta");
        assert_eq!(first, second);
    }

    #[test]
    fn test_unrelated_edges_ignored() {
        let deps = map(&[("meta", &["a"]), ("x", &["y", "z"])]);
        assert_eq!(resolve_closure(&deps, "meta"), set(&["meta", "a"]));
    }
}
