//! Positional helpers shared by sections and documents
//!
//! `LinkedHashMap::insert` moves an existing key to the back, so every
//! in-place change here either goes through `get_mut` or rebuilds the map.

use linked_hash_map::LinkedHashMap;

/// Target position for a reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement<'a> {
    Before(&'a str),
    After(&'a str),
    Start,
    End,
}

pub(crate) fn index_of<V>(map: &LinkedHashMap<String, V>, name: &str) -> Option<usize> {
    map.keys().position(|key| key == name)
}

pub(crate) fn next_of<'m, V>(map: &'m LinkedHashMap<String, V>, name: &str) -> Option<(&'m str, &'m V)> {
    let index = index_of(map, name)?;
    map.iter().nth(index + 1).map(|(k, v)| (k.as_str(), v))
}

pub(crate) fn previous_of<'m, V>(
    map: &'m LinkedHashMap<String, V>,
    name: &str,
) -> Option<(&'m str, &'m V)> {
    let index = index_of(map, name)?.checked_sub(1)?;
    map.iter().nth(index).map(|(k, v)| (k.as_str(), v))
}

/// Move `name` to `placement`, keeping the relative order of every other entry.
///
/// Callers validate that `name` and any pivot exist. A missing pivot leaves the
/// entry at the end.
pub(crate) fn reposition<V>(map: &mut LinkedHashMap<String, V>, name: &str, placement: Placement<'_>) {
    let Some(value) = map.remove(name) else {
        return;
    };
    let mut pending = Some((name.to_string(), value));
    let entries = std::mem::take(map);

    if placement == Placement::Start {
        if let Some((k, v)) = pending.take() {
            map.insert(k, v);
        }
    }

    for (key, entry) in entries {
        let is_pivot = |pivot: &str| pivot == key;
        let before = matches!(placement, Placement::Before(pivot) if is_pivot(pivot));
        let after = matches!(placement, Placement::After(pivot) if is_pivot(pivot));

        if before {
            if let Some((k, v)) = pending.take() {
                map.insert(k, v);
            }
        }
        map.insert(key, entry);
        if after {
            if let Some((k, v)) = pending.take() {
                map.insert(k, v);
            }
        }
    }

    if let Some((k, v)) = pending {
        map.insert(k, v);
    }
}

/// Rename `old` to `new` without changing its position
pub(crate) fn rename_in_place<V>(map: &mut LinkedHashMap<String, V>, old: &str, new: &str) {
    let entries = std::mem::take(map);
    for (key, value) in entries {
        if key == old {
            map.insert(new.to_string(), value);
        } else {
            map.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(keys: &[&str]) -> LinkedHashMap<String, usize> {
        keys.iter().enumerate().map(|(i, k)| (k.to_string(), i)).collect()
    }

    fn order(map: &LinkedHashMap<String, usize>) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_reposition_before_and_after() {
        let mut m = map(&["a", "b", "c", "d"]);
        reposition(&mut m, "d", Placement::Before("b"));
        assert_eq!(order(&m), ["a", "d", "b", "c"]);

        reposition(&mut m, "a", Placement::After("c"));
        assert_eq!(order(&m), ["d", "b", "c", "a"]);

        // moving an entry after its own predecessor is a no-op
        reposition(&mut m, "c", Placement::After("b"));
        assert_eq!(order(&m), ["d", "b", "c", "a"]);
    }

    #[test]
    fn test_reposition_start_and_end() {
        let mut m = map(&["a", "b", "c"]);
        reposition(&mut m, "c", Placement::Start);
        assert_eq!(order(&m), ["c", "a", "b"]);
        reposition(&mut m, "c", Placement::End);
        assert_eq!(order(&m), ["a", "b", "c"]);
        assert_eq!(m.get("c"), Some(&2));
    }

    #[test]
    fn test_reposition_unknown_name_is_ignored() {
        let mut m = map(&["a", "b"]);
        reposition(&mut m, "zz", Placement::Start);
        assert_eq!(order(&m), ["a", "b"]);
    }

    #[test]
    fn test_neighbours() {
        let m = map(&["a", "b", "c"]);
        assert_eq!(index_of(&m, "b"), Some(1));
        assert_eq!(index_of(&m, "x"), None);
        assert_eq!(next_of(&m, "b").map(|(k, _)| k), Some("c"));
        assert_eq!(next_of(&m, "c"), None);
        assert_eq!(previous_of(&m, "b").map(|(k, _)| k), Some("a"));
        assert_eq!(previous_of(&m, "a"), None);
        assert_eq!(previous_of(&m, "x"), None);
    }

    #[test]
    fn test_rename_in_place() {
        let mut m = map(&["a", "b", "c"]);
        rename_in_place(&mut m, "b", "bee");
        assert_eq!(order(&m), ["a", "bee", "c"]);
        assert_eq!(m.get("bee"), Some(&1));
    }
}
