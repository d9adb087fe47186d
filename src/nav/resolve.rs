//! Derivations from a location or a query to menu keys.

use indexmap::IndexSet;

use crate::{
    menu::{MenuEntry, MenuIndex, HOME_KEY},
    search::group_has_match,
};

///
fn normalize(path: &str) -> &str {
    if path.is_empty() {
        HOME_KEY
    } else {
        path
    }
}

/// Keys of the groups holding a child routed at exactly `path`.
pub fn keys_to_open_for(index: &MenuIndex, path: &str) -> IndexSet<String> {
    let path = normalize(path);

    index
        .entries()
        .iter()
        .filter_map(|entry| match *entry {
            MenuEntry::Group(ref group) => group
                .children
                .iter()
                .any(|child| child.key == path)
                .then(|| group.key.clone()),
            MenuEntry::Leaf(_) | MenuEntry::Divider => None,
        })
        .collect()
}

/// Keys highlighted for `path`. Never empty: falls back to the home key.
///
/// Only route keys (starting with `/`) are compared with `path`, so a plain
/// group key such as `tools` never highlights its group.
pub fn selected_keys_for(index: &MenuIndex, path: &str) -> Vec<String> {
    let mut keys = Vec::new();

    for entry in index.entries() {
        let Some(key) = entry.key() else {
            continue;
        };

        if key == HOME_KEY && (path.is_empty() || path == HOME_KEY) {
            keys.push(HOME_KEY.to_owned());
        } else if key == path && key.starts_with('/') {
            keys.push(path.to_owned());
        } else if let &MenuEntry::Group(ref group) = entry {
            for child in &group.children {
                if child.key == path {
                    keys.push(path.to_owned());
                }
            }
        }
    }

    if keys.is_empty() {
        keys.push(HOME_KEY.to_owned());
    }

    keys
}

/// Keys of the groups with at least one child label containing `query`.
pub fn search_open_keys(index: &MenuIndex, query: &str) -> IndexSet<String> {
    let needle = query.to_lowercase();

    index
        .entries()
        .iter()
        .filter_map(|entry| match *entry {
            MenuEntry::Group(ref group) => {
                group_has_match(group, &needle).then(|| group.key.clone())
            }
            MenuEntry::Leaf(_) | MenuEntry::Divider => None,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::menu::{GroupEntry, LeafEntry};

    #[test]
    fn test_open_keys_for_child_path() {
        let index = MenuIndex::builtin();
        let keys = keys_to_open_for(&index, "/debug-logs");

        assert_eq!(IndexSet::from(["tools".to_owned()]), keys);
    }

    #[test]
    fn test_open_keys_ignore_top_level_leaves() {
        let index = MenuIndex::builtin();

        assert!(keys_to_open_for(&index, "/").is_empty());
        assert!(keys_to_open_for(&index, "").is_empty());
    }

    #[test]
    fn test_open_keys_exact_match_only() {
        let index = MenuIndex::builtin();

        assert!(keys_to_open_for(&index, "/debug").is_empty());
        assert!(keys_to_open_for(&index, "/debug-logs/1").is_empty());
    }

    #[test]
    fn test_open_keys_idempotent() {
        let index = MenuIndex::builtin();

        for path in ["/", "", "/network-logs", "/missing"] {
            assert_eq!(keys_to_open_for(&index, path), keys_to_open_for(&index, path));
        }
    }

    #[test]
    fn test_selected_child() {
        let index = MenuIndex::builtin();

        assert_eq!(vec!["/debug-logs".to_owned()], selected_keys_for(&index, "/debug-logs"));
    }

    #[test]
    fn test_selected_home() {
        let index = MenuIndex::builtin();

        assert_eq!(vec!["/".to_owned()], selected_keys_for(&index, ""));
        assert_eq!(vec!["/".to_owned()], selected_keys_for(&index, "/"));
    }

    #[test]
    fn test_selected_falls_back_to_home() {
        let index = MenuIndex::builtin();

        for path in ["/missing", "tools", "/login", "network-logs"] {
            assert_eq!(vec!["/".to_owned()], selected_keys_for(&index, path));
        }
    }

    #[test]
    fn test_selected_never_empty_without_home() -> anyhow::Result<()> {
        let index = MenuIndex::new(vec![MenuEntry::Divider])?;

        assert_eq!(vec!["/".to_owned()], selected_keys_for(&index, "/anything"));

        Ok(())
    }

    #[test]
    fn test_selected_routed_group() -> anyhow::Result<()> {
        let index = MenuIndex::new(vec![
            MenuEntry::Leaf(LeafEntry::new("/", "Home", None)),
            MenuEntry::Group(GroupEntry {
                key: "/reports".to_owned(),
                label: "Reports".to_owned(),
                icon: None,
                children: vec![LeafEntry::new("/reports/daily", "Daily Reports", None)],
            }),
            MenuEntry::Group(GroupEntry {
                key: "tools".to_owned(),
                label: "Tools".to_owned(),
                icon: None,
                children: vec![],
            }),
        ])?;

        assert_eq!(vec!["/reports".to_owned()], selected_keys_for(&index, "/reports"));
        assert_eq!(vec!["/".to_owned()], selected_keys_for(&index, "tools"));

        Ok(())
    }

    #[test]
    fn test_search_open_keys_child_labels_only() {
        let index = MenuIndex::builtin();

        assert_eq!(IndexSet::from(["tools".to_owned()]), search_open_keys(&index, "网络"));
        assert!(search_open_keys(&index, "工具").is_empty());
    }
}
