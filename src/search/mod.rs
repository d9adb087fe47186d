//! Label search over the menu catalog.

use crate::menu::{GroupEntry, MenuEntry, MenuIndex};

/// A search hit, carrying its group's label for breadcrumb display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatMatch {
    ///
    pub key: String,

    ///
    pub label: String,

    ///
    pub parent_label: Option<String>,

    ///
    pub icon: Option<String>,
}

/// Case-insensitive substring test. `needle` must already be lowercased.
pub fn label_matches(label: &str, needle: &str) -> bool {
    label.to_lowercase().contains(needle)
}

/// Whether any child label of `group` contains `needle`.
pub fn group_has_match(group: &GroupEntry, needle: &str) -> bool {
    group
        .children
        .iter()
        .any(|child| label_matches(&child.label, needle))
}

/// Flattens the two-level catalog into the entries whose label contains
/// `query`, ignoring case. Children of a group come before the group itself,
/// which is only listed when its key is a route.
pub fn flatten(index: &MenuIndex, query: &str) -> Vec<FlatMatch> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let mut result = Vec::new();

    for entry in index.entries() {
        match *entry {
            MenuEntry::Group(ref group) => {
                for child in &group.children {
                    if label_matches(&child.label, &needle) {
                        result.push(FlatMatch {
                            key: child.key.clone(),
                            label: child.label.clone(),
                            parent_label: Some(group.label.clone()),
                            icon: child.icon.clone(),
                        });
                    }
                }

                if label_matches(&group.label, &needle) && group.key.starts_with('/') {
                    result.push(FlatMatch {
                        key: group.key.clone(),
                        label: group.label.clone(),
                        parent_label: None,
                        icon: group.icon.clone(),
                    });
                }
            }
            MenuEntry::Leaf(ref leaf) => {
                if label_matches(&leaf.label, &needle) {
                    result.push(FlatMatch {
                        key: leaf.key.clone(),
                        label: leaf.label.clone(),
                        parent_label: None,
                        icon: leaf.icon.clone(),
                    });
                }
            }
            MenuEntry::Divider => {}
        }
    }

    result
}

/// Prunes the tree to the entries matching `query`. A group survives when
/// its own label or one of its children matches; it keeps only the matching
/// children, or all of them when none matched.
pub fn filter_menu(index: &MenuIndex, query: &str) -> Vec<MenuEntry> {
    if query.trim().is_empty() {
        return index.entries().to_vec();
    }

    let needle = query.to_lowercase();

    index
        .entries()
        .iter()
        .filter_map(|entry| match *entry {
            MenuEntry::Group(ref group) => {
                let children: Vec<_> = group
                    .children
                    .iter()
                    .filter(|child| label_matches(&child.label, &needle))
                    .cloned()
                    .collect();

                if children.is_empty() && !label_matches(&group.label, &needle) {
                    return None;
                }

                Some(MenuEntry::Group(GroupEntry {
                    children: if children.is_empty() {
                        group.children.clone()
                    } else {
                        children
                    },
                    ..group.clone()
                }))
            }
            MenuEntry::Leaf(ref leaf) => {
                label_matches(&leaf.label, &needle).then(|| entry.clone())
            }
            MenuEntry::Divider => None,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::menu::LeafEntry;

    fn tools_index() -> MenuIndex {
        MenuIndex::new(vec![
            MenuEntry::Leaf(LeafEntry::new("/", "首页", Some("home"))),
            MenuEntry::Divider,
            MenuEntry::Group(GroupEntry {
                key: "tools".to_owned(),
                label: "工具".to_owned(),
                icon: None,
                children: vec![
                    LeafEntry::new("/debug-logs", "调试日志", None),
                    LeafEntry::new("/network-logs", "网络日志", None),
                ],
            }),
            MenuEntry::Group(GroupEntry {
                key: "/reports".to_owned(),
                label: "Reports".to_owned(),
                icon: None,
                children: vec![
                    LeafEntry::new("/reports/daily", "Daily Reports", None),
                    LeafEntry::new("/reports/audit", "Audit", None),
                ],
            }),
        ])
        .unwrap_or_else(|e| panic!("invalid fixture: {e}"))
    }

    #[test]
    fn test_children_carry_parent_label() {
        let results = flatten(&tools_index(), "日志");

        let expected = vec![
            FlatMatch {
                key: "/debug-logs".to_owned(),
                label: "调试日志".to_owned(),
                parent_label: Some("工具".to_owned()),
                icon: None,
            },
            FlatMatch {
                key: "/network-logs".to_owned(),
                label: "网络日志".to_owned(),
                parent_label: Some("工具".to_owned()),
                icon: None,
            },
        ];

        assert_eq!(expected, results);
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let index = tools_index();

        assert!(flatten(&index, "").is_empty());
        assert!(flatten(&index, "   ").is_empty());
        assert!(flatten(&index, "\t\n").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let keys: Vec<_> = flatten(&tools_index(), "AUDIT")
            .into_iter()
            .map(|hit| hit.key)
            .collect();

        assert_eq!(vec!["/reports/audit".to_owned()], keys);
    }

    #[test]
    fn test_routable_group_follows_its_children() {
        let hits = flatten(&tools_index(), "report");
        let keys: Vec<_> = hits.iter().map(|hit| hit.key.as_str()).collect();

        assert_eq!(vec!["/reports/daily", "/reports"], keys);
        assert_eq!(None, hits[1].parent_label);
    }

    #[test]
    fn test_plain_group_never_listed() {
        assert!(flatten(&tools_index(), "工具").is_empty());
    }

    #[test]
    fn test_every_hit_contains_query() {
        let index = tools_index();

        for query in ["日", "r", "O", "daily", "首"] {
            let needle = query.to_lowercase();
            for hit in flatten(&index, query) {
                assert!(
                    hit.label.to_lowercase().contains(&needle),
                    "{} does not contain {query}",
                    hit.label
                );
            }
        }
    }

    #[test]
    fn test_filter_blank_keeps_everything() {
        let index = tools_index();

        assert_eq!(index.entries().to_vec(), filter_menu(&index, " "));
    }

    #[test]
    fn test_filter_prunes_children() {
        let filtered = filter_menu(&tools_index(), "网络");

        assert_eq!(1, filtered.len());
        match filtered[0] {
            MenuEntry::Group(ref group) => {
                assert_eq!("tools", group.key);
                assert_eq!(1, group.children.len());
                assert_eq!("/network-logs", group.children[0].key);
            }
            _ => panic!("expected the tools group"),
        }
    }

    #[test]
    fn test_filter_group_label_keeps_all_children() {
        let filtered = filter_menu(&tools_index(), "工具");

        match filtered.first() {
            Some(&MenuEntry::Group(ref group)) => assert_eq!(2, group.children.len()),
            _ => panic!("expected the tools group"),
        }
    }
}
