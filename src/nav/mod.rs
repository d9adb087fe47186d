//! Expand/select/search state of the navigation sidebar.

extern crate alloc;
use alloc::sync::Arc;

use indexmap::IndexSet;

use crate::{
    menu::{MenuEntry, MenuIndex, HOME_KEY},
    search::{filter_menu, flatten, FlatMatch},
};

use self::resolve::{keys_to_open_for, search_open_keys, selected_keys_for};

pub mod resolve;

/// Receiver of navigation requests.
pub trait Navigate {
    ///
    fn navigate(&mut self, path: &str);
}

impl<F> Navigate for F
where
    F: FnMut(&str),
{
    fn navigate(&mut self, path: &str) {
        self(path);
    }
}

///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowKind {
    ///
    Leaf,

    ///
    Group {
        ///
        open: bool,
    },

    ///
    Divider,
}

/// One visible row of the sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuRow {
    ///
    pub key: Option<String>,

    ///
    pub label: String,

    ///
    pub icon: Option<String>,

    ///
    pub depth: usize,

    ///
    pub kind: RowKind,
}

///
#[derive(Debug)]
pub struct NavigationState {
    ///
    index: Arc<MenuIndex>,

    ///
    current_path: String,

    ///
    search_text: String,

    ///
    open_keys: IndexSet<String>,

    ///
    flat_results: Vec<FlatMatch>,

    ///
    collapsed: bool,
}

impl NavigationState {
    ///
    pub fn new(index: Arc<MenuIndex>, path: &str) -> Self {
        let current_path = if path.is_empty() {
            HOME_KEY.to_owned()
        } else {
            path.to_owned()
        };

        let open_keys = keys_to_open_for(&index, &current_path);

        Self {
            index,
            current_path,
            search_text: String::new(),
            open_keys,
            flat_results: Vec::new(),
            collapsed: false,
        }
    }

    ///
    pub fn index(&self) -> &MenuIndex {
        &self.index
    }

    ///
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    ///
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    ///
    pub fn is_searching(&self) -> bool {
        !self.search_text.trim().is_empty()
    }

    ///
    pub fn open_keys(&self) -> &IndexSet<String> {
        &self.open_keys
    }

    ///
    pub fn flat_results(&self) -> &[FlatMatch] {
        &self.flat_results
    }

    ///
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Recomputed from the current location on every call.
    pub fn selected_keys(&self) -> Vec<String> {
        selected_keys_for(&self.index, &self.current_path)
    }

    /// Follows the router to `path`. Outside of a search, the groups leading
    /// to `path` are expanded; nothing already open is collapsed.
    pub fn set_path(&mut self, path: &str) {
        self.current_path = if path.is_empty() {
            HOME_KEY.to_owned()
        } else {
            path.to_owned()
        };

        if !self.is_searching() {
            self.expand_current_path();
        }
    }

    /// Updates the query. A non-blank query replaces the open groups with
    /// the ones holding a match; clearing it keeps whatever is open.
    pub fn set_search(&mut self, text: String) {
        self.search_text = text;

        if self.is_searching() {
            self.flat_results = flatten(&self.index, &self.search_text);
            self.open_keys = search_open_keys(&self.index, &self.search_text);

            log::debug!(
                "Search {:?} matched {} entries, {} groups open",
                self.search_text,
                self.flat_results.len(),
                self.open_keys.len()
            );
        } else {
            self.flat_results.clear();
            self.expand_current_path();
        }
    }

    ///
    fn expand_current_path(&mut self) {
        let keys = keys_to_open_for(&self.index, &self.current_path);
        self.open_keys.extend(keys);
    }

    /// Requests navigation for route keys. Returns whether a request was made.
    pub fn on_select<N>(&self, key: &str, navigator: &mut N) -> bool
    where
        N: Navigate + ?Sized,
    {
        if key.starts_with('/') {
            log::info!("Navigating to {key}");
            navigator.navigate(key);
            true
        } else {
            log::debug!("Ignoring selection of non-route key {key}");
            false
        }
    }

    /// Replaces the expanded groups with `keys`.
    pub fn on_open_change<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.open_keys = keys.into_iter().collect();
    }

    ///
    pub fn toggle_open(&mut self, key: &str) {
        let mut keys: Vec<String> = self.open_keys.iter().cloned().collect();

        if let Some(position) = keys.iter().position(|open| open == key) {
            keys.remove(position);
        } else {
            keys.push(key.to_owned());
        }

        self.on_open_change(keys);
    }

    ///
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    ///
    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Rows of the sidebar tree for the current query and open groups.
    /// Children are hidden while the sidebar is collapsed.
    pub fn visible_rows(&self) -> Vec<MenuRow> {
        let mut rows = Vec::new();

        for entry in filter_menu(&self.index, &self.search_text) {
            match entry {
                MenuEntry::Leaf(leaf) => rows.push(MenuRow {
                    key: Some(leaf.key),
                    label: leaf.label,
                    icon: leaf.icon,
                    depth: 0,
                    kind: RowKind::Leaf,
                }),
                MenuEntry::Group(group) => {
                    let open = self.open_keys.contains(&group.key);

                    rows.push(MenuRow {
                        key: Some(group.key),
                        label: group.label,
                        icon: group.icon,
                        depth: 0,
                        kind: RowKind::Group { open },
                    });

                    if open && !self.collapsed {
                        rows.extend(group.children.into_iter().map(|child| MenuRow {
                            key: Some(child.key),
                            label: child.label,
                            icon: child.icon,
                            depth: 1,
                            kind: RowKind::Leaf,
                        }));
                    }
                }
                MenuEntry::Divider => rows.push(MenuRow {
                    key: None,
                    label: String::new(),
                    icon: None,
                    depth: 0,
                    kind: RowKind::Divider,
                }),
            }
        }

        rows
    }
}
