#![allow(clippy::module_name_repetitions)]

//! Static navigation catalog.

extern crate alloc;
use alloc::sync::Arc;

use std::collections::HashSet;

use anyhow::bail;
use lazy_static::lazy_static;
use serde::Deserialize;

pub mod loader;

/// Key of the home entry, also the fallback selection.
pub const HOME_KEY: &str = "/";

lazy_static! {
    static ref BUILTIN: Arc<MenuIndex> = Arc::new(MenuIndex {
        entries: vec![
            MenuEntry::Leaf(LeafEntry::new("/", "首页", Some("home"))),
            MenuEntry::Group(GroupEntry {
                key: "tools".to_owned(),
                label: "工具".to_owned(),
                icon: Some("setting".to_owned()),
                children: vec![
                    LeafEntry::new("/debug-logs", "调试日志", Some("unordered-list")),
                    LeafEntry::new("/network-logs", "网络日志", Some("unordered-list")),
                ],
            }),
        ],
    });

    static ref USER_MENU: Arc<MenuIndex> = Arc::new(MenuIndex {
        entries: vec![
            MenuEntry::Leaf(LeafEntry::new("profile", "个人中心", Some("user"))),
            MenuEntry::Leaf(LeafEntry::new("settings", "账户设置", Some("setting"))),
            MenuEntry::Divider,
            MenuEntry::Leaf(LeafEntry::new("logout", "退出登录", Some("logout"))),
        ],
    });
}

///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeafEntry {
    ///
    pub key: String,

    ///
    pub label: String,

    /// Glyph name, mapped to a symbol by the renderer.
    #[serde(default)]
    pub icon: Option<String>,
}

impl LeafEntry {
    ///
    pub fn new(key: &str, label: &str, icon: Option<&str>) -> Self {
        Self {
            key: key.to_owned(),
            label: label.to_owned(),
            icon: icon.map(str::to_owned),
        }
    }
}

/// An entry with exactly one level of children.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupEntry {
    ///
    pub key: String,

    ///
    pub label: String,

    ///
    #[serde(default)]
    pub icon: Option<String>,

    ///
    #[serde(default)]
    pub children: Vec<LeafEntry>,
}

///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MenuEntry {
    ///
    Leaf(LeafEntry),

    ///
    Group(GroupEntry),

    ///
    Divider,
}

impl MenuEntry {
    ///
    pub fn key(&self) -> Option<&str> {
        match *self {
            MenuEntry::Leaf(ref leaf) => Some(leaf.key.as_str()),
            MenuEntry::Group(ref group) => Some(group.key.as_str()),
            MenuEntry::Divider => None,
        }
    }
}

/// Ordered, immutable catalog of menu entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuIndex {
    ///
    entries: Vec<MenuEntry>,
}

impl MenuIndex {
    /// Builds an index, rejecting empty or duplicated keys.
    pub fn new(entries: Vec<MenuEntry>) -> anyhow::Result<Self> {
        let mut seen = HashSet::new();

        for entry in &entries {
            let keys: Vec<&str> = match *entry {
                MenuEntry::Leaf(ref leaf) => vec![leaf.key.as_str()],
                MenuEntry::Group(ref group) => core::iter::once(group.key.as_str())
                    .chain(group.children.iter().map(|child| child.key.as_str()))
                    .collect(),
                MenuEntry::Divider => vec![],
            };

            for key in keys {
                if key.is_empty() {
                    bail!("Menu entry with an empty key");
                }

                if !seen.insert(key.to_owned()) {
                    bail!("Duplicate menu key {key}");
                }
            }
        }

        Ok(Self { entries })
    }

    /// The console's own navigation catalog, shared for the process lifetime.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Entries of the user drop-down menu.
    pub fn user_menu() -> Arc<Self> {
        Arc::clone(&USER_MENU)
    }

    ///
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Finds a navigable entry, top-level or nested, by key.
    pub fn find_leaf(&self, key: &str) -> Option<&LeafEntry> {
        self.entries.iter().find_map(|entry| match *entry {
            MenuEntry::Leaf(ref leaf) => (leaf.key == key).then_some(leaf),
            MenuEntry::Group(ref group) => group.children.iter().find(|child| child.key == key),
            MenuEntry::Divider => None,
        })
    }
}
