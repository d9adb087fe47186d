//!

extern crate alloc;
use alloc::sync::Arc;

use std::time::Instant;

use crate::{
    menu::MenuIndex,
    nav::{MenuRow, NavigationState},
    network_logs::NetworkLogsState,
    router::{Route, Router},
};

///
pub struct State {
    ///
    pub nav_state: NavigationState,

    ///
    pub router: Router,

    ///
    pub user_menu: Arc<MenuIndex>,

    /// Inspector behind the network log route.
    pub network_logs: NetworkLogsState,

    ///
    pub current_page: Page,

    /// Highlighted row of the sidebar.
    pub menu_cursor: usize,

    /// Highlighted search result.
    pub search_cursor: usize,

    ///
    pub user_menu_cursor: usize,

    ///
    pub status: Status,
}

impl State {
    ///
    pub fn new(index: Arc<MenuIndex>, start_path: &str) -> Self {
        let router = Router::new(start_path);
        let nav_state = NavigationState::new(index, router.location());

        let mut state = Self {
            nav_state,
            router,
            user_menu: MenuIndex::user_menu(),
            network_logs: NetworkLogsState::default(),
            current_page: Page::Menu,
            menu_cursor: 0,
            search_cursor: 0,
            user_menu_cursor: 0,
            status: Status {
                message: StatusMessage::Empty,
                timeout: None,
            },
        };

        state.focus_selected_row();
        state
    }

    ///
    pub fn route(&self) -> Route {
        Router::resolve(self.nav_state.index(), self.router.location())
    }

    ///
    pub fn menu_rows(&self) -> Vec<MenuRow> {
        self.nav_state.visible_rows()
    }

    /// Moves the sidebar cursor onto the row of the current location.
    pub fn focus_selected_row(&mut self) {
        let selected = self.nav_state.selected_keys();
        let position = self.menu_rows().iter().position(|row| {
            row.key
                .as_ref()
                .map_or(false, |key| selected.contains(key))
        });

        if let Some(position) = position {
            self.menu_cursor = position;
        }
    }

    /// Keeps every cursor inside the list it points into.
    pub fn clamp_cursors(&mut self) {
        let rows = self.menu_rows().len();
        let results = self.nav_state.flat_results().len();
        let user_entries = self.user_menu.entries().len();

        self.menu_cursor = self.menu_cursor.min(rows.saturating_sub(1));
        self.search_cursor = self.search_cursor.min(results.saturating_sub(1));
        self.user_menu_cursor = self.user_menu_cursor.min(user_entries.saturating_sub(1));
        self.network_logs.clamp();
    }
}

///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusMessage {
    ///
    Ok(String),

    ///
    Warn(String),

    ///
    Err(String),

    ///
    Empty,
}

///
pub struct Status {
    ///
    pub message: StatusMessage,

    /// When set, the message is cleared on the first tick past it.
    pub timeout: Option<Instant>,
}

///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    ///
    Menu,

    ///
    Search,

    ///
    UserMenu,

    /// Keys drive the request inspector.
    NetworkLogs,

    /// Typing into the inspector's text filter.
    NetworkFilter,
}
