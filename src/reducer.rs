//!

use core::time::Duration;

use std::time::Instant;

use crate::{
    action::Action,
    menu::MenuEntry,
    nav::{MenuRow, Navigate as _, RowKind},
    network_logs::DEFAULT_PORT,
    router::{Route, LOGIN_PATH},
    state::{Page, State, Status, StatusMessage},
};

///
const NOTICE_TIMEOUT: Duration = Duration::from_secs(3);

///
pub fn reducer(mut state: State, action: Action) -> State {
    match action {
        Action::SetCurrentPage { page } => {
            state.current_page = page;

            state
        }
        Action::MenuUp => {
            let option_count = state.menu_rows().len();
            state.menu_cursor = step_back(state.menu_cursor, option_count);

            state
        }
        Action::MenuDown => {
            let option_count = state.menu_rows().len();
            state.menu_cursor = step_forward(state.menu_cursor, option_count);

            state
        }
        Action::MenuTop => {
            state.menu_cursor = 0;

            state
        }
        Action::MenuBottom => {
            let option_count = state.menu_rows().len();
            state.menu_cursor = option_count.saturating_sub(1);

            state
        }
        Action::MenuActivate => {
            let row = state.menu_rows().into_iter().nth(state.menu_cursor);

            match row {
                Some(MenuRow {
                    key: Some(key),
                    kind: RowKind::Group { .. },
                    ..
                }) => {
                    state.nav_state.toggle_open(&key);
                    state.clamp_cursors();
                }
                Some(MenuRow { key: Some(key), .. }) => {
                    if state.nav_state.on_select(&key, &mut state.router) {
                        follow_router(&mut state);
                    }
                }
                Some(_) | None => {}
            }

            state
        }
        Action::RouteBack => {
            if state.router.back() {
                follow_router(&mut state);
            }

            state
        }
        Action::Navigate { path } => {
            state.router.navigate(&path);
            follow_router(&mut state);

            state
        }
        Action::SearchSetValue { value } => {
            state.nav_state.set_search(value);
            state.search_cursor = 0;
            state.clamp_cursors();

            state
        }
        Action::SearchUp => {
            let option_count = state.nav_state.flat_results().len();
            state.search_cursor = step_back(state.search_cursor, option_count);

            state
        }
        Action::SearchDown => {
            let option_count = state.nav_state.flat_results().len();
            state.search_cursor = step_forward(state.search_cursor, option_count);

            state
        }
        Action::SearchActivate => {
            let key = state
                .nav_state
                .flat_results()
                .get(state.search_cursor)
                .map(|hit| hit.key.clone());

            if let Some(key) = key {
                if state.nav_state.on_select(&key, &mut state.router) {
                    follow_router(&mut state);
                }
            }

            state.current_page = Page::Menu;

            state
        }
        Action::UserMenuUp => {
            state.user_menu_cursor = step_user_menu(&state, false);

            state
        }
        Action::UserMenuDown => {
            state.user_menu_cursor = step_user_menu(&state, true);

            state
        }
        Action::UserMenuActivate => {
            let entry = state.user_menu.entries().get(state.user_menu_cursor).cloned();

            match entry {
                Some(MenuEntry::Leaf(leaf)) if leaf.key == "logout" => {
                    state.router.navigate(LOGIN_PATH);
                    follow_router(&mut state);
                    set_status(
                        &mut state,
                        StatusMessage::Ok("Signed out".to_owned()),
                        Some(NOTICE_TIMEOUT),
                    );
                    state.current_page = Page::Menu;
                }
                Some(MenuEntry::Leaf(leaf)) => {
                    log::warn!("User menu entry {} has no page", leaf.key);
                    set_status(
                        &mut state,
                        StatusMessage::Warn(format!("{} is not available", leaf.label)),
                        Some(NOTICE_TIMEOUT),
                    );
                }
                Some(MenuEntry::Group(_) | MenuEntry::Divider) | None => {}
            }

            state
        }
        Action::FocusContent => {
            if state.route() == Route::NetworkLogs {
                state.current_page = Page::NetworkLogs;
            } else {
                log::debug!("{} has no controls", state.router.location());
            }

            state
        }
        Action::NetworkUp => {
            state.network_logs.cursor_up();

            state
        }
        Action::NetworkDown => {
            state.network_logs.cursor_down();

            state
        }
        Action::NetworkSelect => {
            state.network_logs.select_cursor();

            state
        }
        Action::NetworkCloseDetail => {
            state.network_logs.close_detail();

            state
        }
        Action::NetworkNextTab => {
            state.network_logs.next_tab();

            state
        }
        Action::NetworkCycleMethod => {
            state.network_logs.cycle_method();

            state
        }
        Action::NetworkCycleStatus => {
            state.network_logs.cycle_status();

            state
        }
        Action::NetworkFilterSetValue { value } => {
            state.network_logs.set_filter_text(value);

            state
        }
        Action::NetworkConnect => {
            log::warn!("Live capture on port {DEFAULT_PORT} is not available");
            set_status(
                &mut state,
                StatusMessage::Warn(format!("未连接: nothing listens on port {DEFAULT_PORT}")),
                Some(NOTICE_TIMEOUT),
            );

            state
        }
        Action::NetworkClear => {
            state.network_logs.clear();
            set_status(
                &mut state,
                StatusMessage::Ok("Cleared captured requests".to_owned()),
                Some(NOTICE_TIMEOUT),
            );

            state
        }
        Action::ToggleCollapsed => {
            state.nav_state.toggle_collapsed();
            state.clamp_cursors();

            state
        }
        Action::Breakpoint { broken } => {
            if broken != state.nav_state.is_collapsed() {
                log::debug!("Sidebar collapsed: {broken}");
                state.nav_state.set_collapsed(broken);
                state.clamp_cursors();
            }

            state
        }
        Action::SetStatus { message, timeout } => {
            set_status(&mut state, message, timeout);

            state
        }
        Action::Tick => {
            let expired = state
                .status
                .timeout
                .map_or(false, |timeout| Instant::now() >= timeout);

            if expired {
                state.status = Status {
                    message: StatusMessage::Empty,
                    timeout: None,
                };
            }

            state
        }
    }
}

/// Mirrors the router location into the navigation state.
fn follow_router(state: &mut State) {
    state.nav_state.set_path(state.router.location());
    state.clamp_cursors();
    state.focus_selected_row();

    if matches!(state.current_page, Page::NetworkLogs | Page::NetworkFilter)
        && state.route() != Route::NetworkLogs
    {
        state.current_page = Page::Menu;
    }
}

///
fn set_status(state: &mut State, message: StatusMessage, timeout: Option<Duration>) {
    state.status = Status {
        message,
        timeout: timeout.and_then(|timeout| Instant::now().checked_add(timeout)),
    };
}

///
fn step_forward(selected: usize, option_count: usize) -> usize {
    if option_count == 0 {
        0
    } else {
        selected.saturating_add(1) % option_count
    }
}

///
fn step_back(selected: usize, option_count: usize) -> usize {
    if selected > 0 {
        selected - 1
    } else {
        option_count.saturating_sub(1)
    }
}

/// Next user menu cursor in the given direction, skipping dividers.
fn step_user_menu(state: &State, forward: bool) -> usize {
    let entries = state.user_menu.entries();
    let mut cursor = state.user_menu_cursor;

    for _ in 0..entries.len() {
        cursor = if forward {
            step_forward(cursor, entries.len())
        } else {
            step_back(cursor, entries.len())
        };

        if !matches!(entries.get(cursor), Some(&MenuEntry::Divider)) {
            break;
        }
    }

    cursor
}
