#![allow(clippy::too_many_lines)]

//!

extern crate alloc;
use alloc::sync::Arc;
use anyhow::anyhow;

use core::time::Duration;

use std::{io, sync::Mutex};

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyModifiers};
use redux_rs::{Reducer, Store};
use tui::backend::Backend;

use crate::{
    action::Action,
    lifecycle::Application,
    menu::HOME_KEY,
    state::{Page, State, StatusMessage},
};

///
pub async fn event_listener<R, B>(
    store: Store<State, Action, R>,
    lifecycle: Arc<Mutex<Application<B>>>,
    collapse_width: u16,
) -> anyhow::Result<()>
where
    R: Reducer<State, Action> + Send + Sync + 'static,
    B: Backend + io::Write + Send + Sync + 'static,
{
    loop {
        if !poll(Duration::from_millis(100))? {
            store.dispatch(Action::Tick).await;
            continue;
        }

        let read_event = event::read()?;
        if let Event::Resize(width, height) = read_event {
            {
                let mut lifecycle = lifecycle
                    .lock()
                    .map_err(|e| anyhow!("Unable to get lifecycle lock: {e}"))?;
                lifecycle.resize(width, height)?;
            }

            store
                .dispatch(Action::Breakpoint {
                    broken: width < collapse_width,
                })
                .await;

            let lifecycle = Arc::clone(&lifecycle);
            store
                .select(move |state: &State| -> anyhow::Result<()> {
                    let mut lifecycle = lifecycle
                        .lock()
                        .map_err(|e| anyhow!("Unable to get lifecycle lock: {e}"))?;
                    lifecycle.refresh(state)?;
                    Ok(())
                })
                .await?;
            continue;
        }

        let Event::Key(key) = read_event else {
            continue;
        };

        let current_view = store.select(|state: &State| state.current_page).await;
        match current_view {
            Page::Menu => match key {
                KeyEvent {
                    code: KeyCode::Char('j') | KeyCode::Down,
                    ..
                } => store.dispatch(Action::MenuDown).await,
                KeyEvent {
                    code: KeyCode::Char('k') | KeyCode::Up,
                    ..
                } => store.dispatch(Action::MenuUp).await,
                KeyEvent {
                    code: KeyCode::Char('g'),
                    ..
                } => store.dispatch(Action::MenuTop).await,
                KeyEvent {
                    code: KeyCode::Char('G'),
                    ..
                } => store.dispatch(Action::MenuBottom).await,
                KeyEvent {
                    code: KeyCode::Char('l') | KeyCode::Enter,
                    ..
                } => store.dispatch(Action::MenuActivate).await,
                KeyEvent {
                    code: KeyCode::Char('h') | KeyCode::Backspace,
                    ..
                } => store.dispatch(Action::RouteBack).await,
                KeyEvent {
                    code: KeyCode::Char('H'),
                    ..
                } => {
                    store
                        .dispatch(Action::Navigate {
                            path: HOME_KEY.to_owned(),
                        })
                        .await;
                }
                KeyEvent {
                    code: KeyCode::Tab, ..
                } => store.dispatch(Action::FocusContent).await,
                KeyEvent {
                    code: KeyCode::Char('['),
                    ..
                } => store.dispatch(Action::ToggleCollapsed).await,
                KeyEvent {
                    code: KeyCode::Char('/'),
                    ..
                } => {
                    store
                        .dispatch(Action::SetCurrentPage { page: Page::Search })
                        .await;
                }
                KeyEvent {
                    code: KeyCode::Char('u'),
                    ..
                } => {
                    store
                        .dispatch(Action::SetCurrentPage {
                            page: Page::UserMenu,
                        })
                        .await;
                }
                KeyEvent {
                    code: KeyCode::Char('q') | KeyCode::Esc,
                    ..
                }
                | KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => return Ok(()),
                _ => {}
            },
            Page::Search => match key {
                KeyEvent {
                    code: KeyCode::Char('n'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                }
                | KeyEvent {
                    code: KeyCode::Down,
                    ..
                } => store.dispatch(Action::SearchDown).await,
                KeyEvent {
                    code: KeyCode::Char('p'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                }
                | KeyEvent {
                    code: KeyCode::Up, ..
                } => store.dispatch(Action::SearchUp).await,
                KeyEvent {
                    code: KeyCode::Char('u'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => {
                    store
                        .dispatch(Action::SearchSetValue {
                            value: String::new(),
                        })
                        .await;
                }
                KeyEvent {
                    code: KeyCode::Char(ch),
                    modifiers: KeyModifiers::SHIFT | KeyModifiers::NONE,
                    ..
                } => {
                    let mut current = store
                        .select(|state: &State| state.nav_state.search_text().to_owned())
                        .await;
                    current.push(ch);
                    store
                        .dispatch(Action::SearchSetValue { value: current })
                        .await;
                }
                KeyEvent {
                    code: KeyCode::Backspace,
                    ..
                } => {
                    let mut current = store
                        .select(|state: &State| state.nav_state.search_text().to_owned())
                        .await;
                    current.pop();
                    store
                        .dispatch(Action::SearchSetValue { value: current })
                        .await;
                }
                KeyEvent {
                    code: KeyCode::Enter,
                    ..
                } => {
                    let (query, matches) = store
                        .select(|state: &State| {
                            (
                                state.nav_state.search_text().to_owned(),
                                state.nav_state.flat_results().len(),
                            )
                        })
                        .await;

                    if matches == 0 {
                        store
                            .dispatch(Action::SetStatus {
                                message: StatusMessage::Warn(format!(
                                    "No menu entry matches {query:?}"
                                )),
                                timeout: Some(Duration::from_secs(3)),
                            })
                            .await;
                    }

                    store.dispatch(Action::SearchActivate).await;
                }
                KeyEvent {
                    code: KeyCode::Esc, ..
                }
                | KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => {
                    store
                        .dispatch(Action::SetCurrentPage { page: Page::Menu })
                        .await;
                }
                _ => {}
            },
            Page::UserMenu => match key {
                KeyEvent {
                    code: KeyCode::Char('j') | KeyCode::Down,
                    ..
                } => store.dispatch(Action::UserMenuDown).await,
                KeyEvent {
                    code: KeyCode::Char('k') | KeyCode::Up,
                    ..
                } => store.dispatch(Action::UserMenuUp).await,
                KeyEvent {
                    code: KeyCode::Enter,
                    ..
                } => store.dispatch(Action::UserMenuActivate).await,
                KeyEvent {
                    code: KeyCode::Char('u' | 'q') | KeyCode::Esc,
                    ..
                } => {
                    store
                        .dispatch(Action::SetCurrentPage { page: Page::Menu })
                        .await;
                }
                _ => {}
            },
            Page::NetworkLogs => match key {
                KeyEvent {
                    code: KeyCode::Char('j') | KeyCode::Down,
                    ..
                } => store.dispatch(Action::NetworkDown).await,
                KeyEvent {
                    code: KeyCode::Char('k') | KeyCode::Up,
                    ..
                } => store.dispatch(Action::NetworkUp).await,
                KeyEvent {
                    code: KeyCode::Enter,
                    ..
                } => store.dispatch(Action::NetworkSelect).await,
                KeyEvent {
                    code: KeyCode::Char('h') | KeyCode::Backspace,
                    ..
                } => store.dispatch(Action::NetworkCloseDetail).await,
                KeyEvent {
                    code: KeyCode::Char('t'),
                    ..
                } => store.dispatch(Action::NetworkNextTab).await,
                KeyEvent {
                    code: KeyCode::Char('m'),
                    ..
                } => store.dispatch(Action::NetworkCycleMethod).await,
                KeyEvent {
                    code: KeyCode::Char('s'),
                    ..
                } => store.dispatch(Action::NetworkCycleStatus).await,
                KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::NONE,
                    ..
                } => store.dispatch(Action::NetworkConnect).await,
                KeyEvent {
                    code: KeyCode::Char('x'),
                    ..
                } => store.dispatch(Action::NetworkClear).await,
                KeyEvent {
                    code: KeyCode::Char('f'),
                    ..
                } => {
                    store
                        .dispatch(Action::SetCurrentPage {
                            page: Page::NetworkFilter,
                        })
                        .await;
                }
                KeyEvent {
                    code: KeyCode::Tab | KeyCode::Esc,
                    ..
                }
                | KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => {
                    store
                        .dispatch(Action::SetCurrentPage { page: Page::Menu })
                        .await;
                }
                _ => {}
            },
            Page::NetworkFilter => match key {
                KeyEvent {
                    code: KeyCode::Char('u'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => {
                    store
                        .dispatch(Action::NetworkFilterSetValue {
                            value: String::new(),
                        })
                        .await;
                }
                KeyEvent {
                    code: KeyCode::Char(ch),
                    modifiers: KeyModifiers::SHIFT | KeyModifiers::NONE,
                    ..
                } => {
                    let mut current = store
                        .select(|state: &State| state.network_logs.filter().text.clone())
                        .await;
                    current.push(ch);
                    store
                        .dispatch(Action::NetworkFilterSetValue { value: current })
                        .await;
                }
                KeyEvent {
                    code: KeyCode::Backspace,
                    ..
                } => {
                    let mut current = store
                        .select(|state: &State| state.network_logs.filter().text.clone())
                        .await;
                    current.pop();
                    store
                        .dispatch(Action::NetworkFilterSetValue { value: current })
                        .await;
                }
                KeyEvent {
                    code: KeyCode::Enter | KeyCode::Esc,
                    ..
                } => {
                    store
                        .dispatch(Action::SetCurrentPage {
                            page: Page::NetworkLogs,
                        })
                        .await;
                }
                _ => {}
            },
        }
    }
}
