#![warn(clippy::restriction, clippy::pedantic)]
#![allow(
    clippy::blanket_clippy_restriction_lints,
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::implicit_return,
    clippy::shadow_reuse,
    clippy::match_ref_pats,
    clippy::shadow_unrelated,
    clippy::shadow_same,
    // clippy::too_many_lines
)]

//! Terminal admin-console shell: a searchable, collapsible navigation menu.

extern crate alloc;
use alloc::sync::Arc;

use std::{env, io, sync::Mutex};

use anyhow::anyhow;
use config::Config;
use events::event_listener;
use lifecycle::{run_restoring, Application};
use menu::{loader::load_menu, MenuIndex};
use redux_rs::Store;
use state::{State, Status, StatusMessage};
use tui::backend::Backend;
use ui::configure_terminal;

mod action;
mod config;
mod events;
mod lifecycle;
mod logging;
mod menu;
mod nav;
mod network_logs;
mod reducer;
mod router;
mod search;
mod state;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().with_args(env::args());
    logging::init(&config)?;

    let (index, load_error) = match config.menu_file {
        Some(ref file_name) => match load_menu(file_name) {
            Ok(index) => (Arc::new(index), None),
            Err(err) => {
                log::error!("Falling back to the built-in menu: {err}");
                (MenuIndex::builtin(), Some(err.to_string()))
            }
        },
        None => (MenuIndex::builtin(), None),
    };

    let mut initial_state = State::new(index, &config.start_path);
    if let Some(err) = load_error {
        initial_state.status = Status {
            message: StatusMessage::Err(err),
            timeout: None,
        };
    }

    let terminal = configure_terminal()?;
    let lifecycle = Arc::new(Mutex::new(Application::new(terminal)));

    let result = run_restoring(
        lifecycle.as_ref(),
        run(initial_state, Arc::clone(&lifecycle), config.collapse_width),
    )
    .await;

    if let Err(ref err) = result {
        log::error!("{err}");
    }

    log::info!("Stopped");

    result
}

/// Everything that runs while the shell owns the terminal.
async fn run<B>(
    mut initial_state: State,
    lifecycle: Arc<Mutex<Application<B>>>,
    collapse_width: u16,
) -> anyhow::Result<()>
where
    B: Backend + io::Write + Send + Sync + 'static,
{
    {
        let mut lifecycle = lifecycle
            .lock()
            .map_err(|e| anyhow!("Unable to get lifecycle lock: {e}"))?;

        initial_state
            .nav_state
            .set_collapsed(lifecycle.width()? < collapse_width);
        initial_state.clamp_cursors();
        lifecycle.refresh(&initial_state)?;
    }

    log::info!("Started at {}", initial_state.router.location());

    let store = Store::new_with_state(reducer::reducer, initial_state);

    let ui_lifecycle = Arc::clone(&lifecycle);
    store
        .subscribe(move |state: &State| {
            if let Ok(mut ui_lifecycle) = ui_lifecycle.lock() {
                if let Err(err) = ui_lifecycle.refresh(state) {
                    log::error!("Redraw failed: {err}");
                }
            }
        })
        .await;

    tokio::spawn(event_listener(store, lifecycle, collapse_width))
        .await
        .map_err(|e| anyhow!("Event listener stopped: {e}"))?
}
