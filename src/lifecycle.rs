//! Terminal ownership: raw mode, alternate screen, redraws.

use core::future::Future;

use std::{
    io,
    sync::{Mutex, PoisonError},
};

use crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use tui::{backend::Backend, layout::Rect, Terminal};

use crate::{state::State, ui};

/// Something that hands the terminal back to the shell.
pub trait Restore {
    ///
    fn restore(&mut self) -> anyhow::Result<()>;
}

/// Runs `task`, then restores `target` whatever the task returned.
///
/// A task error wins over a restore error; a poisoned lock is still restored.
pub async fn run_restoring<R, T, F>(target: &Mutex<R>, task: F) -> anyhow::Result<T>
where
    R: Restore,
    F: Future<Output = anyhow::Result<T>>,
{
    let result = task.await;

    let restored = target
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .restore();

    match (result, restored) {
        (Err(err), Err(restore_err)) => {
            log::error!("Unable to restore the terminal: {restore_err}");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(_), Err(restore_err)) => Err(restore_err),
        (Ok(value), Ok(())) => Ok(value),
    }
}

///
pub struct Application<B>
where
    B: Backend + io::Write,
{
    ///
    terminal: Terminal<B>,
}

impl<B> Application<B>
where
    B: Backend + io::Write,
{
    ///
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    ///
    pub fn width(&self) -> anyhow::Result<u16> {
        Ok(self.terminal.size()?.width)
    }

    /// Hands the terminal back to the shell.
    pub fn suspend(&mut self) -> anyhow::Result<()> {
        disable_raw_mode()?;

        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;

        self.terminal.show_cursor()?;
        Ok(())
    }

    ///
    pub fn refresh(&mut self, state: &State) -> anyhow::Result<()> {
        self.terminal.draw(|f| ui::ui(f, state))?;

        Ok(())
    }

    ///
    pub fn resize(&mut self, width: u16, height: u16) -> anyhow::Result<()> {
        self.terminal.resize(Rect::new(0, 0, width, height))?;

        Ok(())
    }
}

impl<B> Restore for Application<B>
where
    B: Backend + io::Write,
{
    fn restore(&mut self) -> anyhow::Result<()> {
        self.suspend()
    }
}

#[cfg(test)]
mod test {
    extern crate alloc;
    use alloc::sync::Arc;

    use anyhow::anyhow;

    use super::*;

    #[derive(Default)]
    struct Screen {
        restored: usize,
        fail: bool,
    }

    impl Restore for Screen {
        fn restore(&mut self) -> anyhow::Result<()> {
            self.restored += 1;
            if self.fail {
                Err(anyhow!("still raw"))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_restored_after_success() -> anyhow::Result<()> {
        let screen = Mutex::new(Screen::default());

        let value = run_restoring(&screen, async { Ok::<_, anyhow::Error>(7) }).await?;

        assert_eq!(7, value);
        assert_eq!(1, screen.lock().map_err(|e| anyhow!("{e}"))?.restored);

        Ok(())
    }

    #[tokio::test]
    async fn test_restored_after_setup_error() -> anyhow::Result<()> {
        let screen = Mutex::new(Screen::default());

        let result: anyhow::Result<()> =
            run_restoring(&screen, async { Err(anyhow!("no width")) }).await;

        assert_eq!("no width", result.err().map(|e| e.to_string()).unwrap_or_default());
        assert_eq!(1, screen.lock().map_err(|e| anyhow!("{e}"))?.restored);

        Ok(())
    }

    #[tokio::test]
    async fn test_task_error_wins_over_restore_error() {
        let screen = Mutex::new(Screen {
            restored: 0,
            fail: true,
        });

        let result: anyhow::Result<()> =
            run_restoring(&screen, async { Err(anyhow!("listener")) }).await;
        assert_eq!("listener", result.err().map(|e| e.to_string()).unwrap_or_default());

        let result = run_restoring(&screen, async { Ok::<_, anyhow::Error>(()) }).await;
        assert_eq!("still raw", result.err().map(|e| e.to_string()).unwrap_or_default());
    }

    #[tokio::test]
    async fn test_restored_when_poisoned() {
        let screen = Arc::new(Mutex::new(Screen::default()));

        let poisoner = Arc::clone(&screen);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock();
            panic!("listener panicked");
        })
        .join();
        assert!(screen.is_poisoned());

        let result = run_restoring(screen.as_ref(), async { Ok::<_, anyhow::Error>(()) }).await;

        assert!(result.is_ok());
        assert_eq!(
            1,
            screen.lock().unwrap_or_else(PoisonError::into_inner).restored
        );
    }
}
