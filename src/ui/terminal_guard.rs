//! Raw mode and the alternate screen for the TUI.
//!
//! The terminal is handed back exactly once, by whichever comes first: an
//! explicit [`TerminalGuard::release`], the guard's drop, or the panic hook.

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct TerminalGuard {
    armed: Arc<AtomicBool>,
    undo: fn(),
}

fn leave_tui_mode() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

impl TerminalGuard {
    fn armed(undo: fn()) -> Self {
        Self {
            armed: Arc::new(AtomicBool::new(true)),
            undo,
        }
    }

    /// Chain a panic hook that releases the terminal before the default
    /// report is printed.
    fn with_panic_hook(self) -> Self {
        let armed = Arc::clone(&self.armed);
        let undo = self.undo;
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if armed.swap(false, Ordering::AcqRel) {
                undo();
            }
            previous(info);
        }));
        self
    }

    /// Hand the terminal back. Returns false if that already happened.
    pub fn release(&self) -> bool {
        if !self.armed.swap(false, Ordering::AcqRel) {
            return false;
        }
        (self.undo)();
        true
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.release();
    }
}

pub fn setup_terminal() -> io::Result<(Terminal<CrosstermBackend<Stdout>>, TerminalGuard)> {
    enable_raw_mode()?;
    // Armed before anything else can fail, so an early return still restores.
    let guard = TerminalGuard::armed(leave_tui_mode).with_panic_hook();

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Clear(ClearType::All))?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    static UNDONE: AtomicUsize = AtomicUsize::new(0);

    fn count_undo() {
        UNDONE.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn terminal_is_released_once() {
        let guard = TerminalGuard::armed(count_undo);
        assert!(guard.release());
        assert!(!guard.release());
        drop(guard);
        assert_eq!(UNDONE.load(Ordering::SeqCst), 1);
    }
}
