use crate::domain::ports::ContinuePrompt;
use crate::utils::error::Result;

/// Stops after a fixed number of iterations without reading the terminal.
#[derive(Debug, Clone)]
pub struct FixedIterations {
    remaining: usize,
}

impl FixedIterations {
    /// `total` counts every iteration, including the first one that always runs.
    pub fn new(total: usize) -> Self {
        Self {
            remaining: total.saturating_sub(1),
        }
    }
}

impl ContinuePrompt for FixedIterations {
    fn should_continue(&mut self) -> Result<bool> {
        if self.remaining == 0 {
            return Ok(false);
        }
        self.remaining -= 1;
        Ok(true)
    }
}

#[cfg(feature = "cli")]
pub use key_prompt::KeyPrompt;

#[cfg(feature = "cli")]
mod key_prompt {
    use super::*;
    use crate::utils::error::FleetError;
    use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

    const PROMPT: &str = "\nPress Escape to exit or any other key to continue.\n";

    /// Waits for a single key press: Escape or Ctrl+C stops the loop,
    /// anything else continues it.
    #[derive(Debug, Default)]
    pub struct KeyPrompt;

    impl KeyPrompt {
        pub fn new() -> Self {
            Self
        }
    }

    struct RawModeGuard;

    impl RawModeGuard {
        fn enable() -> Result<Self> {
            enable_raw_mode().map_err(terminal_error)?;
            Ok(Self)
        }
    }

    impl Drop for RawModeGuard {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
        }
    }

    /// `None` for events that do not answer the prompt (key releases and
    /// repeats, which Windows reports too).
    fn continues_on(key_event: &KeyEvent) -> Option<bool> {
        if key_event.kind != KeyEventKind::Press {
            return None;
        }

        // Raw mode delivers Ctrl+C as a key instead of an interrupt.
        let is_ctrl_c = key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL);

        Some(key_event.code != KeyCode::Esc && !is_ctrl_c)
    }

    fn terminal_error(e: std::io::Error) -> FleetError {
        FleetError::TerminalError {
            message: e.to_string(),
        }
    }

    impl ContinuePrompt for KeyPrompt {
        fn should_continue(&mut self) -> Result<bool> {
            println!("{}", PROMPT);

            let _raw = RawModeGuard::enable()?;
            loop {
                if let Event::Key(key_event) = event::read().map_err(terminal_error)? {
                    if let Some(answer) = continues_on(&key_event) {
                        return Ok(answer);
                    }
                }
            }
        }
    }

}
