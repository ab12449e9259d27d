use std::{io::Write, path::PathBuf};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::Print,
    terminal::{self, ClearType},
};
use engine::{Choice, Clipboard, ClipboardError, Notice, Notifier};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().map_err(|err| AppError::Terminal(err.to_string()))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Prints notices on stderr and asks y/N for confirmations.
pub struct TerminalNotifier {
    assume_yes: bool,
}

impl TerminalNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn ask(&self, prompt: &Notice) -> Result<Choice> {
        let _raw = RawModeGuard::enter()?;

        let mut out = std::io::stderr();
        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print(format!("{}: {} [y/N] ", prompt.title, prompt.message))
        )?;
        out.flush()?;

        loop {
            let Event::Key(KeyEvent { code, kind, .. }) = event::read()?
            else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }

            let choice = match code {
                KeyCode::Char('y' | 'Y') => Choice::Confirm,
                _ => Choice::Cancel,
            };
            let answer = if choice == Choice::Confirm { "yes" } else { "no" };
            execute!(out, Print(format!("{answer}\r\n")))?;
            out.flush()?;
            return Ok(choice);
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: &Notice) {
        let mut out = std::io::stderr();
        let printed = execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print(format!("{}: {}\r\n", notice.title, notice.message))
        );
        if let Err(err) = printed {
            tracing::error!("failed to print notice: {err}");
        }
    }

    fn confirm(&self, prompt: &Notice) -> Choice {
        if self.assume_yes {
            return Choice::Confirm;
        }
        match self.ask(prompt) {
            Ok(choice) => choice,
            Err(err) => {
                tracing::error!("confirmation prompt failed: {err}");
                Choice::Cancel
            }
        }
    }
}

/// Writes the copied text to stdout, ready to be piped into the system
/// clipboard tool.
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    async fn set_text(&self, text: &str) -> std::result::Result<(), ClipboardError> {
        let mut out = tokio::io::stdout();
        out.write_all(text.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }
}

/// Writes the copied text to a file, replacing it.
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Clipboard for FileClipboard {
    async fn set_text(&self, text: &str) -> std::result::Result<(), ClipboardError> {
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}
