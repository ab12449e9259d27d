//! Interactive calculator on the terminal.
//!
//! Keys: digits and `+ - * /` type, Backspace deletes, `c` clears,
//! Enter or `=` evaluates, Esc or `q` leaves.
use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{self, ClearType},
};
use engine::{Calculator, Key, Notifier};

use crate::{error::Result, terminal::RawModeGuard};

const LAYOUT: &str = "[1 2 3 ←] [4 5 6 -] [7 8 9 *] [C 0 / +] [=]   Esc to quit\r\n";

pub fn run<N: Notifier>(calculator: &mut Calculator, notifier: &N) -> Result<()> {
    let _raw = RawModeGuard::enter()?;
    let mut out = std::io::stderr();
    execute!(out, Print(LAYOUT))?;

    loop {
        draw(&mut out, calculator)?;

        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }

        let key = match code {
            KeyCode::Esc | KeyCode::Char('q') => break,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Enter => Some(Key::Equals),
            KeyCode::Backspace => Some(Key::Delete),
            KeyCode::Char(ch) => Key::from_char(ch),
            _ => None,
        };
        if let Some(key) = key {
            calculator.press_and_notify(key, notifier);
        }
    }

    execute!(out, Print("\r\n"))?;
    out.flush()?;
    Ok(())
}

fn draw(out: &mut impl Write, calculator: &Calculator) -> Result<()> {
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(format!(
            "{:>16} | {:>16}",
            calculator.number(),
            calculator.result()
        ))
    )?;
    out.flush()?;
    Ok(())
}
