//! The calculator screen state: the typed input and the last result.
use crate::{
    EngineError, ResultEngine,
    expr::{self, Operator},
    notify::{Notice, Notifier},
};

/// A keypad button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Op(Operator),
    Delete,
    Clear,
    Equals,
}

impl Key {
    /// Maps a typed character to a keypad button.
    ///
    /// `=` and `\n` evaluate, `c`/`C` clears and backspace deletes.
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0'..='9' => Some(Self::Digit(ch as u8 - b'0')),
            '=' | '\n' | '\r' => Some(Self::Equals),
            'c' | 'C' => Some(Self::Clear),
            '\u{8}' | '\u{7f}' | '←' => Some(Self::Delete),
            other => Operator::from_symbol(other).map(Self::Op),
        }
    }
}

/// Accumulates keypad input and evaluates it on demand.
///
/// `result` only changes on a successful [`evaluate`](Self::evaluate).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Calculator {
    number: String,
    result: String,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The input typed so far.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// The last evaluated result, empty until the first success.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Appends a digit or an operator. Operator placement is only checked
    /// on evaluation, so `12++3` is accepted here.
    pub fn append(&mut self, token: char) -> ResultEngine<()> {
        if !token.is_ascii_digit() && Operator::from_symbol(token).is_none() {
            return Err(EngineError::Validation(format!(
                "'{token}' is not a keypad token"
            )));
        }
        self.number.push(token);
        Ok(())
    }

    pub fn delete_last(&mut self) {
        self.number.pop();
    }

    pub fn clear(&mut self) {
        self.number.clear();
    }

    /// Evaluates the input and stores the rendered value as the result.
    /// On failure the previous result is kept.
    pub fn evaluate(&mut self) -> ResultEngine<&str> {
        let value = expr::evaluate(&self.number)?;
        self.result = expr::format_number(value);
        tracing::debug!("evaluated {} = {}", self.number, self.result);
        Ok(&self.result)
    }

    /// Applies a keypad button.
    pub fn press(&mut self, key: Key) -> ResultEngine<()> {
        match key {
            Key::Digit(digit) => {
                let ch = char::from_digit(u32::from(digit), 10).ok_or_else(|| {
                    EngineError::Validation(format!("{digit} is not a keypad digit"))
                })?;
                self.append(ch)
            }
            Key::Op(op) => self.append(op.symbol()),
            Key::Delete => {
                self.delete_last();
                Ok(())
            }
            Key::Clear => {
                self.clear();
                Ok(())
            }
            Key::Equals => self.evaluate().map(|_| ()),
        }
    }

    /// Same as [`press`](Self::press), but a failure is shown as a notice
    /// instead of being returned. Returns `true` if the key was applied.
    pub fn press_and_notify<N: Notifier>(&mut self, key: Key, notifier: &N) -> bool {
        match self.press(key) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("calculator: {err}");
                notifier.notify(&Notice::new("Error", err.to_string()));
                false
            }
        }
    }
}
