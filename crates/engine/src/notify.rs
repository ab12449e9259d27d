//! User-visible alerts and two-choice confirmation prompts.

/// A title/message pair shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Answer to a confirmation prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Cancel,
    Confirm,
}

/// Presentation-side collaborator that shows notices and asks the user to
/// confirm destructive actions.
pub trait Notifier {
    fn notify(&self, notice: &Notice);

    /// Shows `prompt` with a cancel and a confirm button.
    fn confirm(&self, prompt: &Notice) -> Choice;
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice);
    }

    fn confirm(&self, prompt: &Notice) -> Choice {
        (**self).confirm(prompt)
    }
}
