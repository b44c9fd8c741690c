//! Two-step confirmation state for destructive actions.

/// Holds a pending destructive action until it is confirmed or cancelled.
///
/// Arming replaces any previously armed target; the destructive call is
/// only made with the value handed back by [`ConfirmDialog::confirm`].
#[derive(Debug, Clone, Default)]
pub struct ConfirmDialog<T> {
    armed: Option<T>,
}

impl<T> ConfirmDialog<T> {
    /// A dialog with nothing armed.
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: None }
    }

    /// Arm the dialog for `target`, replacing any earlier target.
    pub fn arm(&mut self, target: T) {
        self.armed = Some(target);
    }

    /// Whether a target is awaiting confirmation.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// The target awaiting confirmation, if any.
    #[must_use]
    pub const fn target(&self) -> Option<&T> {
        self.armed.as_ref()
    }

    /// Confirm, disarming the dialog and yielding the target to act on.
    pub fn confirm(&mut self) -> Option<T> {
        self.armed.take()
    }

    /// Cancel, disarming the dialog without acting.
    pub fn cancel(&mut self) {
        self.armed = None;
    }
}
