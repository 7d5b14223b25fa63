use super::canvas_editor::*;
use super::notifications::*;

use std::error::Error;
use std::fmt;

///
/// Errors raised when batch bracketing is misused
///
/// These are programming errors in the calling tool, not routine interactive failures:
/// silently merging a nested batch would break the one-gesture-one-undo-step contract, so
/// the editor rejects it loudly instead.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BatchError {
    /// start_batch was called while a batch was already open
    AlreadyBatching,

    /// end_batch or cancel_batch was called with no batch open
    NotBatching,
}

impl fmt::Display for BatchError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BatchError::AlreadyBatching => write!(fmt, "a batch is already open"),
            BatchError::NotBatching     => write!(fmt, "no batch is open"),
        }
    }
}

impl Error for BatchError { }

impl CanvasEditor {
    ///
    /// Opens a batch: until `end_batch`, pixel writes mutate buffers and invalidate the
    /// composite immediately (so live rendering stays correct mid-gesture) but defer
    /// history and notification, collapsing the whole bracket into one undo step
    ///
    pub fn start_batch(&mut self) -> Result<(), BatchError> {
        if self.state != EditState::Idle {
            return Err(BatchError::AlreadyBatching);
        }

        self.state = EditState::Batching;
        self.history.begin();

        Ok(())
    }

    ///
    /// Commits the open batch as a single history entry and fires one notification
    ///
    /// A batch that made no effective change commits nothing and stays silent.
    ///
    pub fn end_batch(&mut self) -> Result<(), BatchError> {
        if self.state != EditState::Batching {
            return Err(BatchError::NotBatching);
        }

        self.state = EditState::Idle;

        if let Some((_, structural)) = self.history.commit(&self.stack) {
            let event = if structural { ChangeEvent::StructureChanged } else { ChangeEvent::PixelsEdited };
            self.notify(event);
        }

        Ok(())
    }

    ///
    /// Abandons the open batch, rewinding every change it made
    ///
    /// The document is left exactly as it was before `start_batch`: no history entry is
    /// committed and no notification fires.
    ///
    pub fn cancel_batch(&mut self) -> Result<(), BatchError> {
        if self.state != EditState::Batching {
            return Err(BatchError::NotBatching);
        }

        self.state = EditState::Idle;
        self.history.cancel(&mut self.stack);
        self.compositor.invalidate();

        Ok(())
    }

    ///
    /// True while a batch is open
    ///
    pub fn is_batching(&self) -> bool {
        self.state == EditState::Batching
    }
}
