use super::notifications::*;

use crate::compose::*;
use crate::history::*;
use crate::layer::*;
use crate::pixel::*;

///
/// What the editor is currently doing, checked at every mutation entry point
///
/// `Batching` defers history commits and notifications until the batch ends. `Restoring`
/// marks an undo or redo in progress: nothing that happens while restoring may record
/// history or notify, which is what stops a restore from feeding back into itself.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub (crate) enum EditState {
    Idle,
    Batching,
    Restoring,
}

///
/// An editable layered raster document
///
/// The editor owns the layer stack, the compositor cache and the undo history, and is the
/// single mutation surface the surrounding system talks to: tools, selection gestures and
/// persistence all go through it rather than touching buffers directly. Every committed
/// mutation invalidates the composite cache, lands on the undo stack, and reports itself
/// through the injected notifier.
///
pub struct CanvasEditor {
    /// The layers of the document
    pub (super) stack: LayerStack,

    /// Flattens and caches the visible layers
    pub (super) compositor: Compositor,

    /// The undo/redo stack
    pub (super) history: HistoryManager,

    /// Hook invoked after each committed change
    pub (super) notifier: Option<ChangeNotifier>,

    /// What the editor is currently doing
    pub (super) state: EditState,
}

impl CanvasEditor {
    ///
    /// Creates an editor for a blank canvas with a single background layer
    ///
    pub fn new(width: i32, height: i32) -> CanvasEditor {
        CanvasEditor {
            stack:      LayerStack::new(width, height),
            compositor: Compositor::new(),
            history:    HistoryManager::new(),
            notifier:   None,
            state:      EditState::Idle,
        }
    }

    ///
    /// Creates an editor that reports committed changes through a notifier hook
    ///
    pub fn with_notifier(width: i32, height: i32, notifier: ChangeNotifier) -> CanvasEditor {
        let mut editor  = CanvasEditor::new(width, height);
        editor.notifier = Some(notifier);

        editor
    }

    ///
    /// Replaces the notifier hook
    ///
    pub fn set_notifier(&mut self, notifier: ChangeNotifier) {
        self.notifier = Some(notifier);
    }

    #[inline] pub fn width(&self) -> i32                    { self.stack.width() }
    #[inline] pub fn height(&self) -> i32                   { self.stack.height() }
    #[inline] pub fn layer_count(&self) -> usize            { self.stack.layer_count() }
    #[inline] pub fn active_layer_index(&self) -> usize     { self.stack.active_index() }

    ///
    /// Retrieves the layer at an index (0 is the bottom of the stack)
    ///
    #[inline]
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.stack.layer(index)
    }

    ///
    /// Finds the current index of the layer with a particular id
    ///
    #[inline]
    pub fn layer_index_of(&self, id: LayerId) -> Option<usize> {
        self.stack.index_of(id)
    }

    ///
    /// Moves the active pointer to another layer
    ///
    /// This only redirects future edits: it is not a mutation of the document, so it is
    /// not undoable and does not notify.
    ///
    pub fn select_layer(&mut self, index: usize) -> bool {
        self.stack.set_active(index)
    }

    ///
    /// The undo/redo history of this editor
    ///
    #[inline]
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    #[inline] pub fn can_undo(&self) -> bool { self.history.can_undo() }
    #[inline] pub fn can_redo(&self) -> bool { self.history.can_redo() }

    ///
    /// Flattens a single pixel directly from the layer stack
    ///
    #[inline]
    pub fn composite_pixel(&self, x: i32, y: i32) -> Rgba {
        Compositor::composite_pixel(&self.stack, x, y)
    }

    ///
    /// Returns the full flattened raster, served from cache unless something changed
    ///
    #[inline]
    pub fn composite_all(&mut self) -> &PixelBuffer {
        self.compositor.composite_all(&self.stack)
    }

    ///
    /// Steps back over the most recent committed change
    ///
    /// Notifications are suppressed while the restore runs; one `HistoryRestored` event
    /// fires after it completes. Undo is unavailable while a batch is open.
    ///
    pub fn undo(&mut self) -> bool {
        if self.state != EditState::Idle {
            return false;
        }

        self.state      = EditState::Restoring;
        let restored    = self.history.undo(&mut self.stack);
        self.state      = EditState::Idle;

        if restored {
            self.compositor.invalidate();
            self.notify(ChangeEvent::HistoryRestored);
        }

        restored
    }

    ///
    /// Re-applies the change that the last undo stepped over
    ///
    pub fn redo(&mut self) -> bool {
        if self.state != EditState::Idle {
            return false;
        }

        self.state      = EditState::Restoring;
        let restored    = self.history.redo(&mut self.stack);
        self.state      = EditState::Idle;

        if restored {
            self.compositor.invalidate();
            self.notify(ChangeEvent::HistoryRestored);
        }

        restored
    }

    ///
    /// Invokes the notifier hook, unless a batch or restore is in progress
    ///
    pub (super) fn notify(&mut self, event: ChangeEvent) {
        if self.state != EditState::Idle {
            return;
        }

        if let Some(notifier) = &mut self.notifier {
            notifier(event);
        }
    }

    ///
    /// Runs a mutation as exactly one history entry
    ///
    /// When a batch is already open the action simply joins it: its changes will land in
    /// the batch's single entry. Otherwise the action is bracketed in an implicit batch of
    /// its own, committed, and notified — this is the one place the commit/notify sequence
    /// for standalone mutations lives.
    ///
    pub (super) fn with_commit<T>(&mut self, event: ChangeEvent, action: impl FnOnce(&mut CanvasEditor) -> T) -> T {
        match self.state {
            EditState::Batching | EditState::Restoring => action(self),

            EditState::Idle => {
                self.state = EditState::Batching;
                self.history.begin();

                let result = action(self);

                self.state = EditState::Idle;
                if self.history.commit(&self.stack).is_some() {
                    self.notify(event);
                }

                result
            }
        }
    }
}
