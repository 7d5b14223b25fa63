use super::canvas_editor::*;
use super::notifications::*;

use crate::layer::*;

impl CanvasEditor {
    ///
    /// Inserts a new transparent layer and returns its id
    ///
    /// With no position the layer goes on top of the stack. The active pointer keeps
    /// referring to the layer it referred to before the insert.
    ///
    pub fn add_layer(&mut self, name: Option<&str>, position: Option<usize>) -> LayerId {
        self.with_commit(ChangeEvent::StructureChanged, |editor| {
            editor.history.mark_structural(&editor.stack);

            let index = editor.stack.add_layer(name, position);
            editor.compositor.invalidate();

            editor.stack.layer(index).unwrap().id()
        })
    }

    ///
    /// Removes a layer
    ///
    /// Fails when the index is out of range or only one layer remains: a document always
    /// keeps at least one layer.
    ///
    pub fn delete_layer(&mut self, index: usize) -> bool {
        if self.stack.layer_count() <= 1 || index >= self.stack.layer_count() {
            return false;
        }

        self.with_commit(ChangeEvent::StructureChanged, |editor| {
            editor.history.mark_structural(&editor.stack);

            editor.stack.delete_layer(index);
            editor.compositor.invalidate();
        });

        true
    }

    ///
    /// Deep-copies a layer, inserting the copy immediately above the original
    ///
    pub fn duplicate_layer(&mut self, index: usize) -> Option<LayerId> {
        if index >= self.stack.layer_count() {
            return None;
        }

        Some(self.with_commit(ChangeEvent::StructureChanged, |editor| {
            editor.history.mark_structural(&editor.stack);

            let copy_index = editor.stack.duplicate_layer(index).unwrap();
            editor.compositor.invalidate();

            editor.stack.layer(copy_index).unwrap().id()
        }))
    }

    ///
    /// Reorders a layer from one index to another
    ///
    /// Fails on a move to the same index or an out-of-range index. The active pointer
    /// follows the layer it referred to before the move.
    ///
    pub fn move_layer(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.stack.layer_count() || to >= self.stack.layer_count() {
            return false;
        }

        self.with_commit(ChangeEvent::StructureChanged, |editor| {
            editor.history.mark_structural(&editor.stack);

            editor.stack.move_layer(from, to);
            editor.compositor.invalidate();
        });

        true
    }

    ///
    /// Composites a layer onto the layer beneath it (weighted by the upper layer's
    /// opacity) and removes the upper layer
    ///
    /// Fails for the bottom layer and when the layer beneath is locked.
    ///
    pub fn merge_down(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.stack.layer_count() {
            return false;
        }
        if self.stack.layer(index - 1).map(|layer| layer.is_locked()).unwrap_or(true) {
            return false;
        }

        self.with_commit(ChangeEvent::StructureChanged, |editor| {
            editor.history.mark_structural(&editor.stack);

            editor.stack.merge_down(index);
            editor.compositor.invalidate();
        });

        true
    }

    ///
    /// Shows or hides a layer in the composite
    ///
    pub fn set_layer_visible(&mut self, index: usize, visible: bool) -> bool {
        match self.stack.layer(index) {
            Some(layer) if layer.is_visible() != visible    => { }
            Some(_)                                         => { return true; }
            None                                            => { return false; }
        }

        self.with_commit(ChangeEvent::StructureChanged, |editor| {
            editor.history.mark_structural(&editor.stack);

            editor.stack.layer_mut(index).unwrap().visible = visible;
            editor.compositor.invalidate();
        });

        true
    }

    ///
    /// Sets a layer's opacity, clamped to the range 0..1
    ///
    pub fn set_layer_opacity(&mut self, index: usize, opacity: f32) -> bool {
        let opacity = opacity.max(0.0).min(1.0);

        match self.stack.layer(index) {
            Some(layer) if layer.opacity() != opacity   => { }
            Some(_)                                     => { return true; }
            None                                        => { return false; }
        }

        self.with_commit(ChangeEvent::StructureChanged, |editor| {
            editor.history.mark_structural(&editor.stack);

            editor.stack.layer_mut(index).unwrap().opacity = opacity;
            editor.compositor.invalidate();
        });

        true
    }

    ///
    /// Locks or unlocks a layer (a locked layer rejects all pixel writes)
    ///
    /// Locking does not change what the composite looks like, so the cache stays valid.
    ///
    pub fn set_layer_locked(&mut self, index: usize, locked: bool) -> bool {
        match self.stack.layer(index) {
            Some(layer) if layer.is_locked() != locked  => { }
            Some(_)                                     => { return true; }
            None                                        => { return false; }
        }

        self.with_commit(ChangeEvent::StructureChanged, |editor| {
            editor.history.mark_structural(&editor.stack);

            editor.stack.layer_mut(index).unwrap().locked = locked;
        });

        true
    }

    ///
    /// Renames a layer
    ///
    pub fn rename_layer(&mut self, index: usize, name: &str) -> bool {
        match self.stack.layer(index) {
            Some(layer) if layer.name() != name => { }
            Some(_)                             => { return true; }
            None                                => { return false; }
        }

        self.with_commit(ChangeEvent::StructureChanged, |editor| {
            editor.history.mark_structural(&editor.stack);

            editor.stack.layer_mut(index).unwrap().name = name.to_string();
        });

        true
    }
}
