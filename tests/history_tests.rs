use rasterpad::edit::*;
use rasterpad::history::*;
use rasterpad::pixel::*;

#[test]
fn a_batch_of_writes_is_one_history_entry() {
    let mut editor = CanvasEditor::new(128, 128);

    editor.start_batch().unwrap();
    for i in 0..50 {
        editor.set_pixel(i % 16, i / 16, Rgba([255, 0, 0, 255]));
    }
    editor.end_batch().unwrap();

    assert!(editor.history().depth() == 1);

    // One undo reverts all fifty writes
    assert!(editor.undo());
    for i in 0..50 {
        assert!(editor.get_pixel(i % 16, i / 16) == Rgba::TRANSPARENT);
    }
}

#[test]
fn undo_restores_the_composite_exactly() {
    let mut editor = CanvasEditor::new(32, 32);
    editor.fill_layer(Rgba([20, 40, 60, 255]), None);

    let before = editor.composite_all().clone();

    editor.start_batch().unwrap();
    for i in 0..10 {
        editor.set_pixel(i, i, Rgba([200, 0, 0, 255]));
    }
    editor.end_batch().unwrap();

    assert!(editor.undo());
    assert!(*editor.composite_all() == before);
}

#[test]
fn undo_then_redo_is_an_identity_for_patches() {
    // A canvas this large records pixel batches as patches
    let mut editor = CanvasEditor::new(128, 128);

    editor.set_pixel(5, 5, Rgba([1, 2, 3, 255]));
    editor.set_pixel(6, 6, Rgba([4, 5, 6, 255]));
    assert!(editor.history().kind_at(1) == Some(EntryKind::Patch));

    let after = editor.composite_all().clone();

    assert!(editor.undo());
    assert!(editor.redo());
    assert!(*editor.composite_all() == after);
}

#[test]
fn undo_then_redo_is_an_identity_for_snapshots() {
    // A canvas this small records everything as snapshots
    let mut editor = CanvasEditor::new(16, 16);

    editor.set_pixel(5, 5, Rgba([1, 2, 3, 255]));
    assert!(editor.history().kind_at(0) == Some(EntryKind::Snapshot));

    let after = editor.composite_all().clone();

    assert!(editor.undo());
    assert!(editor.get_pixel(5, 5) == Rgba::TRANSPARENT);

    assert!(editor.redo());
    assert!(*editor.composite_all() == after);
    assert!(editor.get_pixel(5, 5) == Rgba([1, 2, 3, 255]));
}

#[test]
fn structural_changes_always_snapshot() {
    let mut editor = CanvasEditor::new(128, 128);

    editor.add_layer(None, None);
    assert!(editor.history().kind_at(0) == Some(EntryKind::Snapshot));

    editor.resize(64, 64, rasterpad::layer::ResizeMode::CropExtend);
    assert!(editor.history().kind_at(1) == Some(EntryKind::Snapshot));
}

#[test]
fn a_batch_containing_a_structural_change_snapshots() {
    let mut editor = CanvasEditor::new(128, 128);

    editor.start_batch().unwrap();
    editor.set_pixel(1, 1, Rgba([9, 9, 9, 255]));
    editor.add_layer(None, None);
    editor.set_layer_pixel(2, 2, Rgba([8, 8, 8, 255]), 1);
    editor.end_batch().unwrap();

    assert!(editor.history().depth() == 1);
    assert!(editor.history().kind_at(0) == Some(EntryKind::Snapshot));

    // Undoing the batch removes the layer and the pixel writes together
    assert!(editor.undo());
    assert!(editor.layer_count() == 1);
    assert!(editor.get_pixel(1, 1) == Rgba::TRANSPARENT);
}

#[test]
fn undoing_a_structural_batch_restores_everything() {
    let mut editor = CanvasEditor::new(32, 32);
    editor.fill_layer(Rgba([50, 50, 50, 255]), None);

    let before = editor.composite_all().clone();

    editor.add_layer(None, None);
    editor.set_layer_pixel(3, 3, Rgba([255, 255, 255, 255]), 1);
    editor.merge_down(1);

    assert!(editor.undo());    // merge
    assert!(editor.undo());    // pixel write
    assert!(editor.undo());    // add layer

    assert!(editor.layer_count() == 1);
    assert!(*editor.composite_all() == before);
}

#[test]
fn new_commits_discard_the_redo_branch() {
    let mut editor = CanvasEditor::new(16, 16);

    editor.set_pixel(0, 0, Rgba([1, 1, 1, 255]));
    editor.set_pixel(1, 1, Rgba([2, 2, 2, 255]));
    editor.set_pixel(2, 2, Rgba([3, 3, 3, 255]));

    editor.undo();
    editor.undo();
    assert!(editor.can_redo());

    editor.set_pixel(3, 3, Rgba([4, 4, 4, 255]));

    assert!(!editor.can_redo());
    assert!(editor.history().depth() == 2);
}

#[test]
fn history_depth_is_capped_with_oldest_entries_evicted() {
    // A canvas this large keeps the shorter history
    let mut editor = CanvasEditor::new(300, 300);

    for i in 0..30 {
        editor.set_pixel(i, 0, Rgba([255, 255, 255, 255]));
    }

    assert!(editor.history().depth() == 24);

    // Undo all the way back: the first six writes are beyond the horizon and survive
    while editor.undo() { }

    for i in 0..6 {
        assert!(editor.get_pixel(i, 0) == Rgba([255, 255, 255, 255]));
    }
    for i in 6..30 {
        assert!(editor.get_pixel(i, 0) == Rgba::TRANSPARENT);
    }
}

#[test]
fn reentrant_batches_are_rejected_loudly() {
    let mut editor = CanvasEditor::new(16, 16);

    editor.start_batch().unwrap();
    assert!(editor.start_batch() == Err(BatchError::AlreadyBatching));

    editor.end_batch().unwrap();
    assert!(editor.end_batch() == Err(BatchError::NotBatching));
    assert!(editor.cancel_batch() == Err(BatchError::NotBatching));
}

#[test]
fn cancelling_a_batch_restores_the_document() {
    let mut editor = CanvasEditor::new(16, 16);
    editor.set_pixel(0, 0, Rgba([10, 10, 10, 255]));

    let before = editor.composite_all().clone();

    editor.start_batch().unwrap();
    editor.set_pixel(0, 0, Rgba([99, 99, 99, 255]));
    editor.set_pixel(5, 5, Rgba([99, 99, 99, 255]));
    editor.cancel_batch().unwrap();

    assert!(*editor.composite_all() == before);
    assert!(editor.history().depth() == 1);
}

#[test]
fn cancelling_a_structural_batch_restores_the_document() {
    let mut editor = CanvasEditor::new(16, 16);
    editor.set_pixel(0, 0, Rgba([10, 10, 10, 255]));

    editor.start_batch().unwrap();
    editor.set_pixel(1, 1, Rgba([20, 20, 20, 255]));
    editor.add_layer(None, None);
    editor.cancel_batch().unwrap();

    assert!(editor.layer_count() == 1);
    assert!(editor.get_pixel(0, 0) == Rgba([10, 10, 10, 255]));
    assert!(editor.get_pixel(1, 1) == Rgba::TRANSPARENT);
}

#[test]
fn undo_is_unavailable_while_a_batch_is_open() {
    let mut editor = CanvasEditor::new(16, 16);
    editor.set_pixel(0, 0, Rgba([10, 10, 10, 255]));

    editor.start_batch().unwrap();
    assert!(!editor.undo());
    editor.end_batch().unwrap();

    assert!(editor.undo());
}

#[test]
fn writes_that_change_nothing_commit_nothing() {
    let mut editor = CanvasEditor::new(16, 16);
    editor.set_pixel(0, 0, Rgba([10, 10, 10, 255]));

    // Writing the colour that is already there is not an undoable change
    editor.set_pixel(0, 0, Rgba([10, 10, 10, 255]));
    assert!(editor.history().depth() == 1);

    // A batch whose pixels all end where they started is not one either
    editor.start_batch().unwrap();
    editor.set_pixel(0, 0, Rgba([50, 50, 50, 255]));
    editor.set_pixel(0, 0, Rgba([10, 10, 10, 255]));
    editor.end_batch().unwrap();
    assert!(editor.history().depth() == 1);
}

#[test]
fn a_pixel_touched_many_times_records_one_change_pair() {
    let mut editor = CanvasEditor::new(128, 128);
    editor.set_pixel(4, 4, Rgba([1, 1, 1, 255]));

    editor.start_batch().unwrap();
    for value in 2u8..40 {
        editor.set_pixel(4, 4, Rgba([value, value, value, 255]));
    }
    editor.end_batch().unwrap();

    // Undo goes straight back to the pre-batch colour
    assert!(editor.undo());
    assert!(editor.get_pixel(4, 4) == Rgba([1, 1, 1, 255]));

    // Redo goes straight to the final colour
    assert!(editor.redo());
    assert!(editor.get_pixel(4, 4) == Rgba([39, 39, 39, 255]));
}

#[test]
fn undo_ignores_locks_applied_after_the_stroke() {
    let mut editor = CanvasEditor::new(16, 16);
    editor.set_pixel(0, 0, Rgba([10, 10, 10, 255]));
    editor.set_layer_locked(0, true);

    assert!(editor.undo());    // the lock
    assert!(editor.undo());    // the write

    assert!(editor.get_pixel(0, 0) == Rgba::TRANSPARENT);
}

#[test]
fn notifications_fire_per_commit_not_per_write() {
    use std::sync::{Arc, Mutex};

    let events      = Arc::new(Mutex::new(vec![]));
    let recorded    = Arc::clone(&events);

    let mut editor = CanvasEditor::with_notifier(16, 16, Box::new(move |event| {
        recorded.lock().unwrap().push(event);
    }));

    // One standalone write: one notification
    editor.set_pixel(0, 0, Rgba([1, 1, 1, 255]));
    assert!(*events.lock().unwrap() == vec![ChangeEvent::PixelsEdited]);

    // A batch stays silent until it ends
    editor.start_batch().unwrap();
    editor.set_pixel(1, 1, Rgba([2, 2, 2, 255]));
    editor.set_pixel(2, 2, Rgba([3, 3, 3, 255]));
    assert!(events.lock().unwrap().len() == 1);
    editor.end_batch().unwrap();
    assert!(events.lock().unwrap().len() == 2);

    // Structural changes and restores report their own kinds
    editor.add_layer(None, None);
    editor.undo();
    let seen = events.lock().unwrap().clone();
    assert!(seen[2] == ChangeEvent::StructureChanged);
    assert!(seen[3] == ChangeEvent::HistoryRestored);
}
