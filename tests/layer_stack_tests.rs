use rasterpad::edit::*;
use rasterpad::layer::*;
use rasterpad::pixel::*;

#[test]
fn set_then_get_round_trips() {
    let mut editor = CanvasEditor::new(16, 16);

    assert!(editor.set_pixel(3, 5, Rgba([10, 20, 30, 255])));
    assert!(editor.get_pixel(3, 5) == Rgba([10, 20, 30, 255]));
}

#[test]
fn out_of_bounds_reads_are_transparent() {
    let editor = CanvasEditor::new(16, 16);

    assert!(editor.get_pixel(-1, -1) == Rgba([0, 0, 0, 0]));
    assert!(editor.get_pixel(16, 16) == Rgba([0, 0, 0, 0]));
}

#[test]
fn out_of_bounds_writes_change_nothing() {
    let mut editor = CanvasEditor::new(16, 16);

    assert!(!editor.set_pixel(-1, -1, Rgba([255, 255, 255, 255])));
    assert!(!editor.set_pixel(16, 16, Rgba([255, 255, 255, 255])));
    assert!(editor.history().depth() == 0);
}

#[test]
fn locked_layer_rejects_writes_silently() {
    let mut editor = CanvasEditor::new(16, 16);
    editor.set_layer_locked(0, true);

    assert!(!editor.set_pixel(4, 4, Rgba([255, 0, 0, 255])));
    assert!(editor.get_pixel(4, 4) == Rgba::TRANSPARENT);
}

#[test]
fn last_layer_cannot_be_deleted() {
    let mut editor = CanvasEditor::new(16, 16);

    assert!(!editor.delete_layer(0));
    assert!(editor.layer_count() == 1);
}

#[test]
fn added_layers_default_to_the_top() {
    let mut editor = CanvasEditor::new(16, 16);
    editor.add_layer(Some("ink"), None);

    assert!(editor.layer_count() == 2);
    assert!(editor.layer(1).unwrap().name() == "ink");
    assert!(editor.active_layer_index() == 0);
}

#[test]
fn inserting_below_the_active_layer_keeps_it_active() {
    let mut editor = CanvasEditor::new(16, 16);
    editor.add_layer(None, None);
    editor.select_layer(1);

    let active_id = editor.layer(1).unwrap().id();
    editor.add_layer(None, Some(0));

    assert!(editor.active_layer_index() == 2);
    assert!(editor.layer(2).unwrap().id() == active_id);
}

#[test]
fn duplicate_inserts_an_independent_copy_above() {
    let mut editor = CanvasEditor::new(16, 16);
    editor.set_pixel(1, 1, Rgba([7, 7, 7, 255]));

    let copy_id     = editor.duplicate_layer(0).unwrap();
    let copy_index  = editor.layer_index_of(copy_id).unwrap();

    assert!(copy_index == 1);
    assert!(editor.get_layer_pixel(1, 1, 1) == Rgba([7, 7, 7, 255]));

    // Editing the original leaves the copy alone
    editor.set_layer_pixel(1, 1, Rgba([0, 0, 0, 0]), 0);
    assert!(editor.get_layer_pixel(1, 1, 1) == Rgba([7, 7, 7, 255]));
}

#[test]
fn move_layer_follows_the_active_layer() {
    let mut editor = CanvasEditor::new(16, 16);
    editor.add_layer(None, None);
    editor.add_layer(None, None);
    editor.select_layer(2);

    let active_id = editor.layer(2).unwrap().id();
    assert!(editor.move_layer(2, 0));

    assert!(editor.active_layer_index() == 0);
    assert!(editor.layer(0).unwrap().id() == active_id);
}

#[test]
fn move_to_the_same_index_is_rejected() {
    let mut editor = CanvasEditor::new(16, 16);
    editor.add_layer(None, None);

    assert!(!editor.move_layer(0, 0));
    assert!(editor.history().depth() == 0);
}

#[test]
fn fill_and_clear_affect_the_whole_layer() {
    let mut editor = CanvasEditor::new(8, 8);

    assert!(editor.fill_layer(Rgba([1, 2, 3, 255]), None));
    assert!(editor.get_pixel(0, 0) == Rgba([1, 2, 3, 255]));
    assert!(editor.get_pixel(7, 7) == Rgba([1, 2, 3, 255]));

    assert!(editor.clear_layer(None));
    assert!(editor.get_pixel(3, 3) == Rgba::TRANSPARENT);
}

#[test]
fn fill_fails_on_a_locked_layer() {
    let mut editor = CanvasEditor::new(8, 8);
    editor.set_layer_locked(0, true);

    assert!(!editor.fill_layer(Rgba([1, 2, 3, 255]), None));
    assert!(editor.get_pixel(0, 0) == Rgba::TRANSPARENT);
}

#[test]
fn merge_down_removes_the_upper_layer() {
    let mut editor = CanvasEditor::new(8, 8);
    editor.set_pixel(0, 0, Rgba([255, 0, 0, 255]));

    editor.add_layer(None, None);
    editor.set_layer_pixel(1, 1, Rgba([0, 255, 0, 255]), 1);

    assert!(editor.merge_down(1));
    assert!(editor.layer_count() == 1);
    assert!(editor.get_layer_pixel(0, 0, 0) == Rgba([255, 0, 0, 255]));
    assert!(editor.get_layer_pixel(1, 1, 0) == Rgba([0, 255, 0, 255]));
}

#[test]
fn merge_down_rejects_the_bottom_layer_and_locked_targets() {
    let mut editor = CanvasEditor::new(8, 8);
    editor.add_layer(None, None);

    assert!(!editor.merge_down(0));

    editor.set_layer_locked(0, true);
    assert!(!editor.merge_down(1));
    assert!(editor.layer_count() == 2);
}

#[test]
fn resize_crop_extend_keeps_coordinates() {
    let mut editor = CanvasEditor::new(4, 4);
    editor.set_pixel(1, 1, Rgba([9, 9, 9, 255]));
    editor.set_pixel(3, 3, Rgba([5, 5, 5, 255]));

    assert!(editor.resize(6, 2, ResizeMode::CropExtend));

    assert!(editor.width() == 6 && editor.height() == 2);
    assert!(editor.get_pixel(1, 1) == Rgba([9, 9, 9, 255]));
    // The new area reads transparent; the cropped content is gone
    assert!(editor.get_pixel(5, 1) == Rgba::TRANSPARENT);
    assert!(editor.get_pixel(3, 3) == Rgba::TRANSPARENT);
}

#[test]
fn resize_rejects_non_positive_dimensions() {
    let mut editor = CanvasEditor::new(4, 4);

    assert!(!editor.resize(0, 4, ResizeMode::CropExtend));
    assert!(!editor.resize(4, -1, ResizeMode::NearestNeighbour));
    assert!(editor.width() == 4 && editor.height() == 4);
}

#[test]
fn resize_nearest_rescales_content() {
    let mut editor = CanvasEditor::new(2, 2);
    editor.set_pixel(0, 0, Rgba([10, 0, 0, 255]));
    editor.set_pixel(1, 1, Rgba([20, 0, 0, 255]));

    assert!(editor.resize(4, 4, ResizeMode::NearestNeighbour));

    assert!(editor.get_pixel(1, 1) == Rgba([10, 0, 0, 255]));
    assert!(editor.get_pixel(2, 2) == Rgba([20, 0, 0, 255]));
}

#[test]
fn layer_opacity_is_clamped() {
    let mut editor = CanvasEditor::new(4, 4);

    assert!(editor.set_layer_opacity(0, 1.5));
    assert!(editor.layer(0).unwrap().opacity() == 1.0);

    assert!(editor.set_layer_opacity(0, -0.5));
    assert!(editor.layer(0).unwrap().opacity() == 0.0);
}

#[test]
fn rename_layer_changes_the_name() {
    let mut editor = CanvasEditor::new(4, 4);

    assert!(editor.rename_layer(0, "sketch"));
    assert!(editor.layer(0).unwrap().name() == "sketch");
    assert!(!editor.rename_layer(7, "nope"));
}
