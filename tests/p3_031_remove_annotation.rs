// P3-031: Removing annotations
// Trash icon, delete-selected and reset


use roi_annotator::canvas::AnnotationCanvas;
use roi_annotator::state::{Modifiers, Point, RoiRect};
use test_helpers::*;

const A: RoiRect = RoiRect { x: 10.0, y: 10.0, w: 30.0, h: 30.0 };
const B: RoiRect = RoiRect { x: 60.0, y: 10.0, w: 30.0, h: 30.0 };
const C: RoiRect = RoiRect { x: 110.0, y: 10.0, w: 30.0, h: 30.0 };

fn three_rects() -> AnnotationCanvas {
    let (mut canvas, _) = standard_canvas();
    for r in [A, B, C] {
        drag_world(&mut canvas, (r.x, r.y), (r.x + r.w, r.y + r.h));
    }
    assert_eq!(canvas.rects(), &[A, B, C]);
    canvas
}

#[test]
fn trash_click_removes_exactly_that_rectangle() {
    let mut canvas = three_rects();
    click_world(&mut canvas, 75.0, 25.0);
    assert_eq!(canvas.selected(), Some(1));

    // B's glyph sits on its top-right corner
    let glyph = screen_of(&canvas, 90.0, 10.0);
    assert!(canvas.pointer_down(glyph, Modifiers::NONE));
    assert_eq!(canvas.rects(), &[A, C]);
    assert_eq!(canvas.selected(), None);
    assert!(canvas.mode().is_idle());
}

#[test]
fn trash_hit_uses_screen_radius() {
    let mut canvas = three_rects();
    let glyph = screen_of(&canvas, 40.0, 10.0);

    // 11px away still hits, 13px away does not
    let near = Point::new(glyph.x + 11.0, glyph.y);
    let far = Point::new(glyph.x, glyph.y + 13.0);
    assert_eq!(canvas.trash_hit(near), Some(0));
    assert_eq!(canvas.trash_hit(far), None);

    canvas.pointer_down(far, Modifiers::NONE);
    assert_eq!(canvas.rects().len(), 3);
}

#[test]
fn trash_takes_priority_over_pan_modifier() {
    let mut canvas = three_rects();
    let glyph = screen_of(&canvas, 140.0, 10.0);
    canvas.pointer_down(glyph, Modifiers::CONTROL);
    assert_eq!(canvas.rects(), &[A, B]);
    assert!(canvas.mode().is_idle());
}

#[test]
fn overlapping_glyphs_delete_the_topmost() {
    let (mut canvas, _) = standard_canvas();
    drag_world(&mut canvas, (10.0, 10.0), (60.0, 60.0));
    // Same top-right corner, drawn from outside the first box
    drag_world(&mut canvas, (80.0, 10.0), (60.0, 90.0));
    let first = canvas.rects()[0];
    assert_eq!(canvas.rects()[1].delete_anchor(), first.delete_anchor());

    canvas.pointer_down(screen_of(&canvas, 60.0, 10.0), Modifiers::NONE);
    assert_eq!(canvas.rects(), &[first]);
}

#[test]
fn hover_tracks_glyph_under_pointer() {
    let mut canvas = three_rects();
    assert!(canvas.pointer_move(screen_of(&canvas, 140.0, 10.0)));
    assert_eq!(canvas.hovered_trash(), Some(2));

    canvas.pointer_move(screen_of(&canvas, 100.0, 90.0));
    assert_eq!(canvas.hovered_trash(), None);
    assert_eq!(canvas.rects().len(), 3);
    assert_eq!(canvas.selected(), None);

    canvas.pointer_move(screen_of(&canvas, 40.0, 10.0));
    assert_eq!(canvas.hovered_trash(), Some(0));
    canvas.pointer_leave();
    assert_eq!(canvas.hovered_trash(), None);
}

#[test]
fn hover_index_follows_deletion() {
    let mut canvas = three_rects();
    canvas.pointer_down(screen_of(&canvas, 40.0, 10.0), Modifiers::NONE);
    assert_eq!(canvas.rects(), &[B, C]);

    canvas.pointer_move(screen_of(&canvas, 140.0, 10.0));
    assert_eq!(canvas.hovered_trash(), Some(1));
}

#[test]
fn delete_selected_removes_selection_only() {
    let mut canvas = three_rects();
    assert!(!canvas.delete_selected());
    assert_eq!(canvas.rects().len(), 3);

    click_world(&mut canvas, 20.0, 30.0);
    assert_eq!(canvas.selected(), Some(0));
    assert!(canvas.delete_selected());
    assert_eq!(canvas.rects(), &[B, C]);
    assert_eq!(canvas.selected(), None);
}

#[test]
fn reset_clears_all_rectangles() {
    let mut canvas = three_rects();
    click_world(&mut canvas, 120.0, 30.0);
    assert!(canvas.reset());
    assert!(canvas.rects().is_empty());
    assert_eq!(canvas.selected(), None);
    assert_eq!(canvas.view().scale, 4.0);
}
