// P3-011: Selection by click
// Topmost rectangle wins when rectangles overlap; empty space starts a new rectangle


use roi_annotator::state::{InteractionMode, Modifiers, RoiRect};
use test_helpers::*;

#[test]
fn topmost_rectangle_wins() {
    let (mut canvas, _) = standard_canvas();
    drag_world(&mut canvas, (20.0, 20.0), (100.0, 80.0));
    // Start outside the first box so the press draws instead of selecting
    drag_world(&mut canvas, (150.0, 90.0), (50.0, 40.0));
    assert_eq!(canvas.rects().len(), 2);

    click_world(&mut canvas, 70.0, 60.0);
    assert_eq!(canvas.selected(), Some(1));

    click_world(&mut canvas, 30.0, 70.0);
    assert_eq!(canvas.selected(), Some(0));
    assert_eq!(canvas.rects().len(), 2);
}

#[test]
fn negative_extent_rectangle_is_selectable() {
    let (mut canvas, _) = standard_canvas();
    drag_world(&mut canvas, (120.0, 80.0), (60.0, 30.0));
    assert_eq!(canvas.rects(), &[RoiRect::new(120.0, 80.0, -60.0, -50.0)]);

    click_world(&mut canvas, 90.0, 50.0);
    assert_eq!(canvas.selected(), Some(0));
}

#[test]
fn edges_are_inclusive() {
    let (mut canvas, _) = standard_canvas();
    drag_world(&mut canvas, (20.0, 20.0), (100.0, 80.0));

    click_world(&mut canvas, 20.0, 50.0);
    assert_eq!(canvas.selected(), Some(0));
}

#[test]
fn click_on_empty_space_clears_selection_and_starts_drawing() {
    let (mut canvas, submitter) = standard_canvas();
    drag_world(&mut canvas, (20.0, 20.0), (100.0, 80.0));
    click_world(&mut canvas, 50.0, 50.0);
    assert_eq!(canvas.selected(), Some(0));

    let p = screen_of(&canvas, 150.0, 50.0);
    assert!(canvas.pointer_down(p, Modifiers::NONE));
    assert_eq!(canvas.selected(), None);
    assert!(matches!(canvas.mode(), InteractionMode::Drawing { .. }));

    canvas.pointer_up(p);
    assert!(canvas.mode().is_idle());
    assert_eq!(canvas.rects().len(), 1);
    assert_eq!(submitter.count(), 1);
}

#[test]
fn selecting_does_not_start_drawing() {
    let (mut canvas, _) = standard_canvas();
    drag_world(&mut canvas, (20.0, 20.0), (100.0, 80.0));

    let p = screen_of(&canvas, 50.0, 50.0);
    canvas.pointer_down(p, Modifiers::NONE);
    assert!(canvas.mode().is_idle());
    canvas.pointer_move(screen_of(&canvas, 90.0, 95.0));
    canvas.pointer_up(screen_of(&canvas, 90.0, 95.0));
    assert_eq!(canvas.rects().len(), 1);
}

#[test]
fn pan_modifier_takes_priority_over_selection() {
    let (mut canvas, _) = standard_canvas();
    drag_world(&mut canvas, (20.0, 20.0), (100.0, 80.0));
    click_world(&mut canvas, 50.0, 50.0);

    let p = screen_of(&canvas, 60.0, 60.0);
    canvas.pointer_down(p, Modifiers::CONTROL);
    assert_eq!(canvas.mode(), InteractionMode::Panning { last: p });
    assert_eq!(canvas.selected(), Some(0));
}
