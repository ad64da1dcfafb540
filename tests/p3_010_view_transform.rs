// P3-010: View transform
// Round trips between screen and image space, cursor-anchored zoom, scale clamping


use roi_annotator::state::{Point, ViewTransform, ZoomDirection};
use test_helpers::approx_eq;

fn transforms() -> Vec<ViewTransform> {
    let mut views = Vec::new();
    for (scale, ox, oy) in [(1.0, 0.0, 0.0), (4.0, 0.0, 100.0), (0.2, -350.5, 12.25), (5.0, 1234.0, -77.0)] {
        let mut view = ViewTransform::new(0.2, 5.0, 1.1);
        view.scale = scale;
        view.offset_x = ox;
        view.offset_y = oy;
        views.push(view);
    }
    views
}

#[test]
fn screen_world_round_trip() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(-250.0, 33.5),
        Point::new(199.9, 99.9),
    ];
    for view in transforms() {
        for p in points {
            let back = view.screen_to_world(view.world_to_screen(p));
            assert!(approx_eq(back.x, p.x) && approx_eq(back.y, p.y), "{p:?} -> {back:?} under {view:?}");
        }
    }
}

#[test]
fn zoom_keeps_point_under_cursor() {
    let cursors = [Point::new(0.0, 0.0), Point::new(400.0, 300.0), Point::new(17.0, 590.0)];
    for mut view in transforms() {
        for cursor in cursors {
            for direction in [ZoomDirection::In, ZoomDirection::Out] {
                let world_before = view.screen_to_world(cursor);
                view.zoom_at(cursor, direction);
                let screen_after = view.world_to_screen(world_before);
                assert!(
                    approx_eq(screen_after.x, cursor.x) && approx_eq(screen_after.y, cursor.y),
                    "cursor {cursor:?} drifted to {screen_after:?}"
                );
            }
        }
    }
}

#[test]
fn zoom_step_is_ten_percent() {
    let mut view = ViewTransform::new(0.2, 5.0, 1.1);
    view.zoom_at(Point::new(0.0, 0.0), ZoomDirection::In);
    assert!(approx_eq(view.scale, 1.1));
    view.zoom_at(Point::new(0.0, 0.0), ZoomDirection::Out);
    view.zoom_at(Point::new(0.0, 0.0), ZoomDirection::Out);
    assert!(approx_eq(view.scale, 1.0 / 1.1));
}

#[test]
fn scale_is_clamped_for_any_zoom_sequence() {
    let mut view = ViewTransform::new(0.2, 5.0, 1.1);
    let cursor = Point::new(321.0, 123.0);

    for _ in 0..100 {
        view.zoom_at(cursor, ZoomDirection::In);
        assert!(view.scale <= view.max_scale());
    }
    assert_eq!(view.scale, 5.0);

    for i in 0..200 {
        let direction = if i % 7 == 0 { ZoomDirection::In } else { ZoomDirection::Out };
        view.zoom_at(cursor, direction);
        assert!(view.scale >= view.min_scale() && view.scale <= view.max_scale());
    }
    assert_eq!(view.scale, 0.2);
}

#[test]
fn clamped_zoom_still_anchors_cursor() {
    let mut view = ViewTransform::new(0.2, 5.0, 1.1);
    view.scale = 4.9;
    let cursor = Point::new(250.0, 80.0);
    let world = view.screen_to_world(cursor);
    view.zoom_at(cursor, ZoomDirection::In);
    assert_eq!(view.scale, 5.0);
    let back = view.world_to_screen(world);
    assert!(approx_eq(back.x, cursor.x) && approx_eq(back.y, cursor.y));
}

#[test]
fn pan_is_unclamped() {
    let mut view = ViewTransform::new(0.2, 5.0, 1.1);
    view.pan(-10_000.0, 25_000.0);
    assert_eq!(view.offset_x, -10_000.0);
    assert_eq!(view.offset_y, 25_000.0);
    assert_eq!(view.scale, 1.0);
}
