use super::*;
use crate::foundation::core::{Affine, Point, Rgb8};
use crate::scene::normalize::normalize;
use crate::scene::region::RegionDef;

fn region(pts: &[(f64, f64)], color: [u8; 3]) -> RegionDef {
    RegionDef {
        label: "r".to_string(),
        contour: pts.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        color: Rgb8::from(color),
    }
}

fn square_scene() -> NormalizedScene {
    normalize(&[region(
        &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
        [255, 0, 0],
    )])
    .unwrap()
}

fn run_to_end(scene: &NormalizedScene) -> Vec<FramePlan<'_>> {
    let style = FrameStyle::default();
    let mut cursor = AnimationCursor::new();
    let mut plans = Vec::new();
    while let Some(plan) = cursor.advance(scene, &style) {
        plans.push(plan);
        assert!(plans.len() < 10_000, "cursor never finished");
    }
    plans
}

#[test]
fn square_strokes_four_frames_then_fills_once() {
    let scene = square_scene();
    let plans = run_to_end(&scene);
    assert_eq!(plans.len(), 5);
    assert_eq!(plans.len() as u64, scene.total_frames());

    for (i, plan) in plans[..4].iter().enumerate() {
        assert_eq!(plan.filled_count(), 0);
        let (pts, color) = plan.stroke().unwrap();
        assert_eq!(pts.len(), i + 1);
        assert_eq!(pts, &scene.regions()[0].points[..=i]);
        assert_eq!(color, Rgb8::RED);
    }

    let last = &plans[4];
    assert!(last.stroke().is_none());
    assert_eq!(
        last.ops,
        vec![DrawOp::FillPolygon {
            points: &scene.regions()[0].points,
            color: Rgb8::RED,
        }]
    );
}

#[test]
fn plans_are_centered_on_canvas() {
    let scene = square_scene();
    let style = FrameStyle::default();
    let plan = AnimationCursor::new().advance(&scene, &style).unwrap();
    assert_eq!(plan.origin, Affine::translate((400.0, 400.0)));
    assert_eq!(plan.background, Rgb8::BLACK);
    match &plan.ops[0] {
        DrawOp::StrokePolyline { width, .. } => assert_eq!(*width, 2.0),
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn advance_after_finish_is_noop() {
    let scene = square_scene();
    let style = FrameStyle::default();
    let mut cursor = AnimationCursor::new();
    while cursor.advance(&scene, &style).is_some() {}

    assert!(cursor.is_finished());
    for _ in 0..3 {
        assert!(cursor.advance(&scene, &style).is_none());
        assert_eq!(cursor.state(), CursorState::Finished);
    }
}

#[test]
fn drawing_state_stays_in_bounds() {
    let scene = normalize(&[
        region(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)], [1, 2, 3]),
        region(&[(1.0, 1.0)], [4, 5, 6]),
        region(&[(2.0, 2.0), (3.0, 1.0)], [7, 8, 9]),
    ])
    .unwrap();
    let style = FrameStyle::default();
    let mut cursor = AnimationCursor::new();

    loop {
        if let CursorState::Drawing { region, point } = cursor.state() {
            assert!(region < scene.regions().len());
            assert!(point < scene.regions()[region].points.len());
        }
        if cursor.advance(&scene, &style).is_none() {
            break;
        }
    }
}

#[test]
fn single_point_region_completes_on_first_advance() {
    let scene = normalize(&[
        region(&[(0.0, 0.0), (6.0, 0.0), (6.0, 6.0)], [10, 20, 30]),
        region(&[(3.0, 3.0)], [40, 50, 60]),
    ])
    .unwrap();
    let plans = run_to_end(&scene);

    // 3 stroke frames for the triangle, 1 for the dot, then the fill frame.
    assert_eq!(plans.len(), 5);

    for plan in &plans[..3] {
        assert_eq!(plan.filled_count(), 0);
    }

    let dot = &plans[3];
    assert_eq!(dot.filled_count(), 1);
    let (pts, color) = dot.stroke().unwrap();
    assert_eq!(pts.len(), 1);
    assert_eq!(color, Rgb8::new(40, 50, 60));

    let last = &plans[4];
    assert_eq!(last.filled_count(), 2);
    assert!(last.stroke().is_none());
}

#[test]
fn completed_regions_are_repainted_in_order_every_frame() {
    let scene = normalize(&[
        region(&[(0.0, 0.0), (1.0, 0.0)], [1, 0, 0]),
        region(&[(0.0, 1.0), (1.0, 1.0)], [2, 0, 0]),
        region(&[(0.0, 2.0), (1.0, 2.0)], [3, 0, 0]),
    ])
    .unwrap();
    let plans = run_to_end(&scene);
    assert_eq!(plans.len(), 7);

    let expected_filled = [0, 0, 1, 1, 2, 2, 3];
    for (plan, &filled) in plans.iter().zip(&expected_filled) {
        assert_eq!(plan.filled_count(), filled);
        let colors: Vec<u8> = plan
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillPolygon { color, .. } => Some(color.r),
                _ => None,
            })
            .collect();
        assert_eq!(colors, (1..=filled as u8).collect::<Vec<_>>());
    }
}

#[test]
fn seek_matches_repeated_advance() {
    let scene = square_scene();
    let style = FrameStyle::default();

    let mut stepped = AnimationCursor::new();
    for _ in 0..3 {
        stepped.advance(&scene, &style);
    }

    let mut sought = AnimationCursor::new();
    assert_eq!(sought.seek(&scene, 3), 3);
    assert_eq!(sought, stepped);

    assert_eq!(sought.seek(&scene, 100), 2);
    assert!(sought.is_finished());
}

#[test]
fn message_plan_has_only_text() {
    let style = FrameStyle::default();
    let plan = style.message_plan("Error: nope");
    assert!(plan.has_text());
    assert_eq!(plan.ops.len(), 1);
    assert_eq!(plan.origin, Affine::IDENTITY);
    match &plan.ops[0] {
        DrawOp::Text {
            text, rect, color, ..
        } => {
            assert_eq!(*text, "Error: nope");
            assert_eq!(*color, Rgb8::RED);
            assert_eq!(rect.x0, 10.0);
            assert_eq!(rect.x1, 790.0);
        }
        other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn state_sequence_passes_through_revealed() {
    let scene = square_scene();
    let style = FrameStyle::default();
    let mut cursor = AnimationCursor::new();

    let mut states = vec![cursor.state()];
    while cursor.advance(&scene, &style).is_some() {
        states.push(cursor.state());
    }

    assert_eq!(
        states,
        [
            CursorState::Drawing {
                region: 0,
                point: 0
            },
            CursorState::Drawing {
                region: 0,
                point: 1
            },
            CursorState::Drawing {
                region: 0,
                point: 2
            },
            CursorState::Drawing {
                region: 0,
                point: 3
            },
            CursorState::Revealed,
            CursorState::Finished,
        ]
    );
}
