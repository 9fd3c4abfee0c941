use super::*;

fn region(label: &str, pts: &[(f64, f64)], color: [u8; 3]) -> RegionDef {
    RegionDef {
        label: label.to_string(),
        contour: pts.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        color: Rgb8::from(color),
    }
}

fn square() -> RegionDef {
    region(
        "#0",
        &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
        [255, 0, 0],
    )
}

#[test]
fn unit_square_maps_to_600px_box() {
    let scene = normalize(&[square()]).unwrap();

    assert_eq!(scene.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(scene.center(), Point::new(5.0, 5.0));
    assert_eq!(scene.scale(), 60.0);

    let pts = &scene.regions()[0].points;
    assert_eq!(
        pts,
        &vec![
            Point::new(-300.0, 300.0),
            Point::new(300.0, 300.0),
            Point::new(300.0, -300.0),
            Point::new(-300.0, -300.0),
        ]
    );
    assert_eq!(scene.regions()[0].color, Rgb8::RED);
}

#[test]
fn counts_and_order_are_preserved() {
    let input = vec![
        region("a", &[(0.0, 0.0), (3.0, 1.0), (2.0, 5.0)], [1, 2, 3]),
        region("b", &[(7.0, 7.0)], [4, 5, 6]),
        region("c", &[(-4.0, 2.0), (1.0, -9.0)], [7, 8, 9]),
    ];
    let scene = normalize(&input).unwrap();

    assert_eq!(scene.regions().len(), input.len());
    for (src, out) in input.iter().zip(scene.regions()) {
        assert_eq!(src.label, out.label);
        assert_eq!(src.contour.len(), out.points.len());
        assert_eq!(src.color, out.color);
        for (&p, &q) in src.contour.iter().zip(&out.points) {
            assert_eq!(scene.to_canvas(p), q);
        }
    }
    assert_eq!(scene.total_points(), 6);
    assert_eq!(scene.total_frames(), 7);
}

#[test]
fn bounding_box_spans_all_regions_not_each_region() {
    let input = vec![
        region("left", &[(0.0, 0.0), (1.0, 1.0)], [0, 0, 0]),
        region("right", &[(99.0, 49.0), (100.0, 50.0)], [0, 0, 0]),
    ];
    let scene = normalize(&input).unwrap();
    assert_eq!(scene.bounds(), Rect::new(0.0, 0.0, 100.0, 50.0));
    assert_eq!(scene.center(), Point::new(50.0, 25.0));
    assert_eq!(scene.scale(), 6.0);
}

#[test]
fn transformed_extremes_fit_target_and_touch_it_on_one_axis() {
    let input = vec![region(
        "#0",
        &[(-3.0, 2.0), (17.0, 4.5), (5.0, -8.0), (1.0, 11.0)],
        [9, 9, 9],
    )];
    let scene = normalize(&input).unwrap();
    let b = scene.bounds();

    let corners = [
        Point::new(b.x0, b.y0),
        Point::new(b.x1, b.y0),
        Point::new(b.x1, b.y1),
        Point::new(b.x0, b.y1),
    ]
    .map(|p| scene.to_canvas(p));
    let out = Rect::from_points(corners[0], corners[2]).union_pt(corners[1]).union_pt(corners[3]);

    let eps = 1e-9;
    assert!(out.width() <= TARGET_WIDTH + eps);
    assert!(out.height() <= TARGET_HEIGHT + eps);
    assert!(
        (out.width() - TARGET_WIDTH).abs() < eps || (out.height() - TARGET_HEIGHT).abs() < eps
    );
    assert!((out.center().x).abs() < eps && (out.center().y).abs() < eps);
}

#[test]
fn y_axis_is_inverted() {
    let input = vec![region("#0", &[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)], [0, 0, 0])];
    let scene = normalize(&input).unwrap();

    let a = scene.to_canvas(Point::new(1.0, 1.0));
    let b = scene.to_canvas(Point::new(1.0, 2.5));
    assert_eq!(a.x, b.x);
    assert!(((b.y - a.y) - (-scene.scale() * 1.5)).abs() < 1e-9);
}

#[test]
fn custom_target_box_is_honored() {
    let scene = normalize_to(&[square()], Size::new(200.0, 100.0)).unwrap();
    assert_eq!(scene.scale(), 10.0);
    assert_eq!(scene.regions()[0].points[0], Point::new(-50.0, 50.0));
}

#[test]
fn zero_extent_is_degenerate() {
    let flat = region("#0", &[(0.0, 1.0), (5.0, 1.0)], [0, 0, 0]);
    assert!(matches!(
        normalize(&[flat]).unwrap_err(),
        RevealError::DegenerateGeometry(_)
    ));

    let vertical = region("#0", &[(2.0, 0.0), (2.0, 8.0)], [0, 0, 0]);
    assert!(matches!(
        normalize(&[vertical]).unwrap_err(),
        RevealError::DegenerateGeometry(_)
    ));

    let single = region("#0", &[(2.0, 2.0)], [0, 0, 0]);
    assert!(matches!(
        normalize(&[single]).unwrap_err(),
        RevealError::DegenerateGeometry(_)
    ));
}

#[test]
fn huge_finite_coordinates_stay_finite() {
    let wide = region("#0", &[(1e308, 0.0), (1.5e308, 1.0)], [0, 0, 0]);
    let scene = normalize(&[wide]).unwrap();

    assert!(scene.center().x.is_finite());
    let pts = &scene.regions()[0].points;
    assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    assert!((pts[0].x + 300.0).abs() < 1e-6, "{:?}", pts[0]);
    assert!((pts[1].x - 300.0).abs() < 1e-6, "{:?}", pts[1]);
}

#[test]
fn unrepresentable_extent_is_degenerate() {
    let span = region("#0", &[(-1e308, 0.0), (1e308, 1.0)], [0, 0, 0]);
    assert!(matches!(
        normalize(&[span]).unwrap_err(),
        RevealError::DegenerateGeometry(_)
    ));
}

#[test]
fn empty_target_box_is_degenerate() {
    let err = normalize_to(&[square()], Size::new(0.0, 600.0)).unwrap_err();
    assert!(matches!(err, RevealError::DegenerateGeometry(_)), "{err}");
}

#[test]
fn empty_inputs_are_rejected() {
    assert!(matches!(
        normalize(&[]).unwrap_err(),
        RevealError::EmptyInput(_)
    ));
    let hollow = region("hollow", &[], [0, 0, 0]);
    let err = normalize(&[square(), hollow]).unwrap_err();
    assert!(matches!(err, RevealError::MalformedData(_)));
    assert!(err.to_string().contains("hollow"));
}
