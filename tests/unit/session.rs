use super::*;
use crate::placement::state::PointerButton;

fn loaded_session() -> Session {
    let mut s = Session::new();
    s.load(
        AssetCategory::Base,
        PixelBuffer::filled(64, 64, [200, 200, 200, 255]).unwrap(),
    );
    s.load(
        AssetCategory::GradientControl,
        PixelBuffer::filled(64, 64, [255, 0, 0, 255]).unwrap(),
    );
    s.set_endpoints(Rgb8::new(255, 0, 0), Rgb8::new(0, 0, 255));
    s
}

#[test]
fn recolor_requires_base_and_gradient() {
    let mut s = Session::new();
    let err = s.apply_team_color().unwrap_err();
    assert!(matches!(err, TeamColorError::InputMissing(ref m) if m == "base texture"));

    s.load(AssetCategory::Base, PixelBuffer::new(2, 2).unwrap());
    let err = s.apply_team_color().unwrap_err();
    assert!(matches!(err, TeamColorError::InputMissing(ref m) if m == "gradient-control texture"));
    assert!(s.output().is_none());
}

#[test]
fn recolor_produces_output() {
    let mut s = loaded_session();
    let out = s.apply_team_color().unwrap();
    assert_eq!(out.get(10, 10), Some([0, 0, 213, 255]));
    assert!(s.glow_output().is_none());
}

#[test]
fn glow_only_in_alternate_mode_with_control() {
    let mut s = loaded_session();
    s.load(
        AssetCategory::GlowControl,
        PixelBuffer::filled(8, 8, [0, 255, 0, 255]).unwrap(),
    );
    s.apply_team_color().unwrap();
    assert!(s.glow_output().is_none());

    s.set_mode(Mode::Alternate);
    s.apply_team_color().unwrap();
    let glow = s.glow_output().unwrap();
    assert_eq!(glow.dimensions(), (64, 64));
    assert_eq!(glow.get(0, 0), Some([0, 0, 213, 255]));
}

#[test]
fn preset_sets_endpoints() {
    let book = PresetBook::from_json_str(
        r##"{ "Kushan": { "primary": "#aa2200", "secondary": "#ffcc00" } }"##,
    )
    .unwrap();
    let mut s = Session::new();
    s.apply_preset(&book, "Kushan").unwrap();
    assert_eq!(
        s.endpoints(),
        (Rgb8::new(0xaa, 0x22, 0x00), Rgb8::new(0xff, 0xcc, 0x00))
    );
    assert!(s.apply_preset(&book, "Nobody").is_err());
}

#[test]
fn eyedropper_samples_gradient_texture() {
    let mut s = Session::new();
    let mut gradient = PixelBuffer::filled(100, 50, [0, 0, 0, 255]).unwrap();
    gradient.put(99, 49, [12, 34, 56, 255]);
    s.load(AssetCategory::GradientControl, gradient);

    // 100x50 in a 200x150 preview: 200x100 shown at y=25.
    let mapping = CoordinateMapper::fit(100, 50, 200.0, 150.0);
    assert_eq!(
        s.pick_team_color(TeamSlot::Secondary, Point::new(199.0, 124.0), &mapping),
        Some(Rgb8::new(12, 34, 56))
    );
    assert_eq!(s.team_colors().1, Rgb8::new(12, 34, 56));
    assert_eq!(
        s.pick_team_color(TeamSlot::Primary, Point::new(10.0, 5.0), &mapping),
        None
    );
    assert_eq!(s.team_colors().0, Rgb8::new(255, 0, 0));
}

#[test]
fn badge_placement_needs_badge_and_output() {
    let mut s = loaded_session();
    let err = s.begin_badge_placement(800.0, 600.0).unwrap_err();
    assert!(matches!(err, TeamColorError::InputMissing(_)));

    s.load(
        AssetCategory::Badge,
        PixelBuffer::filled(16, 16, [255, 255, 255, 255]).unwrap(),
    );
    let err = s.begin_badge_placement(800.0, 600.0).unwrap_err();
    assert!(matches!(err, TeamColorError::InputMissing(ref m) if m == "recolored output"));

    assert!(matches!(
        s.commit_badge().unwrap_err(),
        TeamColorError::InputMissing(_)
    ));
}

#[test]
fn badge_commit_mutates_output_and_closes_placement() {
    let mut s = loaded_session();
    s.load(
        AssetCategory::Badge,
        PixelBuffer::filled(16, 16, [255, 255, 255, 255]).unwrap(),
    );
    s.apply_team_color().unwrap();
    let before = s.output().unwrap().clone();

    // 64px output in a 640x640 area: 10 units per pixel.
    let placement = s.begin_badge_placement(640.0, 640.0).unwrap();
    let r = placement.rect();
    let grab = Point::new(r.x + 5.0, r.y + 5.0);
    placement.press(PointerButton::Primary, grab);
    placement.move_to(Point::new(grab.x - 1000.0, grab.y - 1000.0));
    placement.release();
    assert_eq!(s.placement().unwrap().rect().x, 0.0);

    let outcome = s.commit_badge().unwrap();
    assert_eq!(
        outcome,
        CommitOutcome::Applied(crate::geometry::mapping::SourceRect {
            x: 0,
            y: 0,
            width: 12,
            height: 12,
        })
    );
    assert!(s.placement().is_none());
    let out = s.output().unwrap();
    assert_ne!(out, &before);
    assert!(out.get(0, 0).unwrap().iter().all(|&c| c >= 250));
    assert_eq!(out.get(20, 20), before.get(20, 20));
}

#[test]
fn cancel_discards_placement_without_touching_output() {
    let mut s = loaded_session();
    s.load(
        AssetCategory::Badge,
        PixelBuffer::filled(16, 16, [255, 255, 255, 255]).unwrap(),
    );
    s.apply_team_color().unwrap();
    let before = s.output().unwrap().clone();
    s.begin_badge_placement(640.0, 640.0).unwrap();
    assert!(s.placement_mapping().is_some());
    s.cancel_badge();
    assert!(s.placement().is_none());
    assert_eq!(s.output().unwrap(), &before);
}

fn session_with_open_placement() -> Session {
    let mut s = loaded_session();
    s.load(
        AssetCategory::Badge,
        PixelBuffer::filled(16, 16, [255, 255, 255, 255]).unwrap(),
    );
    s.apply_team_color().unwrap();
    s.begin_badge_placement(800.0, 600.0).unwrap();
    s
}

#[test]
fn unloading_badge_closes_placement_and_keeps_output() {
    let mut s = session_with_open_placement();
    let before = s.output().unwrap().clone();
    assert!(s.unload(AssetCategory::Badge).is_some());
    assert!(s.placement().is_none());

    let err = s.commit_badge().unwrap_err();
    assert!(matches!(err, TeamColorError::InputMissing(ref m) if m == "badge placement"));
    assert_eq!(s.output().unwrap(), &before);
}

#[test]
fn replacing_badge_closes_placement() {
    let mut s = session_with_open_placement();
    s.load(
        AssetCategory::Badge,
        PixelBuffer::filled(64, 16, [0, 255, 0, 255]).unwrap(),
    );
    assert!(s.placement().is_none());

    // A fresh placement picks up the new aspect ratio.
    let r = s.begin_badge_placement(800.0, 600.0).unwrap().rect();
    assert!((r.width / r.height - 4.0).abs() < 1e-9);
}

#[test]
fn other_asset_changes_keep_placement_open() {
    let mut s = session_with_open_placement();
    s.load(
        AssetCategory::Mask,
        PixelBuffer::filled(4, 4, [0, 0, 0, 255]).unwrap(),
    );
    s.unload(AssetCategory::Mask);
    assert!(s.placement().is_some());
    assert!(s.commit_badge().is_ok());
    assert!(s.placement().is_none());
}
