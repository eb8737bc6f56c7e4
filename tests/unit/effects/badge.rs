use super::*;
use crate::geometry::mapping::CoordinateMapper;

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 1)
}

#[test]
fn over_straight_edge_cases() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over_straight(dst, [200, 200, 200, 0]), dst);
    assert_eq!(over_straight(dst, [1, 2, 3, 255]), [1, 2, 3, 255]);
    assert_eq!(over_straight([0, 0, 0, 0], [100, 150, 200, 128]), [100, 150, 200, 128]);
}

#[test]
fn over_straight_half_alpha_on_opaque() {
    let out = over_straight([0, 0, 0, 255], [255, 255, 255, 128]);
    assert_eq!(out[3], 255);
    assert!(out[0].abs_diff(128) <= 1, "{out:?}");
}

#[test]
fn paste_over_clips_negative_offsets() {
    let mut dst = PixelBuffer::filled(4, 4, [0, 0, 0, 255]).unwrap();
    let src = PixelBuffer::filled(3, 3, [255, 0, 0, 255]).unwrap();
    paste_over(&mut dst, &src, -2, -1);
    assert_eq!(dst.get(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(dst.get(0, 1), Some([255, 0, 0, 255]));
    assert_eq!(dst.get(1, 0), Some([0, 0, 0, 255]));
    assert_eq!(dst.get(0, 2), Some([0, 0, 0, 255]));

    let before = dst.clone();
    paste_over(&mut dst, &src, 10, 10);
    assert_eq!(dst, before);
}

#[test]
fn commit_below_ten_pixels_leaves_target_untouched() {
    // 48px image shown 600 units wide: 0.08 px/unit, so a 120-unit badge is 9px.
    let mapping = CoordinateMapper::fit(48, 48, 800.0, 600.0);
    let placement = BadgePlacement::new(&mapping, 32, 32).unwrap();
    let badge = PixelBuffer::filled(32, 32, [255, 0, 0, 255]).unwrap();
    let mut target = PixelBuffer::filled(48, 48, [1, 2, 3, 255]).unwrap();
    let before = target.as_bytes().to_vec();

    let outcome = commit_badge(&placement, &badge, &mapping, &mut target).unwrap();
    match outcome {
        CommitOutcome::Skipped(r) => assert_eq!(r.width, 9),
        other => panic!("expected skip, got {other:?}"),
    }
    assert_eq!(target.as_bytes(), before.as_slice());
}

#[test]
fn commit_maps_display_rect_into_source_pixels() {
    // 500px image shown 1000 units wide: 0.5 px/unit.
    let mapping = CoordinateMapper::fit(500, 500, 1000.0, 1000.0);
    let placement = BadgePlacement::new(&mapping, 20, 20).unwrap();
    let badge = PixelBuffer::filled(20, 20, [255, 0, 0, 255]).unwrap();
    let mut target = PixelBuffer::filled(500, 500, [0, 0, 255, 255]).unwrap();

    let outcome = commit_badge(&placement, &badge, &mapping, &mut target).unwrap();
    assert_eq!(
        outcome,
        CommitOutcome::Applied(SourceRect {
            x: 200,
            y: 200,
            width: 100,
            height: 100,
        })
    );
    assert!(close(target.get(250, 250).unwrap(), [255, 0, 0, 255]));
    assert!(close(target.get(200, 200).unwrap(), [255, 0, 0, 255]));
    assert_eq!(target.get(199, 250), Some([0, 0, 255, 255]));
    assert_eq!(target.get(300, 250), Some([0, 0, 255, 255]));
}

#[test]
fn commit_applies_opacity() {
    let mapping = CoordinateMapper::fit(500, 500, 1000.0, 1000.0);
    let mut placement = BadgePlacement::new(&mapping, 20, 20).unwrap();
    placement.set_opacity(0);
    let badge = PixelBuffer::filled(20, 20, [255, 0, 0, 255]).unwrap();
    let mut target = PixelBuffer::filled(500, 500, [0, 0, 255, 255]).unwrap();
    let before = target.clone();

    let outcome = commit_badge(&placement, &badge, &mapping, &mut target).unwrap();
    assert!(matches!(outcome, CommitOutcome::Applied(_)));
    assert_eq!(target, before);
}
