//! End-to-end checks of IIIF parameter interpretation through the public API.
//!
//! Each test drives an `Interpreter` over a recording `DirectiveList` and
//! asserts on the exact directives it emits.

use iiif_plan::iiif::{
    Dimensions, Directive, DirectiveList, Fit, Interpreter, ParamError, ParamKind, Rect, matches,
    validate,
};
use iiif_plan::request::{ImageRequest, plan};

fn interp(width: u32, height: u32) -> Interpreter<DirectiveList> {
    Interpreter::new(width, height, DirectiveList::new()).unwrap()
}

#[test]
fn square_region_on_landscape_image() {
    let mut i = interp(200, 100);
    i.region("square").unwrap();
    assert_eq!(
        i.pipeline().directives(),
        &[Directive::Extract(Rect {
            left: 50,
            top: 0,
            width: 100,
            height: 100
        })]
    );
}

#[test]
fn percent_region_converts_per_axis() {
    let mut i = interp(200, 100);
    i.region("pct:10,10,50,50").unwrap();
    assert_eq!(
        i.pipeline().directives(),
        &[Directive::Extract(Rect {
            left: 20,
            top: 10,
            width: 100,
            height: 50
        })]
    );
}

#[test]
fn zero_area_region_fails() {
    let mut i = interp(200, 100);
    assert!(matches!(
        i.region("0,0,0,50"),
        Err(ParamError::InvalidRegion { .. })
    ));
}

#[test]
fn emitted_regions_always_have_area() {
    let values = [
        "square",
        "pct:0,0,100,100",
        "pct:50,50,0.1,50",
        "pct:10,10,1,1",
        "1,1,1,1",
        "0,0,5,0",
        "10,10,300,300",
    ];
    for (width, height) in [(200, 100), (100, 200), (7, 3), (1, 1)] {
        for value in values {
            let mut i = interp(width, height);
            let result = i.region(value).map(|_| ());
            match result {
                Ok(()) => {
                    for directive in i.pipeline().directives() {
                        if let Directive::Extract(rect) = directive {
                            assert!(rect.width > 0 && rect.height > 0, "{value} on {width}x{height}");
                        }
                    }
                    let dims = i.dimensions();
                    assert!(dims.width() > 0 && dims.height() > 0);
                }
                Err(err) => assert!(
                    matches!(err, ParamError::InvalidRegion { .. }),
                    "{value} on {width}x{height}: {err}"
                ),
            }
        }
    }
}

#[test]
fn width_only_size_uses_cover() {
    let mut i = interp(640, 480);
    i.size("50,").unwrap();
    assert_eq!(
        i.pipeline().directives(),
        &[Directive::Resize {
            width: Some(50),
            height: None,
            fit: Fit::Cover
        }]
    );
}

#[test]
fn best_fit_size_uses_inside() {
    let mut i = interp(640, 480);
    i.size("!50,50").unwrap();
    assert!(matches!(
        i.pipeline().directives(),
        [Directive::Resize {
            fit: Fit::Inside,
            ..
        }]
    ));
}

#[test]
fn percent_size_follows_region() {
    let mut i = interp(200, 100);
    i.region("0,0,100,100").unwrap().size("pct:50").unwrap();
    assert_eq!(
        i.pipeline().directives()[1],
        Directive::Resize {
            width: Some(50),
            height: None,
            fit: Fit::Cover
        }
    );
}

#[test]
fn mirrored_rotation_flips_first() {
    let mut i = interp(200, 100);
    i.rotation("!90").unwrap();
    assert_eq!(
        i.pipeline().directives(),
        &[Directive::FlipHorizontal, Directive::Rotate { degrees: 90.0 }]
    );
}

#[test]
fn zero_rotation_emits_nothing() {
    let mut i = interp(200, 100);
    i.rotation("0").unwrap();
    assert!(i.pipeline().is_empty());
}

#[test]
fn quality_directives() {
    let mut i = interp(200, 100);
    i.quality("bitonal").unwrap();
    assert_eq!(i.pipeline().directives(), &[Directive::Threshold]);

    let mut i = interp(200, 100);
    i.quality("color").unwrap();
    assert!(i.pipeline().is_empty());
}

#[test]
fn malformed_inputs_name_their_kind() {
    let mut i = interp(200, 100);
    let cases = [
        (i.region("abc").unwrap_err(), ParamKind::Region),
        (i.size("-5,").unwrap_err(), ParamKind::Size),
        (i.rotation("x").unwrap_err(), ParamKind::Rotation),
        (i.quality("purple").unwrap_err(), ParamKind::Quality),
        (i.format("bmp").unwrap_err(), ParamKind::Format),
    ];
    for (err, kind) in cases {
        assert!(
            matches!(err, ParamError::InvalidParameter { kind: k, .. } if k == kind),
            "{err}"
        );
    }
    assert!(i.pipeline().is_empty());
}

#[test]
fn validation_is_stable() {
    let samples = [
        "full", "square", "max", "pct:50", "50,", ",50", "!50,50", "0", "!90", "22.5", "gray",
        "bitonal", "jpg", "webp", "abc", "-5,", "x", "purple", "bmp", "", "pct:", "!",
    ];
    for kind in ParamKind::ALL {
        for value in samples {
            let first = matches(kind, value);
            for _ in 0..3 {
                assert_eq!(matches(kind, value), first, "{kind} '{value}'");
                assert_eq!(validate(kind, value).is_ok(), first, "{kind} '{value}'");
            }
        }
    }
}

#[test]
fn full_request_plan() {
    let request = ImageRequest::from_path("ark:/12345/x/pct:0,0,50,100/!50,50/!0/bitonal.gif").unwrap();
    let dims = Dimensions::new(400, 300).unwrap();
    let directives = plan(dims, &request).unwrap();

    let json = serde_json::to_value(&directives).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"op": "extract", "left": 0, "top": 0, "width": 200, "height": 300},
            {"op": "resize", "width": 50, "height": 50, "fit": "inside"},
            {"op": "flip_horizontal"},
            {"op": "threshold"},
            {"op": "set_output_format", "format": "gif"},
        ])
    );
}
