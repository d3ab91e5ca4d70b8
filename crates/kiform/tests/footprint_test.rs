//! Integration tests for the FootprintCodec API
//!
//! These tests decode the fixtures under `tests/fixtures` and compare the
//! re-encoded text byte for byte against the expected layout.

use std::{fs, path::PathBuf};

use float_cmp::approx_eq;

use kiform::{
    ErrorCategory, FootprintCodec, KiformError,
    factory::FootprintIds,
    footprint::{Attribute, Footprint, MountType},
    graphics::{GraphicItem, TextKind},
    pad::{PadShape, PadType},
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture(name)).unwrap_or_else(|err| panic!("failed to read {name}: {err}"))
}

/// Decode `input` and compare the encoded text with `expected`.
fn assert_reformats(input: &str, expected: &str) {
    let codec = FootprintCodec::default();
    let footprint = codec
        .decode_path(fixture(input))
        .unwrap_or_else(|err| panic!("failed to decode {input}: {err}"));
    let text = codec.encode(&footprint);
    assert_eq!(text, read_fixture(expected), "re-encoded {input} differs from {expected}");

    let again = codec.decode(&text).expect("re-encoded text should decode");
    assert_eq!(again, footprint, "{input} did not survive a round trip");
    assert_eq!(codec.encode(&again), text, "encoding {input} is not idempotent");
}

#[test]
fn test_all_footprint_items() {
    assert_reformats("all_footprint_items.kicad_mod", "all_footprint_items.kicad_mod");
}

#[test]
fn test_all_footprint_items_content() {
    let footprint = FootprintCodec::default()
        .decode_path(fixture("all_footprint_items.kicad_mod"))
        .expect("Failed to decode");

    assert!(footprint.locked);
    assert_eq!(footprint.version, Some(20211014));
    assert_eq!(footprint.generator.as_deref(), Some("pcbnew"));
    assert_eq!(footprint.properties.len(), 2);
    assert_eq!(footprint.properties.get("Sheetname").map(String::as_str), Some(""));
    assert!(footprint.attributes.contains(Attribute::BoardOnly));
    assert_eq!(footprint.mount_type(), MountType::Smd);
    assert_eq!(footprint.graphic_items.len(), 11);
    assert_eq!(footprint.pads.len(), 6);
    assert_eq!(footprint.models.len(), 2);

    let user = footprint.text(TextKind::User).expect("user text");
    assert!(user.hide);
    assert!(user.position.unlocked());
    assert!(user.effects.font.bold);

    let pad = footprint.pad("3").expect("pad 3");
    assert_eq!(pad.kind, PadType::ThruHole);
    assert_eq!(pad.shape, PadShape::Oval);
    assert!(pad.remove_unused_layers);
    let drill = pad.drill.as_ref().expect("drill");
    assert!(drill.oval);
    assert!(approx_eq!(f64, drill.diameter.unwrap_or_default(), 0.6, ulps = 2));
    assert!(approx_eq!(f64, pad.position.x(), 2.54, ulps = 2));

    let custom = footprint.pad("5").expect("pad 5");
    assert_eq!(custom.primitives.as_ref().map(Vec::len), Some(1));

    let opacity = footprint.models[1].opacity.expect("opacity");
    assert!(approx_eq!(f64, opacity, 0.5, ulps = 2));
    assert!(matches!(footprint.graphic_items[9], GraphicItem::Poly(_)));
}

#[test]
fn test_footprint_pad_new_lines() {
    assert_reformats("pad_new_lines.kicad_mod", "pad_new_lines.expected.kicad_mod");
}

#[test]
fn test_unknown_trailing_pad_nodes_are_kept() {
    let footprint = FootprintCodec::default()
        .decode_path(fixture("pad_new_lines.kicad_mod"))
        .expect("Failed to decode");
    let pad = footprint.pad("5").expect("pad 5");
    assert_eq!(pad.extra.len(), 1);
    assert_eq!(pad.extra[0].tag(), "teardrop_keepout");
}

#[test]
fn test_footprint_empty_attributes() {
    assert_reformats("empty_attributes.kicad_mod", "empty_attributes.expected.kicad_mod");
}

#[test]
fn test_legacy_module() {
    assert_reformats("legacy_module.kicad_mod", "legacy_module.expected.kicad_mod");

    let footprint = FootprintCodec::default()
        .decode_path(fixture("legacy_module.kicad_mod"))
        .expect("Failed to decode");
    assert!(approx_eq!(f64, footprint.models[0].offset.x, 25.4, ulps = 2));
    assert_eq!(footprint.reference(), Some("REF**"));
}

fn assert_created(mount: MountType, tedit: &str, expected: &str) {
    let codec = FootprintCodec::default();
    let mut footprint = codec.create_new(mount, FootprintIds::default());
    footprint.tedit = Some(tedit.to_string());

    assert_eq!(footprint.mount_type(), mount);
    assert_eq!(codec.encode(&footprint), read_fixture(expected));
}

#[test]
fn test_create_new_footprint_smd() {
    assert_created(MountType::Smd, "6328915F", "create_new_smd.expected.kicad_mod");
}

#[test]
fn test_create_new_footprint_tht() {
    assert_created(MountType::Tht, "63289145", "create_new_tht.expected.kicad_mod");
}

#[test]
fn test_create_new_footprint_other() {
    assert_created(MountType::Other, "6328916A", "create_new_other.expected.kicad_mod");
}

#[test]
fn test_bare_fields_with_spaces_or_empty_are_quoted() {
    let codec = FootprintCodec::default();
    let mut footprint = Footprint::new("R_0603");
    footprint.generator = Some("my tool".to_string());
    footprint.tedit = Some(String::new());
    footprint.tstamp = Some("(odd)".to_string());

    let text = codec.encode(&footprint);
    assert!(text.contains("(generator \"my tool\")"));
    assert!(text.contains("(tedit \"\")"));

    let decoded = codec.decode(&text).expect("quoted fields should decode");
    assert_eq!(decoded, footprint);
}

#[test]
fn test_unterminated_string_is_syntax_error() {
    let source = "(footprint \"R_0603\n  (layer \"F.Cu\")\n)\n";
    let err = FootprintCodec::default()
        .decode(source)
        .expect_err("unterminated string should fail");
    assert_eq!(err.kind(), ErrorCategory::Syntax);
}

#[test]
fn test_schema_and_value_errors() {
    let codec = FootprintCodec::default();

    let err = codec
        .decode("(footprint \"X\" (pad \"1\" smd rect (at 0 0) (size 1 1)))")
        .expect_err("pad without layers");
    assert_eq!(err.kind(), ErrorCategory::Schema);

    let err = codec
        .decode("(footprint \"X\" (pad \"1\" smd rect (at zero 0) (size 1 1) (layers \"F.Cu\")))")
        .expect_err("non-numeric coordinate");
    assert_eq!(err.kind(), ErrorCategory::Value);
}

#[test]
fn test_decode_path_missing_file() {
    let err = FootprintCodec::default()
        .decode_path(fixture("does_not_exist.kicad_mod"))
        .expect_err("missing file");
    assert!(matches!(err, KiformError::Io(_)));
}

#[test]
fn test_encode_to_path_replaces_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("out.kicad_mod");
    fs::write(&path, "stale").expect("Failed to seed file");

    let codec = FootprintCodec::default();
    let footprint = codec
        .decode_path(fixture("pad_new_lines.kicad_mod"))
        .expect("Failed to decode");
    codec
        .encode_to_path(&footprint, &path)
        .expect("Failed to write");

    assert_eq!(
        fs::read_to_string(&path).expect("Failed to read back"),
        read_fixture("pad_new_lines.expected.kicad_mod")
    );
    assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 1);
}

#[test]
fn test_encode_to_path_missing_directory() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("missing").join("out.kicad_mod");

    let codec = FootprintCodec::default();
    let footprint = codec.create_new(MountType::Smd, FootprintIds::new("R"));
    let err = codec
        .encode_to_path(&footprint, &path)
        .expect_err("directory does not exist");
    assert_eq!(err.kind(), ErrorCategory::Io);
    assert!(!path.exists());
}
