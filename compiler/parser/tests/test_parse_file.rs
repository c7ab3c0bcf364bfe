use std::fs;

use ast::{classify, DeclarationKind, Variant};
use parser::{parse_file, AstProvider, ManifestParser, ParseError};

#[test]
fn test_parse_definition_from_disk() {
    let tmp = tempfile::tempdir().expect("Failed to create temporary directory");
    let manifest = tmp.path().join("one_define.pp");
    fs::write(
        &manifest,
        "# one define\ndefine one_resource::one_define(String $one) {\n  notify { $one: }\n}\n",
    )
    .expect("Failed to write manifest");

    let ast = ManifestParser.parse(&manifest).expect("manifest should parse");
    assert_eq!(ast.path(), manifest.as_path());
    let kind = classify(&ast).expect("manifest has a declaration");
    assert_eq!(Variant::from_kind(&kind), Some(Variant::Definition));

    let body = ast.body().expect("manifest has a body");
    assert_eq!(body.name, "one_resource::one_define");
    assert_eq!(body.parameters.len(), 1);
    assert_eq!(body.parameters[0].name, "one");
    assert_eq!(body.parameters[0].type_expr.as_deref(), Some("String"));
    assert!(body.parameters[0].default.is_none());
}

#[test]
fn test_only_other_declarations() {
    let tmp = tempfile::tempdir().expect("Failed to create temporary directory");
    let manifest = tmp.path().join("alias.pp");
    fs::write(&manifest, "type Mod::Port = Integer[1, 65535]\n").expect("Failed to write manifest");

    let ast = parse_file(&manifest).expect("manifest should parse");
    assert_eq!(classify(&ast), Ok(DeclarationKind::Other("type".into())));
}

#[test]
fn test_missing_file_is_io_error() {
    let tmp = tempfile::tempdir().expect("Failed to create temporary directory");
    let err = parse_file(&tmp.path().join("nope.pp")).expect_err("file does not exist");
    assert!(matches!(err, ParseError::Io { .. }));
}

#[test]
fn test_empty_manifest_parses_to_empty_ast() {
    let tmp = tempfile::tempdir().expect("Failed to create temporary directory");
    let manifest = tmp.path().join("empty.pp");
    fs::write(&manifest, "# nothing here\n").expect("Failed to write manifest");

    let ast = parse_file(&manifest).expect("comments only should parse");
    assert!(ast.content().is_empty());
    assert!(classify(&ast).is_err());
}
