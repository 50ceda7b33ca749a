//! Unit tests for fragments and asset resolution.

use super::*;
use camino::Utf8Path;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("cloud-config")]
#[case("docker-compose.yml")]
#[case("lambda-timestamp.js")]
fn bundled_assets_load(#[case] name: &str) {
    let text = AssetSource::bundled().load(name).expect("bundled asset");
    assert!(!text.is_empty());
}

#[test]
fn missing_asset_is_reported_by_name() {
    let err = AssetSource::bundled()
        .load("nginx.conf")
        .expect_err("unknown asset");
    assert!(matches!(err, CfnError::MissingAsset { ref name } if name == "nginx.conf"));
}

#[test]
fn placeholders_are_replaced_recursively() {
    let mut value = json!({
        "Code": {"ZipFile": {"Cog::Asset": "lambda-timestamp.js"}},
        "Parts": [{"Fn::Join": ["", [{"Cog::Asset": "cloud-config"}, "tail"]]}]
    });
    AssetSource::bundled().resolve(&mut value).expect("resolve");

    assert!(value["Code"]["ZipFile"].is_string());
    assert!(value["Parts"][0]["Fn::Join"][1][0].is_string());
    assert_eq!(value["Parts"][0]["Fn::Join"][1][1], json!("tail"));
}

#[test]
fn objects_with_extra_keys_are_not_placeholders() {
    let mut value = json!({"Cog::Asset": "cloud-config", "Other": 1});
    let expected = value.clone();
    AssetSource::bundled().resolve(&mut value).expect("resolve");
    assert_eq!(value, expected);
}

#[test]
fn asset_directory_overrides_bundled_copy() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("cloud-config"), "#cloud-config\n").expect("write asset");
    let path = Utf8Path::from_path(dir.path()).expect("utf8 temp path");

    let assets = AssetSource::from_dir(path).expect("open asset dir");
    assert_eq!(assets.load("cloud-config").expect("override"), "#cloud-config\n");
    let fallback = assets.load("docker-compose.yml").expect("fallback");
    assert!(fallback.contains("services"));
}

#[test]
fn missing_asset_directory_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent");
    let path = Utf8Path::from_path(&missing).expect("utf8 temp path");
    let err = AssetSource::from_dir(path).expect_err("directory does not exist");
    assert!(matches!(err, CfnError::Io { .. }));
}

#[rstest]
#[case::not_object(Fragment::new("list", "[1, 2]"))]
#[case::unknown_section(Fragment::new("mapping", r#"{"Mappings": {}}"#))]
#[case::section_not_object(Fragment::new("resources", r#"{"Resources": []}"#))]
#[case::parameter_not_object(Fragment::new("params", r#"{"Parameters": {"A": "String"}}"#))]
fn malformed_fragments_are_rejected(#[case] fragment: Fragment) {
    let mut template = Template::new();
    let err = fragment
        .merge_into(&mut template, &AssetSource::bundled())
        .expect_err("fragment must be rejected");
    assert!(
        matches!(err, CfnError::InvalidFragment { fragment: ref name, .. } if name == fragment.name()),
        "unexpected error: {err}"
    );
}

#[test]
fn unparsable_fragment_is_a_json_error() {
    let fragment = Fragment::new("broken", "{");
    let err = fragment
        .resolve(&AssetSource::bundled())
        .expect_err("invalid JSON");
    assert!(matches!(err, CfnError::Json(_)));
}

#[test]
fn merge_replaces_existing_entries() {
    let fragment = Fragment::new(
        "bucket",
        r#"{"Resources": {"CogBucket": {"Type": "AWS::S3::Bucket"}}, "Conditions": {"Always": {"Fn::Equals": ["a", "a"]}}}"#,
    );
    let mut template = Template::new();
    template.declare_resource("CogBucket", json!({"Type": "placeholder"}));
    fragment
        .merge_into(&mut template, &AssetSource::bundled())
        .expect("merge");

    assert_eq!(template.resource("CogBucket"), Some(&json!({"Type": "AWS::S3::Bucket"})));
    assert_eq!(
        template.condition("Always").map(Expr::to_value),
        Some(json!({"Fn::Equals": ["a", "a"]}))
    );
}

#[rstest]
#[case(INSTANCE)]
#[case(RDS)]
fn bundled_fragments_resolve_without_placeholders(#[case] fragment: Fragment) {
    let sections = fragment
        .resolve(&AssetSource::bundled())
        .expect("bundled fragment resolves");
    let rendered = Value::Object(sections).to_string();
    assert!(!rendered.contains(ASSET_PLACEHOLDER));
}

#[test]
fn rds_resources_are_conditional() {
    let mut template = Template::new();
    RDS.merge_into(&mut template, &AssetSource::bundled())
        .expect("merge rds");
    let ids: Vec<&str> = template.resource_ids().collect();
    assert!(ids.contains(&"RdsDatabase"));
    for id in ids {
        let resource = template.resource(id).expect("resource exists");
        assert_eq!(resource["Condition"], json!("ProvisionRds"), "{id}");
    }
}
