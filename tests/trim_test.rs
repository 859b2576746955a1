//! Integration tests for trimming SVG files end to end.

use std::fs;

use unfooter::{
    inspect_file, trim_bytes, trim_footer, Error, HeightPolicy, OutputMode, TrimOptions, Unfooter,
};

const CHART: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="850" height="600" viewBox="0 0 850 600">
  <defs><path id="p" d="M0 0L10 10"/></defs>
  <rect y="50" height="100" fill="#f00"/>
  <use xlink:href="#p" title="A &amp; B"/>
  <g id="footer" transform="translate(0, 540)">
    <text y="550">Source: Example &lt;2024&gt;</text>
  </g>
  <image y="580" height="20" xlink:href="logo.png"/>
</svg>"##;

const TRIMMED: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="850" height="160" viewBox="0 0 850 160">
  <defs><path id="p" d="M0 0L10 10"/></defs>
  <rect y="50" height="100" fill="#f00"/>
  <use xlink:href="#p" title="A &amp; B"/>
</svg>"##;

#[test]
fn test_trim_chart_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("chart.svg");
    let output = dir.path().join("chart (cropped).svg");
    fs::write(&input, CHART).unwrap();

    let report = trim_footer(&input, &output, &TrimOptions::default()).unwrap();

    assert!(report.footer_found);
    assert_eq!(report.removed_count, 2);
    assert_eq!(report.footer_min_y, Some(540.0));
    assert_eq!(report.content_max_y, Some(150.0));
    assert_eq!(report.old_height.as_deref(), Some("600"));
    assert_eq!(report.new_height.as_deref(), Some("160"));
    assert!(report.viewbox_updated);

    assert_eq!(fs::read_to_string(&output).unwrap(), TRIMMED);
    // The input is left alone.
    assert_eq!(fs::read_to_string(&input).unwrap(), CHART);
}

#[test]
fn test_trim_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.svg");
    fs::write(&path, CHART).unwrap();

    trim_footer(&path, &path, &TrimOptions::default()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), TRIMMED);
}

#[test]
fn test_no_footer_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.svg");
    let output = dir.path().join("plain (cropped).svg");
    fs::write(
        &input,
        r#"<svg height="600" viewBox="0 0 850 600"><text y="200" font-size="14">x</text></svg>"#,
    )
    .unwrap();

    let report = trim_footer(&input, &output, &TrimOptions::default()).unwrap();

    assert!(!report.footer_found);
    assert_eq!(report.removed_count, 0);
    assert!(!output.exists());
}

#[test]
fn test_trim_is_idempotent() {
    let first = trim_bytes(CHART.as_bytes(), &TrimOptions::default()).unwrap();
    let output = first.output.unwrap();

    let second = trim_bytes(&output, &TrimOptions::default()).unwrap();
    assert!(!second.report.footer_found);
    assert!(second.output.is_none());
}

#[test]
fn test_namespaces_and_escapes_survive() {
    let outcome = trim_bytes(CHART.as_bytes(), &TrimOptions::default()).unwrap();
    let text = outcome.output_str().unwrap();

    assert!(text.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
    assert!(text.contains(r##"<use xlink:href="#p" title="A &amp; B"/>"##));
    assert!(!text.contains("ns0:"));
    assert!(!text.contains("footer"));
    assert!(!text.contains("logo.png"));
}

#[test]
fn test_custom_footer_id_and_padding() {
    let svg = r#"<svg height="300" viewBox="0 0 400 300"><circle cy="80" r="5"/><text y="100" font-size="12">label</text><g id="credits"><text y="280">x</text></g></svg>"#;
    let options = TrimOptions::new().with_footer_id("credits").with_padding(0.0);

    let outcome = trim_bytes(svg.as_bytes(), &options).unwrap();

    assert_eq!(outcome.report.content_max_y, Some(112.0));
    assert_eq!(
        outcome.output_str(),
        Some(r#"<svg height="112" viewBox="0 0 400 112"><circle cy="80" r="5"/><text y="100" font-size="12">label</text></svg>"#)
    );
}

#[test]
fn test_fixed_height_policy() {
    let svg = r#"<svg height="300" viewBox="0 0 400 300"><rect y="10.5" height="20.25"/><g id="footer"/></svg>"#;
    let options = TrimOptions::new().with_height_policy(HeightPolicy::Fixed2);

    let outcome = trim_bytes(svg.as_bytes(), &options).unwrap();
    assert_eq!(outcome.report.new_height.as_deref(), Some("40.75"));
    assert!(outcome.output_str().unwrap().contains(r#"viewBox="0 0 400 40.75""#));
}

#[test]
fn test_any_depth_removes_nested_footer() {
    let svg = r#"<svg height="500"><g id="chart"><rect y="0" height="90"/><g id="footer"><text y="480">src</text></g><text y="490">more</text></g><rect y="100" height="50"/></svg>"#;

    let root_only = trim_bytes(svg.as_bytes(), &TrimOptions::default()).unwrap();
    assert!(!root_only.report.footer_found);

    let outcome = trim_bytes(svg.as_bytes(), &TrimOptions::new().any_depth()).unwrap();
    assert_eq!(outcome.report.removed_count, 2);
    assert_eq!(outcome.report.content_max_y, Some(150.0));
    assert_eq!(
        outcome.output_str(),
        Some(r#"<svg height="160"><g id="chart"><rect y="0" height="90"/></g><rect y="100" height="50"/></svg>"#)
    );
}

#[test]
fn test_any_depth_checks_siblings_before_nested() {
    let svg = r#"<svg height="500"><g id="chart"><rect y="0" height="90"/><g id="footer"><text y="300">inner</text></g></g><g id="footer"><text y="480">src</text></g></svg>"#;

    let outcome = trim_bytes(svg.as_bytes(), &TrimOptions::new().any_depth()).unwrap();

    assert_eq!(outcome.report.removed_count, 1);
    assert_eq!(outcome.report.duplicate_footer_ids, 1);
    assert_eq!(outcome.report.content_max_y, Some(300.0));
    assert_eq!(
        outcome.output_str(),
        Some(r#"<svg height="310"><g id="chart"><rect y="0" height="90"/><g id="footer"><text y="300">inner</text></g></g></svg>"#)
    );
}

#[test]
fn test_declaration_mode() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("chart.svg");
    let output = dir.path().join("out.svg");
    fs::write(&input, CHART).unwrap();

    Unfooter::new()
        .with_output_mode(OutputMode::Utf8WithDeclaration)
        .trim_file(&input, &output)
        .unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(
        text,
        format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", TRIMMED)
    );
}

#[test]
fn test_malformed_viewbox_left_alone() {
    let svg = r#"<svg height="600" viewBox="0,0,850,600"><rect y="50" height="100"/><g id="footer"/></svg>"#;
    let outcome = trim_bytes(svg.as_bytes(), &TrimOptions::default()).unwrap();

    assert!(!outcome.report.viewbox_updated);
    assert_eq!(
        outcome.output_str(),
        Some(r#"<svg height="160" viewBox="0,0,850,600"><rect y="50" height="100"/></svg>"#)
    );
}

#[test]
fn test_unparseable_numbers_are_skipped() {
    let svg = r#"<svg height="600"><rect y="auto" height="100"/><text y="40px" font-size="big">a</text><g id="footer"/></svg>"#;
    let outcome = trim_bytes(svg.as_bytes(), &TrimOptions::default()).unwrap();

    assert_eq!(outcome.report.content_max_y, Some(40.0));
    assert_eq!(outcome.report.new_height.as_deref(), Some("50"));
}

#[test]
fn test_parse_error_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.svg");
    let output = dir.path().join("broken (cropped).svg");
    fs::write(&input, "<svg><g id=\"footer\"></svg>").unwrap();

    let err = trim_footer(&input, &output, &TrimOptions::default()).unwrap_err();
    assert!(err.is_parse_error());
    assert!(!output.exists());
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let result = trim_footer(
        dir.path().join("missing.svg"),
        dir.path().join("out.svg"),
        &TrimOptions::default(),
    );
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_inspect_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("chart.svg");
    fs::write(&input, CHART).unwrap();

    let inspection = inspect_file(&input, &TrimOptions::default()).unwrap();

    assert_eq!(inspection.height.as_deref(), Some("600"));
    assert_eq!(inspection.view_box.as_deref(), Some("0 0 850 600"));
    assert!(inspection.trim.footer_found);
    assert_eq!(inspection.trim.new_height.as_deref(), Some("160"));
    assert_eq!(fs::read_to_string(&input).unwrap(), CHART);
}
