use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::{SimpleFileOptions, ZipWriter};

const SLIDE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

fn slide_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>"#,
        body
    )
}

fn text_shape(text: &str) -> String {
    format!(
        "<p:sp><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>",
        text
    )
}

fn chart_frame() -> String {
    "<p:graphicFrame><a:graphic>\
     <a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/chart\">\
     <c:chart xmlns:c=\"http://schemas.openxmlformats.org/drawingml/2006/chart\" r:id=\"rId2\"/>\
     </a:graphicData></a:graphic></p:graphicFrame>"
        .to_string()
}

/// Build the two-slide audit fixture: slide 1 carries a revenue figure and
/// no chart, slide 2 carries a chart and a growth percentage.
fn write_two_slide_deck(dir: &Path) -> Result<PathBuf> {
    let slide1 = slide_xml(&text_shape("Revenue: $1,234.56"));
    let slide2 = slide_xml(&format!("{}{}", chart_frame(), text_shape("Growth: 12%")));

    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, file) in ["slide1.xml", "slide2.xml"].iter().enumerate() {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}" Target="slides/{}"/>"#,
            i + 1,
            SLIDE_REL_TYPE,
            file
        ));
    }
    rels.push_str("</Relationships>");

    let path = dir.join("deck.pptx");
    let file = fs::File::create(&path)?;
    let mut zip = ZipWriter::new(file);

    for (name, content) in [
        ("ppt/_rels/presentation.xml.rels", rels.as_str()),
        ("ppt/slides/slide1.xml", slide1.as_str()),
        ("ppt/slides/slide2.xml", slide2.as_str()),
    ] {
        zip.start_file(name, SimpleFileOptions::default())?;
        zip.write_all(content.as_bytes())?;
    }
    zip.finish()?;

    Ok(path)
}

fn deckaudit() -> Command {
    Command::cargo_bin("deckaudit").expect("binary builds")
}

#[test]
fn analyzes_a_two_slide_deck_end_to_end() -> Result<()> {
    let temp = TempDir::new()?;
    let deck = write_two_slide_deck(temp.path())?;
    let out_dir = temp.path().join("analysis");

    deckaudit()
        .arg(&deck)
        .arg("--output")
        .arg(&out_dir)
        .arg("--output-format")
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("Slides processed: 2"))
        .stdout(predicate::str::contains("Charts identified: 1"));

    // Structured dump
    let analysis: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("analysis.json"))?)?;
    assert_eq!(analysis["total_slides"], 2);
    assert_eq!(analysis["slides"][0]["slide_number"], 1);
    assert_eq!(analysis["slides"][1]["slide_number"], 2);
    assert_eq!(analysis["slides"][0]["title"], "Revenue: $1,234.56");

    let numbers: Vec<&str> = analysis["numbers_found"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(numbers.contains(&"$1,234.56"));
    assert!(numbers.contains(&"12%"));

    let charts = analysis["charts_found"].as_array().unwrap();
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0], "Chart on slide 2");

    // The chart shape carries the flag; the text shape does not.
    assert_eq!(analysis["slides"][1]["shapes"][0]["chart"], true);
    assert!(analysis["slides"][0]["shapes"][0].get("chart").is_none());

    // Narrative report
    let report = fs::read_to_string(out_dir.join("audit_report.md"))?;
    assert!(report.contains("# PowerPoint Analysis Report"));
    assert!(report.contains("**Total Slides:** 2"));
    assert!(report.contains("### Slide 2"));
    assert!(report.contains("## All Extracted Numbers"));
    assert!(report.contains("- Chart on slide 2"));

    // Reconciliation template
    let reconciliation: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("reconciliation.json"))?)?;
    assert_eq!(reconciliation["our_numbers"]["total_revenue"], 181320.01);
    assert!(reconciliation["powerpoint_numbers"]
        .as_object()
        .unwrap()
        .is_empty());

    Ok(())
}

#[test]
fn reruns_produce_byte_identical_output() -> Result<()> {
    let temp = TempDir::new()?;
    let deck = write_two_slide_deck(temp.path())?;
    let out_dir = temp.path().join("analysis");

    deckaudit()
        .arg(&deck)
        .arg("--output")
        .arg(&out_dir)
        .arg("--quiet")
        .assert()
        .success();
    let first_analysis = fs::read(out_dir.join("analysis.json"))?;
    let first_reconciliation = fs::read(out_dir.join("reconciliation.json"))?;

    deckaudit()
        .arg(&deck)
        .arg("--output")
        .arg(&out_dir)
        .arg("--quiet")
        .assert()
        .success();

    assert_eq!(fs::read(out_dir.join("analysis.json"))?, first_analysis);
    assert_eq!(
        fs::read(out_dir.join("reconciliation.json"))?,
        first_reconciliation
    );

    Ok(())
}

#[test]
fn missing_input_fails_with_message() -> Result<()> {
    let temp = TempDir::new()?;

    deckaudit()
        .arg(temp.path().join("no-such-deck.pptx"))
        .arg("--output-format")
        .arg("plain")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));

    Ok(())
}

#[test]
fn invalid_package_fails_with_message() -> Result<()> {
    let temp = TempDir::new()?;
    let bogus = temp.path().join("bogus.pptx");
    fs::write(&bogus, b"not a zip archive at all")?;

    deckaudit()
        .arg(&bogus)
        .arg("--output-format")
        .arg("plain")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("package"));

    Ok(())
}

#[test]
fn skip_reconciliation_omits_the_template() -> Result<()> {
    let temp = TempDir::new()?;
    let deck = write_two_slide_deck(temp.path())?;
    let out_dir = temp.path().join("analysis");

    deckaudit()
        .arg(&deck)
        .arg("--output")
        .arg(&out_dir)
        .arg("--skip-reconciliation")
        .arg("--quiet")
        .assert()
        .success();

    assert!(out_dir.join("analysis.json").exists());
    assert!(out_dir.join("audit_report.md").exists());
    assert!(!out_dir.join("reconciliation.json").exists());

    Ok(())
}

#[test]
fn dry_run_writes_nothing() -> Result<()> {
    let temp = TempDir::new()?;
    let deck = write_two_slide_deck(temp.path())?;
    let out_dir = temp.path().join("analysis");

    deckaudit()
        .arg(&deck)
        .arg("--output")
        .arg(&out_dir)
        .arg("--dry-run")
        .arg("--output-format")
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"));

    assert!(!out_dir.exists());

    Ok(())
}
