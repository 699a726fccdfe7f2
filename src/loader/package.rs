use crate::error::{DeckAuditError, Result};
use crate::loader::slide::{self, SlideContent};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";

/// An opened `.pptx` package with its slide parts resolved in deck order.
///
/// PPTX files are ZIP archives of Office Open XML parts; the ordered slide
/// list comes from the presentation relationships file, with targets like
/// `slides/slide1.xml` resolved relative to `ppt/`.
pub struct PptxPackage {
    archive: ZipArchive<File>,
    slide_parts: Vec<String>,
}

impl PptxPackage {
    /// Open a presentation file and resolve its slide parts.
    ///
    /// The caller is expected to have checked existence already; an absent
    /// file surfaces as an IO error here.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(DeckAuditError::Io)?;
        let mut archive = ZipArchive::new(file).map_err(|e| DeckAuditError::Package {
            message: format!("{}: {}", path.display(), e),
        })?;

        let slide_parts = read_slide_parts(&mut archive)?;

        Ok(Self {
            archive,
            slide_parts,
        })
    }

    pub fn slide_count(&self) -> usize {
        self.slide_parts.len()
    }

    pub fn slide_parts(&self) -> &[String] {
        &self.slide_parts
    }

    /// Parse one slide by zero-based index.
    pub fn read_slide(&mut self, index: usize) -> Result<SlideContent> {
        let part = self
            .slide_parts
            .get(index)
            .ok_or_else(|| DeckAuditError::Package {
                message: format!("Slide index {} out of range", index + 1),
            })?
            .clone();

        let xml = self.read_part(&part)?;
        slide::parse_slide_xml(&xml).map_err(|e| match e {
            DeckAuditError::Parse { message } => DeckAuditError::Parse {
                message: format!("{}: {}", part, message),
            },
            other => other,
        })
    }

    /// Parse every slide in deck order. Any failure aborts the whole read.
    pub fn read_all_slides(&mut self) -> Result<Vec<SlideContent>> {
        (0..self.slide_count())
            .map(|index| self.read_slide(index))
            .collect()
    }

    fn read_part(&mut self, name: &str) -> Result<String> {
        let mut file = self
            .archive
            .by_name(name)
            .map_err(|e| DeckAuditError::Package {
                message: format!("Missing package part {}: {}", name, e),
            })?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(DeckAuditError::Io)?;
        Ok(content)
    }
}

/// Read `ppt/_rels/presentation.xml.rels` and collect slide part names,
/// sorted by the numeric suffix of the part (`slide2.xml` before
/// `slide10.xml`).
fn read_slide_parts(archive: &mut ZipArchive<File>) -> Result<Vec<String>> {
    let rels_content = {
        let mut file = archive
            .by_name(PRESENTATION_RELS)
            .map_err(|e| DeckAuditError::Package {
                message: format!("Missing {}: {}", PRESENTATION_RELS, e),
            })?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(DeckAuditError::Io)?;
        content
    };

    let mut slide_parts = Vec::new();
    let mut reader = Reader::from_str(&rels_content);
    reader.trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e) | Event::Start(e)) if e.name().as_ref() == b"Relationship" => {
                let mut is_slide = false;
                let mut target = String::new();

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Type" => {
                            if let Ok(val) = attr.decode_and_unescape_value(&reader) {
                                // Slide masters and notes slides carry longer
                                // type suffixes; only plain slides qualify.
                                if val.ends_with("/slide") {
                                    is_slide = true;
                                }
                            }
                        }
                        b"Target" => {
                            if let Ok(val) = attr.decode_and_unescape_value(&reader) {
                                target = val.to_string();
                            }
                        }
                        _ => {}
                    }
                }

                if is_slide && !target.is_empty() {
                    slide_parts.push(format!("ppt/{}", target));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DeckAuditError::Package {
                    message: format!("XML error in {}: {}", PRESENTATION_RELS, e),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    slide_parts.sort_by_key(|part| slide_number_of(part));

    Ok(slide_parts)
}

fn slide_number_of(part: &str) -> usize {
    part.trim_end_matches(".xml")
        .rsplit('/')
        .next()
        .and_then(|stem| stem.strip_prefix("slide"))
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use zip::write::{SimpleFileOptions, ZipWriter};

    const SLIDE_REL_TYPE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    fn rels_xml(slide_files: &[&str]) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rIdM" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
        );
        for (i, file) in slide_files.iter().enumerate() {
            xml.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="{}" Target="slides/{}"/>"#,
                i + 2,
                SLIDE_REL_TYPE,
                file
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn slide_part_xml(text: &str) -> String {
        format!(
            r#"<?xml version="1.0"?><p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
            text
        )
    }

    fn write_test_pptx(entries: &[(String, String)]) -> NamedTempFile {
        let temp_file = NamedTempFile::new().unwrap();
        let file = temp_file.reopen().unwrap();

        let mut zip = ZipWriter::new(file);
        for (name, content) in entries {
            zip.start_file(name.as_str(), SimpleFileOptions::default())
                .unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();

        temp_file
    }

    #[test]
    fn test_open_and_read_slides() {
        let pptx = write_test_pptx(&[
            (
                PRESENTATION_RELS.to_string(),
                rels_xml(&["slide1.xml", "slide2.xml"]),
            ),
            ("ppt/slides/slide1.xml".to_string(), slide_part_xml("one")),
            ("ppt/slides/slide2.xml".to_string(), slide_part_xml("two")),
        ]);

        let mut package = PptxPackage::open(pptx.path()).unwrap();
        assert_eq!(package.slide_count(), 2);

        let slides = package.read_all_slides().unwrap();
        assert_eq!(slides[0].shapes[0].text, "one");
        assert_eq!(slides[1].shapes[0].text, "two");
    }

    #[test]
    fn test_slides_sort_numerically() {
        // Relationship order is not deck order; slide10 must follow slide2.
        let pptx = write_test_pptx(&[
            (
                PRESENTATION_RELS.to_string(),
                rels_xml(&["slide10.xml", "slide1.xml", "slide2.xml"]),
            ),
            ("ppt/slides/slide1.xml".to_string(), slide_part_xml("a")),
            ("ppt/slides/slide2.xml".to_string(), slide_part_xml("b")),
            ("ppt/slides/slide10.xml".to_string(), slide_part_xml("c")),
        ]);

        let package = PptxPackage::open(pptx.path()).unwrap();
        assert_eq!(
            package.slide_parts(),
            &[
                "ppt/slides/slide1.xml".to_string(),
                "ppt/slides/slide2.xml".to_string(),
                "ppt/slides/slide10.xml".to_string(),
            ]
        );
    }

    #[test]
    fn test_master_relationships_are_not_slides() {
        let pptx = write_test_pptx(&[(PRESENTATION_RELS.to_string(), rels_xml(&[]))]);

        let package = PptxPackage::open(pptx.path()).unwrap();
        assert_eq!(package.slide_count(), 0);
    }

    #[test]
    fn test_not_a_zip_is_a_package_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"this is not a zip archive").unwrap();

        let result = PptxPackage::open(temp_file.path());
        assert!(matches!(result, Err(DeckAuditError::Package { .. })));
    }

    #[test]
    fn test_missing_relationships_part() {
        let pptx = write_test_pptx(&[(
            "ppt/slides/slide1.xml".to_string(),
            slide_part_xml("orphan"),
        )]);

        let result = PptxPackage::open(pptx.path());
        assert!(matches!(result, Err(DeckAuditError::Package { .. })));
    }

    #[test]
    fn test_missing_slide_part() {
        let pptx = write_test_pptx(&[(
            PRESENTATION_RELS.to_string(),
            rels_xml(&["slide1.xml"]),
        )]);

        let mut package = PptxPackage::open(pptx.path()).unwrap();
        let result = package.read_slide(0);
        assert!(matches!(result, Err(DeckAuditError::Package { .. })));
    }
}
