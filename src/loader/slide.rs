use crate::error::{DeckAuditError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// One slide's top-level shapes, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideContent {
    pub shapes: Vec<ShapeContent>,
}

/// A top-level shape: its kind label plus any text carried by its text body.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeContent {
    pub kind: ShapeKind,
    pub text: String,
}

/// Shape classification derived from the slide XML element and, for graphic
/// frames, the `a:graphicData` namespace URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Placeholder,
    TextBox,
    AutoShape,
    Picture,
    Chart,
    Table,
    Group,
    Connector,
    GraphicFrame,
}

impl ShapeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Placeholder => "PLACEHOLDER",
            ShapeKind::TextBox => "TEXT_BOX",
            ShapeKind::AutoShape => "AUTO_SHAPE",
            ShapeKind::Picture => "PICTURE",
            ShapeKind::Chart => "CHART",
            ShapeKind::Table => "TABLE",
            ShapeKind::Group => "GROUP",
            ShapeKind::Connector => "CONNECTOR",
            ShapeKind::GraphicFrame => "GRAPHIC_FRAME",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse one slide part (`ppt/slides/slideN.xml`) into its shape sequence.
pub fn parse_slide_xml(xml: &str) -> Result<SlideContent> {
    let mut state = SlideXmlState::new();
    let mut reader = Reader::from_str(xml);
    // Keep whitespace inside text runs; significant spaces live in a:t nodes.
    reader.trim_text(false);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                state.handle_start_element(&e, &reader);
            }
            Ok(Event::Empty(e)) => {
                state.handle_empty_element(&e, &reader);
            }
            Ok(Event::Text(e)) if state.in_text => {
                if let Ok(text) = e.unescape() {
                    state.current_text.push_str(&text);
                }
            }
            Ok(Event::End(e)) => {
                state.handle_end_element(&e);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DeckAuditError::Parse {
                    message: format!("XML error at position {}: {}", reader.buffer_position(), e),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(SlideContent {
        shapes: state.shapes,
    })
}

/// Event-driven parse state for one slide part.
///
/// Only shapes directly under the shape tree are recorded; grouped shapes are
/// represented by their group, matching how the audit consumer walks a deck.
#[derive(Debug)]
struct SlideXmlState {
    shapes: Vec<ShapeContent>,
    group_depth: usize,

    // p:sp tracking
    in_shape: bool,
    shape_kind: ShapeKind,
    in_text: bool,
    current_text: String,

    // p:graphicFrame tracking
    in_graphic_frame: bool,
    frame_kind: ShapeKind,
}

impl SlideXmlState {
    fn new() -> Self {
        Self {
            shapes: Vec::new(),
            group_depth: 0,
            in_shape: false,
            shape_kind: ShapeKind::AutoShape,
            in_text: false,
            current_text: String::new(),
            in_graphic_frame: false,
            frame_kind: ShapeKind::GraphicFrame,
        }
    }

    fn handle_start_element(
        &mut self,
        e: &quick_xml::events::BytesStart<'_>,
        reader: &Reader<&[u8]>,
    ) {
        match e.name().as_ref() {
            b"p:grpSp" => {
                if self.group_depth == 0 {
                    self.shapes.push(ShapeContent {
                        kind: ShapeKind::Group,
                        text: String::new(),
                    });
                }
                self.group_depth += 1;
            }
            b"p:sp" if self.group_depth == 0 => {
                self.in_shape = true;
                self.shape_kind = ShapeKind::AutoShape;
                self.current_text.clear();
            }
            b"p:ph" if self.in_shape => {
                self.shape_kind = ShapeKind::Placeholder;
            }
            b"p:cNvSpPr" if self.in_shape => {
                self.handle_sp_props(e, reader);
            }
            b"p:graphicFrame" if self.group_depth == 0 => {
                self.in_graphic_frame = true;
                self.frame_kind = ShapeKind::GraphicFrame;
            }
            b"a:graphicData" if self.in_graphic_frame => {
                self.handle_graphic_data(e, reader);
            }
            b"a:t" if self.in_shape => {
                self.in_text = true;
            }
            _ => {}
        }
    }

    fn handle_empty_element(
        &mut self,
        e: &quick_xml::events::BytesStart<'_>,
        reader: &Reader<&[u8]>,
    ) {
        match e.name().as_ref() {
            b"p:ph" if self.in_shape => {
                self.shape_kind = ShapeKind::Placeholder;
            }
            b"p:cNvSpPr" if self.in_shape => {
                self.handle_sp_props(e, reader);
            }
            b"a:graphicData" if self.in_graphic_frame => {
                self.handle_graphic_data(e, reader);
            }
            b"a:br" if self.in_shape => {
                self.current_text.push('\n');
            }
            _ => {}
        }
    }

    fn handle_end_element(&mut self, e: &quick_xml::events::BytesEnd<'_>) {
        match e.name().as_ref() {
            b"p:grpSp" => {
                self.group_depth = self.group_depth.saturating_sub(1);
            }
            b"a:t" if self.in_text => {
                self.in_text = false;
            }
            b"a:p" if self.in_shape => {
                // Paragraph boundaries become newlines in the shape text.
                self.current_text.push('\n');
            }
            b"p:sp" if self.in_shape => {
                self.in_shape = false;
                let text = self.current_text.trim_end_matches('\n').to_string();
                self.shapes.push(ShapeContent {
                    kind: self.shape_kind,
                    text,
                });
            }
            b"p:graphicFrame" if self.in_graphic_frame => {
                self.in_graphic_frame = false;
                if self.group_depth == 0 {
                    self.shapes.push(ShapeContent {
                        kind: self.frame_kind,
                        text: String::new(),
                    });
                }
            }
            b"p:pic" if self.group_depth == 0 && !self.in_graphic_frame => {
                self.shapes.push(ShapeContent {
                    kind: ShapeKind::Picture,
                    text: String::new(),
                });
            }
            b"p:cxnSp" if self.group_depth == 0 => {
                self.shapes.push(ShapeContent {
                    kind: ShapeKind::Connector,
                    text: String::new(),
                });
            }
            _ => {}
        }
    }

    /// A `txBox="1"` attribute on the non-visual shape properties marks a
    /// plain text box; placeholders take precedence.
    fn handle_sp_props(&mut self, e: &quick_xml::events::BytesStart<'_>, reader: &Reader<&[u8]>) {
        if self.shape_kind == ShapeKind::Placeholder {
            return;
        }
        for attr in e.attributes().flatten() {
            if attr.key.as_ref() == b"txBox" {
                if let Ok(val) = attr.decode_and_unescape_value(reader) {
                    if val == "1" || val == "true" {
                        self.shape_kind = ShapeKind::TextBox;
                    }
                }
            }
        }
    }

    fn handle_graphic_data(
        &mut self,
        e: &quick_xml::events::BytesStart<'_>,
        reader: &Reader<&[u8]>,
    ) {
        for attr in e.attributes().flatten() {
            if attr.key.as_ref() == b"uri" {
                if let Ok(uri) = attr.decode_and_unescape_value(reader) {
                    if uri.contains("/chart") {
                        self.frame_kind = ShapeKind::Chart;
                    } else if uri.contains("/table") {
                        self.frame_kind = ShapeKind::Table;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide_xml(sp_tree_body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
       xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
       xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld><p:spTree>{}</p:spTree></p:cSld>
</p:sld>"#,
            sp_tree_body
        )
    }

    fn text_shape(text: &str) -> String {
        format!(
            "<p:sp><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>",
            text
        )
    }

    #[test]
    fn test_single_text_shape() {
        let xml = slide_xml(&text_shape("Revenue Overview"));
        let slide = parse_slide_xml(&xml).unwrap();

        assert_eq!(slide.shapes.len(), 1);
        assert_eq!(slide.shapes[0].kind, ShapeKind::AutoShape);
        assert_eq!(slide.shapes[0].text, "Revenue Overview");
    }

    #[test]
    fn test_runs_concatenate_and_paragraphs_break() {
        let body = "<p:sp><p:txBody>\
            <a:p><a:r><a:t>Total: </a:t></a:r><a:r><a:t>$1,234.56</a:t></a:r></a:p>\
            <a:p><a:r><a:t>Growth: 12%</a:t></a:r></a:p>\
            </p:txBody></p:sp>";
        let slide = parse_slide_xml(&slide_xml(body)).unwrap();

        assert_eq!(slide.shapes[0].text, "Total: $1,234.56\nGrowth: 12%");
    }

    #[test]
    fn test_line_break_element() {
        let body = "<p:sp><p:txBody>\
            <a:p><a:r><a:t>first</a:t></a:r><a:br/><a:r><a:t>second</a:t></a:r></a:p>\
            </p:txBody></p:sp>";
        let slide = parse_slide_xml(&slide_xml(body)).unwrap();

        assert_eq!(slide.shapes[0].text, "first\nsecond");
    }

    #[test]
    fn test_placeholder_and_text_box_kinds() {
        let body = "<p:sp><p:nvSpPr><p:nvPr><p:ph type=\"title\"/></p:nvPr></p:nvSpPr>\
            <p:txBody><a:p><a:r><a:t>Title</a:t></a:r></a:p></p:txBody></p:sp>\
            <p:sp><p:nvSpPr><p:cNvSpPr txBox=\"1\"/></p:nvSpPr>\
            <p:txBody><a:p><a:r><a:t>Note</a:t></a:r></a:p></p:txBody></p:sp>";
        let slide = parse_slide_xml(&slide_xml(body)).unwrap();

        assert_eq!(slide.shapes[0].kind, ShapeKind::Placeholder);
        assert_eq!(slide.shapes[1].kind, ShapeKind::TextBox);
    }

    #[test]
    fn test_chart_graphic_frame() {
        let body = "<p:graphicFrame><a:graphic>\
            <a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/chart\">\
            <c:chart xmlns:c=\"http://schemas.openxmlformats.org/drawingml/2006/chart\" r:id=\"rId2\"/>\
            </a:graphicData></a:graphic></p:graphicFrame>";
        let slide = parse_slide_xml(&slide_xml(body)).unwrap();

        assert_eq!(slide.shapes.len(), 1);
        assert_eq!(slide.shapes[0].kind, ShapeKind::Chart);
        assert!(slide.shapes[0].kind.label().contains("CHART"));
    }

    #[test]
    fn test_table_graphic_frame_text_is_not_collected() {
        let body = "<p:graphicFrame><a:graphic>\
            <a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/table\">\
            <a:tbl><a:tr><a:tc><a:txBody><a:p><a:r><a:t>cell</a:t></a:r></a:p></a:txBody></a:tc></a:tr></a:tbl>\
            </a:graphicData></a:graphic></p:graphicFrame>";
        let slide = parse_slide_xml(&slide_xml(body)).unwrap();

        assert_eq!(slide.shapes.len(), 1);
        assert_eq!(slide.shapes[0].kind, ShapeKind::Table);
        assert_eq!(slide.shapes[0].text, "");
    }

    #[test]
    fn test_grouped_shapes_collapse_to_one_group() {
        let body = format!(
            "<p:grpSp>{}{}</p:grpSp>{}",
            text_shape("inside one"),
            text_shape("inside two"),
            text_shape("outside")
        );
        let slide = parse_slide_xml(&slide_xml(&body)).unwrap();

        assert_eq!(slide.shapes.len(), 2);
        assert_eq!(slide.shapes[0].kind, ShapeKind::Group);
        assert_eq!(slide.shapes[0].text, "");
        assert_eq!(slide.shapes[1].text, "outside");
    }

    #[test]
    fn test_picture_and_connector() {
        let body = "<p:pic><p:blipFill><a:blip r:embed=\"rId1\"/></p:blipFill></p:pic>\
            <p:cxnSp><p:spPr/></p:cxnSp>";
        let slide = parse_slide_xml(&slide_xml(body)).unwrap();

        assert_eq!(slide.shapes[0].kind, ShapeKind::Picture);
        assert_eq!(slide.shapes[1].kind, ShapeKind::Connector);
    }

    #[test]
    fn test_escaped_entities_in_text() {
        let slide = parse_slide_xml(&slide_xml(&text_shape("P&amp;L &lt;draft&gt;"))).unwrap();
        assert_eq!(slide.shapes[0].text, "P&L <draft>");
    }

    #[test]
    fn test_empty_slide() {
        let slide = parse_slide_xml(&slide_xml("")).unwrap();
        assert!(slide.shapes.is_empty());
    }

    #[test]
    fn test_mismatched_tags_are_a_parse_error() {
        let result = parse_slide_xml("<p:sld><p:cSld></p:sld></p:cSld>");
        assert!(matches!(result, Err(DeckAuditError::Parse { .. })));
    }
}
