//! `.docx` serialization of a finished `DocumentBuffer`.
//!
//! The package holds the minimum Word needs: content types, package relationships, the
//! main document, a style sheet, one bullet numbering definition and the document's
//! relationships (styles, numbering, one external target per hyperlink run).

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::docx::DocxError;
use crate::layout::buffer::{DocumentBuffer, PageMargins, Paragraph, Run};
use crate::layout::styles::{
    Alignment, ParagraphFormat, TITLE_BORDER_SIZE, TITLE_BORDER_SPACE_PT,
};

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const HYPERLINK_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

/// US Letter, in twips.
const PAGE_WIDTH_TWIPS: &str = "12240";
const PAGE_HEIGHT_TWIPS: &str = "15840";
/// Hanging indent of the bullet glyph, in twips.
const BULLET_HANGING_TWIPS: &str = "180";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman" w:eastAsia="Times New Roman" w:cs="Times New Roman"/><w:sz w:val="20"/><w:szCs w:val="20"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:before="0" w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style></w:styles>"#;

const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="360" w:hanging="180"/></w:pPr><w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman"/></w:rPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Serializes the buffer into a complete `.docx` package.
pub fn write_docx(buffer: &DocumentBuffer) -> Result<Vec<u8>, DocxError> {
    let mut links = Vec::new();
    let document = document_xml(buffer, &mut links)?;
    let document_rels = document_rels_xml(&links)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, &[u8]); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS_XML.as_bytes()),
        ("word/document.xml", document.as_slice()),
        ("word/styles.xml", STYLES_XML.as_bytes()),
        ("word/numbering.xml", NUMBERING_XML.as_bytes()),
        ("word/_rels/document.xml.rels", document_rels.as_slice()),
    ];
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body)?;
    }

    Ok(zip.finish()?.into_inner())
}

// ────────────────────────────────────────────────────────────────────────────
// word/document.xml
// ────────────────────────────────────────────────────────────────────────────

fn document_xml(buffer: &DocumentBuffer, links: &mut Vec<String>) -> Result<Vec<u8>, DocxError> {
    let mut w = Writer::new(Cursor::new(Vec::new()));
    declaration(&mut w)?;
    start(&mut w, "w:document", &[("xmlns:w", WORDML_NS), ("xmlns:r", REL_NS)])?;
    start(&mut w, "w:body", &[])?;

    for paragraph in buffer.paragraphs() {
        write_paragraph(&mut w, paragraph, links)?;
    }
    write_section_properties(&mut w, &buffer.page_margins())?;

    end(&mut w, "w:body")?;
    end(&mut w, "w:document")?;
    Ok(w.into_inner().into_inner())
}

fn write_paragraph(w: &mut XmlWriter, paragraph: &Paragraph, links: &mut Vec<String>) -> Result<(), DocxError> {
    start(w, "w:p", &[])?;
    write_paragraph_properties(w, &paragraph.format)?;
    for run in &paragraph.runs {
        match &run.link {
            Some(url) => {
                links.push(url.clone());
                let id = hyperlink_rel_id(links.len());
                start(w, "w:hyperlink", &[("r:id", id.as_str()), ("w:history", "1")])?;
                write_run(w, run)?;
                end(w, "w:hyperlink")?;
            }
            None => write_run(w, run)?,
        }
    }
    end(w, "w:p")
}

fn write_paragraph_properties(w: &mut XmlWriter, format: &ParagraphFormat) -> Result<(), DocxError> {
    start(w, "w:pPr", &[])?;

    if format.bulleted {
        start(w, "w:numPr", &[])?;
        empty(w, "w:ilvl", &[("w:val", "0")])?;
        empty(w, "w:numId", &[("w:val", "1")])?;
        end(w, "w:numPr")?;
    }

    if format.bottom_border {
        let size = TITLE_BORDER_SIZE.to_string();
        let space = TITLE_BORDER_SPACE_PT.to_string();
        start(w, "w:pBdr", &[])?;
        empty(
            w,
            "w:bottom",
            &[
                ("w:val", "single"),
                ("w:sz", size.as_str()),
                ("w:space", space.as_str()),
                ("w:color", "auto"),
            ],
        )?;
        end(w, "w:pBdr")?;
    }

    let before = twips(format.space_before_pt).to_string();
    let after = twips(format.space_after_pt).to_string();
    let line = ((format.line_spacing * 240.0).round() as i64).to_string();
    empty(
        w,
        "w:spacing",
        &[
            ("w:before", before.as_str()),
            ("w:after", after.as_str()),
            ("w:line", line.as_str()),
            ("w:lineRule", "auto"),
        ],
    )?;

    if format.left_indent_pt > 0.0 {
        let left = twips(format.left_indent_pt).to_string();
        if format.bulleted {
            empty(w, "w:ind", &[("w:left", left.as_str()), ("w:hanging", BULLET_HANGING_TWIPS)])?;
        } else {
            empty(w, "w:ind", &[("w:left", left.as_str())])?;
        }
    }

    let justification = match format.alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Justified => "both",
    };
    empty(w, "w:jc", &[("w:val", justification)])?;

    end(w, "w:pPr")
}

fn write_run(w: &mut XmlWriter, run: &Run) -> Result<(), DocxError> {
    let format = &run.format;
    start(w, "w:r", &[])?;
    start(w, "w:rPr", &[])?;
    empty(
        w,
        "w:rFonts",
        &[
            ("w:ascii", format.font_family),
            ("w:hAnsi", format.font_family),
            ("w:eastAsia", format.font_family),
            ("w:cs", format.font_family),
        ],
    )?;
    if format.bold {
        empty(w, "w:b", &[])?;
    }
    if format.italic {
        empty(w, "w:i", &[])?;
    }
    if let Some(color) = format.color {
        empty(w, "w:color", &[("w:val", color)])?;
    }
    let half_points = ((format.size_pt * 2.0).round() as i64).to_string();
    empty(w, "w:sz", &[("w:val", half_points.as_str())])?;
    empty(w, "w:szCs", &[("w:val", half_points.as_str())])?;
    if format.underline {
        empty(w, "w:u", &[("w:val", "single")])?;
    }
    end(w, "w:rPr")?;

    write_run_text(w, &run.text)?;
    end(w, "w:r")
}

/// Newlines become `w:br`, tabs become `w:tab`.
fn write_run_text(w: &mut XmlWriter, text: &str) -> Result<(), DocxError> {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            empty(w, "w:br", &[])?;
        }
        for (j, piece) in line.trim_end_matches('\r').split('\t').enumerate() {
            if j > 0 {
                empty(w, "w:tab", &[])?;
            }
            if !piece.is_empty() {
                start(w, "w:t", &[("xml:space", "preserve")])?;
                w.write_event(Event::Text(BytesText::new(piece)))?;
                end(w, "w:t")?;
            }
        }
    }
    Ok(())
}

fn write_section_properties(w: &mut XmlWriter, margins: &PageMargins) -> Result<(), DocxError> {
    let top = inch_twips(margins.top_in);
    let bottom = inch_twips(margins.bottom_in);
    let left = inch_twips(margins.left_in);
    let right = inch_twips(margins.right_in);
    let gutter = inch_twips(margins.gutter_in);

    start(w, "w:sectPr", &[])?;
    empty(w, "w:pgSz", &[("w:w", PAGE_WIDTH_TWIPS), ("w:h", PAGE_HEIGHT_TWIPS)])?;
    empty(
        w,
        "w:pgMar",
        &[
            ("w:top", top.as_str()),
            ("w:right", right.as_str()),
            ("w:bottom", bottom.as_str()),
            ("w:left", left.as_str()),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", gutter.as_str()),
        ],
    )?;
    end(w, "w:sectPr")
}

// ────────────────────────────────────────────────────────────────────────────
// word/_rels/document.xml.rels
// ────────────────────────────────────────────────────────────────────────────

fn document_rels_xml(links: &[String]) -> Result<Vec<u8>, DocxError> {
    let mut w = Writer::new(Cursor::new(Vec::new()));
    declaration(&mut w)?;
    start(&mut w, "Relationships", &[("xmlns", PACKAGE_REL_NS)])?;
    empty(
        &mut w,
        "Relationship",
        &[
            ("Id", "rId1"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles",
            ),
            ("Target", "styles.xml"),
        ],
    )?;
    empty(
        &mut w,
        "Relationship",
        &[
            ("Id", "rId2"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering",
            ),
            ("Target", "numbering.xml"),
        ],
    )?;
    for (i, url) in links.iter().enumerate() {
        let id = hyperlink_rel_id(i + 1);
        empty(
            &mut w,
            "Relationship",
            &[
                ("Id", id.as_str()),
                ("Type", HYPERLINK_REL_TYPE),
                ("Target", url.as_str()),
                ("TargetMode", "External"),
            ],
        )?;
    }
    end(&mut w, "Relationships")?;
    Ok(w.into_inner().into_inner())
}

/// Relationship id of the n-th hyperlink (1-based); rId1 and rId2 are styles and numbering.
fn hyperlink_rel_id(n: usize) -> String {
    format!("rId{}", n + 2)
}

// ────────────────────────────────────────────────────────────────────────────
// XML helpers
// ────────────────────────────────────────────────────────────────────────────

fn declaration(w: &mut XmlWriter) -> Result<(), DocxError> {
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(())
}

fn start(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocxError> {
    w.write_event(Event::Start(
        BytesStart::new(name).with_attributes(attrs.iter().copied()),
    ))?;
    Ok(())
}

fn empty(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocxError> {
    w.write_event(Event::Empty(
        BytesStart::new(name).with_attributes(attrs.iter().copied()),
    ))?;
    Ok(())
}

fn end(w: &mut XmlWriter, name: &str) -> Result<(), DocxError> {
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn twips(points: f32) -> i64 {
    (points * 20.0).round() as i64
}

fn inch_twips(inches: f32) -> String {
    ((inches * 1440.0).round() as i64).to_string()
}
