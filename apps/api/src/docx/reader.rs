//! Plain-text projection of an uploaded `.docx`.
//!
//! Only `word/document.xml` is read. Each `w:p` becomes one string built from its `w:t`
//! text (hyperlinked runs included), with `w:tab` as `\t` and `w:br`/`w:cr` as `\n`.
//! Blank paragraphs are dropped. Tables, headers and footnotes are not structured, only
//! flattened wherever their paragraphs appear in the body.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::docx::DocxError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Non-blank paragraph texts of the document body, in order.
pub fn extract_paragraphs(bytes: &[u8]) -> Result<Vec<String>, DocxError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut content = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut file) => {
            file.read_to_string(&mut content)?;
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(DocxError::MissingPart(DOCUMENT_PART));
        }
        Err(e) => return Err(e.into()),
    }
    paragraphs_from_xml(&content)
}

/// Paragraphs joined with newlines, as fed to the polish step.
pub fn paragraphs_to_text(paragraphs: &[String]) -> String {
    paragraphs.join("\n")
}

fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => current = Some(String::new()),
                b"r" => in_run = true,
                b"t" => in_text = in_run,
                _ => {}
            },
            // Tab stops in w:pPr/w:tabs are also `w:tab`; only run content is text.
            Event::Empty(e) if in_run => {
                if let Some(text) = current.as_mut() {
                    match e.local_name().as_ref() {
                        b"tab" => text.push('\t'),
                        b"br" | b"cr" => text.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(e) => {
                if in_text {
                    if let Some(text) = current.as_mut() {
                        text.push_str(&e.unescape()?);
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"r" => in_run = false,
                b"p" => {
                    if let Some(text) = current.take() {
                        if !text.trim().is_empty() {
                            paragraphs.push(text);
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::write_docx;
    use crate::layout::buffer::{DocumentBuffer, SectionKind};
    use crate::layout::styles::StylePreset;

    #[test]
    fn test_extracts_text_per_paragraph_and_skips_blank() {
        let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
<w:p><w:r><w:t>   </w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C &amp; D</w:t></w:r></w:p>
<w:p><w:hyperlink r:id="rId3"><w:r><w:t>LinkedIn</w:t></w:r></w:hyperlink></w:p>
</w:body></w:document>"#;
        let paragraphs = paragraphs_from_xml(xml).unwrap();
        assert_eq!(paragraphs, vec!["Jane Doe", "A\tB\nC & D", "LinkedIn"]);
    }

    #[test]
    fn test_tab_stop_definitions_are_not_text() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:pPr><w:tabs><w:tab w:val="right" w:pos="9360"/></w:tabs></w:pPr><w:r><w:t>Jane Doe</w:t></w:r></w:p>
<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Engineer</w:t><w:tab/><w:t>2020</w:t></w:r></w:p>
</w:body></w:document>"#;
        let paragraphs = paragraphs_from_xml(xml).unwrap();
        assert_eq!(paragraphs, vec!["Jane Doe", "Engineer\t2020"]);
    }

    #[test]
    fn test_round_trip_through_writer() {
        let mut buffer = DocumentBuffer::new();
        buffer
            .add_paragraph(SectionKind::Summary, StylePreset::BodyText.paragraph())
            .push_run("Builds <reliable> things & more", StylePreset::BodyText)
            .unwrap();
        buffer.add_paragraph(SectionKind::Summary, StylePreset::BodyText.paragraph());
        let line = buffer.add_paragraph(SectionKind::Header, StylePreset::ContactLine.paragraph());
        line.push_link("LinkedIn", "https://linkedin.com/in/x", StylePreset::Hyperlink)
            .unwrap();
        line.push_run(" ⬥ ", StylePreset::ContactLine).unwrap();
        line.push_run("Line one\nLine two", StylePreset::ContactLine).unwrap();

        let bytes = write_docx(&buffer).unwrap();
        assert_eq!(
            extract_paragraphs(&bytes).unwrap(),
            vec![
                "Builds <reliable> things & more",
                "LinkedIn ⬥ Line one\nLine two"
            ]
        );
        assert_eq!(
            paragraphs_to_text(&extract_paragraphs(&bytes).unwrap()),
            "Builds <reliable> things & more\nLinkedIn ⬥ Line one\nLine two"
        );
    }

    #[test]
    fn test_non_zip_input_is_rejected() {
        let err = extract_paragraphs(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, DocxError::Zip(_)));
    }

    #[test]
    fn test_zip_without_document_part_is_rejected() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("notes.txt", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"hello").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = extract_paragraphs(&bytes).unwrap_err();
        assert!(matches!(err, DocxError::MissingPart("word/document.xml")));
    }
}
