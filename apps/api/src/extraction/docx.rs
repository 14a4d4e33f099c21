use std::io::{Cursor, Read};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use tracing::warn;

const DOCUMENT_PART: &str = "word/document.xml";

/// Paragraph text in document order, each paragraph terminated by a newline.
/// Anything that is not a readable WordprocessingML package yields "".
pub(super) fn extract(bytes: &[u8]) -> String {
    match read_document_xml(bytes) {
        Ok(xml) => paragraphs_to_text(&xml),
        Err(e) => {
            warn!("DOCX text extraction failed: {e:#}");
            String::new()
        }
    }
}

fn read_document_xml(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).context("not a ZIP container")?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("missing {DOCUMENT_PART}"))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .with_context(|| format!("{DOCUMENT_PART} is not valid UTF-8"))?;
    Ok(xml)
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"(?s)<w:t(?:\s[^>]*)?>(?P<text>.*?)</w:t>",
            r"|(?P<tab><w:tab/>)",
            r"|(?P<br><w:(?:br|cr)\b[^>]*/>)",
            r"|(?P<end></w:p>|<w:p(?:\s[^>]*)?/>)",
        ))
        .expect("static DOCX token pattern")
    })
}

fn entity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"&(?:#x(?P<hex>[0-9a-fA-F]+)|#(?P<dec>[0-9]+)|(?P<named>lt|gt|amp|quot|apos));")
            .expect("static XML entity pattern")
    })
}

/// Walks text runs, tabs, breaks and paragraph ends of `word/document.xml`.
fn paragraphs_to_text(xml: &str) -> String {
    let mut text = String::new();
    let mut paragraph = String::new();

    for caps in token_pattern().captures_iter(xml) {
        if let Some(run) = caps.name("text") {
            paragraph.push_str(&unescape_xml(run.as_str()));
        } else if caps.name("tab").is_some() {
            paragraph.push('\t');
        } else if caps.name("br").is_some() {
            paragraph.push('\n');
        } else if caps.name("end").is_some() {
            text.push_str(&paragraph);
            text.push('\n');
            paragraph.clear();
        }
    }

    // Text after the last paragraph end (malformed but recoverable).
    if !paragraph.is_empty() {
        text.push_str(&paragraph);
        text.push('\n');
    }
    text
}

fn unescape_xml(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    entity_pattern()
        .replace_all(raw, |caps: &Captures<'_>| {
            let decoded = if let Some(hex) = caps.name("hex") {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = caps.name("dec") {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match caps.name("named").map(|m| m.as_str()) {
                    Some("lt") => Some('<'),
                    Some("gt") => Some('>'),
                    Some("amp") => Some('&'),
                    Some("quot") => Some('"'),
                    Some("apos") => Some('\''),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;

    use super::*;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p w:rsidR="00A1"><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>
      <w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r>
    </w:p>
    <w:p/>
    <w:p><w:r><w:t>Rust</w:t><w:tab/><w:t>Go &amp; C&#233;</w:t></w:r></w:p>
    <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t><w:br/><w:t>Two</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
  </w:body>
</w:document>"#;

    fn build_docx(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
            for (name, content) in parts {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_extracts_paragraphs_in_order() {
        let bytes = build_docx(&[("[Content_Types].xml", "<Types/>"), (DOCUMENT_PART, BODY)]);
        assert_eq!(extract(&bytes), "Jane Doe\n\nRust\tGo & Cé\nCell\nTwo\n");
    }

    #[test]
    fn test_zip_without_document_part_is_empty() {
        let bytes = build_docx(&[("hello.txt", "not word")]);
        assert_eq!(extract(&bytes), "");
    }

    #[test]
    fn test_unescape_leaves_unknown_entities() {
        assert_eq!(unescape_xml("a &lt;b&gt; &nbsp; &#x41;"), "a <b> &nbsp; A");
    }

    #[test]
    fn test_tab_stop_definitions_are_not_text() {
        let xml = r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="1"/></w:tabs></w:pPr><w:r><w:t>x</w:t></w:r></w:p>"#;
        assert_eq!(paragraphs_to_text(xml), "x\n");
    }
}
