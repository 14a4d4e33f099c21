use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

/// Page-by-page text in document order, each page terminated by a newline.
/// Unreadable documents yield an empty string.
pub(super) fn extract(bytes: &[u8]) -> String {
    // The PDF decoder panics on some malformed inputs instead of erroring.
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    match result {
        Ok(Ok(pages)) => join_pages(&pages),
        Ok(Err(e)) => {
            warn!("PDF text extraction failed: {e}");
            String::new()
        }
        Err(_) => {
            warn!("PDF text extraction aborted on a malformed document");
            String::new()
        }
    }
}

fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text
}

/// Minimal uncompressed PDF with one Helvetica `Tj` line per page.
#[cfg(test)]
pub(super) fn build_test_pdf(pages: &[&str]) -> Vec<u8> {
    let font_id = 3 + 2 * pages.len();
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 3 + 2 * i))
        .collect();

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        ),
    ];
    for (i, text) in pages.iter().enumerate() {
        let content = format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {} 0 R >>",
            4 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = pdf.len();
    pdf.extend_from_slice(
        format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes(),
    );
    for offset in offsets {
        pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    pdf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_pages_in_order() {
        let text = extract(&build_test_pdf(&["HelloPage", "SecondPage"]));

        let first = text.find("HelloPage").expect("first page text");
        let second = text.find("SecondPage").expect("second page text");
        assert!(first < second);
        assert!(text.ends_with('\n'));
        assert!(text[first..second].contains('\n'));
    }

    #[test]
    fn test_join_pages_terminates_each_page() {
        let pages = vec!["first".to_string(), "second".to_string()];
        assert_eq!(join_pages(&pages), "first\nsecond\n");
    }

    #[test]
    fn test_join_pages_empty_document() {
        assert_eq!(join_pages(&[]), "");
    }

    #[test]
    fn test_garbage_is_empty() {
        assert_eq!(extract(b"not a pdf at all"), "");
    }
}
