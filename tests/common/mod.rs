//! Shared helpers for integration tests.

use gempress::convert::PageRenderer;
use gempress::Result;

/// Minimal single-section classic-xref PDF with correct byte offsets.
pub fn tiny_pdf() -> Vec<u8> {
    let header = "%PDF-1.4\n";
    let objects = [
        "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n",
        "2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n",
        "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>\nendobj\n",
    ];
    let mut out = String::from(header);
    let mut offsets = Vec::new();
    for object in objects {
        offsets.push(out.len());
        out.push_str(object);
    }
    let xref_pos = out.len();
    out.push_str("xref\n0 4\n0000000000 65535 f \n");
    for offset in &offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str("trailer\n<< /Size 4 /Root 1 0 R >>\n");
    out.push_str(&format!("startxref\n{}\n%%EOF\n", xref_pos));
    out.into_bytes()
}

/// Renderer standing in for the external layout engine.
pub struct MockRenderer;

impl PageRenderer for MockRenderer {
    fn render(&self, _html: &[u8]) -> Result<Vec<u8>> {
        Ok(tiny_pdf())
    }
}
