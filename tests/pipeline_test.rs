//! End-to-end tests for the conversion pipeline.

mod common;

use common::{tiny_pdf, MockRenderer};
use gempress::convert::{write_artifact, Converter};
use gempress::{detect_format, extract_source, Error, InputFormat, SIGNATURE};

const SOURCE: &str = "%!GEMDOC author=Jane Doe\n%!GEMDOC date=2024-06-01\n\
                      # Voyage Notes\n## Spring Leg\n\nFirst paragraph.\n\n\
                      * one\n* two\n\n> said somebody\n> said somebody else\n\n\
                      ```\n  ascii art here\n```\n\n\
                      => gemini://example.org/next.gmi Next entry\n\
                      => gemini://example.org/bare\n";

#[test]
fn test_source_round_trips_through_artifact() {
    let artifact = Converter::with_renderer(MockRenderer)
        .convert(SOURCE)
        .unwrap();
    assert_eq!(detect_format(&artifact), InputFormat::Polyglot);
    assert_eq!(extract_source(&artifact).unwrap(), SOURCE.as_bytes());
}

#[test]
fn test_in_place_reconversion_keeps_one_region() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.pdf");
    let converter = Converter::with_renderer(MockRenderer);

    // First conversion, then convert the artifact file in place twice more
    std::fs::write(&path, SOURCE).unwrap();
    for _ in 0..3 {
        let input = std::fs::read(&path).unwrap();
        let artifact = converter.convert_input(&input).unwrap();
        write_artifact(&path, &artifact).unwrap();
    }

    let final_bytes = std::fs::read(&path).unwrap();
    let text = String::from_utf8_lossy(&final_bytes);
    assert_eq!(text.matches(SIGNATURE).count(), 1);
    assert_eq!(text.matches("stream\n").count(), 2); // one stream + one endstream
    assert_eq!(extract_source(&final_bytes).unwrap(), SOURCE.as_bytes());
}

#[test]
fn test_foreign_pdf_input_is_rejected() {
    let converter = Converter::with_renderer(MockRenderer);
    let result = converter.convert_input(&tiny_pdf());
    assert!(matches!(result, Err(Error::MissingSignature)));
}

#[test]
fn test_failed_run_leaves_existing_artifact_alone() {
    struct FailingRenderer;
    impl gempress::PageRenderer for FailingRenderer {
        fn render(&self, _html: &[u8]) -> gempress::Result<Vec<u8>> {
            Err(Error::Render("boom".into()))
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.pdf");

    let good = Converter::with_renderer(MockRenderer).convert(SOURCE).unwrap();
    write_artifact(&path, &good).unwrap();

    // The failing run errors out before any write happens
    let result = Converter::with_renderer(FailingRenderer).convert(SOURCE);
    assert!(result.is_err());
    assert_eq!(std::fs::read(&path).unwrap(), good);
}

#[test]
fn test_custom_stylesheet_is_embedded() {
    let css = "p { color: rebeccapurple; }";
    let html = {
        let (blocks, meta) = gempress::parse(SOURCE);
        gempress::to_html(&blocks, &meta, css)
    };
    assert!(html.contains(css));
    assert!(!html.contains("Ayu Light"));
}

#[test]
fn test_fetched_url_lands_in_colophon_only_when_undeclared() {
    // SOURCE declares no url directive, so the fetch URL fills the slot
    let (_, meta) = gempress::parse(SOURCE);
    assert_eq!(meta.url, None);

    let declared = "%!GEMDOC url=gemini://example.org/canonical.gmi\n# T\n";
    let (_, meta) = gempress::parse(declared);
    assert_eq!(meta.url.as_deref(), Some("gemini://example.org/canonical.gmi"));
}
