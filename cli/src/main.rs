//! gempress CLI - gemtext to gemtext/PDF polyglot converter

mod fetch;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use fetch::GeminiFetcher;
use gempress::convert::{write_artifact, Converter};
use gempress::{load_stylesheet, Fetcher, DEFAULT_STYLESHEET};

#[derive(Parser)]
#[command(name = "gempress")]
#[command(version)]
#[command(about = "Convert gemtext documents into gemtext/PDF polyglot files", long_about = None)]
struct Cli {
    /// Source document: a gemini:// URL or a local path
    #[arg(value_name = "SOURCE", required_unless_present = "print_stylesheet")]
    source: Option<String>,

    /// Output file (defaults to the source name with a .pdf extension)
    #[arg(short, long, value_name = "FILE", conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Stylesheet to embed instead of the built-in default
    #[arg(short, long, value_name = "FILE")]
    stylesheet: Option<PathBuf>,

    /// Replace the local input file with the converted artifact
    #[arg(long, requires = "source")]
    in_place: bool,

    /// Print the built-in stylesheet and exit, converting nothing
    #[arg(long)]
    print_stylesheet: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.print_stylesheet {
        print!("{}", DEFAULT_STYLESHEET);
        return Ok(());
    }

    // clap guarantees the source is present past this point
    let source = cli.source.as_deref().ok_or("no source given")?;
    let stylesheet = load_stylesheet(cli.stylesheet.as_deref())?;
    let converter = Converter::new().with_stylesheet(stylesheet);

    let output = if is_remote(source) {
        if cli.in_place {
            return Err("--in-place only applies to local files".into());
        }
        let input = GeminiFetcher::new()?.fetch(source)?;
        let artifact = converter
            .with_source_url(source)
            .convert_input(&input)?;
        let output = cli
            .output
            .unwrap_or_else(|| remote_output_name(source));
        write_artifact(&output, &artifact)?;
        output
    } else {
        let path = Path::new(source);
        let input = fs::read(path)?;
        let artifact = converter.convert_input(&input)?;
        let output = if cli.in_place {
            path.to_path_buf()
        } else {
            cli.output.unwrap_or_else(|| path.with_extension("pdf"))
        };
        write_artifact(&output, &artifact)?;
        output
    };

    println!("{} {}", "Saved to".green(), output.display());
    Ok(())
}

fn is_remote(source: &str) -> bool {
    source.starts_with("gemini://")
}

/// Derive an output filename from the last URL path segment.
fn remote_output_name(url: &str) -> PathBuf {
    let path = url
        .strip_prefix("gemini://")
        .unwrap_or(url)
        .split(['?', '#'])
        .next()
        .unwrap_or("");
    let segment = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("");
    // A bare host or trailing slash leaves no usable segment
    let stem = if segment.is_empty() || !path.contains('/') {
        "index"
    } else {
        segment
    };
    PathBuf::from(stem).with_extension("pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("gemini://example.org/doc.gmi"));
        assert!(!is_remote("notes/doc.gmi"));
        assert!(!is_remote("gemini-notes.gmi"));
    }

    #[test]
    fn test_remote_output_name_from_segment() {
        assert_eq!(
            remote_output_name("gemini://example.org/log/entry.gmi"),
            PathBuf::from("entry.pdf")
        );
        assert_eq!(
            remote_output_name("gemini://example.org/log/entry.gmi?v=2"),
            PathBuf::from("entry.pdf")
        );
    }

    #[test]
    fn test_remote_output_name_for_bare_host() {
        assert_eq!(
            remote_output_name("gemini://example.org"),
            PathBuf::from("index.pdf")
        );
        assert_eq!(
            remote_output_name("gemini://example.org/"),
            PathBuf::from("index.pdf")
        );
    }
}
