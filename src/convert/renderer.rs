//! The page layout collaborator.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use log::debug;

use crate::error::{Error, Result};

/// Renders the restricted HTML subset into page-description bytes.
///
/// Rendering is opaque to the pipeline; a failure here aborts the run
/// before any output file is created or modified.
pub trait PageRenderer {
    /// Render an HTML document into a PDF.
    fn render(&self, html: &[u8]) -> Result<Vec<u8>>;
}

/// Renderer that pipes HTML through an external layout engine process.
///
/// The default invocation is `weasyprint - -`, reading HTML on stdin and
/// writing the PDF to stdout.
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    /// Create the default renderer invocation.
    pub fn new() -> Self {
        Self::with_command("weasyprint", ["-", "-"])
    }

    /// Create a renderer for an arbitrary command.
    pub fn with_command(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for CommandRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer for CommandRenderer {
    fn render(&self, html: &[u8]) -> Result<Vec<u8>> {
        debug!("rendering {} bytes of HTML via {}", html.len(), self.program);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Render(format!("failed to launch {}: {}", self.program, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Render("renderer stdin unavailable".into()))?;
        // Feed stdin from its own thread: a renderer that streams output
        // while reading input would otherwise fill both pipe buffers and
        // deadlock against this writer.
        let html = html.to_vec();
        let writer = thread::spawn(move || stdin.write_all(&html));

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Render(format!("waiting for {}: {}", self.program, e)))?;
        let wrote = writer
            .join()
            .map_err(|_| Error::Render("renderer stdin writer panicked".into()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Render(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim(),
            )));
        }
        wrote.map_err(|e| Error::Render(format!("{} closed its input: {}", self.program, e)))?;
        Ok(output.stdout)
    }
}
