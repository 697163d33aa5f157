use std::io::{self, Write};

use crate::FeedbackDocument;

/// Owns a document while it is being built and writes it exactly once.
///
/// [`Emission::finish`] writes and reports I/O errors. If the guard is dropped
/// without finishing (early return, panic unwind), `Drop` writes whatever has
/// been built so far and logs any failure.
pub struct Emission<W: Write> {
    document: FeedbackDocument,
    out: Option<W>,
}

impl<W: Write> Emission<W> {
    pub fn new(out: W) -> Self {
        Self {
            document: FeedbackDocument::new(),
            out: Some(out),
        }
    }

    pub fn document(&self) -> &FeedbackDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut FeedbackDocument {
        &mut self.document
    }

    pub fn finish(mut self) -> io::Result<()> {
        match self.out.take() {
            Some(out) => write_document(&self.document, out),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for Emission<W> {
    fn drop(&mut self) {
        if let Some(out) = self.out.take() {
            if let Err(e) = write_document(&self.document, out) {
                log::error!("Failed to emit feedback: {e}");
            }
        }
    }
}

fn write_document<W: Write>(document: &FeedbackDocument, mut out: W) -> io::Result<()> {
    let json = document.to_pretty_json().map_err(io::Error::other)?;
    writeln!(out, "{json}")?;
    out.flush()
}
