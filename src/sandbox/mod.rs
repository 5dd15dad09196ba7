//! Sandbox file-access capability.
//!
//! Evaluation steps never touch the host filesystem directly. They read
//! submission and reference output through a [`Sandbox`] handle scoped to
//! one evaluation attempt, and consume file contents as lazy streams of
//! byte lines.

pub mod dir;

use std::io::BufRead;

use crate::types::Result;

/// Lazy producer of byte lines from one sandboxed file.
///
/// A byte line is a maximal run of bytes terminated by a single line feed
/// or by end of stream; the terminating line feed, when present, is part of
/// the line. An exhausted stream keeps yielding empty lines on every
/// subsequent read. Streams are finite and not restartable; re-reading a
/// file requires opening a fresh stream.
pub trait LineStream {
    /// Read the next line, or an empty vector once the stream is exhausted.
    ///
    /// Read failures surface as [`EvalError::Io`](crate::EvalError::Io);
    /// they must never be mistaken for end of stream.
    fn next_line(&mut self) -> Result<Vec<u8>>;
}

/// File-read capability of one evaluation attempt's sandbox.
///
/// The handle is owned by the caller of the evaluation step; the step only
/// reads through it. Concurrent evaluation attempts must each hold their own
/// handle and share no mutable state.
pub trait Sandbox {
    /// Whether the sandbox contains a regular file with the given name.
    ///
    /// A failing check is an I/O error, not "absent".
    fn file_exists(&self, name: &str) -> Result<bool>;

    /// Open the named file as a fresh line stream.
    fn open_line_stream(&self, name: &str) -> Result<Box<dyn LineStream>>;
}

/// Adapter from any buffered reader to a [`LineStream`].
///
/// Buffers one line at a time, so arbitrarily large files are never held
/// in memory whole.
pub struct BufLineStream<R: BufRead> {
    inner: R,
}

impl<R: BufRead> BufLineStream<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: BufRead> LineStream for BufLineStream<R> {
    fn next_line(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::new();
        self.inner.read_until(b'\n', &mut line)?;
        Ok(line)
    }
}
