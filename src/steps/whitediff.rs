//! White-diff comparison step.
//!
//! Compares submission output to reference output line by line, ignoring
//! differences in the amount and kind of whitespace. Operates on raw bytes
//! throughout; submission output may be empty, binary, or huge and is never
//! assumed to be text.

use std::sync::Arc;

use log::info;

use crate::messages::MessageCatalog;
use crate::sandbox::{LineStream, Sandbox};
use crate::steps::step::EvaluationStep;
use crate::types::{Outcome, Result};

/// Whitespace bytes recognized by the comparison: the intersection of ASCII
/// and Unicode White_Space characters.
const WHITES: [u8; 6] = [b' ', b'\t', b'\n', 0x0b, 0x0c, b'\r'];

fn is_white(byte: u8) -> bool {
    WHITES.contains(&byte)
}

/// Map a line to the canonical form of its whitespace equivalence class.
///
/// Two lines are considered equal up to whitespace exactly when their
/// canonical forms are byte-identical: runs of whitespace collapse to one
/// space, leading and trailing whitespace vanishes, all other bytes pass
/// through untouched.
pub fn canonicalize(line: &[u8]) -> Vec<u8> {
    let mut canonical = Vec::with_capacity(line.len());
    for token in line.split(|b| is_white(*b)).filter(|t| !t.is_empty()) {
        if !canonical.is_empty() {
            canonical.push(b' ');
        }
        canonical.extend_from_slice(token);
    }
    canonical
}

/// Strip leading and trailing whitespace bytes from a raw line.
fn strip_whites(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !is_white(*b))
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !is_white(*b))
        .map_or(start, |i| i + 1);
    &line[start..end]
}

/// Decide whether two line streams are equal up to whitespace.
///
/// Line `i` of one stream is matched against line `i` of the other; a
/// stream that runs out early is still equivalent as long as every
/// remaining line on the longer side is whitespace-only. Each iteration
/// advances at least one stream, so the loop finishes after at most one
/// pass over the longer stream.
pub fn white_diff(output: &mut dyn LineStream, reference: &mut dyn LineStream) -> Result<bool> {
    loop {
        let lout = output.next_line()?;
        let lres = reference.next_line()?;

        // Both streams finished: comparison succeeded
        if lout.is_empty() && lres.is_empty() {
            return Ok(true);
        }

        // Only one finished: ok if the other contains only blanks
        if lout.is_empty() || lres.is_empty() {
            if !strip_whites(&lout).is_empty() || !strip_whites(&lres).is_empty() {
                return Ok(false);
            }
            continue;
        }

        // Both still have lines: ok if they agree except for whitespace
        if canonicalize(&lout) != canonicalize(&lres) {
            return Ok(false);
        }
    }
}

/// Pass/fail evaluation step backed by [`white_diff`].
pub struct WhiteDiffStep {
    catalog: Arc<MessageCatalog>,
}

impl WhiteDiffStep {
    /// Build the step, failing fast if the catalog lacks any message key
    /// the step can emit.
    pub fn new(catalog: Arc<MessageCatalog>) -> Result<Self> {
        catalog.require(&["success", "wrong", "nooutput"])?;
        Ok(Self { catalog })
    }

    fn outcome(&self, score: f64, key: &str, extra: Option<&str>) -> Result<Outcome> {
        let mut text = vec![self.catalog.lookup(key)?.to_string()];
        if let Some(value) = extra {
            text.push(value.to_string());
        }
        Ok(Outcome::new(score, text))
    }
}

impl EvaluationStep for WhiteDiffStep {
    fn name(&self) -> &'static str {
        "white-diff"
    }

    fn evaluate(
        &self,
        sandbox: &dyn Sandbox,
        output_filename: &str,
        reference_filename: &str,
    ) -> Result<Outcome> {
        if !sandbox.file_exists(output_filename)? {
            info!("submission produced no output file {output_filename}");
            return self.outcome(0.0, "nooutput", Some(output_filename));
        }

        let mut output = sandbox.open_line_stream(output_filename)?;
        let mut reference = sandbox.open_line_stream(reference_filename)?;
        if white_diff(output.as_mut(), reference.as_mut())? {
            self.outcome(1.0, "success", None)
        } else {
            self.outcome(0.0, "wrong", None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EvalError;
    use std::collections::HashMap;
    use std::io::Cursor;

    use crate::sandbox::BufLineStream;

    fn stream(bytes: &[u8]) -> BufLineStream<Cursor<Vec<u8>>> {
        BufLineStream::new(Cursor::new(bytes.to_vec()))
    }

    fn diff(a: &[u8], b: &[u8]) -> bool {
        white_diff(&mut stream(a), &mut stream(b)).unwrap()
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for line in [
            b"a  \t b".as_slice(),
            b"  a b  \n",
            b"",
            b" \t\r\n",
            b"\xffbinary\x00 stays \xfe",
        ] {
            let once = canonicalize(line);
            assert_eq!(canonicalize(&once), once);
        }
    }

    #[test]
    fn test_canonicalize_collapses_whitespace_runs() {
        assert_eq!(canonicalize(b"a  \t b"), canonicalize(b"a b"));
        assert_eq!(canonicalize(b"a\x0b\x0c\rb"), b"a b");
    }

    #[test]
    fn test_canonicalize_strips_leading_and_trailing() {
        assert_eq!(canonicalize(b"  a b  \n"), canonicalize(b"a b"));
        assert_eq!(canonicalize(b"  a b  \n"), b"a b");
    }

    #[test]
    fn test_canonicalize_whitespace_only_becomes_empty() {
        assert_eq!(canonicalize(b" \t\x0b\x0c\r\n"), b"");
    }

    #[test]
    fn test_canonicalize_leaves_other_bytes_alone() {
        assert_eq!(canonicalize(b"\x00\xff\x01"), b"\x00\xff\x01");
    }

    #[test]
    fn test_equivalence_is_reflexive() {
        let content = b"1 2\n3\t4\n\n  5\n";
        assert!(diff(content, content));
    }

    #[test]
    fn test_whitespace_amount_and_kind_ignored() {
        assert!(diff(b"1\t2\n3 4\n", b"1 2\n3   4\n"));
    }

    #[test]
    fn test_trailing_blank_lines_tolerated() {
        assert!(diff(b"1\n2\n", b"1\n2\n\n   \n"));
        assert!(diff(b"1\n2\n\n   \n", b"1\n2\n"));
    }

    #[test]
    fn test_many_trailing_blank_lines_terminate() {
        let mut padded = b"1\n".to_vec();
        padded.extend_from_slice(&b"\n".repeat(1000));
        assert!(diff(b"1\n", &padded));
    }

    #[test]
    fn test_nonblank_line_after_exhaustion_fails() {
        assert!(!diff(b"1\n", b"1\n\n\nx\n"));
    }

    #[test]
    fn test_genuine_mismatch_detected() {
        assert!(!diff(b"1\n2\n", b"1\n3\n"));
    }

    #[test]
    fn test_interior_blank_lines_are_significant() {
        assert!(!diff(b"1\n\n2\n", b"1\n2\n"));
    }

    #[test]
    fn test_empty_vs_whitespace_only_file() {
        assert!(diff(b"", b"\n"));
        assert!(!diff(b"", b"x\n"));
    }

    #[test]
    fn test_missing_final_newline_does_not_matter() {
        assert!(diff(b"42", b"42\n"));
    }

    #[test]
    fn test_token_boundaries_matter() {
        assert!(!diff(b"ab\n", b"a b\n"));
    }

    struct FailingStream;

    impl LineStream for FailingStream {
        fn next_line(&mut self) -> Result<Vec<u8>> {
            Err(EvalError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "sandbox handle closed",
            )))
        }
    }

    #[test]
    fn test_stream_read_failure_propagates() {
        let result = white_diff(&mut FailingStream, &mut stream(b"1\n"));
        assert!(matches!(result, Err(EvalError::Io(_))));
    }

    /// In-memory sandbox for exercising the step without a filesystem.
    struct MemSandbox {
        files: HashMap<String, Vec<u8>>,
    }

    impl MemSandbox {
        fn new(files: &[(&str, &[u8])]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(n, b)| (n.to_string(), b.to_vec()))
                    .collect(),
            }
        }
    }

    impl Sandbox for MemSandbox {
        fn file_exists(&self, name: &str) -> Result<bool> {
            Ok(self.files.contains_key(name))
        }

        fn open_line_stream(&self, name: &str) -> Result<Box<dyn LineStream>> {
            let bytes = self.files.get(name).ok_or_else(|| {
                EvalError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    name.to_string(),
                ))
            })?;
            Ok(Box::new(stream(bytes)))
        }
    }

    fn step() -> WhiteDiffStep {
        WhiteDiffStep::new(Arc::new(MessageCatalog::builtin())).unwrap()
    }

    #[test]
    fn test_step_reports_missing_output() {
        let sandbox = MemSandbox::new(&[("res.txt", b"42\n")]);
        let outcome = step().evaluate(&sandbox, "output.txt", "res.txt").unwrap();
        assert_eq!(outcome.score, 0.0);
        assert_eq!(
            outcome.text,
            vec![
                "Evaluation didn't produce file %s".to_string(),
                "output.txt".to_string()
            ]
        );
    }

    #[test]
    fn test_step_accepts_equivalent_output() {
        let sandbox = MemSandbox::new(&[("output.txt", b"42  \n\n"), ("res.txt", b"42\n")]);
        let outcome = step().evaluate(&sandbox, "output.txt", "res.txt").unwrap();
        assert_eq!(outcome.score, 1.0);
        assert_eq!(outcome.text, vec!["Output is correct".to_string()]);
    }

    #[test]
    fn test_step_rejects_wrong_output() {
        let sandbox = MemSandbox::new(&[("output.txt", b"41\n"), ("res.txt", b"42\n")]);
        let outcome = step().evaluate(&sandbox, "output.txt", "res.txt").unwrap();
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.text, vec!["Output isn't correct".to_string()]);
    }

    #[test]
    fn test_step_surfaces_reference_open_failure() {
        let sandbox = MemSandbox::new(&[("output.txt", b"42\n")]);
        let result = step().evaluate(&sandbox, "output.txt", "res.txt");
        assert!(matches!(result, Err(EvalError::Io(_))));
    }

    #[test]
    fn test_step_requires_its_catalog_keys() {
        let mut catalog = MessageCatalog::new();
        catalog.insert("success", "ok");
        assert!(matches!(
            WhiteDiffStep::new(Arc::new(catalog)),
            Err(EvalError::Config(_))
        ));
    }
}
