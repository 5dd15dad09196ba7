use crate::sandbox::Sandbox;
use crate::types::{Outcome, Result};

/// Evaluation step contract shared by all comparator variants.
///
/// A step is invoked once per evaluation attempt with the caller's sandbox
/// handle and the names of the submission output and reference output inside
/// it. It resolves expected cases (absent output, mismatch, match) into an
/// [`Outcome`]; an `Err` is reserved for sandbox I/O failure, where the
/// attempt could not be judged at all.
pub trait EvaluationStep: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(
        &self,
        sandbox: &dyn Sandbox,
        output_filename: &str,
        reference_filename: &str,
    ) -> Result<Outcome>;
}
