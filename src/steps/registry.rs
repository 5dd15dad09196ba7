use std::sync::Arc;

use crate::messages::MessageCatalog;
use crate::steps::step::EvaluationStep;
use crate::steps::whitediff::WhiteDiffStep;
use crate::types::{EvalError, Result};

pub fn step_for(name: &str, catalog: Arc<MessageCatalog>) -> Result<Box<dyn EvaluationStep>> {
    match name {
        "white-diff" | "whitediff" => Ok(Box::new(WhiteDiffStep::new(catalog)?)),
        _ => Err(EvalError::Config(format!(
            "unsupported evaluation step: {name}"
        ))),
    }
}
