use thiserror::Error;

use crate::input::InputError;
use crate::pipeline::PipelineError;

pub mod dropnan;
pub mod join;
pub mod mapgenes;
pub mod mkconfig;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
