use crate::plan::Address;
use thiserror::Error;

/// Errors that can occur while compiling an executable into an execution plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Flow: {flow} has no steps")]
    EmptyGraph { flow: String },

    #[error(
        "Step '{step}' in flow '{flow}' navigates to '{target}', which is neither a step nor a declared result"
    )]
    UnresolvedReference {
        flow: String,
        step: String,
        target: String,
    },

    #[error("Step name '{step}' is declared more than once in flow '{flow}'")]
    DuplicateStepName { flow: String, step: String },

    #[error("Step name '{step}' in flow '{flow}' is also declared as a flow result")]
    StepNameShadowsResult { flow: String, step: String },

    #[error("Execution plan '{plan}' already contains a step at address {address}")]
    AddressCollision { plan: String, address: Address },
}

/// Errors that can occur when converting a custom user format into a keiro `ExecutableDefinition`.
#[derive(Error, Debug, Clone)]
pub enum ModelConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}
