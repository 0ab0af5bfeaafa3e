//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the keiro crate.
//!
//! # Example
//!
//! ```rust
//! use keiro::prelude::*;
//!
//! # fn run_example() -> Result<(), CompileError> {
//! let op = OperationDefinition {
//!     id: "user.ops.ping".to_string(),
//!     name: "ping".to_string(),
//!     ..Default::default()
//! };
//! let plan = Compiler::default().compile(&ExecutableDefinition::Operation(op))?;
//! assert_eq!(plan.len(), 3);
//! # Ok(())
//! # }
//! # run_example().unwrap();
//! ```

// Compilation
pub use crate::compiler::{
    Compiler, CompilerBuilder, DEFAULT_LANGUAGE, ExternalStepFactory, LocalStepFactory,
    StepFactory,
};

// Graph model
pub use crate::model::{
    ActionData, Argument, DecisionDefinition, ExecutableDefinition, ExecutableType,
    FlowDefinition, Input, IntoExecutable, NavigationEntry, NavigationRoute, NavigationTarget,
    OperationDefinition, Output, ResultDefinition, StepDefinition, StepHosting,
};

// Execution plan
pub use crate::plan::visualizer::visualize_plan;
pub use crate::plan::{
    Address, ExecutionPlan, ExecutionStep, NavigationOptions, NavigationValues, ReservedAddress,
    ResultNavigation, StepHost, StepKind,
};

// Error types
pub use crate::error::{CompileError, ModelConversionError};
