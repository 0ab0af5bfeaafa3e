use super::definition::ExecutableDefinition;
use crate::error::ModelConversionError;

/// A trait for custom data models that can be converted into a keiro `ExecutableDefinition`.
///
/// This is the seam between whatever parses your workflow source and the plan compiler.
/// Implement it on your own parse tree to hand the compiler a canonical graph.
///
/// # Example
///
/// ```rust
/// use keiro::error::ModelConversionError;
/// use keiro::model::{ExecutableDefinition, FlowDefinition, IntoExecutable, ResultDefinition, StepDefinition};
///
/// // 1. Your own parse tree.
/// struct ParsedTask { name: String, next: String }
/// struct ParsedFlow { name: String, tasks: Vec<ParsedTask> }
///
/// // 2. Translate it into keiro's model.
/// impl IntoExecutable for ParsedFlow {
///     fn into_executable(self) -> Result<ExecutableDefinition, ModelConversionError> {
///         if self.tasks.is_empty() {
///             return Err(ModelConversionError::ValidationError(format!(
///                 "flow '{}' declares no tasks",
///                 self.name
///             )));
///         }
///         let steps = self
///             .tasks
///             .into_iter()
///             .map(|task| StepDefinition::new(task.name).with_navigation("SUCCESS", task.next))
///             .collect();
///         Ok(ExecutableDefinition::Flow(FlowDefinition {
///             id: format!("user.flows.{}", self.name),
///             name: self.name,
///             results: vec![ResultDefinition::new("SUCCESS")],
///             steps,
///             ..Default::default()
///         }))
///     }
/// }
///
/// let parsed = ParsedFlow {
///     name: "deploy".to_string(),
///     tasks: vec![ParsedTask { name: "build".to_string(), next: "SUCCESS".to_string() }],
/// };
/// assert_eq!(parsed.into_executable().unwrap().name(), "deploy");
/// ```
pub trait IntoExecutable {
    /// Consumes the object and converts it into a keiro executable definition.
    fn into_executable(self) -> Result<ExecutableDefinition, ModelConversionError>;
}

impl IntoExecutable for ExecutableDefinition {
    fn into_executable(self) -> Result<ExecutableDefinition, ModelConversionError> {
        Ok(self)
    }
}
