use crate::error::CompileError;
use crate::model::{
    DecisionDefinition, ExecutableDefinition, ExecutableType, FlowDefinition, OperationDefinition,
};
use crate::plan::{ExecutionPlan, ExecutionStep, ReservedAddress};
use log::debug;

#[cfg(feature = "debug-tools")]
use crate::plan::visualizer::visualize_plan;

pub mod allocator;
pub mod factory;
pub mod navigation;
mod steps;

pub use factory::{ExternalStepFactory, LocalStepFactory, StepFactory};

use steps::StepCompiler;

/// Language tag stamped on plans unless the builder overrides it.
pub const DEFAULT_LANGUAGE: &str = "keiro";

/// Compiles executable definitions into addressable execution plans.
///
/// A `Compiler` holds no per-compile state, so one instance can be shared between threads
/// and reused for any number of executables.
pub struct Compiler {
    language: String,
    step_factory: Box<dyn StepFactory>,
    external_step_factory: Box<dyn StepFactory>,
}

pub struct CompilerBuilder {
    language: String,
    step_factory: Box<dyn StepFactory>,
    external_step_factory: Box<dyn StepFactory>,
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerBuilder {
    pub fn new() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            step_factory: Box::new(LocalStepFactory),
            external_step_factory: Box::new(ExternalStepFactory),
        }
    }
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }
    pub fn with_step_factory(mut self, factory: Box<dyn StepFactory>) -> Self {
        self.step_factory = factory;
        self
    }
    pub fn with_external_step_factory(mut self, factory: Box<dyn StepFactory>) -> Self {
        self.external_step_factory = factory;
        self
    }
    pub fn build(self) -> Compiler {
        Compiler {
            language: self.language,
            step_factory: self.step_factory,
            external_step_factory: self.external_step_factory,
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        CompilerBuilder::new().build()
    }
}

impl Compiler {
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn compile(&self, executable: &ExecutableDefinition) -> Result<ExecutionPlan, CompileError> {
        match executable {
            ExecutableDefinition::Operation(op) => self.compile_operation(op),
            ExecutableDefinition::Decision(decision) => self.compile_decision(decision),
            ExecutableDefinition::Flow(flow) => self.compile_flow(flow),
        }
    }

    /// Start(1), Action(2), End(3).
    pub fn compile_operation(
        &self,
        op: &OperationDefinition,
    ) -> Result<ExecutionPlan, CompileError> {
        debug!("compiling operation '{}'", op.name);
        let mut plan = ExecutionPlan::new(&op.name, &op.id, &self.language, 1);
        plan.add_step(ExecutionStep::start(
            1,
            &op.name,
            ExecutableType::Operation,
            &op.inputs,
            &op.pre_exec_action_data,
        ))?;
        plan.add_step(ExecutionStep::action(2, &op.action))?;
        plan.add_step(ExecutionStep::end(
            3,
            &op.name,
            ExecutableType::Operation,
            &op.outputs,
            &op.results,
            &op.post_exec_action_data,
        ))?;
        Ok(plan)
    }

    /// Start(1), End(2).
    pub fn compile_decision(
        &self,
        decision: &DecisionDefinition,
    ) -> Result<ExecutionPlan, CompileError> {
        debug!("compiling decision '{}'", decision.name);
        let mut plan = ExecutionPlan::new(&decision.name, &decision.id, &self.language, 1);
        plan.add_step(ExecutionStep::start(
            1,
            &decision.name,
            ExecutableType::Decision,
            &decision.inputs,
            &decision.pre_exec_action_data,
        ))?;
        plan.add_step(ExecutionStep::end(
            2,
            &decision.name,
            ExecutableType::Decision,
            &decision.outputs,
            &decision.results,
            &decision.post_exec_action_data,
        ))?;
        Ok(plan)
    }

    /// Precondition, Start and End at the reserved addresses, then every step reachable
    /// from the entry step.
    pub fn compile_flow(&self, flow: &FlowDefinition) -> Result<ExecutionPlan, CompileError> {
        debug!(
            "compiling flow '{}' ({} steps, {} results)",
            flow.name,
            flow.steps.len(),
            flow.results.len()
        );
        let entry = flow.entry_step().ok_or_else(|| CompileError::EmptyGraph {
            flow: flow.name.clone(),
        })?;

        let mut plan = ExecutionPlan::new(
            &flow.name,
            &flow.id,
            &self.language,
            ReservedAddress::Precondition.address(),
        );
        plan.worker_group = flow.worker_group.clone();

        plan.add_step(ExecutionStep::precondition(
            ReservedAddress::Precondition.address(),
            &flow.name,
        ))?;
        plan.add_step(ExecutionStep::start(
            ReservedAddress::Start.address(),
            &flow.name,
            ExecutableType::Flow,
            &flow.inputs,
            &flow.pre_exec_action_data,
        ))?;
        plan.add_step(ExecutionStep::end(
            ReservedAddress::End.address(),
            &flow.name,
            ExecutableType::Flow,
            &flow.outputs,
            &flow.results,
            &flow.post_exec_action_data,
        ))?;

        let step_records = StepCompiler::new(
            flow,
            self.step_factory.as_ref(),
            self.external_step_factory.as_ref(),
        )?
        .compile(entry)?;
        plan.add_steps(step_records)?;

        debug!("flow '{}' compiled into {} records", flow.name, plan.len());
        #[cfg(feature = "debug-tools")]
        debug!("\n{}", visualize_plan(&plan));

        Ok(plan)
    }
}
