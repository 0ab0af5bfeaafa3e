use super::address::Address;
use super::navigation::{NavigationOptions, ResultNavigation};
use crate::model::{ActionData, Argument, ExecutableType, Input, Output, ResultDefinition};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A step's resolved outgoing edges, keyed by result name in declaration order.
pub type NavigationValues = IndexMap<String, ResultNavigation>;

/// Which executor a record is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepHost {
    #[default]
    Local,
    External,
}

/// A single addressable record of an execution plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStep {
    pub id: Address,
    pub host: StepHost,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub navigation_options: Vec<NavigationOptions>,
    pub kind: StepKind,
}

/// The variant-specific payload of an `ExecutionStep`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    Start {
        executable_name: String,
        executable_type: ExecutableType,
        inputs: Vec<Input>,
        pre_exec_action_data: ActionData,
    },
    Action {
        action_data: ActionData,
    },
    End {
        executable_name: String,
        executable_type: ExecutableType,
        outputs: Vec<Output>,
        results: Vec<ResultDefinition>,
        post_exec_action_data: ActionData,
    },
    Precondition {
        flow_name: String,
    },
    WorkerGroup {
        step_name: String,
        worker_group: Option<String>,
        robot_group: Option<String>,
        pre_step_action_data: ActionData,
    },
    Begin {
        step_name: String,
        ref_id: String,
        arguments: Vec<Argument>,
        worker_group: Option<String>,
        pre_step_action_data: ActionData,
    },
    FinishStep {
        step_name: String,
        worker_group: Option<String>,
        navigation_values: NavigationValues,
        parallel_loop: bool,
        post_step_action_data: ActionData,
    },
    AddBranches {
        step_name: String,
        join_address: Address,
        branch_begin_address: Address,
        flow_id: String,
        pre_step_action_data: ActionData,
    },
    JoinBranches {
        step_name: String,
        navigation_values: NavigationValues,
        post_step_action_data: ActionData,
    },
}

impl ExecutionStep {
    pub fn new(id: Address, host: StepHost, kind: StepKind) -> Self {
        Self {
            id,
            host,
            navigation_options: Vec::new(),
            kind,
        }
    }

    /// Creates the Start record of an executable.
    pub fn start(
        id: Address,
        executable_name: &str,
        executable_type: ExecutableType,
        inputs: &[Input],
        pre_exec_action_data: &ActionData,
    ) -> Self {
        Self::new(
            id,
            StepHost::Local,
            StepKind::Start {
                executable_name: executable_name.to_string(),
                executable_type,
                inputs: inputs.to_vec(),
                pre_exec_action_data: pre_exec_action_data.clone(),
            },
        )
    }

    /// Creates the record that runs an operation's action.
    pub fn action(id: Address, action_data: &ActionData) -> Self {
        Self::new(
            id,
            StepHost::Local,
            StepKind::Action {
                action_data: action_data.clone(),
            },
        )
    }

    /// Creates the End record of an executable.
    pub fn end(
        id: Address,
        executable_name: &str,
        executable_type: ExecutableType,
        outputs: &[Output],
        results: &[ResultDefinition],
        post_exec_action_data: &ActionData,
    ) -> Self {
        Self::new(
            id,
            StepHost::Local,
            StepKind::End {
                executable_name: executable_name.to_string(),
                executable_type,
                outputs: outputs.to_vec(),
                results: results.to_vec(),
                post_exec_action_data: post_exec_action_data.clone(),
            },
        )
    }

    pub fn precondition(id: Address, flow_name: &str) -> Self {
        Self::new(
            id,
            StepHost::Local,
            StepKind::Precondition {
                flow_name: flow_name.to_string(),
            },
        )
    }

    /// The name of the flow step this record was emitted for, if any.
    pub fn step_name(&self) -> Option<&str> {
        match &self.kind {
            StepKind::WorkerGroup { step_name, .. }
            | StepKind::Begin { step_name, .. }
            | StepKind::FinishStep { step_name, .. }
            | StepKind::AddBranches { step_name, .. }
            | StepKind::JoinBranches { step_name, .. } => Some(step_name),
            StepKind::Start { .. }
            | StepKind::Action { .. }
            | StepKind::End { .. }
            | StepKind::Precondition { .. } => None,
        }
    }

    /// The resolved outgoing edges, for the records that carry them.
    pub fn navigation_values(&self) -> Option<&NavigationValues> {
        match &self.kind {
            StepKind::FinishStep {
                navigation_values, ..
            }
            | StepKind::JoinBranches {
                navigation_values, ..
            } => Some(navigation_values),
            _ => None,
        }
    }

    /// Short, stable label for the record kind.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            StepKind::Start { .. } => "Start",
            StepKind::Action { .. } => "Action",
            StepKind::End { .. } => "End",
            StepKind::Precondition { .. } => "Precondition",
            StepKind::WorkerGroup { .. } => "WorkerGroup",
            StepKind::Begin { .. } => "Begin",
            StepKind::FinishStep { .. } => "FinishStep",
            StepKind::AddBranches { .. } => "AddBranches",
            StepKind::JoinBranches { .. } => "JoinBranches",
        }
    }
}
