use super::binding::{Argument, Input, Output};
use super::result::ResultDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque action payload attached before or after an executable or a step runs.
/// The compiler never looks inside; it only forwards the payload to the plan.
pub type ActionData = BTreeMap<String, serde_json::Value>;

/// Extra routing metadata attached to a structured navigation target.
pub type NavigationOptionsData = BTreeMap<String, serde_json::Value>;

/// The kind of executable a plan was compiled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutableType {
    Operation,
    Decision,
    Flow,
}

/// The complete, canonical definition of an executable, ready for compilation.
/// This is the target structure for any upstream parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutableDefinition {
    Operation(OperationDefinition),
    Decision(DecisionDefinition),
    Flow(FlowDefinition),
}

impl ExecutableDefinition {
    pub fn name(&self) -> &str {
        match self {
            ExecutableDefinition::Operation(op) => &op.name,
            ExecutableDefinition::Decision(decision) => &decision.name,
            ExecutableDefinition::Flow(flow) => &flow.name,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ExecutableDefinition::Operation(op) => &op.id,
            ExecutableDefinition::Decision(decision) => &decision.id,
            ExecutableDefinition::Flow(flow) => &flow.id,
        }
    }

    pub fn executable_type(&self) -> ExecutableType {
        match self {
            ExecutableDefinition::Operation(_) => ExecutableType::Operation,
            ExecutableDefinition::Decision(_) => ExecutableType::Decision,
            ExecutableDefinition::Flow(_) => ExecutableType::Flow,
        }
    }
}

/// A single action wrapped with its inputs, outputs and results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub pre_exec_action_data: ActionData,
    #[serde(default)]
    pub post_exec_action_data: ActionData,
    #[serde(default)]
    pub action: ActionData,
    #[serde(default)]
    pub inputs: Vec<Input>,
    #[serde(default)]
    pub outputs: Vec<Output>,
    #[serde(default)]
    pub results: Vec<ResultDefinition>,
}

/// An executable that only evaluates its inputs and picks a result; it has no action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub pre_exec_action_data: ActionData,
    #[serde(default)]
    pub post_exec_action_data: ActionData,
    #[serde(default)]
    pub inputs: Vec<Input>,
    #[serde(default)]
    pub outputs: Vec<Output>,
    #[serde(default)]
    pub results: Vec<ResultDefinition>,
}

/// A graph of named steps. The first step in `steps` is the entry step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub pre_exec_action_data: ActionData,
    #[serde(default)]
    pub post_exec_action_data: ActionData,
    #[serde(default)]
    pub inputs: Vec<Input>,
    #[serde(default)]
    pub outputs: Vec<Output>,
    #[serde(default)]
    pub results: Vec<ResultDefinition>,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
    #[serde(default)]
    pub worker_group: Option<String>,
}

impl FlowDefinition {
    /// The step execution starts from.
    pub fn entry_step(&self) -> Option<&StepDefinition> {
        self.steps.first()
    }
}

/// Where a step's records are dispatched at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepHosting {
    /// Runs on the local worker pool.
    #[default]
    Local,
    /// Hands off to an externally hosted executor.
    External,
}

/// Defines a single named node in a flow's graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepDefinition {
    pub name: String,
    /// Ordered `result -> target` pairs. Duplicated result names are allowed; the first one wins.
    #[serde(default)]
    pub navigation: Vec<NavigationEntry>,
    #[serde(default)]
    pub parallel_loop: bool,
    #[serde(default)]
    pub worker_group: Option<String>,
    #[serde(default)]
    pub robot_group: Option<String>,
    #[serde(default)]
    pub pre_step_action_data: ActionData,
    #[serde(default)]
    pub post_step_action_data: ActionData,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    /// Id of the executable this step invokes.
    #[serde(default)]
    pub ref_id: String,
    #[serde(default)]
    pub hosting: StepHosting,
}

impl StepDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = ref_id.into();
        self
    }

    pub fn with_navigation(mut self, result: impl Into<String>, target: impl Into<String>) -> Self {
        self.navigation.push(NavigationEntry {
            result: result.into(),
            target: NavigationTarget::Name(target.into()),
        });
        self
    }

    pub fn with_navigation_options(
        mut self,
        result: impl Into<String>,
        target: impl Into<String>,
        options: NavigationOptionsData,
    ) -> Self {
        self.navigation.push(NavigationEntry {
            result: result.into(),
            target: NavigationTarget::Options(NavigationRoute {
                next_step: target.into(),
                options,
            }),
        });
        self
    }

    pub fn with_parallel_loop(mut self) -> Self {
        self.parallel_loop = true;
        self
    }

    pub fn with_worker_group(mut self, worker_group: impl Into<String>) -> Self {
        self.worker_group = Some(worker_group.into());
        self
    }

    pub fn with_robot_group(mut self, robot_group: impl Into<String>) -> Self {
        self.robot_group = Some(robot_group.into());
        self
    }

    pub fn hosted_externally(mut self) -> Self {
        self.hosting = StepHosting::External;
        self
    }
}

/// One outgoing edge of a step: when the step yields `result`, continue at `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub result: String,
    pub target: NavigationTarget,
}

/// The target of a navigation entry: either a plain step/result name, or a name with routing options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavigationTarget {
    Name(String),
    Options(NavigationRoute),
}

/// A structured navigation target: the name to continue at plus free-form routing options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationRoute {
    pub next_step: String,
    #[serde(flatten)]
    pub options: NavigationOptionsData,
}

impl NavigationTarget {
    /// The step or result name this target points at.
    pub fn name(&self) -> &str {
        match self {
            NavigationTarget::Name(name) => name,
            NavigationTarget::Options(route) => &route.next_step,
        }
    }

    pub fn options(&self) -> Option<&NavigationOptionsData> {
        match self {
            NavigationTarget::Name(_) => None,
            NavigationTarget::Options(route) => Some(&route.options),
        }
    }
}
