use crate::model::StepDefinition;
use crate::plan::{Address, ExecutionStep, NavigationValues, StepHost, StepKind};

/// Defines the contract for producing the records a flow step compiles into.
///
/// The step compiler decides *where* each record lives; a factory decides *what* it carries.
/// Two factories are wired into every `Compiler`: one for locally hosted steps and one for
/// steps whose execution is handed to an external executor.
pub trait StepFactory: Send + Sync {
    fn create_worker_group_step(
        &self,
        id: Address,
        step: &StepDefinition,
        worker_group: Option<&str>,
    ) -> ExecutionStep;

    fn create_begin_step(
        &self,
        id: Address,
        step: &StepDefinition,
        worker_group: Option<&str>,
    ) -> ExecutionStep;

    fn create_finish_step(
        &self,
        id: Address,
        step: &StepDefinition,
        navigation_values: NavigationValues,
        worker_group: Option<&str>,
        parallel_loop: bool,
    ) -> ExecutionStep;

    fn create_add_branches_step(
        &self,
        id: Address,
        join_address: Address,
        branch_begin_address: Address,
        step: &StepDefinition,
        flow_id: &str,
    ) -> ExecutionStep;

    fn create_join_branches_step(
        &self,
        id: Address,
        step: &StepDefinition,
        navigation_values: NavigationValues,
    ) -> ExecutionStep;
}

/// Produces records dispatched to the local worker pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStepFactory;

/// Produces records routed to an externally hosted executor.
/// Robot groups only apply to local workers and are never carried.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalStepFactory;

/// Defines the `StepFactory` impls that differ only in their host and robot-group policy.
macro_rules! define_step_factories {
    ( $( ($factory:ident, $host:expr, $robot_group:expr) ),* $(,)? ) => {
        $(
            impl StepFactory for $factory {
                fn create_worker_group_step(
                    &self,
                    id: Address,
                    step: &StepDefinition,
                    worker_group: Option<&str>,
                ) -> ExecutionStep {
                    let robot_group: fn(&StepDefinition) -> Option<String> = $robot_group;
                    worker_group_step($host, id, step, worker_group, robot_group(step))
                }

                fn create_begin_step(
                    &self,
                    id: Address,
                    step: &StepDefinition,
                    worker_group: Option<&str>,
                ) -> ExecutionStep {
                    begin_step($host, id, step, worker_group)
                }

                fn create_finish_step(
                    &self,
                    id: Address,
                    step: &StepDefinition,
                    navigation_values: NavigationValues,
                    worker_group: Option<&str>,
                    parallel_loop: bool,
                ) -> ExecutionStep {
                    finish_step($host, id, step, navigation_values, worker_group, parallel_loop)
                }

                fn create_add_branches_step(
                    &self,
                    id: Address,
                    join_address: Address,
                    branch_begin_address: Address,
                    step: &StepDefinition,
                    flow_id: &str,
                ) -> ExecutionStep {
                    add_branches_step($host, id, join_address, branch_begin_address, step, flow_id)
                }

                fn create_join_branches_step(
                    &self,
                    id: Address,
                    step: &StepDefinition,
                    navigation_values: NavigationValues,
                ) -> ExecutionStep {
                    join_branches_step($host, id, step, navigation_values)
                }
            }
        )*
    };
}

define_step_factories! {
    (LocalStepFactory, StepHost::Local, |step| step.robot_group.clone()),
    (ExternalStepFactory, StepHost::External, |_| None),
}

fn worker_group_step(
    host: StepHost,
    id: Address,
    step: &StepDefinition,
    worker_group: Option<&str>,
    robot_group: Option<String>,
) -> ExecutionStep {
    ExecutionStep::new(
        id,
        host,
        StepKind::WorkerGroup {
            step_name: step.name.clone(),
            worker_group: worker_group.map(str::to_string),
            robot_group,
            pre_step_action_data: step.pre_step_action_data.clone(),
        },
    )
}

fn begin_step(
    host: StepHost,
    id: Address,
    step: &StepDefinition,
    worker_group: Option<&str>,
) -> ExecutionStep {
    ExecutionStep::new(
        id,
        host,
        StepKind::Begin {
            step_name: step.name.clone(),
            ref_id: step.ref_id.clone(),
            arguments: step.arguments.clone(),
            worker_group: worker_group.map(str::to_string),
            pre_step_action_data: step.pre_step_action_data.clone(),
        },
    )
}

fn finish_step(
    host: StepHost,
    id: Address,
    step: &StepDefinition,
    navigation_values: NavigationValues,
    worker_group: Option<&str>,
    parallel_loop: bool,
) -> ExecutionStep {
    ExecutionStep::new(
        id,
        host,
        StepKind::FinishStep {
            step_name: step.name.clone(),
            worker_group: worker_group.map(str::to_string),
            navigation_values,
            parallel_loop,
            post_step_action_data: step.post_step_action_data.clone(),
        },
    )
}

fn add_branches_step(
    host: StepHost,
    id: Address,
    join_address: Address,
    branch_begin_address: Address,
    step: &StepDefinition,
    flow_id: &str,
) -> ExecutionStep {
    ExecutionStep::new(
        id,
        host,
        StepKind::AddBranches {
            step_name: step.name.clone(),
            join_address,
            branch_begin_address,
            flow_id: flow_id.to_string(),
            pre_step_action_data: step.pre_step_action_data.clone(),
        },
    )
}

fn join_branches_step(
    host: StepHost,
    id: Address,
    step: &StepDefinition,
    navigation_values: NavigationValues,
) -> ExecutionStep {
    ExecutionStep::new(
        id,
        host,
        StepKind::JoinBranches {
            step_name: step.name.clone(),
            navigation_values,
            post_step_action_data: step.post_step_action_data.clone(),
        },
    )
}
