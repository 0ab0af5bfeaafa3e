//! Common test utilities for building flow definitions.
use keiro::prelude::*;

/// Results every fixture flow declares.
#[allow(dead_code)]
pub fn default_results() -> Vec<ResultDefinition> {
    vec![
        ResultDefinition::new("SUCCESS"),
        ResultDefinition::new("FAILURE"),
    ]
}

/// Wraps steps into a flow named `F` with the default results.
#[allow(dead_code)]
pub fn flow_with_steps(steps: Vec<StepDefinition>) -> FlowDefinition {
    FlowDefinition {
        id: "user.flows.F".to_string(),
        name: "F".to_string(),
        namespace: "user.flows".to_string(),
        results: default_results(),
        steps,
        ..Default::default()
    }
}

/// A step that ends the flow with whatever result it yields.
#[allow(dead_code)]
pub fn terminal_step(name: &str) -> StepDefinition {
    StepDefinition::new(name)
        .with_ref_id("user.ops.noop")
        .with_navigation("SUCCESS", "SUCCESS")
        .with_navigation("FAILURE", "FAILURE")
}

/// `step1 --SUCCESS--> step2 --SUCCESS/FAILURE--> flow results`.
#[allow(dead_code)]
pub fn create_linear_flow() -> FlowDefinition {
    flow_with_steps(vec![
        StepDefinition::new("step1")
            .with_ref_id("user.ops.first")
            .with_navigation("SUCCESS", "step2"),
        terminal_step("step2"),
    ])
}

/// The linear flow with `step1` turned into a parallel loop.
#[allow(dead_code)]
pub fn create_parallel_flow() -> FlowDefinition {
    let mut flow = create_linear_flow();
    flow.steps[0].parallel_loop = true;
    flow
}

/// A chain of `count` steps, each pointing at the next; `parallel` selects loop steps by index.
#[allow(dead_code)]
pub fn create_chain_flow(count: usize, parallel: impl Fn(usize) -> bool) -> FlowDefinition {
    let steps = (0..count)
        .map(|i| {
            let step = if i + 1 == count {
                terminal_step(&format!("s{}", i))
            } else {
                StepDefinition::new(format!("s{}", i))
                    .with_navigation("SUCCESS", format!("s{}", i + 1))
                    .with_navigation("FAILURE", "FAILURE")
            };
            if parallel(i) {
                step.with_parallel_loop()
            } else {
                step
            }
        })
        .collect();
    flow_with_steps(steps)
}

/// Looks up the FinishStep navigation of a named step.
#[allow(dead_code)]
pub fn finish_navigation(plan: &ExecutionPlan, step_name: &str) -> NavigationValues {
    plan.find_step(step_name, "FinishStep")
        .and_then(|s| s.navigation_values())
        .cloned()
        .expect("FinishStep not found")
}
