use super::{ExecutionPlan, ExecutionStep, NavigationValues, ReservedAddress, StepHost, StepKind};
use itertools::Itertools;
use std::fmt::Write;

/// Formats a complete `ExecutionPlan` into a human-readable string for debugging.
pub fn visualize_plan(plan: &ExecutionPlan) -> String {
    let mut output = String::new();
    writeln!(
        &mut output,
        "======== EXECUTION PLAN: {} ({}) ========",
        plan.name, plan.language
    )
    .unwrap();
    if let Some(group) = &plan.worker_group {
        writeln!(&mut output, "worker group: {}", group).unwrap();
    }
    writeln!(&mut output, "begin: {:04}", plan.begin_address).unwrap();
    writeln!(&mut output).unwrap();

    for step in plan.steps() {
        writeln!(&mut output, "{}", format_step(step)).unwrap();
    }

    writeln!(
        &mut output,
        "\n================ END OF PLAN ================"
    )
    .unwrap();
    output
}

fn format_step(step: &ExecutionStep) -> String {
    let host = match step.host {
        StepHost::Local => "",
        StepHost::External => " [external]",
    };
    let detail = match &step.kind {
        StepKind::Start {
            executable_name, ..
        }
        | StepKind::End {
            executable_name, ..
        } => executable_name.clone(),
        StepKind::Precondition { flow_name } => flow_name.clone(),
        StepKind::Action { .. } => String::new(),
        StepKind::WorkerGroup {
            step_name,
            worker_group,
            ..
        } => match worker_group {
            Some(group) => format!("{} @{}", step_name, group),
            None => step_name.clone(),
        },
        StepKind::Begin {
            step_name, ref_id, ..
        } => format!("{} -> {}", step_name, ref_id),
        StepKind::AddBranches {
            step_name,
            join_address,
            branch_begin_address,
            ..
        } => format!(
            "{} branch {:04} join {:04}",
            step_name, branch_begin_address, join_address
        ),
        StepKind::FinishStep {
            step_name,
            navigation_values,
            ..
        }
        | StepKind::JoinBranches {
            step_name,
            navigation_values,
            ..
        } => format!("{} {}", step_name, format_navigation(navigation_values)),
    };
    format!("{:04}: {:<14}{}{}", step.id, step.kind_name(), detail, host)
        .trim_end()
        .to_string()
}

fn format_navigation(navigation_values: &NavigationValues) -> String {
    let edges = navigation_values
        .iter()
        .map(|(result, nav)| match &nav.preset_result {
            Some(preset) if nav.next_address == ReservedAddress::End.address() => {
                format!("{} -> END({})", result, preset)
            }
            _ => format!("{} -> {:04}", result, nav.next_address),
        })
        .join(", ");
    format!("{{{}}}", edges)
}
