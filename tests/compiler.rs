//! Tests for flow compilation: address allocation, navigation and failure modes.
mod common;
use common::*;
use keiro::prelude::*;

#[test]
fn test_linear_flow_addresses() {
    let plan = Compiler::default()
        .compile_flow(&create_linear_flow())
        .expect("Failed to compile");

    assert_eq!(plan.len(), 9);
    assert_eq!(plan.name, "F");
    assert_eq!(plan.source_id, "user.flows.F");
    assert_eq!(plan.language, DEFAULT_LANGUAGE);
    assert_eq!(plan.begin_address, ReservedAddress::Precondition.address());

    assert_eq!(plan.step(0).unwrap().kind_name(), "End");
    assert_eq!(plan.step(1).unwrap().kind_name(), "Precondition");
    assert_eq!(plan.step(2).unwrap().kind_name(), "Start");

    assert_eq!(plan.find_step("step1", "WorkerGroup").unwrap().id, 3);
    assert_eq!(plan.find_step("step1", "Begin").unwrap().id, 4);
    assert_eq!(plan.find_step("step1", "FinishStep").unwrap().id, 5);
    assert_eq!(plan.find_step("step2", "WorkerGroup").unwrap().id, 6);
    assert_eq!(plan.find_step("step2", "Begin").unwrap().id, 7);
    assert_eq!(plan.find_step("step2", "FinishStep").unwrap().id, 8);
}

#[test]
fn test_linear_flow_navigation() {
    let plan = Compiler::default()
        .compile_flow(&create_linear_flow())
        .unwrap();

    let step1 = finish_navigation(&plan, "step1");
    assert_eq!(step1.len(), 1);
    assert_eq!(step1["SUCCESS"], ResultNavigation::new(6, None));

    let step2 = finish_navigation(&plan, "step2");
    assert_eq!(
        step2["SUCCESS"],
        ResultNavigation::new(0, Some("SUCCESS".to_string()))
    );
    assert_eq!(
        step2["FAILURE"],
        ResultNavigation::new(0, Some("FAILURE".to_string()))
    );
}

#[test]
fn test_parallel_loop_step_expands_to_fork_join() {
    let plan = Compiler::default()
        .compile_flow(&create_parallel_flow())
        .unwrap();

    assert_eq!(plan.len(), 3 + 5 + 3);
    assert_eq!(plan.step_addresses("step1"), vec![3, 4, 5, 6, 7]);
    assert_eq!(plan.step_addresses("step2"), vec![8, 9, 10]);

    match &plan.step(4).unwrap().kind {
        StepKind::AddBranches {
            join_address,
            branch_begin_address,
            flow_id,
            ..
        } => {
            assert_eq!(*join_address, 7);
            assert_eq!(*branch_begin_address, 5);
            assert_eq!(flow_id, "user.flows.F");
        }
        other => panic!("Expected AddBranches at 4, found {:?}", other),
    }
    assert_eq!(plan.step(5).unwrap().kind_name(), "Begin");

    match &plan.step(6).unwrap().kind {
        StepKind::FinishStep { parallel_loop, .. } => assert!(*parallel_loop),
        other => panic!("Expected FinishStep at 6, found {:?}", other),
    }

    let join = plan.step(7).unwrap();
    assert_eq!(join.kind_name(), "JoinBranches");
    assert_eq!(
        join.navigation_values().unwrap()["SUCCESS"],
        ResultNavigation::new(8, None)
    );
}

#[test]
fn test_empty_flow_is_rejected() {
    let flow = flow_with_steps(vec![]);
    let result = Compiler::default().compile_flow(&flow);

    match result {
        Err(CompileError::EmptyGraph { flow }) => assert_eq!(flow, "F"),
        other => panic!("Expected EmptyGraph error, got {:?}", other),
    }
}

#[test]
fn test_unresolved_target_is_rejected() {
    let flow = flow_with_steps(vec![
        StepDefinition::new("step1").with_navigation("SUCCESS", "missing"),
    ]);
    let err = Compiler::default().compile_flow(&flow).unwrap_err();

    assert_eq!(
        err,
        CompileError::UnresolvedReference {
            flow: "F".to_string(),
            step: "step1".to_string(),
            target: "missing".to_string(),
        }
    );
}

#[test]
fn test_unresolved_target_in_nested_step_names_that_step() {
    let flow = flow_with_steps(vec![
        StepDefinition::new("step1").with_navigation("SUCCESS", "step2"),
        StepDefinition::new("step2").with_navigation("SUCCESS", "SUCCES"),
    ]);

    match Compiler::default().compile_flow(&flow) {
        Err(CompileError::UnresolvedReference { step, target, .. }) => {
            assert_eq!(step, "step2");
            assert_eq!(target, "SUCCES");
        }
        other => panic!("Expected UnresolvedReference error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_step_names_are_rejected() {
    let flow = flow_with_steps(vec![terminal_step("step1"), terminal_step("step1")]);

    match Compiler::default().compile_flow(&flow) {
        Err(CompileError::DuplicateStepName { flow, step }) => {
            assert_eq!(flow, "F");
            assert_eq!(step, "step1");
        }
        other => panic!("Expected DuplicateStepName error, got {:?}", other),
    }
}

#[test]
fn test_step_sharing_a_result_name_is_rejected() {
    let mut flow = flow_with_steps(vec![
        StepDefinition::new("X")
            .with_parallel_loop()
            .with_navigation("SUCCESS", "SUCCESS"),
    ]);
    flow.results.push(ResultDefinition::new("X"));

    // Rejected on every run, never compiled at a shifted address.
    for _ in 0..50 {
        match Compiler::default().compile_flow(&flow) {
            Err(CompileError::StepNameShadowsResult { flow, step }) => {
                assert_eq!(flow, "F");
                assert_eq!(step, "X");
            }
            other => panic!("Expected StepNameShadowsResult error, got {:?}", other),
        }
    }
}

#[test]
fn test_non_entry_step_sharing_a_result_name_is_rejected() {
    let mut flow = flow_with_steps(vec![
        StepDefinition::new("step1").with_navigation("SUCCESS", "cleanup"),
        terminal_step("cleanup"),
    ]);
    flow.results.push(ResultDefinition::new("cleanup"));

    let err = Compiler::default().compile_flow(&flow).unwrap_err();
    assert_eq!(
        err,
        CompileError::StepNameShadowsResult {
            flow: "F".to_string(),
            step: "cleanup".to_string(),
        }
    );
}

#[test]
fn test_parallel_entry_step_starts_at_first_step_address() {
    let plan = Compiler::default()
        .compile_flow(&flow_with_steps(vec![
            StepDefinition::new("loop")
                .with_parallel_loop()
                .with_navigation("SUCCESS", "SUCCESS"),
        ]))
        .unwrap();

    assert_eq!(plan.step_addresses("loop"), vec![3, 4, 5, 6, 7]);
}

#[test]
fn test_plan_size_follows_step_widths() {
    let compiler = Compiler::default();
    for count in 1..6 {
        let plain = compiler
            .compile_flow(&create_chain_flow(count, |_| false))
            .unwrap();
        assert_eq!(plain.len(), 3 + 3 * count);

        let mixed = compiler
            .compile_flow(&create_chain_flow(count, |i| i % 2 == 0))
            .unwrap();
        let parallel = (0..count).filter(|i| i % 2 == 0).count();
        assert_eq!(mixed.len(), 3 + 3 * (count - parallel) + 5 * parallel);
    }
}

#[test]
fn test_reserved_addresses_never_hold_user_steps() {
    let plan = Compiler::default()
        .compile_flow(&create_chain_flow(4, |i| i == 1))
        .unwrap();

    for step in plan.steps().filter(|s| s.step_name().is_some()) {
        assert!(
            !ReservedAddress::is_reserved(step.id),
            "step record {} placed at a reserved address",
            step.id
        );
    }
}

#[test]
fn test_compilation_is_deterministic() {
    let flow = create_chain_flow(5, |i| i == 2);
    let compiler = Compiler::default();
    let first = compiler.compile_flow(&flow).unwrap();
    let second = compiler.compile_flow(&flow).unwrap();

    assert_eq!(first, second);
    for step in &flow.steps {
        assert_eq!(
            first.step_addresses(&step.name),
            second.step_addresses(&step.name)
        );
    }
}

#[test]
fn test_first_navigation_for_a_result_wins() {
    let flow = flow_with_steps(vec![
        StepDefinition::new("step1")
            .with_navigation("SUCCESS", "SUCCESS")
            .with_navigation("SUCCESS", "FAILURE"),
    ]);
    let plan = Compiler::default().compile_flow(&flow).unwrap();

    let nav = finish_navigation(&plan, "step1");
    assert_eq!(nav.len(), 1);
    assert_eq!(nav["SUCCESS"].preset_result.as_deref(), Some("SUCCESS"));
}

#[test]
fn test_duplicate_result_still_compiles_its_target() {
    let flow = flow_with_steps(vec![
        StepDefinition::new("step1")
            .with_navigation("SUCCESS", "SUCCESS")
            .with_navigation("SUCCESS", "step2"),
        terminal_step("step2"),
    ]);
    let plan = Compiler::default().compile_flow(&flow).unwrap();

    assert_eq!(plan.len(), 9);
    assert_eq!(plan.step_addresses("step2"), vec![6, 7, 8]);
    assert_eq!(finish_navigation(&plan, "step1")["SUCCESS"].next_address, 0);
}

#[test]
fn test_cycles_and_self_references_resolve() {
    let flow = flow_with_steps(vec![
        StepDefinition::new("poll")
            .with_navigation("RETRY", "poll")
            .with_navigation("SUCCESS", "check"),
        StepDefinition::new("check")
            .with_navigation("AGAIN", "poll")
            .with_navigation("SUCCESS", "SUCCESS"),
    ]);
    let plan = Compiler::default().compile_flow(&flow).unwrap();

    assert_eq!(plan.len(), 9);
    let poll = finish_navigation(&plan, "poll");
    assert_eq!(poll["RETRY"], ResultNavigation::new(3, None));
    assert_eq!(poll["SUCCESS"], ResultNavigation::new(6, None));
    let check = finish_navigation(&plan, "check");
    assert_eq!(check["AGAIN"], ResultNavigation::new(3, None));
}

#[test]
fn test_branching_flow_allocates_in_depth_first_order() {
    // step1 -> a -> b, step1 -> c
    let flow = flow_with_steps(vec![
        StepDefinition::new("step1")
            .with_navigation("SUCCESS", "a")
            .with_navigation("FAILURE", "c"),
        StepDefinition::new("a").with_navigation("SUCCESS", "b"),
        terminal_step("b"),
        terminal_step("c"),
    ]);
    let plan = Compiler::default().compile_flow(&flow).unwrap();

    assert_eq!(plan.step_addresses("step1"), vec![3, 4, 5]);
    assert_eq!(plan.step_addresses("a"), vec![6, 7, 8]);
    assert_eq!(plan.step_addresses("b"), vec![9, 10, 11]);
    assert_eq!(plan.step_addresses("c"), vec![12, 13, 14]);
}

#[test]
fn test_unreachable_steps_are_not_compiled() {
    let flow = flow_with_steps(vec![terminal_step("step1"), terminal_step("orphan")]);
    let plan = Compiler::default().compile_flow(&flow).unwrap();

    assert_eq!(plan.len(), 6);
    assert!(plan.step_addresses("orphan").is_empty());
}

#[test]
fn test_long_chain_does_not_exhaust_the_stack() {
    let plan = Compiler::default()
        .compile_flow(&create_chain_flow(2_000, |_| false))
        .unwrap();
    assert_eq!(plan.len(), 3 + 3 * 2_000);
}

#[test]
fn test_operation_and_decision_plans() {
    let compiler = Compiler::builder().with_language("slang").build();

    let op = OperationDefinition {
        id: "user.ops.ping".to_string(),
        name: "ping".to_string(),
        ..Default::default()
    };
    let plan = compiler.compile_operation(&op).unwrap();
    assert_eq!(plan.len(), 3);
    assert_eq!(plan.begin_address, 1);
    assert_eq!(plan.language, "slang");
    assert_eq!(plan.step(1).unwrap().kind_name(), "Start");
    assert_eq!(plan.step(2).unwrap().kind_name(), "Action");
    assert_eq!(plan.step(3).unwrap().kind_name(), "End");

    let decision = DecisionDefinition {
        id: "user.decisions.pick".to_string(),
        name: "pick".to_string(),
        ..Default::default()
    };
    let plan = compiler
        .compile(&ExecutableDefinition::Decision(decision))
        .unwrap();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.begin_address, 1);
    match &plan.step(2).unwrap().kind {
        StepKind::End {
            executable_type, ..
        } => assert_eq!(*executable_type, ExecutableType::Decision),
        other => panic!("Expected End at 2, found {:?}", other),
    }
}
