use crate::model::StepDefinition;
use crate::plan::{Address, FIRST_STEP_ADDRESS};
use ahash::AHashMap;

/// Maps every step and declared result name to the address it resolves to.
/// Only grows during a compile pass.
pub type AddressMap = AHashMap<String, Address>;

/// Steps of a flow indexed by name.
pub type StepIndex<'a> = AHashMap<&'a str, &'a StepDefinition>;

/// WorkerGroup, Begin and FinishStep.
const STEP_WIDTH: Address = 3;

/// The loop body's Begin and FinishStep, placed between AddBranches and JoinBranches.
pub(super) const PARALLEL_LOOP_BODY_WIDTH: Address = 2;

/// Number of consecutive addresses a compiled step occupies.
pub fn width(step: &StepDefinition) -> Address {
    if step.parallel_loop {
        // AddBranches and JoinBranches on top of the usual three.
        STEP_WIDTH + PARALLEL_LOOP_BODY_WIDTH
    } else {
        STEP_WIDTH
    }
}

/// Computes the next free address given what has already been allocated.
///
/// The highest assigned address always belongs to the most recently placed step, so the
/// next free slot sits right past that step's width. Results sit at the End address and are
/// never considered; while no step has been placed, allocation starts at `FIRST_STEP_ADDRESS`.
pub fn next_address(address_map: &AddressMap, steps: &StepIndex<'_>) -> Address {
    let last = address_map
        .iter()
        .filter(|(_, address)| **address >= FIRST_STEP_ADDRESS)
        .max_by_key(|(_, address)| **address)
        .and_then(|(name, address)| steps.get(name.as_str()).map(|step| (*address, *step)));

    match last {
        Some((address, step)) => address + width(step),
        None => FIRST_STEP_ADDRESS,
    }
}
