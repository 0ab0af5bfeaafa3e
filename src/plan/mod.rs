pub mod address;
pub mod navigation;
pub mod step;
pub mod visualizer;

pub use address::*;
pub use navigation::*;
pub use step::*;

use crate::error::CompileError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The compiled, address-indexed output handed to a runtime.
///
/// Dispatch starts at `begin_address`. Each record, once executed, yields a result name;
/// a `FinishStep` (or `JoinBranches`) resolves that name to the next address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub name: String,
    pub source_id: String,
    pub language: String,
    pub worker_group: Option<String>,
    pub begin_address: Address,
    steps: BTreeMap<Address, ExecutionStep>,
}

impl ExecutionPlan {
    pub fn new(name: &str, source_id: &str, language: &str, begin_address: Address) -> Self {
        Self {
            name: name.to_string(),
            source_id: source_id.to_string(),
            language: language.to_string(),
            worker_group: None,
            begin_address,
            steps: BTreeMap::new(),
        }
    }

    /// Adds a record at its own address. Addresses are never reused.
    pub fn add_step(&mut self, step: ExecutionStep) -> Result<(), CompileError> {
        if self.steps.contains_key(&step.id) {
            return Err(CompileError::AddressCollision {
                plan: self.name.clone(),
                address: step.id,
            });
        }
        self.steps.insert(step.id, step);
        Ok(())
    }

    pub fn add_steps(
        &mut self,
        steps: impl IntoIterator<Item = ExecutionStep>,
    ) -> Result<(), CompileError> {
        steps.into_iter().try_for_each(|step| self.add_step(step))
    }

    pub fn step(&self, address: Address) -> Option<&ExecutionStep> {
        self.steps.get(&address)
    }

    /// All records in ascending address order.
    pub fn steps(&self) -> impl Iterator<Item = &ExecutionStep> {
        self.steps.values()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Addresses of every record emitted for the named flow step, ascending.
    pub fn step_addresses(&self, step_name: &str) -> Vec<Address> {
        self.steps()
            .filter(|s| s.step_name() == Some(step_name))
            .map(|s| s.id)
            .collect()
    }

    /// The record of the given kind emitted for the named flow step.
    pub fn find_step(&self, step_name: &str, kind_name: &str) -> Option<&ExecutionStep> {
        self.steps()
            .find(|s| s.step_name() == Some(step_name) && s.kind_name() == kind_name)
    }
}
