use super::allocator::{AddressMap, PARALLEL_LOOP_BODY_WIDTH, StepIndex, next_address};
use super::factory::StepFactory;
use super::navigation::{insert_navigation, resolve_navigation};
use crate::error::CompileError;
use crate::model::{FlowDefinition, NavigationEntry, StepDefinition, StepHosting};
use crate::plan::{Address, ExecutionStep, NavigationOptions, NavigationValues, ReservedAddress};
use log::{trace, warn};

/// A step whose records have been opened (WorkerGroup, AddBranches, Begin emitted) but whose
/// navigation has not been fully resolved yet.
struct OpenStep<'a> {
    step: &'a StepDefinition,
    worker_group: Option<&'a str>,
    begin_index: usize,
    begin_address: Address,
    finish_address: Address,
    join_address: Option<Address>,
    next_entry: usize,
    navigation_values: NavigationValues,
    navigation_options: Vec<NavigationOptions>,
}

/// Linearizes a flow's step graph, depth-first from its entry step.
///
/// A step's address is registered before any of its targets are visited, so cycles and
/// self references resolve to it. A target that has no address yet is compiled first and
/// its records land before the referring step's FinishStep. Recursion is replaced by an
/// explicit stack of open steps; output order is the same as a recursive walk.
pub(super) struct StepCompiler<'a> {
    flow: &'a FlowDefinition,
    steps: StepIndex<'a>,
    address_map: AddressMap,
    step_factory: &'a dyn StepFactory,
    external_step_factory: &'a dyn StepFactory,
    output: Vec<ExecutionStep>,
}

impl<'a> StepCompiler<'a> {
    pub(super) fn new(
        flow: &'a FlowDefinition,
        step_factory: &'a dyn StepFactory,
        external_step_factory: &'a dyn StepFactory,
    ) -> Result<Self, CompileError> {
        let mut steps = StepIndex::with_capacity(flow.steps.len());
        for step in &flow.steps {
            if steps.insert(step.name.as_str(), step).is_some() {
                return Err(CompileError::DuplicateStepName {
                    flow: flow.name.clone(),
                    step: step.name.clone(),
                });
            }
        }

        if let Some(result) = flow
            .results
            .iter()
            .find(|r| steps.contains_key(r.name.as_str()))
        {
            return Err(CompileError::StepNameShadowsResult {
                flow: flow.name.clone(),
                step: result.name.clone(),
            });
        }

        let address_map = flow
            .results
            .iter()
            .map(|r| (r.name.clone(), ReservedAddress::End.address()))
            .collect();

        Ok(Self {
            flow,
            steps,
            address_map,
            step_factory,
            external_step_factory,
            output: Vec::new(),
        })
    }

    /// Compiles every step reachable from `entry` and returns their records.
    pub(super) fn compile(
        mut self,
        entry: &'a StepDefinition,
    ) -> Result<Vec<ExecutionStep>, CompileError> {
        let mut stack = vec![self.open(entry)];

        while let Some(current) = stack.last_mut() {
            let step = current.step;
            let Some(navigation) = step.navigation.get(current.next_entry) else {
                if let Some(done) = stack.pop() {
                    self.close(done);
                }
                continue;
            };

            let target = navigation.target.name();
            if !self.address_map.contains_key(target) {
                let next = self.lookup(step, target)?;
                let opened = self.open(next);
                stack.push(opened);
                continue;
            }

            self.record_navigation(current, navigation)?;
            current.next_entry += 1;
        }

        Ok(self.output)
    }

    /// Step-level worker group wins over the flow's default.
    fn inherit_worker_group(&self, step: &'a StepDefinition) -> Option<&'a str> {
        step.worker_group
            .as_deref()
            .or(self.flow.worker_group.as_deref())
    }

    fn factory_for(&self, step: &StepDefinition) -> &'a dyn StepFactory {
        match step.hosting {
            StepHosting::Local => self.step_factory,
            StepHosting::External => self.external_step_factory,
        }
    }

    fn lookup(
        &self,
        from: &StepDefinition,
        target: &str,
    ) -> Result<&'a StepDefinition, CompileError> {
        self.steps
            .get(target)
            .copied()
            .ok_or_else(|| self.unresolved(from, target))
    }

    fn unresolved(&self, from: &StepDefinition, target: &str) -> CompileError {
        CompileError::UnresolvedReference {
            flow: self.flow.name.clone(),
            step: from.name.clone(),
            target: target.to_string(),
        }
    }

    /// Allocates the step's address range and emits WorkerGroup, [AddBranches] and Begin.
    fn open(&mut self, step: &'a StepDefinition) -> OpenStep<'a> {
        let base = next_address(&self.address_map, &self.steps);
        self.address_map.insert(step.name.clone(), base);
        trace!(
            "flow '{}': step '{}' placed at {}",
            self.flow.name, step.name, base
        );

        let factory = self.factory_for(step);
        let worker_group = self.inherit_worker_group(step);

        let mut cursor = base;
        self.output
            .push(factory.create_worker_group_step(cursor, step, worker_group));
        cursor += 1;

        let join_address = if step.parallel_loop {
            let join_address = cursor + PARALLEL_LOOP_BODY_WIDTH + 1;
            self.output.push(factory.create_add_branches_step(
                cursor,
                join_address,
                cursor + 1,
                step,
                &self.flow.id,
            ));
            cursor += 1;
            Some(join_address)
        } else {
            None
        };

        let begin_index = self.output.len();
        self.output
            .push(factory.create_begin_step(cursor, step, worker_group));

        OpenStep {
            step,
            worker_group,
            begin_index,
            begin_address: cursor,
            finish_address: cursor + 1,
            join_address,
            next_entry: 0,
            navigation_values: NavigationValues::new(),
            navigation_options: Vec::new(),
        }
    }

    /// Records one navigation entry. The caller has already registered its target.
    fn record_navigation(
        &self,
        current: &mut OpenStep<'a>,
        entry: &NavigationEntry,
    ) -> Result<(), CompileError> {
        let target = entry.target.name();
        // Only fails if a target is recorded before `compile` registers it.
        let navigation = resolve_navigation(target, &self.address_map)
            .ok_or_else(|| self.unresolved(current.step, target))?;

        if !insert_navigation(&mut current.navigation_values, &entry.result, navigation) {
            warn!(
                "flow '{}': step '{}' maps result '{}' more than once; keeping the first target",
                self.flow.name, current.step.name, entry.result
            );
        }

        if let Some(options) = entry.target.options() {
            current.navigation_options.push(NavigationOptions {
                result: entry.result.clone(),
                step_address: current.begin_address,
                options: options.clone(),
            });
        }
        Ok(())
    }

    /// Emits FinishStep and, for a parallel loop, JoinBranches.
    fn close(&mut self, done: OpenStep<'a>) {
        if !done.navigation_options.is_empty() {
            self.output[done.begin_index]
                .navigation_options
                .extend(done.navigation_options);
        }

        let factory = self.factory_for(done.step);
        match done.join_address {
            Some(join_address) => {
                self.output.push(factory.create_finish_step(
                    done.finish_address,
                    done.step,
                    done.navigation_values.clone(),
                    done.worker_group,
                    true,
                ));
                self.output.push(factory.create_join_branches_step(
                    join_address,
                    done.step,
                    done.navigation_values,
                ));
            }
            None => {
                self.output.push(factory.create_finish_step(
                    done.finish_address,
                    done.step,
                    done.navigation_values,
                    done.worker_group,
                    false,
                ));
            }
        }
    }
}
