//! # Keiro - Workflow Execution Plan Compiler
//!
//! **Keiro** linearizes declarative workflow graphs into addressable execution plans. A flow
//! is a graph of named steps whose outgoing edges are keyed by result name; a plan is a flat
//! table of records, each tagged with a stable integer address, that a runtime walks purely
//! by jumping from one address to the next.
//!
//! ## Core Workflow
//!
//! The compiler is format-agnostic. It operates on a canonical model of an "executable
//! definition": an operation, a decision, or a flow. The primary workflow is:
//!
//! 1.  **Parse Your Source**: Read your workflow language into your own Rust structs.
//! 2.  **Convert to Keiro's Model**: Implement the `IntoExecutable` trait to translate your structs into an `ExecutableDefinition`.
//! 3.  **Compile**: Build a `Compiler` with `Compiler::builder()` and compile the definition into an `ExecutionPlan`.
//! 4.  **Run**: Hand the plan to a runtime. It starts at `begin_address`, and each `FinishStep` maps the result a step yielded to the next address. Reaching address `0` with a preset result ends the flow with that result.
//!
//! ## Address Layout
//!
//! Flow plans reserve three addresses: End (`0`), Precondition (`1`) and Start (`2`). Every
//! step then occupies a contiguous range starting at `3`: WorkerGroup, Begin and FinishStep,
//! plus AddBranches and JoinBranches for a parallel-loop step.
//!
//! ## Quick Start
//!
//! ```rust
//! use keiro::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let flow = FlowDefinition {
//!         id: "user.flows.deploy".to_string(),
//!         name: "deploy".to_string(),
//!         results: vec![ResultDefinition::new("SUCCESS"), ResultDefinition::new("FAILURE")],
//!         steps: vec![
//!             StepDefinition::new("build")
//!                 .with_ref_id("user.ops.build")
//!                 .with_navigation("SUCCESS", "publish")
//!                 .with_navigation("FAILURE", "FAILURE"),
//!             StepDefinition::new("publish")
//!                 .with_ref_id("user.ops.publish")
//!                 .with_navigation("SUCCESS", "SUCCESS")
//!                 .with_navigation("FAILURE", "FAILURE"),
//!         ],
//!         ..Default::default()
//!     };
//!
//!     let compiler = Compiler::builder().with_language("keiro").build();
//!     let plan = compiler.compile_flow(&flow)?;
//!
//!     assert_eq!(plan.begin_address, 1);
//!     assert_eq!(plan.len(), 9);
//!     assert_eq!(plan.step_addresses("build"), vec![3, 4, 5]);
//!     assert_eq!(plan.step_addresses("publish"), vec![6, 7, 8]);
//!
//!     println!("{}", visualize_plan(&plan));
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod error;
pub mod model;
pub mod plan;
pub mod prelude;
