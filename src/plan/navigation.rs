use super::address::Address;
use crate::model::NavigationOptionsData;
use serde::{Deserialize, Serialize};

/// The resolved target of one outgoing edge of a step.
///
/// `preset_result` is only set when `next_address` is the flow's End address: the
/// result the step yielded is then itself the flow's terminal result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultNavigation {
    pub next_address: Address,
    pub preset_result: Option<String>,
}

impl ResultNavigation {
    pub fn new(next_address: Address, preset_result: Option<String>) -> Self {
        Self {
            next_address,
            preset_result,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.preset_result.is_some()
    }
}

/// Routing metadata for a navigation declared with a structured target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationOptions {
    pub result: String,
    /// Address of the record the options were attached to.
    pub step_address: Address,
    pub options: NavigationOptionsData,
}
