use serde::{Deserialize, Serialize};

/// An input declared by an executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub name: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub sensitive: bool,
}

fn default_required() -> bool {
    true
}

impl Input {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            required: true,
            sensitive: false,
        }
    }
}

/// An output published by an executable once it finishes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Output {
    pub name: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub sensitive: bool,
}

/// An argument a step passes to the executable it invokes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub sensitive: bool,
}
