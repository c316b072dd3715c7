use serde::Deserialize;

/// Plugin options, read from the JSON the host passes to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformConfig {
    /// Binding that generated code reads parts from (`self.part(1)`).
    pub receiver: String,
    /// Insert `const <receiver> = this;` into methods that contain JSX.
    pub inject_receiver: bool,
    /// Read an outermost element with a dynamic tag through `dtt("root")`.
    /// When off it gets `dtt(<id>, <tag>)` like any nested unit.
    pub root_accessor: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            receiver: "self".to_string(),
            inject_receiver: true,
            root_accessor: true,
        }
    }
}

impl TransformConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
