use serde::{Deserialize, Serialize};

/// Whether a parameter is passed as a named option or a positional argument
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    #[default]
    Option,
    Argument,
}

/// A declared parameter of a command or group.
///
/// The registry never interprets these; they are handed to whoever renders the
/// form or dispatches the invocation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub kind: ParamKind,
    /// Name of the value type, e.g. `int`, `float`, `email`, `file`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Flag spellings such as `--debug/--no-debug`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Number of values taken, `-1` for variadic
    #[serde(default = "default_nargs")]
    pub nargs: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

fn default_nargs() -> i32 {
    1
}

impl Param {
    #[must_use]
    pub fn option(name: &str) -> Self {
        Param {
            name: name.to_string(),
            kind: ParamKind::Option,
            type_name: None,
            opts: Vec::new(),
            default: None,
            required: false,
            help: None,
            nargs: default_nargs(),
            choices: None,
        }
    }

    #[must_use]
    pub fn argument(name: &str) -> Self {
        Param {
            kind: ParamKind::Argument,
            ..Param::option(name)
        }
    }

    #[must_use]
    pub fn is_variadic(&self) -> bool {
        self.nargs < 0
    }
}
