use crate::commands::param::Param;

/// A single invocable operation with its documentation and declared parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Command {
    pub name: String,
    pub short_help: Option<String>,
    pub help: Option<String>,
    pub deprecated: bool,
    pub params: Vec<Param>,
}

impl Command {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Command {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    #[must_use]
    pub fn with_short_help(mut self, short_help: &str) -> Self {
        self.short_help = Some(short_help.to_string());
        self
    }

    #[must_use]
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }
}
