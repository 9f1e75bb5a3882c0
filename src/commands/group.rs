use crate::commands::param::Param;
use crate::commands::registry::NodeId;

/// Named container of commands and sub-groups, listed in declared order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub name: String,
    pub short_help: Option<String>,
    pub help: Option<String>,
    pub deprecated: bool,
    /// Group-level parameters, passed to every invocation below this group
    pub params: Vec<Param>,
    pub children: Vec<(String, NodeId)>,
}

impl Group {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Group {
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
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// List `id` under `name`, after the children already declared
    #[must_use]
    pub fn with_child(mut self, name: &str, id: NodeId) -> Self {
        self.add_child(name, id);
        self
    }

    pub fn add_child(&mut self, name: &str, id: NodeId) {
        self.children.push((name.to_string(), id));
    }
}
