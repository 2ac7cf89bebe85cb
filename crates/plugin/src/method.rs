//! The six methods the host may call, and their argument contracts.

use crate::PluginError;

/// A remotely callable plugin method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    List,
    Create,
    Get,
    Rename,
    Add,
    Remove,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::List,
        Method::Create,
        Method::Get,
        Method::Rename,
        Method::Add,
        Method::Remove,
    ];

    /// Looks a method up by its exported name (`"List"`, `"Create"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.name() == name)
    }

    /// Exported name as seen by the host.
    pub fn name(self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Create => "Create",
            Self::Get => "Get",
            Self::Rename => "Rename",
            Self::Add => "Add",
            Self::Remove => "Remove",
        }
    }

    /// Literal usage string reported on an argument-count mismatch.
    pub fn usage(self) -> Option<&'static str> {
        match self {
            Self::List => None,
            Self::Create => Some("usage: create <tag name>"),
            Self::Get => Some("usage: get <tag name>"),
            Self::Rename => Some("usage: rename <old tag> <new tag>"),
            Self::Add => Some("usage: add <tag> <droplet id>"),
            Self::Remove => Some("usage: remove <tag> <droplet id>"),
        }
    }

    fn arity(self) -> Arity {
        match self {
            Self::List => Arity::Any,
            Self::Create | Self::Get => Arity::AtLeast(1),
            Self::Rename | Self::Add | Self::Remove => Arity::Exactly(2),
        }
    }

    /// Checks the positional argument count, returning the arguments on
    /// success and the method's usage error otherwise.
    pub fn check_args(self, args: &[String]) -> Result<&[String], PluginError> {
        let ok = match self.arity() {
            Arity::Any => true,
            Arity::AtLeast(n) => args.len() >= n,
            Arity::Exactly(n) => args.len() == n,
        };
        match (ok, self.usage()) {
            (true, _) | (false, None) => Ok(args),
            (false, Some(usage)) => Err(PluginError::Usage(usage)),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy)]
enum Arity {
    Any,
    AtLeast(usize),
    Exactly(usize),
}
