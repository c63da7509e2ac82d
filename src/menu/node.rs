use std::fmt;
use std::io::Write;

use crate::core::aliases::TokenList;
use crate::errors::Result;
use crate::menu::alias::{AliasNode, AliasStyle};

pub const DEFAULT_MENU_DESCRIPTION: &str = "(menu)";

/// Stable handle to a node stored in a [`MenuTree`](crate::menu::tree::MenuTree).
///
/// Ids are only issued by the tree's factory methods and stay valid for the
/// lifetime of the tree; nodes are never moved or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Body of a leaf command. Receives the session output and the arguments
/// that followed the command name.
pub type Action = Box<dyn FnMut(&mut dyn Write, &[String]) -> Result<()>>;

pub struct CommandSpec {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) params: TokenList,
    pub(crate) action: Action,
}

impl CommandSpec {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, action: F) -> Self
    where
        F: FnMut(&mut dyn Write, &[String]) -> Result<()> + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
            action: Box::new(action),
        }
    }

    /// Declare a positional parameter. Dispatch only matches when the number
    /// of arguments equals the number of declared parameters.
    pub fn param(mut self, label: impl Into<String>) -> Self {
        self.params.push(label.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct MenuSpec {
    pub(crate) name: String,
    pub(crate) description: String,
}

impl MenuSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: DEFAULT_MENU_DESCRIPTION.to_string(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

pub(crate) struct CommandNode {
    pub(crate) params: TokenList,
    pub(crate) action: Action,
}

pub(crate) enum NodeKind {
    Command(CommandNode),
    Menu,
    Alias(AliasNode),
}

pub struct Node {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) enabled: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Menus (static or alias-driven) can own children and become the
    /// session's current node; commands cannot.
    pub fn is_menu(&self) -> bool {
        !matches!(self.kind, NodeKind::Command(_))
    }

    /// `None` for commands and static menus.
    pub fn alias_style(&self) -> Option<AliasStyle> {
        match &self.kind {
            NodeKind::Alias(alias) => Some(alias.style()),
            NodeKind::Command(_) | NodeKind::Menu => None,
        }
    }

    /// What a session shows while this node is current.
    pub fn prompt(&self) -> &str {
        match &self.kind {
            NodeKind::Alias(alias) => alias.prompt(),
            NodeKind::Command(_) | NodeKind::Menu => &self.name,
        }
    }

    pub fn params(&self) -> &[String] {
        match &self.kind {
            NodeKind::Command(cmd) => &cmd.params,
            NodeKind::Menu | NodeKind::Alias(_) => &[],
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            NodeKind::Command(_) => "command",
            NodeKind::Menu => "menu",
            NodeKind::Alias(_) => "alias-menu",
        };
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("kind", &kind)
            .field("enabled", &self.enabled)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish()
    }
}
