use std::io::{self, Write};

use crate::core::aliases::CompletionList;
use crate::errors::{Error, Result};
use crate::extensions::string::TokenPrefix;
use crate::menu::alias::{AliasMenu, CompletionRoute};
use crate::menu::node::{CommandNode, CommandSpec, MenuSpec, Node, NodeId, NodeKind};
use crate::session::Session;

pub const DEFAULT_PARENT_SHORTCUT: &str = "..";

/// Arena owning every node of an interactive command tree.
///
/// Children are kept in insertion order, which drives both help listing and
/// completion order. Parents are referenced by [`NodeId`] only.
#[derive(Debug)]
pub struct MenuTree {
    nodes: Vec<Node>,
    parent_shortcut: String,
}

impl MenuTree {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self::with_root(MenuSpec::new(root_name))
    }

    pub fn with_root(root: MenuSpec) -> Self {
        Self {
            nodes: vec![Node {
                name: root.name,
                description: root.description,
                enabled: true,
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Menu,
            }],
            parent_shortcut: DEFAULT_PARENT_SHORTCUT.to_string(),
        }
    }

    pub fn with_parent_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.parent_shortcut = shortcut.into();
        self
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Reserved token meaning "go to the enclosing menu".
    pub fn parent_shortcut(&self) -> &str {
        &self.parent_shortcut
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| Error::tree(format!("node {id} does not exist")))
    }

    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let node = self.nodes.get(parent.0)?;
        node.children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].name == name)
    }

    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or_else(|| Error::tree(format!("node {id} does not exist")))?;
        node.enabled = enabled;
        Ok(())
    }

    // ---- Assembly -----------------------------------------------------------

    pub fn insert_menu(&mut self, parent: NodeId, spec: MenuSpec) -> Result<NodeId> {
        self.attach(parent, spec.name, spec.description, NodeKind::Menu)
    }

    pub fn insert_command(&mut self, parent: NodeId, spec: CommandSpec) -> Result<NodeId> {
        let kind = NodeKind::Command(CommandNode {
            params: spec.params,
            action: spec.action,
        });
        self.attach(parent, spec.name, spec.description, kind)
    }

    pub fn insert_alias_menu(&mut self, parent: NodeId, menu: AliasMenu) -> Result<NodeId> {
        self.attach(parent, menu.name, menu.description, NodeKind::Alias(menu.node))
    }

    fn attach(
        &mut self,
        parent: NodeId,
        name: String,
        description: String,
        kind: NodeKind,
    ) -> Result<NodeId> {
        let host = self.node(parent)?;
        if !host.is_menu() {
            return Err(Error::tree(format!(
                "cannot insert '{name}' below command '{}'",
                host.name
            )));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            description,
            enabled: true,
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    // ---- Dispatch -----------------------------------------------------------

    /// Try to run `tokens` against `id` as one of its parent's children.
    pub fn exec(&mut self, id: NodeId, tokens: &[String], session: &mut dyn Session) -> bool {
        let Some(node) = self.nodes.get(id.0) else {
            return false;
        };
        match node.kind {
            NodeKind::Command(_) => self.exec_command(id, tokens, session),
            NodeKind::Menu => {
                let names = [node.name.clone()];
                self.handle_command(id, &names, tokens, session)
            }
            NodeKind::Alias(_) => self.exec_alias(id, tokens, session, false),
        }
    }

    /// Like [`exec`](Self::exec) but invoked from a child, so the parent
    /// shortcut is accepted as well.
    pub fn exec_parent(
        &mut self,
        id: NodeId,
        tokens: &[String],
        session: &mut dyn Session,
    ) -> bool {
        let Some(node) = self.nodes.get(id.0) else {
            return false;
        };
        match node.kind {
            NodeKind::Command(_) => false,
            NodeKind::Menu => {
                let names = [node.name.clone(), self.parent_shortcut.clone()];
                self.handle_command(id, &names, tokens, session)
            }
            NodeKind::Alias(_) => self.exec_alias(id, tokens, session, true),
        }
    }

    /// Resolve a full command line typed while `current` is active: its
    /// children first, then the way back up through the parent.
    pub fn scan_cmds(
        &mut self,
        current: NodeId,
        tokens: &[String],
        session: &mut dyn Session,
    ) -> bool {
        let Some(node) = self.nodes.get(current.0) else {
            return false;
        };
        if !node.enabled || tokens.is_empty() {
            return false;
        }
        let children = node.children.clone();
        let parent = node.parent;
        if children
            .into_iter()
            .any(|child| self.exec(child, tokens, session))
        {
            return true;
        }
        match parent {
            Some(parent) => self.exec_parent(parent, tokens, session),
            None => false,
        }
    }

    /// Shared dispatcher: `tokens[0]` must be one of `names`. A bare match makes
    /// `id` the current node; anything after it is offered to the children.
    pub fn handle_command(
        &mut self,
        id: NodeId,
        names: &[String],
        tokens: &[String],
        session: &mut dyn Session,
    ) -> bool {
        let Some((head, rest)) = tokens.split_first() else {
            return false;
        };
        let Some(node) = self.nodes.get(id.0) else {
            return false;
        };
        if !node.enabled || !names.contains(head) {
            return false;
        }
        if rest.is_empty() {
            session.set_current(id);
            return true;
        }
        let children = node.children.clone();
        children
            .into_iter()
            .any(|child| self.exec(child, rest, session))
    }

    fn exec_command(&mut self, id: NodeId, tokens: &[String], session: &mut dyn Session) -> bool {
        let Some((head, args)) = tokens.split_first() else {
            return false;
        };
        let node = &mut self.nodes[id.0];
        if !node.enabled || node.name != *head {
            return false;
        }
        let NodeKind::Command(cmd) = &mut node.kind else {
            return false;
        };
        if args.len() != cmd.params.len() {
            return false;
        }
        match (cmd.action)(session.out(), args) {
            Ok(()) => true,
            Err(err) => {
                session.action_failed(&node.name, err);
                false
            }
        }
    }

    fn exec_alias(
        &mut self,
        id: NodeId,
        tokens: &[String],
        session: &mut dyn Session,
        from_child: bool,
    ) -> bool {
        let Some(entry) = tokens.first() else {
            return false;
        };
        let node = &mut self.nodes[id.0];
        let enabled = node.enabled;
        let NodeKind::Alias(alias) = &mut node.kind else {
            return false;
        };

        let mut names = alias.fetch();
        let alias_hit = names.contains(entry);
        let via_shortcut = from_child && !alias_hit && *entry == self.parent_shortcut;
        if from_child {
            names.push(self.parent_shortcut.clone());
        }
        let announced = enabled && (alias_hit || (via_shortcut && alias.records_shortcut()));
        if announced {
            alias.announce(entry);
        }

        let ok = self.handle_command(id, &names, tokens, session);
        if let NodeKind::Alias(alias) = &mut self.nodes[id.0].kind {
            if ok {
                alias.record_entry(entry, tokens.len(), via_shortcut);
            } else if announced {
                alias.withdraw();
            }
        }
        ok
    }

    // ---- Prompt & help ------------------------------------------------------

    pub fn prompt(&self, id: NodeId) -> &str {
        self.nodes.get(id.0).map(Node::prompt).unwrap_or_default()
    }

    /// Help entry for a single node. Disabled nodes write nothing.
    pub fn help(&self, id: NodeId, out: &mut dyn Write) -> io::Result<()> {
        let Some(node) = self.nodes.get(id.0) else {
            return Ok(());
        };
        if !node.enabled {
            return Ok(());
        }
        match &node.kind {
            NodeKind::Alias(alias) => alias.help(&node.name, &node.description, out),
            NodeKind::Menu => writeln!(out, " - {}\n\t{}", node.name, node.description),
            NodeKind::Command(cmd) => {
                write!(out, " - {}", node.name)?;
                for param in &cmd.params {
                    write!(out, " <{param}>")?;
                }
                writeln!(out, "\n\t{}", node.description)
            }
        }
    }

    /// Everything reachable from `current`: its children, then its parent.
    pub fn main_help(&self, current: NodeId, out: &mut dyn Write) -> io::Result<()> {
        let Some(node) = self.nodes.get(current.0) else {
            return Ok(());
        };
        if !node.enabled {
            return Ok(());
        }
        for child in &node.children {
            self.help(*child, out)?;
        }
        if let Some(parent) = node.parent {
            self.help(parent, out)?;
        }
        Ok(())
    }

    // ---- Completion ---------------------------------------------------------

    /// Candidates offered for `line` while `current` is active.
    pub fn completions(&self, current: NodeId, line: &str) -> CompletionList {
        let Some(node) = self.nodes.get(current.0) else {
            return Vec::new();
        };
        if !node.enabled {
            return Vec::new();
        }
        let mut result: CompletionList = node
            .children
            .iter()
            .flat_map(|child| self.get_completion_recursive(*child, line))
            .collect();
        if let Some(parent) = node.parent {
            result.extend(self.get_completion_recursive(parent, line));
        }
        result
    }

    pub fn get_completion_recursive(&self, id: NodeId, line: &str) -> CompletionList {
        let Some(node) = self.nodes.get(id.0) else {
            return Vec::new();
        };
        if !node.enabled {
            return Vec::new();
        }
        match &node.kind {
            NodeKind::Command(_) => self.base_completion(id, line),
            NodeKind::Menu => {
                if line.strip_token(&node.name).is_some() {
                    self.completion_helper(id, line, std::slice::from_ref(&node.name))
                } else {
                    self.base_completion(id, line)
                }
            }
            NodeKind::Alias(alias) => match alias.route_completion(line) {
                CompletionRoute::Descend(matched) => {
                    self.completion_helper(id, line, std::slice::from_ref(&matched))
                }
                CompletionRoute::Sole(matched) => vec![matched],
                CompletionRoute::Fallback => self.base_completion(id, line),
            },
        }
    }

    /// Completes `line` under the first of `prefixes` it relates to: a line
    /// still spelling the prefix gets the prefix itself, a line past it gets
    /// the children's completions of the remainder, joined back onto it.
    pub fn completion_helper(&self, id: NodeId, line: &str, prefixes: &[String]) -> CompletionList {
        let Some(node) = self.nodes.get(id.0) else {
            return Vec::new();
        };
        for prefix in prefixes.iter().filter(|p| !p.is_empty()) {
            if let Some(rest) = line.strip_token(prefix) {
                let rest = rest.trim_start();
                return node
                    .children
                    .iter()
                    .flat_map(|child| self.get_completion_recursive(*child, rest))
                    .map(|candidate| format!("{prefix} {candidate}"))
                    .collect();
            }
            if prefix.starts_with(line) {
                return vec![prefix.clone()];
            }
        }
        self.base_completion(id, line)
    }

    /// Name-only completion with no alias awareness.
    pub fn base_completion(&self, id: NodeId, line: &str) -> CompletionList {
        match self.nodes.get(id.0) {
            Some(node) if node.enabled && node.name.starts_with(line) => vec![node.name.clone()],
            _ => Vec::new(),
        }
    }
}
