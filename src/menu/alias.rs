use std::fmt;
use std::io::{self, Write};

use crate::core::aliases::AliasList;
use crate::extensions::string::TokenPrefix;

pub const DEFAULT_ALIAS_MENU_DESCRIPTION: &str = "(dynamic menu)";

/// Supplies the names a menu currently answers to. Called once per dispatch,
/// help render or completion request; the result is never cached.
pub type AliasFetcher = Box<dyn Fn() -> AliasList>;

/// Told which alias was used to enter a notifying menu.
pub type SelectionNotifier = Box<dyn FnMut(&str)>;

/// How an alias menu reacts to being entered and how it describes itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasStyle {
    /// Prompt follows the alias of a bare entry. Help lists the node name with
    /// a `{a|b|c}` alternation.
    #[default]
    Tracking,
    /// Prompt follows every matched alias and the notifier hears about it.
    /// Help lists one entry per alias, and completion answers with the alias
    /// alone when the line runs past it.
    Notifying,
}

/// Whether entering through the parent shortcut counts as an alias selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortcutEntry {
    /// Going back up keeps the prompt and stays silent.
    #[default]
    Preserve,
    /// The shortcut token is recorded and announced like any alias.
    Record,
}

/// Construction-time description of an alias-driven menu.
///
/// ```ignore
/// let menu = AliasMenu::notifying("test", || vec!["foo".into(), "bar".into()])
///     .on_select(|alias| println!("entered through {alias}"));
/// ```
pub struct AliasMenu {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) node: AliasNode,
}

impl AliasMenu {
    /// Menu whose prompt tracks the alias it was entered through.
    pub fn dynamic<F>(name: impl Into<String>, fetcher: F) -> Self
    where
        F: Fn() -> AliasList + 'static,
    {
        Self::with_style(name, fetcher, AliasStyle::Tracking)
    }

    /// Menu that additionally reports each selected alias to a notifier.
    pub fn notifying<F>(name: impl Into<String>, fetcher: F) -> Self
    where
        F: Fn() -> AliasList + 'static,
    {
        Self::with_style(name, fetcher, AliasStyle::Notifying)
    }

    fn with_style<F>(name: impl Into<String>, fetcher: F, style: AliasStyle) -> Self
    where
        F: Fn() -> AliasList + 'static,
    {
        Self {
            name: name.into(),
            description: DEFAULT_ALIAS_MENU_DESCRIPTION.to_string(),
            node: AliasNode {
                style,
                shortcut_entry: ShortcutEntry::default(),
                fetch_aliases: Box::new(fetcher),
                notify_on_select: None,
                prompt: String::new(),
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Only consulted by [`AliasStyle::Notifying`] menus.
    pub fn on_select<N>(mut self, notifier: N) -> Self
    where
        N: FnMut(&str) + 'static,
    {
        self.node.notify_on_select = Some(Box::new(notifier));
        self
    }

    pub fn shortcut_entry(mut self, policy: ShortcutEntry) -> Self {
        self.node.shortcut_entry = policy;
        self
    }
}

impl fmt::Debug for AliasMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasMenu")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("node", &self.node)
            .finish()
    }
}

/// Where a completion request against an alias menu should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CompletionRoute {
    /// The line is still spelling this alias, or has moved on to its children.
    Descend(String),
    /// The line ran past the alias without a separator.
    Sole(String),
    /// No alias relates to the line; use the name-based completion.
    Fallback,
}

/// The alias state a tree node carries.
pub(crate) struct AliasNode {
    style: AliasStyle,
    shortcut_entry: ShortcutEntry,
    fetch_aliases: AliasFetcher,
    notify_on_select: Option<SelectionNotifier>,
    prompt: String,
}

impl AliasNode {
    pub(crate) fn fetch(&self) -> AliasList {
        (self.fetch_aliases)()
    }

    pub(crate) fn style(&self) -> AliasStyle {
        self.style
    }

    pub(crate) fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Whether a shortcut entry is treated as a selection.
    pub(crate) fn records_shortcut(&self) -> bool {
        matches!(self.shortcut_entry, ShortcutEntry::Record)
    }

    /// Runs before any child dispatch so sub-commands already see the
    /// selection.
    pub(crate) fn announce(&mut self, alias: &str) {
        if self.style != AliasStyle::Notifying {
            return;
        }
        if let Some(notify) = self.notify_on_select.as_mut() {
            notify(alias);
        }
    }

    /// Undoes an [`announce`](Self::announce) whose dispatch failed by
    /// re-announcing the selection the prompt still shows (empty before the
    /// first successful entry).
    pub(crate) fn withdraw(&mut self) {
        if self.style != AliasStyle::Notifying {
            return;
        }
        if let Some(notify) = self.notify_on_select.as_mut() {
            notify(&self.prompt);
        }
    }

    /// Prompt update after a successful dispatch that entered through `token`.
    pub(crate) fn record_entry(&mut self, token: &str, token_count: usize, via_shortcut: bool) {
        if via_shortcut && !self.records_shortcut() {
            return;
        }
        match self.style {
            AliasStyle::Tracking if token_count == 1 => self.prompt = token.to_string(),
            AliasStyle::Tracking => {}
            AliasStyle::Notifying => self.prompt = token.to_string(),
        }
    }

    /// First alias (in fetch order) that relates to `line` decides the route.
    pub(crate) fn route_completion(&self, line: &str) -> CompletionRoute {
        for alias in self.fetch() {
            if alias.is_empty() {
                continue;
            }
            if alias.starts_with(line) || line.strip_token(&alias).is_some() {
                return CompletionRoute::Descend(alias);
            }
            if self.style == AliasStyle::Notifying && line.starts_with(alias.as_str()) {
                return CompletionRoute::Sole(alias);
            }
        }
        CompletionRoute::Fallback
    }

    pub(crate) fn help(&self, name: &str, description: &str, out: &mut dyn Write) -> io::Result<()> {
        let aliases = self.fetch();
        match self.style {
            AliasStyle::Tracking => {
                write!(out, " - {name}")?;
                if !aliases.is_empty() {
                    write!(out, " {{{}}}", aliases.join("|"))?;
                }
                writeln!(out, "\n\t{description}")
            }
            AliasStyle::Notifying => {
                for alias in &aliases {
                    writeln!(out, " - {alias}\n\t{description}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for AliasNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasNode")
            .field("style", &self.style)
            .field("shortcut_entry", &self.shortcut_entry)
            .field("has_notifier", &self.notify_on_select.is_some())
            .field("prompt", &self.prompt)
            .finish()
    }
}
