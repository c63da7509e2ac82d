pub mod alias;
pub mod node;
pub mod tree;

pub use alias::{AliasFetcher, AliasMenu, AliasStyle, SelectionNotifier, ShortcutEntry};
pub use node::{Action, CommandSpec, MenuSpec, Node, NodeId};
pub use tree::MenuTree;
