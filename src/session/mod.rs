
use std::io::Write;

use crate::errors::Error;
use crate::menu::NodeId;

/// What the menu tree needs from the interactive session driving it.
pub trait Session {
    /// Node whose children the next command line is resolved against.
    fn current(&self) -> NodeId;
    fn set_current(&mut self, id: NodeId);
    /// Sink command actions write to.
    fn out(&mut self) -> &mut dyn Write;
    /// A matched command's action returned an error. Dispatch still reports
    /// plain failure; this is where the reason goes.
    fn action_failed(&mut self, command: &str, err: Error);
}

/// Session over any writer, remembering the last action failure so the
/// caller can tell "no such command" apart from "command failed".
#[derive(Debug)]
pub struct CliSession<W: Write> {
    current: NodeId,
    out: W,
    last_failure: Option<(String, Error)>,
}

impl<W: Write> CliSession<W> {
    pub fn new(root: NodeId, out: W) -> Self {
        Self {
            current: root,
            out,
            last_failure: None,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn take_failure(&mut self) -> Option<(String, Error)> {
        self.last_failure.take()
    }
}

impl<W: Write> Session for CliSession<W> {
    fn current(&self) -> NodeId {
        self.current
    }

    fn set_current(&mut self, id: NodeId) {
        self.current = id;
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    fn action_failed(&mut self, command: &str, err: Error) {
        self.last_failure = Some((command.to_string(), err));
    }
}
