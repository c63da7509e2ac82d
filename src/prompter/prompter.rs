use crate::errors::{Error, Result};
use crate::prompter::models::{Flow, FlowCtrl};
use std::io::{self, BufRead, BufReader};

/// Line-driven loop: render, read one line, hand it to the flow. Stops at
/// end of input or when the flow finishes.
#[derive(Debug, Clone, Default)]
pub struct Prompter;

impl Prompter {
    pub fn new() -> Self {
        Self
    }

    pub fn run<F: Flow>(&self, flow: F) -> Result<()> {
        let stdin = io::stdin();
        let reader = BufReader::new(stdin.lock());
        self.run_with_reader(flow, reader)
    }

    pub fn run_with_reader<F: Flow, R: BufRead>(&self, mut flow: F, mut reader: R) -> Result<()> {
        loop {
            flow.render()?;

            let mut line = String::new();
            let n = reader.read_line(&mut line).map_err(Error::Io)?;
            if n == 0 {
                return Ok(());
            }
            // Keep a trailing tab: flows use it as the completion request.
            let line = line.trim_end_matches(['\r', '\n']);

            match flow.handle_input(line)? {
                FlowCtrl::Continue => continue,
                FlowCtrl::Finish => return Ok(()),
            }
        }
    }
}
