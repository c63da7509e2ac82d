use std::io::Write;

use crate::config::Config;
use crate::core::aliases::{CompletionList, TokenList};
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};
use crate::menu::MenuTree;
use crate::prompter::models::{Flow, FlowCtrl};
use crate::session::{CliSession, Session};

const HELP_COMMAND: &str = "help";

/// Interactive session over a [`MenuTree`]: renders the active node's prompt,
/// resolves typed lines against it, and lists completions for lines ending in
/// a tab.
///
/// `help` and the configured exit command are handled before the tree is
/// consulted, so tree nodes with those names are shadowed everywhere.
pub struct MenuFlow<W: Write> {
    tree: MenuTree,
    session: CliSession<W>,
    logger: Logger,
    prompt_suffix: String,
    exit_command: String,
}

impl<W: Write> MenuFlow<W> {
    pub fn new(tree: MenuTree, out: W, config: &Config, logger: Logger) -> Self {
        let session = CliSession::new(tree.root(), out);
        Self {
            tree,
            session,
            logger,
            prompt_suffix: config.prompt_suffix().to_string(),
            exit_command: config.exit_command().to_string(),
        }
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn session(&self) -> &CliSession<W> {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.session.into_output()
    }

    fn print_help(&mut self) -> Result<()> {
        let current = self.session.current();
        let out = self.session.out();
        writeln!(out, "Commands available:")?;
        writeln!(out, " - {HELP_COMMAND}\n\tThis help message")?;
        writeln!(out, " - {}\n\tQuit the session", self.exit_command)?;
        self.tree.main_help(current, out)?;
        Ok(())
    }

    fn completions(&self, partial: &str) -> CompletionList {
        let mut result: CompletionList = [HELP_COMMAND, self.exit_command.as_str()]
            .into_iter()
            .filter(|builtin| builtin.starts_with(partial))
            .map(str::to_string)
            .collect();
        result.extend(self.tree.completions(self.session.current(), partial));
        result
    }

    fn print_completions(&mut self, partial: &str) -> Result<()> {
        let candidates = self.completions(partial.trim_start());
        let out = self.session.out();
        for candidate in candidates {
            writeln!(out, "{candidate}")?;
        }
        Ok(())
    }

    fn run_line(&mut self, line: &str) {
        let tokens: TokenList = line.split_whitespace().map(str::to_string).collect();
        self.logger
            .info(format!("Command run: {line}"), LogTarget::FileOnly);

        self.session.take_failure();
        let current = self.session.current();
        if self.tree.scan_cmds(current, &tokens, &mut self.session) {
            return;
        }

        match self.session.take_failure() {
            Some((command, err)) => self.logger.error(
                format!("Command execution failed for '{command}'. {err}"),
                LogTarget::ConsoleAndFile,
            ),
            None => self.logger.error(
                format!(
                    "Command resolution failed for '{line}'. {}",
                    Error::unknown(line)
                ),
                LogTarget::ConsoleAndFile,
            ),
        }
    }
}

impl<W: Write> Flow for MenuFlow<W> {
    fn render(&mut self) -> Result<()> {
        let prompt = self.tree.prompt(self.session.current()).to_string();
        let out = self.session.out();
        write!(out, "{prompt}{}", self.prompt_suffix)?;
        out.flush()?;
        Ok(())
    }

    fn handle_input(&mut self, input: &str) -> Result<FlowCtrl> {
        if let Some(partial) = input.strip_suffix('\t') {
            self.print_completions(partial)?;
            return Ok(FlowCtrl::Continue);
        }

        let line = input.trim();
        if line.is_empty() {
            return Ok(FlowCtrl::Continue);
        }
        if line.eq_ignore_ascii_case(&self.exit_command) {
            return Ok(FlowCtrl::Finish);
        }
        if line == HELP_COMMAND {
            self.print_help()?;
            return Ok(FlowCtrl::Continue);
        }

        self.run_line(line);
        Ok(FlowCtrl::Continue)
    }
}
