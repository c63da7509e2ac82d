use crate::errors::Result;

/// What the prompter does after a flow has handled a line.
pub enum FlowCtrl {
    Continue,
    Finish,
}

/// A line-oriented interaction driven by [`Prompter`](super::prompter::Prompter).
pub trait Flow {
    /// Called before every read.
    fn render(&mut self) -> Result<()>;
    fn handle_input(&mut self, input: &str) -> Result<FlowCtrl>;
}
