use crate::errors::Result;
use crate::prompter::models::{Flow, FlowCtrl};
use crate::prompter::prompter::Prompter;
use std::cell::{Cell, RefCell};
use std::io::Cursor;
use std::rc::Rc;

struct ScriptFlow {
    renders: Rc<Cell<u32>>,
    inputs: Rc<RefCell<Vec<String>>>,
    script: Vec<FlowCtrl>,
}

impl ScriptFlow {
    fn new(
        renders: Rc<Cell<u32>>,
        inputs: Rc<RefCell<Vec<String>>>,
        script: Vec<FlowCtrl>,
    ) -> Self {
        Self {
            renders,
            inputs,
            script,
        }
    }
}

impl Flow for ScriptFlow {
    fn render(&mut self) -> Result<()> {
        self.renders.set(self.renders.get() + 1);
        Ok(())
    }

    fn handle_input(&mut self, input: &str) -> Result<FlowCtrl> {
        self.inputs.borrow_mut().push(input.to_string());
        Ok(self.script.remove(0))
    }
}

fn counters() -> (Rc<Cell<u32>>, Rc<RefCell<Vec<String>>>) {
    (Rc::new(Cell::new(0)), Rc::new(RefCell::new(Vec::new())))
}

#[test]
fn prompter_finishes_on_flow_finish() {
    let (renders, inputs) = counters();
    let flow = ScriptFlow::new(renders.clone(), inputs.clone(), vec![FlowCtrl::Finish]);

    Prompter::new()
        .run_with_reader(flow, Cursor::new(b"line\n"))
        .unwrap();

    assert_eq!(renders.get(), 1);
    assert_eq!(*inputs.borrow(), vec!["line".to_string()]);
}

#[test]
fn prompter_handles_continue_then_finish() {
    let (renders, inputs) = counters();
    let flow = ScriptFlow::new(
        renders.clone(),
        inputs.clone(),
        vec![FlowCtrl::Continue, FlowCtrl::Finish],
    );

    Prompter::new()
        .run_with_reader(flow, Cursor::new(b"first\r\nsecond\n"))
        .unwrap();

    assert_eq!(renders.get(), 2);
    assert_eq!(*inputs.borrow(), vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn prompter_keeps_trailing_tab() {
    let (renders, inputs) = counters();
    let flow = ScriptFlow::new(renders, inputs.clone(), vec![FlowCtrl::Finish]);

    Prompter::new()
        .run_with_reader(flow, Cursor::new(b"fo\t\n"))
        .unwrap();

    assert_eq!(*inputs.borrow(), vec!["fo\t".to_string()]);
}

#[test]
fn prompter_exits_on_eof() {
    let (renders, inputs) = counters();
    let flow = ScriptFlow::new(renders.clone(), inputs.clone(), vec![]);

    Prompter::new()
        .run_with_reader(flow, Cursor::new(b""))
        .unwrap();

    assert_eq!(renders.get(), 1);
    assert!(inputs.borrow().is_empty());
}

#[test]
fn prompter_stops_reading_after_finish() {
    let (renders, inputs) = counters();
    let flow = ScriptFlow::new(renders.clone(), inputs.clone(), vec![FlowCtrl::Finish]);

    Prompter::new()
        .run_with_reader(flow, Cursor::new(b"quit
ignored
"))
        .unwrap();

    assert_eq!(renders.get(), 1);
    assert_eq!(*inputs.borrow(), vec!["quit".to_string()]);
}
