use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use crate::complex::ComplexNumber;
use crate::config::Config;
use crate::history::{HistoryCursor, HistoryManager};
use crate::input::{translate_key, CommandTable, KeyAction, KeyBuffer, KeyBufferResult};
use crate::memory::CalcMemory;
use crate::operation::CalcOperation;
use crate::shapes::{dimension_from, Shape};
use crate::ui;

/// Points for the Argand-plane plot of the last calculation.
pub struct PlotPoints {
    pub operand1: ComplexNumber,
    pub operand2: Option<ComplexNumber>,
    pub result: ComplexNumber,
}

/// Maximum digits per display component, as on a desk calculator.
const MAX_ENTRY_LEN: usize = 15;

pub struct App {
    /// The two display components, edited as text one at a time.
    pub entry_re: String,
    pub entry_im: String,
    pub editing_im: bool,

    /// Binary operator waiting for its second operand.
    pub pending: Option<CalcOperation>,

    pub memory: CalcMemory,
    pub history: HistoryManager,
    pub cursor: HistoryCursor,
    pub config: Config,

    /// Identity of the most recently shown operation, for the UI.
    pub last_operation: Option<&'static str>,
    pub message: Option<String>,
    pub plot: Option<PlotPoints>,
    pub should_quit: bool,

    key_buffer: KeyBuffer,
    command_table: CommandTable,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            entry_re: "0".to_string(),
            entry_im: "0".to_string(),
            editing_im: false,
            pending: None,
            memory: CalcMemory::new(),
            history: HistoryManager::new(),
            cursor: HistoryCursor::new(),
            config,
            last_operation: None,
            message: None,
            plot: None,
            should_quit: false,
            key_buffer: KeyBuffer::new(),
            command_table: CommandTable::default(),
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.key_buffer.process(key, &self.command_table) {
            KeyBufferResult::Action(action) => self.apply(action),
            KeyBufferResult::Pending => {}
            KeyBufferResult::Fallthrough(key) => {
                if let Some(action) = translate_key(key) {
                    self.apply(action);
                }
            }
        }
    }

    pub fn apply(&mut self, action: KeyAction) {
        self.message = None;

        match action {
            KeyAction::Digit(c) => self.push_digit(c),
            KeyAction::Point => self.push_point(),
            KeyAction::ToggleSign => self.toggle_sign(),
            KeyAction::Backspace => self.backspace(),
            KeyAction::ClearEntry => *self.active_entry() = "0".to_string(),
            KeyAction::ClearAll => self.clear_all(),
            KeyAction::ToggleField => self.editing_im = !self.editing_im,
            KeyAction::Operator(op) => self.commit_operator(op),
            KeyAction::Unary(op) => self.apply_unary(op),
            KeyAction::Equals => self.equals(),
            KeyAction::Undo => self.undo(),
            KeyAction::Redo => self.redo(),
            KeyAction::SaveHistory => self.save_history(),
            KeyAction::LoadHistory => self.load_history(),
            KeyAction::ClearHistory => {
                // Two explicit steps: empty the log, then drop the
                // viewing position.
                self.history.clear();
                self.cursor.reset();
                self.message = Some("History cleared".to_string());
            }
            KeyAction::MemoryClear => {
                self.memory.clear();
                self.message = Some("Memory cleared".to_string());
            }
            KeyAction::MemoryRecall => {
                let value = self.memory.recall();
                self.show(value);
            }
            KeyAction::MemoryStore => {
                let value = self.read_display();
                self.memory.store(value);
                self.message = Some(format!("Memory = {value}"));
            }
            KeyAction::MemoryAdd => {
                let value = self.read_display();
                self.memory.add(value);
                self.message = Some(format!("Memory = {}", self.memory.recall()));
            }
            KeyAction::CircleArea => self.apply_shape(ShapeCalc::CircleArea),
            KeyAction::CircleCircumference => {
                self.apply_shape(ShapeCalc::CircleCircumference)
            }
            KeyAction::TriangleArea => self.apply_shape(ShapeCalc::TriangleArea),
            KeyAction::TriangleCircumference => {
                self.apply_shape(ShapeCalc::TriangleCircumference)
            }
            KeyAction::Quit => self.should_quit = true,
        }
    }

    // === display entry ===

    fn active_entry(&mut self) -> &mut String {
        if self.editing_im {
            &mut self.entry_im
        } else {
            &mut self.entry_re
        }
    }

    fn push_digit(&mut self, c: char) {
        let entry = self.active_entry();
        if entry.len() >= MAX_ENTRY_LEN {
            return;
        }
        if entry.as_str() == "0" {
            entry.clear();
        }
        entry.push(c);
    }

    fn push_point(&mut self) {
        let entry = self.active_entry();
        if !entry.contains('.') && entry.len() < MAX_ENTRY_LEN {
            entry.push('.');
        }
    }

    fn toggle_sign(&mut self) {
        let entry = self.active_entry();
        if entry.starts_with('-') {
            entry.remove(0);
        } else {
            entry.insert(0, '-');
        }
    }

    fn backspace(&mut self) {
        let entry = self.active_entry();
        entry.pop();
        if entry.is_empty() || entry.as_str() == "-" {
            *entry = "0".to_string();
        }
    }

    fn clear_all(&mut self) {
        self.entry_re = "0".to_string();
        self.entry_im = "0".to_string();
        self.pending = None;
    }

    /// Current display value. Components are built digit by digit, so a
    /// parse failure only happens for transient states like a bare "-"
    /// and reads as zero.
    pub fn read_display(&self) -> ComplexNumber {
        ComplexNumber::new(
            self.entry_re.parse().unwrap_or(0.0),
            self.entry_im.parse().unwrap_or(0.0),
        )
    }

    /// Put a value on the display, honoring the configured precision.
    pub fn show(&mut self, value: ComplexNumber) {
        self.entry_re = self.format_component(value.re);
        self.entry_im = self.format_component(value.im);
    }

    fn format_component(&self, x: f64) -> String {
        match self.config.precision {
            Some(p) => format!("{x:.p$}"),
            None => format!("{x}"),
        }
    }

    // === calculation path ===

    /// Commit the display as the held operand and remember the operator.
    fn commit_operator(&mut self, op: CalcOperation) {
        self.memory.set_last(self.read_display());
        self.pending = Some(op);
        self.entry_re = "0".to_string();
        self.entry_im = "0".to_string();
    }

    /// Run the pending binary operation: the held value is the first
    /// operand (minuend/dividend), the display the second.
    fn equals(&mut self) {
        let Some(op) = self.pending else {
            self.message = Some("No pending operation".to_string());
            return;
        };

        let held = self.memory.last();
        let entered = self.read_display();

        match op.perform(held, Some(entered)) {
            Ok(result) => {
                self.record(op, result, held, Some(entered));
                self.pending = None;
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn apply_unary(&mut self, op: CalcOperation) {
        let operand = self.read_display();
        match op.perform(operand, None) {
            Ok(result) => self.record(op, result, operand, None),
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    /// Append a successful calculation to the history, move the cursor
    /// to the tip and refresh display and plot. Failed operations never
    /// reach this point.
    fn record(
        &mut self,
        op: CalcOperation,
        result: ComplexNumber,
        operand1: ComplexNumber,
        operand2: Option<ComplexNumber>,
    ) {
        self.history.add_operation(op, result, operand1, operand2);
        self.cursor.reset_to_tip(self.history.len());
        self.last_operation = Some(op.identity());
        self.plot = Some(PlotPoints {
            operand1,
            operand2,
            result,
        });
        self.show(result);
    }

    // === history navigation ===

    fn undo(&mut self) {
        match self.cursor.undo() {
            Some(index) => self.show_history_entry(index),
            None => self.message = Some("Nothing to undo".to_string()),
        }
    }

    fn redo(&mut self) {
        match self.cursor.redo(self.history.len()) {
            Some(index) => self.show_history_entry(index),
            None => self.message = Some("Nothing to redo".to_string()),
        }
    }

    /// Re-emit a history entry to the display and plot without touching
    /// the log.
    fn show_history_entry(&mut self, index: usize) {
        match self.history.get(index) {
            Ok(entry) => {
                let entry = entry.clone();
                self.last_operation = Some(entry.operation.identity());
                self.plot = Some(PlotPoints {
                    operand1: entry.operand1,
                    operand2: entry.operand2,
                    result: entry.result,
                });
                self.show(entry.result);
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    // === persistence ===

    fn save_history(&mut self) {
        let path = self.config.history_file.clone();
        match self.history.save_to_file(&path) {
            Ok(()) => {
                self.message = Some(format!(
                    "Saved {} entries to {}",
                    self.history.len(),
                    path.display()
                ));
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    pub fn load_history(&mut self) {
        let path = self.config.history_file.clone();
        match self.history.load_from_file(&path) {
            Ok(()) => {
                self.cursor.reset_to_tip(self.history.len());
                if let Some(index) = self.cursor.current() {
                    self.show_history_entry(index);
                }
                self.message = Some(format!(
                    "Loaded {} entries from {}",
                    self.history.len(),
                    path.display()
                ));
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    // === shapes ===

    fn apply_shape(&mut self, calc: ShapeCalc) {
        let input = self.read_display();
        match calc.evaluate(input) {
            Ok(result) => {
                // Shape results are shown and plotted but stay out of
                // the operation history.
                self.last_operation = Some(calc.label());
                self.plot = Some(PlotPoints {
                    operand1: input,
                    operand2: None,
                    result,
                });
                self.show(result);
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ShapeCalc {
    CircleArea,
    CircleCircumference,
    TriangleArea,
    TriangleCircumference,
}

impl ShapeCalc {
    fn label(&self) -> &'static str {
        match self {
            ShapeCalc::CircleArea => "CircleArea",
            ShapeCalc::CircleCircumference => "CircleCircumference",
            ShapeCalc::TriangleArea => "TriangleArea",
            ShapeCalc::TriangleCircumference => "TriangleCircumference",
        }
    }

    fn evaluate(&self, input: ComplexNumber) -> Result<ComplexNumber, crate::error::CalcError> {
        let dim = dimension_from(input)?;
        let value = match self {
            ShapeCalc::CircleArea => Shape::circle(dim)?.area(),
            ShapeCalc::CircleCircumference => Shape::circle(dim)?.circumference(),
            ShapeCalc::TriangleArea => Shape::triangle(dim)?.area(),
            ShapeCalc::TriangleCircumference => Shape::triangle(dim)?.circumference(),
        };
        Ok(ComplexNumber::new(value, 0.0))
    }
}
