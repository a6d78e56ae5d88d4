use std::sync::mpsc;
use std::thread;

use anyhow::Result;

use crate::advisor::AdvisorClient;
use crate::engine::{self, BudgetInput, BudgetResult};
use crate::ui::util::parse_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Simulator,
    Advisor,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Simulator, Self::Advisor]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simulator => write!(f, "Simulator"),
            Self::Advisor => write!(f, "Advisor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Editing,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Editing => write!(f, "EDIT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Salary,
    Rent,
    Groceries,
    OtherExpenses,
    CurrentSavings,
    Goal,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::Salary,
            Self::Rent,
            Self::Groceries,
            Self::OtherExpenses,
            Self::CurrentSavings,
            Self::Goal,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Monthly Salary",
            Self::Rent => "Monthly Rent",
            Self::Groceries => "Groceries & Essentials",
            Self::OtherExpenses => "Other Monthly Expenses",
            Self::CurrentSavings => "Current Savings",
            Self::Goal => "Financial Goal",
        }
    }

    /// Amount fields take digits only; the goal is free text.
    pub(crate) fn is_amount(&self) -> bool {
        !matches!(self, Self::Goal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChatRole {
    User,
    Advisor,
}

#[derive(Debug, Clone)]
pub(crate) struct ChatEntry {
    pub(crate) role: ChatRole,
    pub(crate) text: String,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Simulator form
    pub(crate) field_index: usize,
    pub(crate) field_values: Vec<String>,
    /// Value of the selected field when editing began; restored on Esc.
    pub(crate) edit_backup: Option<String>,

    // Last successful simulation; the advisor prompt needs the figures.
    pub(crate) input: Option<BudgetInput>,
    pub(crate) result: Option<BudgetResult>,

    // Advisor chat
    pub(crate) chat_input: String,
    pub(crate) messages: Vec<ChatEntry>,
    /// Lines scrolled up from the bottom of the transcript.
    pub(crate) chat_scroll: usize,
    pending_reply: Option<mpsc::Receiver<Result<String>>>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
    pub(crate) chat_wrap_width: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        // Same starting figures the form has always offered.
        let field_values = vec![
            "30000".into(),
            "10000".into(),
            "5000".into(),
            "3000".into(),
            "50000".into(),
            String::new(),
        ];

        Self {
            running: true,
            screen: Screen::Simulator,
            input_mode: InputMode::Normal,
            status_message: String::new(),
            show_help: false,

            field_index: 0,
            field_values,
            edit_backup: None,

            input: None,
            result: None,

            chat_input: String::new(),
            messages: Vec::new(),
            chat_scroll: 0,
            pending_reply: None,

            visible_rows: 20,
            chat_wrap_width: 76,
        }
    }

    pub(crate) fn selected_field(&self) -> FormField {
        FormField::all()[self.field_index.min(FormField::all().len() - 1)]
    }

    pub(crate) fn field_value(&self, field: FormField) -> &str {
        let idx = FormField::all()
            .iter()
            .position(|f| *f == field)
            .unwrap_or(0);
        &self.field_values[idx]
    }

    pub(crate) fn selected_value_mut(&mut self) -> &mut String {
        let idx = self.field_index.min(self.field_values.len() - 1);
        &mut self.field_values[idx]
    }

    /// Parse the form into a [`BudgetInput`]. Unparseable amounts are
    /// reported by field label; negatives cannot be typed in the first
    /// place but would be rejected here too.
    pub(crate) fn parse_form(&self) -> Result<BudgetInput> {
        let amount = |field: FormField| {
            parse_amount(self.field_value(field))
                .ok_or_else(|| anyhow::anyhow!("Invalid amount for {}", field.label()))
        };
        Ok(BudgetInput {
            salary: amount(FormField::Salary)?,
            rent: amount(FormField::Rent)?,
            groceries: amount(FormField::Groceries)?,
            other_expenses: amount(FormField::OtherExpenses)?,
            current_savings: amount(FormField::CurrentSavings)?,
            goal: self.field_value(FormField::Goal).trim().to_string(),
        })
    }

    /// Run the simulation from the current form contents.
    pub(crate) fn simulate(&mut self) {
        match self.parse_form() {
            Ok(input) => {
                self.result = Some(engine::compute(&input));
                self.input = Some(input);
                self.set_status("Simulation complete. Press 2 to ask the advisor.");
            }
            Err(e) => self.set_status(format!("{e}")),
        }
    }

    pub(crate) fn reply_pending(&self) -> bool {
        self.pending_reply.is_some()
    }

    /// Send the typed question to the advisor on a background thread so the
    /// event loop keeps drawing. Requires a completed simulation.
    pub(crate) fn send_question(&mut self) {
        let question = self.chat_input.trim().to_string();
        if question.is_empty() {
            return;
        }
        let Some(input) = self.input.clone() else {
            self.set_status("Run a simulation first (screen 1, press s)");
            return;
        };
        if self.pending_reply.is_some() {
            self.set_status("Still waiting on the advisor");
            return;
        }

        self.messages.push(ChatEntry {
            role: ChatRole::User,
            text: question.clone(),
        });
        self.chat_input.clear();
        self.scroll_chat_to_bottom();

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let reply = AdvisorClient::from_env().and_then(|client| client.ask(&input, &question));
            // Receiver may be gone if the user abandoned the request.
            let _ = tx.send(reply);
        });
        self.pending_reply = Some(rx);
        self.set_status("Asking the advisor…");
    }

    /// Drain a finished advisor call, if any. Called on every loop tick.
    pub(crate) fn poll_reply(&mut self) {
        let Some(rx) = &self.pending_reply else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(reply)) => {
                self.messages.push(ChatEntry {
                    role: ChatRole::Advisor,
                    text: reply,
                });
                self.pending_reply = None;
                self.scroll_chat_to_bottom();
                self.set_status("");
            }
            Ok(Err(e)) => {
                self.pending_reply = None;
                self.set_status(format!("Advisor error: {e:#}"));
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.pending_reply = None;
                self.set_status("Advisor request failed");
            }
        }
    }

    /// Stop waiting for an in-flight advisor call. The worker thread's send
    /// goes nowhere once the receiver is dropped.
    pub(crate) fn abandon_reply(&mut self) {
        if self.pending_reply.take().is_some() {
            self.set_status("Advisor request abandoned");
        }
    }

    /// `chat_scroll` counts lines scrolled up from the bottom of the
    /// transcript; the renderer clamps any excess.
    pub(crate) fn scroll_chat_to_bottom(&mut self) {
        self.chat_scroll = 0;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
