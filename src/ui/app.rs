use anyhow::Result;
use chrono::Local;

use crate::db::Database;
use crate::models::{cycle_category, StatisticsPeriod, Transaction};
use crate::settings::Settings;
use crate::viewmodel::{FormField, TransactionViewModel, ValidationErrors};

use super::util::{
    clamp_cursor, format_date, keep_in_view, parse_date, scroll_to_top, shift_days, shift_months,
    with_date,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Overview,
    AddTransaction,
    Statistics,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Overview, Self::AddTransaction, Self::Statistics]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overview => write!(f, "Transactions"),
            Self::AddTransaction => write!(f, "Add Transaction"),
            Self::Statistics => write!(f, "Statistics"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, description: String },
    ClearAll { count: usize },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) settings: Settings,
    pub(crate) vm: TransactionViewModel,

    // Overview
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Statistics
    pub(crate) stats_index: usize,
    pub(crate) stats_scroll: usize,

    // Add form
    pub(crate) form_field: usize,
    pub(crate) edit_buffer: String,
    pub(crate) form_errors: Option<ValidationErrors>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) list_rows: usize,
}

impl App {
    pub(crate) fn new(settings: Settings) -> Self {
        let vm = TransactionViewModel::new(settings.period());
        Self {
            running: true,
            screen: Screen::Overview,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            settings,
            vm,

            transaction_index: 0,
            transaction_scroll: 0,

            stats_index: 0,
            stats_scroll: 0,

            form_field: 0,
            edit_buffer: String::new(),
            form_errors: None,

            pending_action: None,
            confirm_message: String::new(),

            list_rows: 20,
        }
    }

    /// Pulls store changes into the view model and keeps cursors in range.
    pub(crate) fn refresh(&mut self, db: &Database) -> Result<()> {
        self.vm.sync(db, Local::now())?;
        let all = self.vm.all_transactions().len();
        clamp_cursor(&mut self.transaction_index, &mut self.transaction_scroll, all);
        let period = self.vm.transactions_for_statistics().len();
        clamp_cursor(&mut self.stats_index, &mut self.stats_scroll, period);
        Ok(())
    }

    /// Records how many list rows the current screen shows and scrolls the
    /// cursor back into view if the list got shorter.
    pub(crate) fn set_list_rows(&mut self, rows: usize) {
        self.list_rows = rows.max(1);
        let (index, scroll) = match self.screen {
            Screen::Overview => (self.transaction_index, &mut self.transaction_scroll),
            Screen::Statistics => (self.stats_index, &mut self.stats_scroll),
            Screen::AddTransaction => return,
        };
        keep_in_view(index, scroll, self.list_rows);
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.input_mode = InputMode::Normal;
        if screen == Screen::AddTransaction {
            self.form_field = 0;
        }
    }

    /// Transaction under the cursor on whichever list the current screen shows.
    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        match self.screen {
            Screen::Overview => self.vm.all_transactions().get(self.transaction_index),
            Screen::Statistics => self
                .vm
                .transactions_for_statistics()
                .get(self.stats_index),
            Screen::AddTransaction => None,
        }
    }

    pub(crate) fn set_period(&mut self, period: StatisticsPeriod) {
        self.vm.set_statistics_period(period);
        self.stats_index = 0;
        self.stats_scroll = 0;
        self.set_status(format!("Statistics period: {period}"));
    }

    // ── Add form ─────────────────────────────────────────────

    pub(crate) fn current_field(&self) -> FormField {
        let fields = FormField::all();
        fields[self.form_field.min(fields.len() - 1)]
    }

    pub(crate) fn next_field(&mut self) {
        self.form_field = (self.form_field + 1) % FormField::all().len();
    }

    pub(crate) fn prev_field(&mut self) {
        let len = FormField::all().len();
        self.form_field = (self.form_field + len - 1) % len;
    }

    /// Text value shown for a field, formatted with the user's settings.
    pub(crate) fn field_value(&self, field: FormField) -> String {
        let form = self.vm.form();
        match field {
            FormField::Description => form.description.clone(),
            FormField::Amount => form.amount_text.clone(),
            FormField::Type => form.transaction_type.to_string(),
            FormField::Category => form.category.clone(),
            FormField::Date => format_date(form.date, &self.settings.date_format),
            FormField::Note => form.note.clone().unwrap_or_default(),
        }
    }

    /// Enter on a text field opens it for editing; on a choice field it steps forward.
    pub(crate) fn begin_edit(&mut self) {
        let field = self.current_field();
        if field.is_text() {
            self.edit_buffer = self.field_value(field);
            self.input_mode = InputMode::Editing;
        } else {
            self.adjust_field(1);
        }
    }

    pub(crate) fn commit_edit(&mut self) {
        let field = self.current_field();
        let value = std::mem::take(&mut self.edit_buffer);
        self.input_mode = InputMode::Normal;
        match field {
            FormField::Description => self.vm.set_description(value),
            FormField::Amount => self.vm.set_amount_text(value.trim()),
            FormField::Note => self.vm.set_note(&value),
            FormField::Date => match parse_date(&value, &self.settings.date_format) {
                Some(date) => {
                    let ts = with_date(self.vm.form().date, date);
                    self.vm.set_selected_date(ts);
                }
                None => {
                    let example = format_date(self.vm.form().date, &self.settings.date_format);
                    self.set_status(format!("Invalid date '{}', expected e.g. {example}", value.trim()));
                    return;
                }
            },
            FormField::Type | FormField::Category => {}
        }
        self.clear_field_error(field);
    }

    pub(crate) fn cancel_edit(&mut self) {
        self.edit_buffer.clear();
        self.input_mode = InputMode::Normal;
    }

    /// `+`/`-` on the form: flip the type, cycle the category, or step the date a day.
    pub(crate) fn adjust_field(&mut self, delta: i32) {
        let field = self.current_field();
        match field {
            FormField::Type => {
                let kind = self.vm.form().transaction_type.toggle();
                self.vm.set_transaction_type(kind);
            }
            FormField::Category => {
                let form = self.vm.form();
                let next = cycle_category(form.transaction_type, &form.category, delta);
                self.vm.set_selected_category(next);
            }
            FormField::Date => {
                let ts = shift_days(self.vm.form().date, i64::from(delta));
                self.vm.set_selected_date(ts);
            }
            FormField::Description | FormField::Amount | FormField::Note => {
                self.set_status("Press Enter to edit this field");
                return;
            }
        }
        self.clear_field_error(field);
    }

    pub(crate) fn shift_form_month(&mut self, delta: i32) {
        let ts = shift_months(self.vm.form().date, delta);
        self.vm.set_selected_date(ts);
    }

    fn clear_field_error(&mut self, field: FormField) {
        if let Some(errors) = self.form_errors.as_mut() {
            errors.0.retain(|e| e.field() != field);
            if errors.0.is_empty() {
                self.form_errors = None;
            }
        }
    }

    /// Saves the form. Validation failures stay on the form with per-field
    /// messages; any other error is propagated.
    pub(crate) fn submit_form(&mut self, db: &Database) -> Result<()> {
        let description = self.vm.form().description.trim().to_string();
        match self.vm.add_transaction_from_form(db) {
            Ok(_) => {
                self.form_errors = None;
                self.form_field = 0;
                self.screen = Screen::Overview;
                scroll_to_top(&mut self.transaction_index, &mut self.transaction_scroll);
                self.set_status(format!("Added: {description}"));
                Ok(())
            }
            Err(e) => match e.downcast::<ValidationErrors>() {
                Ok(errors) => {
                    if let Some(first) = errors.0.first() {
                        let field = first.field();
                        self.form_field = FormField::all()
                            .iter()
                            .position(|f| *f == field)
                            .unwrap_or(0);
                    }
                    self.set_status(errors.to_string());
                    self.form_errors = Some(errors);
                    Ok(())
                }
                Err(e) => Err(e),
            },
        }
    }

    pub(crate) fn discard_form(&mut self) {
        self.vm.clear_form();
        self.form_errors = None;
        self.form_field = 0;
        self.set_status("Form cleared");
    }

    // ── Confirmation ─────────────────────────────────────────

    pub(crate) fn request_delete_selected(&mut self) {
        let Some((id, description)) = self
            .selected_transaction()
            .and_then(|t| t.id.map(|id| (id, t.description.clone())))
        else {
            self.set_status("No transaction selected");
            return;
        };
        self.confirm_message = format!("Delete '{description}'?");
        self.pending_action = Some(PendingAction::DeleteTransaction { id, description });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn request_clear_all(&mut self) {
        let count = self.vm.all_transactions().len();
        if count == 0 {
            self.set_status("No transactions to delete");
            return;
        }
        self.confirm_message = format!(
            "Delete all {count} transaction{}? This cannot be undone.",
            if count == 1 { "" } else { "s" }
        );
        self.pending_action = Some(PendingAction::ClearAll { count });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm_pending(&mut self, db: &Database) -> Result<()> {
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        match self.pending_action.take() {
            Some(PendingAction::DeleteTransaction { id, description }) => {
                self.vm.delete_transaction(db, id)?;
                self.refresh(db)?;
                self.set_status(format!("Deleted: {description}"));
            }
            Some(PendingAction::ClearAll { count }) => {
                let removed = self.vm.delete_all_transactions(db)?;
                self.refresh(db)?;
                if removed == count {
                    self.set_status(format!("Deleted {removed} transactions"));
                } else {
                    self.set_status(format!(
                        "Deleted {removed} transactions (prompt showed {count})"
                    ));
                }
            }
            None => {}
        }
        Ok(())
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.confirm_message.clear();
        self.input_mode = InputMode::Normal;
        self.set_status("Cancelled");
    }
}
