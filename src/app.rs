use std::collections::HashMap;

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Align2, Color32, Layout, RichText, Ui};
use eframe::{App, Frame};
use egui_extras::{Column, TableBuilder};
use tracing::debug;

use crate::error::StoreError;
use crate::models::{ExerciseId, Routine};
use crate::storage::KeyValueStore;
use crate::store::RoutineStore;

pub type DynStore = RoutineStore<Box<dyn KeyValueStore>>;

/// Text buffers for one exercise row while it is being edited.
#[derive(Debug, Clone, PartialEq)]
struct RowEdit {
    sets: String,
    reps: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewExerciseForm {
    pub name: String,
    pub sets: String,
    pub reps: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Confirm {
    Delete { routine: String, id: ExerciseId, name: String },
    Reset,
}

#[derive(Debug, Clone)]
pub struct Status {
    pub message: String,
    pub at: DateTime<Local>,
    pub error: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Select(String),
    CommitSets(ExerciseId),
    CommitReps(ExerciseId),
    AskDelete(ExerciseId),
    Add,
    AskReset,
    Confirmed,
    Cancelled,
}

pub struct RoutineApp {
    store: DynStore,
    selected: Option<String>,
    edits: HashMap<ExerciseId, RowEdit>,
    form: NewExerciseForm,
    pending: Option<Confirm>,
    status: Option<Status>,
}

impl RoutineApp {
    pub fn new(store: DynStore) -> Self {
        let selected = store.routines().first().map(|r| r.id.clone());
        RoutineApp {
            store,
            selected,
            edits: HashMap::new(),
            form: NewExerciseForm::default(),
            pending: None,
            status: None,
        }
    }

    pub fn store(&self) -> &DynStore {
        &self.store
    }

    pub fn selected(&self) -> Option<&Routine> {
        self.selected.as_deref().and_then(|id| self.store.routine(id))
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn pending(&self) -> Option<&Confirm> {
        self.pending.as_ref()
    }

    pub fn form_mut(&mut self) -> &mut NewExerciseForm {
        &mut self.form
    }

    /// Text currently shown in the sets/reps fields of a row.
    pub fn row_text(&mut self, id: ExerciseId) -> Option<(&mut String, &mut String)> {
        let routine = self.selected.as_deref().and_then(|r| self.store.routine(r))?;
        let ex = routine.exercises.iter().find(|e| e.id == id)?;
        let edit = self.edits.entry(id).or_insert_with(|| RowEdit {
            sets: ex.sets.to_string(),
            reps: ex.reps.to_string(),
        });
        Some((&mut edit.sets, &mut edit.reps))
    }

    pub fn apply(&mut self, action: Action) {
        debug!(?action, "Applying UI action");
        match action {
            Action::Select(id) => {
                if self.store.routine(&id).is_some() {
                    self.selected = Some(id);
                    self.edits.clear();
                }
            }
            Action::CommitSets(id) => self.commit_sets(id),
            Action::CommitReps(id) => self.commit_reps(id),
            Action::AskDelete(id) => {
                let confirm = self.selected().and_then(|routine| {
                    let ex = routine.exercises.iter().find(|e| e.id == id)?;
                    Some(Confirm::Delete {
                        routine: routine.id.clone(),
                        id,
                        name: ex.name.clone(),
                    })
                });
                if confirm.is_some() {
                    self.pending = confirm;
                }
            }
            Action::Add => self.add_exercise(),
            Action::AskReset => self.pending = Some(Confirm::Reset),
            Action::Confirmed => match self.pending.take() {
                Some(Confirm::Delete { routine, id, name }) => {
                    let result = self.store.delete_exercise(&routine, id).map(|_| ());
                    self.edits.remove(&id);
                    self.report(result, format!("Deleted \"{}\"", name));
                }
                Some(Confirm::Reset) => {
                    let result = self.store.reset();
                    self.edits.clear();
                    self.selected = self.store.routines().first().map(|r| r.id.clone());
                    self.report(result, "Reset all routines to defaults");
                }
                None => {}
            },
            Action::Cancelled => self.pending = None,
        }
    }

    fn commit_sets(&mut self, id: ExerciseId) {
        let Some(routine) = self.selected.clone() else { return };
        let Some(edit) = self.edits.get(&id).cloned() else { return };
        match self.store.set_sets(&routine, id, &edit.sets) {
            Ok(sets) => {
                self.set_row_sets(id, sets.to_string());
                self.saved(format!("Sets updated to {}", sets));
            }
            Err(e @ StoreError::InvalidInput { .. }) => {
                // show the last value that was accepted
                let current = self
                    .store
                    .routine(&routine)
                    .and_then(|r| r.exercises.iter().find(|ex| ex.id == id))
                    .map(|ex| ex.sets.to_string());
                if let Some(current) = current {
                    self.set_row_sets(id, current);
                }
                self.failed(e);
            }
            Err(e) => self.failed(e),
        }
    }

    fn commit_reps(&mut self, id: ExerciseId) {
        let Some(routine) = self.selected.clone() else { return };
        let Some(edit) = self.edits.get(&id).cloned() else { return };
        match self.store.set_reps(&routine, id, &edit.reps) {
            Ok(reps) => {
                if let Some(row) = self.edits.get_mut(&id) {
                    row.reps = reps.to_string();
                }
                self.saved(format!("Reps updated to {}", reps));
            }
            Err(e) => self.failed(e),
        }
    }

    fn add_exercise(&mut self) {
        let Some(routine) = self.selected.clone() else { return };
        let form = &self.form;
        match self.store.add_exercise(&routine, &form.name, &form.sets, &form.reps) {
            Ok(_) => {
                let name = form.name.trim().to_string();
                self.form = NewExerciseForm::default();
                self.saved(format!("Added \"{}\"", name));
            }
            // the form keeps its text so the user can fix it
            Err(e) => self.failed(e),
        }
    }

    fn set_row_sets(&mut self, id: ExerciseId, text: String) {
        if let Some(row) = self.edits.get_mut(&id) {
            row.sets = text;
        }
    }

    fn report(&mut self, result: Result<(), StoreError>, ok: impl Into<String>) {
        match result {
            Ok(()) => self.saved(ok),
            Err(e) => self.failed(e),
        }
    }

    fn saved(&mut self, message: impl Into<String>) {
        self.status = Some(Status {
            message: message.into(),
            at: Local::now(),
            error: false,
        });
    }

    fn failed(&mut self, error: StoreError) {
        self.status = Some(Status {
            message: error.to_string(),
            at: Local::now(),
            error: true,
        });
    }
}

fn routine_color(color_class: &str) -> Option<Color32> {
    match color_class {
        "routine-rings" => Some(Color32::from_rgb(0xb4, 0x8e, 0xad)),
        "routine-park" => Some(Color32::from_rgb(0xa3, 0xbe, 0x8c)),
        "routine-home" => Some(Color32::from_rgb(0xeb, 0xcb, 0x8b)),
        _ => None,
    }
}

impl App for RoutineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut actions = Vec::new();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.show_status(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(Layout::top_down(Align::Min), |ui| {
                self.show_toolbar(ui, &mut actions);
                ui.add_space(10.0);
                self.show_routine(ui, &mut actions);
                ui.add_space(20.0);
                self.show_add_form(ui, &mut actions);
            });
        });

        self.show_confirm(ctx, &mut actions);

        for action in actions {
            self.apply(action);
        }
    }
}

impl RoutineApp {
    fn show_toolbar(&mut self, ui: &mut Ui, actions: &mut Vec<Action>) {
        ui.horizontal(|ui| {
            let current = self.selected().map(|r| r.name.clone()).unwrap_or_default();
            egui::ComboBox::from_id_salt("routine-select")
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for (id, name) in self.store.choices() {
                        let is_selected = self.selected.as_deref() == Some(id);
                        if ui.selectable_label(is_selected, name).clicked() && !is_selected {
                            actions.push(Action::Select(id.to_string()));
                        }
                    }
                });

            if ui.button("Reset to defaults").clicked() {
                actions.push(Action::AskReset);
            }
        });
    }

    fn show_routine(&mut self, ui: &mut Ui, actions: &mut Vec<Action>) {
        let Self { store, selected, edits, .. } = self;
        let Some(routine) = selected.as_deref().and_then(|id| store.routine(id)) else {
            ui.label(RichText::new("No routine selected.").size(20.0));
            return;
        };

        let mut title = RichText::new(routine.name.as_str()).heading().size(32.0).strong();
        if let Some(color) = routine_color(&routine.color_class) {
            title = title.color(color);
        }
        ui.label(title);
        if let Some(info) = &routine.info {
            ui.label(RichText::new(info.as_str()).italics());
        }
        ui.add_space(10.0);

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::remainder().at_least(160.0))
            .column(Column::exact(70.0))
            .column(Column::exact(160.0))
            .column(Column::auto())
            .header(24.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Exercise");
                });
                header.col(|ui| {
                    ui.strong("Sets");
                });
                header.col(|ui| {
                    ui.strong("Reps");
                });
                header.col(|_| {});
            })
            .body(|mut body| {
                for ex in &routine.exercises {
                    let edit = edits.entry(ex.id).or_insert_with(|| RowEdit {
                        sets: ex.sets.to_string(),
                        reps: ex.reps.to_string(),
                    });
                    body.row(30.0, |mut row| {
                        row.col(|ui| {
                            ui.label(ex.name.as_str());
                        });
                        row.col(|ui| {
                            let resp = ui.add(
                                egui::TextEdit::singleline(&mut edit.sets)
                                    .desired_width(50.0)
                                    .hint_text("Sets"),
                            );
                            if resp.lost_focus() && edit.sets != ex.sets.to_string() {
                                actions.push(Action::CommitSets(ex.id));
                            }
                        });
                        row.col(|ui| {
                            let resp = ui.add(
                                egui::TextEdit::singleline(&mut edit.reps)
                                    .desired_width(140.0)
                                    .hint_text("number, time, or list"),
                            );
                            if resp.lost_focus() && edit.reps != ex.reps.to_string() {
                                actions.push(Action::CommitReps(ex.id));
                            }
                        });
                        row.col(|ui| {
                            if ui.button("Delete").on_hover_text("Delete exercise").clicked() {
                                actions.push(Action::AskDelete(ex.id));
                            }
                        });
                    });
                }
            });
    }

    fn show_add_form(&mut self, ui: &mut Ui, actions: &mut Vec<Action>) {
        if self.selected().is_none() {
            return;
        }
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.form.name)
                    .desired_width(180.0)
                    .hint_text("New exercise name"),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.form.sets)
                    .desired_width(60.0)
                    .hint_text("Sets"),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.form.reps)
                    .desired_width(160.0)
                    .hint_text("Reps (e.g. 10 or 10,5,5 or 30s)"),
            );
            if ui.button("Add Exercise").clicked() {
                actions.push(Action::Add);
            }
        });
    }

    fn show_confirm(&self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let Some(pending) = &self.pending else { return };
        let text = match pending {
            Confirm::Delete { name, .. } => format!("Delete exercise \"{}\"?", name),
            Confirm::Reset => {
                "Reset all routines to defaults? This will erase all your edits.".to_string()
            }
        };
        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(text);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        actions.push(Action::Confirmed);
                    }
                    if ui.button("Cancel").clicked() {
                        actions.push(Action::Cancelled);
                    }
                });
            });
    }

    fn show_status(&self, ui: &mut Ui) {
        match &self.status {
            Some(status) => {
                let line = format!("[{}] {}", status.at.format("%H:%M:%S"), status.message);
                let color = if status.error { Color32::RED } else { ui.visuals().text_color() };
                ui.label(RichText::new(line).color(color));
            }
            None => {
                ui.label(format!("{} routines loaded", self.store.routines().len()));
            }
        }
    }
}
