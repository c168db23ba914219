use std::time::Duration;

use client_core::EditSession;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::Task;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const DRAFT_INPUT_ID: &str = "todo-draft";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Add,
    Update,
}

impl InputMode {
    pub fn for_session(session: &EditSession) -> Self {
        if session.is_active() {
            InputMode::Update
        } else {
            InputMode::Add
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            InputMode::Add => "Add a new task...",
            InputMode::Update => "Edit your task...",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            InputMode::Add => "Add",
            InputMode::Update => "Update",
        }
    }

    fn accent(self) -> egui::Color32 {
        match self {
            InputMode::Add => egui::Color32::from_rgb(59, 130, 246),
            InputMode::Update => egui::Color32::from_rgb(34, 197, 94),
        }
    }
}

pub struct TodoApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    tasks: Vec<Task>,
    edit_session: EditSession,
    draft: String,
    status: String,
    last_error: Option<UiError>,
    focus_draft: bool,
}

impl TodoApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut status = "Loading tasks...".to_string();
        dispatch_backend_command(&cmd_tx, BackendCommand::Load, &mut status);
        Self {
            cmd_tx,
            ui_rx,
            tasks: Vec::new(),
            edit_session: EditSession::default(),
            draft: String::new(),
            status,
            last_error: None,
            focus_draft: true,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::TasksChanged(tasks) => {
                self.status = format!("{} task(s)", tasks.len());
                self.last_error = None;
                self.tasks = tasks;
            }
            UiEvent::EditSessionChanged(session) => {
                self.focus_draft = true;
                self.edit_session = session;
            }
            UiEvent::DraftReplaced(text) => {
                self.draft = text;
            }
            UiEvent::Error(err) => {
                tracing::warn!(context = ?err.context(), "{}", err.message());
                self.status = err.status_line();
                self.last_error = Some(err);
            }
        }
    }

    fn submit_draft(&self) -> BackendCommand {
        let text = self.draft.clone();
        match InputMode::for_session(&self.edit_session) {
            InputMode::Add => BackendCommand::Create { text },
            InputMode::Update => BackendCommand::SubmitEdit { text },
        }
    }

    fn show_input_row(&mut self, ui: &mut egui::Ui, pending: &mut Vec<BackendCommand>) {
        let mode = InputMode::for_session(&self.edit_session);
        ui.horizontal(|ui| {
            let button_width = if mode == InputMode::Update { 150.0 } else { 70.0 };
            let edit = egui::TextEdit::singleline(&mut self.draft)
                .id_salt(DRAFT_INPUT_ID)
                .hint_text(mode.hint())
                .desired_width(ui.available_width() - button_width);
            let response = ui.add(edit);
            if self.focus_draft {
                response.request_focus();
                self.focus_draft = false;
            }
            if response.changed() {
                pending.push(BackendCommand::SetDraft {
                    text: self.draft.clone(),
                });
            }
            let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            let button = egui::Button::new(
                egui::RichText::new(mode.button_label()).color(egui::Color32::WHITE),
            )
            .fill(mode.accent());
            if ui.add(button).clicked() || entered {
                pending.push(self.submit_draft());
            }
            if mode == InputMode::Update && ui.button("Cancel").clicked() {
                pending.push(BackendCommand::CancelEdit);
            }
        });
    }

    fn show_task_list(&self, ui: &mut egui::Ui, pending: &mut Vec<BackendCommand>) {
        if self.tasks.is_empty() {
            ui.label(egui::RichText::new("Nothing to do yet.").weak());
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for task in &self.tasks {
                let editing = self.edit_session.target() == Some(&task.id);
                let fill = if task.completed {
                    egui::Color32::from_rgb(220, 252, 231)
                } else {
                    ui.visuals().faint_bg_color
                };
                egui::Frame::NONE
                    .fill(fill)
                    .corner_radius(4.0)
                    .inner_margin(6.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let mut label = egui::RichText::new(&task.text);
                            if task.completed {
                                label = label.strikethrough().color(egui::Color32::GRAY);
                            }
                            if editing {
                                label = label.italics();
                            }
                            let toggled = ui
                                .add(egui::Label::new(label).sense(egui::Sense::click()))
                                .on_hover_text("Click to toggle done")
                                .clicked();
                            if toggled {
                                pending.push(BackendCommand::ToggleComplete {
                                    id: task.id.clone(),
                                });
                            }

                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.button("Delete").clicked() {
                                        pending.push(BackendCommand::Delete {
                                            id: task.id.clone(),
                                        });
                                    }
                                    if ui.button("Edit").clicked() {
                                        pending.push(BackendCommand::BeginEdit {
                                            id: task.id.clone(),
                                        });
                                    }
                                },
                            );
                        });
                    });
                ui.add_space(4.0);
            }
        });
    }
}

impl eframe::App for TodoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut pending = Vec::new();
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let text = egui::RichText::new(&self.status).small();
            if self.last_error.is_some() {
                ui.label(text.color(ui.visuals().error_fg_color));
            } else {
                ui.label(text.weak());
            }
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("TODO App");
            ui.add_space(8.0);
            self.show_input_row(ui, &mut pending);
            ui.add_space(8.0);
            self.show_task_list(ui, &mut pending);
        });

        for cmd in pending {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
