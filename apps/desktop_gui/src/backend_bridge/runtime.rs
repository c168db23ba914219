//! Backend worker: owns the tokio runtime and the todo controller, turns UI
//! commands into controller actions and controller events into UI events.

use std::{sync::Arc, thread};

use client_core::{ClientSettings, TodoListController};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::broadcast::error::RecvError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let controller = match TodoListController::with_settings(&settings) {
                Ok(controller) => controller,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("{err:#}"),
                    )));
                    tracing::error!("invalid todo api settings: {err:#}");
                    return;
                }
            };

            let mut events = controller.subscribe_events();
            let forward_tx = ui_tx.clone();
            tokio::task::spawn_blocking(move || loop {
                match events.blocking_recv() {
                    Ok(event) => {
                        if forward_tx.send(UiEvent::from(event)).is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "ui event forwarder lagged behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            });

            let _ = ui_tx.try_send(UiEvent::Info(format!("Using {}", settings.api_url)));

            while let Ok(cmd) = cmd_rx.recv() {
                if cmd.is_local() {
                    run_command(&controller, cmd).await;
                } else {
                    let controller = Arc::clone(&controller);
                    tokio::spawn(async move { run_command(&controller, cmd).await });
                }
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

async fn run_command(controller: &TodoListController, cmd: BackendCommand) {
    let name = cmd.name();
    let outcome = match cmd {
        BackendCommand::Load => controller.load().await,
        BackendCommand::SetDraft { text } => {
            controller.set_draft(text).await;
            return;
        }
        BackendCommand::Create { text } => controller.create(&text).await,
        BackendCommand::BeginEdit { id } => controller.begin_edit(&id).await,
        BackendCommand::CancelEdit => {
            controller.cancel_edit().await;
            return;
        }
        BackendCommand::SubmitEdit { text } => controller.submit_edit(&text).await,
        BackendCommand::Delete { id } => controller.delete(&id).await,
        BackendCommand::ToggleComplete { id } => controller.toggle_complete(&id).await,
    };
    tracing::debug!(command = name, ?outcome, "backend command finished");
}
