use super::actions::Action;
use crate::ui::components::export_button::{ExportHandler, ExportKind};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Runs slow work off the UI loop and reports back through actions.
///
/// Exports cannot be aborted once started: dropping the manager detaches
/// running tasks instead of cancelling them.
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    /// Spawn an export. Exactly one `Action::ExportSettled` is sent for it,
    /// whether the handler succeeds, fails or panics.
    pub fn spawn_export(&mut self, kind: ExportKind, handler: Arc<dyn ExportHandler>) -> TaskId {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let action_sender = self.action_sender.clone();
        let description = format!("Export {kind}");

        let handle = tokio::spawn(async move {
            // Inner task so a panicking handler still settles the export
            let worker = tokio::spawn(async move { handler.export(kind).await });
            let error = match worker.await {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(format!("{e:#}")),
                Err(join_err) => Some(format!("Export task failed: {join_err}")),
            };
            if let Some(message) = &error {
                log::error!("Export {} failed: {}", kind, message);
            }
            let _ = action_sender.send(Action::ExportSettled { kind, error });
        });

        log::info!("TaskManager: spawned task {} ({})", task_id, description);
        let task = BackgroundTask {
            id: task_id,
            handle,
            description,
            started_at: std::time::Instant::now(),
        };

        self.tasks.insert(task_id, task);
        task_id
    }

    /// Forget tasks that are done. Their outcome was already sent on the
    /// action channel.
    pub fn cleanup_finished_tasks(&mut self) -> Vec<TaskId> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(task_id, _)| *task_id)
            .collect();

        for task_id in &finished {
            if let Some(task) = self.tasks.remove(task_id) {
                log::debug!(
                    "TaskManager: task {} ({}) finished after {:?}",
                    task.id,
                    task.description,
                    task.started_at.elapsed()
                );
            }
        }

        finished
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}
