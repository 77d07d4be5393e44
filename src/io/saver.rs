use std::sync::mpsc;
use std::thread;

use super::gateway::{Gateway, GatewayError};
use crate::model::project::Project;
use crate::model::task::Task;

enum SaveJob {
    Projects(Vec<Project>),
    Tasks(Vec<Task>),
}

/// Fire-and-forget persistence: snapshots are queued to a worker
/// thread, which coalesces the backlog per collection before writing,
/// so a newer snapshot supersedes any earlier in-flight one
/// (last-write-wins). Save errors come back through a polled channel —
/// surfaced out-of-band, never swallowed.
pub struct Autosaver {
    tx: Option<mpsc::Sender<SaveJob>>,
    errors: mpsc::Receiver<GatewayError>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Autosaver {
    pub fn start(gateway: Box<dyn Gateway>) -> Autosaver {
        let (tx, rx) = mpsc::channel::<SaveJob>();
        let (err_tx, err_rx) = mpsc::channel::<GatewayError>();

        let worker = thread::spawn(move || {
            while let Ok(first) = rx.recv() {
                let mut projects = None;
                let mut tasks = None;
                let mut stash = |job: SaveJob| match job {
                    SaveJob::Projects(p) => projects = Some(p),
                    SaveJob::Tasks(t) => tasks = Some(t),
                };
                stash(first);
                // Drain whatever queued up while we were busy; only the
                // latest snapshot per collection matters.
                while let Ok(job) = rx.try_recv() {
                    stash(job);
                }
                drop(stash);

                if let Some(p) = projects
                    && let Err(e) = gateway.save_projects(&p)
                {
                    let _ = err_tx.send(e);
                }
                if let Some(t) = tasks
                    && let Err(e) = gateway.save_tasks(&t)
                {
                    let _ = err_tx.send(e);
                }
            }
        });

        Autosaver {
            tx: Some(tx),
            errors: err_rx,
            worker: Some(worker),
        }
    }

    /// Queue a projects snapshot. Never blocks on the actual write.
    pub fn save_projects(&self, snapshot: Vec<Project>) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(SaveJob::Projects(snapshot));
        }
    }

    /// Queue a tasks snapshot. Never blocks on the actual write.
    pub fn save_tasks(&self, snapshot: Vec<Task>) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(SaveJob::Tasks(snapshot));
        }
    }

    /// Non-blocking poll for save errors reported so far.
    pub fn poll_errors(&self) -> Vec<GatewayError> {
        let mut errors = Vec::new();
        while let Ok(e) = self.errors.try_recv() {
            errors.push(e);
        }
        errors
    }

    /// Flush the queue, stop the worker, and return every save error.
    /// In-flight saves are completed, not cancelled.
    pub fn finish(mut self) -> Vec<GatewayError> {
        self.shutdown();
        let mut errors = Vec::new();
        while let Ok(e) = self.errors.try_recv() {
            errors.push(e);
        }
        errors
    }

    fn shutdown(&mut self) {
        // Closing the channel lets the worker drain and exit.
        drop(self.tx.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
