use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::Context;
use log::{error, info};
use rusqlite::Connection;
use tokio::sync::oneshot;

use super::migrations::run_migrations;
use crate::error::{BookError, BookResult};

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

/// Where the worker opens its connection.
#[derive(Debug, Clone)]
enum StoreLocation {
    File(PathBuf),
    Memory,
}

impl StoreLocation {
    fn open(&self) -> rusqlite::Result<Connection> {
        match self {
            StoreLocation::File(path) => Connection::open(path),
            StoreLocation::Memory => Connection::open_in_memory(),
        }
    }

    fn describe(&self) -> String {
        match self {
            StoreLocation::File(path) => path.display().to_string(),
            StoreLocation::Memory => ":memory:".to_string(),
        }
    }
}

struct DatabaseInner {
    sender: mpsc::Sender<DbCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                error!("Failed to send shutdown to DB thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join DB thread: {join_err:?}");
            }
        }
    }
}

/// Handle to the book database. Clones share one worker thread, which owns
/// the SQLite connection and runs tasks in submission order.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
    location: Arc<StoreLocation>,
}

impl Database {
    pub fn new(db_path: PathBuf) -> BookResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| {
                BookError::StoreInitialization(format!(
                    "failed to create database directory {}: {err}",
                    parent.display()
                ))
            })?;
        }

        Self::spawn(StoreLocation::File(db_path))
    }

    /// Ephemeral store that disappears with the last handle.
    pub fn open_in_memory() -> BookResult<Self> {
        Self::spawn(StoreLocation::Memory)
    }

    fn spawn(location: StoreLocation) -> BookResult<Self> {
        let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
        let (ready_tx, ready_rx) = mpsc::channel::<anyhow::Result<()>>();
        let location_for_thread = location.clone();

        let worker = thread::Builder::new()
            .name("mybooks-db".into())
            .spawn(move || {
                let mut conn = match location_for_thread.open() {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(Err(anyhow::Error::new(err)
                            .context("failed to open SQLite database")));
                        return;
                    }
                };

                if let StoreLocation::File(_) = location_for_thread {
                    if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                        error!("Failed to enable WAL mode: {err}");
                    }
                }

                let init_result =
                    run_migrations(&mut conn).context("failed to run database migrations");
                if ready_tx.send(init_result).is_err() {
                    error!("DB initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        DbCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        DbCommand::Shutdown => break,
                    }
                }

                info!("Database thread shutting down");
            })
            .map_err(|err| {
                BookError::StoreInitialization(format!(
                    "failed to spawn database worker thread: {err}"
                ))
            })?;

        ready_rx
            .recv()
            .map_err(|_| {
                BookError::StoreInitialization(
                    "database worker exited before signaling readiness".into(),
                )
            })?
            .map_err(|err| BookError::StoreInitialization(format!("{err:#}")))?;

        info!("Database initialized at {}", location.describe());

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            location: Arc::new(location),
        })
    }

    /// File backing this database, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        match self.location.as_ref() {
            StoreLocation::File(path) => Some(path.as_path()),
            StoreLocation::Memory => None,
        }
    }

    pub async fn execute<F, T>(&self, task: F) -> BookResult<T>
    where
        F: FnOnce(&mut Connection) -> BookResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = DbCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("DB caller dropped before receiving result");
            }
        }));

        sender.send(command).map_err(|err| {
            BookError::WorkerUnavailable(format!("failed to send command to DB thread: {err}"))
        })?;

        reply_rx.await.map_err(|_| {
            BookError::WorkerUnavailable("database thread terminated unexpectedly".into())
        })?
    }
}
