use anyhow::{Context, Result};
use shikiri_ipc::{Command, Response};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Notify;

use crate::controller::LayoutController;
use crate::platform::Platform;

/// Line-delimited JSON command server on a Unix socket.
///
/// All connections share one controller behind a mutex, so triggers from
/// different clients are applied one at a time.
pub struct IpcServer<P> {
    controller: Arc<Mutex<LayoutController<P>>>,
    socket_path: PathBuf,
    shutdown: Arc<Notify>,
}

impl<P: Platform + Send + 'static> IpcServer<P> {
    pub fn new(controller: LayoutController<P>, socket_path: impl Into<PathBuf>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            socket_path: socket_path.into(),
            shutdown: Arc::new(Notify::new()),
        }
    }

    pub fn controller(&self) -> Arc<Mutex<LayoutController<P>>> {
        self.controller.clone()
    }

    /// Serves until a client sends `quit` or the process gets Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let listener = bind(&self.socket_path)?;
        tracing::info!("Listening on {}", self.socket_path.display());

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, _) = accepted.context("Failed to accept connection")?;
                    let controller = self.controller.clone();
                    let shutdown = self.shutdown.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, controller, shutdown).await {
                            tracing::warn!("Connection error: {:#}", e);
                        }
                    });
                }
                _ = self.shutdown.notified() => {
                    tracing::info!("Quit requested");
                    break;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    break;
                }
            }
        }

        let _ = fs::remove_file(&self.socket_path);
        Ok(())
    }
}

fn bind(path: &Path) -> Result<UnixListener> {
    if path.exists() {
        if std::os::unix::net::UnixStream::connect(path).is_ok() {
            anyhow::bail!("shikiri is already running on {}", path.display());
        }
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove stale socket: {}", path.display()))?;
    }
    UnixListener::bind(path).with_context(|| format!("Failed to bind {}", path.display()))
}

async fn handle_connection<P: Platform>(
    stream: UnixStream,
    controller: Arc<Mutex<LayoutController<P>>>,
    shutdown: Arc<Notify>,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Command>(&line) {
            Ok(cmd) => {
                let response = dispatch(&controller, &cmd);
                if cmd == Command::Quit {
                    shutdown.notify_one();
                }
                response
            }
            Err(e) => Response::Error {
                message: format!("invalid command: {}", e),
            },
        };

        let mut json = serde_json::to_string(&response)?;
        json.push('\n');
        writer.write_all(json.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

fn dispatch<P: Platform>(controller: &Mutex<LayoutController<P>>, cmd: &Command) -> Response {
    // A panic in an earlier command leaves the controller state intact:
    // every operation re-reads the platform before acting on it.
    let mut controller = controller.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Recovering layout controller after a panicked command");
        PoisonError::into_inner(poisoned)
    });
    controller.handle_command(cmd)
}
