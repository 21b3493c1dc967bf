use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};

/// Errors from appending a submission.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("failed to write submissions file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("submission writer is not running")]
    WriterGone,
}

/// Commands from request handlers to the writer task
pub enum SubmissionCommand {
    Append {
        record: serde_json::Value,
        response: oneshot::Sender<Result<u64, SubmissionError>>,
    },
}

/// Cloneable handle used by request handlers.
#[derive(Clone)]
pub struct SubmissionLog {
    tx: mpsc::Sender<SubmissionCommand>,
}

impl SubmissionLog {
    pub fn new(tx: mpsc::Sender<SubmissionCommand>) -> Self {
        Self { tx }
    }

    /// Append one record and wait for the writer. Returns bytes written.
    pub async fn append(&self, record: serde_json::Value) -> Result<u64, SubmissionError> {
        let (response, rx) = oneshot::channel();
        self.tx
            .send(SubmissionCommand::Append { record, response })
            .await
            .map_err(|_| SubmissionError::WriterGone)?;
        rx.await.map_err(|_| SubmissionError::WriterGone)?
    }
}

/// One JSON Lines record: compact JSON plus a trailing newline.
pub fn encode_record(record: &serde_json::Value) -> Result<String, SubmissionError> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');
    Ok(line)
}

/// Run the writer. Owns the submissions file so appends never interleave.
pub async fn run_submission_writer(mut cmd_rx: mpsc::Receiver<SubmissionCommand>, path: PathBuf) {
    let mut file: Option<File> = None;

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            SubmissionCommand::Append { record, response } => {
                let result = append_line(&mut file, &path, &record).await;
                if let Err(e) = &result {
                    // Reopen on the next append.
                    file = None;
                    tracing::error!("Failed to append submission to {}: {}", path.display(), e);
                }
                let _ = response.send(result);
            }
        }
    }

    tracing::info!("Submission writer ended");
}

async fn append_line(
    file: &mut Option<File>,
    path: &Path,
    record: &serde_json::Value,
) -> Result<u64, SubmissionError> {
    let line = encode_record(record)?;
    if file.is_none() {
        let opened = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        *file = Some(opened);
    }
    if let Some(f) = file.as_mut() {
        f.write_all(line.as_bytes()).await?;
        f.flush().await?;
    }
    Ok(line.len() as u64)
}
