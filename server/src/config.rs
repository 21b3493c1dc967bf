use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Prebuilt site assets; `index.html` inside is the fallback document
    pub dist_dir: PathBuf,
    /// Append-only JSON Lines file receiving contact submissions
    pub submissions_path: PathBuf,
    /// Pending appends the writer task will buffer
    pub submission_queue: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            dist_dir: PathBuf::from("dist"),
            submissions_path: PathBuf::from("contact-submissions.jsonl"),
            submission_queue: 256,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `PORT`, `NEXORA_DIST_DIR` and
    /// `NEXORA_SUBMISSIONS_PATH`.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|e| format!("PORT must be a port number, got {port:?}: {e}"))?;
            config.listen_addr = format!("0.0.0.0:{port}");
        }
        if let Some(dir) = lookup("NEXORA_DIST_DIR") {
            config.dist_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("NEXORA_SUBMISSIONS_PATH") {
            config.submissions_path = PathBuf::from(path);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.is_empty() {
            return Err("listen_addr must not be empty".to_string());
        }
        if self.submissions_path.as_os_str().is_empty() {
            return Err("submissions_path must not be empty".to_string());
        }
        if self.submission_queue == 0 {
            return Err("submission_queue must be > 0".to_string());
        }
        Ok(())
    }

    pub fn index_path(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}
