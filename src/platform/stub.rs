use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};

/// Ctrl+C is the only stop request available off Unix.
pub struct ShutdownListener {
    runtime: Runtime,
}

impl ShutdownListener {
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("build signal runtime")?;
        Ok(Self { runtime })
    }

    pub fn wait(self) -> Result<&'static str> {
        self.runtime
            .block_on(tokio::signal::ctrl_c())
            .context("listen for Ctrl+C")?;
        Ok("CTRL_C")
    }
}
