use anyhow::{Context, Result};
use nix::sys::signal::{SigSet, Signal};
use tracing::debug;

const SHUTDOWN_SIGNALS: [Signal; 3] = [Signal::SIGINT, Signal::SIGTERM, Signal::SIGHUP];

/// Holds the shutdown signals blocked so they queue until `wait`.
pub struct ShutdownListener {
    set: SigSet,
}

impl ShutdownListener {
    pub fn new() -> Result<Self> {
        let mut set = SigSet::empty();
        for sig in SHUTDOWN_SIGNALS {
            set.add(sig);
        }
        set.thread_block().context("sigprocmask")?;
        debug!(signals = ?SHUTDOWN_SIGNALS, "shutdown signals blocked");
        Ok(Self { set })
    }

    pub fn wait(self) -> Result<&'static str> {
        let sig = self.set.wait().context("sigwait")?;
        Ok(sig.as_str())
    }
}
