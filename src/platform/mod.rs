//! Waiting for the process to be asked to stop.

#[cfg(not(unix))]
mod stub;
#[cfg(unix)]
mod unix;

#[cfg(not(unix))]
pub use stub::ShutdownListener;
#[cfg(unix)]
pub use unix::ShutdownListener;
