//! deej - bootstrap for the deej mixer daemon
//!
//! Build identity is injected at compile time:
//!   DEEJ_BUILD_TYPE=release DEEJ_VERSION_TAG=v1.2.0 cargo build --release

mod bootstrap;
mod cli;
mod deej;
mod logging;
mod platform;
mod version;

fn main() {
    let options = cli::InvocationOptions::from_env();
    bootstrap::run(&options, &version::VersionInfo::injected());
}
