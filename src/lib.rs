//! Terminal front-end for managing a YouTube channel through the `yutu` CLI.
//!
//! The core is the invocation layer: [`command`] turns a resource/action and
//! an ordered parameter set into argv, [`process`] runs it with a bounded
//! timeout and folds every outcome into an [`execution::YutuResult`], and
//! [`yutu::YutuCli`] fixes the parameter shape of each supported call.

pub mod command;
pub mod config;
pub mod execution;
pub mod menu;
pub mod printer;
pub mod process;
pub mod utils;
pub mod yutu;

pub use config::Config;
pub use execution::{Payload, YutuResult};
pub use yutu::YutuCli;
