//! Biangbiang host: wires the core model to OCR, clipboard, translation
//! and the terminal.

pub mod app;
pub mod capture;
pub mod cli;
pub mod clipboard;
pub mod command_executor;
pub mod core_bridge;
pub mod error;
pub mod logging;
pub mod report;
pub mod run;
pub mod system;

pub use app::{App, Job, Notice};
pub use command_executor::{Command, CommandExecutor};
pub use error::{AppError, AppResult};
pub use run::{Services, complete_jobs, process_text, run};
