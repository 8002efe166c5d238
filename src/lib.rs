pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::{cli::LocalStorage, toml_config::SyllabusConfig};
pub use core::{
    render::{compile, SyllabusRenderer},
    schedule::{build_schedule, render_schedule_toml, ScheduleBuilder},
    templates::{Designation, EntryTemplate},
};
pub use utils::error::{Result, SyllabusError};
