mod app;
pub mod args;
pub mod commands;
mod config;
mod data_file;
mod error;
pub mod menu;
pub mod model;
mod utils;


pub use app::App;
pub use config::Config;
pub use data_file::{DataFile, DATA_FILE};
pub use error::{Error, ErrorType, Result};
