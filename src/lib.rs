//! coordprep - preview a CSV file, pick its coordinate columns and choose
//! input and output coordinate reference systems from the terminal.

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod logging;
pub mod table;
pub mod tasks;
pub mod ui;
