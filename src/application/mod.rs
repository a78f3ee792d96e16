pub mod cli;
mod render;
pub mod ui;
