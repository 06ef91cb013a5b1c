pub mod commands;
pub mod menu;
pub mod render;
pub mod setup;
