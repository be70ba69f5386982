pub mod generator;
pub mod history;
pub mod ui;
