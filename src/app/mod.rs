mod cli;
mod render;

pub use cli::{Command, run};
