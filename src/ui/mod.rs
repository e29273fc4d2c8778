pub mod repl;
pub mod theme;
