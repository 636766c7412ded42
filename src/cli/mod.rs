mod ask;
mod probe;
mod root;

pub use root::Cli;
