mod common;
mod prompt;
