pub mod ast;
pub mod ast_printer;
pub mod builtins;
pub mod config;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod screen;
pub mod terminal;
pub mod token;
pub mod value;
