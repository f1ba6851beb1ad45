pub mod ast;
pub mod executor;
pub mod lexer;
pub mod parser;
pub mod repl;
