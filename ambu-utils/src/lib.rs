mod json;
pub use json::*;
mod lexer;
pub use lexer::*;
