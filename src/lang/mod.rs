/*!
# Formula Language Module

This module provides lexical analysis of arithmetic formula expressions.

*/

pub type Column = std::ops::Range<usize>;

#[macro_use]
mod error;
mod lex;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::Lexer;
pub use token::Token;
