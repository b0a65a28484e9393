use crate::mach::Address;

/// One lexical unit of a formula. Identifiers are resolved against the
/// symbol tables while tokenizing, so most variants carry a table index
/// rather than a lexeme. Assignment targets keep their name; the
/// translator re-resolves it at the statement terminator.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    /// Numeric literal, interned as an anonymous constant.
    Number(Address),
    /// Named constant reference.
    Const(Address),
    /// Variable reference.
    Var(Address),
    /// Assignment target: identifier immediately followed by `=`.
    WrVar(String),
    /// Function name, guaranteed to be followed by `(`.
    Func(Address),
    /// Binary operator.
    Oper(Address),
    /// Unary sign, carrying the NEG or NOP pseudo-operator index.
    Unary(Address),
    Open,
    Close,
    Comma,
    /// Statement terminator `;`.
    EndSub,
    /// End of input.
    End,
}

impl Token {
    /// Constants, variables and literals: the things a binary operator
    /// needs on both sides.
    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Const(_) | Token::Var(_))
    }
}
