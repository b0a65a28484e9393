use super::{Column, Error, Token};
use crate::error;
use crate::mach::Symbols;

type Result<T> = std::result::Result<T, Error>;

/// ## Formula tokenizer
///
/// Produces one token per call, advancing a cursor over the source.
/// Identifiers are resolved against the symbol tables and numeric
/// literals are interned as anonymous constants as a side effect of
/// tokenizing. Whether `-`/`+` is a sign or a binary operator depends
/// on the previously accepted token, which the caller supplies.

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    /// Cursor position in chars; on error this is the error offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn next(&mut self, symbols: &mut Symbols, last: Option<&Token>) -> Result<(Token, Column)> {
        while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let start = self.pos;
        if self.pos >= self.chars.len() {
            return Ok((Token::End, start..start));
        }
        let ch = self.chars[self.pos];

        if let Some(token) = match ch {
            '(' => Some(Token::Open),
            ')' => Some(Token::Close),
            ',' => Some(Token::Comma),
            ';' => Some(Token::EndSub),
            _ => None,
        } {
            self.pos += 1;
            return Ok((token, start..self.pos));
        }

        if ch.is_ascii_digit() {
            return self.number(symbols, start);
        }

        if ch.is_ascii_alphabetic() {
            return self.identifier(symbols, start);
        }

        // a sign is unary when nothing binds to its left
        if ch == '-' || ch == '+' {
            let unary = match last {
                None => true,
                Some(Token::Open) | Some(Token::Oper(_)) | Some(Token::Comma) => true,
                _ => false,
            };
            if unary {
                self.pos += 1;
                let addr = if ch == '-' { symbols.neg() } else { symbols.nop() };
                return Ok((Token::Unary(addr), start..self.pos));
            }
        }

        // first-match scan in registration order; names registered
        // first win
        for index in 0..symbols.oper_count() {
            let name: Vec<char> = symbols.oper(index).name.chars().collect();
            if self.chars[self.pos..].starts_with(&name[..]) {
                self.pos += name.len();
                return Ok((Token::Oper(index), start..self.pos));
            }
        }

        Err(error!(SyntaxError, ..&(start..start + 1); "UNKNOWN CHARACTER"))
    }

    fn number(&mut self, symbols: &mut Symbols, start: usize) -> Result<(Token, Column)> {
        while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        let mut fraction = false;
        if self.peek_is('.') {
            self.pos += 1;
            while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
                fraction = true;
                self.pos += 1;
            }
        } else {
            fraction = true;
        }
        if fraction && (self.peek_is('e') || self.peek_is('E')) {
            let mut ahead = self.pos + 1;
            if ahead < self.chars.len() && (self.chars[ahead] == '+' || self.chars[ahead] == '-') {
                ahead += 1;
            }
            if ahead < self.chars.len() && self.chars[ahead].is_ascii_digit() {
                self.pos = ahead;
                while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
            }
        }
        let s: String = self.chars[start..self.pos].iter().collect();
        match s.parse::<f64>() {
            Ok(val) => {
                let addr = symbols.add_auto_constant(val);
                Ok((Token::Number(addr), start..self.pos))
            }
            Err(_) => Err(error!(SyntaxError, ..&(start..self.pos); "BAD NUMBER")),
        }
    }

    fn identifier(&mut self, symbols: &mut Symbols, start: usize) -> Result<(Token, Column)> {
        while self.pos < self.chars.len() {
            let ch = self.chars[self.pos];
            if !ch.is_ascii_alphanumeric() && ch != '_' {
                break;
            }
            self.pos += 1;
        }
        let symbol: String = self.chars[start..self.pos].iter().collect();
        let col = start..self.pos;

        // assignment target: identifier immediately followed by '='
        if self.peek_is('=') {
            if symbols.find_constant(&symbol).is_some() {
                return Err(error!(CannotAssign, ..&col;
                    format!("'{}' IS A CONSTANT", symbol)));
            }
            if symbols.find_function(&symbol).is_some() {
                return Err(error!(CannotAssign, ..&col;
                    format!("'{}' IS A FUNCTION", symbol)));
            }
            symbols.intern_variable(&symbol);
            self.pos += 1;
            return Ok((Token::WrVar(symbol), col));
        }

        if let Some(addr) = symbols.find_constant(&symbol) {
            return Ok((Token::Const(addr), col));
        }
        if let Some(addr) = symbols.find_variable(&symbol) {
            return Ok((Token::Var(addr), col));
        }
        if let Some(addr) = symbols.find_function(&symbol) {
            if !self.peek_is('(') {
                return Err(error!(FunctionWithoutParens, ..&col; symbol));
            }
            return Ok((Token::Func(addr), col));
        }

        Err(error!(UnknownSymbol, ..&col; symbol))
    }

    fn peek_is(&self, ch: char) -> bool {
        self.pos < self.chars.len() && self.chars[self.pos] == ch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::Symbols;

    fn lex_all(symbols: &mut Symbols, s: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(s);
        let mut out: Vec<Token> = vec![];
        loop {
            let last = out.last().cloned();
            let (token, _col) = lexer.next(symbols, last.as_ref()).unwrap();
            let end = token == Token::End;
            out.push(token);
            if end {
                return out;
            }
        }
    }

    #[test]
    fn test_punctuation_and_numbers() {
        let mut symbols = Symbols::default();
        let tokens = lex_all(&mut symbols, " ( 12, 3.5 ) ;");
        let twelve = symbols.find_auto_constant(12.0).unwrap();
        let three_five = symbols.find_auto_constant(3.5).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Open,
                Token::Number(twelve),
                Token::Comma,
                Token::Number(three_five),
                Token::Close,
                Token::EndSub,
                Token::End,
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        let mut symbols = Symbols::default();
        lex_all(&mut symbols, "2 2.5 1e3 1.5e-2 7.");
        assert!(symbols.find_auto_constant(2.0).is_some());
        assert!(symbols.find_auto_constant(2.5).is_some());
        assert!(symbols.find_auto_constant(1000.0).is_some());
        assert!(symbols.find_auto_constant(0.015).is_some());
        assert!(symbols.find_auto_constant(7.0).is_some());
    }

    #[test]
    fn test_unary_vs_binary_sign() {
        let mut symbols = Symbols::default();
        let neg = symbols.neg();
        let tokens = lex_all(&mut symbols, "-2-2");
        let sub = symbols.find_operator("-").unwrap();
        let two = symbols.find_auto_constant(2.0).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Unary(neg),
                Token::Number(two),
                Token::Oper(sub),
                Token::Number(two),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_sign_after_sign_is_binary() {
        let mut symbols = Symbols::default();
        let neg = symbols.neg();
        let tokens = lex_all(&mut symbols, "--2");
        let sub = symbols.find_operator("-").unwrap();
        assert_eq!(tokens[0], Token::Unary(neg));
        assert_eq!(tokens[1], Token::Oper(sub));
    }

    #[test]
    fn test_unary_after_open_and_comma() {
        let mut symbols = Symbols::default();
        let neg = symbols.neg();
        let tokens = lex_all(&mut symbols, "max(-1,-2)");
        assert_eq!(tokens[2], Token::Unary(neg));
        assert_eq!(tokens[5], Token::Unary(neg));
    }

    #[test]
    fn test_assignment_target() {
        let mut symbols = Symbols::default();
        let tokens = lex_all(&mut symbols, "t=1");
        assert_eq!(tokens[0], Token::WrVar("t".to_string()));
        assert!(symbols.find_variable("t").is_some());
    }

    #[test]
    fn test_assignment_to_constant_fails() {
        let mut symbols = Symbols::default();
        symbols.add_constant("pi", std::f64::consts::PI).unwrap();
        let mut lexer = Lexer::new("pi=3");
        let err = lexer.next(&mut symbols, None).unwrap_err();
        assert_eq!(err.to_string(), "CANNOT ASSIGN (0..2); 'pi' IS A CONSTANT");
    }

    #[test]
    fn test_function_requires_paren() {
        let mut symbols = Symbols::default();
        let mut lexer = Lexer::new("sin 1");
        let err = lexer.next(&mut symbols, None).unwrap_err();
        assert_eq!(err.to_string(), "KNOWN FUNCTION WITHOUT () (0..3); sin");
    }

    #[test]
    fn test_unknown_symbol_offset() {
        let mut symbols = Symbols::default();
        let mut lexer = Lexer::new("2+zed");
        let last = lexer.next(&mut symbols, None).unwrap().0;
        let last = lexer.next(&mut symbols, Some(&last)).unwrap().0;
        let err = lexer.next(&mut symbols, Some(&last)).unwrap_err();
        assert_eq!(err.column(), 2..5);
    }

    #[test]
    fn test_unknown_character() {
        let mut symbols = Symbols::default();
        let mut lexer = Lexer::new("#");
        let err = lexer.next(&mut symbols, None).unwrap_err();
        assert_eq!(err.column(), 0..1);
    }
}
