use super::{Opcode, Operation, Program, Symbols};
use crate::error;
use crate::lang::{Column, Error, Lexer, Token};

type Result<T> = std::result::Result<T, Error>;

/// Translate formula source into a postfix program. On failure the
/// error's column is the character offset of the first error.
pub fn compile(program: &mut Program, symbols: &mut Symbols, source: &str) -> Result<()> {
    Translator::new(source).translate(program, symbols)
}

/// Operator-stack entry. Functions carry a live countdown of argument
/// groups still to close; `Open` is the parenthesis marker the
/// close/comma handling pops back to.
enum Entry {
    Oper(usize),
    Unary(usize),
    Func(usize, usize),
    Open,
}

/// ## Shunting-yard translator
///
/// Consumes tokens one at a time and emits postfix instructions,
/// holding back operators on an explicit stack until precedence orders
/// them. Extensions over the textbook algorithm: unary sign
/// pseudo-operators, function argument countdowns driven by commas, a
/// fast-path rewrite of `^2`/`^3`, and a single pending assignment
/// target flushed at each `;`.

struct Translator {
    lexer: Lexer,
    stack: Vec<Entry>,
    target: Option<String>,
    par_level: i32,
    last: Option<Token>,
}

impl Translator {
    fn new(source: &str) -> Translator {
        Translator {
            lexer: Lexer::new(source),
            stack: vec![],
            target: None,
            par_level: 0,
            last: None,
        }
    }

    fn translate(&mut self, program: &mut Program, symbols: &mut Symbols) -> Result<()> {
        loop {
            let (token, col) = self.lexer.next(symbols, self.last.as_ref())?;
            self.check_syntax(&token, &col)?;
            match &token {
                Token::Number(addr) | Token::Const(addr) => {
                    self.constant(program, symbols, *addr)
                }
                Token::Var(addr) => program.push(Opcode::ReadVar(*addr)),
                Token::WrVar(name) => self.assignment_target(name, &col)?,
                Token::Func(addr) => {
                    self.stack.push(Entry::Func(*addr, symbols.func(*addr).args))
                }
                Token::Unary(addr) => {
                    // unary plus is dropped; unary minus is held back
                    // with the highest effective precedence
                    if *addr == symbols.neg() {
                        self.stack.push(Entry::Unary(*addr));
                    }
                }
                Token::Oper(addr) => self.operator(program, symbols, *addr),
                Token::Open => {
                    self.par_level += 1;
                    self.stack.push(Entry::Open);
                }
                Token::Close | Token::Comma => {
                    self.close_group(program, symbols, &token, &col)?
                }
                Token::EndSub => self.end_statement(program, symbols, &col)?,
                Token::End => {
                    self.end_input(program, symbols, &col)?;
                    return Ok(());
                }
            }
            self.last = Some(token);
        }
    }

    /// Reject token pairs no operand or operator can sit between.
    fn check_syntax(&self, token: &Token, col: &Column) -> Result<()> {
        let missing_operand = error!(MissingOperand, ..col);
        let missing_operator = error!(MissingOperator, ..col);
        match self.last {
            Some(Token::Oper(_)) => match token {
                Token::Oper(_) | Token::End => return Err(missing_operand),
                _ => {}
            },
            Some(Token::Unary(_)) => {
                if let Token::End = token {
                    return Err(missing_operand);
                }
            }
            Some(ref last) if last.is_operand() => match token {
                t if t.is_operand() => return Err(missing_operator),
                Token::Open | Token::Func(_) => return Err(missing_operator),
                _ => {}
            },
            Some(Token::Close) => match token {
                t if t.is_operand() => return Err(missing_operator),
                Token::Open | Token::Func(_) => return Err(missing_operator),
                _ => {}
            },
            _ => {}
        }
        Ok(())
    }

    /// Emit a constant read, unless it completes the `^2`/`^3` fast
    /// path: a pending power on the stack plus a constant equal to
    /// exactly 2 or 3 becomes a dedicated square/cube call.
    fn constant(&mut self, program: &mut Program, symbols: &Symbols, addr: usize) {
        if let Some(Entry::Oper(top)) = self.stack.last() {
            if symbols.oper(*top).op == Operation::Pow {
                let val = symbols.const_val(addr);
                if val == 2.0 {
                    program.push(Opcode::Func(symbols.pow2()));
                    self.stack.pop();
                    return;
                }
                if val == 3.0 {
                    program.push(Opcode::Func(symbols.pow3()));
                    self.stack.pop();
                    return;
                }
            }
        }
        program.push(Opcode::ReadConst(addr));
    }

    fn assignment_target(&mut self, name: &str, col: &Column) -> Result<()> {
        match self.target {
            None => {
                self.target = Some(name.to_string());
                Ok(())
            }
            Some(ref pending) => Err(error!(UnterminatedAssignment, ..col;
                format!("'{}'", pending))),
        }
    }

    /// Pop while the stack top binds at least as tight, then push.
    /// All operators are left-associative, so rank ties pop first. A
    /// pending unary minus outranks everything except an incoming
    /// power operator: `-2^2` is `-(2^2)`.
    fn operator(&mut self, program: &mut Program, symbols: &Symbols, addr: usize) {
        let rank = symbols.oper(addr).rank;
        let incoming_pow = symbols.oper(addr).op == Operation::Pow;
        while let Some(top) = self.stack.last() {
            match top {
                Entry::Oper(i) if symbols.oper(*i).rank <= rank => {
                    program.push(Opcode::Oper(*i));
                    self.stack.pop();
                }
                Entry::Unary(i) if !incoming_pow => {
                    program.push(Opcode::Oper(*i));
                    self.stack.pop();
                }
                _ => break,
            }
        }
        self.stack.push(Entry::Oper(addr));
    }

    /// Close-parenthesis and comma share handling: unwind to the most
    /// recent marker, then settle one argument group of a pending
    /// function. A comma reopens the next group.
    fn close_group(
        &mut self,
        program: &mut Program,
        symbols: &Symbols,
        token: &Token,
        col: &Column,
    ) -> Result<()> {
        if let Token::Close = token {
            self.par_level -= 1;
            if self.par_level < 0 {
                return Err(error!(ExtraParenthesis, ..col));
            }
        }
        loop {
            match self.stack.pop() {
                None => return Err(error!(MismatchedParenthesis, ..col)),
                Some(Entry::Open) => break,
                Some(Entry::Oper(i)) | Some(Entry::Unary(i)) => program.push(Opcode::Oper(i)),
                // a call closed before all its argument groups were
                // supplied, as in "max(min(1))"
                Some(Entry::Func(addr, _)) => {
                    return Err(error!(MissingOperand, ..col;
                        symbols.func(addr).name.clone()))
                }
            }
        }
        if let Some(Entry::Func(addr, args)) = self.stack.last_mut() {
            *args -= 1;
            if *args == 0 {
                program.push(Opcode::Func(*addr));
                self.stack.pop();
            }
        }
        if let Token::Comma = token {
            // "," is equivalent to ")("
            self.stack.push(Entry::Open);
        }
        Ok(())
    }

    /// Statement terminator: flush pending operators, then store the
    /// result into the pending target variable.
    fn end_statement(
        &mut self,
        program: &mut Program,
        symbols: &Symbols,
        col: &Column,
    ) -> Result<()> {
        self.drain_operators(program);
        if let Some(Entry::Func(addr, _)) = self.stack.last() {
            return Err(error!(MissingOperand, ..col;
                symbols.func(*addr).name.clone()));
        }
        if !self.stack.is_empty() {
            return Err(error!(UnbalancedParenthesis, ..col));
        }
        match self.target.take() {
            None => Err(error!(ExtraSemicolon, ..col)),
            Some(name) => match symbols.find_variable(&name) {
                Some(addr) => {
                    program.push(Opcode::WriteVar(addr));
                    Ok(())
                }
                None => Err(error!(UnknownVariable, ..col; name)),
            },
        }
    }

    fn end_input(
        &mut self,
        program: &mut Program,
        symbols: &Symbols,
        col: &Column,
    ) -> Result<()> {
        if self.par_level != 0 {
            return Err(error!(UnbalancedParenthesis, ..col;
                format!("DEPTH {}", self.par_level)));
        }
        if let Some(ref name) = self.target {
            return Err(error!(UnterminatedAssignment, ..col; format!("'{}'", name)));
        }
        self.drain_operators(program);
        // parentheses are balanced and operators are drained, so the
        // only entry that can remain is an under-supplied call
        if let Some(Entry::Func(addr, _)) = self.stack.last() {
            return Err(error!(MissingOperand, ..col;
                symbols.func(*addr).name.clone()));
        }
        program.push(Opcode::Return);
        Ok(())
    }

    fn drain_operators(&mut self, program: &mut Program) {
        while let Some(top) = self.stack.last() {
            match top {
                Entry::Oper(i) | Entry::Unary(i) => {
                    program.push(Opcode::Oper(*i));
                    self.stack.pop();
                }
                _ => break,
            }
        }
    }
}
