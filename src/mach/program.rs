use super::{Opcode, Symbols};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Compiled program
///
/// An ordered sequence of instructions ending in exactly one `Return`,
/// produced by the translator and immutable thereafter. The validator
/// replays the program against a simulated stack depth without
/// executing any arithmetic, so it is safe on hostile or incomplete
/// programs.

#[derive(Debug, Default)]
pub struct Program {
    ops: Vec<Opcode>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear()
    }

    pub fn push(&mut self, op: Opcode) {
        self.ops.push(op)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[Opcode] {
        &self.ops
    }

    /// Static stack-discipline check. On failure the error's column
    /// holds the first failing instruction index. Idempotent.
    pub fn validate(&self, symbols: &Symbols) -> Result<()> {
        let mut depth: i64 = 0;
        for (index, op) in self.ops.iter().enumerate() {
            let col = index..index + 1;
            match *op {
                Opcode::Oper(addr) => {
                    if addr >= symbols.oper_count() {
                        return Err(error!(OperationOutOfRange, ..&col));
                    }
                    depth = depth - symbols.oper(addr).args as i64 + 1;
                }
                Opcode::Func(addr) => {
                    if addr >= symbols.func_count() {
                        return Err(error!(FunctionOutOfRange, ..&col));
                    }
                    depth = depth - symbols.func(addr).args as i64 + 1;
                }
                Opcode::ReadConst(addr) => {
                    if addr >= symbols.const_count() {
                        return Err(error!(ConstantOutOfRange, ..&col));
                    }
                    depth += 1;
                }
                Opcode::ReadVar(addr) => {
                    if addr >= symbols.var_count() {
                        return Err(error!(VariableOutOfRange, ..&col));
                    }
                    depth += 1;
                }
                Opcode::WriteVar(addr) => {
                    if addr >= symbols.var_count() {
                        return Err(error!(VariableOutOfRange, ..&col));
                    }
                    depth -= 1;
                    // an assignment must consume exactly the one value
                    // produced since the previous statement boundary
                    if depth != 0 {
                        return Err(error!(StackImbalance, ..&col;
                            format!("BY {} AT ASSIGNMENT", depth)));
                    }
                }
                Opcode::Return => {
                    depth -= 1;
                    break;
                }
            }
        }
        if depth != 0 {
            let end = self.ops.len()..self.ops.len();
            return Err(error!(StackImbalance, ..&end; format!("BY {}", depth)));
        }
        Ok(())
    }
}
