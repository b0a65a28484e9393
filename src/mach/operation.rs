use super::value::{pop, Value};

/// ## Operator dispatch
///
/// The closed set of behaviors an operator table entry can bind to.
/// Dispatch is a single match over the tag, so the instruction loop
/// never goes through a function pointer.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    /// Unary minus pseudo-operator.
    Neg,
    /// Unary plus pseudo-operator; never emitted by the translator.
    Nop,
}

impl Operation {
    pub fn from_mnemonic(mnem: &str) -> Option<Operation> {
        use Operation::*;
        match mnem {
            "ADD" => Some(Add),
            "SUB" => Some(Sub),
            "MUL" => Some(Mul),
            "DIV" => Some(Div),
            "POW" => Some(Pow),
            "NEG" => Some(Neg),
            "NOP" => Some(Nop),
            _ => None,
        }
    }

    pub fn apply<V: Value>(&self, stack: &mut Vec<V>) {
        use Operation::*;
        match self {
            Add => {
                let rhs = pop(stack);
                let lhs = pop(stack);
                stack.push(lhs.add(rhs));
            }
            Sub => {
                let rhs = pop(stack);
                let lhs = pop(stack);
                stack.push(lhs.sub(rhs));
            }
            Mul => {
                let rhs = pop(stack);
                let lhs = pop(stack);
                stack.push(lhs.mul(rhs));
            }
            Div => {
                let rhs = pop(stack);
                let lhs = pop(stack);
                stack.push(lhs.div(rhs));
            }
            Pow => {
                let rhs = pop(stack);
                let lhs = pop(stack);
                stack.push(lhs.pow(rhs));
            }
            Neg => {
                let val = pop(stack);
                stack.push(val.neg());
            }
            Nop => {}
        }
    }
}
