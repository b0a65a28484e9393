use super::value::{pop, Value};

/// ## Function dispatch
///
/// Closed set of behaviors a function table entry can bind to.
/// `Pow2`/`Pow3` are the translator's fast path for `^2` and `^3`;
/// they compute `x*x` and `x*x*x` on the single stacked operand
/// instead of going through the generic power operator.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Function {
    Pow2,
    Pow3,
    Pow,
    Abs,
    Sqrt,
    Exp,
    Log,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Max,
    Min,
}

impl Function {
    pub fn from_mnemonic(mnem: &str) -> Option<Function> {
        use Function::*;
        match mnem {
            "POW2" => Some(Pow2),
            "POW3" => Some(Pow3),
            "POW" => Some(Pow),
            "ABS" => Some(Abs),
            "SQRT" => Some(Sqrt),
            "EXP" => Some(Exp),
            "LOG" => Some(Log),
            "SIN" => Some(Sin),
            "COS" => Some(Cos),
            "TAN" => Some(Tan),
            "ASIN" => Some(Asin),
            "ACOS" => Some(Acos),
            "ATAN" => Some(Atan),
            "SINH" => Some(Sinh),
            "COSH" => Some(Cosh),
            "TANH" => Some(Tanh),
            "ASINH" => Some(Asinh),
            "ACOSH" => Some(Acosh),
            "ATANH" => Some(Atanh),
            "MAX" => Some(Max),
            "MIN" => Some(Min),
            _ => None,
        }
    }

    pub fn apply<V: Value>(&self, stack: &mut Vec<V>) {
        use Function::*;
        match self {
            Pow | Max | Min => {
                let rhs = pop(stack);
                let lhs = pop(stack);
                stack.push(match self {
                    Pow => lhs.pow(rhs),
                    Max => lhs.max(rhs),
                    _ => lhs.min(rhs),
                });
            }
            _ => {
                let val = pop(stack);
                stack.push(match self {
                    Pow2 => val.square(),
                    Pow3 => val.cube(),
                    Abs => val.abs(),
                    Sqrt => val.sqrt(),
                    Exp => val.exp(),
                    Log => val.ln(),
                    Sin => val.sin(),
                    Cos => val.cos(),
                    Tan => val.tan(),
                    Asin => val.asin(),
                    Acos => val.acos(),
                    Atan => val.atan(),
                    Sinh => val.sinh(),
                    Cosh => val.cosh(),
                    Tanh => val.tanh(),
                    Asinh => val.asinh(),
                    Acosh => val.acosh(),
                    Atanh => val.atanh(),
                    Pow | Max | Min => unreachable!(),
                });
            }
        }
    }
}
