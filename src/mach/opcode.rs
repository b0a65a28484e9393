use super::Address;

/// ## Virtual machine instruction set
///
/// The formula virtual machine has no registers. Every instruction is a
/// kind plus an index into one of the symbol tables, and every
/// operation is performed on the value stack.
///
/// For example: `t=3*b;` compiles to
/// `[ReadConst(3), ReadVar(b), Oper(MUL), WriteVar(t)]`
///
/// See <https://en.wikipedia.org/wiki/Reverse_Polish_notation>

#[derive(Clone, Copy, PartialEq)]
pub enum Opcode {
    /// Apply the operator at this index to the top of the stack.
    Oper(Address),
    /// Call the function at this index; arity was baked in at compile time.
    Func(Address),
    /// Push a constant on to the stack, broadcast to the batch length.
    ReadConst(Address),
    /// Push the current value of a variable slot. Infallible.
    ReadVar(Address),
    /// Pop the stack into a variable slot. This is the assignment
    /// statement.
    WriteVar(Address),
    /// Pop and yield the result, ending execution.
    Return,
}

impl Opcode {
    /// Numeric instruction kind, used by the disassembly listing.
    pub fn code(&self) -> u16 {
        use Opcode::*;
        match self {
            Oper(_) => 1,
            Func(_) => 2,
            ReadConst(_) => 3,
            ReadVar(_) => 4,
            WriteVar(_) => 5,
            Return => 6,
        }
    }

    pub fn addr(&self) -> Address {
        use Opcode::*;
        match self {
            Oper(a) | Func(a) | ReadConst(a) | ReadVar(a) | WriteVar(a) => *a,
            Return => 0,
        }
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Oper(a) => write!(f, "OPER({})", a),
            Func(a) => write!(f, "CALL({})", a),
            ReadConst(a) => write!(f, "PUSHC({})", a),
            ReadVar(a) => write!(f, "PUSHV({})", a),
            WriteVar(a) => write!(f, "POPV({})", a),
            Return => write!(f, "RETURN"),
        }
    }
}
