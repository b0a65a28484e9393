use super::{Opcode, Program, Symbols};

/// ## Disassembly listing
///
/// Renders a compiled program and the symbol tables behind it as text
/// for the interactive dot-commands. Borrows both, so a listing is
/// only built when someone asks for one.

pub struct Listing<'a> {
    program: &'a Program,
    symbols: &'a Symbols,
}

impl<'a> Listing<'a> {
    pub fn new(program: &'a Program, symbols: &'a Symbols) -> Listing<'a> {
        Listing { program, symbols }
    }

    /// One line per instruction: kind code, table index, then the
    /// resolved symbol.
    pub fn lines(&self) -> Vec<String> {
        self.program
            .ops()
            .iter()
            .map(|op| format!("{:02}:{:02}\t{}", op.code(), op.addr(), self.detail(op)))
            .collect()
    }

    fn detail(&self, op: &Opcode) -> String {
        match *op {
            Opcode::Oper(addr) => self.symbols.oper(addr).mnem.clone(),
            Opcode::Func(addr) => format!("CALL\t{}", self.symbols.func(addr).mnem),
            Opcode::ReadConst(addr) => match self.symbols.const_name(addr) {
                Some(name) => {
                    format!("PUSHC\t{} = {}", name, self.symbols.const_val(addr))
                }
                None => format!("PUSHC\t{}", self.symbols.const_val(addr)),
            },
            Opcode::ReadVar(addr) => format!("PUSHV\t{}", self.symbols.var_name(addr)),
            Opcode::WriteVar(addr) => format!("POPV\t{}", self.symbols.var_name(addr)),
            Opcode::Return => "RETURN".to_string(),
        }
    }

    /// Constant table; anonymous entries show `*` for a name.
    pub fn const_map(&self) -> Vec<String> {
        (0..self.symbols.const_count())
            .map(|addr| {
                let name = self.symbols.const_name(addr).unwrap_or("*");
                format!("{:02}\t{} = {}", addr, name, self.symbols.const_val(addr))
            })
            .collect()
    }

    pub fn var_map(&self) -> Vec<String> {
        (0..self.symbols.var_count())
            .map(|addr| format!("{:02}\t{}", addr, self.symbols.var_name(addr)))
            .collect()
    }

    pub fn oper_map(&self) -> Vec<String> {
        (0..self.symbols.oper_count())
            .map(|addr| {
                let oper = self.symbols.oper(addr);
                format!("{:02}\t{} : {}", addr, oper.name, oper.mnem)
            })
            .collect()
    }

    pub fn func_map(&self) -> Vec<String> {
        (0..self.symbols.func_count())
            .map(|addr| {
                let func = self.symbols.func(addr);
                format!("{:02}\t{}({}) : {}", addr, func.name, func.args, func.mnem)
            })
            .collect()
    }
}

impl<'a> std::fmt::Display for Listing<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
