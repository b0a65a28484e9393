use super::value::pop;
use super::{compile, Listing, Opcode, Program, Symbols, Value};
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Formula runtime
///
/// Owns the symbol tables, the compiled program, and the variable
/// slots, and drives the compile / validate / eval cycle. Generic over
/// the value domain: `Formula<f64>` evaluates one point at a time,
/// `Formula<Batch>` evaluates a whole buffer per run.
///
/// ```
/// use formula::mach::Formula;
///
/// let mut formula = Formula::<f64>::new();
/// formula.add_variable("x").unwrap();
/// formula.compile("3*x^2 + 1").unwrap();
/// formula.validate().unwrap();
/// assert_eq!(formula.eval1(2.0), 13.0);
/// ```

pub struct Formula<V: Value> {
    symbols: Symbols,
    program: Program,
    vars: Vec<V>,
    stack: Vec<V>,
    batch_len: usize,
}

impl<V: Value> Default for Formula<V> {
    fn default() -> Formula<V> {
        Formula {
            symbols: Symbols::default(),
            program: Program::new(),
            vars: vec![],
            stack: vec![],
            batch_len: 0,
        }
    }
}

impl<V: Value> Formula<V> {
    pub fn new() -> Formula<V> {
        Formula::default()
    }

    /// Compile `source`, replacing any previous program. Anonymous
    /// constants from the previous compile are dropped first. On error
    /// the program is left empty; registered symbols and variable
    /// values survive.
    pub fn compile(&mut self, source: &str) -> Result<()> {
        self.program.clear();
        self.symbols.prune_constants();
        let result = compile(&mut self.program, &mut self.symbols, source);
        // the lexer interns assignment targets before a compile can
        // fail, so the slots must grow on the error path too
        self.vars
            .resize(self.symbols.var_count(), V::broadcast(0.0, 0));
        if let Err(err) = result {
            self.program.clear();
            return Err(err);
        }
        Ok(())
    }

    /// Check the compiled program's stack discipline. Must pass before
    /// `eval` may be called.
    pub fn validate(&self) -> Result<()> {
        self.program.validate(&self.symbols)
    }

    /// Run the program and yield the result. Variables assigned with
    /// `;` statements keep their values for the next run.
    ///
    /// Only validated programs may be evaluated; a program that fails
    /// validation will panic here on stack underflow.
    pub fn eval(&mut self) -> V {
        for var in self.vars.iter_mut() {
            if var.len() != self.batch_len {
                *var = V::broadcast(0.0, self.batch_len);
            }
        }
        self.stack.clear();
        for index in 0..self.program.len() {
            match self.program.ops()[index] {
                Opcode::Oper(addr) => {
                    let op = self.symbols.oper(addr).op;
                    op.apply(&mut self.stack);
                }
                Opcode::Func(addr) => {
                    let func = self.symbols.func(addr).func;
                    func.apply(&mut self.stack);
                }
                Opcode::ReadConst(addr) => {
                    let val = self.symbols.const_val(addr);
                    self.stack.push(V::broadcast(val, self.batch_len));
                }
                Opcode::ReadVar(addr) => {
                    self.stack.push(self.vars[addr].clone());
                }
                Opcode::WriteVar(addr) => {
                    self.vars[addr] = pop(&mut self.stack);
                }
                Opcode::Return => return pop(&mut self.stack),
            }
        }
        // empty program
        V::broadcast(0.0, self.batch_len)
    }

    /// Evaluate with `x` bound to the first declared variable.
    pub fn eval1(&mut self, x: V) -> V {
        self.batch_len = x.len();
        if !self.vars.is_empty() {
            self.vars[0] = x;
        }
        self.eval()
    }

    /// Evaluate with `x` and `y` bound to the first two declared
    /// variables.
    pub fn eval2(&mut self, x: V, y: V) -> V {
        self.batch_len = x.len();
        if !self.vars.is_empty() {
            self.vars[0] = x;
        }
        if self.vars.len() > 1 {
            self.vars[1] = y;
        }
        self.eval()
    }

    pub fn set_variable(&mut self, name: &str, val: V) -> bool {
        match self.symbols.find_variable(name) {
            Some(addr) => {
                self.batch_len = val.len();
                self.vars[addr] = val;
                true
            }
            None => false,
        }
    }

    pub fn variable(&self, name: &str) -> Option<&V> {
        self.symbols.find_variable(name).map(|addr| &self.vars[addr])
    }

    pub fn add_constant(&mut self, name: &str, val: f64) -> Result<()> {
        self.symbols.add_constant(name, val)
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        self.symbols.constant(name)
    }

    pub fn set_constant(&mut self, name: &str, val: f64) -> bool {
        self.symbols.set_constant(name, val)
    }

    pub fn add_variable(&mut self, name: &str) -> Result<()> {
        self.symbols.add_variable(name)?;
        self.vars
            .resize(self.symbols.var_count(), V::broadcast(0.0, 0));
        Ok(())
    }

    pub fn add_operation(&mut self, name: &str, mnem: &str, rank: i32, args: usize) -> Result<()> {
        self.symbols.add_operation(name, mnem, rank, args)?;
        Ok(())
    }

    pub fn add_function(&mut self, name: &str, mnem: &str, args: usize) -> Result<()> {
        self.symbols.add_function(name, mnem, args)?;
        Ok(())
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn listing(&self) -> Listing {
        Listing::new(&self.program, &self.symbols)
    }
}
