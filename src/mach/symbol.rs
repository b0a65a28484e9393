use super::{Address, Function, Operation};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Symbol tables
///
/// Parallel name/value tables for constants, variables, operators and
/// functions. Operator and function entries carry the closed dispatch
/// tag the evaluator executes, so a registered mnemonic is all that
/// binds a name to behavior.
///
/// The constant table has two regions: a named prefix that persists
/// across compiles, and an anonymous suffix holding the numeric
/// literals of the most recent compile. Anonymous entries are pruned at
/// the start of every compile, so their indices are only valid for the
/// program just compiled.

pub struct OperEntry {
    pub name: String,
    pub mnem: String,
    pub rank: i32,
    pub args: usize,
    pub op: Operation,
}

pub struct FuncEntry {
    pub name: String,
    pub mnem: String,
    pub args: usize,
    pub func: Function,
}

pub struct Symbols {
    const_names: Vec<String>,
    consts: Vec<f64>,
    var_names: Vec<String>,
    opers: Vec<OperEntry>,
    funcs: Vec<FuncEntry>,
    neg: Address,
    nop: Address,
    pow2: Address,
    pow3: Address,
}

impl Default for Symbols {
    fn default() -> Symbols {
        let mut symbols = Symbols {
            const_names: vec![],
            consts: vec![],
            var_names: vec![],
            opers: vec![],
            funcs: vec![],
            neg: 0,
            nop: 0,
            pow2: 0,
            pow3: 0,
        };

        let add_oper = |s: &mut Symbols, name: &str, mnem: &str, rank: i32, args: usize| {
            s.add_operation(name, mnem, rank, args)
                .expect("default operator table")
        };
        add_oper(&mut symbols, "+", "ADD", 5, 2);
        add_oper(&mut symbols, "-", "SUB", 5, 2);
        add_oper(&mut symbols, "*", "MUL", 4, 2);
        add_oper(&mut symbols, "/", "DIV", 4, 2);
        add_oper(&mut symbols, "^", "POW", 3, 2);
        // unary minus and plus
        symbols.neg = add_oper(&mut symbols, "--", "NEG", 2, 1);
        symbols.nop = add_oper(&mut symbols, "++", "NOP", 2, 1);

        let add_func = |s: &mut Symbols, name: &str, mnem: &str, args: usize| {
            s.add_function(name, mnem, args)
                .expect("default function table")
        };
        symbols.pow2 = add_func(&mut symbols, "pow2", "POW2", 1);
        symbols.pow3 = add_func(&mut symbols, "pow3", "POW3", 1);
        add_func(&mut symbols, "pow", "POW", 2);
        add_func(&mut symbols, "abs", "ABS", 1);
        add_func(&mut symbols, "sqrt", "SQRT", 1);
        add_func(&mut symbols, "exp", "EXP", 1);
        add_func(&mut symbols, "log", "LOG", 1);
        add_func(&mut symbols, "sin", "SIN", 1);
        add_func(&mut symbols, "cos", "COS", 1);
        add_func(&mut symbols, "tan", "TAN", 1);
        add_func(&mut symbols, "asin", "ASIN", 1);
        add_func(&mut symbols, "acos", "ACOS", 1);
        add_func(&mut symbols, "atan", "ATAN", 1);
        add_func(&mut symbols, "sinh", "SINH", 1);
        add_func(&mut symbols, "cosh", "COSH", 1);
        add_func(&mut symbols, "tanh", "TANH", 1);
        add_func(&mut symbols, "asinh", "ASINH", 1);
        add_func(&mut symbols, "acosh", "ACOSH", 1);
        add_func(&mut symbols, "atanh", "ATANH", 1);
        add_func(&mut symbols, "max", "MAX", 2);
        add_func(&mut symbols, "min", "MIN", 2);

        symbols
    }
}

impl Symbols {
    pub fn new() -> Symbols {
        Symbols::default()
    }

    /// Register an operator. The mnemonic selects a member of the
    /// closed `Operation` set. Operator names are punctuation, not
    /// identifiers, so they are exempt from cross-table uniqueness.
    pub fn add_operation(&mut self, name: &str, mnem: &str, rank: i32, args: usize) -> Result<Address> {
        let op = match Operation::from_mnemonic(mnem) {
            Some(op) => op,
            None => return Err(error!(UnknownMnemonic; mnem.to_string())),
        };
        self.opers.push(OperEntry {
            name: name.to_string(),
            mnem: mnem.to_string(),
            rank,
            args,
            op,
        });
        Ok(self.opers.len() - 1)
    }

    /// Register a function under `name`. The mnemonic selects a member
    /// of the closed `Function` set.
    pub fn add_function(&mut self, name: &str, mnem: &str, args: usize) -> Result<Address> {
        let func = match Function::from_mnemonic(mnem) {
            Some(func) => func,
            None => return Err(error!(UnknownMnemonic; mnem.to_string())),
        };
        if self.find_named_constant(name).is_some() {
            return Err(error!(NameCollision; format!("'{}' IS A CONSTANT", name)));
        }
        if self.find_variable(name).is_some() {
            return Err(error!(NameCollision; format!("'{}' IS A VARIABLE", name)));
        }
        self.funcs.push(FuncEntry {
            name: name.to_string(),
            mnem: mnem.to_string(),
            args,
            func,
        });
        Ok(self.funcs.len() - 1)
    }

    /// Insert or update a named constant. Fails without mutating
    /// anything if the name belongs to a variable or function.
    pub fn add_constant(&mut self, name: &str, val: f64) -> Result<()> {
        if self.find_variable(name).is_some() {
            return Err(error!(NameCollision; format!("'{}' IS A VARIABLE", name)));
        }
        if self.find_function(name).is_some() {
            return Err(error!(NameCollision; format!("'{}' IS A FUNCTION", name)));
        }
        if let Some(addr) = self.find_named_constant(name) {
            self.consts[addr] = val;
            return Ok(());
        }
        // named region is the prefix; keep anonymous entries behind it
        self.consts.insert(self.const_names.len(), val);
        self.const_names.push(name.to_string());
        Ok(())
    }

    /// Declare a variable. Idempotent; fails on a name already taken by
    /// a constant or function.
    pub fn add_variable(&mut self, name: &str) -> Result<Address> {
        if self.find_named_constant(name).is_some() {
            return Err(error!(NameCollision; format!("'{}' IS A CONSTANT", name)));
        }
        if self.find_function(name).is_some() {
            return Err(error!(NameCollision; format!("'{}' IS A FUNCTION", name)));
        }
        Ok(self.intern_variable(name))
    }

    /// Insert without collision checks; the lexer has already vetted
    /// the name when it recognizes an assignment target.
    pub fn intern_variable(&mut self, name: &str) -> Address {
        match self.find_variable(name) {
            Some(addr) => addr,
            None => {
                self.var_names.push(name.to_string());
                self.var_names.len() - 1
            }
        }
    }

    /// Intern a numeric literal, deduplicated by exact equality within
    /// the anonymous region only.
    pub fn add_auto_constant(&mut self, val: f64) -> Address {
        match self.find_auto_constant(val) {
            Some(addr) => addr,
            None => {
                self.consts.push(val);
                self.consts.len() - 1
            }
        }
    }

    /// Drop all anonymous constants; called at the start of a compile.
    pub fn prune_constants(&mut self) {
        self.consts.truncate(self.const_names.len());
    }

    pub fn find_constant(&self, name: &str) -> Option<Address> {
        self.find_named_constant(name)
    }

    fn find_named_constant(&self, name: &str) -> Option<Address> {
        self.const_names.iter().position(|n| n == name)
    }

    pub fn find_auto_constant(&self, val: f64) -> Option<Address> {
        let named = self.const_names.len();
        self.consts[named..]
            .iter()
            .position(|v| *v == val)
            .map(|i| named + i)
    }

    pub fn find_variable(&self, name: &str) -> Option<Address> {
        self.var_names.iter().position(|n| n == name)
    }

    pub fn find_function(&self, name: &str) -> Option<Address> {
        self.funcs.iter().position(|f| f.name == name)
    }

    pub fn find_operator(&self, name: &str) -> Option<Address> {
        self.opers.iter().position(|o| o.name == name)
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        self.find_named_constant(name).map(|addr| self.consts[addr])
    }

    pub fn constant_at(&self, addr: Address) -> Option<f64> {
        self.consts.get(addr).copied()
    }

    pub fn set_constant(&mut self, name: &str, val: f64) -> bool {
        match self.find_named_constant(name) {
            Some(addr) => {
                self.consts[addr] = val;
                true
            }
            None => false,
        }
    }

    pub fn set_constant_at(&mut self, addr: Address, val: f64) -> bool {
        match self.consts.get_mut(addr) {
            Some(slot) => {
                *slot = val;
                true
            }
            None => false,
        }
    }

    pub fn const_val(&self, addr: Address) -> f64 {
        self.consts[addr]
    }

    pub fn const_name(&self, addr: Address) -> Option<&str> {
        self.const_names.get(addr).map(|s| s.as_str())
    }

    pub fn var_name(&self, addr: Address) -> &str {
        &self.var_names[addr]
    }

    pub fn oper(&self, addr: Address) -> &OperEntry {
        &self.opers[addr]
    }

    pub fn func(&self, addr: Address) -> &FuncEntry {
        &self.funcs[addr]
    }

    pub fn const_count(&self) -> usize {
        self.consts.len()
    }

    pub fn named_const_count(&self) -> usize {
        self.const_names.len()
    }

    pub fn var_count(&self) -> usize {
        self.var_names.len()
    }

    pub fn oper_count(&self) -> usize {
        self.opers.len()
    }

    pub fn func_count(&self) -> usize {
        self.funcs.len()
    }

    /// NEG pseudo-operator index, used by the lexer for unary minus.
    pub fn neg(&self) -> Address {
        self.neg
    }

    /// NOP pseudo-operator index, used by the lexer for unary plus.
    pub fn nop(&self) -> Address {
        self.nop
    }

    pub fn pow2(&self) -> Address {
        self.pow2
    }

    pub fn pow3(&self) -> Address {
        self.pow3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_constant_dedup() {
        let mut symbols = Symbols::default();
        let a = symbols.add_auto_constant(2.0);
        let b = symbols.add_auto_constant(3.0);
        let c = symbols.add_auto_constant(2.0);
        assert_eq!(a, c);
        assert_ne!(a, b);
    }

    #[test]
    fn test_prune_keeps_named() {
        let mut symbols = Symbols::default();
        symbols.add_constant("pi", std::f64::consts::PI).unwrap();
        symbols.add_auto_constant(2.0);
        symbols.prune_constants();
        assert_eq!(symbols.const_count(), 1);
        assert_eq!(symbols.constant("pi"), Some(std::f64::consts::PI));
    }

    #[test]
    fn test_named_insert_with_anonymous_present() {
        let mut symbols = Symbols::default();
        let two = symbols.add_auto_constant(2.0);
        symbols.add_constant("half", 0.5).unwrap();
        // named region grew; the anonymous entry moved behind it
        assert_eq!(symbols.constant("half"), Some(0.5));
        assert_eq!(symbols.const_val(two + 1), 2.0);
        symbols.prune_constants();
        assert_eq!(symbols.const_count(), 1);
    }

    #[test]
    fn test_constant_update_in_place() {
        let mut symbols = Symbols::default();
        symbols.add_constant("k", 1.0).unwrap();
        let before = symbols.find_constant("k").unwrap();
        symbols.add_constant("k", 2.0).unwrap();
        assert_eq!(symbols.find_constant("k"), Some(before));
        assert_eq!(symbols.constant("k"), Some(2.0));
    }

    #[test]
    fn test_collision_rules() {
        let mut symbols = Symbols::default();
        symbols.add_variable("x").unwrap();
        assert!(symbols.add_constant("x", 1.0).is_err());
        assert!(symbols.add_constant("sin", 1.0).is_err());
        assert!(symbols.add_variable("sin").is_err());
        symbols.add_constant("pi", std::f64::consts::PI).unwrap();
        assert!(symbols.add_variable("pi").is_err());
        // failed registration must not have touched the tables
        assert!(symbols.find_constant("x").is_none());
        assert!(symbols.find_variable("pi").is_none());
    }

    #[test]
    fn test_constant_by_index() {
        let mut symbols = Symbols::default();
        symbols.add_constant("k", 1.0).unwrap();
        let addr = symbols.find_constant("k").unwrap();
        assert_eq!(symbols.constant_at(addr), Some(1.0));
        assert!(symbols.set_constant_at(addr, 2.0));
        assert_eq!(symbols.constant("k"), Some(2.0));
        assert!(!symbols.set_constant_at(99, 0.0));
        assert_eq!(symbols.constant_at(99), None);
    }

    #[test]
    fn test_add_variable_idempotent() {
        let mut symbols = Symbols::default();
        let a = symbols.add_variable("x").unwrap();
        let b = symbols.add_variable("x").unwrap();
        assert_eq!(a, b);
        assert_eq!(symbols.var_count(), 1);
    }

    #[test]
    fn test_unknown_mnemonic() {
        let mut symbols = Symbols::default();
        assert!(symbols.add_operation("%", "MOD", 4, 2).is_err());
        assert!(symbols.add_function("gauss", "GAUSS", 3).is_err());
    }
}
