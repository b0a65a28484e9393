use super::Column;

pub struct Error {
    code: u16,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn in_column(self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            code: self.code,
            column: column.clone(),
            message: self.message,
        }
    }

    pub fn message<S: Into<String>>(self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            code: self.code,
            column: self.column,
            message: message.into(),
        }
    }

    /// Char offset into the source for compile errors;
    /// instruction index for validation errors.
    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn code(&self) -> u16 {
        self.code
    }
}

pub enum ErrorCode {
    SyntaxError = 2,
    MissingOperand = 10,
    MissingOperator = 11,
    UnknownSymbol = 12,
    FunctionWithoutParens = 13,
    MismatchedParenthesis = 14,
    ExtraParenthesis = 15,
    UnbalancedParenthesis = 16,
    ExtraSemicolon = 17,
    UnterminatedAssignment = 18,
    UnknownVariable = 19,
    CannotAssign = 20,
    NameCollision = 21,
    UnknownMnemonic = 22,
    OperationOutOfRange = 30,
    FunctionOutOfRange = 31,
    ConstantOutOfRange = 32,
    VariableOutOfRange = 33,
    StackImbalance = 34,
    InternalError = 51,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            2 => "SYNTAX ERROR",
            10 => "MISSING OPERAND",
            11 => "MISSING OPERATOR",
            12 => "UNKNOWN SYMBOL",
            13 => "KNOWN FUNCTION WITHOUT ()",
            14 => "MISMATCHED PARENTHESIS",
            15 => "EXTRA )",
            16 => "UNBALANCED (",
            17 => "EXTRA ';'",
            18 => "ASSIGNMENT NOT TERMINATED WITH ';'",
            19 => "UNKNOWN VARIABLE",
            20 => "CANNOT ASSIGN",
            21 => "NAME COLLISION",
            22 => "UNKNOWN MNEMONIC",
            30 => "OPERATION OUT OF RANGE",
            31 => "FUNCTION OUT OF RANGE",
            32 => "CONSTANT OUT OF RANGE",
            33 => "VARIABLE OUT OF RANGE",
            34 => "STACK OUT OF BALANCE",
            51 => "INTERNAL ERROR",
            _ => "",
        };
        let mut suffix = String::new();
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if code_str.is_empty() {
            write!(f, "PROGRAM ERROR {}{}", self.code, suffix)
        } else {
            write!(f, "{}{}", code_str, suffix)
        }
    }
}
