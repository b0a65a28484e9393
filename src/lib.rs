//! # Formula
//!
//! A compiler and stack-machine evaluator for arithmetic formulas.
//!
//! Formulas are infix expressions over `f64` with named constants,
//! variables, functions, and assignment statements:
//!
//! ```text
//! t = x^2; 3*t - sin(pi*x)
//! ```
//!
//! A formula is compiled once to a postfix program, validated once,
//! then evaluated many times as variables change. Evaluation is
//! generic over the value domain, so the same program runs on a
//! single scalar or on a whole batch of points elementwise.
//!
//! ```
//! use formula::mach::Formula;
//!
//! let mut f = Formula::<f64>::new();
//! f.add_variable("x").unwrap();
//! f.compile("t = x^2; 3*t + 1").unwrap();
//! f.validate().unwrap();
//! assert_eq!(f.eval1(2.0), 13.0);
//! assert_eq!(f.eval1(-1.0), 4.0);
//! ```

pub mod lang;
pub mod mach;
pub mod term;
