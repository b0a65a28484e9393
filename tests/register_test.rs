use formula::mach::Formula;

#[test]
fn test_custom_operator() {
    let mut f = Formula::<f64>::default();
    f.add_operation("%", "DIV", 4, 2).unwrap();
    f.compile("7%2").unwrap();
    f.validate().unwrap();
    assert_eq!(f.eval(), 3.5);
}

#[test]
fn test_custom_function_alias() {
    let mut f = Formula::<f64>::default();
    f.add_function("sq", "POW2", 1).unwrap();
    f.compile("sq(5)").unwrap();
    f.validate().unwrap();
    assert_eq!(f.eval(), 25.0);
}

#[test]
fn test_unknown_mnemonic() {
    let mut f = Formula::<f64>::default();
    let err = f.add_operation("%", "MOD", 4, 2).unwrap_err();
    assert_eq!(err.to_string(), "UNKNOWN MNEMONIC; MOD");
    let err = f.add_function("gauss", "GAUSS", 1).unwrap_err();
    assert_eq!(err.to_string(), "UNKNOWN MNEMONIC; GAUSS");
}

#[test]
fn test_name_collisions() {
    let mut f = Formula::<f64>::default();
    f.add_constant("pi", std::f64::consts::PI).unwrap();
    let err = f.add_variable("pi").unwrap_err();
    assert_eq!(err.to_string(), "NAME COLLISION; 'pi' IS A CONSTANT");
    let err = f.add_constant("sin", 1.0).unwrap_err();
    assert_eq!(err.to_string(), "NAME COLLISION; 'sin' IS A FUNCTION");
}

#[test]
fn test_set_constant_without_recompile() {
    let mut f = Formula::<f64>::default();
    f.add_constant("g", 9.81).unwrap();
    f.compile("g*2").unwrap();
    f.validate().unwrap();
    assert_eq!(f.eval(), 19.62);
    assert!(f.set_constant("g", 10.0));
    assert_eq!(f.eval(), 20.0);
    assert!(!f.set_constant("h", 1.0));
}

#[test]
fn test_literals_pruned_between_compiles() {
    let mut f = Formula::<f64>::default();
    f.compile("2+2").unwrap();
    assert!(f.symbols().find_auto_constant(2.0).is_some());
    f.compile("1+1").unwrap();
    assert!(f.symbols().find_auto_constant(2.0).is_none());
    assert!(f.symbols().find_auto_constant(1.0).is_some());
}

#[test]
fn test_literal_dedup() {
    let mut f = Formula::<f64>::default();
    f.compile("2+2").unwrap();
    let ops = f.program().ops();
    assert_eq!(ops[0], ops[1]);
}

#[test]
fn test_named_constants_survive_pruning() {
    let mut f = Formula::<f64>::default();
    f.add_constant("k", 7.0).unwrap();
    f.compile("k+1").unwrap();
    f.compile("k+2").unwrap();
    f.validate().unwrap();
    assert_eq!(f.eval(), 9.0);
    assert_eq!(f.constant("k"), Some(7.0));
}
