use formula::mach::Formula;

#[test]
fn test_disassembly() {
    let mut f = Formula::<f64>::default();
    f.add_variable("b").unwrap();
    f.compile("t=3*b; t").unwrap();
    assert_eq!(
        f.listing().lines(),
        vec![
            "03:00\tPUSHC\t3",
            "04:00\tPUSHV\tb",
            "01:02\tMUL",
            "05:01\tPOPV\tt",
            "04:01\tPUSHV\tt",
            "06:00\tRETURN",
        ]
    );
}

#[test]
fn test_fast_power_listing() {
    let mut f = Formula::<f64>::default();
    f.add_variable("x").unwrap();
    f.compile("x^2").unwrap();
    assert_eq!(
        f.listing().lines(),
        vec!["04:00\tPUSHV\tx", "02:00\tCALL\tPOW2", "06:00\tRETURN"]
    );
}

#[test]
fn test_const_map_marks_anonymous() {
    let mut f = Formula::<f64>::default();
    f.add_constant("half", 0.5).unwrap();
    f.compile("half*8").unwrap();
    assert_eq!(
        f.listing().const_map(),
        vec!["00\thalf = 0.5", "01\t* = 8"]
    );
}

#[test]
fn test_symbol_maps() {
    let f = Formula::<f64>::default();
    let listing = f.listing();
    assert_eq!(listing.oper_map()[0], "00\t+ : ADD");
    assert_eq!(listing.oper_map()[5], "05\t-- : NEG");
    assert_eq!(listing.func_map()[0], "00\tpow2(1) : POW2");
    assert_eq!(listing.func_map()[2], "02\tpow(2) : POW");
    assert!(listing.var_map().is_empty());
}
