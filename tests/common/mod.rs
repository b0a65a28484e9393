use formula::mach::Formula;

/// Formula with `pi`, `e`, and a variable `x` ready to use.
pub fn formula() -> Formula<f64> {
    let mut f = Formula::default();
    f.add_constant("pi", std::f64::consts::PI).unwrap();
    f.add_constant("e", std::f64::consts::E).unwrap();
    f.add_variable("x").unwrap();
    f
}

pub fn eval(source: &str) -> f64 {
    eval_at(source, 0.0)
}

pub fn eval_at(source: &str, x: f64) -> f64 {
    let mut f = formula();
    f.compile(source).unwrap();
    f.validate().unwrap();
    f.eval1(x)
}

/// First error from compile or validate, as its display string.
pub fn fail(source: &str) -> String {
    let mut f = formula();
    match f.compile(source).and_then(|_| f.validate()) {
        Err(err) => err.to_string(),
        Ok(_) => panic!("expected failure: {}", source),
    }
}
