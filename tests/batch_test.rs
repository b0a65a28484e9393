use formula::mach::{Batch, Formula};

fn batch_formula(source: &str) -> Formula<Batch> {
    let mut f = Formula::default();
    f.add_variable("x").unwrap();
    f.compile(source).unwrap();
    f.validate().unwrap();
    f
}

#[test]
fn test_elementwise_eval() {
    let mut f = batch_formula("3*x^2 + 1");
    let out = f.eval1(Batch(vec![0.0, 1.0, 2.0]));
    assert_eq!(out, Batch(vec![1.0, 4.0, 13.0]));
}

#[test]
fn test_constants_broadcast() {
    let mut f = batch_formula("2+2");
    let out = f.eval1(Batch(vec![0.0; 4]));
    assert_eq!(out, Batch(vec![4.0; 4]));
}

#[test]
fn test_assignment_in_batch() {
    let mut f = batch_formula("t = x^2; t - x");
    let out = f.eval1(Batch(vec![1.0, 2.0, 3.0]));
    assert_eq!(out, Batch(vec![0.0, 2.0, 6.0]));
    assert_eq!(f.variable("t"), Some(&Batch(vec![1.0, 4.0, 9.0])));
}

#[test]
fn test_functions_are_elementwise() {
    let mut f = batch_formula("abs(x)");
    let out = f.eval1(Batch(vec![-1.0, 0.0, 2.5]));
    assert_eq!(out, Batch(vec![1.0, 0.0, 2.5]));
}

#[test]
fn test_set_variable_batch() {
    let mut f = batch_formula("10*x");
    assert!(f.set_variable("x", Batch(vec![1.0, 2.0])));
    assert_eq!(f.eval(), Batch(vec![10.0, 20.0]));
}

#[test]
fn test_same_source_both_domains() {
    let source = "max(x, 2)";
    let mut scalar = Formula::<f64>::default();
    scalar.add_variable("x").unwrap();
    scalar.compile(source).unwrap();
    scalar.validate().unwrap();

    let mut batch = batch_formula(source);
    let points = vec![0.0, 1.5, 3.0];
    let out = batch.eval1(Batch(points.clone()));
    for (i, x) in points.into_iter().enumerate() {
        assert_eq!(out.0[i], scalar.eval1(x));
    }
}
