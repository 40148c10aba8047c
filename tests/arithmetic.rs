use pyrite::{Engine, Value};

fn eval(src: &str) -> Value {
    Engine::new().eval(src).unwrap()
}

#[test]
fn integer_ops() {
    assert_eq!(eval("40 + 2"), Value::Int(42));
    assert_eq!(eval("7 - 10"), Value::Int(-3));
    assert_eq!(eval("6 * 7"), Value::Int(42));
    assert_eq!(eval("2 ** 10"), Value::Int(1024));
    assert_eq!(eval("-(2 ** 3)"), Value::Int(-8));
}

#[test]
fn true_division_is_always_float() {
    assert_eq!(eval("7 / 2"), Value::Float(3.5));
    assert_eq!(eval("4 / 2"), Value::Float(2.0));
}

#[test]
fn floor_division_and_modulo_follow_divisor_sign() {
    assert_eq!(eval("7 // 2"), Value::Int(3));
    assert_eq!(eval("-7 // 2"), Value::Int(-4));
    assert_eq!(eval("7 // -2"), Value::Int(-4));
    assert_eq!(eval("7 % -2"), Value::Int(-1));
    assert_eq!(eval("-7 % 2"), Value::Int(1));
}

#[test]
fn int_overflow_wraps() {
    assert_eq!(eval("9223372036854775807 + 1"), Value::Int(i64::MIN));
}

#[test]
fn mixed_int_float_promotes_to_float() {
    assert_eq!(eval("1 + 2.5"), Value::Float(3.5));
}

#[test]
fn comparisons_and_boolean_logic() {
    assert_eq!(eval("1 < 2 and 2 < 3"), Value::Bool(true));
    assert_eq!(eval("1 == 1.0"), Value::Bool(true));
    assert_eq!(eval("not False"), Value::Bool(true));
    assert_eq!(eval("1 < 2 or 1 / 0 == 0"), Value::Bool(true)); // short-circuits
}

#[test]
fn bitwise_and_unary_not() {
    assert_eq!(eval("~0"), Value::Int(-1));
    assert_eq!(eval("~5"), Value::Int(-6));
}

#[test]
fn division_by_zero_is_an_error() {
    assert!(Engine::new().eval("1 / 0").is_err());
    assert!(Engine::new().eval("1 // 0").is_err());
    assert!(Engine::new().eval("1 % 0").is_err());
}
