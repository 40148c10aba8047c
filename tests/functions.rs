use pyrite::{Engine, Value};

fn eval(src: &str) -> Value {
    Engine::new().eval(src).unwrap()
}

#[test]
fn required_and_optional_params() {
    let src = "\
def greet(name, greeting=\"hello\"):
    return greeting + \", \" + name
greet(\"Ada\") + \"|\" + greet(\"Ada\", \"hi\")";
    assert_eq!(eval(src), Value::Str("hello, Ada|hi, Ada".into()));
}

#[test]
fn keyword_arguments_can_reorder() {
    let src = "\
def sub(a, b):
    return a - b
sub(b=1, a=10)";
    assert_eq!(eval(src), Value::Int(9));
}

#[test]
fn star_args_and_double_star_kwargs() {
    let src = "\
def f(a, b=10, *r, **k):
    return (a, b, r, k)
str(f(1, 2, 3, 4, x=5))";
    assert_eq!(eval(src), Value::Str("(1, 2, (3, 4), {'x': 5})".into()));
}

#[test]
fn missing_required_argument_errors() {
    let src = "\
def f(a, b):
    return a + b
f(1)";
    assert!(Engine::new().eval(src).is_err());
}

#[test]
fn too_many_positional_arguments_errors() {
    let src = "\
def f(a):
    return a
f(1, 2)";
    assert!(Engine::new().eval(src).is_err());
}

#[test]
fn default_expression_evaluated_at_call_time() {
    // each call should see the *current* value of `base`, not one frozen at def time
    let src = "\
base = 1
def f(x=base):
    return x
base = 99
f()";
    assert_eq!(eval(src), Value::Int(99));
}

#[test]
fn lambda_expressions() {
    assert_eq!(eval("(lambda x, y: x * y)(6, 7)"), Value::Int(42));
}

#[test]
fn functions_are_first_class_values() {
    let src = "\
def square(x):
    return x * x
def apply_twice(f, x):
    return f(f(x))
apply_twice(square, 2)";
    assert_eq!(eval(src), Value::Int(16));
}

#[test]
fn closures_capture_by_reference() {
    let src = "\
def make_counter():
    count = 0
    def increment():
        count = count + 1
        return count
    return increment
c = make_counter()
c()
c()
c()";
    assert_eq!(eval(src), Value::Int(3));
}
