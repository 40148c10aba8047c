use pyrite::{Engine, Value};

fn eval(src: &str) -> Value {
    Engine::new().eval(src).unwrap()
}

#[test]
fn independent_closures_have_independent_state() {
    let src = "\
def make_counter():
    n = 0
    def bump():
        n = n + 1
        return n
    return bump
a = make_counter()
b = make_counter()
a()
a()
b()
a() + b()"; // a is at 3, b is at 2 -> 5
    assert_eq!(eval(src), Value::Int(5));
}

#[test]
fn lambda_shares_the_loop_variable_across_iterations() {
    // the loop body runs in the enclosing scope, not a fresh one per
    // iteration, so every lambda captures the same `x` cell and all three
    // observe its final value once the loop has finished
    let src = "\
fns = []
for x in [1, 2, 3]:
    fns = fns + [lambda: x]
fns[0]() + fns[1]() + fns[2]()";
    assert_eq!(eval(src), Value::Int(9));
}

#[test]
fn for_loop_variable_escapes_into_the_enclosing_scope() {
    let src = "\
for i in range(3):
    pass
i";
    assert_eq!(eval(src), Value::Int(2));
}

#[test]
fn nested_function_reads_grandparent_scope() {
    let src = "\
def outer():
    a = 1
    def middle():
        b = 2
        def inner():
            return a + b
        return inner()
    return middle()
outer()";
    assert_eq!(eval(src), Value::Int(3));
}

#[test]
fn closure_over_parameter() {
    let src = "\
def adder(n):
    def add(x):
        return x + n
    return add
add5 = adder(5)
add5(10)";
    assert_eq!(eval(src), Value::Int(15));
}
