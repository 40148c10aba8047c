use pyrite::{Engine, Value};

fn eval(src: &str) -> Value {
    Engine::new().eval(src).unwrap()
}

#[test]
fn if_elif_else() {
    let src = "\
def classify(n):
    if n < 0:
        return \"negative\"
    elif n == 0:
        return \"zero\"
    else:
        return \"positive\"
classify(-1) + classify(0) + classify(1)";
    assert_eq!(eval(src), Value::Str("negativezeropositive".into()));
}

#[test]
fn while_loop_with_break_and_continue() {
    let src = "\
i = 0
total = 0
while True:
    i = i + 1
    if i > 10:
        break
    if i % 2 == 0:
        continue
    total = total + i
total";
    assert_eq!(eval(src), Value::Int(25)); // 1+3+5+7+9
}

#[test]
fn for_in_over_range_and_list() {
    let src = "\
total = 0
for i in range(5):
    total = total + i
for x in [10, 20, 30]:
    total = total + x
total";
    assert_eq!(eval(src), Value::Int(70)); // 0+1+2+3+4 + 60
}

#[test]
fn break_only_exits_innermost_loop() {
    let src = "\
count = 0
for i in range(3):
    for j in range(3):
        if j == 1:
            break
        count = count + 1
count";
    assert_eq!(eval(src), Value::Int(3));
}

#[test]
fn return_unwinds_through_nested_blocks() {
    let src = "\
def first_even(xs):
    for x in xs:
        if x % 2 == 0:
            return x
    return -1
first_even([1, 3, 4, 5])";
    assert_eq!(eval(src), Value::Int(4));
}

#[test]
fn break_outside_loop_is_a_parse_error() {
    assert!(Engine::new().compile("break").is_err());
}

#[test]
fn short_circuit_avoids_the_error() {
    // `boom` would raise ZeroDivisionError if evaluated; `and` must not call it.
    let src = "\
def boom():
    return 1 / 0
False and boom()";
    assert_eq!(eval(src), Value::Bool(false));
}
