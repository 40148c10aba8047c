use pyrite::{Engine, RuntimeError, Value};

#[test]
fn register_fn_and_call_from_script() {
    let mut engine = Engine::new();
    engine.register_fn("add", |a: i64, b: i64| a + b);
    assert_eq!(engine.eval("add(40, 2)").unwrap(), Value::Int(42));
}

#[test]
fn registering_over_a_builtin_name_overwrites_it() {
    let mut engine = Engine::new();
    engine.register_fn("len", |_x: i64| -1i64);
    assert_eq!(engine.eval("len(5)").unwrap(), Value::Int(-1));
}

#[test]
fn native_function_can_reject_its_arguments() {
    let mut engine = Engine::new();
    engine.register_fn("half", |x: i64| -> i64 { x / 2 });
    assert!(engine.eval("half(\"not a number\")").is_err());
}

#[test]
fn on_print_hook_observes_guest_output() {
    let mut engine = Engine::new();
    let captured = std::rc::Rc::new(std::cell::RefCell::new(String::new()));
    let sink = captured.clone();
    engine.on_print(move |s| sink.borrow_mut().push_str(s));
    engine.run("print(\"a\", \"b\", sep=\"-\")").unwrap();
    assert_eq!(captured.borrow().as_str(), "a-b\n");
}

#[test]
fn set_global_and_get_global() {
    let engine = Engine::new();
    engine.set_global("limit", Value::Int(10));
    assert_eq!(engine.get_global("limit"), Some(Value::Int(10)));
    assert_eq!(engine.eval("limit + 1").unwrap(), Value::Int(11));
}

#[test]
fn compile_then_run_ast_reuses_the_parse() {
    let engine = Engine::new();
    let ast = engine.compile("1 + 1").unwrap();
    assert_eq!(engine.eval_ast(&ast).unwrap(), Value::Int(2));
}

#[test]
fn recursion_limit_is_enforced() {
    let mut engine = Engine::new();
    engine.set_max_call_levels(16);
    let src = "\
def recurse(n):
    return recurse(n + 1)
recurse(0)";
    match engine.eval(src) {
        Err(RuntimeError::RecursionError(_)) => {}
        other => panic!("expected a RecursionError, got {other:?}"),
    }
}
