use pyrite::{Engine, ParseErrorType};

fn compile_err_type(src: &str) -> ParseErrorType {
    Engine::new()
        .compile(src)
        .expect_err("expected a parse error")
        .error_type()
        .clone()
}

#[test]
fn operator_precedence() {
    // `*` binds tighter than `+`, `**` binds tighter than unary `-` and is
    // right-associative
    assert_eq!(Engine::new().eval("2 + 3 * 4").unwrap(), pyrite::Value::Int(14));
    assert_eq!(Engine::new().eval("2 ** 3 ** 2").unwrap(), pyrite::Value::Int(512)); // 3**2=9, 2**9=512
    assert_eq!(Engine::new().eval("-2 ** 2").unwrap(), pyrite::Value::Int(-4)); // -(2**2), not (-2)**2
}

#[test]
fn chained_assignment_targets_are_all_updated() {
    let src = "a = b = c = 5\na + b + c";
    assert_eq!(Engine::new().eval(src).unwrap(), pyrite::Value::Int(15));
}

#[test]
fn invalid_assignment_target_is_a_parse_error() {
    match compile_err_type("1 + 1 = 2") {
        ParseErrorType::InvalidAssignmentTarget => {}
        other => panic!("expected InvalidAssignmentTarget, got {other:?}"),
    }
}

#[test]
fn continue_outside_loop_is_a_parse_error() {
    match compile_err_type("continue") {
        ParseErrorType::LoopControlOutsideLoop("continue") => {}
        other => panic!("expected LoopControlOutsideLoop, got {other:?}"),
    }
}

#[test]
fn super_outside_a_method_is_a_parse_error() {
    match compile_err_type("super.foo()") {
        ParseErrorType::InvalidSuper(_) => {}
        other => panic!("expected InvalidSuper, got {other:?}"),
    }
}

#[test]
fn required_parameter_after_optional_is_a_parse_error() {
    match compile_err_type("def f(a=1, b):\n    return a") {
        ParseErrorType::BadParameterOrder => {}
        other => panic!("expected BadParameterOrder, got {other:?}"),
    }
}

#[test]
fn duplicate_parameter_name_is_a_parse_error() {
    match compile_err_type("def f(a, a):\n    return a") {
        ParseErrorType::DuplicateParameter(name) => assert_eq!(name, "a"),
        other => panic!("expected DuplicateParameter, got {other:?}"),
    }
}

#[test]
fn unparenthesized_tuple_literal_on_assignment_rhs() {
    let src = "t = 1, 2, 3\nt";
    assert_eq!(Engine::new().eval(src).unwrap(), Engine::new().eval("(1, 2, 3)").unwrap());
}

#[test]
fn statement_count_reflects_source() {
    let ast = Engine::new().compile("x = 1\ny = 2\nx + y").unwrap();
    assert_eq!(ast.statements().len(), 3);
}

#[test]
fn unexpected_token_reports_what_was_expected() {
    match compile_err_type("def f(:\n    pass") {
        ParseErrorType::ExpectedExpression(_) | ParseErrorType::Expected(_, _) => {}
        other => panic!("expected a specific-token parse error, got {other:?}"),
    }
}
