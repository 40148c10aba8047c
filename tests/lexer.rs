use pyrite::{Engine, LexError, ParseErrorType};

fn compile_err_type(src: &str) -> ParseErrorType {
    Engine::new()
        .compile(src)
        .expect_err("expected a parse/lex error")
        .error_type()
        .clone()
}

#[test]
fn unterminated_string_literal() {
    match compile_err_type("x = \"unterminated") {
        ParseErrorType::Lex(LexError::UnterminatedString(_)) => {}
        other => panic!("expected UnterminatedString, got {other:?}"),
    }
}

#[test]
fn invalid_character() {
    match compile_err_type("x = 1 @ 2") {
        ParseErrorType::Lex(LexError::InvalidChar('@', _)) => {}
        other => panic!("expected InvalidChar('@'), got {other:?}"),
    }
}

#[test]
fn inconsistent_dedent_is_rejected() {
    // three spaces doesn't match either the 0- or 4-space indentation levels
    let src = "if True:\n    x = 1\n   y = 2\n";
    match compile_err_type(src) {
        ParseErrorType::Lex(LexError::BadIndent(_)) => {}
        other => panic!("expected BadIndent, got {other:?}"),
    }
}

#[test]
fn tabs_advance_to_the_next_multiple_of_eight() {
    // a tab then 2 spaces is column 10, strictly greater than one space (col
    // 2); a nested suite indented this way should parse without complaint
    let src = "if True:\n\t  x = 1\n";
    assert!(Engine::new().compile(src).is_ok());
}

#[test]
fn brackets_suppress_newline_tokens() {
    // an unparenthesized line-continuation would otherwise be a syntax
    // error; brackets let an expression span multiple physical lines
    let src = "x = [\n    1,\n    2,\n    3,\n]\nx";
    assert!(Engine::new().compile(src).is_ok());
}

#[test]
fn valid_number_literals() {
    assert!(Engine::new().compile("1 + 2.5 + 1e3 + 1.5e-2").is_ok());
}

#[test]
fn string_escapes() {
    let result = Engine::new().eval("\"a\\nb\\tc\\\\d\\\"e\"").unwrap();
    assert_eq!(result, pyrite::Value::Str("a\nb\tc\\d\"e".into()));
}

#[test]
fn keywords_are_not_identifiers() {
    // `class` is a reserved word and cannot be used as a variable name
    assert!(Engine::new().compile("class = 1").is_err());
}
