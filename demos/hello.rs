use pyrite::{Engine, RuntimeError, Value};

fn main() -> Result<(), RuntimeError> {
    let engine = Engine::new();

    engine.run(r#"print("hello, world!")"#)?;

    let result = engine.eval("40 + 2")?;

    println!("Answer: {}", result); // prints 42
    assert_eq!(result, Value::Int(42));

    Ok(())
}
