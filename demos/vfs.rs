use pyrite::{Engine, RuntimeError};

fn main() -> Result<(), RuntimeError> {
    let engine = Engine::new();
    engine.seed_file("greeting.txt", "hello from the host\n");

    engine.run(
        r#"
file = open("greeting.txt", "r")
print(file.readline())
file.close()

out = open("report.txt", "w")
out.write("done")
out.close()
"#,
    )?;

    assert_eq!(engine.read_file("report.txt").as_deref(), Some("done"));
    println!("report.txt now contains: {:?}", engine.read_file("report.txt"));

    Ok(())
}
