use pyrite::{Engine, RuntimeError};

fn main() -> Result<(), RuntimeError> {
    let engine = Engine::new();

    engine.run(
        r#"
class Animal:
    def __init__(self, name):
        self.name = name

    def speak(self):
        return self.name + " makes a sound"

class Dog(Animal):
    def speak(self):
        return super.speak() + ", specifically a bark"

d = Dog("Rex")
print(d.speak())
"#,
    )?;

    Ok(())
}
