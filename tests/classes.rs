use pyrite::{Engine, Value};

fn eval(src: &str) -> Value {
    Engine::new().eval(src).unwrap()
}

#[test]
fn init_and_attribute_access() {
    let src = "\
class Point:
    def __init__(self, x, y):
        self.x = x
        self.y = y
    def sum(self):
        return self.x + self.y
p = Point(3, 4)
p.sum()";
    assert_eq!(eval(src), Value::Int(7));
}

#[test]
fn instance_attribute_shadows_method_lookup_order() {
    let src = "\
class A:
    def g(self):
        return 1
class B(A):
    def g(self):
        return super.g() + 1
str(B().g())";
    assert_eq!(eval(src), Value::Str("2".into()));
}

#[test]
fn super_resolves_against_defining_class_not_instance_class() {
    // C inherits B's g, which calls super.g() -- must resolve to A.g, the
    // base of B (the class that lexically defines the method), not C's base
    let src = "\
class A:
    def g(self):
        return 1
class B(A):
    def g(self):
        return super.g() + 10
class C(B):
    pass
C().g()";
    assert_eq!(eval(src), Value::Int(11));
}

#[test]
fn attribute_assignment_writes_through_to_instance_map() {
    let src = "\
class Box:
    def __init__(self):
        self.value = 0
b = Box()
b.value = 42
b.value";
    assert_eq!(eval(src), Value::Int(42));
}

#[test]
fn missing_attribute_is_an_error() {
    let src = "\
class Empty:
    pass
Empty().nope";
    assert!(Engine::new().eval(src).is_err());
}

#[test]
fn methods_are_bound_and_independent_per_instance() {
    let src = "\
class Counter:
    def __init__(self):
        self.n = 0
    def bump(self):
        self.n = self.n + 1
        return self.n
a = Counter()
b = Counter()
a.bump()
a.bump()
b.bump()
a.n + b.n";
    assert_eq!(eval(src), Value::Int(3));
}
