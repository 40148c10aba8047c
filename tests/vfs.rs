use pyrite::Engine;

#[test]
fn write_then_close_commits_to_the_vfs() {
    let engine = Engine::new();
    engine
        .run("file = open(\"f.txt\", \"w\")\nfile.write(\"Hi\")\nfile.close()")
        .unwrap();
    assert_eq!(engine.read_file("f.txt").as_deref(), Some("Hi"));
}

#[test]
fn read_seeded_file() {
    let mut engine = Engine::new();
    engine.seed_file("in.txt", "preloaded contents");
    let captured = std::rc::Rc::new(std::cell::RefCell::new(String::new()));
    let sink = captured.clone();
    engine.on_print(move |s| sink.borrow_mut().push_str(s));
    engine
        .run("f = open(\"in.txt\", \"r\")\nprint(f.read())\nf.close()")
        .unwrap();
    assert_eq!(captured.borrow().as_str(), "preloaded contents\n");
}

#[test]
fn readline_stops_at_newline() {
    let mut engine = Engine::new();
    engine.seed_file("log.txt", "first\nsecond\n");
    let captured = std::rc::Rc::new(std::cell::RefCell::new(String::new()));
    let sink = captured.clone();
    engine.on_print(move |s| sink.borrow_mut().push_str(s));
    engine
        .run(
            "f = open(\"log.txt\", \"r\")\nfirst = f.readline()\nsecond = f.readline()\nf.close()\nprint(first)\nprint(second)",
        )
        .unwrap();
    assert_eq!(captured.borrow().as_str(), "first\nsecond\n");
}

#[test]
fn readline_with_no_trailing_newline_reads_to_end() {
    let mut engine = Engine::new();
    engine.seed_file("f.txt", "Hi");
    let captured = std::rc::Rc::new(std::cell::RefCell::new(String::new()));
    let sink = captured.clone();
    engine.on_print(move |s| sink.borrow_mut().push_str(s));
    engine
        .run("file = open(\"f.txt\", \"r\")\nprint(file.readline())")
        .unwrap();
    assert_eq!(captured.borrow().as_str(), "Hi\n");
}

#[test]
fn write_is_buffered_until_close() {
    let engine = Engine::new();
    engine
        .run("f = open(\"pending.txt\", \"w\")\nf.write(\"not yet\")")
        .unwrap();
    assert_eq!(engine.read_file("pending.txt"), None);
}

#[test]
fn append_mode_preserves_existing_contents() {
    let engine = Engine::new();
    engine.seed_file("a.txt", "one-");
    engine
        .run("f = open(\"a.txt\", \"a\")\nf.write(\"two\")\nf.close()")
        .unwrap();
    assert_eq!(engine.read_file("a.txt").as_deref(), Some("one-two"));
}

#[test]
fn operations_on_a_closed_file_error() {
    let engine = Engine::new();
    engine.seed_file("f.txt", "data");
    let result = engine.run("f = open(\"f.txt\", \"r\")\nf.close()\nf.read()");
    assert!(result.is_err());
}

#[test]
fn opening_a_nonexistent_file_for_reading_errors() {
    let engine = Engine::new();
    assert!(engine.run("open(\"missing.txt\", \"r\")").is_err());
}
