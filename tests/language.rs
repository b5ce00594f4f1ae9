use std::{
    cell::RefCell,
    fs,
    io::{self, Cursor, Write},
    rc::Rc,
};

use dav::{
    error::{Error, LexError, ParseError, RuntimeError},
    interpreter::{
        evaluator::core::Context,
        lexer::{Token, tokenize},
        value::core::Value,
    },
    parse, run_source,
};
use walkdir::WalkDir;

/// Output sink that tests can read back after the run.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("output is not UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn run_in(context: &mut Context, src: &str) -> Result<(), Error> {
    let program = parse(src)?;
    context.run(&program)?;
    Ok(())
}

fn quiet_context() -> Context {
    let mut context = Context::new();
    context.set_output(Box::new(io::sink()));
    context
}

fn assert_success(src: &str) -> Context {
    let mut context = quiet_context();
    if let Err(e) = run_in(&mut context, src) {
        panic!("Script failed: {e}");
    }
    context
}

fn assert_failure(src: &str) -> Error {
    let mut context = quiet_context();
    match run_in(&mut context, src) {
        Ok(()) => panic!("Script succeeded but was expected to fail"),
        Err(e) => e,
    }
}

fn global(context: &Context, name: &str) -> Value {
    context.global(name)
           .cloned()
           .unwrap_or_else(|| panic!("global '{name}' is not defined"))
}

/// Runs `src` and returns everything it printed.
fn output_of(src: &str) -> String {
    let buffer = SharedBuffer::default();
    let mut context = Context::new();
    context.set_output(Box::new(buffer.clone()));
    if let Err(e) = run_in(&mut context, src) {
        panic!("Script failed: {e}");
    }
    buffer.contents()
}

#[test]
fn script_files_run_cleanly() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "dav"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let mut context = quiet_context();
        if let Err(e) = run_in(&mut context, &content) {
            panic!("Script {path:?} failed:\n{content}\nError: {e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn declaration_and_basic_arithmetic() {
    let context = assert_success("Num a = 1 + 2\nNum b = 7 * 9\nNum c = 8 - 5\nNum d = 10 / 2");
    assert_eq!(global(&context, "a"), Value::Integer(3));
    assert_eq!(global(&context, "b"), Value::Integer(63));
    assert_eq!(global(&context, "c"), Value::Integer(3));
    assert_eq!(global(&context, "d"), Value::Integer(5));
}

#[test]
fn operator_precedence() {
    let context = assert_success("Num x = 1 + 2 * 3\nNum y = (1 + 2) * 3\nNum z = 10 - 4 - 3");
    assert_eq!(global(&context, "x"), Value::Integer(7));
    assert_eq!(global(&context, "y"), Value::Integer(9));
    assert_eq!(global(&context, "z"), Value::Integer(3));
}

#[test]
fn power_is_right_associative() {
    let context = assert_success("Num x = 2 ** 3 ** 2\nNum y = (2 ** 3) ** 2\nNum z = 2 * 3 ** 2");
    assert_eq!(global(&context, "x"), Value::Integer(512));
    assert_eq!(global(&context, "y"), Value::Integer(64));
    assert_eq!(global(&context, "z"), Value::Integer(18));
}

#[test]
fn inexact_integer_results_become_reals() {
    let context = assert_success("Float half = 7 / 2\nFloat inf = 1 / 0\nFloat root = 4 ** 0.5");
    assert_eq!(global(&context, "half"), Value::Real(3.5));
    assert_eq!(global(&context, "inf"), Value::Real(f64::INFINITY));
    assert_eq!(global(&context, "root"), Value::Real(2.0));
}

#[test]
fn integer_overflow_falls_back_to_reals() {
    let context = assert_success("Num big = 9223372036854775807 + 1");
    assert!(matches!(global(&context, "big"), Value::Real(r) if r > 9.2e18));
}

#[test]
fn unary_operators() {
    let context = assert_success("Num a = --3\nNum b = !0\nNum c = !!\"\"\nNum d = +\"42\"");
    assert_eq!(global(&context, "a"), Value::Integer(3));
    assert_eq!(global(&context, "b"), Value::Bool(true));
    assert_eq!(global(&context, "c"), Value::Bool(false));
    assert_eq!(global(&context, "d"), Value::Real(42.0));
}

#[test]
fn negating_integer_zero_gives_negative_zero() {
    let context = assert_success("Float r = 1 / -0\nFloat s = 1 / - -0\nNum z = -0");
    assert_eq!(global(&context, "r"), Value::Real(f64::NEG_INFINITY));
    assert_eq!(global(&context, "s"), Value::Real(f64::INFINITY));
    assert!(matches!(global(&context, "z"), Value::Real(z) if z == 0.0 && z.is_sign_negative()));
    assert_eq!(output_of("write(-0, -0 == 0)"), "0 true\n");
}

#[test]
fn extreme_reals_print_in_exponent_form() {
    assert_eq!(Value::Real(1e21).to_string(), "1e+21");
    assert_eq!(Value::Real(-2.5e30).to_string(), "-2.5e+30");
    assert_eq!(Value::Real(1e-7).to_string(), "1e-7");
    assert_eq!(Value::Real(1.5e-7).to_string(), "1.5e-7");
    assert_eq!(Value::Real(1e20).to_string(), "100000000000000000000");
    assert_eq!(Value::Real(0.000_001).to_string(), "0.000001");
    assert_eq!(output_of("write(1000000000000000000000, 1 / 10000000)"), "1e+21 1e-7\n");
}

#[test]
fn bool_is_not_a_declaration_keyword() {
    // `Bool` may only appear as a function or parameter type.
    assert!(matches!(assert_failure("Bool b = true"), Error::Parse(_)));
}

#[test]
fn text_concatenation() {
    let context = assert_success("Text s = \"a\" + 1 + 2\nText t = 1 + 2 + \"a\"");
    assert_eq!(global(&context, "s"), Value::from("a12"));
    assert_eq!(global(&context, "t"), Value::from("3a"));
}

#[test]
fn loose_equality() {
    let context = assert_success("Num a = 1 == \"1\"\nNum b = true == 1\nNum c = \"\" == 0\nNum d = \
                                  \"x\" == 0\nNum e = 2 != 2.0");
    assert_eq!(global(&context, "a"), Value::Bool(true));
    assert_eq!(global(&context, "b"), Value::Bool(true));
    assert_eq!(global(&context, "c"), Value::Bool(true));
    assert_eq!(global(&context, "d"), Value::Bool(false));
    assert_eq!(global(&context, "e"), Value::Bool(false));
}

#[test]
fn relational_comparisons() {
    let context =
        assert_success("Num a = 2 < 3\nNum b = \"b\" > \"a\"\nNum c = \"10\" < 9\nNum d = \"x\" < 1");
    assert_eq!(global(&context, "a"), Value::Bool(true));
    assert_eq!(global(&context, "b"), Value::Bool(true));
    assert_eq!(global(&context, "c"), Value::Bool(false));
    assert_eq!(global(&context, "d"), Value::Bool(false));
}

#[test]
fn set_keeps_the_declared_tag() {
    let context = assert_success("Num x = 1\nset x = \"now text\"");
    assert_eq!(global(&context, "x"), Value::from("now text"));
    assert_eq!(context.global_tag("x").map(|tag| tag.as_str()), Some("DAV.Num"));
}

#[test]
fn set_requires_a_declaration() {
    assert!(matches!(assert_failure("set y = 1"),
                     Error::Runtime(RuntimeError::UndeclaredVariable { ref name, .. }) if name == "y"));
}

#[test]
fn set_evaluates_nothing_for_an_undeclared_target() {
    // The unknown function in the value would fail differently if it ran.
    assert!(matches!(assert_failure("set y = missing()"),
                     Error::Runtime(RuntimeError::UndeclaredVariable { .. })));
}

#[test]
fn blocks_open_a_scope() {
    let context = assert_success("Num x = 1\nwhen (true) { Num x = 2 }\nwhen (true) { set x = x + 10 }");
    assert_eq!(global(&context, "x"), Value::Integer(11));

    assert!(matches!(assert_failure("when (1) { Num inner = 2 }\nwrite(inner)"),
                     Error::Runtime(RuntimeError::UndefinedVariable { .. })));
}

#[test]
fn set_updates_the_nearest_binding() {
    let context = assert_success("Num x = 1\nNum seen = 0\nwhen (1) {\n  Num x = 5\n  when (1) { set \
                                  x = 6 }\n  set seen = x\n}");
    assert_eq!(global(&context, "x"), Value::Integer(1));
    assert_eq!(global(&context, "seen"), Value::Integer(6));
}

#[test]
fn when_and_else() {
    let context = assert_success("Num r = 0\nwhen (0) { set r = 1 } else { set r = 2 }");
    assert_eq!(global(&context, "r"), Value::Integer(2));

    let context = assert_success("Num r = 0\nwhen (\"yes\") { set r = 1 } else { set r = 2 }");
    assert_eq!(global(&context, "r"), Value::Integer(1));
}

#[test]
fn standalone_else_always_runs() {
    let context = assert_success("Num r = 0\nelse { set r = 3 }");
    assert_eq!(global(&context, "r"), Value::Integer(3));
}

#[test]
fn when_requires_parentheses() {
    assert!(matches!(assert_failure("when 1 { }"), Error::Parse(ParseError::UnexpectedToken { .. })));
}

#[test]
fn user_defined_functions() {
    let context = assert_success("define Num add(a: Num, b: Num) { return a + b }\nNum r = add(2, 5)");
    assert_eq!(global(&context, "r"), Value::Integer(7));
    assert!(context.has_function("add"));
}

#[test]
fn recursion() {
    let context = assert_success("define Num fact(n: Num) {\n  when (n <= 1) { return 1 }\n  return \
                                  n * fact(n - 1)\n}\nNum r = fact(10)");
    assert_eq!(global(&context, "r"), Value::Integer(3_628_800));
}

#[test]
fn function_without_return_yields_null() {
    let context = assert_success("define void nothing() { Num x = 1 }\nNum r = nothing()");
    assert_eq!(global(&context, "r"), Value::Null);
}

#[test]
fn functions_do_not_see_caller_locals() {
    let err = assert_failure("define Num peek() { return hidden }\nwhen (1) {\n  Num hidden = 1\n  \
                              peek()\n}");
    assert!(matches!(err, Error::Runtime(RuntimeError::UndefinedVariable { ref name, .. }) if name == "hidden"));
}

#[test]
fn functions_see_and_update_globals() {
    let context = assert_success("Num counter = 0\ndefine void bump() { set counter = counter + 1 \
                                  }\nbump()\nbump()");
    assert_eq!(global(&context, "counter"), Value::Integer(2));
}

#[test]
fn arity_is_checked_for_user_functions() {
    let err = assert_failure("define Num one(a: Num) { return a }\none(1, 2)");
    assert!(matches!(err,
                     Error::Runtime(RuntimeError::Arity { expected: 1,
                                                          found: 2,
                                                          .. })));
}

#[test]
fn arity_is_not_checked_for_builtins() {
    let context = assert_success("Float r = __sqrt(16, 99)\nFloat n = __sqrt()");
    assert_eq!(global(&context, "r"), Value::Real(4.0));
    assert!(matches!(global(&context, "n"), Value::Real(r) if r.is_nan()));
}

#[test]
fn unknown_function_is_error() {
    assert!(matches!(assert_failure("nope(1)"),
                     Error::Runtime(RuntimeError::UnknownFunction { ref name, .. }) if name == "nope"));
}

#[test]
fn undefined_variable_is_error() {
    assert!(matches!(assert_failure("Num x = y + 1"),
                     Error::Runtime(RuntimeError::UndefinedVariable { .. })));
}

#[test]
fn bare_assignment_is_an_unknown_operator() {
    let err = assert_failure("Num x = 1\nx = 5");
    assert!(matches!(err, Error::Runtime(RuntimeError::UnknownOperator { ref operator, line: 2 }) if operator == "="));
}

#[test]
fn top_level_return_stops_the_program() {
    let context = assert_success("Num x = 1\nreturn 0\nset x = 2");
    assert_eq!(global(&context, "x"), Value::Integer(1));
}

#[test]
fn get_type_reports_tags() {
    let context = assert_success("Text name = \"dav\"\nFloat f = 1\nText a = get_type(\"name\")\nText \
                                  b = get_type(\"f\")");
    assert_eq!(global(&context, "a"), Value::from("DAV.Text"));
    assert_eq!(global(&context, "b"), Value::from("DAV.Float"));

    assert!(matches!(assert_failure("get_type(\"ghost\")"),
                     Error::Runtime(RuntimeError::UndefinedGlobal { .. })));
}

#[test]
fn host_constants_are_raw() {
    let mut context = quiet_context();
    context.define_constant("LIMIT", Value::Integer(10));

    run_in(&mut context, "Num next = LIMIT + 1\nText kind = get_type(\"LIMIT\")").unwrap();
    assert_eq!(context.global("next"), Some(&Value::Integer(11)));
    assert_eq!(context.global("kind"), Some(&Value::Null));

    let err = run_in(&mut context, "set LIMIT = 1").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::InvalidVariable { ref name, .. }) if name == "LIMIT"));
}

#[test]
fn length_and_delete() {
    let context = assert_success("Num n = length(\"héllo\")\nNum m = length(5)\nNum gone = 1\nsys_delete(\"gone\")\nsys_delete(\"never\")");
    assert_eq!(global(&context, "n"), Value::Integer(5));
    assert_eq!(global(&context, "m"), Value::Null);
    assert!(context.global("gone").is_none());
}

#[test]
fn math_builtins() {
    let context = assert_success("Float a = __round(2.5)\nFloat b = __round(-2.5)\nFloat c = \
                                  __max(1, 7)\nFloat d = __pow(2, 10)\nNum e = __isNaN(\"abc\")\nNum \
                                  f = __isFinite(1 / 0)");
    assert_eq!(global(&context, "a"), Value::Real(3.0));
    assert_eq!(global(&context, "b"), Value::Real(-2.0));
    assert_eq!(global(&context, "c"), Value::Real(7.0));
    assert_eq!(global(&context, "d"), Value::Real(1024.0));
    assert_eq!(global(&context, "e"), Value::Bool(true));
    assert_eq!(global(&context, "f"), Value::Bool(false));
}

#[test]
fn random_builtins_stay_in_range() {
    let context = assert_success("Float r = __rand(2, 3)\nNum i = __randInt(1, 6)");
    assert!(matches!(global(&context, "r"), Value::Real(r) if (2.0..3.0).contains(&r)));
    assert!(matches!(global(&context, "i"), Value::Real(i) if (1.0..=6.0).contains(&i) && i.fract() == 0.0));
}

#[test]
fn write_and_writeln_output() {
    assert_eq!(output_of("write(\"x =\", 3, 2.5, true)"), "x = 3 2.5 true\n");
    assert_eq!(output_of("writeln(\"a\", 1)"), "\n a 1\n");
    assert_eq!(output_of("write(7 / 2, 1 / 0, 6 / 3)"), "3.5 Infinity 2\n");
}

#[test]
fn prompt_stores_a_tagged_global() {
    let buffer = SharedBuffer::default();
    let mut context = Context::new();
    context.set_output(Box::new(buffer.clone()));
    context.set_input(Box::new(Cursor::new("Ada\n42\r\n")));

    run_in(&mut context, "prompt(\"Name?\", \"name\")\nprompt(\"Age?\", \"age\", \"Num\")").unwrap();

    assert_eq!(buffer.contents(), "Name? Age? ");
    assert_eq!(context.global("name"), Some(&Value::from("Ada")));
    assert_eq!(context.global_tag("name").map(|tag| tag.as_str()), Some("DAV.Text"));
    assert_eq!(context.global("age"), Some(&Value::from("42")));
    assert_eq!(context.global_tag("age").map(|tag| tag.as_str()), Some("DAV.Num"));
}

#[test]
fn sys_exit_carries_the_code() {
    assert!(matches!(run_source("sys_exit(3)"),
                     Err(Error::Runtime(RuntimeError::Exit { code: 3 }))));
    assert!(matches!(run_source("sys_exit()"),
                     Err(Error::Runtime(RuntimeError::Exit { code: 0 }))));
}

#[test]
fn comments_are_skipped_and_lines_counted() {
    let err = assert_failure("// leading comment\n/* block\n   comment */\nNum x = 1 // trailing\nset q = 2");
    assert!(matches!(err, Error::Runtime(RuntimeError::UndeclaredVariable { line: 5, .. })));
}

#[test]
fn text_escapes() {
    let context = assert_success(r#"Text s = "tab\there \"quoted\" \x41é"
Text t = 'it\'s'"#);
    assert_eq!(global(&context, "s"), Value::from("tab\there \"quoted\" Aé"));
    assert_eq!(global(&context, "t"), Value::from("it's"));
}

#[test]
fn lexing_errors() {
    assert!(matches!(assert_failure("Num x = 1 @"),
                     Error::Lex(LexError::UnexpectedCharacter { character: '@', .. })));
    assert!(matches!(assert_failure(r#"Text t = "\x4""#), Error::Lex(LexError::InvalidEscape { .. })));
}

#[test]
fn wide_integer_literals_become_reals() {
    let context = assert_success("Num x = 99999999999999999999\nNum y = 9223372036854775807");
    assert_eq!(global(&context, "x"), Value::Real(1e20));
    assert_eq!(global(&context, "y"), Value::Integer(i64::MAX));
}

#[test]
fn unicode_whitespace_and_byte_order_mark_are_skipped() {
    let context = assert_success("\u{FEFF}Num x = 1");
    assert_eq!(global(&context, "x"), Value::Integer(1));

    let context = assert_success("Num\u{00A0}x =\u{2003}1");
    assert_eq!(global(&context, "x"), Value::Integer(1));

    let err = assert_failure("\u{FEFF}Num x = 1\r\n\u{00A0}set q = 2");
    assert!(matches!(err, Error::Runtime(RuntimeError::UndeclaredVariable { line: 2, .. })));
}

#[test]
fn unterminated_text_runs_to_end_of_input() {
    let context = assert_success("Text s = \"abc");
    assert_eq!(global(&context, "s"), Value::from("abc"));

    let context = assert_success("Text s = 'line one\nline two");
    assert_eq!(global(&context, "s"), Value::from("line one\nline two"));
}

#[test]
fn unknown_escapes_and_unicode_escapes() {
    let context = assert_success(r#"Text q = "\q\z"
Text u = "\u0041\u00e9""#);
    assert_eq!(global(&context, "q"), Value::from("qz"));
    assert_eq!(global(&context, "u"), Value::from("Aé"));

    assert!(matches!(assert_failure(r#"Text t = "\u12""#), Error::Lex(LexError::InvalidEscape { .. })));
}

#[test]
fn block_comments_do_not_nest() {
    let context = assert_success("/* a /* b */ Num x = 1");
    assert_eq!(global(&context, "x"), Value::Integer(1));

    // The second `*/` is no longer inside a comment.
    assert!(matches!(assert_failure("/* a /* b */ */"), Error::Parse(_)));
}

#[test]
fn parsing_errors() {
    assert!(matches!(assert_failure("Num = 1"), Error::Parse(ParseError::UnexpectedToken { .. })));
    assert!(matches!(assert_failure("when (1) {"),
                     Error::Parse(ParseError::UnexpectedEndOfInput { .. })));
    assert!(matches!(assert_failure("class Point"), Error::Parse(_)));
    assert!(matches!(assert_failure("launch a,"), Error::Parse(_)));
    assert!(matches!(assert_failure("fetch math"), Error::Parse(_)));
}

#[test]
fn rendered_tokens_lex_back_to_the_same_tokens() {
    let source = "define Num f(a: Num) { return a ** 2 }\nText s = \"q\\\"uote\\n\" + 'x'\nFloat r \
                  = 1.5 + 2.\nwhen (f(3) >= 9) { write(!false, r != 1) } // done";
    let first: Vec<Token> = tokenize(source).unwrap().into_iter().map(|lexeme| lexeme.token).collect();

    let rendered = first.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
    let second: Vec<Token> =
        tokenize(&rendered).unwrap().into_iter().map(|lexeme| lexeme.token).collect();

    assert_eq!(first, second);
}
