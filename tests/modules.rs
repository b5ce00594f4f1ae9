use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use dav::{
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::{core::Context, module::Export},
        registry::ModuleRegistry,
        value::core::Value,
    },
    parse, run_file,
};
use tempfile::TempDir;

fn write_module(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap_or_else(|e| panic!("Failed to write {path:?}: {e}"));
    path
}

/// Renders `path` as a DAV text literal.
fn quoted(path: &Path) -> String {
    format!("{:?}", path.display().to_string())
}

fn run_in(context: &mut Context, src: &str) -> Result<(), Error> {
    let program = parse(src)?;
    context.run(&program)?;
    Ok(())
}

fn quiet_context(registry: ModuleRegistry) -> Context {
    let mut context = Context::with_registry(registry);
    context.set_output(Box::new(io::sink()));
    context
}

fn fetch_and_run(path: &Path, rest: &str) -> Result<Context, Error> {
    let mut context = quiet_context(ModuleRegistry::default());
    run_in(&mut context, &format!("fetch {}\n{rest}", quoted(path)))?;
    Ok(context)
}

#[test]
fn fetch_merges_only_launched_symbols() {
    let dir = TempDir::new().unwrap();
    let module = write_module(&dir,
                              "lib.dav",
                              "define Num double(x: Num) { return x * 2 }\ndefine Num helper() { \
                               return 0 }\nNum answer = 42\nNum secret = 1\nlaunch double, answer");

    let context = fetch_and_run(&module, "Num r = double(answer)").unwrap();

    assert_eq!(context.global("r"), Some(&Value::Integer(84)));
    assert_eq!(context.global_tag("answer").map(|tag| tag.as_str()), Some("DAV.Num"));
    assert!(context.global("secret").is_none());
    assert!(!context.has_function("helper"));
}

#[test]
fn modules_do_not_see_importer_state() {
    let dir = TempDir::new().unwrap();
    let module = write_module(&dir, "peek.dav", "Num y = hostOnly + 1\nlaunch y");

    let mut context = quiet_context(ModuleRegistry::default());
    let err = run_in(&mut context, &format!("Num hostOnly = 1\nfetch {}", quoted(&module))).unwrap_err();

    let Error::Runtime(RuntimeError::Module { error, line, .. }) = err else {
        panic!("expected a module error");
    };
    assert_eq!(line, 2);
    assert!(matches!(*error, Error::Runtime(RuntimeError::UndefinedVariable { ref name, .. }) if name == "hostOnly"));

    // The importer's globals are back in place after the failed import.
    assert_eq!(context.global("hostOnly"), Some(&Value::Integer(1)));
    assert!(context.global("y").is_none());
}

#[test]
fn registry_names_resolve_to_files() {
    let dir = TempDir::new().unwrap();
    let module = write_module(&dir, "greet.dav", "Text greeting = \"hi\"\nlaunch greeting");

    let mut registry = ModuleRegistry::new();
    registry.insert("greet", module);

    let mut context = quiet_context(registry);
    run_in(&mut context, "fetch \"greet\"").unwrap();
    assert_eq!(context.global("greeting"), Some(&Value::from("hi")));

    let err = run_in(&mut context, "fetch \"missing\"").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::ModuleNotFound { ref name, .. }) if name == "missing"));
}

#[test]
fn registry_file_is_json() {
    let dir = TempDir::new().unwrap();
    let path = write_module(&dir, "modules.json", r#"{ "a": "one.dav", "b": "dir/two.dav" }"#);

    let registry = ModuleRegistry::load(&path).unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.resolve("b"), Some(Path::new("dir/two.dav")));

    assert!(ModuleRegistry::from_json("[1, 2]").is_err());
    assert!(ModuleRegistry::from_json("{ not json").is_err());
    assert!(ModuleRegistry::load(&dir.path().join("absent.json")).is_err());
}

#[test]
fn bundled_math_module() {
    let registry = ModuleRegistry::load(Path::new("dav_modules.json")).unwrap();
    let mut context = quiet_context(registry);

    run_in(&mut context,
           "fetch \"math\"\nFloat r = sqrt(16)\nFloat m = max(3, 8)\nFloat p = PI")
    .unwrap();

    assert_eq!(context.global("r"), Some(&Value::Real(4.0)));
    assert_eq!(context.global("m"), Some(&Value::Real(8.0)));
    assert_eq!(context.global("p"), Some(&Value::Real(std::f64::consts::PI)));
}

#[test]
fn self_import_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("self.dav");
    write_module(&dir,
                 "self.dav",
                 &format!("fetch {}\nNum x = 1\nlaunch x", quoted(&path)));

    let context = fetch_and_run(&path, "").unwrap();
    assert_eq!(context.global("x"), Some(&Value::Integer(1)));
}

#[test]
fn circular_imports_are_skipped() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.dav");
    let b = dir.path().join("b.dav");
    write_module(&dir,
                 "a.dav",
                 &format!("fetch {}\ndefine Num fromA() {{ return fromB }}\nlaunch fromA",
                          quoted(&b)));
    write_module(&dir,
                 "b.dav",
                 &format!("fetch {}\nNum fromB = 2\nlaunch fromB", quoted(&a)));

    let context = fetch_and_run(&a, "").unwrap();
    assert!(context.has_function("fromA"));
    assert!(context.global("fromB").is_none());
}

#[test]
fn entry_script_is_not_fetched_again() {
    let dir = TempDir::new().unwrap();
    let main = dir.path().join("main.dav");
    let module = dir.path().join("mod.dav");
    write_module(&dir,
                 "mod.dav",
                 &format!("fetch {}\nNum fromMod = 5\nlaunch fromMod", quoted(&main)));
    write_module(&dir,
                 "main.dav",
                 &format!("fetch {}\nNum m = fromMod * 2", quoted(&module)));

    let context = run_file(&main, ModuleRegistry::default()).unwrap();
    assert_eq!(context.global("m"), Some(&Value::Integer(10)));
}

#[test]
fn entry_script_is_released_after_the_run() {
    let dir = TempDir::new().unwrap();
    let main = write_module(&dir, "main.dav", "Num x = 1");

    let mut context = run_file(&main, ModuleRegistry::default()).unwrap();
    assert_eq!(context.global("x"), Some(&Value::Integer(1)));

    fs::write(&main, "Num y = 2\nlaunch y").unwrap();
    context.set_output(Box::new(io::sink()));
    run_in(&mut context, &format!("fetch {}", quoted(&main))).unwrap();
    assert_eq!(context.global("y"), Some(&Value::Integer(2)));
}

#[test]
fn failed_entry_script_is_released() {
    let dir = TempDir::new().unwrap();
    let main = write_module(&dir, "main.dav", "Num x = missing");

    let mut context = quiet_context(ModuleRegistry::default());
    let err = context.run_file(&main).unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::UndefinedVariable { .. })));

    fs::write(&main, "Num fixed = 3\nlaunch fixed").unwrap();
    run_in(&mut context, &format!("fetch {}", quoted(&main))).unwrap();
    assert_eq!(context.global("fixed"), Some(&Value::Integer(3)));
}

#[test]
fn failed_import_can_be_retried() {
    let dir = TempDir::new().unwrap();
    let module = write_module(&dir, "flaky.dav", "Num = 1");
    let fetch = format!("fetch {}", quoted(&module));

    let mut context = quiet_context(ModuleRegistry::default());
    let err = run_in(&mut context, &fetch).unwrap_err();
    let Error::Runtime(RuntimeError::Module { error, .. }) = err else {
        panic!("expected a module error");
    };
    assert!(matches!(*error, Error::Parse(_)));

    fs::write(&module, "Num fixed = 1\nlaunch fixed").unwrap();
    run_in(&mut context, &fetch).unwrap();
    assert_eq!(context.global("fixed"), Some(&Value::Integer(1)));
}

#[test]
fn missing_module_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = fetch_and_run(&dir.path().join("nowhere.dav"), "").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::ModuleRead { line: 1, .. })));

    let err = run_file(&dir.path().join("entry.dav"), ModuleRegistry::default()).unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::ModuleRead { line: 0, .. })));
}

#[test]
fn launch_builds_the_export_set() {
    let mut context = quiet_context(ModuleRegistry::default());
    run_in(&mut context,
           "define Num f() { return 1 }\nNum v = 2\nlaunch f, v, __sqrt")
    .unwrap();

    let exports = context.exports();
    assert!(matches!(exports.get("f"), Some(Export::Function(_))));
    assert!(matches!(exports.get("v"), Some(Export::Variable(_))));
    assert!(matches!(exports.get("__sqrt"), Some(Export::Function(_))));

    let err = run_in(&mut context, "launch ghost").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::UnknownExport { ref name, .. }) if name == "ghost"));
}

#[test]
fn exit_inside_a_module_is_not_wrapped() {
    let dir = TempDir::new().unwrap();
    let module = write_module(&dir, "bye.dav", "sys_exit(4)");

    let err = fetch_and_run(&module, "").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::Exit { code: 4 })));
}
