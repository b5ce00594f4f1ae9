use std::{fs, path::PathBuf, process};

use clap::Parser;
use dav::{
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::core::Context, lexer::tokenize, registry::ModuleRegistry, value::core::Value,
    },
    parse,
};

/// Registry file picked up from the working directory when `--registry` is
/// not given.
const DEFAULT_REGISTRY: &str = "dav_modules.json";

/// dav runs scripts written in the DAV language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script to run.
    file: PathBuf,

    /// JSON file mapping module names to paths, used by `fetch "name"`.
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// Injects a read-only global, e.g. `--define LIMIT=10`. May be repeated.
    #[arg(short, long = "define", value_name = "NAME=VALUE", value_parser = parse_define)]
    defines: Vec<(String, Value)>,

    /// Prints the token stream before running.
    #[arg(long)]
    tokens: bool,

    /// Prints the syntax tree before running.
    #[arg(long)]
    ast: bool,

    /// Prints every global and its type tag after the run.
    #[arg(long)]
    dump_globals: bool,
}

/// Splits `NAME=VALUE`. The value becomes an integer or a real when it parses
/// as one, text otherwise.
fn parse_define(definition: &str) -> Result<(String, Value), String> {
    let Some((name, value)) = definition.split_once('=') else {
        return Err(format!("expected NAME=VALUE, found '{definition}'"));
    };
    if name.is_empty() {
        return Err("constant name is empty".to_string());
    }

    let value = value.parse::<i64>()
                     .map(Value::Integer)
                     .or_else(|_| value.parse::<f64>().map(Value::Real))
                     .unwrap_or_else(|_| Value::from(value));
    Ok((name.to_string(), value))
}

fn load_registry(path: Option<&PathBuf>) -> ModuleRegistry {
    let path = match path {
        Some(path) => path.clone(),
        None => {
            let fallback = PathBuf::from(DEFAULT_REGISTRY);
            if !fallback.exists() {
                return ModuleRegistry::default();
            }
            fallback
        },
    };

    ModuleRegistry::load(&path).unwrap_or_else(|e| {
                                   eprintln!("Error: {e}");
                                   process::exit(1);
                               })
}

/// Prints the debug views that need the source before it runs.
fn print_debug_views(args: &Args) -> Result<(), Error> {
    if !args.tokens && !args.ast {
        return Ok(());
    }

    let source = fs::read_to_string(&args.file).map_err(|source| {
                     RuntimeError::ModuleRead { path: args.file.clone(),
                                                source,
                                                line: 0 }
                 })?;

    if args.tokens {
        for lexeme in tokenize(&source)? {
            println!("{:>4}  {}", lexeme.line, lexeme.token.describe());
        }
    }
    if args.ast {
        println!("{:#?}", parse(&source)?);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    let mut context = Context::with_registry(load_registry(args.registry.as_ref()));
    for (name, value) in &args.defines {
        context.define_constant(name, value.clone());
    }

    let result = print_debug_views(&args).and_then(|()| context.run_file(&args.file));

    if args.dump_globals {
        for (name, binding) in context.globals() {
            match binding.tag() {
                Some(tag) => println!("{name}: {tag} = {}", binding.value()),
                None => println!("{name} = {}", binding.value()),
            }
        }
    }

    match result {
        Ok(()) => {},
        Err(Error::Runtime(RuntimeError::Exit { code })) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        },
    }
}
