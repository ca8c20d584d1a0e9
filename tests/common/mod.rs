use brickengine::{Context, Error, Functions, NativeFunction, ParamKind, Value, run_script};

/// Installs a test subscriber so `RUST_LOG=debug cargo test` shows the
/// engine's tracing output. Safe to call from every test.
#[allow(dead_code)]
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                 .with_test_writer()
                 .try_init();
}

/// The builtin library plus a `gb` helper that converts gigabytes to
/// megabytes.
#[allow(dead_code)]
pub fn functions() -> Functions {
    let mut functions = Functions::with_builtins();
    functions.insert(NativeFunction::new("gb", [ParamKind::Number], |args| {
                 Value::from(args[0].coerce_number().unwrap_or(0.0) * 1024.0)
             }));
    functions
}

/// Runs a script against a fresh context.
#[allow(dead_code)]
pub fn run(source: &str) -> Result<String, Error> {
    init_test_logging();
    run_script(source, &mut Context::new(), &functions())
}
