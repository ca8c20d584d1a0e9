use std::{fs, path::PathBuf, process};

use brickengine::{Context, Evaluator, Functions, Limits};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

/// brick runs brickengine scripts and renders `{{ }}` templates.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat the file as a template and render its `{{ expression }}`
    /// placeholders instead of running it as a script.
    #[arg(short, long)]
    template: bool,

    /// Maximum number of loop iterations per loop.
    #[arg(long, env = "BRICK_MAX_ITERATIONS", default_value_t = Limits::DEFAULT_MAX_ITERATIONS)]
    max_iterations: u64,

    /// Resident memory ceiling in MiB. 0 disables the check.
    #[arg(long, env = "BRICK_MAX_MEMORY_MB", default_value_t = Limits::DEFAULT_MAX_MEMORY_BYTES / (1024 * 1024))]
    max_memory_mb: u64,

    /// The script or template file.
    file: PathBuf,
}

impl Args {
    fn limits(&self) -> Limits {
        let max_memory_bytes = match self.max_memory_mb {
            0 => None,
            mb => Some(mb.saturating_mul(1024 * 1024)),
        };
        Limits::default().with_max_iterations(self.max_iterations)
                         .with_max_memory_bytes(max_memory_bytes)
    }
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter)
         .with_writer(std::io::stderr)
         .with_target(false)
         .init();

    let source = fs::read_to_string(&args.file).unwrap_or_else(|_| {
                                                   eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                                             args.file.display());
                                                   process::exit(1);
                                               });

    let functions = Functions::with_builtins();
    let evaluator = Evaluator::new(&functions).with_limits(args.limits());
    let mut ctx = Context::new();

    let result = if args.template {
        evaluator.run_template(&source, &mut ctx)
    } else {
        evaluator.run_script(&source, &mut ctx)
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}
