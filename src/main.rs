use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use operanda::{
    arithmetic::DEFAULT_SEPARATOR, context::Context, namespace::PathNamespace, operand::Operand,
    parse_arithmetic, value::Value,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// operanda evaluates arithmetic rule expressions over a JSON context.
///
/// Identifiers are read as paths into the context: `stock:price` reads
/// `{"stock": {"price": ...}}`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat CONTENTS as the path of a file holding the expression.
    #[arg(short, long)]
    file: bool,

    /// The context as inline JSON.
    #[arg(short, long, conflicts_with = "context_file")]
    context: Option<String>,

    /// Read the context from a JSON file.
    #[arg(long)]
    context_file: Option<PathBuf>,

    /// Separator between scopes and names in qualified identifiers.
    #[arg(short, long, default_value = DEFAULT_SEPARATOR)]
    separator: String,

    /// Print whether the expression equals this value instead of its value.
    #[arg(long, conflicts_with_all = ["greater_than", "less_than"])]
    equals: Option<String>,

    /// Print whether the expression is greater than this value.
    #[arg(long, conflicts_with = "less_than")]
    greater_than: Option<String>,

    /// Print whether the expression is less than this value.
    #[arg(long)]
    less_than: Option<String>,

    /// The expression, or a file path with `--file`.
    contents: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env()
                                                  .unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();
    match run(args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: Args) -> Result<String, Box<dyn std::error::Error>> {
    let source = if args.file {
        fs::read_to_string(&args.contents).map_err(|e| {
                                              format!("Failed to read the input file '{}': {e}",
                                                      args.contents)
                                          })?
    } else {
        args.contents
    };

    let context = match (args.context, args.context_file) {
        (Some(inline), _) => Context::from_json(&inline)?,
        (None, Some(path)) => Context::from_json(&fs::read_to_string(path)?)?,
        (None, None) => Context::default(),
    };

    let operand = Operand::from(parse_arithmetic(source.trim(), &PathNamespace::default(), &args.separator)?);
    debug!(%operand, "expression parsed");

    let output = if let Some(expected) = args.equals {
        operand.equals(&Value::from(expected), &context)?.to_string()
    } else if let Some(bound) = args.greater_than {
        operand.greater_than(&Value::from(bound), &context)?.to_string()
    } else if let Some(bound) = args.less_than {
        operand.less_than(&Value::from(bound), &context)?.to_string()
    } else {
        operand.to_value(&context)?.to_string()
    };
    Ok(output)
}
