use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::Level;
use vfx_operators::{OperatorKind, OperatorRequest, SharedText};

#[derive(Parser, Debug)]
#[command(name = "vfx-operators", version)]
struct Cli {
    /// Log operator construction to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every catalog operator with its arity.
    List,
    /// Build the expression graph described by a request JSON.
    Build(BuildArgs),
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Input operator request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Also print the structural fingerprint of each output.
    #[arg(long, default_value_t = false)]
    fingerprint: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match cli.cmd {
        Command::List => cmd_list(),
        Command::Build(args) => cmd_build(args),
    }
}

fn cmd_list() -> anyhow::Result<()> {
    for kind in OperatorKind::ALL {
        println!(
            "{:<26} inputs={} outputs={}",
            kind.name(),
            kind.arity(),
            kind.output_count()
        );
    }
    Ok(())
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let req = OperatorRequest::from_path(&args.in_path)?;
    let outputs = req
        .build()
        .with_context(|| format!("build '{}' from '{}'", req.operator, args.in_path.display()))?;

    let text = SharedText::render(&outputs);
    for binding in &text.bindings {
        println!("{binding}");
    }
    for (i, (out, root)) in outputs.iter().zip(&text.roots).enumerate() {
        if args.fingerprint {
            println!("out{i}: {} = {root} [{}]", out.value_type(), out.fingerprint());
        } else {
            println!("out{i}: {} = {root}", out.value_type());
        }
    }
    Ok(())
}
