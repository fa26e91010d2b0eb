use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for headway")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates with warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Run the headless CLI through two full turns as a smoke test
    Smoke,
}

/// Steps run by `check`, in order.
const CHECK_STEPS: [Commands; 4] = [Commands::Fmt, Commands::Clippy, Commands::Test, Commands::Doc];

fn cargo_args(command: &Commands) -> &'static [&'static str] {
    match command {
        Commands::Fmt => &["fmt", "--all", "--", "--check"],
        Commands::Clippy => &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        Commands::Test => &["test", "--workspace"],
        Commands::Doc => &["doc", "--workspace", "--no-deps"],
        Commands::Build => &["build", "--workspace"],
        Commands::Smoke => &[
            "run", "-p", "headway-cli", "--", "simulate", "--ticks", "720", "--turn", "right",
        ],
        Commands::Check => &[],
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    println!("==> Running cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            for step in &CHECK_STEPS {
                cargo(cargo_args(step))?;
            }
        }
        ref other => cargo(cargo_args(other))?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_step_invokes_cargo_with_a_subcommand() {
        for step in &CHECK_STEPS {
            assert!(!cargo_args(step).is_empty());
        }
        assert!(cargo_args(&Commands::Build).contains(&"--workspace"));
    }

    #[test]
    fn clippy_denies_warnings() {
        assert!(cargo_args(&Commands::Clippy).ends_with(&["-D", "warnings"]));
    }
}
