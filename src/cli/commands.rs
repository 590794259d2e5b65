use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::generate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, GenerateArgs};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{self, sentinel, Settings};
use crate::driver::{Driver, LengthOutcome};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Generate(args) => _generate(args),
        Commands::Config { command } => match command {
            ConfigCommands::Show => _config_show(),
            ConfigCommands::Init => _config_init(),
            ConfigCommands::Path => _config_path(),
        },
        Commands::Completion { shell } => _completion(*shell),
    }
}

/// Per-invocation flags override the layered settings field by field.
fn apply_args(settings: &mut Settings, args: &GenerateArgs) {
    if let Some(class) = args.class {
        settings.class = class;
    }
    if let Some(len) = args.integer {
        settings.integer_len = sentinel(len);
    }
    if let Some(len) = args.float {
        settings.float_len = sentinel(len);
    }
    if let Some(len) = args.fraction {
        settings.fraction_len = sentinel(len);
    }
    if let Some(operators) = args.operators {
        settings.operators = operators;
    }
    if let Some(space) = args.space {
        settings.space = sentinel(space);
    }
    if let Some(length) = args.length {
        settings.max_length = length;
    }
}

#[instrument(skip(args))]
fn _generate(args: &GenerateArgs) -> CliResult<()> {
    let mut settings = Settings::load()?;
    apply_args(&mut settings, args);
    debug!("settings: {:?}", settings);

    let driver = Driver::new(settings.generator_config())?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for outcome in driver.run(&mut rng) {
        match outcome {
            LengthOutcome::Fitted(expr) => writeln!(out, "{}", expr)?,
            LengthOutcome::Unfitted { target, achieved } => {
                output::warning(&format!("expected length {}, got {}", target, achieved));
            }
        }
    }
    Ok(())
}

#[instrument]
fn _config_show() -> CliResult<()> {
    let settings = Settings::load()?;
    output::header("Active settings");
    output::info(&settings.to_toml());
    Ok(())
}

#[instrument]
fn _config_init() -> CliResult<()> {
    let path = config::global_config_path()
        .ok_or(crate::errors::ConfigError::NoConfigDir)?;
    if path.exists() {
        output::warning(&format!("{} already exists, not overwriting", path.display()));
        return Ok(());
    }
    config::write_template(&path)?;
    output::success(&format!("wrote {}", path.display()));
    Ok(())
}

#[instrument]
fn _config_path() -> CliResult<()> {
    let path = config::global_config_path()
        .ok_or(crate::errors::ConfigError::NoConfigDir)?;
    let marker = if path.exists() { "exists" } else { "not created yet" };
    output::info(&format!("{} ({})", path.display(), marker));
    Ok(())
}

fn _completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
