//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};

use crate::operand::OperandClass;
use crate::operator::OperatorClass;

/// Random elementary arithmetic expression generator for fuzzing numeric evaluators
#[derive(Parser, Debug)]
#[command(name = "exprfuzz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one expression per length, from 1 up to the maximum
    Generate(GenerateArgs),

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options for a generate run; unset options fall back to the layered
/// settings (config file, environment, compiled defaults).
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Operand class mix
    #[arg(short, long, value_enum)]
    pub class: Option<OperandClass>,

    /// Integer digit count (1-19, 99 = random)
    #[arg(short, long, value_name = "LEN")]
    pub integer: Option<usize>,

    /// Decimal integer-part digit count (1-19, 99 = random)
    #[arg(short = 'F', long = "float", value_name = "LEN")]
    pub float: Option<usize>,

    /// Decimal fractional digit count (1-19, 99 = random)
    #[arg(short = 'n', long, value_name = "LEN")]
    pub fraction: Option<usize>,

    /// Operator class
    #[arg(short, long, value_enum)]
    pub operators: Option<OperatorClass>,

    /// Spaces around operators (0-9, 99 = random)
    #[arg(short, long, value_name = "N")]
    pub space: Option<usize>,

    /// Generate expressions of length 1 to this maximum
    #[arg(short, long, value_name = "MAX")]
    pub length: Option<usize>,

    /// Seed the random source for reproducible output
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config file path
    Path,
}
