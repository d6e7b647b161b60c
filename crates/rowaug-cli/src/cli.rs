//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use rowaug_services::TokenCase;

#[derive(Parser)]
#[command(
    name = "rowaug",
    version,
    about = "Row-by-row augmentation of tabular data files",
    long_about = "Read delimited data files, run a pipeline of augmentation rules\n\
                  over every record (tokens, uniqueness flags, email checks, quota\n\
                  sampling), and write the augmented result back out."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for silence).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate unique tokens and write them one per line.
    Tokens(TokensArgs),

    /// Generate SQL statements to load a delimited file into a database.
    Sql(SqlArgs),

    /// Augment a delimited file record by record.
    Augment(AugmentArgs),
}

#[derive(Parser)]
pub struct TokensArgs {
    /// How many tokens to generate.
    #[arg(value_name = "COUNT")]
    pub count: usize,

    /// Token length in characters.
    #[arg(long, default_value_t = rowaug_services::DEFAULT_TOKEN_LENGTH)]
    pub length: usize,

    /// Token case policy.
    #[arg(long, value_enum, default_value = "upper")]
    pub case: TokenCaseArg,

    /// Replay tokens from this file (one per line, first column) instead of
    /// generating random ones.
    #[arg(long = "from-file", value_name = "PATH")]
    pub from_file: Option<PathBuf>,

    /// Write tokens to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SqlArgs {
    /// Delimited input file with a header row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Column delimiter of the input file ("\t" for tab).
    #[arg(long, default_value = ";")]
    pub delimiter: String,

    /// Target table name (required unless --config is given).
    #[arg(long)]
    pub table: Option<String>,

    /// Column type used when no per-column override matches.
    #[arg(long = "default-type", default_value = "TEXT")]
    pub default_type: String,

    /// JSON config file with table name, type aliases, and per-column types.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the statements to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct AugmentArgs {
    /// Delimited input file with a header row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Augmented output file.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Column delimiter of the input file ("\t" for tab).
    #[arg(long, default_value = ";")]
    pub delimiter: String,

    /// Column delimiter of the output file (defaults to the input delimiter).
    #[arg(long = "output-delimiter")]
    pub output_delimiter: Option<String>,

    /// Skip records whose fields are all blank.
    #[arg(long = "skip-empty")]
    pub skip_empty: bool,

    /// Add a column of this name holding a unique token per record.
    #[arg(long = "token-column", value_name = "NAME")]
    pub token_column: Option<String>,

    /// Token length in characters.
    #[arg(long = "token-length", default_value_t = rowaug_services::DEFAULT_TOKEN_LENGTH)]
    pub token_length: usize,

    /// Token case policy.
    #[arg(long = "token-case", value_enum, default_value = "upper")]
    pub token_case: TokenCaseArg,

    /// Replay tokens from this file instead of generating random ones.
    #[arg(long = "token-file", value_name = "PATH")]
    pub token_file: Option<PathBuf>,

    /// Flag first occurrences of values in this input column
    /// (adds "<NAME>_is_new", case-insensitive comparison).
    #[arg(long = "unique-column", value_name = "NAME")]
    pub unique_column: Option<String>,

    /// Validate email syntax of this input column (adds "<NAME>_valid").
    #[arg(long = "email-column", value_name = "NAME")]
    pub email_column: Option<String>,

    /// JSON file with quota targets (integers, possibly nested).
    #[arg(long = "quota-file", value_name = "PATH", requires = "quota_column")]
    pub quota_file: Option<PathBuf>,

    /// Input column whose value addresses the quota cell
    /// (adds "in_sample").
    #[arg(long = "quota-column", value_name = "NAME", requires = "quota_file")]
    pub quota_column: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TokenCaseArg {
    Lower,
    Upper,
    Mixed,
}

impl From<TokenCaseArg> for TokenCase {
    fn from(arg: TokenCaseArg) -> Self {
        match arg {
            TokenCaseArg::Lower => Self::Lower,
            TokenCaseArg::Upper => Self::Upper,
            TokenCaseArg::Mixed => Self::Mixed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
