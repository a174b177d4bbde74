use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use hanzi2pinyin::{
    fallback::{self, Fallback},
    ConvertError, Converter, FormatOptions,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Prefix of the environment variables holding default format options.
const ENV_PREFIX: &str = "HANZI2PINYIN_";

#[derive(Parser, Debug)]
#[command(author, version)]
/// Command-line utility for converting Chinese text to pinyin
struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert to full pinyin syllables
    Full(FullArgs),
    /// Convert to the first letter of each syllable
    Initials(InitialsArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// File to read input from, otherwise STDIN
    input_path: Option<PathBuf>,

    /// File to write output to, otherwise STDOUT
    output_path: Option<PathBuf>,

    /// Text to insert between syllables
    #[arg(long, short = 's')]
    separator: Option<String>,

    /// Do not capitalize the first letter of each syllable
    #[arg(long, short = 'l')]
    lowercase: bool,

    /// Output for characters without a reading
    #[arg(value_enum, long, short = 'm', default_value_t = Missing::Undefined)]
    missing: Missing,
}

#[derive(Args, Debug)]
struct FullArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct InitialsArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Replace every non-Chinese character with this text
    #[arg(long, short = 'e')]
    escape: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum Missing {
    /// Emit `undefined`
    Undefined,
    /// Emit the character itself
    Keep,
    /// Leave the character out
    Skip,
    /// Fail
    Error,
}

impl Missing {
    pub fn fallback(self) -> &'static dyn Fallback {
        match self {
            Missing::Undefined => &fallback::undefined,
            Missing::Keep => &fallback::keep,
            Missing::Skip | Missing::Error => &fallback::skip,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Mode<'a> {
    Full,
    Initials { escape: Option<&'a str> },
}

fn input(input_path: Option<impl AsRef<Path>>) -> anyhow::Result<Vec<u8>> {
    match input_path {
        Some(p) => fs::read(p.as_ref())
            .with_context(|| format!("Could not read input file {}", p.as_ref().display())),
        None => {
            let mut buf = vec![];
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Could not read STDIN")?;
            Ok(buf)
        }
    }
}

fn output(output_path: Option<impl AsRef<Path>>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match output_path {
        Some(o) => Box::new(fs::File::create(o.as_ref()).with_context(|| {
            format!("Could not create output file {}", o.as_ref().display())
        })?),
        None => Box::new(std::io::stdout()),
    })
}

/// Environment defaults, overridden by command-line flags.
fn format_options(
    env: impl IntoIterator<Item = (String, String)>,
    args: &CommonArgs,
) -> anyhow::Result<FormatOptions> {
    let mut options: FormatOptions = envy::prefixed(ENV_PREFIX)
        .from_iter(env)
        .with_context(|| format!("Invalid {ENV_PREFIX}* configuration"))?;

    if let Some(separator) = &args.separator {
        options.separator.clone_from(separator);
    }
    if args.lowercase {
        options.capitalize_first_letter = false;
    }

    Ok(options)
}

fn convert_line(
    converter: &Converter,
    line: &str,
    mode: Mode,
    options: &FormatOptions,
    missing: Missing,
) -> Result<String, ConvertError> {
    let escape = match mode {
        Mode::Full => None,
        Mode::Initials { escape } => escape,
    };

    let mut transcription = converter.transcribe(line, escape);
    if missing == Missing::Error {
        transcription = transcription.check()?;
    }

    Ok(match mode {
        Mode::Full => transcription.full(options, missing.fallback()),
        Mode::Initials { .. } => transcription.initials(options, missing.fallback()),
    })
}

/// Converts `text` line by line, keeping line endings.
fn convert_text(
    converter: &Converter,
    text: &str,
    mode: Mode,
    options: &FormatOptions,
    missing: Missing,
) -> anyhow::Result<String> {
    let lines = text
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let (body, ending) = match line.strip_suffix('\r') {
                Some(body) => (body, "\r"),
                None => (line, ""),
            };
            convert_line(converter, body, mode, options, missing)
                .map(|converted| converted + ending)
                .with_context(|| format!("Line {}", i + 1))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    debug!(lines = lines.len(), "converted");
    Ok(lines.join("\n"))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Arguments::parse();

    let (common, mode) = match &args.command {
        Command::Full(a) => (&a.common, Mode::Full),
        Command::Initials(a) => (
            &a.common,
            Mode::Initials {
                escape: a.escape.as_deref(),
            },
        ),
    };

    let options = format_options(std::env::vars(), common)?;
    debug!(?options, ?mode, "starting");

    let input_bytes = input(common.input_path.as_ref())?;
    let input_text = std::str::from_utf8(&input_bytes).map_err(ConvertError::from)?;

    let converter = Converter::new_with_integrated_dictionary();
    let generated = convert_text(&converter, input_text, mode, &options, common.missing)?;

    output(common.output_path.as_ref())?
        .write_all(generated.as_bytes())
        .context("Could not write output")?;

    Ok(())
}
