mod ui;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use keysmith::generator::{self, FillDistribution, GenerationOptions, LengthPolicy};
use keysmith::{RandomSource, StrengthEstimator, StrengthResult, TokenCounting};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(
    name = "keysmith",
    version,
    about = "Random password, pronounceable password and passphrase generator"
)]
struct Cli {
    #[arg(short, long, value_enum, default_value = "random", env = "KEYSMITH_MODE")]
    mode: Mode,

    /// Password length (random and pronounceable modes)
    #[arg(
        short,
        long,
        default_value_t = 16,
        value_parser = clap::value_parser!(u8).range(8..=64),
        env = "KEYSMITH_LENGTH"
    )]
    length: u8,

    /// Number of words (passphrase mode)
    #[arg(
        short,
        long,
        default_value_t = 4,
        value_parser = clap::value_parser!(u8).range(3..=8),
        env = "KEYSMITH_WORDS"
    )]
    words: u8,

    #[arg(long, default_value = generator::DEFAULT_SEPARATOR, env = "KEYSMITH_SEPARATOR")]
    separator: String,

    #[arg(long)]
    no_uppercase: bool,

    #[arg(long)]
    no_lowercase: bool,

    #[arg(long)]
    no_numbers: bool,

    #[arg(short, long)]
    symbols: bool,

    /// Leave out 0, O, 1, l, I, | and `
    #[arg(long)]
    exclude_similar: bool,

    /// Include at least one character from every enabled class
    #[arg(long)]
    must_contain_each: bool,

    #[arg(long, value_enum, default_value = "pool", env = "KEYSMITH_FILL")]
    fill: Fill,

    /// Cut pronounceable passwords to exactly the requested length
    #[arg(long)]
    truncate: bool,

    /// Leave the trailing number out of the passphrase word count
    #[arg(long)]
    count_words_only: bool,

    /// Regenerate on Enter, quit with q
    #[arg(short, long)]
    interactive: bool,

    #[arg(short, long)]
    quiet: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum Mode {
    Random,
    Pronounceable,
    Passphrase,
}

impl From<Mode> for generator::Mode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Random => generator::Mode::Random,
            Mode::Pronounceable => generator::Mode::Pronounceable,
            Mode::Passphrase => generator::Mode::Passphrase,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum Fill {
    Pool,
    Classes,
}

impl From<Fill> for FillDistribution {
    fn from(fill: Fill) -> Self {
        match fill {
            Fill::Pool => FillDistribution::UniformOverPool,
            Fill::Classes => FillDistribution::UniformOverClasses,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "keysmith=debug"
    } else {
        "keysmith=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn generate_credential(config: &ui::OutputConfig) -> keysmith::Result<Zeroizing<String>> {
    let mut rng = RandomSource::new()?;

    match config.mode {
        generator::Mode::Random => {
            generator::generate_password(&mut rng, config.length, &config.options)
        }
        generator::Mode::Pronounceable => {
            generator::generate_pronounceable(&mut rng, config.length, config.length_policy)
        }
        generator::Mode::Passphrase => {
            generator::generate_passphrase(&mut rng, config.word_count, &config.separator)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let separator = ui::normalize_separator(&cli.separator)?;

    let options = GenerationOptions {
        uppercase: !cli.no_uppercase,
        lowercase: !cli.no_lowercase,
        numbers: !cli.no_numbers,
        symbols: cli.symbols,
        exclude_similar: cli.exclude_similar,
        must_contain_each: cli.must_contain_each,
        fill: cli.fill.into(),
    };

    if cli.mode == Mode::Random && options.variety() == 0 {
        anyhow::bail!("At least one character class must be enabled");
    }

    let config = ui::OutputConfig {
        mode: cli.mode.into(),
        length: usize::from(cli.length),
        word_count: usize::from(cli.words),
        separator,
        options,
        length_policy: if cli.truncate {
            LengthPolicy::Truncate
        } else {
            LengthPolicy::AtLeast
        },
    };

    let estimator = StrengthEstimator::new(
        config.separator.clone(),
        if cli.count_words_only {
            TokenCounting::WordsOnly
        } else {
            TokenCounting::IncludeTrailingNumber
        },
    );

    let display = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    let next_credential = || -> Result<(Zeroizing<String>, StrengthResult)> {
        let output = generate_credential(&config).context("Failed to generate credential")?;
        let strength = estimator.estimate(&output, &config.options, config.mode);
        Ok((output, strength))
    };

    if cli.interactive {
        ui::run_interactive(&config, &display, next_credential)
    } else {
        let (output, strength) = next_credential()?;
        ui::display_output(&output, &config, &strength, None, &display);
        Ok(())
    }
}
