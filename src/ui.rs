use anyhow::{Context, Result};
use console::{Key, Style, Term};
use keysmith::generator::{
    CharacterClass, GenerationOptions, LengthPolicy, Mode, validate_separator,
};
use keysmith::{History, StrengthLabel, StrengthResult, wordlist_size};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

pub const MIN_SAFE_SCORE: u8 = 3;

pub struct OutputConfig {
    pub mode: Mode,
    pub length: usize,
    pub word_count: usize,
    pub separator: String,
    pub options: GenerationOptions,
    pub length_policy: LengthPolicy,
}

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn get_branch_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

fn validate_control_characters(s: &str, input_name: &str) -> Result<String> {
    let positions: Vec<String> = s
        .chars()
        .enumerate()
        .filter(|(_, c)| c.is_control())
        .map(|(pos, _)| pos.to_string())
        .collect();

    if !positions.is_empty() {
        anyhow::bail!(
            "{} contains {} control character(s) at position(s): {}",
            input_name,
            positions.len(),
            positions.join(", ")
        );
    }

    Ok(s.to_string())
}

pub fn normalize_separator(s: &str) -> Result<String> {
    let normalized: String = s.nfc().collect();
    let separator = validate_control_characters(&normalized, "Separator")?;
    validate_separator(&separator)?;
    Ok(separator)
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Random => "random",
        Mode::Pronounceable => "pronounceable",
        Mode::Passphrase => "passphrase",
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

fn strength_style(label: StrengthLabel, options: &DisplayOptions) -> Style {
    if !options.color_support {
        return Style::new();
    }

    match label {
        StrengthLabel::Strong | StrengthLabel::Good => Style::new().green(),
        StrengthLabel::Fair => Style::new().yellow(),
        StrengthLabel::Weak | StrengthLabel::None => Style::new().red(),
    }
}

pub fn display_output(
    output: &Zeroizing<String>,
    config: &OutputConfig,
    strength: &StrengthResult,
    history: Option<&History>,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", &**output);
        return;
    }

    println!("Out[0]:\n{}\n", &**output);

    display_settings(config, options);
    display_stats(output, strength, options);

    if let Some(history) = history {
        display_history(history, options);
    }
}

fn display_settings(config: &OutputConfig, options: &DisplayOptions) {
    let (branch, last) = get_branch_symbols(options.unicode_support);

    println!("Settings:");
    println!("  {} Mode       {}", branch, mode_name(config.mode));

    match config.mode {
        Mode::Random => {
            let classes: Vec<&str> = config
                .options
                .enabled_classes()
                .into_iter()
                .map(CharacterClass::name)
                .collect();
            let pool = config.options.pool_size();

            println!("  {} Classes    {}", branch, classes.join(", "));
            println!("  {} Pool       {} {}", branch, pool, plural(pool, "char", "chars"));
            println!(
                "  {} Similar    {}",
                branch,
                if config.options.exclude_similar {
                    "excluded"
                } else {
                    "allowed"
                }
            );
            println!(
                "  {} Required   {}",
                branch,
                if config.options.must_contain_each {
                    "one per class"
                } else {
                    "none"
                }
            );
            println!("  {} Keystream  ChaCha20 (256-bit)", branch);
            println!("  {} Sampling   Unbiased rejection", branch);
            println!(
                "  {} Output     {} {}",
                last,
                config.length,
                plural(config.length, "char", "chars")
            );
        }
        Mode::Pronounceable => {
            let syllables = config.length.div_ceil(2);
            println!("  {} Syllables  {}", branch, syllables);
            println!(
                "  {} Length     {}",
                branch,
                match config.length_policy {
                    LengthPolicy::AtLeast => "at least target",
                    LengthPolicy::Truncate => "truncated to target",
                }
            );
            println!(
                "  {} Output     {} {}",
                last,
                config.length,
                plural(config.length, "char", "chars")
            );
        }
        Mode::Passphrase => {
            println!("  {} Wordlist   {} words", branch, wordlist_size());
            println!("  {} Separator  {:?}", branch, config.separator);
            println!(
                "  {} Output     {} {} + number",
                last,
                config.word_count,
                plural(config.word_count, "word", "words")
            );
        }
    }

    println!();
}

fn stats_lines(length: usize, strength: &StrengthResult, options: &DisplayOptions) -> Vec<String> {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last) = get_branch_symbols(options.unicode_support);

    let style = strength_style(strength.label, options);
    let status = if strength.score >= MIN_SAFE_SCORE {
        check_ok
    } else {
        check_warn
    };

    vec![
        "Stats:".to_string(),
        format!(
            "  {} Length     {} {}",
            branch,
            length,
            plural(length, "char", "chars")
        ),
        format!(
            "  {} Strength   {} {}/4 ({})",
            last,
            style.apply_to(format!("[{}]", status)),
            style.apply_to(strength.score),
            style.apply_to(strength.label)
        ),
    ]
}

fn display_stats(output: &Zeroizing<String>, strength: &StrengthResult, options: &DisplayOptions) {
    for line in stats_lines(output.chars().count(), strength, options) {
        println!("{}", line);
    }
}

fn display_history(history: &History, options: &DisplayOptions) {
    if history.is_empty() {
        return;
    }

    let (branch, last) = get_branch_symbols(options.unicode_support);
    let dim = if options.color_support {
        Style::new().dim()
    } else {
        Style::new()
    };

    println!("\nHistory:");
    for (i, entry) in history.iter().enumerate() {
        let prefix = if i + 1 == history.len() { last } else { branch };
        println!("  {} Out[{}]: {}", prefix, i + 1, dim.apply_to(entry));
    }
}

pub fn run_interactive<F>(
    config: &OutputConfig,
    options: &DisplayOptions,
    mut generate: F,
) -> Result<()>
where
    F: FnMut() -> Result<(Zeroizing<String>, StrengthResult)>,
{
    let term = Term::stdout();
    let mut history = History::default();
    let (mut current, mut strength) = generate()?;

    loop {
        term.clear_screen().context("Failed to clear terminal")?;
        display_output(&current, config, &strength, Some(&history), options);
        println!("\n[Enter] regenerate  [q] quit");

        match term.read_key().context("Failed to read key press")? {
            Key::Enter => {
                let (next, next_strength) = generate()?;
                history.record(&current, &next);
                current = next;
                strength = next_strength;
            }
            Key::Escape | Key::Char('q') | Key::Char('Q') => break,
            _ => {}
        }
    }

    history.clear();
    Ok(())
}
