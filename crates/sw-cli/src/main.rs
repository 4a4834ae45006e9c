//! sw - sensitive-word scanner
//!
//! The command-line entry point, handling:
//! - Detection (`check`, `get`)
//! - Rewriting (`replace`, `mark`)
//! - Dictionary maintenance (`add-word`, `validate`)

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use sw_cli::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use sw_cli::{
    load_registry, read_text, write_payload, CliError, ExitCode, LoadOptions, OutputFormat,
    Payload,
};
use sw_engine::MatchType;

/// Detect, replace and mark sensitive words in text
#[derive(Parser)]
#[command(name = "sw")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Engine config file (TOML, JSON or YAML); SW_CONFIG is consulted when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Word-list file, one word per line
    #[arg(long, global = true)]
    words: Option<PathBuf>,

    /// Inline dictionary word (repeatable); switches to array mode
    #[arg(long = "word", global = true, value_name = "WORD")]
    word: Vec<String>,

    /// Extra interference characters, e.g. " *&"
    #[arg(long, global = true, value_name = "CHARS")]
    interference: Option<String>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr (overrides SW_LOG_FORMAT)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

impl GlobalOpts {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config: self.config.clone(),
            words: self.words.clone(),
            word: self.word.clone(),
            interference: self.interference.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Exit 1 if the text contains a sensitive word, 0 otherwise
    Check(TextArgs),

    /// List the sensitive words found in the text
    Get(GetArgs),

    /// Replace sensitive words
    Replace(ReplaceArgs),

    /// Wrap sensitive words in a tag
    Mark(MarkArgs),

    /// Persist words to the backing word-list file
    AddWord(AddWordArgs),

    /// Load the configuration and dictionary and report on them
    Validate(ValidateArgs),
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct TextArgs {
    /// Text to scan; read from stdin when omitted
    text: Option<String>,
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// Report the longest word at each position
    #[arg(long, conflicts_with = "match_type")]
    maximal: bool,

    /// Match policy: minimal or maximal
    #[arg(long, value_name = "TYPE")]
    match_type: Option<MatchType>,
}

impl MatchArgs {
    fn match_type(&self) -> MatchType {
        if self.maximal {
            MatchType::Maximal
        } else {
            self.match_type.unwrap_or_default()
        }
    }
}

#[derive(Args, Debug)]
struct GetArgs {
    #[command(flatten)]
    text: TextArgs,

    #[command(flatten)]
    matching: MatchArgs,

    /// Stop after this many matches (0 = all)
    #[arg(long, default_value_t = 0)]
    limit: usize,
}

#[derive(Args, Debug)]
struct ReplaceArgs {
    #[command(flatten)]
    text: TextArgs,

    #[command(flatten)]
    matching: MatchArgs,

    /// Replacement text (defaults to the configured one)
    #[arg(long = "char", value_name = "C")]
    replace_char: Option<String>,

    /// Repeat the replacement once per matched character
    #[arg(long, overrides_with = "no_repeat")]
    repeat: bool,

    /// Use a single replacement per match
    #[arg(long)]
    no_repeat: bool,
}

impl ReplaceArgs {
    fn repeat(&self) -> Option<bool> {
        match (self.repeat, self.no_repeat) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}

#[derive(Args, Debug)]
struct MarkArgs {
    #[command(flatten)]
    text: TextArgs,

    #[command(flatten)]
    matching: MatchArgs,

    /// Tag name (defaults to the configured one)
    #[arg(long)]
    tag: Option<String>,
}

#[derive(Args, Debug)]
struct AddWordArgs {
    /// Words to persist; each may be pipe-delimited
    #[arg(value_name = "WORDS", required = true)]
    entries: Vec<String>,

    /// Merge and deduplicate the whole file instead of appending
    #[arg(long)]
    rewrite: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Include every dictionary word, sorted
    #[arg(long)]
    list: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            // Help and version output land here too.
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let log_config = LogConfig::from_env(
        LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet),
        cli.global.log_format,
    );
    init_logging(&log_config);

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(err) => report_error(&err, cli.global.format),
    };
    std::process::exit(exit_code.as_i32());
}

fn run(cli: &Cli) -> sw_cli::Result<ExitCode> {
    let global = &cli.global;
    let (payload, code) = match &cli.command {
        Commands::Check(args) => run_check(global, args)?,
        Commands::Get(args) => run_get(global, args)?,
        Commands::Replace(args) => run_replace(global, args)?,
        Commands::Mark(args) => run_mark(global, args)?,
        Commands::AddWord(args) => run_add_word(global, args)?,
        Commands::Validate(args) => run_validate(global, args)?,
    };

    let mut stdout = std::io::stdout().lock();
    write_payload(&mut stdout, &payload, global.format).map_err(CliError::Output)?;
    Ok(code)
}

fn report_error(err: &CliError, format: OutputFormat) -> ExitCode {
    let exit_code = err.exit_code();
    tracing::debug!(code = err.code(), exit = %exit_code, "command failed");

    if format == OutputFormat::Json {
        let body = serde_json::json!({
            "error": {
                "code": err.code(),
                "kind": exit_code.code_name(),
                "message": err.to_string(),
            }
        });
        println!("{body}");
    }
    eprintln!("sw: error: {err}");
    exit_code
}

fn detected(found: bool) -> ExitCode {
    if found {
        ExitCode::Detected
    } else {
        ExitCode::Clean
    }
}

// ============================================================================
// Command handlers
// ============================================================================

fn run_check(global: &GlobalOpts, args: &TextArgs) -> sw_cli::Result<(Payload, ExitCode)> {
    let mut loaded = load_registry(&global.load_options())?;
    let text = read_text(args.text.as_deref())?;

    let found = loaded.registry.check(&text);
    tracing::info!(detected = found, "check complete");
    Ok((Payload::Check { detected: found }, detected(found)))
}

fn run_get(global: &GlobalOpts, args: &GetArgs) -> sw_cli::Result<(Payload, ExitCode)> {
    let mut loaded = load_registry(&global.load_options())?;
    let text = read_text(args.text.text.as_deref())?;
    let match_type = args.matching.match_type();

    let matches = loaded.registry.find(&text, match_type, args.limit);
    tracing::info!(count = matches.len(), "get complete");
    let code = detected(!matches.is_empty());
    Ok((
        Payload::Get {
            match_type: match_type.to_string(),
            count: matches.len(),
            matches,
        },
        code,
    ))
}

fn run_replace(global: &GlobalOpts, args: &ReplaceArgs) -> sw_cli::Result<(Payload, ExitCode)> {
    let mut loaded = load_registry(&global.load_options())?;
    let text = read_text(args.text.text.as_deref())?;

    let replaced = loaded.registry.replace(
        &text,
        args.replace_char.as_deref(),
        args.repeat(),
        args.matching.match_type(),
    )?;
    Ok((Payload::Replace { text: replaced }, ExitCode::Clean))
}

fn run_mark(global: &GlobalOpts, args: &MarkArgs) -> sw_cli::Result<(Payload, ExitCode)> {
    let mut loaded = load_registry(&global.load_options())?;
    let text = read_text(args.text.text.as_deref())?;

    let marked = loaded
        .registry
        .mark(&text, args.tag.as_deref(), args.matching.match_type())?;
    Ok((Payload::Mark { text: marked }, ExitCode::Clean))
}

fn run_add_word(global: &GlobalOpts, args: &AddWordArgs) -> sw_cli::Result<(Payload, ExitCode)> {
    let loaded = load_registry(&global.load_options())?;
    let registry = &loaded.registry;

    let words: Vec<String> = args
        .entries
        .iter()
        .flat_map(|w| w.split('|'))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        return Err(CliError::Usage("no words to add".to_string()));
    }

    let append = !args.rewrite;
    registry.add_word_to_file(words.clone(), append)?;

    let path = registry
        .config()
        .word_file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    tracing::info!(path = %path, count = words.len(), "words persisted");
    Ok((
        Payload::AddWord {
            path,
            words,
            append,
        },
        ExitCode::Clean,
    ))
}

fn run_validate(global: &GlobalOpts, args: &ValidateArgs) -> sw_cli::Result<(Payload, ExitCode)> {
    let loaded = load_registry(&global.load_options())?;
    let registry = &loaded.registry;

    Ok((
        Payload::Validate {
            ready: registry.is_ready(),
            word_count: registry.word_count(),
            max_depth: registry.trie().max_depth(),
            mode: registry.config().mode.to_string(),
            config_source: loaded.config_source.to_string(),
            interference: registry.interference().to_sorted_vec(),
            words: args.list.then(|| registry.trie().words()),
        },
        ExitCode::Clean,
    ))
}
