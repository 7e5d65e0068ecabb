//! CLI argument definitions and handlers

use clap::{Arg, ArgAction, ArgMatches, Command, FromArgMatches, Parser};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::cli::output::{self, Clipboard};
use crate::core::client::DeepLClient;
use crate::core::config::ConfigLoader;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{Formality, RequestDescriptor};

/// DeepL API use.
#[derive(Parser, Debug)]
#[command(name = "deepl", version, about, long_about = None, disable_version_flag = true)]
pub struct Args {
    /// Text to be translated. (Required. Or use -u.)
    pub text: Option<String>,

    /// Source language. One of: DE, EN-GB, EN-US, FR, IT, JA, ES, NL, PL, PT-PT, PT-BR, RU, ZH.
    /// Default: auto-detect. You can use lower case.
    #[arg(short, long)]
    pub source: Option<String>,

    /// Target language. Same options as for source language. (Required.)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Formality: default, more, less. For all languages except EN-GB, EN-US, ES, JA, ZH.
    #[arg(short, long, default_value = "default")]
    pub formality: Formality,

    #[command(flatten)]
    pub shorthands: ShorthandFlags,

    /// Get usage.
    #[arg(short, long)]
    pub usage: bool,

    /// Do not copy result to clipboard.
    #[arg(short = 'n', long = "nocopytoclipboard")]
    pub no_copy_to_clipboard: bool,

    /// Print out the original text / copy original text to clipboard.
    #[arg(short = 'k', long = "keeporiginal")]
    pub keep_original: bool,

    /// Config file (default: ./config.json, then the user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API key, overrides the configured one
    #[arg(long)]
    pub api_key: Option<String>,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

/// A flag that expands to a fixed target language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shorthand {
    /// Long flag name, without dashes
    pub flag: &'static str,
    /// Target language it selects
    pub target: &'static str,
    /// Also forces `less` formality
    pub informal: bool,
    /// Help text
    pub help: &'static str,
}

/// Shorthand flags in the order they are applied; a later entry overrides
/// an earlier one.
pub const SHORTHANDS: &[Shorthand] = &[
    Shorthand {
        flag: "dei",
        target: "DE",
        informal: true,
        help: "Translate to informal German (-t de -f less).",
    },
    Shorthand {
        flag: "fri",
        target: "FR",
        informal: true,
        help: "Translate to informal French (-t fr -f less).",
    },
    Shorthand {
        flag: "pti",
        target: "PT-pt",
        informal: true,
        help: "Translate to informal Portuguese (-t pt-pt -f less).",
    },
    Shorthand {
        flag: "bri",
        target: "PT-BR",
        informal: true,
        help: "Translate to informal Brazilian (-t pt-br -f less).",
    },
    Shorthand {
        flag: "de",
        target: "DE",
        informal: false,
        help: "Translate to German (-t de).",
    },
    Shorthand {
        flag: "fr",
        target: "FR",
        informal: false,
        help: "Translate to French (-t fr).",
    },
    Shorthand {
        flag: "pt",
        target: "PT-pt",
        informal: false,
        help: "Translate to Portuguese (-t pt-pt).",
    },
    Shorthand {
        flag: "br",
        target: "PT-BR",
        informal: false,
        help: "Translate to Brazilian (-t pt-br).",
    },
];

/// The shorthand flags given on the command line, in application order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShorthandFlags {
    selected: Vec<&'static Shorthand>,
}

impl ShorthandFlags {
    /// Flags that were given, in application order
    pub fn selected(&self) -> &[&'static Shorthand] {
        &self.selected
    }
}

impl FromArgMatches for ShorthandFlags {
    fn from_arg_matches(matches: &ArgMatches) -> std::result::Result<Self, clap::Error> {
        let selected = SHORTHANDS
            .iter()
            .filter(|shorthand| matches.get_flag(shorthand.flag))
            .collect();
        Ok(Self { selected })
    }

    fn update_from_arg_matches(
        &mut self,
        matches: &ArgMatches,
    ) -> std::result::Result<(), clap::Error> {
        *self = Self::from_arg_matches(matches)?;
        Ok(())
    }
}

impl clap::Args for ShorthandFlags {
    fn augment_args(cmd: Command) -> Command {
        SHORTHANDS.iter().fold(cmd, |cmd, shorthand| {
            cmd.arg(
                Arg::new(shorthand.flag)
                    .long(shorthand.flag)
                    .action(ArgAction::SetTrue)
                    .help(shorthand.help),
            )
        })
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}

/// Turn parsed arguments into a validated request descriptor
pub fn resolve(args: &Args) -> Result<RequestDescriptor> {
    let mut target_language = args.target.clone().unwrap_or_default();
    let mut formality = args.formality.clone();

    for shorthand in args.shorthands.selected() {
        target_language = shorthand.target.to_string();
        if shorthand.informal {
            formality = Formality::Less;
        }
    }

    let text = args.text.clone().filter(|text| !text.is_empty());

    if !args.usage {
        if text.is_none() {
            return Err(TranslationError::missing_argument("TEXT is required"));
        }
        if target_language.is_empty() {
            return Err(TranslationError::missing_argument(
                "--target TARGET is required",
            ));
        }
    }

    Ok(RequestDescriptor {
        text,
        source_language: args.source.clone().unwrap_or_default(),
        target_language,
        formality,
        usage_mode: args.usage,
        suppress_clipboard: args.no_copy_to_clipboard,
        keep_original: args.keep_original,
    })
}

/// Run the single API call the descriptor asks for and emit its result
pub async fn execute<W: Write>(
    client: &DeepLClient,
    descriptor: &RequestDescriptor,
    clipboard: &mut dyn Clipboard,
    out: &mut W,
) -> Result<()> {
    if descriptor.usage_mode {
        let report = client.usage().await?;
        writeln!(out, "{}", report)?;
        return Ok(());
    }

    let request = descriptor
        .translation_request()
        .ok_or_else(|| TranslationError::missing_argument("TEXT is required"))?;

    info!("Translating to {}", request.target_lang);
    let result = client.translate(&request).await?;

    let rendered = output::render_translation(descriptor, &result.translated_text);
    output::emit(&rendered, descriptor.suppress_clipboard, clipboard, out)
}

/// Handle one invocation: resolve arguments, load config, call the API
///
/// `--config` and `--api-key` are applied on top of `loader`.
pub async fn run<W: Write>(
    args: Args,
    loader: ConfigLoader,
    clipboard: &mut dyn Clipboard,
    out: &mut W,
) -> Result<()> {
    let descriptor = resolve(&args)?;

    let mut loader = loader.with_api_key(args.api_key.clone());
    if let Some(path) = &args.config {
        loader = loader.with_path(path);
    }
    let config = loader.load()?;

    let client = DeepLClient::new(config)?;
    execute(&client, &descriptor, clipboard, out).await
}
