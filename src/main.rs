//! CLI entry point - thin glue over the `emoji_dl` library.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use emoji_dl::template::{PluginParams, generate_plugin};
use emoji_dl::{
    Config, DiscordEnumerator, EmojiDumper, Error, FfmpegTranscoder, normalize::normalize_directory,
};

#[derive(Parser)]
#[command(name = "emoji-dl", version, about = "Universal Discord Emoji dumper")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Updates emojis based on the servers you are in
    Dump {
        /// Directory to store emojis in. Will be created if it does not exist
        #[arg(long, value_name = "DIR")]
        emoji_dir: Option<PathBuf>,

        /// Download every emoji whether it is already present or not
        #[arg(long)]
        refresh: bool,

        /// Size to normalize emojis to after the dump, 64-128 is recommended.
        /// Requires ffmpeg. By default this is not done
        #[arg(long, value_name = "SIZE")]
        normalize: Option<u32>,

        /// Don't download anything, only normalize ALL emojis already
        /// downloaded. --normalize must also be specified for any
        /// normalization to take place
        #[arg(long)]
        normalize_only: bool,
    },

    /// Generate the CopyQ plugin from its template
    Generate {
        /// Directory the plugin searches for emojis in
        #[arg(long, value_name = "DIR")]
        emoji_dir: Option<PathBuf>,

        /// Number of emojis to load to the clipboard
        #[arg(long, default_value_t = 50)]
        emoji_load_limit: u32,

        /// Name of the command in CopyQ
        #[arg(long, default_value = "Universal Emoji")]
        command_name: String,

        /// Shortcut to trigger the command in CopyQ
        #[arg(long, default_value = "ctrl+shift+;")]
        command_shortcut: String,

        /// Template file to render
        #[arg(long, default_value = "universal-emoji.template.js")]
        template: PathBuf,

        /// Where the rendered plugin is written
        #[arg(long, default_value = "universal-emoji.autogenerated.js")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // credentials may live in a .env next to the binary
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("emoji_dl=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> emoji_dl::Result<()> {
    match cli.command {
        Command::Dump {
            emoji_dir,
            refresh,
            normalize,
            normalize_only,
        } => dump(emoji_dir, refresh, normalize, normalize_only).await,
        Command::Generate {
            emoji_dir,
            emoji_load_limit,
            command_name,
            command_shortcut,
            template,
            output,
        } => {
            let mut config = Config::default();
            if let Some(dir) = emoji_dir {
                config.dump.output_dir = dir;
            }
            println!("generating plugin from template");
            let params = PluginParams {
                emoji_dir: config.dump.output_dir.clone(),
                emoji_load_limit,
                command_name,
                command_shortcut,
            };
            generate_plugin(&template, &output, &params)?;
            println!("wrote {}", output.display());
            Ok(())
        }
    }
}

async fn dump(
    emoji_dir: Option<PathBuf>,
    refresh: bool,
    normalize: Option<u32>,
    normalize_only: bool,
) -> emoji_dl::Result<()> {
    // Checked before any work so a missing credential never leaves a
    // half-finished run behind.
    let token = std::env::var("DISCORD_TOKEN")
        .ok()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::Config {
            message: "DISCORD_TOKEN env variable not set. Create a .env file or set it in \
                      your terminal"
                .to_string(),
            key: Some("DISCORD_TOKEN".to_string()),
        })?;

    let mut config = Config::default();
    if let Some(dir) = emoji_dir {
        config.dump.output_dir = dir;
    }

    let mut dumper = EmojiDumper::new(config.clone())?;

    if !normalize_only {
        let mut enumerator = DiscordEnumerator::new(token)?;
        let stats = dumper.dump(&mut enumerator, refresh).await?;
        println!("{}", stats.summary());
    }

    if let Some(size) = normalize {
        let transcoder = FfmpegTranscoder::from_config(&config.tools)?;
        // a standalone normalize has no dump to scope itself to, so every
        // recognized file is a candidate
        let not_before = if normalize_only {
            None
        } else {
            dumper.dump_start_time()
        };
        println!("Normalizing emojis to size: {size}x{size}");
        let stats =
            normalize_directory(&transcoder, config.output_dir(), size, not_before).await?;
        println!("{}", stats.summary());
    }

    Ok(())
}
