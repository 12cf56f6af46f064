//! Command-line parsing and routing.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use crate::commands::{self, TranscribeArgs, TranslateArgs};
use crate::config::get_config_path;
use crate::logging;
use crate::setup;

/// Speech-to-text for Ugandan languages, backed by the Sunbird AI API
#[derive(Parser)]
#[command(name = "ugtt")]
#[command(version)]
#[command(long_about = "Transcribe audio in Ugandan languages through the Sunbird AI API,\nand translate common phrases offline.\n\nEXAMPLES:\n    # Transcribe, prompting for anything missing\n    $ ugtt transcribe\n\n    # Transcribe a Luganda clip and copy the text to the clipboard\n    $ ugtt transcribe voice-note.mp3 -l luganda -c\n\n    # Translate a phrase\n    $ ugtt translate \"Thank you\" --from english --to acholi\n\n    # Interactive translator\n    $ ugtt translate")]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/ugtt/ugtt.toml\n    Logs:               ~/.local/state/ugtt/ugtt.log.*\n    API token:          $SUNBIRD_API_TOKEN or --token"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe an audio file
    ///
    /// Uploads the file to Sunbird, then polls the job until the transcript is
    /// ready, the job fails, or the poll budget runs out.
    #[command(visible_alias = "t")]
    Transcribe {
        /// Audio file to transcribe (prompted for when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Language spoken in the audio (prompted for when omitted)
        #[arg(short, long)]
        language: Option<String>,

        /// Sunbird API token, used when SUNBIRD_API_TOKEN is not set
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,

        /// Copy transcription to clipboard instead of stdout
        #[arg(short, long)]
        clipboard: bool,

        /// Write transcription to file instead of stdout
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<String>,
    },

    /// Translate a phrase between supported languages
    ///
    /// Runs once when text, --from and --to are all given, otherwise starts
    /// an interactive session.
    #[command(visible_alias = "tr")]
    Translate {
        /// Phrase to translate
        text: Option<String>,

        /// Source language
        #[arg(long)]
        from: Option<String>,

        /// Target language
        #[arg(long)]
        to: Option<String>,
    },

    /// List supported languages and their codes
    Languages,

    /// Open configuration file in your preferred editor
    #[command(visible_alias = "c")]
    Config,

    /// Show the last 50 lines of the most recent log file
    Logs,

    /// Generate shell completion script
    ///
    /// Examples:
    ///   ugtt completions bash > ugtt.bash
    ///   ugtt completions zsh > _ugtt
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the command named on the command line.
///
/// # Errors
/// - If logging or config setup fails
/// - If the command itself fails
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "ugtt", &mut io::stdout());
            return Ok(());
        }
        Commands::Languages => {
            commands::handle_languages();
            return Ok(());
        }
        Commands::Logs => {
            if let Err(e) = commands::handle_logs() {
                eprintln!("Error: {e}");
                process::exit(1);
            }
            return Ok(());
        }
        _ => {}
    }

    logging::init_logging()?;
    setup::ensure_config(&get_config_path()?).map_err(|e| {
        tracing::error!("Setup failed: {e}");
        anyhow::anyhow!("Setup failed: {e}")
    })?;

    match cli.command {
        Commands::Transcribe {
            file,
            language,
            token,
            clipboard,
            output,
        } => {
            commands::handle_transcribe(TranscribeArgs {
                file,
                language,
                token,
                clipboard,
                output,
            })
            .await?;
        }
        Commands::Translate { text, from, to } => {
            commands::handle_translate(TranslateArgs { text, from, to })?;
        }
        Commands::Config => commands::handle_config()?,
        Commands::Completions { .. } | Commands::Languages | Commands::Logs => {
            unreachable!("handled before logging starts")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_transcribe_alias_and_flags() {
        let cli = Cli::try_parse_from(["ugtt", "t", "clip.mp3", "-l", "ateso", "-c"]).unwrap();
        match cli.command {
            Commands::Transcribe {
                file,
                language,
                clipboard,
                output,
                ..
            } => {
                assert_eq!(file, Some(PathBuf::from("clip.mp3")));
                assert_eq!(language.as_deref(), Some("ateso"));
                assert!(clipboard);
                assert!(output.is_none());
            }
            _ => panic!("expected transcribe"),
        }
    }

    #[test]
    fn test_translate_one_shot_arguments() {
        let cli =
            Cli::try_parse_from(["ugtt", "tr", "Hello", "--from", "english", "--to", "lugbara"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Translate { text: Some(_), from: Some(_), to: Some(_) }
        ));
    }
}
