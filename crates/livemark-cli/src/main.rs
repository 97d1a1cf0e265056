use livemark_common::telemetry::{self, TelemetryConfig};
use livemark_common::{Config, LivemarkError, parse_selection};
use livemark_core::{
    Selection, SourceText, filter_decorations_indexed, find_latex_commands,
    latex, render_unicode,
};
use miette::{IntoDiagnostic, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about = "livemark - live-preview decorations for Markdown", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a .json or .toml configuration file
    #[arg(long, global = true, env = "LIVEMARK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the decorations to draw for a document and a set of selections
    Decorate {
        /// Markdown file to decorate
        file: PathBuf,

        /// Caret position (char offset); repeatable
        #[arg(long = "cursor", value_name = "N")]
        cursors: Vec<usize>,

        /// Selection as ANCHOR:HEAD (char offsets); repeatable
        #[arg(long = "selection", value_name = "A:B")]
        selections: Vec<String>,

        /// Print every extracted decoration, ignoring selections
        #[arg(long)]
        raw: bool,
    },
    /// Show the Unicode substitutions for a LaTeX math expression
    Latex {
        /// Math content, without `$` delimiters
        expr: String,
    },
}

fn main() -> Result<()> {
    init_miette();

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;
    init_telemetry(&config, cli.config.as_deref())?;

    match cli.command {
        Commands::Decorate {
            file,
            cursors,
            selections,
            raw,
        } => {
            let selections = collect_selections(&cursors, &selections)?;
            decorate(&config, &file, &selections, raw)?;
        }
        Commands::Latex { expr } => print_latex(&expr)?,
    }

    Ok(())
}

fn init_telemetry(config: &Config, path: Option<&Path>) -> Result<()> {
    let mut telemetry = TelemetryConfig::from_env("livemark");
    if let Some(level) = &config.log_level {
        telemetry = telemetry.with_level_name(level).map_err(|level| {
            LivemarkError::config(
                path.unwrap_or(Path::new("<default>")),
                format!("unknown log level `{level}`"),
            )
        })?;
    }
    telemetry::init(telemetry);
    Ok(())
}

fn collect_selections(cursors: &[usize], ranges: &[String]) -> Result<Vec<Selection>> {
    let mut selections: Vec<Selection> = cursors.iter().copied().map(Selection::collapsed).collect();
    for range in ranges {
        selections.push(parse_selection(range).map_err(LivemarkError::from)?);
    }
    Ok(selections)
}

fn decorate(config: &Config, file: &Path, selections: &[Selection], raw: bool) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .map_err(LivemarkError::from)
        .map_err(|err| miette::Report::new(err).wrap_err(format!("reading {}", file.display())))?;

    let text = SourceText::from_str(&source);
    let decorations = config.extractor().extract_indexed(&source, &text);

    tracing::info!(
        file = %file.display(),
        chars = text.len_chars(),
        decorations = decorations.len(),
        selections = selections.len(),
        "decorating"
    );

    let json = if raw {
        serde_json::to_string_pretty(&decorations)
    } else {
        let map = filter_decorations_indexed(&decorations, &text, selections);
        serde_json::to_string_pretty(&map)
    }
    .map_err(LivemarkError::from)?;

    print_line(&json)
}

fn print_latex(expr: &str) -> Result<()> {
    let substitutions = latex::non_overlapping(find_latex_commands(expr, 0));
    let json = serde_json::to_string_pretty(&substitutions).map_err(LivemarkError::from)?;
    print_line(&json)?;
    print_line(&render_unicode(expr))
}

fn print_line(line: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}").into_diagnostic()
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_decorate() {
        let cli = Cli::try_parse_from([
            "livemark",
            "decorate",
            "notes.md",
            "--cursor",
            "3",
            "--cursor",
            "10",
            "--selection",
            "4:8",
        ])
        .unwrap();
        let Commands::Decorate {
            file,
            cursors,
            selections,
            raw,
        } = cli.command
        else {
            panic!("expected decorate");
        };
        assert_eq!(file, PathBuf::from("notes.md"));
        assert_eq!(cursors, vec![3, 10]);
        assert_eq!(selections, vec!["4:8".to_string()]);
        assert!(!raw);
    }

    #[test]
    fn test_collect_selections() {
        let selections = collect_selections(&[2], &["5:1".to_string()]).unwrap();
        assert_eq!(selections, vec![Selection::collapsed(2), Selection::new(5, 1)]);
        assert!(collect_selections(&[], &["a:b".to_string()]).is_err());
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::try_parse_from(["livemark", "latex", r"\alpha", "--config", "lm.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("lm.toml")));
    }
}
