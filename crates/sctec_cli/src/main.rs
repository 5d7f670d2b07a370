//! `sctec` - terminal front end for the venture registry.
//!
//! # Responsibility
//! - Provide a small executable over `sctec_core` for local inspection.
//! - Reuse the same SQLite file and keys the Flutter shell uses.

use clap::{Parser, Subcommand};
use sctec_core::{
    init_logging, AppConfig, Feedback, FeedbackKind, FormFields, ListView, SqliteKeyValueStore,
    SystemClock, VentureApp, VentureId, VentureStatus,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "sctec", version, about = "Registro de empreendimentos SCTEC")]
struct Cli {
    /// Database file; defaults to `SCTEC_DB_PATH` or the temp dir.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging stays off without it.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Core linkage probe.
    Ping,
    /// Print the core version.
    Version,
    /// List ventures, newest first.
    List {
        /// Case-insensitive text over name, owner, municipality and contact.
        query: Option<String>,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        status: String,
    },
    /// Print total, active and inactive counts.
    Stats,
    /// Register a venture.
    Add {
        name: String,
        owner: String,
        municipality: String,
        category: String,
        contact: String,
        status: Option<String>,
    },
    /// Remove a venture by id.
    Delete { id: String },
    /// Flip between light and dark theme.
    Theme,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(&cli.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = AppConfig::from_env();
    if cli.db.is_some() {
        config.db_path = cli.db;
    }

    match cli.command {
        Command::Ping => {
            println!("sctec_core ping={}", sctec_core::ping());
            Ok(())
        }
        Command::Version => {
            println!("sctec_core version={}", sctec_core::core_version());
            Ok(())
        }
        Command::List {
            query,
            category,
            status,
        } => {
            let mut app = open_app(&config)?;
            app.set_raw_filter(query.as_deref().unwrap_or(""), &category, &status)
                .map_err(|err| err.to_string())?;
            print_list(&app.list_view());
            Ok(())
        }
        Command::Stats => {
            let stats = open_app(&config)?.stats();
            println!(
                "total={} ativos={} inativos={}",
                stats.total, stats.active, stats.inactive
            );
            Ok(())
        }
        Command::Add {
            name,
            owner,
            municipality,
            category,
            contact,
            status,
        } => {
            let status = match status.as_deref() {
                None => None,
                Some(label) => Some(
                    VentureStatus::from_label(label)
                        .ok_or_else(|| format!("status inválido: {label}"))?,
                ),
            };
            let mut app = open_app(&config)?;
            app.open_create();
            *app.form_mut().fields_mut() = FormFields {
                name,
                owner,
                municipality,
                category,
                contact,
                status,
            };
            report(app.submit())
        }
        Command::Delete { id } => {
            let id = VentureId::parse(id).map_err(|err| err.to_string())?;
            let mut app = open_app(&config)?;
            if let Some(feedback) = app.request_delete(&id) {
                return report(feedback);
            }
            report(app.confirm_delete())
        }
        Command::Theme => {
            let mut app = open_app(&config)?;
            match app.toggle_theme() {
                Ok(theme) => {
                    println!("tema={}", theme.token());
                    Ok(())
                }
                Err(feedback) => report(feedback),
            }
        }
    }
}

fn open_app(config: &AppConfig) -> Result<VentureApp<SqliteKeyValueStore, SystemClock>, String> {
    let path = config.resolve_db_path();
    let backing = SqliteKeyValueStore::open(&path)
        .map_err(|err| format!("cannot open {}: {err}", path.display()))?;
    Ok(VentureApp::bootstrap(backing, SystemClock, config))
}

fn print_list(view: &ListView) {
    match view {
        ListView::Empty => println!("Nenhum empreendimento encontrado."),
        ListView::Cards(cards) => {
            for card in cards {
                println!(
                    "{} {} {} | {} | {} | {} | {} {}",
                    card.id,
                    card.category_icon,
                    card.title,
                    card.owner,
                    card.municipality,
                    card.contact,
                    card.status_marker,
                    card.status_label
                );
            }
        }
    }
}

fn report(feedback: Feedback) -> Result<(), String> {
    match feedback.kind {
        FeedbackKind::Error => Err(feedback.message),
        _ => {
            match feedback.subject {
                Some(id) => println!("{} ({id})", feedback.message),
                None => println!("{}", feedback.message),
            }
            Ok(())
        }
    }
}
