mod ui;

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use hapmgr::apt::{DpkgProbe, check_environment};
use hapmgr::batch::spawn_batch;
use hapmgr::catalog;
use hapmgr::locale::{
    DEFAULT_LANGUAGE, LOCALE_DIR, Translate, Translations, available_languages,
    detect_system_language,
};
use hapmgr::settings::{AppSettings, app_settings_path, load_app_settings, save_app_settings};
use hapmgr::state::{AppMessage, AppState};
use hapmgr::status::spawn_status_check;
use hapmgr::types::OperationType;

#[derive(Parser)]
#[command(name = "hapmgr", version, about = "Hamradio apps install manager")]
struct Cli {
    /// Country lang code [it, en, de, fr, es]
    #[arg(short, long, value_name = "CODE")]
    lang: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the catalog with the installed state of every package
    List,
    /// Check the installed state of some packages (all when none given)
    Status { packages: Vec<String> },
    /// Show the catalog entry and installed state of one package
    Show { package: String },
    /// Install packages from the catalog, one at a time
    Install {
        #[arg(required = true)]
        packages: Vec<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove packages from the catalog, one at a time
    Remove {
        #[arg(required = true)]
        packages: Vec<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List languages with an installed translation catalog
    Languages,
    /// Show the settings file; --init writes the current settings to it
    Config {
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<ExitCode> {
    hapmgr::init_logging();

    let cli = Cli::parse();
    let settings = load_app_settings();

    let language = cli
        .lang
        .clone()
        .or_else(|| settings.language.clone())
        .unwrap_or_else(detect_system_language);
    let translations = Translations::load(Path::new(LOCALE_DIR), &language);
    if translations.is_empty() && language != DEFAULT_LANGUAGE {
        tracing::warn!("no translations installed for {}", language);
    }
    let tr: &dyn Translate = &translations;

    let mut state = AppState::new(catalog::catalog(tr))
        .with_history_limit(settings.max_operation_history);

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => {
            if !report_environment(&settings, tr, false) {
                return Ok(ExitCode::FAILURE);
            }
            let packages = state.package_names();
            run_status_check(&mut state, packages, &settings, tr);
            print!("{}", ui::render_table(&state.rows(), tr));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Status { packages } => {
            if !report_environment(&settings, tr, false) {
                return Ok(ExitCode::FAILURE);
            }
            let packages = if packages.is_empty() {
                state.package_names()
            } else {
                let (known, unknown): (Vec<_>, Vec<_>) =
                    packages.into_iter().partition(|package| catalog::contains(package));
                if !unknown.is_empty() {
                    tracing::warn!("not in the catalog: {}", unknown.join(", "));
                }
                known
            };
            run_status_check(&mut state, packages.clone(), &settings, tr);
            for package in packages {
                println!("{:<24} {}", package, tr.translate(state.status(&package).label()));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show { package } => {
            let Some(entry) = catalog::lookup(&package, tr) else {
                bail!("not in the catalog: {}", package);
            };
            if !report_environment(&settings, tr, false) {
                return Ok(ExitCode::FAILURE);
            }
            run_status_check(&mut state, vec![entry.app.clone()], &settings, tr);
            println!("{:<8} {}", tr.translate("App"), entry.app);
            println!("{:<8} {}", tr.translate("Pkg"), entry.pack);
            println!(
                "{:<8} {}",
                tr.translate("Status"),
                tr.translate(state.status(&entry.app).label())
            );
            println!("{:<8} {}", tr.translate("Desc"), entry.desc);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Install { packages, yes } => {
            let confirm = settings.confirm_install && !yes;
            run_operation(&mut state, packages, OperationType::Install, confirm, &settings, tr)
        }
        Commands::Remove { packages, yes } => {
            let confirm = settings.confirm_remove && !yes;
            run_operation(&mut state, packages, OperationType::Remove, confirm, &settings, tr)
        }
        Commands::Languages => {
            for code in available_languages(Path::new(LOCALE_DIR)) {
                if code == translations.language() {
                    println!("* {} ({} messages)", code, translations.len());
                } else {
                    println!("  {}", code);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { init } => {
            let path = app_settings_path()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "-".to_string());
            if init {
                save_app_settings(&settings).map_err(anyhow::Error::msg)?;
                println!("Wrote {}", path);
            } else {
                println!("{}", path);
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Reports startup issues. Returns false when a blocking issue should stop
/// the command.
fn report_environment(settings: &AppSettings, tr: &dyn Translate, needs_privilege: bool) -> bool {
    let elevation_configured = !settings.elevation.trim().is_empty();
    let mut usable = true;
    for issue in check_environment(&settings.package_manager) {
        let (title, detail) = ui::issue_messages(&issue);
        let message = format!("{} {}", tr.translate(title), tr.translate(detail));
        match ui::issue_severity(&issue, elevation_configured, needs_privilege) {
            ui::Severity::Blocking => {
                tracing::error!("{}", issue);
                eprintln!("{}", message);
                usable = false;
            }
            ui::Severity::Warning => tracing::warn!("{}", message),
        }
    }
    usable
}

fn run_status_check(
    state: &mut AppState,
    packages: Vec<String>,
    settings: &AppSettings,
    tr: &dyn Translate,
) {
    eprintln!("{}", tr.translate("Checking package status..."));
    state.begin_status_check();

    let (sender, receiver) = mpsc::channel();
    let probe = DpkgProbe::new(settings.status_tool.clone());
    let handle = spawn_status_check(packages, probe, sender);

    for message in receiver {
        state.handle_message(message);
    }
    if handle.join().is_err() {
        tracing::error!("status worker panicked");
    }
}

fn run_operation(
    state: &mut AppState,
    packages: Vec<String>,
    operation: OperationType,
    confirm: bool,
    settings: &AppSettings,
    tr: &dyn Translate,
) -> Result<ExitCode> {
    let unknown: Vec<_> = packages
        .iter()
        .filter(|package| !state.select(package))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        bail!("not in the catalog: {}", unknown.join(", "));
    }

    if !report_environment(settings, tr, true) {
        return Ok(ExitCode::FAILURE);
    }

    let selected = state.selected_packages();
    if confirm {
        let question = match operation {
            OperationType::Install => "Install the following packages?",
            OperationType::Remove => "Remove the following packages?",
        };
        let stdin = io::stdin();
        let confirmed = ui::confirm(question, &selected, tr, &mut stdin.lock(), &mut io::stdout())?;
        if !confirmed {
            return Ok(ExitCode::SUCCESS);
        }
    }

    eprintln!("{}...", tr.translate(operation.progress_label()));
    state.begin_batch(selected.len());

    let commands = settings.commands();
    let (sender, receiver) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let handle = spawn_batch(
        selected.clone(),
        operation,
        commands.clone(),
        sender,
        cancel,
    );

    let mut stdout = io::stdout();
    for message in receiver {
        let printable = match &message {
            AppMessage::BatchStarted { package, .. } => Some(format!(
                "{}\n$ {}",
                ui::format_package_banner(package, tr),
                commands.describe(package, operation)
            )),
            AppMessage::OutputLine { line } => Some(line.clone()),
            _ => None,
        };
        let finished = match &message {
            AppMessage::OperationFinished { result } => Some(result.clone()),
            _ => None,
        };

        state.handle_message(message);

        if let Some(text) = printable {
            writeln!(stdout, "{}", text)?;
        }
        if let Some(result) = finished {
            writeln!(stdout, "{}", ui::format_result_line(&result, state.progress(), tr))?;
        }
    }
    if handle.join().is_err() {
        tracing::error!("batch worker panicked");
    }

    writeln!(stdout, "\n{}", ui::format_batch_summary(state.progress(), tr))?;
    for operation in selected
        .iter()
        .filter_map(|package| state.recent_operation(package))
    {
        writeln!(
            stdout,
            "  {} ({})",
            ui::format_operation_title(operation, tr),
            ui::format_operation_subtitle(operation, tr)
        )?;
    }

    if state.take_refresh_request() {
        thread::sleep(Duration::from_millis(settings.refresh_delay_ms));
        run_status_check(state, selected.clone(), settings, tr);
        for package in &selected {
            writeln!(
                stdout,
                "{:<24} {}",
                package,
                tr.translate(state.status(package).label())
            )?;
        }
    }
    eprintln!("{}", tr.translate("Ready"));

    if state.progress().failed > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
