use std::path::Path;

use chrono::Local;
use clap::Parser;

use shopping_list_rs::cli::{BuildArgs, Cli, Command, HaveAction, SheetAction};
use shopping_list_rs::error::Result;
use shopping_list_rs::interface::{
    display_names, display_sheets, display_summary, prompt_already_have, prompt_weekdays,
    prompt_yes_no,
};
use shopping_list_rs::logging::init_logging;
use shopping_list_rs::sheets::CsvSource;
use shopping_list_rs::shopping::run_to_file;
use shopping_list_rs::state::{load_or_init, save_settings, Settings};
use shopping_list_rs::worker::spawn_build;

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Build(args) => cmd_build(&cli.config, args),
        Command::Init => cmd_init(&cli.config),
        Command::Have { action } => cmd_have(&cli.config, action),
        Command::Sheets { action } => cmd_sheets(&cli.config, action),
    }
}

/// Build the shopping list and optionally review it.
fn cmd_build(config: &Path, args: BuildArgs) -> Result<()> {
    let mut settings = load_or_init(config)?;

    if settings.sheets.is_empty() {
        println!("No plan sheets configured. Use 'sheets add <name>' first.");
        return Ok(());
    }

    let mut run_settings = settings.clone();
    args.apply_overrides(&mut run_settings);
    if args.save {
        settings = run_settings.clone();
        save_settings(config, &settings)?;
    }

    let out_file = run_settings.output_path();
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let request = run_settings.build_request(today);
    let source = CsvSource::new(&run_settings.data_dir);

    let output = if run_settings.threaded && !args.foreground {
        let handle = spawn_build(request, source, out_file.clone());
        for line in handle.status_lines() {
            eprintln!("{}", line);
        }
        handle.join()?
    } else {
        run_to_file(&request, &source, &out_file)?
    };

    display_summary(&output, &out_file);

    if args.review {
        let picked = prompt_already_have(&output)?;
        if !picked.is_empty() {
            for name in &picked {
                settings.enable_name(name);
            }
            if prompt_yes_no(&format!("Save {} already-have names?", picked.len()), true)? {
                save_settings(config, &settings)?;
                println!("Settings saved.");
            }
        }
    }

    Ok(())
}

/// Write default settings.
fn cmd_init(config: &Path) -> Result<()> {
    if config.exists() {
        println!("Settings already exist at {}", config.display());
        return Ok(());
    }
    save_settings(config, &Settings::default())?;
    println!("Wrote default settings to {}", config.display());
    Ok(())
}

fn cmd_have(config: &Path, action: HaveAction) -> Result<()> {
    let mut settings = load_or_init(config)?;

    match action {
        HaveAction::List => {
            display_names(&settings);
            return Ok(());
        }
        HaveAction::Add { name } => {
            settings.add_name(&name)?;
            println!("Added {}", name);
        }
        HaveAction::Remove { name } => {
            settings.remove_name(&name)?;
            println!("Removed {}", name);
        }
        HaveAction::Toggle { name } => {
            let enabled = settings.toggle_name(&name)?;
            let state = if enabled { "enabled" } else { "disabled" };
            println!("{} {}", name, state);
        }
    }

    save_settings(config, &settings)?;
    Ok(())
}

fn cmd_sheets(config: &Path, action: SheetAction) -> Result<()> {
    let mut settings = load_or_init(config)?;

    match action {
        SheetAction::List => {
            display_sheets(&settings);
            return Ok(());
        }
        SheetAction::Add { name, days, pick } => {
            let days = if pick { prompt_weekdays(&name)? } else { days };
            settings.add_sheet(&name, days)?;
            println!("Added {}", name);
        }
        SheetAction::Remove { name } => {
            settings.remove_sheet(&name)?;
            println!("Removed {}", name);
        }
    }

    save_settings(config, &settings)?;
    Ok(())
}
