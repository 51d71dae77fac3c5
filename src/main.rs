use clap::Parser;
use console::Term;
use gbfr_extract::{logging, Cli, ExtractError, GbfrExtract, OutputFormatter, UserFriendlyError};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet) {
        eprintln!("Warning: {:#}", e);
    }

    let exit_code = run(&cli);

    if cli.pause {
        wait_for_enter();
    }

    process::exit(exit_code);
}

fn run(cli: &Cli) -> i32 {
    if cli.generate_config {
        return handle_generate_config(cli);
    }

    let formatter = OutputFormatter::new(cli.output_mode(), cli.verbose, cli.quiet);
    formatter.print_header("GBFR Data Extractor");

    let app = match GbfrExtract::from_cli(cli) {
        Ok(app) => app,
        Err(e) => {
            formatter.print_user_friendly_error(&e);
            return exit_code_for(&e);
        }
    };
    formatter.debug("Configuration loaded successfully");

    let list_file = match cli.resolve_list_file() {
        Ok(path) => path,
        Err(e) => {
            app.handle_error(&e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return match app.dry_run(&list_file) {
            Ok(plan) => {
                app.print_plan(&plan);
                0
            }
            Err(e) => {
                app.handle_error(&e);
                exit_code_for(&e)
            }
        };
    }

    match app.run(&list_file) {
        Ok(report) => {
            app.print_report(&report);

            if report.result.has_failures() {
                2 // Completed with failed files
            } else {
                0
            }
        }
        Err(e) => {
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &ExtractError) -> i32 {
    match error {
        ExtractError::Config { .. } => 3,
        ExtractError::PathInvalid { .. } => 4,
        ExtractError::InputMissing { .. } => 5,
        ExtractError::EmptyFileList { .. } => 6,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "gbfr-extract.toml".to_string());

    match GbfrExtract::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nEdit the paths to match your game and GBFRDataTools install, then run:");
            println!("  gbfr-extract <path/to/modded_filelist.txt> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            1
        }
    }
}

fn wait_for_enter() {
    let term = Term::stdout();
    if term.write_line("Press Enter to exit...").is_ok() {
        let _ = term.read_line();
    }
}
