use anyhow::Result;
use chrono::Utc;

use crate::{
    cli::{Cli, Command, RunArgs},
    domain, infra,
    infra::process::SystemProcessLauncher,
    usecases::{
        self, bootstrap,
        cancel::{cancel_run, CancelOutcome},
        launch::{run_spectrometer, RunOutcome, RunRequest},
        status::status,
        template::{init_template, load_template, validate_file},
    },
};

pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(cli.config.as_deref())?;
    tracing::debug!(
        domain = domain::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    match cli.command_or_default() {
        Command::Show { ini } => {
            let template = load_template(&ini)?;
            for (key, value) in template.entries.iter() {
                println!("{key} = {value}");
            }
        }
        Command::Validate { ini } => {
            let entries = validate_file(&ini)?;
            println!(
                "{}: all required settings present ({} keys)",
                ini.display(),
                entries.len()
            );
        }
        Command::Init { ini } => {
            init_template(&ini)?;
            println!("Template written to {}", ini.display());
        }
        Command::Run(args) => {
            let request = run_request(args);
            let outcome = run_spectrometer(
                &context,
                &request,
                &mut SystemProcessLauncher,
                Utc::now(),
            )?;
            for line in run_summary_lines(&outcome) {
                println!("{line}");
            }
        }
        Command::Cancel => match cancel_run(&context, &mut SystemProcessLauncher)? {
            CancelOutcome::Interrupted { pid, process_name } => {
                println!("Sent SIGINT to {process_name} (run pid {pid}).");
            }
            CancelOutcome::NotRunning => println!("Spectrometer is not running."),
        },
        Command::Status => {
            let report = status(&context, &SystemProcessLauncher)?;
            for line in report.lines() {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn run_request(args: RunArgs) -> RunRequest {
    RunRequest {
        template: args.template,
        input1: args.input,
        input2: args.input2,
        output_ini: args.output_ini,
        overrides: args.overrides,
        dry_run: args.dry_run,
    }
}

fn run_summary_lines(outcome: &RunOutcome) -> Vec<String> {
    let mut lines = vec![
        format!("INI written to {}", outcome.output_ini.display()),
        format!("Command = {}", outcome.command.display_line()),
    ];
    if let Some(log_file) = &outcome.command.log_file {
        lines.push(format!("Transcript: {}", log_file.display()));
    }
    lines.push(match outcome.pid {
        Some(pid) => format!("Spectrometer started (pid {pid})."),
        None => "Dry run: spectrometer not started.".to_owned(),
    });
    lines
}
