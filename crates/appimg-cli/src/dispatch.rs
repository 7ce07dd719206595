use anyhow::Result;
use appimg_installer::{default_config_path, default_layout, install_bundle, AppLayout};
use appimg_registry::Manager;
use log::debug;

use crate::completion::write_completions_script;
use crate::render::{
    format_delete_report_lines, format_install_outcome_lines, format_list_lines,
    format_paths_lines, render_status_line, ListRow, OutputStyle, TerminalRenderer,
};
use crate::{Cli, Commands};

pub(crate) fn run_cli(cli: Cli, style: OutputStyle) -> Result<()> {
    let renderer = TerminalRenderer::from_style(style);

    match cli.command {
        Commands::List => {
            let layout = load_layout()?;
            let manager = Manager::from_layout(&layout);
            let rows = manager
                .list()
                .into_iter()
                .zip(manager.records())
                .map(|((index, name), record)| ListRow {
                    index,
                    id: record.id().to_string(),
                    name,
                })
                .collect::<Vec<_>>();
            renderer.print_table(&format_list_lines(&rows, style));
        }
        Commands::Show { target } => {
            let layout = load_layout()?;
            let manager = Manager::from_layout(&layout);
            let index = manager.resolve(&target)?;
            println!("{}", manager.show(index)?);
        }
        Commands::Delete { target } => {
            let layout = load_layout()?;
            let mut manager = Manager::from_layout(&layout);
            let index = manager.resolve(&target)?;
            println!(
                "{}",
                render_status_line(style, "step", &format!("delete {target}"))
            );
            let report = manager.delete(index)?;
            renderer.print_lines(&format_delete_report_lines(&report, style));
            if let Some(failure) = report.failure() {
                return Err(failure.into());
            }
        }
        Commands::Install { bundle_path } => {
            let layout = load_layout()?;
            let outcome = install_bundle(&layout, &bundle_path)?;
            renderer.print_lines(&format_install_outcome_lines(&outcome, style));
        }
        Commands::Paths => {
            let layout = load_layout()?;
            renderer.print_lines(&format_paths_lines(&layout, default_config_path().as_deref()));
        }
        Commands::Completions { shell } => {
            let mut stdout = std::io::stdout();
            write_completions_script(shell, &mut stdout)?;
        }
    }

    Ok(())
}

fn load_layout() -> Result<AppLayout> {
    let layout = default_layout()?;
    debug!(
        "layout: storage={} applications={} icons={}",
        layout.storage_dir().display(),
        layout.applications_dir().display(),
        layout.icons_dir().display()
    );
    Ok(layout)
}
