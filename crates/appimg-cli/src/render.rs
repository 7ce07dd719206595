use anstyle::{AnsiColor, Effects, Style};
use appimg_core::{icon_reference, AppImgError};
use appimg_installer::{AppLayout, InstallOutcome};
use appimg_registry::{DeleteReport, RemovalStatus};
use std::path::Path;

const NAME_COLUMN_WIDTH: usize = 35;
const ID_COLUMN_WIDTH: usize = 12;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct TerminalRenderer {
    style: OutputStyle,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ListRow {
    pub(crate) index: usize,
    pub(crate) id: String,
    pub(crate) name: String,
}

impl TerminalRenderer {
    pub(crate) fn from_style(style: OutputStyle) -> Self {
        Self { style }
    }

    pub(crate) fn print_lines(self, lines: &[String]) {
        for line in lines {
            println!("{line}");
        }
    }

    /// First line is the header, highlighted in rich mode.
    pub(crate) fn print_table(self, lines: &[String]) {
        let Some((header, rows)) = lines.split_first() else {
            return;
        };
        if rows.is_empty() {
            self.print_lines(lines);
            return;
        }
        match self.style {
            OutputStyle::Plain => println!("{header}"),
            OutputStyle::Rich => println!("{}", colorize(section_style(), header)),
        }
        self.print_lines(rows);
    }
}

pub(crate) fn resolve_output_style(stdout_is_tty: bool, no_color: bool) -> OutputStyle {
    if stdout_is_tty && !no_color {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

pub(crate) fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => message.to_string(),
        OutputStyle::Rich => format!("{} {message}", status_badge(status)),
    }
}

fn status_badge(status: &str) -> &'static str {
    match status {
        "ok" => "[OK]",
        "warn" => "[WARN]",
        "err" => "[ERR]",
        _ => "[..]",
    }
}

fn render_warning_line(style: OutputStyle, message: &str) -> String {
    match style {
        OutputStyle::Plain => format!("warning: {message}"),
        OutputStyle::Rich => render_status_line(style, "warn", message),
    }
}

pub(crate) fn format_list_lines(rows: &[ListRow], style: OutputStyle) -> Vec<String> {
    if rows.is_empty() {
        return vec![render_status_line(style, "step", "no installed bundles")];
    }

    let mut lines = vec![
        format!(
            "{:<5} | {:<ID_COLUMN_WIDTH$} | {:<NAME_COLUMN_WIDTH$}",
            "ID", "RID", "Name"
        )
        .trim_end()
        .to_string(),
        "-".repeat(5 + 3 + ID_COLUMN_WIDTH + 3 + NAME_COLUMN_WIDTH),
    ];
    for row in rows {
        lines.push(
            format!(
                "{:>2}    | {:<ID_COLUMN_WIDTH$} | {:<NAME_COLUMN_WIDTH$}",
                row.index, row.id, row.name
            )
            .trim_end()
            .to_string(),
        );
    }
    lines
}

pub(crate) fn format_install_outcome_lines(
    outcome: &InstallOutcome,
    style: OutputStyle,
) -> Vec<String> {
    let bundle = &outcome.bundle;
    let mut lines = vec![
        render_status_line(
            style,
            "ok",
            &format!(
                "copied {} to {}",
                bundle.source_path().display(),
                bundle.stored_path().display()
            ),
        ),
        render_status_line(
            style,
            "step",
            &format!("icon: {}", icon_reference(outcome.icon_path.as_deref())),
        ),
        render_status_line(
            style,
            "step",
            &format!("manifest: {}", outcome.mode.as_str()),
        ),
    ];
    for warning in &outcome.warnings {
        lines.push(render_warning_line(style, warning));
    }
    lines.push(render_status_line(
        style,
        "ok",
        &format!("desktop file created at {}", outcome.record_path.display()),
    ));
    lines.push(render_status_line(
        style,
        "ok",
        &format!("installed {}", outcome.display_name),
    ));
    lines
}

pub(crate) fn format_delete_report_lines(report: &DeleteReport, style: OutputStyle) -> Vec<String> {
    let mut lines = Vec::new();
    for removal in &report.removals {
        let path = removal.path.display();
        let line = match removal.status {
            RemovalStatus::Removed => {
                render_status_line(style, "ok", &format!("deleted {path}"))
            }
            RemovalStatus::Missing => {
                render_status_line(style, "step", &format!("{path} does not exist"))
            }
            RemovalStatus::Skipped => render_status_line(
                style,
                "warn",
                &format!("kept {path}: not an absolute path"),
            ),
            RemovalStatus::Failed => render_status_line(
                style,
                "err",
                &format!(
                    "failed to delete {path}: {}",
                    removal.error.as_deref().unwrap_or("unknown error")
                ),
            ),
        };
        lines.push(line);
    }
    if report.failure().is_none() {
        lines.push(render_status_line(
            style,
            "ok",
            &format!("removed {}", report.record.display_name),
        ));
    }
    lines
}

pub(crate) fn format_paths_lines(layout: &AppLayout, config_path: Option<&Path>) -> Vec<String> {
    vec![
        format!("storage: {}", layout.storage_dir().display()),
        format!("applications: {}", layout.applications_dir().display()),
        format!("icons: {}", layout.icons_dir().display()),
        format!(
            "config: {}",
            config_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<none>".to_string())
        ),
    ]
}

pub(crate) fn format_error_lines(err: &anyhow::Error, style: OutputStyle) -> Vec<String> {
    let headline = match style {
        OutputStyle::Plain => format!("error: {err}"),
        OutputStyle::Rich => {
            let kind = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<AppImgError>())
                .map(AppImgError::kind);
            match kind {
                Some(kind) => render_status_line(style, "err", &format!("{err} ({kind})")),
                None => render_status_line(style, "err", &err.to_string()),
            }
        }
    };

    let mut lines = vec![headline];
    for cause in err.chain().skip(1) {
        lines.push(format!("  caused by: {cause}"));
    }
    lines
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}
