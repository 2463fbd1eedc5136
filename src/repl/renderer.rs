use console::style;

use crate::api::HealthStatus;
use crate::models::{Message, Sender};
use crate::repl::commands::{CommandHelp, COMMAND_HELP};

/// Prompt shown in place of an empty transcript.
pub const EMPTY_TRANSCRIPT_HINT: &str =
    "Ask a question about the filing, e.g., \"What were the total revenues?\"";

/// Render the help listing for all commands.
pub fn render_help(specific_command: Option<&str>) -> String {
    if let Some(cmd_name) = specific_command {
        if let Some(cmd) = COMMAND_HELP.iter().find(|c| c.name == cmd_name) {
            return format_command_detail(cmd);
        } else {
            return format!("{} Unknown command: /{}", style("✗").red(), cmd_name);
        }
    }

    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Available commands:").white().bold()));
    for cmd in COMMAND_HELP {
        out.push_str(&format!(
            "  {:<16} {}\n",
            style(format!("/{}", cmd.name)).cyan().bold(),
            style(cmd.description).dim(),
        ));
    }
    out
}

fn format_command_detail(cmd: &CommandHelp) -> String {
    format!(
        "\n{}\n  {}\n\n  {}\n",
        style(format!("/{}", cmd.name)).cyan().bold(),
        style(cmd.description).dim(),
        style(cmd.usage).white(),
    )
}

/// Render the version info.
pub fn render_version() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");
    let build_ts = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown");

    format!(
        "\n  {} {}\n  {} {}\n  {} {}\n",
        style("Version:").dim(),
        style(version).white().bold(),
        style("Commit:").dim(),
        style(git_hash).white(),
        style("Built:").dim(),
        style(build_ts).white(),
    )
}

/// Page-level error banner for a failed report request.
pub fn render_page_error(msg: &str) -> String {
    format!("\n  {} {}\n", style(" ERROR ").on_red().white().bold(), style(msg).red())
}

/// One transcript entry.
pub fn render_message(message: &Message) -> String {
    match message.sender {
        Sender::User => format!("  {} {}", style("you ›").cyan().bold(), message.text),
        Sender::Ai => format!("  {} {}", style("ai  ›").magenta().bold(), message.text),
    }
}

pub fn render_transcript(messages: &[Message]) -> String {
    if messages.is_empty() {
        return format!("  {}", style(EMPTY_TRANSCRIPT_HINT).dim());
    }
    messages.iter().map(render_message).collect::<Vec<_>>().join("\n")
}

/// Render session state for /status.
pub fn render_status(
    base_url: &str,
    loading: bool,
    report: Option<(&str, &str)>,
    error: Option<&str>,
    qna: Option<(usize, bool)>,
) -> String {
    let report_str = match (loading, report) {
        (true, _) => style("generating...".to_string()).yellow().to_string(),
        (false, Some((ticker, filing_type))) => {
            style(format!("{} ({})", ticker, filing_type)).white().bold().to_string()
        }
        (false, None) => style("none".to_string()).dim().to_string(),
    };
    let qna_str = match qna {
        Some((count, true)) => format!("{} messages, awaiting answer", count),
        Some((count, false)) => format!("{} messages", count),
        None => "not available".to_string(),
    };

    let mut out = format!(
        "\n  {} {}\n  {} {}\n  {} {}\n",
        style("Backend:").dim(),
        style(base_url).white(),
        style("Report:").dim(),
        report_str,
        style("Q&A:").dim(),
        style(qna_str).white(),
    );
    if let Some(e) = error {
        out.push_str(&format!("  {} {}\n", style("Error:").dim(), style(e).red()));
    }
    out
}

pub fn render_health(base_url: &str, status: &HealthStatus) -> String {
    let ok = status.status.eq_ignore_ascii_case("ok");
    let badge = if ok {
        style(&status.status).green().bold().to_string()
    } else {
        style(&status.status).yellow().bold().to_string()
    };
    let mut out = format!("  {} {} {}", style("Backend").dim(), style(base_url).white(), badge);
    if let Some(msg) = &status.message {
        out.push_str(&format!("\n  {}", style(msg).dim()));
    }
    out
}

/// Print an error message to the REPL.
pub fn render_error(msg: &str) -> String {
    format!("{} {}", style("✗").red(), style(msg).red())
}

/// Print a success message.
pub fn render_success(msg: &str) -> String {
    format!("{} {}", style("✓").green(), msg)
}

/// Print an info message.
pub fn render_info(msg: &str) -> String {
    format!("{}", style(msg).dim())
}
