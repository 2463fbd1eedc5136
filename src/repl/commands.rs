/// All slash commands supported by the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Analyze {
        ticker: String,
        filing_type: Option<String>,
    },
    Ask {
        question: String,
    },
    Report,
    Export {
        dir: Option<String>,
    },
    Transcript,
    Status,
    Health,
    Config {
        key: Option<String>,
        value: Option<String>,
    },
    Version,
    Clear,
    Help {
        command: Option<String>,
    },
    Exit,
}

/// Description of a command for help display.
pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub static COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "analyze",
        usage: "/analyze <ticker> [10-K|10-Q|8-K]",
        description: "Generate an AI analysis report for a filing (default 10-K). Replaces the current report and its Q&A.",
    },
    CommandHelp {
        name: "ask",
        usage: "/ask <question>   (or just type the question)",
        description: "Ask a follow-up question about the current report",
    },
    CommandHelp {
        name: "report",
        usage: "/report",
        description: "Show the current report again",
    },
    CommandHelp {
        name: "export",
        usage: "/export [dir]",
        description: "Save the current report as {ticker}-{filingType}-report.json",
    },
    CommandHelp {
        name: "transcript",
        usage: "/transcript",
        description: "Show the Q&A transcript for the current report",
    },
    CommandHelp {
        name: "status",
        usage: "/status",
        description: "Show backend, report and Q&A state",
    },
    CommandHelp {
        name: "health",
        usage: "/health",
        description: "Check that the backend is reachable",
    },
    CommandHelp {
        name: "config",
        usage: "/config [export_dir] [value]",
        description: "View settings or change the export directory",
    },
    CommandHelp {
        name: "version",
        usage: "/version",
        description: "Show version and build info",
    },
    CommandHelp {
        name: "clear",
        usage: "/clear",
        description: "Clear the terminal screen",
    },
    CommandHelp {
        name: "help",
        usage: "/help [command]",
        description: "Show help for all or a specific command",
    },
    CommandHelp {
        name: "exit",
        usage: "/exit",
        description: "Quit the REPL",
    },
];

/// All command names for tab completion.
pub static COMMAND_NAMES: &[&str] = &[
    "/analyze",
    "/ask",
    "/report",
    "/export",
    "/transcript",
    "/status",
    "/health",
    "/config",
    "/version",
    "/clear",
    "/help",
    "/exit",
];

/// Parse a raw input line. Lines without a leading `/` are questions.
pub fn parse_command(input: &str) -> Result<SlashCommand, String> {
    let input = input.trim();
    if !input.starts_with('/') {
        return Ok(SlashCommand::Ask { question: input.to_string() });
    }

    let (cmd, rest) = match input.find(char::is_whitespace) {
        Some(idx) => (&input[..idx], input[idx..].trim()),
        None => (input, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match cmd {
        "/analyze" | "/a" => parse_analyze(&args),
        "/ask" => Ok(SlashCommand::Ask { question: rest.to_string() }),
        "/report" => Ok(SlashCommand::Report),
        "/export" => Ok(SlashCommand::Export {
            dir: (!rest.is_empty()).then(|| rest.to_string()),
        }),
        "/transcript" => Ok(SlashCommand::Transcript),
        "/status" => Ok(SlashCommand::Status),
        "/health" => Ok(SlashCommand::Health),
        "/config" => Ok(SlashCommand::Config {
            key: args.first().map(|s| s.to_string()),
            value: args.get(1).map(|s| s.to_string()),
        }),
        "/version" => Ok(SlashCommand::Version),
        "/clear" => Ok(SlashCommand::Clear),
        "/help" => Ok(SlashCommand::Help {
            command: args.first().map(|s| s.trim_start_matches('/').to_string()),
        }),
        "/exit" | "/quit" | "/q" => Ok(SlashCommand::Exit),
        other => Err(format!("Unknown command: {}. Type /help for available commands.", other)),
    }
}

fn parse_analyze(args: &[&str]) -> Result<SlashCommand, String> {
    let mut ticker = String::new();
    let mut filing_type = None;

    let mut i = 0;
    while i < args.len() {
        match args[i] {
            "--type" | "-f" => {
                i += 1;
                filing_type = args.get(i).map(|s| s.to_string());
            }
            other if ticker.is_empty() => ticker = other.to_string(),
            other if filing_type.is_none() => filing_type = Some(other.to_string()),
            other => {
                return Err(format!("Unexpected argument for /analyze: {}", other));
            }
        }
        i += 1;
    }

    Ok(SlashCommand::Analyze { ticker, filing_type })
}
