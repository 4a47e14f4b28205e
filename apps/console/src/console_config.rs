use std::env;

use callops_core::{AppError, AppResult};

/// Console subcommand selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub command: ConsoleCommand,
    pub search_text: String,
    pub show_inactive: bool,
    pub seed_demo_data: bool,
}

impl ConsoleConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_sources(env::args().skip(1), |name| env::var(name).ok())
    }

    fn from_sources(
        mut args: impl Iterator<Item = String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AppResult<Self> {
        let command = match args.next().as_deref() {
            None | Some("list") => ConsoleCommand::List,
            Some("export") => ConsoleCommand::Export,
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "unknown command '{other}', expected 'list' or 'export'"
                )));
            }
        };
        let search_text = args.collect::<Vec<_>>().join(" ");

        let seed_demo_data = parse_bool(&lookup, "CALLOPS_SEED_DEMO_DATA", true)?;
        let show_inactive = parse_bool(&lookup, "CALLOPS_DEFAULT_SHOW_INACTIVE", false)?;

        Ok(Self {
            command,
            search_text,
            show_inactive,
            seed_demo_data,
        })
    }
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: bool,
) -> AppResult<bool> {
    let Some(value) = lookup(name) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "invalid {name} value '{value}', expected true or false"
        ))),
    }
}
