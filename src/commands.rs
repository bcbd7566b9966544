//! REPL input: slash commands and `field value` lines.

use crate::form::{Field, Sex};
use crate::session::Session;
use crate::view::render;

/// What the REPL should do after a slash command runs.
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Not a command: parse it as a form input.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Exit the REPL.
    Quit,
}

/// A built-in command definition.
struct Command {
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    run: fn(&mut Session) -> CommandResult,
}

const COMMANDS: &[Command] = &[
    Command {
        name: "/help",
        aliases: &["/h", "/?"],
        description: "show this help",
        run: cmd_help,
    },
    Command {
        name: "/show",
        aliases: &["/s"],
        description: "render the form and the latest result",
        run: cmd_show,
    },
    Command {
        name: "/reset",
        aliases: &[],
        description: "clear every field and the result",
        run: cmd_reset,
    },
    Command {
        name: "/quit",
        aliases: &["quit", "exit", "/exit", "/q"],
        description: "exit the REPL",
        run: cmd_quit,
    },
];

/// A form edit typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// `altura 170`; a missing value clears the field.
    Field { field: Field, value: String },
    /// `genero masculino`; `-` or nothing unsets it.
    Sex(Option<Sex>),
}

/// Try to handle input as a built-in command.
pub fn handle_command(input: &str, session: &mut Session) -> CommandResult {
    let cmd = input.trim();

    for command in COMMANDS {
        if cmd == command.name || command.aliases.contains(&cmd) {
            return (command.run)(session);
        }
    }

    if cmd.starts_with('/') {
        println!("unknown command: {cmd}");
        println!("type /help for available commands");
        return CommandResult::Handled;
    }

    CommandResult::NotACommand
}

/// Parse `name [value]` into a form edit.
pub fn parse_input(input: &str) -> Result<Input, String> {
    let mut parts = input.split_whitespace();
    let name = parts.next().ok_or_else(|| "empty input".to_string())?;
    let value = parts.next().unwrap_or("");
    if let Some(extra) = parts.next() {
        return Err(format!("unexpected `{extra}`: use `<campo> <valor>`"));
    }

    match name.to_ascii_lowercase().as_str() {
        "genero" | "género" | "sexo" | "sex" => {
            let sex = match value {
                "" | "-" => None,
                v => Some(v.parse::<Sex>()?),
            };
            Ok(Input::Sex(sex))
        }
        other => {
            let field = other.parse::<Field>()?;
            Ok(Input::Field {
                field,
                value: value.to_string(),
            })
        }
    }
}

// --- Command implementations ---

fn cmd_help(_session: &mut Session) -> CommandResult {
    let max_width = COMMANDS
        .iter()
        .map(|c| format_command_name(c.name, c.aliases).len())
        .max()
        .unwrap_or(10);

    println!("  altura <cm> | peso <kg> | edad <años> | genero <masculino|femenino|->");
    println!("  (a field with no value is cleared)\n");
    for command in COMMANDS {
        let name = format_command_name(command.name, command.aliases);
        println!("  {name:<max_width$}  {}", command.description);
    }
    CommandResult::Handled
}

fn format_command_name(name: &str, aliases: &[&str]) -> String {
    if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, aliases.join(", "))
    }
}

fn cmd_show(session: &mut Session) -> CommandResult {
    print!("{}", render(session.form(), session.store()));
    CommandResult::Handled
}

fn cmd_reset(session: &mut Session) -> CommandResult {
    session.reset();
    println!("  form cleared");
    CommandResult::Handled
}

fn cmd_quit(_session: &mut Session) -> CommandResult {
    CommandResult::Quit
}
