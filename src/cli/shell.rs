use std::{
    collections::HashMap,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;
use tracing::info;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::domain::FormField;

pub const SCRIPT_ENV: &str = "FLIGHT_BOOKING_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    info!(?mode, "booking shell started");

    match mode {
        CliMode::Interactive => {
            let mut terminal = Terminal::new(&context)?;
            output::section("Flight Booking");
            output::info("Type `flights` to browse departures or `help` for all commands.");
            drive(&mut context, &mut terminal)
        }
        CliMode::Script => drive(&mut context, &mut Piped::new(io::stdin().lock())),
    }
}

pub(crate) enum LineEvent {
    Line(String),
    Interrupted,
    Closed,
}

/// Where shell commands come from: the line editor or a piped script.
pub(crate) trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<LineEvent, CliError>;
}

struct Terminal {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl Terminal {
    fn new(context: &ShellContext) -> Result<Self, CliError> {
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper::new(context)));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<LineEvent, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    self.editor.add_history_entry(trimmed).ok();
                }
                Ok(LineEvent::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(LineEvent::Interrupted),
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                Ok(LineEvent::Closed)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Reads one command per line; blank lines and `#` comments are skipped.
pub(crate) struct Piped<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> Piped<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> LineSource for Piped<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<LineEvent, CliError> {
        for line in self.lines.by_ref() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok(LineEvent::Line(line));
        }
        Ok(LineEvent::Closed)
    }
}

pub(crate) fn drive<S: LineSource + ?Sized>(
    context: &mut ShellContext,
    source: &mut S,
) -> Result<(), CliError> {
    while context.running {
        match source.read_line(&context.prompt())? {
            LineEvent::Line(line) => match handle_line(context, line.trim()) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => context.report_error(err)?,
            },
            LineEvent::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
            }
            LineEvent::Closed => break,
        }
    }
    Ok(())
}

pub(crate) fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return Ok(LoopControl::Continue);
        }
    };

    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    let control = context.dispatch(&command, raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Completes command names in first position and form field keys after
/// `set`; hints a command's arguments once its name is typed.
struct CommandHelper {
    commands: Vec<String>,
    fields: Vec<String>,
    usages: HashMap<String, String>,
}

impl CommandHelper {
    fn new(context: &ShellContext) -> Self {
        let mut commands: Vec<String> = context
            .command_names()
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();

        let usages = context
            .registry
            .list()
            .into_iter()
            .filter_map(|entry| {
                let args = entry.usage.strip_prefix(entry.name)?.trim();
                (!args.is_empty()).then(|| (entry.name.to_string(), args.to_string()))
            })
            .collect();

        Self {
            commands,
            fields: FormField::all().map(|field| field.key().to_string()).collect(),
            usages,
        }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();

        let pool = match words.as_slice() {
            [] => &self.commands,
            ["set"] => &self.fields,
            _ => return Ok((start, Vec::new())),
        };

        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = pool
            .iter()
            .filter(|name| name.to_ascii_lowercase().starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos != line.len() || !line.ends_with(' ') {
            return None;
        }
        let mut words = line.split_whitespace();
        let command = words.next()?.to_ascii_lowercase();
        if words.next().is_some() {
            return None;
        }
        self.usages.get(&command).cloned()
    }
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
