use std::{
    io::{self, BufRead, Write},
    str::FromStr,
    sync::LazyLock,
};

use clay_engine::{GenerationRequest, SculptorAgent};
use log::{debug, error, warn};
use regex::Regex;
use strum::{Display, EnumString};

pub const MAX_VARIATIONS: usize = 10;
const PROMPT: &str = "🎨 > ";
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

static VARIATIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^variations\s+(\d+)\s+(.+)$").expect("variations pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionState {
    Idle,
    Dispatching,
    Terminated,
}

/// `quit` and `exit` in any case, `help` and `clear` exactly.
#[derive(Debug, Clone, Copy, EnumString)]
enum Keyword {
    #[strum(serialize = "quit", ascii_case_insensitive)]
    Quit,
    #[strum(serialize = "exit", ascii_case_insensitive)]
    Exit,
    #[strum(serialize = "help")]
    Help,
    #[strum(serialize = "clear")]
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Clear,
    Variations { count: usize, description: String },
    Generate(String),
}

impl Command {
    /// `None` for blank lines.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Ok(keyword) = Keyword::from_str(line) {
            return Some(match keyword {
                Keyword::Quit | Keyword::Exit => Command::Quit,
                Keyword::Help => Command::Help,
                Keyword::Clear => Command::Clear,
            });
        }

        if let Some(caps) = VARIATIONS_RE.captures(line) {
            return Some(Command::Variations {
                // too many digits is just another out of range count
                count: caps[1].parse().unwrap_or(usize::MAX),
                description: caps[2].trim().to_string(),
            });
        }

        Some(Command::Generate(line.to_string()))
    }
}

pub struct Session<'a> {
    agent: &'a SculptorAgent,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(agent: &'a SculptorAgent) -> Self {
        Self {
            agent,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Reads commands until `quit`/`exit` or end of input.
    pub async fn run(&mut self, mut input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "Clay Sculptor. Describe something to sculpt, or type `help`.")?;
        while self.state != SessionState::Terminated {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                self.state = SessionState::Terminated;
                break;
            }
            self.handle_line(&line, &mut out).await?;
        }
        writeln!(out, "Goodbye!")?;
        Ok(())
    }

    /// Processes one input line and returns the resulting state.
    /// Generation failures are reported and never end the session.
    pub async fn handle_line(
        &mut self,
        line: &str,
        out: &mut impl Write,
    ) -> io::Result<SessionState> {
        let Some(command) = Command::parse(line) else {
            return Ok(self.state);
        };

        self.state = SessionState::Dispatching;
        self.state = match command {
            Command::Quit => SessionState::Terminated,
            Command::Help => {
                write!(out, "{}", help_text())?;
                SessionState::Idle
            }
            Command::Clear => {
                write!(out, "{CLEAR_SCREEN}")?;
                SessionState::Idle
            }
            Command::Variations { count, description } => {
                if !(1..=MAX_VARIATIONS).contains(&count) {
                    warn!("Number of variations must be between 1 and {MAX_VARIATIONS}, got {count}");
                    writeln!(
                        out,
                        "Number of variations must be between 1 and {MAX_VARIATIONS}"
                    )?;
                } else {
                    match self
                        .agent
                        .generate_multiple_variations(&description, count)
                        .await
                    {
                        Ok(paths) => {
                            for path in paths {
                                writeln!(out, "Saved {}", path.display())?;
                            }
                        }
                        Err(e) => {
                            error!("Generating variations failed: {e}");
                            writeln!(out, "Generation failed: {e}")?;
                        }
                    }
                }
                SessionState::Idle
            }
            Command::Generate(description) => {
                match self
                    .agent
                    .generate_clay_image(&GenerationRequest::new(description))
                    .await
                {
                    Ok(path) => writeln!(out, "Saved {}", path.display())?,
                    Err(e) => {
                        error!("Generation failed: {e}");
                        writeln!(out, "Generation failed: {e}")?;
                    }
                }
                SessionState::Idle
            }
        };

        debug!("Session state: {}", self.state);
        Ok(self.state)
    }
}

fn help_text() -> String {
    indoc::formatdoc! {"
        Commands:
          <description>                 sculpt one image, e.g. `a cute robot`
          variations <n> <description>  sculpt n variations (1-{MAX_VARIATIONS}) at once
          clear                         clear the screen
          help                          show this help
          quit | exit                   leave the session
    "}
}
