use std::io::{BufRead, Write};

use surge_engine::chat::ChatCard;
use surge_engine::ports::{ChatSink, Notifier, PoolChoice, SpendChoice, SpendDialog};

/// Asks on the terminal. An empty answer or `q` cancels.
pub struct TerminalDialog<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalDialog<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        write!(self.output, "{}", question).ok()?;
        self.output.flush().ok()?;
        let mut line = String::new();
        self.input.read_line(&mut line).ok()?;
        let answer = line.trim();
        if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
            None
        } else {
            Some(answer.to_string())
        }
    }
}

impl<R: BufRead, W: Write> SpendDialog for TerminalDialog<R, W> {
    fn prompt(&mut self, choices: &[PoolChoice], con_mod: i32) -> Option<SpendChoice> {
        writeln!(self.output, "Healing Surge").ok()?;
        for (i, c) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, c.label).ok()?;
        }
        let picked = loop {
            let answer = self.ask("Class / Hit Dice: ")?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => break &choices[n - 1],
                _ => writeln!(self.output, "pick 1-{}", choices.len()).ok()?,
            }
        };
        writeln!(self.output, "Adds CON mod ({:+}) to each die.", con_mod).ok()?;
        let count = loop {
            let answer = self.ask("Dice to Spend: ")?;
            match answer.parse::<i32>() {
                Ok(n) => break n,
                Err(_) => writeln!(self.output, "enter a number").ok()?,
            }
        };
        Some(SpendChoice { pool_id: picked.id.clone(), count })
    }
}

pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn warn(&mut self, message: &str) {
        eprintln!("warning: {}", message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }
}

/// Prints cards as they arrive, or holds them for JSON output.
pub struct StdoutChat {
    pub json: bool,
    pub cards: Vec<ChatCard>,
}

impl ChatSink for StdoutChat {
    fn post(&mut self, card: ChatCard) {
        if !self.json {
            print!("{}", card);
        }
        self.cards.push(card);
    }
}
