use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use fairmove_game::{
    rules_matrix, Commitment, Frontend, GameError, GameOutcome, MenuChoice, MoveSet, Result,
    Reveal, Verdict,
};
use std::io::{BufRead, IsTerminal};

const DRAW_COLOR: Color = Color::Rgb { r: 0xED, g: 0xD1, b: 0x9C };
const LOSE_COLOR: Color = Color::Rgb { r: 0xB5, g: 0x7F, b: 0x7F };
const WIN_COLOR: Color = Color::Rgb { r: 0x7F, g: 0xB5, b: 0xB5 };

/// Help table: one row per user move, one column per computer move.
pub fn rules_table(moves: &MoveSet, color: bool) -> Table {
    let mut header = vec![Cell::new("User ↓ \\ PC →")];
    header.extend(moves.iter().map(Cell::new));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header);

    for (name, row) in moves.iter().zip(rules_matrix(moves.len())) {
        let mut cells = vec![Cell::new(name)];
        cells.extend(row.into_iter().map(|verdict| verdict_cell(verdict, color)));
        table.add_row(cells);
    }

    table
}

fn verdict_cell(verdict: Verdict, color: bool) -> Cell {
    let cell = Cell::new(verdict.as_str());
    if !color {
        return cell;
    }
    match verdict {
        Verdict::Win => cell.fg(WIN_COLOR),
        Verdict::Lose => cell.fg(LOSE_COLOR),
        Verdict::Draw => cell.fg(DRAW_COLOR),
    }
}

pub fn menu_lines(moves: &MoveSet) -> Vec<String> {
    let mut lines = vec!["Available moves:".to_string()];
    lines.extend(
        moves
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{} - {}", i + 1, name)),
    );
    lines.push(format!("{} - Exit", MenuChoice::EXIT_KEY));
    lines.push(format!("{} - Help", MenuChoice::HELP_KEY));
    lines
}

/// Single-quote for a POSIX shell, so the hint can be pasted as is.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

pub fn verify_hint(reveal: &Reveal, commitment: &Commitment) -> String {
    format!(
        "Verify with: fairmove verify --key {} --move {} --hmac {}",
        reveal.key,
        shell_quote(&reveal.move_name),
        commitment
    )
}

pub fn outcome_lines(outcome: &GameOutcome, show_verify_hint: bool) -> Vec<String> {
    let mut lines = vec![
        format!("Your move: {}", outcome.user_move),
        format!("Computer move: {}", outcome.opponent_move),
        outcome.verdict.message().to_string(),
        format!("HMAC key: {}", outcome.reveal.key),
    ];
    if show_verify_hint {
        lines.push(verify_hint(&outcome.reveal, &outcome.commitment));
    }
    lines
}

pub fn exit_lines(reveal: Option<&Reveal>) -> Vec<String> {
    match reveal {
        Some(reveal) => vec![
            "Game abandoned.".to_string(),
            format!("Computer move: {}", reveal.move_name),
            format!("HMAC key: {}", reveal.key),
        ],
        None => vec!["Game abandoned. Goodbye!".to_string()],
    }
}

/// Console frontend. Prompts through dialoguer on a terminal and falls back
/// to plain line reads when stdin is piped.
pub struct TerminalFrontend {
    color: bool,
    interactive: bool,
}

impl TerminalFrontend {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            interactive: std::io::stdin().is_terminal(),
        }
    }
}

impl Frontend for TerminalFrontend {
    fn show_commitment(&mut self, commitment: &Commitment) -> Result<()> {
        println!("HMAC: {}", commitment);
        Ok(())
    }

    fn show_menu(&mut self, moves: &MoveSet) -> Result<()> {
        for line in menu_lines(moves) {
            println!("{}", line);
        }
        Ok(())
    }

    fn show_help(&mut self, moves: &MoveSet) -> Result<()> {
        println!("{}", rules_table(moves, self.color));
        Ok(())
    }

    fn read_choice(&mut self) -> Result<String> {
        if self.interactive {
            let line = dialoguer::Input::<String>::new()
                .with_prompt("Enter your move")
                .allow_empty(true)
                .interact_text()
                .map_err(|e| GameError::dialog(e.to_string()))?;
            return Ok(line);
        }

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(GameError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before a move was chosen",
            )));
        }
        Ok(line)
    }

    fn reject_input(&mut self, input: &str) -> Result<()> {
        tracing::debug!("Rejected menu input {:?}", input.trim());
        println!("Incorrect input. Please select one of the provided options.");
        Ok(())
    }
}
