use std::fmt;
use std::io::{self, BufRead, Write};

use minado_core::{Coord, Coord2, Game, GameState};

/// One well-formed player action.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Quit,
}

/// Parses a command line: `r ROW COL`, `f ROW COL` or `q`.
///
/// Anything else, including non-numeric coordinates or a wrong token count,
/// is rejected here so the engine only ever sees well-formed integers.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut tokens = line.split_whitespace();
    let action = tokens.next()?;

    let command = match action {
        "q" | "quit" => Command::Quit,
        "r" | "f" => {
            let row: Coord = tokens.next()?.parse().ok()?;
            let col: Coord = tokens.next()?.parse().ok()?;
            if action == "r" {
                Command::Reveal((row, col))
            } else {
                Command::Flag((row, col))
            }
        }
        _ => return None,
    };

    if tokens.next().is_some() {
        return None;
    }
    Some(command)
}

/// Renders the board the way the terminal shows it.
pub struct BoardDisplay<'a>(pub &'a Game);

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "========================================";

        let game = self.0;
        let (rows, cols) = game.size();

        writeln!(f, "{RULE}")?;
        writeln!(f, "Minesweeper {rows}x{cols}")?;
        writeln!(f, "{RULE}")?;

        write!(f, "   ")?;
        for col in 0..cols {
            write!(f, "{}", col % 10)?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{row:>2} ")?;
            for col in 0..cols {
                write!(f, "{}", game.view_at((row, col)).symbol())?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "Legend: . = hidden, F = flag, * = mine, space = clear, 1-8 = adjacent mines"
        )?;
        writeln!(f, "Mines left: {}", game.mines_left())
    }
}

/// Drives one game to completion over the given streams.
pub fn run<R: BufRead, W: Write>(mut game: Game, input: R, output: &mut W) -> io::Result<()> {
    writeln!(output, "Commands: r ROW COL = reveal, f ROW COL = flag, q = quit")?;
    writeln!(output, "{}", BoardDisplay(&game))?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let Some(command) = parse_command(&line?) else {
            writeln!(output, "Invalid command. Use 'r ROW COL', 'f ROW COL' or 'q'")?;
            continue;
        };

        match command {
            Command::Quit => {
                writeln!(output, "Thanks for playing!")?;
                return Ok(());
            }
            Command::Reveal(coords) => {
                game.reveal(coords);
            }
            Command::Flag(coords) => {
                game.toggle_flag(coords);
            }
        }

        if game.state() == GameState::Lost {
            game.expose_mines();
            writeln!(output, "{}", BoardDisplay(&game))?;
            writeln!(output, "Game over, you hit a mine!")?;
            return Ok(());
        }

        // win detection is driven from the loop, not read off the reveal outcome
        if game.check_win() {
            writeln!(output, "{}", BoardDisplay(&game))?;
            writeln!(output, "Congratulations, you won!")?;
            return Ok(());
        }

        writeln!(output, "{}", BoardDisplay(&game))?;
    }
}
