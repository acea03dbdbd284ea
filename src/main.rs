use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdin, stdout, Stdin, Write};

use connect4_engine::board::{Board, Cell, GameStatus, Side, Snapshot};
use connect4_engine::config::{Difficulty, GameConfig, GameMode};
use connect4_engine::engine::Engine;
use connect4_engine::{HEIGHT, WIDTH};

fn main() -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let config = read_config(&stdin)?;

    let mut board = Board::new();
    let mut engine = Engine::new();
    let mut current = Side::PlayerOne;

    // game loop
    loop {
        display(&board.snapshot()).expect("Failed to draw board!");

        match board.status() {
            GameStatus::InProgress => {}

            // end states
            GameStatus::Won(side) => {
                println!("{} wins!", side);
                if !read_yes_no(&stdin, "Play again? y/n: ")? {
                    break;
                }
                board.reset();
                current = Side::PlayerOne;
                continue;
            }
            GameStatus::Draw => {
                println!("Draw!");
                if !read_yes_no(&stdin, "Play again? y/n: ")? {
                    break;
                }
                board.reset();
                current = Side::PlayerOne;
                continue;
            }
        }

        let next_move =
            // computer player
            if config.mode.computer_controls(current) {
                println!("Computer is thinking...");
                stdout().flush().expect("Failed to flush to stdout!");

                // slow down play if both players are computers
                if config.mode == GameMode::ComputerComputer {
                    std::thread::sleep(std::time::Duration::new(1, 0));
                }

                let outcome = engine.choose_move(&mut board, current, config.max_depth())?;
                println!(
                    "Computer plays column {} (score {}, {} nodes searched)",
                    outcome.column + 1,
                    outcome.score,
                    outcome.nodes_visited
                );
                outcome.column

            // human player
            } else {
                print!("Move input > ");
                stdout().flush().expect("Failed to flush to stdout!");
                let mut input_str = String::new();
                stdin.read_line(&mut input_str)?;

                match input_str.trim().parse::<usize>() {
                    Ok(column @ 1..=WIDTH) => column - 1,
                    _ => {
                        println!("Invalid column: {}", input_str.trim());
                        continue;
                    }
                }
            };

        if let Err(err) = board.apply_move(next_move, current) {
            println!("{}", err);
            // try the move again
            continue;
        }
        current = current.opponent();
    }
    Ok(())
}

/// Prompts for the game mode and, when a computer seat is involved, the
/// difficulty
fn read_config(stdin: &Stdin) -> Result<GameConfig> {
    let mode = loop {
        let mut buffer = String::new();
        print!(
            "1: human vs human\n2: human vs computer\n3: computer vs human\n4: computer vs computer\nGame mode > "
        );
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.trim().parse::<u32>() {
            Ok(1) => break GameMode::HumanHuman,
            Ok(2) => break GameMode::HumanComputer,
            Ok(3) => break GameMode::ComputerHuman,
            Ok(4) => break GameMode::ComputerComputer,
            _ => println!("Unknown answer given"),
        }
    };

    let difficulty = if mode == GameMode::HumanHuman {
        // never consulted without a computer seat
        Difficulty::Intermediate
    } else {
        loop {
            let mut buffer = String::new();
            print!("1: beginner\n2: intermediate\n3: advanced\n4: expert\nDifficulty > ");
            stdout().flush().expect("failed to flush to stdout!");
            stdin.read_line(&mut buffer)?;
            match buffer.trim().parse::<u32>() {
                Ok(1) => break Difficulty::Beginner,
                Ok(2) => break Difficulty::Intermediate,
                Ok(3) => break Difficulty::Advanced,
                Ok(4) => break Difficulty::Expert,
                _ => println!("Unknown answer given"),
            }
        }
    };

    Ok(GameConfig { mode, difficulty })
}

fn read_yes_no(stdin: &Stdin, prompt: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{}", prompt);
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

/// Draws the board grid in place with colored discs
fn display(snapshot: &Snapshot) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..HEIGHT {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            let (pos_x, pos_y) = (origin_x + column as u16, origin_y - row as u16);

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match snapshot.cell(column, row) {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x + WIDTH as u16, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
