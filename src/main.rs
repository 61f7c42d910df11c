use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdin, stdout, Write};
use std::time::Duration;

use connect4_minimax::board::{BoardState, Cell, Player};
use connect4_minimax::search::SearchEngine;
use connect4_minimax::win::{is_draw, is_winner};
use connect4_minimax::{HEIGHT, WIDTH};

/// Time budget for each AI move's iterative deepening
const TIME_LIMIT: Duration = Duration::from_secs(8);

fn display(board: &BoardState) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..HEIGHT {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for column in 0..WIDTH {
        for row in 0..HEIGHT {
            let (pos_x, pos_y) = (origin_x + column as u16, origin_y - row as u16);

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match board.cell(column, row) {
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

fn main() -> Result<()> {
    let mut board = BoardState::new();

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    // choose the AI search depth
    let difficulty = loop {
        let mut buffer = String::new();
        print!("Enter difficulty (1-50): ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.trim().parse::<usize>() {
            Ok(depth @ 1..=50) => break depth,
            Ok(_) => println!("Difficulty should be a number between 1 and 50."),
            Err(_) => println!("Invalid difficulty, please enter a number between 1 and 50."),
        }
    };

    let mut ai_players = (false, false);

    // choose AI control of player 1
    loop {
        let mut buffer = String::new();
        print!("Is player 1 AI controlled? y/n: ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => {
                ai_players.0 = true;
                break;
            }
            Some(_letter @ 'n') => break,
            _ => println!("Unknown answer given"),
        }
    }

    // choose AI control of player 2
    loop {
        let mut buffer = String::new();
        print!("Is player 2 AI controlled? y/n: ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => {
                ai_players.1 = true;
                break;
            }
            Some(_letter @ 'n') => break,
            _ => println!("Unknown answer given"),
        }
    }

    // one engine per AI side, so their move-ordering tables and node
    // counters stay independent
    let mut engines = (
        SearchEngine::new(difficulty, TIME_LIMIT),
        SearchEngine::new(difficulty, TIME_LIMIT),
    );

    // game loop
    loop {
        display(&board).expect("Failed to draw board!");

        if is_winner(&board, Player::One) {
            println!("Player 1 wins!");
            break;
        }
        if is_winner(&board, Player::Two) {
            println!("Player 2 wins!");
            break;
        }
        if is_draw(&board) {
            println!("Draw!");
            break;
        }

        let player = board.current_player();
        let ai_turn = match player {
            Player::One => ai_players.0,
            Player::Two => ai_players.1,
        };

        let next_move =
            // AI player
            if ai_turn {
                println!("AI is thinking...");
                stdout().flush().expect("Failed to flush to stdout!");

                // slow down play if both players are AI
                if ai_players == (true, true) {
                    std::thread::sleep(Duration::new(3, 0));
                }

                let engine = match player {
                    Player::One => &mut engines.0,
                    Player::Two => &mut engines.1,
                };
                let (best_move, score) = engine.choose_move(&mut board, true, true)?;

                let player_number = if player == Player::One { 1 } else { 2 };
                if score >= 1.0 {
                    println!(
                        "Player {} can force a win within {} moves.",
                        player_number, engine.stats.reached_depth
                    );
                } else if score <= -1.0 {
                    println!(
                        "Player {} is losing within {} moves.",
                        player_number, engine.stats.reached_depth
                    );
                } else {
                    println!(
                        "No decisive line within {} moves.",
                        engine.stats.reached_depth
                    );
                }
                println!(
                    "Searched {} nodes, {} cutoffs ({:.1}% of nodes), depth {} completed.",
                    engine.stats.nodes_searched,
                    engine.stats.nodes_pruned,
                    engine.stats.cutoff_ratio().unwrap_or(0.0) * 100.0,
                    engine.stats.reached_depth
                );

                println!("Best move: {}", best_move + 1);
                best_move

            // human player
            } else {
                print!("Move input > ");
                stdout().flush().expect("Failed to flush to stdout!");
                let mut input_str = String::new();
                stdin.read_line(&mut input_str)?;

                match input_str.trim().parse::<usize>() {
                    Ok(column @ 1..=WIDTH) => column - 1,
                    _ => {
                        println!("Invalid move: {}", input_str.trim());
                        continue;
                    }
                }
            };

        if let Err(err) = board.commit(next_move) {
            println!("{}", err);
            // try the move again
            continue;
        }
    }
    Ok(())
}
