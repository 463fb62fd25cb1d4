use std::{io::{stdout, Write}, thread, time::Duration};

use rand::{RngCore, SeedableRng, rngs::OsRng};
use rand_xoshiro::Xoshiro256PlusPlus as BaseRng;
use structopt::StructOpt;

mod agent;
mod board;
mod opts;

use agent::Agent;
use board::{Board, Dim, Error};
use opts::{Def, Opts};

fn print_board<W: Write>(output: &mut W, board: &Board, agent: &Agent, turn: usize) {
    write!(output, "{}{}", termion::clear::All, termion::cursor::Goto(1, 1))
        .expect("write to be fine.");
    let snippet = board.display(agent.moves_made(), agent.mines());
    for row in &snippet[..] {
        for cell in &row[..] {
            write!(output, "{} ", cell).expect("write to be fine.");
        }
        writeln!(output).expect("write to be fine.");
    }
    writeln!(
        output,
        "turn {}: {} probed, {} flagged, {} safe in hand",
        turn,
        agent.moves_made().len(),
        agent.mines().len(),
        agent.safes().difference(agent.moves_made()).count(),
    )
    .expect("write to be fine.");
    output.flush().expect("flush to be fine.");
}

fn main() {
    let cfg = Opts::from_args();

    let mut seed = [0; 32];
    match cfg.seed {
        Some(s) => seed[..8].copy_from_slice(&s.to_le_bytes()),
        None => OsRng.fill_bytes(&mut seed),
    }
    // Split the master seed so the board layout and the fallback guesses
    // replay independently.
    let mut randos = BaseRng::from_seed(seed);
    let mut sub_seeds = [[0; 32]; 2];
    randos.fill_bytes(&mut sub_seeds[0]);
    randos.fill_bytes(&mut sub_seeds[1]);

    let (dim, num_mines) = match cfg.def() {
        Def::Preset(preset) => preset.board(),
        Def::Descrip { width, height: Some(height), mines } => (Dim::Rect(width, height), mines),
        Def::Descrip { width, height: None, mines } => (Dim::Square(width), mines),
    };
    let mut board = Board::new_seeded(dim, num_mines, sub_seeds[0])
        .expect("board to be created without a hitch.");
    let mut guess_rng = BaseRng::from_seed(sub_seeds[1]);
    let mut agent = Agent::new(board.h(), board.w());

    let mut stdout = stdout();
    let mut turn = 0;
    loop {
        for &mine in agent.mines() {
            board.flag(mine);
        }
        print_board(&mut stdout, &board, &agent, turn);

        if board.won() || board.is_swept(agent.moves_made()) {
            println!("Board cleared in {} turns. Congratulations!", turn);
            break;
        }

        let (loc, certain) = match agent.make_safe_move() {
            Some(loc) => (loc, true),
            None => match agent.make_random_move(&mut guess_rng) {
                Some(loc) => (loc, false),
                None => {
                    println!("No moves left to make.");
                    break;
                }
            },
        };
        println!(
            "probing ({}, {}) -- {}",
            loc.0,
            loc.1,
            if certain { "deduced safe" } else { "guessing" },
        );

        match board.probe(loc) {
            Ok(clue) => agent.add_knowledge(loc, clue),
            Err(Error::Dead) => {
                println!("That was a mine. You have died!");
                break;
            }
            Err(Error::OOB) => unreachable!("the agent only proposes cells on the board."),
        }

        turn += 1;
        thread::sleep(Duration::from_millis(cfg.delay));
    }
}
