use std::str::FromStr;

use structopt::StructOpt;

use crate::board::Dim;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Preset {
    Beginner,
    Intermediate,
    Advanced,
}

impl Preset {
    /// The classic board shapes.
    pub fn board(self) -> (Dim, u64) {
        match self {
            Preset::Beginner => (Dim::Square(9), 10),
            Preset::Intermediate => (Dim::Square(16), 40),
            Preset::Advanced => (Dim::Rect(30, 16), 99),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Preset::Beginner),
            "intermediate" => Ok(Preset::Intermediate),
            "advanced" => Ok(Preset::Advanced),
            other => Err(format!("unknown preset: {}", other)),
        }
    }
}

pub enum Def {
    Preset(Preset),
    Descrip {
        width: usize,
        height: Option<usize>,
        mines: u64,
    },
}

#[derive(StructOpt)]
#[structopt(name = "minesweep-agent", about = "Watch a knowledge-based agent play minesweeper.")]
pub struct Opts {
    /// Preset board: beginner, intermediate, or advanced.
    #[structopt(short, long)]
    pub preset: Option<Preset>,
    /// Board width. Also the height, unless one is given.
    #[structopt(short, long, default_value = "8", conflicts_with = "preset")]
    pub width: usize,
    /// Board height.
    #[structopt(long, conflicts_with = "preset")]
    pub height: Option<usize>,
    /// Number of mines to bury.
    #[structopt(short, long, default_value = "8", conflicts_with = "preset")]
    pub mines: u64,
    /// Seed for deterministic replay of board and guesses.
    #[structopt(short, long)]
    pub seed: Option<u64>,
    /// Pause between moves, in milliseconds.
    #[structopt(short, long, default_value = "150")]
    pub delay: u64,
}

impl Opts {
    pub fn def(&self) -> Def {
        match self.preset {
            Some(preset) => Def::Preset(preset),
            None => Def::Descrip {
                width: self.width,
                height: self.height,
                mines: self.mines,
            },
        }
    }
}
