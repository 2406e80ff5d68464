use chess_engine::constants::DEFAULT_SEARCH_DEPTH;
use chess_engine::engine::{Engine, SearchSettings};
use chess_engine::error::EngineError;
use chess_engine::position::Position;
use chess_engine::self_test::{full_test_all, round_trip_all};
use chess_engine::types::{GameResult, Move, Side, Square, Wing};
use clap::{Parser, ValueEnum};
use rand::Rng;
use std::io::{self, Write};

/// Plies explored by the "full" command
const FULL_TEST_DEPTH: u32 = 2;

fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let len = s.len();

    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    result
}

struct CLI {
    position: Position,
    engine: Engine,
    computer_side: Option<Side>,
    display_enabled: bool,
}

impl CLI {
    fn new(settings: SearchSettings, computer_side: Option<Side>) -> Self {
        Self {
            position: Position::new(),
            engine: Engine::new(settings),
            computer_side,
            display_enabled: true,
        }
    }

    fn show_help(&self) {
        println!("\n======================= INFORMATION ======================");
        println!("h or help   - Displays help on the commands");
        println!("d or dd     - Displays board and toggles display setting");
        println!("moves       - Displays a list of legal moves");
        println!("list <sq>   - Displays the legal moves of the piece on a square");
        println!("eval        - Displays the static evaluation");
        println!("flags       - Displays the castle rights");
        println!("hist        - Displays the move history");
        println!("q or quit   - Quits the program");
        println!("================= CONTROLLING THE ENGINE =================");
        println!("go          - Choose a side and play against the computer");
        println!("new         - Starts a new game");
        println!("p or play   - The computer plays the side to move");
        println!("off         - Turns the computer player off");
        println!("undo        - Takes back the last move (both, against the computer)");
        println!("======================= DIAGNOSTICS ======================");
        println!("test        - Applies and takes back every legal move");
        println!("full        - Checks take-backs {} plies deep", FULL_TEST_DEPTH + 1);
        println!("===================== CONFIGURATION ======================");
        println!("fen <FEN>   - Loads a FEN string");
        println!("sd <depth>  - Sets the search depth");
    }

    fn display_board(&self) {
        if self.display_enabled {
            println!("\n{}", self.position);
        }
    }

    /// Returns true when the game is over
    fn print_result(&mut self, result: GameResult) -> bool {
        match result {
            GameResult::InProgress => false,
            GameResult::Checkmate(winner) => {
                self.display_board();
                println!("\nGAME OVER");

                if winner == Side::White {
                    println!("{{White mates}}");
                } else {
                    println!("{{Black mates}}");
                }

                self.computer_side = None;
                true
            }
            GameResult::Stalemate => {
                self.display_board();
                println!("\n{{Stalemate}}");
                self.computer_side = None;
                true
            }
        }
    }

    fn display_legal_moves(&self, moves: Vec<Move>) {
        let mut moves: Vec<String> = moves.iter().map(Move::to_string).collect();
        moves.sort();

        for (index, move_str) in moves.iter().enumerate() {
            print!("{} ", move_str);
            if (index + 1) % 8 == 0 {
                println!();
            }
        }
        println!();
    }

    fn display_flags(&self) {
        for (side, name) in [(Side::White, "WHITE"), (Side::Black, "BLACK")] {
            for (wing, wing_name) in [(Wing::Kingside, "KINGSIDE"), (Wing::Queenside, "QUEENSIDE")] {
                if self.position.castle.has(side, wing) {
                    println!("CAN_{}_CASTLE_{}", name, wing_name);
                }
            }
        }
    }

    fn run_main_loop(&mut self) {
        self.display_board();

        loop {
            println!("\n-------------------------------");
            println!(
                "*   Ply: {} | To move: {:?}   *",
                self.position.history.len(),
                self.position.side
            );
            println!("-------------------------------");

            // Computer's turn
            if self.computer_side == Some(self.position.side) {
                println!("\nComputer is thinking...");

                if self.make_computer_move() {
                    let game_result = self.position.game_result();
                    if !self.print_result(game_result) {
                        self.display_board();
                    }
                } else {
                    println!("(No legal moves)");
                    self.computer_side = None;
                }

                continue;
            }

            print!("\nMove OR command > ");
            if io::stdout().flush().is_err() {
                return;
            }

            let mut input = String::new();
            match io::stdin().read_line(&mut input) {
                Ok(0) => return, // EOF
                Ok(_) => {}
                Err(_) => return,
            }

            let command = input.trim().to_lowercase();

            // COMMANDS WITHOUT PARAMETERS
            match command.as_str() {
                "" => continue,
                "d" => {
                    println!("\n{}", self.position);
                    continue;
                }
                "dd" => {
                    self.display_enabled = !self.display_enabled;

                    if self.display_enabled {
                        println!("\nBoard display enabled");
                        self.display_board();
                    } else {
                        println!("\nBoard display disabled");
                    }
                    continue;
                }
                "go" => {
                    self.handle_go_command();
                    continue;
                }
                "h" | "help" => {
                    self.show_help();
                    continue;
                }
                "moves" => {
                    println!("\nLegal moves:");
                    let moves = self.position.legal_moves();
                    self.display_legal_moves(moves);
                    continue;
                }
                "eval" => {
                    println!("\nBoard score: {}", self.position.evaluate());
                    continue;
                }
                "flags" => {
                    self.display_flags();
                    continue;
                }
                "hist" => {
                    for move_ in &self.position.history {
                        println!("{}", move_);
                    }
                    continue;
                }
                "test" => {
                    match round_trip_all(&mut self.position) {
                        Ok(()) => println!("\nAll take-backs restored the position"),
                        Err(e) => println!("\nTest failed: {}", e),
                    }
                    continue;
                }
                "full" => {
                    println!(
                        "\nPerforming full test in {} levels...",
                        FULL_TEST_DEPTH + 1
                    );
                    match full_test_all(&mut self.position, FULL_TEST_DEPTH) {
                        Ok(()) => println!("Test passed successfully!"),
                        Err(e) => println!("Test failed: {}", e),
                    }
                    continue;
                }
                "new" => {
                    self.position = Position::new();
                    self.display_board();
                    continue;
                }
                "p" | "play" => {
                    self.computer_side = Some(self.position.side);
                    continue;
                }
                "off" => {
                    self.computer_side = None;
                    continue;
                }
                "q" | "quit" | "exit" => {
                    println!("\nProgram exiting");
                    break;
                }
                "undo" => {
                    let plies = if self.computer_side.is_some() { 2 } else { 1 };

                    if self.position.history.len() < plies {
                        println!("\nNo moves to undo");
                        continue;
                    }

                    for _ in 0..plies {
                        self.position.undo();
                    }
                    self.display_board();
                    continue;
                }
                _ => {}
            }

            // COMMANDS WITH PARAMETERS
            if let Some(fen_str) = input.trim().strip_prefix("fen ") {
                match Position::from_fen(fen_str) {
                    Ok(position) => {
                        self.position = position;
                        self.display_board();
                        println!("FEN loaded successfully");
                    }
                    Err(e) => println!("Error loading FEN: {}", e),
                }
                continue;
            }

            if let Some(depth) = command.strip_prefix("sd ") {
                if let Ok(depth) = depth.trim().parse::<i32>() {
                    self.engine.settings.depth = depth;
                    println!("\nSearch depth set to {}", depth);
                }
                continue;
            }

            if let Some(square) = command.strip_prefix("list ") {
                match square.trim().parse::<Square>() {
                    Ok(square) if self.position.board.get(square).is_some() => {
                        let moves = self.position.legal_moves_from(square);
                        self.display_legal_moves(moves);
                    }
                    Ok(_) => println!("\nERROR: No piece at the location asked."),
                    Err(e) => println!("\n{}", e),
                }
                continue;
            }

            match self.position.play_move_str(&command) {
                Ok(_) => {
                    let game_result = self.position.game_result();
                    if !self.print_result(game_result) {
                        self.display_board();
                    }
                }
                Err(EngineError::IllegalMove(_)) => {
                    println!("\n\x1b[31m--- ILLEGAL MOVE! ---\x1b[0m")
                }
                Err(_) => println!("\nINVALID COMMAND!"),
            }
        }
    }

    fn handle_go_command(&mut self) {
        println!("\nChoose your side:");
        println!("1. White");
        println!("2. Black");
        println!("3. Random");
        print!("\nEnter choice (1-3) > ");
        if io::stdout().flush().is_err() {
            return;
        }

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return;
        }

        println!();

        let player_side = match input.trim() {
            "1" => Side::White,
            "2" => Side::Black,
            "3" => {
                let side = match rand::thread_rng().gen_bool(0.5) {
                    true => Side::White,
                    false => Side::Black,
                };
                println!("You are playing as {:?}", side);
                side
            }
            _ => {
                println!("Invalid choice. Defaulting to White.");
                Side::White
            }
        };

        self.computer_side = Some(player_side.opponent());
    }

    fn make_computer_move(&mut self) -> bool {
        let Some(result) = self.engine.choose_best_move(&mut self.position) else {
            return false;
        };

        self.position.apply(result.best_move);

        println!("\n┌─────────────── SEARCH STATISTICS ───────────────┐");
        println!(
            "│ Depth: {:>4}   Boards: {:>12}   Score: {:>6} │",
            result.depth,
            format_with_commas(result.evaluated),
            result.evaluation
        );
        println!("└─────────────────────────────────────────────────┘");

        println!("\nComputer plays: \x1b[32m{}\x1b[0m", result.best_move);

        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ComputerSide {
    White,
    Black,
    None,
}

impl ComputerSide {
    fn side(self) -> Option<Side> {
        match self {
            ComputerSide::White => Some(Side::White),
            ComputerSide::Black => Some(Side::Black),
            ComputerSide::None => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search depth in plies (quiet moves consume two, captures one)
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: i32,

    /// Seed for the tie-break generator; drawn from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Side played by the computer
    #[arg(long, value_enum, default_value_t = ComputerSide::Black)]
    ai: ComputerSide,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn settings(&self) -> SearchSettings {
        SearchSettings {
            depth: self.depth,
            seed: self.seed,
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    println!("\n==============================");
    println!("|   Reversible Chess Engine  |");
    println!("==============================\n");
    println!("\n\"h or help\" displays a list of commands\n");

    let mut cli = CLI::new(args.settings(), args.ai.side());
    cli.run_main_loop();
}
