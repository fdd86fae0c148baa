//! Digger: dig through layers of earth for gems
//!
//! Command-line frontend. Each invocation loads the saved game (or starts a
//! new one), performs one command and saves again.

mod console;

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use dg_core::shop::{self, ShopCategory};
use dg_core::{DiggerOptions, Game, GameState, InventoryCategory, SortMethod};
use dg_save::{AutoSaver, FileStore, load_game, new_game};

use console::{
    ConsoleEvents, render_dig_progress, render_inventory_item, render_layer, render_shop_item,
    render_status,
};

/// Digger mining game
#[derive(Parser, Debug)]
#[command(name = "digger")]
#[command(author, version, about = "Digger - dig deeper, find gems!", long_about = None)]
struct Args {
    /// Options file (default: ~/.diggerrc)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Fixed RNG seed for new layers
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Directory holding the save file
    #[arg(long = "save-dir")]
    save_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Throw away the saved game and start over
    New,
    /// Show depth, resources and the current layer
    Status,
    /// Hit one cell, or every cell until the layer is cleared
    Dig {
        /// Cell index, row-major from 0
        index: Option<usize>,
        #[arg(long = "all", conflicts_with = "index")]
        all: bool,
    },
    /// Move to the next layer once the current one is cleared
    Deeper,
    /// List what the shop offers right now
    Shop {
        #[arg(long = "category", default_value = "all")]
        category: ShopCategory,
    },
    /// Buy a shop item by id
    Buy { id: String },
    /// List the inventory
    Inventory {
        #[arg(long = "category", default_value = "all")]
        category: InventoryCategory,
        #[arg(long = "sort", default_value = "default")]
        sort: SortMethod,
    },
    /// Clear and descend through several layers, auto-saving along the way
    Play {
        #[arg(long = "layers", default_value_t = 1)]
        layers: u32,
    },
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let options = load_options(&args)?;
    let mut store = match &options.save_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::default_location(),
    };
    log::debug!("save directory: {}", store.dir().display());

    let command = args.command.unwrap_or(Command::Status);

    let state = match command {
        Command::New => {
            new_game(&mut store);
            None
        }
        _ => load_game(&store),
    };
    let mut game = match state {
        Some(state) => Game::resume(state, &options, ConsoleEvents::default()),
        None => {
            println!("Starting a new game.");
            Game::from_options(&options, ConsoleEvents::default())
        }
    };

    let mut saver = AutoSaver::from_options(&options, Instant::now());
    run_command(&mut game, command, &mut saver, &mut store);

    if !saver.shutdown(&mut store, game.state()) {
        eprintln!("Warning: the game could not be saved.");
    }
    Ok(())
}

/// rc file, then command-line overrides
fn load_options(args: &Args) -> io::Result<DiggerOptions> {
    let path = args
        .config
        .clone()
        .or_else(|| dirs::home_dir().map(|home| home.join(".diggerrc")))
        .filter(|path| path.exists());

    let mut options = match path {
        Some(path) => {
            log::info!("reading options from {}", path.display());
            DiggerOptions::load_from_file(&path).map_err(io::Error::other)?
        }
        None => DiggerOptions::default(),
    };

    if args.seed.is_some() {
        options.seed = args.seed;
    }
    if let Some(dir) = &args.save_dir {
        options.save_dir = Some(dir.clone());
    }
    Ok(options)
}

fn run_command(
    game: &mut Game<ConsoleEvents>,
    command: Command,
    saver: &mut AutoSaver,
    store: &mut FileStore,
) {
    match command {
        Command::New | Command::Status => print!("{}", render_status(game.state())),
        Command::Dig { index: Some(index), .. } => dig_one(game, index),
        Command::Dig { all: true, .. } => {
            let broken = game.dig_all();
            println!("Broke {} cells.", broken);
            print!("{}", render_layer(&game.state().layer));
        }
        Command::Dig { .. } => println!("Give a cell index or --all."),
        Command::Deeper => match game.dig_deeper() {
            Some(depth) => {
                println!("You descend to depth {}.", depth);
                print!("{}", render_layer(&game.state().layer));
            }
            None => println!("Clear every cell before digging deeper."),
        },
        Command::Shop { category } => list_shop(game.state(), category),
        Command::Buy { id } => {
            // the listener prints the outcome
            let _ = game.purchase(&id);
        }
        Command::Inventory { category, sort } => list_inventory(game.state(), category, sort),
        Command::Play { layers } => play(game, layers, saver, store),
    }
}

fn dig_one(game: &mut Game<ConsoleEvents>, index: usize) {
    match game.dig(index) {
        Some(outcome) if outcome.revealed.is_some() => {}
        Some(outcome) if outcome.result.durability_remaining > 0 => {
            if let Some(line) = render_dig_progress(&game.state().layer, index) {
                println!("{}", line);
            }
        }
        Some(_) => println!("Cell {} is already dug out.", index),
        None => println!("There is no cell {} on this layer.", index),
    }
}

fn list_shop(state: &GameState, category: ShopCategory) {
    println!("You have {} gems.", state.resources.gems);
    let items = shop::items_in_category(state, category);
    if items.is_empty() {
        println!("Nothing for sale right now.");
    }
    for item in items {
        println!("{}", render_shop_item(state, item));
    }
}

fn list_inventory(state: &GameState, category: InventoryCategory, sort: SortMethod) {
    let inventory = &state.inventory;
    println!(
        "{} of {} slots used, total value {}",
        inventory.slot_count(),
        inventory.max_capacity(),
        inventory.total_value()
    );
    for (index, item) in inventory.view(category, sort) {
        println!("{}", render_inventory_item(index, item));
    }
}

fn play(game: &mut Game<ConsoleEvents>, layers: u32, saver: &mut AutoSaver, store: &mut FileStore) {
    game.events_mut().quiet = true;
    for _ in 0..layers {
        let cells = game.state().layer.cells.len();
        for index in 0..cells {
            while let Some(outcome) = game.dig(index) {
                saver.poll(Instant::now(), store, game.state());
                if outcome.result.durability_remaining == 0 {
                    break;
                }
            }
        }
        if let Some(depth) = game.dig_deeper() {
            println!("Reached depth {}.", depth);
        }
    }
    game.events_mut().quiet = false;
    print!("{}", render_status(game.state()));
}
