//! Epic Battle - Entry Point
//!
//! Text front end for the battle engine. Reads one command per line, prints
//! the engine's events, and waits out enemy turns on a tokio timer.

use epic_battle::battle::{run_pending, Game, GameEvent, Paced, TurnPhase};
use epic_battle::catalog::{ItemKey, SkillKey, WeaponKey, ITEMS, SKILLS, WEAPONS};
use epic_battle::core::error::Result;
use epic_battle::core::types::{Screen, Target};
use epic_battle::core::GameConfig;
use epic_battle::persistence::FileSlot;

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// Turn-based battles against ever stronger monsters
#[derive(Parser, Debug)]
#[command(name = "epic-battle")]
#[command(about = "Turn-based battle RPG in the terminal")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding the save slot
    #[arg(long, default_value = ".")]
    save_dir: PathBuf,

    /// TOML file overriding game tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the enemy thinking pause
    #[arg(long)]
    fast: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("epic_battle=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    if args.fast {
        config.turn_handoff_ms = 0;
        config.enemy_think_ms = 0;
    }
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "Epic Battle starting...");

    let mut scheduler = Paced::new()?;
    let mut slot = FileSlot::in_dir(&args.save_dir);
    let mut game = Game::new(config, seed)?;

    println!("\n=== EPIC BATTLE ===");
    print_help();
    render(&mut game);

    loop {
        print_status(&game);
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let mut words = input.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let arg = words.next().unwrap_or("");

        // Rejections are already in the event stream
        let _ = match command {
            "quit" | "q" => break,
            "help" | "h" => {
                print_help();
                Ok(())
            }
            "attack" | "a" => game.attack(),
            "guard" | "g" => game.guard(),
            "skill" | "k" => arg.parse::<SkillKey>().and_then(|key| game.use_skill(key)),
            "item" | "i" => arg.parse::<ItemKey>().and_then(|key| game.use_item(key)),
            "next" | "n" => game.next_battle(),
            "town" => game.return_to_town(),
            "visit" => parse_screen(arg).and_then(|screen| game.visit(screen)),
            "buy" => arg.parse::<ItemKey>().and_then(|key| game.buy_item(key)),
            "buyw" => arg.parse::<WeaponKey>().and_then(|key| game.buy_weapon(key)),
            "sell" => arg.parse::<WeaponKey>().and_then(|key| game.sell_weapon(key)),
            "equip" => arg.parse::<WeaponKey>().and_then(|key| game.equip_weapon(key)),
            "inn" => game.rest_at_inn(),
            "save" => game.save(&mut slot),
            "load" => game.load(&slot).map(|_| ()),
            "restart" => {
                game.restart();
                Ok(())
            }
            other => {
                println!("Unknown command '{}'. Type 'help'.", other);
                Ok(())
            }
        }
        .map_err(|error| {
            if !error.is_rejection() {
                tracing::warn!(%error, "command failed");
            }
        });

        render(&mut game);
        if run_pending(&mut game, &mut scheduler) > 0 {
            render(&mut game);
        }
    }

    tracing::info!("Epic Battle shutting down");
    Ok(())
}

fn parse_screen(name: &str) -> Result<Screen> {
    let screen = match name {
        "town" => Screen::Town,
        "items" | "shop" => Screen::ItemShop,
        "weapons" | "smith" => Screen::WeaponShop,
        "rack" => Screen::WeaponSelect,
        "inn" => Screen::Inn,
        "battle" => Screen::Battle,
        other => return Err(epic_battle::core::GameError::UnknownKey(other.to_string())),
    };
    Ok(screen)
}

fn render(game: &mut Game) {
    for event in game.drain_events() {
        match event {
            GameEvent::Log(message) => println!("{}", message),
            GameEvent::Damage {
                target,
                amount,
                critical,
                heal,
            } => {
                let who = match target {
                    Target::Player => "you",
                    Target::Enemy => "enemy",
                };
                let sign = if heal { "+" } else { "-" };
                let crit = if critical { "!" } else { "" };
                println!("    [{} {}{}{}]", who, sign, amount, crit);
            }
            GameEvent::BattleEnd { outcome, rewards } => {
                println!("=== {:?} ===", outcome);
                if let Some(rewards) = rewards {
                    println!(
                        "    gold +{} (combo bonus {}), exp +{}",
                        rewards.gold, rewards.combo_bonus, rewards.exp
                    );
                }
                println!("    'next' for another battle, 'town' to visit the town");
            }
            GameEvent::Wound { .. } | GameEvent::LevelUp { .. } | GameEvent::Rejected { .. } => {}
        }
    }
}

fn print_status(game: &Game) {
    let player = game.player();
    let state = game.state();
    println!(
        "\n{} Lv{} (P{} M{})  HP {}/{}  MP {}/{}  Gold {}  Combo {}  [{}]",
        player.name,
        state.level,
        player.physical_level,
        player.magical_level,
        player.hp,
        player.max_hp,
        player.mp,
        player.max_mp,
        state.score,
        player.combo,
        player.weapon().name,
    );
    if let Some(enemy) = game.enemy() {
        println!(
            "{} {}  HP {}/{}  DEF {}/{}",
            enemy.sprite,
            enemy.name,
            enemy.hp,
            enemy.max_hp,
            enemy.current_physical_defense,
            enemy.current_magical_defense
        );
    }
    if game.phase() == TurnPhase::PlayerActionable && game.enemy().is_some() {
        let items: Vec<String> = game
            .items()
            .iter()
            .map(|(key, count)| format!("{}x{}", key.as_str(), count))
            .collect();
        println!("Items: {}", items.join(" "));
    }
    if game.screen().is_town() {
        println!("Screen: {:?}", game.screen());
    }
}

fn print_help() {
    println!("Battle:  attack | guard | skill <key> | item <key>");
    println!("After:   next | town | restart");
    println!("Town:    visit <town|shop|smith|rack|inn|battle> | buy <item> | buyw <weapon>");
    println!("         sell <weapon> | equip <weapon> | inn");
    println!("Always:  save | load | help | quit");
    let skills: Vec<&str> = SKILLS.iter().map(|skill| skill.key.as_str()).collect();
    let items: Vec<&str> = ITEMS.iter().map(|item| item.key.as_str()).collect();
    let weapons: Vec<&str> = WEAPONS.iter().map(|weapon| weapon.key.as_str()).collect();
    println!("Skills:  {}", skills.join(", "));
    println!("Items:   {}", items.join(", "));
    println!("Weapons: {}", weapons.join(", "));
}
