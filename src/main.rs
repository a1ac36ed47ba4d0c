use chrono::Utc;
use hero_idle::build_info;
use hero_idle::character::upgrades::{can_afford_upgrade, UpgradeTrackId};
use hero_idle::combat::logic::CombatEvent;
use hero_idle::combat::skills::{skill_ready, SkillId};
use hero_idle::config::EngineConfig;
use hero_idle::core::{Game, GameState, TickEvent, TickResult};
use hero_idle::persistence::{resume_at, FileStore, KeyValueStore, LoadOrigin};
use hero_idle::runtime::{Autosaver, Engine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

const MAX_SLEEP: Duration = Duration::from_millis(50);

struct Options {
    config: EngineConfig,
    autoplay: bool,
}

fn print_help() {
    println!("Hero Idle - headless idle RPG simulation\n");
    println!("Usage: hero-idle [options]\n");
    println!("Options:");
    println!("  --seconds N      Stop after N seconds of game time");
    println!("  --config PATH    Load engine settings from a JSON file");
    println!("  --save-dir PATH  Directory for save files (default ~/.hero-idle)");
    println!("  --seed N         Seed the random source");
    println!("  --fast           Run game time as fast as possible");
    println!("  --auto           Use skills and buy upgrades automatically");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'hero-idle --help' for usage.");
    std::process::exit(1);
}

fn parse_number(flag: &str, value: Option<String>) -> u64 {
    match value.map(|v| v.parse::<u64>()) {
        Some(Ok(n)) => n,
        _ => usage_error(&format!("{} expects a non-negative integer", flag)),
    }
}

fn parse_args() -> Options {
    let mut args = std::env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;
    let mut seconds = None;
    let mut seed = None;
    let mut save_dir: Option<PathBuf> = None;
    let mut fast = false;
    let mut autoplay = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--config" => match args.next() {
                Some(path) => config_path = Some(path.into()),
                None => usage_error("--config expects a path"),
            },
            "--save-dir" => match args.next() {
                Some(dir) => save_dir = Some(dir.into()),
                None => usage_error("--save-dir expects a path"),
            },
            "--seconds" => seconds = Some(parse_number("--seconds", args.next())),
            "--seed" => seed = Some(parse_number("--seed", args.next())),
            "--fast" => fast = true,
            "--auto" => autoplay = true,
            other => usage_error(&format!("Unknown option: {}", other)),
        }
    }

    // Flags win over the config file
    let mut config = config_path
        .map(|path| EngineConfig::load_or_default(&path))
        .unwrap_or_default();
    if seconds.is_some() {
        config.run_seconds = seconds;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    if save_dir.is_some() {
        config.save_dir = save_dir;
    }
    config.fast_forward |= fast;

    if !config.is_valid() {
        usage_error("Timer periods in the config must be non-zero");
    }
    Options { config, autoplay }
}

/// Spends whatever a passive player would: every ready skill, then the
/// cheapest affordable gold upgrade.
fn autoplay(game: &mut Game<StdRng>) {
    for id in SkillId::ALL {
        if skill_ready(game.state(), id) {
            game.use_skill(id);
        }
    }
    let cheapest = UpgradeTrackId::ALL
        .into_iter()
        .filter(|&id| can_afford_upgrade(game.state(), id))
        .min_by_key(|id| game.state().upgrades.get(id).map(|t| t.cost));
    if let Some(id) = cheapest {
        game.buy_upgrade(id);
    }
}

fn describe(event: &TickEvent) -> Option<String> {
    match event {
        TickEvent::Combat(CombatEvent::MonsterDefeated(report)) => {
            let mut line = format!(
                "{} defeated: +{} gold, +{} XP",
                report.monster_name, report.gold, report.xp
            );
            if let Some(item) = &report.loot {
                line.push_str(&format!(", found {} ({})", item.display_name(), item.stat_summary()));
            }
            if report.levels_gained > 0 {
                line.push_str(&format!(", +{} level(s)", report.levels_gained));
            }
            if let Some(stage) = report.new_stage {
                line.push_str(&format!(", now on stage {}", stage));
            }
            Some(line)
        }
        TickEvent::MonsterSpawned { name, is_boss: true } => {
            Some(format!("{} appears! 30 seconds on the clock.", name))
        }
        TickEvent::Combat(CombatEvent::BossTimerExpired) => {
            Some("Boss timer expired, the boss recovers.".to_string())
        }
        TickEvent::Combat(CombatEvent::HeroRevived) => {
            Some("The hero fell and got back up.".to_string())
        }
        _ => None,
    }
}

fn report_results(results: &[TickResult]) {
    for result in results {
        for line in result.events.iter().filter_map(describe) {
            println!("{}", line);
        }
    }
}

fn print_summary(state: &GameState) {
    let stats = state.stats();
    println!(
        "Level {} | Stage {} ({}/{}) | Gold {} | XP {}/{}",
        state.hero.level,
        state.stage,
        state.monsters_killed_in_stage,
        state.monsters_per_stage,
        state.hero.gold,
        state.hero.xp,
        state.hero.xp_needed
    );
    println!(
        "HP {:.0}/{:.0} | Damage {:.1} | Crit {:.1}% | Items {} | Relics {}",
        state.hero.hp,
        stats.max_hp,
        stats.damage,
        stats.crit_chance * 100.0,
        state.inventory.len(),
        state.prestige.relics
    );
}

fn open_store(config: &EngineConfig) -> Arc<dyn KeyValueStore> {
    let store = match &config.save_dir {
        Some(dir) => FileStore::new(dir.clone()),
        None => FileStore::open_default(),
    };
    match store {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("Cannot open save directory: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let Options { config, autoplay: auto } = parse_args();
    let store = open_store(&config);

    let now_ms = Utc::now().timestamp_millis();
    let (outcome, offline) = resume_at(store.as_ref(), now_ms);
    match &outcome.origin {
        LoadOrigin::Fresh => println!("Starting a new adventure."),
        LoadOrigin::Restored => println!("Save loaded."),
        LoadOrigin::Reset(reason) => {
            eprintln!("Save could not be loaded ({}), starting fresh.", reason);
        }
    }
    if let Some(report) = &offline {
        println!(
            "Welcome back! {}s away: +{} gold, +{} XP, +{} level(s).",
            report.elapsed_seconds, report.gold, report.xp, report.levels_gained
        );
    }

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(outcome.state, rng);
    if game.claim_daily_reward() {
        println!("Daily reward claimed!");
    }
    print_summary(game.state());

    let mut engine = Engine::new(game, &config, now_ms)
        .with_autosaver(Autosaver::spawn(Arc::clone(&store)));
    let end_ms = config.run_seconds.map(|s| s * 1000);
    let start = Instant::now();

    loop {
        let target = if config.fast_forward {
            engine.next_due_ms().unwrap_or(engine.now_ms())
        } else {
            start.elapsed().as_millis() as u64
        };
        let target = end_ms.map_or(target, |end| target.min(end));

        let results = engine.run_until(target);
        report_results(&results);
        if auto && !results.is_empty() {
            autoplay(engine.game_mut());
        }

        if end_ms.is_some_and(|end| engine.now_ms() >= end) {
            break;
        }
        if !config.fast_forward {
            let until_next = engine
                .next_due_ms()
                .map(|due| Duration::from_millis(due.saturating_sub(engine.now_ms())))
                .unwrap_or(MAX_SLEEP);
            std::thread::sleep(until_next.min(MAX_SLEEP));
        }
    }

    let (state, report) = engine.shutdown();
    print_summary(&state);
    if let Some(report) = report {
        if report.failures > 0 {
            eprintln!("{} autosave(s) failed", report.failures);
        }
    }
}
