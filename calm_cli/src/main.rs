use calm_core::config::MAX_TICK_INTERVAL_MS;
use calm_core::mood::{self, INSIGHTS, PATTERNS, PREVIOUS_WEEK_AVERAGE};
use calm_core::*;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "calm")]
#[command(about = "Guided breathing and coping companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List breathing exercises (default)
    Exercises {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a guided breathing exercise
    Breathe {
        /// Exercise id (see `calm exercises`)
        exercise: String,

        /// Override the number of cycles
        #[arg(long)]
        cycles: Option<u32>,

        /// Override the tick interval in milliseconds (1 to 3600000)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_TICK_INTERVAL_MS))]
        tick_ms: Option<u64>,
    },

    /// Show a daily affirmation
    Affirm {
        /// Which affirmation to show (wraps around)
        #[arg(long, default_value_t = 0)]
        index: usize,
    },

    /// Show coping strategies and crisis support lines
    Strategies,

    /// Talk to the companion
    Chat {
        /// What's on your mind
        message: String,

        /// Pin the reply selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write a journal entry
    Journal {
        /// What happened today
        text: String,

        /// How you feel (happy, sad, anxious, angry, calm, thoughtful, tired, inspired)
        #[arg(long)]
        mood: Option<Mood>,

        /// Add a reflection prompt
        #[arg(long)]
        reflect: bool,
    },

    /// Summarize mood check-ins (demonstration week)
    Mood {
        /// week, month or 3months
        #[arg(long, default_value = "week")]
        period: Period,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    calm_core::logging::init_with_level(calm_core::logging::level_for(cli.verbose, cli.quiet));

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Exercises { json }) => cmd_exercises(&config, json),
        Some(Commands::Breathe {
            exercise,
            cycles,
            tick_ms,
        }) => cmd_breathe(&config, &exercise, cycles, tick_ms).await,
        Some(Commands::Affirm { index }) => {
            cmd_affirm(index);
            Ok(())
        }
        Some(Commands::Strategies) => {
            cmd_strategies();
            Ok(())
        }
        Some(Commands::Chat { message, seed }) => cmd_chat(&config, &message, seed).await,
        Some(Commands::Journal { text, mood, reflect }) => cmd_journal(&text, mood, reflect),
        Some(Commands::Mood { period, json }) => cmd_mood(period, json),
        None => cmd_exercises(&config, false),
    }
}

/// Built-in exercises plus any from the config file
fn load_catalog(config: &Config) -> Result<ExerciseCatalog> {
    let catalog = get_default_catalog().with_custom(&config.exercises.custom);
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation(errors.join("; ")));
    }
    tracing::debug!("Catalog has {} exercises", catalog.exercises().len());
    Ok(catalog)
}

fn cmd_exercises(config: &Config, json: bool) -> Result<()> {
    let catalog = load_catalog(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(catalog.exercises())?);
        return Ok(());
    }

    println!("\nBreathing exercises\n");
    for exercise in catalog.exercises() {
        println!("  {:<10} {}", exercise.id, exercise.name);
        println!(
            "  {:<10} {} pattern · {} cycles · ~{}s",
            "",
            exercise.pattern_label(),
            exercise.total_cycles,
            exercise.total_duration_seconds()
        );
        if !exercise.description.is_empty() {
            println!("  {:<10} {}", "", exercise.description);
        }
        println!();
    }
    Ok(())
}

enum Step {
    Tick(Option<TickOutcome>),
    Interrupted,
}

async fn cmd_breathe(
    config: &Config,
    exercise_id: &str,
    cycles: Option<u32>,
    tick_ms: Option<u64>,
) -> Result<()> {
    let catalog = load_catalog(config)?;
    let mut exercise = catalog.require(exercise_id)?.clone();
    if let Some(cycles) = cycles {
        exercise.total_cycles = cycles;
    }

    let period = tick_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.timer.tick_interval());

    tracing::info!("Ticking every {:?}", period);
    let mut session = BreathingSession::new(period);
    session.start(exercise.clone())?;

    display_header(&exercise);
    display_cycle(session.timer());
    display_phase(session.timer());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let step = tokio::select! {
            outcome = session.next_tick() => Step::Tick(outcome),
            _ = &mut ctrl_c => Step::Interrupted,
        };

        match step {
            Step::Tick(Some(TickOutcome::Advanced {
                phase_changed: true,
                ..
            })) => display_phase(session.timer()),
            Step::Tick(Some(TickOutcome::CycleCompleted { .. })) => {
                display_cycle(session.timer());
                display_phase(session.timer());
            }
            Step::Tick(Some(TickOutcome::SessionCompleted)) => {
                println!(
                    "\n✓ Session complete! {} cycles of {}",
                    exercise.total_cycles, exercise.name
                );
                break;
            }
            Step::Tick(Some(_)) => {}
            Step::Tick(None) => break,
            Step::Interrupted => {
                session.reset();
                println!("\nSession stopped.");
                break;
            }
        }
    }

    Ok(())
}

fn display_header(exercise: &BreathingExercise) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", exercise.name);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  {} pattern · {} cycles · ~{} seconds",
        exercise.pattern_label(),
        exercise.total_cycles,
        exercise.total_duration_seconds()
    );
}

fn display_cycle(timer: &BreathingTimer) {
    if let Some(exercise) = timer.exercise() {
        println!(
            "\nCycle {} of {}  ({:.0}% overall)",
            timer.state().cycle_index + 1,
            exercise.total_cycles,
            timer.progress() * 100.0
        );
    }
}

fn display_phase(timer: &BreathingTimer) {
    println!(
        "  → {} ({}s)",
        timer.state().current_phase.instruction(),
        timer.seconds_left_in_phase()
    );
}

fn cmd_affirm(index: usize) {
    let deck = AffirmationDeck::at(index);
    let (position, total) = deck.position();
    println!("\n  \"{}\"", deck.current());
    println!("\n  {} of {}", position, total);
}

fn cmd_strategies() {
    let catalog = get_default_catalog();

    println!("\nCoping strategies\n");
    for strategy in &catalog.strategies {
        println!("  {} [{:?}]", strategy.title, strategy.category);
        println!("    {}", strategy.description);
    }

    println!("\nNeed immediate support?\n");
    for line in &catalog.crisis_lines {
        println!("  {}: {}", line.name, line.contact);
    }
    println!();
}

async fn cmd_chat(config: &Config, message: &str, seed: Option<u64>) -> Result<()> {
    let mut companion_config = config.companion.clone();
    if seed.is_some() {
        companion_config.seed = seed;
    }

    let mut companion = Companion::from_config(&companion_config);
    let reply = companion.respond(message).await?;
    println!("{}", reply.content);
    Ok(())
}

fn cmd_journal(text: &str, mood: Option<Mood>, reflect: bool) -> Result<()> {
    let mut journal = Journal::new();
    journal.write(text, mood)?;
    if reflect {
        journal.reflect_on_latest();
    }

    for entry in journal.entries() {
        println!("\nJournal · {}", entry.written_at.format("%Y-%m-%d %H:%M"));
        if let Some(mood) = entry.mood {
            println!("  Feeling {}", mood);
        }
        println!("\n  {}", entry.content);
        if let Some(reflection) = &entry.reflection {
            println!("\n  Reflection: {}", reflection);
        }
    }
    println!();
    Ok(())
}

fn cmd_mood(period: Period, json: bool) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let week = mood::sample_week(today);
    let Some(summary) = mood::summarize(&week, period, today, PREVIOUS_WEEK_AVERAGE) else {
        println!("No check-ins in the last {}.", period);
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("\nMood over the last {}\n", period);
    for check_in in &week {
        println!(
            "  {}  {}  mood {:>2}/10  energy {:>2}/10",
            check_in.date.format("%a"),
            check_in.mood.emoji(),
            check_in.value,
            check_in.energy
        );
    }

    println!("\n  Average mood   {:.1}/10", summary.average_mood);
    println!("  Average energy {:.1}/10", summary.average_energy);
    if let Some(change) = summary.change_percent {
        println!("  {:+.1}% vs last week", change);
    }

    println!("\nPatterns\n");
    for pattern in &PATTERNS {
        let arrow = match pattern.trend {
            mood::Trend::Up => "↑",
            mood::Trend::Down => "↓",
        };
        println!("  {} {} ({}% confident)", arrow, pattern.title, pattern.confidence);
        println!("    {}", pattern.description);
    }

    println!("\nInsights\n");
    for insight in &INSIGHTS {
        let tag = if insight.actionable { " [actionable]" } else { "" };
        println!("  {}{}", insight.title, tag);
        println!("    {}", insight.description);
    }
    println!();
    Ok(())
}
