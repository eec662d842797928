use akhada_core::nutrition::MealInput;
use akhada_core::progress::{check_achievements, AchievementStats, ACHIEVEMENTS};
use akhada_core::workout::{export_history_csv, format_duration};
use akhada_core::*;
use chrono::{Duration, Local, Utc};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "akhada")]
#[command(about = "Health Akhada body intelligence and training tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync the ring and show today's body intelligence (default)
    Sync {
        /// Seed for the simulated ring readings
        #[arg(long)]
        seed: Option<u64>,

        /// Dry run - show the assessment without saving anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the last stored ring data and assessment
    Status,

    /// Classify explicit readings without touching stored data
    Evaluate {
        #[arg(long)]
        hrv: f64,
        #[arg(long)]
        resting_hr: f64,
        #[arg(long)]
        body_temp: f64,
        #[arg(long)]
        sleep_quality: f64,
        #[arg(long)]
        recovery: f64,
        /// low, medium, high
        #[arg(long, default_value = "low")]
        stress: StressLevel,
        /// low, medium, high
        #[arg(long, default_value = "medium")]
        load: TrainingLoad,
        /// declining, stable, improving
        #[arg(long, default_value = "stable")]
        trend: Trend,
    },

    /// Keep the card fresh, re-syncing on a fixed interval
    Watch {
        /// Seconds between syncs (defaults to config, 300)
        #[arg(long)]
        interval_secs: Option<u64>,

        /// Stop after this many syncs
        #[arg(long)]
        ticks: Option<u64>,

        /// Seed for the simulated ring readings
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Log a finished workout
    Workout {
        #[arg(long)]
        exercise: String,

        /// A set as REPSxWEIGHT, e.g. 8x100 (repeatable)
        #[arg(long = "set", value_parser = parse_set)]
        sets: Vec<(u32, f64)>,

        /// Session length in minutes
        #[arg(long, default_value_t = 45)]
        minutes: i64,

        #[arg(long)]
        form_score: Option<u32>,
    },

    /// Log a meal
    Meal {
        #[arg(long)]
        name: String,
        #[arg(long)]
        calories: u32,
        #[arg(long, default_value_t = 0.0)]
        protein: f64,
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,
        #[arg(long, default_value_t = 0.0)]
        fat: f64,
    },

    /// Log water intake
    Water {
        /// Liters (defaults to one serving from config)
        #[arg(long)]
        liters: Option<f64>,
    },

    /// Show today's nutrition
    Nutrition,

    /// Record body weight in kg
    Weight { kg: f64 },

    /// Show weight progress
    Progress,

    /// Check and list achievements
    Achievements,

    /// Show the user profile
    Profile {
        /// Set a new energy score
        #[arg(long)]
        energy: Option<u32>,
    },

    /// Export workout history to CSV
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

/// Longest session the `workout` command accepts (one day)
const MAX_WORKOUT_MINUTES: i64 = 24 * 60;

fn parse_set(s: &str) -> std::result::Result<(u32, f64), String> {
    let (reps, weight) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected REPSxWEIGHT, got {:?}", s))?;
    let reps = reps
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid reps in {:?}: {}", s, e))?;
    let weight = weight
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid weight in {:?}: {}", s, e))?;
    Ok((reps, weight))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        akhada_core::logging::init_with_level("debug");
    } else {
        akhada_core::logging::init();
    }

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let mut store = FileStore::new(data_dir.join("store"));
    tracing::debug!("Using store at {:?}", store.dir());

    match cli.command {
        Some(Commands::Sync { seed, dry_run }) => cmd_sync(&mut store, seed, dry_run),
        Some(Commands::Status) => cmd_status(&store),
        Some(Commands::Evaluate {
            hrv,
            resting_hr,
            body_temp,
            sleep_quality,
            recovery,
            stress,
            load,
            trend,
        }) => {
            let snapshot = BiometricSnapshot {
                last_sync: Utc::now(),
                hrv,
                resting_hr,
                body_temp,
                sleep_quality,
                sleep_duration: 0.0,
                stress_level: stress,
                recovery_score: recovery,
                weekly_load: load,
                trend,
            };
            cmd_evaluate(snapshot)
        }
        Some(Commands::Watch {
            interval_secs,
            ticks,
            seed,
        }) => {
            let interval = interval_secs
                .map(std::time::Duration::from_secs)
                .unwrap_or_else(|| config.sync.refresh_interval());
            cmd_watch(&mut store, RefreshSchedule::new(interval, ticks), seed)
        }
        Some(Commands::Workout {
            exercise,
            sets,
            minutes,
            form_score,
        }) => cmd_workout(&mut store, exercise, sets, minutes, form_score),
        Some(Commands::Meal {
            name,
            calories,
            protein,
            carbs,
            fat,
        }) => cmd_meal(
            &mut store,
            &config,
            MealInput {
                name,
                calories,
                protein,
                carbs,
                fat,
            },
        ),
        Some(Commands::Water { liters }) => cmd_water(
            &mut store,
            &config,
            liters.unwrap_or(config.nutrition.default_water_serving_liters),
        ),
        Some(Commands::Nutrition) => cmd_nutrition(&store, &config),
        Some(Commands::Weight { kg }) => cmd_weight(&mut store, kg),
        Some(Commands::Progress) => cmd_progress(&store),
        Some(Commands::Achievements) => cmd_achievements(&mut store),
        Some(Commands::Profile { energy }) => cmd_profile(&mut store, energy),
        Some(Commands::Export { out }) => cmd_export(&store, out),
        None => {
            // Default to "sync" command
            cmd_sync(&mut store, None, false)
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn cmd_sync(store: &mut FileStore, seed: Option<u64>, dry_run: bool) -> Result<()> {
    let now = Utc::now();
    let mut rng = make_rng(seed);
    let mut snapshot = store::load_snapshot(store, now);

    let report = if dry_run {
        // Run the same pipeline against a throwaway store
        let mut scratch = MemoryStore::new();
        update_body_intelligence(&mut scratch, &mut snapshot, &mut rng, now)?
    } else {
        update_body_intelligence(store, &mut snapshot, &mut rng, now)?
    };

    display_report(&report);

    if dry_run {
        println!("\n[Dry run - nothing saved]");
    }
    Ok(())
}

fn cmd_status(store: &FileStore) -> Result<()> {
    let Some(assessment) = store::load_body_intelligence(store) else {
        println!("No assessment yet. Run `akhada sync` first.");
        return Ok(());
    };

    let snapshot = store::load_snapshot(store, Utc::now());
    display_report(&BodyReport::new(snapshot, assessment));
    Ok(())
}

fn cmd_evaluate(snapshot: BiometricSnapshot) -> Result<()> {
    if !snapshot.is_finite() {
        return Err(Error::Other("readings must be finite numbers".into()));
    }

    let assessment = assess(&snapshot, snapshot.last_sync);
    println!(
        "Metabolic score: {:.1}",
        metabolic_score(snapshot.body_temp, snapshot.resting_hr, snapshot.recovery_score)
    );
    display_assessment(&BodyReport::new(snapshot, assessment));
    Ok(())
}

fn cmd_watch(store: &mut FileStore, schedule: RefreshSchedule, seed: Option<u64>) -> Result<()> {
    let mut rng = make_rng(seed);
    let mut snapshot = store::load_snapshot(store, Utc::now());

    println!(
        "Refreshing every {}. Press Ctrl-C to stop.",
        format_duration(schedule.interval.as_secs())
    );

    schedule.run(|_| {
        let report =
            update_body_intelligence(&mut *store, &mut snapshot, &mut rng, Utc::now())?;
        display_report(&report);
        Ok(())
    })?;

    Ok(())
}

fn cmd_workout(
    store: &mut FileStore,
    exercise: String,
    sets: Vec<(u32, f64)>,
    minutes: i64,
    form_score: Option<u32>,
) -> Result<()> {
    if !(1..=MAX_WORKOUT_MINUTES).contains(&minutes) {
        return Err(Error::Tracker(format!(
            "workout length must be between 1 and {} minutes",
            MAX_WORKOUT_MINUTES
        )));
    }

    let now = Utc::now();
    let start = now - Duration::minutes(minutes);

    let mut session = WorkoutSession::new(start);
    session.add_exercise(exercise.clone(), start);
    for (reps, weight) in sets {
        session.add_set(&exercise, reps, weight, start)?;
    }
    if let Some(score) = form_score {
        session.update_form_score(score);
    }
    session.end_session(now)?;

    let mut profile = UserProfile::load_or_create(store, now)?;
    profile.record_workout(&session);

    // History is saved before the profile totals that count it
    let mut log = WorkoutLog::load(store);
    log.record(session.clone())?;
    log.save(store)?;
    profile.save(store)?;

    println!("\n✓ Workout logged!");
    println!("  {}", exercise);
    println!(
        "  {} sets, {} reps",
        session.total_sets, session.total_reps
    );
    println!(
        "  Duration: {}",
        format_duration(session.duration.unwrap_or(0.0).round() as u64)
    );
    println!("  Calories: ~{} kcal", session.calories_burned);

    let mut tracker = ProgressTracker::load(store);
    let unlocked = check_achievements(&AchievementStats::from_profile(&profile), &mut tracker);
    if !unlocked.is_empty() {
        tracker.save(store)?;
        for achievement in unlocked {
            println!("  {} Achievement unlocked: {}", achievement.icon, achievement.name);
        }
    }

    Ok(())
}

fn cmd_meal(store: &mut FileStore, config: &Config, input: MealInput) -> Result<()> {
    let now = Utc::now();
    let mut tracker = NutritionTracker::load(store, config.nutrition.daily_calorie_goal);

    let meal = tracker.add_meal(input, now);
    println!("\n✓ Logged {} ({} kcal)", meal.name, meal.calories);

    tracker.save(store)?;
    println!(
        "  Remaining today: {} kcal",
        tracker.remaining_calories(&now.with_timezone(&Local))
    );
    Ok(())
}

fn cmd_water(store: &mut FileStore, config: &Config, liters: f64) -> Result<()> {
    if !liters.is_finite() || liters <= 0.0 {
        return Err(Error::Tracker("water amount must be positive".into()));
    }

    let mut tracker = NutritionTracker::load(store, config.nutrition.daily_calorie_goal);
    tracker.add_water(liters);
    tracker.save(store)?;

    println!("✓ Water intake: {:.2} L", tracker.water_intake);
    Ok(())
}

fn cmd_nutrition(store: &FileStore, config: &Config) -> Result<()> {
    let now = Local::now();
    let tracker = NutritionTracker::load(store, config.nutrition.daily_calorie_goal);
    let macros = tracker.todays_macros(&now);

    println!("\n  Calories: {} / {} kcal", tracker.todays_calories(&now), tracker.daily_goal);
    println!(
        "  Protein {:.0} g · Carbs {:.0} g · Fat {:.0} g",
        macros.protein, macros.carbs, macros.fat
    );
    println!("  Water: {:.2} L", tracker.water_intake);

    for meal in tracker.todays_meals(&now) {
        println!(
            "  → {} {} ({} kcal)",
            meal.timestamp.with_timezone(&Local).format("%H:%M"),
            meal.name,
            meal.calories
        );
    }
    Ok(())
}

fn cmd_weight(store: &mut FileStore, kg: f64) -> Result<()> {
    if !kg.is_finite() || kg <= 0.0 {
        return Err(Error::Tracker("weight must be positive".into()));
    }

    let now = Utc::now();
    let mut tracker = ProgressTracker::load(store);
    tracker.add_weight(kg, now, now);
    tracker.save(store)?;

    println!("✓ Weight recorded: {:.1} kg", kg);
    Ok(())
}

fn cmd_progress(store: &FileStore) -> Result<()> {
    let tracker = ProgressTracker::load(store);

    match tracker.current_weight() {
        Some(kg) => println!("\n  Current weight: {:.1} kg", kg),
        None => {
            println!("No weights recorded yet.");
            return Ok(());
        }
    }

    for entry in tracker.weight_progress() {
        println!(
            "  → {} {:.1} kg",
            entry.date.with_timezone(&Local).format("%b %d, %Y"),
            entry.value
        );
    }
    Ok(())
}

fn cmd_achievements(store: &mut FileStore) -> Result<()> {
    let now = Utc::now();
    let profile = UserProfile::load_or_create(store, now)?;
    let mut tracker = ProgressTracker::load(store);

    let unlocked = check_achievements(&AchievementStats::from_profile(&profile), &mut tracker);
    if !unlocked.is_empty() {
        tracker.save(store)?;
    }

    println!();
    for achievement in ACHIEVEMENTS.iter() {
        let mark = if tracker.has_achievement(achievement.id) {
            achievement.icon
        } else {
            "·"
        };
        let fresh = if unlocked.iter().any(|a| a.id == achievement.id) {
            "  (new!)"
        } else {
            ""
        };
        println!(
            "  {} {} - {}{}",
            mark, achievement.name, achievement.description, fresh
        );
    }
    Ok(())
}

fn cmd_profile(store: &mut FileStore, energy: Option<u32>) -> Result<()> {
    let mut profile = UserProfile::load_or_create(store, Utc::now())?;

    if let Some(score) = energy {
        profile.set_energy_score(score);
        profile.save(store)?;
    }

    println!("\n  {} <{}>", profile.name, profile.email);
    println!(
        "  {} member since {}",
        profile.membership_tier,
        profile.join_date.with_timezone(&Local).format("%b %d, %Y")
    );
    println!("  Energy score: {}", profile.energy_score);
    println!("  Streak: {} days", profile.streak);
    println!(
        "  {} workouts · {:.1} h · {} kcal",
        profile.total_workouts, profile.total_hours, profile.calories_burned
    );
    Ok(())
}

fn cmd_export(store: &FileStore, out: PathBuf) -> Result<()> {
    let log = WorkoutLog::load(store);
    let count = export_history_csv(&log, &out)?;

    println!("✓ Exported {} workouts", count);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn paint(label: &str, color: StatusColor) -> String {
    if std::io::stdout().is_terminal() {
        format!("{}{}\x1b[0m", color.ansi(), label)
    } else {
        label.to_string()
    }
}

fn display_assessment(report: &BodyReport) {
    let a = &report.assessment;
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  BODY INTELLIGENCE");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  NADI   {}", paint(a.nadi.as_str(), report.nadi_color));
    println!("  AGNI   {}", paint(a.agni.as_str(), report.agni_color));
    println!("  SHAKTI {}", paint(a.shakti.as_str(), report.shakti_color));
    println!();
    println!("  → {}", a.recommendation.workout);
    println!("    {}", a.recommendation.reason);
}

fn display_report(report: &BodyReport) {
    let s = &report.snapshot;
    display_assessment(report);
    println!();
    println!(
        "  HRV {} ms · RHR {} bpm · {:.1} °C · Sleep {}% · Recovery {}",
        s.hrv, s.resting_hr, s.body_temp, s.sleep_quality, s.recovery_score
    );
    println!(
        "  Last sync: {}",
        s.last_sync.with_timezone(&Local).format("%b %d, %Y %H:%M")
    );
}
