//! Train command - Run a full learning session

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, ValueEnum};

use crate::{
    analysis::bucket_averages,
    cli::output::{format_number, print_kv, print_section, print_subsection},
    config::{ActionPolicyConfig, LearnerConfig, LearningRateConfig, RunConfig, SnapshotCadence},
    export::write_curve_csv,
    pipeline::{ProgressObserver, SnapshotObserver, TrainingPipeline, TrainingResult},
    policy::{CountBased, EpsilonGreedy},
    q_learning::QLearningAgent,
    world::{CatMotion, Delta, GridDims, State},
};

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train the mouse to keep away from the cat", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Run configuration JSON; flags given alongside override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    pub width: Option<usize>,

    /// Grid height
    #[arg(long)]
    pub height: Option<usize>,

    /// Number of time-steps
    #[arg(long, short = 'n')]
    pub steps: Option<u64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Discount factor γ (0.0-1.0)
    #[arg(long)]
    pub discount: Option<f64>,

    /// Action-selection strategy
    #[arg(long, value_enum)]
    pub policy: Option<PolicyKind>,

    /// Exploration probability of the epsilon-greedy policy
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Learning-rate schedule
    #[arg(long, value_enum)]
    pub learning_rate: Option<RateKind>,

    /// Step size: the constant rate, or the exploratory rate of count-based
    #[arg(long)]
    pub rate: Option<f64>,

    /// Probability that count-based picks the exploratory rate
    #[arg(long)]
    pub explore_probability: Option<f64>,

    /// Cat motion: `random`, `stay`, or a fixed move `dx,dy`
    #[arg(long)]
    pub cat: Option<String>,

    /// Initial state as `mx,my,cx,cy`
    #[arg(long)]
    pub initial_state: Option<State>,

    /// Number of buckets in the averaged reward curve
    #[arg(long)]
    pub buckets: Option<usize>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional path for the averaged reward curve (CSV)
    #[arg(long)]
    pub curve: Option<PathBuf>,

    /// Optional path for JSONL snapshots at the display cadence
    #[arg(long)]
    pub snapshots: Option<PathBuf>,

    /// Snapshot period in steps (0 disables snapshots)
    #[arg(long)]
    pub snapshot_period: Option<u64>,

    /// Consecutive steps captured at the start of each snapshot period
    #[arg(long)]
    pub snapshot_window: Option<u64>,

    /// Write the resolved run configuration to this JSON file
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyKind {
    /// Explore with a fixed probability, otherwise act greedily
    EpsilonGreedy,
    /// Explore with probability 1 / (times the state's actions were tried)
    Decaying,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RateKind {
    /// 1 / N(s,a), with an occasional exploratory step size
    CountBased,
    /// The same step size every update
    Constant,
}

/// Parse cat motion from string (e.g., "random", "stay", "1,-1")
fn parse_cat_motion(s: &str) -> Result<CatMotion> {
    match s.trim().to_ascii_lowercase().as_str() {
        "random" => Ok(CatMotion::Random),
        "stay" => Ok(CatMotion::Fixed { delta: Delta::STAY }),
        other => {
            let (dx, dy) = other
                .split_once(',')
                .ok_or_else(|| anyhow!("Unknown cat motion '{s}'. Use 'random', 'stay', or 'dx,dy'"))?;
            let dx: i8 = dx
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid cat move component '{dx}'"))?;
            let dy: i8 = dy
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid cat move component '{dy}'"))?;
            Ok(CatMotion::Fixed {
                delta: Delta::new(dx, dy)?,
            })
        }
    }
}

fn resolve_action_policy(args: &TrainArgs, current: ActionPolicyConfig) -> Result<ActionPolicyConfig> {
    let current_epsilon = match current {
        ActionPolicyConfig::EpsilonGreedy { epsilon } => epsilon,
        ActionPolicyConfig::Decaying => EpsilonGreedy::DEFAULT_EPSILON,
    };
    let policy = match (args.policy, args.epsilon) {
        (Some(PolicyKind::Decaying), Some(_)) => {
            bail!("--epsilon only applies to the epsilon-greedy policy")
        }
        (Some(PolicyKind::Decaying), None) => ActionPolicyConfig::Decaying,
        (Some(PolicyKind::EpsilonGreedy), epsilon) => ActionPolicyConfig::EpsilonGreedy {
            epsilon: epsilon.unwrap_or(current_epsilon),
        },
        (None, Some(epsilon)) => ActionPolicyConfig::EpsilonGreedy { epsilon },
        (None, None) => current,
    };
    Ok(policy)
}

fn resolve_learning_rate(args: &TrainArgs, current: LearningRateConfig) -> Result<LearningRateConfig> {
    let kind = args.learning_rate.unwrap_or(match current {
        LearningRateConfig::CountBased { .. } => RateKind::CountBased,
        LearningRateConfig::Constant { .. } => RateKind::Constant,
    });
    let schedule = match (kind, current) {
        (RateKind::CountBased, current) => {
            let (probability, rate) = match current {
                LearningRateConfig::CountBased {
                    explore_probability,
                    explore_rate,
                } => (explore_probability, explore_rate),
                LearningRateConfig::Constant { .. } => (
                    CountBased::DEFAULT_EXPLORE_PROBABILITY,
                    CountBased::DEFAULT_EXPLORE_RATE,
                ),
            };
            LearningRateConfig::CountBased {
                explore_probability: args.explore_probability.unwrap_or(probability),
                explore_rate: args.rate.unwrap_or(rate),
            }
        }
        (RateKind::Constant, _) if args.explore_probability.is_some() => {
            bail!("--explore-probability only applies to the count-based learning rate")
        }
        (RateKind::Constant, LearningRateConfig::Constant { rate }) => LearningRateConfig::Constant {
            rate: args.rate.unwrap_or(rate),
        },
        (RateKind::Constant, LearningRateConfig::CountBased { .. }) => LearningRateConfig::Constant {
            rate: args
                .rate
                .ok_or_else(|| anyhow!("--rate is required with --learning-rate constant"))?,
        },
    };
    Ok(schedule)
}

/// Merge the optional config file with command-line overrides.
pub fn resolve_run_config(args: &TrainArgs) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("Failed to load run configuration {}", path.display()))?,
        None => RunConfig::default(),
    };

    if args.width.is_some() || args.height.is_some() {
        let current = config.learner.grid;
        let grid = GridDims::new(
            args.width.unwrap_or(current.width()),
            args.height.unwrap_or(current.height()),
        )
        .context("Invalid grid dimensions")?;
        config.learner.grid = grid;
        // Pull a start position that no longer fits back onto the grid
        if config.learner.initial_state.check_bounds(grid).is_err() {
            config.learner.initial_state = LearnerConfig::new(grid).initial_state;
        }
    }

    if let Some(state) = args.initial_state {
        config.learner.initial_state = state;
    }
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    if let Some(seed) = args.seed {
        config.learner.seed = Some(seed);
    }
    if let Some(discount) = args.discount {
        config.learner.discount = discount;
    }
    if let Some(cat) = &args.cat {
        config.learner.cat = parse_cat_motion(cat)?;
    }
    if let Some(buckets) = args.buckets {
        config.reward_buckets = buckets;
    }
    config.snapshots = SnapshotCadence {
        period: args.snapshot_period.unwrap_or(config.snapshots.period),
        window: args.snapshot_window.unwrap_or(config.snapshots.window),
    };
    config.learner.action_policy = resolve_action_policy(args, config.learner.action_policy)?;
    config.learner.learning_rate = resolve_learning_rate(args, config.learner.learning_rate)?;

    config.validate().context("Invalid run configuration")?;
    Ok(config)
}

fn display_report(config: &RunConfig, agent: &QLearningAgent, result: &TrainingResult) -> Result<()> {
    print_section("Cat and Mouse Q-learning");
    print_kv("Grid", &result.grid.to_string());
    print_kv("Initial state", &config.learner.initial_state.to_string());
    print_kv("Steps", &format_number(result.total_steps));
    print_kv("Discount", &config.learner.discount.to_string());
    print_kv("Action policy", &result.action_policy);
    print_kv("Learning rate", &result.learning_rate);
    if let Some(seed) = result.seed {
        print_kv("Seed", &seed.to_string());
    }

    print_subsection("Reward");
    print_kv("Avg reward", &format!("{:.4}", result.reward.mean));
    print_kv("Std dev", &format!("{:.4}", result.reward.std_dev));
    print_kv("Final bucket", &format!("{:.4}", result.final_bucket_reward));
    print_kv(
        "Range",
        &format!("{:.0} - {:.0}", result.reward.min, result.reward.max),
    );

    print_subsection("Coverage");
    let num_states = agent.codec().num_states() as u64;
    print_kv(
        "States visited",
        &format!(
            "{} / {}",
            format_number(result.states_visited as u64),
            format_number(num_states)
        ),
    );
    print_kv(
        "Pairs tried",
        &format!(
            "{} / {}",
            format_number(result.pairs_tried as u64),
            format_number(num_states * agent.q_table().num_actions() as u64)
        ),
    );
    print_kv("Final state", &result.final_state.to_string());

    let start = config.learner.initial_state;
    let greedy = agent
        .greedy_action(&start)
        .context("Failed to read the greedy action")?;
    print_kv(
        "Greedy move at start",
        &format!(
            "{} (Q = {:.4})",
            greedy.delta(),
            agent.q_value(&start, greedy)?
        ),
    );
    Ok(())
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = resolve_run_config(&args)?;

    if let Some(path) = &args.save_config {
        config
            .save(path)
            .with_context(|| format!("Failed to save run configuration {}", path.display()))?;
    }

    let mut agent = QLearningAgent::new(&config.learner).context("Failed to build agent")?;
    let mut pipeline = TrainingPipeline::from_config(&config);
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.snapshots {
        let observer = SnapshotObserver::new(path, config.snapshots)
            .with_context(|| format!("Failed to create snapshot file {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline.run(&mut agent).context("Training failed")?;
    display_report(&config, &agent, &result)?;

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        result
            .save(&path)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        println!("\nSummary written to {}", path.display());
    }

    if let Some(path) = &args.curve {
        let curve = bucket_averages(agent.reward_trace(), config.reward_buckets);
        write_curve_csv(path, &curve)
            .with_context(|| format!("Failed to write reward curve {}", path.display()))?;
        println!("Reward curve written to {}", path.display());
    }

    Ok(())
}
