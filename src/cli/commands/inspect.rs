//! Inspect command - Look up states, indices and rewards

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::{
    cli::output::{format_number, print_kv, print_section},
    world::{GridDims, RewardTable, State, StateCodec},
};

#[derive(Parser, Debug)]
#[command(about = "Encode or decode a state and show its reward")]
pub struct InspectArgs {
    /// Grid width
    #[arg(long, default_value_t = 10)]
    pub width: usize,

    /// Grid height
    #[arg(long, default_value_t = 10)]
    pub height: usize,

    /// State to encode, as `mx,my,cx,cy`
    #[arg(long, conflicts_with = "index")]
    pub state: Option<State>,

    /// State index to decode
    #[arg(long)]
    pub index: Option<usize>,
}

/// A state together with its index and reward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inspection {
    pub state: State,
    pub index: usize,
    pub reward: f64,
}

/// Resolve the requested state or index on the given grid.
pub fn inspect(args: &InspectArgs) -> Result<Inspection> {
    let dims = GridDims::new(args.width, args.height).context("Invalid grid dimensions")?;
    let codec = StateCodec::new(dims)?;
    let (state, index) = match (args.state, args.index) {
        (Some(state), None) => (state, codec.encode(&state)?),
        (None, Some(index)) => (codec.decode(index)?, index),
        _ => bail!("Provide exactly one of --state or --index"),
    };
    let rewards = RewardTable::new(&codec)?;
    Ok(Inspection {
        state,
        index,
        reward: rewards.get(index)?,
    })
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let inspection = inspect(&args)?;
    let dims = GridDims::new(args.width, args.height)?;
    let num_states = StateCodec::new(dims)?.num_states() as u64;

    print_section("State");
    print_kv("Grid", &dims.to_string());
    print_kv("State count", &format_number(num_states));
    print_kv("State", &inspection.state.to_string());
    print_kv("Index", &inspection.index.to_string());
    print_kv("Reward", &format!("{:.0}", inspection.reward));
    Ok(())
}
