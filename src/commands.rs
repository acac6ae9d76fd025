use anyhow::Result;

use crate::cli::Cli;
use crate::cost::ChiParams;
use crate::optimizer::ChiOptimizer;
use crate::presets;

/// Load the selected preset, run the optimizer and print the outcome.
pub fn run(cli: &Cli) -> Result<()> {
    let preset = presets::preset(cli.polygon_id)?;
    let mut decomposition = presets::build_decomposition(&preset)?;

    let params = ChiParams {
        radius: cli.radius,
        linear_penalty: cli.linear_penalty,
        angular_penalty: cli.angular_penalty,
    };
    let optimizer = ChiOptimizer::new(cli.iterations, cli.samples, params);
    let run = optimizer.run_iterations(&mut decomposition)?;

    println!("original costs:");
    for (cell_id, cost) in &run.original_costs {
        println!("  cell {cell_id}: {cost:.3}");
    }
    println!("final costs:");
    for (cell_id, cost) in &run.final_costs {
        println!("  cell {cell_id}: {cost:.3}");
    }

    println!("{}", serde_json::to_string_pretty(&decomposition.canonical_view())?);
    Ok(())
}
