use clap::Parser;

/// Coverage-decomposition re-optimizer (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "covpart", version, about)]
pub struct Cli {
    /// Id of the preconfigured workspace to optimize
    pub polygon_id: usize,

    /// Number of re-optimization iterations
    #[arg(long, default_value_t = 10)]
    pub iterations: usize,

    /// Number of perimeter samples per cell pair
    #[arg(long, default_value_t = 50)]
    pub samples: usize,

    /// Radius of the coverage footprint
    #[arg(long, default_value_t = 0.2)]
    pub radius: f64,

    /// Weight of the access and sweep terms
    #[arg(long, default_value_t = 1.0)]
    pub linear_penalty: f64,

    /// Weight of the turning term
    #[arg(long, default_value_t = 100.0 / 360.0)]
    pub angular_penalty: f64,
}
