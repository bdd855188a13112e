use super::IOArgs;
use clap::Subcommand;

mod equilibrium;
mod plot;

pub use equilibrium::equilibrium;
pub use plot::{Mode, plot};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw the scenario as an SVG diagram
    Plot {
        #[command(flatten)]
        io: IOArgs,

        /// Which diagram to draw
        #[arg(short, long, value_enum, default_value_t = Mode::SupplyAndDemand)]
        mode: Mode,

        /// Also draw the aggregate curves (or total cost and utility)
        #[arg(short, long)]
        total: bool,

        /// Omit the legend
        #[arg(long)]
        no_legend: bool,
    },

    /// Find the welfare-maximizing quantity and report each participant's share
    Equilibrium {
        #[command(flatten)]
        io: IOArgs,
    },
}
