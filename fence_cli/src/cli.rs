use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use fence_core::config::FormDefaults;
use fence_core::FormInput;

#[derive(Parser, Debug)]
#[command(name = "fence_cli", version, about = "Metal fence cost calculator")]
pub struct Cli {
    /// Settings file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the configurations available in a price table
    Options {
        /// Price table (.xlsx, .xls, .ods or .csv); defaults to the configured file
        #[arg(short, long)]
        prices: Option<PathBuf>,

        /// Only show profile heights and thicknesses for this metal type
        #[arg(short, long)]
        metal_type: Option<String>,
    },

    /// Calculate the cost of a fence
    Calculate(CalculateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CalculateArgs {
    /// Price table (.xlsx, .xls, .ods or .csv); defaults to the configured file
    #[arg(short, long)]
    pub prices: Option<PathBuf>,

    #[arg(long)]
    pub metal_type: String,

    /// Profile height (mm)
    #[arg(long)]
    pub profile_height: String,

    /// Metal thickness (mm)
    #[arg(long)]
    pub thickness: String,

    /// Fence length (m)
    #[arg(long)]
    pub length: Option<String>,

    /// Fence height (m)
    #[arg(long)]
    pub height: Option<String>,

    #[arg(long)]
    pub posts: Option<String>,

    /// Post depth (m)
    #[arg(long)]
    pub post_depth: Option<String>,

    #[arg(long)]
    pub gates: Option<String>,

    #[arg(long)]
    pub doors: Option<String>,

    /// Delivery distance (km)
    #[arg(long)]
    pub delivery_distance: Option<String>,

    /// Include foundation fill
    #[arg(long)]
    pub foundation: Option<bool>,

    /// Include polymer coating
    #[arg(long)]
    pub coating: Option<bool>,

    /// Also save the results workbook here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the calculation as JSON
    #[arg(long)]
    pub json: bool,
}

impl CalculateArgs {
    /// Form text from the arguments, with unset fields taken from `defaults`
    pub fn to_form(&self, defaults: &FormDefaults) -> FormInput {
        let base = defaults.to_form();
        FormInput {
            length: self.length.clone().unwrap_or(base.length),
            height: self.height.clone().unwrap_or(base.height),
            posts: self.posts.clone().unwrap_or(base.posts),
            post_depth: self.post_depth.clone().unwrap_or(base.post_depth),
            gates: self.gates.clone().unwrap_or(base.gates),
            doors: self.doors.clone().unwrap_or(base.doors),
            delivery_distance: self.delivery_distance.clone().unwrap_or(base.delivery_distance),
            metal_type: self.metal_type.clone(),
            profile_height: self.profile_height.clone(),
            thickness: self.thickness.clone(),
            foundation: self.foundation.unwrap_or(base.foundation),
            coating: self.coating.unwrap_or(base.coating),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_args_fill_from_defaults() {
        let cli = Cli::parse_from([
            "fence_cli",
            "calculate",
            "--metal-type",
            "Steel",
            "--profile-height",
            "20",
            "--thickness",
            "0,45",
            "--posts",
            "12",
            "--coating",
            "false",
        ]);

        let Commands::Calculate(args) = cli.command else {
            panic!("expected calculate command");
        };

        let form = args.to_form(&FormDefaults::default());
        assert_eq!(form.metal_type, "Steel");
        assert_eq!(form.thickness, "0,45");
        assert_eq!(form.posts, "12");
        assert_eq!(form.length, "10");
        assert!(!form.coating);
        assert!(form.foundation);
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["fence_cli", "options", "--config", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Options { prices: None, metal_type: None }));
    }
}
