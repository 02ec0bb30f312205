use crate::prelude::{new_table, println, *};
use devtools_core::units::{Conversion, UnitFamily, ANGLE, DATA, LENGTH, WEIGHT};
use prettytable::row;

#[derive(Debug, clap::Parser)]
#[command(name = "units")]
#[command(about = "Express a value in every unit of a family")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Lengths (mm, cm, m, km, in, ft, yd, mi)
    #[clap(name = "length")]
    Length(ConvertOptions),

    /// Weights (mg, g, kg, t, oz, lb, st)
    #[clap(name = "weight")]
    Weight(ConvertOptions),

    /// Angles (deg, rad, grad, turn)
    #[clap(name = "angle")]
    Angle(ConvertOptions),

    /// Data sizes (B, KB, MB, GB, TB)
    #[clap(name = "data")]
    Data(ConvertOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ConvertOptions {
    /// Value to convert
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Source unit
    #[arg(value_name = "UNIT")]
    pub from: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Length(options) => convert(options, global, &LENGTH),
        Commands::Weight(options) => convert(options, global, &WEIGHT),
        Commands::Angle(options) => convert(options, global, &ANGLE),
        Commands::Data(options) => convert(options, global, &DATA),
    }
}

fn convert(options: ConvertOptions, global: crate::Global, family: &UnitFamily) -> Result<()> {
    if global.verbose {
        println!(
            "Converting {} {} across the {} family...",
            options.value, options.from, family.name
        );
    }

    let conversions = family
        .convert_value(&options.value, &options.from)
        .map_err(|e| eyre!(e))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&conversions)?);
        return Ok(());
    }

    let mut table = new_table();
    table.set_titles(row!["Unit", "Value"]);
    for conversion in &conversions {
        table.add_row(row![conversion.unit, format_value(conversion.value)]);
    }
    println!("{table}");

    Ok(())
}

/// Trim trailing zeros without losing precision on small fractions.
fn format_value(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{value}")
    } else {
        let text = format!("{value:.6}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
