use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::error;

use growth::GrowthError;

mod evaluate;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "growth",
    about = "Infant growth percentiles from the WHO child growth standards",
    allow_negative_numbers = true
)]
pub struct Cli {
    /// Use weight measurement of pounds
    #[arg(short = 'p', long = "pounds")]
    pub pounds: bool,

    /// Use length and head circumference measurement of inches
    #[arg(short = 'i', long = "inches")]
    pub inches: bool,

    /// The length of the baby's head circumference
    #[arg(short = 'c', long = "head")]
    pub head: Option<f64>,

    /// The length of the baby
    #[arg(short = 'l', long = "length")]
    pub length: Option<f64>,

    /// The weight of the baby
    #[arg(short = 'w', long = "weight")]
    pub weight: Option<f64>,

    /// How many months old the baby is
    #[arg(short = 'm', long = "months")]
    pub months: i64,

    /// Days on top of the months (5 months 2 days old is `-m 5 -d 2`)
    #[arg(short = 'd', long = "days")]
    pub days: Option<i64>,

    /// The baby's gender, 'boy' or 'girl'
    #[arg(short = 'g', long = "gender")]
    pub gender: String,

    /// Folder holding the reference tables, defaults to $GROWTH_TABLES_DIR
    /// then to the folder of this executable
    #[arg(long = "tables")]
    pub tables: Option<std::path::PathBuf>,

    #[arg(long = "format", value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    match evaluate::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<GrowthError>() {
            Some(GrowthError::Validation(message)) => {
                println!("Error: {}", message);
                ExitCode::from(2)
            }
            _ => {
                error!("{:#}", err);
                eprintln!("Error: {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}
