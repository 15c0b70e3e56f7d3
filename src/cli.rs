use clap::Parser;

/// Command line of the age calculator.
///
/// With all of `--day`, `--month` and `--year` given the age is computed
/// once; otherwise the missing fields are prompted for on stdin.
#[derive(Parser, Debug)]
#[command(
    name = "agecalc",
    version,
    about = "Compute elapsed years, months and days since a birth date."
)]
pub struct Cli {
    /// Day of birth (1-31)
    #[arg(long)]
    pub day: Option<String>,

    /// Month of birth (1-12)
    #[arg(long)]
    pub month: Option<String>,

    /// Year of birth, up to the current year
    #[arg(long, allow_hyphen_values = true)]
    pub year: Option<String>,

    /// Pin "today" (YYYY-MM-DD) instead of reading the system clock.
    /// Falls back to the AGECALC_TODAY environment variable.
    #[arg(long)]
    pub today: Option<String>,

    /// Print results and errors as JSON
    #[arg(long)]
    pub json: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// True when every field was supplied on the command line.
    pub fn is_one_shot(&self) -> bool {
        self.day.is_some() && self.month.is_some() && self.year.is_some()
    }
}
