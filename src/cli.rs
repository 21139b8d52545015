use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CliArgs {
    /// URL of the resource to download
    pub url: String,

    /// Number of concurrent ranges (must be >= 1)
    #[arg(short = 'n', long = "parts", default_value_t = parget::DEFAULT_PART_COUNT)]
    pub parts: usize,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<String>,
}
