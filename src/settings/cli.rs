use super::Parser;

#[derive(Parser, Debug)]
#[command(about = "User service over HTTP")]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(long)]
    pub settings: Option<String>,
}
