use clap::{ArgAction, Parser, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "class-version", version)]
#[command(about = "Show which Java release compiled a class file, jar, directory, URL or Maven dependency")]
pub struct Cli {
    /// Files, directories, URLs or `group:artifact:version[:classifier]` coordinates
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Repository base URL for coordinates [env: CLASS_VERSION_REPO]
    #[arg(long, value_name = "URL")]
    pub repo: Option<String>,

    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// How majors 49-51 are named: `1.5` (dotted) or `5` (plain)
    #[arg(long, value_enum, default_value_t = Naming::Dotted)]
    pub naming: Naming,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Naming {
    Dotted,
    Plain,
}
