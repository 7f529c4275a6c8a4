use clap::Parser as ClapParser;
use tracing::Level;

pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

#[allow(clippy::upper_case_acronyms)]
#[derive(ClapParser)]
#[command(name="mintgate", author, version=VERSION_STRING, about, long_about = None)]
pub struct CLI {
    #[clap(flatten)]
    pub opts: Options,
}

#[derive(ClapParser)]
pub struct Options {
    #[arg(
        long = "allowlist",
        value_name = "ALLOWLIST_FILE_PATH",
        help = "JSON file with the ordered allowlist: {\"addresses\": [\"0x..\", ..]}"
    )]
    pub allowlist: String,
    #[arg(long = "log.level", default_value_t = Level::INFO, value_name = "LOG_LEVEL")]
    pub log_level: Level,
}
