use clap::Parser;

#[derive(Debug, Default, Parser)]
#[command(
    name = "taipei-households",
    version,
    about = "Taipei household statistics by district"
)]
pub struct CliArgs {
    /// Print the district table and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the primary data endpoint
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the bundled fallback snapshot
    #[arg(long, value_name = "PATH")]
    pub fallback: Option<String>,

    /// Keep the session store in this SQLite file instead of memory
    #[arg(long = "session-db", value_name = "PATH")]
    pub session_db: Option<String>,

    /// Region marker records must contain
    #[arg(long, value_name = "TEXT")]
    pub region: Option<String>,

    /// Prefix stripped from selector labels
    #[arg(long, value_name = "TEXT")]
    pub prefix: Option<String>,

    /// District selected on start, e.g. 臺北市大安區
    #[arg(long, value_name = "KEY")]
    pub district: Option<String>,
}

impl CliArgs {
    /// Exports the flags that were given as the variables the config reads.
    pub fn apply_env_overrides(&self) {
        let overrides = [
            ("API_URL", &self.api_url),
            ("FALLBACK_DATA_PATH", &self.fallback),
            ("SESSION_DB", &self.session_db),
            ("REGION_MARKER", &self.region),
            ("LABEL_PREFIX", &self.prefix),
            ("DISTRICT", &self.district),
        ];
        for (name, value) in overrides {
            if let Some(value) = value {
                std::env::set_var(name, value);
            }
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub const fn wants_headless(&self) -> bool {
        self.headless || self.json
    }
}
