use clap::Parser;
use std::time::Duration;

use crate::state::DEFAULT_MAX_BODY_BYTES;
use crate::store::DEFAULT_TABLE;

// One year, longer windows are treated as a typo
pub const MAX_RATE_WINDOW_SECS: u64 = 365 * 24 * 60 * 60;

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "contact-gateway")]
#[command(about = "Contact form submission endpoint with per-client rate limiting")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Hosted database base url, e.g. https://<project>.supabase.co
    #[arg(long, env = "SUPABASE_URL", required_unless_present = "dry_run")]
    pub supabase_url: Option<String>,

    // Service role key used for inserts
    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true, required_unless_present = "dry_run")]
    pub service_role_key: Option<String>,

    // Table receiving inquiries
    #[arg(long, env = "CONTACT_TABLE", default_value = DEFAULT_TABLE)]
    pub table: String,

    // Rate limit max submissions per window
    #[arg(long, env = "RATE_LIMIT", default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, env = "RATE_WINDOW", default_value_t = 3600, value_parser = clap::value_parser!(u64).range(1..=MAX_RATE_WINDOW_SECS))]
    pub rate_window: u64,

    // Request bodies above this many bytes are answered with a generic error
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    // Store request timeout in seconds
    #[arg(long, env = "STORE_TIMEOUT", default_value_t = 10)]
    pub store_timeout: u64,

    // Expired rate limit entries are swept this often (seconds, 0 = never)
    #[arg(long, env = "SWEEP_INTERVAL", default_value_t = 300)]
    pub sweep_interval: u64,

    // Keep inquiries in memory instead of the hosted database
    #[arg(long, env = "DRY_RUN")]
    pub dry_run: bool,
}

impl Args {
    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout)
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval > 0).then(|| Duration::from_secs(self.sweep_interval))
    }
}
