use std::path::PathBuf;
use std::time::Duration;

/// Service configuration.
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | PORT | 3001 | HTTP listen port |
/// | DATABASE_URL | sqlite://hr_database.db?mode=rwc | SQLite connection string |
/// | UPLOADS_DIR | uploads | Where avatar images are stored |
/// | SEED_SAMPLE_DATA | true | Insert sample data into an empty store |
/// | REPORT_DELAY_MS | 3000 | Delay before a generated report completes |
///
/// ```ignore
/// PORT=8080 UPLOADS_DIR=/srv/hr/uploads hrdesk
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub uploads_dir: PathBuf,
    pub seed_sample_data: bool,
    pub report_delay: Duration,
}

impl Config {
    /// Loads configuration from the environment, falling back to
    /// [`Config::default`] for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            uploads_dir: std::env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.uploads_dir),
            seed_sample_data: std::env::var("SEED_SAMPLE_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.seed_sample_data),
            report_delay: std::env::var("REPORT_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(defaults.report_delay, Duration::from_millis),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3001,
            database_url: "sqlite://hr_database.db?mode=rwc".to_string(),
            uploads_dir: PathBuf::from("uploads"),
            seed_sample_data: true,
            report_delay: Duration::from_millis(3000),
        }
    }
}
