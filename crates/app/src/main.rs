use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::config::parse_timeout_secs;
use services::{ApiConfig, AppServices, ProfileService, ProjectService, QuestionService};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};
use ui::{App, Session, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTimeout { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    session: Session,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn session(&self) -> Session {
        self.session.clone()
    }

    fn profiles(&self) -> Arc<ProfileService> {
        self.services.profiles()
    }

    fn questions(&self) -> Arc<QuestionService> {
        self.services.questions()
    }

    fn projects(&self) -> Arc<ProjectService> {
        self.services.projects()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    api: ApiConfig,
    username: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--backend <url>] [--timeout <secs>] [--as <username>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --backend {}", services::config::DEFAULT_BACKEND_URL);
    eprintln!(
        "  --timeout {}",
        services::config::DEFAULT_REQUEST_TIMEOUT.as_secs()
    );
    eprintln!("  no --as: browse as a guest");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  HIVE_BACKEND_URL, HIVE_REQUEST_TIMEOUT_SECS, HIVE_USERNAME, RUST_LOG");
}

impl Args {
    /// Apply command line flags on top of `api`, which already carries env overrides.
    fn parse(
        api: ApiConfig,
        username: Option<String>,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Self, ArgsError> {
        let mut parsed = Self { api, username };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--backend" => {
                    let value = require_value(args, "--backend")?;
                    parsed.api.base_url = value.trim().to_owned();
                }
                "--timeout" => {
                    let value = require_value(args, "--timeout")?;
                    parsed.api.request_timeout = parse_timeout_secs(&value)
                        .map_err(|_| ArgsError::InvalidTimeout { raw: value })?;
                }
                "--as" | "--user" => {
                    let flag = if arg == "--user" { "--user" } else { "--as" };
                    let value = require_value(args, flag)?;
                    let value = value.trim();
                    parsed.username = (!value.is_empty()).then(|| value.to_owned());
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(log_fmt::layer())
        .init();
}

/// Look up the launch user. A missing or unknown user leaves the app signed out.
async fn resolve_session(profiles: &ProfileService, username: Option<&str>) -> Session {
    let Some(username) = username else {
        return Session::signed_out();
    };
    match profiles.load_user(username).await {
        Ok(user) => {
            info!(%username, "signed in");
            Session::signed_in(user.user, user.username)
        }
        Err(err) => {
            warn!(%username, error = %err, "could not sign in, continuing as guest");
            Session::signed_out()
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let api = ApiConfig::from_env()?;
    let username = std::env::var("HIVE_USERNAME")
        .ok()
        .filter(|value| !value.trim().is_empty());
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(api, username, &mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let services = AppServices::connect(&parsed.api)?;
    let session = resolve_session(&services.profiles(), parsed.username.as_deref()).await;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { session, services });
    let context = build_app_context(&app);

    // Some dev setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Hive")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
