use browser_pages::api::ReqwestClient;
use browser_pages::core::config::{ENV_API_URL, ENV_APP_URL, ENV_SCREENSHOT_DIR};
use browser_pages::core::Config;
use browser_pages::suites::{self, SuiteReport};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "browser-pages", about = "Run page-object and API suites")]
struct Cli {
    /// JSON config file; env vars and flags override it
    #[arg(long, global = true, env = "BROWSER_PAGES_CONFIG")]
    config: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exercise the fixture REST API
    Api {
        #[arg(long, env = ENV_API_URL)]
        base_url: Option<String>,
    },
    /// Drive the login and dashboard screens in Chrome
    #[cfg(feature = "chrome")]
    Login {
        #[arg(long, env = ENV_APP_URL)]
        app_url: Option<String>,

        /// Show the browser window
        #[arg(long)]
        headed: bool,

        #[arg(long, env = ENV_SCREENSHOT_DIR)]
        screenshot_dir: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> browser_pages::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply_env()
}

fn print_report(report: &SuiteReport, as_json: bool) {
    if as_json {
        match serde_json::to_string_pretty(report) {
            Ok(text) => println!("{}", text),
            Err(e) => error!("could not serialize report: {}", e),
        }
        return;
    }

    for outcome in &report.outcomes {
        let mark = if outcome.passed { "ok  " } else { "FAIL" };
        println!("{} {}", mark, outcome.name);
        if let Some(detail) = &outcome.detail {
            println!("       {}", detail);
        }
    }
    println!(
        "{}: {} passed, {} failed",
        report.suite,
        report.passed(),
        report.failed()
    );
}

async fn run(cli: Cli) -> browser_pages::Result<SuiteReport> {
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Api { base_url } => {
            if let Some(url) = base_url {
                config.api.base_url = url;
            }
            info!(base_url = %config.api.base_url, "running api suite");
            let client = ReqwestClient::new(&config.api)?;
            suites::api::run_suite(&client, &config.api.base_url).await
        }
        #[cfg(feature = "chrome")]
        Command::Login {
            app_url,
            headed,
            screenshot_dir,
        } => {
            if let Some(url) = app_url {
                config.app.base_url = url;
            }
            if headed {
                config.browser.headless = false;
            }
            if let Some(dir) = screenshot_dir {
                config.app.screenshot_dir = dir;
            }
            info!(base_url = %config.app.base_url, "running login suite");

            let make_driver = || {
                browser_pages::ChromeDriver::launch(&config.browser, &config.app.base_url)
            };
            Ok(suites::login::run_suite(make_driver, Some(config.app.screenshot_dir.as_path())).await)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let as_json = cli.json;

    match run(cli).await {
        Ok(report) => {
            print_report(&report, as_json);
            if report.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn env_of(command: &clap::Command, id: &str) -> Option<String> {
        command
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .and_then(|arg| arg.get_env())
            .map(|env| env.to_string_lossy().into_owned())
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn url_flags_fall_back_to_the_config_env_vars() {
        let cli = Cli::command();
        let api = cli.find_subcommand("api").unwrap();

        assert_eq!(env_of(api, "base_url").as_deref(), Some(ENV_API_URL));
        assert_eq!(env_of(&cli, "config").as_deref(), Some("BROWSER_PAGES_CONFIG"));

        #[cfg(feature = "chrome")]
        {
            let login = cli.find_subcommand("login").unwrap();
            assert_eq!(env_of(login, "app_url").as_deref(), Some(ENV_APP_URL));
            assert_eq!(
                env_of(login, "screenshot_dir").as_deref(),
                Some(ENV_SCREENSHOT_DIR)
            );
        }
    }
}
