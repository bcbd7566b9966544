use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use difuso::assessor::http::HttpAssessor;
use difuso::banner::{BannerInfo, print_banner, print_session_summary};
use difuso::commands::{CommandResult, Input, handle_command, parse_input};
use difuso::config::{Config, debounce_from_millis, timeout_from_secs};
use difuso::consts::DEFAULT_SERVICE_URL;
use difuso::form::{Field, Sex};
use difuso::session::{Progress, Session};
use difuso::trigger::StalenessPolicy;
use difuso::view::render;

#[derive(Parser)]
#[command(name = "difuso", version, about = "Riesgo por IMC evaluado con lógica difusa.")]
struct Cli {
    /// Base URL of the risk service
    #[arg(short, long, env = "DIFUSO_URL", default_value = DEFAULT_SERVICE_URL)]
    url: String,

    /// Request timeout in seconds, 0 = default
    #[arg(short, long, env = "DIFUSO_TIMEOUT_SECS", default_value_t = 0)]
    timeout: u64,

    /// Wait this long for input to settle before requesting, 0 = off
    #[arg(long, env = "DIFUSO_DEBOUNCE_MS", default_value_t = 0)]
    debounce_ms: u64,

    /// Which late answers are dropped
    #[arg(long, value_enum, default_value_t, env = "DIFUSO_POLICY")]
    policy: StalenessPolicy,

    /// Height in cm (one-shot mode needs all four inputs)
    #[arg(long, requires_all = ["peso", "edad", "genero"])]
    altura: Option<String>,

    /// Weight in kg
    #[arg(long, requires_all = ["altura", "edad", "genero"])]
    peso: Option<String>,

    /// Age in years
    #[arg(long, requires_all = ["altura", "peso", "genero"])]
    edad: Option<String>,

    /// masculino or femenino
    #[arg(long, requires_all = ["altura", "peso", "edad"])]
    genero: Option<Sex>,
}

impl Cli {
    fn config(&self) -> Config {
        Config::default()
            .with_url(self.url.clone())
            .with_timeout(timeout_from_secs(self.timeout))
            .with_debounce(debounce_from_millis(self.debounce_ms))
            .with_policy(self.policy)
    }

    fn one_shot(&self) -> Option<([(Field, &str); 3], Sex)> {
        let fields = [
            (Field::Height, self.altura.as_deref()?),
            (Field::Weight, self.peso.as_deref()?),
            (Field::Age, self.edad.as_deref()?),
        ];
        Some((fields, self.genero?))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    let assessor = HttpAssessor::new(&config.service_url)
        .with_context(|| format!("invalid service url: {}", config.service_url))?;
    let mut session = Session::new(Arc::new(assessor), &config);

    // One-shot mode: fill the form, wait for the answer, print and exit
    if let Some((fields, sex)) = cli.one_shot() {
        for (field, value) in fields {
            session
                .input(field, value)
                .map_err(|reason| anyhow::anyhow!("{field}: {reason}"))?;
        }
        session.set_sex(Some(sex));
        session.settle().await;
        print!("{}", render(session.form(), session.store()));
        if session.store().current().is_none() {
            anyhow::bail!("no result from {}", config.service_url);
        }
        return Ok(());
    }

    print_banner(&BannerInfo {
        service: &config.service_url,
        timeout: config.timeout,
        debounce: config.debounce,
        policy: config.policy,
    });

    // REPL: async stdin so answers can land while waiting at the prompt
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\ndifuso> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            progress = session.tick(), if !session.is_idle() => {
                report(&session, progress);
                continue;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match handle_command(input, &mut session) {
            CommandResult::Quit => break,
            CommandResult::Handled => continue,
            CommandResult::NotACommand => {}
        }

        match parse_input(input) {
            Ok(Input::Field { field, value }) => match session.input(field, &value) {
                Ok(Some(sequence)) => println!("  → request #{sequence}"),
                Ok(None) => {}
                Err(reason) => eprintln!("  ✗ {field}: {reason} (kept {:?})", session.form().value(field)),
            },
            Ok(Input::Sex(sex)) => {
                if let Some(sequence) = session.set_sex(sex) {
                    println!("  → request #{sequence}");
                }
            }
            Err(e) => eprintln!("  ✗ {e}"),
        }
    }

    print_session_summary(session.trigger().last_issued());
    Ok(())
}

fn report(session: &Session, progress: Progress) {
    match progress {
        Progress::Applied(_) | Progress::Failed { .. } => {
            println!();
            print!("{}", render(session.form(), session.store()));
        }
        Progress::Issued(sequence) => println!("  → request #{sequence}"),
        Progress::Discarded(_) | Progress::Idle => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_one_shot_is_rejected() {
        let err = Cli::try_parse_from(["difuso", "--altura", "170"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let args = ["difuso", "--altura", "170", "--peso", "70", "--edad", "30"];
        let err = Cli::try_parse_from(args).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn full_one_shot_parses() {
        let cli = Cli::try_parse_from([
            "difuso", "--altura", "170", "--peso", "70", "--edad", "30", "--genero", "f",
        ])
        .unwrap();
        let (fields, sex) = cli.one_shot().unwrap();
        assert_eq!(fields[0], (Field::Height, "170"));
        assert_eq!(sex, Sex::Femenino);
    }

    #[test]
    fn no_inputs_means_repl() {
        let cli = Cli::try_parse_from(["difuso"]).unwrap();
        assert!(cli.one_shot().is_none());
    }

    #[test]
    fn flags_build_config() {
        let cli = Cli::try_parse_from([
            "difuso",
            "--url",
            "http://riesgo.local:9000",
            "--timeout",
            "0",
            "--debounce-ms",
            "250",
            "--policy",
            "last-applied",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.service_url, "http://riesgo.local:9000");
        assert_eq!(config.timeout, difuso::consts::DEFAULT_TIMEOUT);
        assert_eq!(config.debounce, Some(std::time::Duration::from_millis(250)));
        assert_eq!(config.policy, StalenessPolicy::LastApplied);
    }
}
