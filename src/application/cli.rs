use std::env;
use std::io;
use std::io::IsTerminal;
use std::path;
use std::process;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgGroup;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use super::render::Render;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AnalysisRequest;
use crate::domain::models::Languages;
use crate::domain::services::actions::help_text;
use crate::domain::services::RequestComposer;
use crate::infrastructure::backends::BackendManager;

pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("CODEDECK_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("codedeck");
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    process::exit(0);
}

fn render() -> Render {
    return Render::new(io::stdout().is_terminal());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn run_source(matches: &ArgMatches) -> Result<i32> {
    let file = matches.get_one::<String>("file");
    let source = match file {
        Some(file_path) => fs::read_to_string(file_path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    // An explicit --language wins, then the file extension, then config.
    let from_extension = file
        .and_then(|file_path| return path::Path::new(file_path).extension())
        .and_then(|ext| return Languages::from_extension(&ext.to_string_lossy()))
        .map(|lang| return lang.name.to_string());
    let language = matches
        .get_one::<String>(&ConfigKey::Language.to_string())
        .cloned()
        .or(from_extension)
        .unwrap_or_else(|| return Config::get(ConfigKey::Language));

    let stdin = matches
        .get_one::<String>("stdin")
        .cloned()
        .unwrap_or_default();
    let args = matches
        .get_many::<String>("args")
        .map(|vals| return vals.cloned().collect::<Vec<String>>())
        .unwrap_or_default();

    let request = RequestComposer::compose(&language, &source, &stdin, &args)?;
    let result = BackendManager::get()
        .executor
        .execute(request, CancellationToken::new())
        .await?;

    println!("{}", render().execution_result(&result));

    return Ok(result.exit_code.unwrap_or(1));
}

async fn print_languages(remote: bool) -> Result<()> {
    if !remote {
        println!("{}", render().languages());
        return Ok(());
    }

    let runtimes = BackendManager::get().executor.runtimes().await?;
    let lines = runtimes
        .iter()
        .map(|runtime| {
            let mut line = format!("- {} {}", runtime.language, runtime.version);
            if !runtime.aliases.is_empty() {
                line = format!("{line} (aliases: {})", runtime.aliases.join(", "));
            }
            return line;
        })
        .collect::<Vec<String>>();
    println!("{}", lines.join("\n"));

    return Ok(());
}

async fn analyze_resume(matches: &ArgMatches) -> Result<()> {
    let resume_path = match matches.get_one::<String>("resume") {
        Some(resume_path) => path::PathBuf::from(resume_path),
        None => bail!("A resume file is required"),
    };

    let job_description = if let Some(text) = matches.get_one::<String>("job-description") {
        text.to_string()
    } else if let Some(file_path) = matches.get_one::<String>("job-description-file") {
        fs::read_to_string(file_path).await?
    } else {
        bail!("A job description is required")
    };

    let request = AnalysisRequest {
        file_name: resume_path
            .file_name()
            .map(|name| return name.to_string_lossy().to_string())
            .unwrap_or_else(|| return "resume".to_string()),
        resume: fs::read(&resume_path).await?,
        job_description,
    };

    let result = BackendManager::get()
        .analyzer
        .analyze(request, CancellationToken::new())
        .await?;
    println!("{}", render().analysis(&result));

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for codedeck")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running codedeck with environment variable RUST_LOG=codedeck")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_run() -> Command {
    return Command::new("run")
        .about("Runs a source file once on the execution service and exits with the program's exit code. Reads the source from stdin when no file is given.")
        .arg(
            Arg::new("file")
                .help("Path to the source file.")
                .num_args(1),
        )
        .arg(
            Arg::new("stdin")
                .long("stdin")
                .help("Text passed to the program's stdin.")
                .num_args(1),
        )
        .arg(
            Arg::new("args")
                .help("Arguments passed to the program.")
                .num_args(0..)
                .last(true),
        );
}

fn subcommand_languages() -> Command {
    return Command::new("languages")
        .about("Lists the supported languages.")
        .arg(
            Arg::new("remote")
                .long("remote")
                .help("List the runtimes installed on the execution service instead.")
                .action(ArgAction::SetTrue),
        );
}

fn subcommand_analyze() -> Command {
    return Command::new("analyze")
        .about("Scores a resume against a job description.")
        .arg(
            Arg::new("resume")
                .short('r')
                .long("resume")
                .help("Path to the resume file.")
                .num_args(1)
                .required(true),
        )
        .arg(
            Arg::new("job-description")
                .short('j')
                .long("job-description")
                .help("Job description text.")
                .num_args(1),
        )
        .arg(
            Arg::new("job-description-file")
                .long("job-description-file")
                .help("Path to a file holding the job description.")
                .num_args(1),
        )
        .group(
            ArgGroup::new("job-description-args")
                .args(["job-description", "job-description-file"])
                .required(true),
        );
}

fn arg_config(key: ConfigKey, env_name: &'static str, help: String) -> Arg {
    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(env_name)
        .num_args(1)
        .help(help)
        .global(true);
}

pub fn build() -> Command {
    let colors = io::stdout().is_terminal();
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                let heading = format!("CONSOLE {line}");
                if colors {
                    return heading.bold().underline().to_string();
                }
                return heading;
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("codedeck")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("console").about("Start the interactive console. This is the default."))
        .subcommand(subcommand_run())
        .subcommand(subcommand_languages())
        .subcommand(subcommand_analyze())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            arg_config(
                ConfigKey::ConfigFile,
                "CODEDECK_CONFIG_FILE",
                format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)),
            )
            .short('c'),
        )
        .arg(
            arg_config(
                ConfigKey::Language,
                "CODEDECK_LANGUAGE",
                format!("Language used to run code. Accepts names and aliases. [default: {}]", Config::default(ConfigKey::Language)),
            )
            .short('l'),
        )
        .arg(arg_config(
            ConfigKey::ExecutionURL,
            "CODEDECK_EXECUTION_URL",
            format!("Piston compatible execution service URL. [default: {}]", Config::default(ConfigKey::ExecutionURL)),
        ))
        .arg(arg_config(
            ConfigKey::ExecutionTimeout,
            "CODEDECK_EXECUTION_TIMEOUT",
            format!("Time to wait in milliseconds for a program to finish running. [default: {}]", Config::default(ConfigKey::ExecutionTimeout)),
        ))
        .arg(arg_config(
            ConfigKey::ChatURL,
            "CODEDECK_CHAT_URL",
            format!("Streaming chat assistant URL. [default: {}]", Config::default(ConfigKey::ChatURL)),
        ))
        .arg(arg_config(
            ConfigKey::ChatToken,
            "CODEDECK_CHAT_TOKEN",
            "Bearer token sent to the chat assistant.".to_string(),
        ))
        .arg(arg_config(
            ConfigKey::AnalysisURL,
            "CODEDECK_ANALYSIS_URL",
            format!("Resume analysis service URL. [default: {}]", Config::default(ConfigKey::AnalysisURL)),
        ))
        .arg(arg_config(
            ConfigKey::PreferencesFile,
            "CODEDECK_PREFERENCES_FILE",
            format!("Path to the saved editor files and preferences. [default: {}]", Config::default(ConfigKey::PreferencesFile)),
        ));
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_dir().join("debug.log").to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    println!("{}", ConfigKey::VARIANTS.join("\n"));
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("console", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        Some(("run", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            let code = run_source(subcmd_matches).await?;
            process::exit(code);
        }
        Some(("languages", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            print_languages(subcmd_matches.get_flag("remote")).await?;
            return Ok(false);
        }
        Some(("analyze", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            analyze_resume(subcmd_matches).await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
