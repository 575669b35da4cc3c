use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tributes::build::{publish, rebuild_archive};
use tributes::config::Config;
use tributes::data;
use tributes::migrate::migrate;
use tributes::search::{write_index, write_matches};
use tributes::submission::Submission;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tributes=info".parse()?))
        .with_target(false)
        .init();

    let matches = App::new("tributes")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Publishes pet memorial tributes as a static archive")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("project")
                .long("project")
                .value_name("DIR")
                .global(true)
                .help("The project directory (searched upward for tributes.yaml)"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("DIR")
                .global(true)
                .help("The output directory (defaults to {project}/output)"),
        )
        .subcommand(
            SubCommand::with_name("publish")
                .about("Publishes a tribute and rebuilds the archive")
                .arg(
                    Arg::with_name("from")
                        .long("from")
                        .value_name("FILE")
                        .conflicts_with_all(&["name", "message"])
                        .help("A YAML submission file"),
                )
                .arg(
                    Arg::with_name("name")
                        .long("name")
                        .value_name("PET_NAME")
                        .required_unless("from"),
                )
                .arg(
                    Arg::with_name("message")
                        .long("message")
                        .value_name("TEXT")
                        .required_unless("from")
                        .help("The tribute message (Markdown)"),
                )
                .arg(Arg::with_name("first-name").long("first-name").value_name("NAME"))
                .arg(Arg::with_name("state").long("state").value_name("STATE"))
                .arg(Arg::with_name("breed").long("breed").value_name("BREED"))
                .arg(Arg::with_name("years").long("years").value_name("YEARS"))
                .arg(Arg::with_name("photo").long("photo").value_name("FILE")),
        )
        .subcommand(
            SubCommand::with_name("build")
                .about("Rebuilds the archive pages and static assets from data.json"),
        )
        .subcommand(
            SubCommand::with_name("migrate")
                .about("Recovers data.json from existing tribute pages"),
        )
        .subcommand(
            SubCommand::with_name("search")
                .about("Lists the tributes the archive search shows for a query")
                .arg(Arg::with_name("QUERY").default_value(""))
                .arg(
                    Arg::with_name("index")
                        .long("index")
                        .help("Prints every search index entry instead"),
                ),
        )
        .get_matches();

    let config = load_config(&matches)?;
    match matches.subcommand() {
        ("publish", Some(m)) => {
            let entry = publish(&config, submission(m)?, today())?;
            let url = config.tribute_url(&entry.slug)?;
            info!(%url, "published");
        }
        ("build", _) => {
            rebuild_archive(&config)?;
        }
        ("migrate", _) => {
            migrate(&config, today())?;
        }
        ("search", Some(m)) => {
            search(
                &config,
                m.value_of("QUERY").unwrap_or_default(),
                m.is_present("index"),
            )?;
        }
        (other, _) => return Err(anyhow!("Unknown command `{}`", other)),
    }
    Ok(())
}

fn load_config(matches: &ArgMatches) -> Result<Config> {
    let output = matches.value_of("output").map(Path::new);
    match matches.value_of("project") {
        Some(project) => Config::from_directory(Path::new(project), output),
        None => Config::from_directory(&std::env::current_dir()?, output),
    }
}

fn submission(m: &ArgMatches) -> Result<Submission> {
    if let Some(path) = m.value_of("from") {
        return Ok(Submission::from_file(Path::new(path))?);
    }
    let arg = |name: &str| m.value_of(name).unwrap_or_default().to_owned();
    Ok(Submission {
        pet_name: arg("name"),
        first_name: arg("first-name"),
        state: arg("state"),
        breed: arg("breed"),
        years: arg("years"),
        message: arg("message"),
        photo: m.value_of("photo").map(PathBuf::from),
    })
}

fn search(config: &Config, query: &str, print_index: bool) -> Result<()> {
    let entries = data::load(&config.data_file)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match print_index {
        true => write_index(&mut out, &entries)?,
        false => {
            let shown = write_matches(&mut out, &entries, query)?;
            info!(shown, total = entries.len(), "searched tributes");
        }
    }
    Ok(())
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
