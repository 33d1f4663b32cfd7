//! browserstats - Browser feature support statistics
//!
//! Entry point for the command-line front end.

use browserstats::{
    AgentFilter, AggregateResult, BrowserMatch, DataSource, DatasetLoader, GroupBy,
    LoaderConfig, StatsEngine, SupportState, NAME, VERSION,
};
use std::env;

const USAGE: &str = "\
Usage: browserstats <SOURCE> [FEATURE]... [OPTIONS]

SOURCE is a path, file:// URL or http(s):// URL of the dataset JSON.

Options:
  --type <TYPE>      Only include agents of this type (default: all)
  --state <STATE>    Acceptable support state, repeatable (default: y)
  --group <GROUP>    browser, type or none (default: browser)
  --json             Print results as JSON
  --list             List known feature names and exit
  --help             Show this message";

/// Command-line options
#[derive(Debug, Clone, PartialEq)]
struct Options {
    source: String,
    features: Vec<String>,
    filter: AgentFilter,
    states: Vec<SupportState>,
    group: Option<GroupBy>,
    json: bool,
    list: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: String::new(),
            features: Vec::new(),
            filter: AgentFilter::All,
            states: Vec::new(),
            group: Some(GroupBy::Name),
            json: false,
            list: false,
        }
    }
}

enum Command {
    Run(Options),
    Help,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            println!("{} v{}\n\n{}", NAME, VERSION, USAGE);
            return;
        }
        Err(message) => {
            eprintln!("error: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&options) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--json" => options.json = true,
            "--list" => options.list = true,
            "--type" => {
                let value = iter.next().ok_or("--type needs a value")?;
                options.filter = value.parse().unwrap_or_default();
            }
            "--state" => {
                let value = iter.next().ok_or("--state needs a value")?;
                options.states.push(SupportState::parse(value));
            }
            "--group" => {
                let value = iter.next().ok_or("--group needs a value")?;
                options.group = match value.as_str() {
                    "browser" | "name" => Some(GroupBy::Name),
                    "type" => Some(GroupBy::Type),
                    "none" => None,
                    other => return Err(format!("unknown group {:?}", other)),
                };
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option {}", flag));
            }
            value if options.source.is_empty() => options.source = value.to_string(),
            value => options.features.push(value.to_string()),
        }
    }

    if options.source.is_empty() {
        return Err("missing dataset source".to_string());
    }
    if options.states.is_empty() {
        options.states.push(SupportState::Supported);
    }

    Ok(Command::Run(options))
}

fn run(options: &Options) -> browserstats::Result<()> {
    let source: DataSource = options.source.parse()?;
    let loader = DatasetLoader::new(LoaderConfig {
        filter: options.filter.clone(),
        ..Default::default()
    });
    let engine = loader.load(&source)?;

    if options.list {
        print_features(&engine, options.json)?;
        return Ok(());
    }

    match options.group {
        Some(group_by) => {
            let groups =
                engine.features_by_property(&options.features, &options.states, group_by)?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                print_groups(&groups);
            }
        }
        None => {
            let matches = engine.query(&options.features, &options.states)?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else {
                print_matches(&matches);
            }
        }
    }

    Ok(())
}

fn print_features(engine: &StatsEngine, json: bool) -> browserstats::Result<()> {
    let names = engine.list_features();
    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    for name in names {
        match engine.get_feature(name).and_then(|f| f.title()) {
            Some(title) => println!("{:<32} {}", name, title),
            None => println!("{}", name),
        }
    }
    Ok(())
}

fn print_groups(groups: &[AggregateResult]) {
    let total: f64 = groups.iter().map(|g| g.share).sum();

    for group in groups {
        println!(
            "{:<28} since {:>6}  share {:>8.4}  ({} versions)",
            group.name,
            group.since.to_string(),
            group.share,
            group.len()
        );
    }
    println!("{:<28} {:>20.4}", "total", total);
}

fn print_matches(matches: &[BrowserMatch]) {
    for m in matches {
        println!(
            "{:<24} {:<28} {:<10} {:>8.4}",
            m.key.to_string(),
            m.name,
            m.browser_type,
            m.browser_share
        );
    }
}
