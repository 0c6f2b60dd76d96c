use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use csprop::generate::GenerateConfig;
use csprop::{Propagator, SearchConfig};

#[derive(Clone)]
pub(crate) struct Options {
    source: Source,
    search: SearchConfig,
    save_path: Option<PathBuf>,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let source = if let Some(path) = matches.value_of("input") {
            Source::File(path.into())
        } else {
            let default = GenerateConfig::default();
            Source::Generate(GenerateConfig {
                variables: parse_arg(matches, "variables")?.unwrap_or(default.variables),
                domain_size: parse_arg(matches, "domain_size")?.unwrap_or(default.domain_size),
                density: parse_arg(matches, "density")?.unwrap_or(default.density),
                tightness: parse_arg(matches, "tightness")?.unwrap_or(default.tightness),
                seed: parse_arg(matches, "seed")?,
            })
        };
        let propagator: Propagator = parse_arg(matches, "propagator")?.unwrap_or_default();
        let solution_limit = match parse_arg::<usize>(matches, "limit")? {
            Some(0) => None,
            Some(limit) => Some(limit),
            None => SearchConfig::default().solution_limit,
        };
        let save_path = matches.value_of("save").map(PathBuf::from);
        if save_path.is_some() && source.file().is_some() {
            return Err(anyhow!("--save can only be used with --generate"));
        }
        Ok(Self {
            source,
            search: SearchConfig {
                propagator,
                solution_limit,
            },
            save_path,
        })
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn search(&self) -> &SearchConfig {
        &self.search
    }

    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }
}

#[derive(Clone)]
pub(crate) enum Source {
    File(PathBuf),
    Generate(GenerateConfig),
}

impl Source {
    pub fn file(&self) -> Option<&Path> {
        match self {
            Source::File(path) => Some(path),
            _ => None,
        }
    }
}

fn parse_arg<T>(matches: &ArgMatches<'_>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|s| s.parse::<T>().with_context(|| format!("invalid {}: \"{}\"", name, s)))
        .transpose()
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, AppSettings, Arg, ArgGroup};

    App::new("csprop")
        .author("Cameron Steffen <cam.steffen94@gmail.com>")
        .about("Solve constraint satisfaction problems")
        .setting(AppSettings::ArgRequiredElseHelp)
        .group(
            ArgGroup::with_name("source")
                .args(&["generate", "input"])
                .required(true),
        )
        .arg(
            Arg::with_name("generate")
                .short("g")
                .long("generate")
                .help("generate a random CSP")
                .display_order(1),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("PATH")
                .help("read a CSP from a file")
                .display_order(1),
        )
        .arg(
            Arg::with_name("propagator")
                .short("p")
                .long("propagator")
                .takes_value(true)
                .possible_values(&["bt", "fc", "gac"])
                .help("the propagator used during search (default gac)"),
        )
        .arg(
            Arg::with_name("limit")
                .short("l")
                .long("limit")
                .takes_value(true)
                .value_name("N")
                .help("stop after N solutions, 0 finds all solutions (default 1)"),
        )
        .arg(
            Arg::with_name("variables")
                .long("variables")
                .takes_value(true)
                .requires("generate")
                .help("the number of variables of the generated CSP"),
        )
        .arg(
            Arg::with_name("domain_size")
                .long("domain-size")
                .takes_value(true)
                .requires("generate")
                .help("the number of values in each domain of the generated CSP"),
        )
        .arg(
            Arg::with_name("density")
                .long("density")
                .takes_value(true)
                .requires("generate")
                .help("the probability that two variables are constrained"),
        )
        .arg(
            Arg::with_name("tightness")
                .long("tightness")
                .takes_value(true)
                .requires("generate")
                .help("the probability that a tuple is excluded from a constraint"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .requires("generate")
                .help("seed for the random generator"),
        )
        .arg(
            Arg::with_name("save")
                .short("s")
                .long("save")
                .takes_value(true)
                .value_name("PATH")
                .requires("generate")
                .help("save the generated CSP to a file"),
        )
}
