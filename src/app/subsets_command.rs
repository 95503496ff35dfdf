use super::{app_helper, command::Command, common};
use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;
use qbaf_relations::{utils::set_algebra, Argument, ArgumentSet};
use std::collections::HashSet;

const CMD_NAME: &str = "subsets";

const ARG_ELEMENTS: &str = "ELEMENTS";
const ARG_SIZE: &str = "SIZE";
const ARG_SUPERSET: &str = "SUPERSET";

pub(crate) struct SubsetsCommand;

impl SubsetsCommand {
    pub(crate) fn new() -> Self {
        SubsetsCommand
    }
}

fn format_subset(subset: &HashSet<Argument<String>>) -> String {
    let arguments = subset.iter().cloned().collect::<Vec<_>>();
    format!("{{{}}}", common::format_argument_list(&arguments))
}

impl<'a> Command<'a> for SubsetsCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Lists the subsets of a given size of a set of arguments")
            .setting(AppSettings::DisableVersion)
            .arg(
                Arg::with_name(ARG_ELEMENTS)
                    .short("e")
                    .long("element")
                    .empty_values(false)
                    .multiple(true)
                    .number_of_values(1)
                    .help("an argument of the set")
                    .required(false),
            )
            .arg(
                Arg::with_name(ARG_SIZE)
                    .short("k")
                    .long("size")
                    .empty_values(false)
                    .multiple(false)
                    .help("the size of the subsets")
                    .required(true),
            )
            .arg(
                Arg::with_name(ARG_SUPERSET)
                    .long("superset")
                    .empty_values(false)
                    .multiple(false)
                    .help("checks whether a subset is included in this \"a,b,...\" set")
                    .required(false),
            )
            .arg(app_helper::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let mut arguments = ArgumentSet::default();
        let elements = arg_matches
            .values_of(ARG_ELEMENTS)
            .into_iter()
            .flatten()
            .map(|e| common::read_argument(&mut arguments, e))
            .collect::<Result<HashSet<_>>>()?;
        let str_size = arg_matches.value_of(ARG_SIZE).unwrap_or("0");
        let size = str_size
            .parse::<usize>()
            .with_context(|| format!(r#"while parsing the subset size "{}""#, str_size))?;
        let subsets = set_algebra::k_subsets(&elements, size);
        info!(
            "found {} subset(s) of size {} among {} argument(s)",
            subsets.len(),
            size,
            elements.len()
        );
        let mut lines = subsets.iter().map(format_subset).collect::<Vec<_>>();
        lines.sort_unstable();
        lines.iter().for_each(|l| println!("{}", l));
        if let Some(s) = arg_matches.value_of(ARG_SUPERSET) {
            let superset = common::read_argument_list(&mut arguments, s)?
                .into_iter()
                .collect::<HashSet<_>>();
            println!(
                "contains a subset of {}: {}",
                format_subset(&superset),
                common::yes_no(set_algebra::contains_subset_of(&subsets, &superset))
            );
        }
        Ok(())
    }
}
