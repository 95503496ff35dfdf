use super::{app_helper, command::Command, common};
use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;
use qbaf_relations::ArgumentSet;

const CMD_NAME: &str = "relations";

const ARG_ADD: &str = "ADD";
const ARG_REMOVE: &str = "REMOVE";
const ARG_PATIENTS_OF: &str = "PATIENTS_OF";
const ARG_AGENTS_OF: &str = "AGENTS_OF";
const ARG_CONTAINS: &str = "CONTAINS";

pub(crate) struct RelationsCommand;

impl RelationsCommand {
    pub(crate) fn new() -> Self {
        RelationsCommand
    }
}

fn multiple_arg<'a>(name: &'a str, long: &'a str, help: &'a str) -> Arg<'a, 'a> {
    Arg::with_name(name)
        .long(long)
        .empty_values(false)
        .multiple(true)
        .number_of_values(1)
        .help(help)
        .required(false)
}

impl<'a> Command<'a> for RelationsCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Builds a relation index, updates it and queries it")
            .setting(AppSettings::DisableVersion)
            .arg(common::relations_arg())
            .arg(multiple_arg(
                ARG_ADD,
                "add",
                "a relation to add once the index is built",
            ))
            .arg(multiple_arg(
                ARG_REMOVE,
                "remove",
                "a relation to remove once the additions are made",
            ))
            .arg(multiple_arg(
                ARG_PATIENTS_OF,
                "patients-of",
                "an argument whose patients must be displayed",
            ))
            .arg(multiple_arg(
                ARG_AGENTS_OF,
                "agents-of",
                "an argument whose agents must be displayed",
            ))
            .arg(multiple_arg(
                ARG_CONTAINS,
                "contains",
                "a relation whose membership must be checked",
            ))
            .arg(app_helper::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let mut arguments = ArgumentSet::default();
        let mut index =
            common::read_relation_index(&mut arguments, arg_matches, common::ARG_RELATIONS)?;
        for relation in common::read_relations(&mut arguments, arg_matches, ARG_ADD)? {
            let (agent, patient) = relation.into_pair();
            index
                .add(agent.clone(), patient.clone())
                .with_context(|| format!("while adding the relation ({}, {})", agent, patient))?;
        }
        for relation in common::read_relations(&mut arguments, arg_matches, ARG_REMOVE)? {
            index.remove(relation.agent(), relation.patient());
        }
        info!("the relation index has {} relation(s)", index.len());
        println!("{}", index);
        for value in arg_matches.values_of(ARG_PATIENTS_OF).into_iter().flatten() {
            let agent = common::read_argument(&mut arguments, value)?;
            let patients = index.patients_of(&agent);
            println!(
                "patients of {}: [{}]",
                agent,
                common::format_argument_list(&patients)
            );
        }
        for value in arg_matches.values_of(ARG_AGENTS_OF).into_iter().flatten() {
            let patient = common::read_argument(&mut arguments, value)?;
            let agents = index.agents_of(&patient);
            println!(
                "agents of {}: [{}]",
                patient,
                common::format_argument_list(&agents)
            );
        }
        for relation in common::read_relations(&mut arguments, arg_matches, ARG_CONTAINS)? {
            println!(
                "contains {}: {}",
                relation,
                common::yes_no(index.contains_relation(&relation))
            );
        }
        Ok(())
    }
}
