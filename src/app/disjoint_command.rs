use super::{app_helper, command::Command, common};
use anyhow::Result;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use qbaf_relations::ArgumentSet;

const CMD_NAME: &str = "disjoint";

const ARG_OTHER_RELATIONS: &str = "OTHER_RELATIONS";

pub(crate) struct DisjointCommand;

impl DisjointCommand {
    pub(crate) fn new() -> Self {
        DisjointCommand
    }
}

impl<'a> Command<'a> for DisjointCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks whether two relation indices share no relation")
            .setting(AppSettings::DisableVersion)
            .arg(common::relations_arg())
            .arg(
                Arg::with_name(ARG_OTHER_RELATIONS)
                    .short("o")
                    .long("other")
                    .empty_values(false)
                    .multiple(true)
                    .number_of_values(1)
                    .help("a relation of the second index, given as \"agent,patient\"")
                    .required(false),
            )
            .arg(app_helper::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let mut arguments = ArgumentSet::default();
        let index =
            common::read_relation_index(&mut arguments, arg_matches, common::ARG_RELATIONS)?;
        let other = common::read_relation_index(&mut arguments, arg_matches, ARG_OTHER_RELATIONS)?;
        println!("{}", common::yes_no(index.is_disjoint_from(&other)));
        Ok(())
    }
}
