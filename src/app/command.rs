use anyhow::Result;
use clap::{App, ArgMatches};

/// A subcommand of the application.
///
/// Each command declares its CLI arguments through a clap subcommand sharing the command name,
/// and runs itself given the arguments clap matched for it.
pub(crate) trait Command<'a> {
    /// Returns the name of the command, which is also the name of the clap subcommand.
    fn name(&self) -> &str;

    /// Returns the clap subcommand describing the available CLI arguments for this command.
    fn clap_subcommand(&self) -> App<'a, 'a>;

    /// Executes the command given the arguments matched by clap.
    ///
    /// Returning an error makes the application exit with a failure status code.
    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()>;
}
