use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches};
use lazy_static::lazy_static;
use log::info;
use qbaf_relations::{Argument, ArgumentSet, IntoRelation, Relation, RelationIndex};
use regex::Regex;

lazy_static! {
    static ref ARG_NAME_PATTERN: Regex = Regex::new(r"^[_[:alpha:]][_[:alpha:]\d]*$").unwrap();
}

pub(crate) const ARG_RELATIONS: &str = "RELATIONS";

pub(crate) fn relations_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_RELATIONS)
        .short("r")
        .long("relation")
        .empty_values(false)
        .multiple(true)
        .number_of_values(1)
        .help("a relation, given as \"agent,patient\"")
        .required(false)
}

/// Reads a comma-separated list of argument labels, registering the arguments on the fly.
pub(crate) fn read_argument_list(
    arguments: &mut ArgumentSet<String>,
    list: &str,
) -> Result<Vec<Argument<String>>> {
    let context = || format!(r#"while reading the argument list "{}""#, list);
    list.split(',')
        .map(|s| read_argument(arguments, s))
        .collect::<Result<Vec<_>>>()
        .with_context(context)
}

/// Reads an argument label, registering the argument if it is new.
pub(crate) fn read_argument(arguments: &mut ArgumentSet<String>, s: &str) -> Result<Argument<String>> {
    let label = s.trim();
    if !ARG_NAME_PATTERN.is_match(label) {
        return Err(anyhow!(r#"invalid argument name "{}""#, label));
    }
    Ok(arguments.new_argument(label.to_string()))
}

/// Reads a relation given as an "agent,patient" string.
pub(crate) fn read_relation(
    arguments: &mut ArgumentSet<String>,
    s: &str,
) -> Result<Relation<Argument<String>>> {
    read_argument_list(arguments, s)?
        .into_relation()
        .with_context(|| format!(r#"while reading the relation "{}""#, s))
}

/// Reads all the values of a multiple argument as relations.
pub(crate) fn read_relations(
    arguments: &mut ArgumentSet<String>,
    arg_matches: &ArgMatches<'_>,
    arg_name: &str,
) -> Result<Vec<Relation<Argument<String>>>> {
    arg_matches
        .values_of(arg_name)
        .map(|values| values.map(|v| read_relation(arguments, v)).collect())
        .unwrap_or_else(|| Ok(vec![]))
}

/// Builds a relation index from the values of a multiple argument.
pub(crate) fn read_relation_index(
    arguments: &mut ArgumentSet<String>,
    arg_matches: &ArgMatches<'_>,
    arg_name: &str,
) -> Result<RelationIndex<Argument<String>>> {
    let items = arg_matches
        .values_of(arg_name)
        .map(|values| {
            values
                .map(|v| read_argument_list(arguments, v))
                .collect::<Result<Vec<_>>>()
        })
        .unwrap_or_else(|| Ok(vec![]))?;
    let n_items = items.len();
    let index = RelationIndex::try_new(items).context("while building the relation index")?;
    info!(
        "the relation index has {} relation(s) ({} given)",
        index.len(),
        n_items
    );
    Ok(index)
}

/// Formats a list of arguments by label order.
pub(crate) fn format_argument_list(arguments: &[Argument<String>]) -> String {
    let mut labels = arguments.iter().map(|a| a.label().as_str()).collect::<Vec<&str>>();
    labels.sort_unstable();
    labels.join(", ")
}

pub(crate) fn yes_no(status: bool) -> &'static str {
    if status {
        "YES"
    } else {
        "NO"
    }
}
