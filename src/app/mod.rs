pub(crate) mod app_helper;
pub(crate) use app_helper::AppHelper;

mod authors_command;
pub(crate) use authors_command::AuthorsCommand;

mod command;
pub(crate) use command::Command;

pub(crate) mod common;

mod disjoint_command;
pub(crate) use disjoint_command::DisjointCommand;

mod relations_command;
pub(crate) use relations_command::RelationsCommand;

mod subsets_command;
pub(crate) use subsets_command::SubsetsCommand;
