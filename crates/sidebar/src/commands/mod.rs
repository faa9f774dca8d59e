//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod project;
pub(crate) mod resolve;
pub(crate) mod watch;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use watch::WatchArgs;
