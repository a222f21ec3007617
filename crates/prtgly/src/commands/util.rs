//! Shared helpers for command handlers.

use serde::Serialize;
use tabled::Tabled;

use prtgly_core::{
    CancellationToken, FilterOperator, ObjectEngine, ObjectStream, Property, SearchFilter,
    TableEntity, TableTransport, Termination,
};

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

/// Server-side filters for the shared list flags.
pub fn filters(args: &ListArgs) -> Vec<SearchFilter> {
    let mut filters = Vec::new();
    if !args.id.is_empty() {
        filters.push(SearchFilter::any_of(Property::Id, &args.id));
    }
    if !args.name.is_empty() {
        filters.push(SearchFilter::any_of(Property::Name, &args.name));
    }
    if let Some(ref text) = args.name_contains {
        filters.push(SearchFilter::new(
            Property::Name,
            FilterOperator::Contains,
            [text],
        ));
    }
    if let Some(parent) = args.parent {
        filters.push(SearchFilter::equals(Property::ParentId, parent));
    }
    if let Some(ref tag) = args.tag {
        filters.push(SearchFilter::new(
            Property::Tags,
            FilterOperator::Contains,
            [tag],
        ));
    }
    if let Some(active) = args.active {
        filters.push(SearchFilter::active(active));
    }
    filters
}

/// Drain `stream`, stopping early at `limit`.
///
/// An interrupted stream still returns what it produced so far.
pub async fn collect<C, T>(
    mut stream: ObjectStream<'_, C, T>,
    limit: Option<usize>,
    quiet: bool,
) -> Result<Vec<T>, CliError>
where
    C: TableTransport,
    T: TableEntity,
{
    let limit = limit.unwrap_or(usize::MAX);
    let mut items = Vec::new();
    while items.len() < limit {
        match stream.next().await {
            Some(item) => items.push(item?),
            None => break,
        }
    }
    if stream.termination() == Some(Termination::Cancelled) {
        interrupted(items.len(), quiet);
    }
    Ok(items)
}

pub fn interrupted(count: usize, quiet: bool) {
    if !quiet {
        eprintln!("Interrupted: showing {count} result(s) fetched so far");
    }
}

/// List every `T` matching the shared flags.
pub async fn list<C, T, R>(
    engine: &ObjectEngine<C>,
    args: &ListArgs,
    global: &GlobalOpts,
    cancel: CancellationToken,
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> u32,
) -> Result<(), CliError>
where
    C: TableTransport,
    T: TableEntity + Serialize,
    R: Tabled,
{
    let stream = engine.query::<T>(filters(args), cancel);
    let items = collect(stream, args.limit, global.quiet).await?;
    let out = output::render_list(global.output, &items, to_row, id_fn)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
