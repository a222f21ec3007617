//! Notification action and schedule command handlers.

use tabled::Tabled;

use prtgly_core::{CancellationToken, NotificationAction, ObjectEngine, Schedule, TableTransport};

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct SupportingRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Active")]
    active: bool,
    #[tabled(rename = "Tags")]
    tags: String,
}

pub async fn notifications<C: TableTransport>(
    engine: &ObjectEngine<C>,
    args: ListArgs,
    global: &GlobalOpts,
    cancel: CancellationToken,
) -> Result<(), CliError> {
    util::list(
        engine,
        &args,
        global,
        cancel,
        |n: &NotificationAction| SupportingRow {
            id: n.id,
            name: n.name.clone(),
            active: n.active,
            tags: output::tags_cell(&n.tags),
        },
        |n| n.id,
    )
    .await
}

pub async fn schedules<C: TableTransport>(
    engine: &ObjectEngine<C>,
    args: ListArgs,
    global: &GlobalOpts,
    cancel: CancellationToken,
) -> Result<(), CliError> {
    util::list(
        engine,
        &args,
        global,
        cancel,
        |s: &Schedule| SupportingRow {
            id: s.id,
            name: s.name.clone(),
            active: s.active,
            tags: output::tags_cell(&s.tags),
        },
        |s| s.id,
    )
    .await
}
