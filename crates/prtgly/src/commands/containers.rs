//! Device, group, and probe command handlers.

use tabled::Tabled;

use prtgly_core::{CancellationToken, Device, Group, ObjectEngine, Probe, TableTransport};

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Probe")]
    probe: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Sensors")]
    sensors: String,
}

fn device_row(d: &Device, color: bool) -> DeviceRow {
    DeviceRow {
        id: d.object.id,
        name: d.object.name.clone(),
        host: output::or_dash(d.host.as_deref()),
        group: d.group.clone(),
        probe: d.probe.clone(),
        status: output::status_cell(d.status, color),
        sensors: output::or_dash(d.total_sensors),
    }
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Probe")]
    probe: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Sensors")]
    sensors: String,
}

fn group_row(g: &Group, color: bool) -> GroupRow {
    GroupRow {
        id: g.object.id,
        name: g.object.name.clone(),
        probe: g.probe.clone(),
        status: output::status_cell(g.status, color),
        sensors: output::or_dash(g.total_sensors),
    }
}

#[derive(Tabled)]
struct ProbeRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Sensors")]
    sensors: String,
    #[tabled(rename = "Message")]
    message: String,
}

fn probe_row(p: &Probe, color: bool) -> ProbeRow {
    ProbeRow {
        id: p.object.id,
        name: p.object.name.clone(),
        status: output::status_cell(p.status, color),
        sensors: output::or_dash(p.total_sensors),
        message: p.message.clone().unwrap_or_default(),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn devices<C: TableTransport>(
    engine: &ObjectEngine<C>,
    args: ListArgs,
    global: &GlobalOpts,
    cancel: CancellationToken,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    util::list(
        engine,
        &args,
        global,
        cancel,
        |d: &Device| device_row(d, color),
        |d| d.object.id,
    )
    .await
}

pub async fn groups<C: TableTransport>(
    engine: &ObjectEngine<C>,
    args: ListArgs,
    global: &GlobalOpts,
    cancel: CancellationToken,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    util::list(
        engine,
        &args,
        global,
        cancel,
        |g: &Group| group_row(g, color),
        |g| g.object.id,
    )
    .await
}

pub async fn probes<C: TableTransport>(
    engine: &ObjectEngine<C>,
    args: ListArgs,
    global: &GlobalOpts,
    cancel: CancellationToken,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    util::list(
        engine,
        &args,
        global,
        cancel,
        |p: &Probe| probe_row(p, color),
        |p| p.object.id,
    )
    .await
}
