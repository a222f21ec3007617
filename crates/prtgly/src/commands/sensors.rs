//! Sensor command handler.

use tabled::Tabled;

use prtgly_core::{CancellationToken, ObjectEngine, Sensor, TableTransport};

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct SensorRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    type_tag: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last Value")]
    last_value: String,
    #[tabled(rename = "Message")]
    message: String,
}

fn row(s: &Sensor, color: bool) -> SensorRow {
    SensorRow {
        id: s.object.id,
        name: s.object.name.clone(),
        type_tag: s.object.type_tag.to_string(),
        device: s.device.clone(),
        status: output::status_cell(s.status, color),
        last_value: output::or_dash(s.last_value.as_deref()),
        message: s.message.clone().unwrap_or_default(),
    }
}

pub async fn handle<C: TableTransport>(
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
        |s: &Sensor| row(s, color),
        |s| s.object.id,
    )
    .await
}
