//! Generic object listing and type resolution.

use tabled::Tabled;

use prtgly_core::{
    CancellationToken, CoreError, ObjectEngine, ObjectStatus, ObjectType, PrtgObject, Resolved,
    TableTransport, TypeLifter,
};

use crate::cli::{GlobalOpts, ObjectsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ObjectRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    type_tag: String,
    #[tabled(rename = "Parent")]
    parent: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

fn object_row(o: &PrtgObject) -> ObjectRow {
    ObjectRow {
        id: o.id,
        name: o.name.clone(),
        type_tag: o.type_tag.to_string(),
        parent: output::or_dash(o.parent_id),
        tags: output::tags_cell(&o.tags),
    }
}

#[derive(Tabled)]
struct ResolvedRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Entity")]
    entity: &'static str,
    #[tabled(rename = "Type")]
    type_tag: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

fn resolved_row(r: &Resolved, color: bool) -> ResolvedRow {
    let (entity, status, detail) = match r {
        Resolved::Sensor(s) => ("sensor", Some(s.status), s.device.clone()),
        Resolved::Device(d) => ("device", Some(d.status), d.host.clone().unwrap_or_default()),
        Resolved::Group(g) => ("group", Some(g.status), g.probe.clone()),
        Resolved::Probe(p) => (
            "probe",
            Some(p.status),
            format!("{} sensor(s)", output::or_dash(p.total_sensors)),
        ),
        Resolved::Notification(n) => ("notification", None, output::tags_cell(&n.tags)),
        Resolved::Schedule(s) => ("schedule", None, output::tags_cell(&s.tags)),
        Resolved::Object(o) => ("object", None, output::tags_cell(&o.tags)),
    };
    ResolvedRow {
        id: r.id(),
        name: r.name().to_owned(),
        entity,
        type_tag: r.type_tag().to_string(),
        status: status.map_or_else(
            || "-".into(),
            |s: ObjectStatus| output::status_cell(s, color),
        ),
        detail,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle<C: TableTransport>(
    engine: &ObjectEngine<C>,
    args: ObjectsArgs,
    global: &GlobalOpts,
    cancel: CancellationToken,
) -> Result<(), CliError> {
    let types: Vec<ObjectType> = args
        .types
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ObjectType::from)
        .collect();
    let types = (!types.is_empty()).then_some(types.as_slice());

    let stream = engine.query_objects(util::filters(&args.list), types, cancel.clone());
    let objects = util::collect(stream, args.list.limit, global.quiet).await?;

    if !args.resolve {
        let out = output::render_list(global.output, &objects, object_row, |o| o.id)?;
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let mut options = engine.lift_options();
    if let Some(concurrency) = args.concurrency {
        options.max_concurrency = usize::from(concurrency);
    }
    let requested = objects.len();
    let outcome = TypeLifter::with_options(engine.transport(), options, cancel)
        .lift_all(objects)
        .await;

    let color = output::should_color(global.color);
    let out = output::render_list(
        global.output,
        &outcome.resolved,
        |r| resolved_row(r, color),
        Resolved::id,
    )?;
    output::print_output(&out, global.quiet);

    if outcome.cancelled {
        util::interrupted(outcome.resolved.len(), global.quiet);
    }
    if outcome.failures.is_empty() {
        tracing::debug!(requested, resolved = outcome.resolved.len(), "resolution complete");
        return Ok(());
    }
    if !global.quiet {
        for failure in &outcome.failures {
            eprintln!("warning: {failure}");
        }
    }
    Err(CoreError::PartialResolution {
        resolved: outcome.resolved.len(),
        failures: outcome.failures,
    }
    .into())
}
