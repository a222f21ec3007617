// ── Type lifting ──
//
// Turns a batch of generic objects into typed entities. Objects are grouped
// by type tag, each group is re-read from its typed table with one id-filtered
// query, and the results are put back into the order the ids arrived in.
//
// Groups run concurrently as futures on the caller's task. Output is ordered
// by the group's first appearance in the input, then by input position.

use std::collections::{HashMap, HashSet};
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use async_stream::stream;
use futures_util::{Stream, StreamExt};
use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use prtgly_api::TableTransport;

use crate::error::CoreError;
use crate::model::{
    Device, Group, NotificationAction, ObjectKind, ObjectType, Probe, PrtgObject, Resolved,
    Schedule, Sensor, TableEntity,
};
use crate::parameters::{ContentParameters, DEFAULT_PAGE_SIZE};
use crate::stream::{ObjectStream, Termination};

/// Partitions resolved at once unless configured otherwise.
pub const DEFAULT_LIFT_CONCURRENCY: usize = 4;

// ── Partitioning ────────────────────────────────────────────────────

/// Objects sharing one type tag, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub type_tag: ObjectType,
    /// Kind used to pick the typed table. Taken from the tag, or from the
    /// first member's base type for raw sensor types.
    pub kind: Option<ObjectKind>,
    pub objects: Vec<PrtgObject>,
}

impl Partition {
    pub fn ids(&self) -> Vec<u32> {
        self.objects.iter().map(|o| o.id).collect()
    }
}

/// Group objects by type tag in first-seen order.
///
/// An id seen twice is kept at its first position only.
pub fn partition(objects: impl IntoIterator<Item = PrtgObject>) -> Vec<Partition> {
    let mut seen = HashSet::new();
    let mut groups: IndexMap<ObjectType, Partition> = IndexMap::new();

    for object in objects {
        if !seen.insert(object.id) {
            continue;
        }
        groups
            .entry(object.type_tag.clone())
            .or_insert_with(|| Partition {
                type_tag: object.type_tag.clone(),
                kind: object.kind(),
                objects: Vec::new(),
            })
            .objects
            .push(object);
    }

    groups.into_values().collect()
}

/// Reorder `records` to follow `ids`, dropping ids with no record.
///
/// Ids missing from a partition that ran to the end were deleted on the
/// server; ids missing from a cancelled one were never read.
fn restore_order<T: TableEntity>(
    type_tag: &ObjectType,
    ids: &[u32],
    records: Vec<T>,
    termination: Termination,
) -> Vec<T> {
    let mut by_id: HashMap<u32, T> = HashMap::with_capacity(records.len());
    for record in records {
        by_id.entry(record.id()).or_insert(record);
    }

    let mut ordered = Vec::with_capacity(ids.len());
    let mut missing = Vec::new();
    for id in ids {
        match by_id.remove(id) {
            Some(record) => ordered.push(record),
            None => missing.push(*id),
        }
    }

    if missing.is_empty() {
        return ordered;
    }
    if termination == Termination::Cancelled {
        debug!(
            %type_tag,
            unread = missing.len(),
            "partition cancelled before every object was read"
        );
    } else {
        debug!(%type_tag, ?missing, "objects no longer exist; skipped");
    }
    ordered
}

/// Entities of one partition and how its query ended.
struct Resolution {
    resolved: Vec<Resolved>,
    termination: Termination,
}

impl Resolution {
    fn restored<T>(
        type_tag: &ObjectType,
        ids: &[u32],
        records: Vec<T>,
        termination: Termination,
    ) -> Self
    where
        T: TableEntity + Into<Resolved>,
    {
        Self {
            resolved: restore_order(type_tag, ids, records, termination)
                .into_iter()
                .map(Into::into)
                .collect(),
            termination,
        }
    }

    fn cancelled() -> Self {
        Self {
            resolved: Vec::new(),
            termination: Termination::Cancelled,
        }
    }
}

// ── Lift stream ─────────────────────────────────────────────────────

enum LiftEvent {
    Item(Result<Resolved, CoreError>),
    /// A partition stopped early because the token fired.
    PartitionCancelled,
}

/// Lazily resolved entities, in partition order.
///
/// Failed partitions show up as `Err` items and do not end the stream.
/// Once [`next`](StreamExt::next) returns `None`,
/// [`termination`](Self::termination) is `Cancelled` if any partition was
/// cut short by the token, `Exhausted` otherwise.
pub struct LiftStream<'a> {
    inner: Pin<Box<dyn Stream<Item = LiftEvent> + Send + 'a>>,
    cancelled: bool,
    termination: Option<Termination>,
}

impl LiftStream<'_> {
    /// `None` while partitions are still being resolved.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }
}

impl Stream for LiftStream<'_> {
    type Item = Result<Resolved, CoreError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.termination.is_some() {
            return Poll::Ready(None);
        }
        loop {
            match ready!(this.inner.as_mut().poll_next(cx)) {
                Some(LiftEvent::Item(item)) => return Poll::Ready(Some(item)),
                Some(LiftEvent::PartitionCancelled) => this.cancelled = true,
                None => {
                    this.termination = Some(if this.cancelled {
                        Termination::Cancelled
                    } else {
                        Termination::Exhausted
                    });
                    return Poll::Ready(None);
                }
            }
        }
    }
}

// ── Options / outcome ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiftOptions {
    /// Upper bound on partitions resolved at the same time.
    pub max_concurrency: usize,
    /// Page size of the typed streams.
    pub page_size: u32,
}

impl Default for LiftOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_LIFT_CONCURRENCY,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Everything a lift produced, including the partitions that failed.
#[derive(Debug, Default)]
pub struct LiftOutcome {
    pub resolved: Vec<Resolved>,
    /// One `PartitionResolutionFailed` per failed partition.
    pub failures: Vec<CoreError>,
    /// At least one partition was cut short by the cancellation token.
    pub cancelled: bool,
}

impl LiftOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }

    /// Ok with every resolved entity, or `PartialResolution` if any
    /// partition failed. Cancellation alone is not an error.
    pub fn into_result(self) -> Result<Vec<Resolved>, CoreError> {
        if self.failures.is_empty() {
            Ok(self.resolved)
        } else {
            Err(CoreError::PartialResolution {
                resolved: self.resolved.len(),
                failures: self.failures,
            })
        }
    }
}

// ── Lifter ──────────────────────────────────────────────────────────

/// Resolves generic objects into typed entities against one transport.
pub struct TypeLifter<'a, C> {
    transport: &'a C,
    options: LiftOptions,
    cancel: CancellationToken,
}

impl<C> Clone for TypeLifter<'_, C> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport,
            options: self.options,
            cancel: self.cancel.clone(),
        }
    }
}

impl<'a, C: TableTransport> TypeLifter<'a, C> {
    pub fn new(transport: &'a C, cancel: CancellationToken) -> Self {
        Self::with_options(transport, LiftOptions::default(), cancel)
    }

    pub fn with_options(transport: &'a C, options: LiftOptions, cancel: CancellationToken) -> Self {
        Self {
            transport,
            options,
            cancel,
        }
    }

    pub fn options(&self) -> LiftOptions {
        self.options
    }

    /// Lazily resolve `objects`.
    ///
    /// A failed partition yields one `PartitionResolutionFailed` item in its
    /// place; the other partitions are unaffected.
    pub fn lift_stream(&self, objects: Vec<PrtgObject>) -> LiftStream<'a>
    where
        C: 'a,
    {
        let partitions = partition(objects);
        let width = self.options.max_concurrency.min(partitions.len()).max(1);
        let lifter = self.clone();

        let events = stream! {
            let mut results = futures_util::stream::iter(partitions)
                .map(move |partition| {
                    let lifter = lifter.clone();
                    async move { lifter.resolve_partition(partition).await }
                })
                .buffered(width);

            while let Some(result) = results.next().await {
                match result {
                    Ok(resolution) => {
                        for item in resolution.resolved {
                            yield LiftEvent::Item(Ok(item));
                        }
                        if resolution.termination == Termination::Cancelled {
                            yield LiftEvent::PartitionCancelled;
                        }
                    }
                    Err(e) => yield LiftEvent::Item(Err(e)),
                }
            }
        };

        LiftStream {
            inner: Box::pin(events),
            cancelled: false,
            termination: None,
        }
    }

    /// Resolve everything, collecting failures instead of stopping at them.
    pub async fn lift_all(&self, objects: Vec<PrtgObject>) -> LiftOutcome {
        let mut outcome = LiftOutcome::default();
        let mut results = self.lift_stream(objects);

        while let Some(item) = results.next().await {
            match item {
                Ok(resolved) => outcome.resolved.push(resolved),
                Err(e) => outcome.failures.push(e),
            }
        }

        outcome.cancelled = results.termination() == Some(Termination::Cancelled);
        outcome
    }

    /// Resolve everything or fail on the first failed partition.
    ///
    /// Cancellation is not a failure: whatever was resolved before the token
    /// fired is returned.
    pub async fn lift(&self, objects: Vec<PrtgObject>) -> Result<Vec<Resolved>, CoreError> {
        let mut results = self.lift_stream(objects);
        let mut resolved = Vec::new();
        while let Some(item) = results.next().await {
            resolved.push(item?);
        }
        Ok(resolved)
    }

    // ── Per-partition resolution ────────────────────────────────────

    async fn resolve_partition(&self, partition: Partition) -> Result<Resolution, CoreError> {
        let ids = partition.ids();
        debug!(type_tag = %partition.type_tag, count = ids.len(), "resolving partition");

        let result = match partition.kind {
            Some(ObjectKind::Sensor) => self.stream_typed::<Sensor>(&partition.type_tag, &ids).await,
            Some(ObjectKind::Device) => self.stream_typed::<Device>(&partition.type_tag, &ids).await,
            Some(ObjectKind::Group) => self.stream_typed::<Group>(&partition.type_tag, &ids).await,
            Some(ObjectKind::Probe) => self.stream_typed::<Probe>(&partition.type_tag, &ids).await,
            Some(ObjectKind::Notification) => {
                self.lookup_typed::<NotificationAction>(&partition.type_tag, &ids)
                    .await
            }
            Some(ObjectKind::Schedule) => {
                self.lookup_typed::<Schedule>(&partition.type_tag, &ids)
                    .await
            }
            _ => {
                trace!(
                    type_tag = %partition.type_tag,
                    count = ids.len(),
                    "no typed table for object type; passing through"
                );
                return Ok(Resolution {
                    resolved: partition.objects.into_iter().map(Resolved::from).collect(),
                    termination: Termination::Exhausted,
                });
            }
        };

        result.map_err(|source| {
            warn!(type_tag = %partition.type_tag, error = %source, "partition resolution failed");
            CoreError::PartitionResolutionFailed {
                type_tag: partition.type_tag,
                ids,
                source: Box::new(source),
            }
        })
    }

    /// Paginated id-filtered read of a container or sensor table.
    async fn stream_typed<T>(
        &self,
        type_tag: &ObjectType,
        ids: &[u32],
    ) -> Result<Resolution, CoreError>
    where
        T: TableEntity + Into<Resolved>,
    {
        let parameters = ContentParameters::for_entity::<T>()
            .with_page_size(self.options.page_size)
            .with_id_filter(ids);
        let mut stream = ObjectStream::<C, T>::new(self.transport, parameters, self.cancel.clone());

        let mut records = Vec::with_capacity(ids.len());
        while let Some(item) = stream.next().await {
            records.push(item?);
        }

        let termination = stream.termination().unwrap_or(Termination::Exhausted);
        Ok(Resolution::restored(type_tag, ids, records, termination))
    }

    /// Single unpaginated lookup of a small id-keyed table.
    async fn lookup_typed<T>(
        &self,
        type_tag: &ObjectType,
        ids: &[u32],
    ) -> Result<Resolution, CoreError>
    where
        T: TableEntity + Into<Resolved>,
    {
        if self.cancel.is_cancelled() {
            return Ok(Resolution::cancelled());
        }
        let lookup = self
            .transport
            .execute_id_lookup::<T>(T::CONTENT, T::columns(), ids);
        let Some(records) = self.cancel.run_until_cancelled(lookup).await else {
            debug!(%type_tag, "lookup cancelled");
            return Ok(Resolution::cancelled());
        };

        Ok(Resolution::restored(type_tag, ids, records?, Termination::Exhausted))
    }
}
