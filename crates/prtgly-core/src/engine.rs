// ── Object engine ──
//
// Facade over one transport handle. Generic object queries come out as
// paginated streams; resolution fans out through the type lifter.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use prtgly_api::{PrtgClient, Property, SearchFilter, TableTransport};

use crate::config::ServerConfig;
use crate::error::CoreError;
use crate::lift::{LiftOptions, LiftStream, TypeLifter};
use crate::model::{ObjectType, PrtgObject, TableEntity};
use crate::parameters::{ContentParameters, DEFAULT_PAGE_SIZE};
use crate::stream::ObjectStream;

/// Entry point for querying and resolving objects.
pub struct ObjectEngine<C = PrtgClient> {
    transport: C,
    page_size: u32,
    lift: LiftOptions,
}

impl ObjectEngine<PrtgClient> {
    /// Build an HTTP-backed engine from runtime config.
    pub fn from_config(config: &ServerConfig) -> Result<Self, CoreError> {
        let client = PrtgClient::new(
            config.url.as_str(),
            config.credentials.clone(),
            &config.transport(),
        )?;
        debug!(
            url = %config.url,
            user = config.credentials.username().unwrap_or("<token>"),
            "engine ready"
        );
        Ok(Self::new(client)
            .with_page_size(config.page_size)
            .with_lift_concurrency(config.lift_concurrency))
    }
}

impl<C: TableTransport> ObjectEngine<C> {
    pub fn new(transport: C) -> Self {
        Self {
            transport,
            page_size: DEFAULT_PAGE_SIZE,
            lift: LiftOptions::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self.lift.page_size = self.page_size;
        self
    }

    pub fn with_lift_concurrency(mut self, max_concurrency: usize) -> Self {
        self.lift.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn lift_options(&self) -> LiftOptions {
        self.lift
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Stream `T` records described by `parameters`, as given.
    pub fn stream<T: TableEntity>(
        &self,
        parameters: ContentParameters,
        cancel: CancellationToken,
    ) -> ObjectStream<'_, C, T> {
        ObjectStream::new(&self.transport, parameters, cancel)
    }

    /// Stream every `T` matching `filters`.
    pub fn query<T: TableEntity>(
        &self,
        filters: impl IntoIterator<Item = SearchFilter>,
        cancel: CancellationToken,
    ) -> ObjectStream<'_, C, T> {
        let parameters = ContentParameters::for_entity::<T>()
            .with_page_size(self.page_size)
            .with_filters(filters);
        self.stream(parameters, cancel)
    }

    /// Stream generic objects matching `filters`, ordered by id.
    ///
    /// When `types` is given, the server is asked for those types only
    /// (unless the list contains the `sensor` catch-all), and every record
    /// is checked against the list on this side as well.
    pub fn query_objects(
        &self,
        filters: Vec<SearchFilter>,
        types: Option<&[ObjectType]>,
        cancel: CancellationToken,
    ) -> ObjectStream<'_, C, PrtgObject> {
        let types: Vec<ObjectType> = types.map(<[ObjectType]>::to_vec).unwrap_or_default();

        let mut parameters = ContentParameters::objects()
            .with_page_size(self.page_size)
            .with_filters(filters);
        if let Some(filter) = type_filter(&types) {
            parameters = parameters.with_filter(filter);
        }

        let stream = self.stream(parameters, cancel);
        if types.is_empty() {
            stream
        } else {
            stream.with_post_filter(move |object| matches_type(object, &types))
        }
    }

    /// Lazily lift `objects` into typed entities.
    ///
    /// The returned stream reports through
    /// [`termination`](LiftStream::termination) whether cancellation cut
    /// any partition short.
    pub fn resolve_objects(
        &self,
        objects: Vec<PrtgObject>,
        cancel: CancellationToken,
    ) -> LiftStream<'_> {
        self.lifter(cancel).lift_stream(objects)
    }

    /// A lifter sharing this engine's transport and options.
    pub fn lifter(&self, cancel: CancellationToken) -> TypeLifter<'_, C> {
        TypeLifter::with_options(&self.transport, self.lift, cancel)
    }
}

// ── Type pre-pass ───────────────────────────────────────────────────

/// Server-side `type` filter for `types`.
///
/// `None` when no types were asked for, or when the generic `sensor` tag
/// is among them: raw sensor types are too many to enumerate, so the
/// server must return everything and the client narrows it down.
pub fn type_filter(types: &[ObjectType]) -> Option<SearchFilter> {
    if types.is_empty() || types.iter().any(ObjectType::is_sensor_catch_all) {
        return None;
    }
    Some(SearchFilter::any_of(
        Property::Type,
        types.iter().map(|t| t.server_value().into_owned()),
    ))
}

/// Whether `object` is one of `types`.
///
/// A known kind also matches through the object's base type, so `sensor`
/// keeps every sensor while `ping` keeps only ping sensors.
pub fn matches_type(object: &PrtgObject, types: &[ObjectType]) -> bool {
    let object_kinds = [object.type_tag.kind(), object.base_type];
    types.iter().any(|wanted| {
        *wanted == object.type_tag
            || wanted
                .kind()
                .is_some_and(|kind| object_kinds.contains(&Some(kind)))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::ObjectKind;

    fn object(tag: &str, base: Option<ObjectKind>) -> PrtgObject {
        PrtgObject {
            id: 1,
            type_tag: ObjectType::from(tag),
            base_type: base,
            name: String::new(),
            parent_id: None,
            tags: Vec::new(),
            active: true,
        }
    }

    #[test]
    fn no_types_no_filter() {
        assert_eq!(type_filter(&[]), None);
    }

    #[test]
    fn sensor_catch_all_suppresses_filter() {
        let types = [ObjectType::from("device"), ObjectType::from("sensor")];
        assert_eq!(type_filter(&types), None);
    }

    #[test]
    fn specific_types_become_type_filter() {
        let types = [ObjectType::from("ping"), ObjectType::from("probe")];
        assert_eq!(
            type_filter(&types),
            Some(SearchFilter::any_of(Property::Type, ["ping", "probenode"]))
        );
    }

    #[test]
    fn catch_all_matches_any_sensor_type() {
        let wanted = [ObjectType::from("sensor")];
        assert!(matches_type(&object("ping", Some(ObjectKind::Sensor)), &wanted));
        assert!(!matches_type(&object("device", Some(ObjectKind::Device)), &wanted));
    }

    #[test]
    fn raw_type_matches_only_itself() {
        let wanted = [ObjectType::from("ping")];
        assert!(matches_type(&object("Ping", Some(ObjectKind::Sensor)), &wanted));
        assert!(!matches_type(&object("http", Some(ObjectKind::Sensor)), &wanted));
    }

    #[test]
    fn probe_matches_probenode_tag() {
        let wanted = [ObjectType::Known(ObjectKind::Probe)];
        assert!(matches_type(&object("probenode", None), &wanted));
    }
}
