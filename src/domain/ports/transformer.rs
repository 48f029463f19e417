//! Transformer Port
//!
//! The template-resolution/merge engine. It receives raw hosts, services
//! and node templates during a build and hands back the concrete host,
//! service, dependency and escalation collections to serialize.

use crate::domain::entities::{ObjectCollection, ObjectRecord, ShardingConfig};

use super::deployment_source::IngestMode;

/// Host/service expansion engine, one instance per build
pub trait HostTransformer {
    fn set_alias_template(&mut self, template: Option<&str>);

    fn set_global_negate(&mut self, negate: Option<&str>);

    fn enable_sharding(&mut self, sharding: &ShardingConfig);

    /// Host returned by a host-search resolver
    fn import_host(&mut self, host: &str, record: &ObjectRecord);

    fn import_static_host(&mut self, record: &ObjectRecord);

    /// Drop hosts that cannot be rendered
    fn scrub_hosts(&mut self);

    fn import_services(&mut self, services: &ObjectCollection);

    /// Node templates map host-name patterns to the services they carry
    fn import_node_templates(
        &mut self,
        templates: &[(String, ObjectRecord)],
        sub_deployment: Option<&str>,
    );

    fn import_service_dependencies(&mut self, dependencies: &ObjectCollection);

    fn import_service_escalations(&mut self, escalations: &ObjectCollection);

    fn hosts(&self) -> ObjectCollection;

    fn services(&self, hosts: &ObjectCollection) -> ObjectCollection;

    fn service_dependencies(&self, hosts: &ObjectCollection) -> ObjectCollection;

    fn service_escalations(&self, hosts: &ObjectCollection) -> ObjectCollection;
}

/// Creates a fresh transformer for each build
pub trait TransformerFactory {
    fn create(&self, mode: IngestMode) -> Box<dyn HostTransformer>;
}

impl<F> TransformerFactory for F
where
    F: Fn(IngestMode) -> Box<dyn HostTransformer>,
{
    fn create(&self, mode: IngestMode) -> Box<dyn HostTransformer> {
        self(mode)
    }
}
