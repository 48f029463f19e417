//! Deployment Orchestrator
//!
//! Runs one build in a fixed order:
//! 1. Check the staging tree and clear previously staged artifacts
//! 2. Fetch the document from the live source or the revision store
//! 3. Write the static collections (timeperiods through top-level config)
//! 4. Feed hosts, services and node templates to the transformer
//! 5. Write the derived host, service, dependency and escalation files
//!
//! Critical-data checks (services, node templates, derived hosts/services)
//! abort the build unless it is forced.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::entities::{
    collection_from_section, section_is_empty, Artifact, Deployment, DeploymentDocument,
    ObjectCollection, ObjectKind,
};
use crate::domain::ports::{
    DeploymentSource, FileSystem, HostTransformer, LiveApiClient, LiveSource, RevisionSource,
    RevisionStore, TransformerFactory,
};
use crate::domain::services::{ConfigWriter, LocalCache, ResolverRegistry, DEFAULT_HOST_TEMPLATE};
use crate::domain::value_objects::Layout;
use crate::error::{NagstageError, NagstageResult};
use crate::infrastructure::fs::PermissionGuard;

use super::context::BuildContext;
use super::options::BuildRequest;
use super::result::BuildReport;

/// Builds deployments into the staging tree.
///
/// Owns the host cache used by incremental rebuilds and the process-wide
/// sub-deployment filter; both outlive individual builds.
pub struct DeploymentOrchestrator<FS: FileSystem> {
    pipeline: Pipeline<FS>,
    cache: LocalCache,
    sub_deployment: Option<String>,
}

/// Collaborators shared by every build
struct Pipeline<FS: FileSystem> {
    fs: FS,
    layout: Layout,
    live: Arc<dyn LiveApiClient>,
    revisions: Arc<dyn RevisionStore>,
    transformers: Box<dyn TransformerFactory>,
    registry: ResolverRegistry,
    default_host_template: String,
    live_shard_position: Option<u32>,
}

impl<FS: FileSystem> DeploymentOrchestrator<FS> {
    pub fn new(
        fs: FS,
        layout: Layout,
        live: Arc<dyn LiveApiClient>,
        revisions: Arc<dyn RevisionStore>,
        transformers: Box<dyn TransformerFactory>,
    ) -> Self {
        Self {
            pipeline: Pipeline {
                fs,
                layout,
                live,
                revisions,
                transformers,
                registry: ResolverRegistry::new(),
                default_host_template: DEFAULT_HOST_TEMPLATE.to_string(),
                live_shard_position: None,
            },
            cache: LocalCache::new(),
            sub_deployment: None,
        }
    }

    pub fn with_registry(mut self, registry: ResolverRegistry) -> Self {
        self.pipeline.registry = registry;
        self
    }

    pub fn with_default_host_template(mut self, template: impl Into<String>) -> Self {
        self.pipeline.default_host_template = template.into();
        self
    }

    /// Enable sharding for live builds; `position` applies when a build
    /// does not name one
    pub fn with_live_sharding(mut self, position: Option<u32>) -> Self {
        self.pipeline.live_shard_position = position;
        self
    }

    pub fn sub_deployment(&self) -> Option<&str> {
        self.sub_deployment.as_deref()
    }

    pub fn set_sub_deployment(&mut self, sub_deployment: Option<String>) {
        self.sub_deployment = sub_deployment.filter(|s| !s.is_empty());
    }

    pub fn reset_local_cache(&mut self) {
        self.cache.clear();
    }

    pub fn local_cache(&self) -> &LocalCache {
        &self.cache
    }

    pub fn layout(&self) -> &Layout {
        &self.pipeline.layout
    }

    /// Build one deployment into its staging directory
    pub fn build(&mut self, request: &BuildRequest) -> NagstageResult<BuildReport> {
        let deployment =
            Deployment::new(&request.deployment).with_sub_deployment(self.sub_deployment.clone());
        let mut ctx = BuildContext::new(deployment, request, &mut self.cache);
        self.pipeline.run(&mut ctx, request)
    }
}

/// Static collections in write order
fn static_steps(doc: &DeploymentDocument) -> [(ObjectKind, &Value); 13] {
    [
        (ObjectKind::Timeperiod, &doc.timeperiods),
        (ObjectKind::Command, &doc.commands),
        (ObjectKind::ContactTemplate, &doc.contacttemplates),
        (ObjectKind::Contact, &doc.contacts),
        (ObjectKind::ContactGroup, &doc.contactgroups),
        (ObjectKind::HostTemplate, &doc.hosttemplates),
        (ObjectKind::HostGroup, &doc.hostgroups),
        (ObjectKind::ServiceTemplate, &doc.servicetemplates),
        (ObjectKind::ServiceGroup, &doc.servicegroups),
        (ObjectKind::ResourceConfig, &doc.resourcecfg),
        (ObjectKind::CgiConfig, &doc.cgicfg),
        (ObjectKind::ModGearmanConfig, &doc.modgearmancfg),
        (ObjectKind::MainConfig, &doc.nagioscfg),
    ]
}

impl<FS: FileSystem> Pipeline<FS> {
    fn run(&self, ctx: &mut BuildContext<'_>, request: &BuildRequest) -> NagstageResult<BuildReport> {
        let id = ctx.deployment.id().to_string();
        PermissionGuard::new(&self.fs, &self.layout).prepare_staging(&id)?;
        self.clear_staged(&id)?;

        let (mode, document, sharding) = {
            let source = self.source(request);
            let document = source.fetch(&ctx.deployment)?;
            let sharding = source.sharding(&ctx.deployment, &document)?;
            (source.mode(), document, sharding)
        };
        ctx.deployment = ctx.deployment.clone().with_sharding(sharding);

        let mut report = BuildReport::new(&id, mode);
        report.sub_deployment = ctx.sub_deployment().map(str::to_string);
        report.sharding = ctx.deployment.sharding().cloned();
        info!(deployment = %id, mode = ?mode, "building deployment");

        let mut transformer = self.transformers.create(mode);
        transformer.set_alias_template(document.miscsettings.aliastemplate.as_deref());
        transformer.set_global_negate(document.miscsettings.deploynegate.as_deref());
        if let Some(sharding) = ctx.deployment.sharding() {
            transformer.enable_sharding(sharding);
        }

        for (kind, section) in static_steps(&document) {
            if section_is_empty(section) {
                debug!(step = ?kind, "empty section, skipping");
                report.skipped.push(format!("{:?}", kind));
                continue;
            }
            self.write_collection(&id, &collection_from_section(kind, section), &mut report)?;
        }

        if !section_is_empty(&document.hostsearches) {
            self.import_host_searches(ctx, transformer.as_mut(), &document, &mut report)?;
        }
        for (key, tag, record) in document.static_hosts() {
            if !ctx.deployment.accepts(tag.as_deref()) {
                debug!(static_host = %key, "sub-deployment mismatch, skipping");
                continue;
            }
            transformer.import_static_host(&record);
        }

        if !ctx.force {
            if section_is_empty(&document.services) {
                return Err(incomplete("Initial Service Data was Empty"));
            }
            if section_is_empty(&document.nodetemplates) {
                return Err(incomplete("Initial NodeTemplate Data was Empty"));
            }
        }

        transformer.scrub_hosts();
        if !section_is_empty(&document.services) {
            transformer.import_services(&collection_from_section(ObjectKind::Service, &document.services));
        }
        if !section_is_empty(&document.nodetemplates) {
            transformer.import_node_templates(&document.node_templates(), ctx.sub_deployment());
        }
        if !section_is_empty(&document.servicedependencies) {
            transformer.import_service_dependencies(&collection_from_section(
                ObjectKind::ServiceDependency,
                &document.servicedependencies,
            ));
        }
        if !section_is_empty(&document.serviceescalations) {
            transformer.import_service_escalations(&collection_from_section(
                ObjectKind::ServiceEscalation,
                &document.serviceescalations,
            ));
        }

        let hosts = transformer.hosts();
        let services = transformer.services(&hosts);
        let dependencies = transformer.service_dependencies(&hosts);
        let escalations = transformer.service_escalations(&hosts);
        report.hosts = hosts.len();
        report.services = services.len();

        if !ctx.force {
            if hosts.is_empty() {
                return Err(incomplete("Host Cache is Empty, unable to create Host File"));
            }
            if services.is_empty() {
                return Err(incomplete(
                    "Service Cache is Empty, unable to create Services File",
                ));
            }
        }

        for derived in [&hosts, &services, &dependencies, &escalations] {
            if derived.is_empty() {
                report.skipped.push(format!("{:?}", derived.kind()));
                continue;
            }
            self.write_collection(&id, derived, &mut report)?;
        }

        info!(
            deployment = %id,
            artifacts = report.written.len(),
            hosts = report.hosts,
            services = report.services,
            "build complete"
        );
        Ok(report)
    }

    fn source(&self, request: &BuildRequest) -> Box<dyn DeploymentSource + '_> {
        match &request.revision {
            Some(revision) => Box::new(RevisionSource::new(
                self.revisions.as_ref(),
                revision.clone(),
                request.shard_position,
            )),
            None => {
                let position = self
                    .live_shard_position
                    .map(|default| request.shard_position.unwrap_or(default));
                Box::new(LiveSource::new(self.live.as_ref(), position))
            }
        }
    }

    fn clear_staged(&self, deployment: &str) -> NagstageResult<()> {
        for artifact in Artifact::staged_set() {
            let path = artifact.staging_path(&self.layout, deployment);
            if self.fs.exists(&path) {
                self.fs.remove(&path)?;
            }
        }
        Ok(())
    }

    fn writer(&self) -> ConfigWriter<'_, FS> {
        ConfigWriter::new(&self.fs).with_default_host_template(self.default_host_template.as_str())
    }

    fn write_collection(
        &self,
        deployment: &str,
        collection: &ObjectCollection,
        report: &mut BuildReport,
    ) -> NagstageResult<()> {
        let writer = self.writer();
        match Artifact::for_kind(collection.kind()) {
            Some(artifact) => {
                writer.serialize(collection, &artifact.staging_path(&self.layout, deployment))?;
                report.written.push(artifact.name().to_string());
            }
            None => {
                let [neb, worker] = Artifact::GEARMAN_FILES;
                writer.serialize_gearman(
                    collection,
                    &neb.staging_path(&self.layout, deployment),
                    &worker.staging_path(&self.layout, deployment),
                )?;
                report.written.push(neb.name().to_string());
                report.written.push(worker.name().to_string());
            }
        }
        Ok(())
    }

    fn import_host_searches(
        &self,
        ctx: &mut BuildContext<'_>,
        transformer: &mut dyn HostTransformer,
        document: &DeploymentDocument,
        report: &mut BuildReport,
    ) -> NagstageResult<()> {
        if ctx.replays_cache() {
            debug!(hosts = ctx.cache.len(), "replaying cached hosts");
            for (_, host, record) in ctx.cache.hosts() {
                transformer.import_host(host, record);
            }
            report.replayed_from_cache = true;
            return Ok(());
        }

        for (key, search) in document.host_searches() {
            let search = match search {
                Ok(search) => search,
                Err(err) => {
                    warn!(search = %key, error = %err, "skipping host search");
                    report.resolver_warnings.push(err.to_string());
                    continue;
                }
            };
            if !ctx.deployment.accepts(search.subdeployment.as_deref()) {
                debug!(search = %key, "sub-deployment mismatch, skipping");
                continue;
            }
            let resolver = match self.registry.resolve(&search.location) {
                Ok(resolver) => resolver,
                Err(err) => {
                    warn!(search = %key, error = %err, "skipping host search");
                    report.resolver_warnings.push(err.to_string());
                    continue;
                }
            };
            let hosts = match resolver.search(&search) {
                Ok(hosts) => hosts,
                Err(err) => {
                    let err = NagstageError::Resolver {
                        location: search.location.clone(),
                        message: err.to_string(),
                    };
                    warn!(search = %key, error = %err, "skipping host search");
                    report.resolver_warnings.push(err.to_string());
                    continue;
                }
            };
            if hosts.is_empty() {
                let message = format!(
                    "Empty Results Detected for {} : {}",
                    search.location, search.srchparam
                );
                warn!("{}", message);
                report.resolver_warnings.push(message);
                continue;
            }

            for (host, record) in hosts {
                transformer.import_host(&host, &record);
                if ctx.mirrors_cache() {
                    ctx.cache.record(&search.location, &host, record);
                }
            }
        }
        Ok(())
    }
}

fn incomplete(message: &str) -> NagstageError {
    warn!("{}", message);
    NagstageError::IncompleteSourceData(message.to_string())
}
