//! Generated artifacts and the promotion manifest

use std::path::PathBuf;

use serde::Serialize;

use super::object::ObjectKind;
use crate::domain::value_objects::{ContentHash, Layout};

/// Every file a build can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Artifact {
    Timeperiods,
    Commands,
    ContactTemplates,
    Contacts,
    ContactGroups,
    HostTemplates,
    HostGroups,
    ServiceTemplates,
    ServiceGroups,
    Hosts,
    Services,
    ServiceDependencies,
    ServiceEscalations,
    Resource,
    Cgi,
    /// Production nagios.cfg, staged as `nagios.cfg.in`
    MainConfig,
    /// Verification copy used only by the checker
    VerifyConfig,
    GearmanNeb,
    GearmanWorker,
}

/// Where an artifact lives inside a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    ObjectDir,
    Root,
    Gearman,
}

impl Artifact {
    /// Per-deployment object files, in manifest order
    pub const OBJECT_FILES: [Artifact; 13] = [
        Artifact::Commands,
        Artifact::ContactGroups,
        Artifact::Contacts,
        Artifact::ContactTemplates,
        Artifact::HostGroups,
        Artifact::Hosts,
        Artifact::HostTemplates,
        Artifact::ServiceGroups,
        Artifact::Services,
        Artifact::ServiceTemplates,
        Artifact::ServiceDependencies,
        Artifact::ServiceEscalations,
        Artifact::Timeperiods,
    ];

    /// Shared core files
    pub const CORE_FILES: [Artifact; 3] = [Artifact::Resource, Artifact::Cgi, Artifact::MainConfig];

    /// Gearman files: built for inspection, consumed by a separate process
    pub const GEARMAN_FILES: [Artifact; 2] = [Artifact::GearmanNeb, Artifact::GearmanWorker];

    /// Artifacts promotion considers. Gearman files are never promoted.
    pub fn promotion_manifest() -> impl Iterator<Item = Artifact> {
        Self::OBJECT_FILES.into_iter().chain(Self::CORE_FILES)
    }

    /// Everything a build stages (and a rebuild clears)
    pub fn staged_set() -> impl Iterator<Item = Artifact> {
        Self::promotion_manifest().chain(Self::GEARMAN_FILES)
    }

    /// Logical (production) file name
    pub fn name(&self) -> &'static str {
        match self {
            Artifact::Timeperiods => "timeperiods.cfg",
            Artifact::Commands => "commands.cfg",
            Artifact::ContactTemplates => "contact-templates.cfg",
            Artifact::Contacts => "contacts.cfg",
            Artifact::ContactGroups => "contact-groups.cfg",
            Artifact::HostTemplates => "host-templates.cfg",
            Artifact::HostGroups => "hostgroups.cfg",
            Artifact::ServiceTemplates => "service-templates.cfg",
            Artifact::ServiceGroups => "service-groups.cfg",
            Artifact::Hosts => "hosts.cfg",
            Artifact::Services => "services.cfg",
            Artifact::ServiceDependencies => "service-dependencies.cfg",
            Artifact::ServiceEscalations => "service-escalations.cfg",
            Artifact::Resource => "resource.cfg",
            Artifact::Cgi => "cgi.cfg",
            Artifact::MainConfig | Artifact::VerifyConfig => "nagios.cfg",
            Artifact::GearmanNeb => "mod_gearman_neb.conf",
            Artifact::GearmanWorker => "mod_gearman_worker.conf",
        }
    }

    /// File name inside the staging tree
    pub fn staged_name(&self) -> &'static str {
        match self {
            Artifact::MainConfig => "nagios.cfg.in",
            other => other.name(),
        }
    }

    fn placement(&self) -> Placement {
        match self {
            Artifact::Resource | Artifact::Cgi | Artifact::MainConfig | Artifact::VerifyConfig => {
                Placement::Root
            }
            Artifact::GearmanNeb | Artifact::GearmanWorker => Placement::Gearman,
            _ => Placement::ObjectDir,
        }
    }

    pub fn staging_path(&self, layout: &Layout, deployment: &str) -> PathBuf {
        match self.placement() {
            Placement::ObjectDir => layout.staging_object_dir(deployment).join(self.staged_name()),
            Placement::Root | Placement::Gearman => {
                layout.staging_dir(deployment).join(self.staged_name())
            }
        }
    }

    pub fn production_path(&self, layout: &Layout) -> PathBuf {
        match self.placement() {
            Placement::ObjectDir => layout.production_object_dir().join(self.name()),
            Placement::Root => layout.production_root().join(self.name()),
            Placement::Gearman => layout.gearman_root().join(self.name()),
        }
    }

    /// The object-file artifact for a block kind
    pub fn for_kind(kind: ObjectKind) -> Option<Artifact> {
        Some(match kind {
            ObjectKind::Timeperiod => Artifact::Timeperiods,
            ObjectKind::Command => Artifact::Commands,
            ObjectKind::ContactTemplate => Artifact::ContactTemplates,
            ObjectKind::Contact => Artifact::Contacts,
            ObjectKind::ContactGroup => Artifact::ContactGroups,
            ObjectKind::HostTemplate => Artifact::HostTemplates,
            ObjectKind::HostGroup => Artifact::HostGroups,
            ObjectKind::ServiceTemplate => Artifact::ServiceTemplates,
            ObjectKind::ServiceGroup => Artifact::ServiceGroups,
            ObjectKind::Host => Artifact::Hosts,
            ObjectKind::Service => Artifact::Services,
            ObjectKind::ServiceDependency => Artifact::ServiceDependencies,
            ObjectKind::ServiceEscalation => Artifact::ServiceEscalations,
            ObjectKind::ResourceConfig => Artifact::Resource,
            ObjectKind::CgiConfig => Artifact::Cgi,
            ObjectKind::MainConfig => Artifact::MainConfig,
            ObjectKind::ModGearmanConfig => return None,
        })
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete artifact for one deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    pub artifact: Artifact,
    pub staging_path: PathBuf,
    pub production_path: PathBuf,
    /// Hash of the staged copy, once computed
    pub hash: Option<ContentHash>,
}

impl ArtifactFile {
    pub fn new(artifact: Artifact, layout: &Layout, deployment: &str) -> Self {
        Self {
            artifact,
            staging_path: artifact.staging_path(layout, deployment),
            production_path: artifact.production_path(layout),
            hash: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.artifact.name()
    }
}
