//! `key=value` settings files: resource.cfg, cgi.cfg, nagios.cfg and the
//! mod-gearman pair

use crate::domain::entities::{ObjectCollection, ObjectKind, ObjectRecord, BROKER_MODULE_PREFIX};
use crate::error::NagstageResult;

use super::format::setting_line;

/// Keys shared by the neb module and the worker
const GEARMAN_CORE_KEYS: &[&str] = &[
    "debug",
    "eventhandler",
    "services",
    "hosts",
    "do_hostchecks",
    "encryption",
    "server",
    "dupeserver",
    "hostgroups",
    "servicegroups",
    "logfile",
    "key",
];

/// Keys only the neb module reads
const GEARMAN_NEB_KEYS: &[&str] = &[
    "result_workers",
    "use_uniq_jobs",
    "localhostgroup",
    "localservicegroup",
    "queue_custom_variable",
    "perfdata",
    "perfdata_mode",
    "orphan_host_checks",
    "orphan_service_checks",
    "accept_clear_results",
];

/// Keys only the worker reads
const GEARMAN_WORKER_KEYS: &[&str] = &[
    "job-timeout",
    "min-worker",
    "max-worker",
    "idle-timeout",
    "max-jobs",
    "max-age",
    "spawn-rate",
    "fork_on_exec",
    "show_error_output",
    "workaround_rc_25",
    "load_limit1",
    "load_limit5",
    "load_limit15",
    "dup_results_are_passive",
    "enable_embedded_perl",
    "use_embedded_perl_implicitly",
    "use_perl_cache",
    "p1_file",
];

/// Render resource, cgi or main config
pub fn render_settings(collection: &ObjectCollection) -> NagstageResult<String> {
    let mut out = String::new();
    for (_, record) in collection.records() {
        for (key, value) in record.iter() {
            let rendered = value.render(key)?;
            let line = match collection.kind() {
                ObjectKind::ResourceConfig => setting_line(&format!("${}$", key), &rendered),
                ObjectKind::MainConfig if key.starts_with(BROKER_MODULE_PREFIX) => {
                    setting_line("broker_module", &rendered)
                }
                _ => setting_line(key, &rendered),
            };
            out.push_str(&line);
        }
    }
    Ok(out)
}

/// Rendered mod-gearman configuration pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GearmanConfigs {
    pub neb: String,
    pub worker: String,
}

/// Split one gearman settings map into neb and worker files.
///
/// Core keys go to both, the neb and worker families to one each, and
/// anything else is dropped.
pub fn render_gearman(collection: &ObjectCollection) -> NagstageResult<GearmanConfigs> {
    let mut configs = GearmanConfigs {
        neb: String::new(),
        worker: String::new(),
    };
    for (_, record) in collection.records() {
        render_gearman_record(record, &mut configs)?;
    }
    Ok(configs)
}

fn render_gearman_record(record: &ObjectRecord, configs: &mut GearmanConfigs) -> NagstageResult<()> {
    for (key, value) in record.iter() {
        let to_neb = GEARMAN_CORE_KEYS.contains(&key) || GEARMAN_NEB_KEYS.contains(&key);
        let to_worker = GEARMAN_CORE_KEYS.contains(&key) || GEARMAN_WORKER_KEYS.contains(&key);
        if !to_neb && !to_worker {
            continue;
        }
        let line = setting_line(key, &value.render(key)?);
        if to_neb {
            configs.neb.push_str(&line);
        }
        if to_worker {
            configs.worker.push_str(&line);
        }
    }
    Ok(())
}
