//! Generator configuration.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Optional code sections a generated file may include.
///
/// The generator only passes these through to the templates; what each one
/// adds is decided template-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceOption {
    /// Client stubs for services.
    WithClient,
    /// Server-side dispatch for services.
    WithServer,
    /// Monitoring hooks (stats and tracing callbacks).
    WithMonitoring,
}

impl ServiceOption {
    pub const ALL: [ServiceOption; 3] = [
        ServiceOption::WithClient,
        ServiceOption::WithServer,
        ServiceOption::WithMonitoring,
    ];

    /// Template variable that carries this option.
    pub fn flag_name(self) -> &'static str {
        match self {
            ServiceOption::WithClient => "with_client",
            ServiceOption::WithServer => "with_server",
            ServiceOption::WithMonitoring => "with_monitoring",
        }
    }
}

/// Configuration for one generator run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Root under which namespace directories are created.
    pub out_dir: PathBuf,

    /// Output dialect (default: "scala").
    pub language: String,

    /// Optional sections to include in struct and service files.
    pub service_options: BTreeSet<ServiceOption>,

    /// Compute the files that would be generated without writing anything.
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("generated"),
            language: "scala".to_string(),
            service_options: BTreeSet::new(),
            dry_run: false,
        }
    }
}
