//! # COESI Deployment Profiles
//!
//! File: cli/src/core/profile.rs
//!
//! ## Overview
//!
//! Domain types shared by the command handlers:
//! - `Profile`: the two deployment targets, `dev` and `prod`. A profile selects
//!   the `.env.<profile>` file and the `--profile` flag given to Docker Compose.
//! - `ProfileSelection`: a profile or `all`, accepted by `stop`, `status` and `clean`.
//! - `ServicePorts`: the port of each platform service, resolved from the loaded
//!   configuration with documented defaults.
//! - `DeploymentTarget`: profile + IP + ports for one invocation, used to print
//!   the service URL table.
//!
use clap::ValueEnum;
use std::collections::BTreeMap;
use std::fmt;

/// Key holding the address services are published on.
pub const DEPLOY_IP_KEY: &str = "DEPLOY_IP";

/// IP used by the development profile. It is never read from input.
pub const DEV_IP: &str = "localhost";

/// A platform service published on `http://<ip>:<port>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    /// Label shown in the service URL table.
    pub label: &'static str,
    /// Environment key holding the port.
    pub port_key: &'static str,
    /// Port used when neither the env file nor the process environment set one.
    pub default_port: &'static str,
}

/// Services in the order they are listed in the URL table.
pub const SERVICES: [Service; 6] = [
    Service {
        label: "React Dashboard",
        port_key: "REACT_DASHBOARD_PORT",
        default_port: "3000",
    },
    Service {
        label: "GraphDB",
        port_key: "GRAPHDB_PORT",
        default_port: "7200",
    },
    Service {
        label: "Core API",
        port_key: "CORE_API_PORT",
        default_port: "8000",
    },
    Service {
        label: "Model Manager",
        port_key: "MODELS_MANAGER_PORT",
        default_port: "8001",
    },
    Service {
        label: "Validation",
        port_key: "VALIDATION_ENGINE_PORT",
        default_port: "8002",
    },
    Service {
        label: "Scenarios",
        port_key: "SCENARIO_MANAGER_PORT",
        default_port: "8003",
    },
];

/// Keys every environment file is expected to define.
pub const REQUIRED_KEYS: [&str; 7] = [
    DEPLOY_IP_KEY,
    "GRAPHDB_PORT",
    "CORE_API_PORT",
    "MODELS_MANAGER_PORT",
    "VALIDATION_ENGINE_PORT",
    "SCENARIO_MANAGER_PORT",
    "REACT_DASHBOARD_PORT",
];

/// A deployment profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Profile {
    /// Development, always published on localhost.
    #[value(name = "dev")]
    Dev,
    /// Production, published on a configurable IP.
    #[value(name = "prod")]
    Prod,
}

impl Profile {
    /// Both profiles, development first.
    pub const ALL: [Profile; 2] = [Profile::Dev, Profile::Prod];

    /// Name used for the `--profile` flag and the env file suffix.
    pub fn name(self) -> &'static str {
        match self {
            Profile::Dev => "dev",
            Profile::Prod => "prod",
        }
    }

    /// Human-readable name used in headings.
    pub fn title(self) -> &'static str {
        match self {
            Profile::Dev => "Development",
            Profile::Prod => "Production",
        }
    }

    /// File name of this profile's environment file, e.g. `.env.prod`.
    pub fn env_file_name(self) -> String {
        format!(".env.{}", self.name())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single profile or both of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ProfileSelection {
    #[value(name = "dev")]
    Dev,
    #[value(name = "prod")]
    Prod,
    #[default]
    #[value(name = "all")]
    All,
}

impl ProfileSelection {
    /// The profiles covered by this selection, development first.
    pub fn profiles(self) -> Vec<Profile> {
        match self {
            ProfileSelection::Dev => vec![Profile::Dev],
            ProfileSelection::Prod => vec![Profile::Prod],
            ProfileSelection::All => Profile::ALL.to_vec(),
        }
    }

    /// The single profile, or `None` for `all`.
    pub fn single(self) -> Option<Profile> {
        match self {
            ProfileSelection::Dev => Some(Profile::Dev),
            ProfileSelection::Prod => Some(Profile::Prod),
            ProfileSelection::All => None,
        }
    }
}

/// Resolved port for every service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePorts {
    ports: BTreeMap<&'static str, String>,
}

impl ServicePorts {
    /// Resolves each service port through `lookup`, falling back to its default.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let ports = SERVICES
            .iter()
            .map(|service| {
                let value = lookup(service.port_key)
                    .unwrap_or_else(|| service.default_port.to_string());
                (service.port_key, value)
            })
            .collect();
        Self { ports }
    }

    /// Port for the given key. Unknown keys yield "N/A".
    pub fn get(&self, port_key: &str) -> &str {
        self.ports.get(port_key).map_or("N/A", String::as_str)
    }
}

/// Where one deployment publishes its services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub profile: Profile,
    pub ip: String,
    pub ports: ServicePorts,
}

impl DeploymentTarget {
    /// `(label, url)` pairs in table order.
    pub fn service_urls(&self) -> Vec<(&'static str, String)> {
        SERVICES
            .iter()
            .map(|service| {
                (
                    service.label,
                    format!("http://{}:{}", self.ip, self.ports.get(service.port_key)),
                )
            })
            .collect()
    }
}
