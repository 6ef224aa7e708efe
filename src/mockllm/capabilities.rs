//! Static list of the components compiled into this build.
//!
//! Smoke scripts print this instead of probing installed packages at runtime.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capability {
    pub name: &'static str,
    pub version: &'static str,
    pub available: bool,
}

const COMPONENTS: &[Capability] = &[
    Capability {
        name: "completion_client",
        version: env!("CARGO_PKG_VERSION"),
        available: true,
    },
    Capability {
        name: "clients::mock",
        version: env!("CARGO_PKG_VERSION"),
        available: true,
    },
    Capability {
        name: "agent",
        version: env!("CARGO_PKG_VERSION"),
        available: true,
    },
    // Real providers are not part of this crate.
    Capability {
        name: "clients::remote",
        version: "-",
        available: false,
    },
];

pub fn components() -> &'static [Capability] {
    COMPONENTS
}

/// Whether a component named `name` is available in this build.
pub fn is_available(name: &str) -> bool {
    COMPONENTS.iter().any(|c| c.name == name && c.available)
}
