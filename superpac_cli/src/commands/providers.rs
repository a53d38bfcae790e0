//! The `providers` subcommand: list what the current credentials registered.

use anyhow::Result;
use superpac_lib::{known_providers, Registry};

use crate::output::{print_providers, OutputFormat};

pub fn run(registry: &Registry, format: &OutputFormat) -> Result<()> {
    if registry.is_empty() {
        eprintln!(
            "No providers registered. Known providers: {}",
            known_providers().join(", ")
        );
    }
    print_providers(registry, format)
}
