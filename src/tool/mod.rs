//! Managed tools
//!
//! Every tool backplane-tools knows how to manage implements [`Tool`]. The
//! registry is the fixed list of those tools.

pub mod ocm;

use crate::error::InstallError;
use crate::types::{PlatformInfo, Settings};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::path::Path;

pub use ocm::OcmTool;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    /// Install the latest release beneath `root_dir`.
    async fn install(&self, root_dir: &Path) -> Result<(), InstallError>;

    fn configure(&self) -> Result<(), InstallError> {
        Ok(())
    }

    fn remove(&self) -> Result<(), InstallError> {
        Ok(())
    }
}

pub fn registry(settings: &Settings, platform: &PlatformInfo) -> Vec<Box<dyn Tool>> {
    vec![Box::new(OcmTool::new(&settings.github_api_url, platform.clone()))]
}

/// Look up `names` in `tools`. No names means every tool.
///
/// Unknown names are rejected as a whole so nothing is touched when one of
/// the requested tools doesn't exist.
pub fn select_tools<'a>(tools: &'a [Box<dyn Tool>], names: &[String]) -> Result<Vec<&'a dyn Tool>> {
    if names.is_empty() {
        return Ok(tools.iter().map(|t| t.as_ref()).collect());
    }

    let unknown: Vec<&str> = names
        .iter()
        .filter(|name| !tools.iter().any(|t| t.name() == name.as_str()))
        .map(|name| name.as_str())
        .collect();
    if !unknown.is_empty() {
        let known: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        return Err(anyhow!(
            "Unknown tool(s): {}. Available tools: {}",
            unknown.join(", "),
            known.join(", ")
        ));
    }

    let mut selected: Vec<&dyn Tool> = Vec::new();
    for tool in tools {
        if names.iter().any(|name| name == tool.name()) {
            selected.push(tool.as_ref());
        }
    }
    Ok(selected)
}
