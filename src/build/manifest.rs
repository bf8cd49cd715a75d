// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

use crate::error::{Error, Result};

/// Manifest format this build understands.
pub const MANIFEST_VERSION: u32 = 1;

/// URL prefix when the manifest does not set one.
pub const DEFAULT_URL_PREFIX: &str = "/blog";

/// `manifest.json` at the root of a build input directory.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InputManifest {
    pub version: u32,
    /// Post files, relative to the manifest.
    pub documents: Vec<String>,
    #[serde(default)]
    pub url_prefix: Option<String>,
}

impl InputManifest {
    pub fn url_prefix(&self) -> &str {
        self.url_prefix.as_deref().unwrap_or(DEFAULT_URL_PREFIX)
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != MANIFEST_VERSION {
            return Err(Error::Config(format!(
                "unsupported manifest version {} (expected {})",
                self.version, MANIFEST_VERSION
            )));
        }
        Ok(())
    }
}
