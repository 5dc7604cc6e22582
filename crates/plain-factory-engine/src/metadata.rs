//! Typed license metadata: every key the factory reads, with its default.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_plain_version() -> String {
    "0.0.0".to_string()
}

fn default_interpretation_title() -> String {
    "Interpreting this license".to_string()
}

fn default_disclaimer_title() -> String {
    "This is not legal advice".to_string()
}

fn default_adaptation_disclaimer_title() -> String {
    "Not the official license".to_string()
}

fn default_changelog_label() -> String {
    "Changelog".to_string()
}

fn default_original_label() -> String {
    "Official text".to_string()
}

fn default_embed_label() -> String {
    "Embed".to_string()
}

/// Where the site serves the embeddable page of a license.
const EMBED_BASE_URL: &str = "https://plainlicense.org/embed";

/// Everything needed to produce one license in every format.
///
/// Text fields hold markup in the license dialect; they become source
/// fragments during assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseMetadata {
    pub plain_name: String,
    #[serde(default = "default_plain_version")]
    pub plain_version: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub original_version: Option<String>,
    /// Where the official text is published.
    #[serde(default)]
    pub original_url: Option<String>,
    /// The official text already links to itself; no extra link is added.
    #[serde(default)]
    pub link_in_original: bool,

    pub reader_license_text: String,
    #[serde(default = "default_interpretation_title")]
    pub interpretation_title: String,
    #[serde(default)]
    pub interpretation_text: String,
    /// Pre-templated embedding instructions, used by the reader format only.
    #[serde(default)]
    pub boilerplate_text: String,

    #[serde(default = "default_disclaimer_title")]
    pub disclaimer_title: String,
    pub disclaimer_text: String,
    #[serde(default = "default_adaptation_disclaimer_title")]
    pub adaptation_disclaimer_title: String,
    #[serde(default)]
    pub adaptation_disclaimer_text: String,
    #[serde(default)]
    pub is_adaptation: bool,

    #[serde(default)]
    pub original_license_text: String,
    #[serde(default)]
    pub changelog_text: String,
    #[serde(default = "default_changelog_label")]
    pub changelog_label: String,
    #[serde(default = "default_original_label")]
    pub original_label: String,

    /// SPDX identifier; the embed URL is derived from it.
    #[serde(default)]
    pub spdx_id: Option<String>,
    /// Overrides the embed URL derived from `spdx_id`.
    #[serde(default)]
    pub embed_url: Option<String>,
    /// The license's page on the site, linked from the embed instructions.
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default = "default_embed_label")]
    pub embed_label: String,

    #[serde(default)]
    pub extra_prepend: String,
    #[serde(default)]
    pub outro: String,
}

impl LicenseMetadata {
    /// Metadata with the required fields set and every other field defaulted.
    pub fn new(
        plain_name: impl Into<String>,
        reader_license_text: impl Into<String>,
        disclaimer_text: impl Into<String>,
    ) -> Self {
        Self {
            plain_name: plain_name.into(),
            plain_version: default_plain_version(),
            original_name: None,
            original_version: None,
            original_url: None,
            link_in_original: false,
            reader_license_text: reader_license_text.into(),
            interpretation_title: default_interpretation_title(),
            interpretation_text: String::new(),
            boilerplate_text: String::new(),
            disclaimer_title: default_disclaimer_title(),
            disclaimer_text: disclaimer_text.into(),
            adaptation_disclaimer_title: default_adaptation_disclaimer_title(),
            adaptation_disclaimer_text: String::new(),
            is_adaptation: false,
            original_license_text: String::new(),
            changelog_text: String::new(),
            changelog_label: default_changelog_label(),
            original_label: default_original_label(),
            spdx_id: None,
            embed_url: None,
            page_url: None,
            embed_label: default_embed_label(),
            extra_prepend: String::new(),
            outro: String::new(),
        }
    }

    /// Rejects metadata the assembler cannot work with.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("plain_name", &self.plain_name),
            ("reader_license_text", &self.reader_license_text),
            ("disclaimer_text", &self.disclaimer_text),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(Error::MissingField(*field));
        }
        if self.is_adaptation && self.adaptation_disclaimer_text.trim().is_empty() {
            return Err(Error::MissingField("adaptation_disclaimer_text"));
        }
        Ok(())
    }

    /// Whether an official text is available to place.
    pub fn has_original(&self) -> bool {
        !self.original_license_text.trim().is_empty()
    }

    /// The URL of the embeddable page, when one is known.
    pub fn embed_url(&self) -> Option<String> {
        let explicit = self.embed_url.as_deref().map(str::trim).filter(|url| !url.is_empty());
        if let Some(url) = explicit {
            return Some(url.to_string());
        }
        let spdx_id = self.spdx_id.as_deref().map(str::trim).filter(|id| !id.is_empty())?;
        Some(format!("{EMBED_BASE_URL}/{}.html", spdx_id.to_lowercase()))
    }

    /// The line under the title naming both versions.
    pub fn version_line(&self) -> String {
        match &self.original_version {
            Some(original) if !original.trim().is_empty() => format!(
                "Plain version {}, based on original version {}.",
                self.plain_version, original
            ),
            _ => format!("Plain version {}.", self.plain_version),
        }
    }
}
