//! The top-level entry point: metadata in, one text blob per format out.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{
    assembly::{Assembler, AssemblyOptions},
    error::Result,
    format::{FormatKind, FormatSelector},
    fragment::Provenance,
    metadata::LicenseMetadata,
    parsing::parse_lenient,
    render::{RenderedOutput, render, strip_nodes},
};

/// Produces every requested format of a license.
#[derive(Debug, Clone, Default)]
pub struct LicenseFactory {
    options: AssemblyOptions,
}

impl LicenseFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: AssemblyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AssemblyOptions {
        &self.options
    }

    /// Assembles and renders the formats `selector` names. The first
    /// structural or reference error aborts the whole license.
    pub fn produce(
        &self,
        metadata: &LicenseMetadata,
        selector: FormatSelector,
    ) -> Result<BTreeMap<FormatKind, RenderedOutput>> {
        let assembler = Assembler::new(metadata, &self.options)?;
        let mut outputs = BTreeMap::new();
        for format in selector.formats() {
            let doc = assembler.assemble(format)?;
            outputs.insert(format, render(&doc));
        }
        log::info!(
            "produced {} format(s) for {}",
            outputs.len(),
            metadata.plain_name
        );
        Ok(outputs)
    }

    /// Produces many licenses in parallel. Results come back in input
    /// order; one license failing does not affect the others.
    pub fn produce_batch(
        &self,
        licenses: &[LicenseMetadata],
        selector: FormatSelector,
    ) -> Vec<Result<BTreeMap<FormatKind, RenderedOutput>>> {
        licenses
            .par_iter()
            .map(|metadata| self.produce(metadata, selector))
            .collect()
    }

    /// The official text stripped to plain words, for readability
    /// comparison. `None` when the license has no official text.
    pub fn original_plaintext(&self, metadata: &LicenseMetadata) -> Option<String> {
        if !metadata.has_original() {
            return None;
        }
        let text = match &self.options.year {
            Some(year) => crate::parsing::replace_year(&metadata.original_license_text, year)
                .into_owned(),
            None => metadata.original_license_text.clone(),
        };
        Some(strip_text(Provenance::Original, &text))
    }
}

/// Strips arbitrary markup to plain text. Accepts any input: malformed
/// nesting is closed where it ends and unresolved references are ignored.
pub fn strip_markup(text: &str) -> String {
    strip_text(Provenance::Body, text)
}

fn strip_text(origin: Provenance, text: &str) -> String {
    strip_nodes(&parse_lenient(origin, text).nodes)
}
