pub mod assembly;
pub mod error;
pub mod factory;
pub mod format;
pub mod fragment;
pub mod ir;
pub mod metadata;
pub mod parsing;
pub mod references;
pub mod render;

// Re-export key types for easier usage
pub use assembly::{AssembledDocument, Assembler, AssemblyOptions, PlacementPolicy, SectionKind};
pub use error::{Error, Location, Result};
pub use factory::{LicenseFactory, strip_markup};
pub use format::{FormatKind, FormatSelector};
pub use fragment::{Provenance, SourceFragment};
pub use metadata::LicenseMetadata;
pub use render::{RenderedOutput, Renderer};
