//! Refresh configuration: manifest format and resolution

mod manifest;
mod resolver;

pub use manifest::{ArtifactNames, PackageManagerSection, RefreshManifest};
pub use resolver::{ConfigResolver, RefreshConfig};
