use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use models::Branding;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MissingAssetError {
    #[error("File {} not found. Check that the file is in the right location.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Could not read {}: {}", .path.display(), .source)]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads the SVG logo and encodes it as a `data:` URI ready for an `<img src>`.
pub fn load_svg_data_uri(path: &Path) -> Result<String, MissingAssetError> {
    if !path.is_file() {
        return Err(MissingAssetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let svg = std::fs::read(path).map_err(|source| MissingAssetError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg)))
}

/// Loads the branding image, turning a failure into a sidebar notice.
pub fn load_branding(path: &Path) -> Branding {
    match load_svg_data_uri(path) {
        Ok(data_uri) => Branding::Image { data_uri },
        Err(e) => {
            tracing::warn!(error = %e, "branding image unavailable");
            Branding::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}
