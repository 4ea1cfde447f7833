//! Error types for carnet-core.

/// Result type for carnet-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in carnet-core.
///
/// Per-attachment conversion failures during dossier generation are handled
/// inside the generator (logged and skipped); errors surfacing from this
/// crate are the fatal ones, such as an unwritable destination.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Building a PDF page failed.
    #[error("PDF build error: {0}")]
    Pdf(String),

    /// Reading, parsing, or writing a PDF document failed.
    #[error("PDF document error: {0}")]
    Document(#[from] lopdf::Error),

    /// Decoding an image attachment failed.
    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// The merged document ended up without a page tree.
    #[error("Merged document has no pages")]
    NoPages,

    /// The merged document ended up without a catalog.
    #[error("Merged document has no catalog")]
    NoCatalog,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
