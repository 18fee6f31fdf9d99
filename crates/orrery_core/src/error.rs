use orrery_math::Float;
use orrery_mesh::MeshError;
use thiserror::Error;

/// Error produced by the conformal sphere model or a versor transform.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The dual of the sphere has no origin component, so it has no finite
    /// center or radius
    #[error("degenerate sphere: dual has no origin component")]
    DegenerateSphere,
    /// Scale factor for which no dilator exists
    #[error("invalid scale factor {0}")]
    InvalidScaleFactor(Float),
    /// Versor with no inverse
    #[error("versor is not invertible")]
    NonInvertibleVersor,
    /// Mesh error
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
