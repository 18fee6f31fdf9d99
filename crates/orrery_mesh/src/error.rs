use thiserror::Error;

/// Error produced when building a mesh.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MeshError {
    /// A segment count is zero
    #[error("invalid discretization {lat_or_tube}x{long_or_ring}: segment counts must be at least 1")]
    InvalidDiscretization {
        /// Latitude segments of a sphere, or tube segments of a torus.
        lat_or_tube: u32,
        /// Longitude segments of a sphere, or ring segments of a torus.
        long_or_ring: u32,
    },
}

impl MeshError {
    pub(crate) fn check_discretization(lat_or_tube: u32, long_or_ring: u32) -> Result<(), Self> {
        if lat_or_tube == 0 || long_or_ring == 0 {
            return Err(MeshError::InvalidDiscretization {
                lat_or_tube,
                long_or_ring,
            });
        }
        Ok(())
    }
}
