//! Error types for brickgrid.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`GridError`].
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while gridding a mesh.
#[derive(Error, Debug)]
pub enum GridError {
    /// The mesh has no vertices, so its bounds (and therefore a grid over
    /// them) are undefined.
    #[error("mesh is empty (no vertices)")]
    EmptyMesh,

    /// A grid was requested with a zero cell count on some axis.
    #[error("invalid grid dimensions {nx}x{ny}x{nz}: all axes must be >= 1")]
    InvalidGridDimensions {
        /// Requested cell count along x.
        nx: usize,
        /// Requested cell count along y.
        ny: usize,
        /// Requested cell count along z.
        nz: usize,
    },

    /// A triangle references a vertex index outside the vertex buffer.
    #[error("triangle {triangle} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The triangle index.
        triangle: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// The mesh file has structure this tool does not handle
    /// (e.g. multiple groups or materials in an OBJ file).
    #[error("unsupported mesh structure: {details}")]
    UnsupportedMeshStructure {
        /// Description of the offending structure.
        details: String,
    },

    /// A face in the input is not a triangle.
    #[error("line {line}: face has {vertex_count} vertices, only triangles are supported")]
    NonTriangularFace {
        /// Line number in the source file (1-based).
        line: usize,
        /// Number of vertices the face actually has.
        vertex_count: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading a mesh from a file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving a brick to a file.
    #[error("failed to save brick to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },
}
