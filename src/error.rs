//! Error types for the explorer.
//!
//! This module provides error types for registry lookup, GPU initialization,
//! snapshot export, and other operations that can fail.

use std::fmt;

/// Errors produced by the rule and analysis registries.
#[derive(Debug)]
pub enum RegistryError {
    /// No factory registered under the requested id.
    Unknown(String),
    /// A factory with this id is already registered.
    Duplicate(&'static str),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Unknown(id) => {
                write!(f, "No entry registered under '{}'. Check the id against the registry listing.", id)
            }
            RegistryError::Duplicate(id) => {
                write!(f, "An entry named '{}' is already registered.", id)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur while exporting a lattice snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// Failed to encode or write the image.
    Image(image::ImageError),
    /// The pixel buffer does not match the lattice dimensions.
    SizeMismatch { width: u32, height: u32 },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Image(e) => write!(f, "Failed to write snapshot: {}", e),
            SnapshotError::SizeMismatch { width, height } => {
                write!(f, "Pixel buffer does not match lattice size {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Image(e) => Some(e),
            SnapshotError::SizeMismatch { .. } => None,
        }
    }
}

impl From<image::ImageError> for SnapshotError {
    fn from(e: image::ImageError) -> Self {
        SnapshotError::Image(e)
    }
}

/// Errors that can occur when running the explorer.
#[derive(Debug)]
pub enum ExplorerError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The configured rule or analysis could not be instantiated.
    Registry(RegistryError),
    /// The configured rule does not support the configured lattice topology.
    IncompatibleTopology {
        rule: String,
        topology: crate::lattice::Topology,
    },
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplorerError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            ExplorerError::Window(e) => write!(f, "Failed to create window: {}", e),
            ExplorerError::Gpu(e) => write!(f, "GPU error: {}", e),
            ExplorerError::Registry(e) => write!(f, "Registry error: {}", e),
            ExplorerError::IncompatibleTopology { rule, topology } => {
                write!(f, "Rule '{}' does not run on a {} lattice", rule, topology)
            }
        }
    }
}

impl std::error::Error for ExplorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExplorerError::EventLoop(e) => Some(e),
            ExplorerError::Window(e) => Some(e),
            ExplorerError::Gpu(e) => Some(e),
            ExplorerError::Registry(e) => Some(e),
            ExplorerError::IncompatibleTopology { .. } => None,
        }
    }
}

impl From<winit::error::EventLoopError> for ExplorerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ExplorerError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ExplorerError {
    fn from(e: winit::error::OsError) -> Self {
        ExplorerError::Window(e)
    }
}

impl From<GpuError> for ExplorerError {
    fn from(e: GpuError) -> Self {
        ExplorerError::Gpu(e)
    }
}

impl From<RegistryError> for ExplorerError {
    fn from(e: RegistryError) -> Self {
        ExplorerError::Registry(e)
    }
}
