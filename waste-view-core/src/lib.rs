//! Core of the Auckland waste collection card: configuration, entity resolution, and rendering.

/// The card component the host configures and pushes snapshots into.
pub mod card;
/// Card configuration and its validation.
pub mod config;
/// Mapping from entity states to display records.
pub mod mapper;
/// Domain models shared by all stages.
pub mod model;
/// Display surface seam and host-facing errors.
pub mod ports;
/// Registry of card types for the host's picker.
pub mod registry;
/// Markup rendering and the icon/label rules.
pub mod render;
/// Entity selection from a snapshot.
pub mod resolver;

pub use card::*;
pub use config::*;
pub use mapper::*;
pub use model::*;
pub use ports::*;
pub use registry::*;
pub use render::*;
pub use resolver::*;
