//! Stray-report map: which reports become markers, what their popups say,
//! and how each popup reacts to hover and click.
//!
//! The mapping library itself is out of reach here. It is seen only through
//! [`registry::MapSurface`], and the registry is the single owner of it.

pub mod lifecycle;
pub mod overview;
pub mod popup;
pub mod registry;

pub use lifecycle::{transition, MarkerController, MarkerEvent, MarkerPhase, MarkerState, PopupCommand};
pub use overview::{
    build_overview, LatLng, MapOverview, MarkerSpec, ReportFilter, StatusSummary, DEFAULT_CENTER,
};
pub use registry::{MapSurface, MarkerId, MarkerRegistry};
