// Re-export model types and service functions
pub mod geocode;
pub mod model;
pub mod service;

pub use model::{
    AnimalCondition, Collar, CreateReportPayload, Report, ReportStatus, ReportSubmission, Species,
};
pub use geocode::{resolve_place, GeocodedPlace, ReverseGeocode, THAI_PROVINCES};
pub use service::*;
