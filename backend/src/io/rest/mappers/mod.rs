//! Conversions between domain models and the `shared` wire DTOs.

pub mod attendance_mapper;
pub mod user_mapper;
pub mod wizard_mapper;
