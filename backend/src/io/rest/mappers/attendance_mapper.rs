//! backend/src/io/rest/mappers/attendance_mapper.rs

use crate::domain::models::attendance::{AttendanceEvent, TIMESTAMP_FORMAT};
use shared::{AttendanceListResponse, AttendanceRecord};

pub struct AttendanceMapper;

impl AttendanceMapper {
    pub fn to_dto(event: AttendanceEvent) -> AttendanceRecord {
        AttendanceRecord {
            id: event.id,
            timestamp: event.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            child_name: event.child_name,
        }
    }

    pub fn to_list_dto(events: Vec<AttendanceEvent>) -> AttendanceListResponse {
        AttendanceListResponse {
            records: events.into_iter().map(Self::to_dto).collect(),
        }
    }
}
