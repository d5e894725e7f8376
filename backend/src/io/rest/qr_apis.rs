//! QR code pointing at the attendance page, for printing at the door.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
};
use qrcode::{render::svg, QrCode};
use tracing::info;

use super::error::{ApiError, ApiResult};
use crate::AppState;

/// Path of the attendance endpoint as routed by `create_router`
pub const ATTENDANCE_PATH: &str = "/api/attendance";

/// URL the code encodes: the configured public URL, else the request's host,
/// joined with [`ATTENDANCE_PATH`]
pub fn attendance_url(public_url: Option<&str>, headers: &HeaderMap) -> String {
    let base = match public_url {
        Some(url) => url.to_string(),
        None => {
            let host = headers
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("localhost");
            format!("http://{}", host)
        }
    };
    format!("{}{}", base, ATTENDANCE_PATH)
}

pub async fn attendance_qr(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let url = attendance_url(state.config.public_url.as_deref(), &headers);
    info!("GET /api/qr - encoding {}", url);

    let code = QrCode::new(url.as_bytes()).map_err(ApiError::internal)?;
    let image = code
        .render::<svg::Color<'_>>()
        .min_dimensions(240, 240)
        .build();

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_attendance_url_prefers_configured_base() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("10.0.0.5:5000"));

        assert_eq!(
            attendance_url(Some("https://school.example.org"), &headers),
            "https://school.example.org/api/attendance"
        );
        assert_eq!(attendance_url(None, &headers), "http://10.0.0.5:5000/api/attendance");
        assert_eq!(
            attendance_url(None, &HeaderMap::new()),
            "http://localhost/api/attendance"
        );
    }
}
