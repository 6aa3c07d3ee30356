//! Google Geocoding API provider

use super::http::{AsyncHttpClient, HttpClient};
use super::types::{AsyncGeocodeProvider, GeocodeHit, GeocodeProvider, GeocoderError, PrecisionTier};
use crate::geo::Point;
use serde::Deserialize;
use tracing::{debug, warn};

/// Environment variable holding the Google Maps API key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
    #[serde(default)]
    location_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// Interpret a Google Geocoding API payload.
///
/// `OK` with results yields the top result's location and tier;
/// `ZERO_RESULTS` and other non-`OK` statuses yield no result (the
/// cascade moves on to the next candidate).
fn parse_response(body: &[u8], query: &str) -> Result<Option<GeocodeHit>, GeocoderError> {
    let response: GeocodeResponse = serde_json::from_slice(body)
        .map_err(|e| GeocoderError::InvalidResponse(format!("bad JSON payload: {}", e)))?;

    if response.status == "OK" {
        if let Some(result) = response.results.first() {
            let location = &result.geometry.location;
            let point = Point::new(location.lat, location.lng).map_err(|e| {
                GeocoderError::InvalidResponse(format!("out-of-range coordinates: {}", e))
            })?;
            let tier = PrecisionTier::from_location_type(
                result.geometry.location_type.as_deref().unwrap_or(""),
            );
            return Ok(Some(GeocodeHit { point, tier }));
        }
        return Ok(None);
    }

    if response.status == "ZERO_RESULTS" {
        debug!(query = query, "no geocoding results");
    } else {
        warn!(
            query = query,
            status = %response.status,
            error = response.error_message.as_deref().unwrap_or(""),
            "geocoding API returned non-OK status"
        );
    }

    Ok(None)
}

/// Google Geocoding API provider (blocking).
pub struct GoogleGeocoder<C: HttpClient> {
    http_client: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClient> GoogleGeocoder<C> {
    /// Creates a new provider with an explicit API key.
    pub fn new(http_client: C, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            base_url: GEOCODE_URL.to_string(),
        }
    }

    /// Creates a new provider reading the key from `GOOGLE_MAPS_API_KEY`.
    pub fn from_env(http_client: C) -> Result<Self, GeocoderError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(GeocoderError::MissingApiKey(API_KEY_ENV))?;
        Ok(Self::new(http_client, api_key))
    }

    /// Override the endpoint URL (test hook).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl<C: HttpClient> GeocodeProvider for GoogleGeocoder<C> {
    fn geocode(&self, query: &str) -> Result<Option<GeocodeHit>, GeocoderError> {
        let body = self
            .http_client
            .get_with_query(&self.base_url, &[("address", query), ("key", &self.api_key)])?;
        parse_response(&body, query)
    }

    fn name(&self) -> &str {
        "Google Geocoding"
    }
}

/// Google Geocoding API provider (async).
pub struct AsyncGoogleGeocoder<C: AsyncHttpClient> {
    http_client: C,
    api_key: String,
    base_url: String,
}

impl<C: AsyncHttpClient> AsyncGoogleGeocoder<C> {
    /// Creates a new provider with an explicit API key.
    pub fn new(http_client: C, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            base_url: GEOCODE_URL.to_string(),
        }
    }

    /// Creates a new provider reading the key from `GOOGLE_MAPS_API_KEY`.
    pub fn from_env(http_client: C) -> Result<Self, GeocoderError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(GeocoderError::MissingApiKey(API_KEY_ENV))?;
        Ok(Self::new(http_client, api_key))
    }

    /// Override the endpoint URL (test hook).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl<C: AsyncHttpClient> AsyncGeocodeProvider for AsyncGoogleGeocoder<C> {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodeHit>, GeocoderError> {
        let body = self
            .http_client
            .get_with_query(&self.base_url, &[("address", query), ("key", &self.api_key)])
            .await?;
        parse_response(&body, query)
    }

    fn name(&self) -> &str {
        "Google Geocoding"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::{MockAsyncHttpClient, MockHttpClient};

    fn ok_body(lat: f64, lng: f64, location_type: &str) -> Vec<u8> {
        format!(
            r#"{{"status": "OK", "results": [{{"geometry": {{"location": {{"lat": {}, "lng": {}}}, "location_type": "{}"}}}}]}}"#,
            lat, lng, location_type
        )
        .into_bytes()
    }

    #[test]
    fn test_geocode_precise_result() {
        let mock = MockHttpClient {
            response: Ok(ok_body(5.5347, -0.2282, "ROOFTOP")),
        };
        let geocoder = GoogleGeocoder::new(mock, "test-key");

        let hit = geocoder.geocode("Korle Bu Teaching Hospital").unwrap().unwrap();
        assert_eq!(hit.tier, PrecisionTier::Rooftop);
        assert!((hit.point.lat - 5.5347).abs() < 1e-9);
    }

    #[test]
    fn test_geocode_approximate_result() {
        let mock = MockHttpClient {
            response: Ok(ok_body(5.6037, -0.187, "APPROXIMATE")),
        };
        let geocoder = GoogleGeocoder::new(mock, "test-key");

        let hit = geocoder.geocode("Accra").unwrap().unwrap();
        assert!(!hit.tier.is_precise());
    }

    #[test]
    fn test_zero_results_is_none() {
        let mock = MockHttpClient {
            response: Ok(br#"{"status": "ZERO_RESULTS", "results": []}"#.to_vec()),
        };
        let geocoder = GoogleGeocoder::new(mock, "test-key");
        assert_eq!(geocoder.geocode("gibberish").unwrap(), None);
    }

    #[test]
    fn test_non_ok_status_is_none() {
        let mock = MockHttpClient {
            response: Ok(
                br#"{"status": "OVER_QUERY_LIMIT", "error_message": "slow down"}"#.to_vec(),
            ),
        };
        let geocoder = GoogleGeocoder::new(mock, "test-key");
        assert_eq!(geocoder.geocode("Accra").unwrap(), None);
    }

    #[test]
    fn test_http_failure_propagates() {
        let mock = MockHttpClient {
            response: Err(GeocoderError::Http("connection refused".to_string())),
        };
        let geocoder = GoogleGeocoder::new(mock, "test-key");
        assert!(geocoder.geocode("Accra").is_err());
    }

    #[test]
    fn test_malformed_payload_is_invalid_response() {
        let mock = MockHttpClient {
            response: Ok(b"<html>not json</html>".to_vec()),
        };
        let geocoder = GoogleGeocoder::new(mock, "test-key");
        assert!(matches!(
            geocoder.geocode("Accra").unwrap_err(),
            GeocoderError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let mock = MockHttpClient {
            response: Ok(ok_body(123.0, 456.0, "ROOFTOP")),
        };
        let geocoder = GoogleGeocoder::new(mock, "test-key");
        assert!(matches!(
            geocoder.geocode("Accra").unwrap_err(),
            GeocoderError::InvalidResponse(_)
        ));
    }

    #[tokio::test]
    async fn test_async_geocode_precise_result() {
        let mock = MockAsyncHttpClient {
            response: Ok(ok_body(6.6929, -1.626, "GEOMETRIC_CENTER")),
        };
        let geocoder = AsyncGoogleGeocoder::new(mock, "test-key");

        let hit = geocoder.geocode("Komfo Anokye").await.unwrap().unwrap();
        assert_eq!(hit.tier, PrecisionTier::GeometricCenter);
    }

    #[test]
    fn test_provider_name() {
        let mock = MockHttpClient {
            response: Ok(vec![]),
        };
        let geocoder = GoogleGeocoder::new(mock, "k");
        assert_eq!(geocoder.name(), "Google Geocoding");
    }
}
