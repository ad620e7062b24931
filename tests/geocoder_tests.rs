// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the reverse-geocoding helper
//!
//! The helper's contract is that it never fails: these tests drive it against
//! a dead endpoint, an erroring stub server and a well-behaved stub server.

use std::net::SocketAddr;
use std::time::Duration;

use smart_camera::NominatimGeocoder;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve a single canned HTTP response, then exit
async fn one_shot_server(response: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut request = [0u8; 2048];
            let _ = stream.read(&mut request).await;
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    addr
}

#[tokio::test]
async fn test_unreachable_service_falls_back_to_coordinates() {
    // Port 9 (discard) is never listening locally
    let geocoder = NominatimGeocoder::with_endpoint("http://127.0.0.1:9/reverse");

    let address = geocoder.resolve(13.0827, 80.2707).await;
    assert_eq!(address, "13.082700, 80.270700");
}

#[tokio::test]
async fn test_http_error_resolves_with_fallback() {
    let addr = one_shot_server(
        "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
            .to_string(),
    )
    .await;
    let geocoder = NominatimGeocoder::with_endpoint(format!("http://{}/reverse", addr));

    let address = geocoder.resolve(13.0827, 80.2707).await;
    assert_eq!(address, "13.082700, 80.270700");
}

#[tokio::test]
async fn test_malformed_body_resolves_with_fallback() {
    let body = "this is not json";
    let addr = one_shot_server(format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        body.len(),
        body
    ))
    .await;
    let geocoder = NominatimGeocoder::with_endpoint(format!("http://{}/reverse", addr));

    let address = geocoder.resolve(-12.5, 130.85).await;
    assert_eq!(address, "-12.500000, 130.850000");
}

#[tokio::test]
async fn test_display_name_returned_on_success() {
    let body = r#"{"display_name":"Anna Salai, Thousand Lights, Chennai"}"#;
    let addr = one_shot_server(format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        body.len(),
        body
    ))
    .await;
    let geocoder = NominatimGeocoder::with_endpoint(format!("http://{}/reverse", addr));

    let address = geocoder.resolve(13.0827, 80.2707).await;
    assert_eq!(address, "Anna Salai, Thousand Lights, Chennai");
}

#[tokio::test]
async fn test_never_empty_for_any_coordinates() {
    let geocoder = NominatimGeocoder::with_endpoint_and_timeout(
        "http://127.0.0.1:9/reverse",
        Duration::from_secs(1),
    );

    for (lat, lng) in [(0.0, 0.0), (-90.0, 180.0), (13.0827, 80.2707)] {
        let address = geocoder.resolve(lat, lng).await;
        assert!(!address.is_empty());
    }
}
