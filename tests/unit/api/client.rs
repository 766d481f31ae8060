//! Tests for the analysis client against a scripted transport

use crate::common::{
    decode_jpeg, mock_client, ImageFixtures, MockTransport, ANALYSIS_URL, BERLIN_LOCATION,
    FEEDBACK_URL, GEOLOCATION_URL,
};
use buyeuropean::types::{
    AnalysisHandle, Classification, Feedback, FeedbackIssues, UserLocation,
    NO_ANALYSIS_ID_MESSAGE,
};
use image::GenericImageView;
use serde_json::json;

fn fixture_image(fixtures: &ImageFixtures) -> std::path::PathBuf {
    fixtures.png("product.png", 8, 6, [200, 30, 30, 255])
}

#[tokio::test]
async fn test_mocked_200_returns_exact_values() {
    let fixtures = ImageFixtures::new();
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(
            ANALYSIS_URL,
            200,
            r#"{"identified_product_name":"Test Product","identified_company":"Test Company","identified_headquarters":"United States","classification":"european_sceptic"}"#,
        );
    let client = mock_client(transport);

    let result = client.analyze(&fixture_image(&fixtures)).await.unwrap();

    assert_eq!(result.product_name(), "Test Product");
    assert_eq!(result.company(), "Test Company");
    assert_eq!(result.headquarters(), Some("United States"));
    assert_eq!(result.classification, Some(Classification::EuropeanSceptic));
    assert_eq!(result.id, None);
}

#[tokio::test]
async fn test_legacy_european_classification_is_rewritten() {
    let fixtures = ImageFixtures::new();
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(
            ANALYSIS_URL,
            200,
            r#"{"id":"a1","identified_company":"Dr. Oetker","classification":"european"}"#,
        );
    let client = mock_client(transport);

    let result = client.analyze(&fixture_image(&fixtures)).await.unwrap();

    assert_eq!(result.classification, Some(Classification::EuropeanCountry));
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["classification"], "european_country");
}

#[tokio::test]
async fn test_alternative_names_are_capitalised() {
    let fixtures = ImageFixtures::new();
    let body = json!({
        "id": "a2",
        "alternatives": [
            {"name": "fritz-kola", "by": "by Fritz-Kulturgüter GmbH (Germany)", "country": "Germany", "country_code": "DEU"},
            {"name": "mineral water", "by": "Gerolsteiner", "country": "Germany"}
        ]
    });
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(ANALYSIS_URL, 200, body.to_string());
    let client = mock_client(transport);

    let result = client.analyze(&fixture_image(&fixtures)).await.unwrap();

    let names: Vec<&str> = result.alternatives.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["Fritz-Kola", "Mineral Water"]);
    assert_eq!(
        result.alternatives[0].company().as_deref(),
        Some("Fritz-Kulturgüter GmbH")
    );
}

#[tokio::test]
async fn test_http_500_returns_none() {
    let fixtures = ImageFixtures::new();
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(ANALYSIS_URL, 500, "Internal Server Error");
    let client = mock_client(transport);

    assert!(client.analyze(&fixture_image(&fixtures)).await.is_none());
}

#[tokio::test]
async fn test_malformed_body_returns_none() {
    let fixtures = ImageFixtures::new();
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(ANALYSIS_URL, 200, "<html>upstream timeout</html>");
    let client = mock_client(transport);

    assert!(client.analyze(&fixture_image(&fixtures)).await.is_none());
}

#[tokio::test]
async fn test_transport_failure_returns_none() {
    let fixtures = ImageFixtures::new();
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .fail(ANALYSIS_URL, "connection reset");
    let client = mock_client(transport);

    assert!(client.analyze(&fixture_image(&fixtures)).await.is_none());
}

#[tokio::test]
async fn test_missing_image_returns_none_without_posting() {
    let fixtures = ImageFixtures::new();
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(ANALYSIS_URL, 200, r#"{"id":"never"}"#);
    let client = mock_client(transport);

    assert!(client.analyze(&fixtures.path("missing.png")).await.is_none());
    assert!(client.transport().requests_to(ANALYSIS_URL).is_empty());
}

#[tokio::test]
async fn test_request_body_carries_encoded_image_and_location() {
    let fixtures = ImageFixtures::new();
    let path = fixtures.png("clear.png", 5, 4, [0, 0, 0, 0]);
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(ANALYSIS_URL, 200, r#"{"id":"a3"}"#);
    let client = mock_client(transport);

    let expected_image = client.encode_image(&path).unwrap();
    let expected_location = client.locate().await;
    client.analyze(&path).await.unwrap();

    let posts = client.transport().requests_to(ANALYSIS_URL);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].method, "POST");

    let body = posts[0].body.clone().unwrap();
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 2);
    assert_eq!(body["image"], expected_image.as_str());
    assert_eq!(
        body["userLocation"],
        serde_json::to_value(&expected_location).unwrap()
    );
    assert_eq!(body["userLocation"]["city"], "Berlin");

    let uploaded = decode_jpeg(body["image"].as_str().unwrap());
    assert_eq!(uploaded.dimensions(), (5, 4));
}

#[tokio::test]
async fn test_geolocation_failure_sends_placeholder() {
    let fixtures = ImageFixtures::new();
    let transport = MockTransport::new()
        .fail(GEOLOCATION_URL, "dns failure")
        .respond(ANALYSIS_URL, 200, r#"{"id":"a4"}"#);
    let client = mock_client(transport);

    assert_eq!(client.locate().await, UserLocation::unknown());

    let result = client.analyze(&fixture_image(&fixtures)).await;
    assert!(result.is_some());

    let body = client.transport().requests_to(ANALYSIS_URL)[0]
        .body
        .clone()
        .unwrap();
    assert_eq!(
        body["userLocation"],
        json!({"city": "Unknown", "country": "Unknown", "country_code": "XX"})
    );
}

#[tokio::test]
async fn test_feedback_before_analysis_is_local_error() {
    let client = mock_client(MockTransport::new());

    let response = client.send_feedback(&Feedback::positive()).await;

    assert_eq!(response.status, "error");
    assert_eq!(response.message.as_deref(), Some(NO_ANALYSIS_ID_MESSAGE));
    assert_eq!(client.transport().request_count(), 0);
}

#[tokio::test]
async fn test_feedback_uses_last_analysis_id() {
    let fixtures = ImageFixtures::new();
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(ANALYSIS_URL, 200, r#"{"id":"abc-123","identified_company":"Nestlé"}"#)
        .respond(FEEDBACK_URL, 200, r#"{"status":"success","message":"stored"}"#);
    let client = mock_client(transport);

    client.analyze(&fixture_image(&fixtures)).await.unwrap();

    let issues = FeedbackIssues {
        wrong_country: true,
        wrong_other: true,
        ..Default::default()
    };
    let response = client
        .send_feedback(&Feedback::negative(issues, "HQ is in Vevey"))
        .await;
    assert!(response.is_success());
    assert_eq!(response.message.as_deref(), Some("stored"));

    let posts = client.transport().requests_to(FEEDBACK_URL);
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0].body.clone().unwrap(),
        json!({
            "analysis_id": "abc-123",
            "is_positive": false,
            "wrong_product": false,
            "wrong_brand": false,
            "wrong_country": true,
            "wrong_classification": false,
            "wrong_alternatives": false,
            "wrong_other": true,
            "feedback_text": "HQ is in Vevey"
        })
    );
}

#[tokio::test]
async fn test_numeric_id_is_used_as_text() {
    let fixtures = ImageFixtures::new();
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(ANALYSIS_URL, 200, r#"{"id":4711}"#)
        .respond(FEEDBACK_URL, 200, r#"{"status":"success"}"#);
    let client = mock_client(transport);

    client.analyze(&fixture_image(&fixtures)).await.unwrap();
    client.send_feedback(&Feedback::positive()).await;

    let body = client.transport().requests_to(FEEDBACK_URL)[0]
        .body
        .clone()
        .unwrap();
    assert_eq!(body["analysis_id"], "4711");
}

#[tokio::test]
async fn test_later_analysis_overwrites_id() {
    let fixtures = ImageFixtures::new();
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(ANALYSIS_URL, 200, r#"{"id":"first"}"#)
        .respond(ANALYSIS_URL, 200, r#"{"id":"second"}"#)
        .respond(FEEDBACK_URL, 200, r#"{"status":"success"}"#);
    let client = mock_client(transport);
    let path = fixture_image(&fixtures);

    let first = client.analyze(&path).await.unwrap();
    let second = client.analyze(&path).await.unwrap();
    assert_eq!(first.handle(), AnalysisHandle::new("first"));
    assert_eq!(second.handle(), AnalysisHandle::new("second"));

    client.send_feedback(&Feedback::positive()).await;
    client
        .send_feedback_for(&first.handle(), &Feedback::positive())
        .await;

    let ids: Vec<String> = client
        .transport()
        .requests_to(FEEDBACK_URL)
        .into_iter()
        .map(|r| r.body.unwrap()["analysis_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["second", "first"]);
}

#[tokio::test]
async fn test_failed_analysis_keeps_previous_id() {
    let fixtures = ImageFixtures::new();
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(ANALYSIS_URL, 200, r#"{"id":"kept"}"#)
        .respond(ANALYSIS_URL, 503, "Service Unavailable")
        .respond(FEEDBACK_URL, 200, r#"{"status":"success"}"#);
    let client = mock_client(transport);
    let path = fixture_image(&fixtures);

    assert!(client.analyze(&path).await.is_some());
    assert!(client.analyze(&path).await.is_none());
    client.send_feedback(&Feedback::positive()).await;

    let body = client.transport().requests_to(FEEDBACK_URL)[0]
        .body
        .clone()
        .unwrap();
    assert_eq!(body["analysis_id"], "kept");
}

#[tokio::test]
async fn test_analysis_without_id_keeps_previous_id() {
    let fixtures = ImageFixtures::new();
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(ANALYSIS_URL, 200, r#"{"id":"earlier","identified_company":"Ferrero"}"#)
        .respond(ANALYSIS_URL, 200, r#"{"identified_company":"Barilla"}"#)
        .respond(FEEDBACK_URL, 200, r#"{"status":"success"}"#);
    let client = mock_client(transport);
    let path = fixture_image(&fixtures);

    client.analyze(&path).await.unwrap();
    let second = client.analyze(&path).await.unwrap();
    assert_eq!(second.company(), "Barilla");
    assert_eq!(second.handle(), AnalysisHandle::none());

    client.send_feedback(&Feedback::positive()).await;

    let body = client.transport().requests_to(FEEDBACK_URL)[0]
        .body
        .clone()
        .unwrap();
    assert_eq!(body["analysis_id"], "earlier");
}

#[tokio::test]
async fn test_mistyped_token_counter_keeps_the_analysis() {
    let fixtures = ImageFixtures::new();
    let body = json!({
        "id": "t-1",
        "identified_company": "Ferrero",
        "classification": "european_country",
        "input_tokens": 900,
        "total_tokens": "1020"
    });
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(ANALYSIS_URL, 200, body.to_string());
    let client = mock_client(transport);

    let result = client.analyze(&fixture_image(&fixtures)).await.unwrap();

    assert_eq!(result.classification, Some(Classification::EuropeanCountry));
    assert_eq!(result.token_usage.input_tokens, Some(900));
    assert_eq!(result.token_usage.total_tokens, Some(1020));
}

#[tokio::test]
async fn test_free_text_alternative_entries_are_skipped() {
    let fixtures = ImageFixtures::new();
    let body = json!({
        "id": "t-2",
        "identified_company": "Ferrero",
        "alternatives": [
            "Nocciolata by Rigoni",
            {"name": "nocciolata", "by": "by Rigoni di Asiago (Italy)"}
        ]
    });
    let transport = MockTransport::new()
        .respond(GEOLOCATION_URL, 200, BERLIN_LOCATION)
        .respond(ANALYSIS_URL, 200, body.to_string());
    let client = mock_client(transport);

    let result = client.analyze(&fixture_image(&fixtures)).await.unwrap();

    assert_eq!(result.company(), "Ferrero");
    assert_eq!(result.alternatives.len(), 1);
    assert_eq!(result.alternatives[0].name(), "Nocciolata");
}

#[tokio::test]
async fn test_feedback_for_empty_handle_makes_no_request() {
    let client = mock_client(MockTransport::new());

    let response = client
        .send_feedback_for(&AnalysisHandle::none(), &Feedback::positive())
        .await;

    assert!(response.is_error());
    assert_eq!(client.transport().request_count(), 0);
}

#[tokio::test]
async fn test_feedback_non_200_is_error_response() {
    let transport = MockTransport::new().respond(FEEDBACK_URL, 502, "Bad Gateway");
    let client = mock_client(transport);

    let response = client
        .send_feedback_for(&AnalysisHandle::new("x"), &Feedback::positive())
        .await;

    assert!(response.is_error());
    let message = response.message.unwrap();
    assert!(message.contains("502"), "unexpected message: {}", message);
}

#[tokio::test]
async fn test_feedback_transport_failure_is_error_response() {
    let transport = MockTransport::new().fail(FEEDBACK_URL, "connection refused");
    let client = mock_client(transport);

    let response = client
        .send_feedback_for(&AnalysisHandle::new("x"), &Feedback::positive())
        .await;

    assert_eq!(response.status, "error");
    assert!(response.message.unwrap().contains("connection refused"));
}
