//! HTTP validation client tests against a mock ERP

#[cfg(test)]
mod tests {
    use crate::common::assertions::ReportAssertions;
    use crate::common::{RecordingPresenter, StaticListView};
    use crate::{assert_err, assert_ok};
    use invoice_validator::config::{BatchSettings, ServerConfig};
    use invoice_validator::core::trigger::{BatchValidation, Indicator, recheck_document};
    use invoice_validator::core::validation::{
        HttpValidationClient, InvoiceDoctype, RECHECK_METHOD, RecheckRequest, ValidationClient,
        ValidationStatus,
    };
    use invoice_validator::utils::error::ValidatorError;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn method_path() -> String {
        format!("/api/method/{}", RECHECK_METHOD)
    }

    fn server_config(server: &MockServer) -> ServerConfig {
        ServerConfig {
            base_url: format!("{}/", server.uri()),
            api_key: Some("key".to_string()),
            api_secret: Some("secret".to_string()),
            timeout: 1,
            ..ServerConfig::default()
        }
    }

    fn success_body() -> serde_json::Value {
        json!({
            "message": {
                "status": "Valid",
                "confidence": 0.95,
                "summary": "All fields match",
                "details": {
                    "missing_fields": [],
                    "incorrect_fields": [],
                    "field_comparisons": [
                        {"field": "total_amount", "pdf_value": "100.00", "doctype_value": 100.0, "match": true}
                    ]
                },
                "recommendations": []
            }
        })
    }

    fn failure_body(message: &str) -> serde_json::Value {
        let inner = json!({ "message": message, "indicator": "red" }).to_string();
        let server_messages = serde_json::to_string(&vec![inner]).unwrap();
        json!({
            "exception": format!("frappe.exceptions.ValidationError: {}", message),
            "_server_messages": server_messages,
        })
    }

    #[tokio::test]
    async fn test_recheck_posts_request_with_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path()))
            .and(header("authorization", "token key:secret"))
            .and(body_json(json!({
                "doctype": "Wolt Invoice",
                "name": "W-0001",
                "show_message": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = assert_ok!(HttpValidationClient::new(&server_config(&server)));
        assert!(!client.endpoint().contains("//api"));

        let result = assert_ok!(
            client
                .recheck(&RecheckRequest::batch(InvoiceDoctype::WoltInvoice, "W-0001"))
                .await
        );
        assert_eq!(result.status, ValidationStatus::Valid);
        assert_eq!(result.confidence, Some(0.95));
        assert_eq!(result.details.field_comparisons.len(), 1);
        assert_eq!(result.mismatched_fields().count(), 0);
    }

    #[tokio::test]
    async fn test_server_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path()))
            .respond_with(
                ResponseTemplate::new(417).set_body_json(failure_body("PDF raw text not found")),
            )
            .mount(&server)
            .await;

        let client = assert_ok!(HttpValidationClient::new(&server_config(&server)));
        let err = assert_err!(
            client
                .recheck(&RecheckRequest::single(InvoiceDoctype::LieferandoInvoice, "LI-1"))
                .await
        );

        match &err {
            ValidatorError::Remote { status, message } => {
                assert_eq!(*status, Some(417));
                assert_eq!(message, "PDF raw text not found");
            }
            other => panic!("expected remote error, got {:?}", other),
        }
        assert_eq!(err.user_message(), "PDF raw text not found");
    }

    #[tokio::test]
    async fn test_error_without_body_uses_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = assert_ok!(HttpValidationClient::new(&server_config(&server)));
        let err = assert_err!(
            client
                .recheck(&RecheckRequest::batch(InvoiceDoctype::WoltInvoice, "W-1"))
                .await
        );
        assert!(matches!(err, ValidatorError::Remote { status: Some(502), .. }));
        assert!(err.user_message().contains("502"));
    }

    #[tokio::test]
    async fn test_off_schema_result_still_counts_as_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": {"status": "Issues found", "confidence": 0.8}
            })))
            .mount(&server)
            .await;

        let client = assert_ok!(HttpValidationClient::new(&server_config(&server)));
        let outcome =
            recheck_document(&client, InvoiceDoctype::LieferandoInvoice, "LI-7").await;

        assert!(outcome.reload_required());
        assert_eq!(outcome.notice.indicator, Indicator::Orange);
        assert_eq!(
            outcome.notice.message,
            "AI validation completed: Issues Found (Confidence: 80.0%)"
        );
    }

    #[tokio::test]
    async fn test_non_object_result_is_success_with_unknown_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "validated" })),
            )
            .mount(&server)
            .await;

        let client = assert_ok!(HttpValidationClient::new(&server_config(&server)));
        let result = assert_ok!(
            client
                .recheck(&RecheckRequest::batch(InvoiceDoctype::WoltInvoice, "W-5"))
                .await
        );
        assert_eq!(result.status, ValidationStatus::Unknown);
        assert_eq!(result.summary, "validated");
    }

    #[tokio::test]
    async fn test_missing_result_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = assert_ok!(HttpValidationClient::new(&server_config(&server)));
        let err = assert_err!(
            client
                .recheck(&RecheckRequest::batch(InvoiceDoctype::WoltInvoice, "W-1"))
                .await
        );
        assert!(err.user_message().contains("returned no result"));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(success_body())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = assert_ok!(HttpValidationClient::new(&server_config(&server)));
        let err = assert_err!(
            client
                .recheck(&RecheckRequest::batch(InvoiceDoctype::WoltInvoice, "W-9"))
                .await
        );
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_batch_over_http_tolerates_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "name": "INV-002" })))
            .respond_with(
                ResponseTemplate::new(417).set_body_json(failure_body("PDF raw text not found")),
            )
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "name": "INV-003" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": {"status": "VALID", "details": {"field_comparisons": [{"match": true}]}}
            })))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(method_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = Arc::new(assert_ok!(HttpValidationClient::new(&server_config(&server))));
        let settings = BatchSettings {
            settle_delay_ms: 1,
            completion_delay_ms: 1,
            ..BatchSettings::default()
        };
        let list = StaticListView::new(
            InvoiceDoctype::LieferandoInvoice,
            &["INV-001", "INV-002", "INV-003"],
        );
        let presenter = RecordingPresenter::default();

        let report = BatchValidation::new(client, &settings)
            .confirm(&list, &presenter)
            .await
            .expect("selection is not empty");

        report.assert_consistent();
        report.assert_failed(&["INV-002"]);
        assert_eq!(list.refreshes(), 1);
    }
}
