//! Single document recheck tests

#[cfg(test)]
mod tests {
    use crate::common::{ResultFactory, ScriptedClient};
    use invoice_validator::core::trigger::{Indicator, recheck_document};
    use invoice_validator::core::validation::{ConfidenceBadge, InvoiceDoctype};

    #[tokio::test]
    async fn test_recheck_sends_single_request() {
        let client = ScriptedClient::new();
        let outcome = recheck_document(&client, InvoiceDoctype::UberEatsInvoice, "UE-1").await;

        assert!(outcome.reload_required());
        assert_eq!(outcome.notice.indicator, Indicator::Green);
        assert_eq!(
            outcome.notice.message,
            "AI validation completed: Valid (Confidence: 95.0%)"
        );

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].show_message);
        assert_eq!(requests[0].doctype, InvoiceDoctype::UberEatsInvoice);
    }

    #[tokio::test]
    async fn test_recheck_failure_notice() {
        let client = ScriptedClient::new().fail("UE-2", "Invoice has no attached PDF");
        let outcome = recheck_document(&client, InvoiceDoctype::UberEatsInvoice, "UE-2").await;

        assert!(!outcome.reload_required());
        assert_eq!(outcome.notice.indicator, Indicator::Red);
        assert_eq!(outcome.notice.message, "Error: Invoice has no attached PDF");
    }

    #[test]
    fn test_stored_confidence_badges() {
        let valid = ResultFactory::valid(0.95);
        let badge = ConfidenceBadge::from_score(valid.confidence_percent()).expect("badge");
        assert_eq!(badge.to_string(), "95.0%");

        let issues = ResultFactory::issues_found();
        assert_eq!(issues.mismatched_fields().count(), 1);
        let badge = ConfidenceBadge::from_score(issues.confidence_percent()).expect("badge");
        assert_eq!(badge.to_string(), "50.0%");

        assert!(ConfidenceBadge::from_score(ResultFactory::valid(0.0).confidence_percent()).is_none());
    }
}
