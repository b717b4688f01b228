use crate::core::extract::extract_domain;
use crate::domain::model::{BrandEntry, RejectionReason, VerificationResult, VerificationStatus};
use chrono::Utc;

/// Compares the domain encoded in `payload` with the brand's domain.
///
/// A payload that does not yield a domain is rejected as a malformed URL
/// without any comparison.
pub fn verify(brand: &BrandEntry, payload: &str) -> VerificationResult {
    let actual_domain = extract_domain(payload);

    let reason = match actual_domain.as_deref() {
        None => Some(RejectionReason::MalformedUrl),
        Some(domain) if domain == brand.domain => None,
        Some(_) => Some(RejectionReason::DomainMismatch),
    };
    let is_valid = reason.is_none();

    if is_valid {
        tracing::info!("✅ {} QR code points at {}", brand.name, brand.domain);
    } else {
        tracing::warn!(
            "❌ {} QR code rejected: expected {}, got {:?}",
            brand.name,
            brand.domain,
            actual_domain
        );
    }

    VerificationResult {
        is_valid,
        status: if is_valid {
            VerificationStatus::Authenticated
        } else {
            VerificationStatus::Unauthenticated
        },
        reason,
        brand: brand.name.to_string(),
        expected_domain: brand.domain.to_string(),
        actual_domain,
        checked_at: Utc::now(),
    }
}
