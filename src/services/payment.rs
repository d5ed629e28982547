use crate::core::AnswerMap;
use crate::errors::ServiceError;
use crate::results::Price;

/// Reject addresses that are empty or lack an `@`.
pub fn validate_email(email: &str) -> Result<&str, ServiceError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ServiceError::InvalidRequest("email is required".into()));
    }
    if !email.contains('@') {
        return Err(ServiceError::InvalidRequest(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(email)
}

#[derive(Debug, Clone)]
pub struct CheckoutRequest<'a> {
    pub email: &'a str,
    pub answers: &'a AnswerMap,
    /// Origin the payment provider returns to, e.g. `https://statematch.example`.
    pub return_origin: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub redirect_url: String,
    pub price: Price,
}

pub trait CheckoutGateway {
    fn begin_checkout(
        &self,
        request: &CheckoutRequest<'_>,
    ) -> Result<CheckoutSession, ServiceError>;
}

/// Simulated checkout that approves immediately and returns straight to the
/// full report.
#[derive(Debug, Clone, Default)]
pub struct DemoCheckout {
    price: Price,
}

impl DemoCheckout {
    pub fn new(price: Price) -> Self {
        Self { price }
    }
}

impl CheckoutGateway for DemoCheckout {
    fn begin_checkout(
        &self,
        request: &CheckoutRequest<'_>,
    ) -> Result<CheckoutSession, ServiceError> {
        let email = validate_email(request.email)?;
        tracing::info!(
            email,
            answered = request.answers.len(),
            price = %self.price,
            "Demo checkout approved"
        );
        Ok(CheckoutSession {
            redirect_url: format!("{}/result/full", request.return_origin.trim_end_matches('/')),
            price: self.price.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_an_at_sign() {
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("nobody.example.com").is_err());
        assert_eq!(validate_email(" me@example.com ").unwrap(), "me@example.com");
    }

    #[test]
    fn demo_checkout_redirects_to_full_report() {
        let answers = AnswerMap::new();
        let session = DemoCheckout::default()
            .begin_checkout(&CheckoutRequest {
                email: "me@example.com",
                answers: &answers,
                return_origin: "https://statematch.example/",
            })
            .unwrap();

        assert_eq!(session.redirect_url, "https://statematch.example/result/full");
        assert_eq!(session.price.to_string(), "$7.00");
    }

    #[test]
    fn demo_checkout_rejects_bad_email() {
        let answers = AnswerMap::new();
        let err = DemoCheckout::default()
            .begin_checkout(&CheckoutRequest {
                email: "",
                answers: &answers,
                return_origin: "http://localhost",
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));
    }
}
