use skybook_core::payment::{
    CardDetails, CreditCardPayment, DebitCardPayment, Payment, PaymentMethod, UpiPayment,
};
use skybook_core::{CoreError, CoreResult};
use tracing::warn;

use crate::models::BookingRequest;

/// Bank charged for debit card payments that name none
pub const DEFAULT_DEBIT_BANK: &str = "SBI Bank";

/// Outcome of a successful charge
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub method: PaymentMethod,
    pub transaction_id: String,
    pub processing_fee: f64,
}

/// Picks the payment strategy a booking request asks for and runs it.
#[derive(Debug, Clone)]
pub struct PaymentOrchestrator {
    default_bank: String,
}

impl PaymentOrchestrator {
    pub fn new() -> Self {
        Self {
            default_bank: DEFAULT_DEBIT_BANK.to_string(),
        }
    }

    /// Payment method named by the request. Unknown tags are rejected rather than
    /// falling back to another method.
    pub fn method_for(request: &BookingRequest) -> CoreResult<PaymentMethod> {
        match request
            .payment_type
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
        {
            None => Ok(PaymentMethod::CreditCard),
            Some(tag) => tag.parse().map_err(CoreError::ValidationFailed),
        }
    }

    pub fn select(&self, request: &BookingRequest) -> CoreResult<Box<dyn Payment>> {
        let payment: Box<dyn Payment> = match Self::method_for(request)? {
            PaymentMethod::CreditCard => Box::new(CreditCardPayment::new(card(request))),
            PaymentMethod::DebitCard => {
                let bank = request.bank().unwrap_or(&self.default_bank).to_string();
                Box::new(DebitCardPayment::new(card(request), bank))
            }
            PaymentMethod::Upi => {
                let upi_id = request
                    .upi_id
                    .clone()
                    .unwrap_or_else(|| format!("{}@upi", request.email.trim()));
                let mobile = request
                    .upi_mobile
                    .clone()
                    .unwrap_or_else(|| request.phone.trim().to_string());
                Box::new(UpiPayment::new(upi_id, mobile))
            }
        };
        Ok(payment)
    }

    /// Charge `amount` with the method the request names.
    pub fn charge(&self, request: &BookingRequest, amount: f64) -> CoreResult<PaymentReceipt> {
        let mut payment = self.select(request)?;
        let method = payment.method();

        if !payment.process(amount) {
            warn!("{} payment rejected for {}", method, request.email);
            return Err(CoreError::PaymentFailed(format!(
                "{} details are invalid",
                method
            )));
        }

        let transaction_id = payment
            .transaction_id()
            .map(str::to_string)
            .ok_or_else(|| CoreError::PaymentFailed("no transaction id issued".to_string()))?;

        Ok(PaymentReceipt {
            method,
            transaction_id,
            processing_fee: payment.processing_fee(amount),
        })
    }
}

impl Default for PaymentOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

fn card(request: &BookingRequest) -> CardDetails {
    CardDetails {
        card_number: request.card_number.clone().unwrap_or_default(),
        card_holder_name: request.card_holder(),
        expiry_date: request.card_expiry.clone().unwrap_or_default(),
        cvv: request.card_cvv.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::{card_request, upi_request};

    #[test]
    fn test_missing_tag_means_credit_card() {
        let receipt = PaymentOrchestrator::new()
            .charge(&card_request(1, "john@test.com", "4111111111111111"), 1000.0)
            .unwrap();
        assert_eq!(receipt.method, PaymentMethod::CreditCard);
        assert!(receipt.transaction_id.starts_with("CC-"));
        assert!((receipt.processing_fee - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let mut request = upi_request(1, "john@test.com");
        request.payment_type = Some("PAYPAL".to_string());

        let err = PaymentOrchestrator::new().select(&request).unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed(ref msg) if msg.contains("PAYPAL")));
    }

    #[test]
    fn test_upi_defaults_from_contact_details() {
        let receipt = PaymentOrchestrator::new()
            .charge(&upi_request(1, "john@test.com"), 5225.0)
            .unwrap();
        assert_eq!(receipt.method, PaymentMethod::Upi);
        assert!(receipt.transaction_id.starts_with("UPI-"));
        assert_eq!(receipt.processing_fee, 0.0);
    }

    #[test]
    fn test_debit_card_uses_default_bank() {
        let mut request = card_request(1, "john@test.com", "4111111111111111");
        request.payment_type = Some("DEBIT_CARD".to_string());

        let receipt = PaymentOrchestrator::new()
            .charge(&request, 1000.0)
            .unwrap();
        assert!(receipt.transaction_id.starts_with("DC-"));
        assert!((receipt.processing_fee - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_card_fails_payment() {
        let err = PaymentOrchestrator::new()
            .charge(&card_request(1, "john@test.com", "411111111111111"), 1000.0)
            .unwrap_err();
        assert!(matches!(err, CoreError::PaymentFailed(_)));
    }
}
