use regex::Regex;
use serde::{Deserialize, Serialize};
use skybook_shared::{random_token, Masked};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static EXPIRY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").expect("valid expiry regex"));

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Upi => "UPI",
        }
    }

    /// Prefix of the transaction ids this method issues
    pub fn transaction_prefix(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CC",
            PaymentMethod::DebitCard => "DC",
            PaymentMethod::Upi => "UPI",
        }
    }

    /// Fee as a fraction of the charged amount
    pub fn fee_rate(&self) -> f64 {
        match self {
            PaymentMethod::CreditCard => 0.02,
            PaymentMethod::DebitCard => 0.01,
            PaymentMethod::Upi => 0.0,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREDIT_CARD" => Ok(PaymentMethod::CreditCard),
            "DEBIT_CARD" => Ok(PaymentMethod::DebitCard),
            "UPI" => Ok(PaymentMethod::Upi),
            other => Err(format!("Unsupported payment type: {}", other)),
        }
    }
}

/// A way of paying for a booking.
///
/// Implementations validate their own details, price their own processing fee, and
/// issue a transaction id once `process` succeeds. There is no gateway behind this:
/// once the details validate, processing always succeeds.
pub trait Payment: Send + Sync + fmt::Debug {
    fn method(&self) -> PaymentMethod;

    fn validate(&self) -> bool;

    fn processing_fee(&self, amount: f64) -> f64 {
        amount * self.method().fee_rate()
    }

    /// Charge `amount`. Returns false, and leaves no transaction id, when the details
    /// fail validation.
    fn process(&mut self, amount: f64) -> bool;

    fn transaction_id(&self) -> Option<&str>;
}

fn issue_transaction_id(method: PaymentMethod) -> String {
    format!("{}-{}", method.transaction_prefix(), random_token(8))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_card_number(number: &str) -> bool {
    is_digits(number, 16)
}

pub fn is_valid_cvv(cvv: &str) -> bool {
    is_digits(cvv, 3) || is_digits(cvv, 4)
}

/// `MM/YY` with a month between 01 and 12
pub fn is_valid_expiry(expiry: &str) -> bool {
    EXPIRY_PATTERN.is_match(expiry)
}

pub fn is_valid_upi_id(upi_id: &str) -> bool {
    upi_id.contains('@')
}

pub fn is_valid_mobile_number(mobile: &str) -> bool {
    is_digits(mobile, 10)
}

/// Card fields shared by credit and debit payments
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub card_number: Masked<String>,
    pub card_holder_name: String,
    pub expiry_date: String,
    pub cvv: Masked<String>,
}

impl CardDetails {
    fn is_valid(&self) -> bool {
        is_valid_card_number(self.card_number.expose())
            && is_valid_cvv(self.cvv.expose())
            && is_valid_expiry(&self.expiry_date)
    }
}

#[derive(Debug)]
pub struct CreditCardPayment {
    pub card: CardDetails,
    transaction_id: Option<String>,
}

impl CreditCardPayment {
    pub fn new(card: CardDetails) -> Self {
        Self {
            card,
            transaction_id: None,
        }
    }
}

impl Payment for CreditCardPayment {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::CreditCard
    }

    fn validate(&self) -> bool {
        self.card.is_valid()
    }

    fn process(&mut self, amount: f64) -> bool {
        if !self.validate() {
            return false;
        }
        self.transaction_id = Some(issue_transaction_id(self.method()));
        tracing::info!("Processing credit card payment of {:.2}", amount);
        true
    }

    fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }
}

#[derive(Debug)]
pub struct DebitCardPayment {
    pub card: CardDetails,
    pub bank_name: String,
    transaction_id: Option<String>,
}

impl DebitCardPayment {
    pub fn new(card: CardDetails, bank_name: impl Into<String>) -> Self {
        Self {
            card,
            bank_name: bank_name.into(),
            transaction_id: None,
        }
    }
}

impl Payment for DebitCardPayment {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::DebitCard
    }

    fn validate(&self) -> bool {
        self.card.is_valid() && !self.bank_name.trim().is_empty()
    }

    fn process(&mut self, amount: f64) -> bool {
        if !self.validate() {
            return false;
        }
        self.transaction_id = Some(issue_transaction_id(self.method()));
        tracing::info!(
            "Processing debit card payment of {:.2} via {}",
            amount,
            self.bank_name
        );
        true
    }

    fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }
}

#[derive(Debug)]
pub struct UpiPayment {
    pub upi_id: String,
    pub mobile_number: String,
    transaction_id: Option<String>,
}

impl UpiPayment {
    pub fn new(upi_id: impl Into<String>, mobile_number: impl Into<String>) -> Self {
        Self {
            upi_id: upi_id.into(),
            mobile_number: mobile_number.into(),
            transaction_id: None,
        }
    }
}

impl Payment for UpiPayment {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Upi
    }

    fn validate(&self) -> bool {
        is_valid_upi_id(&self.upi_id) && is_valid_mobile_number(&self.mobile_number)
    }

    // UPI carries no processing fee
    fn processing_fee(&self, _amount: f64) -> f64 {
        0.0
    }

    fn process(&mut self, amount: f64) -> bool {
        if !self.validate() {
            return false;
        }
        self.transaction_id = Some(issue_transaction_id(self.method()));
        tracing::info!("Processing UPI payment of {:.2} to {}", amount, self.upi_id);
        true
    }

    fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(number: &str, expiry: &str, cvv: &str) -> CardDetails {
        CardDetails {
            card_number: Masked::new(number.to_string()),
            card_holder_name: "John Doe".to_string(),
            expiry_date: expiry.to_string(),
            cvv: Masked::new(cvv.to_string()),
        }
    }

    fn assert_transaction_id(id: &str, prefix: &str) {
        let token = id.strip_prefix(prefix).expect("prefix");
        assert_eq!(token.len(), 8);
        assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_credit_card_success() {
        let mut payment = CreditCardPayment::new(card("4111111111111111", "12/27", "123"));
        assert!(payment.validate());
        assert!(payment.process(5225.0));
        assert_transaction_id(payment.transaction_id().unwrap(), "CC-");
        assert!((payment.processing_fee(1000.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_credit_card_short_number_rejected() {
        let mut payment = CreditCardPayment::new(card("411111111111111", "12/27", "123"));
        assert!(!payment.validate());
        assert!(!payment.process(5225.0));
        assert!(payment.transaction_id().is_none());
    }

    #[test]
    fn test_card_field_rules() {
        assert!(!is_valid_card_number("41111111111111ab"));
        assert!(is_valid_cvv("123"));
        assert!(is_valid_cvv("1234"));
        assert!(!is_valid_cvv("12"));
        assert!(!is_valid_cvv("12345"));
        assert!(is_valid_expiry("01/30"));
        assert!(!is_valid_expiry("1/30"));
        assert!(!is_valid_expiry("13/30"));
        assert!(!is_valid_expiry("12-30"));
    }

    #[test]
    fn test_debit_card_requires_bank() {
        let mut payment = DebitCardPayment::new(card("4111111111111111", "12/27", "123"), "  ");
        assert!(!payment.process(100.0));
        assert!(payment.transaction_id().is_none());

        let mut payment =
            DebitCardPayment::new(card("4111111111111111", "12/27", "123"), "SBI Bank");
        assert!(payment.process(100.0));
        assert_transaction_id(payment.transaction_id().unwrap(), "DC-");
        assert!((payment.processing_fee(1000.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_upi_validation_and_fee() {
        let mut payment = UpiPayment::new("john@upi", "9876543210");
        assert!(payment.process(22160.0));
        assert_transaction_id(payment.transaction_id().unwrap(), "UPI-");

        for amount in [0.0, 99.5, 1_000_000.0] {
            assert_eq!(payment.processing_fee(amount), 0.0);
        }

        assert!(!UpiPayment::new("john.upi", "9876543210").validate());
        assert!(!UpiPayment::new("john@upi", "98765").validate());
    }

    #[test]
    fn test_method_tags() {
        assert_eq!("UPI".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!(
            "DEBIT_CARD".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::DebitCard
        );
        assert!("PAYPAL".parse::<PaymentMethod>().is_err());
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            "\"CREDIT_CARD\""
        );
        assert_eq!(serde_json::to_string(&PaymentMethod::Upi).unwrap(), "\"UPI\"");
    }
}
