// ABOUTME: Input forms for submitting transactions and registering peer nodes
// Collects raw field text and turns it into request payloads without validation

use lazy_static::lazy_static;
use regex::Regex;

use crate::api::endpoint::{Amount, RegisterNodesRequest, TransactionRequest};

lazy_static! {
    static ref FLOAT_PREFIX: Regex =
        Regex::new(r"^\s*([+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?))")
            .expect("valid float prefix regex");
}

/// Parses the longest numeric prefix of `input`, yielding NaN when there is none.
pub fn parse_float(input: &str) -> f64 {
    let Some(captures) = FLOAT_PREFIX.captures(input) else {
        return f64::NAN;
    };
    let number = &captures[1];

    match number.trim_start_matches(['+', '-']) {
        "Infinity" if number.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => number.parse().unwrap_or(f64::NAN),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionField {
    Sender,
    Recipient,
    Amount,
}

impl TransactionField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sender => "Sender",
            Self::Recipient => "Recipient",
            Self::Amount => "Amount",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Sender => Self::Recipient,
            Self::Recipient => Self::Amount,
            Self::Amount => Self::Sender,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Sender => Self::Amount,
            Self::Recipient => Self::Sender,
            Self::Amount => Self::Recipient,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionForm {
    pub sender: String,
    pub recipient: String,
    pub amount: String,
    pub focused: TransactionField,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            sender: String::new(),
            recipient: String::new(),
            amount: String::new(),
            focused: TransactionField::Sender,
        }
    }
}

impl TransactionForm {
    pub fn field(&self, field: TransactionField) -> &str {
        match field {
            TransactionField::Sender => &self.sender,
            TransactionField::Recipient => &self.recipient,
            TransactionField::Amount => &self.amount,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focused {
            TransactionField::Sender => &mut self.sender,
            TransactionField::Recipient => &mut self.recipient,
            TransactionField::Amount => &mut self.amount,
        }
    }

    pub fn input_char(&mut self, ch: char) {
        self.focused_mut().push(ch);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn next_field(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn previous_field(&mut self) {
        self.focused = self.focused.previous();
    }

    /// The amount goes through [`parse_float`]; malformed input is passed on as NaN.
    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest {
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
            amount: Amount(parse_float(&self.amount)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NodeForm {
    pub address: String,
}

impl NodeForm {
    pub fn input_char(&mut self, ch: char) {
        self.address.push(ch);
    }

    pub fn backspace(&mut self) {
        self.address.pop();
    }

    pub fn to_request(&self) -> RegisterNodesRequest {
        RegisterNodesRequest::single(self.address.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_float_plain_numbers() {
        assert_eq!(parse_float("10"), 10.0);
        assert_eq!(parse_float("2.5"), 2.5);
        assert_eq!(parse_float("-3"), -3.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("10."), 10.0);
        assert_eq!(parse_float("1e3"), 1000.0);
    }

    #[test]
    fn test_parse_float_takes_numeric_prefix() {
        assert_eq!(parse_float("  42 coins"), 42.0);
        assert_eq!(parse_float("7abc"), 7.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("3.14.15"), 3.14);
    }

    #[test]
    fn test_parse_float_infinity() {
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_float_garbage_is_nan() {
        assert!(parse_float("").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("inf").is_nan());
        assert!(parse_float("-").is_nan());
    }

    #[test]
    fn test_transaction_form_editing() {
        let mut form = TransactionForm::default();
        for ch in "A".chars() {
            form.input_char(ch);
        }
        form.next_field();
        form.input_char('B');
        form.next_field();
        for ch in "100".chars() {
            form.input_char(ch);
        }
        form.backspace();

        assert_eq!(form.sender, "A");
        assert_eq!(form.recipient, "B");
        assert_eq!(form.amount, "10");

        form.next_field();
        assert_eq!(form.focused, TransactionField::Sender);
        form.previous_field();
        assert_eq!(form.focused, TransactionField::Amount);
    }

    #[test]
    fn test_transaction_request_coerces_amount() {
        let form = TransactionForm {
            sender: "A".to_string(),
            recipient: "B".to_string(),
            amount: "10".to_string(),
            focused: TransactionField::Sender,
        };

        assert_eq!(
            serde_json::to_value(form.to_request()).unwrap(),
            json!({"sender": "A", "recipient": "B", "amount": 10})
        );
    }

    #[test]
    fn test_malformed_amount_passes_through_as_null() {
        let form = TransactionForm {
            amount: "lots".to_string(),
            ..TransactionForm::default()
        };

        assert_eq!(
            serde_json::to_value(form.to_request()).unwrap(),
            json!({"sender": "", "recipient": "", "amount": null})
        );
    }

    #[test]
    fn test_node_form_request() {
        let mut form = NodeForm::default();
        for ch in "http://x:5000".chars() {
            form.input_char(ch);
        }

        assert_eq!(
            serde_json::to_value(form.to_request()).unwrap(),
            json!({"nodes": ["http://x:5000"]})
        );
    }
}
