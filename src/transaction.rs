//! Data shown and edited by the UI: recorded transfers and the transfer form.

use crate::{contract::TransferStruct, error::TransactionError};
use chrono::{Datelike, Local, TimeZone};
use ethers::{
    types::{Address, TransactionRequest, U256},
    utils::{format_ether, parse_ether},
};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Gas limit of a plain value transfer (`0x5208`)
pub const VALUE_TRANSFER_GAS: u64 = 21_000;

/// Time half of an en-US `toLocaleString`, `h:mm:ss AM`. The date half is
/// written by hand since `%Y` signs years past 9999.
const LOCALE_TIME_FORMAT: &str = "%-I:%M:%S %p";
const INVALID_DATE: &str = "Invalid Date";

/// A recorded transfer as the UI renders it
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredTransaction {
    pub address_to: Address,
    pub address_from: Address,
    pub timestamp: String,
    pub message: String,
    pub keyword: String,
    /// In ether
    pub amount: f64,
}

impl From<TransferStruct> for StructuredTransaction {
    fn from(transfer: TransferStruct) -> Self {
        Self {
            address_to: transfer.receiver,
            address_from: transfer.sender,
            timestamp: format_timestamp(transfer.timestamp),
            message: transfer.message,
            keyword: transfer.keyword,
            amount: wei_to_ether(transfer.amount),
        }
    }
}

/// Formats a block timestamp (seconds) in the browser's time zone
pub fn format_timestamp(timestamp: U256) -> String {
    format_timestamp_in(timestamp, &Local)
}

pub fn format_timestamp_in<Tz>(timestamp: U256, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let secs = timestamp.min(U256::from(i64::MAX as u64)).as_u64() as i64;
    match tz.timestamp_opt(secs, 0).single() {
        Some(date) => format!(
            "{}/{}/{}, {}",
            date.month(),
            date.day(),
            date.year(),
            date.format(LOCALE_TIME_FORMAT)
        ),
        None => INVALID_DATE.to_string(),
    }
}

/// Scales wei down by 10^18. Precision is whatever an `f64` keeps.
pub fn wei_to_ether(amount: U256) -> f64 {
    format_ether(amount).parse().unwrap_or_default()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    AddressTo,
    Amount,
    Keyword,
    Message,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::AddressTo => "addressTo",
            FormField::Amount => "amount",
            FormField::Keyword => "keyword",
            FormField::Message => "message",
        }
    }
}

impl FromStr for FormField {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "addressTo" => Ok(FormField::AddressTo),
            "amount" => Ok(FormField::Amount),
            "keyword" => Ok(FormField::Keyword),
            "message" => Ok(FormField::Message),
            other => Err(TransactionError::UnknownField(other.to_string())),
        }
    }
}

/// The transfer form, kept as typed so it can be echoed back into inputs
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub address_to: String,
    pub amount: String,
    pub keyword: String,
    pub message: String,
}

impl FormData {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::AddressTo => &self.address_to,
            FormField::Amount => &self.amount,
            FormField::Keyword => &self.keyword,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::AddressTo => self.address_to = value,
            FormField::Amount => self.amount = value,
            FormField::Keyword => self.keyword = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn validate(&self) -> Result<Transfer, TransactionError> {
        let to = Address::from_str(self.address_to.trim())
            .map_err(|_| TransactionError::InvalidAddress(self.address_to.clone()))?;
        let amount = self.amount.trim();
        if amount.is_empty() {
            return Err(TransactionError::InvalidAmount(self.amount.clone()));
        }
        let amount = parse_ether(amount)
            .map_err(|err| TransactionError::InvalidAmount(format!("{}: {err}", self.amount)))?;

        Ok(Transfer {
            to,
            amount,
            message: self.message.clone(),
            keyword: self.keyword.clone(),
        })
    }
}

/// A validated form, amounts in wei
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub to: Address,
    pub amount: U256,
    pub message: String,
    pub keyword: String,
}

impl Transfer {
    /// The plain ether transfer that precedes recording it on the contract
    pub fn value_transaction(&self, from: Address) -> TransactionRequest {
        TransactionRequest::new()
            .from(from)
            .to(self.to)
            .gas(VALUE_TRANSFER_GAS)
            .value(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    const RECEIVER: &str = "0xBE565E3eEFcfd58920FfB5048292f67F431356eF";

    fn filled_form() -> FormData {
        FormData {
            address_to: RECEIVER.to_string(),
            amount: "0.0001".to_string(),
            keyword: "coffee".to_string(),
            message: "thanks".to_string(),
        }
    }

    #[test]
    fn timestamp_uses_locale_shape() {
        let ts = U256::from(1_700_000_000u64);

        assert_eq!(format_timestamp_in(ts, &Utc), "11/14/2023, 10:13:20 PM");
        assert_eq!(format_timestamp_in(U256::zero(), &Utc), "1/1/1970, 12:00:00 AM");
    }

    #[test]
    fn timestamp_follows_time_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        assert_eq!(
            format_timestamp_in(U256::from(1_700_000_000u64), &tokyo),
            "11/15/2023, 7:13:20 AM"
        );
    }

    #[test]
    fn five_digit_years_are_unsigned() {
        // arrange
        let ts = U256::from(253_402_300_800u64);

        // act
        let formatted = format_timestamp_in(ts, &Utc);

        // assert
        assert_eq!(formatted, "1/1/10000, 12:00:00 AM");
    }

    #[test]
    fn out_of_range_timestamp_is_invalid_date() {
        assert_eq!(format_timestamp_in(U256::MAX, &Utc), "Invalid Date");
    }

    #[test]
    fn wei_is_scaled_to_ether() {
        assert_eq!(wei_to_ether(U256::exp10(18)), 1.0);
        assert_eq!(wei_to_ether(U256::from(1_500_000_000_000_000_000u64)), 1.5);
        assert_eq!(wei_to_ether(U256::from(100_000_000_000_000u64)), 0.0001);
        assert_eq!(wei_to_ether(U256::zero()), 0.0);
    }

    #[test]
    fn transfer_struct_is_mapped_for_display() {
        // arrange
        let sender = Address::from_low_u64_be(1);
        let receiver = Address::from_low_u64_be(2);
        let transfer = TransferStruct {
            sender,
            receiver,
            amount: U256::from(2_500_000_000_000_000_000u64),
            message: "gm".to_string(),
            timestamp: U256::from(1_700_000_000u64),
            keyword: "coffee".to_string(),
        };

        // act
        let structured = StructuredTransaction::from(transfer);

        // assert
        assert_eq!(structured.address_to, receiver);
        assert_eq!(structured.address_from, sender);
        assert_eq!(structured.message, "gm");
        assert_eq!(structured.keyword, "coffee");
        assert_eq!(structured.amount, 2.5);
        assert!(!structured.timestamp.is_empty());
    }

    #[test]
    fn structured_transaction_serializes_camel_case() {
        let structured = StructuredTransaction {
            address_to: Address::zero(),
            address_from: Address::zero(),
            timestamp: "1/1/1970, 12:00:00 AM".to_string(),
            message: String::new(),
            keyword: String::new(),
            amount: 0.5,
        };

        let value = serde_json::to_value(&structured).unwrap();

        assert!(value.get("addressTo").is_some());
        assert!(value.get("addressFrom").is_some());
        assert_eq!(value["amount"], 0.5);
    }

    #[test]
    fn form_field_names() {
        for field in [FormField::AddressTo, FormField::Amount, FormField::Keyword, FormField::Message]
        {
            assert_eq!(field.as_str().parse::<FormField>().unwrap(), field);
        }
        assert!(matches!(
            "sender".parse::<FormField>(),
            Err(TransactionError::UnknownField(name)) if name == "sender"
        ));
    }

    #[test]
    fn set_changes_only_one_field() {
        // arrange
        let mut form = filled_form();

        // act
        form.set(FormField::Message, "gm".to_string());

        // assert
        assert_eq!(form.get(FormField::Message), "gm");
        assert_eq!(form.get(FormField::AddressTo), RECEIVER);
        assert_eq!(form.get(FormField::Amount), "0.0001");
        assert_eq!(form.get(FormField::Keyword), "coffee");
    }

    #[test]
    fn valid_form_becomes_transfer() {
        let transfer = filled_form().validate().unwrap();

        assert_eq!(transfer.to, RECEIVER.parse::<Address>().unwrap());
        assert_eq!(transfer.amount, U256::from(100_000_000_000_000u64));
        assert_eq!(transfer.message, "thanks");
        assert_eq!(transfer.keyword, "coffee");
    }

    #[test]
    fn bad_receiver_is_rejected() {
        let form = FormData { address_to: "0x1234".to_string(), ..filled_form() };

        assert!(matches!(form.validate(), Err(TransactionError::InvalidAddress(_))));
    }

    #[test]
    fn bad_amount_is_rejected() {
        let empty = FormData { amount: "  ".to_string(), ..filled_form() };
        let words = FormData { amount: "a lot".to_string(), ..filled_form() };

        assert!(matches!(empty.validate(), Err(TransactionError::InvalidAmount(_))));
        assert!(matches!(words.validate(), Err(TransactionError::InvalidAmount(_))));
    }

    #[test]
    fn value_transaction_uses_plain_transfer_gas() {
        // arrange
        let from = Address::from_low_u64_be(9);
        let transfer = filled_form().validate().unwrap();

        // act
        let tx = transfer.value_transaction(from);

        // assert
        assert_eq!(tx.from, Some(from));
        assert_eq!(tx.gas, Some(U256::from(0x5208)));
        assert_eq!(tx.value, Some(U256::from(100_000_000_000_000u64)));
        assert_eq!(serde_json::to_value(&tx).unwrap()["gas"], "0x5208");
    }
}
