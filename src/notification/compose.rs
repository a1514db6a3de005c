//! The text message template.

use time::Date;
use unicode_segmentation::UnicodeSegmentation;

use crate::beneficiary::{Beneficiary, PaymentMethod};

/// The closing line for beneficiaries who collect their payment in cash.
pub const CASH_INSTRUCTION: &str = "Merci de vous présenter à la trésorerie pour le retirer.";

/// The closing line for beneficiaries paid by bank transfer.
pub const TRANSFER_INSTRUCTION: &str = "Le virement a été effectué sur votre compte.";

/// Write the text message for `beneficiary`.
///
/// The message greets the beneficiary by name, names the payment reference and
/// `date`, then ends with an instruction that depends on the payment method.
/// The account number is never included.
pub fn compose_message(beneficiary: &Beneficiary, date: Date) -> String {
    let instruction = match beneficiary.payment_method {
        PaymentMethod::Cash => CASH_INSTRUCTION,
        PaymentMethod::Transfer => TRANSFER_INSTRUCTION,
    };

    format!(
        "Bonjour {},\nVotre paiement (réf. {}) du {date} est disponible.\n{instruction}",
        beneficiary.name, beneficiary.reference
    )
}

// The GSM 03.38 basic character set, excluding the escape character.
const GSM_BASIC_CHARACTERS: &str = "@£$¥èéùìòÇ\nØø\rÅåΔ_ΦΓΛΩΠΨΣΘΞÆæßÉ !\"#¤%&'()*+,-./0123456789:;<=>?\
    ¡ABCDEFGHIJKLMNOPQRSTUVWXYZÄÖÑÜ§¿abcdefghijklmnopqrstuvwxyzäöñüà";

// Characters reached through the escape character, which take two septets.
const GSM_EXTENDED_CHARACTERS: &str = "^{}\\[~]|€\u{000C}";

/// Length information shown alongside a message preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmsStats {
    /// The number of user-perceived characters.
    pub characters: usize,
    /// The number of SMS parts the message is split into.
    pub segments: usize,
    /// Whether the message fits the GSM 7-bit alphabet.
    pub is_gsm: bool,
}

/// Count the characters and SMS segments needed for `message`.
///
/// Messages that only use the GSM 7-bit alphabet fit 160 septets in a single
/// SMS and 153 per part once split. Anything else is sent as UCS-2, with 70
/// and 67 code units respectively.
pub fn sms_stats(message: &str) -> SmsStats {
    let characters = message.graphemes(true).count();

    let gsm_length = message.chars().try_fold(0, |length, c| {
        if GSM_BASIC_CHARACTERS.contains(c) {
            Some(length + 1)
        } else if GSM_EXTENDED_CHARACTERS.contains(c) {
            Some(length + 2)
        } else {
            None
        }
    });

    let (length, single_limit, part_limit) = match gsm_length {
        Some(length) => (length, 160, 153),
        None => (message.encode_utf16().count(), 70, 67),
    };

    let segments = if length <= single_limit {
        1
    } else {
        length.div_ceil(part_limit)
    };

    SmsStats {
        characters,
        segments,
        is_gsm: gsm_length.is_some(),
    }
}

#[cfg(test)]
mod compose_message_tests {
    use time::macros::date;

    use crate::{
        beneficiary::{Beneficiary, PaymentMethod},
        notification::{CASH_INSTRUCTION, TRANSFER_INSTRUCTION, compose_message},
    };

    fn beneficiary(payment_method: PaymentMethod) -> Beneficiary {
        Beneficiary {
            name: "Ali".to_owned(),
            phone: "0600".to_owned(),
            reference: "B1".to_owned(),
            payment_method,
            account_number: match payment_method {
                PaymentMethod::Cash => None,
                PaymentMethod::Transfer => Some("ACCOUNT-12345".to_owned()),
            },
        }
    }

    #[test]
    fn cash_message_has_treasury_instruction() {
        let message = compose_message(&beneficiary(PaymentMethod::Cash), date!(2024 - 01 - 01));

        assert!(message.contains(CASH_INSTRUCTION));
        assert!(!message.contains(TRANSFER_INSTRUCTION));
        assert!(message.ends_with(CASH_INSTRUCTION));
    }

    #[test]
    fn transfer_message_has_transfer_instruction() {
        let message =
            compose_message(&beneficiary(PaymentMethod::Transfer), date!(2024 - 01 - 01));

        assert!(message.contains(TRANSFER_INSTRUCTION));
        assert!(!message.contains(CASH_INSTRUCTION));
        assert!(message.ends_with(TRANSFER_INSTRUCTION));
    }

    #[test]
    fn message_names_beneficiary_reference_and_date() {
        let message = compose_message(&beneficiary(PaymentMethod::Cash), date!(2024 - 01 - 01));

        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Bonjour Ali,");
        assert!(lines[1].contains("B1"), "got {:?}", lines[1]);
        assert!(lines[1].contains("2024-01-01"), "got {:?}", lines[1]);
    }

    #[test]
    fn account_number_is_not_in_message() {
        let message =
            compose_message(&beneficiary(PaymentMethod::Transfer), date!(2024 - 01 - 01));

        assert!(!message.contains("ACCOUNT-12345"));
    }

    #[test]
    fn empty_fields_still_produce_a_message() {
        let beneficiary = Beneficiary {
            name: "".to_owned(),
            phone: "".to_owned(),
            reference: "".to_owned(),
            payment_method: PaymentMethod::Cash,
            account_number: None,
        };

        let message = compose_message(&beneficiary, date!(2024 - 01 - 01));

        assert!(message.starts_with("Bonjour ,"));
        assert!(message.ends_with(CASH_INSTRUCTION));
    }
}
