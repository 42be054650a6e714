//! Built-in locale string tables.
//!
//! Keys use dot notation (`payment.submit`, `card.labels.cvv`). Templates may
//! contain `{{name}}` placeholders resolved at translation time.

/// English (US) strings (default locale)
pub const EN_US: &[(&str, &str)] = &[
    // Payment container
    ("payment.methods.stablecoin", "Stablecoin"),
    ("payment.methods.card", "Credit Card"),
    ("payment.submit", "Pay"),
    ("payment.errors.noMethod", "No payment method available"),
    // Crypto payment method
    ("crypto.labels.network", "Network"),
    ("crypto.labels.currency", "Currency"),
    ("crypto.options.tron", "Tron"),
    ("crypto.options.usdt", "USDT"),
    ("crypto.validation.networkRequired", "Please select a network"),
    ("crypto.validation.currencyRequired", "Please select a currency"),
    // Credit card payment method
    ("card.labels.cardNumber", "Card Number"),
    ("card.labels.cardHolder", "Card Holder"),
    ("card.labels.expiry", "Expiry"),
    ("card.labels.cvv", "CVV"),
    ("card.placeholders.cardNumber", "xxxx xxxx xxxx xxxx"),
    ("card.placeholders.cardHolder", "Name on Card"),
    ("card.placeholders.expiry", "MM/YY"),
    ("card.placeholders.cvv", "xxx"),
    ("card.placeholders.cvvAmex", "xxxx"),
    ("card.validation.invalidCardNumber", "Please enter a valid card number"),
    ("card.validation.holderRequired", "Please enter card holder name"),
    ("card.validation.invalidExpiry", "Please enter a valid expiry date (MM/YY)"),
    ("card.validation.invalidCvv", "Please enter a valid CVV"),
    // UI components
    ("ui.select.placeholder", "Please select"),
];

/// Traditional Chinese (Taiwan) strings
///
/// `payment.errors.noMethod` is intentionally absent and falls back to English.
pub const ZH_TW: &[(&str, &str)] = &[
    // Payment container
    ("payment.methods.stablecoin", "穩定幣"),
    ("payment.methods.card", "信用卡"),
    ("payment.submit", "付款"),
    // Crypto payment method
    ("crypto.labels.network", "網路"),
    ("crypto.labels.currency", "幣種"),
    ("crypto.options.tron", "Tron"),
    ("crypto.options.usdt", "USDT"),
    ("crypto.validation.networkRequired", "請選擇網路"),
    ("crypto.validation.currencyRequired", "請選擇幣種"),
    // Credit card payment method
    ("card.labels.cardNumber", "卡號"),
    ("card.labels.cardHolder", "持卡人"),
    ("card.labels.expiry", "有效期"),
    ("card.labels.cvv", "安全碼"),
    ("card.placeholders.cardNumber", "xxxx xxxx xxxx xxxx"),
    ("card.placeholders.cardHolder", "持卡人姓名"),
    ("card.placeholders.expiry", "MM/YY"),
    ("card.placeholders.cvv", "xxx"),
    ("card.placeholders.cvvAmex", "xxxx"),
    ("card.validation.invalidCardNumber", "請輸入有效的卡號"),
    ("card.validation.holderRequired", "請輸入持卡人姓名"),
    ("card.validation.invalidExpiry", "請輸入有效的有效期 (MM/YY)"),
    ("card.validation.invalidCvv", "請輸入有效的安全碼"),
    // UI components
    ("ui.select.placeholder", "請選擇"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn keys(table: &[(&'static str, &'static str)]) -> HashSet<&'static str> {
        table.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_tables_have_unique_keys() {
        assert_eq!(keys(EN_US).len(), EN_US.len());
        assert_eq!(keys(ZH_TW).len(), ZH_TW.len());
    }

    #[test]
    fn test_zh_tw_keys_are_subset_of_en_us() {
        let en = keys(EN_US);
        for key in keys(ZH_TW) {
            assert!(en.contains(key), "zh-TW key '{}' missing from en-US", key);
        }
    }

    #[test]
    fn test_no_empty_values() {
        for (key, value) in EN_US.iter().chain(ZH_TW.iter()) {
            assert!(!value.is_empty(), "empty value for '{}'", key);
        }
    }
}
