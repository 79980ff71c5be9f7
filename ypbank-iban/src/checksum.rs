//! Контрольные цифры IBAN по алгоритму MOD-97-10 (ISO 7064).
//!
//! Строка переставляется как `BBAN + код страны + контрольные цифры`,
//! буквы заменяются двузначными числами (A = 10 ... Z = 35), и от
//! получившегося десятичного числа берется остаток по модулю 97.
//! Число не материализуется: остаток накапливается слева направо и
//! всегда меньше 97, так что хватает `u32`.

use crate::error::{Error, FormatError, FormatViolation, Result};
use crate::types::{
    BBAN_OFFSET, CHECK_DIGIT_BASE, COUNTRY_CODE_LENGTH, DEFAULT_CHECK_DIGIT, MOD, VALID_REMAINDER,
};

/// Вычисляет контрольные цифры для кода страны и BBAN.
///
/// ```
/// use ypbank_iban::checksum::compute_check_digits;
///
/// assert_eq!(compute_check_digits("AT", "1904300234573201").unwrap(), "61");
/// ```
pub fn compute_check_digits(country_code: &str, bban: &str) -> Result<String> {
    let remainder = remainder(&[bban, country_code, DEFAULT_CHECK_DIGIT])?;
    let check_digit = CHECK_DIGIT_BASE - remainder;
    Ok(format!("{:02}", check_digit))
}

/// Проверяет контрольные цифры IBAN в компактной форме.
///
/// При несовпадении возвращает [`Error::InvalidCheckDigit`] с ожидаемыми
/// и фактическими цифрами.
pub fn validate_check_digit(iban: &str) -> Result<()> {
    let (prefix, bban) = split_prefix(iban)?;

    let remainder = remainder(&[bban, prefix])?;
    tracing::trace!(iban, remainder, "Остаток MOD-97");

    if remainder != VALID_REMAINDER {
        let country_code = &prefix[..COUNTRY_CODE_LENGTH];
        return Err(Error::InvalidCheckDigit {
            expected: compute_check_digits(country_code, bban)?,
            actual: prefix[COUNTRY_CODE_LENGTH..].to_string(),
        });
    }

    Ok(())
}

fn split_prefix(iban: &str) -> Result<(&str, &str)> {
    match (iban.get(..BBAN_OFFSET), iban.get(BBAN_OFFSET..)) {
        (Some(prefix), Some(bban)) => Ok((prefix, bban)),
        _ => Err(FormatError::new(
            FormatViolation::IbanTooShort,
            format!(
                "IBAN должен содержать не менее {} символов: {}",
                BBAN_OFFSET, iban
            ),
        )
        .with_expected(BBAN_OFFSET)
        .with_actual(iban.chars().count())
        .into()),
    }
}

/// Остаток от деления на 97 числа, составленного из частей по порядку.
fn remainder(parts: &[&str]) -> Result<u32> {
    let mut remainder = 0u32;

    for part in parts {
        for c in part.chars() {
            remainder = match c {
                '0'..='9' => (remainder * 10 + c as u32 - '0' as u32) % MOD,
                'A'..='Z' => (remainder * 100 + c as u32 - 'A' as u32 + 10) % MOD,
                _ => {
                    return Err(FormatError::new(
                        FormatViolation::BbanOnlyDigitsOrLetters,
                        format!(
                            "Недопустимый символ '{}' при расчете контрольной суммы",
                            c
                        ),
                    )
                    .with_actual(c)
                    .into())
                }
            };
        }
    }

    Ok(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_compute_check_digits() {
        assert_eq!(compute_check_digits("AT", "1904300234573201").unwrap(), "61");
        assert_eq!(compute_check_digits("AT", "1904102345732012").unwrap(), "14");
        assert_eq!(compute_check_digits("GB", "NWBK60161331926819").unwrap(), "29");
        assert_eq!(compute_check_digits("DE", "370400440532013000").unwrap(), "89");
    }

    #[test]
    fn test_check_digits_are_zero_padded() {
        assert_eq!(compute_check_digits("SA", "80000000608010167519").unwrap(), "03");
        assert_eq!(compute_check_digits("MK", "250120000058984").unwrap(), "07");
    }

    #[test]
    fn test_validate_check_digit() {
        assert!(validate_check_digit("AT611904300234573201").is_ok());
        assert!(validate_check_digit("FR1420041010050500013M02606").is_ok());

        let err = validate_check_digit("AT621904300234573201").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCheckDigit {
                expected: "61".to_string(),
                actual: "62".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_characters() {
        let err = compute_check_digits("AT", "19043-0234573201").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);

        let err = validate_check_digit("at611904300234573201").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_too_short() {
        let err = validate_check_digit("AT6").unwrap_err();
        assert_eq!(
            err.format_error().map(|e| e.violation),
            Some(FormatViolation::IbanTooShort)
        );
    }

    #[test]
    fn test_long_input_stays_in_range() {
        let bban = "Z".repeat(1000);
        assert!(compute_check_digits("ZZ", &bban).is_ok());
    }
}
