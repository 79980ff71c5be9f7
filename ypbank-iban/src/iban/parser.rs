//! Разбор IBAN из строки.

use crate::bban;
use crate::checksum;
use crate::country::CountryCode;
use crate::error::{Error, FormatError, FormatViolation, Result};
use crate::iban::{format_grouped, Iban};
use crate::types::{BBAN_OFFSET, CHECK_DIGIT_LENGTH, COUNTRY_CODE_LENGTH, GROUP_SEPARATOR};

impl Iban {
    /// Разбирает IBAN в компактной форме (без пробелов).
    ///
    /// Проверки идут в порядке: длина, код страны, поддержка страны,
    /// контрольные цифры как символы, структура BBAN, контрольная сумма.
    ///
    /// ```
    /// use ypbank_iban::Iban;
    ///
    /// let iban = Iban::parse("AT611904300234573201").unwrap();
    /// assert_eq!(iban.bank_code(), Some("19043"));
    /// assert!(Iban::parse("AT621904300234573201").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_compact(input).inspect_err(|e| {
            tracing::debug!(input, error = %e, "IBAN отклонен");
        })
    }

    /// Разбирает значение, которое может отсутствовать.
    ///
    /// Отсутствующее значение дает нарушение [`FormatViolation::IbanNotNull`].
    pub fn value_of(input: Option<&str>) -> Result<Self> {
        match input {
            Some(input) => Self::parse(input),
            None => Err(FormatError::new(
                FormatViolation::IbanNotNull,
                "IBAN не может отсутствовать",
            )
            .into()),
        }
    }

    /// Разбирает IBAN в печатной форме: группы по 4 символа через пробел.
    ///
    /// Принимается только ровно та раскладка, которую выдает
    /// [`Iban::to_formatted_string`].
    pub fn parse_formatted(input: &str) -> Result<Self> {
        let compact: String = input.chars().filter(|&c| c != GROUP_SEPARATOR).collect();
        if format_grouped(&compact) != input {
            let err: Error = FormatError::new(
                FormatViolation::IbanFormatting,
                format!("IBAN должен быть разбит на группы по 4 символа: {}", input),
            )
            .with_expected(format_grouped(&compact))
            .with_actual(input)
            .into();
            tracing::debug!(input, error = %err, "IBAN отклонен");
            return Err(err);
        }

        Self::parse(&compact)
    }

    fn parse_compact(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(
                FormatError::new(FormatViolation::IbanNotEmpty, "IBAN не может быть пустым").into(),
            );
        }

        let length = input.chars().count();
        if length < BBAN_OFFSET {
            return Err(FormatError::new(
                FormatViolation::IbanTooShort,
                format!(
                    "IBAN должен содержать не менее {} символов: {}",
                    BBAN_OFFSET, input
                ),
            )
            .with_expected(BBAN_OFFSET)
            .with_actual(length)
            .into());
        }

        let mut chars = input.chars();
        let country: String = chars.by_ref().take(COUNTRY_CODE_LENGTH).collect();
        let check_digit: String = chars.by_ref().take(CHECK_DIGIT_LENGTH).collect();

        let country_code = parse_country(&country)?;
        let structure =
            bban::structure_for(country_code).ok_or_else(|| Error::unsupported(country.as_str()))?;

        validate_check_digit_chars(&check_digit)?;

        // Первые четыре символа проверены как ASCII, срез безопасен.
        let bban = &input[BBAN_OFFSET..];
        structure.validate(bban)?;
        checksum::validate_check_digit(input)?;

        Ok(Iban::from_parts(country_code, structure, &check_digit, bban))
    }
}

fn parse_country(country: &str) -> Result<CountryCode> {
    if !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FormatError::new(
            FormatViolation::CountryCodeTwoLetters,
            format!("Код страны должен состоять из двух букв: {}", country),
        )
        .with_actual(country)
        .into());
    }

    if !country.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(FormatError::new(
            FormatViolation::CountryCodeUpperCaseLetters,
            format!("Код страны должен содержать только заглавные буквы: {}", country),
        )
        .with_actual(country)
        .into());
    }

    CountryCode::from_alpha2(country).ok_or_else(|| Error::unsupported(country))
}

fn validate_check_digit_chars(check_digit: &str) -> Result<()> {
    if !check_digit.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormatError::new(
            FormatViolation::CheckDigitOnlyDigits,
            format!("Контрольные цифры должны быть цифрами: {}", check_digit),
        )
        .with_actual(check_digit)
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bban::BbanEntryType;
    use crate::error::ErrorKind;

    fn violation(input: &str) -> FormatViolation {
        let err = Iban::parse(input).unwrap_err();
        err.format_error()
            .map(|e| e.violation)
            .unwrap_or_else(|| panic!("ожидалась ошибка формата для {}: {:?}", input, err))
    }

    #[test]
    fn test_parse_valid() {
        let iban = Iban::parse("GB29NWBK60161331926819").unwrap();
        assert_eq!(iban.country_code(), CountryCode::GB);
        assert_eq!(iban.check_digit(), "29");
        assert_eq!(iban.bank_code(), Some("NWBK"));
        assert_eq!(iban.branch_code(), Some("601613"));
        assert_eq!(iban.account_number(), Some("31926819"));
    }

    #[test]
    fn test_value_of_none() {
        let err = Iban::value_of(None).unwrap_err();
        assert_eq!(err.format_error().unwrap().violation, FormatViolation::IbanNotNull);
        assert!(Iban::value_of(Some("AT611904300234573201")).is_ok());
    }

    #[test]
    fn test_length_checks() {
        assert_eq!(violation(""), FormatViolation::IbanNotEmpty);
        assert_eq!(violation("AT6"), FormatViolation::IbanTooShort);
        assert_eq!(violation("AT6119043"), FormatViolation::BbanLength);
        assert_eq!(violation("AT6119043002345732011"), FormatViolation::BbanLength);
    }

    #[test]
    fn test_country_code_checks() {
        assert_eq!(violation("1T611904300234573201"), FormatViolation::CountryCodeTwoLetters);
        assert_eq!(violation("at611904300234573201"), FormatViolation::CountryCodeUpperCaseLetters);

        let err = Iban::parse("ZZ018786767").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedCountry);

        let err = Iban::parse("US64SVBKUS6S3300958879").unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedCountry {
                country: Some("US".to_string())
            }
        );
    }

    #[test]
    fn test_check_digit_chars() {
        assert_eq!(violation("ATX11904300234573201"), FormatViolation::CheckDigitOnlyDigits);
    }

    #[test]
    fn test_bban_character_violation() {
        let err = Iban::parse("AT61190430023457320A").unwrap_err();
        let details = err.format_error().unwrap();
        assert_eq!(details.violation, FormatViolation::BbanOnlyDigits);
        assert_eq!(details.entry_type, Some(BbanEntryType::AccountNumber));
        assert_eq!(details.invalid_character, Some('A'));
        assert_eq!(details.position, Some(15));
    }

    #[test]
    fn test_invalid_check_digit() {
        let err = Iban::parse("AT621904300234573201").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCheckDigit {
                expected: "61".to_string(),
                actual: "62".to_string(),
            }
        );
    }

    #[test]
    fn test_non_ascii_input() {
        assert_eq!(violation("ÄT611904300234573201"), FormatViolation::CountryCodeTwoLetters);
        assert_eq!(violation("AT6ä1904300234573201"), FormatViolation::CheckDigitOnlyDigits);
        assert_eq!(violation("AT61190430023457320ä"), FormatViolation::BbanOnlyDigits);
    }

    #[test]
    fn test_parse_formatted() {
        let iban = Iban::parse_formatted("AT61 1904 3002 3457 3201").unwrap();
        assert_eq!(iban.as_str(), "AT611904300234573201");

        let iban = Iban::parse_formatted("NO93 8601 1117 947").unwrap();
        assert_eq!(iban.as_str(), "NO9386011117947");

        for input in [
            "AT611904300234573201",
            "AT61 19043002 3457 3201",
            " AT61 1904 3002 3457 3201",
            "AT61 1904 3002 3457 3201 ",
            "AT61  1904 3002 3457 3201",
        ] {
            let err = Iban::parse_formatted(input).unwrap_err();
            assert_eq!(
                err.format_error().map(|e| e.violation),
                Some(FormatViolation::IbanFormatting),
                "{}",
                input
            );
        }
    }
}
