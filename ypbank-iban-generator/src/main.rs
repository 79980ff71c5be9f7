//! CLI-утилита для генерации случайных корректных IBAN.

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use ypbank_iban::{CountryCode, Iban, IbanBuilder, IbanFormat, iban_length, supported_countries};

/// YPBank IBAN Generator - генерация тестовых IBAN.
///
/// Незаданные поля BBAN заполняются случайными значениями,
/// контрольные цифры вычисляются.
#[derive(Parser)]
#[command(name = "ypbank-iban-generator")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Код страны alpha-2 или alpha-3 (по умолчанию случайная страна)
    #[arg(long, short)]
    country: Option<String>,

    /// Количество номеров
    #[arg(long = "count", short = 'n', default_value_t = 1)]
    count: usize,

    /// Код банка
    #[arg(long)]
    bank_code: Option<String>,

    /// Код отделения
    #[arg(long)]
    branch_code: Option<String>,

    /// Номер счета
    #[arg(long)]
    account_number: Option<String>,

    /// Национальный контрольный разряд
    #[arg(long)]
    national_check_digit: Option<String>,

    /// Тип счета
    #[arg(long)]
    account_type: Option<String>,

    /// Тип счета владельца
    #[arg(long)]
    owner_account_number: Option<String>,

    /// Идентификационный номер
    #[arg(long)]
    identification_number: Option<String>,

    /// Выводить группами по 4 символа
    #[arg(short, long)]
    grouped: bool,

    /// Показать поддерживаемые страны и выйти
    #[arg(long)]
    list: bool,

    /// Подробный вывод
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn has_fixed_fields(&self) -> bool {
        self.bank_code.is_some()
            || self.branch_code.is_some()
            || self.account_number.is_some()
            || self.national_check_digit.is_some()
            || self.account_type.is_some()
            || self.owner_account_number.is_some()
            || self.identification_number.is_some()
    }

    fn builder(&self, country: CountryCode) -> IbanBuilder {
        let mut builder = Iban::builder().country_code(country);
        if let Some(ref v) = self.bank_code {
            builder = builder.bank_code(v.as_str());
        }
        if let Some(ref v) = self.branch_code {
            builder = builder.branch_code(v.as_str());
        }
        if let Some(ref v) = self.account_number {
            builder = builder.account_number(v.as_str());
        }
        if let Some(ref v) = self.national_check_digit {
            builder = builder.national_check_digit(v.as_str());
        }
        if let Some(ref v) = self.account_type {
            builder = builder.account_type(v.as_str());
        }
        if let Some(ref v) = self.owner_account_number {
            builder = builder.owner_account_number(v.as_str());
        }
        if let Some(ref v) = self.identification_number {
            builder = builder.identification_number(v.as_str());
        }
        builder
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn print_countries() {
    println!("Код  Длина  Структура BBAN  Страна");
    for country in supported_countries() {
        let length = iban_length(country).unwrap_or_default();
        let layout = ypbank_iban::bban::structure_for(country)
            .map(|s| s.to_string())
            .unwrap_or_default();
        println!("{:<4} {:<6} {:<15} {}", country, length, layout, country.name());
    }
}

fn generate(args: &Args) -> Result<Vec<Iban>, String> {
    let country = match args.country {
        Some(ref code) => Some(
            code.parse::<CountryCode>()
                .map_err(|e| format!("Неверный код страны '{}': {}", code, e))?,
        ),
        None => None,
    };

    if country.is_none() && args.has_fixed_fields() {
        return Err("Для фиксированных полей необходимо указать страну (--country)".to_string());
    }

    (0..args.count)
        .map(|_| -> Result<Iban, String> {
            let iban = match country {
                Some(country) => args.builder(country).build_random(),
                None => Iban::random(),
            }
            .map_err(|e| format!("Не удалось сгенерировать IBAN: {}", e))?;

            tracing::debug!(iban = %iban, "Сгенерирован IBAN");
            Ok(iban)
        })
        .collect()
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list {
        print_countries();
        return;
    }

    let ibans = match generate(&args) {
        Ok(ibans) => ibans,
        Err(e) => {
            eprintln!("Ошибка: {}", e);
            process::exit(1);
        }
    };

    let format = if args.grouped {
        IbanFormat::Grouped
    } else {
        IbanFormat::Compact
    };

    for iban in &ibans {
        println!("{}", format.format(iban));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["ypbank-iban-generator"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_generate_with_fixed_bank_code() {
        let ibans = generate(&args(&["-c", "DE", "-n", "3", "--bank-code", "37040044"])).unwrap();
        assert_eq!(ibans.len(), 3);
        for iban in ibans {
            assert_eq!(iban.country_code(), CountryCode::DE);
            assert_eq!(iban.bank_code(), Some("37040044"));
        }
    }

    #[test]
    fn test_generate_count_zero() {
        let ibans = generate(&args(&["-c", "DE", "-n", "0"])).unwrap();
        assert!(ibans.is_empty());
    }

    #[test]
    fn test_generate_accepts_alpha3() {
        let ibans = generate(&args(&["--country", "AUT"])).unwrap();
        assert_eq!(ibans[0].country_code(), CountryCode::AT);
    }

    #[test]
    fn test_generate_errors() {
        assert!(generate(&args(&["-c", "US"])).is_err());
        assert!(generate(&args(&["-c", "de"])).is_err());
        assert!(generate(&args(&["--bank-code", "1234"])).is_err());
        assert!(generate(&args(&["-c", "DE", "--bank-code", "1234"])).is_err());
    }
}
