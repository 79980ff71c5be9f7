//! CLI-утилита для проверки списка IBAN.
//!
//! Читает IBAN построчно из файла или stdin, пишет корректные номера в
//! выбранной форме, а ошибки выводит в stderr.

use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, Read, Write};
use std::process;
use tracing_subscriber::EnvFilter;

use ypbank_iban::{Iban, IbanFormat, parse_iban};

/// Форма записи входных данных.
#[derive(Clone, Copy, ValueEnum)]
enum InputFormatArg {
    /// Без пробелов
    Compact,
    /// Группы по 4 символа
    Grouped,
    /// Любые пробелы игнорируются
    Auto,
}

/// Форма записи выходных данных.
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    /// Без пробелов
    Compact,
    /// Группы по 4 символа
    Grouped,
}

impl From<OutputFormatArg> for IbanFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Compact => IbanFormat::Compact,
            OutputFormatArg::Grouped => IbanFormat::Grouped,
        }
    }
}

/// YPBank IBAN Checker - проверка номеров IBAN.
///
/// Каждая непустая строка входа считается одним IBAN.
#[derive(Parser)]
#[command(name = "ypbank-iban-checker")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Входной файл (по умолчанию stdin)
    #[arg(long, short)]
    input: Option<String>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(long, short)]
    output: Option<String>,

    /// Форма записи входных данных
    #[arg(long, value_enum, default_value = "auto")]
    input_format: InputFormatArg,

    /// Форма записи выходных данных
    #[arg(long, value_enum, default_value = "compact")]
    output_format: OutputFormatArg,

    /// Подробный вывод
    #[arg(short, long)]
    verbose: bool,
}

struct CheckSummary {
    valid: usize,
    invalid: usize,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn read_input(args: &Args) -> Result<String, String> {
    let mut content = String::new();

    if let Some(ref path) = args.input {
        let mut file =
            File::open(path).map_err(|e| format!("Не удалось открыть файл '{}': {}", path, e))?;
        file.read_to_string(&mut content)
            .map_err(|e| format!("Не удалось прочитать файл '{}': {}", path, e))?;
    } else {
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| format!("Не удалось прочитать stdin: {}", e))?;
    }

    Ok(content)
}

fn parse_line(line: &str, format: InputFormatArg) -> ypbank_iban::Result<Iban> {
    match format {
        InputFormatArg::Compact => parse_iban(line, IbanFormat::Compact),
        InputFormatArg::Grouped => parse_iban(line, IbanFormat::Grouped),
        InputFormatArg::Auto => {
            let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
            parse_iban(&compact, IbanFormat::Compact)
        }
    }
}

fn error_line(number: usize, line: &str, error: &ypbank_iban::Error) -> String {
    format!("строка {}: {}: {}", number, line, error)
}

fn check_and_write<W: Write>(
    content: &str,
    input_format: InputFormatArg,
    output_format: IbanFormat,
    writer: &mut W,
) -> Result<CheckSummary, String> {
    let mut summary = CheckSummary {
        valid: 0,
        invalid: 0,
    };

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line, input_format) {
            Ok(iban) => {
                summary.valid += 1;
                writeln!(writer, "{}", output_format.format(&iban))
                    .map_err(|e| format!("Ошибка записи: {}", e))?;
            }
            Err(e) => {
                summary.invalid += 1;
                tracing::warn!(line = idx + 1, kind = ?e.kind(), "IBAN отклонен");
                eprintln!("{}", error_line(idx + 1, line, &e));
            }
        }
    }

    Ok(summary)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let content = match read_input(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Ошибка: {}", e);
            process::exit(1);
        }
    };

    let output_format: IbanFormat = args.output_format.into();
    let result = if let Some(ref path) = args.output {
        let mut file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Ошибка: Не удалось создать файл '{}': {}", path, e);
                process::exit(1);
            }
        };
        check_and_write(&content, args.input_format, output_format, &mut file)
    } else {
        let mut stdout = io::stdout();
        check_and_write(&content, args.input_format, output_format, &mut stdout)
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Ошибка: {}", e);
            process::exit(1);
        }
    };

    eprintln!(
        "Проверено: {}, корректных: {}, с ошибками: {}",
        summary.valid + summary.invalid,
        summary.valid,
        summary.invalid
    );

    if summary.invalid > 0 {
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_and_write_counts_lines() {
        let content = "AT611904300234573201\n\nAT621904300234573201\nGB29 NWBK 6016 1331 9268 19\n";
        let mut output = Vec::new();

        let summary =
            check_and_write(content, InputFormatArg::Auto, IbanFormat::Grouped, &mut output)
                .unwrap();

        assert_eq!(summary.valid, 2);
        assert_eq!(summary.invalid, 1);
        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "AT61 1904 3002 3457 3201\nGB29 NWBK 6016 1331 9268 19\n"
        );
    }

    #[test]
    fn test_error_line() {
        let err = parse_line("AT621904300234573201", InputFormatArg::Auto).unwrap_err();
        assert_eq!(
            error_line(3, "AT621904300234573201", &err),
            "строка 3: AT621904300234573201: \
             Неверные контрольные цифры: ожидалось 61, получено 62"
        );
    }

    #[test]
    fn test_parse_line_formats() {
        assert!(parse_line("AT611904300234573201", InputFormatArg::Compact).is_ok());
        assert!(parse_line("AT61 1904 3002 3457 3201", InputFormatArg::Compact).is_err());
        assert!(parse_line("AT61 1904 3002 3457 3201", InputFormatArg::Grouped).is_ok());
        assert!(parse_line("AT61 19043002 3457 3201", InputFormatArg::Auto).is_ok());
    }
}
