use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use super::file::resolve_path;

/// One row of an extra-payment grid.
#[derive(Debug, Deserialize)]
struct ExtraRecord {
    #[serde(alias = "month")]
    period: u32,
    #[serde(alias = "amount", alias = "extra_amortization")]
    extra: String,
}

/// Parse `PERIOD=AMOUNT`, e.g. `12=1500.50`.
pub fn parse_extra(s: &str) -> Result<(u32, Decimal), String> {
    let (period, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PERIOD=AMOUNT, got '{s}'"))?;
    let period = period
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid period '{}': {e}", period.trim()))?;
    let amount = parse_amount(amount)?;
    Ok((period, amount))
}

/// Load a grid of extra payments from CSV, skipping zero rows.
///
/// Expects a header row; the period column may be called `period` or
/// `month`, the amount column `extra`, `amount` or `extra_amortization`.
pub fn read_extras_csv(path: &str) -> Result<Vec<(u32, Decimal)>, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&canonical)?;

    let mut extras = Vec::new();
    for (line, record) in rdr.deserialize::<ExtraRecord>().enumerate() {
        let record = record?;
        let amount = parse_amount(&record.extra)
            .map_err(|e| format!("{}: row {}: {e}", canonical.display(), line + 1))?;
        if !amount.is_zero() {
            extras.push((record.period, amount));
        }
    }
    Ok(extras)
}

/// Accepts plain decimals and grid-formatted amounts such as `$1,200.00`.
fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned).map_err(|e| format!("invalid amount '{}': {e}", raw.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_parse_extra() {
        assert_eq!(parse_extra("12=1500.50").unwrap(), (12, dec!(1500.50)));
        assert_eq!(parse_extra(" 3 = $1,000 ").unwrap(), (3, dec!(1000)));
    }

    #[test]
    fn test_parse_extra_rejects_malformed() {
        assert!(parse_extra("12").is_err());
        assert!(parse_extra("x=100").is_err());
        assert!(parse_extra("3=abc").is_err());
    }

    #[test]
    fn test_read_extras_csv_skips_zero_rows() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "month,extra_amortization").unwrap();
        writeln!(file, "1,0.0").unwrap();
        writeln!(file, "2,\"$2,500.00\"").unwrap();
        writeln!(file, "3,").unwrap();
        writeln!(file, "4,125").unwrap();
        file.flush().unwrap();

        let extras = read_extras_csv(file.path().to_str().unwrap()).unwrap();
        assert_eq!(extras, vec![(2, dec!(2500)), (4, dec!(125))]);
    }
}
