//! parsing.rs
//! Conversión tolerante de los campos del payload: montos, fechas, teléfonos.
//! Ninguna función falla: devuelven `None`/`false` y el llamador decide el default.

use std::str::FromStr;
use std::sync::LazyLock;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?1?\d{9,15}$").expect("phone pattern is valid"));

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%d %H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Columnas de dinero: 10 dígitos con 2 decimales, o sea 8 enteros.
const MAX_INTEGER_DIGITS: i64 = 8;
/// Decimales admitidos antes de redondear a centavos.
const MAX_FRACTION_DIGITS: i64 = 64;
const MAX_DECIMAL_LEN: usize = 64;

/// Monto decimal exacto. `None` si no es un número o si no entra en una
/// columna de dinero. El exponente se revisa antes de cualquier operación:
/// "1e1000000000" se rechaza sin materializar sus dígitos.
pub fn parse_decimal(raw: &str) -> Option<BigDecimal> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > MAX_DECIMAL_LEN {
        return None;
    }
    // exponentes fuera de i32 pueden desbordar la escala al parsear
    if let Some((_, exponent)) = raw.split_once(['e', 'E']) {
        exponent.parse::<i32>().ok()?;
    }

    let value = BigDecimal::from_str(raw).ok()?;
    let (_, scale) = value.as_bigint_and_exponent();
    let integer_digits = value.digits() as i64 - scale;

    (scale <= MAX_FRACTION_DIGITS && integer_digits <= MAX_INTEGER_DIGITS).then_some(value)
}

/// Fecha ISO-8601 / RFC 3339. Sin zona horaria se asume UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Teléfono estilo E.164 laxo: `+` y `1` opcionales, 9 a 15 dígitos.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone.trim())
}

/// Redondeo a centavos (half-even), como se guarda en la base.
pub fn round_money(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfEven)
}
