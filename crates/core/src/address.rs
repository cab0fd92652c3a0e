//! Brazilian postal code (CEP) and taxpayer id (CPF) normalisation.

use crate::error::CoreError;

/// Number of digits in a CEP.
pub const CEP_LEN: usize = 8;
/// Number of digits in a CPF.
pub const CPF_LEN: usize = 11;

/// Normalise a CEP to its 8 bare digits.
///
/// Accepts `01310100` and `01310-100`; anything else is a validation error.
pub fn normalize_cep(raw: &str) -> Result<String, CoreError> {
    let raw = raw.trim();
    let digits: String = match raw.split_once('-') {
        Some((head, tail)) if head.len() == 5 && tail.len() == 3 => format!("{head}{tail}"),
        Some(_) => return Err(invalid_cep(raw)),
        None => raw.to_string(),
    };

    if digits.len() != CEP_LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_cep(raw));
    }
    Ok(digits)
}

fn invalid_cep(raw: &str) -> CoreError {
    CoreError::Validation(format!("Invalid CEP: {raw}"))
}

/// Normalise a CPF to its 11 bare digits and verify both check digits.
///
/// Punctuation (`.` and `-`) is stripped. Sequences of a single repeated
/// digit pass the checksum but are not valid CPFs and are rejected.
pub fn normalize_cpf(raw: &str) -> Result<String, CoreError> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '.' && *c != '-')
        .collect();

    if digits.len() != CPF_LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation("CPF must have 11 digits".into()));
    }

    let values: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();
    if values.iter().all(|v| *v == values[0]) {
        return Err(CoreError::Validation("Invalid CPF".into()));
    }

    if check_digit(&values[..9]) != values[9] || check_digit(&values[..10]) != values[10] {
        return Err(CoreError::Validation("Invalid CPF".into()));
    }
    Ok(digits)
}

/// Modulo-11 check digit over `prefix` with weights counting down to 2.
fn check_digit(prefix: &[u32]) -> u32 {
    let weight_start = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        r => r,
    }
}
