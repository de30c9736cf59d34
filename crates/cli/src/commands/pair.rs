use anyhow::{anyhow, Context, Result};
use devpair_core::pair::{
    derive_with, extract_ids, generate_temp_pair_id, is_valid, legacy_pair_hash, TokenOrder,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PairIdOutput {
    pub device_a: String,
    pub device_b: String,
    pub order: TokenOrder,
    pub pair_id: String,
}

#[derive(Debug, Serialize)]
pub struct DecodedPairOutput {
    pub pair_id: String,
    pub min: i64,
    pub max: i64,
    pub sorted: bool,
}

/// Build the derived pair id for two device identifiers.
pub fn pair_id_output(device_a: &str, device_b: &str, numeric_order: bool) -> PairIdOutput {
    let order = if numeric_order { TokenOrder::Numeric } else { TokenOrder::Lexicographic };
    let pair_id = derive_with(device_a, device_b, order).into_string();
    PairIdOutput { device_a: device_a.to_string(), device_b: device_b.to_string(), order, pair_id }
}

/// Print the pair id for two devices.
pub fn pair_id_command(device_a: &str, device_b: &str, numeric_order: bool, json: bool) -> Result<()> {
    let output = pair_id_output(device_a, device_b, numeric_order);
    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output.pair_id);
    }
    Ok(())
}

/// Decode a pair id into its two device numbers; fails on malformed ids.
pub fn decode_pair_command(pair_id: &str, json: bool) -> Result<()> {
    let (min, max) = extract_ids(pair_id).context("Failed to decode pair ID")?;
    if json {
        let output =
            DecodedPairOutput { pair_id: pair_id.to_string(), min, max, sorted: is_valid(pair_id) };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{min} {max}");
    }
    Ok(())
}

/// Print `valid`/`invalid`; invalid ids also produce an error exit.
pub fn validate_pair_command(pair_id: &str) -> Result<()> {
    if is_valid(pair_id) {
        println!("valid");
        Ok(())
    } else {
        println!("invalid");
        Err(anyhow!("Pair ID '{}' is not a sorted pair_<min>_<max> id", pair_id))
    }
}

pub fn temp_pair_id_command() -> Result<()> {
    println!("{}", generate_temp_pair_id());
    Ok(())
}

pub fn legacy_pair_hash_command(device_a: &str, device_b: &str) -> Result<()> {
    println!("{}", legacy_pair_hash(device_a, device_b));
    Ok(())
}
