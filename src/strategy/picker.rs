use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::types::StockProfile;
use crate::db::models::transactions::TransactionModel;
use crate::errors::PickerError;
use crate::sector::Sector;

/// Seeded generator when `seed` is set, OS entropy otherwise
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Purchases per sector. Every sector is present, never-bought ones with 0.
pub fn sector_counts(transactions: &[TransactionModel]) -> BTreeMap<Sector, usize> {
    let mut counts: BTreeMap<Sector, usize> = Sector::ALL.iter().map(|s| (*s, 0)).collect();
    for transaction in transactions {
        *counts.entry(transaction.sector).or_insert(0) += 1;
    }
    counts
}

/// Sectors sharing the lowest purchase count
pub fn least_held_sectors(transactions: &[TransactionModel]) -> Vec<Sector> {
    let counts = sector_counts(transactions);
    let min_count = counts.values().copied().min().unwrap_or(0);
    counts
        .into_iter()
        .filter(|(_, count)| *count == min_count)
        .map(|(sector, _)| sector)
        .collect()
}

/// Uniform draw among the least-held sectors (all sectors for an empty history)
pub fn choose_sector<R: Rng + ?Sized>(transactions: &[TransactionModel], rng: &mut R) -> Sector {
    if transactions.is_empty() {
        return Sector::ALL[rng.random_range(0..Sector::ALL.len())];
    }
    let least_held = least_held_sectors(transactions);
    debug!(?least_held, "Least held sectors");
    least_held[rng.random_range(0..least_held.len())]
}

/// Pick one of the ranked profiles, preferring the sector the portfolio holds least
pub fn pick_stock<'a, R: Rng + ?Sized>(
    top: &'a [StockProfile],
    transactions: &[TransactionModel],
    rng: &mut R,
) -> Result<&'a StockProfile, PickerError> {
    if top.is_empty() {
        return Err(PickerError::EmptySelection);
    }

    let sector = choose_sector(transactions, rng);
    let in_sector: Vec<&StockProfile> = top.iter().filter(|p| p.sector == sector).collect();

    let pick = if in_sector.is_empty() {
        info!(%sector, "No ranked candidate in target sector, choosing from all");
        top.choose(rng)
    } else {
        info!(%sector, matches = in_sector.len(), "Choosing within target sector");
        in_sector.choose(rng).copied()
    };

    pick.ok_or(PickerError::EmptySelection)
}
