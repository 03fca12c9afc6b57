use crate::{boundary::MempoolReservation, types::OutputCoin};

/// Drops every coin the mempool reports as already spent by a pending transaction.
///
/// A coin whose reservation state cannot be read is dropped as well, never kept.
pub fn filter_reserved_coins<M>(coins: Vec<OutputCoin>, mempool: &M) -> Vec<OutputCoin>
where
    M: MempoolReservation + ?Sized,
{
    let before = coins.len();
    let unreserved: Vec<OutputCoin> = coins
        .into_iter()
        .filter(|coin| match mempool.is_reserved(&coin.coin_hash) {
            Ok(reserved) => !reserved,
            Err(e) => {
                tracing::warn!(
                    coin_hash = %coin.coin_hash,
                    error = %e,
                    "Reservation unknown, excluding coin"
                );
                false
            }
        })
        .collect();

    tracing::debug!(
        before,
        after = unreserved.len(),
        "Filtered mempool reserved coins"
    );
    unreserved
}
