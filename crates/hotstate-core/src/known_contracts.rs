//! Well-known DeFi contract addresses.
//!
//! Convenience tables for seeding watchlists and registering decoders
//! without hand-copying addresses into every deployment config.

use crate::{cache::HotStateCache, decode::UniswapV2Decoder};
use alloy_primitives::{address, Address};
use std::sync::Arc;

/// Uniswap V2 factory on mainnet.
pub const UNISWAP_V2_FACTORY_MAINNET: Address =
    address!("0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");
/// Uniswap V2 router02 on mainnet.
pub const UNISWAP_V2_ROUTER02_MAINNET: Address =
    address!("0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D");
/// Uniswap V2 factory on Sepolia.
pub const UNISWAP_V2_FACTORY_SEPOLIA: Address =
    address!("0xF62c03E08ada871A0bEb309762E260a7a6a880E6");
/// Uniswap V2 router02 on Sepolia.
pub const UNISWAP_V2_ROUTER02_SEPOLIA: Address =
    address!("0xeE567Fe1712Faf6149d80dA1E6934E354124CfE3");

/// USDC/WETH pair, the deepest mainnet V2 pool.
pub const PAIR_USDC_WETH: Address = address!("0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc");
/// USDT/WETH pair.
pub const PAIR_USDT_WETH: Address = address!("0x0d4a11d5EEaaC28EC3F61d100daF4d40471f1852");
/// DAI/WETH pair.
pub const PAIR_DAI_WETH: Address = address!("0xA478c2975Ab1Ea89e8196811F51A7B7Ade33eB11");
/// WBTC/WETH pair.
pub const PAIR_WBTC_WETH: Address = address!("0xBb2b8038a1640196FbE3e38816F3e67Cba72D940");
/// USDC/USDT pair.
pub const PAIR_USDC_USDT: Address = address!("0x3041CbD36888bECc7bbCBc0045E3B1f144466f5f");

/// High-value mainnet Uniswap V2 pairs, labeled.
pub const UNISWAP_V2_PAIRS_MAINNET: [(&str, Address); 5] = [
    ("USDC/WETH", PAIR_USDC_WETH),
    ("USDT/WETH", PAIR_USDT_WETH),
    ("DAI/WETH", PAIR_DAI_WETH),
    ("WBTC/WETH", PAIR_WBTC_WETH),
    ("USDC/USDT", PAIR_USDC_USDT),
];

/// WETH on mainnet.
pub const WETH_MAINNET: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
/// USDC on mainnet.
pub const USDC_MAINNET: Address = address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
/// USDT on mainnet.
pub const USDT_MAINNET: Address = address!("0xdAC17F958D2ee523a2206206994597C13D831ec7");
/// DAI on mainnet.
pub const DAI_MAINNET: Address = address!("0x6B175474E89094C44Da98b954EedeAC495271d0F");
/// WBTC on mainnet.
pub const WBTC_MAINNET: Address = address!("0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599");
/// WETH on Sepolia.
pub const WETH_SEPOLIA: Address = address!("0x7b79995e5f793A07Bc00c21412e50Ecae098E7f9");

/// Returns a recommended watchlist for `chain_id`.
///
/// Sepolia returns empty until pools worth mirroring are deployed there;
/// unknown chains return empty.
#[must_use]
pub fn default_watchlist(chain_id: u64) -> Vec<Address> {
    match chain_id {
        1 => vec![PAIR_USDC_WETH, PAIR_USDT_WETH, PAIR_DAI_WETH, PAIR_WBTC_WETH],
        _ => Vec::new(),
    }
}

/// Registers Uniswap V2 decoders for every known pair on `chain_id`.
pub fn register_default_decoders(cache: &HotStateCache, chain_id: u64) {
    if chain_id == 1 {
        let decoder = Arc::new(UniswapV2Decoder);
        for (_, pair) in UNISWAP_V2_PAIRS_MAINNET {
            cache.register_decoder(pair, decoder.clone());
        }
    }
}
