//! Known chain ids.

/// Name reported for chain ids missing from the table.
pub const UNKNOWN_CHAIN: &str = "Unknown chain";

/// Human-readable network name for a chain id, if known.
pub fn chain_name(chain_id: u64) -> Option<&'static str> {
    let name = match chain_id {
        1 => "Ethereum Mainnet",
        5 => "Goerli Testnet",
        10 => "OP Mainnet",
        56 => "BNB Smart Chain",
        97 => "BNB Smart Chain Testnet",
        100 => "Gnosis",
        137 => "Polygon",
        250 => "Fantom Opera",
        324 => "zkSync Era",
        1101 => "Polygon zkEVM",
        8453 => "Base",
        17000 => "Holesky Testnet",
        42161 => "Arbitrum One",
        42220 => "Celo",
        43114 => "Avalanche C-Chain",
        59144 => "Linea",
        80001 => "Polygon Mumbai",
        80002 => "Polygon Amoy",
        84532 => "Base Sepolia",
        421614 => "Arbitrum Sepolia",
        534352 => "Scroll",
        560048 => "Hoodi Testnet",
        11155111 => "Sepolia Testnet",
        11155420 => "OP Sepolia",
        _ => return None,
    };
    Some(name)
}

/// Like [`chain_name`], falling back to [`UNKNOWN_CHAIN`].
pub fn chain_name_or_unknown(chain_id: u64) -> &'static str {
    chain_name(chain_id).unwrap_or(UNKNOWN_CHAIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet() {
        assert_eq!(chain_name(1), Some("Ethereum Mainnet"));
    }

    #[test]
    fn l2s() {
        assert_eq!(chain_name(42161), Some("Arbitrum One"));
        assert_eq!(chain_name(8453), Some("Base"));
    }

    #[test]
    fn unknown_falls_back() {
        assert_eq!(chain_name(15000), None);
        assert_eq!(chain_name_or_unknown(15000), UNKNOWN_CHAIN);
    }
}
