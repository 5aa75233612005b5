//! Parsing of chain asset strings such as `"2323462.3453 EOS"`.

use rust_decimal::Decimal;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

const MAX_SYMBOL_LEN: usize = 7;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetParseError {
    #[error("expected '<amount> <SYMBOL>', got '{0}'")]
    Layout(String),

    #[error("invalid amount '{0}'")]
    Amount(String),

    #[error("negative amount '{0}'")]
    Negative(String),

    #[error("invalid symbol '{0}'")]
    Symbol(String),

    #[error("expected symbol {expected}, got {found}")]
    SymbolMismatch {
        expected: &'static str,
        found: String,
    },
}

/// A non-negative decimal amount tagged with its unit symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub amount: Decimal,
    pub symbol: String,
}

impl Asset {
    /// Returns the amount if the asset is denominated in `symbol`.
    pub fn expect_symbol(&self, symbol: &'static str) -> Result<Decimal, AssetParseError> {
        if self.symbol == symbol {
            Ok(self.amount)
        } else {
            Err(AssetParseError::SymbolMismatch {
                expected: symbol,
                found: self.symbol.clone(),
            })
        }
    }
}

impl FromStr for Asset {
    type Err = AssetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount_str, symbol) = s
            .split_once(' ')
            .ok_or_else(|| AssetParseError::Layout(s.to_string()))?;

        if amount_str.is_empty() || symbol.contains(' ') {
            return Err(AssetParseError::Layout(s.to_string()));
        }

        // Decimal::from_str tolerates '+' and '_', chain amounts never carry them
        if !amount_str
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
        {
            return Err(AssetParseError::Amount(amount_str.to_string()));
        }

        let amount = Decimal::from_str(amount_str)
            .map_err(|_| AssetParseError::Amount(amount_str.to_string()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(AssetParseError::Negative(amount_str.to_string()));
        }

        if symbol.is_empty()
            || symbol.len() > MAX_SYMBOL_LEN
            || !symbol.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(AssetParseError::Symbol(symbol.to_string()));
        }

        Ok(Asset {
            amount,
            symbol: symbol.to_string(),
        })
    }
}

impl Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ram_and_eos_balances() {
        let ram: Asset = "29576462570 RAM".parse().unwrap();
        assert_eq!(ram.amount, Decimal::from(29_576_462_570u64));
        assert_eq!(ram.symbol, "RAM");

        let eos: Asset = "2323462.3453 EOS".parse().unwrap();
        assert_eq!(eos.amount, Decimal::new(23_234_623_453, 4));
        assert_eq!(eos.symbol, "EOS");
        assert_eq!(eos.to_string(), "2323462.3453 EOS");
    }

    #[test]
    fn test_rejects_malformed_strings() {
        assert_eq!(
            "2323462.3453".parse::<Asset>(),
            Err(AssetParseError::Layout("2323462.3453".to_string()))
        );
        assert_eq!(
            "1.0000  EOS".parse::<Asset>(),
            Err(AssetParseError::Layout("1.0000  EOS".to_string()))
        );
        assert_eq!(
            "abc EOS".parse::<Asset>(),
            Err(AssetParseError::Amount("abc".to_string()))
        );
        assert_eq!(
            "1e5 EOS".parse::<Asset>(),
            Err(AssetParseError::Amount("1e5".to_string()))
        );
        assert_eq!(
            "1.0000 eos".parse::<Asset>(),
            Err(AssetParseError::Symbol("eos".to_string()))
        );
        assert_eq!(
            "1.0000 TOOLONGSYM".parse::<Asset>(),
            Err(AssetParseError::Symbol("TOOLONGSYM".to_string()))
        );
        assert_eq!(
            "-1.0000 EOS".parse::<Asset>(),
            Err(AssetParseError::Negative("-1.0000".to_string()))
        );
    }

    #[test]
    fn test_expect_symbol() {
        let eos: Asset = "10.0000 EOS".parse().unwrap();
        assert_eq!(eos.expect_symbol("EOS"), Ok(Decimal::new(100_000, 4)));
        assert_eq!(
            eos.expect_symbol("RAM"),
            Err(AssetParseError::SymbolMismatch {
                expected: "RAM",
                found: "EOS".to_string(),
            })
        );
    }
}
