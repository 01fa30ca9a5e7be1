use std::str::FromStr;

use anyhow::Result;
use itertools::Itertools;

use crate::model::chain::Chain;
use crate::shortcuts::{Catalog, Shortcut};

/// Print a human-readable listing of the shortcut catalog.
pub fn run(chain: Option<&str>) -> Result<()> {
    let chain = chain.map(Chain::from_str).transpose()?;
    print!("{}", render(&Catalog::builtin(), chain)?);
    Ok(())
}

pub fn render(catalog: &Catalog, chain: Option<Chain>) -> Result<String> {
    let mut out = String::from("Available Shortcuts\n===================\n");
    let shortcuts: Vec<&dyn Shortcut> = match chain {
        Some(c) => catalog.supporting(c).collect(),
        None => catalog.iter().collect(),
    };

    for (i, shortcut) in shortcuts.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", i + 1, shortcut.name()));
        if !shortcut.description().is_empty() {
            out.push_str(&format!("   {}\n", shortcut.description()));
        }
        out.push_str(&format!(
            "   Chains:        {}\n",
            shortcut.supported_chains().iter().join(", ")
        ));
        let setters = if shortcut.setter_inputs().is_empty() {
            "(none)".to_string()
        } else {
            shortcut.setter_inputs().iter().join(", ")
        };
        out.push_str(&format!("   Setter inputs: {setters}\n"));

        let chains = match chain {
            Some(c) => vec![c],
            None => shortcut.supported_chains(),
        };
        for c in chains {
            out.push_str(&format!("   Addresses on {c}:\n"));
            for (address, data) in shortcut.address_data(c)? {
                out.push_str(&format!("     - {address}  {}\n", data.label));
            }
            let holders = shortcut.token_holders(c);
            let tokens_in = shortcut.build(c)?.metadata.tokens_in;
            for token in &tokens_in {
                if let Some(holder) = holders.get(token) {
                    out.push_str(&format!("     holder of {token}: {holder}\n"));
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_all_shortcuts() {
        let text = render(&Catalog::builtin(), None).unwrap();
        for name in [
            "beraborrow-nect-usde",
            "beraborrow-weth-honey",
            "dolomite-dylpumpbtc",
            "kodiak-wbtc-stbtc",
            "satlayer-pumpbtc",
        ] {
            assert!(text.contains(name), "{name}");
        }
    }

    #[test]
    fn filters_by_chain() {
        let text = render(&Catalog::builtin(), Some(Chain::Cartio)).unwrap();
        assert!(!text.contains("kodiak-wbtc-stbtc"));
        assert!(text.contains("minAmountOut"));
    }
}
