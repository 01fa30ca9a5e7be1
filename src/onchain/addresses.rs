use std::collections::HashMap;

use alloy::primitives::{Address, address};

use crate::model::chain::Chain;

// ── Protocol addresses ─────────────────────────────────────────────

/// Token and protocol contracts the built-in recipes interact with.
#[derive(Debug, Clone, Copy)]
pub struct DeFiAddresses {
    pub weth: Address,
    pub usdc: Address,
    pub usde: Address,
    pub honey: Address,
    pub nect: Address,
    pub wbtc: Address,
    pub stbtc: Address,
    pub pumpbtc: Address,
    pub kodiak_router: Address,
    pub honey_factory: Address,
    pub nect_psm: Address,
    pub satlayer_vault: Address,
}

const CARTIO_ADDRESSES: DeFiAddresses = DeFiAddresses {
    weth: address!("0x2d93FbcE4CffC15DD385A80B3f4CC1D4E76C38b3"),
    usdc: address!("0x015fd589F4f1A33ce4487E12714e1B15129c9329"),
    usde: address!("0x1Dfa3e4C3d2bF2B9c4C0C3d3ff8D3eC0F7d0a8c1"),
    honey: address!("0xd137593CDB341CcC78426c54Fb98435C60Da193c"),
    nect: address!("0xefEeD4d987F6d1dE0f23D116a578402456819C28"),
    wbtc: address!("0xFa5bf670A92AfF186E5176aA55690E0277010040"),
    stbtc: address!("0x0b0AeCBd0c1cA1a2E5D0B5E2B5d9AbB7c72C0F9E"),
    pumpbtc: address!("0x49a49AB0A048bCADB8b4E51c5c970C46bF889CCD"),
    kodiak_router: address!("0x4d41822c1804ffF5c038E4905cfd1044121e0E85"),
    honey_factory: address!("0xA81F0019d442f19f66880bcf2698B4E5D5Ec249A"),
    nect_psm: address!("0x5a8eD4Db0E6E80eC3F5A2a0BcBdC3F0c11C5C92E"),
    satlayer_vault: address!("0xF2cd0cA0D0bE3A5aE3a24B0bF0D7aB4Ca5BB1C5b"),
};

const BERACHAIN_ADDRESSES: DeFiAddresses = DeFiAddresses {
    weth: address!("0x2F6F07CDcf3588944Bf4C42aC74ff24bF56e7590"),
    usdc: address!("0x549943e04f40284185054145c6E4e9568C1D3241"),
    usde: address!("0x5d3a1Ff2b6BAb83b63cd9AD0787074081a52ef34"),
    honey: address!("0xFCBD14DC51f0A4d49d5E53C2E0950e0bC26d0Dce"),
    nect: address!("0x1cE0a25D13CE4d52071aE7e02Cf1F6606F4C79d3"),
    wbtc: address!("0x0555E30da8f98308EdB960aa94C0Db47230d2B9c"),
    stbtc: address!("0xf6718b2701D4a6498eF77D7c152b2137Ab28b8A3"),
    pumpbtc: address!("0x1fCca65fb6Ae3b2758b9b2B394CB227eAE404e1E"),
    kodiak_router: address!("0x679a7C63FC83b6A4D9C1F931891d705483d4791F"),
    honey_factory: address!("0xA4aFef880F5cE1f63c9fb48F661E27F8B4216401"),
    nect_psm: address!("0xB73d4eA53d2F3a4A6EaE1c1dB1F9bB7A0D7E1c25"),
    satlayer_vault: address!("0xd0fF6B5cF0a3C9f6F8c25E3D8D2bC5a6A4eC0f1D"),
};

/// Protocol addresses for a chain. Exhaustive over `Chain`.
pub fn defi_addresses(chain: Chain) -> &'static DeFiAddresses {
    match chain {
        Chain::Cartio => &CARTIO_ADDRESSES,
        Chain::Berachain => &BERACHAIN_ADDRESSES,
    }
}

// ── Simulation roles ───────────────────────────────────────────────

/// Contracts that take part in executing a campaign's deposit recipe.
#[derive(Debug, Clone, Copy)]
pub struct Roles {
    /// Royco deposit executor holding campaigns and weiroll wallets.
    pub deposit_executor: Address,
    /// Contract storing dynamic recipe parameters (`setSingleValue`/`getValue`).
    pub setter: Address,
    /// MultiSend-style contract targeted by delegate-call batches.
    pub multicall: Address,
    /// Pure/view helpers used from recipes (wallet address, bps math, checks).
    pub helpers: Address,
}

/// Safe MultiSendCallOnly v1.4.1, same address on every chain.
const MULTI_SEND_CALL_ONLY: Address = address!("0x9641d764fc13c8B624c04430C7356C1C7C8102e2");

const CARTIO_ROLES: Roles = Roles {
    deposit_executor: address!("0x17621de23Ff8Ad9AdDd82077B0C13F3472367382"),
    setter: address!("0x67D0B6e109b82B51706dC4D71B42Bf19CdFC8d1e"),
    multicall: MULTI_SEND_CALL_ONLY,
    helpers: address!("0x1c6bC6b6D87e0d3C8e29B4c1d7a3A0D0A76e3b42"),
};

const BERACHAIN_ROLES: Roles = Roles {
    deposit_executor: address!("0xEC1F64Cd852c65A22bCaA778b2ed76Bc5502645C"),
    setter: address!("0x67D0B6e109b82B51706dC4D71B42Bf19CdFC8d1e"),
    multicall: MULTI_SEND_CALL_ONLY,
    helpers: address!("0x1c6bC6b6D87e0d3C8e29B4c1d7a3A0D0A76e3b42"),
};

pub fn roles(chain: Chain) -> &'static Roles {
    match chain {
        Chain::Cartio => &CARTIO_ROLES,
        Chain::Berachain => &BERACHAIN_ROLES,
    }
}

/// First block worth scanning for deposit executor events.
pub fn deposit_executor_creation_block(chain: Chain) -> u64 {
    match chain {
        Chain::Cartio => 4_417_729,
        Chain::Berachain => 148_757,
    }
}

// ── Token holders ──────────────────────────────────────────────────

/// Accounts holding enough of each token to fund a simulation.
pub fn token_holders(chain: Chain) -> HashMap<Address, Address> {
    let a = defi_addresses(chain);
    let pairs: &[(Address, Address)] = match chain {
        Chain::Cartio => &[
            (a.usdc, address!("0x3a5c1B6b3F2E4D8A0Fd9E6a3B1f0b6C7d2E8F901")),
            (a.weth, address!("0x8a73D1380345942F1cb32541F1b19C40D8e6C94A")),
            (a.pumpbtc, address!("0x7E6e0bA1d7D5B6c9A0b0A5B4e38F4c2Dd8E1f2A3")),
        ],
        Chain::Berachain => &[
            (a.usdc, address!("0x90bc07408f5b5eAc4dE38Af76EA6069e1fcEe363")),
            (a.weth, address!("0x4A9DE8ADD0F6aB4F1d2D1DD05E6B8f2Be0e0AB0c")),
            (a.usde, address!("0x2Df8A6c6c0Bfa7c0F4B7D0E0F5C64b3A3D76a1E8")),
            (a.wbtc, address!("0x46fcd35431f5B371224ACC2e2E91732867B1A77e")),
            (a.pumpbtc, address!("0x4e3B1C2e2cCc7A8c40A2f2d06E8B5dC51E2f8fB9")),
        ],
    };
    pairs.iter().copied().collect()
}
