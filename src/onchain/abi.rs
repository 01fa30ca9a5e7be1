use alloy::sol;

// ── Deposit executor + weiroll wallet ──────────────────────────────

sol! {
    /// Weiroll recipe as stored by the deposit executor.
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    struct Recipe {
        bytes32[] commands;
        bytes[] state;
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IDepositExecutor {
        function sourceMarketHashToDepositCampaign(bytes32 marketHash) external view returns (
            address owner,
            bool verified,
            uint8 numInputTokens,
            address receiptToken,
            uint256 unlockTimestamp,
            Recipe depositRecipe
        );
        function getCampaignVerificationHash(bytes32 marketHash) external view returns (bytes32 verificationHash);
        function getTotalTokenAmountDepositedInWeirollWallet(
            bytes32 _sourceMarketHash,
            address _weirollWallet,
            address _token
        ) external view returns (uint256 totalAmountDeposited);
        function executeDepositRecipes(bytes32 _sourceMarketHash, address[] calldata _weirollWallets) external;

        event CCDMBridgeProcessed(
            bytes32 indexed sourceMarketHash,
            uint256 indexed ccdmNonce,
            bytes32 indexed guid,
            address weirollWallet
        );
        event WeirollWalletsExecutedDepositRecipe(
            bytes32 indexed sourceMarketHash,
            address[] weirollWalletsExecuted,
            uint256[] receiptTokensReceived
        );
    }

    #[allow(missing_docs)]
    contract IWeirollWallet {
        function executeWeiroll(bytes32[] calldata commands, bytes[] calldata state) external payable returns (bytes[] memory);
    }
}

// ── Setter, multicall and shortcut helpers ─────────────────────────

sol! {
    #[allow(missing_docs)]
    contract ISetter {
        function setSingleValue(uint256 index, uint256 value) external;
        function getValue(uint256 index) external view returns (uint256);
    }

    #[allow(missing_docs)]
    contract IMultiSend {
        function multiSend(bytes memory transactions) external payable;
    }

    #[allow(missing_docs)]
    contract IShortcutHelpers {
        function sender() external view returns (address);
        function applyBps(uint256 amount, uint256 bps) external pure returns (uint256);
        function ensureMinAmount(uint256 amount, uint256 minAmount) external pure;
    }
}

// ── Tokens and protocol entry points used by recipes ───────────────

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
    }

    #[allow(missing_docs)]
    contract IErc4626 {
        function deposit(uint256 assets, address receiver) external returns (uint256 shares);
    }

    #[allow(missing_docs)]
    contract IKodiakIslandRouter {
        function addLiquidity(
            address island,
            uint256 amount0Max,
            uint256 amount1Max,
            uint256 amount0Min,
            uint256 amount1Min,
            uint256 amountSharesMin,
            address receiver
        ) external returns (uint256 amount0, uint256 amount1, uint256 mintAmount);
    }

    #[allow(missing_docs)]
    contract IHoneyFactory {
        function mint(address asset, uint256 amount, address receiver, bool expressMode) external returns (uint256);
        function redeem(address asset, uint256 honeyAmount, address receiver, bool expressMode) external returns (uint256[] memory);
    }

    #[allow(missing_docs)]
    contract INectPsm {
        function deposit(address stable, uint256 stableAmount, address receiver) external returns (uint256);
        function withdraw(address stable, uint256 nectAmount, address receiver) external returns (uint256);
    }

    #[allow(missing_docs)]
    contract ISatlayerPool {
        function depositFor(address _token, address _for, uint256 _amount) external;
    }
}
