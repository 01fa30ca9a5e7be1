
use alloy::primitives::{B256, U256};
use alloy::sol_types::SolCall;

use yield_shortcuts::error::Error;
use yield_shortcuts::model::batch::SafeBatchFile;
use yield_shortcuts::model::chain::Chain;
use yield_shortcuts::onchain::abi::{IDepositExecutor, ISetter, IWeirollWallet};
use yield_shortcuts::onchain::addresses::roles;
use yield_shortcuts::quoter::OperationType;
use yield_shortcuts::run::assemble::decode_multicall;
use yield_shortcuts::run::matcher::VerificationPolicy;
use yield_shortcuts::run::{Outcome, build_transaction};
use yield_shortcuts::shortcuts::dolomite::DolomiteDylPumpBtc;
use yield_shortcuts::shortcuts::{Catalog, Shortcut};

use mock_common::*;

// ── Helpers ──────────────────────────────────────────────────────────

fn plain_catalog() -> Catalog {
    Catalog::new(vec![Box::new(PlainVaultDeposit)])
}

/// One pending wallet holding 100 recorded + 50 loose of token A.
fn plain_reader(verified: bool) -> MockReader {
    let (campaign, hash) = campaign_for(&PlainVaultDeposit, Chain::Berachain, verified);
    let mut reader = MockReader::new(campaign, hash);
    reader.wallets = vec![wallet(1)];
    reader.deposits.insert((wallet(1), TOKEN_A), U256::from(100));
    reader.balances.insert((wallet(1), TOKEN_A), U256::from(50));
    reader
}

fn expect_error(err: anyhow::Error) -> Error {
    match err.downcast::<Error>() {
        Ok(e) => e,
        Err(other) => panic!("expected a domain error, got {other:?}"),
    }
}

// ── Build path ───────────────────────────────────────────────────────

#[tokio::test]
async fn verified_campaign_builds_single_call_batch() {
    let dir = tempfile::tempdir().unwrap();
    let reader = plain_reader(true);
    let quoter = MockQuoter::with(vec![success(&["149", "1"], "210000")]);
    let config = config(Chain::Berachain, dir.path());

    let outcome = build_transaction(&reader, &quoter, &plain_catalog(), &config)
        .await
        .unwrap();

    let Outcome::Built(built) = outcome else {
        panic!("expected a built transaction");
    };
    assert_eq!(built.shortcut, "test-plain-vault");
    assert_eq!(built.report.weiroll_wallet, wallet(1));
    assert_eq!(built.report.amounts_in, vec!["150"]);
    assert_eq!(built.report.min_amount_out, "0");
    assert_eq!(built.report.quote[&TOKEN_B], "149");
    assert_eq!(built.report.dust[&TOKEN_A], "1");
    assert_eq!(built.report.gas, "210000");
    assert!(!built.assembled.is_multicall());

    // only the verification quote was needed
    let requests = quoter.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.chain_id, 80094);
    assert_eq!(request.token_out, vec![TOKEN_B, TOKEN_A]);
    assert!(request.token_in.is_empty());
    let tx = &request.transactions[0];
    assert_eq!(tx.from, OWNER);
    assert_eq!(tx.to, roles(Chain::Berachain).deposit_executor);
    assert_eq!(tx.receiver, Some(wallet(1)));
    assert_eq!(tx.operation_type, None);
    let call = IDepositExecutor::executeDepositRecipesCall::abi_decode(&tx.data).unwrap();
    assert_eq!(call._sourceMarketHash, MARKET);
    assert_eq!(call._weirollWallets, vec![wallet(1)]);

    // batch file on disk
    assert_eq!(
        built.batch_path,
        dir.path().join(format!("tx-builder-{MARKET}.json"))
    );
    let written: SafeBatchFile =
        serde_json::from_str(&std::fs::read_to_string(&built.batch_path).unwrap()).unwrap();
    assert_eq!(written.transactions.len(), 1);
    assert_eq!(written.chain_id, "80094");
    assert_eq!(written.meta.created_from_safe_address, OWNER);
    assert_eq!(
        written.transactions[0].contract_method.name,
        "executeDepositRecipes"
    );
    assert_eq!(
        written.transactions[0].contract_inputs_values["_weirollWallets"],
        format!("[{}]", wallet(1))
    );
}

#[tokio::test]
async fn first_pending_wallet_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let mut reader = plain_reader(true);
    reader.wallets = vec![wallet(1), wallet(2), wallet(3)];
    reader.executed = vec![wallet(1)];
    reader.deposits.insert((wallet(2), TOKEN_A), U256::from(7));
    let quoter = MockQuoter::with(vec![success(&["7", "0"], "1")]);

    let outcome = build_transaction(&reader, &quoter, &plain_catalog(), &config(Chain::Berachain, dir.path()))
        .await
        .unwrap();

    assert_eq!(outcome.report().weiroll_wallet, wallet(2));
    assert_eq!(outcome.report().amounts_in, vec!["7"]);
}

#[tokio::test]
async fn setter_values_are_derived_and_batched() {
    let dir = tempfile::tempdir().unwrap();
    let chain = Chain::Berachain;
    let shortcut = DolomiteDylPumpBtc;
    let output = shortcut.build(chain).unwrap();
    let token_in = output.metadata.tokens_in[0];
    let token_out = output.metadata.tokens_out[0];

    let (campaign, hash) = campaign_for(&shortcut, chain, true);
    let mut reader = MockReader::new(campaign, hash);
    reader.wallets = vec![wallet(4)];
    reader
        .deposits
        .insert((wallet(4), token_in), U256::from(1_000_000));

    let quoter = MockQuoter::with(vec![
        success(&["1000000"], "300000"),
        success(&["999900", "0"], "350000"),
    ]);

    let outcome = build_transaction(&reader, &quoter, &Catalog::builtin(), &config(chain, dir.path()))
        .await
        .unwrap();
    let Outcome::Built(built) = outcome else {
        panic!("expected a built transaction");
    };
    let roles = roles(chain);

    assert_eq!(built.shortcut, "dolomite-dylpumpbtc");
    assert_eq!(built.report.min_amount_out, "999700");
    assert_eq!(built.report.min_amount_out_hex, "0xf4114");
    assert_eq!(built.report.quote[&token_out], "999900");
    assert_eq!(built.setter_calls.input_data["minAmountOut"], "999700");

    // setter simulation: setter write from the owner, then the recipe on the wallet
    let requests = quoter.requests();
    assert_eq!(requests.len(), 2);
    let derive = &requests[0];
    assert_eq!(derive.token_in, vec![token_in]);
    assert_eq!(derive.amount_in, vec!["1000000"]);
    assert_eq!(derive.token_out, vec![token_out]);
    assert_eq!(derive.transactions.len(), 2);
    assert_eq!(derive.transactions[0].from, OWNER);
    assert_eq!(derive.transactions[0].to, roles.setter);
    let zeroed = ISetter::setSingleValueCall::abi_decode(&derive.transactions[0].data).unwrap();
    assert_eq!(zeroed.value, U256::ZERO);
    assert_eq!(derive.transactions[1].to, wallet(4));
    let executed = IWeirollWallet::executeWeirollCall::abi_decode(&derive.transactions[1].data).unwrap();
    assert_eq!(executed.commands, output.script.commands);

    // assembled: delegate-call multicall of [setter, executeDepositRecipes]
    assert!(built.assembled.is_multicall());
    let verify = &requests[1];
    let tx = &verify.transactions[0];
    assert_eq!(tx.to, roles.multicall);
    assert_eq!(tx.operation_type, Some(OperationType::DelegateCall));
    assert_eq!(verify.token_out, vec![token_out, token_in]);

    let calls = decode_multicall(&tx.data).unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].target, roles.setter);
    let set = ISetter::setSingleValueCall::abi_decode(&calls[0].data).unwrap();
    assert_eq!(set.index, U256::ZERO);
    assert_eq!(set.value, U256::from(999_700));
    assert_eq!(calls[1].target, roles.deposit_executor);

    assert_eq!(built.batch.transactions.len(), 2);
    assert_eq!(built.batch.transactions[0].contract_method.name, "setSingleValue");
    assert_eq!(built.batch.transactions[0].contract_inputs_values["value"], "999700");
    assert_eq!(built.batch.transactions[1].contract_method.name, "executeDepositRecipes");
}

// ── Simulation path ──────────────────────────────────────────────────

#[tokio::test]
async fn unverified_campaign_only_simulates() {
    let dir = tempfile::tempdir().unwrap();
    let reader = plain_reader(false);
    let quoter = MockQuoter::with(vec![success(&["150", "0"], "90000")]);

    let outcome = build_transaction(&reader, &quoter, &plain_catalog(), &config(Chain::Berachain, dir.path()))
        .await
        .unwrap();

    let Outcome::Simulated { dry_run, .. } = outcome else {
        panic!("expected a simulation");
    };
    assert_eq!(dry_run.report.amounts_in, vec!["150"]);
    assert_eq!(dry_run.report.quote[&TOKEN_B], "150");
    assert!(dir_is_empty(dir.path()));

    let requests = quoter.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].token_in, vec![TOKEN_A]);
    assert_eq!(requests[0].amount_in, vec!["150"]);
    assert_eq!(requests[0].token_out, vec![TOKEN_B, TOKEN_A]);
    // no setters: just the recipe
    assert_eq!(requests[0].transactions.len(), 1);
    assert_eq!(requests[0].transactions[0].to, wallet(1));
}

#[tokio::test]
async fn all_executed_simulates_with_recorded_deposit() {
    let dir = tempfile::tempdir().unwrap();
    let mut reader = plain_reader(true);
    reader.wallets = vec![wallet(1), wallet(2)];
    reader.executed = vec![wallet(2), wallet(1)];
    reader.deposits.insert((wallet(2), TOKEN_A), U256::from(80));
    reader.balances.insert((wallet(2), TOKEN_A), U256::from(20));
    let quoter = MockQuoter::with(vec![success(&["80", "0"], "1")]);

    let outcome = build_transaction(&reader, &quoter, &plain_catalog(), &config(Chain::Berachain, dir.path()))
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Simulated { .. }));
    assert_eq!(outcome.report().weiroll_wallet, wallet(2));
    assert_eq!(outcome.report().amounts_in, vec!["80"]);
    assert!(dir_is_empty(dir.path()));
}

// ── Failures ─────────────────────────────────────────────────────────

#[tokio::test]
async fn quote_error_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let reader = plain_reader(true);
    let quoter = MockQuoter::with(vec![failure("execution reverted")]);

    let err = build_transaction(&reader, &quoter, &plain_catalog(), &config(Chain::Berachain, dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(expect_error(err), Error::QuoteFailed(msg) if msg == "execution reverted"));
    assert!(dir_is_empty(dir.path()));
}

#[tokio::test]
async fn empty_quote_response_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let reader = plain_reader(true);
    let quoter = MockQuoter::with(vec![vec![]]);

    let err = build_transaction(&reader, &quoter, &plain_catalog(), &config(Chain::Berachain, dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(expect_error(err), Error::EmptyQuote));
    assert!(dir_is_empty(dir.path()));
}

#[tokio::test]
async fn unknown_recipe_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut reader = plain_reader(true);
    reader.campaign.receipt_token = TOKEN_A;
    let quoter = MockQuoter::default();

    let err = build_transaction(&reader, &quoter, &plain_catalog(), &config(Chain::Berachain, dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(expect_error(err), Error::ShortcutNotFound(_)));
    assert!(quoter.requests().is_empty());
}

#[tokio::test]
async fn no_bridged_wallets() {
    let dir = tempfile::tempdir().unwrap();
    let mut reader = plain_reader(true);
    reader.wallets.clear();
    let quoter = MockQuoter::default();

    let err = build_transaction(&reader, &quoter, &plain_catalog(), &config(Chain::Berachain, dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(expect_error(err), Error::NoWallets(hash) if hash == MARKET));
}

#[tokio::test]
async fn hash_mismatch_follows_policy() {
    let dir = tempfile::tempdir().unwrap();
    let mut reader = plain_reader(true);
    reader.onchain_hash = B256::repeat_byte(0xee);

    // lenient: warn and carry on
    let quoter = MockQuoter::with(vec![success(&["150", "0"], "1")]);
    let lenient = config(Chain::Berachain, dir.path());
    assert!(
        build_transaction(&reader, &quoter, &plain_catalog(), &lenient)
            .await
            .is_ok()
    );

    // strict: abort before any quote
    let strict_dir = tempfile::tempdir().unwrap();
    let quoter = MockQuoter::default();
    let mut strict = config(Chain::Berachain, strict_dir.path());
    strict.verification = VerificationPolicy::Strict;
    let err = build_transaction(&reader, &quoter, &plain_catalog(), &strict)
        .await
        .unwrap_err();

    assert!(matches!(
        expect_error(err),
        Error::VerificationHashMismatch { onchain, .. } if onchain == B256::repeat_byte(0xee)
    ));
    assert!(quoter.requests().is_empty());
    assert!(dir_is_empty(strict_dir.path()));
}
