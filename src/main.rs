use dex_wallet::*;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use ethers::providers::{Http, Middleware, Provider};
use log::info;
use std::sync::Arc;

use abi::AbiEncoder;
use config::{Args, Command, Config};
use domain::time::validity_window;
use domain::{OrderRecord, OrderRequest, SignedTransaction, SubmissionReceipt};
use execution::{OrderBuilder, OrderSubmitter, TransactionBuilder};
use wallet::{Account, AddressProvider, ChainNonces, LocalSigner};

// ===============================
// DRY-RUN ORDER SUBMITTER
// ===============================

/// Prints the order instead of relaying it; the exchange relay is not
/// wired into the CLI.
struct PrintSubmitter;

#[async_trait]
impl OrderSubmitter for PrintSubmitter {
    async fn submit_order(
        &self,
        _account: &dyn Account,
        order: &OrderRecord,
    ) -> dex_wallet::Result<SubmissionReceipt> {
        let json = serde_json::to_string_pretty(order)
            .map_err(|e| WalletError::SubmissionFailed(e.to_string()))?;
        println!("{}", json);
        Ok(SubmissionReceipt {
            order_hash: None,
            accepted: false,
            message: Some("dry run, not relayed".to_string()),
        })
    }
}

// ===============================
// RPC + BUILDER
// ===============================

struct Chain {
    provider: Arc<Provider<Http>>,
    builder: TransactionBuilder,
}

impl Chain {
    fn connect(config: Arc<Config>, account: Arc<LocalSigner>) -> Result<Self> {
        let rpc_url = std::env::var("RPC_URL").context("RPC_URL missing in .env")?;
        let provider = Arc::new(Provider::<Http>::try_from(rpc_url.as_str())?);

        let builder = TransactionBuilder::new(
            config,
            Arc::new(AbiEncoder::new()?),
            Arc::new(ChainNonces::new(provider.clone())),
            account,
        );

        Ok(Self { provider, builder })
    }

    async fn finish(&self, signed: SignedTransaction, broadcast: bool) -> Result<()> {
        if !broadcast {
            println!("hash: {:?}", signed.hash);
            println!("raw:  {}", signed.to_hex());
            return Ok(());
        }

        let pending = self.provider.send_raw_transaction(signed.raw.clone()).await?;
        info!("📡 Broadcast {:?}", pending.tx_hash());
        println!("{:?}", pending.tx_hash());
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args = Args::parse();
    let config = Arc::new(Config::load(&args.config)?);

    // ===============================
    // SIGNER - READ FROM .ENV
    // ===============================
    let private_key = std::env::var("PRIVATE_KEY").context("PRIVATE_KEY missing in .env file")?;
    let account = Arc::new(LocalSigner::new(&private_key, config.chain_id)?);

    info!("🔑 Signer loaded: {:?} (chain {})", account.address(), config.chain_id);

    match args.command {
        Command::Transfer {
            to,
            symbol,
            amount,
            gas_price,
        } => {
            let chain = Chain::connect(config, account)?;
            let signed = chain.builder.transfer(to, &symbol, &amount, gas_price).await?;
            chain.finish(signed, args.broadcast).await?;
        }

        Command::Approve {
            symbol,
            amount,
            gas_price,
        } => {
            let chain = Chain::connect(config, account)?;
            let signed = chain.builder.approve(&symbol, amount, gas_price).await?;
            chain.finish(signed, args.broadcast).await?;
        }

        Command::Wrap { amount, gas_price } => {
            let chain = Chain::connect(config, account)?;
            let signed = chain.builder.wrap(&amount, gas_price).await?;
            chain.finish(signed, args.broadcast).await?;
        }

        Command::Unwrap { amount, gas_price } => {
            let chain = Chain::connect(config, account)?;
            let signed = chain.builder.unwrap(&amount, gas_price).await?;
            chain.finish(signed, args.broadcast).await?;
        }

        Command::Order {
            account_id,
            token_s,
            token_b,
            token_s_id,
            token_b_id,
            pub_key_x,
            pub_key_y,
            amount_s,
            amount_b,
            order_id,
            valid_days,
        } => {
            let (valid_since, valid_until) = validity_window(valid_days);
            let request = OrderRequest {
                owner: account.address(),
                account_id,
                token_s,
                token_b,
                token_s_id,
                token_b_id,
                trading_pub_key_x: pub_key_x,
                trading_pub_key_y: pub_key_y,
                trading_priv_key: std::env::var("TRADING_PRIV_KEY").unwrap_or_default(),
                amount_s,
                amount_b,
                order_id,
                valid_since: valid_since as f64,
                valid_until: valid_until as f64,
            };

            let orders = OrderBuilder::new(config, Arc::new(PrintSubmitter), account);
            let receipt = orders.submit_order(&request).await?;
            info!("📝 {}", receipt.message.unwrap_or_default());
        }
    }

    Ok(())
}
