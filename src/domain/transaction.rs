use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionRequest, H256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a builder call is producing. Drives gas-table selection and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperationKind {
    NativeTransfer,
    TokenTransfer,
    Approve,
    Wrap,
    Unwrap,
    ExchangeDeposit,
    ExchangeWithdraw,
    AccountUpsert,
    OrderSubmit,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::NativeTransfer => "native_transfer",
            OperationKind::TokenTransfer => "token_transfer",
            OperationKind::Approve => "approve",
            OperationKind::Wrap => "wrap",
            OperationKind::Unwrap => "unwrap",
            OperationKind::ExchangeDeposit => "exchange_deposit",
            OperationKind::ExchangeWithdraw => "exchange_withdraw",
            OperationKind::AccountUpsert => "account_upsert",
            OperationKind::OrderSubmit => "order_submit",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven fields of a legacy (EIP-155) transaction, all populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub chain_id: u64,
    pub nonce: U256,
    pub gas_price: U256,
    pub gas_limit: U256,
}

impl UnsignedTransaction {
    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest::new()
            .to(self.to)
            .value(self.value)
            .data(self.data.clone())
            .chain_id(self.chain_id)
            .nonce(self.nonce)
            .gas_price(self.gas_price)
            .gas(self.gas_limit)
    }

    pub fn to_typed(&self) -> TypedTransaction {
        TypedTransaction::Legacy(self.to_request())
    }

    /// Unsigned RLP with the EIP-155 chain id fields.
    pub fn raw(&self) -> RawTransaction {
        RawTransaction(self.to_request().rlp())
    }
}

/// Unsigned RLP payload, as handed over by the exchange protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction(pub Bytes);

impl AsRef<[u8]> for RawTransaction {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Signed RLP, ready for `eth_sendRawTransaction`.
    pub raw: Bytes,
    pub hash: H256,
}

impl SignedTransaction {
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.raw))
    }
}
