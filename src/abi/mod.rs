use crate::execution::errors::{Result, WalletError};
use ethers::abi::{Abi, Token};
use ethers::types::Bytes;
use serde_json::from_slice;

// ===============================
// CONTRACTS
// ===============================

/// Contract interfaces the builders produce call data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractAbi {
    Erc20,
    WrappedNative,
}

/// Call arguments keyed by ABI parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedArgs(Vec<(String, Token)>);

impl NamedArgs {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn arg(mut self, name: &str, value: Token) -> Self {
        self.0.push((name.to_string(), value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Token> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Maps a function name and named arguments to transaction call data.
pub trait CallDataEncoder: Send + Sync {
    fn encode(&self, contract: ContractAbi, function: &str, args: &NamedArgs) -> Result<Bytes>;
}

// ===============================
// ABI LOADERS
// ===============================

fn load_erc20_abi() -> Result<Abi> {
    from_slice(include_bytes!("erc20.json")).map_err(|e| WalletError::Encoding(e.to_string()))
}

fn load_weth_abi() -> Result<Abi> {
    from_slice(include_bytes!("weth.json")).map_err(|e| WalletError::Encoding(e.to_string()))
}

/// Encoder over the bundled ERC-20 and WETH JSON ABIs.
#[derive(Debug, Clone)]
pub struct AbiEncoder {
    erc20: Abi,
    weth: Abi,
}

impl AbiEncoder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            erc20: load_erc20_abi()?,
            weth: load_weth_abi()?,
        })
    }

    fn abi(&self, contract: ContractAbi) -> &Abi {
        match contract {
            ContractAbi::Erc20 => &self.erc20,
            ContractAbi::WrappedNative => &self.weth,
        }
    }
}

impl CallDataEncoder for AbiEncoder {
    fn encode(
        &self,
        contract: ContractAbi,
        function: &str,
        args: &NamedArgs,
    ) -> Result<Bytes> {
        let func = self.abi(contract).function(function).map_err(|_| {
            WalletError::Encoding(format!("unknown function {:?} on {:?}", function, contract))
        })?;

        if args.len() != func.inputs.len() {
            return Err(WalletError::Encoding(format!(
                "{} takes {} arguments, got {}",
                function,
                func.inputs.len(),
                args.len()
            )));
        }

        let mut tokens = Vec::with_capacity(func.inputs.len());
        for param in &func.inputs {
            let token = args.get(&param.name).ok_or_else(|| {
                WalletError::Encoding(format!("{} is missing argument {}", function, param.name))
            })?;
            if !token.type_check(&param.kind) {
                return Err(WalletError::Encoding(format!(
                    "{}: argument {} is not a {}",
                    function, param.name, param.kind
                )));
            }
            tokens.push(token.clone());
        }

        let data = func
            .encode_input(&tokens)
            .map_err(|e| WalletError::Encoding(e.to_string()))?;
        Ok(Bytes::from(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::{Address, U256};

    #[test]
    fn encodes_erc20_transfer() {
        let enc = AbiEncoder::new().unwrap();
        let to = Address::repeat_byte(0x22);
        let data = enc
            .encode(
                ContractAbi::Erc20,
                "transfer",
                &NamedArgs::none()
                    .arg("_to", Token::Address(to))
                    .arg("_value", Token::Uint(U256::from(1000))),
            )
            .unwrap();

        assert_eq!(data.len(), 4 + 32 + 32);
        assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(&data[16..36], to.as_bytes());
        assert_eq!(U256::from_big_endian(&data[36..68]), U256::from(1000));
    }

    #[test]
    fn argument_order_follows_abi_not_caller() {
        let enc = AbiEncoder::new().unwrap();
        let spender = Address::repeat_byte(0x33);
        let a = enc
            .encode(
                ContractAbi::Erc20,
                "approve",
                &NamedArgs::none()
                    .arg("_value", Token::Uint(U256::one()))
                    .arg("_spender", Token::Address(spender)),
            )
            .unwrap();
        let b = enc
            .encode(
                ContractAbi::Erc20,
                "approve",
                &NamedArgs::none()
                    .arg("_spender", Token::Address(spender))
                    .arg("_value", Token::Uint(U256::one())),
            )
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(&a[..4], &[0x09, 0x5e, 0xa7, 0xb3]);
    }

    #[test]
    fn encodes_weth_deposit_and_withdraw() {
        let enc = AbiEncoder::new().unwrap();
        let deposit = enc
            .encode(ContractAbi::WrappedNative, "deposit", &NamedArgs::none())
            .unwrap();
        assert_eq!(&deposit[..], &[0xd0, 0xe3, 0x0d, 0xb0]);

        let withdraw = enc
            .encode(
                ContractAbi::WrappedNative,
                "withdraw",
                &NamedArgs::none().arg("wad", Token::Uint(U256::from(5))),
            )
            .unwrap();
        assert_eq!(&withdraw[..4], &[0x2e, 0x1a, 0x7d, 0x4d]);
        assert_eq!(U256::from_big_endian(&withdraw[4..]), U256::from(5));
    }

    #[test]
    fn rejects_bad_calls() {
        let enc = AbiEncoder::new().unwrap();
        let unknown = enc.encode(ContractAbi::WrappedNative, "transferFrom", &NamedArgs::none());
        assert!(matches!(unknown, Err(WalletError::Encoding(_))));

        let missing = enc.encode(
            ContractAbi::Erc20,
            "transfer",
            &NamedArgs::none()
                .arg("to", Token::Address(Address::zero()))
                .arg("_value", Token::Uint(U256::one())),
        );
        assert!(matches!(missing, Err(WalletError::Encoding(_))));

        let mistyped = enc.encode(
            ContractAbi::WrappedNative,
            "withdraw",
            &NamedArgs::none().arg("wad", Token::Address(Address::zero())),
        );
        assert!(matches!(mistyped, Err(WalletError::Encoding(_))));

        let extra = enc.encode(
            ContractAbi::WrappedNative,
            "deposit",
            &NamedArgs::none().arg("wad", Token::Uint(U256::one())),
        );
        assert!(matches!(extra, Err(WalletError::Encoding(_))));
    }
}
