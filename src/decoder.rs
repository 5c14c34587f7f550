use crate::calls::{
    approveCall, safeBatchTransferFromCall, safeTransferFromCall, setApprovalForAllCall,
    transferCall, transferFromCall,
};
use alloy::sol_types::SolCall;
use alloy_primitives::{Address, U256, hex};

/// Decoded view of a transaction's `input` field. Empty for plain value
/// transfers; otherwise identifies the called function.
#[derive(Debug, Clone, Default)]
pub struct DecodedInput {
    pub function: Option<FunctionCall>,
}

/// A call identified by its 4-byte selector. `signature` is present for
/// recognized functions, `args` only when argument decoding succeeded.
#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub selector: [u8; 4],
    pub signature: Option<&'static str>,
    pub args: Option<DecodedArgs>,
}

#[derive(Debug, Clone, Default)]
pub struct DecodedArgs {
    pub addresses: Vec<Address>,
    pub amounts: Vec<U256>,
}

impl DecodedInput {
    pub fn has_function_data(&self) -> bool {
        self.function.is_some()
    }

    /// Does any decoded argument reference `address`?
    pub fn contains_address(&self, address: &str) -> bool {
        let Ok(wanted) = address.trim().parse::<Address>() else {
            return false;
        };
        self.function
            .as_ref()
            .and_then(|f| f.args.as_ref())
            .is_some_and(|args| args.addresses.contains(&wanted))
    }
}

/// Decode a raw hex input blob. Pure; never fails. Input too short to hold
/// a selector (or not hex at all) degrades to "no function data", and a
/// recognized selector with a malformed tail degrades to "function
/// identified, arguments unavailable".
pub fn decode_input(input: &str) -> DecodedInput {
    let raw = input.trim();
    let raw = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    if raw.len() < 8 {
        return DecodedInput::default();
    }

    let Some(selector_hex) = raw.get(..8) else {
        return DecodedInput::default();
    };
    let Ok(selector_bytes) = hex::decode(selector_hex) else {
        return DecodedInput::default();
    };
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&selector_bytes);

    let args = hex::decode(raw)
        .ok()
        .and_then(|data| decode_args(selector, &data));

    DecodedInput {
        function: Some(FunctionCall {
            selector,
            signature: signature_for(selector),
            args,
        }),
    }
}

fn signature_for(selector: [u8; 4]) -> Option<&'static str> {
    match selector {
        transferCall::SELECTOR => Some(transferCall::SIGNATURE),
        approveCall::SELECTOR => Some(approveCall::SIGNATURE),
        transferFromCall::SELECTOR => Some(transferFromCall::SIGNATURE),
        safeTransferFromCall::SELECTOR => Some(safeTransferFromCall::SIGNATURE),
        safeBatchTransferFromCall::SELECTOR => Some(safeBatchTransferFromCall::SIGNATURE),
        setApprovalForAllCall::SELECTOR => Some(setApprovalForAllCall::SIGNATURE),
        _ => None,
    }
}

fn decode_args(selector: [u8; 4], data: &[u8]) -> Option<DecodedArgs> {
    match selector {
        transferCall::SELECTOR => transferCall::abi_decode(data).ok().map(|c| DecodedArgs {
            addresses: vec![c.to],
            amounts: vec![c.value],
        }),
        approveCall::SELECTOR => approveCall::abi_decode(data).ok().map(|c| DecodedArgs {
            addresses: vec![c.spender],
            amounts: vec![c.value],
        }),
        transferFromCall::SELECTOR => {
            transferFromCall::abi_decode(data).ok().map(|c| DecodedArgs {
                addresses: vec![c.from, c.to],
                amounts: vec![c.value],
            })
        }
        safeTransferFromCall::SELECTOR => {
            safeTransferFromCall::abi_decode(data).ok().map(|c| DecodedArgs {
                addresses: vec![c.from, c.to],
                amounts: vec![c.tokenId],
            })
        }
        safeBatchTransferFromCall::SELECTOR => {
            safeBatchTransferFromCall::abi_decode(data)
                .ok()
                .map(|c| DecodedArgs {
                    addresses: vec![c.from, c.to],
                    amounts: c.ids.into_iter().chain(c.values).collect(),
                })
        }
        setApprovalForAllCall::SELECTOR => {
            setApprovalForAllCall::abi_decode(data)
                .ok()
                .map(|c| DecodedArgs {
                    addresses: vec![c.operator],
                    amounts: Vec::new(),
                })
        }
        _ => None,
    }
}
